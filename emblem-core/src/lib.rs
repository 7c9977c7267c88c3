pub mod config;
pub mod controller;
pub mod decorator;
pub mod decorators;
pub mod error;
pub mod handler;
pub mod prelude;
pub mod registry;
pub mod requirement;
pub mod source;
pub mod verb;

pub use config::{ConfigError, EmblemConfig};
pub use controller::{Controller, ControllerBuilder, MethodBuilder};
pub use decorator::{ErrorReturn, MethodDecorator, ParameterDecorator};
pub use error::{HttpError, MetadataError};
pub use handler::{
    Middleware, NameTransform, Request, RequestHandler, ResponseFormatter, ValueTransform,
};
pub use registry::{
    generate_http_method_decorator, generate_method_decorator, generate_parameter_decorator,
    generate_parameter_source_decorator, ControllerMetadata, MetadataRegistry, MethodMetadata,
    MethodSummary, ParameterSummary,
};
pub use requirement::{
    merge_json, EndpointRequirement, MethodRequirement, MiddlewareList, ParameterRequirement,
    RequestValidator, ResponseFormat, SecurityContribution,
};
pub use source::{ParamLocation, SourcePath};
pub use verb::HttpVerb;

pub use serde_json;
