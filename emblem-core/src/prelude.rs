//! Emblem prelude: import the decorators and the registry with a single `use`.
//!
//! ```ignore
//! use emblem_core::prelude::*;
//!
//! struct HealthController;
//!
//! impl Controller for HealthController {
//!     fn register(c: &mut ControllerBuilder<'_>) {
//!         c.method("ping").decorate(get());
//!     }
//! }
//! ```

// HTTP verbs
pub use crate::decorators::{all, delete, get, head, options, patch, post, put, trace};

// Parameter sources
pub use crate::decorators::{
    bearer_token, body, body_part, cookie, cookies, header, headers, logger, param, path,
    path_params, queries, query, request, response,
};

// Parameter flags
pub use crate::decorators::{optional, required};

// Method fragments
pub use crate::decorators::{
    docs, error_return, format_response, throws, use_middleware, validate_request,
};

// Registry and controller
pub use crate::controller::{Controller, ControllerBuilder, MethodBuilder};
pub use crate::registry::MetadataRegistry;

// Function values
pub use crate::handler::{Middleware, Request, RequestHandler, ResponseFormatter};

pub use crate::error::HttpError;
pub use crate::requirement::{ParameterRequirement, SecurityContribution};
pub use crate::source::SourcePath;
pub use crate::verb::HttpVerb;

pub use serde_json::json;
