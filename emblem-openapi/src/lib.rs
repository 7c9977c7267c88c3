mod builder;
mod config;

pub use builder::{build_operation, build_spec, OperationContext};
pub use config::OpenApiConfig;
