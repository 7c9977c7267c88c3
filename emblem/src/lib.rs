//! Emblem: declarative endpoint metadata for HTTP APIs.
//!
//! This facade crate re-exports the Emblem sub-crates through a single
//! dependency with feature flags:
//!
//! ```ignore
//! use emblem::prelude::*;
//! ```
//!
//! # Feature flags
//!
//! | Feature   | Default | Crate            |
//! |-----------|---------|------------------|
//! | `openapi` | no      | `emblem-openapi` |
//! | `full`    | no      | All of the above |

pub extern crate emblem_core;

pub use emblem_core::*;

#[cfg(feature = "openapi")]
pub use emblem_openapi;

pub mod prelude {
    pub use emblem_core::prelude::*;

    #[cfg(feature = "openapi")]
    pub use emblem_openapi::{build_spec, OpenApiConfig};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    struct Ping;

    impl Controller for Ping {
        fn register(c: &mut ControllerBuilder<'_>) {
            c.method("ping").decorate(get()).param(0, logger());
        }
    }

    #[test]
    fn prelude_covers_registration() {
        let mut registry = MetadataRegistry::new();
        registry.register::<Ping>();
        let ping = registry.get::<Ping>().unwrap().method("ping").unwrap();
        assert_eq!(ping.verbs(), &[HttpVerb::Get]);
        assert_eq!(ping.parameter(0).unwrap().source.as_ref().unwrap().to_string(), "logger");
    }

    #[cfg(feature = "openapi")]
    #[test]
    fn prelude_covers_openapi() {
        let mut registry = MetadataRegistry::new();
        registry.register::<Ping>();
        let spec = build_spec(&OpenApiConfig::new("Ping", "1.0.0"), &registry, |_, _| {
            Some("/ping".to_string())
        });
        assert_eq!(spec["paths"]["/ping"]["get"]["operationId"], "Ping_ping");
    }
}
