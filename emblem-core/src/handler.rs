//! Type-erased function values carried by requirement records.
//!
//! Every wrapper holds an `Arc<dyn Fn ..>` plus a diagnostic name, so the
//! records stay cheap to clone and readable in `Debug` output. The runtime
//! that serves requests calls them; this crate only stores them.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use serde_json::Value;

use crate::error::HttpError;

/// Request type seen by validators and middleware.
pub type Request = http::Request<Bytes>;

macro_rules! named_fn {
    (
        $(#[$meta:meta])*
        $name:ident => dyn Fn($($arg:ty),*) -> $ret:ty
    ) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            name: Cow<'static, str>,
            func: Arc<dyn Fn($($arg),*) -> $ret + Send + Sync>,
        }

        impl $name {
            pub fn new<F>(name: impl Into<Cow<'static, str>>, func: F) -> Self
            where
                F: Fn($($arg),*) -> $ret + Send + Sync + 'static,
            {
                Self {
                    name: name.into(),
                    func: Arc::new(func),
                }
            }

            pub fn name(&self) -> &str {
                &self.name
            }

            /// Whether both values wrap the same function instance.
            pub fn ptr_eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.func, &other.func)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.name).finish()
            }
        }
    };
}

named_fn! {
    /// Rewrites a parameter name when the decorator is built
    /// (for instance header names are lower-cased).
    NameTransform => dyn Fn(&str) -> String
}

named_fn! {
    /// Rewrites an extracted value before it reaches the handler.
    ValueTransform => dyn Fn(Value) -> Value
}

named_fn! {
    /// Validates an incoming request; an `Err` aborts the call.
    RequestHandler => dyn Fn(&Request) -> Result<(), HttpError>
}

named_fn! {
    /// Runs before the endpoint and may modify the request.
    Middleware => dyn Fn(&mut Request) -> Result<(), HttpError>
}

named_fn! {
    /// Serializes the handler's return value into a response body.
    ResponseFormatter => dyn Fn(&Value) -> Result<Bytes, HttpError>
}

impl NameTransform {
    pub fn apply(&self, name: &str) -> String {
        (self.func)(name)
    }

    /// Lower-case the name, as HTTP header names are case-insensitive.
    pub fn lowercase() -> Self {
        Self::new("lowercase", |name: &str| name.to_ascii_lowercase())
    }
}

impl ValueTransform {
    pub fn apply(&self, value: Value) -> Value {
        (self.func)(value)
    }

    /// Strip a case-insensitive `Bearer ` scheme prefix from a string value.
    ///
    /// Values without the prefix are only trimmed, and a bare `Bearer` with
    /// no token yields an empty string. Non-string values pass through
    /// untouched.
    pub fn strip_bearer() -> Self {
        Self::new("strip_bearer", |value: Value| match value {
            Value::String(raw) => {
                let trimmed = raw.trim();
                let token = match trimmed.split_once(char::is_whitespace) {
                    Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => {
                        rest.trim()
                    }
                    None if trimmed.eq_ignore_ascii_case("bearer") => "",
                    _ => trimmed,
                };
                Value::String(token.to_string())
            }
            other => other,
        })
    }
}

impl RequestHandler {
    pub fn call(&self, request: &Request) -> Result<(), HttpError> {
        (self.func)(request)
    }
}

impl Middleware {
    pub fn call(&self, request: &mut Request) -> Result<(), HttpError> {
        (self.func)(request)
    }
}

impl ResponseFormatter {
    pub fn format(&self, value: &Value) -> Result<Bytes, HttpError> {
        (self.func)(value)
    }

    /// Serialize as compact JSON.
    pub fn json() -> Self {
        Self::new("json", |value: &Value| {
            serde_json::to_vec(value)
                .map(Bytes::from)
                .map_err(|e| HttpError::Internal(e.to_string()))
        })
    }
}
