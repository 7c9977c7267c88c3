use http::StatusCode;
use serde_json::Value;

/// Build the standard `{ "error": message }` body used by every handler error.
pub fn error_body(message: impl Into<String>) -> Value {
    serde_json::json!({ "error": message.into() })
}

/// Error returned by request handlers, middleware and response formatters
/// attached through decorators.
///
/// The runtime that dispatches requests turns it into an HTTP response using
/// [`HttpError::status`] and [`HttpError::body`].
pub enum HttpError {
    NotFound(String),
    Unauthorized(String),
    Forbidden(String),
    BadRequest(String),
    Internal(String),
    Custom {
        status: StatusCode,
        body: Value,
    },
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            HttpError::Forbidden(_) => StatusCode::FORBIDDEN,
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HttpError::Custom { status, .. } => *status,
        }
    }

    /// JSON body for the error response.
    pub fn body(&self) -> Value {
        match self {
            HttpError::NotFound(msg)
            | HttpError::Unauthorized(msg)
            | HttpError::Forbidden(msg)
            | HttpError::BadRequest(msg)
            | HttpError::Internal(msg) => error_body(msg.as_str()),
            HttpError::Custom { body, .. } => body.clone(),
        }
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            HttpError::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            HttpError::Forbidden(msg) => write!(f, "Forbidden: {msg}"),
            HttpError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            HttpError::Internal(msg) => write!(f, "Internal Error: {msg}"),
            HttpError::Custom { status, body } => write!(f, "Custom Error ({status}): {body}"),
        }
    }
}

impl std::fmt::Debug for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

impl std::error::Error for HttpError {}

impl From<std::io::Error> for HttpError {
    fn from(err: std::io::Error) -> Self {
        HttpError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for HttpError {
    fn from(err: serde_json::Error) -> Self {
        HttpError::BadRequest(err.to_string())
    }
}

/// Errors raised while building metadata, before any request is served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// A verb string did not name one of the supported HTTP verbs.
    UnknownVerb(String),
    /// A source path was built from an empty segment list.
    EmptySourcePath,
}

impl std::fmt::Display for MetadataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetadataError::UnknownVerb(verb) => write!(f, "Unknown HTTP verb: {verb}"),
            MetadataError::EmptySourcePath => write!(f, "Parameter source path is empty"),
        }
    }
}

impl std::error::Error for MetadataError {}

/// Generate `From<E> for HttpError` implementations that map error types to
/// a specific `HttpError` variant.
///
/// # Example
///
/// ```ignore
/// emblem_core::map_error! {
///     std::num::ParseIntError => BadRequest,
///     std::fmt::Error => Internal,
/// }
/// ```
#[macro_export]
macro_rules! map_error {
    ( $( $err_ty:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$err_ty> for $crate::HttpError {
                fn from(err: $err_ty) -> Self {
                    $crate::HttpError::$variant(err.to_string())
                }
            }
        )*
    };
}
