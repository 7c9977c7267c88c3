//! Decorator factories, one per concern.
//!
//! Each factory returns a decorator value bound to a requirement record.
//! Apply method decorators with [`MethodBuilder::decorate`] and parameter
//! decorators with [`MethodBuilder::param`].
//!
//! [`MethodBuilder::decorate`]: crate::controller::MethodBuilder::decorate
//! [`MethodBuilder::param`]: crate::controller::MethodBuilder::param

use std::borrow::Cow;

use serde_json::Value;

use crate::decorator::{ErrorReturn, MethodDecorator, ParameterDecorator};
use crate::handler::{NameTransform, RequestHandler, ResponseFormatter, ValueTransform};
use crate::registry::{
    generate_http_method_decorator, generate_method_decorator, generate_parameter_decorator,
    generate_parameter_source_decorator,
};
use crate::requirement::{
    MethodRequirement, MiddlewareList, ParameterRequirement, RequestValidator, ResponseFormat,
    SecurityContribution,
};
use crate::source::SourcePath;
use crate::verb::HttpVerb;

// ── HTTP verbs ──────────────────────────────────────────────────────────────

pub fn get() -> MethodDecorator {
    generate_http_method_decorator(HttpVerb::Get)
}

pub fn post() -> MethodDecorator {
    generate_http_method_decorator(HttpVerb::Post)
}

pub fn put() -> MethodDecorator {
    generate_http_method_decorator(HttpVerb::Put)
}

pub fn patch() -> MethodDecorator {
    generate_http_method_decorator(HttpVerb::Patch)
}

pub fn delete() -> MethodDecorator {
    generate_http_method_decorator(HttpVerb::Delete)
}

pub fn options() -> MethodDecorator {
    generate_http_method_decorator(HttpVerb::Options)
}

pub fn head() -> MethodDecorator {
    generate_http_method_decorator(HttpVerb::Head)
}

pub fn trace() -> MethodDecorator {
    generate_http_method_decorator(HttpVerb::Trace)
}

/// Answer every verb.
pub fn all() -> MethodDecorator {
    generate_http_method_decorator(HttpVerb::All)
}

// ── Parameter sources ───────────────────────────────────────────────────────

fn request_source(collection: &'static str) -> SourcePath {
    SourcePath::request().join(collection)
}

// A source read as a whole value, with no transforms.
fn whole(source: SourcePath, is_required: bool) -> ParameterDecorator {
    generate_parameter_source_decorator(source, false, is_required, None, None, None)
}

/// One query-string value. Optional by default.
pub fn query(name: impl Into<Cow<'static, str>>) -> ParameterDecorator {
    generate_parameter_source_decorator(
        request_source(SourcePath::QUERY).join(name),
        true,
        false,
        None,
        None,
        None,
    )
}

/// The whole query string as a map.
pub fn queries() -> ParameterDecorator {
    whole(request_source(SourcePath::QUERY), false)
}

/// One path parameter. Always required.
pub fn path(name: impl Into<Cow<'static, str>>) -> ParameterDecorator {
    generate_parameter_source_decorator(
        request_source(SourcePath::PARAMS).join(name),
        true,
        true,
        None,
        None,
        None,
    )
}

/// Every path parameter as a map.
pub fn path_params() -> ParameterDecorator {
    whole(request_source(SourcePath::PARAMS), true)
}

/// One request header. The name is lower-cased. Optional by default.
pub fn header(name: impl Into<Cow<'static, str>>) -> ParameterDecorator {
    generate_parameter_source_decorator(
        request_source(SourcePath::HEADERS).join(name),
        true,
        false,
        Some(NameTransform::lowercase()),
        None,
        None,
    )
}

/// Every request header as a map.
pub fn headers() -> ParameterDecorator {
    whole(request_source(SourcePath::HEADERS), false)
}

/// One cookie. Optional by default.
pub fn cookie(name: impl Into<Cow<'static, str>>) -> ParameterDecorator {
    generate_parameter_source_decorator(
        request_source(SourcePath::COOKIES).join(name),
        true,
        false,
        None,
        None,
        None,
    )
}

/// Every cookie as a map.
pub fn cookies() -> ParameterDecorator {
    whole(request_source(SourcePath::COOKIES), false)
}

/// The parsed request body.
pub fn body() -> ParameterDecorator {
    whole(request_source(SourcePath::BODY), true)
}

/// One top-level field of the request body.
pub fn body_part(name: impl Into<Cow<'static, str>>) -> ParameterDecorator {
    generate_parameter_source_decorator(
        request_source(SourcePath::BODY).join(name),
        true,
        true,
        None,
        None,
        None,
    )
}

/// The raw request object.
pub fn request() -> ParameterDecorator {
    whole(SourcePath::request(), true)
}

/// The response object under construction.
pub fn response() -> ParameterDecorator {
    whole(SourcePath::response(), true)
}

/// The request-scoped logger.
pub fn logger() -> ParameterDecorator {
    whole(SourcePath::logger(), true)
}

/// The token of an `Authorization: Bearer <token>` header.
///
/// Required, strips the scheme prefix from the value and contributes the
/// `bearerAuth` security scheme to the documentation.
pub fn bearer_token() -> ParameterDecorator {
    generate_parameter_source_decorator(
        request_source(SourcePath::HEADERS).join("authorization"),
        true,
        true,
        Some(NameTransform::lowercase()),
        Some(ValueTransform::strip_bearer()),
        Some(SecurityContribution::bearer()),
    )
}

/// Attach a custom parameter requirement.
pub fn param(requirement: ParameterRequirement) -> ParameterDecorator {
    generate_parameter_decorator(requirement)
}

/// Mark the parameter as optional, leaving its source untouched.
pub fn optional() -> ParameterDecorator {
    generate_parameter_decorator(ParameterRequirement::new().required(false))
}

/// Mark the parameter as required, leaving its source untouched.
pub fn required() -> ParameterDecorator {
    generate_parameter_decorator(ParameterRequirement::new().required(true))
}

// ── Method fragments ────────────────────────────────────────────────────────

/// Validate the request with `handler` before the method runs.
///
/// With `before_middleware` set the validator runs ahead of the method's
/// middleware, otherwise after it.
pub fn validate_request(handler: RequestHandler, before_middleware: bool) -> MethodDecorator {
    generate_method_decorator(MethodRequirement {
        validator: Some(RequestValidator {
            handler,
            before_middleware,
        }),
        ..MethodRequirement::default()
    })
}

/// Run one or several middleware before the method.
pub fn use_middleware(middlewares: impl Into<MiddlewareList>) -> MethodDecorator {
    generate_method_decorator(MethodRequirement {
        middlewares: Some(middlewares.into()),
        ..MethodRequirement::default()
    })
}

/// Serialize the method's result with `formatter`.
///
/// `content_type` defaults to `application/json` when `None`.
pub fn format_response(
    formatter: ResponseFormatter,
    content_type: Option<&str>,
) -> MethodDecorator {
    generate_method_decorator(MethodRequirement {
        formatter: Some(ResponseFormat {
            formatter,
            content_type: content_type.map(str::to_string),
        }),
        ..MethodRequirement::default()
    })
}

/// Override parts of the generated OpenAPI operation.
pub fn docs(fragment: Value) -> MethodDecorator {
    generate_method_decorator(MethodRequirement {
        docs: Some(fragment),
        ..MethodRequirement::default()
    })
}

/// Declare that the method may fail with `E`. Has no runtime effect.
pub fn error_return<E>() -> ErrorReturn<E> {
    ErrorReturn::new()
}

/// Alias of [`error_return`].
pub fn throws<E>() -> ErrorReturn<E> {
    ErrorReturn::new()
}
