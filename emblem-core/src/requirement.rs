//! Requirement records: the configuration fragments decorators attach.
//!
//! Every field of a fragment is optional. Fragments attached to the same
//! target are merged in application order by the registry, later values
//! taking precedence (see the `merge` methods).

use serde_json::{Map, Value};

use crate::handler::{Middleware, NameTransform, RequestHandler, ResponseFormatter, ValueTransform};
use crate::source::SourcePath;
use crate::verb::HttpVerb;

/// Verb requirement attached by the HTTP-method decorators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointRequirement {
    pub verb: HttpVerb,
}

/// An OpenAPI security scheme a parameter source contributes to the
/// document, e.g. the `bearerAuth` HTTP scheme for bearer tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct SecurityContribution {
    pub name: String,
    pub scheme: Value,
    pub scopes: Vec<String>,
}

impl SecurityContribution {
    pub fn new(name: impl Into<String>, scheme: Value) -> Self {
        Self {
            name: name.into(),
            scheme,
            scopes: Vec::new(),
        }
    }

    /// HTTP bearer scheme registered as `bearerAuth`.
    pub fn bearer() -> Self {
        Self::new(
            "bearerAuth",
            serde_json::json!({ "type": "http", "scheme": "bearer" }),
        )
    }

    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }
}

/// Describes how the runtime fills one handler parameter.
#[derive(Debug, Clone, Default)]
pub struct ParameterRequirement {
    pub source: Option<SourcePath>,
    pub single_value: Option<bool>,
    pub required: Option<bool>,
    pub name_transform: Option<NameTransform>,
    pub value_transform: Option<ValueTransform>,
    pub security: Option<SecurityContribution>,
}

impl ParameterRequirement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_source(source: SourcePath) -> Self {
        Self {
            source: Some(source),
            ..Self::default()
        }
    }

    pub fn single_value(mut self, single: bool) -> Self {
        self.single_value = Some(single);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn name_transform(mut self, transform: NameTransform) -> Self {
        self.name_transform = Some(transform);
        self
    }

    pub fn value_transform(mut self, transform: ValueTransform) -> Self {
        self.value_transform = Some(transform);
        self
    }

    pub fn security(mut self, contribution: SecurityContribution) -> Self {
        self.security = Some(contribution);
        self
    }

    /// Whether the parameter must be present. Defaults to `false`.
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }

    /// Whether the source yields one value rather than a whole collection.
    /// Defaults to `true`.
    pub fn is_single_value(&self) -> bool {
        self.single_value.unwrap_or(true)
    }

    /// Run the value transform, if any, on an extracted value.
    pub fn apply_value(&self, value: Value) -> Value {
        match &self.value_transform {
            Some(transform) => transform.apply(value),
            None => value,
        }
    }

    /// Overlay `other` onto `self`; fields set in `other` win.
    pub fn merge(&mut self, other: ParameterRequirement) {
        if other.source.is_some() {
            self.source = other.source;
        }
        if other.single_value.is_some() {
            self.single_value = other.single_value;
        }
        if other.required.is_some() {
            self.required = other.required;
        }
        if other.name_transform.is_some() {
            self.name_transform = other.name_transform;
        }
        if other.value_transform.is_some() {
            self.value_transform = other.value_transform;
        }
        if other.security.is_some() {
            self.security = other.security;
        }
    }
}

/// Request validator attached by `validate_request`.
#[derive(Debug, Clone)]
pub struct RequestValidator {
    pub handler: RequestHandler,
    /// Run before the method's middleware instead of after it.
    pub before_middleware: bool,
}

/// Ordered middleware list. Built from a single middleware or from many.
#[derive(Debug, Clone, Default)]
pub struct MiddlewareList(pub Vec<Middleware>);

impl MiddlewareList {
    pub fn iter(&self) -> std::slice::Iter<'_, Middleware> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(Middleware::name).collect()
    }
}

impl From<Middleware> for MiddlewareList {
    fn from(middleware: Middleware) -> Self {
        MiddlewareList(vec![middleware])
    }
}

impl From<Vec<Middleware>> for MiddlewareList {
    fn from(list: Vec<Middleware>) -> Self {
        MiddlewareList(list)
    }
}

impl<const N: usize> From<[Middleware; N]> for MiddlewareList {
    fn from(list: [Middleware; N]) -> Self {
        MiddlewareList(list.into())
    }
}

impl<'a> IntoIterator for &'a MiddlewareList {
    type Item = &'a Middleware;
    type IntoIter = std::slice::Iter<'a, Middleware>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Response formatting attached by `format_response`.
#[derive(Debug, Clone)]
pub struct ResponseFormat {
    pub formatter: ResponseFormatter,
    pub content_type: Option<String>,
}

impl ResponseFormat {
    pub const DEFAULT_CONTENT_TYPE: &'static str = "application/json";

    /// The declared content type, or `application/json`.
    pub fn content_type(&self) -> &str {
        self.content_type
            .as_deref()
            .unwrap_or(Self::DEFAULT_CONTENT_TYPE)
    }
}

/// Method-level fragment: validator, middleware, formatter and docs.
#[derive(Debug, Clone, Default)]
pub struct MethodRequirement {
    pub validator: Option<RequestValidator>,
    pub middlewares: Option<MiddlewareList>,
    pub formatter: Option<ResponseFormat>,
    pub docs: Option<Value>,
}

impl MethodRequirement {
    pub fn is_empty(&self) -> bool {
        self.validator.is_none()
            && self.middlewares.is_none()
            && self.formatter.is_none()
            && self.docs.is_none()
    }

    /// Overlay `other` onto `self`.
    ///
    /// Validator and formatter are replaced, middleware lists are appended,
    /// docs fragments are deep-merged.
    pub fn merge(&mut self, other: MethodRequirement) {
        if other.validator.is_some() {
            self.validator = other.validator;
        }
        if let Some(MiddlewareList(more)) = other.middlewares {
            self.middlewares
                .get_or_insert_with(MiddlewareList::default)
                .0
                .extend(more);
        }
        if other.formatter.is_some() {
            self.formatter = other.formatter;
        }
        if let Some(docs) = other.docs {
            match &mut self.docs {
                Some(existing) => merge_json(existing, docs),
                None => self.docs = Some(docs),
            }
        }
    }
}

/// Deep-merge `patch` into `target`: objects merge key by key, any other
/// value replaces the target.
pub fn merge_json(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => merge_map(target, patch),
        (target, patch) => *target = patch,
    }
}

fn merge_map(target: &mut Map<String, Value>, patch: Map<String, Value>) {
    for (key, value) in patch {
        match target.get_mut(&key) {
            Some(existing) => merge_json(existing, value),
            None => {
                target.insert(key, value);
            }
        }
    }
}
