use emblem_core::{
    merge_json, ControllerMetadata, HttpVerb, MetadataRegistry, MethodMetadata,
    ParameterRequirement, ResponseFormat, SourcePath,
};
use serde_json::{json, Map, Value};

use crate::config::OpenApiConfig;

/// One operation to project: a controller method answering `verb`.
pub struct OperationContext<'a> {
    pub controller: &'a ControllerMetadata,
    pub method: &'a MethodMetadata,
    pub verb: HttpVerb,
    /// Set when the method answers several verbs, so operation ids get a
    /// verb suffix to stay unique.
    pub disambiguate: bool,
}

impl OperationContext<'_> {
    /// `<controller>_<method>`, plus `_<verb>` when disambiguating.
    pub fn operation_id(&self) -> String {
        let base = format!("{}_{}", self.controller.name(), self.method.name());
        if self.disambiguate {
            format!("{}_{}", base, self.verb.as_str().to_lowercase())
        } else {
            base
        }
    }
}

// Credentials are described by `security`, not as parameters.
fn parameter_object(req: &ParameterRequirement, source: &SourcePath) -> Option<Value> {
    if !req.is_single_value() || req.security.is_some() {
        return None;
    }
    let location = source.location()?;
    let required = req.is_required() || location == emblem_core::ParamLocation::Path;
    Some(json!({
        "name": source.name(),
        "in": location.as_str(),
        "required": required,
        "schema": { "type": "string" }
    }))
}

/// Build the `requestBody` from body-sourced parameters, if any.
///
/// A whole-body parameter yields a generic object schema; body parts become
/// its properties.
fn request_body(method: &MethodMetadata) -> Option<Value> {
    let mut has_body = false;
    let mut whole_required = false;
    let mut properties = Map::new();
    let mut required_parts = Vec::new();

    for (_, req) in method.parameters() {
        let Some(source) = req.source.as_ref().filter(|s| s.is_body()) else {
            continue;
        };
        has_body = true;
        if source.len() == 2 {
            whole_required |= req.is_required();
        } else {
            properties.insert(source.name().to_string(), json!({}));
            if req.is_required() {
                required_parts.push(json!(source.name()));
            }
        }
    }

    if !has_body {
        return None;
    }

    let mut schema = Map::new();
    schema.insert("type".into(), json!("object"));
    if !properties.is_empty() {
        schema.insert("properties".into(), Value::Object(properties));
    }
    if !required_parts.is_empty() {
        schema.insert("required".into(), Value::Array(required_parts.clone()));
    }

    Some(json!({
        "required": whole_required || !required_parts.is_empty(),
        "content": {
            (ResponseFormat::DEFAULT_CONTENT_TYPE): { "schema": schema }
        }
    }))
}

/// Project one controller method into an OpenAPI operation object.
///
/// The method's docs fragments are merged over the generated object last,
/// so they can override any field.
pub fn build_operation(ctx: &OperationContext<'_>) -> Value {
    let method = ctx.method;
    let mut operation: Map<String, Value> = Map::new();
    operation.insert("operationId".into(), json!(ctx.operation_id()));
    operation.insert("tags".into(), json!([ctx.controller.name()]));

    let params: Vec<Value> = method
        .parameters()
        .filter_map(|(_, req)| {
            let source = req.source.as_ref()?;
            parameter_object(req, source)
        })
        .collect();
    if !params.is_empty() {
        operation.insert("parameters".into(), Value::Array(params));
    }

    if let Some(body) = request_body(method) {
        operation.insert("requestBody".into(), body);
    }

    let content_type = method
        .requirement()
        .formatter
        .as_ref()
        .map(ResponseFormat::content_type)
        .unwrap_or(ResponseFormat::DEFAULT_CONTENT_TYPE);
    let mut responses: Map<String, Value> = Map::new();
    responses.insert(
        "200".into(),
        json!({
            "description": "Successful response",
            "content": { (content_type): {} }
        }),
    );

    let security: Vec<Value> = method
        .parameters()
        .filter_map(|(_, req)| req.security.as_ref())
        .map(|s| json!({ (s.name.clone()): s.scopes }))
        .collect();
    if !security.is_empty() {
        responses.insert("401".into(), json!({ "description": "Unauthorized" }));
        operation.insert("security".into(), Value::Array(security));
    }
    operation.insert("responses".into(), Value::Object(responses));

    let mut operation = Value::Object(operation);
    if let Some(docs) = &method.requirement().docs {
        merge_json(&mut operation, docs.clone());
    }
    operation
}

/// Build an OpenAPI 3.1.0 document from the registry.
///
/// `resolver` gives the mount path of each endpoint method; methods it maps
/// to `None` are left out. `ALL` is expanded to every concrete verb. When
/// two methods resolve to the same path and verb, the one registered first
/// is kept and the collision is logged.
pub fn build_spec<F>(config: &OpenApiConfig, registry: &MetadataRegistry, resolver: F) -> Value
where
    F: Fn(&ControllerMetadata, &MethodMetadata) -> Option<String>,
{
    let mut paths: Map<String, Value> = Map::new();
    let mut security_schemes: Map<String, Value> = Map::new();
    let mut operations = 0usize;

    for controller in registry.controllers() {
        for method in controller.endpoints() {
            let Some(path) = resolver(controller, method) else {
                tracing::debug!(
                    controller = controller.name(),
                    method = method.name(),
                    "No mount path for endpoint, leaving it out of the document"
                );
                continue;
            };

            let mut verbs: Vec<HttpVerb> = Vec::new();
            for verb in method.verbs().iter().flat_map(HttpVerb::expand) {
                if !verbs.contains(&verb) {
                    verbs.push(verb);
                }
            }
            let disambiguate = verbs.len() > 1;

            for (_, req) in method.parameters() {
                if let Some(contribution) = &req.security {
                    security_schemes
                        .entry(contribution.name.clone())
                        .or_insert_with(|| contribution.scheme.clone());
                }
            }

            let Some(item) = paths
                .entry(path.clone())
                .or_insert_with(|| json!({}))
                .as_object_mut()
            else {
                continue;
            };
            for verb in verbs {
                let key = verb.as_str().to_lowercase();
                // First declaration wins a path/verb collision.
                if let Some(existing) = item.get(&key) {
                    tracing::warn!(
                        path = %path,
                        verb = verb.as_str(),
                        kept = %existing["operationId"],
                        controller = controller.name(),
                        method = method.name(),
                        "Duplicate operation for path and verb, keeping the first"
                    );
                    continue;
                }
                let ctx = OperationContext {
                    controller,
                    method,
                    verb,
                    disambiguate,
                };
                item.insert(key, build_operation(&ctx));
                operations += 1;
            }
        }
    }

    let mut info: Map<String, Value> = Map::new();
    info.insert("title".into(), json!(config.title));
    info.insert("version".into(), json!(config.version));
    if let Some(ref desc) = config.description {
        info.insert("description".into(), json!(desc));
    }

    let mut spec: Map<String, Value> = Map::new();
    spec.insert("openapi".into(), json!("3.1.0"));
    spec.insert("info".into(), Value::Object(info));
    if !config.servers.is_empty() {
        let servers: Vec<Value> = config.servers.iter().map(|url| json!({ "url": url })).collect();
        spec.insert("servers".into(), Value::Array(servers));
    }
    spec.insert("paths".into(), Value::Object(paths));
    if !security_schemes.is_empty() {
        spec.insert(
            "components".into(),
            json!({ "securitySchemes": security_schemes }),
        );
    }

    tracing::debug!(
        title = %config.title,
        operations,
        "Built OpenAPI document"
    );
    Value::Object(spec)
}
