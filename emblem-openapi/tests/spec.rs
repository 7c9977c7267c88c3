use emblem_core::prelude::*;
use emblem_core::{ControllerMetadata, MethodMetadata, ResponseFormatter};
use emblem_openapi::{build_spec, OpenApiConfig};
use serde_json::Value;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn default_config() -> OpenApiConfig {
    OpenApiConfig::new("Test API", "0.1.0")
}

/// Mount every method at `/<controller>/<method>`.
fn by_name(controller: &ControllerMetadata, method: &MethodMetadata) -> Option<String> {
    Some(format!("/{}/{}", controller.name().to_lowercase(), method.name()))
}

struct Users;

impl Controller for Users {
    fn name() -> &'static str {
        "users"
    }

    fn register(c: &mut ControllerBuilder<'_>) {
        c.method("list")
            .decorate(get())
            .param(0, query("page"))
            .param(1, header("X-Tenant"))
            .param(2, queries());

        c.method("find")
            .decorate(get())
            .param(0, path("id"))
            .param(1, cookie("session"));

        c.method("create")
            .decorate(post())
            .decorate(docs(json!({
                "summary": "Create a user",
                "responses": { "201": { "description": "Created" } }
            })))
            .param(0, body())
            .param(1, bearer_token());

        c.method("rename")
            .decorate(patch())
            .param(0, body_part("first_name"))
            .param(1, body_part("nickname"))
            .param(1, optional());

        c.method("export")
            .decorate(get())
            .decorate(format_response(ResponseFormatter::json(), Some("text/csv")));

        c.method("not_an_endpoint").param(0, logger());
    }
}

struct Echo;

impl Controller for Echo {
    fn register(c: &mut ControllerBuilder<'_>) {
        c.method("any").decorate(all());
        c.method("both").decorate(get()).decorate(head());
    }
}

struct Orders;

impl Controller for Orders {
    fn register(c: &mut ControllerBuilder<'_>) {
        c.method("find").decorate(get()).param(0, path("id"));
    }
}

fn users_spec() -> Value {
    let mut registry = MetadataRegistry::new();
    registry.register::<Users>();
    build_spec(&default_config(), &registry, by_name)
}

// ── Document shell ──────────────────────────────────────────────────────────

#[test]
fn empty_spec() {
    let registry = MetadataRegistry::new();
    let spec = build_spec(&default_config(), &registry, by_name);
    assert_eq!(spec["openapi"], "3.1.0");
    assert_eq!(spec["info"]["title"], "Test API");
    assert_eq!(spec["info"]["version"], "0.1.0");
    assert!(spec["paths"].as_object().unwrap().is_empty());
    assert!(spec.get("components").is_none());
    assert!(spec.get("servers").is_none());
}

#[test]
fn description_and_servers() {
    let config = OpenApiConfig::new("API", "1.0.0")
        .with_description("A test API")
        .with_server("https://api.example.com");
    let spec = build_spec(&config, &MetadataRegistry::new(), by_name);
    assert_eq!(spec["info"]["description"], "A test API");
    assert_eq!(spec["servers"][0]["url"], "https://api.example.com");
}

// ── Operations ──────────────────────────────────────────────────────────────

#[test]
fn non_endpoints_are_skipped() {
    let spec = users_spec();
    assert!(spec["paths"].get("/users/not_an_endpoint").is_none());
}

#[test]
fn resolver_can_skip_methods() {
    let mut registry = MetadataRegistry::new();
    registry.register::<Users>();
    let spec = build_spec(&default_config(), &registry, |_, m| {
        (m.name() == "find").then(|| "/users/{id}".to_string())
    });
    let paths = spec["paths"].as_object().unwrap();
    assert_eq!(paths.len(), 1);
    assert_eq!(spec["paths"]["/users/{id}"]["get"]["operationId"], "users_find");
}

#[test]
fn operation_carries_id_and_tag() {
    let spec = users_spec();
    let op = &spec["paths"]["/users/list"]["get"];
    assert_eq!(op["operationId"], "users_list");
    assert_eq!(op["tags"], json!(["users"]));
}

#[test]
fn single_value_sources_become_parameters() {
    let spec = users_spec();
    let params = spec["paths"]["/users/list"]["get"]["parameters"]
        .as_array()
        .unwrap();
    assert_eq!(params.len(), 2);
    assert_eq!(params[0]["name"], "page");
    assert_eq!(params[0]["in"], "query");
    assert_eq!(params[0]["required"], false);
    assert_eq!(params[1]["name"], "x-tenant");
    assert_eq!(params[1]["in"], "header");
}

#[test]
fn path_parameters_are_required() {
    let spec = users_spec();
    let params = spec["paths"]["/users/find"]["get"]["parameters"]
        .as_array()
        .unwrap();
    assert_eq!(params[0]["in"], "path");
    assert_eq!(params[0]["required"], true);
    assert_eq!(params[1]["in"], "cookie");
    assert_eq!(params[1]["name"], "session");
}

#[test]
fn whole_body_becomes_request_body() {
    let spec = users_spec();
    let body = &spec["paths"]["/users/create"]["post"]["requestBody"];
    assert_eq!(body["required"], true);
    assert_eq!(
        body["content"]["application/json"]["schema"]["type"],
        "object"
    );
    assert!(spec["paths"]["/users/create"]["post"].get("parameters").is_none());
}

#[test]
fn body_parts_become_properties() {
    let spec = users_spec();
    let schema = &spec["paths"]["/users/rename"]["patch"]["requestBody"]["content"]
        ["application/json"]["schema"];
    let props = schema["properties"].as_object().unwrap();
    assert!(props.contains_key("first_name"));
    assert!(props.contains_key("nickname"));
    assert_eq!(schema["required"], json!(["first_name"]));
}

#[test]
fn bearer_token_adds_security() {
    let spec = users_spec();
    let op = &spec["paths"]["/users/create"]["post"];
    assert_eq!(op["security"], json!([{ "bearerAuth": [] }]));
    assert_eq!(op["responses"]["401"]["description"], "Unauthorized");
    assert_eq!(
        spec["components"]["securitySchemes"]["bearerAuth"],
        json!({ "type": "http", "scheme": "bearer" })
    );
    assert!(spec["paths"]["/users/list"]["get"].get("security").is_none());
}

#[test]
fn docs_override_merges_last() {
    let spec = users_spec();
    let op = &spec["paths"]["/users/create"]["post"];
    assert_eq!(op["summary"], "Create a user");
    assert_eq!(op["responses"]["201"]["description"], "Created");
    assert_eq!(op["responses"]["200"]["description"], "Successful response");
    assert_eq!(op["operationId"], "users_create");
}

#[test]
fn formatter_sets_response_content_type() {
    let spec = users_spec();
    let content = spec["paths"]["/users/export"]["get"]["responses"]["200"]["content"]
        .as_object()
        .unwrap();
    assert!(content.contains_key("text/csv"));

    let default = spec["paths"]["/users/list"]["get"]["responses"]["200"]["content"]
        .as_object()
        .unwrap();
    assert!(default.contains_key("application/json"));
}

// ── Verbs ───────────────────────────────────────────────────────────────────

#[test]
fn all_expands_to_every_verb() {
    let mut registry = MetadataRegistry::new();
    registry.register::<Echo>();
    let spec = build_spec(&default_config(), &registry, by_name);

    let item = spec["paths"]["/echo/any"].as_object().unwrap();
    for verb in ["get", "post", "put", "patch", "delete", "options", "head", "trace"] {
        assert!(item.contains_key(verb), "missing {verb}");
    }
    assert_eq!(item.len(), 8);
    assert_eq!(item["delete"]["operationId"], "Echo_any_delete");
}

#[test]
fn multiple_verbs_get_suffixed_ids() {
    let mut registry = MetadataRegistry::new();
    registry.register::<Echo>();
    let spec = build_spec(&default_config(), &registry, by_name);

    let item = &spec["paths"]["/echo/both"];
    assert_eq!(item["get"]["operationId"], "Echo_both_get");
    assert_eq!(item["head"]["operationId"], "Echo_both_head");
}

#[test]
fn operation_ids_are_unique_across_controllers() {
    let mut registry = MetadataRegistry::new();
    registry.register::<Users>().register::<Orders>();
    let spec = build_spec(&default_config(), &registry, by_name);

    let users = &spec["paths"]["/users/find"]["get"]["operationId"];
    let orders = &spec["paths"]["/orders/find"]["get"]["operationId"];
    assert_eq!(users, "users_find");
    assert_eq!(orders, "Orders_find");
    assert_ne!(users, orders);
}

#[test]
fn first_operation_wins_on_path_collision() {
    let mut registry = MetadataRegistry::new();
    registry.register::<Users>().register::<Orders>();
    let spec = build_spec(&default_config(), &registry, |_, m| {
        (m.name() == "find").then(|| "/x/{id}".to_string())
    });

    let item = spec["paths"]["/x/{id}"].as_object().unwrap();
    assert_eq!(item.len(), 1);
    assert_eq!(item["get"]["operationId"], "users_find");
    assert_eq!(item["get"]["tags"], json!(["users"]));
}
