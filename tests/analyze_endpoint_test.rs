mod common;

use common::{fixture_context, STORE_USER_REQUEST, USER_CONTROLLER};
use pretty_assertions::assert_eq;
use routemap::analyze::EndpointAnalyzer;
use routemap::errors::AnalyzeError;
use serde_json::json;

#[test]
fn post_endpoint_analysis_assembles_every_block() {
    let ctx = fixture_context();
    let analyzer = EndpointAnalyzer::new(&ctx.routes, &ctx.types, ctx.scanner.as_ref());

    let analysis = analyzer
        .analyze("api/users", "POST")
        .expect("route is registered");

    assert_eq!(analysis.endpoint.uri, "api/users");
    assert_eq!(analysis.endpoint.method, "POST");
    assert_eq!(analysis.endpoint.name.as_deref(), Some("users.store"));
    assert_eq!(analysis.route.uri, "api/users");
    assert!(analysis.route.is_api);

    let controller = analysis.controller.as_ref().expect("controller block");
    assert_eq!(controller.class, USER_CONTROLLER);
    assert_eq!(controller.method, "store");

    let request = analysis.request.as_ref().expect("request block");
    assert_eq!(request.class, STORE_USER_REQUEST);
    assert_eq!(request.rules.len(), 3);

    let response = analysis.response.as_ref().expect("response block");
    assert_eq!(
        response.return_type.as_deref(),
        Some("\\App\\Http\\Resources\\UserResource")
    );

    let example = analysis.example.as_ref().expect("example block");
    assert_eq!(example.http_method, "POST");
    assert_eq!(example.uri, "api/users");
    assert_eq!(
        example.expected_response_type.as_deref(),
        Some("\\App\\Http\\Resources\\UserResource")
    );

    // Only the required fields survive into the example body, with the
    // first non-required rule name as the placeholder value.
    let body = example.request_body.as_ref().expect("request body");
    assert_eq!(body.len(), 2);
    assert_eq!(body["name"], json!("string"));
    assert_eq!(body["email"], json!("email"));
    assert!(!body.contains_key("role"));
}

#[test]
fn closure_routes_keep_only_endpoint_and_route_blocks() {
    let ctx = fixture_context();
    let analyzer = EndpointAnalyzer::new(&ctx.routes, &ctx.types, ctx.scanner.as_ref());

    let analysis = analyzer.analyze("/", "GET").expect("home route");

    assert_eq!(analysis.route.uri, "/");
    assert!(analysis.controller.is_none());
    assert!(analysis.request.is_none());
    assert!(analysis.response.is_none());
    assert!(analysis.example.is_none());
}

#[test]
fn missing_route_is_the_only_hard_failure() {
    let ctx = fixture_context();
    let analyzer = EndpointAnalyzer::new(&ctx.routes, &ctx.types, ctx.scanner.as_ref());

    let err = analyzer
        .analyze("missing/path", "GET")
        .expect_err("no such route");
    assert_eq!(
        err,
        AnalyzeError::RouteNotFound {
            uri: "missing/path".to_string(),
            method: "GET".to_string(),
        }
    );
    assert_eq!(
        err.to_string(),
        "No route found for URI 'missing/path' with method 'GET'."
    );
}

#[test]
fn unknown_handler_class_degrades_instead_of_failing() {
    let mut ctx = fixture_context();
    // Re-point one route's handler at a class missing from the type model.
    let routes = routemap::routes::RouteRegistry::new(vec![routemap::routes::RegisteredRoute {
        uri: "api/ghost".to_string(),
        methods: vec!["GET".to_string()],
        name: None,
        domain: None,
        middleware: vec!["api".to_string()],
        wheres: Default::default(),
        handler: routemap::routes::HandlerRef::controller(
            "App\\Http\\Controllers\\GhostController",
            "index",
        ),
    }]);
    ctx.routes = routes;

    let analyzer = EndpointAnalyzer::new(&ctx.routes, &ctx.types, ctx.scanner.as_ref());
    let analysis = analyzer.analyze("api/ghost", "GET").expect("route resolves");

    assert!(analysis.controller.is_none());
    assert!(analysis.request.is_none());
    // Response and example stay best-effort with absent fields.
    let response = analysis.response.as_ref().expect("response block");
    assert_eq!(response.return_type, None);
    let example = analysis.example.as_ref().expect("example block");
    assert_eq!(example.expected_response_type, None);
    assert!(example.request_body.is_none());
}

#[test]
fn analysis_is_idempotent() {
    let ctx = fixture_context();
    let analyzer = EndpointAnalyzer::new(&ctx.routes, &ctx.types, ctx.scanner.as_ref());

    let first = analyzer.analyze("api/users", "POST").expect("first pass");
    let second = analyzer.analyze("api/users", "POST").expect("second pass");
    assert_eq!(first, second);
}
