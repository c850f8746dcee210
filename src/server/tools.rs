//! Tool definitions exposed to calling agents.

use serde_json::{json, Value};

use crate::analyze::EndpointAnalyzer;
use crate::inspect::{ControllerInspector, RequestInspector, ResponseInspector};
use crate::routes::{RouteFilters, RouteIndex};
use crate::server::{string_param, AppContext, Tool, ToolResponse};

const HTTP_METHODS: [&str; 7] = ["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];

/// Lists registered routes with optional filters.
pub struct ListApiRoutes;

impl Tool for ListApiRoutes {
    fn name(&self) -> &'static str {
        "list_api_routes"
    }

    fn description(&self) -> &'static str {
        "Lists all API routes with optional filters for path pattern, HTTP method, domain, \
         and vendor routes."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Filter routes by URI pattern (supports wildcards, e.g. 'api/users*')"
                },
                "method": {
                    "type": "string",
                    "description": "Filter by HTTP method",
                    "enum": HTTP_METHODS
                },
                "domain": {
                    "type": "string",
                    "description": "Filter by domain"
                },
                "except_vendor": {
                    "type": "boolean",
                    "description": "Exclude vendor/framework routes"
                },
                "only_vendor": {
                    "type": "boolean",
                    "description": "Only show vendor/framework routes"
                }
            }
        })
    }

    fn handle(&self, ctx: &AppContext, params: &Value) -> ToolResponse {
        let filters = match serde_json::from_value::<RouteFilters>(params.clone()) {
            Ok(filters) => filters.cleaned(),
            Err(err) => return ToolResponse::error(format!("Invalid filters: {err}")),
        };

        let index = RouteIndex::new(&ctx.routes, &ctx.types);
        let routes = index.list(&filters);

        ToolResponse::structured(json!({
            "count": routes.len(),
            "filters": filters,
            "routes": routes,
        }))
    }
}

/// Full detail for one route, including its handler signature and any
/// recognized request/resource classes.
pub struct GetRouteDetails;

impl Tool for GetRouteDetails {
    fn name(&self) -> &'static str {
        "get_route_details"
    }

    fn description(&self) -> &'static str {
        "Gets detailed information about a specific route including controller, file path, \
         line numbers, middleware, and request validation class."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "uri": {
                    "type": "string",
                    "description": "The route URI pattern (e.g. 'api/users/{id}')"
                },
                "method": {
                    "type": "string",
                    "description": "The HTTP method",
                    "enum": HTTP_METHODS
                }
            },
            "required": ["uri", "method"]
        })
    }

    fn handle(&self, ctx: &AppContext, params: &Value) -> ToolResponse {
        let Some(uri) = string_param(params, "uri") else {
            return ToolResponse::error("URI is required.");
        };
        let Some(method) = string_param(params, "method") else {
            return ToolResponse::error("Method is required.");
        };
        let method = method.to_uppercase();

        let index = RouteIndex::new(&ctx.routes, &ctx.types);
        let Some(route) = index.find_by_uri_and_method(&uri, &method) else {
            return ToolResponse::error(format!(
                "No route found for URI '{uri}' with method '{method}'."
            ));
        };

        let mut details = json!({ "route": index.serialize(route) });

        if let Some((class, handler_method)) = route.handler.class_and_method() {
            let inspector = ControllerInspector::new(&ctx.types, ctx.scanner.as_ref());
            match inspector.inspect(class, handler_method) {
                Ok(signature) => details["controller"] = json!(signature),
                Err(err) => details["controller"] = json!({ "error": err.to_string() }),
            }
            if let Some(request_class) = inspector.request_class_of(class, handler_method) {
                details["request_class"] = json!(request_class);
            }
            if let Some(resource_class) = inspector.resource_class_of(class, handler_method) {
                details["resource_class"] = json!(resource_class);
            }
        }

        ToolResponse::Structured(details)
    }
}

/// Input-validation contract of one request class.
pub struct GetRequestRules;

impl Tool for GetRequestRules {
    fn name(&self) -> &'static str {
        "get_request_rules"
    }

    fn description(&self) -> &'static str {
        "Analyzes a request class: validation rules, custom error messages, attribute names, \
         and authorization logic."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "request_class": {
                    "type": "string",
                    "description": "Full request class name (e.g. 'App\\Http\\Requests\\StoreUserRequest')"
                }
            },
            "required": ["request_class"]
        })
    }

    fn handle(&self, ctx: &AppContext, params: &Value) -> ToolResponse {
        let Some(request_class) = string_param(params, "request_class") else {
            return ToolResponse::error("Request class is required.");
        };

        match RequestInspector::new(&ctx.types).inspect(&request_class) {
            Ok(contract) => ToolResponse::structured(contract),
            Err(err) => ToolResponse::error(err.to_string()),
        }
    }
}

/// Response-shape description of one controller method.
pub struct GetResponseSchema;

impl Tool for GetResponseSchema {
    fn name(&self) -> &'static str {
        "get_response_schema"
    }

    fn description(&self) -> &'static str {
        "Analyzes what an endpoint returns: the declared response type and its source location."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "controller_class": {
                    "type": "string",
                    "description": "Full controller class name (e.g. 'App\\Http\\Controllers\\UserController')"
                },
                "method": {
                    "type": "string",
                    "description": "Controller method name (e.g. index, store, show, update, destroy)"
                }
            },
            "required": ["controller_class", "method"]
        })
    }

    fn handle(&self, ctx: &AppContext, params: &Value) -> ToolResponse {
        let Some(controller_class) = string_param(params, "controller_class") else {
            return ToolResponse::error("Controller class is required.");
        };
        let Some(method) = string_param(params, "method") else {
            return ToolResponse::error("Method is required.");
        };

        if !ctx.types.class_exists(&controller_class) {
            return ToolResponse::error(format!(
                "Controller class '{controller_class}' does not exist."
            ));
        }
        if !ctx.types.method_exists(&controller_class, &method) {
            return ToolResponse::error(format!(
                "Method '{method}' does not exist in controller '{controller_class}'."
            ));
        }

        let schema = ResponseInspector::new(&ctx.types).inspect(&controller_class, &method);

        ToolResponse::structured(json!({
            "controller": controller_class,
            "method": method,
            "response": schema,
        }))
    }
}

/// Comprehensive analysis of one endpoint.
pub struct AnalyzeEndpoint;

impl Tool for AnalyzeEndpoint {
    fn name(&self) -> &'static str {
        "analyze_endpoint"
    }

    fn description(&self) -> &'static str {
        "Analyzes an endpoint end to end: route metadata, controller signature, request \
         validation rules, response schema, and an example request."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "uri": {
                    "type": "string",
                    "description": "Endpoint URI (e.g. 'api/users')"
                },
                "method": {
                    "type": "string",
                    "description": "HTTP method",
                    "enum": HTTP_METHODS
                }
            },
            "required": ["uri", "method"]
        })
    }

    fn handle(&self, ctx: &AppContext, params: &Value) -> ToolResponse {
        let Some(uri) = string_param(params, "uri") else {
            return ToolResponse::error("URI is required.");
        };
        let Some(method) = string_param(params, "method") else {
            return ToolResponse::error("Method is required.");
        };
        let method = method.to_uppercase();

        let analyzer = EndpointAnalyzer::new(&ctx.routes, &ctx.types, ctx.scanner.as_ref());
        match analyzer.analyze(&uri, &method) {
            Ok(analysis) => ToolResponse::structured(analysis),
            Err(err) => ToolResponse::error(err.to_string()),
        }
    }
}
