//! URI-template-addressable resources.

use serde_json::{json, Value};

use crate::inspect::{ControllerInspector, ResponseInspector};
use crate::routes::{RouteFilters, RouteIndex};
use crate::server::{string_param, AppContext, Resource, ToolResponse};

/// Serves `route://{uri}`: all routes when no URI is given, one route
/// otherwise.
pub struct ApiRoutesResource;

impl Resource for ApiRoutesResource {
    fn name(&self) -> &'static str {
        "api_routes"
    }

    fn description(&self) -> &'static str {
        "Dynamic access to API route information via the route://{uri} URI template."
    }

    fn uri_template(&self) -> &'static str {
        "route://{uri}"
    }

    fn handle(&self, ctx: &AppContext, params: &Value) -> ToolResponse {
        let index = RouteIndex::new(&ctx.routes, &ctx.types);

        let Some(uri) = string_param(params, "uri") else {
            let routes = index.list(&RouteFilters::default());
            return ToolResponse::structured(json!({
                "description": "List all API routes. Provide a specific URI via route://{uri} for details.",
                "count": routes.len(),
                "routes": routes,
            }));
        };

        let method = string_param(params, "method").unwrap_or_else(|| "GET".to_string());

        let Some(route) = index.find_by_uri_and_method(&uri, &method) else {
            return ToolResponse::error(format!(
                "Route not found for URI '{uri}' with method '{method}'."
            ));
        };

        ToolResponse::structured(json!({
            "uri": uri,
            "method": method,
            "route": index.serialize(route),
        }))
    }
}

/// Serves `controller://{class}/{method?}`: public-method listing without a
/// method, full inspection with one.
pub struct ControllerResource;

impl Resource for ControllerResource {
    fn name(&self) -> &'static str {
        "controller"
    }

    fn description(&self) -> &'static str {
        "Dynamic access to controller information via controller://{class} or \
         controller://{class}/{method}."
    }

    fn uri_template(&self) -> &'static str {
        "controller://{class}/{method?}"
    }

    fn handle(&self, ctx: &AppContext, params: &Value) -> ToolResponse {
        let Some(class) = string_param(params, "class") else {
            return ToolResponse::error(
                "Controller class is required. Use controller://{class} or \
                 controller://{class}/{method}",
            );
        };

        let inspector = ControllerInspector::new(&ctx.types, ctx.scanner.as_ref());

        let Some(method) = string_param(params, "method") else {
            return match inspector.public_methods(&class) {
                Ok(listing) => ToolResponse::structured(listing),
                Err(err) => ToolResponse::error(err.to_string()),
            };
        };

        match inspector.inspect(&class, &method) {
            Ok(signature) => {
                let location = ResponseInspector::new(&ctx.types).method_location(&class, &method);
                match serde_json::to_value(signature) {
                    Ok(mut value) => {
                        value["location"] = json!(location);
                        ToolResponse::Structured(value)
                    }
                    Err(err) => ToolResponse::error(format!("serialization failed: {err}")),
                }
            }
            Err(err) => ToolResponse::error(err.to_string()),
        }
    }
}
