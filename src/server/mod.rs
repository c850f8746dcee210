//! Thin transport adapter: tool and resource definitions plus dispatch.
//!
//! The adapter maps boundary operations onto a simple structured-or-error
//! envelope; it carries no protocol machinery of its own.

pub mod resources;
pub mod snapshot;
pub mod tools;

use serde::Serialize;
use serde_json::{json, Value};

use crate::reflect::{FsScanner, SourceScanner, TypeRegistry};
use crate::routes::RouteRegistry;

pub use snapshot::Snapshot;

/// Everything one analysis call reads: the route snapshot, the type model,
/// and the source scanner. Holds no mutable state across calls.
pub struct AppContext {
    pub routes: RouteRegistry,
    pub types: TypeRegistry,
    pub scanner: Box<dyn SourceScanner + Send + Sync>,
}

impl AppContext {
    pub fn new(routes: RouteRegistry, types: TypeRegistry) -> Self {
        AppContext {
            routes,
            types,
            scanner: Box::new(FsScanner),
        }
    }

    pub fn with_scanner(mut self, scanner: Box<dyn SourceScanner + Send + Sync>) -> Self {
        self.scanner = scanner;
        self
    }
}

/// Boundary response envelope: structured data or a human-readable error.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResponse {
    Structured(Value),
    Error(String),
}

impl ToolResponse {
    pub fn structured(data: impl Serialize) -> Self {
        match serde_json::to_value(data) {
            Ok(value) => ToolResponse::Structured(value),
            Err(err) => ToolResponse::Error(format!("serialization failed: {err}")),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ToolResponse::Error(message.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ToolResponse::Error(_))
    }

    /// Wire form of the envelope.
    pub fn into_json(self) -> Value {
        match self {
            ToolResponse::Structured(data) => json!({ "ok": true, "data": data }),
            ToolResponse::Error(message) => json!({ "ok": false, "error": message }),
        }
    }
}

/// One callable capability of the server.
pub trait Tool {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    /// JSON Schema describing the tool's parameters.
    fn schema(&self) -> Value;
    fn handle(&self, ctx: &AppContext, params: &Value) -> ToolResponse;
}

/// One URI-template-addressable resource of the server.
pub trait Resource {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn uri_template(&self) -> &'static str;
    fn handle(&self, ctx: &AppContext, params: &Value) -> ToolResponse;
}

/// Static server descriptor.
#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub instructions: &'static str,
}

impl Default for ServerInfo {
    fn default() -> Self {
        ServerInfo {
            name: "routemap API Discovery",
            version: env!("CARGO_PKG_VERSION"),
            description: "Discovers and analyzes API endpoints, controllers, request \
                          validation rules, and response schemas for AI-assisted development.",
            instructions: "Use the tools to list routes, inspect controller methods, analyze \
                           request validation rules, and understand response schemas.",
        }
    }
}

/// The server's tool roster, in registration order.
pub fn all_tools() -> Vec<Box<dyn Tool>> {
    vec![
        Box::new(tools::ListApiRoutes),
        Box::new(tools::GetRouteDetails),
        Box::new(tools::GetRequestRules),
        Box::new(tools::GetResponseSchema),
        Box::new(tools::AnalyzeEndpoint),
    ]
}

/// The server's resource roster.
pub fn all_resources() -> Vec<Box<dyn Resource>> {
    vec![
        Box::new(resources::ApiRoutesResource),
        Box::new(resources::ControllerResource),
    ]
}

/// Routes a tool call by name.
pub fn dispatch(ctx: &AppContext, tool_name: &str, params: &Value) -> ToolResponse {
    for tool in all_tools() {
        if tool.name() == tool_name {
            return tool.handle(ctx, params);
        }
    }
    ToolResponse::error(format!("Unknown tool '{tool_name}'."))
}

/// Fetches a string parameter, treating absent and empty as missing.
pub(crate) fn string_param(params: &Value, key: &str) -> Option<String> {
    match params.get(key)?.as_str() {
        Some("") | None => None,
        Some(value) => Some(value.to_string()),
    }
}
