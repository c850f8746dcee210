//! Route registry snapshot and normalized route serialization.

pub mod index;

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::reflect::TypeRegistry;

pub use index::{RouteFilters, RouteIndex, VENDOR_NAMESPACE_MARKERS};

/// The code unit a route dispatches to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerRef {
    /// A class method, referenced by fully qualified class name and method.
    Controller { class: String, method: String },
    /// An anonymous function; carries no inspectable signature.
    Closure,
}

impl HandlerRef {
    pub fn controller(class: impl Into<String>, method: impl Into<String>) -> Self {
        HandlerRef::Controller {
            class: class.into().trim_start_matches('\\').to_string(),
            method: method.into(),
        }
    }

    /// The class and method for a concrete handler, `None` for closures.
    pub fn class_and_method(&self) -> Option<(&str, &str)> {
        match self {
            HandlerRef::Controller { class, method } => Some((class, method)),
            HandlerRef::Closure => None,
        }
    }

    /// Display form: `Class@method` for controllers, `Closure` otherwise.
    pub fn descriptor(&self) -> String {
        match self {
            HandlerRef::Controller { class, method } => format!("{class}@{method}"),
            HandlerRef::Closure => "Closure".to_string(),
        }
    }
}

/// Immutable snapshot of one registered route.
#[derive(Debug, Clone)]
pub struct RegisteredRoute {
    /// URI pattern, possibly containing `{param}` segments.
    pub uri: String,
    /// Accepted HTTP verbs, uppercase, in registration order.
    pub methods: Vec<String>,
    pub name: Option<String>,
    pub domain: Option<String>,
    /// Middleware names in application order.
    pub middleware: Vec<String>,
    /// Per-parameter constraint patterns.
    pub wheres: BTreeMap<String, String>,
    pub handler: HandlerRef,
}

impl RegisteredRoute {
    /// Path-parameter names in URI order, `?` suffixes stripped.
    pub fn parameter_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        let mut rest = self.uri.as_str();
        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}') else {
                break;
            };
            let raw = &rest[open + 1..open + close];
            let name = raw.trim_end_matches('?');
            if !name.is_empty() {
                names.push(name.to_string());
            }
            rest = &rest[open + close + 1..];
        }
        names
    }

    /// A route is an API route when it carries the `api` middleware (bare or
    /// parameterized) or its URI sits under the `api/` prefix.
    pub fn is_api(&self) -> bool {
        self.middleware
            .iter()
            .any(|m| m == "api" || m.starts_with("api:"))
            || self.uri.starts_with("api/")
    }
}

/// Read-only handle over the application's registered routes.
///
/// Constructed once per analysis context and treated as an immutable
/// snapshot; enumeration order is registration order.
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
    routes: Vec<RegisteredRoute>,
}

impl RouteRegistry {
    pub fn new(routes: Vec<RegisteredRoute>) -> Self {
        RouteRegistry { routes }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredRoute> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Handler kind in the serialized route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerKind {
    Controller,
    Closure,
}

/// Serialized handler block of a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandlerInfo {
    pub class: Option<String>,
    pub method: Option<String>,
    pub file_path: Option<PathBuf>,
    pub start_line: Option<u32>,
    #[serde(rename = "type")]
    pub kind: HandlerKind,
}

/// Normalized serialization of one route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteInfo {
    pub uri: String,
    pub methods: Vec<String>,
    pub name: Option<String>,
    pub domain: Option<String>,
    pub middleware: Vec<String>,
    pub parameters: Vec<String>,
    pub wheres: BTreeMap<String, String>,
    pub controller: HandlerInfo,
    pub is_api: bool,
}

impl RouteInfo {
    /// Serializes a route, resolving the handler's source location through
    /// the type registry. Location fields degrade to `None` when the class
    /// or method is not in the model.
    pub fn from_route(route: &RegisteredRoute, types: &TypeRegistry) -> Self {
        let controller = match &route.handler {
            HandlerRef::Controller { class, method } => HandlerInfo {
                class: Some(class.clone()),
                method: Some(method.clone()),
                file_path: types.class_file(class),
                start_line: types.method_start_line(class, method),
                kind: HandlerKind::Controller,
            },
            HandlerRef::Closure => HandlerInfo {
                class: None,
                method: None,
                file_path: None,
                start_line: None,
                kind: HandlerKind::Closure,
            },
        };

        RouteInfo {
            uri: route.uri.clone(),
            methods: route.methods.clone(),
            name: route.name.clone(),
            domain: route.domain.clone(),
            middleware: route.middleware.clone(),
            parameters: route.parameter_names(),
            wheres: route.wheres.clone(),
            controller,
            is_api: route.is_api(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(uri: &str, middleware: &[&str]) -> RegisteredRoute {
        RegisteredRoute {
            uri: uri.to_string(),
            methods: vec!["GET".to_string()],
            name: None,
            domain: None,
            middleware: middleware.iter().map(|m| m.to_string()).collect(),
            wheres: BTreeMap::new(),
            handler: HandlerRef::Closure,
        }
    }

    #[test]
    fn parameter_names_follow_uri_order() {
        let r = route("api/posts/{post}/comments/{comment?}", &[]);
        assert_eq!(r.parameter_names(), vec!["post", "comment"]);
    }

    #[test]
    fn api_detection_checks_middleware_and_prefix() {
        assert!(route("api/users", &[]).is_api());
        assert!(route("users", &["api"]).is_api());
        assert!(route("users", &["api:throttle"]).is_api());
        assert!(!route("users", &["web"]).is_api());
    }

    #[test]
    fn handler_descriptor_formats() {
        let handler = HandlerRef::controller("App\\Http\\Controllers\\UserController", "index");
        assert_eq!(
            handler.descriptor(),
            "App\\Http\\Controllers\\UserController@index"
        );
        assert_eq!(HandlerRef::Closure.descriptor(), "Closure");
    }
}
