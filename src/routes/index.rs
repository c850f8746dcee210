//! Filtered listing and exact lookup over the route registry.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::reflect::TypeRegistry;
use crate::routes::{RegisteredRoute, RouteInfo, RouteRegistry};

/// Namespace substrings that mark a handler as framework/vendor code.
///
/// Substring matching is fragile by construction: an application class whose
/// name happens to contain one of these markers will misclassify. The
/// heuristic is kept as-is; callers should treat vendor filters as advisory.
pub const VENDOR_NAMESPACE_MARKERS: [&str; 3] = ["Vendor", "Laravel\\", "Illuminate\\"];

/// Independently AND-combined listing filters. Absent keys impose no
/// constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteFilters {
    /// Anchored glob over the URI; `*` matches any sequence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// HTTP method, matched case-insensitively on input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Exact domain match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Exclude framework/vendor routes.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub except_vendor: bool,
    /// Keep only framework/vendor routes.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub only_vendor: bool,
}

impl RouteFilters {
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn except_vendor(mut self) -> Self {
        self.except_vendor = true;
        self
    }

    pub fn only_vendor(mut self) -> Self {
        self.only_vendor = true;
        self
    }

    /// Drops empty string values, mirroring how callers pass filters over
    /// the wire.
    pub fn cleaned(mut self) -> Self {
        if self.path.as_deref() == Some("") {
            self.path = None;
        }
        if self.method.as_deref() == Some("") {
            self.method = None;
        }
        if self.domain.as_deref() == Some("") {
            self.domain = None;
        }
        self
    }
}

/// Read-only view over a [`RouteRegistry`] with filtering, exact lookup, and
/// normalized serialization.
pub struct RouteIndex<'a> {
    registry: &'a RouteRegistry,
    types: &'a TypeRegistry,
}

impl<'a> RouteIndex<'a> {
    pub fn new(registry: &'a RouteRegistry, types: &'a TypeRegistry) -> Self {
        RouteIndex { registry, types }
    }

    /// Routes matching every present filter, serialized, in registration
    /// order.
    pub fn list(&self, filters: &RouteFilters) -> Vec<RouteInfo> {
        self.registry
            .iter()
            .filter(|route| matches_filters(route, filters))
            .map(|route| self.serialize(route))
            .collect()
    }

    /// First route whose URI equals `uri` exactly and whose method set
    /// contains `method` (case-sensitive). No glob, no trailing-slash
    /// normalization.
    pub fn find_by_uri_and_method(&self, uri: &str, method: &str) -> Option<&'a RegisteredRoute> {
        self.registry
            .iter()
            .find(|route| route.uri == uri && route.methods.iter().any(|m| m == method))
    }

    /// First route registered under `name`.
    pub fn find_by_name(&self, name: &str) -> Option<&'a RegisteredRoute> {
        self.registry
            .iter()
            .find(|route| route.name.as_deref() == Some(name))
    }

    pub fn serialize(&self, route: &RegisteredRoute) -> RouteInfo {
        RouteInfo::from_route(route, self.types)
    }

    pub fn route_count(&self) -> usize {
        self.registry.len()
    }
}

fn matches_filters(route: &RegisteredRoute, filters: &RouteFilters) -> bool {
    if let Some(path) = &filters.path {
        if !path_matches(&route.uri, path) {
            return false;
        }
    }

    if let Some(method) = &filters.method {
        let method = method.to_uppercase();
        if !route.methods.iter().any(|m| *m == method) {
            return false;
        }
    }

    if let Some(domain) = &filters.domain {
        if route.domain.as_deref().unwrap_or("") != domain {
            return false;
        }
    }

    if filters.except_vendor && is_vendor_route(route) {
        return false;
    }

    if filters.only_vendor && !is_vendor_route(route) {
        return false;
    }

    true
}

/// Anchored glob match: the pattern is regex-quoted, `*` becomes `.*`, and
/// the result must match from the start of the URI.
fn path_matches(uri: &str, pattern: &str) -> bool {
    let quoted = regex::escape(pattern).replace("\\*", ".*");
    match Regex::new(&format!("^{quoted}")) {
        Ok(re) => re.is_match(uri),
        Err(err) => {
            log::warn!("unusable path filter '{pattern}': {err}");
            false
        }
    }
}

/// Whether the route's handler belongs to a recognized framework namespace.
pub fn is_vendor_route(route: &RegisteredRoute) -> bool {
    let descriptor = route.handler.descriptor();
    VENDOR_NAMESPACE_MARKERS
        .iter()
        .any(|marker| descriptor.contains(marker))
}
