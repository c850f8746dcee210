//! routemap: read-only discovery and analysis of a web application's HTTP
//! API surface.
//!
//! The pipeline takes an immutable route registry snapshot and a reflective
//! model of the application's types, and produces normalized endpoint
//! descriptions: route metadata, handler signatures, input-validation
//! contracts, response shapes, and synthesized example payloads. Nothing in
//! this crate executes a real request or mutates application state.

pub mod analyze;
pub mod errors;
pub mod example;
pub mod inspect;
pub mod reflect;
pub mod routes;
pub mod rules;
pub mod server;

pub use crate::analyze::{EndpointAnalysis, EndpointAnalyzer};
pub use crate::errors::{AnalyzeError, InspectError};
pub use crate::example::{ExampleContract, ExampleGenerator};
pub use crate::inspect::{
    ControllerInspector, ControllerSignature, RequestContract, RequestInspector, ResponseContract,
    ResponseInspector,
};
pub use crate::reflect::{
    describe, AuthorizeHook, ClassInfo, MethodInfo, ParamInfo, TypeExpr, TypeFamily, TypeRegistry,
};
pub use crate::routes::{
    HandlerRef, RegisteredRoute, RouteFilters, RouteIndex, RouteInfo, RouteRegistry,
};
pub use crate::rules::{normalize_rules, NormalizedRule, RawRule, RawRuleSet, RawRules};
pub use crate::server::{AppContext, ToolResponse};
