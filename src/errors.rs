//! Error types for the inspection pipeline.
//!
//! The taxonomy is deliberately small: a missing target entity (route, class,
//! or method) is a hard `NotFound`-style error at the component that first
//! detects it; everything else degrades to absent fields and flows upward as
//! partial data. Failures raised by target-defined authorization code are
//! captured as descriptive facts inside the contract, never as errors here.

use thiserror::Error;

/// Lookup failures from the handler and request inspectors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InspectError {
    #[error("Controller class '{0}' does not exist.")]
    ControllerNotFound(String),

    #[error("Method '{method}' does not exist in controller '{class}'.")]
    MethodNotFound { class: String, method: String },

    #[error("Request class '{0}' does not exist.")]
    RequestClassNotFound(String),
}

/// The only hard failure the endpoint analyzer can produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzeError {
    #[error("No route found for URI '{uri}' with method '{method}'.")]
    RouteNotFound { uri: String, method: String },
}
