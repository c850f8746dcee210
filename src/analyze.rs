//! End-to-end endpoint analysis.

use serde::{Deserialize, Serialize};

use crate::errors::AnalyzeError;
use crate::example::{ExampleContract, ExampleGenerator};
use crate::inspect::{
    ControllerInspector, ControllerSignature, RequestContract, RequestInspector, ResponseContract,
    ResponseInspector,
};
use crate::reflect::{SourceScanner, TypeRegistry};
use crate::routes::{RouteIndex, RouteInfo, RouteRegistry};

/// The endpoint being analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointRef {
    pub uri: String,
    pub method: String,
    pub name: Option<String>,
}

/// Composite analysis of one endpoint.
///
/// `endpoint` and `route` are always present. The remaining blocks are
/// populated only when the route resolves to a concrete class method, and
/// each degrades independently: a failed sub-step leaves its block absent
/// without affecting the others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointAnalysis {
    pub endpoint: EndpointRef,
    pub route: RouteInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller: Option<ControllerSignature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<RequestContract>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseContract>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<ExampleContract>,
}

/// Composes the route index, inspectors, and example generator into one
/// analysis pass.
pub struct EndpointAnalyzer<'a> {
    routes: RouteIndex<'a>,
    controllers: ControllerInspector<'a>,
    requests: RequestInspector<'a>,
    responses: ResponseInspector<'a>,
    examples: ExampleGenerator<'a>,
}

impl<'a> EndpointAnalyzer<'a> {
    pub fn new(
        registry: &'a RouteRegistry,
        types: &'a TypeRegistry,
        scanner: &'a dyn SourceScanner,
    ) -> Self {
        EndpointAnalyzer {
            routes: RouteIndex::new(registry, types),
            controllers: ControllerInspector::new(types, scanner),
            requests: RequestInspector::new(types),
            responses: ResponseInspector::new(types),
            examples: ExampleGenerator::new(types),
        }
    }

    /// Analyzes the endpoint at (`uri`, `method`).
    ///
    /// The only hard failure is the initial route lookup; after a hit, every
    /// sub-step is best-effort.
    pub fn analyze(&self, uri: &str, method: &str) -> Result<EndpointAnalysis, AnalyzeError> {
        let Some(route) = self.routes.find_by_uri_and_method(uri, method) else {
            return Err(AnalyzeError::RouteNotFound {
                uri: uri.to_string(),
                method: method.to_string(),
            });
        };

        let mut analysis = EndpointAnalysis {
            endpoint: EndpointRef {
                uri: uri.to_string(),
                method: method.to_string(),
                name: route.name.clone(),
            },
            route: self.routes.serialize(route),
            controller: None,
            request: None,
            response: None,
            example: None,
        };

        let Some((class, handler_method)) = route.handler.class_and_method() else {
            return Ok(analysis);
        };

        analysis.controller = match self.controllers.inspect(class, handler_method) {
            Ok(signature) => Some(signature),
            Err(err) => {
                log::warn!("controller inspection degraded for {uri} {method}: {err}");
                None
            }
        };

        let request_class = self.controllers.request_class_of(class, handler_method);
        if let Some(request_class) = &request_class {
            analysis.request = match self.requests.inspect(request_class) {
                Ok(contract) => Some(contract),
                Err(err) => {
                    log::warn!("request inspection degraded for {uri} {method}: {err}");
                    None
                }
            };
        }

        analysis.response = Some(self.responses.inspect(class, handler_method));
        analysis.example = Some(self.examples.generate(
            uri,
            method,
            class,
            handler_method,
            request_class.as_deref(),
        ));

        Ok(analysis)
    }
}
