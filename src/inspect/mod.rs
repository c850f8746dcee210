//! Handler, request, and response inspectors.

pub mod controller;
pub mod request;
pub mod response;

pub use controller::{
    ControllerInspector, ControllerMethods, ControllerSignature, MethodSummary, ParameterContract,
};
pub use request::{AuthorizationInfo, RequestContract, RequestInspector};
pub use response::{MethodLocation, ResponseContract, ResponseInspector};
