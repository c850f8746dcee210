//! Input-contract extraction from validation request classes.

use std::collections::BTreeMap;
use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::errors::InspectError;
use crate::reflect::TypeRegistry;
use crate::rules::{normalize_rules, NormalizedRule};

/// Outcome of probing a request class's authorization predicate.
///
/// When no predicate is declared the contract is open by default. A raised
/// failure is a descriptive fact about the handler, not a pipeline error, so
/// it lands in `error` with `authorized` absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationInfo {
    pub has_authorize: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorized: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuthorizationInfo {
    fn default_allow() -> Self {
        AuthorizationInfo {
            has_authorize: false,
            authorized: Some(true),
            error: None,
        }
    }
}

/// The extracted input-validation contract of one request class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestContract {
    pub class: String,
    pub file_path: Option<PathBuf>,
    pub rules: BTreeMap<String, Vec<NormalizedRule>>,
    pub messages: BTreeMap<String, String>,
    pub attributes: BTreeMap<String, String>,
    pub authorization: AuthorizationInfo,
}

/// Extracts validation contracts from the type registry.
pub struct RequestInspector<'a> {
    types: &'a TypeRegistry,
}

impl<'a> RequestInspector<'a> {
    pub fn new(types: &'a TypeRegistry) -> Self {
        RequestInspector { types }
    }

    /// Inspects a request class. The identifier may be the plain namespaced
    /// name, a slash-separated path form, or a base64-encoded form.
    pub fn inspect(&self, request_class: &str) -> Result<RequestContract, InspectError> {
        let class_name = self.normalize_class_name(request_class);

        let Some(class) = self.types.class(&class_name) else {
            return Err(InspectError::RequestClassNotFound(class_name));
        };

        Ok(RequestContract {
            class: class.name.clone(),
            file_path: class.file.clone(),
            rules: normalize_rules(&class.rules),
            messages: class.messages.clone(),
            attributes: class.attributes.clone(),
            authorization: self.inspect_authorization(&class_name),
        })
    }

    /// Normalized rules of a class; empty when the class is unknown or
    /// declares none.
    pub fn extract_rules(&self, request_class: &str) -> BTreeMap<String, Vec<NormalizedRule>> {
        self.types
            .class(request_class)
            .map(|class| normalize_rules(&class.rules))
            .unwrap_or_default()
    }

    /// Probes the authorization predicate in isolation. The hook runs
    /// outside any request lifecycle; its failure is captured, never
    /// propagated.
    fn inspect_authorization(&self, class_name: &str) -> AuthorizationInfo {
        let hook = self.types.class(class_name).and_then(|c| c.authorize.clone());
        let Some(hook) = hook else {
            return AuthorizationInfo::default_allow();
        };

        match hook.invoke() {
            Ok(authorized) => AuthorizationInfo {
                has_authorize: true,
                authorized: Some(authorized),
                error: None,
            },
            Err(message) => {
                log::debug!("authorization probe for '{class_name}' failed: {message}");
                AuthorizationInfo {
                    has_authorize: true,
                    authorized: None,
                    error: Some(message),
                }
            }
        }
    }

    /// Resolves the caller-supplied identifier to a canonical class name.
    ///
    /// A base64-encoded form wins when the decoded text names a loadable
    /// class; otherwise the literal form is kept, with `/` converted to the
    /// namespace separator and doubled separators collapsed.
    fn normalize_class_name(&self, raw: &str) -> String {
        if let Ok(bytes) = BASE64.decode(raw) {
            if let Ok(decoded) = String::from_utf8(bytes) {
                if self.types.class_exists(&decoded) {
                    return decoded.trim_start_matches('\\').to_string();
                }
            }
        }

        raw.replace('/', "\\")
            .replace("\\\\", "\\")
            .trim_start_matches('\\')
            .to_string()
    }
}
