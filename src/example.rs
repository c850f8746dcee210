//! Example request/response synthesis.
//!
//! Example bodies are deliberately low-fidelity: required fields are kept,
//! and each gets either the name of its first non-`required` rule as a
//! placeholder or a value guessed from the field name. This trades accuracy
//! for stability; it is illustrative, not type-aware generation.

use std::collections::BTreeMap;

use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::inspect::RequestInspector;
use crate::reflect::{describe, TypeRegistry};
use crate::rules::NormalizedRule;

/// Synthesized example call for one endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleContract {
    pub http_method: String,
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<BTreeMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_response_type: Option<String>,
}

/// Derives example payloads from normalized input contracts.
pub struct ExampleGenerator<'a> {
    types: &'a TypeRegistry,
}

impl<'a> ExampleGenerator<'a> {
    pub fn new(types: &'a TypeRegistry) -> Self {
        ExampleGenerator { types }
    }

    /// Builds the example for an endpoint. A request body is attached only
    /// when a request class is known; the expected response type is attached
    /// whenever the handler declares one.
    pub fn generate(
        &self,
        uri: &str,
        method: &str,
        controller_class: &str,
        controller_method: &str,
        request_class: Option<&str>,
    ) -> ExampleContract {
        let request_body = request_class.map(|class| {
            let rules = RequestInspector::new(self.types).extract_rules(class);
            build_request_body(&rules)
        });

        let expected_response_type = self
            .types
            .method(controller_class, controller_method)
            .and_then(|m| describe(m.return_type.as_ref()));

        ExampleContract {
            http_method: method.to_string(),
            uri: uri.to_string(),
            request_body,
            expected_response_type,
        }
    }
}

/// Keeps fields carrying a literal `required` rule and guesses a value for
/// each.
fn build_request_body(rules: &BTreeMap<String, Vec<NormalizedRule>>) -> BTreeMap<String, Value> {
    rules
        .iter()
        .filter(|(_, field_rules)| is_required(field_rules))
        .map(|(field, field_rules)| (field.clone(), guess_value(field, field_rules)))
        .collect()
}

fn is_required(field_rules: &[NormalizedRule]) -> bool {
    field_rules.iter().any(|rule| rule.name == "required")
}

/// First non-`required` rule name as placeholder, else a name-based guess.
fn guess_value(field: &str, field_rules: &[NormalizedRule]) -> Value {
    field_rules
        .iter()
        .map(|rule| rule.name.as_str())
        .find(|name| *name != "required")
        .map(|name| Value::String(name.to_string()))
        .unwrap_or_else(|| default_value(field))
}

/// Field-name heuristic, first matching substring category wins. Matching is
/// case-insensitive; category order is fixed.
fn default_value(field: &str) -> Value {
    let field = field.to_lowercase();
    let contains = |needles: &[&str]| needles.iter().any(|needle| field.contains(needle));

    match () {
        _ if contains(&["email"]) => json!("example@example.com"),
        _ if contains(&["url", "link", "website"]) => json!("https://example.com"),
        _ if contains(&["password", "secret"]) => json!("password123"),
        _ if contains(&["phone"]) => json!("+1234567890"),
        _ if contains(&["id"]) => json!(1),
        _ if contains(&["price", "amount", "total"]) => json!(99.99),
        _ if contains(&["count", "quantity", "number"]) => json!(1),
        _ if contains(&["active", "enabled", "verified"]) => json!(true),
        _ if contains(&["date", "time"]) => json!(Local::now().date_naive().to_string()),
        _ if contains(&["name"]) => json!("Example Name"),
        _ if contains(&["title", "subject"]) => json!("Example Title"),
        _ if contains(&["description", "content", "body"]) => json!("Example description text"),
        _ if contains(&["address", "city", "country"]) => json!("Example Value"),
        _ => json!("value"),
    }
}
