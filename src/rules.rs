//! Validation-rule normalization.
//!
//! Handlers declare validation rules in heterogeneous encodings: a single
//! pipe-joined string (`"required|max:255"`), a list mixing strings with
//! opaque validator-object references, or nothing at all. Everything
//! normalizes to an ordered list of `{name, parameters}` entries per field.
//! This is descriptive only: no rule is ever validated or executed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One validation constraint in uniform form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRule {
    pub name: String,
    pub parameters: Vec<String>,
}

impl NormalizedRule {
    pub fn bare(name: impl Into<String>) -> Self {
        NormalizedRule {
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameters(
        name: impl Into<String>,
        parameters: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        NormalizedRule {
            name: name.into(),
            parameters: parameters.into_iter().map(Into::into).collect(),
        }
    }
}

/// The kind of opaque validator object a rule entry references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleObjectKind {
    /// Legacy rule-contract implementation.
    #[default]
    Object,
    /// Modern validation-rule implementation.
    ValidationRule,
}

impl RuleObjectKind {
    fn label(self) -> &'static str {
        match self {
            RuleObjectKind::Object => "object",
            RuleObjectKind::ValidationRule => "validation_rule",
        }
    }
}

/// A reference to a validator object. Only its concrete type is recorded;
/// the object's behavior is never executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleObject {
    pub class: String,
    #[serde(default)]
    pub kind: RuleObjectKind,
}

/// One raw rule entry as declared by the handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRule {
    Text(String),
    Object(RuleObject),
}

impl RawRule {
    pub fn text(rule: impl Into<String>) -> Self {
        RawRule::Text(rule.into())
    }

    pub fn object(class: impl Into<String>) -> Self {
        RawRule::Object(RuleObject {
            class: class.into(),
            kind: RuleObjectKind::Object,
        })
    }

    pub fn validation_rule(class: impl Into<String>) -> Self {
        RawRule::Object(RuleObject {
            class: class.into(),
            kind: RuleObjectKind::ValidationRule,
        })
    }
}

/// A field's declared rules: either one delimiter-joined string or a list of
/// independent entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRuleSet {
    Joined(String),
    List(Vec<RawRule>),
}

/// Declared rules keyed by field name.
pub type RawRules = BTreeMap<String, RawRuleSet>;

/// Normalizes every field's declared rules.
pub fn normalize_rules(rules: &RawRules) -> BTreeMap<String, Vec<NormalizedRule>> {
    rules
        .iter()
        .map(|(field, set)| (field.clone(), normalize_field(set)))
        .collect()
}

/// Normalizes one field's declared rules.
///
/// A joined string splits on `|` before each token is parsed; list entries
/// are parsed independently and never re-split.
pub fn normalize_field(set: &RawRuleSet) -> Vec<NormalizedRule> {
    match set {
        RawRuleSet::Joined(joined) => {
            if joined.is_empty() {
                return Vec::new();
            }
            joined.split('|').map(parse_rule_token).collect()
        }
        RawRuleSet::List(entries) => entries.iter().map(normalize_entry).collect(),
    }
}

fn normalize_entry(rule: &RawRule) -> NormalizedRule {
    match rule {
        RawRule::Text(token) => parse_rule_token(token),
        RawRule::Object(object) => NormalizedRule {
            name: object.kind.label().to_string(),
            parameters: vec![object.class.clone()],
        },
    }
}

/// Parses one rule token. Only the first `:` separates the name from its
/// parameter payload; remaining colons belong to the payload, which then
/// splits on `,`.
fn parse_rule_token(token: &str) -> NormalizedRule {
    match token.split_once(':') {
        None => NormalizedRule::bare(token),
        Some((name, parameters)) => NormalizedRule {
            name: name.to_string(),
            parameters: parameters.split(',').map(str::to_string).collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joined_string_splits_on_pipes() {
        let rules = normalize_field(&RawRuleSet::Joined("required|max:255".to_string()));
        assert_eq!(
            rules,
            vec![
                NormalizedRule::bare("required"),
                NormalizedRule::with_parameters("max", ["255"]),
            ]
        );
    }

    #[test]
    fn parameters_split_on_commas() {
        let rules = normalize_field(&RawRuleSet::Joined("in:a,b,c".to_string()));
        assert_eq!(
            rules,
            vec![NormalizedRule::with_parameters("in", ["a", "b", "c"])]
        );
    }

    #[test]
    fn only_first_colon_separates_name_from_parameters() {
        let rules = normalize_field(&RawRuleSet::Joined("date_format:Y-m-d H:i".to_string()));
        assert_eq!(
            rules,
            vec![NormalizedRule::with_parameters("date_format", ["Y-m-d H:i"])]
        );
    }

    #[test]
    fn empty_string_yields_no_rules() {
        assert!(normalize_field(&RawRuleSet::Joined(String::new())).is_empty());
        assert!(normalize_field(&RawRuleSet::List(Vec::new())).is_empty());
    }

    #[test]
    fn list_entries_parse_independently() {
        let set = RawRuleSet::List(vec![
            RawRule::text("required"),
            RawRule::text("max:255"),
            RawRule::object("App\\Rules\\Uppercase"),
            RawRule::validation_rule("App\\Rules\\Lowercase"),
        ]);
        let rules = normalize_field(&set);
        assert_eq!(
            rules,
            vec![
                NormalizedRule::bare("required"),
                NormalizedRule::with_parameters("max", ["255"]),
                NormalizedRule::with_parameters("object", ["App\\Rules\\Uppercase"]),
                NormalizedRule::with_parameters("validation_rule", ["App\\Rules\\Lowercase"]),
            ]
        );
    }

    #[test]
    fn raw_rule_set_deserializes_from_string_or_list() {
        let joined: RawRuleSet = serde_json::from_str(r#""required|string""#).expect("joined");
        assert_eq!(joined, RawRuleSet::Joined("required|string".to_string()));

        let list: RawRuleSet = serde_json::from_str(
            r#"["required", {"class": "App\\Rules\\Uppercase", "kind": "validation_rule"}]"#,
        )
        .expect("list");
        assert_eq!(
            normalize_field(&list),
            vec![
                NormalizedRule::bare("required"),
                NormalizedRule::with_parameters("validation_rule", ["App\\Rules\\Uppercase"]),
            ]
        );
    }
}
