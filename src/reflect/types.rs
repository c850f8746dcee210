//! Declared types and normalized string descriptors.

use serde::{Deserialize, Serialize};

/// Builtin type names recognized when parsing a declared type from text.
const BUILTIN_TYPES: &[&str] = &[
    "array", "bool", "callable", "false", "float", "int", "iterable", "mixed", "never", "null",
    "object", "string", "true", "void",
];

/// A declared parameter or return type as reported by the host application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A single named type. `builtin` distinguishes language primitives from
    /// user-defined classes and interfaces.
    Named { name: String, builtin: bool },
    /// A union of alternatives, in declaration order.
    Union(Vec<TypeExpr>),
}

impl TypeExpr {
    pub fn builtin(name: impl Into<String>) -> Self {
        TypeExpr::Named {
            name: name.into(),
            builtin: true,
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        let name = name.into();
        TypeExpr::Named {
            name: name.trim_start_matches('\\').to_string(),
            builtin: false,
        }
    }

    pub fn union(alternatives: impl IntoIterator<Item = TypeExpr>) -> Self {
        TypeExpr::Union(alternatives.into_iter().collect())
    }

    /// Parses a declared type from its textual form, e.g. `"string"`,
    /// `"\App\Models\User"`, or `"int|string"`. A name is a builtin when it
    /// matches a known primitive; anything else is treated as a class.
    pub fn parse(text: &str) -> Option<TypeExpr> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if text.contains('|') {
            let members: Vec<TypeExpr> = text.split('|').filter_map(TypeExpr::parse).collect();
            return match members.len() {
                0 => None,
                1 => members.into_iter().next(),
                _ => Some(TypeExpr::Union(members)),
            };
        }
        let bare = text.trim_start_matches('\\');
        if BUILTIN_TYPES.contains(&bare.to_ascii_lowercase().as_str()) {
            Some(TypeExpr::builtin(bare))
        } else {
            Some(TypeExpr::class(bare))
        }
    }

    /// The type name without any namespace-separator prefix. Union members
    /// are joined with `|`.
    pub fn bare(&self) -> String {
        match self {
            TypeExpr::Named { name, .. } => name.clone(),
            TypeExpr::Union(members) => members
                .iter()
                .map(TypeExpr::bare)
                .collect::<Vec<_>>()
                .join("|"),
        }
    }

    /// The class name to use for ancestry checks. Builtins and unions never
    /// qualify as a single loadable class.
    pub fn class_name(&self) -> Option<&str> {
        match self {
            TypeExpr::Named {
                name,
                builtin: false,
            } => Some(name),
            _ => None,
        }
    }
}

/// Turns a declared type into its normalized string descriptor.
///
/// Builtins stay bare, class types gain a leading `\` so callers can tell a
/// user-defined type from a primitive, and union alternatives are normalized
/// recursively and joined with `|`. An absent type yields `None`; this never
/// fails.
pub fn describe(ty: Option<&TypeExpr>) -> Option<String> {
    let ty = ty?;
    Some(match ty {
        TypeExpr::Named { name, builtin } => {
            if *builtin {
                name.clone()
            } else {
                format!("\\{}", name.trim_start_matches('\\'))
            }
        }
        TypeExpr::Union(members) => members
            .iter()
            .filter_map(|m| describe(Some(m)))
            .collect::<Vec<_>>()
            .join("|"),
    })
}

/// A parameter's declared default value.
///
/// A constant-referenced default keeps the constant's declared name rather
/// than its resolved value, so the printed contract stays stable across
/// constant changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultValue {
    Literal(serde_json::Value),
    Constant(String),
}

impl DefaultValue {
    /// Renders the default as a JSON value for serialized contracts.
    pub fn render(&self) -> serde_json::Value {
        match self {
            DefaultValue::Literal(value) => value.clone(),
            DefaultValue::Constant(name) => serde_json::Value::String(name.clone()),
        }
    }
}

/// Method visibility in the host application's model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}
