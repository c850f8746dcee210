//! The type registry: classes, methods, ancestry, and validation metadata.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;

use crate::reflect::types::{DefaultValue, TypeExpr, Visibility};
use crate::rules::RawRules;

/// The kinds of framework base types the pipeline classifies against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TypeFamily {
    /// Input-validation objects (form requests).
    Request,
    /// Output-shaping objects (response resources and collections).
    Resource,
    /// Persisted entity types (data models).
    Model,
}

/// An isolated, fallible call into target-defined authorization code.
///
/// The hook stands in for "construct the target without its normal lifecycle
/// and call its authorization predicate". Invocation converts panics into
/// error messages so nothing crosses the inspection boundary unconverted.
#[derive(Clone)]
pub struct AuthorizeHook(Arc<dyn Fn() -> Result<bool, String> + Send + Sync>);

impl AuthorizeHook {
    pub fn new(f: impl Fn() -> Result<bool, String> + Send + Sync + 'static) -> Self {
        AuthorizeHook(Arc::new(f))
    }

    /// A hook with a fixed outcome, as recorded in exported snapshots.
    pub fn returning(value: bool) -> Self {
        AuthorizeHook::new(move || Ok(value))
    }

    /// A hook that fails with a fixed message, as recorded in snapshots.
    pub fn failing(message: impl Into<String>) -> Self {
        let message = message.into();
        AuthorizeHook::new(move || Err(message.clone()))
    }

    /// Invokes the predicate, converting a panic into an error message.
    pub fn invoke(&self) -> Result<bool, String> {
        match catch_unwind(AssertUnwindSafe(|| (self.0)())) {
            Ok(result) => result,
            Err(payload) => Err(panic_message(&payload)),
        }
    }
}

impl fmt::Debug for AuthorizeHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthorizeHook")
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "authorization predicate panicked".to_string()
    }
}

/// A declared method parameter.
#[derive(Debug, Clone)]
pub struct ParamInfo {
    pub name: String,
    pub ty: Option<TypeExpr>,
    pub allows_null: bool,
    pub default: Option<DefaultValue>,
    pub variadic: bool,
}

impl ParamInfo {
    pub fn new(name: impl Into<String>, ty: Option<TypeExpr>) -> Self {
        ParamInfo {
            name: name.into(),
            ty,
            allows_null: false,
            default: None,
            variadic: false,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.allows_null = true;
        self
    }

    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }
}

/// A declared method. Parameter order matches declaration order.
#[derive(Debug, Clone)]
pub struct MethodInfo {
    pub name: String,
    pub visibility: Visibility,
    pub params: Vec<ParamInfo>,
    pub return_type: Option<TypeExpr>,
    pub start_line: Option<u32>,
    pub end_line: Option<u32>,
}

impl MethodInfo {
    pub fn new(name: impl Into<String>) -> Self {
        MethodInfo {
            name: name.into(),
            visibility: Visibility::Public,
            params: Vec::new(),
            return_type: None,
            start_line: None,
            end_line: None,
        }
    }

    pub fn returning(mut self, ty: TypeExpr) -> Self {
        self.return_type = Some(ty);
        self
    }

    pub fn with_param(mut self, param: ParamInfo) -> Self {
        self.params.push(param);
        self
    }

    pub fn at_lines(mut self, start: u32, end: u32) -> Self {
        self.start_line = Some(start);
        self.end_line = Some(end);
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}

/// A class in the inspected application's model.
#[derive(Debug, Clone, Default)]
pub struct ClassInfo {
    /// Fully qualified, backslash-namespaced name without a leading `\`.
    pub name: String,
    pub file: Option<PathBuf>,
    /// Direct parent class, if any. Ancestry walks follow this chain.
    pub parent: Option<String>,
    pub methods: Vec<MethodInfo>,
    /// Declared validation rules, keyed by field.
    pub rules: RawRules,
    /// Custom validation error messages, keyed by `field.rule`.
    pub messages: BTreeMap<String, String>,
    /// Custom field-label overrides.
    pub attributes: BTreeMap<String, String>,
    /// Authorization predicate, when the class declares one.
    pub authorize: Option<AuthorizeHook>,
}

impl ClassInfo {
    pub fn new(name: impl Into<String>) -> Self {
        ClassInfo {
            name: canonical(&name.into()),
            ..ClassInfo::default()
        }
    }

    pub fn in_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn extending(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(canonical(&parent.into()));
        self
    }

    pub fn with_method(mut self, method: MethodInfo) -> Self {
        self.methods.push(method);
        self
    }

    pub fn method(&self, name: &str) -> Option<&MethodInfo> {
        self.methods.iter().find(|m| m.name == name)
    }
}

fn canonical(name: &str) -> String {
    name.trim_start_matches('\\').to_string()
}

/// Read-only registry of the inspected application's classes.
///
/// Family base-type names are supplied at construction, keeping the pipeline
/// decoupled from any particular framework's class hierarchy.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    classes: BTreeMap<String, ClassInfo>,
    families: BTreeMap<TypeFamily, BTreeSet<String>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        TypeRegistry::default()
    }

    pub fn register(&mut self, class: ClassInfo) {
        self.classes.insert(class.name.clone(), class);
    }

    /// Declares a base-type name for an ancestry family.
    pub fn add_family_base(&mut self, family: TypeFamily, base: impl Into<String>) {
        self.families
            .entry(family)
            .or_default()
            .insert(canonical(&base.into()));
    }

    pub fn class(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.get(&canonical(name))
    }

    pub fn class_exists(&self, name: &str) -> bool {
        self.class(name).is_some()
    }

    pub fn method(&self, class: &str, method: &str) -> Option<&MethodInfo> {
        self.class(class)?.method(method)
    }

    pub fn method_exists(&self, class: &str, method: &str) -> bool {
        self.method(class, method).is_some()
    }

    pub fn class_file(&self, name: &str) -> Option<PathBuf> {
        self.class(name)?.file.clone()
    }

    pub fn method_start_line(&self, class: &str, method: &str) -> Option<u32> {
        self.method(class, method)?.start_line
    }

    /// Whether `name` is a loadable class descending from one of `family`'s
    /// base types. Unknown or unloadable types never qualify and never fail.
    pub fn is_kind_of(&self, name: &str, family: TypeFamily) -> bool {
        let Some(bases) = self.families.get(&family) else {
            return false;
        };
        let Some(class) = self.class(name) else {
            return false;
        };
        let mut parent = class.parent.as_deref();
        while let Some(ancestor) = parent {
            if bases.contains(ancestor) {
                return true;
            }
            parent = self.class(ancestor).and_then(|c| c.parent.as_deref());
        }
        false
    }
}
