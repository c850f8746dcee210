//! JSON snapshot loading.
//!
//! A snapshot is an exported description of the application under
//! inspection: its route table, its classes, and the family base types used
//! for ancestry checks. Authorization outcomes recorded in a snapshot are
//! installed as fixed-outcome hooks; embedding hosts can register live
//! closures on the [`TypeRegistry`] instead.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;

use crate::reflect::{
    AuthorizeHook, ClassInfo, DefaultValue, MethodInfo, ParamInfo, TypeExpr, TypeFamily,
    TypeRegistry, Visibility,
};
use crate::routes::{HandlerRef, RegisteredRoute, RouteRegistry};
use crate::rules::RawRules;
use crate::server::AppContext;

/// Top-level snapshot document.
#[derive(Debug, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub routes: Vec<RouteDto>,
    #[serde(default)]
    pub classes: Vec<ClassDto>,
    #[serde(default)]
    pub families: FamilyDto,
}

#[derive(Debug, Default, Deserialize)]
pub struct FamilyDto {
    #[serde(default)]
    pub request: Vec<String>,
    #[serde(default)]
    pub resource: Vec<String>,
    #[serde(default)]
    pub model: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RouteDto {
    pub uri: String,
    pub methods: Vec<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub middleware: Vec<String>,
    #[serde(default)]
    pub wheres: BTreeMap<String, String>,
    /// `Class@method` handler reference; absent means a closure.
    #[serde(default)]
    pub controller: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClassDto {
    pub name: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub methods: Vec<MethodDto>,
    #[serde(default)]
    pub rules: RawRules,
    #[serde(default)]
    pub messages: BTreeMap<String, String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub authorize: Option<AuthorizeDto>,
}

/// Declared authorization outcome: `{"returns": bool}` or
/// `{"fails": "message"}`.
#[derive(Debug, Deserialize)]
pub struct AuthorizeDto {
    #[serde(default)]
    pub returns: Option<bool>,
    #[serde(default)]
    pub fails: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MethodDto {
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub params: Vec<ParamDto>,
    #[serde(default)]
    pub return_type: Option<String>,
    #[serde(default)]
    pub start_line: Option<u32>,
    #[serde(default)]
    pub end_line: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ParamDto {
    pub name: String,
    #[serde(default, rename = "type")]
    pub ty: Option<String>,
    #[serde(default)]
    pub allows_null: bool,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub constant_default: Option<String>,
    #[serde(default)]
    pub variadic: bool,
}

impl Snapshot {
    pub fn load(path: &Path) -> anyhow::Result<Snapshot> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading snapshot {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("parsing snapshot {}", path.display()))
    }

    /// Builds the analysis context from the snapshot.
    pub fn into_context(self) -> AppContext {
        let routes = RouteRegistry::new(self.routes.into_iter().map(build_route).collect());

        let mut types = TypeRegistry::new();
        for (family, bases) in [
            (TypeFamily::Request, &self.families.request),
            (TypeFamily::Resource, &self.families.resource),
            (TypeFamily::Model, &self.families.model),
        ] {
            for base in bases {
                types.add_family_base(family, base);
            }
        }
        for class in self.classes {
            types.register(build_class(class));
        }

        AppContext::new(routes, types)
    }
}

fn build_route(dto: RouteDto) -> RegisteredRoute {
    let handler = match dto.controller.as_deref() {
        Some(action) => match action.split_once('@') {
            Some((class, method)) => HandlerRef::controller(class, method),
            None => {
                log::warn!("handler reference without method, treated as closure: {action}");
                HandlerRef::Closure
            }
        },
        None => HandlerRef::Closure,
    };

    RegisteredRoute {
        uri: dto.uri,
        methods: dto.methods.iter().map(|m| m.to_uppercase()).collect(),
        name: dto.name,
        domain: dto.domain,
        middleware: dto.middleware,
        wheres: dto.wheres,
        handler,
    }
}

fn build_class(dto: ClassDto) -> ClassInfo {
    let mut class = ClassInfo::new(dto.name);
    if let Some(file) = dto.file {
        class = class.in_file(file);
    }
    if let Some(parent) = dto.parent {
        class = class.extending(parent);
    }
    class.methods = dto.methods.into_iter().map(build_method).collect();
    class.rules = dto.rules;
    class.messages = dto.messages;
    class.attributes = dto.attributes;
    class.authorize = dto.authorize.map(build_authorize);
    class
}

fn build_authorize(dto: AuthorizeDto) -> AuthorizeHook {
    match (dto.returns, dto.fails) {
        (_, Some(message)) => AuthorizeHook::failing(message),
        (Some(value), None) => AuthorizeHook::returning(value),
        (None, None) => AuthorizeHook::returning(true),
    }
}

fn build_method(dto: MethodDto) -> MethodInfo {
    MethodInfo {
        name: dto.name,
        visibility: dto.visibility,
        params: dto.params.into_iter().map(build_param).collect(),
        return_type: dto.return_type.as_deref().and_then(TypeExpr::parse),
        start_line: dto.start_line,
        end_line: dto.end_line,
    }
}

fn build_param(dto: ParamDto) -> ParamInfo {
    let default = match (dto.constant_default, dto.default) {
        (Some(constant), _) => Some(DefaultValue::Constant(constant)),
        (None, Some(value)) => Some(DefaultValue::Literal(value)),
        (None, None) => None,
    };

    ParamInfo {
        name: dto.name,
        ty: dto.ty.as_deref().and_then(TypeExpr::parse),
        allows_null: dto.allows_null,
        default,
        variadic: dto.variadic,
    }
}
