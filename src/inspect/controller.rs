//! Handler inspection: signatures, imports, and parameter classification.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::InspectError;
use crate::reflect::{describe, MethodInfo, SourceScanner, TypeFamily, TypeRegistry, Visibility};

/// Import prefix treated as framework-internal and dropped from `uses`.
const FRAMEWORK_IMPORT_PREFIX: &str = "Illuminate\\";

/// A serialized method parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterContract {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Option<String>,
    pub allows_null: bool,
    pub default_value: Option<serde_json::Value>,
    pub is_variadic: bool,
}

/// A resolved handler signature with source location and advisory imports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerSignature {
    pub class: String,
    pub method: String,
    pub file_path: Option<PathBuf>,
    pub start_line: Option<u32>,
    pub return_type: Option<String>,
    pub parameters: Vec<ParameterContract>,
    pub uses: Vec<String>,
}

/// One entry in a class's public-method listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodSummary {
    pub name: String,
    pub return_type: Option<String>,
    pub parameters: Vec<MethodParameterSummary>,
    pub start_line: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodParameterSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Option<String>,
    pub optional: bool,
}

/// Public-method listing of one class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerMethods {
    pub controller: String,
    pub file_path: Option<PathBuf>,
    pub methods: Vec<MethodSummary>,
}

/// Resolves handler signatures against the type registry.
pub struct ControllerInspector<'a> {
    types: &'a TypeRegistry,
    scanner: &'a dyn SourceScanner,
}

impl<'a> ControllerInspector<'a> {
    pub fn new(types: &'a TypeRegistry, scanner: &'a dyn SourceScanner) -> Self {
        ControllerInspector { types, scanner }
    }

    /// Resolves a class method into a full signature. A missing class is
    /// reported before a missing method.
    pub fn inspect(&self, class: &str, method: &str) -> Result<ControllerSignature, InspectError> {
        if !self.types.class_exists(class) {
            return Err(InspectError::ControllerNotFound(class.to_string()));
        }
        let Some(info) = self.types.method(class, method) else {
            return Err(InspectError::MethodNotFound {
                class: class.to_string(),
                method: method.to_string(),
            });
        };

        Ok(ControllerSignature {
            class: class.trim_start_matches('\\').to_string(),
            method: method.to_string(),
            file_path: self.types.class_file(class),
            start_line: info.start_line,
            return_type: describe(info.return_type.as_ref()),
            parameters: info.params.iter().map(serialize_parameter).collect(),
            uses: self.uses(class),
        })
    }

    /// Best-effort import listing for a class, with framework-internal
    /// imports filtered out. Never fails: an unknown class or unreadable
    /// source yields an empty list.
    pub fn uses(&self, class: &str) -> Vec<String> {
        let Some(file) = self.types.class_file(class) else {
            return Vec::new();
        };
        self.scanner
            .imports(&file)
            .into_iter()
            .filter(|import| !import.starts_with(FRAMEWORK_IMPORT_PREFIX))
            .collect()
    }

    /// First parameter whose type descends from the input-validation family,
    /// as a normalized descriptor.
    pub fn request_class_of(&self, class: &str, method: &str) -> Option<String> {
        self.first_param_of_family(class, method, TypeFamily::Request)
    }

    /// The return type when it descends from the response-shaping family.
    pub fn resource_class_of(&self, class: &str, method: &str) -> Option<String> {
        let info = self.types.method(class, method)?;
        let ty = info.return_type.as_ref()?;
        let name = ty.class_name()?;
        if self.types.is_kind_of(name, TypeFamily::Resource) {
            describe(Some(ty))
        } else {
            None
        }
    }

    /// First parameter whose type descends from the persisted-entity family.
    pub fn model_class_of(&self, class: &str, method: &str) -> Option<String> {
        self.first_param_of_family(class, method, TypeFamily::Model)
    }

    fn first_param_of_family(
        &self,
        class: &str,
        method: &str,
        family: TypeFamily,
    ) -> Option<String> {
        let info = self.types.method(class, method)?;
        info.params.iter().find_map(|param| {
            let ty = param.ty.as_ref()?;
            let name = ty.class_name()?;
            if self.types.is_kind_of(name, family) {
                describe(Some(ty))
            } else {
                None
            }
        })
    }

    /// Lists a class's public methods, excluding dunder-style names.
    pub fn public_methods(&self, class: &str) -> Result<ControllerMethods, InspectError> {
        let Some(info) = self.types.class(class) else {
            return Err(InspectError::ControllerNotFound(class.to_string()));
        };

        let methods = info
            .methods
            .iter()
            .filter(|m| m.visibility == Visibility::Public && !m.name.starts_with("__"))
            .map(summarize_method)
            .collect();

        Ok(ControllerMethods {
            controller: info.name.clone(),
            file_path: info.file.clone(),
            methods,
        })
    }
}

fn serialize_parameter(param: &crate::reflect::ParamInfo) -> ParameterContract {
    ParameterContract {
        name: param.name.clone(),
        ty: describe(param.ty.as_ref()),
        allows_null: param.allows_null,
        default_value: param.default.as_ref().map(|d| d.render()),
        is_variadic: param.variadic,
    }
}

fn summarize_method(method: &MethodInfo) -> MethodSummary {
    MethodSummary {
        name: method.name.clone(),
        return_type: method.return_type.as_ref().map(|ty| ty.bare()),
        parameters: method
            .params
            .iter()
            .map(|param| MethodParameterSummary {
                name: param.name.clone(),
                ty: param.ty.as_ref().map(|ty| ty.bare()),
                optional: param.default.is_some() || param.variadic,
            })
            .collect(),
        start_line: method.start_line,
    }
}
