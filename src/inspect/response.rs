//! Best-effort response-shape description.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::reflect::{describe, TypeRegistry};

/// Minimal descriptor of what a handler method returns. Every field is
/// best-effort; the operation itself never fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseContract {
    pub controller: String,
    pub method: String,
    pub return_type: Option<String>,
    pub file: Option<PathBuf>,
    pub start_line: Option<u32>,
}

/// Source span of one handler method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodLocation {
    pub file: Option<PathBuf>,
    pub start_line: Option<u32>,
    pub end_line: Option<u32>,
}

/// Describes handler return shapes from the type registry.
pub struct ResponseInspector<'a> {
    types: &'a TypeRegistry,
}

impl<'a> ResponseInspector<'a> {
    pub fn new(types: &'a TypeRegistry) -> Self {
        ResponseInspector { types }
    }

    /// Structural description of the method's return type. Unknown classes
    /// or methods yield absent fields, not errors.
    pub fn inspect(&self, controller_class: &str, method: &str) -> ResponseContract {
        let info = self.types.method(controller_class, method);

        ResponseContract {
            controller: controller_class.trim_start_matches('\\').to_string(),
            method: method.to_string(),
            return_type: info.and_then(|m| describe(m.return_type.as_ref())),
            file: self.types.class_file(controller_class),
            start_line: info.and_then(|m| m.start_line),
        }
    }

    /// File and line span of the method, including its end line.
    pub fn method_location(&self, controller_class: &str, method: &str) -> MethodLocation {
        let info = self.types.method(controller_class, method);

        MethodLocation {
            file: self.types.class_file(controller_class),
            start_line: info.and_then(|m| m.start_line),
            end_line: info.and_then(|m| m.end_line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::{ClassInfo, MethodInfo, TypeRegistry};

    fn registry() -> TypeRegistry {
        let mut types = TypeRegistry::new();
        types.register(
            ClassInfo::new("App\\Http\\Controllers\\UserController")
                .in_file("app/Http/Controllers/UserController.php")
                .with_method(MethodInfo::new("store").at_lines(20, 27)),
        );
        types
    }

    #[test]
    fn method_location_spans_start_and_end_lines() {
        let types = registry();
        let location = ResponseInspector::new(&types)
            .method_location("App\\Http\\Controllers\\UserController", "store");

        assert_eq!(
            location.file.as_deref().and_then(|p| p.to_str()),
            Some("app/Http/Controllers/UserController.php")
        );
        assert_eq!(location.start_line, Some(20));
        assert_eq!(location.end_line, Some(27));
    }

    #[test]
    fn method_location_degrades_for_unknown_targets() {
        let types = registry();
        let inspector = ResponseInspector::new(&types);

        let location = inspector.method_location("App\\Http\\Controllers\\Ghost", "index");
        assert_eq!(location.file, None);
        assert_eq!(location.start_line, None);
        assert_eq!(location.end_line, None);

        let location =
            inspector.method_location("App\\Http\\Controllers\\UserController", "destroy");
        assert_eq!(location.start_line, None);
        assert_eq!(location.end_line, None);
    }
}
