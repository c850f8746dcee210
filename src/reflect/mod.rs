//! Reflective model of the inspected application.
//!
//! Rust cannot reflect over a foreign application at runtime, so the
//! "reflection facility" is an explicit data structure: a [`TypeRegistry`]
//! describing classes, methods, parameters, ancestry, and declared validation
//! metadata. Host adapters populate it either in-process or from an exported
//! snapshot; the pipeline only ever reads from it.

pub mod model;
pub mod source;
pub mod types;

pub use model::{AuthorizeHook, ClassInfo, MethodInfo, ParamInfo, TypeFamily, TypeRegistry};
pub use source::{FsScanner, SourceScanner};
pub use types::{describe, DefaultValue, TypeExpr, Visibility};
