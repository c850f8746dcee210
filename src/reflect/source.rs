//! Best-effort source scanning for import declarations.
//!
//! The host runtime's reflection does not expose a class's import list, so it
//! is recovered by scanning the class's source file. This is optional
//! enrichment: any failure yields an empty list, never an error, and no other
//! component depends on the result.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

static USE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^use\s+([^;]+);\s*$").expect("valid import regex"));

/// Extracts top-level import declarations from a source file.
pub trait SourceScanner {
    /// Returns the imports declared in `file`, or an empty list when the
    /// file is missing or unreadable.
    fn imports(&self, file: &Path) -> Vec<String>;
}

/// Filesystem-backed scanner.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsScanner;

impl SourceScanner for FsScanner {
    fn imports(&self, file: &Path) -> Vec<String> {
        let Ok(content) = fs::read_to_string(file) else {
            log::debug!("import scan skipped, unreadable file: {}", file.display());
            return Vec::new();
        };
        USE_LINE
            .captures_iter(&content)
            .map(|captures| captures[1].trim().to_string())
            .collect()
    }
}
