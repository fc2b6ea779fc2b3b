//! Filesystem utilities
//!
//! Loading local inputs, deriving the code year from file names, and naming
//! generated files.

use sanitize_filename::Options as SanitizeOptions;
use std::path::Path;

use crate::codes::OutputKind;
use crate::errors::Result;

/// Sanitize a filename for safe filesystem usage
pub fn sanitize_filename(name: &str) -> String {
    // Use windows mode to also handle reserved names like CON, NUL, etc.
    sanitize_filename::sanitize_with_options(name, SanitizeOptions {
        replacement: "_",
        windows: true,
        truncate: true,
    })
}

/// Whether `path` has extension `ext` (without the dot), ignoring case
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

/// Read `path` if it is a regular file with extension `ext`
pub fn load_if(path: &Path, ext: &str) -> Option<Result<Vec<u8>>> {
    if !path.is_file() || !has_extension(path, ext) {
        return None;
    }
    Some(std::fs::read(path).map_err(Into::into))
}

/// File name component of `path` as a string
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// The four characters before the last occurrence of `suffix`
///
/// `icd10cm_order_2025.txt` with suffix `.txt` gives `2025`.
pub fn year_before_suffix(name: &str, suffix: &str) -> Option<String> {
    let end = name.rfind(suffix)?;
    let start = end.checked_sub(4)?;
    name.get(start..end).map(String::from)
}

/// The first four characters of `name`
///
/// `2025-code-descriptions-tabular-order.zip` gives `2025`.
pub fn year_prefix(name: &str) -> Option<String> {
    name.get(..4).map(String::from)
}

/// Stem shared by an output archive and its single member
pub fn output_stem(kind: OutputKind, base: &str, year: &str) -> String {
    sanitize_filename(&format!("{} version - {}{}", kind.label(), base, year))
}
