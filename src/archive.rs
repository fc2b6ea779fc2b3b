//! Zip archive reading and writing
//!
//! Building an archive is CPU bound; the async variant runs it on the
//! blocking pool so the runtime's workers stay free.

use std::io::{Cursor, Read, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::errors::{IcdError, Result};

/// Read the first file whose name ends with `suffix`, ignoring case
///
/// Returns `Ok(None)` when no member matches.
pub fn extract_member(data: &[u8], suffix: &str) -> Result<Option<Vec<u8>>> {
    let suffix = suffix.to_lowercase();
    let mut archive = ZipArchive::new(Cursor::new(data))?;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if !entry.is_file() || !entry.name().to_lowercase().ends_with(&suffix) {
            continue;
        }
        tracing::debug!(member = entry.name(), "Found archive member");
        let mut out = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
        entry.read_to_end(&mut out)?;
        return Ok(Some(out));
    }
    Ok(None)
}

/// Build a zip holding the given `(name, contents)` entries, each deflated
pub fn build_archive<N: AsRef<str>, D: AsRef<[u8]>>(entries: &[(N, D)]) -> Result<Vec<u8>> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        writer.start_file(name.as_ref(), options)?;
        writer.write_all(data.as_ref())?;
    }
    Ok(writer.finish()?.into_inner())
}

/// Async version of [`build_archive`] for a single entry
pub async fn build_archive_async(name: String, data: String) -> Result<Vec<u8>> {
    tokio::task::spawn_blocking(move || build_archive(&[(name, data)]))
        .await
        .map_err(|e| IcdError::Task(format!("Compression task panicked: {}", e)))?
}
