//! Disk spooling for multipart file fields.

use std::path::Path;

use crate::event::now_ms;

/// Write `bytes` under `dir` as `{epoch_ms}-{original_name}` and return the
/// stored filename. The epoch prefix keeps repeat uploads of the same file
/// from colliding.
///
/// # Errors
///
/// Returns the I/O error if the write fails.
pub async fn store_upload(dir: &Path, original: &str, bytes: &[u8]) -> Result<String, std::io::Error> {
    let filename = format!("{}-{}", now_ms(), sanitize_filename(original));
    tokio::fs::write(dir.join(&filename), bytes).await?;
    Ok(filename)
}

/// Strip path separators from the client-supplied name so the stored file
/// stays inside the spool directory.
#[must_use]
pub fn sanitize_filename(original: &str) -> String {
    original
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect()
}

#[cfg(test)]
#[path = "upload_test.rs"]
mod tests;
