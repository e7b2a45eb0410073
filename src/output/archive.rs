use crate::error::Result;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::info;
use zip::write::{ExtendedFileOptions, FileOptions};
use zip::CompressionMethod;

/// Restricts a caller-supplied label to filename-safe characters. The label
/// comes straight from the command line, so everything outside the allowlist
/// becomes an underscore.
pub fn sanitize_label(label: &str) -> String {
    let safe: String = label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if safe.is_empty() {
        "output".to_string()
    } else {
        safe
    }
}

/// Packages `src` into a single-entry deflate ZIP at `zip_path`, using the
/// source file's base name as the entry name.
pub fn archive_file(src: &Path, zip_path: &Path) -> Result<()> {
    let bytes = fs::read(src)?;
    let entry_name = src
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output.csv".to_string());

    let file = File::create(zip_path)?;
    let mut zip = zip::ZipWriter::new(file);
    let options =
        FileOptions::<ExtendedFileOptions>::default().compression_method(CompressionMethod::Deflated);
    zip.start_file(entry_name, options)?;
    zip.write_all(&bytes)?;
    zip.finish()?;

    info!(path = %zip_path.display(), "archive written");
    Ok(())
}
