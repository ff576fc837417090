use std::path::{Path, PathBuf};

use crate::global_constants;

pub fn extract_filename_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `<output_dir>/Extracted_<stem>.<extension>`
pub fn build_output_path(output_dir: &Path, filename_stem: &str, extension: &str) -> PathBuf {
    output_dir.join(format!(
        "{}{}.{}",
        global_constants::OUTPUT_FILE_PREFIX,
        filename_stem,
        extension
    ))
}

/// Writes through a sibling temp file and renames it over the target, so the
/// target is either the old content or the complete new content.
pub async fn write_file_atomically(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_path = path.with_file_name(format!(".{}.{}.tmp", file_name, uuid::Uuid::new_v4()));

    tokio::fs::write(&temp_path, contents).await?;

    if let Err(error) = tokio::fs::rename(&temp_path, path).await {
        log::error!("[OUTPUT] Failed to move output into {:?}: {}", path, error);
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(error);
    }

    log::debug!("[OUTPUT] Wrote {} bytes to {:?}", contents.len(), path);
    Ok(())
}
