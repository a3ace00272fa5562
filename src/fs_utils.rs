use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// Write `contents` to `path`, creating missing parent directories first.
///
/// `purpose` names the artifact in error messages.
pub async fn write_creating_dirs(path: &Path, contents: &[u8], purpose: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.with_context(|| {
            format!(
                "Failed to create directory ({purpose}): {}",
                parent.display()
            )
        })?;
    }

    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("Failed to write file ({purpose}): {}", path.display()))?;

    debug!(path = %path.display(), bytes = contents.len(), purpose = %purpose, "Wrote file");
    Ok(())
}
