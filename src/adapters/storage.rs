use crate::domain::ports::Storage;
use crate::utils::error::{Result, SteamEtlError};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Writes files under a base directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
        let full_path = self.base_path.join(path);
        let shown = full_path.display().to_string();
        let dir = match full_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        fs::create_dir_all(&dir).map_err(|e| SteamEtlError::write(&shown, e))?;

        // The temp file is deleted on drop, so an early return leaves nothing at `full_path`.
        let mut staged = NamedTempFile::new_in(&dir).map_err(|e| SteamEtlError::write(&shown, e))?;
        fill(&mut staged, data).map_err(|e| SteamEtlError::write(&shown, e))?;
        staged
            .persist(&full_path)
            .map_err(|e| SteamEtlError::write(&shown, e.error))?;

        tracing::debug!(path = %shown, bytes = data.len(), "file persisted");
        Ok(shown)
    }
}

/// Mode of persisted files; temp files start out owner-only.
#[cfg(unix)]
const OUTPUT_MODE: u32 = 0o644;

fn fill(staged: &mut NamedTempFile, data: &[u8]) -> std::io::Result<()> {
    staged.write_all(data)?;
    staged.flush()?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        staged
            .as_file()
            .set_permissions(fs::Permissions::from_mode(OUTPUT_MODE))?;
    }
    staged.as_file().sync_all()
}
