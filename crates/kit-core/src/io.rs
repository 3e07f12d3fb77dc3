use crate::error::Result;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Replace `path` with `data` through a tempfile in the same directory, so
/// readers never observe a half-written document. Missing parents are created;
/// a bare file name is written relative to the current directory.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Create `path` and its parents. Returns true if the directory was new.
pub fn ensure_dir(path: &Path) -> Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    std::fs::create_dir_all(path)?;
    tracing::debug!(path = %path.display(), "created directory");
    Ok(true)
}

/// Scaffold `path` with `contents` unless something already lives there.
/// User edits are never overwritten. Returns true if the file was written.
pub fn write_if_missing(path: &Path, contents: impl AsRef<[u8]>) -> Result<bool> {
    if path.exists() {
        tracing::debug!(path = %path.display(), "keeping existing file");
        return Ok(false);
    }
    atomic_write(path, contents.as_ref())?;
    Ok(true)
}
