//! Filesystem utilities.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Write generated output, leaving the file untouched when the contents
/// are already identical.
///
/// Returns whether the file was written. An unchanged header keeps its
/// timestamp, so translation units including it are not rebuilt.
pub fn write_if_changed(path: &Path, contents: &str) -> Result<bool> {
    if let Ok(existing) = fs::read_to_string(path) {
        if existing == contents {
            return Ok(false);
        }
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    fs::write(path, contents)
        .with_context(|| format!("failed to write file: {}", path.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_if_changed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("include").join("lbal_config.h");

        assert!(write_if_changed(&path, "#define A 1\n").unwrap());
        assert!(!write_if_changed(&path, "#define A 1\n").unwrap());
        assert!(write_if_changed(&path, "#define A 0\n").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "#define A 0\n");
    }
}
