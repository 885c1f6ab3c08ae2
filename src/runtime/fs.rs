//! File system operations (read, write, directory).

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self, contents))]
    pub(crate) fn write_impl(&self, path: &Path, contents: &[u8]) -> Result<()> {
        fs::write(path, contents)
            .with_context(|| format!("Failed to write to file {:?}", path))?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn read_to_string_impl(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn create_dir_all_impl(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn exists_impl(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{RealRuntime, Runtime};
    use tempfile::tempdir;

    #[test]
    fn test_real_runtime_file_ops() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(".token");

        runtime.write(&file_path, b"abc123").unwrap();
        assert!(runtime.exists(&file_path));
        assert_eq!(runtime.read_to_string(&file_path).unwrap(), "abc123");

        // Writing again replaces the previous contents
        runtime.write(&file_path, b"xyz").unwrap();
        assert_eq!(runtime.read_to_string(&file_path).unwrap(), "xyz");
    }

    #[test]
    fn test_real_runtime_create_dir_all() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let nested = dir.path().join("cache/nested");

        runtime.create_dir_all(&nested).unwrap();
        assert!(runtime.exists(&nested));

        // Already existing directories are fine
        runtime.create_dir_all(&nested).unwrap();
    }

    #[test]
    fn test_real_runtime_errors() {
        let runtime = RealRuntime;

        let result = runtime.read_to_string(std::path::Path::new("/nonexistent/path/.token"));
        assert!(result.is_err());
        assert!(!runtime.exists(std::path::Path::new("/nonexistent/path/.token")));
    }
}
