//! Runtime abstraction for system operations.
//!
//! This module provides a trait-based abstraction over the handful of system
//! operations the notifier needs, enabling dependency injection and testability.
//!
//! # Structure
//!
//! - `env` - Process information (executable location)
//! - `fs` - File system operations (read, write, directory)

mod env;
mod fs;

use anyhow::Result;
use std::path::{Path, PathBuf};

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // File System
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;

    // Process
    /// Directory containing the running executable, if it can be determined.
    fn exe_dir(&self) -> Option<PathBuf>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.write_impl(path, contents)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.read_to_string_impl(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.create_dir_all_impl(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn exe_dir(&self) -> Option<PathBuf> {
        self.exe_dir_impl()
    }
}
