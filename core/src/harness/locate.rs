use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Builds the `PATH` a harness process runs with and finds its executable.
///
/// Search directories come first, in the order given, followed by the
/// inherited `PATH`. The driver's own environment is left untouched.
#[derive(Debug, Clone)]
pub struct HarnessLocator {
    search_dirs: Vec<PathBuf>,
    inherited: Option<OsString>,
}

impl Default for HarnessLocator {
    /// No extra search directories; the inherited `PATH` only.
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl HarnessLocator {
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self {
            search_dirs,
            inherited: env::var_os("PATH"),
        }
    }

    /// Directories of a parharness checkout relative to its `scripts/` directory:
    /// the repository's `bin/` three levels up, the harness root, then the scripts
    /// themselves.
    pub fn from_scripts_dir(scripts_dir: &Path) -> Self {
        Self::new(vec![
            scripts_dir.join("../../../bin"),
            scripts_dir.join(".."),
            scripts_dir.to_path_buf(),
        ])
    }

    pub fn with_inherited_path(mut self, inherited: Option<OsString>) -> Self {
        self.inherited = inherited;
        self
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// Value for the child's `PATH`.
    pub fn search_path(&self) -> Result<OsString> {
        let mut dirs = self.search_dirs.clone();
        if let Some(inherited) = &self.inherited {
            dirs.extend(env::split_paths(inherited));
        }
        env::join_paths(dirs).context("harness search directory contains a path separator")
    }

    /// Absolute location of `command` when one of the search directories holds it,
    /// otherwise the bare name so the spawn reports the miss.
    pub fn resolve(&self, command: &str) -> PathBuf {
        let path = Path::new(command);
        if path.components().count() > 1 {
            return path.to_path_buf();
        }
        for dir in &self.search_dirs {
            let candidate = dir.join(command);
            if candidate.is_file() {
                return candidate;
            }
        }
        path.to_path_buf()
    }
}
