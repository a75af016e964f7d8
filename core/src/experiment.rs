use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One benchmark line of a sweep: a data structure, an operation mix and the
/// file its rows are appended to.
///
/// Kinds are built once when a plan is assembled and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentKind {
    /// Workload identifier, e.g. `hashmap` or `crturn-queue`.
    pub name: String,
    /// Key into the plan's axis table.
    pub family: String,
    /// Data-structure selector understood by the harness (`-r`).
    pub selector: u32,
    /// Operation-mix code (`-m`), e.g. 2 for read-heavy, 3 for write-heavy.
    pub mode: u32,
    /// Track retired-but-unreclaimed objects (`-c`).
    #[serde(default)]
    pub count_retired: bool,
    pub output: PathBuf,
}

impl ExperimentKind {
    pub fn new(name: impl Into<String>, family: impl Into<String>, selector: u32, mode: u32) -> Self {
        let name = name.into();
        let output = PathBuf::from(format!("{name}_result.csv"));
        Self {
            name,
            family: family.into(),
            selector,
            mode,
            count_retired: false,
            output,
        }
    }

    pub fn count_retired(mut self, enabled: bool) -> Self {
        self.count_retired = enabled;
        self
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }
}
