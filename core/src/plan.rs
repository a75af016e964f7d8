use std::collections::{BTreeMap, HashSet};
use std::path::{Component, Path, PathBuf};

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::axis::{SubjectList, SweepAxis};
use crate::experiment::ExperimentKind;

/// Scalars that stay fixed for every invocation of a sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessParams {
    /// Executable looked up on the harness search path.
    pub command: String,
    /// Sub-action token placed before any flag.
    pub action: String,
    /// Seconds per measurement (`-i`).
    pub iterations: u32,
    /// Epoch advance frequency (`-depochf=`).
    pub epoch_freq: u32,
    /// Retired-list scan threshold (`-demptyf=`).
    pub empty_freq: u32,
    pub verbose: bool,
    /// Parameter name carrying the repetition index (`-d<key>=<n>`).
    pub run_id_key: String,
}

impl Default for HarnessParams {
    fn default() -> Self {
        Self {
            command: "metacmd.py".to_string(),
            action: "main".to_string(),
            iterations: 10,
            epoch_freq: 110,
            empty_freq: 120,
            verbose: true,
            run_id_key: "trial".to_string(),
        }
    }
}

/// Everything a sweep needs, assembled once and never mutated while running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepPlan {
    #[serde(default = "default_plan_name")]
    pub name: String,
    pub repetitions: u32,
    pub subjects: SubjectList,
    #[serde(default)]
    pub harness: HarnessParams,
    /// Thread-count axis per workload family.
    pub axes: BTreeMap<String, SweepAxis>,
    pub experiments: Vec<ExperimentKind>,
}

fn default_plan_name() -> String {
    "custom".to_string()
}

impl SweepPlan {
    pub fn new(
        name: impl Into<String>,
        repetitions: u32,
        experiments: Vec<ExperimentKind>,
        axes: BTreeMap<String, SweepAxis>,
        subjects: SubjectList,
    ) -> Self {
        Self {
            name: name.into(),
            repetitions,
            subjects,
            harness: HarnessParams::default(),
            axes,
            experiments,
        }
    }

    pub fn with_repetitions(mut self, repetitions: u32) -> Self {
        self.repetitions = repetitions;
        self
    }

    /// Axis for `kind`'s family. Only `None` for plans that fail [`SweepPlan::validate`].
    pub fn axis_for(&self, kind: &ExperimentKind) -> Option<&SweepAxis> {
        self.axes.get(&kind.family)
    }

    /// Total number of harness launches the plan implies.
    pub fn invocation_count(&self) -> usize {
        self.repetitions as usize * self.experiments.len()
    }

    /// Rejects anything that would make the sweep launch a malformed or
    /// colliding invocation. Runs before the first process is started.
    pub fn validate(&self) -> Result<()> {
        if self.repetitions == 0 {
            bail!("plan '{}': repetition count must be at least 1", self.name);
        }
        if self.experiments.is_empty() {
            bail!("plan '{}': no experiments defined", self.name);
        }
        if self.harness.command.trim().is_empty() {
            bail!("plan '{}': harness command is empty", self.name);
        }
        if self.harness.run_id_key.is_empty() || self.harness.run_id_key.contains('=') {
            bail!(
                "plan '{}': invalid run id key '{}'",
                self.name,
                self.harness.run_id_key
            );
        }
        self.subjects.validate()?;

        for (family, axis) in &self.axes {
            if let Err(err) = axis.validate() {
                bail!("plan '{}': axis '{}': {}", self.name, family, err);
            }
        }

        let mut outputs: HashSet<PathBuf> = HashSet::new();
        for kind in &self.experiments {
            if !self.axes.contains_key(&kind.family) {
                bail!(
                    "plan '{}': experiment '{}' references unknown sweep axis family '{}'",
                    self.name,
                    kind.name,
                    kind.family
                );
            }
            if kind.output.as_os_str().is_empty() {
                bail!("plan '{}': experiment '{}' has no output path", self.name, kind.name);
            }
            if !outputs.insert(normalize_output(&kind.output)) {
                bail!(
                    "plan '{}': output '{}' is shared by more than one experiment",
                    self.name,
                    kind.output.display()
                );
            }
        }
        Ok(())
    }
}

/// Lexical form of an output path: `.` dropped and `..` folded into its parent,
/// so two spellings of one file compare equal.
pub(crate) fn normalize_output(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !matches!(out.components().next_back(), Some(Component::RootDir | Component::Prefix(_))) {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
