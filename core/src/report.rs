use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::harness::InvocationStatus;

/// Result of one launched invocation.
#[derive(Debug, Clone, Serialize)]
pub struct InvocationOutcome {
    pub repetition: u32,
    pub experiment: String,
    pub output: PathBuf,
    #[serde(flatten)]
    pub status: InvocationStatus,
    pub elapsed_secs: f64,
}

/// Per-invocation record of a finished sweep. Failed invocations are listed
/// here rather than aborting the sweep.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub plan: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub outcomes: Vec<InvocationOutcome>,
}

impl SweepReport {
    pub fn new(plan: impl Into<String>) -> Self {
        Self {
            plan: plan.into(),
            started_at: Utc::now(),
            finished_at: None,
            outcomes: Vec::new(),
        }
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn failures(&self) -> impl Iterator<Item = &InvocationOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.status.is_success())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }
}

/// Pretty JSON array of `reports`, as written by `--summary`.
pub fn reports_to_json(reports: &[SweepReport]) -> Result<String> {
    serde_json::to_string_pretty(reports).context("serialize sweep reports")
}
