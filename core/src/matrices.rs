//! The built-in sweep matrices.
//!
//! `general` covers the hash map and linked list under write-heavy and
//! read-heavy mixes; `crturn` covers the CRTurn queue on a shorter axis.
//! Both compare the same trackers and repeat five times.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};

use crate::axis::{SubjectList, SweepAxis};
use crate::experiment::ExperimentKind;
use crate::plan::SweepPlan;

pub const DEFAULT_REPETITIONS: u32 = 5;
pub const OUTPUT_DIR: &str = "data/final";

pub const TRACKERS: &[&str] = &[
    "NIL",
    "RCU",
    "Range_new",
    "HE",
    "Hazard",
    "HR",
    "WFE",
    "WFR",
    "HyalineOEL",
    "HyalineOSEL",
];

const HASHMAP: u32 = 1;
const LIST: u32 = 2;
const CRTURN_QUEUE: u32 = 11;

const WRITE_HEAVY: u32 = 3;
const READ_HEAVY: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matrix {
    General,
    Crturn,
}

impl Matrix {
    pub const ALL: [Matrix; 2] = [Matrix::General, Matrix::Crturn];

    pub fn name(self) -> &'static str {
        match self {
            Matrix::General => "general",
            Matrix::Crturn => "crturn",
        }
    }

    pub fn plan(self) -> Result<SweepPlan> {
        match self {
            Matrix::General => general(),
            Matrix::Crturn => crturn(),
        }
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Matrix {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "general" => Ok(Matrix::General),
            "crturn" | "queue" => Ok(Matrix::Crturn),
            other => bail!("unknown matrix '{}' (expected general or crturn)", other),
        }
    }
}

pub fn trackers() -> Result<SubjectList> {
    SubjectList::new(TRACKERS.iter().copied())
}

fn output(stem: &str) -> String {
    format!("{OUTPUT_DIR}/{stem}.csv")
}

/// Hash map and list, each under write-heavy and read-heavy mixes, with and
/// without retired-object tracking. Threads 1, 12, 24, ..., 192.
pub fn general() -> Result<SweepPlan> {
    let mut axes = BTreeMap::new();
    axes.insert("general".to_string(), SweepAxis::stepped(1, 12, 192)?);

    let mut experiments = Vec::new();
    for (mode, suffix) in [(WRITE_HEAVY, ""), (READ_HEAVY, "_read")] {
        for retired in [false, true] {
            let tag = if retired { "_retired" } else { "" };
            for (name, selector) in [("hashmap", HASHMAP), ("list", LIST)] {
                experiments.push(
                    ExperimentKind::new(name, "general", selector, mode)
                        .count_retired(retired)
                        .output(output(&format!("{name}_result{tag}{suffix}"))),
                );
            }
        }
    }

    Ok(SweepPlan::new("general", DEFAULT_REPETITIONS, experiments, axes, trackers()?))
}

/// CRTurn queue, write-heavy, with and without retired-object tracking.
/// Threads 1, 16, 32, ..., 96.
pub fn crturn() -> Result<SweepPlan> {
    let mut axes = BTreeMap::new();
    axes.insert("queue".to_string(), SweepAxis::stepped(1, 16, 96)?);

    let experiments = vec![
        ExperimentKind::new("crturn-queue", "queue", CRTURN_QUEUE, WRITE_HEAVY).output(output("crturn_result")),
        ExperimentKind::new("crturn-queue", "queue", CRTURN_QUEUE, WRITE_HEAVY)
            .count_retired(true)
            .output(output("crturn_result_retired")),
    ];

    Ok(SweepPlan::new("crturn", DEFAULT_REPETITIONS, experiments, axes, trackers()?))
}
