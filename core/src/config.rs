//! TOML form of a [`SweepPlan`].
//!
//! ```toml
//! name = "smoke"
//! repetitions = 2
//! subjects = ["NIL", "RCU"]
//!
//! [harness]
//! iterations = 1
//!
//! [axes]
//! general = [1, 12, 24]
//!
//! [[experiments]]
//! name = "hashmap"
//! family = "general"
//! selector = 1
//! mode = 3
//! output = "data/smoke/hashmap.csv"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::plan::SweepPlan;

impl SweepPlan {
    /// Parses and validates a plan.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let plan = Self::parse_toml_str(input)?;
        plan.validate()?;
        Ok(plan)
    }

    /// Parses without validating, for callers that adjust the plan first.
    pub fn parse_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).context("parse sweep plan")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let plan = Self::read(path)?;
        plan.validate().with_context(|| format!("load sweep plan {}", path.display()))?;
        Ok(plan)
    }

    /// Reads and parses `path` without validating.
    pub fn read(path: &Path) -> Result<Self> {
        let src = fs::read_to_string(path).with_context(|| format!("read sweep plan {}", path.display()))?;
        Self::parse_toml_str(&src).with_context(|| format!("load sweep plan {}", path.display()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).context("serialize sweep plan")
    }
}
