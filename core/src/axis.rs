//! Colon-delimited sweep arguments handed to the harness's `--meta` flag.
//!
//! The harness scans every value of a meta list internally, so a whole
//! thread-count × tracker cross product costs one process launch.

use std::fmt;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

const THREADS_MARKER: &str = "t";
const SUBJECTS_MARKER: &str = "d";
const TRACKER_KEY: &str = "tracker";

/// Ordered thread counts scanned inside a single invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SweepAxis(Vec<u32>);

impl SweepAxis {
    pub fn new(levels: impl Into<Vec<u32>>) -> Result<Self> {
        let axis = Self(levels.into());
        axis.validate()?;
        Ok(axis)
    }

    /// `first` followed by `first + step`, `first + 2*step`, ... up to `last`
    /// inclusive. A `first` of 1 is kept as its own level, so `stepped(1, 12, 48)`
    /// yields 1, 12, 24, 36, 48. Levels stop before they would exceed `u32::MAX`.
    pub fn stepped(first: u32, step: u32, last: u32) -> Result<Self> {
        if step == 0 {
            bail!("sweep axis step must be positive");
        }
        if first > last {
            bail!("sweep axis starts at {} past its last level {}", first, last);
        }
        let mut levels = vec![first];
        let mut next = if first < step { Some(step) } else { first.checked_add(step) };
        while let Some(level) = next
            && level <= last
        {
            levels.push(level);
            next = level.checked_add(step);
        }
        Self::new(levels)
    }

    pub fn levels(&self) -> &[u32] {
        &self.0
    }

    pub fn validate(&self) -> Result<()> {
        if self.0.is_empty() {
            bail!("sweep axis has no thread counts");
        }
        if self.0.contains(&0) {
            bail!("sweep axis contains a zero thread count: {:?}", self.0);
        }
        Ok(())
    }

    /// Renders as `t:1:12:24`.
    pub fn to_meta(&self) -> String {
        let mut out = String::from(THREADS_MARKER);
        for level in &self.0 {
            out.push(':');
            out.push_str(&level.to_string());
        }
        out
    }
}

impl fmt::Display for SweepAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_meta())
    }
}

/// Ordered reclamation strategies ("trackers") compared inside a single invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectList(Vec<String>);

impl SubjectList {
    pub fn new<I, S>(subjects: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = Self(subjects.into_iter().map(Into::into).collect());
        list.validate()?;
        Ok(list)
    }

    pub fn subjects(&self) -> &[String] {
        &self.0
    }

    pub fn validate(&self) -> Result<()> {
        if self.0.is_empty() {
            bail!("subject list is empty");
        }
        for subject in &self.0 {
            if subject.is_empty() {
                bail!("subject list contains an empty tracker name");
            }
            if subject.contains(':') || subject.chars().any(char::is_whitespace) {
                bail!("tracker name '{}' may not contain ':' or whitespace", subject);
            }
        }
        Ok(())
    }

    /// Renders as `d:tracker=NIL:tracker=RCU`.
    pub fn to_meta(&self) -> String {
        let mut out = String::from(SUBJECTS_MARKER);
        for subject in &self.0 {
            out.push(':');
            out.push_str(TRACKER_KEY);
            out.push('=');
            out.push_str(subject);
        }
        out
    }
}

impl fmt::Display for SubjectList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_meta())
    }
}
