//! Launching the external benchmark harness.
//!
//! The driver only sees the [`Harness`] trait; production sweeps go through
//! [`ProcessHarness`], dry runs through [`DryRunHarness`].

mod dry_run;
mod locate;
mod process;


use std::fmt;

use anyhow::Result;
use serde::Serialize;

use crate::invocation::InvocationRequest;

pub use dry_run::DryRunHarness;
pub use locate::HarnessLocator;
pub use process::ProcessHarness;

/// How a launched invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InvocationStatus {
    Succeeded,
    /// Non-zero exit, or `code: None` when the process was killed by a signal.
    Failed { code: Option<i32> },
}

impl InvocationStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, InvocationStatus::Succeeded)
    }
}

impl fmt::Display for InvocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvocationStatus::Succeeded => write!(f, "ok"),
            InvocationStatus::Failed { code: Some(code) } => write!(f, "exit code {}", code),
            InvocationStatus::Failed { code: None } => write!(f, "terminated by signal"),
        }
    }
}

pub trait Harness {
    /// Runs one request to completion.
    ///
    /// `Err` means nothing could be launched at all and aborts the sweep; a
    /// harness that ran and failed reports [`InvocationStatus::Failed`].
    fn invoke(&mut self, request: &InvocationRequest) -> Result<InvocationStatus>;
}

impl<H: Harness + ?Sized> Harness for &mut H {
    fn invoke(&mut self, request: &InvocationRequest) -> Result<InvocationStatus> {
        (**self).invoke(request)
    }
}

impl<H: Harness + ?Sized> Harness for Box<H> {
    fn invoke(&mut self, request: &InvocationRequest) -> Result<InvocationStatus> {
        (**self).invoke(request)
    }
}
