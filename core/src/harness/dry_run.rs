use std::io::Write;

use anyhow::{Context, Result};

use super::{Harness, InvocationStatus};
use crate::invocation::InvocationRequest;

/// Prints each command line instead of running it.
#[derive(Debug)]
pub struct DryRunHarness<W: Write> {
    out: W,
}

impl<W: Write> DryRunHarness<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Harness for DryRunHarness<W> {
    fn invoke(&mut self, request: &InvocationRequest) -> Result<InvocationStatus> {
        writeln!(self.out, "{}", request.display()).context("write dry-run command")?;
        Ok(InvocationStatus::Succeeded)
    }
}
