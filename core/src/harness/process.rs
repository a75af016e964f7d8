use std::io::ErrorKind;
use std::process::Command;

use anyhow::{Context, Result, anyhow};

use super::{Harness, HarnessLocator, InvocationStatus};
use crate::invocation::InvocationRequest;

/// Runs each request as a child process and blocks until it exits.
///
/// Stdio and the working directory are inherited, so relative `-o` paths
/// resolve where the driver prepared their directories.
#[derive(Debug, Clone)]
pub struct ProcessHarness {
    locator: HarnessLocator,
}

impl ProcessHarness {
    pub fn new(locator: HarnessLocator) -> Self {
        Self { locator }
    }
}

impl Default for ProcessHarness {
    fn default() -> Self {
        Self::new(HarnessLocator::default())
    }
}

impl Harness for ProcessHarness {
    fn invoke(&mut self, request: &InvocationRequest) -> Result<InvocationStatus> {
        let program = self.locator.resolve(&request.program);
        let search_path = self.locator.search_path()?;

        let status = Command::new(&program)
            .args(&request.args)
            .env("PATH", &search_path)
            .status();

        match status {
            Ok(status) if status.success() => Ok(InvocationStatus::Succeeded),
            Ok(status) => Ok(InvocationStatus::Failed { code: status.code() }),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(anyhow!(
                "harness executable '{}' not found (PATH={})",
                program.display(),
                search_path.to_string_lossy()
            )),
            Err(err) => Err(err).with_context(|| format!("failed to launch harness '{}'", program.display())),
        }
    }
}
