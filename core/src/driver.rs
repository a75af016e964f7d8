use std::fs;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::harness::Harness;
use crate::invocation::InvocationRequest;
use crate::plan::SweepPlan;
use crate::report::{InvocationOutcome, SweepReport};

/// Every request of `plan` in launch order: repetition-major, experiment-minor.
///
/// Validates first, so an `Ok` sequence always has
/// `repetitions * experiments.len()` entries.
pub fn plan_requests(plan: &SweepPlan) -> Result<Vec<InvocationRequest>> {
    plan.validate()?;
    let mut requests = Vec::with_capacity(plan.invocation_count());
    for repetition in 0..plan.repetitions {
        for (kind_index, kind) in plan.experiments.iter().enumerate() {
            let request = InvocationRequest::build(plan, repetition, kind_index, kind)
                .ok_or_else(|| anyhow!("no sweep axis for family '{}'", kind.family))?;
            requests.push(request);
        }
    }
    Ok(requests)
}

/// Sequential, best-effort executor of sweep plans.
///
/// One invocation runs at a time; a failing invocation is recorded and the
/// next one starts regardless. Only a harness that cannot be launched at all
/// stops the sweep.
pub struct SweepDriver<H: Harness> {
    harness: H,
    create_output_dirs: bool,
}

impl<H: Harness> SweepDriver<H> {
    pub fn new(harness: H) -> Self {
        Self {
            harness,
            create_output_dirs: true,
        }
    }

    /// Skip creating missing output directories before the sweep.
    pub fn without_output_dirs(mut self) -> Self {
        self.create_output_dirs = false;
        self
    }

    pub fn run(&mut self, plan: &SweepPlan) -> Result<SweepReport> {
        let requests = plan_requests(plan)?;
        if self.create_output_dirs {
            prepare_output_dirs(plan)?;
        }

        info!(
            plan = %plan.name,
            repetitions = plan.repetitions,
            experiments = plan.experiments.len(),
            invocations = requests.len(),
            "starting sweep"
        );

        let mut report = SweepReport::new(plan.name.clone());
        let total = requests.len();
        for (idx, request) in requests.iter().enumerate() {
            info!(
                "[{}/{}] repetition {} {} -> {}",
                idx + 1,
                total,
                request.repetition,
                request.experiment,
                request.output.display()
            );
            debug!(command = %request.display(), "launching harness");

            let started = Instant::now();
            let status = self.harness.invoke(request).with_context(|| {
                format!(
                    "sweep '{}' aborted at repetition {} experiment '{}'",
                    plan.name, request.repetition, request.experiment
                )
            })?;
            let elapsed = started.elapsed();

            if !status.is_success() {
                warn!(
                    "repetition {} {} failed ({}); continuing",
                    request.repetition, request.experiment, status
                );
            }
            report.outcomes.push(InvocationOutcome {
                repetition: request.repetition,
                experiment: request.experiment.clone(),
                output: request.output.clone(),
                status,
                elapsed_secs: elapsed.as_secs_f64(),
            });
        }

        report.finished_at = Some(Utc::now());
        info!(
            plan = %plan.name,
            invocations = report.total(),
            failed = report.failure_count(),
            "sweep finished"
        );
        Ok(report)
    }
}

fn prepare_output_dirs(plan: &SweepPlan) -> Result<()> {
    for kind in &plan.experiments {
        if let Some(parent) = kind.output.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("create output directory {}", parent.display()))?;
        }
    }
    Ok(())
}
