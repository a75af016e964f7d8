pub mod axis;
pub mod config;
pub mod driver;
pub mod experiment;
pub mod harness;
pub mod invocation;
pub mod matrices;
pub mod plan;
pub mod report;

#[cfg(test)]
mod plan_test;

pub use axis::{SubjectList, SweepAxis};
pub use driver::{SweepDriver, plan_requests};
pub use experiment::ExperimentKind;
pub use harness::{DryRunHarness, Harness, HarnessLocator, InvocationStatus, ProcessHarness};
pub use invocation::InvocationRequest;
pub use matrices::Matrix;
pub use plan::{HarnessParams, SweepPlan};
pub use report::{InvocationOutcome, SweepReport};
