use std::path::PathBuf;

use crate::experiment::ExperimentKind;
use crate::plan::SweepPlan;

/// The materialised command for one (repetition, experiment) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    pub repetition: u32,
    /// Position of the experiment in the plan.
    pub kind_index: usize,
    pub experiment: String,
    pub program: String,
    pub args: Vec<String>,
    pub output: PathBuf,
}

impl InvocationRequest {
    /// Returns `None` when the kind's family has no axis; validated plans never hit that.
    pub fn build(plan: &SweepPlan, repetition: u32, kind_index: usize, kind: &ExperimentKind) -> Option<Self> {
        let axis = plan.axis_for(kind)?;
        let params = &plan.harness;

        let mut args = Vec::with_capacity(20);
        args.push(params.action.clone());
        args.push("-i".to_string());
        args.push(params.iterations.to_string());
        args.push(format!("-depochf={}", params.epoch_freq));
        args.push(format!("-demptyf={}", params.empty_freq));
        args.push("-m".to_string());
        args.push(kind.mode.to_string());
        if params.verbose {
            args.push("-v".to_string());
        }
        if kind.count_retired {
            args.push("-c".to_string());
        }
        args.push("-r".to_string());
        args.push(kind.selector.to_string());
        args.push(format!("-d{}={}", params.run_id_key, repetition));
        args.push("--meta".to_string());
        args.push(axis.to_meta());
        args.push("--meta".to_string());
        args.push(plan.subjects.to_meta());
        args.push("-o".to_string());
        args.push(kind.output.to_string_lossy().into_owned());

        Some(Self {
            repetition,
            kind_index,
            experiment: kind.name.clone(),
            program: params.command.clone(),
            args,
            output: kind.output.clone(),
        })
    }

    /// Value following the first occurrence of `flag`.
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|arg| arg == flag)
            .and_then(|idx| self.args.get(idx + 1))
            .map(String::as_str)
    }

    pub fn meta_args(&self) -> Vec<&str> {
        self.args
            .windows(2)
            .filter(|pair| pair[0] == "--meta")
            .map(|pair| pair[1].as_str())
            .collect()
    }

    /// Single-line shell-like rendering for logs and dry runs.
    pub fn display(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            if arg.is_empty() || arg.chars().any(|c| c.is_whitespace() || c == '\'' || c == '"') {
                line.push('\'');
                line.push_str(&arg.replace('\'', "'\\''"));
                line.push('\'');
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}
