use std::path::Path;
use std::process::{Command, ExitStatus};

use anyhow::Context;
use serde::Serialize;

use crate::launch_env::ChildEnv;
use crate::plan::{LaunchPlan, PlannedStep};

#[derive(Debug, Serialize)]
pub struct ExecutionResult {
    pub completed_steps: usize,
    pub total_steps: usize,
    /// Exit code of the last subprocess run; the launcher adopts this.
    pub exit_code: i32,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("step {index} could not be spawned: {message}")]
    SpawnFailed { index: usize, message: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Run the plan's steps in order, each blocking until its subprocess exits.
///
/// The first non-zero exit halts the sequence and becomes the result's
/// exit code; later steps never start. There are no retries or timeouts.
pub fn execute_plan(plan: &LaunchPlan, env: &ChildEnv) -> Result<ExecutionResult, ExecutionError> {
    for (idx, step) in plan.steps.iter().enumerate() {
        println!(
            "==> [{}/{}] {}",
            idx + 1,
            plan.steps.len(),
            step.description
        );

        let status = spawn_step(step, env, &plan.working_dir).map_err(|err| {
            ExecutionError::SpawnFailed {
                index: idx,
                message: err.to_string(),
            }
        })?;

        if !status.success() {
            return Ok(ExecutionResult {
                completed_steps: idx,
                total_steps: plan.steps.len(),
                exit_code: status.code().unwrap_or(1),
            });
        }
    }

    Ok(ExecutionResult {
        completed_steps: plan.steps.len(),
        total_steps: plan.steps.len(),
        exit_code: 0,
    })
}

/// Spawn one step with the explicit child environment and working directory,
/// stdio inherited, and wait for it. Both the installer and the application
/// go through this same call.
fn spawn_step(step: &PlannedStep, env: &ChildEnv, cwd: &Path) -> anyhow::Result<ExitStatus> {
    Command::new(&step.program)
        .args(&step.args)
        .current_dir(cwd)
        .env_clear()
        .envs(env.vars())
        .status()
        .with_context(|| format!("running {} {}", step.program, step.args.join(" ")))
}
