use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::interpreter::Interpreter;
use crate::launch_env::ChildEnv;
use crate::manifest::{self, ENTRY_POINT, MANIFEST_FILE, ManifestSummary};

/// The full launch sequence for one working directory: install, then run.
#[derive(Debug, Serialize)]
pub struct LaunchPlan {
    pub working_dir: PathBuf,
    pub interpreter: Interpreter,
    pub pythonpath: String,
    pub manifest: ManifestSummary,
    pub steps: Vec<PlannedStep>,
}

#[derive(Debug, Serialize)]
pub struct PlannedStep {
    pub description: String,
    pub program: String,
    pub args: Vec<String>,
}

impl PlannedStep {
    fn new(description: impl Into<String>, program: &str, args: &[&str]) -> Self {
        Self {
            description: description.into(),
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Build the two-step plan. Both steps run the discovered interpreter so
/// the install targets the same Python that later runs the application.
pub fn build_plan(
    cwd: &Path,
    interpreter: &Interpreter,
    env: &ChildEnv,
) -> anyhow::Result<LaunchPlan> {
    let manifest = manifest::summarize(cwd)?;

    let steps = vec![
        PlannedStep::new(
            format!("Install dependencies from {MANIFEST_FILE}"),
            &interpreter.program,
            &["-m", "pip", "install", "-r", MANIFEST_FILE],
        ),
        PlannedStep::new(
            format!("Launch {ENTRY_POINT}"),
            &interpreter.program,
            &[ENTRY_POINT],
        ),
    ];

    Ok(LaunchPlan {
        working_dir: cwd.to_path_buf(),
        interpreter: interpreter.clone(),
        pythonpath: env.search_path().to_string(),
        manifest,
        steps,
    })
}
