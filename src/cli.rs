use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::executor::{ExecutionResult, execute_plan};
use crate::interpreter::{self, Interpreter};
use crate::launch_env::ChildEnv;
use crate::manifest::{self, ManifestSummary};
use crate::plan::build_plan;
use crate::state::{self, LaunchRecord, LaunchStatus};

#[derive(Debug, Parser)]
#[command(
    name = "pyboot",
    version,
    about = "Dependency-installing launcher for Python applications"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Install dependencies and launch the application (the default)
    Run,
    /// Print the launch plan as JSON without executing it
    Plan {
        /// Emit compact JSON instead of pretty output
        #[arg(long)]
        raw: bool,
    },
    /// Report interpreter discovery and manifest presence as JSON
    Check {
        /// Emit compact JSON instead of pretty output
        #[arg(long)]
        raw: bool,
    },
    /// Print recorded launches as JSON
    History {
        /// Emit compact JSON instead of pretty output
        #[arg(long)]
        raw: bool,
    },
}

#[derive(Debug, Serialize)]
struct CheckReport {
    working_dir: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    interpreter: Option<Interpreter>,
    manifest: ManifestSummary,
}

/// Run the command line interface and return the process exit code.
pub fn run() -> i32 {
    match dispatch() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            1
        }
    }
}

fn dispatch() -> anyhow::Result<i32> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir().context("resolving working directory")?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_launch(&cwd),
        Commands::Plan { raw } => {
            let interpreter = interpreter::discover()?;
            let env = ChildEnv::for_working_dir(&cwd);
            let plan = build_plan(&cwd, &interpreter, &env)?;
            print_json(&plan, raw)?;
            Ok(0)
        }
        Commands::Check { raw } => {
            let report = CheckReport {
                interpreter: interpreter::discover().ok(),
                manifest: manifest::summarize(&cwd)?,
                working_dir: cwd,
            };
            print_json(&report, raw)?;
            Ok(0)
        }
        Commands::History { raw } => {
            let state = state::load_state()?;
            print_json(&state.launches, raw)?;
            Ok(0)
        }
    }
}

fn run_launch(cwd: &Path) -> anyhow::Result<i32> {
    let interpreter = interpreter::discover()?;
    let env = ChildEnv::for_working_dir(cwd);
    let plan = build_plan(cwd, &interpreter, &env)?;

    println!(
        "Launching {} with {} from {} ({} steps)",
        manifest::ENTRY_POINT,
        interpreter.program,
        cwd.display(),
        plan.steps.len()
    );

    let result = execute_plan(&plan, &env)?;
    record_launch(cwd, &interpreter, &result);
    Ok(result.exit_code)
}

fn record_launch(cwd: &Path, interpreter: &Interpreter, result: &ExecutionResult) {
    let record = LaunchRecord {
        working_dir: cwd.to_path_buf(),
        interpreter: interpreter.program.clone(),
        timestamp: Utc::now(),
        status: if result.success() {
            LaunchStatus::Success
        } else {
            LaunchStatus::Failed
        },
        exit_code: result.exit_code,
    };

    // History is best-effort; a write failure never changes the exit status.
    if let Err(err) = state::add_launch_record(record) {
        eprintln!("warning: could not record launch: {err:#}");
    }
}

fn print_json<T: Serialize>(value: &T, raw: bool) -> anyhow::Result<()> {
    if raw {
        println!("{}", serde_json::to_string(value)?);
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}
