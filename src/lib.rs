pub mod cli;
pub mod executor;
pub mod interpreter;
pub mod launch_env;
pub mod manifest;
pub mod plan;
pub mod state;

/// Run the command line interface and return an exit code.
pub fn run_cli() -> i32 {
    cli::run()
}
