mod cli;
mod executor;
mod interpreter;
mod launch_env;
mod manifest;
mod plan;
mod state;

fn main() {
    let code = cli::run();
    if code != 0 {
        std::process::exit(code);
    }
}
