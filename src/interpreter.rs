use std::process::Command;

use anyhow::anyhow;
use serde::Serialize;
use which::which;

/// A usable Python interpreter, located on the PATH.
#[derive(Debug, Clone, Serialize)]
pub struct Interpreter {
    pub program: String,
}

impl Interpreter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

/// Locate a Python interpreter, preferring `python3` over `python`
/// (and accepting the `py` launcher on Windows).
pub fn discover() -> anyhow::Result<Interpreter> {
    for candidate in candidates() {
        if has_command(candidate) {
            return Ok(Interpreter::new(*candidate));
        }
    }

    Err(anyhow!(
        "no Python interpreter found on PATH (tried {})",
        candidates().join(", ")
    ))
}

fn candidates() -> &'static [&'static str] {
    if cfg!(windows) {
        &["python3", "python", "py"]
    } else {
        &["python3", "python"]
    }
}

fn has_command(cmd: &str) -> bool {
    which(cmd).is_ok()
        || Command::new(cmd)
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::has_command;

    #[test]
    fn missing_command_is_not_found() {
        assert!(!has_command("definitely-not-an-installed-command"));
    }

    #[cfg(unix)]
    #[test]
    fn finds_commands_on_path() {
        assert!(has_command("sh"));
    }
}
