use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "lowercase")]
pub enum LaunchStatus {
    Success,
    Failed,
}

/// One completed launch attempt.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LaunchRecord {
    pub working_dir: PathBuf,
    pub interpreter: String,
    pub timestamp: DateTime<Utc>,
    pub status: LaunchStatus,
    pub exit_code: i32,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct State {
    #[serde(default)]
    pub launches: Vec<LaunchRecord>,
}

pub fn load_state() -> anyhow::Result<State> {
    load_from(&state_file_path()?)
}

pub fn add_launch_record(record: LaunchRecord) -> anyhow::Result<()> {
    let path = state_file_path()?;
    let mut state = load_from(&path)?;
    state.launches.push(record);
    save_to(&path, &state)
}

fn load_from(path: &Path) -> anyhow::Result<State> {
    if !path.exists() {
        return Ok(State::default());
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("reading state file at {}", path.display()))?;
    let state: State = serde_json::from_str(&data)
        .with_context(|| format!("parsing state file at {}", path.display()))?;
    Ok(state)
}

fn save_to(path: &Path, state: &State) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating state directory {}", parent.display()))?;
    }

    let tmp_path = path.with_extension("tmp");
    let data = serde_json::to_string_pretty(state)?;
    fs::write(&tmp_path, data)
        .with_context(|| format!("writing temp state file {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("committing state file to {}", path.display()))?;
    Ok(())
}

fn state_file_path() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .ok_or_else(|| anyhow!("could not determine platform data directory"))?
        .join("pyboot");
    Ok(base.join("state.json"))
}

#[cfg(test)]
mod tests {
    use super::{LaunchRecord, LaunchStatus, State, load_from, save_to};
    use chrono::Utc;

    fn record(exit_code: i32) -> LaunchRecord {
        LaunchRecord {
            working_dir: "/proj".into(),
            interpreter: "python3".to_string(),
            timestamp: Utc::now(),
            status: if exit_code == 0 {
                LaunchStatus::Success
            } else {
                LaunchStatus::Failed
            },
            exit_code,
        }
    }

    #[test]
    fn missing_state_file_loads_as_empty() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let state = load_from(&dir.path().join("state.json")).expect("load should succeed");
        assert!(state.launches.is_empty());
    }

    #[test]
    fn saved_records_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("nested").join("state.json");

        let mut state = State::default();
        state.launches.push(record(0));
        state.launches.push(record(7));
        save_to(&path, &state).expect("save should succeed");

        let loaded = load_from(&path).expect("load should succeed");
        assert_eq!(loaded.launches.len(), 2);
        assert_eq!(loaded.launches[1].exit_code, 7);
        assert!(matches!(loaded.launches[1].status, LaunchStatus::Failed));
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("state.json");
        save_to(&path, &State::default()).expect("save should succeed");
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }
}
