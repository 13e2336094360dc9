use std::collections::HashMap;
use std::path::Path;

/// Name of the module search path variable extended for spawned processes.
pub const SEARCH_PATH_VAR: &str = "PYTHONPATH";

/// Environment mapping passed explicitly to every spawned subprocess.
///
/// Built once as "inherited + one override": a snapshot of the parent
/// environment with the search path variable rewritten to include the
/// working directory. The launcher's own environment is never mutated.
#[derive(Debug, Clone)]
pub struct ChildEnv {
    vars: HashMap<String, String>,
}

impl ChildEnv {
    pub fn for_working_dir(cwd: &Path) -> Self {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_inherited(vars, cwd)
    }

    fn from_inherited(mut vars: HashMap<String, String>, cwd: &Path) -> Self {
        let existing = vars.get(SEARCH_PATH_VAR).cloned().unwrap_or_default();
        vars.insert(
            SEARCH_PATH_VAR.to_string(),
            extend_search_path(&existing, cwd),
        );
        Self { vars }
    }

    /// The value the spawned processes will see for the search path variable.
    pub fn search_path(&self) -> &str {
        self.vars
            .get(SEARCH_PATH_VAR)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn vars(&self) -> impl Iterator<Item = (&String, &String)> {
        self.vars.iter()
    }
}

/// Append the working directory to an existing search path value.
///
/// An absent or empty value yields the working directory alone rather than
/// a leading empty entry.
fn extend_search_path(existing: &str, cwd: &Path) -> String {
    let separator = if cfg!(windows) { ';' } else { ':' };
    let cwd = cwd.to_string_lossy();
    if existing.is_empty() {
        cwd.to_string()
    } else {
        format!("{existing}{separator}{cwd}")
    }
}
