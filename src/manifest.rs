use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;

/// Fixed relative path of the dependency manifest, as the launch script expects it.
pub const MANIFEST_FILE: &str = "requirements.txt";

/// Fixed relative path of the application entry point.
pub const ENTRY_POINT: &str = "app.py";

/// Diagnostic view of the manifest in a working directory.
///
/// The launcher never interprets specifiers; the manifest is consumed by
/// the pip subprocess. This summary exists only for `plan` and `check`
/// output, so a missing manifest is reported here rather than failed on.
#[derive(Debug, Serialize)]
pub struct ManifestSummary {
    pub path: PathBuf,
    pub present: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specifiers: Option<usize>,
}

pub fn manifest_path(cwd: &Path) -> PathBuf {
    cwd.join(MANIFEST_FILE)
}

pub fn summarize(cwd: &Path) -> anyhow::Result<ManifestSummary> {
    let path = manifest_path(cwd);
    if !path.exists() {
        return Ok(ManifestSummary {
            path,
            present: false,
            specifiers: None,
        });
    }

    let data = fs::read_to_string(&path)
        .with_context(|| format!("reading manifest at {}", path.display()))?;
    let specifiers = count_specifiers(&data);

    Ok(ManifestSummary {
        path,
        present: true,
        specifiers: Some(specifiers),
    })
}

/// One package specifier per line; blank lines and `#` comments don't count.
fn count_specifiers(data: &str) -> usize {
    data.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .count()
}

#[cfg(test)]
mod tests {
    use super::{MANIFEST_FILE, count_specifiers, summarize};

    #[test]
    fn counts_specifier_lines() {
        let data = "flask==2.0\n\n# pinned, see upstream advisory\nrequests>=2.31\n";
        assert_eq!(count_specifiers(data), 2);
    }

    #[test]
    fn summarizes_present_manifest() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        std::fs::write(dir.path().join(MANIFEST_FILE), "flask==2.0\n").unwrap();

        let summary = summarize(dir.path()).expect("summary should succeed");
        assert!(summary.present);
        assert_eq!(summary.specifiers, Some(1));
    }

    #[test]
    fn reports_missing_manifest_without_error() {
        let dir = tempfile::tempdir().expect("tempdir should be created");

        let summary = summarize(dir.path()).expect("summary should succeed");
        assert!(!summary.present);
        assert_eq!(summary.specifiers, None);
    }
}
