//! `lamb.toml` discovery.

use anyhow::Context;
use std::path::{Path, PathBuf};

use lamb_syntax::config::MANIFEST_FILE;
use lamb_syntax::AnalyzerConfig;

/// Walk up from `start` to find `lamb.toml`.
pub fn find_manifest(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join(MANIFEST_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

/// Load the analyzer config from `explicit`, or from the nearest manifest
/// above the current directory. No manifest means defaults.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<AnalyzerConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let cwd = std::env::current_dir()?;
            match find_manifest(&cwd) {
                Some(path) => path,
                None => return Ok(AnalyzerConfig::default()),
            }
        }
    };

    tracing::debug!(path = %path.display(), "loading analyzer config");
    AnalyzerConfig::from_file(&path).with_context(|| format!("cannot load {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_manifest_in_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "").unwrap();

        assert_eq!(
            find_manifest(&nested),
            Some(dir.path().join(MANIFEST_FILE))
        );
    }

    #[test]
    fn test_explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[analyzer]\nmax-errors = 5\n").unwrap();
        assert_eq!(load_config(Some(&path)).unwrap().max_errors, 5);
    }

    #[test]
    fn test_invalid_manifest_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE);
        std::fs::write(&path, "[analyzer]\nmax-depth = 0\n").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains(MANIFEST_FILE));
    }
}
