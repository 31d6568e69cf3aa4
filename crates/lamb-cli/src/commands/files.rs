//! Source file collection.

use std::path::{Path, PathBuf};

/// Extension of analyzable source files.
pub const SOURCE_EXTENSION: &str = "lam";

fn is_source_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(SOURCE_EXTENSION)
}

/// Collect all .lam files from the given paths (files or directories).
///
/// Files named explicitly are kept whatever their extension.
pub fn collect_lam_files(paths: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path_str in paths {
        let path = Path::new(path_str);
        if path.is_file() {
            files.push(path.to_path_buf());
        } else if path.is_dir() {
            collect_lam_in_dir(path, &mut files)?;
        } else {
            anyhow::bail!("no such file or directory: {}", path_str);
        }
    }

    Ok(files)
}

/// Recursively collect .lam files in a directory, in name order.
fn collect_lam_in_dir(dir: &Path, files: &mut Vec<PathBuf>) -> anyhow::Result<()> {
    let mut entries = std::fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            // Skip hidden dirs and build output
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if name_str.starts_with('.') || name_str == "target" {
                continue;
            }
            collect_lam_in_dir(&path, files)?;
        } else if is_source_file(&path) {
            files.push(path);
        }
    }
    Ok(())
}
