use crate::core::error::ConfigError;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Expands the `--input` argument into candidate paths.
///
/// A directory contributes its direct entries, hidden ones excluded, sorted by name. Entries
/// are not checked for being regular files here; the scheduler skips those that are not.
pub fn candidate_paths(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_dir() {
        let mut paths = Vec::new();
        let entries = fs::read_dir(input)
            .with_context(|| format!("failed to list directory {}", input.display()))?;
        for entry in entries {
            let entry =
                entry.with_context(|| format!("failed to list directory {}", input.display()))?;
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }
            paths.push(entry.path());
        }
        paths.sort();
        return Ok(paths);
    }
    if !input.exists() {
        return Err(ConfigError::MissingInput(input.to_path_buf()).into());
    }
    Ok(vec![input.to_path_buf()])
}

/// Drops the candidates that name one of `own`, the files this run writes to.
///
/// Paths are compared after resolving symlinks and relative components. A file that does not
/// exist yet is resolved through its parent directory.
pub fn without_own_files(paths: Vec<PathBuf>, own: &[&Path]) -> Vec<PathBuf> {
    let own: Vec<PathBuf> = own.iter().filter_map(|p| resolve(p)).collect();
    if own.is_empty() {
        return paths;
    }
    paths
        .into_iter()
        .filter(|path| {
            let keep = resolve(path).is_none_or(|r| !own.contains(&r));
            if !keep {
                debug!("skipping {}: written by this run", path.display());
            }
            keep
        })
        .collect()
}

fn resolve(path: &Path) -> Option<PathBuf> {
    if let Ok(resolved) = path.canonicalize() {
        return Some(resolved);
    }
    let name = path.file_name()?;
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    parent.canonicalize().ok().map(|dir| dir.join(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_single_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("asm.fa");
        fs::write(&path, ">c\nA\n").unwrap();
        assert_eq!(candidate_paths(&path).unwrap(), vec![path]);
    }

    #[test]
    fn test_directory_entries_sorted_without_hidden() {
        let dir = TempDir::new().unwrap();
        for name in ["b.fa", "a.fa.gz", ".hidden.fa", "c.txt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("sub")).unwrap();
        let names: Vec<String> = candidate_paths(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.fa.gz", "b.fa", "c.txt", "sub"]);
    }

    #[test]
    fn test_missing_input_is_config_error() {
        let dir = TempDir::new().unwrap();
        let err = candidate_paths(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::MissingInput(_))
        ));
    }
    #[test]
    fn test_own_files_are_dropped() {
        let dir = TempDir::new().unwrap();
        for name in ["a.fa", "out.csv", "run.log"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        let paths = candidate_paths(dir.path()).unwrap();
        let output = dir.path().join("sub/../out.csv");
        fs::create_dir(dir.path().join("sub")).unwrap();
        let logfile = dir.path().join("run.log");
        let kept = without_own_files(paths, &[output.as_path(), logfile.as_path()]);
        assert_eq!(kept, vec![dir.path().join("a.fa")]);
    }

    #[test]
    fn test_output_not_yet_created_keeps_everything() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.fa"), "").unwrap();
        let paths = candidate_paths(dir.path()).unwrap();
        let output = dir.path().join("out.csv");
        assert_eq!(without_own_files(paths.clone(), &[output.as_path()]), paths);
    }
}
