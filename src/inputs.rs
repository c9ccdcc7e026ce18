//! Expanding command-line arguments into the list of archives to analyze.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// File extensions treated as Java archives.
pub const ARCHIVE_EXTENSIONS: &[&str] = &[".jar", ".war", ".ear"];

pub fn is_archive_name(name: &str) -> bool {
    ARCHIVE_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Resolves positional arguments to archive paths.
///
/// - a single `.` expands to the archives directly inside the current directory
/// - a single directory expands to the archives directly inside it
/// - a single archive path is used as is
/// - several arguments are used as given, in order
///
/// Any other single argument is reported and yields nothing.
pub fn collect_archives(args: &[String]) -> Result<Vec<PathBuf>> {
    match args {
        [] => Ok(Vec::new()),
        [single] => {
            if single == "." {
                let cwd = std::env::current_dir().context("Failed to read current directory")?;
                let archives = archives_in_dir(&cwd)?;
                if archives.is_empty() {
                    warn!("Directory contains no jars: . ({})", cwd.display());
                }
                Ok(archives)
            } else if Path::new(single).is_dir() {
                let archives = archives_in_dir(Path::new(single))?;
                if archives.is_empty() {
                    warn!("Directory contains no jars: {}", single);
                }
                Ok(archives)
            } else if is_archive_name(single) {
                Ok(vec![PathBuf::from(single)])
            } else {
                warn!("Invalid single input: {}", single);
                Ok(Vec::new())
            }
        }
        many => Ok(many.iter().map(PathBuf::from).collect()),
    }
}

/// Archives directly inside `dir`, sorted by file name.
pub fn archives_in_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut archives = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        if entry.file_type().is_file() && is_archive_name(&entry.file_name().to_string_lossy()) {
            archives.push(entry.into_path());
        }
    }

    Ok(archives)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_jar() {
        let found = collect_archives(&args(&["./somejar.jar"])).unwrap();
        assert_eq!(found, vec![PathBuf::from("./somejar.jar")]);
    }

    #[test]
    fn test_multiple_jars_kept_in_order() {
        let found = collect_archives(&args(&["b.jar", "a.jar", "c.jar"])).unwrap();
        assert_eq!(
            found,
            vec![PathBuf::from("b.jar"), PathBuf::from("a.jar"), PathBuf::from("c.jar")]
        );
    }

    #[test]
    fn test_directory_lists_archives_only() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("zeta-1.0.jar"), b"x").unwrap();
        fs::write(dir.path().join("alpha-2.0.jar"), b"x").unwrap();
        fs::write(dir.path().join("readme.txt"), b"x").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("deep-1.0.jar"), b"x").unwrap();

        let found = collect_archives(&args(&[dir.path().to_str().unwrap()])).unwrap();
        assert_eq!(
            found,
            vec![dir.path().join("alpha-2.0.jar"), dir.path().join("zeta-1.0.jar")]
        );
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let found = collect_archives(&args(&[dir.path().to_str().unwrap()])).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_invalid_single_input() {
        let found = collect_archives(&args(&["notes.txt"])).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_is_archive_name() {
        assert!(is_archive_name("guava-31.1.jar"));
        assert!(is_archive_name("app.war"));
        assert!(!is_archive_name("guava.jar.sha1"));
    }
}
