//! Output directory resolution and file paths.

use std::path::{Path, PathBuf};

use subrender_core::{Result, SubrenderError};

use crate::context::FileNaming;

/// Extension appended to every output file name.
pub const IMAGE_EXTENSION: &str = "png";

/// Prefix marking a path relative to the project directory.
pub const PROJECT_RELATIVE_PREFIX: &str = "//";

/// Turns a host-style output path into an absolute directory path.
///
/// - `//sub/dir` is relative to `project_dir` (the working directory if unset)
/// - `~` / `~/dir` is relative to the user's home directory
/// - other relative paths are relative to the working directory
/// - an empty path means the project directory itself
///
/// Nothing is touched on disk.
pub fn resolve_output_dir(raw: &str, project_dir: Option<&Path>) -> Result<PathBuf> {
    let base = || -> Result<PathBuf> {
        match project_dir {
            Some(dir) => absolute(dir),
            None => current_dir(raw),
        }
    };

    if raw.is_empty() {
        return base();
    }
    if let Some(rest) = raw.strip_prefix(PROJECT_RELATIVE_PREFIX) {
        return Ok(base()?.join(rest));
    }
    if (raw == "~" || raw.starts_with("~/"))
        && let Some(home) = home_dir()
    {
        return Ok(home.join(raw.trim_start_matches('~').trim_start_matches('/')));
    }
    absolute(Path::new(raw))
}

/// Creates `dir` and any missing parents. Succeeds if it already exists.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|source| SubrenderError::OutputDirectory {
        path: dir.to_path_buf(),
        source,
    })
}

/// `folder` joined with the file name for `camera`.
#[must_use]
pub fn output_file_path(folder: &Path, naming: &FileNaming, camera: &str) -> PathBuf {
    folder.join(naming.file_name(camera))
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(current_dir(&path.to_string_lossy())?.join(path))
}

fn current_dir(requested: &str) -> Result<PathBuf> {
    std::env::current_dir().map_err(|source| SubrenderError::OutputDirectory {
        path: PathBuf::from(requested),
        source,
    })
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_relative_path() {
        let project = Path::new("/projects/shot01");
        let dir = resolve_output_dir("//renders/final/", Some(project)).unwrap();
        assert_eq!(dir, Path::new("/projects/shot01/renders/final/"));
    }

    #[test]
    fn test_home_relative_path() {
        let project = Some(Path::new("/projects/shot01"));
        let home = resolve_output_dir("~", project).unwrap();
        let renders = resolve_output_dir("~/renders", project).unwrap();

        match home_dir() {
            Some(expected) => {
                assert_eq!(home, expected);
                assert_eq!(renders, expected.join("renders"));
            }
            // Without a home directory the path is read as a plain relative one.
            None => assert!(renders.ends_with("~/renders")),
        }
        assert!(!renders.starts_with("/projects"));

        // `~name` is not a home reference.
        let named = resolve_output_dir("~alice/out", project).unwrap();
        assert!(named.ends_with("~alice/out"));
    }

    #[test]
    fn test_absolute_path_is_kept() {
        let dir = resolve_output_dir("/tmp/out", Some(Path::new("/projects"))).unwrap();
        assert_eq!(dir, Path::new("/tmp/out"));
    }

    #[test]
    fn test_empty_path_is_project_dir() {
        let project = Path::new("/projects/shot01");
        assert_eq!(resolve_output_dir("", Some(project)).unwrap(), project);
    }

    #[test]
    fn test_relative_path_uses_working_dir() {
        let dir = resolve_output_dir("out", None).unwrap();
        assert!(dir.is_absolute());
        assert!(dir.ends_with("out"));
    }

    #[test]
    fn test_output_file_path() {
        let naming = FileNaming::new("shot_", "_final");
        let path = output_file_path(Path::new("/tmp/out"), &naming, "CamA");
        assert_eq!(path, Path::new("/tmp/out/shot_CamA_final.png"));
    }
}
