use std::path::{Path, PathBuf};

use anyhow::Context;
use th_config::PROJECT_DIR;

/// Walk upwards from `start` until a `.tailhouse` directory is found.
#[must_use]
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(PROJECT_DIR).is_dir() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Resolve the project root from `--project` or by searching from the current directory.
///
/// An explicit path may point at the root itself or at its `.tailhouse` directory.
pub fn resolve_project_root(project_override: Option<&str>) -> anyhow::Result<PathBuf> {
    if let Some(path) = project_override {
        let explicit = PathBuf::from(path);

        if explicit
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name == PROJECT_DIR)
        {
            return explicit
                .parent()
                .map(Path::to_path_buf)
                .context("invalid --project path: '.tailhouse' directory has no parent");
        }

        if explicit.join(PROJECT_DIR).is_dir() {
            return Ok(explicit);
        }

        anyhow::bail!(
            "invalid --project '{}': no .tailhouse directory. Run 'th init {}' first.",
            explicit.display(),
            explicit.display()
        );
    }

    let start = std::env::current_dir().context("failed to read current directory")?;
    find_project_root(&start)
        .context("not a tailhouse project (no .tailhouse directory found). Run 'th init' first.")
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::{find_project_root, resolve_project_root};

    #[test]
    fn finds_project_root_in_current_directory() {
        let temp = TempDir::new().expect("tempdir should create");
        std::fs::create_dir(temp.path().join(".tailhouse")).expect(".tailhouse should create");

        let found = find_project_root(temp.path());
        assert_eq!(found.as_deref(), Some(temp.path()));
    }

    #[test]
    fn finds_project_root_in_parent_directory() {
        let temp = TempDir::new().expect("tempdir should create");
        std::fs::create_dir(temp.path().join(".tailhouse")).expect(".tailhouse should create");
        std::fs::create_dir_all(temp.path().join("racks/a/b")).expect("nested dirs should create");

        let found = find_project_root(&temp.path().join("racks/a/b"));
        assert_eq!(found.as_deref(), Some(temp.path()));
    }

    #[test]
    fn returns_none_when_not_found() {
        let temp = TempDir::new().expect("tempdir should create");
        std::fs::create_dir_all(temp.path().join("a/b")).expect("nested dirs should create");

        assert!(find_project_root(&temp.path().join("a/b")).is_none());
    }

    #[test]
    fn explicit_project_accepts_root_or_marker_dir() {
        let temp = TempDir::new().expect("tempdir should create");
        let marker = temp.path().join(".tailhouse");
        std::fs::create_dir(&marker).expect(".tailhouse should create");

        let root = temp.path().to_str().expect("utf-8 path");
        assert_eq!(resolve_project_root(Some(root)).expect("root resolves"), temp.path());

        let marker = marker.to_str().expect("utf-8 path");
        assert_eq!(resolve_project_root(Some(marker)).expect("marker resolves"), temp.path());
    }

    #[test]
    fn explicit_project_without_marker_is_rejected() {
        let temp = TempDir::new().expect("tempdir should create");
        let root = temp.path().to_str().expect("utf-8 path");

        let error = resolve_project_root(Some(root)).expect_err("should fail");
        assert!(error.to_string().contains("th init"));
    }
}
