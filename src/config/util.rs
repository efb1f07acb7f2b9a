//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find a config file by searching upward from `start`.
///
/// ```text
/// /home/user/notes/content/daily/  <- start
/// /home/user/notes/notegraph.toml  <- found
/// ```
pub fn find_config_file(config_name: &Path, start: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    start
        .ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_in_ancestor() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("content/daily");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("notegraph.toml"), "").unwrap();

        let found = find_config_file(Path::new("notegraph.toml"), &nested).unwrap();
        assert_eq!(found, dir.path().join("notegraph.toml"));
    }

    #[test]
    fn test_absolute_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        assert_eq!(find_config_file(&path, dir.path()), None);

        fs::write(&path, "").unwrap();
        assert_eq!(find_config_file(&path, Path::new("/")), Some(path));
    }

    #[test]
    fn test_not_found() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            find_config_file(Path::new("definitely-missing-notegraph.toml"), dir.path()),
            None
        );
    }
}
