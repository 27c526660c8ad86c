//! Locates the bundled mushaf PDF and font.

use directories::BaseDirs;
use std::path::{Path, PathBuf};
use storage::APP_DIR_NAME;

pub const MUSHAF_FILE_NAME: &str = "MushafMadinaHafsGreen1441HQ.pdf";
pub const FONT_FILE_NAME: &str = "assets/Amiri-Regular.ttf";

/// Ordered list of directories searched for resources.
#[derive(Debug, Clone, Default)]
pub struct ResourceLocator {
    search_dirs: Vec<PathBuf>,
}

impl ResourceLocator {
    /// Executable directory, current directory, the user data directory,
    /// then the system-wide install locations.
    pub fn from_environment() -> Self {
        let mut search_dirs = Vec::new();

        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|path| path.parent().map(Path::to_path_buf))
        {
            search_dirs.push(exe_dir);
        }
        if let Ok(cwd) = std::env::current_dir() {
            search_dirs.push(cwd);
        }
        if let Some(base) = BaseDirs::new() {
            search_dirs.push(base.data_dir().join(APP_DIR_NAME));
        }
        search_dirs.push(Path::new("/usr/share").join(APP_DIR_NAME));
        search_dirs.push(Path::new("/opt").join(APP_DIR_NAME));

        Self { search_dirs }
    }

    pub fn with_dirs(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// Returns the first existing candidate for `name`. An explicit
    /// `override_path` is checked first and, when given but missing, is
    /// still returned so the caller reports the path the user asked for.
    pub fn locate(&self, name: &str, override_path: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = override_path {
            return Some(path.to_path_buf());
        }

        let found = self.candidates(name).find(|candidate| candidate.is_file());
        match &found {
            Some(path) => tracing::debug!(path = %path.display(), name, "resource located"),
            None => tracing::debug!(name, "resource not found"),
        }
        found
    }

    pub fn candidates<'a>(&'a self, name: &'a str) -> impl Iterator<Item = PathBuf> + 'a {
        self.search_dirs.iter().map(move |dir| dir.join(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn first_existing_directory_wins() {
        let first = tempfile::tempdir().expect("temp dir");
        let second = tempfile::tempdir().expect("temp dir");
        fs::write(second.path().join(MUSHAF_FILE_NAME), b"%PDF").expect("write");

        let locator = ResourceLocator::with_dirs(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ]);
        assert_eq!(
            locator.locate(MUSHAF_FILE_NAME, None),
            Some(second.path().join(MUSHAF_FILE_NAME))
        );

        fs::write(first.path().join(MUSHAF_FILE_NAME), b"%PDF").expect("write");
        assert_eq!(
            locator.locate(MUSHAF_FILE_NAME, None),
            Some(first.path().join(MUSHAF_FILE_NAME))
        );
    }

    #[test]
    fn nested_names_are_joined_onto_each_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::create_dir_all(dir.path().join("assets")).expect("mkdir");
        fs::write(dir.path().join(FONT_FILE_NAME), b"font").expect("write");

        let locator = ResourceLocator::with_dirs(vec![dir.path().to_path_buf()]);
        assert_eq!(locator.locate(FONT_FILE_NAME, None), Some(dir.path().join(FONT_FILE_NAME)));
    }

    #[test]
    fn override_is_returned_even_when_missing() {
        let locator = ResourceLocator::with_dirs(Vec::new());
        let path = Path::new("/nowhere/mushaf.pdf");

        assert_eq!(locator.locate(MUSHAF_FILE_NAME, Some(path)), Some(path.to_path_buf()));
    }

    #[test]
    fn directories_are_ignored_as_matches() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::create_dir_all(dir.path().join(MUSHAF_FILE_NAME)).expect("mkdir");

        let locator = ResourceLocator::with_dirs(vec![dir.path().to_path_buf()]);
        assert_eq!(locator.locate(MUSHAF_FILE_NAME, None), None);
    }

    #[test]
    fn environment_search_ends_with_system_locations() {
        let locator = ResourceLocator::from_environment();
        let dirs = locator.search_dirs();

        assert_eq!(dirs.last(), Some(&PathBuf::from("/opt/quran-unix")));
        assert!(dirs.contains(&PathBuf::from("/usr/share/quran-unix")));
    }
}
