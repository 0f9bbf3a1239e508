// Filesystem locations for the preference store.
// Resolves the preferences file, the default download target and strip file names.

use std::env;
use std::path::{Path, PathBuf};

use directories::{ProjectDirs, UserDirs};

use crate::date::DateKey;

/// Environment variable overriding the preferences file location.
pub const PREFS_ENV: &str = "DILBERT_PREFS";

const PREFS_FILE: &str = "preferences.json";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "dilbert-prefs")
}

/// Get the base config directory (~/.config/dilbert-prefs on Linux).
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the base data directory.
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Path to the preferences file, honouring `DILBERT_PREFS`.
pub fn preferences_path() -> Option<PathBuf> {
    match env::var_os(PREFS_ENV) {
        Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => config_dir().map(|dir| dir.join(PREFS_FILE)),
    }
}

/// The user's download directory, used as default target and staging area.
pub fn default_download_dir() -> PathBuf {
    UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
        .or_else(|| data_dir().map(|dir| dir.join("downloads")))
        .unwrap_or_else(|| PathBuf::from("downloads"))
}

/// File name of a downloaded strip.
pub fn strip_file_name(date: DateKey) -> String {
    format!("{}.gif", date)
}

/// Full path of a strip image inside `dir`.
pub fn strip_path(dir: &Path, date: DateKey) -> PathBuf {
    dir.join(strip_file_name(date))
}

/// `file://` URI recorded for a pending move.
pub fn file_uri(path: &Path) -> String {
    format!("file://{}", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_paths() {
        let date = DateKey::parse("2011-11-11").unwrap();
        assert_eq!(strip_file_name(date), "2011-11-11.gif");

        let path = strip_path(Path::new("/sdcard/Comics"), date);
        assert!(path.ends_with("Comics/2011-11-11.gif"));
        assert_eq!(file_uri(&path), "file:///sdcard/Comics/2011-11-11.gif");
    }

    #[test]
    fn test_preferences_path_default() {
        // Only checks the fallback shape, the env override is process-global.
        if env::var_os(PREFS_ENV).is_none() {
            if let Some(path) = preferences_path() {
                assert!(path.ends_with(PREFS_FILE));
            }
        }
    }
}
