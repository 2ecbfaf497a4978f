//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "rxgrid";
const APPLICATION: &str = "rxgrid";

/// Get project directories, or None if home directory cannot be determined.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the data directory for persistent application data.
///
/// - Linux: `$XDG_DATA_HOME/rxgrid` or `~/.local/share/rxgrid`
/// - macOS: `~/Library/Application Support/com.rxgrid.rxgrid`
/// - Windows: `C:\Users\<User>\AppData\Roaming\rxgrid\rxgrid\data`
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Get the path to the preferences database.
pub fn preferences_db() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("preferences.db"))
}
