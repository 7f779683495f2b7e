//! Platform-specific paths for user presets.
//!
//! - Linux: `~/.config/sub808/presets/`
//! - macOS: `~/Library/Application Support/sub808/presets/`
//! - Windows: `%APPDATA%\sub808\presets\`
//!
//! # Example
//!
//! ```rust,no_run
//! use sub808_config::paths;
//!
//! for path in paths::list_user_presets() {
//!     println!("{}", path.display());
//! }
//! ```

use std::path::{Path, PathBuf};

/// Application name used for directory paths.
const APP_NAME: &str = "sub808";

/// Subdirectory name for presets.
const PRESETS_SUBDIR: &str = "presets";

/// Returns the user-specific presets directory.
///
/// Falls back to `./sub808/presets` if the config directory cannot be
/// determined.
pub fn user_presets_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join(PRESETS_SUBDIR)
}

/// Ensure the user presets directory exists.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_user_presets_dir() -> Result<PathBuf, crate::ConfigError> {
    let dir = user_presets_dir();

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| crate::ConfigError::create_dir(&dir, e))?;
    }

    Ok(dir)
}

/// Find a user preset file by path or by name.
///
/// `name` may be a path to an existing file, or a preset name with or
/// without the `.toml` extension looked up in [`user_presets_dir`].
pub fn find_preset(name: &str) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let filename = if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{name}.toml")
    };
    let user_path = user_presets_dir().join(filename);
    user_path.is_file().then_some(user_path)
}

/// List preset files in the user presets directory, sorted by file name.
///
/// Returns an empty vector if the directory doesn't exist or can't be read.
pub fn list_user_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&user_presets_dir())
}

/// List `*.toml` files in `dir`, sorted by file name.
pub fn list_presets_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut presets: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    presets.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    presets
}

/// Get the preset name from a file path.
///
/// ```rust
/// use sub808_config::paths::preset_name_from_path;
/// use std::path::Path;
///
/// let name = preset_name_from_path(Path::new("/path/to/big_boom.toml"));
/// assert_eq!(name, Some("big_boom".to_string()));
/// ```
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(ToString::to_string)
}
