//! Configuration paths for strata
//!
//! Config lives under:
//! - Unix/macOS: `~/.config/strata/`
//! - Windows: `%APPDATA%\strata\`

use std::{
    env,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "strata";
const CONFIG_FILE: &str = "config.yaml";

/// Base config directory for strata
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/strata`
///   - Else: `~/.config/strata`
///
/// Windows:
///   - `%APPDATA%\strata`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/strata/config.yaml`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| config_file_in(&dir))
}

/// The config file inside an arbitrary base directory
pub fn config_file_in(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE)
}
