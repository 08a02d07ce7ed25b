//! Application environment
//!
//! Interaction interface detection and a few process/location helpers. The
//! interface itself lives on the `Session`, where its setter is guarded by the
//! `global.interface` action group.

use crate::error::SetupError;
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Preferred way of interacting with the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractInterface {
    /// No interaction at all
    None,
    /// Text console
    Console,
    /// Graphical or otherwise non-console front end
    Ui,
}

/// Detect the interaction interface of the current process
pub fn detect_interaction_interface() -> InteractInterface {
    if std::io::stdout().is_terminal() || std::io::stdin().is_terminal() {
        InteractInterface::Console
    } else {
        InteractInterface::Ui
    }
}

/// Full path of the running executable
pub fn executable_path() -> Option<PathBuf> {
    std::env::current_exe().ok()
}

/// Application name: file stem of the running executable
pub fn application_name() -> Option<String> {
    executable_path()
        .and_then(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .filter(|name| !name.trim().is_empty())
}

/// Directory of the running executable, falling back to the working directory
pub fn base_directory() -> Option<PathBuf> {
    executable_path()
        .and_then(|path| path.parent().map(|p| p.to_path_buf()))
        .filter(|dir| !dir.as_os_str().is_empty())
        .or_else(|| std::env::current_dir().ok())
}

/// Per-application data directory under the platform's local data directory.
///
/// An empty `app_name` falls back to `application_name()`. Names are lower-cased
/// everywhere except Windows.
pub fn app_data_directory(app_name: &str) -> Result<PathBuf, SetupError> {
    let name = if app_name.trim().is_empty() {
        application_name().ok_or_else(|| {
            SetupError::ConfigError("Application name cannot be empty".to_string())
        })?
    } else {
        app_name.to_string()
    };

    let name = if cfg!(windows) {
        name
    } else {
        name.to_lowercase()
    };

    let base = match directories::BaseDirs::new() {
        Some(dirs) => dirs.data_local_dir().to_path_buf(),
        None => {
            let home = std::env::var("HOME")
                .map(PathBuf::from)
                .or_else(|_| std::env::current_dir())?;
            home.join(".config")
        }
    };

    Ok(base.join(name))
}
