//! Config loader facade: layered loading of `SessionConfig`.

use crate::config::merge;
use crate::config::sources::{global_file, workspace_file};
use crate::config::SessionConfig;
use crate::error::SetupError;
use config::{Environment, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads `SessionConfig` from defaults, files and environment
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): defaults, global file, workspace files,
    /// `CTXGATE__*` environment variables. The merged result is validated.
    pub fn load(workspace_root: &Path) -> Result<SessionConfig, SetupError> {
        let builder = merge::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = builder.add_source(
            Environment::with_prefix("CTXGATE")
                .prefix_separator("__")
                .separator("__"),
        );

        let config: SessionConfig = builder.build()?.try_deserialize()?;
        validated(&config)?;
        debug!(workspace = %workspace_root.display(), "Loaded session configuration");
        Ok(config)
    }

    /// Load configuration from a single file on top of the defaults
    pub fn load_from_file(path: &Path) -> Result<SessionConfig, SetupError> {
        let config: SessionConfig = merge::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()))
            .build()?
            .try_deserialize()?;
        validated(&config)?;
        Ok(config)
    }

    /// Path of the global configuration file, if it can be determined
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    /// Write a default configuration file, creating parent directories
    pub fn write_default(path: &Path) -> Result<(), SetupError> {
        let contents = toml::to_string_pretty(&SessionConfig::default())
            .map_err(|e| SetupError::ConfigError(format!("Failed to serialize config: {}", e)))?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, contents)?;
        Ok(())
    }
}

fn validated(config: &SessionConfig) -> Result<(), SetupError> {
    config.validate().map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        SetupError::ConfigError(format!(
            "Configuration validation failed:\n{}",
            error_msgs.join("\n")
        ))
    })
}
