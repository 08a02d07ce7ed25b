//! Integration tests for Configuration System

use super::test_utils::{with_isolated_env, DummyContext3};
use ctxgate::{
    ConfigLoader, Context, ContextError, InteractInterface, Session, SessionConfig, SetupError,
};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_without_files_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = with_isolated_env(&temp_dir, &[], || ConfigLoader::load(temp_dir.path()).unwrap());

    assert_eq!(config, SessionConfig::default());
    assert!(config.validate().is_ok());
}

#[test]
fn test_workspace_file_overrides_global_file() {
    let temp_dir = TempDir::new().unwrap();
    let workspace = temp_dir.path().join("workspace");
    fs::create_dir_all(workspace.join("config")).unwrap();

    let config = with_isolated_env(&temp_dir, &[], || {
        let global_path = ConfigLoader::global_config_path().unwrap();
        fs::create_dir_all(global_path.parent().unwrap()).unwrap();
        fs::write(
            &global_path,
            "[application]\ninterface = \"console\"\nname = \"Global\"\n\n\
             [logging]\nlevel = \"warn\"\n",
        )
        .unwrap();
        fs::write(
            workspace.join("config").join("config.toml"),
            "[application]\nname = \"Workspace\"\n",
        )
        .unwrap();

        ConfigLoader::load(&workspace).unwrap()
    });

    assert_eq!(config.application.interface, Some(InteractInterface::Console));
    assert_eq!(config.application.name.as_deref(), Some("Workspace"));
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn test_environment_file_selected_by_ctxgate_env() {
    let temp_dir = TempDir::new().unwrap();
    let config_dir = temp_dir.path().join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "[logging]\nlevel = \"info\"\n").unwrap();
    fs::write(config_dir.join("ci.toml"), "[logging]\nlevel = \"debug\"\n").unwrap();

    let config = with_isolated_env(&temp_dir, &[("CTXGATE_ENV", "ci")], || {
        ConfigLoader::load(temp_dir.path()).unwrap()
    });

    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_environment_variables_override_files() {
    let temp_dir = TempDir::new().unwrap();
    let config_dir = temp_dir.path().join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[groups]\nexclusive_ownership = true\n",
    )
    .unwrap();

    let config = with_isolated_env(
        &temp_dir,
        &[
            ("CTXGATE__GROUPS__EXCLUSIVE_OWNERSHIP", "false"),
            ("CTXGATE__LOGGING__FORMAT", "json"),
        ],
        || ConfigLoader::load(temp_dir.path()).unwrap(),
    );

    assert!(!config.groups.exclusive_ownership);
    assert_eq!(config.logging.format, "json");
}

#[test]
fn test_invalid_file_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("broken.toml");
    fs::write(&config_file, "[groups]\nstrict_names = \"sometimes\"\n").unwrap();

    assert!(ConfigLoader::load_from_file(&config_file).is_err());
}

#[test]
fn test_unknown_log_level_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("loud.toml");
    fs::write(&config_file, "[logging]\nlevel = \"loud\"\n").unwrap();

    let err = ConfigLoader::load_from_file(&config_file).unwrap_err();
    assert!(matches!(err, SetupError::ConfigError(_)));
    let message = err.to_string();
    assert!(message.contains("Configuration validation failed"));
    assert!(message.contains("Logging: invalid level 'loud'"));
}

#[test]
fn test_workspace_load_validates_merged_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_dir = temp_dir.path().join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[application]\nname = \" \"\n\n[logging]\noutput = \"printer\"\n",
    )
    .unwrap();

    let err = with_isolated_env(&temp_dir, &[], || {
        ConfigLoader::load(temp_dir.path()).unwrap_err()
    });
    let message = err.to_string();
    assert!(message.ends_with(
        "Application: name cannot be empty\nLogging: invalid output 'printer'"
    ));
}

#[test]
fn test_strict_names_from_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("strict.toml");
    fs::write(&config_file, "[groups]\nstrict_names = true\n").unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    let session = Session::with_config(config);

    // Canonical names pass
    let context = Context::new(&session, DummyContext3).unwrap();
    drop(context);

    let err = Context::new(&session, LooseNames).unwrap_err();
    assert!(matches!(
        err,
        ContextError::InvalidGroupName { ref group, .. } if group == "Application.Test"
    ));
    assert!(session.contexts().is_empty());
}

struct LooseNames;

impl ctxgate::ContextBehavior for LooseNames {
    fn groups(&self) -> Vec<String> {
        vec!["Application.Test".to_string()]
    }

    fn create_context(&mut self, _ctx: &mut ctxgate::ContextCore) -> Result<(), ContextError> {
        Ok(())
    }

    fn dispose_context(&mut self, _ctx: &mut ctxgate::ContextCore) -> Result<(), ContextError> {
        Ok(())
    }
}

#[test]
fn test_write_default_then_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config").join("config.toml");
    ConfigLoader::write_default(&path).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("exclusive_ownership = true"));

    let config = with_isolated_env(&temp_dir, &[], || ConfigLoader::load(temp_dir.path()).unwrap());
    assert_eq!(config, SessionConfig::default());
}
