//! Integration tests for application state and the built-in contexts
//!
//! Tests cover:
//! - Interface and status overrides guarding their global groups
//! - Environment helpers
//! - Session snapshots serialized to JSON

use super::test_utils::{session, with_isolated_env, DummyContext};
use ctxgate::application::{app_data_directory, application_name, base_directory, executable_path};
use ctxgate::contexts::{InterfaceOverride, StatusOverride};
use ctxgate::status::EmptyStatusProvider;
use ctxgate::{
    ActionGroupErrorKind, Context, ContextError, InteractInterface, StatusIdentifier,
    StatusProvider,
};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

#[derive(Default)]
struct LineProvider {
    lines: Mutex<Vec<String>>,
}

impl StatusProvider for LineProvider {
    fn write(&self, message: &str) -> StatusIdentifier {
        self.lines.lock().unwrap().push(message.to_string());
        StatusIdentifier::new()
    }

    fn clear(&self) {
        self.lines.lock().unwrap().clear();
    }
}

#[test]
fn test_interface_override_restores_previous() {
    let session = session();
    {
        let _console =
            Context::new(&session, InterfaceOverride::new(InteractInterface::Console)).unwrap();
        assert_eq!(session.interface(), InteractInterface::Console);
        assert_eq!(
            session.set_interface(InteractInterface::None).unwrap_err().kind(),
            ActionGroupErrorKind::Locked
        );
    }

    assert_eq!(session.interface(), InteractInterface::Ui);
}

#[test]
fn test_interface_override_conflicts_with_owner() {
    let session = session();
    let _dummy = Context::new(&session, DummyContext::default()).unwrap();

    let err =
        Context::new(&session, InterfaceOverride::new(InteractInterface::Console)).unwrap_err();
    assert_eq!(err.action_group_kind(), Some(ActionGroupErrorKind::Locked));
    assert_eq!(session.interface(), InteractInterface::None);
}

#[test]
fn test_private_interface_override_is_unguarded() {
    let session = session();
    {
        let _console =
            Context::private(&session, InterfaceOverride::new(InteractInterface::Console)).unwrap();
        assert_eq!(session.interface(), InteractInterface::Console);
        session.query_group(["global.interface"]).unwrap();
    }

    assert_eq!(session.interface(), InteractInterface::Ui);
}

#[test]
fn test_status_override_routes_messages() {
    let session = session();
    let provider = Arc::new(LineProvider::default());
    {
        let _status = Context::new(&session, StatusOverride::new(provider.clone())).unwrap();
        let id = session.write_status("syncing");
        assert!(id.is_valid());
        assert_eq!(provider.lines.lock().unwrap().as_slice(), ["syncing".to_string()]);

        let err = session.reset_status_provider().unwrap_err();
        assert_eq!(err.kind(), ActionGroupErrorKind::Locked);

        let err =
            Context::new(&session, StatusOverride::new(Arc::new(EmptyStatusProvider))).unwrap_err();
        assert!(matches!(
            err,
            ContextError::AlreadyExists { ref name } if name == "StatusOverride"
        ));
    }

    // The replaced provider is cleared when the previous one comes back
    assert!(provider.lines.lock().unwrap().is_empty());
    assert!(!session.write_status("dropped").is_valid());
}

#[test]
fn test_environment_helpers() {
    assert!(executable_path().is_some());
    assert!(application_name().is_some());
    assert!(base_directory().is_some());
}

#[test]
fn test_app_data_directory_uses_lowercase_name() {
    let temp_dir = TempDir::new().unwrap();
    let path = with_isolated_env(&temp_dir, &[], || app_data_directory("MyTool").unwrap());

    let last = path.file_name().unwrap().to_string_lossy().into_owned();
    if cfg!(windows) {
        assert_eq!(last, "MyTool");
    } else {
        assert_eq!(last, "mytool");
    }

    let fallback = app_data_directory("").unwrap();
    assert_eq!(
        fallback.file_name().map(|n| n.to_string_lossy().into_owned()),
        application_name().map(|n| if cfg!(windows) { n } else { n.to_lowercase() })
    );
}

#[test]
fn test_snapshot_serializes_to_json() {
    let session = session();
    let mut dummy = Context::new(&session, DummyContext::default()).unwrap();

    let snapshot = serde_json::to_value(session.snapshot()).unwrap();
    assert_eq!(snapshot["interface"], "none");
    assert_eq!(snapshot["contexts"][0]["name"], "DummyContext");
    assert_eq!(
        snapshot["contexts"][0]["owned_groups"],
        serde_json::json!(["global.interface", "application.context.dummycontext"])
    );

    let groups = snapshot["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0]["name"], "application.context.dummycontext");
    assert_eq!(groups[1]["name"], "global.interface");
    assert_eq!(groups[1]["state"], "locked");
    assert_eq!(groups[1]["holders"], serde_json::json!(["DummyContext"]));

    dummy.dispose().unwrap();
    let snapshot = serde_json::to_value(session.snapshot()).unwrap();
    assert_eq!(snapshot["contexts"], serde_json::json!([]));
    assert!(snapshot["groups"]
        .as_array()
        .unwrap()
        .iter()
        .all(|g| g["state"] == "free"));
}
