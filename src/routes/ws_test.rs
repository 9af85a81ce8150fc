use super::*;
use crate::state::test_helpers::test_app_state;
use crate::update::UpdateKind;

#[tokio::test]
async fn refresh_command_returns_a_dashboard_update() {
    let state = test_app_state();
    let reply = handle_command(&state, r#"{"type":"refresh"}"#).await;
    let Some(update) = reply else {
        panic!("refresh should produce an update");
    };
    assert_eq!(update.kind, UpdateKind::DashboardUpdate);
    // No live database behind the lazy pool, so the snapshot is the sample.
    assert_eq!(update.data["snapshot"]["sample"], true);
}

#[tokio::test]
async fn unknown_command_is_ignored() {
    let state = test_app_state();
    assert!(handle_command(&state, r#"{"type":"subscribe"}"#).await.is_none());
}

#[tokio::test]
async fn malformed_json_is_ignored() {
    let state = test_app_state();
    assert!(handle_command(&state, "not json").await.is_none());
    assert!(handle_command(&state, r#"{"no_type":1}"#).await.is_none());
}
