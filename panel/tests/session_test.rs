mod common;

use std::sync::Arc;

use parola_panel::error::{AuthError, PanelError};
use parola_panel::store::TokenStore;
use parola_panel::ui::{AutoConfirm, AP_MODE_BANNER};
use parola_panel::ControlPanel;
use reqwest::StatusCode;

use common::*;

#[tokio::test]
async fn test_login_stores_token_and_fetches_status() {
    let sim = simulator().await;
    let harness = panel_for(&sim);
    harness.panel.show_login();

    harness.panel.login(USERNAME, PASSWORD).await.unwrap();

    assert!(harness.tokens.load().unwrap().is_some());
    let view = harness.panel.view();
    assert!(!view.login.visible);
    assert_eq!(view.banner.unwrap().text, AP_MODE_BANNER);
    assert_eq!(view.message, "Hello Parola");
    assert_eq!(view.ip, "192.168.4.1");
    assert_eq!(sim.state.request_count("/status").await, 1);
}

#[tokio::test]
async fn test_login_trims_username() {
    let sim = simulator().await;
    let harness = panel_for(&sim);

    harness.panel.login("  admin ", PASSWORD).await.unwrap();
    assert!(harness.panel.is_authenticated());
}

#[tokio::test]
async fn test_bad_login_shows_inline_error() {
    let sim = simulator().await;
    let harness = panel_for(&sim);
    harness.panel.show_login();

    let err = harness.panel.login(USERNAME, "wrong").await.unwrap_err();
    assert!(matches!(err, AuthError::Rejected { status } if status == StatusCode::UNAUTHORIZED));

    let state = harness.panel.state();
    assert!(state.login.visible);
    assert_eq!(
        state.login.error.as_deref(),
        Some("Incorrect username or password.")
    );
    assert_eq!(harness.tokens.load().unwrap(), None);

    // 重新弹出登录框时清除错误
    harness.panel.show_login();
    assert_eq!(harness.panel.state().login.error, None);
}

#[tokio::test]
async fn test_failing_status_fetch_shows_prompt_and_keeps_last_status() {
    let sim = simulator().await;
    let harness = logged_in(&sim).await;
    let before = harness.panel.state().status.clone();
    assert!(before.is_some());

    sim.state
        .force_status("/status", StatusCode::INTERNAL_SERVER_ERROR)
        .await;
    let err = harness.panel.fetch_status().await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));

    let state = harness.panel.state();
    assert!(state.login.visible);
    assert_eq!(state.status, before);

    // 恢复后获取成功，但登录框只在登录成功时关闭
    sim.state.clear_forced().await;
    assert!(harness.panel.fetch_status().await.is_ok());
    assert!(harness.panel.state().login.visible);
}

#[tokio::test]
async fn test_rejected_token_prompts_but_is_kept() {
    let sim = simulator().await;
    let harness = panel_for(&sim);
    store_token(&harness, "not-a-jwt");

    let err = harness.panel.fetch_status().await.unwrap_err();
    assert!(matches!(err, PanelError::AuthRejected { .. }));
    assert!(harness.panel.state().login.visible);
    assert!(harness.tokens.load().unwrap().is_some());
}

#[tokio::test]
async fn test_revoked_session_is_rejected() {
    let sim = simulator().await;
    let harness = logged_in(&sim).await;

    sim.state.revoke_tokens();
    assert!(harness.panel.fetch_status().await.is_err());
    assert!(harness.panel.state().login.visible);

    harness.panel.login(USERNAME, PASSWORD).await.unwrap();
    assert!(!harness.panel.state().login.visible);
    assert!(harness.panel.fetch_status().await.is_ok());
}

#[tokio::test]
async fn test_logout_clears_token_without_server_call() {
    let sim = simulator().await;
    let harness = logged_in(&sim).await;
    let requests = sim.state.requests().await.len();

    harness.panel.logout().unwrap();
    assert_eq!(harness.tokens.load().unwrap(), None);
    assert!(harness.panel.state().login.visible);

    let err = harness.panel.fetch_status().await.unwrap_err();
    assert!(matches!(err, PanelError::AuthMissing));
    assert_eq!(sim.state.requests().await.len(), requests);
}

#[tokio::test]
async fn test_start_without_token_shows_prompt() {
    let sim = simulator().await;
    let harness = panel_for(&sim);

    let poller = harness.panel.start().await;
    assert!(harness.panel.state().login.visible);
    assert_eq!(sim.state.request_count("/status").await, 0);
    poller.abort();
}

#[tokio::test]
async fn test_poller_picks_up_device_changes() {
    let sim = simulator().await;
    let mut config = config_for(&sim.base_url());
    config.poll_interval_ms = 30;
    let harness = panel_with(config, true);
    harness.panel.login(USERNAME, PASSWORD).await.unwrap();

    let poller = harness.panel.start().await;
    sim.state.set_brightness(11).await;
    sim.state.set_effect(4).await.unwrap();

    let panel = harness.panel.clone();
    assert!(
        eventually(|| {
            let panel = panel.clone();
            async move {
                let view = panel.view();
                view.brightness.value == 11
                    && view.selected_effect().map(|c| c.index) == Some(4)
            }
        })
        .await
    );
    poller.abort();
}

#[tokio::test]
async fn test_file_session_survives_new_panel() {
    let sim = simulator().await;
    let config = config_for(&sim.base_url());
    let session_file = config.session_file.clone();

    let panel = ControlPanel::with_session_file(config.clone(), Arc::new(AutoConfirm(true))).unwrap();
    panel.login(USERNAME, PASSWORD).await.unwrap();
    assert!(session_file.exists());

    let reopened = ControlPanel::with_session_file(config, Arc::new(AutoConfirm(true))).unwrap();
    assert!(reopened.is_authenticated());
    assert!(reopened.fetch_status().await.is_ok());

    reopened.logout().unwrap();
    assert!(!session_file.exists());
}

#[tokio::test]
async fn test_poller_stops_fetching_after_logout() {
    let sim = simulator().await;
    let mut config = config_for(&sim.base_url());
    config.poll_interval_ms = 30;
    let harness = panel_with(config, true);
    harness.panel.login(USERNAME, PASSWORD).await.unwrap();

    let poller = harness.panel.start().await;
    harness.panel.logout().unwrap();
    // 等待可能已在途的一次获取结束
    tokio::time::sleep(std::time::Duration::from_millis(60)).await;
    let fetched = sim.state.request_count("/status").await;

    tokio::time::sleep(std::time::Duration::from_millis(150)).await;
    assert_eq!(sim.state.request_count("/status").await, fetched);
    assert!(harness.panel.state().login.visible);
    assert!(!poller.is_finished());
    poller.abort();
}

#[tokio::test]
async fn test_zero_poll_interval_does_not_stop_poller() {
    let sim = simulator().await;
    let mut config = config_for(&sim.base_url());
    config.poll_interval_ms = 0;
    let harness = panel_with(config, true);
    harness.panel.login(USERNAME, PASSWORD).await.unwrap();

    let poller = harness.panel.start().await;
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert!(!poller.is_finished());
    assert!(sim.state.request_count("/status").await > 1);
    poller.abort();
}
