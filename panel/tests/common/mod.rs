#![allow(dead_code)]

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use parola_panel::store::{MemoryTokenStore, Token, TokenStore};
use parola_panel::ui::AutoConfirm;
use parola_panel::{ControlPanel, PanelConfig};
use parola_simulator::{RunningSimulator, SimulatorConfig};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "admin";

pub async fn simulator() -> RunningSimulator {
    parola_simulator::spawn(SimulatorConfig::local())
        .await
        .expect("simulator should start")
}

pub async fn simulator_with(config: SimulatorConfig) -> RunningSimulator {
    parola_simulator::spawn(config)
        .await
        .expect("simulator should start")
}

/// 测试用配置：轮询与重新加载都很快，滑块请求不合并
pub fn config_for(base_url: &str) -> PanelConfig {
    PanelConfig {
        device_url: base_url.to_string(),
        session_file: temp_session_file(),
        poll_interval_ms: 60_000,
        reload_delay_ms: 50,
        http_timeout_ms: 5_000,
        slider_coalesce_ms: 0,
        ..PanelConfig::default()
    }
}

pub fn temp_session_file() -> PathBuf {
    std::env::temp_dir()
        .join(format!("parola-panel-test-{}", uuid::Uuid::new_v4()))
        .join("session.toml")
}

pub struct Harness {
    pub panel: ControlPanel,
    pub tokens: Arc<MemoryTokenStore>,
}

pub fn panel_with(config: PanelConfig, confirm: bool) -> Harness {
    let tokens = Arc::new(MemoryTokenStore::new());
    let panel = ControlPanel::new(config, tokens.clone(), Arc::new(AutoConfirm(confirm)))
        .expect("panel should build");
    Harness { panel, tokens }
}

pub fn panel_for(sim: &RunningSimulator) -> Harness {
    panel_with(config_for(&sim.base_url()), true)
}

/// 已登录的面板
pub async fn logged_in(sim: &RunningSimulator) -> Harness {
    let harness = panel_for(sim);
    harness
        .panel
        .login(USERNAME, PASSWORD)
        .await
        .expect("login should succeed");
    harness
}

pub fn store_token(harness: &Harness, token: &str) {
    harness.tokens.save(&Token::new(token)).unwrap();
}

/// 轮询直到条件成立或超时
pub async fn eventually<F, Fut>(mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    for _ in 0..100 {
        if check().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    false
}
