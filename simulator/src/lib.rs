//! Parola 设备模拟器
//!
//! 在内存中实现设备 HTTP API（登录、状态、设置、WiFi、复位、OTA），
//! 用于本地开发和集成测试。

pub mod api;
pub mod config;
pub mod middleware;
pub mod models;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info};

pub use api::create_router;
pub use config::SimulatorConfig;
pub use state::DeviceState;

/// 正在运行的模拟器实例
pub struct RunningSimulator {
    pub addr: SocketAddr,
    pub state: Arc<DeviceState>,
    handle: JoinHandle<()>,
}

impl RunningSimulator {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn shutdown(self) {
        self.handle.abort();
    }
}

/// 在后台任务中启动模拟器
pub async fn spawn(config: SimulatorConfig) -> anyhow::Result<RunningSimulator> {
    let listener = TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr()))?;
    let addr = listener.local_addr()?;

    let state = Arc::new(DeviceState::new(config));
    let app = create_router(state.clone());

    info!("Simulator listening on http://{}", addr);
    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Simulator server error: {}", e);
        }
    });

    Ok(RunningSimulator {
        addr,
        state,
        handle,
    })
}
