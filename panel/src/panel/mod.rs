//! 控制面板
//!
//! `ControlPanel` 持有唯一的 `PanelState`，所有操作先修改状态、再由 `ui::render` 投影。
//! 操作返回 `Result` 只供调用方记录；界面上的反馈（提示、登录框）在返回前已经完成。

mod state;
pub use state::{FirmwareProgress, LoginPrompt, PanelState, StateCell};

mod controls;
mod firmware;
mod maintenance;
mod session;
mod status;
mod wifi;

use std::sync::{Arc, Weak};
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::info;

use crate::api::DeviceClient;
use crate::config::PanelConfig;
use crate::error::Result;
use crate::store::{FileTokenStore, TokenStore};
use crate::ui::{render, Coalescer, Confirm, PanelView, SliderKind};

/// 滑块值的发送方式
enum SliderSender {
    /// 每次更新立即发送
    Immediate,
    /// 按尾沿合并后发送
    Coalesced(Coalescer),
}

impl SliderSender {
    fn new(kind: SliderKind, config: &PanelConfig, panel: Weak<PanelInner>) -> Self {
        let window = config.slider_coalesce();
        if window.is_zero() {
            return SliderSender::Immediate;
        }
        SliderSender::Coalesced(Coalescer::spawn(window, move |value| {
            let panel = panel.clone();
            async move {
                if let Some(inner) = panel.upgrade() {
                    // 失败已在内部记录
                    let _ = ControlPanel { inner }.send_slider_value(kind, value).await;
                }
            }
        }))
    }
}

pub(crate) struct PanelInner {
    config: PanelConfig,
    client: DeviceClient,
    tokens: Arc<dyn TokenStore>,
    confirm: Arc<dyn Confirm>,
    cell: StateCell,
    brightness_tx: SliderSender,
    speed_tx: SliderSender,
}

impl PanelInner {
    fn sender(&self, kind: SliderKind) -> &SliderSender {
        match kind {
            SliderKind::Brightness => &self.brightness_tx,
            SliderKind::Speed => &self.speed_tx,
        }
    }
}

/// 控制面板客户端；克隆共享同一份状态
#[derive(Clone)]
pub struct ControlPanel {
    inner: Arc<PanelInner>,
}

impl ControlPanel {
    /// 创建面板；必须在 tokio 运行时内调用
    pub fn new(
        config: PanelConfig,
        tokens: Arc<dyn TokenStore>,
        confirm: Arc<dyn Confirm>,
    ) -> Result<Self> {
        let client = DeviceClient::new(&config.device_url, config.http_timeout())?
            .with_upload_timeout(config.firmware_timeout());
        let state = PanelState::new(config.toast_duration());

        let inner = Arc::new_cyclic(|weak: &Weak<PanelInner>| PanelInner {
            brightness_tx: SliderSender::new(SliderKind::Brightness, &config, weak.clone()),
            speed_tx: SliderSender::new(SliderKind::Speed, &config, weak.clone()),
            cell: StateCell::new(state),
            client,
            tokens,
            confirm,
            config,
        });

        info!("control panel for {}", inner.client.base_url());
        Ok(Self { inner })
    }

    /// 使用配置中的会话文件
    pub fn with_session_file(config: PanelConfig, confirm: Arc<dyn Confirm>) -> Result<Self> {
        let tokens = Arc::new(FileTokenStore::new(config.session_file.clone()));
        Self::new(config, tokens, confirm)
    }

    fn downgrade(&self) -> Weak<PanelInner> {
        Arc::downgrade(&self.inner)
    }

    fn upgrade(panel: &Weak<PanelInner>) -> Option<Self> {
        panel.upgrade().map(|inner| Self { inner })
    }

    pub fn config(&self) -> &PanelConfig {
        &self.inner.config
    }

    pub fn client(&self) -> &DeviceClient {
        &self.inner.client
    }

    pub(crate) fn cell(&self) -> &StateCell {
        &self.inner.cell
    }

    /// 当前状态快照
    pub fn state(&self) -> PanelState {
        self.inner.cell.snapshot()
    }

    /// 当前界面
    pub fn view(&self) -> PanelView {
        render(&self.state(), Instant::now())
    }

    /// 每次状态变化都会收到通知
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.cell.subscribe()
    }

    /// 显示提示消息
    pub fn show_toast(&self, message: impl Into<String>) {
        let message = message.into();
        info!("toast: {}", message);
        self.inner.cell.update(|s| s.toaster.show(message));
    }
}
