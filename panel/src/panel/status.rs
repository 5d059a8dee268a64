use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::{ControlPanel, PanelState};
use crate::error::Result;
use crate::models::DeviceStatus;

impl ControlPanel {
    /// 获取设备状态并刷新所有依赖它的控件
    ///
    /// 任何失败（网络、非 2xx、无法解析）都会弹出登录框，不重试。
    pub async fn fetch_status(&self) -> Result<DeviceStatus> {
        let token = self.authorized_token()?;

        match self.client().status(&token).await {
            Ok(status) => {
                debug!(
                    "status: brightness={:?} speed={:?} effect={:?} apMode={}",
                    status.brightness, status.speed, status.effect, status.ap_mode
                );
                self.cell().update(|s| s.apply_status(status.clone()));
                Ok(status)
            }
            Err(e) => {
                warn!("status fetch failed: {}", e);
                self.show_login();
                Err(e)
            }
        }
    }

    /// 启动：已登录则立即获取一次状态，并开始周期轮询
    pub async fn start(&self) -> JoinHandle<()> {
        if self.is_authenticated() {
            self.hide_login();
            let _ = self.fetch_status().await;
        } else {
            self.show_login();
        }
        self.spawn_poller()
    }

    /// 周期轮询，面板被释放后自动结束
    ///
    /// 每个周期开头检查登录状态，未登录时跳过本次请求。
    pub fn spawn_poller(&self) -> JoinHandle<()> {
        let period = self.config().poll_interval();
        let weak = self.downgrade();

        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(panel) = ControlPanel::upgrade(&weak) else {
                    debug!("panel dropped, poller stopped");
                    break;
                };
                if !panel.is_authenticated() {
                    continue;
                }
                let _ = panel.fetch_status().await;
            }
        })
    }

    /// 回到刚启动时的状态，已登录则重新获取状态
    pub async fn reload(&self) {
        info!("reloading panel");
        let toast_duration = self.config().toast_duration();
        self.cell().update(|s| *s = PanelState::new(toast_duration));
        if self.is_authenticated() {
            let _ = self.fetch_status().await;
        } else {
            self.show_login();
        }
    }

    /// 延迟后重新加载（设备重启需要时间）
    pub fn schedule_reload(&self) -> JoinHandle<()> {
        let delay = self.config().reload_delay();
        let panel = self.downgrade();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(panel) = ControlPanel::upgrade(&panel) {
                panel.reload().await;
            }
        })
    }
}
