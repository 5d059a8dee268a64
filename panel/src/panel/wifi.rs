use tracing::{info, warn};

use super::ControlPanel;
use crate::error::{PanelError, Result};
use crate::models::WifiRequest;

pub const WIFI_CONFIRM: &str = "Save WiFi settings and restart device?";

impl ControlPanel {
    /// 保存 WiFi 配置，设备随后重启
    ///
    /// SSID 去除首尾空白后不能为空；密码可以为空。成功后延迟重新加载。
    pub async fn save_wifi(&self, ssid: &str, password: &str) -> Result<()> {
        let token = self.authorized_token()?;

        let ssid = ssid.trim();
        if ssid.is_empty() {
            self.show_toast("Please enter WiFi SSID");
            return Err(PanelError::Validation("WiFi SSID is empty".to_string()));
        }
        if !self.inner.confirm.confirm(WIFI_CONFIRM) {
            return Err(PanelError::Cancelled);
        }

        let request = WifiRequest {
            ssid: ssid.to_string(),
            password: password.to_string(),
        };
        match self.client().set_wifi(&token, &request).await {
            Ok(()) => {
                info!("WiFi set to {}", request.ssid);
                self.show_toast("WiFi settings saved! Device restarting...");
                self.schedule_reload();
                Ok(())
            }
            Err(e) if e.is_response() => {
                warn!("setWifi rejected: {}", e);
                self.show_toast("Failed to save WiFi settings");
                self.note_failure(&e);
                Err(e)
            }
            Err(e) => {
                warn!("setWifi failed: {}", e);
                self.show_toast("Error saving WiFi settings");
                Err(e)
            }
        }
    }
}
