use tracing::{info, warn};

use super::ControlPanel;
use crate::error::{PanelError, Result};

pub const RESET_CONFIRM: &str = "Reset all settings and clear EEPROM?";

impl ControlPanel {
    /// 恢复出厂设置并重启设备
    pub async fn reset_all(&self) -> Result<()> {
        let token = self.authorized_token()?;
        if !self.inner.confirm.confirm(RESET_CONFIRM) {
            return Err(PanelError::Cancelled);
        }

        match self.client().reset_all(&token).await {
            Ok(()) => {
                info!("device reset");
                self.show_toast("Reset done. Rebooting...");
                self.schedule_reload();
                Ok(())
            }
            Err(e) if e.is_response() => {
                warn!("resetAll rejected: {}", e);
                self.show_toast("Reset failed");
                self.note_failure(&e);
                Err(e)
            }
            Err(e) => {
                warn!("resetAll failed: {}", e);
                self.show_toast("Request failed");
                Err(e)
            }
        }
    }
}
