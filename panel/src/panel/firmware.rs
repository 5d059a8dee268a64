use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use super::ControlPanel;
use crate::api::ProgressFn;
use crate::error::Result;
use crate::store::Token;

impl ControlPanel {
    /// 上传固件（multipart 字段 `firmware`），不重试、不重新加载
    pub async fn upload_firmware(&self, path: &Path) -> Result<()> {
        let token = self.authorized_token()?;
        let image = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "firmware.bin".to_string());
        self.upload_firmware_bytes(&token, file_name, image).await
    }

    /// 上传内存中的固件镜像
    pub async fn upload_firmware_image(&self, file_name: &str, image: Vec<u8>) -> Result<()> {
        let token = self.authorized_token()?;
        self.upload_firmware_bytes(&token, file_name.to_string(), image)
            .await
    }

    async fn upload_firmware_bytes(
        &self,
        token: &Token,
        file_name: String,
        image: Vec<u8>,
    ) -> Result<()> {
        info!("uploading {} ({} bytes)", file_name, image.len());
        self.cell().update(|s| s.firmware.preparing());

        let weak = self.downgrade();
        let progress: ProgressFn = Arc::new(move |sent: u64, total: u64| {
            if let Some(panel) = ControlPanel::upgrade(&weak) {
                panel.cell().update(|s| s.firmware.uploading(sent, total));
            }
        });

        match self
            .client()
            .upload_firmware(token, file_name, image, progress)
            .await
        {
            Ok(()) => {
                info!("firmware uploaded");
                self.cell().update(|s| s.firmware.complete());
                self.show_toast("Firmware uploaded!");
                Ok(())
            }
            Err(e) if e.is_response() => {
                warn!("firmware update rejected: {}", e);
                self.cell().update(|s| s.firmware.rejected());
                self.show_toast("Update failed!");
                self.note_failure(&e);
                Err(e)
            }
            Err(e) => {
                warn!("firmware upload failed: {}", e);
                self.cell().update(|s| s.firmware.network_error());
                self.show_toast("Upload failed!");
                Err(e)
            }
        }
    }
}
