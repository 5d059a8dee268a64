use tracing::{info, warn};

use super::{ControlPanel, SliderSender};
use crate::error::{PanelError, Result};
use crate::models::{effect, DeviceStatus};
use crate::ui::{PointerEvent, SliderKind, TrackRect};

impl ControlPanel {
    pub fn set_slider_track(&self, kind: SliderKind, track: TrackRect) {
        self.cell().update(|s| s.slider_mut(kind).set_track(track));
    }

    /// 处理滑块指针事件，返回新值
    ///
    /// 显示与提示随每个事件更新；网络请求按配置立即发送或合并发送。
    pub async fn slider_event(&self, kind: SliderKind, event: PointerEvent) -> Option<i64> {
        let value = self.cell().update(|s| s.slider_mut(kind).handle(event))?;
        if !self.require_auth() {
            return Some(value);
        }
        self.show_toast(format!("{}: {}", kind.label(), value));

        match self.inner.sender(kind) {
            SliderSender::Immediate => {
                let _ = self.send_slider_value(kind, value).await;
            }
            SliderSender::Coalesced(coalescer) => coalescer.push(value),
        }
        Some(value)
    }

    /// 直接设置滑块值（先钳制）并立即发送
    pub async fn set_slider_value(&self, kind: SliderKind, value: i64) -> Result<i64> {
        let value = self.cell().update(|s| s.slider_mut(kind).set_value(value));
        self.authorized_token()?;
        self.show_toast(format!("{}: {}", kind.label(), value));
        self.send_slider_value(kind, value).await?;
        Ok(value)
    }

    /// 发送滑块值；失败只记录日志
    pub(crate) async fn send_slider_value(&self, kind: SliderKind, value: i64) -> Result<()> {
        let Some(token) = self.current_token() else {
            return Err(PanelError::AuthMissing);
        };
        let value = kind.bounds().clamp(value);

        let result = self
            .client()
            .set_slider(kind.endpoint(), &token, value)
            .await;
        if let Err(e) = &result {
            warn!("failed to set {}: {}", kind.label().to_lowercase(), e);
            self.note_failure(e);
        }
        result
    }

    /// 选择特效：先写入，再读取状态，最后提示
    ///
    /// 在状态重新同步之前不高亮任何特效。
    pub async fn select_effect(&self, index: usize) -> Result<DeviceStatus> {
        let def = effect(index)
            .ok_or_else(|| PanelError::Validation(format!("unknown effect {}", index)))?;
        let token = self.authorized_token()?;

        self.cell().update(|s| s.effect_resync_pending = true);
        match self.client().set_effect(&token, index).await {
            Ok(()) => info!("effect set to {} ({})", index, def.name),
            // 设备有响应就重新同步
            Err(e) if e.is_response() => {
                warn!("setEffect: {}", e);
                self.note_failure(&e);
            }
            Err(e) => {
                warn!("setEffect failed: {}", e);
                self.cell().update(|s| s.effect_resync_pending = false);
                self.show_toast("Failed to set effect");
                return Err(e);
            }
        }

        let status = self.fetch_status().await;
        self.show_toast(format!("Effect: {}", def.name));
        status
    }

    /// 编辑实时消息：原样发送整段文本
    pub async fn edit_message(&self, text: &str) -> Result<()> {
        self.cell().update(|s| s.message = text.to_string());
        let token = self.authorized_token()?;

        self.show_toast("Live updated!");
        if let Err(e) = self.client().set_message(&token, text).await {
            warn!("failed to update message: {}", e);
            self.note_failure(&e);
            return Err(e);
        }
        Ok(())
    }
}
