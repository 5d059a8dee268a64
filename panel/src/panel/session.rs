use tracing::{error, info, warn};

use super::ControlPanel;
use crate::error::{AuthError, PanelError};
use crate::models::LoginRequest;
use crate::store::Token;

pub const LOGIN_ERROR: &str = "Incorrect username or password.";

impl ControlPanel {
    /// 当前 token；读取失败视为未登录
    pub(crate) fn current_token(&self) -> Option<Token> {
        match self.inner.tokens.load() {
            Ok(token) => token,
            Err(e) => {
                error!("failed to read session: {}", e);
                None
            }
        }
    }

    /// 只检查 token 是否存在
    pub fn is_authenticated(&self) -> bool {
        self.current_token().is_some()
    }

    /// 未登录时弹出登录框并返回 false
    pub fn require_auth(&self) -> bool {
        if self.is_authenticated() {
            return true;
        }
        self.show_login();
        false
    }

    /// 需要认证的操作入口：返回 token，或弹出登录框
    pub(crate) fn authorized_token(&self) -> Result<Token, PanelError> {
        match self.current_token() {
            Some(token) => Ok(token),
            None => {
                self.show_login();
                Err(PanelError::AuthMissing)
            }
        }
    }

    pub fn show_login(&self) {
        self.cell().update(|s| s.show_login());
    }

    pub fn hide_login(&self) {
        self.cell().update(|s| s.hide_login());
    }

    /// 设备拒绝 token 时重新弹出登录框，token 保留
    pub(crate) fn note_failure(&self, err: &PanelError) {
        if matches!(err, PanelError::AuthRejected { .. }) {
            warn!("session rejected: {}", err);
            self.show_login();
        }
    }

    /// 登录成功后保存 token、关闭登录框并刷新状态
    pub async fn login(&self, username: &str, password: &str) -> Result<Token, AuthError> {
        let request = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };

        let response = match self.client().login(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("login failed for {}: {}", request.username, e);
                self.cell().update(|s| s.login.error = Some(LOGIN_ERROR.to_string()));
                return Err(e.into());
            }
        };

        let token = Token::new(response.token);
        if let Err(e) = self.inner.tokens.save(&token) {
            error!("failed to persist session: {}", e);
            self.cell().update(|s| s.login.error = Some(LOGIN_ERROR.to_string()));
            return Err(e.into());
        }

        info!("logged in as {}", request.username);
        self.hide_login();
        // 失败时已弹出登录框
        let _ = self.fetch_status().await;
        Ok(token)
    }

    /// 清除 token 并弹出登录框，不访问设备
    pub fn logout(&self) -> Result<(), PanelError> {
        self.inner.tokens.clear()?;
        info!("logged out");
        self.show_login();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::config::PanelConfig;
    use crate::store::{MemoryTokenStore, Token, TokenStore};
    use crate::ui::AutoConfirm;
    use crate::ControlPanel;

    fn panel(tokens: Arc<MemoryTokenStore>) -> ControlPanel {
        let config = PanelConfig {
            // 不会被访问
            device_url: "http://127.0.0.1:9".into(),
            slider_coalesce_ms: 0,
            ..PanelConfig::default()
        };
        ControlPanel::new(config, tokens, Arc::new(AutoConfirm(true))).unwrap()
    }

    #[tokio::test]
    async fn require_auth_shows_prompt_without_token() {
        let panel = panel(Arc::new(MemoryTokenStore::default()));
        assert!(!panel.is_authenticated());
        assert!(!panel.require_auth());
        assert!(panel.state().login.visible);
    }

    #[tokio::test]
    async fn token_presence_is_authentication() {
        let panel = panel(Arc::new(MemoryTokenStore::with_token(Token::new("abc"))));
        assert!(panel.require_auth());
        assert!(!panel.state().login.visible);
    }

    #[tokio::test]
    async fn logout_clears_token_and_prompts() {
        let tokens = Arc::new(MemoryTokenStore::with_token(Token::new("abc")));
        let panel = panel(tokens.clone());
        panel.logout().unwrap();
        assert_eq!(tokens.load().unwrap(), None);
        assert!(panel.state().login.visible);
    }
}
