use reqwest::StatusCode;
use thiserror::Error;

use crate::store::StoreError;

/// 控制面板错误
///
/// 所有错误在面板边界处已经反映到界面上（登录框、提示消息或行内错误），
/// 返回值只供调用方记录或断言。
#[derive(Debug, Error)]
pub enum PanelError {
    /// 本地没有 token
    #[error("not logged in")]
    AuthMissing,

    /// 设备拒绝了携带 token 的请求
    #[error("{endpoint} rejected the session ({status})")]
    AuthRejected {
        endpoint: &'static str,
        status: StatusCode,
    },

    /// 输入校验失败，请求未发送
    #[error("{0}")]
    Validation(String),

    /// 用户取消了需要确认的操作
    #[error("cancelled by user")]
    Cancelled,

    /// 设备返回非成功状态码
    #[error("{endpoint} returned {status}")]
    Server {
        endpoint: &'static str,
        status: StatusCode,
    },

    /// 网络层失败（连接、超时等）
    #[error("request to {endpoint} failed: {source}")]
    Network {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// 响应体无法解析
    #[error("invalid response from {endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("session store: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PanelError {
    /// 设备确实返回了 HTTP 响应（只是状态码不对）
    pub fn is_response(&self) -> bool {
        matches!(
            self,
            PanelError::Server { .. } | PanelError::AuthRejected { .. }
        )
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            PanelError::Server { status, .. } | PanelError::AuthRejected { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PanelError>;

/// 登录错误
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("incorrect username or password ({status})")]
    Rejected { status: StatusCode },

    #[error("login request failed: {0}")]
    Request(#[source] PanelError),

    #[error("failed to persist session: {0}")]
    Store(#[from] StoreError),
}

impl From<PanelError> for AuthError {
    fn from(err: PanelError) -> Self {
        match err.status() {
            Some(status) => AuthError::Rejected { status },
            None => AuthError::Request(err),
        }
    }
}
