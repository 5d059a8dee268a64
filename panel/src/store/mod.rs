//! 会话存储
//!
//! 会话只有一个不透明的 Bearer Token，保存在固定键 `parola_token` 下；
//! 键不存在即表示未登录。

mod token_store;
pub use token_store::*;

use std::fmt;

/// 存储 token 使用的键
pub const TOKEN_KEY: &str = "parola_token";

/// 不透明的 Bearer Token
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token(<{} chars>)", self.0.len())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid TOML: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to encode session: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Token 持久化接口
///
/// 同步接口：每次认证检查都直接读取，不跨越 await。
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<Token>, StoreError>;

    fn save(&self, token: &Token) -> Result<(), StoreError>;

    fn clear(&self) -> Result<(), StoreError>;
}
