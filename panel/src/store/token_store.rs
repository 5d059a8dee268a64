use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use super::{StoreError, Token, TokenStore, TOKEN_KEY};

/// TOML 文件存储，其它键原样保留
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn read_table(&self) -> Result<toml::Table, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(toml::Table::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        toml::from_str::<toml::Table>(&text).map_err(|source| StoreError::Parse {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn write_table(&self, table: &toml::Table) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let text = toml::to_string(table)?;
        fs::write(&self.path, text).map_err(|e| self.io_error(e))
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<Token>, StoreError> {
        let table = self.read_table()?;
        Ok(table
            .get(TOKEN_KEY)
            .and_then(|v| v.as_str())
            .map(Token::new))
    }

    fn save(&self, token: &Token) -> Result<(), StoreError> {
        let mut table = self.read_table()?;
        table.insert(
            TOKEN_KEY.to_string(),
            toml::Value::String(token.as_str().to_string()),
        );
        self.write_table(&table)?;
        debug!("session saved to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut table = self.read_table()?;
        if table.remove(TOKEN_KEY).is_none() {
            return Ok(());
        }
        if table.is_empty() {
            match fs::remove_file(&self.path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(self.io_error(e)),
            }
        } else {
            self.write_table(&table)?;
        }
        debug!("session cleared from {}", self.path.display());
        Ok(())
    }
}

/// 内存存储，进程退出即丢失
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<Token>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: Token) -> Self {
        Self {
            token: Mutex::new(Some(token)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<Token>, StoreError> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, token: &Token) -> Result<(), StoreError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
