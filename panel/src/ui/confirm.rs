/// 破坏性操作（WiFi 重启、复位）前的用户确认
pub trait Confirm: Send + Sync {
    fn confirm(&self, question: &str) -> bool;
}

/// 固定回答，用于 `--yes` 和测试
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&self, _question: &str) -> bool {
        self.0
    }
}
