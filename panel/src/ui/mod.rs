// 滑块
mod slider;
pub use slider::*;

// 拖动请求合并
mod coalesce;
pub use coalesce::Coalescer;

// 提示消息
mod toast;
pub use toast::{Toast, Toaster};

// 操作确认
mod confirm;
pub use confirm::{AutoConfirm, Confirm};

// 界面投影
mod view;
pub use view::*;
