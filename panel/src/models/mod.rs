// 设备状态
mod status;
pub use status::*;

// 特效列表
mod effect;
pub use effect::*;

// 请求 / 响应表单
mod forms;
pub use forms::*;
