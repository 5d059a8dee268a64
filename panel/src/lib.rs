//! Parola LED 点阵屏控制面板客户端
//!
//! 通过设备的 HTTP API（Bearer Token 认证）完成登录、状态轮询、
//! 亮度/速度滑块、特效选择、实时消息、WiFi 配置、固件升级与复位。

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod panel;
pub mod store;
pub mod ui;

pub use config::PanelConfig;
pub use error::{AuthError, PanelError, Result};
pub use panel::{ControlPanel, PanelState};
