mod client;

pub use client::{DeviceClient, ProgressFn};

/// 设备 HTTP API 端点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    Status,
    SetBright,
    SetSpeed,
    SetEffect,
    SetMessage,
    SetWifi,
    ResetAll,
    Update,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Login => "/login",
            Endpoint::Status => "/status",
            Endpoint::SetBright => "/setBright",
            Endpoint::SetSpeed => "/setSpeed",
            Endpoint::SetEffect => "/setEffect",
            Endpoint::SetMessage => "/setMessage",
            Endpoint::SetWifi => "/setWifi",
            Endpoint::ResetAll => "/resetAll",
            Endpoint::Update => "/update",
        }
    }

    pub fn method(self) -> &'static str {
        match self {
            Endpoint::Status => "GET",
            _ => "POST",
        }
    }
}
