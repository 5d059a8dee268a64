use reqwest::multipart::{Form, Part};
use reqwest::{Body, Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::Endpoint;
use crate::error::{PanelError, Result};
use crate::models::{DeviceStatus, LoginRequest, LoginResponse, ValueForm, WifiRequest};
use crate::store::Token;

/// 固件上传分块大小
const UPLOAD_CHUNK_BYTES: usize = 4 * 1024;

/// 上传进度回调：(已发送字节, 总字节)
pub type ProgressFn = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// 设备 HTTP API 客户端
///
/// 总超时按请求设置：固件上传耗时与镜像大小成正比，不受普通请求超时限制。
#[derive(Clone)]
pub struct DeviceClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
    upload_timeout: Option<Duration>,
}

impl DeviceClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(timeout)
            .no_proxy()
            .build()
            .map_err(|source| PanelError::Network {
                endpoint: "client",
                source,
            })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            upload_timeout: None,
        })
    }

    /// 固件上传的总超时；None 表示不限制
    pub fn with_upload_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.upload_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    fn timeout_for(&self, endpoint: Endpoint) -> Option<Duration> {
        match endpoint {
            Endpoint::Update => self.upload_timeout,
            _ => Some(self.timeout),
        }
    }

    async fn send(&self, endpoint: Endpoint, request: reqwest::RequestBuilder) -> Result<Response> {
        debug!("{} {}", endpoint.method(), endpoint.path());
        let request = match self.timeout_for(endpoint) {
            Some(timeout) => request.timeout(timeout),
            None => request,
        };
        let response = request
            .send()
            .await
            .map_err(|source| PanelError::Network {
                endpoint: endpoint.path(),
                source,
            })?;
        debug!("{} -> {}", endpoint.path(), response.status());
        check_status(endpoint, response)
    }

    /// POST /login
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        let endpoint = Endpoint::Login;
        let builder = self.http.post(self.url(endpoint)).form(request);
        let response = self.send(endpoint, builder).await?;
        decode(endpoint, response).await
    }

    /// GET /status
    pub async fn status(&self, token: &Token) -> Result<DeviceStatus> {
        let endpoint = Endpoint::Status;
        let builder = self
            .http
            .get(self.url(endpoint))
            .bearer_auth(token.as_str());
        let response = self.send(endpoint, builder).await?;
        decode(endpoint, response).await
    }

    async fn post_form<T: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        token: &Token,
        form: &T,
    ) -> Result<()> {
        let builder = self
            .http
            .post(self.url(endpoint))
            .bearer_auth(token.as_str())
            .form(form);
        self.send(endpoint, builder).await.map(drop)
    }

    /// POST /setBright 或 /setSpeed
    pub async fn set_slider(&self, endpoint: Endpoint, token: &Token, value: i64) -> Result<()> {
        self.post_form(endpoint, token, &ValueForm { value }).await
    }

    pub async fn set_effect(&self, token: &Token, index: usize) -> Result<()> {
        self.post_form(Endpoint::SetEffect, token, &ValueForm { value: index })
            .await
    }

    pub async fn set_message(&self, token: &Token, message: &str) -> Result<()> {
        self.post_form(Endpoint::SetMessage, token, &ValueForm { value: message })
            .await
    }

    pub async fn set_wifi(&self, token: &Token, request: &WifiRequest) -> Result<()> {
        self.post_form(Endpoint::SetWifi, token, request).await
    }

    /// POST /resetAll（无请求体）
    pub async fn reset_all(&self, token: &Token) -> Result<()> {
        let endpoint = Endpoint::ResetAll;
        let builder = self
            .http
            .post(self.url(endpoint))
            .bearer_auth(token.as_str());
        self.send(endpoint, builder).await.map(drop)
    }

    /// POST /update，multipart 字段名为 `firmware`
    ///
    /// 只有 200 才算成功；进度在 reqwest 取走每个分块时回调。
    pub async fn upload_firmware(
        &self,
        token: &Token,
        file_name: String,
        image: Vec<u8>,
        progress: ProgressFn,
    ) -> Result<()> {
        let endpoint = Endpoint::Update;
        let total = image.len() as u64;

        let chunks: Vec<Vec<u8>> = image
            .chunks(UPLOAD_CHUNK_BYTES)
            .map(<[u8]>::to_vec)
            .collect();
        let mut sent = 0u64;
        let stream = futures_util::stream::iter(chunks.into_iter().map(move |chunk| {
            sent += chunk.len() as u64;
            progress(sent, total);
            Ok::<_, std::io::Error>(chunk)
        }));

        let part = Part::stream_with_length(Body::wrap_stream(stream), total)
            .file_name(file_name)
            .mime_str("application/octet-stream")
            .map_err(|source| PanelError::Network {
                endpoint: endpoint.path(),
                source,
            })?;
        let form = Form::new().part("firmware", part);

        let builder = self
            .http
            .post(self.url(endpoint))
            .bearer_auth(token.as_str())
            .multipart(form);
        let response = self.send(endpoint, builder).await?;

        if response.status() != StatusCode::OK {
            return Err(PanelError::Server {
                endpoint: endpoint.path(),
                status: response.status(),
            });
        }
        Ok(())
    }
}

fn check_status(endpoint: Endpoint, response: Response) -> Result<Response> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(PanelError::AuthRejected {
            endpoint: endpoint.path(),
            status,
        });
    }
    if !status.is_success() {
        return Err(PanelError::Server {
            endpoint: endpoint.path(),
            status,
        });
    }
    Ok(response)
}

async fn decode<T: serde::de::DeserializeOwned>(endpoint: Endpoint, response: Response) -> Result<T> {
    let body = response.bytes().await.map_err(|source| PanelError::Network {
        endpoint: endpoint.path(),
        source,
    })?;
    serde_json::from_slice(&body).map_err(|source| PanelError::Decode {
        endpoint: endpoint.path(),
        source,
    })
}
