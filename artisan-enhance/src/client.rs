//! Client configuration and transport layer.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client as HttpClient, Proxy};

use crate::env::first_non_blank;
use crate::error::{Error, Result};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";
const DEFAULT_API_VERSION: &str = "v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";

const API_KEY_ENV: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];
const BASE_URL_ENV: [&str; 2] = ["GENAI_BASE_URL", "GEMINI_BASE_URL"];
const API_VERSION_ENV: [&str; 1] = ["GENAI_API_VERSION"];

/// Gemini 客户端，可廉价克隆并在多个增强器间共享。
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub http: HttpClient,
    pub config: ClientConfig,
    pub api_client: ApiClient,
}

/// 客户端配置。
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub http_options: HttpOptions,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("http_options", &self.http_options)
            .finish()
    }
}

/// HTTP 配置。
#[derive(Debug, Clone, Default)]
pub struct HttpOptions {
    /// 请求超时（秒）；默认不设超时。
    pub timeout: Option<u64>,
    pub proxy: Option<String>,
    /// 额外的默认请求头；包含 `x-goog-api-key` 时覆盖密钥头。
    pub headers: HashMap<String, String>,
    pub base_url: Option<String>,
    pub api_version: Option<String>,
}

impl Client {
    /// 使用 API Key 创建客户端。
    ///
    /// # Errors
    /// 当 API Key 为空或无法作为请求头发送时返回错误。
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// 从环境变量创建客户端。
    ///
    /// 密钥取自 `GEMINI_API_KEY`，为空时取 `GOOGLE_API_KEY`。
    /// `GENAI_BASE_URL`（或 `GEMINI_BASE_URL`）与 `GENAI_API_VERSION` 可选，
    /// 空白值视为未设置。
    ///
    /// # Errors
    /// 当两个密钥变量都缺失或构建客户端失败时返回错误。
    pub fn from_env() -> Result<Self> {
        let api_key = first_non_blank(&API_KEY_ENV).ok_or_else(|| Error::InvalidConfig {
            message: "GEMINI_API_KEY or GOOGLE_API_KEY not found".into(),
        })?;
        let builder = Self::builder().api_key(api_key);
        let builder = match first_non_blank(&BASE_URL_ENV) {
            Some(base_url) => builder.base_url(base_url),
            None => builder,
        };
        let builder = match first_non_blank(&API_VERSION_ENV) {
            Some(api_version) => builder.api_version(api_version),
            None => builder,
        };
        builder.build()
    }

    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// 访问 Models API。
    #[must_use]
    pub fn models(&self) -> crate::models::Models {
        crate::models::Models::new(Arc::clone(&self.inner))
    }
}

/// 客户端 Builder。
#[derive(Default)]
pub struct ClientBuilder {
    api_key: Option<String>,
    http_options: HttpOptions,
}

impl ClientBuilder {
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// 设置请求超时（秒）。
    #[must_use]
    pub const fn timeout(mut self, secs: u64) -> Self {
        self.http_options.timeout = Some(secs);
        self
    }

    #[must_use]
    pub fn proxy(mut self, url: impl Into<String>) -> Self {
        self.http_options.proxy = Some(url.into());
        self
    }

    /// 增加默认 HTTP 头。
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.http_options.headers.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.http_options.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.http_options.api_version = Some(api_version.into());
        self
    }

    /// 构建客户端。
    ///
    /// # Errors
    /// 当缺少 API Key、请求头或代理无效，或构建 HTTP 客户端失败时返回错误。
    pub fn build(self) -> Result<Client> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::InvalidConfig {
                message: "API key required for Gemini API".into(),
            })?;
        let config = ClientConfig {
            api_key,
            http_options: self.http_options,
        };
        let http = build_http_client(&config)?;
        let api_client = ApiClient::new(&config);

        Ok(Client {
            inner: Arc::new(ClientInner {
                http,
                config,
                api_client,
            }),
        })
    }
}

fn build_http_client(config: &ClientConfig) -> Result<HttpClient> {
    let options = &config.http_options;
    let mut builder = HttpClient::builder().default_headers(default_headers(config)?);
    if let Some(secs) = options.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if let Some(proxy_url) = &options.proxy {
        let proxy = Proxy::all(proxy_url).map_err(|e| Error::InvalidConfig {
            message: format!("Invalid proxy: {e}"),
        })?;
        builder = builder.proxy(proxy);
    }
    Ok(builder.build()?)
}

/// 用户自定义头在前；未自定义 `x-goog-api-key` 时追加敏感的密钥头。
fn default_headers(config: &ClientConfig) -> Result<HeaderMap> {
    let mut headers = config
        .http_options
        .headers
        .iter()
        .map(|(key, value)| -> Result<(HeaderName, HeaderValue)> {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|_| {
                Error::InvalidConfig {
                    message: format!("Invalid header name: {key}"),
                }
            })?;
            let value = HeaderValue::from_str(value).map_err(|_| Error::InvalidConfig {
                message: format!("Invalid header value for {key}"),
            })?;
            Ok((name, value))
        })
        .collect::<Result<HeaderMap>>()?;

    if let reqwest::header::Entry::Vacant(slot) =
        headers.entry(HeaderName::from_static(API_KEY_HEADER))
    {
        let mut value =
            HeaderValue::from_str(&config.api_key).map_err(|_| Error::InvalidConfig {
                message: "Invalid API key value".into(),
            })?;
        value.set_sensitive(true);
        slot.insert(value);
    }
    Ok(headers)
}

impl ClientInner {
    /// 发送请求。
    ///
    /// # Errors
    /// 当请求构建或网络请求失败时返回错误。
    pub async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let request = request.build()?;
        Ok(self.http.execute(request).await?)
    }
}

/// 解析后的请求地址前缀。
pub(crate) struct ApiClient {
    pub base_url: String,
    pub api_version: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Self {
        let options = &config.http_options;
        Self {
            base_url: normalize_base_url(options.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)),
            api_version: options
                .api_version
                .as_deref()
                .unwrap_or(DEFAULT_API_VERSION)
                .to_string(),
        }
    }
}

fn normalize_base_url(base_url: &str) -> String {
    format!("{}/", base_url.trim().trim_end_matches('/'))
}
