use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use studio_logging::{studio_debug, studio_warn};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::{ApiConfig, ApiError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Payload {
    #[default]
    Empty,
    Json(Value),
    /// Sent as a multipart form under the field `file`.
    File(UploadFile),
}

/// One request against the API, relative to `base_url + api_prefix`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiCall {
    pub method: HttpMethod,
    pub endpoint: String,
    pub query: Vec<(&'static str, String)>,
    pub payload: Payload,
    /// Overrides `ApiConfig::timeout` for this call.
    pub timeout: Option<Duration>,
}

impl ApiCall {
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            query: Vec::new(),
            payload: Payload::Empty,
            timeout: None,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, endpoint)
    }

    /// Appends `key=value` when `value` is present.
    pub fn with_query(mut self, key: &'static str, value: Option<impl ToString>) -> Self {
        if let Some(value) = value {
            self.query.push((key, value.to_string()));
        }
        self
    }

    pub fn with_json<B: Serialize>(mut self, body: &B) -> Result<Self, ApiError> {
        let value =
            serde_json::to_value(body).map_err(|err| ApiError::Parse(err.to_string()))?;
        self.payload = Payload::Json(value);
        Ok(self)
    }

    pub fn with_file(mut self, file: UploadFile) -> Self {
        self.payload = Payload::File(file);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Status and body as they came off the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Performs the network exchange only. Status handling, decoding, timeouts
/// and cancellation live in [`HttpClient`].
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, url: Url, call: &ApiCall) -> Result<RawResponse, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        // Admin endpoints authenticate with the session cookie set at login.
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .cookie_store(true)
            .build()
            .map_err(map_reqwest_error)?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, url: Url, call: &ApiCall) -> Result<RawResponse, ApiError> {
        let method = match call.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };
        let mut request = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");
        request = match &call.payload {
            Payload::Empty => request,
            Payload::Json(value) => request
                .header(CONTENT_TYPE, "application/json")
                .body(value.to_string()),
            Payload::File(file) => {
                let part = Part::bytes(file.bytes.clone())
                    .file_name(file.file_name.clone())
                    .mime_str(&file.mime)
                    .map_err(map_reqwest_error)?;
                request.multipart(Form::new().part("file", part))
            }
        };

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout;
    }
    ApiError::Network(err.to_string())
}

/// Typed JSON calls with error normalization.
///
/// No retries happen here; retrying is the caller's decision.
pub struct HttpClient<T: Transport = ReqwestTransport> {
    config: ApiConfig,
    transport: T,
}

impl HttpClient<ReqwestTransport> {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self { config, transport })
    }
}

impl<T: Transport> HttpClient<T> {
    pub fn with_transport(config: ApiConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub async fn send<R: DeserializeOwned>(&self, call: ApiCall) -> Result<R, ApiError> {
        self.send_cancellable(call, &CancellationToken::new()).await
    }

    /// Run `call`, giving up with [`ApiError::Cancelled`] once `cancel` fires
    /// or [`ApiError::Timeout`] once the deadline passes.
    ///
    /// A 204 decodes as JSON `null`, so callers expecting no body ask for
    /// `()` or an `Option`.
    pub async fn send_cancellable<R: DeserializeOwned>(
        &self,
        call: ApiCall,
        cancel: &CancellationToken,
    ) -> Result<R, ApiError> {
        let method = call.method.as_str();
        let url = self.config.endpoint_url(&call.endpoint, &call.query)?;
        let deadline = call.timeout.unwrap_or(self.config.timeout);
        studio_debug!("{} {}", method, url);

        let exchange = tokio::time::timeout(deadline, self.transport.execute(url, &call));
        let response = tokio::select! {
            _ = cancel.cancelled() => Err(ApiError::Cancelled),
            outcome = exchange => outcome.unwrap_or(Err(ApiError::Timeout)),
        };
        let outcome = response.and_then(|response| {
            studio_debug!("{} {} -> {}", method, call.endpoint, response.status);
            decode(response)
        });
        if let Err(err) = &outcome {
            studio_warn!("{} {} failed: {:?}", method, call.endpoint, err);
        }
        outcome
    }
}

fn decode<R: DeserializeOwned>(response: RawResponse) -> Result<R, ApiError> {
    if !(200..=299).contains(&response.status) {
        return Err(http_error(response));
    }
    if response.status == 204 {
        return serde_json::from_value(Value::Null).map_err(|err| ApiError::Parse(err.to_string()));
    }
    serde_json::from_slice(&response.body).map_err(|err| ApiError::Parse(err.to_string()))
}

/// Structured detail when the body is JSON, raw text otherwise.
fn http_error(response: RawResponse) -> ApiError {
    let (detail, body) = match serde_json::from_slice::<Value>(&response.body) {
        Ok(value) => (
            value
                .get("detail")
                .and_then(Value::as_str)
                .map(str::to_string),
            Some(value),
        ),
        Err(_) => {
            let text = String::from_utf8_lossy(&response.body).into_owned();
            (None, (!text.is_empty()).then_some(Value::String(text)))
        }
    };
    ApiError::Http {
        status: response.status,
        detail,
        body,
    }
}
