use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use handyman_store::Storage;

use crate::config::ClientConfig;
use crate::error::{ClientError, NETWORK_ERROR, REQUEST_FAILED, Result};
use crate::fixtures::Fixtures;
use crate::mock::MockTransport;
use crate::orders::OrderApi;
use crate::platform::{PlatformProfile, UnsupportedPlatform};
use crate::services::ServiceApi;
use crate::session::TOKEN_KEY;
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};
use crate::user_info::UserInfo;
use crate::users::UserApi;

/// Per-call request settings.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }

    pub fn get() -> Self {
        Self::new(Method::Get)
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// Entry point to the marketplace backend.
///
/// Cheap to clone; every capability is shared behind an `Arc`.
#[derive(Clone)]
pub struct ApiClient {
    config: ClientConfig,
    storage: Arc<dyn Storage>,
    transport: Arc<dyn Transport>,
    platform: Arc<dyn PlatformProfile>,
}

impl ApiClient {
    /// When `config.use_mocks` is set the given transport only sees requests
    /// that no fixture answers.
    pub fn new(config: ClientConfig, storage: Arc<dyn Storage>, transport: Arc<dyn Transport>) -> Self {
        let transport: Arc<dyn Transport> = if config.use_mocks {
            let fixtures = Fixtures::generate(config.mock_seed, Utc::now());
            Arc::new(MockTransport::new(&config, fixtures, transport))
        } else {
            transport
        };

        Self {
            config,
            storage,
            transport,
            platform: Arc::new(UnsupportedPlatform),
        }
    }

    pub fn with_platform(mut self, platform: Arc<dyn PlatformProfile>) -> Self {
        self.platform = platform;
        self
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    pub fn platform(&self) -> &dyn PlatformProfile {
        self.platform.as_ref()
    }

    pub fn users(&self) -> UserApi<'_> {
        UserApi::new(self)
    }

    pub fn services(&self) -> ServiceApi<'_> {
        ServiceApi::new(self)
    }

    pub fn orders(&self) -> OrderApi<'_> {
        OrderApi::new(self)
    }

    pub fn user_info(&self) -> UserInfo<'_> {
        UserInfo::new(self)
    }

    /// Generic authenticated request. Resolves with `data` from the envelope
    /// when present, otherwise with the whole body.
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Value> {
        let response = self.send(path, options, true).await?;
        normalize(response)
    }

    pub async fn request_as<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T> {
        let value = self.request(path, options).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Sends without normalising the response. `authenticate` controls bearer
    /// injection; auth endpoints send only the content type.
    pub(crate) async fn send(
        &self,
        path: &str,
        options: RequestOptions,
        authenticate: bool,
    ) -> Result<HttpResponse> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        for (name, value) in options.headers {
            set_header(&mut headers, &name, value);
        }
        if authenticate {
            if let Some(token) = self.bearer_token() {
                set_header(&mut headers, "Authorization", format!("Bearer {}", token));
            }
        }

        let request = HttpRequest {
            method: options.method,
            url: self.config.url(path),
            headers,
            body: options.body,
        };

        debug!(method = %request.method, url = %request.url, "sending request");
        self.transport.send(request).await.map_err(|e| {
            let message = if e.message.is_empty() {
                NETWORK_ERROR.to_string()
            } else {
                e.message
            };
            warn!(path, error = %message, "transport failure");
            ClientError::Transport(message)
        })
    }

    fn bearer_token(&self) -> Option<String> {
        match self.storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("Failed to read cached token: {}", e);
                None
            }
        }
    }
}

/// Applies the success rules shared by every resource call.
pub fn normalize(response: HttpResponse) -> Result<Value> {
    let status = response.status;
    let success = response.is_success();
    let body = match response.body {
        Some(body) if is_present(&body) => body,
        _ => return Err(ClientError::EmptyResponse),
    };

    if !success {
        return Err(ClientError::Http {
            status,
            message: message_or(&body, REQUEST_FAILED),
        });
    }

    if let Some(code) = body.get("code").filter(|c| !c.is_null()) {
        if !is_success_code(code) {
            return Err(ClientError::Api {
                code: code.clone(),
                message: message_or(&body, REQUEST_FAILED),
            });
        }
    }

    Ok(unwrap_data(body))
}

/// Rejection for endpoints with their own success rule (login, register).
pub(crate) fn rejection(response: &HttpResponse, fallback: &str) -> ClientError {
    let body = response.body.clone().unwrap_or(Value::Null);
    let message = message_or(&body, fallback);
    if response.is_success() {
        ClientError::Api {
            code: body.get("code").cloned().unwrap_or(Value::Null),
            message,
        }
    } else {
        ClientError::Http {
            status: response.status,
            message,
        }
    }
}

/// Appends `?query` built from the set parameters; no `?` when there are none.
pub fn with_query(path: &str, pairs: &[(String, String)]) -> String {
    if pairs.is_empty() {
        return path.to_string();
    }
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    format!("{}?{}", path, query)
}

fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: String) {
    match headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
        Some(entry) => entry.1 = value,
        None => headers.push((name.to_string(), value)),
    }
}

/// Falsy values (`null`, `false`, `0`, `""`) count as absent.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn is_success_code(code: &Value) -> bool {
    matches!(code.as_i64(), Some(200) | Some(201))
}

fn message_or(body: &Value, fallback: &str) -> String {
    body.get("msg")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

fn unwrap_data(mut body: Value) -> Value {
    let has_data = body.get("data").is_some_and(is_present);
    if has_data { body["data"].take() } else { body }
}
