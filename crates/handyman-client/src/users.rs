use serde_json::Value;
use tracing::{info, warn};

use handyman_types::{
    LoginRequest, LoginResponse, LogoutRequest, ProfileUpdate, RegisterRequest, RegisterResponse,
    User,
};

use crate::error::{ClientError, LOGIN_FAILED, REGISTER_FAILED, Result};
use crate::request::{ApiClient, RequestOptions, rejection};
use crate::session::{self, REFRESH_TOKEN_KEY};
use crate::transport::Method;

pub const LOGIN_PATH: &str = "/users/login";
pub const REGISTER_PATH: &str = "/users/register";
pub const LOGOUT_PATH: &str = "/users/logout";
pub const PROFILE_PATH: &str = "/users/profile";

pub struct UserApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UserApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Authenticates and caches token, refresh token and user together.
    /// Success requires a 2xx status and `code == 200`.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse> {
        let options = RequestOptions::new(Method::Post).json(credentials)?;
        let response = self.client.send(LOGIN_PATH, options, false).await?;

        let code = response
            .body
            .as_ref()
            .and_then(|b| b.get("code"))
            .and_then(Value::as_i64);
        if !response.is_success() || code != Some(200) {
            return Err(rejection(&response, LOGIN_FAILED));
        }

        let data = response
            .body
            .and_then(|mut b| b.get_mut("data").map(Value::take))
            .unwrap_or(Value::Null);
        let login: LoginResponse = serde_json::from_value(data)?;

        session::store_session(self.client.storage(), &login)?;
        info!(user_id = login.user.user_id, "Logged in as {}", login.user.username);
        Ok(login)
    }

    /// Creates an account. Only a 201 status counts as success.
    pub async fn register(&self, data: &RegisterRequest) -> Result<RegisterResponse> {
        let options = RequestOptions::new(Method::Post).json(data)?;
        let response = self.client.send(REGISTER_PATH, options, false).await?;

        if response.status != 201 {
            return Err(rejection(&response, REGISTER_FAILED));
        }

        let body = response.body.ok_or(ClientError::EmptyResponse)?;
        let data = body.get("data").cloned().unwrap_or(Value::Null);
        Ok(serde_json::from_value(data)?)
    }

    /// Clears the cached session, then tells the backend. Never fails: the
    /// server's answer is logged and otherwise ignored.
    pub async fn logout(&self) {
        let storage = self.client.storage();
        let refresh_token = match storage.get(REFRESH_TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                warn!("Failed to read refresh token: {}", e);
                None
            }
        };

        session::clear_session(storage);

        let body = LogoutRequest { refresh_token };
        let options = match RequestOptions::new(Method::Post).json(&body) {
            Ok(options) => options,
            Err(e) => {
                warn!("Failed to encode logout request: {}", e);
                return;
            }
        };

        match self.client.send(LOGOUT_PATH, options, false).await {
            Ok(response) => info!(status = response.status, "Logged out"),
            Err(e) => warn!("Logout request failed, session already cleared: {}", e),
        }
    }

    pub async fn get_user_info(&self) -> Result<User> {
        self.client.request_as(PROFILE_PATH, RequestOptions::get()).await
    }

    pub async fn update_user_info(&self, update: &ProfileUpdate) -> Result<User> {
        let options = RequestOptions::new(Method::Put).json(update)?;
        self.client.request_as(PROFILE_PATH, options).await
    }
}
