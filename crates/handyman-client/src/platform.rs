use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Scope that must be granted before the host hands out a user profile.
pub const USER_INFO_SCOPE: &str = "scope.userInfo";

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("current environment does not support {0}")]
    Unsupported(&'static str),
    #[error("{0}")]
    Host(String),
    #[error("failed to get user info: {0}")]
    ProfileFailed(String),
    #[error("failed to get auth settings: {0}")]
    SettingsFailed(String),
}

/// Profile as reported by the host platform, in its own field names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformUserInfo {
    pub nick_name: String,
    pub avatar_url: String,
    pub gender: u8,
    pub country: String,
    pub province: String,
    pub city: String,
    pub language: String,
}

/// Scope name -> granted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthSettings(pub HashMap<String, bool>);

impl AuthSettings {
    pub fn is_granted(&self, scope: &str) -> bool {
        self.0.get(scope).copied().unwrap_or(false)
    }

    pub fn user_info_granted(&self) -> bool {
        self.is_granted(USER_INFO_SCOPE)
    }
}

/// Host capability behind the profile prompt and the permission query.
#[async_trait]
pub trait PlatformProfile: Send + Sync {
    /// Prompts the user; `reason` is shown in the consent dialog.
    async fn request_profile(&self, reason: &str) -> Result<PlatformUserInfo, PlatformError>;

    async fn auth_settings(&self) -> Result<AuthSettings, PlatformError>;
}

/// Default for hosts without a profile API. Every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedPlatform;

#[async_trait]
impl PlatformProfile for UnsupportedPlatform {
    async fn request_profile(&self, _reason: &str) -> Result<PlatformUserInfo, PlatformError> {
        Err(PlatformError::Unsupported("WeChat user info"))
    }

    async fn auth_settings(&self) -> Result<AuthSettings, PlatformError> {
        Err(PlatformError::Unsupported("auth settings"))
    }
}
