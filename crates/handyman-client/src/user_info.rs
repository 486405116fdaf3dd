use tracing::{debug, warn};

use handyman_types::User;

use crate::platform::{AuthSettings, PlatformError, PlatformUserInfo};
use crate::request::ApiClient;
use crate::session::USER_KEY;

/// Shown to the user in the platform's consent dialog.
pub const PROFILE_REASON: &str = "used to complete your profile";

/// Helpers around the cached user and the host platform's profile APIs.
pub struct UserInfo<'a> {
    client: &'a ApiClient,
}

impl<'a> UserInfo<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Prompts for the platform profile. Not retried.
    pub async fn get_wechat_user_info(&self) -> Result<PlatformUserInfo, PlatformError> {
        self.client
            .platform()
            .request_profile(PROFILE_REASON)
            .await
            .map_err(|e| match e {
                PlatformError::Unsupported(_) => e,
                other => PlatformError::ProfileFailed(detail(other)),
            })
    }

    /// Cached user from the last login or profile update.
    pub fn get_system_user_info(&self) -> Option<User> {
        let raw = match self.client.storage().get(USER_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read cached user: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("Cached user is malformed: {}", e);
                None
            }
        }
    }

    /// Overwrites the cached user. Failures are logged and otherwise ignored.
    pub fn update_local_user_info(&self, user: &User) {
        let raw = match serde_json::to_string(user) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to encode user: {}", e);
                return;
            }
        };
        match self.client.storage().set(USER_KEY, &raw) {
            Ok(()) => debug!(user_id = user.user_id, "Cached user updated"),
            Err(e) => warn!("Failed to cache user: {}", e),
        }
    }

    pub async fn get_user_auth_setting(&self) -> Result<AuthSettings, PlatformError> {
        self.client
            .platform()
            .auth_settings()
            .await
            .map_err(|e| match e {
                PlatformError::Unsupported(_) => e,
                other => PlatformError::SettingsFailed(detail(other)),
            })
    }

    /// `true` only when the profile scope is granted; any failure reads as `false`.
    pub async fn check_user_info_authorization(&self) -> bool {
        match self.get_user_auth_setting().await {
            Ok(settings) => settings.user_info_granted(),
            Err(e) => {
                warn!("Auth settings unavailable: {}", e);
                false
            }
        }
    }
}

fn detail(e: PlatformError) -> String {
    match e {
        PlatformError::Host(detail)
        | PlatformError::ProfileFailed(detail)
        | PlatformError::SettingsFailed(detail) => detail,
        PlatformError::Unsupported(_) => e.to_string(),
    }
}
