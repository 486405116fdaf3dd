use tracing::warn;

use handyman_store::Storage;
use handyman_types::LoginResponse;

use crate::error::Result;

pub const TOKEN_KEY: &str = "token";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_KEY: &str = "user";

/// The three values always written and cleared together.
pub const SESSION_KEYS: [&str; 3] = [TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY];

/// Persists a login. If any write fails, everything already written is
/// cleared again before the error is returned.
pub fn store_session(storage: &dyn Storage, login: &LoginResponse) -> Result<()> {
    let user = serde_json::to_string(&login.user)?;
    let writes = [
        (TOKEN_KEY, login.token.as_str()),
        (REFRESH_TOKEN_KEY, login.refresh_token.as_str()),
        (USER_KEY, user.as_str()),
    ];

    for (key, value) in writes {
        if let Err(e) = storage.set(key, value) {
            warn!(key, "Session write failed, rolling back: {}", e);
            clear_session(storage);
            return Err(e.into());
        }
    }
    Ok(())
}

/// Whether a non-empty token is cached. Read failures count as logged out.
pub fn has_session(storage: &dyn Storage) -> bool {
    storage
        .get(TOKEN_KEY)
        .is_ok_and(|token| token.is_some_and(|t| !t.is_empty()))
}

/// Best-effort removal of every session value. Failures are logged only.
pub fn clear_session(storage: &dyn Storage) {
    for key in SESSION_KEYS {
        if let Err(e) = storage.remove(key) {
            warn!(key, "Failed to clear cached value: {}", e);
        }
    }
}
