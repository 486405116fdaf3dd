//! Handyman marketplace client.
//!
//! Thin data layer over the marketplace backend:
//! - request wrapper with bearer-token injection and `{code,msg,data}` normalisation
//! - user, service and order resource APIs
//! - seeded mock fixtures served by a drop-in transport
//! - cached-user and platform profile helpers
//! - date/phone/price formatting
//!
//! Host capabilities (storage, network, platform profile prompts) are traits
//! injected once at construction.

pub mod config;
pub mod error;
pub mod fixtures;
pub mod format;
pub mod mock;
pub mod orders;
pub mod platform;
pub mod request;
pub mod services;
pub mod session;
pub mod transport;
pub mod user_info;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use fixtures::Fixtures;
pub use mock::MockTransport;
pub use orders::OrderApi;
pub use platform::{AuthSettings, PlatformError, PlatformProfile, PlatformUserInfo, UnsupportedPlatform};
pub use request::{ApiClient, RequestOptions};
pub use services::ServiceApi;
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport, TransportError};
pub use user_info::UserInfo;
pub use users::UserApi;

pub use handyman_store::{MemoryStorage, SqliteStorage, Storage, StorageError};
pub use handyman_types as types;
