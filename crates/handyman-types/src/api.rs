use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Category, Order, OrderStatus, Service, User, UserType};

// -- Envelope --

/// Response body shape used by every backend endpoint: `{ code, msg, data }`.
/// Some success paths omit `data` or the whole envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = serde_json::Value> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(code: i64, data: T) -> Self {
        Self {
            code: Some(code),
            msg: Some("success".into()),
            data: Some(data),
        }
    }

    /// Successful acknowledgement that carries no `data`.
    pub fn message(code: i64, msg: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            msg: Some(msg.into()),
            data: None,
        }
    }

    pub fn error(code: i64, msg: impl Into<String>) -> Self {
        Self::message(code, msg)
    }
}

// -- Auth --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username, email or phone.
    pub identifier: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub refresh_token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<UserType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}

// -- Profile --

/// Partial profile update; unset fields are left untouched by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_name: Option<String>,
}

// -- Catalogue --

/// Category listings arrive either as a bare array or wrapped in `{data: [...]}`
/// depending on the backend version.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CategoryList {
    Bare(Vec<Category>),
    Wrapped { data: Vec<Category> },
}

impl CategoryList {
    pub fn into_vec(self) -> Vec<Category> {
        match self {
            Self::Bare(categories) | Self::Wrapped { data: categories } => categories,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceQuery {
    pub category_id: Option<i64>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// Passed through after the known keys, e.g. a backend-specific filter.
    pub extra: Vec<(String, String)>,
}

impl ServiceQuery {
    /// Query parameters that are set, in a stable order.
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(category_id) = self.category_id {
            pairs.push(("category_id".to_string(), category_id.to_string()));
        }
        push_paging(&mut pairs, self.page, self.page_size);
        pairs.extend(self.extra.iter().cloned());
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicePage {
    pub services: Vec<Service>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

// -- Orders --

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderQuery {
    pub status: Option<OrderStatus>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub extra: Vec<(String, String)>,
}

impl OrderQuery {
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status".to_string(), status.as_str().to_string()));
        }
        push_paging(&mut pairs, self.page, self.page_size);
        pairs.extend(self.extra.iter().cloned());
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPage {
    pub orders: Vec<Order>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub service_id: i64,
    pub contact_phone: String,
    pub address: String,
    pub appointment_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

/// Minimal acknowledgement of a status change. Backends that echo the whole
/// order still deserialize into this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStatusChange {
    pub order_id: i64,
    pub status: OrderStatus,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn push_paging(pairs: &mut Vec<(String, String)>, page: Option<u32>, page_size: Option<u32>) {
    if let Some(page) = page {
        pairs.push(("page".to_string(), page.to_string()));
    }
    if let Some(page_size) = page_size {
        pairs.push(("page_size".to_string(), page_size.to_string()));
    }
}
