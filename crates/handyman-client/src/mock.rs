use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use handyman_types::{
    CreateOrderRequest, Envelope, LoginRequest, LoginResponse, Order, OrderPage, OrderStatus,
    OrderStatusChange, ProfileUpdate, RegisterRequest, RegisterResponse, ServicePage,
    UpdateOrderStatusRequest, User,
};

use crate::config::ClientConfig;
use crate::fixtures::{self, Fixtures};
use crate::transport::{HttpRequest, HttpResponse, Method, Transport, TransportError};

/// The only password mock logins accept.
pub const MOCK_PASSWORD: &str = "123456";

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_PAGE_SIZE: u32 = 10;

/// Serves fixture data for the known endpoints and forwards everything else.
/// Writes are answered but never persisted.
pub struct MockTransport {
    base_url: String,
    delay: Duration,
    fixtures: Fixtures,
    fallback: Arc<dyn Transport>,
}

impl MockTransport {
    pub fn new(config: &ClientConfig, fixtures: Fixtures, fallback: Arc<dyn Transport>) -> Self {
        Self {
            base_url: config.base_url.clone(),
            delay: config.mock_delay,
            fixtures,
            fallback,
        }
    }

    fn route(&self, request: &HttpRequest, path: &str, query: &str) -> Result<Option<HttpResponse>, TransportError> {
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        let params = Params::parse(query);
        let body = request.body.as_ref();
        let state = &self.fixtures;

        let response = match (request.method, segments.as_slice()) {
            (Method::Get, ["services", "categories"]) => ok(&state.categories)?,
            (Method::Get, ["services"]) => list_services(state, &params)?,
            (Method::Get, ["services", id]) => match parse_id(id).and_then(|id| state.service(id)) {
                Some(service) => ok(service)?,
                None => not_found("service not found")?,
            },
            (Method::Get, ["orders"]) => list_orders(state, &params)?,
            (Method::Get, ["orders", id]) => match parse_id(id).and_then(|id| state.order(id)) {
                Some(order) => ok(order)?,
                None => not_found("order not found")?,
            },
            (Method::Post, ["orders"]) => match decode::<CreateOrderRequest>(body) {
                Some(data) => create_order(state, data)?,
                None => bad_request()?,
            },
            (Method::Put, ["orders", id, "status"]) => match decode::<UpdateOrderStatusRequest>(body) {
                Some(data) => match parse_id(id).and_then(|id| state.order(id)) {
                    Some(order) => ok(OrderStatusChange {
                        order_id: order.order_id,
                        status: data.status,
                        updated_at: Some(Utc::now()),
                    })?,
                    None => not_found("order not found")?,
                },
                None => bad_request()?,
            },
            (Method::Post, ["users", "login"]) => match decode::<LoginRequest>(body) {
                Some(credentials) => login(credentials)?,
                None => bad_request()?,
            },
            (Method::Post, ["users", "register"]) => match decode::<RegisterRequest>(body) {
                Some(data) => register(data)?,
                None => bad_request()?,
            },
            (Method::Post, ["users", "logout"]) => reply(200, Envelope::<Value>::message(200, "logged out"))?,
            (Method::Get, ["users", "profile"]) => ok(&state.demo_user)?,
            (Method::Put, ["users", "profile"]) => match decode::<ProfileUpdate>(body) {
                Some(update) => ok(merge_profile(state.demo_user.clone(), update))?,
                None => bad_request()?,
            },
            _ => return Ok(None),
        };
        Ok(Some(response))
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let Some(rest) = request.url.strip_prefix(&self.base_url) else {
            return self.fallback.send(request).await;
        };
        let (path, query) = rest.split_once('?').unwrap_or((rest, ""));

        match self.route(&request, path, query)? {
            Some(response) => {
                debug!(method = %request.method, path, status = response.status, "mock response");
                if !self.delay.is_zero() {
                    tokio::time::sleep(self.delay).await;
                }
                Ok(response)
            }
            None => self.fallback.send(request).await,
        }
    }
}

// -- Handlers --

fn list_services(state: &Fixtures, params: &Params) -> Result<HttpResponse, TransportError> {
    let category = params.get::<i64>("category_id");
    let matching: Vec<_> = state
        .services
        .iter()
        .filter(|s| category.is_none_or(|c| s.category_id == c))
        .cloned()
        .collect();

    let (page, page_size) = params.paging();
    ok(ServicePage {
        total: matching.len() as u64,
        services: slice_page(matching, page, page_size),
        page,
        page_size,
    })
}

fn list_orders(state: &Fixtures, params: &Params) -> Result<HttpResponse, TransportError> {
    let status = params.raw("status").and_then(OrderStatus::parse);
    let matching: Vec<_> = state
        .orders
        .iter()
        .filter(|o| status.is_none_or(|s| o.status == s))
        .cloned()
        .collect();

    let (page, page_size) = params.paging();
    ok(OrderPage {
        total: matching.len() as u64,
        orders: slice_page(matching, page, page_size),
        page,
        page_size,
    })
}

fn create_order(state: &Fixtures, data: CreateOrderRequest) -> Result<HttpResponse, TransportError> {
    let Some(service) = state.service(data.service_id) else {
        return not_found("service not found");
    };

    let now = Utc::now();
    let user = &state.demo_user;
    let order = Order {
        order_id: state.orders.iter().map(|o| o.order_id).max().unwrap_or(0) + 1,
        service_id: service.service_id,
        customer_id: user.user_id,
        worker_id: None,
        service_name: service.service_name.clone(),
        customer_name: user.real_name.clone().unwrap_or_else(|| user.username.clone()),
        worker_name: None,
        contact_phone: data.contact_phone,
        address: data.address,
        appointment_time: data.appointment_time,
        status: OrderStatus::Pending,
        total_amount: service.base_price,
        paid_amount: 0.0,
        created_at: Some(now),
        updated_at: Some(now),
    };
    reply(201, Envelope::ok(201, order))
}

fn login(credentials: LoginRequest) -> Result<HttpResponse, TransportError> {
    if credentials.password != MOCK_PASSWORD {
        return reply(200, Envelope::<Value>::error(401, "wrong password"));
    }

    let now = Utc::now();
    let stamp = now.timestamp_millis();
    let mut envelope = Envelope::ok(
        200,
        LoginResponse {
            token: format!("mock-token-{}", stamp),
            refresh_token: format!("mock-refresh-token-{}", stamp),
            user: fixtures::demo_user(&credentials.identifier, now),
        },
    );
    envelope.msg = Some("login successful".into());
    reply(200, envelope)
}

fn register(data: RegisterRequest) -> Result<HttpResponse, TransportError> {
    let now = Utc::now();
    let user = User {
        user_id: now.timestamp_millis(),
        username: data.username,
        email: data.email,
        phone: data.phone,
        user_type: data.user_type.unwrap_or_default(),
        avatar_url: None,
        real_name: None,
        is_verified: false,
        balance: 0.0,
        status: "active".into(),
        created_at: Some(now),
        updated_at: Some(now),
    };
    reply(201, Envelope::ok(201, RegisterResponse { user }))
}

fn merge_profile(mut user: User, update: ProfileUpdate) -> User {
    user.email = update.email.unwrap_or(user.email);
    user.phone = update.phone.unwrap_or(user.phone);
    user.avatar_url = update.avatar_url.or(user.avatar_url);
    user.real_name = update.real_name.or(user.real_name);
    user.updated_at = Some(Utc::now());
    user
}

// -- Helpers --

struct Params(HashMap<String, String>);

impl Params {
    fn parse(query: &str) -> Self {
        Self(url::form_urlencoded::parse(query.as_bytes()).into_owned().collect())
    }

    fn raw(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    fn get<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.raw(key).and_then(|v| v.parse().ok())
    }

    fn paging(&self) -> (u32, u32) {
        let page = self.get::<u32>("page").filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE);
        let page_size = self
            .get::<u32>("page_size")
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        (page, page_size)
    }
}

fn slice_page<T>(items: Vec<T>, page: u32, page_size: u32) -> Vec<T> {
    let start = (page as usize - 1).saturating_mul(page_size as usize);
    items.into_iter().skip(start).take(page_size as usize).collect()
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

fn decode<T: DeserializeOwned>(body: Option<&Value>) -> Option<T> {
    body.and_then(|b| serde_json::from_value(b.clone()).ok())
}

fn reply<T: Serialize>(status: u16, envelope: Envelope<T>) -> Result<HttpResponse, TransportError> {
    let body = serde_json::to_value(envelope).map_err(|e| TransportError::new(e.to_string()))?;
    Ok(HttpResponse::new(status, body))
}

fn ok<T: Serialize>(data: T) -> Result<HttpResponse, TransportError> {
    reply(200, Envelope::ok(200, data))
}

fn not_found(msg: &str) -> Result<HttpResponse, TransportError> {
    reply(404, Envelope::<Value>::error(404, msg))
}

fn bad_request() -> Result<HttpResponse, TransportError> {
    reply(400, Envelope::<Value>::error(400, "invalid request body"))
}
