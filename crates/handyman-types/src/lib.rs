//! Handyman shared records.
//!
//! Plain data passed across the client boundary. Nothing here owns state or
//! enforces business rules; the backend is the source of truth.

pub mod api;
pub mod models;

pub use api::{
    CategoryList, CreateOrderRequest, Envelope, LoginRequest, LoginResponse, LogoutRequest,
    OrderPage, OrderQuery, OrderStatusChange, ProfileUpdate, RegisterRequest, RegisterResponse,
    ServicePage, ServiceQuery, UpdateOrderStatusRequest,
};
pub use models::{Category, Order, OrderStatus, Service, User, UserType};
