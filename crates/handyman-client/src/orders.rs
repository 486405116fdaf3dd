use handyman_types::{
    CreateOrderRequest, Order, OrderPage, OrderQuery, OrderStatus, OrderStatusChange,
    UpdateOrderStatusRequest,
};

use crate::error::Result;
use crate::request::{ApiClient, RequestOptions, with_query};
use crate::transport::Method;

pub const ORDERS_PATH: &str = "/orders";

pub struct OrderApi<'a> {
    client: &'a ApiClient,
}

impl<'a> OrderApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_orders(&self, query: &OrderQuery) -> Result<OrderPage> {
        let path = with_query(ORDERS_PATH, &query.pairs());
        self.client.request_as(&path, RequestOptions::get()).await
    }

    pub async fn get_order_by_id(&self, id: i64) -> Result<Order> {
        let path = format!("{}/{}", ORDERS_PATH, id);
        self.client.request_as(&path, RequestOptions::get()).await
    }

    pub async fn create_order(&self, data: &CreateOrderRequest) -> Result<Order> {
        let options = RequestOptions::new(Method::Post).json(data)?;
        self.client.request_as(ORDERS_PATH, options).await
    }

    /// Sends the new status as-is; whether the transition is legal is the
    /// backend's call.
    pub async fn update_order_status(&self, id: i64, status: OrderStatus) -> Result<OrderStatusChange> {
        let path = format!("{}/{}/status", ORDERS_PATH, id);
        let options = RequestOptions::new(Method::Put).json(&UpdateOrderStatusRequest { status })?;
        self.client.request_as(&path, options).await
    }
}
