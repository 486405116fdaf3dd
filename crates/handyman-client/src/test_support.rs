use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use handyman_store::MemoryStorage;

use crate::config::ClientConfig;
use crate::request::ApiClient;
use crate::transport::{HttpRequest, HttpResponse, Transport, TransportError};

/// Scripted transport: replays queued responses in order and records requests.
#[derive(Default)]
pub struct FakeTransport {
    replies: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    sent: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap().clone()
    }
}

pub trait Script {
    fn reply(self, status: u16, body: Value) -> Self;
    fn reply_empty(self, status: u16) -> Self;
    fn fail(self, message: &str) -> Self;
}

impl Script for Arc<FakeTransport> {
    fn reply(self, status: u16, body: Value) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    fn reply_empty(self, status: u16) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse { status, body: None }));
        self
    }

    fn fail(self, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(TransportError::new(message)));
        self
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sent.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("no scripted reply")))
    }
}

pub fn client_with(transport: Arc<FakeTransport>) -> (ApiClient, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let client = ApiClient::new(ClientConfig::default(), storage.clone(), transport);
    (client, storage)
}
