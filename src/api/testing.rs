//! Recording transport for tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::Value;

use super::{ApiClient, ApiRequest, ApiResponse, Method, Transport};
use crate::error::ApiResult;
use crate::storage::{MemoryTokenStore, TokenStore};

/// Serves canned responses per route and records every request.
///
/// A route's last queued response is reused for later calls; unknown
/// routes answer 404.
#[derive(Default)]
pub struct MockTransport {
    routes: RefCell<HashMap<(Method, String), VecDeque<ApiResult<ApiResponse>>>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        let body = if body.is_null() { String::new() } else { body.to_string() };
        self.push(method, path, Ok(ApiResponse { status, body }));
    }

    pub fn fail(&self, method: Method, path: &str, err: crate::error::ApiError) {
        self.push(method, path, Err(err));
    }

    fn push(&self, method: Method, path: &str, result: ApiResult<ApiResponse>) {
        self.routes
            .borrow_mut()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(result);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let key = (request.method, request.path.clone());
        self.requests.borrow_mut().push(request);

        let mut routes = self.routes.borrow_mut();
        match routes.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_else(not_found),
            Some(queue) => queue.front().cloned().unwrap_or_else(not_found),
            None => not_found(),
        }
    }
}

fn not_found() -> ApiResult<ApiResponse> {
    Ok(ApiResponse { status: 404, body: r#"{"detail":"Not Found"}"#.to_string() })
}

/// Client wired to a fresh mock and an in-memory token store.
pub fn client(transport: &Rc<MockTransport>, token: Option<&str>) -> (ApiClient, Rc<MemoryTokenStore>) {
    let tokens = Rc::new(match token {
        Some(token) => MemoryTokenStore::with_token(token),
        None => MemoryTokenStore::new(),
    });
    let api = ApiClient::new(
        Rc::clone(transport) as Rc<dyn Transport>,
        Rc::clone(&tokens) as Rc<dyn TokenStore>,
    );
    (api, tokens)
}
