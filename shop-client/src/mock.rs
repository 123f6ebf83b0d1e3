//! In-memory transport
//!
//! Replies are queued per `(method, path)` and consumed in order; the last
//! reply for a route is reused once the queue drains. Every request is
//! recorded for assertions.

use async_trait::async_trait;
use http::Method;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};

use crate::transport::{ApiRequest, Transport};
use crate::{ClientError, ClientResult};

type Reply = Box<dyn Fn() -> ClientResult<Value> + Send + Sync>;

#[derive(Default)]
struct Route {
    queue: VecDeque<Reply>,
    last: Option<Reply>,
}

/// Scripted transport for tests
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(Method, String), Route>>,
    calls: Mutex<Vec<ApiRequest>>,
    token: Mutex<Option<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON reply for `method path`
    pub fn reply(&self, method: Method, path: &str, body: Value) -> &Self {
        self.push(method, path, Box::new(move || Ok(body.clone())))
    }

    /// Queue a failure for `method path`
    pub fn fail(
        &self,
        method: Method,
        path: &str,
        error: impl Fn() -> ClientError + Send + Sync + 'static,
    ) -> &Self {
        self.push(method, path, Box::new(move || Err(error())))
    }

    fn push(&self, method: Method, path: &str, reply: Reply) -> &Self {
        self.routes
            .lock()
            .entry((method, path.to_string()))
            .or_default()
            .queue
            .push_back(reply);
        self
    }

    /// Every request sent so far
    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().clone()
    }

    /// Requests sent to `method path`
    pub fn calls_to(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.method == method && c.path == path)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<Value> {
        self.calls.lock().push(request.clone());

        let mut routes = self.routes.lock();
        let Some(route) = routes.get_mut(&(request.method.clone(), request.path.clone())) else {
            return Err(ClientError::NotFound(format!(
                "no mock for {} {}",
                request.method, request.path
            )));
        };

        if let Some(reply) = route.queue.pop_front() {
            let result = reply();
            route.last = Some(reply);
            return result;
        }
        match &route.last {
            Some(reply) => reply(),
            None => Err(ClientError::NotFound(request.path)),
        }
    }

    fn set_token(&self, token: Option<String>) {
        *self.token.lock() = token;
    }

    fn token(&self) -> Option<String> {
        self.token.lock().clone()
    }
}
