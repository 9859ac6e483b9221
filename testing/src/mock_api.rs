//! Scripted in-memory [`ApiClient`].

use slicekit_resource::{ApiClient, ApiFuture, ApiRequest, ApiResponse, Method, TransportError};
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// One scripted reply
#[derive(Clone, Debug)]
pub struct MockReply {
    /// What `execute` resolves to
    pub outcome: Result<ApiResponse, TransportError>,
    /// How long to wait before resolving
    pub delay: Option<Duration>,
}

impl MockReply {
    /// Reply with a JSON body
    #[must_use]
    pub const fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            outcome: Ok(ApiResponse::new(status, body)),
            delay: None,
        }
    }

    /// Reply without a body
    #[must_use]
    pub const fn empty(status: u16) -> Self {
        Self {
            outcome: Ok(ApiResponse::empty(status)),
            delay: None,
        }
    }

    /// Fail without a response
    #[must_use]
    pub fn transport_error(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(TransportError::new(message)),
            delay: None,
        }
    }

    /// Resolve only after `delay`
    #[must_use]
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

type Route = (Method, String);

#[derive(Default)]
struct Script {
    routes: HashMap<Route, VecDeque<MockReply>>,
    requests: Vec<ApiRequest>,
}

/// In-memory API client answering from a script
///
/// Replies are queued per method and path and consumed in order; the last
/// reply of a route is repeated once the queue is down to one. Unscripted
/// routes answer 404 with a failure envelope. Every request is recorded.
///
/// # Example
///
/// ```
/// use slicekit_resource::Method;
/// use slicekit_testing::{fixtures, MockApiClient, MockReply};
///
/// let client = MockApiClient::new()
///     .on(Method::Get, "/customers", MockReply::json(200, fixtures::failure("Forbidden")));
/// assert_eq!(client.request_count(), 0);
/// ```
#[derive(Default)]
pub struct MockApiClient {
    script: Mutex<Script>,
}

impl MockApiClient {
    /// Client with an empty script
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for a route
    #[must_use]
    pub fn on(self, method: Method, path: impl Into<String>, reply: MockReply) -> Self {
        self.push(method, path, reply);
        self
    }

    /// Queue a reply on a shared client
    pub fn push(&self, method: Method, path: impl Into<String>, reply: MockReply) {
        self.lock()
            .routes
            .entry((method, path.into()))
            .or_default()
            .push_back(reply);
    }

    /// Every request received so far, in order
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.lock().requests.clone()
    }

    /// Number of requests received so far
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    /// Requests received for one route
    #[must_use]
    pub fn requests_to(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .cloned()
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn reply_for(&self, request: ApiRequest) -> MockReply {
        let mut script = self.lock();
        let route = (request.method, request.path.clone());
        script.requests.push(request);

        let scripted = match script.routes.get_mut(&route) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        scripted.unwrap_or_else(|| {
            let message = format!("No reply scripted for {} {}", route.0, route.1);
            MockReply::json(404, crate::fixtures::failure(message))
        })
    }
}

impl ApiClient for MockApiClient {
    fn execute(&self, request: ApiRequest) -> ApiFuture<'_> {
        let reply = self.reply_for(request);
        Box::pin(async move {
            if let Some(delay) = reply.delay {
                tokio::time::sleep(delay).await;
            }
            reply.outcome
        })
    }
}
