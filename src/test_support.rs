// src/test_support.rs
//! Scripted collaborators shared by the unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::app::AppContext;
use crate::controllers::Confirm;
use crate::core::transport::{ApiRequest, ApiResponse, Method, Transport};
use crate::core::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::session::SessionContext;
use crate::storage::LocalStore;
use crate::types::user::AuthPayload;
use crate::types::{Job, JobStatus, Role, User};

enum Scripted {
    Reply(ApiResponse),
    Fail(String),
    Slow(Duration, ApiResponse),
}

/// Answers requests from per-route replies first, then from a FIFO queue.
/// Every request is recorded.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(String, String), VecDeque<Scripted>>>,
    queue: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_json(&self, status: u16, body: Value) {
        self.push(Scripted::Reply(reply(status, body)));
    }

    pub fn push_failure(&self, reason: &str) {
        self.push(Scripted::Fail(reason.to_string()));
    }

    pub fn push_slow(&self, delay: Duration, status: u16, body: Value) {
        self.push(Scripted::Slow(delay, reply(status, body)));
    }

    /// Reply to `method path` (path without query) with `body`, once per call.
    pub fn on(&self, method: Method, path: &str, status: u16, body: Value) {
        self.route(method, path, Scripted::Reply(reply(status, body)));
    }

    pub fn on_failure(&self, method: Method, path: &str, reason: &str) {
        self.route(method, path, Scripted::Fail(reason.to_string()));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|r| format!("{} {}", r.method.as_str(), r.path))
            .collect()
    }

    fn push(&self, scripted: Scripted) {
        self.queue.lock().unwrap().push_back(scripted);
    }

    fn route(&self, method: Method, path: &str, scripted: Scripted) {
        self.routes
            .lock()
            .unwrap()
            .entry((method.as_str().to_string(), path.to_string()))
            .or_default()
            .push_back(scripted);
    }

    fn next(&self, request: &ApiRequest) -> Option<Scripted> {
        let key = (request.method.as_str().to_string(), request.path.clone());
        let routed = self
            .routes
            .lock()
            .unwrap()
            .get_mut(&key)
            .and_then(VecDeque::pop_front);
        routed.or_else(|| self.queue.lock().unwrap().pop_front())
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        self.requests.lock().unwrap().push(request.clone());
        match self.next(&request) {
            Some(Scripted::Reply(response)) => Ok(response),
            Some(Scripted::Fail(reason)) => Err(ClientError::transport(reason)),
            Some(Scripted::Slow(delay, response)) => {
                tokio::time::sleep(delay).await;
                Ok(response)
            }
            None => Err(ClientError::transport(format!(
                "no scripted reply for {} {}",
                request.method.as_str(),
                request.path
            ))),
        }
    }
}

fn reply(status: u16, body: Value) -> ApiResponse {
    ApiResponse {
        status,
        body: body.to_string(),
    }
}

pub fn ok(data: Value) -> Value {
    json!({"success": true, "message": "", "data": data})
}

pub fn ok_message(message: &str) -> Value {
    json!({"success": true, "message": message, "data": null})
}

pub fn fail(message: &str) -> Value {
    json!({"success": false, "message": message, "data": null})
}

pub fn user(id: i64, role: Role) -> User {
    User {
        id,
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        role,
    }
}

pub fn sample_job(id: i64, status: JobStatus) -> Job {
    Job {
        id,
        title: format!("Job {}", id),
        company: "ServerSide".to_string(),
        location: "Berlin, DE".to_string(),
        salary: "$120k - $150k".to_string(),
        job_type: "FULL-TIME".to_string(),
        description: "Build services".to_string(),
        department: "Engineering".to_string(),
        requirements: "Rust, SQL".to_string(),
        status,
        applicants_count: 0,
        posted_date: "2024-01-10".to_string(),
    }
}

pub fn job_json(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Job {}", id),
        "company": "ServerSide",
        "location": "Berlin, DE",
        "salary": "$120k - $150k",
        "type": "FULL-TIME",
        "description": "Build services",
        "department": "Engineering",
        "requirements": "Rust, SQL",
        "status": status,
        "applicantsCount": 2,
        "postedDate": "2024-01-10"
    })
}

/// Session, store and client wired to a fresh mock.
pub struct Harness {
    pub mock: Arc<MockTransport>,
    pub store: LocalStore,
    pub session: SessionContext,
    pub api: ApiClient,
    pub ctx: AppContext,
}

impl Harness {
    pub fn signed_out() -> Self {
        let mock = MockTransport::new();
        let store = LocalStore::in_memory();
        let session = SessionContext::new(store.clone());
        let api = ApiClient::new(mock.clone(), session.clone());
        let ctx = AppContext::new(mock.clone(), session.clone());
        Self {
            mock,
            store,
            session,
            api,
            ctx,
        }
    }

    pub async fn signed_in(id: i64, role: Role) -> Self {
        let harness = Self::signed_out();
        harness
            .session
            .login(AuthPayload {
                token: "test-token".to_string(),
                user: user(id, role),
            })
            .await
            .unwrap();
        harness
    }
}

/// Confirmation stub that records how often it was asked.
pub struct FixedConfirm {
    answer: bool,
    pub asked: Mutex<Vec<String>>,
}

impl FixedConfirm {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            asked: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Confirm for FixedConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        self.asked.lock().unwrap().push(prompt.to_string());
        self.answer
    }
}
