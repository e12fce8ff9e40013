//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for service integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};
use service::{Method, Request, Response, Service, ServiceConfig, ServiceResult, Transport};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

// ============================================================================
// MOCK TRANSPORT
// ============================================================================

struct Route {
    method: Method,
    path: String,
    replies: VecDeque<Response>,
}

#[derive(Default)]
struct MockState {
    routes: Vec<Route>,
    requests: Vec<Request>,
}

/// Transport that records every request and answers from canned routes.
///
/// A route with several replies hands them out in order and repeats the
/// last one. Unrouted requests get a 404 feed. Clones share state, so a
/// test can keep one clone while the `Service` owns another.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Rc<RefCell<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `method path` with `status` and a JSON body.
    pub fn route(&self, method: Method, path: &str, status: u16, body: Value) -> &Self {
        self.route_sequence(method, path, vec![(status, body)])
    }

    pub fn route_sequence(&self, method: Method, path: &str, replies: Vec<(u16, Value)>) -> &Self {
        let replies = replies
            .into_iter()
            .map(|(status, body)| Response {
                status,
                body: if body.is_null() { String::new() } else { body.to_string() },
            })
            .collect();
        self.state.borrow_mut().routes.push(Route {
            method,
            path: path.to_string(),
            replies,
        });
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.state.borrow().requests.clone()
    }

    pub fn last_request(&self) -> Request {
        self.state.borrow().requests.last().cloned().unwrap()
    }

    pub fn request_count(&self) -> usize {
        self.state.borrow().requests.len()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &Request) -> ServiceResult<Response> {
        let mut state = self.state.borrow_mut();
        state.requests.push(request.clone());

        let route = state
            .routes
            .iter_mut()
            .find(|r| r.method == request.method && r.path == request.path);

        Ok(match route {
            Some(route) if route.replies.len() > 1 => route.replies.pop_front().unwrap(),
            Some(route) => route.replies.front().cloned().unwrap(),
            None => Response {
                status: 404,
                body: error_feed(&format!("Not found: {}", request.path)).to_string(),
            },
        })
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

/// A service over a fresh mock transport, plus a handle on that transport.
pub fn mock_service(config: ServiceConfig) -> (Service<MockTransport>, MockTransport) {
    let transport = MockTransport::new();
    let service = Service::with_transport(config, transport.clone());
    (service, transport)
}

pub fn error_feed(text: &str) -> Value {
    json!({"messages": [{"type": "ERROR", "text": text}]})
}

pub fn feed(entries: Vec<Value>) -> Value {
    json!({"entry": entries})
}

pub const TEST_DATA_DESCRIPTION: &str = r#"{
    "modelName": "testmodel",
    "displayName": "Test Model",
    "objects": [{
        "objectName": "test_data",
        "parentName": "BaseEvent",
        "fields": [
            {"fieldName": "has_boris", "owner": "test_data", "type": "boolean"},
            {"fieldName": "hostip", "owner": "test_data", "type": "ipv4"},
            {"fieldName": "epsilon", "owner": "test_data", "type": "number"}
        ]
    }]
}"#;

/// Feed entry of the `testmodel` data model.
pub fn data_model_entry(accelerated: bool) -> Value {
    let acceleration = if accelerated {
        r#"{"enabled":true,"earliest_time":"-1mon","cron_schedule":"*/5 * * * *"}"#
    } else {
        r#"{"enabled":false}"#
    };
    json!({
        "name": "testmodel",
        "content": {
            "description": TEST_DATA_DESCRIPTION,
            "acceleration": acceleration,
            "displayName": "Test Model"
        }
    })
}

pub fn job_entry(search: &str, dispatch_state: &str, is_done: bool) -> Value {
    json!({
        "name": search,
        "content": {
            "dispatchState": dispatch_state,
            "isDone": if is_done { "1" } else { "0" },
            "sid": "1392663876.14"
        }
    })
}
