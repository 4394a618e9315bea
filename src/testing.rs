//! In-memory transport for tests.
//!
//! [`MockTransport`] records every call and answers from a queue of canned
//! results. With an empty queue it answers like a server that does not know
//! the method.

use crate::error::{Error, Result};
use crate::transport::Transport;
use futures::future::BoxFuture;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::collections::VecDeque;

pub const METHOD_NOT_FOUND: i64 = -32601;

#[derive(Default)]
pub struct MockTransport {
    calls: Mutex<Vec<(String, Map<String, Value>)>>,
    responses: Mutex<VecDeque<Result<Value>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful result.
    pub fn respond(&self, result: Value) {
        self.responses.lock().push_back(Ok(result));
    }

    /// Queue a failure.
    pub fn fail(&self, error: Error) {
        self.responses.lock().push_back(Err(error));
    }

    /// Every call seen so far, as `(method, params)`.
    pub fn calls(&self) -> Vec<(String, Map<String, Value>)> {
        self.calls.lock().clone()
    }
}

impl Transport for MockTransport {
    fn call<'a>(
        &'a self,
        method: &'a str,
        params: Map<String, Value>,
    ) -> BoxFuture<'a, Result<Value>> {
        self.calls.lock().push((method.to_string(), params));
        let next = self.responses.lock().pop_front();
        let result = next.unwrap_or_else(|| {
            Err(Error::Remote {
                code: METHOD_NOT_FOUND,
                message: format!("Method not found: {}", method),
                data: None,
            })
        });
        Box::pin(futures::future::ready(result))
    }
}
