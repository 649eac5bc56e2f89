use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{CoreError, RpcError};

use super::NamecoinRpc;

/// A mock namecoind for testing. Records every call and answers with canned
/// results queued via the builder pattern (`null` once the queue is empty).
pub struct MockRpc {
    calls: Mutex<Vec<(String, Vec<serde_json::Value>)>>,
    responses: Mutex<VecDeque<Result<serde_json::Value, serde_json::Value>>>,
}

impl MockRpc {
    pub fn builder() -> MockRpcBuilder {
        MockRpcBuilder {
            responses: VecDeque::new(),
        }
    }

    /// Calls received so far as `(method, params)` pairs.
    pub fn calls(&self) -> Vec<(String, Vec<serde_json::Value>)> {
        self.calls.lock().expect("mock lock poisoned").clone()
    }

    pub fn last_call(&self) -> (String, Vec<serde_json::Value>) {
        self.calls()
            .pop()
            .expect("mock must have received at least one call")
    }
}

pub struct MockRpcBuilder {
    responses: VecDeque<Result<serde_json::Value, serde_json::Value>>,
}

impl MockRpcBuilder {
    pub fn with_result(mut self, result: serde_json::Value) -> Self {
        self.responses.push_back(Ok(result));
        self
    }

    pub fn with_server_error(mut self, error: serde_json::Value) -> Self {
        self.responses.push_back(Err(error));
        self
    }

    pub fn build(self) -> MockRpc {
        MockRpc {
            calls: Mutex::new(Vec::new()),
            responses: Mutex::new(self.responses),
        }
    }
}

#[async_trait]
impl NamecoinRpc for MockRpc {
    async fn call(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, CoreError> {
        self.calls
            .lock()
            .expect("mock lock poisoned")
            .push((method.to_owned(), params));

        let next = self.responses.lock().expect("mock lock poisoned").pop_front();
        match next {
            Some(Ok(result)) => Ok(result),
            Some(Err(error)) => Err(RpcError::Server(error).into()),
            None => Ok(serde_json::Value::Null),
        }
    }
}
