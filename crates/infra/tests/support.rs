#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ledgerlink_core::{
    AuthContext, ExecutionHost, PrimitiveError, PrimitiveRequest, PrimitiveResponse,
    RequestPrimitive,
};
use ledgerlink_domain::{HttpConfig, OperationRequest};
use ledgerlink_infra::HttpApiSender;
use serde_json::Value;

/// Host serving per-item parameters from memory.
#[derive(Default)]
pub struct RecordingHost {
    params: HashMap<(usize, String), Value>,
    continue_on_fail: bool,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn continuing(mut self) -> Self {
        self.continue_on_fail = true;
        self
    }

    /// Set a parameter for one item.
    pub fn param(mut self, item_index: usize, name: &str, value: Value) -> Self {
        self.params.insert((item_index, name.to_string()), value);
        self
    }
}

impl ExecutionHost for RecordingHost {
    fn parameter(&self, name: &str, item_index: usize) -> Option<Value> {
        self.params.get(&(item_index, name.to_string())).cloned()
    }

    fn continue_on_fail(&self) -> bool {
        self.continue_on_fail
    }
}

type PrimitiveOutcome = Result<PrimitiveResponse, PrimitiveError>;

/// In-memory request primitive replaying scripted outcomes.
#[derive(Default)]
pub struct ScriptedPrimitive {
    outcomes: Mutex<VecDeque<PrimitiveOutcome>>,
    requests: Mutex<Vec<PrimitiveRequest>>,
}

impl ScriptedPrimitive {
    pub fn new(outcomes: Vec<PrimitiveOutcome>) -> Arc<Self> {
        Arc::new(Self { outcomes: Mutex::new(outcomes.into()), requests: Mutex::default() })
    }

    pub fn requests(&self) -> Vec<PrimitiveRequest> {
        self.requests.lock().expect("requests mutex poisoned").clone()
    }
}

#[async_trait]
impl RequestPrimitive for ScriptedPrimitive {
    async fn request(&self, options: PrimitiveRequest) -> PrimitiveOutcome {
        self.requests.lock().expect("requests mutex poisoned").push(options);
        self.outcomes
            .lock()
            .expect("outcomes mutex poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(PrimitiveError::new("no scripted outcome left")))
    }
}

pub const TOKEN: &str = "test-token";
pub const TENANT: &str = "455148";

pub fn auth_for(host: &str) -> AuthContext {
    AuthContext::new(host, TOKEN, TENANT)
}

pub fn sender() -> Arc<HttpApiSender> {
    Arc::new(HttpApiSender::new(HttpConfig::default()).expect("sender should build"))
}

pub fn item(resource: &str, operation: &str, index: usize) -> OperationRequest {
    OperationRequest::new(resource, operation, index)
}

pub fn as_values(records: Vec<serde_json::Map<String, Value>>) -> Vec<Value> {
    records.into_iter().map(Value::Object).collect()
}
