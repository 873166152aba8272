//! Recording stand-in for the upstream API

use crate::adapters::{RequestOptions, UpstreamApi};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: String,
    pub method: Method,
    pub body: Option<Value>,
}

enum Reply {
    Json(Value),
    Status(StatusCode, String),
}

pub struct FakeApi {
    reply: Reply,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeApi {
    pub fn replying(value: Value) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Json(value),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(status: StatusCode, body: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Status(status, body.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls mutex poisoned").len()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }
}

#[async_trait]
impl UpstreamApi for FakeApi {
    async fn send(&self, path: &str, options: RequestOptions) -> Result<Value> {
        self.calls
            .lock()
            .expect("calls mutex poisoned")
            .push(RecordedCall {
                path: path.to_string(),
                method: options.method,
                body: options.body,
            });

        match &self.reply {
            Reply::Json(value) => Ok(value.clone()),
            Reply::Status(status, body) => Err(Error::Upstream {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}
