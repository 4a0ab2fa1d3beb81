//! Built-in executors installed for every known task type.
//!
//! `http_request` performs a real request. The others are stand-ins that
//! validate their config and describe the work they would have done.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::{json, Map, Value};
use tracing::debug;
use uuid::Uuid;

use taskflow_core::TaskType;

use crate::executor::{Executor, ExecutorError};

/// One executor per member of [`TaskType::KNOWN`].
pub fn default_executors() -> Vec<(TaskType, Arc<dyn Executor>)> {
    vec![
        entry(TaskType::HttpRequest, HttpRequestExecutor::new()),
        entry(TaskType::DatabaseQuery, DatabaseQueryExecutor),
        entry(TaskType::FileOperation, FileOperationExecutor),
        entry(TaskType::EmailSend, EmailSendExecutor),
        entry(TaskType::NotifyA, NotificationExecutor::new(TaskType::NotifyA)),
        entry(TaskType::NotifyB, NotificationExecutor::new(TaskType::NotifyB)),
        entry(TaskType::CustomScript, CustomScriptExecutor),
    ]
}

fn entry<E: Executor>(task_type: TaskType, executor: E) -> (TaskType, Arc<dyn Executor>) {
    (task_type, Arc::new(executor))
}

/// Look up `key` in the run input first, then in the task config.
fn param<'a>(config: &'a Value, input: Option<&'a Value>, key: &str) -> Option<&'a Value> {
    input
        .and_then(|i| i.get(key))
        .or_else(|| config.get(key))
}

fn param_string(config: &Value, input: Option<&Value>, key: &str) -> Option<String> {
    param(config, input, key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

fn require_string(
    config: &Value,
    input: Option<&Value>,
    key: &str,
) -> Result<String, ExecutorError> {
    param_string(config, input, key)
        .ok_or_else(|| ExecutorError::InvalidConfig(format!("missing '{key}'")))
}

fn headers_from_value(value: &Value) -> HashMap<String, String> {
    value
        .as_object()
        .map(|obj| {
            obj.iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect()
        })
        .unwrap_or_default()
}

fn header_map(headers: &HashMap<String, String>) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (k, v) in headers {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(k.as_bytes()),
            HeaderValue::from_str(v),
        ) {
            map.insert(name, value);
        }
    }
    map
}

/// Performs an HTTP request described by `url`, `method`, `headers`,
/// and `json` or `body`.
pub struct HttpRequestExecutor {
    client: reqwest::Client,
}

impl HttpRequestExecutor {
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Use a preconfigured client (proxy, TLS, default timeouts).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpRequestExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Executor for HttpRequestExecutor {
    async fn execute(&self, config: Value, input: Option<Value>) -> Result<Value, ExecutorError> {
        let input = input.as_ref();
        let url = require_string(&config, input, "url")?;
        let method =
            param_string(&config, input, "method").unwrap_or_else(|| "GET".to_string());
        let method = method
            .to_uppercase()
            .parse::<reqwest::Method>()
            .map_err(|_| ExecutorError::InvalidConfig(format!("invalid HTTP method: {method}")))?;

        let mut headers = headers_from_value(config.get("headers").unwrap_or(&Value::Null));
        if let Some(overrides) = input.and_then(|i| i.get("headers")) {
            headers.extend(headers_from_value(overrides));
        }

        debug!(method = %method, url = %url, "Sending HTTP request");

        let request = self
            .client
            .request(method, url.as_str())
            .headers(header_map(&headers));
        let request = if let Some(json_body) = param(&config, input, "json") {
            request.json(json_body)
        } else if let Some(body) = param(&config, input, "body") {
            match body.as_str() {
                Some(text) => request.body(text.to_string()),
                None => request.json(body),
            }
        } else {
            request
        };

        let response = request
            .send()
            .await
            .map_err(|e| ExecutorError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let response_headers: Map<String, Value> = response
            .headers()
            .iter()
            .filter_map(|(k, v)| {
                v.to_str()
                    .ok()
                    .map(|s| (k.to_string(), Value::String(s.to_string())))
            })
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| ExecutorError::Request(format!("failed to read response body: {e}")))?;

        Ok(json!({
            "status": status,
            "url": url,
            "headers": response_headers,
            "body": body,
        }))
    }
}

/// Stand-in for a database query. Requires `query`.
pub struct DatabaseQueryExecutor;

#[async_trait]
impl Executor for DatabaseQueryExecutor {
    async fn execute(&self, config: Value, input: Option<Value>) -> Result<Value, ExecutorError> {
        let input = input.as_ref();
        let query = require_string(&config, input, "query")?;
        let database =
            param_string(&config, input, "database").unwrap_or_else(|| "default".to_string());
        let params = param(&config, input, "params").cloned().unwrap_or(json!([]));

        Ok(json!({
            "database": database,
            "query": query,
            "params": params,
            "rows": [],
            "row_count": 0,
        }))
    }
}

/// Stand-in for a file operation. Requires `operation` and `path`.
pub struct FileOperationExecutor;

const FILE_OPERATIONS: [&str; 5] = ["read", "write", "delete", "copy", "move"];

#[async_trait]
impl Executor for FileOperationExecutor {
    async fn execute(&self, config: Value, input: Option<Value>) -> Result<Value, ExecutorError> {
        let input = input.as_ref();
        let operation = require_string(&config, input, "operation")?;
        if !FILE_OPERATIONS.contains(&operation.as_str()) {
            return Err(ExecutorError::InvalidConfig(format!(
                "unsupported file operation: {operation}"
            )));
        }
        let path = require_string(&config, input, "path")?;

        let mut result = json!({
            "operation": operation,
            "path": path,
            "success": true,
        });
        if matches!(operation.as_str(), "copy" | "move") {
            result["destination"] = json!(require_string(&config, input, "destination")?);
        }
        Ok(result)
    }
}

/// Stand-in for sending an email. Requires `to` (string or list).
pub struct EmailSendExecutor;

#[async_trait]
impl Executor for EmailSendExecutor {
    async fn execute(&self, config: Value, input: Option<Value>) -> Result<Value, ExecutorError> {
        let input = input.as_ref();
        let recipients: Vec<String> = match param(&config, input, "to") {
            Some(Value::String(to)) => vec![to.clone()],
            Some(Value::Array(list)) => list
                .iter()
                .filter_map(|v| v.as_str().map(|s| s.to_string()))
                .collect(),
            _ => Vec::new(),
        };
        if recipients.is_empty() {
            return Err(ExecutorError::InvalidConfig("missing 'to'".to_string()));
        }
        let subject = param_string(&config, input, "subject").unwrap_or_default();

        Ok(json!({
            "message_id": Uuid::new_v4().to_string(),
            "accepted": recipients,
            "subject": subject,
        }))
    }
}

/// Stand-in for a chat/notification channel. Requires `message`.
pub struct NotificationExecutor {
    channel: TaskType,
}

impl NotificationExecutor {
    pub fn new(channel: TaskType) -> Self {
        Self { channel }
    }
}

#[async_trait]
impl Executor for NotificationExecutor {
    async fn execute(&self, config: Value, input: Option<Value>) -> Result<Value, ExecutorError> {
        let input = input.as_ref();
        let message = require_string(&config, input, "message")?;
        let recipient = param_string(&config, input, "recipient");

        Ok(json!({
            "channel": self.channel.as_str(),
            "recipient": recipient,
            "message": message,
            "delivered": true,
        }))
    }
}

/// Stand-in for running a user script. Requires `script`.
pub struct CustomScriptExecutor;

#[async_trait]
impl Executor for CustomScriptExecutor {
    async fn execute(&self, config: Value, input: Option<Value>) -> Result<Value, ExecutorError> {
        let script = require_string(&config, input.as_ref(), "script")?;

        Ok(json!({
            "script": script,
            "input": input,
            "exit_code": 0,
        }))
    }
}
