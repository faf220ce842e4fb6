use super::{qualify, JSONRPC_VERSION};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// An outgoing JSON-RPC request
///
/// Built once per dispatch; the id is a fresh v4 UUID so it cannot collide
/// with any call still awaiting its response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestEnvelope {
    jsonrpc: &'static str,
    method: String,
    id: String,
    params: Vec<Value>,
}

impl RequestEnvelope {
    /// Build a request for an unprefixed aria2 method
    ///
    /// When a token is configured it becomes the first positional parameter,
    /// ahead of the caller's parameters.
    pub fn new(method: &str, params: Option<Vec<Value>>, token: Option<&str>) -> Self {
        let caller_params = params.unwrap_or_default();
        let mut all_params = Vec::with_capacity(caller_params.len() + 1);
        if let Some(token) = token {
            all_params.push(Value::String(format!("token:{}", token)));
        }
        all_params.extend(caller_params);

        Self {
            jsonrpc: JSONRPC_VERSION,
            method: qualify(method),
            id: Uuid::new_v4().to_string(),
            params: all_params,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Fully-qualified method name
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Serialize to a text frame
    pub fn to_frame(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Any frame received from aria2
///
/// Every field is optional; which ones are present decides the route.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundFrame {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub params: Option<Value>,
}

impl InboundFrame {
    /// Parse a text frame into its routing fields
    ///
    /// Valid JSON that is not an object yields `None`. Invalid JSON, or an
    /// object whose fields have the wrong types, is an error.
    pub fn parse(text: &str) -> serde_json::Result<Option<Self>> {
        let value: Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Ok(None);
        }
        serde_json::from_value(value).map(Some)
    }

    /// The id as a string, accepting numeric ids as well
    pub fn correlation_id(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }
}
