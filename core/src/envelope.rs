//! Typed views over the backend's response envelopes.
//!
//! Single-record endpoints answer `{code, msg, data}`; list endpoints answer
//! `{code, msg, rows, total}`. Transports return the raw JSON so callers that
//! only need a field or two can skip these helpers entirely.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::types::from_value;

/// Envelope code the backend uses for success.
pub const SUCCESS_CODE: i64 = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AjaxResponse<T> {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableResponse<T> {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    #[serde(default = "Vec::new")]
    pub rows: Vec<T>,
    #[serde(default)]
    pub total: u64,
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub total: u64,
}

/// Extract `data` from an `AjaxResponse`. `None` when the backend sent none,
/// which is how it answers a lookup of an unknown id.
pub fn decode_data<T: DeserializeOwned>(value: Value) -> Result<Option<T>, ApiError> {
    let envelope: AjaxResponse<T> = from_value(value)?;
    Ok(envelope.data)
}

/// Extract the rows and total from a `TableResponse`.
pub fn decode_table<T: DeserializeOwned>(value: Value) -> Result<Page<T>, ApiError> {
    let envelope: TableResponse<T> = from_value(value)?;
    Ok(Page {
        rows: envelope.rows,
        total: envelope.total,
    })
}

/// The envelope message, if the body has one.
pub fn message(value: &Value) -> Option<&str> {
    value.get("msg").and_then(Value::as_str)
}
