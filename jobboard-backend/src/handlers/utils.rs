use std::collections::HashMap;

use axum::body::Bytes;
use axum::http::{header, HeaderMap};
use axum::Json;
use serde_json::Value;

use crate::error::ApiError;

/// Raw `{id}` path segment. Format checks happen in the service.
pub fn job_id(path: &HashMap<String, String>) -> Result<&str, ApiError> {
    path.get("id").map(String::as_str).ok_or(ApiError::NotFound)
}

/// Decode a request body as JSON. An empty body is `Null`; a body without a
/// `Content-Type` is still parsed, any other content type is rejected.
pub fn json_body(headers: &HeaderMap, body: &Bytes) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    if let Some(content_type) = headers.get(header::CONTENT_TYPE) {
        let essence = content_type
            .to_str()
            .unwrap_or_default()
            .split(';')
            .next()
            .unwrap_or_default()
            .trim();
        if !(essence.eq_ignore_ascii_case("application/json") || essence.ends_with("+json")) {
            return Err(ApiError::validation(
                "body",
                "Expected request with `Content-Type: application/json`",
            ));
        }
    }
    let Json(value) = Json::<Value>::from_bytes(body)?;
    Ok(value)
}
