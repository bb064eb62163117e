//! Response decoding and outcome classification.
//!
//! Pure bytes-to-outcome translation: no I/O, no logging side effects.
//! Content moderation is classified separately from service failures so
//! callers can surface it as an expected result rather than a defect.

use crate::models::{DecodedImage, DecodedOutcome, InvocationResult, OutputFormat};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::Value;

/// Classify a raw invocation result. `format` is what the request asked
/// for and tags the decoded bytes for persistence.
pub fn decode(result: &InvocationResult, format: OutputFormat) -> DecodedOutcome {
    let body: Value = match serde_json::from_slice(&result.body) {
        Ok(v) => v,
        Err(e) => {
            return DecodedOutcome::ServiceError {
                code: status_code_label(result.status_code),
                message: format!("response body is not valid JSON: {}", e),
            }
        }
    };

    if !result.success {
        return service_error_from(&body, result.status_code);
    }

    // Nova and Stability both report moderation through finish_reasons;
    // any non-null entry means the request was rejected, not failed.
    if let Some(reason) = filtered_reason(&body) {
        return DecodedOutcome::ContentFiltered(reason);
    }

    if let Some(err) = body.get("error").filter(|e| !e.is_null()) {
        return service_error_from_value(err, result.status_code);
    }

    let entries = match body.get("images").and_then(Value::as_array) {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            return DecodedOutcome::ServiceError {
                code: "EmptyResponse".to_string(),
                message: "model returned a success status with no images".to_string(),
            }
        }
    };

    let mut images = Vec::with_capacity(entries.len());
    for entry in entries {
        let encoded = match entry.as_str() {
            Some(s) => s,
            None => {
                return DecodedOutcome::ServiceError {
                    code: "MalformedResponse".to_string(),
                    message: "images array contains a non-string entry".to_string(),
                }
            }
        };
        match BASE64.decode(encoded) {
            Ok(bytes) => images.push(DecodedImage { bytes, format }),
            Err(e) => {
                return DecodedOutcome::ServiceError {
                    code: "MalformedResponse".to_string(),
                    message: format!("image entry is not valid base64: {}", e),
                }
            }
        }
    }
    DecodedOutcome::Images(images)
}

fn filtered_reason(body: &Value) -> Option<String> {
    let reasons = body.get("finish_reasons")?.as_array()?;
    reasons
        .iter()
        .find(|r| !r.is_null())
        .map(|r| r.as_str().map(str::to_string).unwrap_or_else(|| r.to_string()))
}

fn service_error_from(body: &Value, status_code: u16) -> DecodedOutcome {
    match body.get("error").filter(|e| !e.is_null()) {
        Some(err) => service_error_from_value(err, status_code),
        None => DecodedOutcome::ServiceError {
            code: status_code_label(status_code),
            message: body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("model invocation failed")
                .to_string(),
        },
    }
}

fn service_error_from_value(err: &Value, status_code: u16) -> DecodedOutcome {
    // Either {"error": {"code", "message"}} or {"error": "text"}.
    if let Some(text) = err.as_str() {
        return DecodedOutcome::ServiceError {
            code: status_code_label(status_code),
            message: text.to_string(),
        };
    }
    DecodedOutcome::ServiceError {
        code: err
            .get("code")
            .and_then(Value::as_str)
            .unwrap_or("ServiceError")
            .to_string(),
        message: err
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("model invocation failed")
            .to_string(),
    }
}

fn status_code_label(status_code: u16) -> String {
    format!("Http{}", status_code)
}
