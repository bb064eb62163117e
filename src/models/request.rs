use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::collections::HashMap;

/// An image input resolved to raw bytes, with dimensions probed from the
/// header. Downstream code never sees whether the caller passed a path or
/// inline base64.
#[derive(Debug, Clone)]
pub struct ResolvedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl ResolvedImage {
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Re-encode as base64 for a JSON wire payload.
    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.bytes)
    }
}

#[derive(Debug, Clone)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    Float(f64),
    Image(ResolvedImage),
    Colors(Vec<String>),
}

/// Output of the validation engine: every field checked against its
/// `OperationSpec` bounds, every absent optional defaulted, every image
/// resolved to bytes. Payload builders trust this unconditionally.
#[derive(Debug, Default)]
pub struct ValidatedRequest {
    fields: HashMap<&'static str, FieldValue>,
}

impl ValidatedRequest {
    pub fn insert(&mut self, name: &'static str, value: FieldValue) {
        self.fields.insert(name, value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(FieldValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        match self.fields.get(name) {
            Some(FieldValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn float(&self, name: &str) -> Option<f64> {
        match self.fields.get(name) {
            Some(FieldValue::Float(v)) => Some(*v),
            Some(FieldValue::Int(v)) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn image(&self, name: &str) -> Option<&ResolvedImage> {
        match self.fields.get(name) {
            Some(FieldValue::Image(img)) => Some(img),
            _ => None,
        }
    }

    pub fn colors(&self, name: &str) -> Option<&[String]> {
        match self.fields.get(name) {
            Some(FieldValue::Colors(c)) => Some(c.as_slice()),
            _ => None,
        }
    }

    pub fn int_or(&self, name: &str, default: i64) -> i64 {
        self.int(name).unwrap_or(default)
    }

    pub fn float_or(&self, name: &str, default: f64) -> f64 {
        self.float(name).unwrap_or(default)
    }

    pub fn text_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.text(name).unwrap_or(default)
    }
}
