use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Image formats the Stability models can emit. Nova Canvas always
/// returns PNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Jpeg,
    Png,
    Webp,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
            OutputFormat::Webp => "webp",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::Webp => "webp",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "jpeg" => Some(OutputFormat::Jpeg),
            "png" => Some(OutputFormat::Png),
            "webp" => Some(OutputFormat::Webp),
            _ => None,
        }
    }
}

/// Raw result of one remote invocation. Opaque beyond the success flag,
/// an HTTP-style status code, and the body bytes; the decoder owns all
/// interpretation.
#[derive(Debug, Clone)]
pub struct InvocationResult {
    pub success: bool,
    pub status_code: u16,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub bytes: Vec<u8>,
    pub format: OutputFormat,
}

/// Classified outcome of decoding a remote response. Content filtering is
/// an expected moderation result, kept separate from service failures.
#[derive(Debug)]
pub enum DecodedOutcome {
    Images(Vec<DecodedImage>),
    ContentFiltered(String),
    ServiceError { code: String, message: String },
}

/// One image persisted to the workspace.
#[derive(Debug, Clone, Serialize)]
pub struct SavedArtifact {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolStatus {
    Success,
    Filtered,
    Error,
}

/// Uniform envelope returned for every tool call.
#[derive(Debug, Clone, Serialize)]
pub struct ToolResponse {
    pub status: ToolStatus,
    pub artifacts: Vec<SavedArtifact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ToolResponse {
    pub fn success(artifacts: Vec<SavedArtifact>, message: impl Into<String>) -> Self {
        ToolResponse {
            status: ToolStatus::Success,
            artifacts,
            message: Some(message.into()),
        }
    }

    pub fn filtered(reason: impl Into<String>) -> Self {
        ToolResponse {
            status: ToolStatus::Filtered,
            artifacts: Vec::new(),
            message: Some(reason.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ToolResponse {
            status: ToolStatus::Error,
            artifacts: Vec::new(),
            message: Some(message.into()),
        }
    }
}
