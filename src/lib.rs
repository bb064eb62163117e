//! Image generation, editing, and upscaling tools on top of AWS Bedrock.
//!
//! The crate exposes a fixed catalog of operations (Nova Canvas and
//! Stability model families plus local mask rendering), each routed
//! through validation, payload construction, model invocation, response
//! classification, and artifact persistence.

pub mod bedrock;
pub mod config;
pub mod decode;
pub mod dispatch;
pub mod error;
pub mod logger;
pub mod mask;
pub mod models;
pub mod output;
pub mod payload;
pub mod validate;

pub use bedrock::{BedrockInvoker, ModelInvoker};
pub use config::ImageGenConfig;
pub use dispatch::ToolDispatcher;
pub use error::{ImageGenError, Result};
pub use mask::{MaskShape, MaskSpec};
pub use models::{
    catalog, DecodedImage, DecodedOutcome, InvocationResult, OutputFormat, SavedArtifact,
    ToolResponse, ToolStatus,
};
pub use output::OutputWriter;
pub use payload::Payload;
