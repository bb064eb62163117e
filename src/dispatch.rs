//! Tool dispatch.
//!
//! One entry point per tool call: look up the operation, validate, then
//! either render a mask locally or build a payload, invoke the model, and
//! persist the decoded images. Every call owns its state; there is no
//! retry logic here beyond what the AWS SDK does internally.

use crate::bedrock::ModelInvoker;
use crate::error::{ImageGenError, Result};
use crate::mask::{self, MaskShape, MaskSpec};
use crate::models::{
    catalog, DecodedOutcome, ModelFamily, OperationSpec, OutputFormat, ToolResponse,
    ValidatedRequest,
};
use crate::output::OutputWriter;
use crate::{decode, payload, validate};
use log::{error, info, warn};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

pub struct ToolDispatcher {
    invoker: Arc<dyn ModelInvoker>,
    writer: OutputWriter,
}

impl ToolDispatcher {
    pub fn new(invoker: Arc<dyn ModelInvoker>, workspace_dir: impl AsRef<Path>) -> Self {
        ToolDispatcher {
            invoker,
            writer: OutputWriter::new(workspace_dir),
        }
    }

    /// Run one operation and fold every outcome into the uniform response
    /// envelope. Content filtering gets its own status; all other errors
    /// surface as `status: error` with the classified message.
    pub async fn dispatch(&self, operation: &str, args: &Value) -> ToolResponse {
        match self.run(operation, args).await {
            Ok(response) => response,
            Err(ImageGenError::ContentFiltered(reason)) => {
                warn!("Request filtered by content moderation: {}", reason);
                ToolResponse::filtered(reason)
            }
            Err(e) => {
                error!("Operation '{}' failed: {}", operation, e);
                ToolResponse::error(e.to_string())
            }
        }
    }

    async fn run(&self, operation: &str, args: &Value) -> Result<ToolResponse> {
        let spec = catalog::lookup(operation)
            .ok_or_else(|| ImageGenError::UnknownOperation(operation.to_string()))?;
        let req = validate::validate_operation(spec, args)?;

        if spec.family.is_local() {
            return self.render_mask(spec, &req);
        }

        let payload = payload::build(spec, &req)?;
        let result = self.invoker.invoke(&payload).await?;
        let format = response_format(spec, &req);

        match decode::decode(&result, format) {
            DecodedOutcome::Images(images) => {
                let artifacts = self
                    .writer
                    .write_all(&images, req.text("filename"), spec.filename_prefix)?;
                info!(
                    "✅ {} produced {} image(s) in {}",
                    spec.name,
                    artifacts.len(),
                    self.writer.output_dir().display()
                );
                let count = artifacts.len();
                Ok(ToolResponse::success(
                    artifacts,
                    format!("Generated {} image(s)", count),
                ))
            }
            DecodedOutcome::ContentFiltered(reason) => Err(ImageGenError::ContentFiltered(reason)),
            DecodedOutcome::ServiceError { code, message } => {
                Err(ImageGenError::service(code, message))
            }
        }
    }

    fn render_mask(&self, spec: &OperationSpec, req: &ValidatedRequest) -> Result<ToolResponse> {
        let shape = match spec.family {
            ModelFamily::MaskRectangle => MaskShape::Rectangle {
                x: req.int_or("x", 0),
                y: req.int_or("y", 0),
                width: req.int_or("mask_width", 0),
                height: req.int_or("mask_height", 0),
            },
            ModelFamily::MaskEllipse => MaskShape::Ellipse {
                center_x: req.int_or("center_x", 0),
                center_y: req.int_or("center_y", 0),
                radius_x: req.int_or("radius_x", 0),
                radius_y: req.int_or("radius_y", 0),
            },
            ModelFamily::MaskFull => MaskShape::Full,
            _ => {
                return Err(ImageGenError::Internal(format!(
                    "operation {} is not a mask renderer",
                    spec.name
                )))
            }
        };

        let canvas_width = req.int_or("width", 0) as u32;
        let canvas_height = req.int_or("height", 0) as u32;
        let mask_spec = MaskSpec {
            canvas_width,
            canvas_height,
            shape,
            feather: req.int_or("feather", 0) as u32,
        };

        let buf = mask::render(&mask_spec)?;
        let png = mask::encode_png(buf, canvas_width, canvas_height)?;
        let artifact = self
            .writer
            .write(&png, OutputFormat::Png, req.text("filename"), spec.filename_prefix)?;
        info!(
            "✅ {} wrote a {}x{} mask to {}",
            spec.name,
            canvas_width,
            canvas_height,
            artifact.path.display()
        );
        Ok(ToolResponse::success(
            vec![artifact],
            format!("Created a {}x{} mask", canvas_width, canvas_height),
        ))
    }
}

/// Persisted format for a request. Nova Canvas and background removal
/// always come back as PNG regardless of what was asked.
fn response_format(spec: &OperationSpec, req: &ValidatedRequest) -> OutputFormat {
    match spec.family {
        ModelFamily::NovaText | ModelFamily::NovaColorGuided | ModelFamily::RemoveBackground => {
            OutputFormat::Png
        }
        _ => req
            .text("output_format")
            .and_then(OutputFormat::parse)
            .unwrap_or(OutputFormat::Png),
    }
}
