//! Bedrock model invocation.

use crate::config::ImageGenConfig;
use crate::error::{ImageGenError, Result};
use crate::models::InvocationResult;
use crate::payload::Payload;
use async_trait::async_trait;
use aws_sdk_bedrockruntime::{error::ProvideErrorMetadata, primitives::Blob, Client};
use serde_json::json;

/// Seam between the dispatcher and AWS. Implementations return
/// `InvocationResult` for anything the model answered, including service
/// rejections; `Err` is reserved for transport-level failures.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    async fn invoke(&self, payload: &Payload) -> Result<InvocationResult>;
}

/// Production invoker wrapping the AWS SDK client.
#[derive(Clone)]
pub struct BedrockInvoker {
    client: Client,
}

impl BedrockInvoker {
    pub async fn new(config: &ImageGenConfig) -> Result<Self> {
        let aws_config = if let (Some(access_key), Some(secret_key)) =
            (&config.access_key, &config.secret_key)
        {
            aws_config::from_env()
                .credentials_provider(aws_sdk_bedrockruntime::config::Credentials::new(
                    access_key,
                    secret_key,
                    None,
                    None,
                    "bedrock-imagegen",
                ))
                .region(aws_sdk_bedrockruntime::config::Region::new(
                    config
                        .region
                        .clone()
                        .unwrap_or_else(|| "us-east-1".to_string()),
                ))
                .load()
                .await
        } else {
            aws_config::load_from_env().await
        };

        Ok(Self {
            client: Client::new(&aws_config),
        })
    }
}

#[async_trait]
impl ModelInvoker for BedrockInvoker {
    async fn invoke(&self, payload: &Payload) -> Result<InvocationResult> {
        let request_json = serde_json::to_string(&payload.body)?;

        log::info!("Invoking model: {}", payload.model_id);
        log::debug!("Request payload: {} bytes", request_json.len());

        let response = self
            .client
            .invoke_model()
            .model_id(payload.model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(request_json.into_bytes()))
            .send()
            .await;

        match response {
            Ok(output) => Ok(InvocationResult {
                success: true,
                status_code: 200,
                body: output.body.into_inner(),
            }),
            Err(e) => {
                log::error!("AWS SDK invocation error: {:?}", e);

                if let Some(service_error) = e.as_service_error() {
                    // Model-side rejection: hand the decoder a body it can
                    // classify instead of failing the whole call here.
                    let code = service_error.code().unwrap_or("unknown").to_string();
                    let message = service_error
                        .message()
                        .unwrap_or("no message")
                        .to_string();
                    log::error!("Service error: {} - {}", code, message);
                    let body = json!({"error": {"code": code, "message": message}});
                    Ok(InvocationResult {
                        success: false,
                        status_code: 400,
                        body: serde_json::to_vec(&body)?,
                    })
                } else {
                    Err(ImageGenError::service(
                        "Transport",
                        format!("AWS SDK error: {}", e),
                    ))
                }
            }
        }
    }
}
