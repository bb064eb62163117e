use bedrock_imagegen::{
    catalog, logger, BedrockInvoker, ImageGenConfig, ToolDispatcher,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    logger::init_with_config(logger::LoggerConfig::development())?;

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        log::info!("Usage: {} <operation> [json-arguments]", args[0]);
        log::info!("📚 Available operations:");
        for spec in catalog::OPERATIONS {
            match spec.model_id {
                Some(model_id) => log::info!("  {} → {}", spec.name, model_id),
                None => log::info!("  {} (local)", spec.name),
            }
        }
        return Ok(());
    }

    let operation = &args[1];
    let arguments: serde_json::Value = match args.get(2) {
        Some(raw) => serde_json::from_str(raw)?,
        None => serde_json::json!({}),
    };

    let config = ImageGenConfig::from_env();
    if config.region.is_none() {
        log::warn!("No AWS region environment variable set, using us-east-1");
    }
    if config.access_key.is_none() {
        log::warn!("⚠️  No AWS credentials in environment, will try default credential chain");
    }

    log::info!("🔄 Creating Bedrock client...");
    let invoker = BedrockInvoker::new(&config).await?;
    let dispatcher = ToolDispatcher::new(Arc::new(invoker), config.workspace());

    log::info!("🎨 Running operation: {}", operation);
    let response = dispatcher.dispatch(operation, &arguments).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
