//! Runs one invocation locally and prints what the function would answer.

use today_core::{respond, today, Config, HistoryClient};
use tracing_subscriber::EnvFilter;


type GenericError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[tokio::main]
async fn main() -> Result<(), GenericError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let client = HistoryClient::from_config(config)
        .inspect_err(|e| tracing::error!(error = %e, "could not build HTTP client"))
        .ok();

    let payload = respond(client.as_ref(), today()).await;

    println!("HTTP 200");
    println!("{}", serde_json::to_string_pretty(&payload)?);

    Ok(())
}
