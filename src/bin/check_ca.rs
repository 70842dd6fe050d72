//! One GET against the events API with the configured trust roots, to check
//! that a custom CA bundle is picked up.

use today_core::client::client_builder;
use today_core::Config;
use tracing_subscriber::EnvFilter;


type GenericError = Box<dyn std::error::Error + Send + Sync + 'static>;

const SNIPPET_LEN: usize = 200;

#[tokio::main]
async fn main() -> Result<(), GenericError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    // Any fixed day will do.
    let url = config.events_url(12, 12);
    let timeout = config.events_timeout;

    let client = client_builder(&config)?.timeout(timeout).build()?;

    let res = match client.get(&url).send().await {
        Ok(res) => res,
        Err(e) => {
            eprintln!("HTTPS request failed: {e}");
            return Err(e.into());
        }
    };

    let status = res.status();
    println!("Status Code: {}", status.as_u16());
    if status.is_success() {
        println!("HTTPS request succeeded using the configured trust roots");
    } else {
        println!("Unexpected status code: {}", status.as_u16());
    }

    let body = res.text().await?;
    let snippet: String = body.chars().take(SNIPPET_LEN).collect();
    println!("Response snippet: {snippet} ...");

    Ok(())
}
