//! Smoke test: run one query through the agent and print the answer.
//!
//! Usage: `ask [QUERY...]`. Set `RUST_LOG=distance_agent=debug` to see the
//! tool calls.

use std::sync::Arc;

use distance_agent::{agent::Agent, config::Config, maps::DistanceMatrixClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_QUERY: &str = "What's the distance between New York and Los Angeles?";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "distance_agent=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let query = if args.is_empty() {
        DEFAULT_QUERY.to_string()
    } else {
        args.join(" ")
    };

    let config = Config::from_env()?;
    let maps = Arc::new(DistanceMatrixClient::new(&config.maps));
    let agent = Agent::from_config(&config, maps);

    let result = agent.run(&query).await?;
    for entry in &result.log {
        tracing::debug!("[{:?}] {}", entry.entry_type, entry.content);
    }
    println!("{}", result.final_output);

    Ok(())
}
