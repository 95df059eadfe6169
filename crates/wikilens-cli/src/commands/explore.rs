use anyhow::Result;
use wikilens_client::{Config, WikidataClient};

/// Open the interactive explorer on the results of `query`.
pub async fn run_explore(config: &Config, query: &str) -> Result<()> {
    let client = WikidataClient::new(config)?;
    crate::tui::run_tui(client, query).await
}
