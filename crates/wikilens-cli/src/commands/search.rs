use anyhow::{Context, Result};
use wikilens_client::{Config, SearchResult, WikidataClient};

/// Search Wikidata items and print the hits.
pub async fn run_search(config: &Config, query: &str, limit: Option<u32>, json: bool) -> Result<()> {
    let client = WikidataClient::new(config)?;
    let limit = limit.unwrap_or(config.search_limit);

    let results = client
        .search_with_limit(query, limit)
        .await
        .context("Failed to search Wikidata")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print!("{}", format_results(&results));
    }

    Ok(())
}

/// Numbered, human-readable result list.
pub fn format_results(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return "No results.\n".to_string();
    }

    let mut lines = Vec::new();
    for (i, result) in results.iter().enumerate() {
        lines.push(format!("{:>3}. {} ({})", i + 1, result.label, result.id));
        if !result.description.is_empty() {
            lines.push(format!("     {}", result.description));
        }
    }
    lines.join("\n") + "\n"
}
