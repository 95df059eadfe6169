use anyhow::{anyhow, Result};
use wikilens_client::{Config, WikidataClient};
use wikilens_core::NormalizedEntity;

use crate::sections::{section_rows, Section, SectionRow};

/// Fetch one entity and print it as sectioned text or pretty JSON.
pub async fn run_entity(config: &Config, id: &str, json: bool) -> Result<()> {
    let client = WikidataClient::new(config)?;

    let entity = client
        .fetch_entity(id)
        .await
        .map_err(|e| anyhow!("Failed to fetch entity data: {e}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entity)?);
    } else {
        print!("{}", render_entity(&entity, &config.language));
    }

    Ok(())
}

/// Render `entity` as plain text, one block per section.
pub fn render_entity(entity: &NormalizedEntity, lang: &str) -> String {
    let mut lines = Vec::new();

    let label = entity.preferred_label(lang).unwrap_or(&entity.id);
    lines.push(format!("{label} ({})", entity.id));
    if let Some(description) = entity.preferred_description(lang) {
        lines.push(description.to_string());
    }
    lines.push(format!("https://www.wikidata.org/wiki/{}", entity.id));

    for section in Section::ALL {
        lines.push(String::new());
        lines.push(section.title().to_string());
        lines.push("=".repeat(section.title().len()));

        let rows = section_rows(entity, section);
        if rows.is_empty() {
            lines.push(format!("  {}", section.empty_message()));
            continue;
        }

        let width = rows
            .iter()
            .filter_map(|row| match row {
                SectionRow::Entry { key, .. } => Some(key.chars().count()),
                SectionRow::Heading(_) => None,
            })
            .max()
            .unwrap_or(0);

        for row in rows {
            match row {
                SectionRow::Heading(heading) => lines.push(format!(" {heading}:")),
                SectionRow::Entry { key, value } => {
                    lines.push(format!("  {key:<width$}  {value}"));
                }
            }
        }
    }

    lines.join("\n") + "\n"
}
