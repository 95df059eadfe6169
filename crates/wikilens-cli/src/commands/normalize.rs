use std::path::Path;

use anyhow::{Context, Result};
use wikilens_core::{normalize_entity_json, NormalizedEntity};

/// Normalize a saved entity document and print it as pretty JSON.
pub fn run_normalize(file: &Path, id: Option<&str>) -> Result<()> {
    let entity = normalize_file(file, id)?;
    println!("{}", serde_json::to_string_pretty(&entity)?);
    Ok(())
}

/// Read and normalize an entity document from disk.
///
/// Accepts either a `Special:EntityData` document (`{"entities": {...}}`) or
/// a bare entity object. `id` picks the entity when the document holds
/// several.
pub fn normalize_file(file: &Path, id: Option<&str>) -> Result<NormalizedEntity> {
    let contents = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let entity = normalize_entity_json(&contents, id)
        .with_context(|| format!("Failed to normalize {}", file.display()))?;

    log::debug!(
        "Normalized {} from {} ({} claims)",
        entity.id,
        file.display(),
        entity.properties.len()
    );
    Ok(entity)
}
