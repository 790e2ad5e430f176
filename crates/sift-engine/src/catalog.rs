//! Catalog acquisition boundary: parse the catalog source artifact and turn
//! it into index-ready [`Assessment`] entries.
//!
//! The source is a JSON array of records. Records may carry a precomputed
//! embedding; records without one are vectorized at load time through the
//! injected [`EmbeddingBackend`] using the composed document text
//! `"{name} {description} {skills}"`.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use sift_core::{normalize_skills, Assessment, Category, EmbeddingBackend, Error, Result, Vector};

/// One record of the catalog source artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogRecord {
    /// Unique identifier. Defaults to a slug of the name when absent.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    /// Full category name or the one-letter code used by older exports.
    #[serde(alias = "test_type")]
    pub category: Category,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub skills: Vec<String>,
    /// Precomputed embedding; absent records are embedded at load time.
    #[serde(default)]
    pub embedding: Option<Vector>,
}

/// Parse the catalog source artifact.
pub fn parse_catalog(json: &str) -> Result<Vec<CatalogRecord>> {
    let records: Vec<CatalogRecord> = serde_json::from_str(json)?;
    Ok(records)
}

/// Lowercase, hyphen-separated slug of a display name.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_sep = true;
    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
            last_was_sep = false;
        } else if !last_was_sep {
            slug.push('-');
            last_was_sep = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Turn parsed records into index-ready assessments, embedding any record
/// that lacks a precomputed vector.
pub async fn records_to_assessments(
    records: Vec<CatalogRecord>,
    backend: &dyn EmbeddingBackend,
) -> Result<Vec<Assessment>> {
    let mut assessments = Vec::with_capacity(records.len());
    let mut seen_ids = HashSet::new();
    let mut pending: Vec<usize> = Vec::new();

    for record in records {
        let id = match record.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => slugify(&record.name),
        };
        if id.is_empty() {
            return Err(Error::Catalog(format!(
                "record {:?} has neither id nor a sluggable name",
                record.name
            )));
        }
        if !seen_ids.insert(id.clone()) {
            return Err(Error::Catalog(format!("duplicate catalog id: {}", id)));
        }

        let has_embedding = record.embedding.as_ref().map_or(false, |v| !v.is_empty());
        if !has_embedding {
            pending.push(assessments.len());
        }

        assessments.push(Assessment {
            id,
            name: record.name,
            url: record.url,
            description: record.description,
            category: record.category,
            duration_minutes: record.duration_minutes,
            skills: normalize_skills(&record.skills),
            embedding: record.embedding.unwrap_or_default(),
        });
    }

    if !pending.is_empty() {
        debug!(
            subsystem = "engine",
            component = "catalog",
            op = "embed_records",
            input_count = pending.len(),
            model = backend.model_name(),
            "Embedding catalog records without precomputed vectors"
        );
        let texts: Vec<String> = pending
            .iter()
            .map(|&i| assessments[i].document_text())
            .collect();
        let vectors = backend.embed_texts(&texts).await?;
        if vectors.len() != texts.len() {
            return Err(Error::Embedding(format!(
                "backend returned {} vectors for {} texts",
                vectors.len(),
                texts.len()
            )));
        }
        for (&i, vector) in pending.iter().zip(vectors) {
            assessments[i].embedding = vector;
        }
    }

    Ok(assessments)
}

/// Load and vectorize the catalog from a JSON file.
pub async fn load_catalog(
    path: &Path,
    backend: &dyn EmbeddingBackend,
) -> Result<Vec<Assessment>> {
    let json = std::fs::read_to_string(path)?;
    let records = parse_catalog(&json)?;
    let assessments = records_to_assessments(records, backend).await?;
    info!(
        subsystem = "engine",
        component = "catalog",
        op = "load",
        catalog_size = assessments.len(),
        path = %path.display(),
        "Catalog loaded"
    );
    Ok(assessments)
}
