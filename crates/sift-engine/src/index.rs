//! In-memory catalog index with exact top-k cosine search.
//!
//! Catalog sizes are in the low thousands, so a brute-force scored scan is
//! exact, fast enough, and has no recall tradeoff. The index is immutable
//! after [`CatalogIndex::build`]; concurrent searches share it behind an
//! `Arc` without locking. A rebuild produces a new index that replaces the
//! old `Arc` atomically.

use tracing::debug;

use sift_core::{Assessment, Error, Result};

/// One search result: a catalog position and its cosine similarity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Insertion-order index into the catalog.
    pub index: usize,
    /// Cosine similarity in [-1, 1]; dot product of unit vectors.
    pub similarity: f32,
}

/// Immutable, query-time read-only store of catalog entries and vectors.
#[derive(Debug)]
pub struct CatalogIndex {
    entries: Vec<Assessment>,
    dimension: usize,
}

impl CatalogIndex {
    /// Build the index once from loaded catalog entries.
    ///
    /// Fails with [`Error::EmptyCatalog`] on zero entries and
    /// [`Error::DimensionMismatch`] when entry vectors disagree in
    /// dimension. Every stored vector is L2-normalized.
    pub fn build(mut entries: Vec<Assessment>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::EmptyCatalog);
        }

        let dimension = entries[0].embedding.len();
        if dimension == 0 {
            return Err(Error::Catalog(format!(
                "entry {} has no embedding vector",
                entries[0].id
            )));
        }

        for entry in &mut entries {
            if entry.embedding.len() != dimension {
                return Err(Error::DimensionMismatch {
                    expected: dimension,
                    found: entry.embedding.len(),
                    id: entry.id.clone(),
                });
            }
            l2_normalize(&mut entry.embedding).map_err(|_| {
                Error::Catalog(format!("entry {} has a zero-norm embedding", entry.id))
            })?;
        }

        debug!(
            subsystem = "engine",
            component = "index",
            op = "build",
            catalog_size = entries.len(),
            dimension,
            "Catalog index built"
        );

        Ok(Self { entries, dimension })
    }

    /// Exact top-k search by cosine similarity, descending. Ties are broken
    /// by catalog insertion order. `k` is clamped to the catalog size.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Hit>> {
        if query.len() != self.dimension {
            return Err(Error::InvalidInput(format!(
                "query vector dimension {} does not match index dimension {}",
                query.len(),
                self.dimension
            )));
        }

        let k = k.min(self.entries.len());
        let mut hits: Vec<Hit> = self
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| Hit {
                index,
                similarity: dot(query, &entry.embedding),
            })
            .collect();

        // Stable sort keeps insertion order for equal similarities.
        hits.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(k);

        Ok(hits)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Resolve a catalog position back to its entry.
    pub fn entry(&self, index: usize) -> &Assessment {
        &self.entries[index]
    }

    pub fn entries(&self) -> &[Assessment] {
        &self.entries
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Normalize a vector to unit L2 norm in place. Errors on zero vectors.
pub fn l2_normalize(v: &mut [f32]) -> std::result::Result<(), ()> {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm == 0.0 || !norm.is_finite() {
        return Err(());
    }
    // Already-normalized input stays byte-identical within tolerance.
    if (norm - 1.0).abs() > sift_core::defaults::UNIT_NORM_EPSILON {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
    Ok(())
}
