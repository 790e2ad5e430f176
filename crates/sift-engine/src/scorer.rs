//! Rule-based score adjustment and hard filtering.
//!
//! The boost is an explicit, documented scoring function rather than
//! scattered conditionals, so its monotonicity is independently testable:
//!
//! ```text
//! adjusted = similarity
//!          * (1 + skill_boost * matched_skill_count)
//!          * (category_boost if category ∈ hints else 1)
//! ```
//!
//! Both factors are ≥ 1, so the boost never demotes a candidate and never
//! reorders zero-match candidates among themselves.

use serde::{Deserialize, Serialize};
use tracing::warn;

use sift_core::{defaults, Candidate, ParsedQuery};

use crate::index::{CatalogIndex, Hit};

/// Tunable boost weights. The defaults are empirically tuned carry-overs;
/// their exact values are a tuning choice, not a correctness requirement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Per-matched-skill multiplicative increment.
    pub skill_boost: f32,
    /// Factor applied when the candidate's category is among the hints.
    pub category_boost: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            skill_boost: defaults::SKILL_BOOST,
            category_boost: defaults::CATEGORY_BOOST,
        }
    }
}

/// Converts raw similarity into adjusted relevance and applies hard filters.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    config: ScoringConfig,
}

impl Scorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Adjusted score for one candidate.
    pub fn adjust(&self, similarity: f32, matched_skills: usize, category_match: bool) -> f32 {
        let skill_factor = 1.0 + self.config.skill_boost * matched_skills as f32;
        let category_factor = if category_match {
            self.config.category_boost
        } else {
            1.0
        };
        similarity * skill_factor * category_factor
    }

    /// Score and filter retrieved hits.
    ///
    /// The time filter drops candidates whose known duration exceeds the
    /// limit; unknown durations pass (recall over precision under missing
    /// data). If the filter would drop every candidate it is relaxed for
    /// the whole request: detected up front and retried without the
    /// filter, never silently per candidate.
    ///
    /// Output is sorted by adjusted score descending, ties broken by raw
    /// similarity, then catalog insertion order.
    pub fn score(&self, hits: &[Hit], query: &ParsedQuery, index: &CatalogIndex) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = hits
            .iter()
            .map(|hit| {
                let entry = index.entry(hit.index);
                let matched_skills = query
                    .required_skills
                    .iter()
                    .filter(|s| entry.skills.binary_search(s).is_ok())
                    .count();
                let category_match = query.category_hints.contains(&entry.category);
                let filtered = match (query.time_limit_minutes, entry.duration_minutes) {
                    (Some(limit), Some(duration)) => duration > limit,
                    _ => false,
                };
                Candidate {
                    index: hit.index,
                    similarity: hit.similarity,
                    adjusted: self.adjust(hit.similarity, matched_skills, category_match),
                    filtered,
                }
            })
            .collect();

        if !candidates.is_empty() && candidates.iter().all(|c| c.filtered) {
            warn!(
                subsystem = "engine",
                component = "scorer",
                op = "score",
                time_limit = ?query.time_limit_minutes,
                candidate_count = candidates.len(),
                filter_relaxed = true,
                "Time filter excluded every candidate; relaxing it for this request"
            );
            for c in &mut candidates {
                c.filtered = false;
            }
        }

        candidates.retain(|c| !c.filtered);

        candidates.sort_by(|a, b| {
            b.adjusted
                .partial_cmp(&a.adjusted)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(
                    b.similarity
                        .partial_cmp(&a.similarity)
                        .unwrap_or(std::cmp::Ordering::Equal),
                )
                .then(a.index.cmp(&b.index))
        });

        candidates
    }
}
