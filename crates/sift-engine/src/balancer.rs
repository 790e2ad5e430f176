//! Category-balanced slot allocation.
//!
//! A pure function over scored candidates: when the interpreted query spans
//! two or more categories, result slots are split across them; otherwise
//! the global adjusted-score order is returned unchanged. Categories are
//! visited in the order they first appeared as hints, so identical inputs
//! always produce identical output.

use std::collections::HashSet;

use sift_core::{Candidate, ParsedQuery};

use crate::index::CatalogIndex;

/// Allocate final result slots across required categories.
///
/// `candidates` must be sorted by adjusted score descending (the scorer's
/// output order). Returns catalog positions, deduplicated, of length
/// `min(max_results, distinct candidates)`.
///
/// With N ≥ 2 category hints: each hinted category gets up to
/// `floor(max_results / N)` of its top-scoring candidates; slots a category
/// cannot fill carry forward to a remainder pass that takes the next
/// highest-scoring unselected candidates of any category in global order.
pub fn allocate(
    candidates: &[Candidate],
    query: &ParsedQuery,
    max_results: usize,
    index: &CatalogIndex,
) -> Vec<usize> {
    let mut selected = Vec::with_capacity(max_results.min(candidates.len()));
    let mut seen: HashSet<usize> = HashSet::new();

    if query.is_multi_domain() {
        let slots_per_category = max_results / query.category_hints.len();
        for &category in &query.category_hints {
            let mut taken = 0;
            for candidate in candidates {
                if taken == slots_per_category || selected.len() == max_results {
                    break;
                }
                if index.entry(candidate.index).category == category
                    && seen.insert(candidate.index)
                {
                    selected.push(candidate.index);
                    taken += 1;
                }
            }
        }
    }

    // Remainder pass (and the whole allocation in the common single-domain
    // case): next highest-scoring unselected candidates, global order.
    for candidate in candidates {
        if selected.len() == max_results {
            break;
        }
        if seen.insert(candidate.index) {
            selected.push(candidate.index);
        }
    }

    selected
}
