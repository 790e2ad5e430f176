//! Query interpretation: free text → structured constraints.
//!
//! `parse` is a pure function over the configured [`Lexicon`]: no side
//! effects, deterministic for identical input. Empty or nonsensical text
//! yields an unconstrained [`ParsedQuery`], never an error; downstream
//! falls back to pure similarity ranking.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

use sift_core::{Category, ExperienceLevel, ParsedQuery};

use crate::lexicon::Lexicon;

/// Duration phrases: a number followed by a minute or hour unit word.
static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)\s*(minutes?|mins?|hours?|hrs?)\b").expect("duration regex is valid")
});

/// Extracts structured constraints from raw query text.
#[derive(Debug, Clone)]
pub struct QueryInterpreter {
    lexicon: Lexicon,
}

impl Default for QueryInterpreter {
    fn default() -> Self {
        Self::new(Lexicon::default())
    }
}

impl QueryInterpreter {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Parse raw query text into structured constraints.
    pub fn parse(&self, text: &str) -> ParsedQuery {
        let raw = text.to_string();
        let lower = text.to_lowercase();

        if lower.trim().is_empty() {
            return ParsedQuery {
                raw,
                ..ParsedQuery::default()
            };
        }

        let time_limit_minutes = parse_duration(&lower);
        let experience_level = self.parse_level(&lower);

        // Skill matches, ordered by first occurrence in the text.
        let mut skill_hits: Vec<(usize, usize)> = Vec::new(); // (position, lexicon idx)
        for (i, entry) in self.lexicon.skills.iter().enumerate() {
            let earliest = entry
                .patterns
                .iter()
                .filter_map(|p| find_stem(&lower, p))
                .min();
            if let Some(pos) = earliest {
                skill_hits.push((pos, i));
            }
        }
        skill_hits.sort_by_key(|&(pos, _)| pos);

        let mut required_skills = Vec::new();
        let mut seen_skills = HashSet::new();
        let mut hint_hits: Vec<(usize, Category)> = Vec::new();
        for &(pos, i) in &skill_hits {
            let entry = &self.lexicon.skills[i];
            if seen_skills.insert(entry.name.as_str()) {
                required_skills.push(entry.name.clone());
            }
            if let Some(category) = entry.category {
                hint_hits.push((pos, category));
            }
        }

        // Direct category phrases join the hint pool at their own positions.
        for phrase in &self.lexicon.category_phrases {
            if let Some(pos) = find_stem(&lower, &phrase.pattern) {
                hint_hits.push((pos, phrase.category));
            }
        }
        hint_hits.sort_by_key(|&(pos, _)| pos);

        let mut category_hints = Vec::new();
        let mut seen_hints = HashSet::new();
        for &(_, category) in &hint_hits {
            if seen_hints.insert(category) {
                category_hints.push(category);
            }
        }

        debug!(
            subsystem = "engine",
            component = "interpreter",
            op = "parse",
            time_limit = ?time_limit_minutes,
            level = %experience_level,
            skill_count = required_skills.len(),
            category_hints = ?category_hints,
            "Query parsed"
        );

        ParsedQuery {
            raw,
            time_limit_minutes,
            experience_level,
            required_skills,
            category_hints,
        }
    }

    /// Earliest whole-word level phrase wins; ties favor table order.
    fn parse_level(&self, lower: &str) -> ExperienceLevel {
        let mut best: Option<(usize, ExperienceLevel)> = None;
        for phrase in &self.lexicon.level_phrases {
            if let Some(pos) = find_word(lower, &phrase.pattern) {
                if best.map_or(true, |(b, _)| pos < b) {
                    best = Some((pos, phrase.level));
                }
            }
        }
        best.map_or(ExperienceLevel::Unspecified, |(_, level)| level)
    }
}

/// First positive duration phrase in the text, converted to minutes.
/// Phrases whose number does not fit `u32` are skipped, not fatal.
fn parse_duration(lower: &str) -> Option<u32> {
    for caps in DURATION_RE.captures_iter(lower) {
        let Some(value) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) else {
            continue;
        };
        if value == 0 {
            continue;
        }
        let Some(unit) = caps.get(2).map(|m| m.as_str()) else {
            continue;
        };
        let minutes = if unit.starts_with('h') {
            value.saturating_mul(60)
        } else {
            value
        };
        return Some(minutes);
    }
    None
}

/// Find `pattern` in `haystack` where it is not preceded by an alphanumeric
/// character. The right side is left open so stems match inflected forms
/// ("collaborat" → "collaborates").
fn find_stem(haystack: &str, pattern: &str) -> Option<usize> {
    for (pos, _) in haystack.match_indices(pattern) {
        let left_ok = haystack[..pos]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        if left_ok {
            return Some(pos);
        }
    }
    None
}

/// Find `pattern` in `haystack` bounded by non-alphanumerics on both sides.
/// A trailing plural "s" counts as a boundary, so "graduates" matches
/// "graduate" while "leadership" does not match "lead".
fn find_word(haystack: &str, pattern: &str) -> Option<usize> {
    for (pos, matched) in haystack.match_indices(pattern) {
        let left_ok = haystack[..pos]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let rest = &haystack[pos + matched.len()..];
        let rest = rest.strip_prefix('s').unwrap_or(rest);
        let right_ok = rest.chars().next().map_or(true, |c| !c.is_alphanumeric());
        if left_ok && right_ok {
            return Some(pos);
        }
    }
    None
}
