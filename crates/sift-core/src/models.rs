//! Core data models for the sift recommendation pipeline.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Embedding vector type shared across crates.
pub type Vector = Vec<f32>;

// =============================================================================
// CATEGORY
// =============================================================================

/// Assessment category (test type). Closed set.
///
/// Serializes as the lowercase full name. Parsing additionally accepts the
/// one-letter catalog codes (`K`/`P`/`C`) used by the catalog source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Knowledge & skills tests (technical, tooling)
    Knowledge,
    /// Personality & behavior questionnaires
    Personality,
    /// Cognitive ability / reasoning tests
    Cognitive,
}

impl Category {
    /// One-letter code used by the catalog source artifact.
    pub fn code(&self) -> char {
        match self {
            Self::Knowledge => 'K',
            Self::Personality => 'P',
            Self::Cognitive => 'C',
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Knowledge => write!(f, "knowledge"),
            Self::Personality => write!(f, "personality"),
            Self::Cognitive => write!(f, "cognitive"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "k" | "knowledge" => Ok(Self::Knowledge),
            "p" | "personality" => Ok(Self::Personality),
            "c" | "cognitive" => Ok(Self::Cognitive),
            _ => Err(format!("Invalid category: {}", s)),
        }
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// EXPERIENCE LEVEL
// =============================================================================

/// Experience level extracted from a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    Graduate,
    Senior,
    #[default]
    Unspecified,
}

impl std::fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Entry => write!(f, "entry"),
            Self::Graduate => write!(f, "graduate"),
            Self::Senior => write!(f, "senior"),
            Self::Unspecified => write!(f, "unspecified"),
        }
    }
}

// =============================================================================
// ASSESSMENT (CATALOG ENTRY)
// =============================================================================

/// One item in the recommendable catalog. Immutable after index build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    /// Unique identifier within the catalog.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Source URL of the assessment.
    pub url: String,
    /// Description text (also part of the embedded document).
    pub description: String,
    /// Assessment category.
    pub category: Category,
    /// Duration in minutes. `None` when the source did not state one.
    pub duration_minutes: Option<u32>,
    /// Skill tags, lower-cased, sorted, and deduplicated
    /// (see [`normalize_skills`]).
    pub skills: Vec<String>,
    /// Unit-normalized embedding vector.
    #[serde(default)]
    pub embedding: Vector,
}

impl Assessment {
    /// Document text that the embedding is computed from.
    pub fn document_text(&self) -> String {
        format!("{} {} {}", self.name, self.description, self.skills.join(" "))
    }
}

/// Normalize a skill tag list: lowercase, trim, drop empties, sort, dedup.
pub fn normalize_skills(skills: &[String]) -> Vec<String> {
    let mut out: Vec<String> = skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out
}

// =============================================================================
// PARSED QUERY
// =============================================================================

/// Structured constraints extracted from raw query text.
///
/// Derived per request, never persisted. `category_hints` preserves the
/// order in which categories first appeared in the text; the balancer
/// iterates hints in that order so identical inputs produce identical
/// output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedQuery {
    /// Raw query text.
    pub raw: String,
    /// Time budget in minutes, if the query stated one.
    pub time_limit_minutes: Option<u32>,
    /// Experience level, if the query stated one.
    pub experience_level: ExperienceLevel,
    /// Required skills in first-occurrence order, lower-cased, deduplicated.
    pub required_skills: Vec<String>,
    /// Category hints in first-occurrence order, deduplicated. Two or more
    /// distinct hints signal a balance requirement downstream.
    pub category_hints: Vec<Category>,
}

impl ParsedQuery {
    /// True when the query spans two or more categories and the balancer
    /// should split result slots across them.
    pub fn is_multi_domain(&self) -> bool {
        self.category_hints.len() >= 2
    }
}

// =============================================================================
// CANDIDATE
// =============================================================================

/// A retrieved catalog entry with its scores. Produced per request,
/// discarded after the response.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Insertion-order index into the catalog.
    pub index: usize,
    /// Raw cosine similarity against the query vector.
    pub similarity: f32,
    /// Similarity after rule-based boosting.
    pub adjusted: f32,
    /// Excluded by a hard filter.
    pub filtered: bool,
}

// =============================================================================
// API MODELS
// =============================================================================

fn default_max_results() -> usize {
    crate::defaults::MAX_RESULTS_DEFAULT
}

/// Request body for `POST /recommend`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendRequest {
    /// Natural-language query or job description.
    pub query: String,
    /// Maximum number of recommendations. Clamped server-side.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Explicit time budget in minutes. Overrides any duration phrase
    /// found in the query text.
    #[serde(default)]
    pub time_limit: Option<u32>,
}

/// One recommended assessment in the API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedAssessment {
    pub id: String,
    pub name: String,
    pub url: String,
    pub category: Category,
    pub duration_minutes: Option<u32>,
    pub skills: Vec<String>,
    /// Adjusted relevance score, rounded to three decimals.
    pub relevance_score: f32,
}

/// Response body for `POST /recommend`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub status: String,
    pub query: String,
    pub recommendations: Vec<RecommendedAssessment>,
    pub total_results: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_display() {
        assert_eq!(Category::Knowledge.to_string(), "knowledge");
        assert_eq!(Category::Personality.to_string(), "personality");
        assert_eq!(Category::Cognitive.to_string(), "cognitive");
    }

    #[test]
    fn test_category_code() {
        assert_eq!(Category::Knowledge.code(), 'K');
        assert_eq!(Category::Personality.code(), 'P');
        assert_eq!(Category::Cognitive.code(), 'C');
    }

    #[test]
    fn test_category_from_str_full_names() {
        assert_eq!("knowledge".parse::<Category>().unwrap(), Category::Knowledge);
        assert_eq!(
            "Personality".parse::<Category>().unwrap(),
            Category::Personality
        );
        assert_eq!("COGNITIVE".parse::<Category>().unwrap(), Category::Cognitive);
    }

    #[test]
    fn test_category_from_str_letter_codes() {
        assert_eq!("K".parse::<Category>().unwrap(), Category::Knowledge);
        assert_eq!("p".parse::<Category>().unwrap(), Category::Personality);
        assert_eq!("C".parse::<Category>().unwrap(), Category::Cognitive);

        let result = "X".parse::<Category>();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid category"));
    }

    #[test]
    fn test_category_serde_round_trip() {
        for (category, expected) in [
            (Category::Knowledge, "\"knowledge\""),
            (Category::Personality, "\"personality\""),
            (Category::Cognitive, "\"cognitive\""),
        ] {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, expected);
            let back: Category = serde_json::from_str(&json).unwrap();
            assert_eq!(back, category);
        }
    }

    #[test]
    fn test_category_deserializes_letter_code() {
        let category: Category = serde_json::from_str("\"K\"").unwrap();
        assert_eq!(category, Category::Knowledge);
    }

    #[test]
    fn test_experience_level_default() {
        assert_eq!(ExperienceLevel::default(), ExperienceLevel::Unspecified);
    }

    #[test]
    fn test_normalize_skills() {
        let skills = vec![
            "Java".to_string(),
            "  SQL ".to_string(),
            "java".to_string(),
            "".to_string(),
        ];
        assert_eq!(normalize_skills(&skills), vec!["java", "sql"]);
    }

    #[test]
    fn test_document_text_composition() {
        let a = Assessment {
            id: "java-8".to_string(),
            name: "Java 8".to_string(),
            url: "https://example.com/java-8".to_string(),
            description: "Core Java programming".to_string(),
            category: Category::Knowledge,
            duration_minutes: Some(30),
            skills: vec!["java".to_string(), "programming".to_string()],
            embedding: vec![],
        };
        assert_eq!(a.document_text(), "Java 8 Core Java programming java programming");
    }

    #[test]
    fn test_parsed_query_multi_domain() {
        let mut q = ParsedQuery::default();
        assert!(!q.is_multi_domain());

        q.category_hints = vec![Category::Knowledge];
        assert!(!q.is_multi_domain());

        q.category_hints = vec![Category::Knowledge, Category::Personality];
        assert!(q.is_multi_domain());
    }

    #[test]
    fn test_recommend_request_defaults() {
        let req: RecommendRequest =
            serde_json::from_str(r#"{"query": "Java developer"}"#).unwrap();
        assert_eq!(req.query, "Java developer");
        assert_eq!(req.max_results, crate::defaults::MAX_RESULTS_DEFAULT);
        assert_eq!(req.time_limit, None);
    }

    #[test]
    fn test_recommend_request_explicit_fields() {
        let req: RecommendRequest = serde_json::from_str(
            r#"{"query": "analyst", "max_results": 5, "time_limit": 45}"#,
        )
        .unwrap();
        assert_eq!(req.max_results, 5);
        assert_eq!(req.time_limit, Some(45));
    }
}
