//! Keyword lexicons for query interpretation.
//!
//! The interpreter matches queries against explicit, versioned configuration
//! tables instead of hardcoded branches, so the tables can be loaded from a
//! file, tested, and extended independently of the matching logic.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use sift_core::{Category, ExperienceLevel, Result};

/// A recognizable skill: a canonical tag plus the substring patterns that
/// signal it, and the category its presence hints at (if any).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillEntry {
    /// Canonical skill tag, as stored on catalog entries.
    pub name: String,
    /// Lowercase substring/stem patterns. A pattern matches at any position
    /// where it is not preceded by an alphanumeric character, so stems like
    /// "collaborat" cover "collaborates" and "collaboration".
    pub patterns: Vec<String>,
    /// Category this skill hints at. `None` for skills that carry no
    /// category signal (e.g. domain words like "marketing").
    #[serde(default)]
    pub category: Option<Category>,
}

/// A phrase that directly names an assessment category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPhrase {
    pub pattern: String,
    pub category: Category,
}

/// A whole-word phrase mapping to an experience level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelPhrase {
    pub pattern: String,
    pub level: ExperienceLevel,
}

/// Versioned keyword tables consumed by the interpreter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lexicon {
    /// Table version, bumped whenever entries change meaningfully.
    pub version: u32,
    pub skills: Vec<SkillEntry>,
    pub category_phrases: Vec<CategoryPhrase>,
    pub level_phrases: Vec<LevelPhrase>,
}

impl Lexicon {
    /// Load a lexicon from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        DEFAULT_LEXICON.clone()
    }
}

fn skill(name: &str, patterns: &[&str], category: Option<Category>) -> SkillEntry {
    SkillEntry {
        name: name.to_string(),
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
        category,
    }
}

/// Built-in lexicon covering the catalog's skill vocabulary.
static DEFAULT_LEXICON: Lazy<Lexicon> = Lazy::new(|| {
    use Category::{Cognitive, Knowledge, Personality};

    Lexicon {
        version: 1,
        skills: vec![
            // Technical / tool skills
            skill("java", &["java"], Some(Knowledge)),
            skill("python", &["python"], Some(Knowledge)),
            skill("sql", &["sql", "database"], Some(Knowledge)),
            skill("javascript", &["javascript", "java script"], Some(Knowledge)),
            skill("excel", &["excel"], Some(Knowledge)),
            skill("tableau", &["tableau"], Some(Knowledge)),
            skill("english", &["english"], Some(Knowledge)),
            // Cognitive signals
            skill("analytical", &["analytic", "analysis"], Some(Cognitive)),
            skill("numerical", &["numerical", "mathematic"], Some(Cognitive)),
            skill(
                "problem_solving",
                &["problem solving", "problem-solving"],
                Some(Cognitive),
            ),
            // Interpersonal / soft skills
            skill("leadership", &["leadership"], Some(Personality)),
            skill("communication", &["communicat", "interpersonal"], Some(Personality)),
            skill("collaboration", &["collaborat", "teamwork"], Some(Personality)),
            skill("management", &["management"], Some(Personality)),
            // Domain words without a category signal
            skill("sales", &["sales", "selling"], None),
            skill("marketing", &["marketing"], None),
            skill("finance", &["finance", "accounting"], None),
        ],
        category_phrases: vec![
            CategoryPhrase {
                pattern: "personality".to_string(),
                category: Personality,
            },
            CategoryPhrase {
                pattern: "behavior".to_string(),
                category: Personality,
            },
            CategoryPhrase {
                pattern: "behaviour".to_string(),
                category: Personality,
            },
            CategoryPhrase {
                pattern: "cultural fit".to_string(),
                category: Personality,
            },
            CategoryPhrase {
                pattern: "cognitive".to_string(),
                category: Cognitive,
            },
            CategoryPhrase {
                pattern: "reasoning".to_string(),
                category: Cognitive,
            },
            CategoryPhrase {
                pattern: "aptitude".to_string(),
                category: Cognitive,
            },
            CategoryPhrase {
                pattern: "technical".to_string(),
                category: Knowledge,
            },
            CategoryPhrase {
                pattern: "programming".to_string(),
                category: Knowledge,
            },
            CategoryPhrase {
                pattern: "knowledge".to_string(),
                category: Knowledge,
            },
        ],
        level_phrases: vec![
            // Graduate before entry: "graduate" must not fall through to the
            // entry-equivalent bucket.
            LevelPhrase {
                pattern: "graduate".to_string(),
                level: ExperienceLevel::Graduate,
            },
            LevelPhrase {
                pattern: "entry".to_string(),
                level: ExperienceLevel::Entry,
            },
            LevelPhrase {
                pattern: "junior".to_string(),
                level: ExperienceLevel::Entry,
            },
            LevelPhrase {
                pattern: "intern".to_string(),
                level: ExperienceLevel::Entry,
            },
            LevelPhrase {
                pattern: "senior".to_string(),
                level: ExperienceLevel::Senior,
            },
            LevelPhrase {
                pattern: "lead".to_string(),
                level: ExperienceLevel::Senior,
            },
            LevelPhrase {
                pattern: "principal".to_string(),
                level: ExperienceLevel::Senior,
            },
            LevelPhrase {
                pattern: "manager".to_string(),
                level: ExperienceLevel::Senior,
            },
        ],
    }
});
