//! # sift-engine
//!
//! The retrieval-and-ranking core of sift: maps a free-text hiring query to
//! an ordered list of catalog assessments.
//!
//! Pipeline: raw text → [`QueryInterpreter`] → parsed constraints →
//! embed(query) → [`CatalogIndex::search`] → [`Scorer`] → [`balancer`] →
//! ordered result, composed by [`Recommender`].

pub mod balancer;
pub mod catalog;
pub mod index;
pub mod interpreter;
pub mod lexicon;
pub mod recommender;
pub mod scorer;

pub use balancer::allocate;
pub use catalog::{load_catalog, parse_catalog, records_to_assessments, CatalogRecord};
pub use index::{CatalogIndex, Hit};
pub use interpreter::QueryInterpreter;
pub use lexicon::{CategoryPhrase, LevelPhrase, Lexicon, SkillEntry};
pub use recommender::{Recommendation, Recommender};
pub use scorer::{Scorer, ScoringConfig};
