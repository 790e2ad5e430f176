//! The orchestrator: parse → embed → retrieve → score → balance → resolve.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, instrument};

use sift_core::{defaults, Assessment, EmbeddingBackend, Error, Result};

use crate::balancer::allocate;
use crate::index::{l2_normalize, CatalogIndex};
use crate::interpreter::QueryInterpreter;
use crate::scorer::{Scorer, ScoringConfig};

/// One ranked recommendation.
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub assessment: Assessment,
    /// Adjusted relevance score.
    pub relevance_score: f32,
}

/// Composes the pipeline into a single `recommend` operation.
///
/// Holds the shared, read-only [`CatalogIndex`] behind an `Arc`; requests
/// run concurrently against it without locking. All per-request state lives
/// on the stack of `recommend` and is discarded on return.
pub struct Recommender {
    index: Arc<CatalogIndex>,
    backend: Arc<dyn EmbeddingBackend>,
    interpreter: QueryInterpreter,
    scorer: Scorer,
    retrieval_top_k: usize,
}

impl Recommender {
    pub fn new(index: Arc<CatalogIndex>, backend: Arc<dyn EmbeddingBackend>) -> Self {
        Self {
            index,
            backend,
            interpreter: QueryInterpreter::default(),
            scorer: Scorer::default(),
            retrieval_top_k: defaults::RETRIEVAL_TOP_K,
        }
    }

    pub fn with_interpreter(mut self, interpreter: QueryInterpreter) -> Self {
        self.interpreter = interpreter;
        self
    }

    pub fn with_scoring(mut self, config: ScoringConfig) -> Self {
        self.scorer = Scorer::new(config);
        self
    }

    pub fn with_retrieval_top_k(mut self, top_k: usize) -> Self {
        self.retrieval_top_k = top_k.max(1);
        self
    }

    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    pub fn backend(&self) -> &dyn EmbeddingBackend {
        self.backend.as_ref()
    }

    /// Clamp a requested result count to the configured bound.
    pub fn clamp_max_results(requested: usize) -> usize {
        requested.clamp(defaults::MAX_RESULTS_FLOOR, defaults::MAX_RESULTS_CEIL)
    }

    /// Recommend assessments for a free-text query.
    ///
    /// `time_limit` overrides any duration phrase found in the text. An
    /// empty or nonsensical query is served best-effort on pure similarity;
    /// only an embedding-provider failure is an error, propagated without
    /// internal retry.
    #[instrument(
        skip(self, text),
        fields(subsystem = "engine", component = "recommender", op = "recommend")
    )]
    pub async fn recommend(
        &self,
        text: &str,
        max_results: usize,
        time_limit: Option<u32>,
    ) -> Result<Vec<Recommendation>> {
        let start = Instant::now();
        let max_results = Self::clamp_max_results(max_results);

        let mut parsed = self.interpreter.parse(text);
        if time_limit.is_some() {
            parsed.time_limit_minutes = time_limit;
        }

        let mut vectors = self.backend.embed_texts(&[text.to_string()]).await?;
        let mut query_vector = vectors
            .pop()
            .ok_or_else(|| Error::Embedding("backend returned no vector".to_string()))?;
        l2_normalize(&mut query_vector)
            .map_err(|_| Error::Embedding("backend returned a zero-norm vector".to_string()))?;

        let hits = self.index.search(&query_vector, self.retrieval_top_k)?;
        let candidates = self.scorer.score(&hits, &parsed, &self.index);
        let order = allocate(&candidates, &parsed, max_results, &self.index);

        let recommendations: Vec<Recommendation> = order
            .iter()
            .map(|&i| {
                let adjusted = candidates
                    .iter()
                    .find(|c| c.index == i)
                    .map(|c| c.adjusted)
                    .unwrap_or(0.0);
                Recommendation {
                    assessment: self.index.entry(i).clone(),
                    relevance_score: adjusted,
                }
            })
            .collect();

        info!(
            max_results,
            candidate_count = candidates.len(),
            result_count = recommendations.len(),
            skill_count = parsed.required_skills.len(),
            category_hints = ?parsed.category_hints,
            time_limit = ?parsed.time_limit_minutes,
            duration_ms = start.elapsed().as_millis() as u64,
            "Recommendation complete"
        );

        Ok(recommendations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sift_core::{Category, Vector};

    /// Keyword-triggered test backend. Dimension 3: axes are roughly
    /// "technical", "interpersonal", "cognitive".
    struct KeywordBackend {
        fail: bool,
    }

    #[async_trait]
    impl EmbeddingBackend for KeywordBackend {
        async fn embed_texts(&self, texts: &[String]) -> Result<Vec<Vector>> {
            if self.fail {
                return Err(Error::Embedding("connection refused".to_string()));
            }
            Ok(texts
                .iter()
                .map(|t| {
                    let lower = t.to_lowercase();
                    let mut v = vec![0.05, 0.05, 0.05];
                    if lower.contains("java") || lower.contains("sql") {
                        v[0] += 1.0;
                    }
                    if lower.contains("collaborat") || lower.contains("personality") {
                        v[1] += 1.0;
                    }
                    if lower.contains("cognitive") || lower.contains("reasoning") {
                        v[2] += 1.0;
                    }
                    v
                })
                .collect())
        }

        fn dimension(&self) -> usize {
            3
        }

        fn model_name(&self) -> &str {
            "keyword-test"
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(!self.fail)
        }
    }

    fn entry(
        id: &str,
        category: Category,
        duration: Option<u32>,
        skills: &[&str],
        embedding: Vec<f32>,
    ) -> Assessment {
        Assessment {
            id: id.to_string(),
            name: id.to_string(),
            url: format!("https://example.com/{}", id),
            description: String::new(),
            category,
            duration_minutes: duration,
            skills: skills.iter().map(|s| s.to_string()).collect(),
            embedding,
        }
    }

    /// 5 Knowledge, 5 Personality, 2 Cognitive entries.
    fn catalog() -> Vec<Assessment> {
        let mut entries = Vec::new();
        for i in 0..5 {
            entries.push(entry(
                &format!("java-{}", i),
                Category::Knowledge,
                Some(30 + i as u32 * 5),
                &["java", "programming"],
                vec![1.0, 0.1 * i as f32, 0.0],
            ));
        }
        for i in 0..5 {
            entries.push(entry(
                &format!("opq-{}", i),
                Category::Personality,
                Some(25 + i as u32 * 5),
                &["collaboration", "communication"],
                vec![0.1 * i as f32, 1.0, 0.0],
            ));
        }
        entries.push(entry(
            "verify-numerical",
            Category::Cognitive,
            Some(20),
            &["numerical"],
            vec![0.0, 0.0, 1.0],
        ));
        entries.push(entry(
            "verify-verbal",
            Category::Cognitive,
            None,
            &["english"],
            vec![0.1, 0.1, 1.0],
        ));
        entries
    }

    fn recommender(fail: bool) -> Recommender {
        let index = Arc::new(CatalogIndex::build(catalog()).unwrap());
        Recommender::new(index, Arc::new(KeywordBackend { fail }))
    }

    #[tokio::test]
    async fn test_recommend_returns_bounded_unique_results() {
        let r = recommender(false);
        let out = r.recommend("Java developer", 10, None).await.unwrap();
        assert!(!out.is_empty());
        assert!(out.len() <= 10);

        let mut ids: Vec<&str> = out.iter().map(|r| r.assessment.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), out.len());
    }

    #[tokio::test]
    async fn test_recommend_balances_java_collaboration_query() {
        let r = recommender(false);
        let out = r
            .recommend("Java developer who collaborates", 10, None)
            .await
            .unwrap();
        assert_eq!(out.len(), 10);

        let k_count = out
            .iter()
            .filter(|r| r.assessment.category == Category::Knowledge)
            .count();
        let p_count = out
            .iter()
            .filter(|r| r.assessment.category == Category::Personality)
            .count();
        assert_eq!(k_count, 5);
        assert_eq!(p_count, 5);
    }

    #[tokio::test]
    async fn test_recommend_respects_time_limit_from_query() {
        let r = recommender(false);
        let out = r
            .recommend("a java test under 35 minutes", 10, None)
            .await
            .unwrap();
        for rec in &out {
            if let Some(d) = rec.assessment.duration_minutes {
                assert!(d <= 35, "{} runs {} min", rec.assessment.id, d);
            }
        }
    }

    #[tokio::test]
    async fn test_recommend_time_limit_override_beats_query_phrase() {
        let r = recommender(false);
        let out = r
            .recommend("a java test under 120 minutes", 10, Some(30))
            .await
            .unwrap();
        for rec in &out {
            if let Some(d) = rec.assessment.duration_minutes {
                assert!(d <= 30, "{} runs {} min", rec.assessment.id, d);
            }
        }
    }

    #[tokio::test]
    async fn test_recommend_impossible_limit_keeps_unknown_durations() {
        let r = recommender(false);
        // No known duration fits 1 minute; only the unknown-duration entry
        // passes, so the filter is not relaxed and the result stays valid.
        let out = r.recommend("java skills", 10, Some(1)).await.unwrap();
        assert!(!out.is_empty());
        for rec in &out {
            assert_eq!(rec.assessment.duration_minutes, None);
        }
    }

    #[tokio::test]
    async fn test_recommend_empty_query_is_best_effort() {
        let r = recommender(false);
        let out = r.recommend("", 5, None).await.unwrap();
        assert!(!out.is_empty());
        assert!(out.len() <= 5);
    }

    #[tokio::test]
    async fn test_recommend_is_idempotent() {
        let r = recommender(false);
        let text = "Java developer who collaborates, 45 minutes";
        let a = r.recommend(text, 10, None).await.unwrap();
        let b = r.recommend(text, 10, None).await.unwrap();
        let ids_a: Vec<&str> = a.iter().map(|r| r.assessment.id.as_str()).collect();
        let ids_b: Vec<&str> = b.iter().map(|r| r.assessment.id.as_str()).collect();
        assert_eq!(ids_a, ids_b);
    }

    #[tokio::test]
    async fn test_recommend_propagates_backend_failure() {
        let r = recommender(true);
        let err = r.recommend("java", 10, None).await.unwrap_err();
        assert!(matches!(err, Error::Embedding(_)));
    }

    #[tokio::test]
    async fn test_recommend_clamps_max_results() {
        let r = recommender(false);
        let out = r.recommend("java", 100, None).await.unwrap();
        assert!(out.len() <= defaults::MAX_RESULTS_CEIL);

        let out = r.recommend("java", 0, None).await.unwrap();
        assert_eq!(out.len(), defaults::MAX_RESULTS_FLOOR);
    }

    #[tokio::test]
    async fn test_recommend_scores_descending_within_category_blocks() {
        let r = recommender(false);
        let out = r.recommend("java", 10, None).await.unwrap();
        // Single-domain query: global adjusted order, strictly non-increasing.
        for pair in out.windows(2) {
            assert!(pair[0].relevance_score >= pair[1].relevance_score);
        }
    }

    #[test]
    fn test_clamp_max_results() {
        assert_eq!(Recommender::clamp_max_results(0), defaults::MAX_RESULTS_FLOOR);
        assert_eq!(Recommender::clamp_max_results(7), 7);
        assert_eq!(
            Recommender::clamp_max_results(1000),
            defaults::MAX_RESULTS_CEIL
        );
    }
}
