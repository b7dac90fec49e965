//! Survey analysis engine.
//!
//! [`SurveyAnalyzer`] ties the individual components together:
//!
//! ```text
//! responses + questions ─┬─> free-text, AI-flagged answers ─> ThemeExtractor ─> themes
//!                        └─> MetricsAggregator ─> rating / NPS / sentiment distribution
//! themes + metrics + survey type ─> RecommendationEngine ─> recommendations
//! ```
//!
//! Analysis is synchronous and side-effect free; the same inputs always give
//! the same [`AnalysisResult`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::metrics::{MetricsAggregator, SentimentDistribution};
use crate::model::{Question, ResponseSet, SurveyType};
use crate::recommendations::RecommendationEngine;
use crate::sentiment::SentimentScorer;
use crate::survey::SurveyDefinition;
use crate::themes::{Theme, ThemeExtractor};

/// Outcome of analysing one completed response set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    pub sentiment_distribution: SentimentDistribution,
    /// At most six themes, most-mentioned first
    pub themes: Vec<Theme>,
    pub avg_rating: f64,
    pub nps_score: f64,
    pub recommendations: Vec<String>,
    pub total_responses: usize,
}

#[derive(Debug, Clone)]
pub struct SurveyAnalyzer {
    scorer: SentimentScorer,
    metrics: MetricsAggregator,
    themes: ThemeExtractor,
    recommendations: RecommendationEngine,
}

impl SurveyAnalyzer {
    pub fn new(config: &AnalysisConfig) -> Self {
        let scorer = SentimentScorer::new(&config.sentiment);
        Self {
            metrics: MetricsAggregator::new(scorer.clone()),
            themes: ThemeExtractor::new(&config.themes, scorer.clone()),
            recommendations: RecommendationEngine::new(config.recommendations.clone()),
            scorer,
        }
    }

    pub fn analyze(
        &self,
        questions: &[Question],
        responses: &ResponseSet,
        survey_type: SurveyType,
    ) -> AnalysisResult {
        let texts = MetricsAggregator::eligible_texts(questions, responses);
        let themes = self.themes.extract(&texts);
        let metrics = self.metrics.aggregate(questions, responses);

        let recommendations = self.recommendations.generate(
            &themes,
            metrics.avg_rating,
            &metrics.nps_candidates,
            survey_type,
        );

        debug!(
            survey_type = %survey_type,
            total_responses = metrics.total_responses,
            analyzed_texts = metrics.analyzed_texts,
            nps_candidates = metrics.nps_candidates.len(),
            themes = themes.len(),
            recommendations = recommendations.len(),
            "analyzed survey responses"
        );

        AnalysisResult {
            sentiment_distribution: metrics.sentiment_distribution,
            themes,
            avg_rating: metrics.avg_rating,
            nps_score: metrics.nps_score,
            recommendations,
            total_responses: metrics.total_responses,
        }
    }

    /// Analyse against a survey definition, using its declared (or inferred)
    /// survey type
    pub fn analyze_survey(
        &self,
        survey: &SurveyDefinition,
        responses: &ResponseSet,
    ) -> AnalysisResult {
        self.analyze(&survey.questions, responses, survey.survey_type())
    }

    /// The scorer used for every sentiment decision in this analyzer
    pub fn scorer(&self) -> &SentimentScorer {
        &self.scorer
    }
}

impl Default for SurveyAnalyzer {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}
