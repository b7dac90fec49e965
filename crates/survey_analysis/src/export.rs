//! JSON report written after an analysis.
//!
//! The document carries the survey title, the time of analysis, the headline
//! metrics, the full analysis output and the raw responses, so a report can be
//! read back into an [`AnalysisResult`] without re-running the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisResult;
use crate::errors::ExportError;
use crate::metrics::SentimentDistribution;
use crate::model::ResponseSet;
use crate::themes::Theme;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReportMetrics {
    #[serde(rename = "avg_satisfaction", alias = "avg_rating")]
    pub avg_rating: f64,
    pub nps_score: f64,
    pub total_responses: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReport {
    pub survey_title: String,
    pub analysis_date: DateTime<Utc>,
    pub metrics: ReportMetrics,
    pub sentiment_distribution: SentimentDistribution,
    pub themes: Vec<Theme>,
    pub recommendations: Vec<String>,
    pub responses: ResponseSet,
}

impl AnalysisReport {
    pub fn new(
        survey_title: impl Into<String>,
        result: &AnalysisResult,
        responses: &ResponseSet,
        analysis_date: DateTime<Utc>,
    ) -> Self {
        Self {
            survey_title: survey_title.into(),
            analysis_date,
            metrics: ReportMetrics {
                avg_rating: result.avg_rating,
                nps_score: result.nps_score,
                total_responses: result.total_responses,
            },
            sentiment_distribution: result.sentiment_distribution,
            themes: result.themes.clone(),
            recommendations: result.recommendations.clone(),
            responses: responses.clone(),
        }
    }

    /// Rebuild the analysis this report was written from
    pub fn analysis(&self) -> AnalysisResult {
        AnalysisResult {
            sentiment_distribution: self.sentiment_distribution,
            themes: self.themes.clone(),
            avg_rating: self.metrics.avg_rating,
            nps_score: self.metrics.nps_score,
            recommendations: self.recommendations.clone(),
            total_responses: self.metrics.total_responses,
        }
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        serde_json::to_string_pretty(self).map_err(ExportError::Serialization)
    }

    pub fn from_json(contents: &str) -> Result<Self, ExportError> {
        serde_json::from_str(contents).map_err(ExportError::Deserialization)
    }

    /// `survey_analysis_YYYYMMDD_HHMMSS.json`, stamped with the analysis time
    pub fn default_file_name(&self) -> String {
        format!(
            "survey_analysis_{}.json",
            self.analysis_date.format("%Y%m%d_%H%M%S")
        )
    }
}
