use serde::{Deserialize, Serialize};
use std::fmt;

use crate::metrics::mean;
use crate::model::SurveyType;
use crate::sentiment::Sentiment;
use crate::themes::Theme;

/// Cut-offs used by the recommendation rules
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationThresholds {
    /// Average ratings strictly below this raise a low-satisfaction alert
    #[serde(default = "default_low_rating")]
    pub low_rating: f64,
    /// Mean NPS answer at or above this suggests a referral program
    #[serde(default = "default_referral_mean")]
    pub referral_mean: f64,
    /// Mean NPS answer at or below this raises a churn warning
    #[serde(default = "default_churn_mean")]
    pub churn_mean: f64,
}

fn default_low_rating() -> f64 {
    3.0
}

fn default_referral_mean() -> f64 {
    9.0
}

fn default_churn_mean() -> f64 {
    6.0
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            low_rating: default_low_rating(),
            referral_mean: default_referral_mean(),
            churn_mean: default_churn_mean(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recommendation {
    LowSatisfaction,
    /// Most-mentioned theme with negative sentiment
    ImproveTheme(String),
    /// Most-mentioned theme with positive sentiment
    LeverageTheme(String),
    ReferralProgram,
    ChurnRisk,
    ContinueMonitoring,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::LowSatisfaction => f.write_str(
                "⚠️ Low satisfaction scores detected. Immediate attention required to address customer concerns.",
            ),
            Recommendation::ImproveTheme(theme) => write!(
                f,
                "🔍 Focus on improving {} - identified as the primary concern area.",
                theme
            ),
            Recommendation::LeverageTheme(theme) => write!(
                f,
                "✅ Leverage your strength in {} for marketing and competitive advantage.",
                theme
            ),
            Recommendation::ReferralProgram => {
                f.write_str("🌟 High NPS score! Consider implementing a referral program.")
            }
            Recommendation::ChurnRisk => f.write_str(
                "📉 Low NPS score indicates risk of customer churn. Implement retention strategies.",
            ),
            Recommendation::ContinueMonitoring => f.write_str(
                "📊 Continue monitoring feedback patterns and maintain current service quality.",
            ),
        }
    }
}

/// Rule-based recommendations derived from themes and metrics.
///
/// Rules are evaluated in a fixed order and each contributes at most one
/// recommendation:
/// 1. low average rating
/// 2. top negative theme
/// 3. top positive theme
/// 4. NPS mean (customer satisfaction surveys only)
///
/// When none fires a single "continue monitoring" message is returned.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    thresholds: RecommendationThresholds,
}

impl RecommendationEngine {
    pub fn new(thresholds: RecommendationThresholds) -> Self {
        Self { thresholds }
    }

    pub fn evaluate(
        &self,
        themes: &[Theme],
        avg_rating: f64,
        nps_candidate_values: &[f64],
        survey_type: SurveyType,
    ) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();

        if avg_rating < self.thresholds.low_rating {
            recommendations.push(Recommendation::LowSatisfaction);
        }

        if let Some(theme) = top_theme(themes, Sentiment::Negative) {
            recommendations.push(Recommendation::ImproveTheme(theme.name.clone()));
        }

        if let Some(theme) = top_theme(themes, Sentiment::Positive) {
            recommendations.push(Recommendation::LeverageTheme(theme.name.clone()));
        }

        // Raw mean of the answers, not the bucketed NPS score
        if survey_type == SurveyType::CustomerSatisfaction && !nps_candidate_values.is_empty() {
            let nps_mean = mean(nps_candidate_values);
            if nps_mean >= self.thresholds.referral_mean {
                recommendations.push(Recommendation::ReferralProgram);
            } else if nps_mean <= self.thresholds.churn_mean {
                recommendations.push(Recommendation::ChurnRisk);
            }
        }

        if recommendations.is_empty() {
            recommendations.push(Recommendation::ContinueMonitoring);
        }

        recommendations
    }

    /// Same as [`evaluate`](Self::evaluate), rendered as display strings
    pub fn generate(
        &self,
        themes: &[Theme],
        avg_rating: f64,
        nps_candidate_values: &[f64],
        survey_type: SurveyType,
    ) -> Vec<String> {
        self.evaluate(themes, avg_rating, nps_candidate_values, survey_type)
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

/// Highest-mention theme with the given sentiment; earlier themes win ties
fn top_theme(themes: &[Theme], sentiment: Sentiment) -> Option<&Theme> {
    themes
        .iter()
        .filter(|theme| theme.sentiment == sentiment)
        .fold(None, |best: Option<&Theme>, theme| match best {
            Some(best) if best.mentions >= theme.mentions => Some(best),
            _ => Some(theme),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn theme(name: &str, mentions: usize, sentiment: Sentiment) -> Theme {
        Theme {
            name: name.to_string(),
            mentions,
            sentiment,
        }
    }

    #[test]
    fn test_low_rating_alert() {
        let engine = RecommendationEngine::default();
        let recommendations = engine.evaluate(&[], 2.5, &[], SurveyType::EmployeeFeedback);
        assert_eq!(recommendations, vec![Recommendation::LowSatisfaction]);
    }

    #[test]
    fn test_default_message_when_nothing_fires() {
        let engine = RecommendationEngine::default();
        let recommendations = engine.generate(&[], 4.0, &[], SurveyType::CustomerSatisfaction);
        assert_eq!(
            recommendations,
            vec![
                "📊 Continue monitoring feedback patterns and maintain current service quality."
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_theme_rules_pick_highest_mentions() {
        let engine = RecommendationEngine::default();
        let themes = vec![
            theme("Delivery", 1, Sentiment::Negative),
            theme("Pricing", 3, Sentiment::Negative),
            theme("Communication", 3, Sentiment::Negative),
            theme("Customer Service", 2, Sentiment::Positive),
            theme("User Experience", 4, Sentiment::Neutral),
        ];

        let recommendations = engine.evaluate(&themes, 4.0, &[], SurveyType::EmployeeFeedback);
        assert_eq!(
            recommendations,
            vec![
                Recommendation::ImproveTheme("Pricing".to_string()),
                Recommendation::LeverageTheme("Customer Service".to_string()),
            ]
        );
    }

    #[test]
    fn test_nps_rules_only_for_customer_surveys() {
        let engine = RecommendationEngine::default();

        let promoters = engine.evaluate(&[], 4.0, &[9.0, 10.0], SurveyType::CustomerSatisfaction);
        assert_eq!(promoters, vec![Recommendation::ReferralProgram]);

        let detractors = engine.evaluate(&[], 4.0, &[3.0, 7.0], SurveyType::CustomerSatisfaction);
        assert_eq!(detractors, vec![Recommendation::ChurnRisk]);

        let passive = engine.evaluate(&[], 4.0, &[8.0], SurveyType::CustomerSatisfaction);
        assert_eq!(passive, vec![Recommendation::ContinueMonitoring]);

        let employee = engine.evaluate(&[], 4.0, &[10.0], SurveyType::EmployeeFeedback);
        assert_eq!(employee, vec![Recommendation::ContinueMonitoring]);
    }

    #[test]
    fn test_nps_mean_differs_from_bucketed_score() {
        // bucketed NPS of [10, 10, 0] is +33, yet the raw mean of 6.67 is not a
        // referral signal
        let engine = RecommendationEngine::default();
        let recommendations =
            engine.evaluate(&[], 4.0, &[10.0, 10.0, 0.0], SurveyType::CustomerSatisfaction);
        assert_eq!(recommendations, vec![Recommendation::ContinueMonitoring]);
    }

    #[test]
    fn test_rules_fire_in_order() {
        let engine = RecommendationEngine::default();
        let themes = vec![
            theme("Pricing", 2, Sentiment::Negative),
            theme("Delivery", 1, Sentiment::Positive),
        ];
        let recommendations = engine.generate(&themes, 1.5, &[2.0], SurveyType::CustomerSatisfaction);
        assert_eq!(
            recommendations,
            vec![
                "⚠️ Low satisfaction scores detected. Immediate attention required to address customer concerns.".to_string(),
                "🔍 Focus on improving Pricing - identified as the primary concern area.".to_string(),
                "✅ Leverage your strength in Delivery for marketing and competitive advantage.".to_string(),
                "📉 Low NPS score indicates risk of customer churn. Implement retention strategies.".to_string(),
            ]
        );
    }

    #[test]
    fn test_custom_thresholds() {
        let engine = RecommendationEngine::new(RecommendationThresholds {
            low_rating: 4.0,
            referral_mean: 8.0,
            churn_mean: 5.0,
        });
        let recommendations =
            engine.evaluate(&[], 3.5, &[8.0], SurveyType::CustomerSatisfaction);
        assert_eq!(
            recommendations,
            vec![
                Recommendation::LowSatisfaction,
                Recommendation::ReferralProgram
            ]
        );
    }
}
