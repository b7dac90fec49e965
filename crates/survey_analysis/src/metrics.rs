use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::{Question, QuestionId, ResponseSet};
use crate::sentiment::{Sentiment, SentimentScorer};

/// Ratings at or above this count as promoters
pub const NPS_PROMOTER_MIN: f64 = 9.0;
/// Ratings at or below this count as detractors
pub const NPS_DETRACTOR_MAX: f64 = 6.0;

/// Share of analysed answers per sentiment, in percent.
///
/// All three values are zero when no answer was analysed; consumers should
/// treat that as "no sentiment data" rather than as a distribution.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct SentimentDistribution {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

impl SentimentDistribution {
    pub fn from_counts(positive: usize, neutral: usize, negative: usize) -> Self {
        let total = (positive + neutral + negative).max(1) as f64;
        Self {
            positive: 100.0 * positive as f64 / total,
            neutral: 100.0 * neutral as f64 / total,
            negative: 100.0 * negative as f64 / total,
        }
    }

    pub fn get(&self, sentiment: Sentiment) -> f64 {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
        }
    }

    pub fn total(&self) -> f64 {
        self.positive + self.neutral + self.negative
    }

    pub fn is_available(&self) -> bool {
        self.total() > 0.0
    }
}

/// Survey-level quantitative metrics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurveyMetrics {
    /// Mean of every numeric answer, 0 when there are none
    pub avg_rating: f64,
    pub sentiment_distribution: SentimentDistribution,
    /// Bucketed Net Promoter Score, 0 when no NPS question was answered
    pub nps_score: f64,
    /// Every answer in the set, whatever its type
    pub total_responses: usize,
    /// Raw numeric answers to NPS questions, in question id order
    pub nps_candidates: Vec<f64>,
    /// Number of free-text answers that went through sentiment analysis
    pub analyzed_texts: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MetricsAggregator {
    scorer: SentimentScorer,
}

impl MetricsAggregator {
    pub fn new(scorer: SentimentScorer) -> Self {
        Self { scorer }
    }

    pub fn aggregate(&self, questions: &[Question], responses: &ResponseSet) -> SurveyMetrics {
        let avg_rating = mean(&Self::ratings(questions, responses));

        let texts = Self::eligible_texts(questions, responses);
        let (mut positive, mut neutral, mut negative) = (0, 0, 0);
        for text in &texts {
            match self.scorer.classify(text) {
                Sentiment::Positive => positive += 1,
                Sentiment::Neutral => neutral += 1,
                Sentiment::Negative => negative += 1,
            }
        }
        let sentiment_distribution =
            SentimentDistribution::from_counts(positive, neutral, negative);

        let nps_candidates = Self::nps_candidates(questions, responses);
        let nps_score = net_promoter_score(&nps_candidates);

        SurveyMetrics {
            avg_rating,
            sentiment_distribution,
            nps_score,
            total_responses: responses.len(),
            nps_candidates,
            analyzed_texts: texts.len(),
        }
    }

    /// Every numeric answer except those to questions of an unknown kind.
    /// Answers to ids missing from `questions` still count.
    pub fn ratings(questions: &[Question], responses: &ResponseSet) -> Vec<f64> {
        let index = index_questions(questions);
        responses
            .iter()
            .filter(|(id, _)| index.get(*id).map_or(true, |q| q.is_analyzable()))
            .filter_map(|(_, value)| value.as_numeric())
            .collect()
    }

    /// Free-text answers to questions flagged for AI analysis, in question
    /// id order. Answers to questions missing from `questions` are skipped.
    pub fn eligible_texts<'a>(questions: &[Question], responses: &'a ResponseSet) -> Vec<&'a str> {
        let index = index_questions(questions);
        responses
            .iter()
            .filter(|(id, _)| {
                index
                    .get(*id)
                    .is_some_and(|q| q.is_analyzable() && q.ai_analysis)
            })
            .filter_map(|(_, value)| value.as_text())
            .collect()
    }

    /// Numeric answers to NPS questions, in question id order
    pub fn nps_candidates(questions: &[Question], responses: &ResponseSet) -> Vec<f64> {
        let index = index_questions(questions);
        responses
            .iter()
            .filter(|(id, _)| {
                index
                    .get(*id)
                    .is_some_and(|q| q.is_analyzable() && q.is_nps_question())
            })
            .filter_map(|(_, value)| value.as_numeric())
            .collect()
    }
}

/// First definition wins when a survey repeats a question id
fn index_questions(questions: &[Question]) -> HashMap<QuestionId, &Question> {
    let mut index = HashMap::with_capacity(questions.len());
    for question in questions {
        index.entry(question.id).or_insert(question);
    }
    index
}

/// Arithmetic mean, 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// `100 * (promoters - detractors) / total`; scores of 7 and 8 are passive
pub fn net_promoter_score(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }

    let promoters = scores.iter().filter(|s| **s >= NPS_PROMOTER_MIN).count() as f64;
    let detractors = scores.iter().filter(|s| **s <= NPS_DETRACTOR_MAX).count() as f64;
    100.0 * (promoters - detractors) / scores.len() as f64
}
