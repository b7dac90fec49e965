use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

pub type QuestionId = u32;

/// How a question is answered
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum QuestionKind {
    Rating,
    MultipleChoice,
    Text,
    /// Any kind this engine does not know about. Answers still count toward
    /// `total_responses` but feed no other metric.
    Unknown,
}

impl From<String> for QuestionKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "rating" => QuestionKind::Rating,
            "multiple_choice" => QuestionKind::MultipleChoice,
            "text" => QuestionKind::Text,
            _ => QuestionKind::Unknown,
        }
    }
}

/// Explicit semantic tag for a question. When absent, NPS questions are
/// recognised by the word "recommend" in their text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuestionRole {
    Nps,
    PrimarySatisfaction,
    Other,
}

const NPS_TEXT_MARKER: &str = "recommend";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    pub id: QuestionId,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub ai_analysis: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<QuestionRole>,
    /// Free-form note on how the answer is used downstream
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_context: Option<String>,
}

impl Question {
    fn new(id: QuestionId, kind: QuestionKind, text: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            text: text.into(),
            scale: None,
            options: None,
            ai_analysis: false,
            required: false,
            role: None,
            ai_context: None,
        }
    }

    pub fn rating(id: QuestionId, text: impl Into<String>, scale: u32) -> Self {
        let mut question = Self::new(id, QuestionKind::Rating, text);
        question.scale = Some(scale);
        question
    }

    pub fn multiple_choice<I, S>(id: QuestionId, text: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut question = Self::new(id, QuestionKind::MultipleChoice, text);
        question.options = Some(options.into_iter().map(Into::into).collect());
        question
    }

    pub fn text(id: QuestionId, text: impl Into<String>) -> Self {
        Self::new(id, QuestionKind::Text, text)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_ai_analysis(mut self) -> Self {
        self.ai_analysis = true;
        self
    }

    pub fn with_role(mut self, role: QuestionRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_ai_context(mut self, context: impl Into<String>) -> Self {
        self.ai_context = Some(context.into());
        self
    }

    /// Questions of an unknown kind are counted but never analysed
    pub fn is_analyzable(&self) -> bool {
        self.kind != QuestionKind::Unknown
    }

    /// Whether numeric answers to this question feed the Net Promoter Score.
    ///
    /// An explicit `role` always wins; untagged questions fall back to a
    /// case-insensitive "recommend" match on the question text.
    pub fn is_nps_question(&self) -> bool {
        match self.role {
            Some(role) => role == QuestionRole::Nps,
            None => self.text.to_lowercase().contains(NPS_TEXT_MARKER),
        }
    }
}

/// A single answer. Exactly one per question id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ResponseValue {
    Numeric(f64),
    Choice(String),
    Text(String),
}

impl ResponseValue {
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            ResponseValue::Numeric(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Text and choice answers consisting only of whitespace count as blank
    pub fn is_blank(&self) -> bool {
        match self {
            ResponseValue::Numeric(_) => false,
            ResponseValue::Choice(value) | ResponseValue::Text(value) => value.trim().is_empty(),
        }
    }
}

impl fmt::Display for ResponseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseValue::Numeric(value) => write!(f, "{}", value),
            ResponseValue::Choice(value) | ResponseValue::Text(value) => f.write_str(value),
        }
    }
}

/// Completed answers keyed by question id. Iteration is always in id order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ResponseSet {
    responses: BTreeMap<QuestionId, ResponseValue>,
}

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, replacing any earlier answer to the same question
    pub fn insert(&mut self, id: QuestionId, value: ResponseValue) -> Option<ResponseValue> {
        self.responses.insert(id, value)
    }

    pub fn get(&self, id: QuestionId) -> Option<&ResponseValue> {
        self.responses.get(&id)
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, QuestionId, ResponseValue> {
        self.responses.iter()
    }

    pub fn values(&self) -> btree_map::Values<'_, QuestionId, ResponseValue> {
        self.responses.values()
    }
}

impl FromIterator<(QuestionId, ResponseValue)> for ResponseSet {
    fn from_iter<T: IntoIterator<Item = (QuestionId, ResponseValue)>>(iter: T) -> Self {
        Self {
            responses: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[(QuestionId, ResponseValue); N]> for ResponseSet {
    fn from(entries: [(QuestionId, ResponseValue); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a ResponseSet {
    type Item = (&'a QuestionId, &'a ResponseValue);
    type IntoIter = btree_map::Iter<'a, QuestionId, ResponseValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.responses.iter()
    }
}

/// Which recommendation rules apply to a survey
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SurveyType {
    CustomerSatisfaction,
    EmployeeFeedback,
}

impl SurveyType {
    /// Guess the survey type from its title. Anything that does not mention
    /// customers is treated as employee feedback.
    pub fn infer_from_title(title: &str) -> Self {
        if title.to_lowercase().contains("customer") {
            SurveyType::CustomerSatisfaction
        } else {
            SurveyType::EmployeeFeedback
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SurveyType::CustomerSatisfaction => "customer_satisfaction",
            SurveyType::EmployeeFeedback => "employee_feedback",
        }
    }
}

impl fmt::Display for SurveyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
