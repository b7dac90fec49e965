use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::errors::DefinitionError;
use crate::model::{Question, QuestionId, ResponseSet, ResponseValue, SurveyType};

/// A fixed survey: metadata plus its ordered questions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurveyDefinition {
    /// Short identifier, e.g. `customer_satisfaction`
    #[serde(default)]
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// When absent the type is inferred from the title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub survey_type: Option<SurveyType>,
    pub questions: Vec<Question>,
}

impl SurveyDefinition {
    pub fn new(key: impl Into<String>, title: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            description: String::new(),
            survey_type: None,
            questions,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_survey_type(mut self, survey_type: SurveyType) -> Self {
        self.survey_type = Some(survey_type);
        self
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn survey_type(&self) -> SurveyType {
        self.survey_type
            .unwrap_or_else(|| SurveyType::infer_from_title(&self.title))
    }

    /// Ids of required questions that are unanswered or answered with blank
    /// text, in survey order
    pub fn missing_required(&self, responses: &ResponseSet) -> Vec<QuestionId> {
        self.questions
            .iter()
            .filter(|q| q.required)
            .filter(|q| responses.get(q.id).map_or(true, ResponseValue::is_blank))
            .map(|q| q.id)
            .collect()
    }

    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.questions.is_empty() {
            return Err(DefinitionError::NoQuestions(self.title.clone()));
        }

        let mut seen = HashSet::new();
        for question in &self.questions {
            if !seen.insert(question.id) {
                return Err(DefinitionError::DuplicateQuestionId(question.id));
            }
        }
        Ok(())
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, DefinitionError> {
        let survey: SurveyDefinition = serde_yaml::from_str(contents)?;
        survey.validate()?;
        Ok(survey)
    }

    pub fn from_json_str(contents: &str) -> Result<Self, DefinitionError> {
        let survey: SurveyDefinition = serde_json::from_str(contents)?;
        survey.validate()?;
        Ok(survey)
    }

    /// Load a definition from disk; `.json` files are read as JSON, anything
    /// else as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DefinitionError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| DefinitionError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            _ => Self::from_yaml_str(&contents),
        }
    }
}
