//! Built-in survey templates.

use crate::errors::DefinitionError;
use crate::model::{Question, QuestionRole, SurveyType};
use crate::survey::SurveyDefinition;

/// Registry of survey definitions addressable by key
#[derive(Debug, Clone, Default)]
pub struct SurveyTemplates {
    templates: Vec<SurveyDefinition>,
}

impl SurveyTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Customer satisfaction and employee feedback templates
    pub fn builtin() -> Self {
        Self {
            templates: vec![customer_satisfaction(), employee_feedback()],
        }
    }

    /// Add a definition, replacing any existing one with the same key
    pub fn insert(&mut self, survey: SurveyDefinition) {
        match self.templates.iter_mut().find(|t| t.key == survey.key) {
            Some(existing) => *existing = survey,
            None => self.templates.push(survey),
        }
    }

    pub fn get(&self, key: &str) -> Option<&SurveyDefinition> {
        self.templates.iter().find(|t| t.key == key)
    }

    pub fn require(&self, key: &str) -> Result<&SurveyDefinition, DefinitionError> {
        self.get(key)
            .ok_or_else(|| DefinitionError::UnknownTemplate(key.to_string()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|t| t.key.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SurveyDefinition> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn customer_satisfaction() -> SurveyDefinition {
    SurveyDefinition::new(
        "customer_satisfaction",
        "Customer Experience Survey",
        vec![
            Question::rating(1, "How satisfied are you with our service overall?", 5)
                .required()
                .with_role(QuestionRole::PrimarySatisfaction)
                .with_ai_context("Primary satisfaction metric"),
            Question::multiple_choice(
                2,
                "What's the primary reason for your rating?",
                [
                    "Product Quality",
                    "Customer Service",
                    "Pricing",
                    "User Experience",
                    "Other",
                ],
            )
            .required()
            .with_ai_context("Follow-up based on rating"),
            Question::text(3, "What specific improvements would you like to see?")
                .with_ai_analysis()
                .with_ai_context("Sentiment and theme analysis"),
            Question::rating(4, "How likely are you to recommend us to others? (1-10)", 10)
                .required()
                .with_role(QuestionRole::Nps)
                .with_ai_context("NPS calculation"),
        ],
    )
    .with_description("AI-enhanced survey to understand customer satisfaction patterns")
    .with_survey_type(SurveyType::CustomerSatisfaction)
}

fn employee_feedback() -> SurveyDefinition {
    SurveyDefinition::new(
        "employee_feedback",
        "Employee Engagement Survey",
        vec![
            Question::rating(1, "How engaged do you feel at work?", 5)
                .required()
                .with_role(QuestionRole::PrimarySatisfaction)
                .with_ai_context("Core engagement metric"),
            Question::multiple_choice(
                2,
                "What motivates you most at work?",
                [
                    "Career Growth",
                    "Recognition",
                    "Work-Life Balance",
                    "Compensation",
                    "Team Collaboration",
                ],
            )
            .required()
            .with_ai_context("Motivation analysis"),
            Question::text(3, "What changes would improve your work experience?")
                .with_ai_analysis()
                .with_ai_context("Theme extraction and categorization"),
            Question::rating(4, "How would you rate your work-life balance?", 5)
                .required()
                .with_ai_context("Work-life balance assessment"),
        ],
    )
    .with_description("Smart survey with adaptive questioning based on responses")
    .with_survey_type(SurveyType::EmployeeFeedback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_templates() {
        let templates = SurveyTemplates::builtin();
        assert_eq!(
            templates.keys().collect::<Vec<_>>(),
            vec!["customer_satisfaction", "employee_feedback"]
        );

        for survey in templates.iter() {
            survey.validate().unwrap();
            assert_eq!(survey.questions.len(), 4);
            assert_eq!(
                survey.survey_type(),
                SurveyType::infer_from_title(&survey.title)
            );
        }
    }

    #[test]
    fn test_customer_template_has_one_nps_question() {
        let templates = SurveyTemplates::builtin();
        let survey = templates.require("customer_satisfaction").unwrap();
        let nps: Vec<u32> = survey
            .questions
            .iter()
            .filter(|q| q.is_nps_question())
            .map(|q| q.id)
            .collect();
        assert_eq!(nps, vec![4]);
    }

    #[test]
    fn test_unknown_template() {
        let err = SurveyTemplates::builtin().require("onboarding").unwrap_err();
        assert!(matches!(err, DefinitionError::UnknownTemplate(key) if key == "onboarding"));
    }

    #[test]
    fn test_insert_replaces_by_key() {
        let mut templates = SurveyTemplates::builtin();
        let replacement = SurveyDefinition::new(
            "employee_feedback",
            "Quarterly Pulse",
            vec![Question::text(1, "How was the quarter?")],
        );
        templates.insert(replacement.clone());
        assert_eq!(templates.len(), 2);
        assert_eq!(templates.get("employee_feedback"), Some(&replacement));
    }
}
