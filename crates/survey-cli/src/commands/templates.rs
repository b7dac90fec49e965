use anyhow::{Context, Result};
use clap::ValueEnum;
use console::style;
use survey_analysis::model::QuestionKind;
use survey_analysis::{SurveyDefinition, SurveyTemplates};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    Yaml,
    Json,
}

pub fn list() -> Result<()> {
    print!("{}", render_list(&SurveyTemplates::builtin()));
    Ok(())
}

pub fn show(key: &str, format: OutputFormat) -> Result<()> {
    let templates = SurveyTemplates::builtin();
    let survey = templates.require(key)?;

    let output = match format {
        OutputFormat::Text => render_survey(survey),
        OutputFormat::Yaml => {
            serde_yaml::to_string(survey).context("failed to render survey as YAML")?
        }
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(survey)
                .context("failed to render survey as JSON")?;
            json.push('\n');
            json
        }
    };
    print!("{}", output);
    Ok(())
}

fn render_list(templates: &SurveyTemplates) -> String {
    let mut out = String::new();
    for survey in templates.iter() {
        out.push_str(&format!(
            "{}  {}\n    {}\n",
            style(&survey.key).bold().cyan(),
            survey.title,
            style(&survey.description).dim()
        ));
    }
    out
}

fn render_survey(survey: &SurveyDefinition) -> String {
    let mut out = format!("{}\n", style(&survey.title).bold());
    if !survey.description.is_empty() {
        out.push_str(&format!("{}\n", style(&survey.description).dim()));
    }
    out.push('\n');

    for question in &survey.questions {
        let marker = if question.required { "*" } else { " " };
        out.push_str(&format!(
            "{:>3}{} {}\n",
            question.id,
            style(marker).red(),
            question.text
        ));

        let detail = match question.kind {
            QuestionKind::Rating => format!("rating 1-{}", question.scale.unwrap_or(5)),
            QuestionKind::MultipleChoice => question
                .options
                .as_deref()
                .map(|options| options.join(" | "))
                .unwrap_or_else(|| "multiple choice".to_string()),
            QuestionKind::Text if question.ai_analysis => "free text, analysed".to_string(),
            QuestionKind::Text => "free text".to_string(),
            QuestionKind::Unknown => "unsupported question type".to_string(),
        };
        out.push_str(&format!("      {}\n", style(detail).dim()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_names_every_builtin() {
        let out = console::strip_ansi_codes(&render_list(&SurveyTemplates::builtin())).to_string();
        assert!(out.contains("customer_satisfaction  Customer Experience Survey"));
        assert!(out.contains("employee_feedback  Employee Engagement Survey"));
    }

    #[test]
    fn test_render_survey() {
        let templates = SurveyTemplates::builtin();
        let survey = templates.require("customer_satisfaction").unwrap();
        let out = console::strip_ansi_codes(&render_survey(survey)).to_string();

        assert!(out.starts_with("Customer Experience Survey\n"));
        assert!(out.contains("  1* How satisfied are you with our service overall?"));
        assert!(out.contains("  3  What specific improvements would you like to see?"));
        assert!(out.contains("rating 1-10"));
        assert!(out.contains("Product Quality | Customer Service | Pricing"));
        assert!(out.contains("free text, analysed"));
    }

    #[test]
    fn test_show_unknown_template() {
        let err = show("onboarding", OutputFormat::Text).unwrap_err();
        assert!(err.to_string().contains("onboarding"));
    }
}
