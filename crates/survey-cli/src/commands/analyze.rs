use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use console::style;
use survey_analysis::model::QuestionId;
use survey_analysis::sentiment::Sentiment;
use survey_analysis::{
    AnalysisReport, AnalysisResult, ResponseSet, SurveyAnalyzer, SurveyDefinition,
    SurveyTemplates,
};
use thiserror::Error;
use tracing::info;

use crate::config::load_config;

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Built-in survey template the responses belong to
    #[arg(long, conflicts_with = "survey", required_unless_present = "survey")]
    pub template: Option<String>,

    /// Survey definition file (YAML, or JSON with a .json extension)
    #[arg(long)]
    pub survey: Option<PathBuf>,

    /// Completed responses as a JSON object keyed by question id
    #[arg(long)]
    pub responses: PathBuf,

    /// Analysis config overriding the lexicon, theme taxonomy or thresholds
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write a JSON report to this file, or into this directory under a
    /// timestamped name
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("required questions are unanswered: {}", format_ids(.0))]
    MissingRequired(Vec<QuestionId>),
}

fn format_ids(ids: &[QuestionId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn run(args: &AnalyzeArgs) -> Result<()> {
    let survey = load_survey(args)?;
    let responses = load_responses(&args.responses)?;

    let missing = survey.missing_required(&responses);
    if !missing.is_empty() {
        return Err(AnalyzeError::MissingRequired(missing).into());
    }

    let config = load_config(args.config.as_deref())?;
    let analyzer = SurveyAnalyzer::new(&config);
    let result = analyzer.analyze_survey(&survey, &responses);

    print!("{}", render_result(&survey, &result));

    if let Some(target) = &args.export {
        let report = AnalysisReport::new(&survey.title, &result, &responses, Utc::now());
        let path = export_report(&report, target)?;
        println!(
            "\n{} {}",
            style("Report written to").green(),
            path.display()
        );
    }

    Ok(())
}

fn load_survey(args: &AnalyzeArgs) -> Result<SurveyDefinition> {
    match (&args.template, &args.survey) {
        (Some(key), _) => Ok(SurveyTemplates::builtin().require(key)?.clone()),
        (None, Some(path)) => SurveyDefinition::from_path(path)
            .with_context(|| format!("failed to load survey {}", path.display())),
        (None, None) => anyhow::bail!("either --template or --survey is required"),
    }
}

fn load_responses(path: &Path) -> Result<ResponseSet> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read responses {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse responses {}", path.display()))
}

/// Write the report to `target`, or into it when `target` is a directory.
/// Returns the file written.
pub fn export_report(report: &AnalysisReport, target: &Path) -> Result<PathBuf> {
    let path = if target.is_dir() {
        target.join(report.default_file_name())
    } else {
        target.to_path_buf()
    };

    let json = report.to_json()?;
    std::fs::write(&path, json)
        .with_context(|| format!("failed to write report {}", path.display()))?;
    info!(path = %path.display(), "exported analysis report");
    Ok(path)
}

/// Ratings up to 5 are shown on a five-point scale, anything higher on ten
pub fn format_rating(avg_rating: f64) -> String {
    if avg_rating <= 5.0 {
        format!("{:.1}/5", avg_rating)
    } else {
        format!("{:.1}/10", avg_rating)
    }
}

fn styled_sentiment(sentiment: Sentiment) -> String {
    match sentiment {
        Sentiment::Positive => style(sentiment).green().to_string(),
        Sentiment::Neutral => style(sentiment).dim().to_string(),
        Sentiment::Negative => style(sentiment).red().to_string(),
    }
}

fn render_result(survey: &SurveyDefinition, result: &AnalysisResult) -> String {
    let mut out = format!("{}\n\n", style(&survey.title).bold());

    out.push_str(&format!(
        "  Average Satisfaction  {}\n",
        style(format_rating(result.avg_rating)).bold()
    ));
    out.push_str(&format!(
        "  NPS Score             {}\n",
        style(format!("{:.0}", result.nps_score)).bold()
    ));
    out.push_str(&format!(
        "  Total Responses       {}\n",
        result.total_responses
    ));
    out.push_str(&format!("  Key Themes            {}\n", result.themes.len()));

    out.push_str(&format!("\n{}\n", style("Sentiment").bold().underlined()));
    let distribution = &result.sentiment_distribution;
    if distribution.is_available() {
        for sentiment in [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative] {
            out.push_str(&format!(
                "  {:<9} {:>5.1}%\n",
                sentiment.as_str(),
                distribution.get(sentiment)
            ));
        }
    } else {
        out.push_str("  No text responses available for sentiment analysis\n");
    }

    out.push_str(&format!("\n{}\n", style("Key Themes").bold().underlined()));
    if result.themes.is_empty() {
        out.push_str("  No themes identified from responses\n");
    }
    for theme in &result.themes {
        out.push_str(&format!(
            "  {:<18} {:>2} mention(s)  {}\n",
            theme.name,
            theme.mentions,
            styled_sentiment(theme.sentiment)
        ));
    }

    out.push_str(&format!("\n{}\n", style("Recommendations").bold().underlined()));
    for (i, recommendation) in result.recommendations.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, recommendation));
    }

    out
}
