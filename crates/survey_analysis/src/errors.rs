use std::path::PathBuf;
use thiserror::Error;

use crate::model::QuestionId;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse analysis config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to serialize analysis config: {0}")]
    Serialize(#[source] serde_yaml::Error),
    #[error("the {0} sentiment lexicon contains an empty term")]
    EmptyLexiconTerm(&'static str),
    #[error("the theme taxonomy contains a theme with an empty name")]
    EmptyThemeName,
    #[error("'{0}' is not a unique theme name")]
    DuplicateTheme(String),
    #[error("theme '{0}' has no keywords")]
    NoKeywords(String),
    #[error("theme '{0}' contains an empty keyword")]
    EmptyKeyword(String),
}

#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse survey definition: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse survey definition: {0}")]
    Json(#[from] serde_json::Error),
    #[error("survey template '{0}' does not exist")]
    UnknownTemplate(String),
    #[error("question id {0} is used more than once")]
    DuplicateQuestionId(QuestionId),
    #[error("survey '{0}' has no questions")]
    NoQuestions(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize analysis report: {0}")]
    Serialization(#[source] serde_json::Error),
    #[error("failed to parse analysis report: {0}")]
    Deserialization(#[source] serde_json::Error),
}
