//! Analysis configuration.
//!
//! Every section has a built-in default, so an empty document (or a missing
//! config file) gives the stock lexicon, taxonomy and thresholds. A typical
//! override looks like:
//!
//! ```yaml
//! sentiment:
//!   positive: [good, great, smooth]
//! themes:
//!   - name: Onboarding
//!     keywords: [onboarding, first day, training]
//! recommendations:
//!   low_rating: 3.5
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::errors::ConfigError;
use crate::recommendations::RecommendationThresholds;
use crate::sentiment::SentimentLexicon;
use crate::themes::ThemeTaxonomy;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub sentiment: SentimentLexicon,
    #[serde(default)]
    pub themes: ThemeTaxonomy,
    #[serde(default)]
    pub recommendations: RecommendationThresholds,
}

impl AnalysisConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: AnalysisConfig = if contents.trim().is_empty() {
            AnalysisConfig::default()
        } else {
            serde_yaml::from_str(contents)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(ConfigError::Serialize)
    }

    /// Reject tables that would silently misbehave: an empty term or keyword
    /// is a substring of every text.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sentiment.positive.iter().any(|t| t.trim().is_empty()) {
            return Err(ConfigError::EmptyLexiconTerm("positive"));
        }
        if self.sentiment.negative.iter().any(|t| t.trim().is_empty()) {
            return Err(ConfigError::EmptyLexiconTerm("negative"));
        }

        let mut names = HashSet::new();
        for theme in &self.themes {
            let name = theme.name.trim();
            if name.is_empty() {
                return Err(ConfigError::EmptyThemeName);
            }
            if !names.insert(name.to_lowercase()) {
                return Err(ConfigError::DuplicateTheme(theme.name.clone()));
            }
            if theme.keywords.is_empty() {
                return Err(ConfigError::NoKeywords(theme.name.clone()));
            }
            if theme.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(ConfigError::EmptyKeyword(theme.name.clone()));
            }
        }

        Ok(())
    }
}
