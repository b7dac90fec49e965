//! Keyword-taxonomy theme extraction across free-text answers.

use serde::{Deserialize, Serialize};

use crate::sentiment::{normalize_terms, Sentiment, SentimentScorer};

/// Maximum number of themes reported per analysis
pub const MAX_THEMES: usize = 6;

/// A named theme and the keyword substrings that indicate it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThemeDefinition {
    pub name: String,
    pub keywords: Vec<String>,
}

impl ThemeDefinition {
    pub fn new<I, S>(name: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ordered theme table. Declaration order breaks ties between themes with
/// the same number of mentions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ThemeTaxonomy {
    themes: Vec<ThemeDefinition>,
}

impl ThemeTaxonomy {
    pub fn new(themes: Vec<ThemeDefinition>) -> Self {
        Self { themes }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ThemeDefinition> {
        self.themes.iter()
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

impl Default for ThemeTaxonomy {
    fn default() -> Self {
        Self::new(vec![
            ThemeDefinition::new(
                "Product Quality",
                ["quality", "product", "item", "goods", "material"],
            ),
            ThemeDefinition::new(
                "Customer Service",
                ["service", "support", "staff", "help", "representative", "agent"],
            ),
            ThemeDefinition::new(
                "Pricing",
                ["price", "cost", "expensive", "cheap", "value", "money", "fee"],
            ),
            ThemeDefinition::new(
                "User Experience",
                [
                    "experience",
                    "interface",
                    "usability",
                    "easy",
                    "difficult",
                    "navigation",
                ],
            ),
            ThemeDefinition::new(
                "Delivery",
                ["delivery", "shipping", "fast", "slow", "package", "arrive"],
            ),
            ThemeDefinition::new(
                "Communication",
                ["communication", "contact", "response", "email", "phone", "chat"],
            ),
        ])
    }
}

impl<'a> IntoIterator for &'a ThemeTaxonomy {
    type Item = &'a ThemeDefinition;
    type IntoIter = std::slice::Iter<'a, ThemeDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.themes.iter()
    }
}

/// A theme found in the analysed answers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    /// Number of distinct theme keywords present anywhere in the answers
    pub mentions: usize,
    /// Sentiment of the answers that mention this theme
    pub sentiment: Sentiment,
}

#[derive(Debug, Clone)]
struct CompiledTheme {
    name: String,
    keywords: Vec<String>,
}

impl CompiledTheme {
    fn matches(&self, lowered_text: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| lowered_text.contains(keyword.as_str()))
    }

    fn mentions(&self, lowered_corpus: &str) -> usize {
        self.keywords
            .iter()
            .filter(|keyword| lowered_corpus.contains(keyword.as_str()))
            .count()
    }
}

#[derive(Debug, Clone)]
pub struct ThemeExtractor {
    themes: Vec<CompiledTheme>,
    scorer: SentimentScorer,
}

impl ThemeExtractor {
    pub fn new(taxonomy: &ThemeTaxonomy, scorer: SentimentScorer) -> Self {
        let themes = taxonomy
            .iter()
            .map(|theme| CompiledTheme {
                name: theme.name.clone(),
                keywords: normalize_terms(&theme.keywords),
            })
            .collect();

        Self { themes, scorer }
    }

    /// Find the themes present in `texts`, most-mentioned first, at most
    /// [`MAX_THEMES`] of them.
    pub fn extract<S: AsRef<str>>(&self, texts: &[S]) -> Vec<Theme> {
        if texts.is_empty() {
            return Vec::new();
        }

        let lowered: Vec<String> = texts.iter().map(|t| t.as_ref().to_lowercase()).collect();
        let corpus = lowered.join(" ");

        let mut themes = Vec::new();
        for theme in &self.themes {
            let mentions = theme.mentions(&corpus);
            if mentions == 0 {
                continue;
            }

            // Only the answers that actually talk about this theme decide its tone
            let theme_text = texts
                .iter()
                .zip(&lowered)
                .filter(|(_, lowered_text)| theme.matches(lowered_text))
                .map(|(text, _)| text.as_ref())
                .collect::<Vec<_>>()
                .join(" ");

            themes.push(Theme {
                name: theme.name.clone(),
                mentions,
                sentiment: self.scorer.classify(&theme_text),
            });
        }

        // stable: equal mention counts keep taxonomy order
        themes.sort_by(|a, b| b.mentions.cmp(&a.mentions));
        themes.truncate(MAX_THEMES);
        themes
    }
}

impl Default for ThemeExtractor {
    fn default() -> Self {
        Self::new(&ThemeTaxonomy::default(), SentimentScorer::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn theme<'a>(themes: &'a [Theme], name: &str) -> &'a Theme {
        themes
            .iter()
            .find(|t| t.name == name)
            .unwrap_or_else(|| panic!("theme {} not found in {:?}", name, themes))
    }

    #[test]
    fn test_empty_input_has_no_themes() {
        let extractor = ThemeExtractor::default();
        let texts: Vec<String> = Vec::new();
        assert!(extractor.extract(&texts).is_empty());
    }

    #[test]
    fn test_text_without_keywords_has_no_themes() {
        let extractor = ThemeExtractor::default();
        assert!(extractor.extract(&["Nothing to add here"]).is_empty());
    }

    #[test]
    fn test_pricing_and_service_example() {
        let extractor = ThemeExtractor::default();
        let text = "The pricing is too expensive and support was great";
        let themes = extractor.extract(&[text]);

        let pricing = theme(&themes, "Pricing");
        assert_eq!(pricing.mentions, 1);

        let service = theme(&themes, "Customer Service");
        assert_eq!(service.mentions, 1);
        assert_eq!(service.sentiment, Sentiment::Positive);

        // a single answer mentioning both themes gives both the same tone
        assert_eq!(pricing.sentiment, SentimentScorer::default().classify(text));
    }

    #[test]
    fn test_mentions_count_distinct_keywords() {
        let extractor = ThemeExtractor::default();
        let themes = extractor.extract(&[
            "price price price",
            "the cost is fine, PRICE too",
        ]);
        assert_eq!(
            themes,
            vec![Theme {
                name: "Pricing".to_string(),
                mentions: 2,
                sentiment: Sentiment::Neutral,
            }]
        );
    }

    #[test]
    fn test_theme_sentiment_uses_only_matching_answers() {
        let extractor = ThemeExtractor::default();
        let themes = extractor.extract(&[
            "Shipping was terrible and the package was awful",
            "The staff were wonderful, great help",
        ]);

        assert_eq!(theme(&themes, "Delivery").sentiment, Sentiment::Negative);
        assert_eq!(
            theme(&themes, "Customer Service").sentiment,
            Sentiment::Positive
        );
    }

    #[test]
    fn test_themes_sorted_by_mentions_with_stable_ties() {
        let extractor = ThemeExtractor::default();
        let themes = extractor.extract(&[
            "fast delivery, shipping and package handling",
            "good product",
            "fair price",
        ]);

        let names: Vec<&str> = themes.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Delivery", "Product Quality", "Pricing"]);
        assert!(themes.windows(2).all(|w| w[0].mentions >= w[1].mentions));
    }

    #[test]
    fn test_at_most_six_themes() {
        let taxonomy = ThemeTaxonomy::new(
            (0..10)
                .map(|i| ThemeDefinition::new(format!("Theme {}", i), [format!("kw{}", i)]))
                .collect(),
        );
        let extractor = ThemeExtractor::new(&taxonomy, SentimentScorer::default());
        let text = (0..10).map(|i| format!("kw{}", i)).collect::<Vec<_>>().join(" ");

        let themes = extractor.extract(&[text]);
        assert_eq!(themes.len(), MAX_THEMES);
        assert_eq!(themes[0].name, "Theme 0");
        assert_eq!(themes[5].name, "Theme 5");
    }

    #[test]
    fn test_custom_taxonomy_is_case_insensitive() {
        let taxonomy = ThemeTaxonomy::new(vec![ThemeDefinition::new(
            "Onboarding",
            ["Onboarding", "first day"],
        )]);
        let extractor = ThemeExtractor::new(&taxonomy, SentimentScorer::default());
        let themes = extractor.extract(&["My FIRST DAY was great"]);
        assert_eq!(themes.len(), 1);
        assert_eq!(themes[0].mentions, 1);
        assert_eq!(themes[0].sentiment, Sentiment::Positive);
    }

    #[test]
    fn test_extract_is_idempotent() {
        let extractor = ThemeExtractor::default();
        let texts = ["Easy interface but slow email response", "Great value"];
        assert_eq!(extractor.extract(&texts), extractor.extract(&texts));
    }
}
