pub mod analysis;
pub mod config;
pub mod errors;
pub mod export;
pub mod metrics;
pub mod model;
pub mod recommendations;
pub mod sentiment;
pub mod survey;
pub mod templates;
pub mod themes;

pub use analysis::{AnalysisResult, SurveyAnalyzer};
pub use config::AnalysisConfig;
pub use export::AnalysisReport;
pub use model::{Question, QuestionId, ResponseSet, ResponseValue, SurveyType};
pub use survey::SurveyDefinition;
pub use templates::SurveyTemplates;
