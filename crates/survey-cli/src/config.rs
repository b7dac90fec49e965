use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use survey_analysis::AnalysisConfig;
use tracing::debug;

pub const CONFIG_ENV_VAR: &str = "SURVEY_INSIGHTS_CONFIG";
const CONFIG_DIR_NAME: &str = "survey-insights";
const CONFIG_FILE_NAME: &str = "analysis.yaml";

/// Where the analysis config comes from, in order of precedence: the
/// `--config` flag, `$SURVEY_INSIGHTS_CONFIG`, then
/// `<config dir>/survey-insights/analysis.yaml` if it exists.
pub fn resolve_config_path(
    explicit: Option<&Path>,
    env_value: Option<OsString>,
    config_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(value));
    }

    config_dir
        .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file())
}

/// Load the analysis config, falling back to the built-in tables when no
/// config file is found
pub fn load_config(explicit: Option<&Path>) -> Result<AnalysisConfig> {
    let path = resolve_config_path(
        explicit,
        std::env::var_os(CONFIG_ENV_VAR),
        dirs::config_dir(),
    );

    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading analysis config");
            AnalysisConfig::from_path(&path)
                .with_context(|| format!("invalid analysis config {}", path.display()))
        }
        None => {
            debug!("no analysis config found, using built-in defaults");
            Ok(AnalysisConfig::default())
        }
    }
}
