use crate::functions::DEFAULT_ROW_LIMIT;
use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for [`ConditionEvaluator`](crate::evaluator::ConditionEvaluator).
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Upper bound on candidate combinations bound by one existential scope.
    pub row_limit: usize,
    /// Evaluate entities on the rayon thread pool.
    pub parallel: bool,
    /// Sort null keys before all others instead of after.
    pub nulls_first: bool,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            row_limit: DEFAULT_ROW_LIMIT,
            parallel: false,
            nulls_first: false,
        }
    }
}

impl EvaluatorConfig {
    /// Loads settings from a file, with `PATHCOND_*` environment overrides.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path))
            .add_source(::config::Environment::with_prefix("PATHCOND").try_parsing(true))
            .build()
            .with_context(|| format!("Config: Failed to read {}", path.display()))?;
        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.row_limit == 0 {
            bail!("Config: row_limit must be at least 1");
        }
        Ok(())
    }
}
