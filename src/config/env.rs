//! Environment overrides applied on top of file config.

use crate::error::ConfigError;

use super::Config;

pub(super) fn apply_runtime_env_overrides<FEnv>(
    config: &mut Config,
    env_lookup: &FEnv,
) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(symbol) = env_lookup("LSH_PROMPT") {
        config.prompt.symbol = symbol;
    }
    // https://no-color.org; an empty value counts as unset.
    if env_lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        config.display.color = false;
    }
    if let Some(raw) = env_lookup("LSH_MAX_CANDIDATES") {
        config.completion.max_candidates = raw.trim().parse::<usize>().map_err(|_| {
            ConfigError::Invalid(format!(
                "invalid LSH_MAX_CANDIDATES value `{raw}`: expected a positive integer"
            ))
        })?;
    }
    Ok(())
}
