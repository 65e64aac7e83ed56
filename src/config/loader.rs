//! Top-level config loading pipeline.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::env::apply_runtime_env_overrides;
use super::sources::{config_root_dir, read_config_text_with_sources, ConfigSource};
use super::Config;

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from --config flag).
pub fn load_config(path_override: Option<&str>) -> Result<Config, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

pub(super) fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&str>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<Config, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let (config_text, source) =
        read_config_text_with_sources(path_override, &read_file, &config_root)?;
    match &source {
        ConfigSource::Explicit(path) | ConfigSource::Global(path) => {
            tracing::debug!(path = %path.display(), "loaded config file");
        }
        ConfigSource::Local => tracing::debug!("loaded ./lsh.toml"),
        ConfigSource::BuiltInDefaults => tracing::debug!("no config file, using defaults"),
    }

    let mut config: Config = toml::from_str(&config_text)?;
    apply_runtime_env_overrides(&mut config, &env_lookup)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.completion.max_candidates == 0 {
        return Err(ConfigError::Invalid(
            "completion.max_candidates must be at least 1".into(),
        ));
    }
    if config.editor.max_line_length == 0 {
        return Err(ConfigError::Invalid(
            "editor.max_line_length must be at least 1".into(),
        ));
    }
    Ok(())
}
