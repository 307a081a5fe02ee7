use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{engine::DEFAULT_MAX_WORDS, gaps::Intensity};

/// Config file names, first match wins.
const CONFIG_FILES: [&str; 4] =
    ["seedwright.toml", "seedwright.yaml", "seedwright.json", ".seedwright.toml"];

/// Environment prefix; nested keys use a double underscore (`SEEDWRIGHT__MAX_WORDS`).
const ENV_PREFIX: &str = "SEEDWRIGHT";

/// Per-call defaults a host would otherwise hard-code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhanceOptions
{
    /// Fill-rate tier
    pub intensity: Intensity,

    /// Output word budget
    pub max_words: usize,
}

impl Default for EnhanceOptions
{
    fn default() -> Self
    {
        Self { intensity: Intensity::default(), max_words: DEFAULT_MAX_WORDS }
    }
}

/// Load options from the working directory and the environment.
pub fn load_options() -> Result<EnhanceOptions>
{
    load_options_from(Path::new("."))
}

/// Load options from the first config file found in `dir`, then overlay the environment.
pub fn load_options_from(dir: &Path) -> Result<EnhanceOptions>
{
    let mut builder = config::Config::builder();

    for name in &CONFIG_FILES
    {
        let path = dir.join(name);
        if path.exists()
        {
            builder = builder.add_source(config::File::from(path));
            break;
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: EnhanceOptions = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_defaults()
    {
        let opts = EnhanceOptions::default();
        assert_eq!(opts.intensity, Intensity::Moderate);
        assert_eq!(opts.max_words, 150);
    }

    #[test]
    fn test_partial_json_fills_defaults()
    {
        let opts: EnhanceOptions = serde_json::from_str(r#"{"intensity": "light"}"#).unwrap();
        assert_eq!(opts, EnhanceOptions { intensity: Intensity::Light, max_words: 150 });
    }
}
