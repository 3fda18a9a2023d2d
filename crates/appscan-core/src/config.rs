//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults + `config.toml` + `config.<env>.toml`
//! + `APPSCAN_*` env vars (`__` separates nested keys). Provides helpers to
//! expand `~` and `${VAR}` and to resolve relative paths against a known base
//! directory.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::types::{LexiconSpec, Rounding};

pub const DEFAULT_MAX_DISTANCE: usize = 3;
pub const DEFAULT_LISTING_THRESHOLD: u32 = 3;
pub const DEFAULT_REVIEW_THRESHOLD: u32 = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingSettings {
    /// Names match when their normalized distance is strictly below this.
    pub max_distance: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringSettings {
    pub listing_threshold: u32,
    pub review_threshold: u32,
    pub rounding: Rounding,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub matching: MatchingSettings,
    pub scoring: ScoringSettings,
    pub lexicon: LexiconSpec,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            matching: MatchingSettings { max_distance: DEFAULT_MAX_DISTANCE },
            scoring: ScoringSettings {
                listing_threshold: DEFAULT_LISTING_THRESHOLD,
                review_threshold: DEFAULT_REVIEW_THRESHOLD,
                rounding: Rounding::default(),
            },
            lexicon: LexiconSpec::default(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.matching.max_distance == 0 {
            return Err(Error::InvalidConfig("matching.max_distance must be > 0; nothing could ever match".to_string()));
        }
        if self.scoring.listing_threshold == 0 {
            return Err(Error::InvalidConfig("scoring.listing_threshold must be > 0".to_string()));
        }
        if self.scoring.review_threshold == 0 {
            return Err(Error::InvalidConfig("scoring.review_threshold must be > 0".to_string()));
        }
        Ok(())
    }
}

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_from(Path::new("."), &env_name)
    }

    pub fn load_from(base: &Path, env_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(base.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(base.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(base.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(base.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APPSCAN_").split("__"));

        let config = Self { figment };
        config.settings()?;
        tracing::info!(env = env_name, base = %base.display(), "configuration loaded");
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// Typed settings, validated.
    pub fn settings(&self) -> anyhow::Result<Settings> {
        let settings: Settings = self
            .figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to extract settings: {}", e))?;
        settings.validate()?;
        Ok(settings)
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
