//! Configuration model.
//!
//! Values are layered: built-in defaults, then an optional `config.toml`,
//! then environment variables (a `.env` file is loaded into the environment
//! by the binary before this runs). Everything is read once at startup.
//!
//! Loading happens before logging is set up, so rejected values are collected
//! in [`Config::warnings`] for the caller to log.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";
pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TMDb configuration.
    pub tmdb: TmdbConfig,
    /// Verbose diagnostics on stderr.
    pub debug: bool,
    /// Values that were rejected while loading, with the fallback used.
    #[serde(skip)]
    pub warnings: Vec<String>,
}

/// TMDb configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
    /// v3 API key, sent as the `api_key` query parameter.
    pub api_key: Option<String>,
    /// v4 read access token. Accepted but not used for requests.
    pub read_access_token: Option<String>,
    /// Language tag sent with every request.
    pub language: String,
    /// Whether adult titles are included in results.
    pub include_adult: bool,
    /// Request timeout in seconds.
    pub timeout: u64,
    /// API base URL.
    pub base_url: String,
    /// Image CDN base URL.
    pub image_base_url: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            read_access_token: None,
            language: DEFAULT_LANGUAGE.to_string(),
            include_adult: false,
            timeout: DEFAULT_TIMEOUT_SECS,
            base_url: DEFAULT_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
        }
    }
}

// Keeps secrets out of debug logs.
impl std::fmt::Debug for TmdbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbConfig")
            .field("api_key_configured", &self.api_key_configured())
            .field(
                "read_access_token_configured",
                &self.read_access_token.is_some(),
            )
            .field("language", &self.language)
            .field("include_adult", &self.include_adult)
            .field("timeout", &self.timeout)
            .field("base_url", &self.base_url)
            .field("image_base_url", &self.image_base_url)
            .finish()
    }
}

impl TmdbConfig {
    /// Create a config with the given API key and defaults for everything else.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    /// Whether a non-empty API key is present.
    pub fn api_key_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

impl Config {
    /// Load configuration from the default config file and the process environment.
    pub fn load(config_path: Option<&Path>) -> crate::Result<Self> {
        let path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| config_dir().join("config.toml"));
        Self::from_sources(Some(path.as_path()), |key| std::env::var(key).ok())
    }

    /// Layer a config file (if it exists) and environment lookups over the defaults.
    pub fn from_sources<F>(config_file: Option<&Path>, env: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match config_file {
            Some(path) if path.exists() => {
                let mut config = load_file(path)?;
                if config.tmdb.timeout == 0 {
                    config.warnings.push(format!(
                        "Ignoring invalid timeout 0 in {}, using {}s",
                        path.display(),
                        DEFAULT_TIMEOUT_SECS
                    ));
                    config.tmdb.timeout = DEFAULT_TIMEOUT_SECS;
                }
                config
            }
            _ => Config::default(),
        };

        config.apply_env(env);
        Ok(config)
    }

    fn apply_env<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = env("TMDB_API_KEY") {
            self.tmdb.api_key = Some(key.trim().to_string());
        }
        if let Some(token) = env("TMDB_READ_ACCESS_TOKEN") {
            self.tmdb.read_access_token = Some(token.trim().to_string());
        }
        if let Some(value) = env("INCLUDE_ADULT") {
            match parse_flag(&value) {
                Some(flag) => self.tmdb.include_adult = flag,
                None => self.reject("INCLUDE_ADULT", &value, self.tmdb.include_adult),
            }
        }
        if let Some(language) = env("DEFAULT_LANGUAGE") {
            self.tmdb.language = language.trim().to_string();
        }
        if let Some(value) = env("API_TIMEOUT") {
            match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => self.tmdb.timeout = secs,
                _ => self.reject("API_TIMEOUT", &value, format!("{}s", self.tmdb.timeout)),
            }
        }
        if let Some(url) = env("TMDB_BASE_URL") {
            self.tmdb.base_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(value) = env("DEBUG") {
            match parse_flag(&value) {
                Some(flag) => self.debug = flag,
                None => self.reject("DEBUG", &value, self.debug),
            }
        }
    }

    fn reject(&mut self, name: &str, value: &str, kept: impl std::fmt::Display) {
        self.warnings
            .push(format!("Ignoring invalid {} value {:?}, using {}", name, value, kept));
    }
}

/// Parse a boolean environment flag; `None` when unrecognised.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn load_file(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|source| crate::Error::ConfigFile {
        path: path.display().to_string(),
        source,
    })
}

/// Get the configuration directory path.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("movie_tv_mcp")
}
