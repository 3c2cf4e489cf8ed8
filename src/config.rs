// Configuration module: collects everything the API client needs (base
// URL, instance id, bearer token, timeouts) into one explicit value that is
// handed to `ApiClient::new`. Values are layered: built-in defaults, then
// an optional TOML file, then environment variables.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.nocodebackend.com";
pub const DEFAULT_INSTANCE: &str = "54566_image_test";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_SEED_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No API key configured. Set NCB_API_KEY or add `api_key` to {0}")]
    MissingApiKey(String),

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {var}: {value:?} is not a whole number")]
    InvalidNumber { var: &'static str, value: String },
}

/// Resolved client configuration. Immutable once built.
#[derive(Clone)]
pub struct Config {
    pub base_url: String,
    pub instance: String,
    pub api_key: String,
    pub timeout: Duration,
    pub seed_delay: Duration,
}

// Keep the token out of debug output and logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("instance", &self.instance)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("seed_delay", &self.seed_delay)
            .finish()
    }
}

/// Shape of the optional TOML config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub instance: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
    pub seed_delay_ms: Option<u64>,
}

impl Config {
    /// Build a config directly, e.g. for tests against a local mock server.
    pub fn new(base_url: &str, instance: &str, api_key: &str) -> Self {
        Config {
            base_url: base_url.trim_end_matches('/').to_string(),
            instance: instance.to_string(),
            api_key: api_key.trim().to_string(),
            timeout: DEFAULT_TIMEOUT,
            seed_delay: DEFAULT_SEED_DELAY,
        }
    }

    /// Load from the config file (if present) and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path();
        let file = match &path {
            Some(p) => read_file(p)?,
            None => None,
        };
        let shown = path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "the config file".into());
        Self::from_sources(file, &shown, |var| std::env::var(var).ok())
    }

    /// Merge defaults, file values and environment lookups. `env` is a
    /// closure so callers can supply a fake environment.
    pub fn from_sources<F>(
        file: Option<FileConfig>,
        file_label: &str,
        env: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = file.unwrap_or_default();

        let base_url = env("NCB_BASE_URL")
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let instance = env("NCB_INSTANCE")
            .or(file.instance)
            .unwrap_or_else(|| DEFAULT_INSTANCE.into());
        // Shell exports and hand-edited files often leave a trailing newline.
        let api_key = env("NCB_API_KEY")
            .or(file.api_key)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey(file_label.to_string()))?;

        let timeout = match env_number(&env, "NCB_TIMEOUT_SECS")?.or(file.timeout_secs) {
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_TIMEOUT,
        };
        let seed_delay = match env_number(&env, "NCB_SEED_DELAY_MS")?.or(file.seed_delay_ms) {
            Some(ms) => Duration::from_millis(ms),
            None => DEFAULT_SEED_DELAY,
        };

        let mut config = Config::new(&base_url, &instance, &api_key);
        config.timeout = timeout;
        config.seed_delay = seed_delay;
        Ok(config)
    }
}

fn env_number<F>(env: &F, var: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match env(var) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
        None => Ok(None),
    }
}

/// `NCB_CONFIG` if set, otherwise `<config dir>/tour-images/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(p) = std::env::var("NCB_CONFIG") {
        return Some(PathBuf::from(p));
    }
    dirs::config_dir().map(|d| d.join("tour-images").join("config.toml"))
}

/// Read and parse the TOML file. A missing file yields `None`.
pub fn read_file(path: &Path) -> Result<Option<FileConfig>, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            })
        }
    };
    toml::from_str(&text)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_apply_when_only_key_is_given() {
        let cfg = Config::from_sources(None, "cfg", env_of(&[("NCB_API_KEY", "secret")])).unwrap();
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.instance, DEFAULT_INSTANCE);
        assert_eq!(cfg.api_key, "secret");
        assert_eq!(cfg.timeout, DEFAULT_TIMEOUT);
        assert_eq!(cfg.seed_delay, DEFAULT_SEED_DELAY);
    }

    #[test]
    fn env_overrides_file() {
        let file: FileConfig = toml::from_str(
            r#"
            base_url = "https://file.example/"
            instance = "from_file"
            api_key = "file-key"
            timeout_secs = 5
            seed_delay_ms = 10
            "#,
        )
        .unwrap();
        let cfg = Config::from_sources(
            Some(file),
            "cfg",
            env_of(&[("NCB_INSTANCE", "from_env"), ("NCB_SEED_DELAY_MS", "0")]),
        )
        .unwrap();
        assert_eq!(cfg.base_url, "https://file.example");
        assert_eq!(cfg.instance, "from_env");
        assert_eq!(cfg.api_key, "file-key");
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert_eq!(cfg.seed_delay, Duration::ZERO);
    }

    #[test]
    fn missing_or_blank_key_is_an_error() {
        let err = Config::from_sources(None, "cfg", env_of(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey(_)));

        let err = Config::from_sources(None, "cfg", env_of(&[("NCB_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey(_)));
    }

    #[test]
    fn key_surrounding_whitespace_is_trimmed() {
        let cfg = Config::from_sources(None, "cfg", env_of(&[("NCB_API_KEY", "tok\n")])).unwrap();
        assert_eq!(cfg.api_key, "tok");

        let file: FileConfig = toml::from_str("api_key = \"  file-tok\\r\\n\"").unwrap();
        let cfg = Config::from_sources(Some(file), "cfg", env_of(&[])).unwrap();
        assert_eq!(cfg.api_key, "file-tok");

        assert_eq!(Config::new("http://x", "i", " k\t").api_key, "k");
    }

    #[test]
    fn bad_number_is_reported() {
        let err = Config::from_sources(
            None,
            "cfg",
            env_of(&[("NCB_API_KEY", "k"), ("NCB_TIMEOUT_SECS", "soon")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("NCB_TIMEOUT_SECS"));
    }

    #[test]
    fn debug_output_hides_token() {
        let cfg = Config::new("http://x", "i", "very-secret");
        assert!(!format!("{:?}", cfg).contains("very-secret"));
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let path = std::env::temp_dir().join("tour-images-no-such-config.toml");
        assert!(read_file(&path).unwrap().is_none());
    }
}
