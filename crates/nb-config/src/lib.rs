//! Configuration management for nb.
//!
//! Parses `nb.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `notion.base_url`
//! - `blog.page_id`
//! - `blog.view_id`
//! - `blog.name_property`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the Notion API base URL.
    pub base_url: Option<String>,
    /// Override the number of records requested per page.
    pub page_size: Option<usize>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "nb.toml";

/// Upper bound accepted for `notion.page_size`.
const MAX_PAGE_SIZE: usize = 1000;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Notion API configuration.
    pub notion: NotionConfig,
    /// Blog table configuration (optional section).
    pub blog: Option<BlogConfig>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Notion API configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NotionConfig {
    /// API base URL, without trailing slash.
    pub base_url: String,
    /// Records requested per `loadPageChunk` call.
    pub page_size: usize,
    /// Global HTTP timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum number of pages fetched for a single document.
    pub max_pages: usize,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.notion.so/api/v3".to_owned(),
            page_size: 100,
            timeout_secs: 30,
            max_pages: 10_000,
        }
    }
}

/// Blog table configuration.
///
/// Points at the Notion page hosting the posts table and the view used
/// to query it.
#[derive(Debug, Deserialize)]
pub struct BlogConfig {
    /// Page hosting the posts table.
    pub page_id: String,
    /// Collection view of the posts table.
    pub view_id: String,
    /// Property whose plain text is used as the post name.
    #[serde(default = "default_name_property")]
    pub name_property: String,
}

impl BlogConfig {
    /// Validate that all required fields are set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.page_id, "blog.page_id")?;
        require_non_empty(&self.view_id, "blog.view_id")?;
        require_non_empty(&self.name_property, "blog.name_property")?;
        Ok(())
    }
}

fn default_name_property() -> String {
    "title".to_owned()
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`notion.base_url`").
        field: String,
        /// Error message (e.g., "${`NOTION_API`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `nb.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied last and validated together with the file.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }
        config.validate()?;

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base_url) = &settings.base_url {
            self.notion.base_url.clone_from(base_url);
        }
        if let Some(page_size) = settings.page_size {
            self.notion.page_size = page_size;
        }
    }

    /// Get validated blog configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the `[blog]` section is missing or invalid.
    pub fn require_blog(&self) -> Result<&BlogConfig, ConfigError> {
        let blog = self
            .blog
            .as_ref()
            .ok_or_else(|| ConfigError::Validation("[blog] section required in config".into()))?;
        blog.validate()?;
        Ok(blog)
    }

    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// The `[blog]` section is validated lazily by [`Config::require_blog`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let notion = &self.notion;
        require_non_empty(&notion.base_url, "notion.base_url")?;
        require_http_url(&notion.base_url, "notion.base_url")?;

        if notion.page_size == 0 {
            return Err(ConfigError::Validation(
                "notion.page_size must be greater than 0".to_owned(),
            ));
        }
        if notion.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::Validation(format!(
                "notion.page_size cannot exceed {MAX_PAGE_SIZE}"
            )));
        }
        if notion.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "notion.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        if notion.max_pages == 0 {
            return Err(ConfigError::Validation(
                "notion.max_pages must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.notion.base_url = expand::expand_env(&self.notion.base_url, "notion.base_url")?;

        if let Some(ref mut blog) = self.blog {
            blog.page_id = expand::expand_env(&blog.page_id, "blog.page_id")?;
            blog.view_id = expand::expand_env(&blog.view_id, "blog.view_id")?;
            blog.name_property = expand::expand_env(&blog.name_property, "blog.name_property")?;
        }

        Ok(())
    }
}
