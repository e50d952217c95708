//! `pipeforge.toml` settings.
//!
//! Every section is optional. Command-line flags take precedence over values
//! read here.
//!
//! ```toml
//! [output]
//! github = ".github/workflows/pipeline.yml"
//!
//! [publish]
//! repository = "acme/web"
//! token_env = "PIPEFORGE_GITHUB_TOKEN"
//!
//! [log]
//! level = "info"
//! format = "json"
//! filter = "pipeforge_ci=trace,pipeforge=info"
//! ```

use crate::cli::CliError;
use crate::logging::{LogLevel, TracingFormat};
use pipeforge_ci::Format;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File looked up in the working directory when no path is given
pub const DEFAULT_SETTINGS_FILE: &str = "pipeforge.toml";

/// Top-level settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Output path overrides
    pub output: OutputSettings,
    /// Repository publishing
    pub publish: PublishSettings,
    /// Logging
    pub log: LogSettings,
}

/// Where `generate --write` and `push` put each format
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    /// Path for GitHub Actions output
    pub github: Option<String>,
    /// Path for GitLab CI output
    pub gitlab: Option<String>,
}

impl OutputSettings {
    /// The configured path for a format, or its conventional path
    #[must_use]
    pub fn path(&self, format: Format) -> &str {
        let configured = match format {
            Format::Github => self.github.as_deref(),
            Format::Gitlab => self.gitlab.as_deref(),
        };
        configured.unwrap_or_else(|| format.output_path())
    }
}

/// Publishing defaults
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PublishSettings {
    /// Default `owner/name`
    pub repository: Option<String>,
    /// Environment variable holding the token
    pub token_env: String,
}

impl Default for PublishSettings {
    fn default() -> Self {
        Self {
            repository: None,
            token_env: pipeforge_github::publish::TOKEN_ENV.to_string(),
        }
    }
}

impl PublishSettings {
    /// Read the token from the configured environment variable
    #[must_use]
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|token| !token.is_empty())
    }
}

/// Logging defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSettings {
    /// Level for pipeforge crates
    pub level: Option<LogLevel>,
    /// Output format
    pub format: Option<TracingFormat>,
    /// Full filter directive, replacing `level` and `RUST_LOG`
    pub filter: Option<String>,
}

impl Settings {
    /// Parse settings from TOML text
    ///
    /// # Errors
    /// Returns a configuration error if the text is not valid settings TOML.
    pub fn parse(text: &str, origin: &Path) -> Result<Self, CliError> {
        toml::from_str(text).map_err(|e| {
            CliError::config_with_help(
                format!("Invalid settings in {}: {e}", origin.display()),
                "Known sections are [output], [publish] and [log]",
            )
        })
    }

    /// Load settings.
    ///
    /// With an explicit path the file must exist. Without one,
    /// `pipeforge.toml` in the working directory is read when present and
    /// defaults are used otherwise.
    ///
    /// # Errors
    /// Returns a configuration error if the file cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self, CliError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = PathBuf::from(DEFAULT_SETTINGS_FILE);
                if !path.is_file() {
                    debug!("No {DEFAULT_SETTINGS_FILE} found, using defaults");
                    return Ok(Self::default());
                }
                path
            }
        };

        let text = std::fs::read_to_string(&path).map_err(|e| {
            CliError::config(format!("Failed to read settings {}: {e}", path.display()))
        })?;
        debug!(path = %path.display(), "Loaded settings");
        Self::parse(&text, &path)
    }
}
