//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Placeholder in `source.url_template` replaced by the tracking number.
pub const TRACKING_NUMBER_PLACEHOLDER: &str = "{tracking_number}";

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Aggregator settings
    #[serde(default)]
    pub source: SourceConfig,

    /// Page fetching behavior
    #[serde(default)]
    pub fetcher: FetcherConfig,

    /// HTTP endpoint settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Localized placeholders and messages
    #[serde(default)]
    pub locale: LocaleConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Override values from `TRACKER_*` variables.
    ///
    /// `lookup` is usually `|key| std::env::var(key).ok()`. Values that do not
    /// parse are ignored with a warning.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(template) = lookup("TRACKER_URL_TEMPLATE") {
            self.source.url_template = template;
        }

        if let Some(kind) = lookup("TRACKER_FETCHER") {
            match kind.to_lowercase().as_str() {
                "http" => self.fetcher.kind = FetcherKind::Http,
                "browser" => self.fetcher.kind = FetcherKind::Browser,
                other => log::warn!("Ignoring unknown TRACKER_FETCHER value '{other}'"),
            }
        }

        if let Some(timeout) = lookup("TRACKER_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => self.fetcher.timeout_secs = secs,
                Err(_) => log::warn!("Ignoring invalid TRACKER_TIMEOUT_SECS '{timeout}'"),
            }
        }

        if let Some(concurrent) = lookup("TRACKER_MAX_CONCURRENT") {
            match concurrent.parse() {
                Ok(n) => self.fetcher.max_concurrent = n,
                Err(_) => log::warn!("Ignoring invalid TRACKER_MAX_CONCURRENT '{concurrent}'"),
            }
        }

        if let Some(path) = lookup("TRACKER_CHROME_EXECUTABLE") {
            self.fetcher.chrome_executable = Some(PathBuf::from(path));
        }

        if let Some(addr) = lookup("TRACKER_BIND_ADDR") {
            self.server.bind_addr = addr;
        }

        if let Some(level) = lookup("TRACKER_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if !self
            .source
            .url_template
            .contains(TRACKING_NUMBER_PLACEHOLDER)
        {
            return Err(AppError::validation(format!(
                "source.url_template must contain {TRACKING_NUMBER_PLACEHOLDER}"
            )));
        }
        url::Url::parse(&self.source.url_for("TEST"))?;

        if self.fetcher.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetcher.user_agent is empty"));
        }
        if !(1..=120).contains(&self.fetcher.timeout_secs) {
            return Err(AppError::validation(
                "fetcher.timeout_secs must be between 1 and 120",
            ));
        }
        if self.fetcher.max_concurrent == 0 {
            return Err(AppError::validation("fetcher.max_concurrent must be > 0"));
        }
        if self.server.bind_addr.parse::<std::net::SocketAddr>().is_err() {
            return Err(AppError::validation(format!(
                "server.bind_addr '{}' is not a socket address",
                self.server.bind_addr
            )));
        }
        self.locale.placeholders.validate()?;
        Ok(())
    }
}

/// The tracking aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Page URL with a `{tracking_number}` placeholder
    #[serde(default = "defaults::url_template")]
    pub url_template: String,
}

impl SourceConfig {
    /// Page URL for an already URL-encoded tracking number.
    pub fn url_for(&self, encoded_number: &str) -> String {
        self.url_template
            .replace(TRACKING_NUMBER_PLACEHOLDER, encoded_number)
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url_template: defaults::url_template(),
        }
    }
}

/// Which fetcher implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FetcherKind {
    /// Plain HTTP GET with browser-like headers
    #[default]
    Http,
    /// Headless Chromium session
    Browser,
}

impl FetcherKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetcherKind::Http => "http",
            FetcherKind::Browser => "browser",
        }
    }
}

/// Page fetching behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Fetcher implementation
    #[serde(default)]
    pub kind: FetcherKind,

    /// User-Agent header sent to the aggregator
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Accept-Language header sent to the aggregator
    #[serde(default = "defaults::accept_language")]
    pub accept_language: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum concurrent lookups when tracking several numbers
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Chromium binary for the browser fetcher (auto-detected when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chrome_executable: Option<PathBuf>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            kind: FetcherKind::default(),
            user_agent: defaults::user_agent(),
            accept_language: defaults::accept_language(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
            chrome_executable: None,
        }
    }
}

/// HTTP endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "defaults::bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: defaults::bind_addr(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,

    /// Emit JSON lines from the server
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            json: false,
        }
    }
}

/// Localized strings shown to users.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocaleConfig {
    #[serde(default)]
    pub placeholders: Placeholders,

    #[serde(default)]
    pub messages: Messages,
}

/// Substitutes for fields extraction could not resolve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Placeholders {
    #[serde(default = "defaults::ph_status")]
    pub status: String,
    #[serde(default = "defaults::ph_location")]
    pub location: String,
    #[serde(default = "defaults::ph_carrier")]
    pub carrier: String,
    #[serde(default = "defaults::ph_estimated_delivery")]
    pub estimated_delivery: String,
    #[serde(default = "defaults::ph_event_date")]
    pub event_date: String,
}

impl Placeholders {
    fn validate(&self) -> Result<()> {
        let all = [
            ("status", &self.status),
            ("location", &self.location),
            ("carrier", &self.carrier),
            ("estimated_delivery", &self.estimated_delivery),
            ("event_date", &self.event_date),
        ];
        for (name, value) in all {
            if value.trim().is_empty() {
                return Err(AppError::validation(format!(
                    "locale.placeholders.{name} is empty"
                )));
            }
        }
        Ok(())
    }
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            status: defaults::ph_status(),
            location: defaults::ph_location(),
            carrier: defaults::ph_carrier(),
            estimated_delivery: defaults::ph_estimated_delivery(),
            event_date: defaults::ph_event_date(),
        }
    }
}

/// Error messages returned to API callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Messages {
    #[serde(default = "defaults::msg_missing_tracking_number")]
    pub missing_tracking_number: String,
    #[serde(default = "defaults::msg_fetch_failed")]
    pub fetch_failed: String,
    #[serde(default = "defaults::msg_method_not_allowed")]
    pub method_not_allowed: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            missing_tracking_number: defaults::msg_missing_tracking_number(),
            fetch_failed: defaults::msg_fetch_failed(),
            method_not_allowed: defaults::msg_method_not_allowed(),
        }
    }
}

mod defaults {
    // Source defaults
    pub fn url_template() -> String {
        "https://parcelsapp.com/fr/tracking/{tracking_number}".into()
    }

    // Fetcher defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36"
            .into()
    }
    pub fn accept_language() -> String {
        "fr-FR,fr;q=0.9,en;q=0.8".into()
    }
    pub fn timeout() -> u64 {
        15
    }
    pub fn max_concurrent() -> usize {
        4
    }

    // Server defaults
    pub fn bind_addr() -> String {
        "127.0.0.1:3000".into()
    }

    // Logging defaults
    pub fn log_level() -> String {
        "info".into()
    }

    // Placeholder defaults
    pub fn ph_status() -> String {
        "Statut inconnu".into()
    }
    pub fn ph_location() -> String {
        "Localisation inconnue".into()
    }
    pub fn ph_carrier() -> String {
        "Transporteur inconnu".into()
    }
    pub fn ph_estimated_delivery() -> String {
        "Non disponible".into()
    }
    pub fn ph_event_date() -> String {
        "Date inconnue".into()
    }

    // Message defaults
    pub fn msg_missing_tracking_number() -> String {
        "Veuillez entrer un numéro de suivi".into()
    }
    pub fn msg_fetch_failed() -> String {
        "Erreur lors de la récupération du suivi".into()
    }
    pub fn msg_method_not_allowed() -> String {
        "Méthode non autorisée".into()
    }
}
