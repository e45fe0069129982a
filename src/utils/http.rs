// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};

use crate::error::{AppError, Result};
use crate::models::FetcherConfig;

/// Headers making requests look like a regular browser navigation.
pub fn browser_headers(config: &FetcherConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_str(&config.accept_language)
            .map_err(|e| AppError::config(format!("invalid accept_language: {e}")))?,
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    Ok(headers)
}

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &FetcherConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .default_headers(browser_headers(config)?)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_headers() {
        let headers = browser_headers(&FetcherConfig::default()).unwrap();
        assert_eq!(
            headers.get(header::ACCEPT_LANGUAGE).unwrap(),
            "fr-FR,fr;q=0.9,en;q=0.8"
        );
        assert!(headers.contains_key(header::ACCEPT));
    }

    #[test]
    fn test_invalid_accept_language_is_config_error() {
        let config = FetcherConfig {
            accept_language: "fr\nFR".to_string(),
            ..FetcherConfig::default()
        };
        assert!(matches!(
            browser_headers(&config),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_create_async_client() {
        assert!(create_async_client(&FetcherConfig::default()).is_ok());
    }
}
