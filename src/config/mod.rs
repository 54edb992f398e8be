pub mod cli;

use crate::adapters::http::DEFAULT_USER_AGENT;
use crate::core::ConfigProvider;
use crate::domain::ports::HeaderPolicy;
use crate::utils::error::{Result, ScrapeError};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_pattern, validate_range,
    validate_url, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::env;

/// Listing pages the CLI accepts: district (`ps32?`) and abroad (`ps36?`).
pub const LISTING_URL_PATTERN: &str = r"^https://www\.volby\.cz/pls/ps2017nss/ps3[26]\?";

pub const MAX_CONCURRENT_REQUESTS: usize = 32;

/// Knobs read from the environment; the command line only carries the two positionals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeSettings {
    pub concurrent_requests: usize,
    pub header_policy: HeaderPolicy,
    pub user_agent: String,
    pub monitor: bool,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            concurrent_requests: 1,
            header_policy: HeaderPolicy::First,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            monitor: false,
        }
    }
}

impl ScrapeSettings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ScrapeSettings::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let concurrent_requests = match lookup("VOLBY_CONCURRENT_REQUESTS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ScrapeError::InvalidArgument {
                    field: "VOLBY_CONCURRENT_REQUESTS".to_string(),
                    value: raw.clone(),
                    reason: "expected a positive integer".to_string(),
                })?,
            None => defaults.concurrent_requests,
        };

        let header_policy = match lookup("VOLBY_HEADER_POLICY").as_deref().map(str::trim) {
            None | Some("") => defaults.header_policy,
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "first" => HeaderPolicy::First,
                "union" => HeaderPolicy::Union,
                _ => {
                    return Err(ScrapeError::InvalidArgument {
                        field: "VOLBY_HEADER_POLICY".to_string(),
                        value: raw.to_string(),
                        reason: "expected 'first' or 'union'".to_string(),
                    })
                }
            },
        };

        let user_agent = lookup("VOLBY_USER_AGENT").unwrap_or(defaults.user_agent);

        let monitor = lookup("VOLBY_MONITOR")
            .map(|raw| matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.monitor);

        Ok(Self {
            concurrent_requests,
            header_policy,
            user_agent,
            monitor,
        })
    }
}

impl Validate for ScrapeSettings {
    fn validate(&self) -> Result<()> {
        validate_range(
            "concurrent_requests",
            self.concurrent_requests,
            1,
            MAX_CONCURRENT_REQUESTS,
        )?;
        validate_non_empty_string("user_agent", &self.user_agent)?;
        Ok(())
    }
}

#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "volby-scrape", version))]
#[cfg_attr(
    feature = "cli",
    command(about = "Scrape 2017 Chamber of Deputies election results from volby.cz into CSV")
)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Listing URL from column 'Výběr obce' at https://www.volby.cz/pls/ps2017nss/ps3?xjazyk=CZ
    pub url: String,

    /// Export filename, e.g. election_results.csv
    pub filename: String,

    #[cfg_attr(feature = "cli", arg(skip))]
    pub settings: ScrapeSettings,
}

impl CliConfig {
    pub fn new(url: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
            settings: ScrapeSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ScrapeSettings) -> Self {
        self.settings = settings;
        self
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.filename.starts_with("https://") && !self.url.starts_with("https://") {
            return Err(ScrapeError::SwappedArguments);
        }

        validate_url("url", &self.url)?;
        let pattern = Regex::new(LISTING_URL_PATTERN).map_err(|e| ScrapeError::Processing {
            message: format!("invalid listing URL pattern: {}", e),
        })?;
        validate_pattern("url", &self.url, &pattern)?;
        validate_file_extension("filename", &self.filename, "csv")?;
        self.settings.validate()?;

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}

impl ConfigProvider for CliConfig {
    fn listing_url(&self) -> &str {
        &self.url
    }

    fn output_path(&self) -> &str {
        &self.filename
    }

    fn concurrent_requests(&self) -> usize {
        self.settings.concurrent_requests
    }

    fn header_policy(&self) -> HeaderPolicy {
        self.settings.header_policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const DISTRICT_URL: &str =
        "https://www.volby.cz/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=2&xnumnuts=2101";

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_valid_arguments() {
        assert!(CliConfig::new(DISTRICT_URL, "benesov.csv").validate().is_ok());
        assert!(CliConfig::new(
            "https://www.volby.cz/pls/ps2017nss/ps36?xjazyk=CZ",
            "abroad.csv"
        )
        .validate()
        .is_ok());
    }

    #[test]
    fn test_swapped_arguments() {
        let err = CliConfig::new("benesov.csv", DISTRICT_URL)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ScrapeError::SwappedArguments));
    }

    #[test]
    fn test_foreign_or_wrong_page_url_rejected() {
        for url in [
            "https://example.com/pls/ps2017nss/ps32?xjazyk=CZ",
            "https://www.volby.cz/pls/ps2017nss/ps311?xjazyk=CZ",
            "http://www.volby.cz/pls/ps2017nss/ps32?xjazyk=CZ",
            "https://www.volby.cz/pls/ps2021/ps32?xjazyk=CZ",
        ] {
            let err = CliConfig::new(url, "out.csv").validate().unwrap_err();
            match err {
                ScrapeError::InvalidArgument { field, .. } => assert_eq!(field, "url"),
                other => panic!("unexpected error for {}: {}", url, other),
            }
        }
    }

    #[test]
    fn test_filename_must_be_csv() {
        let err = CliConfig::new(DISTRICT_URL, "results.xlsx")
            .validate()
            .unwrap_err();
        match err {
            ScrapeError::InvalidArgument { field, .. } => assert_eq!(field, "filename"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_settings_defaults() {
        let settings = ScrapeSettings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, ScrapeSettings::default());
        assert_eq!(settings.concurrent_requests, 1);
        assert_eq!(settings.header_policy, HeaderPolicy::First);
    }

    #[test]
    fn test_settings_from_variables() {
        let settings = ScrapeSettings::from_lookup(lookup(&[
            ("VOLBY_CONCURRENT_REQUESTS", "4"),
            ("VOLBY_HEADER_POLICY", "Union"),
            ("VOLBY_USER_AGENT", "tester"),
            ("VOLBY_MONITOR", "true"),
        ]))
        .unwrap();

        assert_eq!(settings.concurrent_requests, 4);
        assert_eq!(settings.header_policy, HeaderPolicy::Union);
        assert_eq!(settings.user_agent, "tester");
        assert!(settings.monitor);
    }

    #[test]
    fn test_settings_reject_bad_values() {
        assert!(ScrapeSettings::from_lookup(lookup(&[("VOLBY_CONCURRENT_REQUESTS", "many")])).is_err());
        assert!(ScrapeSettings::from_lookup(lookup(&[("VOLBY_HEADER_POLICY", "all")])).is_err());

        let settings = ScrapeSettings::from_lookup(lookup(&[("VOLBY_CONCURRENT_REQUESTS", "0")])).unwrap();
        assert!(settings.validate().is_err());
    }
}
