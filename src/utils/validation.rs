use crate::utils::error::{Result, ScrapeError};
use regex::Regex;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ScrapeError::InvalidArgument {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ScrapeError::InvalidArgument {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ScrapeError::InvalidArgument {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// Anchored match: the pattern must match at the start of `value`.
pub fn validate_pattern(field_name: &str, value: &str, pattern: &Regex) -> Result<()> {
    match pattern.find(value) {
        Some(m) if m.start() == 0 => Ok(()),
        _ => Err(ScrapeError::InvalidArgument {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value does not match {}", pattern.as_str()),
        }),
    }
}

pub fn validate_file_extension(field_name: &str, file: &str, extension: &str) -> Result<()> {
    if !file.ends_with(&format!(".{}", extension)) {
        return Err(ScrapeError::InvalidArgument {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!("Filename must end with '.{}'", extension),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ScrapeError::InvalidArgument {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ScrapeError::InvalidArgument {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
