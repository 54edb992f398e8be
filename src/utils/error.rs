use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Invalid argument '{field}' ({value}): {reason}")]
    InvalidArgument {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Arguments appear to be swapped: expected <URL> <CSV_FILENAME>")]
    SwappedArguments,

    #[error("HTTP request failed with status {status}: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Unexpected page layout at {page}: {detail}")]
    Layout { page: String, detail: String },

    #[error("Cannot parse '{text}' as a vote count")]
    InvalidNumber { text: String },

    #[error(
        "Sequence length mismatch: {listings} listings, {summaries} summaries, {party_results} party results"
    )]
    LengthMismatch {
        listings: usize,
        summaries: usize,
        party_results: usize,
    },

    #[error("Nothing to export: no municipality records were collected")]
    NothingToExport,

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Processing error: {message}")]
    Processing { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Arguments,
    Transport,
    Layout,
    Assembly,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScrapeError {
    pub fn layout(page: impl Into<String>, detail: impl Into<String>) -> Self {
        ScrapeError::Layout {
            page: page.into(),
            detail: detail.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ScrapeError::InvalidArgument { .. } | ScrapeError::SwappedArguments => {
                ErrorCategory::Arguments
            }
            ScrapeError::HttpStatus { .. } | ScrapeError::Transport(_) | ScrapeError::Url(_) => {
                ErrorCategory::Transport
            }
            ScrapeError::Layout { .. } | ScrapeError::InvalidNumber { .. } => ErrorCategory::Layout,
            ScrapeError::LengthMismatch { .. } | ScrapeError::NothingToExport => {
                ErrorCategory::Assembly
            }
            ScrapeError::Csv(_) | ScrapeError::Io(_) | ScrapeError::Processing { .. } => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Transport => ErrorSeverity::Medium,
            ErrorCategory::Arguments | ErrorCategory::Layout | ErrorCategory::Assembly => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Exit status for the binary: transport problems may go away on their own,
    /// everything else needs a code or input change.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScrapeError::SwappedArguments => "ERROR: Arguments appear to be swapped. \
                 Expected format: volby-scrape <URL> <CSV_FILENAME>"
                .to_string(),
            ScrapeError::InvalidArgument { field, .. } if field == "url" => {
                "ERROR: Invalid URL. Select one URL from column 'Výběr obce' at \
                 https://www.volby.cz/pls/ps2017nss/ps3?xjazyk=CZ"
                    .to_string()
            }
            ScrapeError::InvalidArgument { field, .. } if field == "filename" => {
                "ERROR: Invalid filename. The export filename must end with '.csv'.".to_string()
            }
            ScrapeError::HttpStatus { status, url } => {
                format!("Server not responding.\nStatus: {}\nurl: {}", status, url)
            }
            ScrapeError::Layout { page, detail } => format!(
                "The results page layout has changed and can no longer be read ({}: {})",
                page, detail
            ),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Arguments => {
                "Run with --help and pass a volby.cz listing URL followed by a .csv filename"
            }
            ErrorCategory::Transport => {
                "Check the network connection and that www.volby.cz is reachable, then retry"
            }
            ErrorCategory::Layout => {
                "The site markup no longer matches the extractor; the cell selectors need updating"
            }
            ErrorCategory::Assembly => {
                "Listing and detail pages disagree; re-run and report the listing URL if it persists"
            }
            ErrorCategory::System => "Check file permissions and free disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
