use ::scraper::error::SelectorErrorKind;
use std::num::ParseIntError;
use std::time::Duration;

/// All errors that can occur during competetft scraping operations.
#[derive(thiserror::Error, Debug)]
pub enum CtftError {
    /// The page did not finish navigating within the wall-clock bound.
    #[error("navigation to {url} timed out after {timeout:?}")]
    NavigationTimeout { url: String, timeout: Duration },

    /// The browser config could not be assembled.
    #[error("failed to configure browser: {0}")]
    BrowserConfig(String),

    /// A CDP-level browser failure (launch, navigation, content retrieval).
    #[error("browser error for {url}: {source}")]
    Browser {
        url: String,
        source: chromiumoxide::error::CdpError,
    },

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    /// A regular expression failed to compile.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Failed to parse an integer from scraped text.
    #[error("failed to parse integer: {0}")]
    IntParse(#[from] ParseIntError),

    /// Failed to parse a date/time from scraped text.
    #[error("failed to parse date: {0}")]
    DateParse(#[from] chrono::ParseError),

    /// An expected HTML element was not found on the page.
    #[error("expected element not found: {context}")]
    ElementNotFound { context: &'static str },

    /// A scraped record failed its schema check before persistence.
    #[error("validation failed for {entity}: {reason}")]
    Validation { entity: &'static str, reason: String },

    /// A database-level failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Reading or writing a JSON artifact failed.
    #[error("artifact io error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON artifact could not be (de)serialized.
    #[error("artifact serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Required configuration is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl<'a> From<SelectorErrorKind<'a>> for CtftError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        CtftError::Selector(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CtftError>;
