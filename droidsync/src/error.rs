//! All error types for the droidsync crate.
//!
//! These are returned from all fallible operations (service calls, parsing, writing resources, etc.).
//! A missing API token is not an error: the import pipelines report it as a skip.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("service unavailable: {message}")]
    Service {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("format violation: {0}")]
    FormatViolation(String),

    #[error("no matching tags for `{0}`")]
    UnmappedLanguage(String),

    #[error("icon `{0}` is not present in the icon manifest")]
    MissingIcon(String),

    #[error("invalid resource: {0}")]
    InvalidResource(String),
}

impl Error {
    /// Creates a new service error with optional source error
    pub fn service_error(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Service {
            message: message.into(),
            source,
        }
    }

    /// Creates a new format violation error
    pub fn format_violation(message: impl Into<String>) -> Self {
        Error::FormatViolation(message.into())
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        let message = match value.url() {
            Some(url) => format!("request to {} failed", url),
            None => "request failed".to_string(),
        };
        Error::service_error(message, Some(Box::new(value)))
    }
}
