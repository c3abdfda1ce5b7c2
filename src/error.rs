//! Error kinds raised by the ETL stages

use thiserror::Error;

/// Convenience alias used throughout the library
pub type Result<T> = std::result::Result<T, EtlError>;

/// Underlying cause kept on an [`EtlError`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors produced while loading, transforming, or saving a dataset
///
/// Each stage of the pipeline catches these at its own boundary and turns
/// them into a terminal [`RunStatus`](crate::etl::RunStatus).
///
/// Errors built with the `*_from` constructors keep the original error as
/// their [`source`](std::error::Error::source) and render its whole cause
/// chain into the message, so a log line shows e.g. "operation timed out"
/// instead of only the outermost reqwest text.
#[derive(Debug, Error)]
pub enum EtlError {
    /// Network or HTTP failure while fetching a source
    #[error("fetch failed for {target}: {message}")]
    Fetch {
        target: String,
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Malformed CSV or JSON input
    #[error("failed to parse {target}: {message}")]
    Parse {
        target: String,
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Unrecognized input extension or output selector
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// I/O or database failure while persisting
    #[error("failed to write {target}: {message}")]
    Write {
        target: String,
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Column operation applied to data of the wrong shape
    #[error("transform failed: {0}")]
    Transform(String),
}

impl EtlError {
    pub fn fetch(target: impl Into<String>, message: impl ToString) -> Self {
        Self::Fetch {
            target: target.into(),
            message: message.to_string(),
            source: None,
        }
    }

    pub fn fetch_from<E>(target: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Fetch {
            target: target.into(),
            message: error_chain(&error),
            source: Some(Box::new(error)),
        }
    }

    pub fn parse(target: impl Into<String>, message: impl ToString) -> Self {
        Self::Parse {
            target: target.into(),
            message: message.to_string(),
            source: None,
        }
    }

    pub fn parse_from<E>(target: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Parse {
            target: target.into(),
            message: error_chain(&error),
            source: Some(Box::new(error)),
        }
    }

    pub fn write(target: impl Into<String>, message: impl ToString) -> Self {
        Self::Write {
            target: target.into(),
            message: message.to_string(),
            source: None,
        }
    }

    pub fn write_from<E>(target: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Write {
            target: target.into(),
            message: error_chain(&error),
            source: Some(Box::new(error)),
        }
    }

    /// Short, stable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Fetch { .. } => "FetchError",
            Self::Parse { .. } => "ParseError",
            Self::UnsupportedFormat(_) => "UnsupportedFormatError",
            Self::Write { .. } => "WriteError",
            Self::Transform(_) => "TransformError",
        }
    }
}

/// Render an error and each of its causes as `outer: inner: root`
///
/// Causes whose text is already part of the previous message are skipped.
pub fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut rendered = error.to_string();
    let mut cause = error.source();
    while let Some(err) = cause {
        let text = err.to_string();
        if !rendered.contains(&text) {
            rendered.push_str(": ");
            rendered.push_str(&text);
        }
        cause = err.source();
    }
    rendered
}
