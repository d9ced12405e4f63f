//! Error and notice types for the quote_composer crate.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for composition, rendering and output operations.
pub type Result<T> = std::result::Result<T, ComposeError>;

/// Fatal errors raised while composing, rendering or saving a document.
#[derive(Error, Debug)]
pub enum ComposeError {
    /// A builder referenced a style name that was never registered.
    #[error("unknown style '{0}'")]
    UnknownStyle(String),

    /// A style was registered twice while the registry rejects redefinitions.
    #[error("style '{0}' is already registered")]
    DuplicateStyle(String),

    /// A table row did not match the column count declared by its table.
    #[error("table row has {found} cells but the table declares {expected} columns")]
    TableShape {
        /// Declared column count.
        expected: usize,
        /// Cells in the rejected row.
        found: usize,
    },

    /// An image could not be decoded or converted.
    #[error("image error")]
    Image(#[source] genpdf::error::Error),

    /// No usable font family could be loaded.
    #[error("failed to load fonts")]
    Fonts(#[source] genpdf::error::Error),

    /// The PDF layout or serialization failed.
    #[error("failed to render document")]
    Render(#[from] genpdf::error::Error),

    /// The output file could not be written.
    #[error("I/O error for {}: {source}", path.display())]
    Io {
        /// Path that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Required template fields are absent from a data set.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
}

impl ComposeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Non-fatal events recorded while composing.
///
/// Builders never abort for a single absent field or an unformattable amount.
/// They substitute a safe default and record what happened here instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// A currency value could not be formatted and was rendered verbatim.
    FormatFallback {
        /// The raw text that was rendered.
        raw: String,
    },
    /// A payload field was missing and its default was rendered.
    MissingFieldDefault {
        /// Label of the missing field.
        field: String,
        /// Text rendered in its place.
        default: String,
    },
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use genpdf::error::{Error, ErrorKind};

    use super::*;

    #[test]
    fn wrapped_genpdf_errors_are_reported_once() {
        let err = ComposeError::from(Error::new("page overflow", ErrorKind::Internal));
        assert_eq!(err.to_string(), "failed to render document");
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("page overflow"));

        let err = ComposeError::Fonts(Error::new("no regular font", ErrorKind::InvalidFont));
        assert_eq!(err.to_string(), "failed to load fonts");
        assert!(err.source().is_some());

        let err = ComposeError::Image(Error::new("bad header", ErrorKind::InvalidData));
        assert_eq!(err.to_string(), "image error");
        assert!(err.source().is_some());
    }
}
