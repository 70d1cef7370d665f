//! Errors raised around validation: file access, config, remote fetches

use std::path::PathBuf;

use fseq_core::FseqError;

/// Errors from the I/O side of the validator
///
/// A rejected sequence is [`Error::Validation`]; everything else means the
/// bytes never reached the validator.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Validation(#[from] FseqError),

    #[cfg(feature = "serde")]
    #[error("Invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[cfg(feature = "http")]
    #[error("Remote fetch failed: {0}")]
    Remote(#[from] reqwest::Error),

    #[error("Remote fetch failed: {url} returned HTTP {status}")]
    RemoteStatus { url: String, status: u16 },

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(#[source] std::io::Error),

    #[error("{0} requires the \"{1}\" feature")]
    Unsupported(&'static str, &'static str),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Error::Io { path, source }
    }

    /// The sequence itself was rejected, as opposed to an I/O failure
    pub fn is_rejection(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_passes_through() {
        let error = Error::from(FseqError::Format);
        assert!(error.is_rejection());
        assert_eq!(error.to_string(), "Unknown file format, expected FSEQ v2.0");
    }

    #[test]
    fn test_io_names_path() {
        let error = Error::io("show.fseq")(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(!error.is_rejection());
        assert!(error.to_string().starts_with("Failed to read show.fseq:"));
    }
}
