//! Error taxonomy for the viewer.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    /// No directory entry matched the configured suffixes.
    #[error("no matching images found in {}", dir.display())]
    EmptyDirectory { dir: PathBuf },

    #[error("failed to list {}: {source}", dir.display())]
    ReadDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The selected file could not be opened or decoded.
    #[error("failed to load {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("'{0}' is not in the image list")]
    UnknownEntry(String),

    #[error("failed to start the window: {0}")]
    Gui(#[from] eframe::Error),
}

impl ViewerError {
    /// Whether the application can keep running after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::UnknownEntry(_))
    }
}

pub type Result<T, E = ViewerError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_directory_is_fatal() {
        let err = ViewerError::EmptyDirectory {
            dir: PathBuf::from("pictures"),
        };
        assert!(!err.is_recoverable());
        assert_eq!(err.to_string(), "no matching images found in pictures");
    }

    #[test]
    fn decode_is_recoverable() {
        let err = ViewerError::Decode {
            path: PathBuf::from("gone.png"),
            source: image::ImageError::IoError(io::Error::from(io::ErrorKind::NotFound)),
        };
        assert!(err.is_recoverable());
        assert!(err.to_string().starts_with("failed to load gone.png"));
    }
}
