//! Error type shared by the loader, packer and formatter.

use std::path::PathBuf;

/// Errors that stop a conversion before anything is printed
#[derive(Debug)]
pub enum ConvertError {
    /// Input file could not be opened or its format could not be guessed
    Open { path: PathBuf, message: String },
    /// Input was readable but not a decodable image
    Decode(String),
    /// Channel index outside the decoded image's channels
    InvalidChannel { channel: usize, channels: usize },
    /// Threshold is NaN or outside [0, 1]
    InvalidThreshold(f32),
    /// Row width is not a multiple of 8 and padding is disabled
    UnalignedRow { width: usize },
    /// Array name is not a valid C identifier
    InvalidArrayName(String),
    /// Writing the output failed
    Io(std::io::Error),
}

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertError::Open { path, message } => {
                write!(f, "Failed to open {}: {}", path.display(), message)
            }
            ConvertError::Decode(msg) => write!(f, "Failed to decode image: {}", msg),
            ConvertError::InvalidChannel { channel, channels } => write!(
                f,
                "Channel {} out of range (image has {} channels)",
                channel, channels
            ),
            ConvertError::InvalidThreshold(t) => {
                write!(f, "Threshold must be within [0, 1], got {}", t)
            }
            ConvertError::UnalignedRow { width } => write!(
                f,
                "Row width {} is not a multiple of 8 (use zero-fill padding)",
                width
            ),
            ConvertError::InvalidArrayName(name) => {
                write!(f, "Invalid C identifier for array name: '{}'", name)
            }
            ConvertError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvertError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConvertError {
    fn from(e: std::io::Error) -> Self {
        ConvertError::Io(e)
    }
}
