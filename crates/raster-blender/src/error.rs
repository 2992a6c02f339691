//! Error types for raster blending.

use raster_common::Resolution;
use thiserror::Error;

use crate::types::DataType;

/// The specific reason a source cannot join the composite.
#[derive(Debug, Clone, PartialEq)]
pub enum Incompatibility {
    /// The source transform carries rotation or shear terms.
    NonOrthogonal,
    /// Pixel size differs from the reference source.
    ResolutionMismatch {
        expected: Resolution,
        actual: Resolution,
    },
    /// Number of bands differs from the reference source.
    BandCountMismatch { expected: usize, actual: usize },
}

impl Incompatibility {
    /// Short machine-friendly name of the mismatch.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NonOrthogonal => "non-orthogonal",
            Self::ResolutionMismatch { .. } => "resolution mismatch",
            Self::BandCountMismatch { .. } => "band-count mismatch",
        }
    }
}

impl std::fmt::Display for Incompatibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonOrthogonal => write!(f, "{}", self.as_str()),
            Self::ResolutionMismatch { expected, actual } => {
                write!(f, "{} ({} vs reference {})", self.as_str(), actual, expected)
            }
            Self::BandCountMismatch { expected, actual } => {
                write!(f, "{} ({} vs reference {})", self.as_str(), actual, expected)
            }
        }
    }
}

/// Errors that can occur while building or reading a composite.
#[derive(Error, Debug)]
pub enum BlendError {
    /// A source could not be opened.
    #[error("failed to open raster source {path}: {message}")]
    Open { path: String, message: String },

    /// A source does not match the reference source.
    #[error("raster source {path} is incompatible with reference source {reference}: {kind}")]
    Compatibility {
        path: String,
        reference: String,
        kind: Incompatibility,
    },

    /// The configuration is malformed.
    #[error("invalid composite configuration: {0}")]
    Construction(String),

    /// Reading pixels from a source failed.
    #[error("failed to read raster source {path}: {message}")]
    Read { path: String, message: String },

    /// The band's numeric type cannot be composited.
    #[error("unsupported band data type {0}")]
    UnsupportedType(DataType),

    /// A band or block index is outside the composite.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl BlendError {
    /// Create an Open error.
    pub fn open_failed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Open {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a Read error.
    pub fn read_failed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Read {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a Construction error.
    pub fn construction(msg: impl Into<String>) -> Self {
        Self::Construction(msg.into())
    }

    /// Create a Compatibility error.
    pub fn incompatible(
        path: impl Into<String>,
        reference: impl Into<String>,
        kind: Incompatibility,
    ) -> Self {
        Self::Compatibility {
            path: path.into(),
            reference: reference.into(),
            kind,
        }
    }

    /// Create an InvalidRequest error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Attach a source path to a read error raised without one.
    pub(crate) fn with_source_path(self, path: &str) -> Self {
        match self {
            Self::Read { path: p, message } if p.is_empty() => Self::Read {
                path: path.to_string(),
                message,
            },
            other => other,
        }
    }
}

/// Result type for blending operations.
pub type Result<T> = std::result::Result<T, BlendError>;
