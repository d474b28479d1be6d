//! Error taxonomy for the recognition pipeline
//!
//! Errors are split into two classes: per-frame errors that only cost the
//! current frame (the frame reports "no detection"), and fatal errors that end
//! the recognition session.

use std::path::PathBuf;

/// Which coordinate axis a landmark value belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// Why a set of landmarks could not be turned into finite features
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Degeneracy {
    #[error("minimum {0} coordinate is zero")]
    ZeroMinimum(Axis),

    #[error("landmark {index} has a non-finite {axis} coordinate")]
    NonFinite { index: usize, axis: Axis },

    #[error("joint group {group} has a zero-length segment")]
    ZeroLengthSegment { group: usize },
}

/// Errors raised while recognizing signs
#[derive(Debug, thiserror::Error)]
pub enum RecognitionError {
    #[error("Frame read error: {0}")]
    FrameRead(String),

    #[error("Degenerate normalization: {0}")]
    DegenerateNormalization(#[from] Degeneracy),

    #[error("Feature shape error: expected {expected} values, got {actual}")]
    FeatureShape { expected: usize, actual: usize },

    #[error("Classifier failure: {0}")]
    ClassifierFailure(String),

    #[error("Failed to load model from {path:?}: {reason}")]
    ModelLoad { path: PathBuf, reason: String },

    #[error("Hand detector error: {0}")]
    Detector(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RecognitionError {
    /// Whether this error ends the session.
    ///
    /// Per-frame errors (degenerate landmarks, malformed feature vectors) are
    /// contained by the frame loop; everything else is fatal.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            RecognitionError::DegenerateNormalization(_) | RecognitionError::FeatureShape { .. }
        )
    }
}

/// Result type alias for the recognition pipeline
pub type Result<T> = std::result::Result<T, RecognitionError>;
