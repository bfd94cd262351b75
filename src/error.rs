//! Error types for the Horos segmentation engine.

use thiserror::Error;

/// The main error type for Horos operations.
#[derive(Error, Debug)]
pub enum HorosError {
    /// A score profile holds a non-finite value or disagrees with its unit count.
    #[error("Invalid score profile: {0}")]
    InvalidProfile(String),

    /// Ambiguous or missing selection mode, or an out-of-range constraint field.
    #[error("Invalid constraint: {0}")]
    InvalidConstraint(String),

    /// The requested segment count cannot be packed into the document.
    #[error("Infeasible constraint: {segments} segments of at least {min_length} units do not fit in {unit_count} units")]
    InfeasibleConstraint {
        /// Requested number of segments.
        segments: usize,
        /// Minimum units per segment.
        min_length: usize,
        /// Units available.
        unit_count: usize,
    },

    /// Two segmentations of different documents were compared.
    #[error("Shape mismatch: candidate has {candidate} units, reference has {reference}")]
    ShapeMismatch {
        /// Unit count of the candidate segmentation.
        candidate: usize,
        /// Unit count of the reference segmentation.
        reference: usize,
    },

    /// Window size outside `1..unit_count`.
    #[error("Invalid window size {window} for {unit_count} units")]
    InvalidWindowSize {
        /// The rejected window size.
        window: usize,
        /// Units in the compared segmentations.
        unit_count: usize,
    },

    /// Boundary set that does not describe a partition.
    #[error("Invalid segmentation: {0}")]
    InvalidSegmentation(String),

    /// Malformed BIO/BILOU label or label sequence.
    #[error("Invalid label: {0}")]
    InvalidLabel(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for Horos operations.
pub type Result<T> = std::result::Result<T, HorosError>;

impl From<serde_json::Error> for HorosError {
    fn from(err: serde_json::Error) -> Self {
        HorosError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = HorosError::ShapeMismatch {
            candidate: 10,
            reference: 12,
        };
        assert_eq!(
            err.to_string(),
            "Shape mismatch: candidate has 10 units, reference has 12"
        );

        let err = HorosError::InfeasibleConstraint {
            segments: 4,
            min_length: 3,
            unit_count: 10,
        };
        assert!(err.to_string().contains("4 segments"));
    }

    #[test]
    fn test_from_serde_json() {
        let parse: std::result::Result<Vec<f64>, _> = serde_json::from_str("[1.0,");
        let err: HorosError = parse.unwrap_err().into();
        assert!(matches!(err, HorosError::Serialization(_)));
    }
}
