//! Errors for bad caller input. Broken internal invariants (stepping a
//! parameter out of order, a maze walk revisiting a cell) are bugs and panic
//! instead of showing up here.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MeanderError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeanderError {
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("grid spacing must be positive and finite (got {0})")]
    InvalidSpacing(f64),

    #[error("relative channel thickness must be in (0, 1] (got {0})")]
    InvalidThickness(f64),

    #[error("invalid connectivity: {0}")]
    InvalidConnectivity(String),

    #[error("the start cell has no connections, nothing to draw")]
    IsolatedStart,

    #[error("cannot compute bounds of an empty shape collection")]
    EmptyBounds,

    #[error("join {index} is too sharp to offset (angle {angle} rad)")]
    DegenerateJoin { index: usize, angle: f64 },

    #[error("need at least {needed} points, found {found}")]
    TooFewPoints { needed: usize, found: usize },

    #[error("branch probability must drop by a positive step each level (got {0})")]
    InvalidBranching(f64),

    #[error("config error: {0}")]
    Config(String),
}

impl From<ron::error::SpannedError> for MeanderError {
    fn from(value: ron::error::SpannedError) -> Self {
        MeanderError::Config(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_values() {
        let err = MeanderError::EmptyGrid { rows: 0, cols: 3 };
        assert_eq!(
            err.to_string(),
            "grid must have at least one row and one column (got 0x3)"
        );
        let err = MeanderError::InvalidSpacing(-2.0);
        assert!(err.to_string().contains("-2"));
    }

    #[test]
    fn test_ron_error_becomes_config() {
        let parsed: std::result::Result<u32, _> = ron::from_str("not a number");
        let err: MeanderError = parsed.unwrap_err().into();
        assert!(matches!(err, MeanderError::Config(_)));
    }
}
