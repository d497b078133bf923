use thiserror::Error;

/// All errors returned by `linmat-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LinalgError {
    /// Operand shapes do not match the required layout.
    #[error("dimension mismatch: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    /// The operation is only defined for square matrices.
    #[error("matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// A row/column (or vector) index is out of bounds.
    #[error("index {index:?} out of range for shape {shape:?}")]
    IndexOutOfRange {
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    /// Matrix is singular and the system cannot be solved.
    #[error("matrix is singular")]
    Singular,

    /// Matrix does not have full column rank.
    #[error("matrix is rank deficient")]
    RankDeficient,

    /// Cholesky precondition violated.
    #[error("matrix is not symmetric positive definite")]
    NotPositiveDefinite,

    /// An iterative algorithm exceeded its iteration cap.
    #[error("{algorithm} did not converge after {iterations} iterations")]
    NonConvergence {
        algorithm: &'static str,
        iterations: usize,
    },

    /// The operation is not supported for the given input.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },
}

/// Convenience alias used throughout `linmat-core`.
pub type Result<T> = std::result::Result<T, LinalgError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = LinalgError::DimensionMismatch {
            expected: vec![2, 3],
            got: vec![2, 2],
        };
        assert_eq!(
            e.to_string(),
            "dimension mismatch: expected [2, 3], got [2, 2]"
        );

        let e = LinalgError::NonConvergence {
            algorithm: "svd",
            iterations: 30,
        };
        assert_eq!(e.to_string(), "svd did not converge after 30 iterations");

        let e = LinalgError::NotSquare { rows: 2, cols: 3 };
        assert_eq!(e.to_string(), "matrix must be square, got 2x3");
    }

    #[test]
    fn test_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&LinalgError::Singular);
    }
}
