use thiserror::Error;

/// A violated dimensional precondition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("matrix dimensions do not match: {left:?} vs {right:?}")]
    Mismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("inner dimensions do not match: {left:?} * {right:?}")]
    InnerDimension {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("cannot build a matrix from an empty grid")]
    Empty,

    #[error("row {row} has {len} entries, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("persisted shape {rows}x{cols} does not match a grid of {grid_rows} rows")]
    Persisted {
        rows: usize,
        cols: usize,
        grid_rows: usize,
    },
}

#[derive(Debug, Error)]
pub enum MatrixError {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// No non-zero pivot exists for `column` during elimination.
    #[error("matrix is singular (no pivot in column {column})")]
    Singular { column: usize },

    #[error("malformed matrix text: {0}")]
    Parse(#[from] serde_json::Error),
}

impl MatrixError {
    pub fn is_shape(&self) -> bool {
        matches!(self, MatrixError::Shape(_))
    }

    pub fn is_singular(&self) -> bool {
        matches!(self, MatrixError::Singular { .. })
    }
}

pub type Result<T> = std::result::Result<T, MatrixError>;

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
