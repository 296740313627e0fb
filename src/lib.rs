//! Dense floating-point matrices: construction, elementwise and algebraic
//! operations, Gauss-Jordan inversion and cofactor-expansion determinants.

pub mod error;

pub mod matrix {
    pub mod matrix;
    pub mod matrix_dense;
    pub mod ops;
    pub mod serialize;

    #[cfg(test)]
    mod proptests;
}

pub use error::{MatrixError, Result, ShapeError};
pub use matrix::matrix::Matrix;
pub use matrix::matrix_dense::{
    DenseMatrix, FloatElement, Matrix32, Matrix64, DEFAULT_RANDOM_MAX, DEFAULT_RANDOM_MIN,
    DEFAULT_TOLERANCE,
};
