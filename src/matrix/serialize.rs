use std::fmt;

use itertools::Itertools;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShapeError};
use crate::matrix::matrix::Matrix;
use crate::matrix::matrix_dense::{DenseMatrix, FloatElement};

/// Wire form of a matrix: the grid plus its (redundant) shape.
#[derive(Serialize, Deserialize)]
pub struct MatrixRepr<T> {
    rows: usize,
    cols: usize,
    data: Vec<Vec<T>>,
}

impl<T: FloatElement> From<DenseMatrix<T>> for MatrixRepr<T> {
    fn from(matrix: DenseMatrix<T>) -> Self {
        MatrixRepr {
            rows: matrix.rows,
            cols: matrix.cols,
            data: matrix.to_list(),
        }
    }
}

impl<T: FloatElement> TryFrom<MatrixRepr<T>> for DenseMatrix<T> {
    type Error = ShapeError;

    fn try_from(repr: MatrixRepr<T>) -> std::result::Result<Self, ShapeError> {
        if repr.data.len() != repr.rows {
            return Err(ShapeError::Persisted {
                rows: repr.rows,
                cols: repr.cols,
                grid_rows: repr.data.len(),
            });
        }

        if let Some((row, line)) = repr.data.iter().find_position(|l| l.len() != repr.cols) {
            return Err(ShapeError::Ragged {
                row,
                len: line.len(),
                expected: repr.cols,
            });
        }

        Ok(DenseMatrix {
            rows: repr.rows,
            cols: repr.cols,
            cells: repr.data.into_iter().flatten().collect(),
        })
    }
}

impl<T> DenseMatrix<T>
where
    T: FloatElement + Serialize + DeserializeOwned,
{
    /// JSON text of the form `{"rows":r,"cols":c,"data":[[..],..]}`.
    pub fn serialize(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Inverse of [`DenseMatrix::serialize`]. The persisted shape must agree
    /// with the grid.
    pub fn deserialize(text: &str) -> Result<Self> {
        let repr: MatrixRepr<T> = serde_json::from_str(text)?;
        Ok(DenseMatrix::try_from(repr)?)
    }
}

impl<T: FloatElement + Serialize> fmt::Display for DenseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
