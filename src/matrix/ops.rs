use itertools::iproduct;
use std::ops;

use crate::error::{Result, ShapeError};
use crate::matrix::matrix::Matrix;
use crate::matrix::matrix_dense::{DenseMatrix, FloatElement};

impl<T: FloatElement> DenseMatrix<T> {
    pub fn add(&self, rhs: &DenseMatrix<T>) -> Result<DenseMatrix<T>> {
        self.zip_with(rhs, |a, b| a + b)
    }

    pub fn sub(&self, rhs: &DenseMatrix<T>) -> Result<DenseMatrix<T>> {
        self.zip_with(rhs, |a, b| a - b)
    }

    /// Standard matrix product; `self.cols` must equal `rhs.rows`.
    pub fn mul(&self, rhs: &DenseMatrix<T>) -> Result<DenseMatrix<T>> {
        if self.cols != rhs.rows {
            return Err(ShapeError::InnerDimension {
                left: self.shape(),
                right: rhs.shape(),
            }
            .into());
        }

        Ok(DenseMatrix {
            rows: self.rows,
            cols: rhs.cols,
            cells: iproduct!(0..self.rows, 0..rhs.cols)
                .map(|(i, j)| (0..self.cols).map(|k| self.at(i, k) * rhs.at(k, j)).sum())
                .collect(),
        })
    }

    pub fn add_scalar(&self, scalar: T) -> DenseMatrix<T> {
        self.map(|v| v + scalar)
    }

    pub fn sub_scalar(&self, scalar: T) -> DenseMatrix<T> {
        self.map(|v| v - scalar)
    }

    pub fn mul_scalar(&self, scalar: T) -> DenseMatrix<T> {
        self.map(|v| v * scalar)
    }

    /// `self * self`. Only defined for square matrices.
    pub fn square(&self) -> Result<DenseMatrix<T>> {
        self.require_square()?;
        self.mul(self)
    }

    fn map<F: Fn(T) -> T>(&self, f: F) -> DenseMatrix<T> {
        let mut m = self.clone();
        m.update(|v, _, _| f(v));
        m
    }

    fn zip_with<F: Fn(T, T) -> T>(&self, rhs: &DenseMatrix<T>, f: F) -> Result<DenseMatrix<T>> {
        self.require_same_shape(rhs)?;

        Ok(DenseMatrix {
            rows: self.rows,
            cols: self.cols,
            cells: self
                .cells
                .iter()
                .zip(rhs.cells.iter())
                .map(|(a, b)| f(*a, *b))
                .collect(),
        })
    }
}

impl<T: FloatElement> ops::Add<&DenseMatrix<T>> for &DenseMatrix<T> {
    type Output = Result<DenseMatrix<T>>;

    fn add(self, rhs: &DenseMatrix<T>) -> Result<DenseMatrix<T>> {
        DenseMatrix::add(self, rhs)
    }
}

impl<T: FloatElement> ops::Sub<&DenseMatrix<T>> for &DenseMatrix<T> {
    type Output = Result<DenseMatrix<T>>;

    fn sub(self, rhs: &DenseMatrix<T>) -> Result<DenseMatrix<T>> {
        DenseMatrix::sub(self, rhs)
    }
}

impl<T: FloatElement> ops::Mul<&DenseMatrix<T>> for &DenseMatrix<T> {
    type Output = Result<DenseMatrix<T>>;

    fn mul(self, rhs: &DenseMatrix<T>) -> Result<DenseMatrix<T>> {
        DenseMatrix::mul(self, rhs)
    }
}

impl<T: FloatElement> ops::Add<T> for &DenseMatrix<T> {
    type Output = DenseMatrix<T>;

    fn add(self, rhs: T) -> DenseMatrix<T> {
        self.add_scalar(rhs)
    }
}

impl<T: FloatElement> ops::Sub<T> for &DenseMatrix<T> {
    type Output = DenseMatrix<T>;

    fn sub(self, rhs: T) -> DenseMatrix<T> {
        self.sub_scalar(rhs)
    }
}

impl<T: FloatElement> ops::Mul<T> for &DenseMatrix<T> {
    type Output = DenseMatrix<T>;

    fn mul(self, rhs: T) -> DenseMatrix<T> {
        self.mul_scalar(rhs)
    }
}

impl<T: FloatElement> ops::Neg for &DenseMatrix<T> {
    type Output = DenseMatrix<T>;

    fn neg(self) -> DenseMatrix<T> {
        self.map(|v| -v)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
