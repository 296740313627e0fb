use std::fmt::{Debug, Display};
use std::iter::Sum;
use std::ops::{Index, IndexMut};

use itertools::{iproduct, Itertools};
use log::debug;
use num_traits::Float;
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{MatrixError, Result, ShapeError};
use crate::matrix::matrix::Matrix;
use crate::matrix::serialize::MatrixRepr;

/// Tolerance used by [`DenseMatrix::approx_equal`].
pub const DEFAULT_TOLERANCE: f64 = 0.001;
pub const DEFAULT_RANDOM_MIN: f64 = -1.0;
pub const DEFAULT_RANDOM_MAX: f64 = 1.0;

pub trait FloatElement:  // Avoid repeating all the traits
    Float + Debug + Display + Sum<Self> + 'static
{
}

impl<T> FloatElement for T where T: Float + Debug + Display + Sum<T> + 'static {}

pub(crate) fn cast<T: FloatElement>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

/// Dense matrix stored in row-major order.
///
/// The shape is fixed at construction: `cells.len() == rows * cols` holds
/// after every operation, and only explicit reconstruction changes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(
    try_from = "MatrixRepr<T>",
    into = "MatrixRepr<T>",
    bound(
        serialize = "T: FloatElement + Serialize",
        deserialize = "T: FloatElement + Deserialize<'de>"
    )
)]
pub struct DenseMatrix<T> {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) cells: Vec<T>,
}

pub type Matrix64 = DenseMatrix<f64>;
pub type Matrix32 = DenseMatrix<f32>;

impl<T: FloatElement> Matrix<T> for DenseMatrix<T> {
    fn from_list(lines: Vec<Vec<T>>) -> Result<Self> {
        let rows = lines.len();
        let cols = lines.first().map(|l| l.len()).unwrap_or(0);
        if cols == 0 {
            return Err(ShapeError::Empty.into());
        }

        if let Some((row, line)) = lines.iter().find_position(|l| l.len() != cols) {
            return Err(ShapeError::Ragged {
                row,
                len: line.len(),
                expected: cols,
            }
            .into());
        }

        Ok(DenseMatrix {
            rows,
            cols,
            cells: lines.into_iter().flatten().collect(),
        })
    }

    fn to_list(&self) -> Vec<Vec<T>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.cells
            .chunks(self.cols)
            .map(|line| line.into())
            .collect()
    }

    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn identity(n: usize) -> Self {
        DenseMatrix {
            rows: n,
            cols: n,
            cells: (0..n)
                .flat_map(|i| (0..n).map(move |j| if i == j { T::one() } else { T::zero() }))
                .collect(),
        }
    }

    /// Gauss-Jordan elimination on `[A | I]`.
    ///
    /// A pivot is only replaced when it is exactly zero, and the first row
    /// below it with a non-zero entry in that column is swapped in. Failing
    /// to find one is the only singularity check.
    fn inverse(&self) -> Result<Self> {
        self.require_square()?;

        let n = self.rows;
        let mut mc = self.clone();
        let mut mi = DenseMatrix::identity(n);

        for i in 0..n {
            if mc.at(i, i) == T::zero() {
                let ii = match (i + 1..n).find(|&ii| mc.at(ii, i) != T::zero()) {
                    Some(ii) => ii,
                    None => {
                        debug!("no non-zero pivot in column {i}, matrix is singular");
                        return Err(MatrixError::Singular { column: i });
                    }
                };
                debug!("swapping rows {i} and {ii} to replace a zero pivot");
                mc.swap_rows(i, ii);
                mi.swap_rows(i, ii);
            }

            let pivot = mc.at(i, i);
            mc.divide_row(i, pivot);
            mi.divide_row(i, pivot);

            let mc_pivot = mc.row(i).to_vec();
            let mi_pivot = mi.row(i).to_vec();
            for ii in (0..n).filter(|&ii| ii != i) {
                let factor = mc.at(ii, i);
                mc.sub_scaled_row(ii, &mc_pivot, factor);
                mi.sub_scaled_row(ii, &mi_pivot, factor);
            }
        }

        Ok(mi)
    }

    /// Cofactor expansion along the first row. O(n!), meant for small matrices.
    fn determinant(&self) -> Result<T> {
        self.require_square()?;
        let columns: Vec<usize> = (0..self.cols).collect();
        Ok(self.cofactor_expansion(0, &columns))
    }

    fn transpose(&self) -> Self {
        DenseMatrix {
            rows: self.cols,
            cols: self.rows,
            cells: (0..self.cols)
                .flat_map(|c| (0..self.rows).map(move |r| self.at(r, c)))
                .collect(),
        }
    }

    #[inline(always)]
    fn at(&self, row: usize, col: usize) -> T {
        self[(row, col)]
    }
}

impl<T: FloatElement> DenseMatrix<T> {
    pub fn new(rows: usize, cols: usize, initial: T) -> Self {
        DenseMatrix {
            rows,
            cols,
            cells: vec![initial; rows * cols],
        }
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::new(rows, cols, T::zero())
    }

    pub fn zeros_square(n: usize) -> Self {
        Self::zeros(n, n)
    }

    pub fn ones(rows: usize, cols: usize) -> Self {
        Self::new(rows, cols, T::one())
    }

    pub fn ones_square(n: usize) -> Self {
        Self::ones(n, n)
    }

    /// Builds a matrix from a rectangular grid, deriving the shape from it.
    pub fn create(data: Vec<Vec<T>>) -> Result<Self> {
        <Self as Matrix<T>>::from_list(data)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row < self.rows && col < self.cols {
            Some(self.at(row, col))
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// Values in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.cells.iter()
    }

    pub fn fill(&mut self, n: T) {
        self.cells.iter_mut().for_each(|cell| *cell = n);
    }

    /// Replaces every cell with `f(value, row, col)`, row by row.
    pub fn update<F>(&mut self, mut f: F)
    where
        F: FnMut(T, usize, usize) -> T,
    {
        let cols = self.cols;
        for (i, cell) in self.cells.iter_mut().enumerate() {
            *cell = f(*cell, i / cols, i % cols);
        }
    }

    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(T, usize, usize),
    {
        iproduct!(0..self.rows, 0..self.cols).for_each(|(r, c)| f(self.at(r, c), r, c));
    }

    pub fn equal(&self, other: &DenseMatrix<T>) -> Result<bool> {
        self.approximately_equal(other, T::zero())
    }

    pub fn approx_equal(&self, other: &DenseMatrix<T>) -> Result<bool> {
        self.approximately_equal(other, cast(DEFAULT_TOLERANCE))
    }

    /// True iff every pair of cells differs by at most `tolerance`.
    /// Comparing matrices of different shapes is an error, not `false`.
    pub fn approximately_equal(&self, other: &DenseMatrix<T>, tolerance: T) -> Result<bool> {
        self.require_same_shape(other)?;
        Ok(self
            .cells
            .iter()
            .zip(other.cells.iter())
            .all(|(a, b)| (*a - *b).abs() <= tolerance))
    }

    pub(crate) fn require_same_shape(&self, other: &DenseMatrix<T>) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(ShapeError::Mismatch {
                left: self.shape(),
                right: other.shape(),
            }
            .into());
        }
        Ok(())
    }

    pub(crate) fn require_square(&self) -> Result<()> {
        if !self.is_square() {
            return Err(ShapeError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            }
            .into());
        }
        Ok(())
    }

    fn swap_rows(&mut self, i: usize, j: usize) {
        for k in 0..self.cols {
            self.cells.swap(i * self.cols + k, j * self.cols + k);
        }
    }

    fn divide_row(&mut self, row: usize, divisor: T) {
        let start = row * self.cols;
        self.cells[start..start + self.cols]
            .iter_mut()
            .for_each(|cell| *cell = *cell / divisor);
    }

    // row[target] -= factor * pivot_row
    fn sub_scaled_row(&mut self, target: usize, pivot_row: &[T], factor: T) {
        let start = target * self.cols;
        self.cells[start..start + self.cols]
            .iter_mut()
            .zip(pivot_row.iter())
            .for_each(|(cell, p)| *cell = *cell - factor * *p);
    }

    /// Determinant of the minor made of rows `row..` and the given columns.
    fn cofactor_expansion(&self, row: usize, columns: &[usize]) -> T {
        match columns {
            [] => T::one(),
            [c] => self.at(row, *c),
            [c0, c1] => {
                self.at(row, *c0) * self.at(row + 1, *c1)
                    - self.at(row + 1, *c0) * self.at(row, *c1)
            }
            _ => {
                let mut minor = Vec::with_capacity(columns.len() - 1);
                columns.iter().enumerate().fold(T::zero(), |acc, (i, &col)| {
                    minor.clear();
                    minor.extend(
                        columns
                            .iter()
                            .enumerate()
                            .filter(|&(j, _)| j != i)
                            .map(|(_, &c)| c),
                    );
                    let term = self.at(row, col) * self.cofactor_expansion(row + 1, &minor);
                    if i % 2 == 0 {
                        acc + term
                    } else {
                        acc - term
                    }
                })
            }
        }
    }
}

impl<T: FloatElement> DenseMatrix<T>
where
    Standard: Distribution<T>,
{
    /// Square or rectangular matrix with cells drawn from `[-1, 1)`.
    pub fn random(rows: usize, cols: usize) -> Self {
        Self::random_in(rows, cols, cast(DEFAULT_RANDOM_MIN), cast(DEFAULT_RANDOM_MAX))
    }

    pub fn random_square(n: usize) -> Self {
        Self::random(n, n)
    }

    pub fn random_in(rows: usize, cols: usize, min: T, max: T) -> Self {
        Self::random_with(&mut rand::thread_rng(), rows, cols, min, max)
    }

    pub fn random_with<R: Rng>(rng: &mut R, rows: usize, cols: usize, min: T, max: T) -> Self {
        let mut m = Self::zeros(rows, cols);
        m.randomize_with(rng, min, max);
        m
    }

    pub fn randomize(&mut self, min: T, max: T) {
        self.randomize_with(&mut rand::thread_rng(), min, max);
    }

    pub fn randomize_with<R: Rng>(&mut self, rng: &mut R, min: T, max: T) {
        let span = max - min;
        self.cells
            .iter_mut()
            .for_each(|cell| *cell = min + span * rng.gen::<T>());
    }
}

impl<T: FloatElement> TryFrom<Vec<Vec<T>>> for DenseMatrix<T> {
    type Error = MatrixError;

    fn try_from(lines: Vec<Vec<T>>) -> Result<Self> {
        <Self as Matrix<T>>::from_list(lines)
    }
}

impl<T: FloatElement> Index<(usize, usize)> for DenseMatrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &self.cells[row * self.cols + col]
    }
}

impl<T: FloatElement> IndexMut<(usize, usize)> for DenseMatrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &mut self.cells[row * self.cols + col]
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
