use crate::error::Result;

pub trait Matrix<T>
where
    Self: Sized,
{
    fn from_list(lines: Vec<Vec<T>>) -> Result<Self>;
    fn to_list(&self) -> Vec<Vec<T>>;

    fn rows(&self) -> usize;
    fn cols(&self) -> usize;
    fn identity(n: usize) -> Self;
    fn inverse(&self) -> Result<Self>;
    fn determinant(&self) -> Result<T>;
    fn transpose(&self) -> Self;
    fn at(&self, row: usize, col: usize) -> T;

    fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }
}
