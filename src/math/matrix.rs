use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::error::{NetworkError, Result};

/// Dense row-major matrix of `f64`.
///
/// Shape is fixed at construction. Binary operations never mutate their
/// operands; each returns a freshly allocated result or a
/// `DimensionMismatch` error.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix::filled(rows, cols, 0.0)
    }

    pub fn filled(rows: usize, cols: usize, value: f64) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![value; cols]; rows],
        }
    }

    pub fn identity(n: usize) -> Matrix {
        let mut res = Matrix::zeros(n, n);
        for i in 0..n {
            res.data[i][i] = 1.0;
        }
        res
    }

    /// Builds an `n x 1` column matrix from a flat slice.
    pub fn from_array(values: &[f64]) -> Matrix {
        Matrix {
            rows: values.len(),
            cols: 1,
            data: values.iter().map(|&v| vec![v]).collect(),
        }
    }

    /// Builds a matrix from nested rows. Fails on empty or ragged input.
    pub fn from_rows(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let cols = match data.first() {
            Some(row) if !row.is_empty() => row.len(),
            _ => return Err(NetworkError::invalid("matrix needs at least one row and one column")),
        };
        if let Some((i, row)) = data.iter().enumerate().find(|(_, row)| row.len() != cols) {
            return Err(NetworkError::invalid(format!(
                "row {i} has {} entries, expected {cols}",
                row.len()
            )));
        }
        Ok(Matrix {
            rows: data.len(),
            cols,
            data,
        })
    }

    /// Samples every element independently from `uniform(low, high)`.
    ///
    /// # Panics
    /// Panics unless `low < high` and both bounds are finite.
    pub fn random_uniform<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        low: f64,
        high: f64,
        rng: &mut R,
    ) -> Matrix {
        let dist = Uniform::new(low, high);
        let mut res = Matrix::zeros(rows, cols);
        for row in res.data.iter_mut() {
            for x in row.iter_mut() {
                *x = dist.sample(rng);
            }
        }
        res
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// # Panics
    /// Panics if `row` or `col` is out of range.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    /// # Panics
    /// Panics if `row` or `col` is out of range.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row][col] = value;
    }

    /// Flattens the matrix in row-major order. For a column matrix this is
    /// the vector it was built from.
    pub fn to_vec(&self) -> Vec<f64> {
        self.data.iter().flatten().copied().collect()
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    /// Applies `functor` to every element in row-major order.
    pub fn map<F>(&self, mut functor: F) -> Matrix
    where
        F: FnMut(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    pub fn scale(&self, factor: f64) -> Matrix {
        self.map(|x| x * factor)
    }

    pub fn add(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with(rhs, "add", |a, b| a + b)
    }

    pub fn subtract(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with(rhs, "subtract", |a, b| a - b)
    }

    /// Element-wise (Hadamard) product of two same-shape matrices.
    pub fn multiply_each(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with(rhs, "multiply_each", |a, b| a * b)
    }

    /// Standard matrix product, `[self.rows x rhs.cols]`.
    pub fn multiply(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.cols != rhs.rows {
            return Err(NetworkError::mismatch("multiply", self.shape(), rhs.shape()));
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += self.data[i][k] * rhs.data[k][j];
                }

                res.data[i][j] = sum;
            }
        }

        Ok(res)
    }

    fn zip_with<F>(&self, rhs: &Matrix, op: &'static str, f: F) -> Result<Matrix>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.shape() != rhs.shape() {
            return Err(NetworkError::mismatch(op, self.shape(), rhs.shape()));
        }

        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(row_a, row_b)| row_a.iter().zip(row_b.iter()).map(|(&a, &b)| f(a, b)).collect())
            .collect();

        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample() -> Matrix {
        Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap()
    }

    #[test]
    fn test_add_zero_is_identity() {
        let m = sample();
        let zero = Matrix::zeros(2, 3);
        assert_eq!(m.add(&zero).unwrap(), m);
    }

    #[test]
    fn test_identity_product() {
        let m = Matrix::from_rows(vec![vec![1.5, -2.0], vec![0.25, 4.0]]).unwrap();
        assert_eq!(Matrix::identity(2).multiply(&m).unwrap(), m);
    }

    #[test]
    fn test_double_transpose() {
        let m = sample();
        let t = m.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.get(2, 1), 6.0);
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn test_multiply_shape_and_values() {
        let a = sample();
        let b = Matrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]]).unwrap();
        let c = a.multiply(&b).unwrap();
        assert_eq!(c.shape(), (2, 2));
        assert_eq!(c.to_vec(), vec![4.0, 5.0, 10.0, 11.0]);
    }

    #[test]
    fn test_add_mismatch() {
        let a = Matrix::zeros(2, 3);
        let b = Matrix::zeros(3, 2);
        match a.add(&b) {
            Err(NetworkError::DimensionMismatch { op, left, right }) => {
                assert_eq!(op, "add");
                assert_eq!(left, (2, 3));
                assert_eq!(right, (3, 2));
            }
            other => panic!("expected DimensionMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_multiply_mismatch() {
        let a = Matrix::zeros(2, 3);
        let b = Matrix::zeros(2, 2);
        assert!(matches!(
            a.multiply(&b),
            Err(NetworkError::DimensionMismatch { op: "multiply", .. })
        ));
    }

    #[test]
    fn test_subtract_and_hadamard() {
        let a = sample();
        let b = Matrix::filled(2, 3, 2.0);
        assert_eq!(a.subtract(&b).unwrap().to_vec(), vec![-1.0, 0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(a.multiply_each(&b).unwrap().to_vec(), vec![2.0, 4.0, 6.0, 8.0, 10.0, 12.0]);
        assert!(a.multiply_each(&Matrix::zeros(3, 2)).is_err());
    }

    #[test]
    fn test_map_does_not_mutate() {
        let m = sample();
        let doubled = m.map(|x| x * 2.0);
        assert_eq!(doubled.get(1, 2), 12.0);
        assert_eq!(m.get(1, 2), 6.0);
    }

    #[test]
    fn test_from_array_is_column() {
        let v = Matrix::from_array(&[1.0, 2.0, 3.0]);
        assert_eq!(v.shape(), (3, 1));
        assert_eq!(v.get(2, 0), 3.0);
        assert_eq!(v.to_vec(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        assert!(Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).is_err());
        assert!(Matrix::from_rows(vec![]).is_err());
    }

    #[test]
    fn test_random_uniform_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = Matrix::random_uniform(4, 5, -0.5, 0.5, &mut rng);
        assert_eq!(m.shape(), (4, 5));
        assert!(m.to_vec().iter().all(|&x| (-0.5..0.5).contains(&x)));
    }
}
