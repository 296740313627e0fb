//! Property-based tests for the matrix algebra laws.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::matrix::matrix::Matrix;
    use crate::matrix::matrix_dense::Matrix64;

    // Integer-valued cells keep sums and products exact
    fn int_grid(rows: usize, cols: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
        prop::collection::vec(
            prop::collection::vec((-50i32..50).prop_map(f64::from), cols),
            rows,
        )
    }

    fn int_matrix() -> impl Strategy<Value = Matrix64> {
        (1usize..6, 1usize..6)
            .prop_flat_map(|(rows, cols)| int_grid(rows, cols))
            .prop_map(|grid| Matrix64::from_list(grid).unwrap())
    }

    fn int_matrix_pair() -> impl Strategy<Value = (Matrix64, Matrix64)> {
        (1usize..6, 1usize..6)
            .prop_flat_map(|(rows, cols)| (int_grid(rows, cols), int_grid(rows, cols)))
            .prop_map(|(a, b)| {
                (
                    Matrix64::from_list(a).unwrap(),
                    Matrix64::from_list(b).unwrap(),
                )
            })
    }

    fn mul_compatible_pair() -> impl Strategy<Value = (Matrix64, Matrix64)> {
        (1usize..6, 1usize..6, 1usize..6)
            .prop_flat_map(|(rows, inner, cols)| (int_grid(rows, inner), int_grid(inner, cols)))
            .prop_map(|(a, b)| {
                (
                    Matrix64::from_list(a).unwrap(),
                    Matrix64::from_list(b).unwrap(),
                )
            })
    }

    fn square_int_matrix(max_n: usize) -> impl Strategy<Value = Matrix64> {
        (1usize..=max_n)
            .prop_flat_map(|n| int_grid(n, n))
            .prop_map(|grid| Matrix64::from_list(grid).unwrap())
    }

    // Strictly diagonally dominant, hence invertible
    fn invertible_matrix() -> impl Strategy<Value = Matrix64> {
        square_int_matrix(6).prop_map(|mut m| {
            let n = m.rows();
            m.update(|v, r, c| if r == c { v.abs() + 50. * n as f64 } else { v });
            m
        })
    }

    fn float_grid() -> impl Strategy<Value = Vec<Vec<f64>>> {
        (1usize..6, 1usize..6).prop_flat_map(|(rows, cols)| {
            prop::collection::vec(prop::collection::vec(-1e12f64..1e12f64, cols), rows)
        })
    }

    // Any finite f64, including subnormals and extreme exponents
    fn finite_f64() -> impl Strategy<Value = f64> {
        any::<u64>()
            .prop_map(f64::from_bits)
            .prop_filter("finite", |v| v.is_finite())
    }

    proptest! {
        #[test]
        fn transpose_is_an_involution(m in int_matrix()) {
            let t = m.transpose();
            prop_assert_eq!(t.shape(), (m.cols(), m.rows()));
            prop_assert!(t.transpose().equal(&m).unwrap());
        }

        #[test]
        fn sub_undoes_add((a, b) in int_matrix_pair()) {
            let sum = a.add(&b).unwrap();
            prop_assert!(sum.sub(&b).unwrap().equal(&a).unwrap());
        }

        #[test]
        fn add_is_commutative((a, b) in int_matrix_pair()) {
            prop_assert!(a.add(&b).unwrap().equal(&b.add(&a).unwrap()).unwrap());
        }

        #[test]
        fn identity_is_neutral_for_mul(m in int_matrix()) {
            let right = m.mul(&Matrix64::identity(m.cols())).unwrap();
            let left = Matrix64::identity(m.rows()).mul(&m).unwrap();
            prop_assert!(right.equal(&m).unwrap());
            prop_assert!(left.equal(&m).unwrap());
        }

        #[test]
        fn transpose_of_product_reverses_order((a, b) in mul_compatible_pair()) {
            let lhs = a.mul(&b).unwrap().transpose();
            let rhs = b.transpose().mul(&a.transpose()).unwrap();
            prop_assert!(lhs.equal(&rhs).unwrap());
        }

        #[test]
        fn inverse_round_trip(m in invertible_matrix()) {
            let n = m.rows();
            let product = m.mul(&m.inverse().unwrap()).unwrap();
            prop_assert!(product.approximately_equal(&Matrix64::identity(n), 0.001).unwrap());
        }

        #[test]
        fn determinant_is_transpose_invariant(m in square_int_matrix(5)) {
            prop_assert_eq!(m.determinant().unwrap(), m.transpose().determinant().unwrap());
        }

        #[test]
        fn determinant_of_scaled_identity(n in 1usize..7, k in -5i32..5) {
            let k = f64::from(k);
            let m = Matrix64::identity(n).mul_scalar(k);
            prop_assert_eq!(m.determinant().unwrap(), k.powi(n as i32));
        }

        #[test]
        fn serialize_round_trip_is_exact(grid in float_grid()) {
            let m = Matrix64::from_list(grid.clone()).unwrap();
            let back = Matrix64::deserialize(&m.serialize().unwrap()).unwrap();
            prop_assert_eq!(back.to_list(), grid);
        }

        #[test]
        fn serialize_round_trip_keeps_every_bit(values in prop::collection::vec(finite_f64(), 1..16)) {
            let m = Matrix64::from_list(vec![values.clone()]).unwrap();
            let back = Matrix64::deserialize(&m.serialize().unwrap()).unwrap();
            let bits: Vec<u64> = back.iter().map(|v| v.to_bits()).collect();
            let expected: Vec<u64> = values.iter().map(|v| v.to_bits()).collect();
            prop_assert_eq!(bits, expected);
        }

        #[test]
        fn clone_is_independent(m in int_matrix(), value in -100f64..100f64) {
            let original = m.to_list();
            let mut copy = m.clone();
            copy.fill(value);
            prop_assert_eq!(m.to_list(), original);
        }
    }
}
