//! Mathematical utilities for bar element calculations

use nalgebra::{DMatrix, DVector, Matrix2, Vector2};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;

/// 2x2 matrix for bar element stiffness
pub type Mat2 = Matrix2<f64>;
/// 2-element vector for bar element forces/displacements
pub type Vec2 = Vector2<f64>;

/// Compute the local stiffness matrix of a 2-node axial bar
///
/// # Arguments
/// * `a` - Cross-sectional area
/// * `e` - Modulus of elasticity
/// * `length` - Element length
///
/// # Returns
/// `(A*E/L) * [[1, -1], [-1, 1]]`
pub fn bar_local_stiffness(a: f64, e: f64, length: f64) -> Mat2 {
    let k = a * e / length;
    Mat2::new(
        k, -k,
        -k, k,
    )
}

/// Equivalent nodal forces of a uniform distributed load `q` (force per
/// unit length) over a bar of the given length
pub fn bar_consistent_load(q: f64, length: f64) -> Vec2 {
    let half = q * length / 2.0;
    Vec2::new(half, half)
}

/// Check that a square matrix equals its transpose within `tolerance`
pub fn is_symmetric(a: &Mat, tolerance: f64) -> bool {
    if !a.is_square() {
        return false;
    }
    let n = a.nrows();
    for i in 0..n {
        for j in (i + 1)..n {
            if (a[(i, j)] - a[(j, i)]).abs() > tolerance {
                return false;
            }
        }
    }
    true
}

/// Solve a linear system using LU decomposition with partial pivoting
///
/// Rows are equilibrated to unit max-norm before factorizing, so the
/// singularity test does not depend on the units of `a`. Returns `None` when
/// a row is zero or the smallest pivot is below `pivot_tolerance` times the
/// largest one.
pub fn solve_linear_system(a: &Mat, b: &Vec, pivot_tolerance: f64) -> Option<Vec> {
    let n = a.nrows();
    if n == 0 {
        return Some(Vec::zeros(0));
    }

    let mut scaled = a.clone();
    let mut rhs = b.clone();
    for i in 0..n {
        let row_max = scaled.row(i).amax();
        if row_max == 0.0 {
            return None;
        }
        for j in 0..scaled.ncols() {
            scaled[(i, j)] /= row_max;
        }
        rhs[i] /= row_max;
    }

    let lu = scaled.lu();
    let pivots = lu.u().diagonal().abs();
    if pivots.min() <= pivot_tolerance * pivots.max() {
        return None;
    }
    lu.solve(&rhs)
}

/// Solve a linear system using Cholesky decomposition (for symmetric positive definite)
pub fn solve_cholesky(a: &Mat, b: &Vec) -> Option<Vec> {
    a.clone()
        .cholesky()
        .map(|chol| chol.solve(b))
        .filter(|x| x.iter().all(|v| v.is_finite()))
}
