//! Symmetric enforcement of prescribed displacements

use crate::dof::DofTable;
use crate::math::{Mat, Vec as FEVec};

/// Eliminate every Dirichlet dof from `(k, f)`, keeping the system symmetric
///
/// Known displacements are moved to the right-hand side using the columns of
/// the unmodified `k`, then the rows and columns of the prescribed dofs are
/// replaced by identity rows and `f` takes the prescribed values there.
pub fn apply_dirichlet(k: &Mat, f: &FEVec, dofs: &DofTable) -> (Mat, FEVec) {
    let mut k_bc = k.clone();
    let mut f_bc = f.clone();

    for (i, value) in dofs.dirichlet() {
        if value != 0.0 {
            f_bc.axpy(-value, &k.column(i), 1.0);
        }
    }

    for (i, _) in dofs.dirichlet() {
        k_bc.row_mut(i).fill(0.0);
        k_bc.column_mut(i).fill(0.0);
        k_bc[(i, i)] = 1.0;
    }

    for (i, value) in dofs.dirichlet() {
        f_bc[i] = value;
    }

    (k_bc, f_bc)
}
