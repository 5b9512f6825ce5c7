//! Global stiffness matrix and load vector assembly
//!
//! K is built by scatter-adding the 2x2 stiffness of every bar in every
//! element block. F collects concentrated forces on free dofs and the
//! consistent nodal loads of distributed loads.

use log::{debug, info};

use crate::analysis::AnalysisOptions;
use crate::error::{BarError, BarResult};
use crate::math::{self, Mat, Vec as FEVec};
use crate::preprocess::PreprocessedModel;

/// Assembled, unconstrained system
#[derive(Debug, Clone)]
pub struct AssembledSystem {
    /// Global stiffness matrix
    pub stiffness: Mat,
    /// Global load vector
    pub load: FEVec,
}

/// Assemble the global stiffness matrix and load vector
pub fn assemble(model: &PreprocessedModel, options: &AnalysisOptions) -> BarResult<AssembledSystem> {
    let dof_per_node = model.dof_per_node();
    if dof_per_node != 1 {
        return Err(BarError::InvalidInput(format!(
            "bar elements carry 1 dof per node, model has {}",
            dof_per_node
        )));
    }

    let n_dofs = model.num_dofs();
    let mut k_global = Mat::zeros(n_dofs, n_dofs);
    let mut f_global = FEVec::zeros(n_dofs);

    // Concentrated loads; a Dirichlet value is a displacement, not a force
    for (i, tag, value) in model.dofs.iter() {
        if !tag.is_dirichlet() {
            f_global[i] += value;
        }
    }

    for block in &model.blocks {
        let material = model.material(&block.material)?;
        let e = material.youngs_modulus();
        let a = block.area;
        debug!(
            "Assembling block '{}': {} elements, E = {}, A = {}",
            block.name,
            block.elements.len(),
            e,
            a
        );

        for &element in &block.elements {
            let nodes = model.connect[element];
            let dofs = [
                model.dofs.global_index(nodes[0], 0),
                model.dofs.global_index(nodes[1], 0),
            ];

            let length = model.coords[(nodes[1], 0)] - model.coords[(nodes[0], 0)];
            if length.abs() <= options.zero_length_tolerance {
                return Err(BarError::DegenerateElement { element, nodes });
            }

            // Node order only sets the sign of the length
            let ke = math::bar_local_stiffness(a, e, length.abs());
            for (r, &dr) in dofs.iter().enumerate() {
                for (c, &dc) in dofs.iter().enumerate() {
                    k_global[(dr, dc)] += ke[(r, c)];
                }
            }

            let q = model.dload[(element, 0)];
            let qe = math::bar_consistent_load(q, length.abs());
            for (r, &dr) in dofs.iter().enumerate() {
                f_global[dr] += qe[r];
            }
        }
    }

    if options.check_symmetry && !math::is_symmetric(&k_global, options.symmetry_tolerance) {
        return Err(BarError::AnalysisFailed(
            "assembled stiffness matrix is not symmetric".to_string(),
        ));
    }

    if options.log {
        info!(
            "Assembled {} x {} stiffness matrix from {} blocks",
            n_dofs,
            n_dofs,
            model.blocks.len()
        );
    }

    Ok(AssembledSystem {
        stiffness: k_global,
        load: f_global,
    })
}
