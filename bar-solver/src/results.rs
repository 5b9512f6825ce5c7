//! Result types for bar analysis

use serde::{Deserialize, Serialize};

use crate::error::BarResult;
use crate::math::{Mat, Vec as FEVec};
use crate::preprocess::PreprocessedModel;

/// Output of a linear static analysis
///
/// `stiffness` and `load` are the assembled system before any boundary
/// condition was applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// Nodal displacements, indexed by global dof
    pub displacements: FEVec,
    /// Global stiffness matrix
    pub stiffness: Mat,
    /// Global load vector (concentrated + distributed)
    pub load: FEVec,
}

/// Strain, stress and axial force in one element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementResult {
    pub element: usize,
    /// Signed length, x(node 1) - x(node 0)
    pub length: f64,
    pub strain: f64,
    pub stress: f64,
    /// Axial force (positive = tension)
    pub axial_force: f64,
}

/// Analysis summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub num_dofs: usize,
    pub max_displacement: f64,
    pub max_disp_dof: usize,
    pub max_reaction: f64,
    pub max_reaction_dof: usize,
}

/// Plain-data view of a solution for JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub displacements: Vec<f64>,
    /// Row-major global stiffness matrix
    pub stiffness: Vec<Vec<f64>>,
    pub load: Vec<f64>,
    pub reactions: Vec<f64>,
    pub elements: Vec<ElementResult>,
    pub summary: AnalysisSummary,
}

impl AnalysisReport {
    pub fn new(solution: &Solution, model: &PreprocessedModel) -> BarResult<Self> {
        Ok(Self {
            displacements: solution.displacements.iter().copied().collect(),
            stiffness: solution.stiffness_rows(),
            load: solution.load.iter().copied().collect(),
            reactions: solution.reactions().iter().copied().collect(),
            elements: solution.element_results(model)?,
            summary: solution.summary(),
        })
    }
}

impl Solution {
    pub fn num_dofs(&self) -> usize {
        self.displacements.len()
    }

    /// Displacement of `(node, local)` for a model with `dof_per_node` dofs per node
    pub fn displacement(&self, node: usize, local: usize, dof_per_node: usize) -> f64 {
        self.displacements[node * dof_per_node + local]
    }

    /// Nodal forces not balanced by applied loads: K u - F
    ///
    /// Non-zero only at prescribed dofs, up to round-off.
    pub fn reactions(&self) -> FEVec {
        &self.stiffness * &self.displacements - &self.load
    }

    /// Strain, stress and axial force in every element, in element order
    pub fn element_results(&self, model: &PreprocessedModel) -> BarResult<Vec<ElementResult>> {
        let mut results = Vec::with_capacity(model.num_elem());
        for block in &model.blocks {
            let e = model.material(&block.material)?.youngs_modulus();
            for &element in &block.elements {
                let nodes = model.connect[element];
                let length = model.coords[(nodes[1], 0)] - model.coords[(nodes[0], 0)];
                let du = self.displacement(nodes[1], 0, model.dof_per_node())
                    - self.displacement(nodes[0], 0, model.dof_per_node());
                let strain = du / length;
                let stress = e * strain;
                results.push(ElementResult {
                    element,
                    length,
                    strain,
                    stress,
                    axial_force: block.area * stress,
                });
            }
        }
        results.sort_by_key(|r| r.element);
        Ok(results)
    }

    /// Largest displacement and reaction magnitudes
    pub fn summary(&self) -> AnalysisSummary {
        let mut summary = AnalysisSummary {
            num_dofs: self.num_dofs(),
            ..Default::default()
        };

        for (i, u) in self.displacements.iter().enumerate() {
            if u.abs() > summary.max_displacement {
                summary.max_displacement = u.abs();
                summary.max_disp_dof = i;
            }
        }

        for (i, r) in self.reactions().iter().enumerate() {
            if r.abs() > summary.max_reaction {
                summary.max_reaction = r.abs();
                summary.max_reaction_dof = i;
            }
        }

        summary
    }

    /// Stiffness matrix as row-major nested vectors
    pub fn stiffness_rows(&self) -> Vec<Vec<f64>> {
        self.stiffness
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn two_element_solution() -> Solution {
        let stiffness = Mat::from_row_slice(
            3,
            3,
            &[10.0, -10.0, 0.0, -10.0, 20.0, -10.0, 0.0, -10.0, 10.0],
        );
        Solution {
            displacements: FEVec::from_vec(vec![0.0, 0.1, 0.2]),
            stiffness,
            load: FEVec::from_vec(vec![0.0, 0.0, 1.0]),
        }
    }

    #[test]
    fn test_reactions() {
        let rxn = two_element_solution().reactions();
        assert_relative_eq!(rxn[0], -1.0, epsilon = 1e-12);
        assert_relative_eq!(rxn[1], 0.0, epsilon = 1e-12);
        assert_relative_eq!(rxn[2], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_summary() {
        let summary = two_element_solution().summary();
        assert_eq!(summary.num_dofs, 3);
        assert_relative_eq!(summary.max_displacement, 0.2);
        assert_eq!(summary.max_disp_dof, 2);
        assert_relative_eq!(summary.max_reaction, 1.0, epsilon = 1e-12);
        assert_eq!(summary.max_reaction_dof, 0);
    }

    #[test]
    fn test_stiffness_rows() {
        let rows = two_element_solution().stiffness_rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec![-10.0, 20.0, -10.0]);
    }
}
