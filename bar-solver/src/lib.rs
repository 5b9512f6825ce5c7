//! Bar Solver - linear static analysis of 1-D axial bars
//!
//! A small finite element pipeline for bars made of 2-node linear elements:
//! - Preprocessing: named sets, materials and element blocks are checked and
//!   resolved into index form, with every problem reported together
//! - Assembly of the global stiffness matrix and load vector
//! - Symmetric enforcement of prescribed displacements
//! - Dense direct solution (LU or Cholesky)
//!
//! ## Example
//! ```rust
//! use bar_solver::prelude::*;
//!
//! let mut model = BarModel::uniform(1.0, 4);
//! model
//!     .add_material(Material::elastic("Steel", 1.0, 0.3).unwrap())
//!     .add_block(ElementBlock::new("Bar", "steel", BlockElements::all()))
//!     .add_boundary(BoundaryCondition::fixed(0))
//!     .add_cload(ConcentratedLoad::at_node(4, 1.0));
//!
//! let solution = model.analyze().unwrap();
//! assert!((solution.displacements[4] - 1.0).abs() < 1e-12);
//! ```

pub mod analysis;
pub mod assembly;
pub mod dof;
pub mod elements;
pub mod error;
pub mod input;
pub mod loads;
pub mod math;
pub mod model;
pub mod preprocess;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{AnalysisOptions, LinearSolver};
    pub use crate::dof::{DofTable, DofTag};
    pub use crate::elements::{
        BlockElements, ElementBlock, ElementProperties, ElementSet, ElementType, Material,
        NodeSet,
    };
    pub use crate::error::{BarError, BarResult, ValidationIssue, ValidationReport};
    pub use crate::input::InputDocument;
    pub use crate::loads::{
        BoundaryCondition, BoundaryKind, ConcentratedLoad, DistributedLoad, ElementTarget,
        NodeTarget,
    };
    pub use crate::model::BarModel;
    pub use crate::preprocess::{preprocess, PreprocessedModel};
    pub use crate::results::{AnalysisReport, AnalysisSummary, ElementResult, Solution};
}
