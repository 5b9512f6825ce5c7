//! Bar model - typed problem description

use serde::{Deserialize, Serialize};

use crate::analysis::{self, AnalysisOptions};
use crate::elements::{ElementBlock, ElementSet, Material, NodeSet};
use crate::error::BarResult;
use crate::loads::{BoundaryCondition, ConcentratedLoad, DistributedLoad};
use crate::math::Mat;
use crate::preprocess;
use crate::results::Solution;

/// A 1-D bar structure: mesh, named sets, materials, blocks, conditions and loads
///
/// Entities are stored exactly as given. Duplicate names, dangling references
/// and unassigned elements are reported together by [`preprocess`].
///
/// [`preprocess`]: crate::preprocess::preprocess
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarModel {
    /// Nodal coordinates, one row per node, one column per dof
    pub coords: Mat,
    /// Element connectivity (2-node bars)
    pub connect: Vec<[usize; 2]>,
    pub node_sets: Vec<NodeSet>,
    pub element_sets: Vec<ElementSet>,
    pub materials: Vec<Material>,
    pub blocks: Vec<ElementBlock>,
    pub boundary: Vec<BoundaryCondition>,
    pub cloads: Vec<ConcentratedLoad>,
    pub dloads: Vec<DistributedLoad>,
}

impl BarModel {
    /// Create a model from nodal x-coordinates and connectivity
    pub fn new(x: &[f64], connect: Vec<[usize; 2]>) -> Self {
        Self::from_coords(Mat::from_column_slice(x.len(), 1, x), connect)
    }

    /// Create a model from a full coordinate array (num_node x dof_per_node)
    pub fn from_coords(coords: Mat, connect: Vec<[usize; 2]>) -> Self {
        Self {
            coords,
            connect,
            node_sets: Vec::new(),
            element_sets: Vec::new(),
            materials: Vec::new(),
            blocks: Vec::new(),
            boundary: Vec::new(),
            cloads: Vec::new(),
            dloads: Vec::new(),
        }
    }

    /// Evenly spaced bar from x = 0 to x = `length` with `num_elem` elements
    pub fn uniform(length: f64, num_elem: usize) -> Self {
        let x: Vec<f64> = (0..=num_elem)
            .map(|i| length * i as f64 / num_elem.max(1) as f64)
            .collect();
        let connect = (0..num_elem).map(|e| [e, e + 1]).collect();
        Self::new(&x, connect)
    }

    pub fn num_node(&self) -> usize {
        self.coords.nrows()
    }

    pub fn num_elem(&self) -> usize {
        self.connect.len()
    }

    pub fn dof_per_node(&self) -> usize {
        self.coords.ncols()
    }

    // ========================
    // Model Building Methods
    // ========================

    pub fn add_node_set(&mut self, set: NodeSet) -> &mut Self {
        self.node_sets.push(set);
        self
    }

    pub fn add_element_set(&mut self, set: ElementSet) -> &mut Self {
        self.element_sets.push(set);
        self
    }

    pub fn add_material(&mut self, material: Material) -> &mut Self {
        self.materials.push(material);
        self
    }

    pub fn add_block(&mut self, block: ElementBlock) -> &mut Self {
        self.blocks.push(block);
        self
    }

    pub fn add_boundary(&mut self, bc: BoundaryCondition) -> &mut Self {
        self.boundary.push(bc);
        self
    }

    pub fn add_cload(&mut self, load: ConcentratedLoad) -> &mut Self {
        self.cloads.push(load);
        self
    }

    pub fn add_dload(&mut self, load: DistributedLoad) -> &mut Self {
        self.dloads.push(load);
        self
    }

    // ========================
    // Analysis Methods
    // ========================

    /// Run linear static analysis with default options
    pub fn analyze(&self) -> BarResult<Solution> {
        self.analyze_with(&AnalysisOptions::default())
    }

    /// Preprocess, assemble, apply boundary conditions and solve
    pub fn analyze_with(&self, options: &AnalysisOptions) -> BarResult<Solution> {
        let preprocessed = preprocess::preprocess(self)?;
        analysis::solve(&preprocessed, options)
    }
}
