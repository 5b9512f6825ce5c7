//! Degree-of-freedom tags and values
//!
//! Every node carries `dof_per_node` degrees of freedom. A dof is addressed
//! by `(node, local)` and maps to the global index
//! `node * dof_per_node + local`.

use serde::{Deserialize, Serialize};

use crate::error::{BarError, BarResult};

/// Boundary tag carried by each dof
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DofTag {
    /// Unknown displacement, subject to an applied or zero force
    #[default]
    Free,
    /// Prescribed displacement
    Dirichlet,
}

impl DofTag {
    /// Integer encoding used by raw tag arrays (FREE = 0, DIRICHLET = 1)
    pub fn code(self) -> i32 {
        match self {
            DofTag::Free => 0,
            DofTag::Dirichlet => 1,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(DofTag::Free),
            1 => Some(DofTag::Dirichlet),
            _ => None,
        }
    }

    pub fn is_dirichlet(self) -> bool {
        self == DofTag::Dirichlet
    }
}

/// Per-dof tags and values, stored node-major
///
/// For a Dirichlet dof the value is the prescribed displacement; for a free
/// dof it is the accumulated concentrated force.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DofTable {
    num_node: usize,
    dof_per_node: usize,
    tags: Vec<DofTag>,
    values: Vec<f64>,
}

impl DofTable {
    /// All dofs free with zero value
    pub fn new(num_node: usize, dof_per_node: usize) -> Self {
        let n = num_node * dof_per_node;
        Self {
            num_node,
            dof_per_node,
            tags: vec![DofTag::Free; n],
            values: vec![0.0; n],
        }
    }

    /// Build a table from node-major tag codes and values
    pub fn from_codes(
        num_node: usize,
        dof_per_node: usize,
        codes: &[i32],
        values: &[f64],
    ) -> BarResult<Self> {
        let n = num_node * dof_per_node;
        if codes.len() != n || values.len() != n {
            return Err(BarError::InvalidInput(format!(
                "expected {} dof tags and values, got {} and {}",
                n,
                codes.len(),
                values.len()
            )));
        }
        let tags = codes
            .iter()
            .map(|&c| {
                DofTag::from_code(c)
                    .ok_or_else(|| BarError::InvalidInput(format!("unknown dof tag {}", c)))
            })
            .collect::<BarResult<Vec<_>>>()?;
        Ok(Self {
            num_node,
            dof_per_node,
            tags,
            values: values.to_vec(),
        })
    }

    pub fn num_node(&self) -> usize {
        self.num_node
    }

    pub fn dof_per_node(&self) -> usize {
        self.dof_per_node
    }

    pub fn num_dofs(&self) -> usize {
        self.tags.len()
    }

    /// Global index of `(node, local)`
    pub fn global_index(&self, node: usize, local: usize) -> usize {
        node * self.dof_per_node + local
    }

    pub fn tag(&self, node: usize, local: usize) -> DofTag {
        self.tags[self.global_index(node, local)]
    }

    pub fn value(&self, node: usize, local: usize) -> f64 {
        self.values[self.global_index(node, local)]
    }

    /// Overwrite the tag and value of a dof
    pub fn set(&mut self, node: usize, local: usize, tag: DofTag, value: f64) {
        let i = self.global_index(node, local);
        self.tags[i] = tag;
        self.values[i] = value;
    }

    /// Add to the value of a dof, leaving its tag alone
    pub fn add_value(&mut self, node: usize, local: usize, value: f64) {
        let i = self.global_index(node, local);
        self.values[i] += value;
    }

    /// Tags in the integer encoding, node-major
    pub fn codes(&self) -> Vec<i32> {
        self.tags.iter().map(|t| t.code()).collect()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// `(global index, tag, value)` for every dof
    pub fn iter(&self) -> impl Iterator<Item = (usize, DofTag, f64)> + '_ {
        self.tags
            .iter()
            .zip(self.values.iter())
            .enumerate()
            .map(|(i, (&tag, &value))| (i, tag, value))
    }

    /// `(global index, prescribed value)` for every Dirichlet dof
    pub fn dirichlet(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.iter()
            .filter(|(_, tag, _)| tag.is_dirichlet())
            .map(|(i, _, value)| (i, value))
    }

    pub fn num_dirichlet(&self) -> usize {
        self.tags.iter().filter(|t| t.is_dirichlet()).count()
    }
}
