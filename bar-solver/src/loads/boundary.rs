//! Boundary conditions at nodes

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::NodeTarget;
use crate::dof::DofTag;
use crate::error::BarError;

/// Kind of a boundary condition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryKind {
    /// Prescribed displacement
    #[default]
    Dirichlet,
    /// Prescribed force
    Neumann,
}

impl BoundaryKind {
    /// Tag written to the targeted dofs
    pub fn tag(self) -> DofTag {
        match self {
            BoundaryKind::Dirichlet => DofTag::Dirichlet,
            BoundaryKind::Neumann => DofTag::Free,
        }
    }
}

impl FromStr for BoundaryKind {
    type Err = BarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dirichlet" => Ok(BoundaryKind::Dirichlet),
            "neumann" => Ok(BoundaryKind::Neumann),
            other => Err(BarError::InvalidInput(format!(
                "Unknown boundary type '{}'",
                other
            ))),
        }
    }
}

/// A boundary condition on one dof of a node or node set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryCondition {
    pub target: NodeTarget,
    /// Local dof index
    pub dof: usize,
    pub kind: BoundaryKind,
    /// Prescribed displacement (Dirichlet) or force (Neumann)
    pub amplitude: f64,
}

impl BoundaryCondition {
    pub fn new(target: NodeTarget, dof: usize, kind: BoundaryKind, amplitude: f64) -> Self {
        Self {
            target,
            dof,
            kind,
            amplitude,
        }
    }

    /// Fix the axial dof of a node at zero
    pub fn fixed(node: usize) -> Self {
        Self::new(NodeTarget::Node(node), 0, BoundaryKind::Dirichlet, 0.0)
    }

    /// Prescribe the axial displacement of a node
    pub fn displacement(node: usize, value: f64) -> Self {
        Self::new(NodeTarget::Node(node), 0, BoundaryKind::Dirichlet, value)
    }

    /// Prescribe the axial force at a node
    pub fn force(node: usize, value: f64) -> Self {
        Self::new(NodeTarget::Node(node), 0, BoundaryKind::Neumann, value)
    }
}
