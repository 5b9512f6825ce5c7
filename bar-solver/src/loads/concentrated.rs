//! Concentrated loads - forces applied directly to nodes

use serde::{Deserialize, Serialize};

use super::NodeTarget;

/// A force on one dof of a node or node set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcentratedLoad {
    pub target: NodeTarget,
    /// Local dof index
    pub dof: usize,
    pub amplitude: f64,
}

impl ConcentratedLoad {
    pub fn new(target: NodeTarget, dof: usize, amplitude: f64) -> Self {
        Self {
            target,
            dof,
            amplitude,
        }
    }

    /// Axial force at a single node
    pub fn at_node(node: usize, amplitude: f64) -> Self {
        Self::new(NodeTarget::Node(node), 0, amplitude)
    }

    /// Axial force at every node of a set
    pub fn on_set(name: &str, amplitude: f64) -> Self {
        Self::new(NodeTarget::set(name), 0, amplitude)
    }
}
