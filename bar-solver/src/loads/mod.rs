//! Boundary conditions and applied loads

mod boundary;
mod concentrated;
mod distributed;

pub use boundary::{BoundaryCondition, BoundaryKind};
pub use concentrated::ConcentratedLoad;
pub use distributed::DistributedLoad;

use serde::{Deserialize, Serialize};

use crate::elements::normalize_name;
use crate::error::{BarError, BarResult};

/// Nodes targeted by a boundary condition or concentrated load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeTarget {
    Node(usize),
    Set(String),
}

impl NodeTarget {
    pub fn set(name: &str) -> Self {
        NodeTarget::Set(normalize_name(name))
    }
}

/// Elements targeted by a distributed load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementTarget {
    Element(usize),
    Set(String),
}

impl ElementTarget {
    pub fn set(name: &str) -> Self {
        ElementTarget::Set(normalize_name(name))
    }
}

/// Map a dof letter (`x`, `y`, `z`, any case) to its local index
pub fn dof_from_letter(letter: &str) -> BarResult<usize> {
    match letter.to_lowercase().as_str() {
        "x" => Ok(0),
        "y" => Ok(1),
        "z" => Ok(2),
        other => Err(BarError::InvalidInput(format!("Unknown dof '{}'", other))),
    }
}
