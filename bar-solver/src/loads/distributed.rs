//! Distributed loads on elements

use serde::{Deserialize, Serialize};

use super::ElementTarget;

/// A uniform distributed (line) load on one dof of an element or element set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributedLoad {
    pub target: ElementTarget,
    /// Local dof index
    pub dof: usize,
    /// Force per unit length
    pub amplitude: f64,
}

impl DistributedLoad {
    pub fn new(target: ElementTarget, dof: usize, amplitude: f64) -> Self {
        Self {
            target,
            dof,
            amplitude,
        }
    }

    /// Uniform axial load on a single element
    pub fn on_element(element: usize, amplitude: f64) -> Self {
        Self::new(ElementTarget::Element(element), 0, amplitude)
    }

    /// Uniform axial load on every element of a set
    pub fn on_set(name: &str, amplitude: f64) -> Self {
        Self::new(ElementTarget::set(name), 0, amplitude)
    }
}

