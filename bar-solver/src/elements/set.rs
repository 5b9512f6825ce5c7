//! Named node and element sets

use serde::{Deserialize, Serialize};

use super::normalize_name;

/// A named, ordered collection of node indices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSet {
    pub name: String,
    pub nodes: Vec<usize>,
}

impl NodeSet {
    pub fn new(name: &str, nodes: Vec<usize>) -> Self {
        Self {
            name: normalize_name(name),
            nodes,
        }
    }
}

/// A named, ordered collection of element indices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSet {
    pub name: String,
    pub elements: Vec<usize>,
}

impl ElementSet {
    pub fn new(name: &str, elements: Vec<usize>) -> Self {
        Self {
            name: normalize_name(name),
            elements,
        }
    }
}
