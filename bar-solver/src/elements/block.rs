//! Element blocks - groups of elements sharing a material and properties

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::normalize_name;
use crate::error::{BarError, BarResult};

/// Supported element formulations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    /// 2-node linear axial bar
    #[default]
    T1D1,
}

impl FromStr for ElementType {
    type Err = BarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "t1d1" => Ok(ElementType::T1D1),
            other => Err(BarError::InvalidInput(format!(
                "Unknown element type '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::T1D1 => write!(f, "t1d1"),
        }
    }
}

/// Properties shared by the elements of a block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementProperties {
    /// Cross-sectional area
    pub area: f64,
}

impl ElementProperties {
    /// Create properties with the given area (must be > 0)
    pub fn new(area: f64) -> BarResult<Self> {
        if !(area > 0.0) {
            return Err(BarError::InvalidInput(format!(
                "area must be > 0, got {}",
                area
            )));
        }
        Ok(Self { area })
    }
}

impl Default for ElementProperties {
    fn default() -> Self {
        Self { area: 1.0 }
    }
}

/// Elements claimed by a block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BlockElements {
    /// Explicit element indices
    Indices(Vec<usize>),
    /// Name of an element set
    Set(String),
}

impl BlockElements {
    pub fn set(name: &str) -> Self {
        BlockElements::Set(normalize_name(name))
    }

    /// The implicit set holding every element
    pub fn all() -> Self {
        Self::set(super::ALL)
    }
}

/// A named group of elements bound to one material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementBlock {
    /// Lower-cased block name
    pub name: String,
    /// Lower-cased material name
    pub material: String,
    pub element_type: ElementType,
    pub properties: ElementProperties,
    pub elements: BlockElements,
}

impl ElementBlock {
    /// Create a block of 2-node bars with unit area
    pub fn new(name: &str, material: &str, elements: BlockElements) -> Self {
        Self {
            name: normalize_name(name),
            material: normalize_name(material),
            element_type: ElementType::default(),
            properties: ElementProperties::default(),
            elements,
        }
    }

    pub fn with_properties(mut self, properties: ElementProperties) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_element_type(mut self, element_type: ElementType) -> Self {
        self.element_type = element_type;
        self
    }
}
