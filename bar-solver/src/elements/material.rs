//! Material properties

use serde::{Deserialize, Serialize};

use super::normalize_name;
use crate::error::{BarError, BarResult};

/// Parameters of a linear elastic material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElasticParameters {
    /// Modulus of elasticity (Young's modulus)
    #[serde(rename = "E")]
    pub e: f64,
    /// Poisson's ratio
    pub nu: f64,
}

impl ElasticParameters {
    /// Create elastic parameters, requiring E > 0 and -1 <= nu < 0.5
    pub fn new(e: f64, nu: f64) -> BarResult<Self> {
        if !(e > 0.0) {
            return Err(BarError::InvalidMaterial("E must be > 0".to_string()));
        }
        if !(-1.0..0.5).contains(&nu) {
            return Err(BarError::InvalidMaterial(
                "nu must be between -1 and .5".to_string(),
            ));
        }
        Ok(Self { e, nu })
    }
}

/// Constitutive model of a material, tagged by its type name
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "parameters", rename_all = "lowercase")]
pub enum MaterialModel {
    Elastic(ElasticParameters),
}

/// A named material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Lower-cased material name
    pub name: String,
    pub model: MaterialModel,
}

impl Material {
    pub fn new(name: &str, model: MaterialModel) -> Self {
        Self {
            name: normalize_name(name),
            model,
        }
    }

    /// Create a linear elastic material from E and nu
    pub fn elastic(name: &str, e: f64, nu: f64) -> BarResult<Self> {
        Ok(Self::new(name, MaterialModel::Elastic(ElasticParameters::new(e, nu)?)))
    }

    /// Modulus of elasticity
    pub fn youngs_modulus(&self) -> f64 {
        match self.model {
            MaterialModel::Elastic(p) => p.e,
        }
    }
}
