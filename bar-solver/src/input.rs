//! Input documents - JSON problem descriptions
//!
//! A document is deserialized into raw records, then checked and converted
//! into a typed [`BarModel`]. Defaults are applied here (amplitude 0.0,
//! boundary type `dirichlet`, dof `x`, area 1.0) and every field problem is
//! collected before failing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::elements::{
    BlockElements, ElasticParameters, ElementBlock, ElementProperties, ElementSet, ElementType,
    Material, MaterialModel, NodeSet,
};
use crate::error::{BarError, BarResult, ValidationIssue, ValidationReport};
use crate::loads::{
    dof_from_letter, BoundaryCondition, BoundaryKind, ConcentratedLoad, DistributedLoad,
    ElementTarget, NodeTarget,
};
use crate::model::BarModel;

/// Raw problem document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputDocument {
    pub coords: Vec<f64>,
    pub connect: Vec<Vec<usize>>,
    #[serde(default)]
    pub nset: Vec<NodeSetRecord>,
    #[serde(default)]
    pub elset: Vec<ElementSetRecord>,
    pub boundary: Vec<BoundaryRecord>,
    #[serde(default)]
    pub cload: Vec<CloadRecord>,
    #[serde(default)]
    pub dload: Vec<DloadRecord>,
    pub material: Vec<MaterialRecord>,
    #[serde(rename = "element block")]
    pub element_block: Vec<BlockRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeSetRecord {
    pub name: String,
    pub nodes: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementSetRecord {
    pub name: String,
    pub elements: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoundaryRecord {
    #[serde(default)]
    pub node: Option<usize>,
    #[serde(default)]
    pub nset: Option<String>,
    #[serde(default = "default_dof")]
    pub dof: String,
    #[serde(default = "default_boundary_type", rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub amplitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CloadRecord {
    #[serde(default)]
    pub node: Option<usize>,
    #[serde(default)]
    pub nset: Option<String>,
    #[serde(default = "default_dof")]
    pub dof: String,
    #[serde(default)]
    pub amplitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DloadRecord {
    #[serde(default)]
    pub element: Option<usize>,
    #[serde(default)]
    pub elset: Option<String>,
    #[serde(default = "default_dof")]
    pub dof: String,
    #[serde(default)]
    pub amplitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub parameters: serde_json::Value,
}

/// Elements of a block: a set name or an explicit list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockElementsRecord {
    Set(String),
    Indices(Vec<usize>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockRecord {
    pub name: String,
    pub material: String,
    pub elements: BlockElementsRecord,
    pub element_type: String,
    #[serde(default)]
    pub element_properties: ElementPropertiesRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementPropertiesRecord {
    #[serde(default = "default_area")]
    pub area: f64,
}

impl Default for ElementPropertiesRecord {
    fn default() -> Self {
        Self {
            area: default_area(),
        }
    }
}

fn default_dof() -> String {
    "x".to_string()
}

fn default_boundary_type() -> String {
    "dirichlet".to_string()
}

fn default_area() -> f64 {
    1.0
}

/// Optional top-level key wrapping the whole document
pub const DOCUMENT_ROOT: &str = "wundy";

impl InputDocument {
    /// Parse a document, either bare or nested under [`DOCUMENT_ROOT`]
    pub fn from_json_str(text: &str) -> BarResult<Self> {
        let mut value: serde_json::Value = serde_json::from_str(text)?;
        if let Some(root) = value.as_object_mut() {
            if root.len() == 1 {
                if let Some(inner) = root.remove(DOCUMENT_ROOT) {
                    value = inner;
                }
            }
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> BarResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check field values and build the typed model
    pub fn into_model(self) -> BarResult<BarModel> {
        let mut report = ValidationReport::new();

        let mut connect = Vec::with_capacity(self.connect.len());
        for (e, nodes) in self.connect.iter().enumerate() {
            match nodes.as_slice() {
                [a, b] => connect.push([*a, *b]),
                _ => report.push(invalid(
                    format!("connect[{}]", e),
                    format!("2-node bar needs 2 nodes, got {}", nodes.len()),
                )),
            }
        }

        let mut model = BarModel::new(&self.coords, connect);

        for ns in &self.nset {
            model.add_node_set(NodeSet::new(&ns.name, ns.nodes.clone()));
        }
        for es in &self.elset {
            model.add_element_set(ElementSet::new(&es.name, es.elements.clone()));
        }

        for (i, rec) in self.boundary.iter().enumerate() {
            let path = format!("boundary[{}]", i);
            let target = node_target(rec.node, rec.nset.as_deref(), &path, &mut report);
            let dof = parse_dof(&rec.dof, &path, &mut report);
            let kind = match rec.kind.parse::<BoundaryKind>() {
                Ok(kind) => Some(kind),
                Err(e) => {
                    report.push(invalid(format!("{}.type", path), e.to_string()));
                    None
                }
            };
            if let (Some(target), Some(dof), Some(kind)) = (target, dof, kind) {
                model.add_boundary(BoundaryCondition::new(target, dof, kind, rec.amplitude));
            }
        }

        for (i, rec) in self.cload.iter().enumerate() {
            let path = format!("cload[{}]", i);
            let target = node_target(rec.node, rec.nset.as_deref(), &path, &mut report);
            let dof = parse_dof(&rec.dof, &path, &mut report);
            if let (Some(target), Some(dof)) = (target, dof) {
                model.add_cload(ConcentratedLoad::new(target, dof, rec.amplitude));
            }
        }

        for (i, rec) in self.dload.iter().enumerate() {
            let path = format!("dload[{}]", i);
            let target = element_target(rec.element, rec.elset.as_deref(), &path, &mut report);
            let dof = parse_dof(&rec.dof, &path, &mut report);
            if let (Some(target), Some(dof)) = (target, dof) {
                model.add_dload(DistributedLoad::new(target, dof, rec.amplitude));
            }
        }

        for (i, rec) in self.material.into_iter().enumerate() {
            let path = format!("material[{}]", i);
            match material_model(&rec.kind, rec.parameters) {
                Ok(m) => {
                    model.add_material(Material::new(&rec.name, m));
                }
                Err(e) => report.push(invalid(path, e.to_string())),
            }
        }

        for (i, rec) in self.element_block.iter().enumerate() {
            let path = format!("element block[{}]", i);
            let element_type = match rec.element_type.parse::<ElementType>() {
                Ok(t) => Some(t),
                Err(e) => {
                    report.push(invalid(format!("{}.element_type", path), e.to_string()));
                    None
                }
            };
            let properties = match ElementProperties::new(rec.element_properties.area) {
                Ok(p) => Some(p),
                Err(e) => {
                    report.push(invalid(format!("{}.element_properties", path), e.to_string()));
                    None
                }
            };
            let elements = match &rec.elements {
                BlockElementsRecord::Set(name) => BlockElements::set(name),
                BlockElementsRecord::Indices(indices) => BlockElements::Indices(indices.clone()),
            };
            if let (Some(element_type), Some(properties)) = (element_type, properties) {
                model.add_block(
                    ElementBlock::new(&rec.name, &rec.material, elements)
                        .with_element_type(element_type)
                        .with_properties(properties),
                );
            }
        }

        report.into_result(model)
    }
}

/// Read, check and convert a JSON document in one step
pub fn load_str(text: &str) -> BarResult<BarModel> {
    InputDocument::from_json_str(text)?.into_model()
}

/// Read, check and convert a JSON document file
pub fn load_path<P: AsRef<Path>>(path: P) -> BarResult<BarModel> {
    InputDocument::from_path(path)?.into_model()
}

fn invalid(path: String, reason: String) -> ValidationIssue {
    ValidationIssue::InvalidField { path, reason }
}

fn material_model(kind: &str, parameters: serde_json::Value) -> BarResult<MaterialModel> {
    match kind.to_lowercase().as_str() {
        "elastic" => {
            let raw: ElasticParameters = serde_json::from_value(parameters)?;
            Ok(MaterialModel::Elastic(ElasticParameters::new(raw.e, raw.nu)?))
        }
        other => Err(BarError::InvalidMaterial(format!(
            "Unknown material '{}'",
            other
        ))),
    }
}

fn parse_dof(letter: &str, path: &str, report: &mut ValidationReport) -> Option<usize> {
    match dof_from_letter(letter) {
        Ok(dof) => Some(dof),
        Err(e) => {
            report.push(invalid(format!("{}.dof", path), e.to_string()));
            None
        }
    }
}

fn node_target(
    node: Option<usize>,
    nset: Option<&str>,
    path: &str,
    report: &mut ValidationReport,
) -> Option<NodeTarget> {
    match (node, nset) {
        (Some(node), None) => Some(NodeTarget::Node(node)),
        (None, Some(name)) => Some(NodeTarget::set(name)),
        _ => {
            report.push(invalid(
                path.to_string(),
                "exactly one of 'node' or 'nset' is required".to_string(),
            ));
            None
        }
    }
}

fn element_target(
    element: Option<usize>,
    elset: Option<&str>,
    path: &str,
    report: &mut ValidationReport,
) -> Option<ElementTarget> {
    match (element, elset) {
        (Some(element), None) => Some(ElementTarget::Element(element)),
        (None, Some(name)) => Some(ElementTarget::set(name)),
        _ => {
            report.push(invalid(
                path.to_string(),
                "exactly one of 'element' or 'elset' is required".to_string(),
            ));
            None
        }
    }
}
