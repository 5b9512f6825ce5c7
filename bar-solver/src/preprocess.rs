//! Preprocessing - resolve named sets and references into engine-ready tables
//!
//! The whole model is checked in a single pass. Every problem found is
//! collected in a [`ValidationReport`] so they can be reported together.

use std::collections::HashMap;

use log::debug;
use serde::Serialize;

use crate::dof::DofTable;
use crate::elements::{BlockElements, ElementType, Material, ALL};
use crate::error::{BarError, BarResult, ValidationIssue, ValidationReport};
use crate::loads::{ElementTarget, NodeTarget};
use crate::math::Mat;
use crate::model::BarModel;

/// An element block with its element list resolved and properties flattened
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedBlock {
    pub name: String,
    pub material: String,
    pub element_type: ElementType,
    /// Cross-sectional area
    pub area: f64,
    pub elements: Vec<usize>,
}

/// Engine-ready problem: coordinates, connectivity, dof tables, distributed
/// loads and name-keyed lookups
#[derive(Debug, Clone, Serialize)]
pub struct PreprocessedModel {
    pub coords: Mat,
    pub connect: Vec<[usize; 2]>,
    pub dofs: DofTable,
    /// Distributed load amplitude per element and dof (num_elem x dof_per_node)
    pub dload: Mat,
    pub node_sets: HashMap<String, Vec<usize>>,
    pub element_sets: HashMap<String, Vec<usize>>,
    pub materials: HashMap<String, Material>,
    /// Blocks in definition order
    pub blocks: Vec<ResolvedBlock>,
}

impl PreprocessedModel {
    pub fn num_node(&self) -> usize {
        self.coords.nrows()
    }

    pub fn num_elem(&self) -> usize {
        self.connect.len()
    }

    pub fn dof_per_node(&self) -> usize {
        self.coords.ncols()
    }

    pub fn num_dofs(&self) -> usize {
        self.dofs.num_dofs()
    }

    pub fn block(&self, name: &str) -> Option<&ResolvedBlock> {
        self.blocks.iter().find(|b| b.name == name)
    }

    pub fn material(&self, name: &str) -> BarResult<&Material> {
        self.materials
            .get(name)
            .ok_or_else(|| BarError::MaterialNotFound(name.to_string()))
    }
}

/// Preprocess a model, failing with every collected issue if any were found
pub fn preprocess(model: &BarModel) -> BarResult<PreprocessedModel> {
    let (preprocessed, report) = resolve(model);
    report.into_result(preprocessed)
}

/// Resolve a model into engine tables alongside the report of every issue found
///
/// Out-of-range references are left out of the resolved tables, so the
/// tables are only meaningful when the report is empty.
pub fn resolve(model: &BarModel) -> (PreprocessedModel, ValidationReport) {
    let mut report = ValidationReport::new();
    let num_node = model.num_node();
    let num_elem = model.num_elem();
    let dof_per_node = model.dof_per_node();

    debug!(
        "Preprocessing model: {} nodes, {} elements, {} dof per node",
        num_node, num_elem, dof_per_node
    );

    for (e, nodes) in model.connect.iter().enumerate() {
        for &n in nodes {
            if n >= num_node {
                report.push(ValidationIssue::NodeOutOfRange {
                    node: n,
                    num_node,
                    context: format!("connectivity of element {}", e),
                });
            }
        }
    }

    // Node sets
    let mut node_sets: HashMap<String, Vec<usize>> = HashMap::new();
    node_sets.insert(ALL.to_string(), (0..num_node).collect());
    for ns in &model.node_sets {
        if node_sets.contains_key(&ns.name) {
            report.push(ValidationIssue::DuplicateNodeSet(ns.name.clone()));
            continue;
        }
        let context = format!("node set '{}'", ns.name);
        let nodes = in_range_nodes(&ns.nodes, num_node, &context, &mut report);
        node_sets.insert(ns.name.clone(), nodes);
    }

    // Element sets
    let mut element_sets: HashMap<String, Vec<usize>> = HashMap::new();
    element_sets.insert(ALL.to_string(), (0..num_elem).collect());
    for es in &model.element_sets {
        if element_sets.contains_key(&es.name) {
            report.push(ValidationIssue::DuplicateElementSet(es.name.clone()));
            continue;
        }
        let context = format!("element set '{}'", es.name);
        let elements = in_range_elements(&es.elements, num_elem, &context, &mut report);
        element_sets.insert(es.name.clone(), elements);
    }

    // Materials
    let mut materials: HashMap<String, Material> = HashMap::new();
    for material in &model.materials {
        if materials.contains_key(&material.name) {
            report.push(ValidationIssue::DuplicateMaterial(material.name.clone()));
        } else {
            materials.insert(material.name.clone(), material.clone());
        }
    }

    // Element blocks
    let mut blocks: Vec<ResolvedBlock> = Vec::new();
    for eb in &model.blocks {
        if blocks.iter().any(|b| b.name == eb.name) {
            report.push(ValidationIssue::DuplicateBlock(eb.name.clone()));
            continue;
        }
        if !materials.contains_key(&eb.material) {
            report.push(ValidationIssue::UndefinedMaterial {
                block: eb.name.clone(),
                material: eb.material.clone(),
            });
            continue;
        }
        let elements = match &eb.elements {
            BlockElements::Set(set) => match element_sets.get(set) {
                Some(elements) => elements.clone(),
                None => {
                    report.push(ValidationIssue::UndefinedElementSet {
                        set: set.clone(),
                        required_by: format!("element block '{}'", eb.name),
                    });
                    continue;
                }
            },
            BlockElements::Indices(indices) => {
                let context = format!("element block '{}'", eb.name);
                in_range_elements(indices, num_elem, &context, &mut report)
            }
        };
        debug!(
            "Element block '{}': material '{}', area {}, {} elements",
            eb.name,
            eb.material,
            eb.properties.area,
            elements.len()
        );
        blocks.push(ResolvedBlock {
            name: eb.name.clone(),
            material: eb.material.clone(),
            element_type: eb.element_type,
            area: eb.properties.area,
            elements,
        });
    }

    // Boundary conditions become dof tags and prescribed values
    let mut dofs = DofTable::new(num_node, dof_per_node);
    for bc in &model.boundary {
        let Some(nodes) = resolve_nodes(&bc.target, &node_sets, num_node, &mut report) else {
            continue;
        };
        if !dof_in_range(bc.dof, dof_per_node, "boundary condition", &mut report) {
            continue;
        }
        let tag = bc.kind.tag();
        for node in nodes {
            dofs.set(node, bc.dof, tag, bc.amplitude);
        }
    }

    // Concentrated loads accumulate on free dofs only
    for load in &model.cloads {
        let Some(nodes) = resolve_nodes(&load.target, &node_sets, num_node, &mut report) else {
            continue;
        };
        if !dof_in_range(load.dof, dof_per_node, "concentrated load", &mut report) {
            continue;
        }
        for node in nodes {
            if dofs.tag(node, load.dof).is_dirichlet() {
                report.push(ValidationIssue::LoadOnPrescribedDof {
                    node,
                    dof: load.dof,
                });
            } else {
                dofs.add_value(node, load.dof, load.amplitude);
            }
        }
    }

    // Distributed loads
    let mut dload = Mat::zeros(num_elem, dof_per_node);
    for load in &model.dloads {
        let elements = match &load.target {
            ElementTarget::Element(e) => {
                if *e >= num_elem {
                    report.push(ValidationIssue::ElementOutOfRange {
                        element: *e,
                        num_elem,
                        context: "distributed load".to_string(),
                    });
                    continue;
                }
                vec![*e]
            }
            ElementTarget::Set(set) => match element_sets.get(set) {
                Some(elements) => elements.clone(),
                None => {
                    report.push(ValidationIssue::UndefinedElementSet {
                        set: set.clone(),
                        required_by: "distributed load".to_string(),
                    });
                    continue;
                }
            },
        };
        if !dof_in_range(load.dof, dof_per_node, "distributed load", &mut report) {
            continue;
        }
        for e in elements {
            dload[(e, load.dof)] = load.amplitude;
        }
    }

    // Every element belongs to exactly one block
    let mut owners: Vec<Vec<String>> = vec![Vec::new(); num_elem];
    for block in &blocks {
        for &e in &block.elements {
            if owners[e].last() == Some(&block.name) {
                report.push(ValidationIssue::RepeatedElement {
                    element: e,
                    block: block.name.clone(),
                });
            } else {
                owners[e].push(block.name.clone());
            }
        }
    }
    let unassigned: Vec<usize> = owners
        .iter()
        .enumerate()
        .filter(|(_, o)| o.is_empty())
        .map(|(e, _)| e)
        .collect();
    if !unassigned.is_empty() {
        report.push(ValidationIssue::UnassignedElements(unassigned));
    }
    for (e, o) in owners.iter().enumerate() {
        if o.len() > 1 {
            report.push(ValidationIssue::ElementInMultipleBlocks {
                element: e,
                blocks: o.clone(),
            });
        }
    }

    if report.is_empty() {
        debug!(
            "Preprocessing complete: {} dofs, {} prescribed",
            dofs.num_dofs(),
            dofs.num_dirichlet()
        );
    }

    let preprocessed = PreprocessedModel {
        coords: model.coords.clone(),
        connect: model.connect.clone(),
        dofs,
        dload,
        node_sets,
        element_sets,
        materials,
        blocks,
    };
    (preprocessed, report)
}

/// In-range members of a node set, each node kept once in first-seen order
fn in_range_nodes(
    nodes: &[usize],
    num_node: usize,
    context: &str,
    report: &mut ValidationReport,
) -> Vec<usize> {
    let mut kept = Vec::with_capacity(nodes.len());
    for &node in nodes {
        if node < num_node {
            if !kept.contains(&node) {
                kept.push(node);
            }
        } else {
            report.push(ValidationIssue::NodeOutOfRange {
                node,
                num_node,
                context: context.to_string(),
            });
        }
    }
    kept
}

fn in_range_elements(
    elements: &[usize],
    num_elem: usize,
    context: &str,
    report: &mut ValidationReport,
) -> Vec<usize> {
    let mut kept = Vec::with_capacity(elements.len());
    for &element in elements {
        if element < num_elem {
            kept.push(element);
        } else {
            report.push(ValidationIssue::ElementOutOfRange {
                element,
                num_elem,
                context: context.to_string(),
            });
        }
    }
    kept
}

fn resolve_nodes(
    target: &NodeTarget,
    node_sets: &HashMap<String, Vec<usize>>,
    num_node: usize,
    report: &mut ValidationReport,
) -> Option<Vec<usize>> {
    match target {
        NodeTarget::Node(node) => {
            if *node < num_node {
                Some(vec![*node])
            } else {
                report.push(ValidationIssue::NodeOutOfRange {
                    node: *node,
                    num_node,
                    context: "boundary condition or load".to_string(),
                });
                None
            }
        }
        NodeTarget::Set(set) => match node_sets.get(set) {
            Some(nodes) => Some(nodes.clone()),
            None => {
                report.push(ValidationIssue::UndefinedNodeSet(set.clone()));
                None
            }
        },
    }
}

fn dof_in_range(
    dof: usize,
    dof_per_node: usize,
    context: &str,
    report: &mut ValidationReport,
) -> bool {
    if dof < dof_per_node {
        return true;
    }
    report.push(ValidationIssue::DofOutOfRange {
        dof,
        dof_per_node,
        context: context.to_string(),
    });
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dof::DofTag;
    use crate::elements::{ElementBlock, ElementSet, NodeSet};
    use crate::loads::{BoundaryCondition, BoundaryKind, ConcentratedLoad, DistributedLoad};

    fn three_node_model() -> BarModel {
        let mut model = BarModel::new(&[0.0, 1.0, 2.0], vec![[0, 1], [1, 2]]);
        model
            .add_material(Material::elastic("mat-1", 10.0, 0.3).unwrap())
            .add_block(ElementBlock::new("block-1", "mat-1", BlockElements::all()));
        model
    }

    fn issues(model: &BarModel) -> Vec<ValidationIssue> {
        match preprocess(model) {
            Err(BarError::Validation(report)) => report.issues().to_vec(),
            other => panic!("expected validation failure, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_boundary_and_cload_tables() {
        let mut model = three_node_model();
        model
            .add_node_set(NodeSet::new("nset-1", vec![1]))
            .add_boundary(BoundaryCondition::fixed(0))
            .add_boundary(BoundaryCondition::new(
                NodeTarget::set("NSET-1"),
                0,
                BoundaryKind::Dirichlet,
                1.0,
            ))
            .add_cload(ConcentratedLoad::at_node(2, 2.0));

        let pre = preprocess(&model).unwrap();

        assert_eq!(pre.dofs.codes(), vec![1, 1, 0]);
        assert_eq!(pre.dofs.values(), &[0.0, 1.0, 2.0]);
        assert_eq!(pre.dload, Mat::zeros(2, 1));

        let block = pre.block("block-1").unwrap();
        assert_eq!(block.material, "mat-1");
        assert_eq!(block.elements, vec![0, 1]);
        assert_eq!(block.area, 1.0);
        assert_eq!(block.element_type, ElementType::T1D1);
    }

    #[test]
    fn test_cloads_accumulate() {
        let mut model = three_node_model();
        model
            .add_boundary(BoundaryCondition::fixed(0))
            .add_cload(ConcentratedLoad::at_node(2, 2.0))
            .add_cload(ConcentratedLoad::on_set("all", 0.5));

        // node 0 is prescribed, so the set load on it is rejected
        let found = issues(&model);
        assert_eq!(
            found,
            vec![ValidationIssue::LoadOnPrescribedDof { node: 0, dof: 0 }]
        );

        model.cloads.pop();
        model.add_cload(ConcentratedLoad::at_node(2, 0.5));
        let pre = preprocess(&model).unwrap();
        assert_eq!(pre.dofs.value(2, 0), 2.5);
        assert_eq!(pre.dofs.value(0, 0), 0.0);
    }

    #[test]
    fn test_repeated_set_member_is_loaded_once() {
        let mut model = three_node_model();
        model
            .add_node_set(NodeSet::new("tip", vec![2, 1, 2]))
            .add_boundary(BoundaryCondition::fixed(0))
            .add_cload(ConcentratedLoad::on_set("tip", 1.5));

        let pre = preprocess(&model).unwrap();
        assert_eq!(pre.node_sets["tip"], vec![2, 1]);
        assert_eq!(pre.dofs.values(), &[0.0, 1.5, 1.5]);
    }

    #[test]
    fn test_neumann_boundary_is_free_with_force() {
        let mut model = three_node_model();
        model
            .add_boundary(BoundaryCondition::fixed(0))
            .add_boundary(BoundaryCondition::force(2, 3.0))
            .add_cload(ConcentratedLoad::at_node(2, 1.0));

        let pre = preprocess(&model).unwrap();
        assert_eq!(pre.dofs.tag(2, 0), DofTag::Free);
        assert_eq!(pre.dofs.value(2, 0), 4.0);
    }

    #[test]
    fn test_later_boundary_condition_wins() {
        let mut model = three_node_model();
        model
            .add_boundary(BoundaryCondition::displacement(0, 1.0))
            .add_boundary(BoundaryCondition::displacement(0, 2.0));

        let pre = preprocess(&model).unwrap();
        assert_eq!(pre.dofs.value(0, 0), 2.0);
    }

    #[test]
    fn test_distributed_loads() {
        let mut model = three_node_model();
        model
            .add_element_set(ElementSet::new("Right", vec![1]))
            .add_boundary(BoundaryCondition::fixed(0))
            .add_dload(DistributedLoad::on_element(0, 1.5))
            .add_dload(DistributedLoad::on_set("right", -2.0));

        let pre = preprocess(&model).unwrap();
        assert_eq!(pre.dload[(0, 0)], 1.5);
        assert_eq!(pre.dload[(1, 0)], -2.0);
    }

    #[test]
    fn test_block_from_named_set_and_list() {
        let mut model = BarModel::new(&[0.0, 1.0, 2.0], vec![[0, 1], [1, 2]]);
        model
            .add_element_set(ElementSet::new("left", vec![0]))
            .add_material(Material::elastic("soft", 1.0, 0.0).unwrap())
            .add_material(Material::elastic("stiff", 100.0, 0.0).unwrap())
            .add_block(ElementBlock::new("a", "soft", BlockElements::set("LEFT")))
            .add_block(ElementBlock::new("b", "stiff", BlockElements::Indices(vec![1])));

        let pre = preprocess(&model).unwrap();
        assert_eq!(pre.block("a").unwrap().elements, vec![0]);
        assert_eq!(pre.block("b").unwrap().elements, vec![1]);
        assert_eq!(pre.material("stiff").unwrap().youngs_modulus(), 100.0);
        assert!(pre.material("missing").is_err());
    }

    #[test]
    fn test_unassigned_element_fails() {
        let mut model = BarModel::new(&[0.0, 1.0, 2.0], vec![[0, 1], [1, 2]]);
        model
            .add_material(Material::elastic("mat-1", 10.0, 0.3).unwrap())
            .add_block(ElementBlock::new("b", "mat-1", BlockElements::Indices(vec![0])))
            .add_boundary(BoundaryCondition::fixed(0));

        assert_eq!(
            issues(&model),
            vec![ValidationIssue::UnassignedElements(vec![1])]
        );
    }

    #[test]
    fn test_element_in_two_blocks_fails() {
        let mut model = three_node_model();
        model.add_block(ElementBlock::new("block-2", "mat-1", BlockElements::Indices(vec![1])));

        assert_eq!(
            issues(&model),
            vec![ValidationIssue::ElementInMultipleBlocks {
                element: 1,
                blocks: vec!["block-1".to_string(), "block-2".to_string()],
            }]
        );
    }

    #[test]
    fn test_all_issues_are_reported_together() {
        let mut model = BarModel::new(&[0.0, 1.0, 2.0], vec![[0, 1], [1, 2]]);
        model
            .add_node_set(NodeSet::new("all", vec![0]))
            .add_element_set(ElementSet::new("e", vec![0]))
            .add_element_set(ElementSet::new("E", vec![1]))
            .add_material(Material::elastic("m", 1.0, 0.0).unwrap())
            .add_material(Material::elastic("M", 2.0, 0.0).unwrap())
            .add_block(ElementBlock::new("b", "missing", BlockElements::all()))
            .add_block(ElementBlock::new("c", "m", BlockElements::set("nowhere")))
            .add_boundary(BoundaryCondition::new(
                NodeTarget::set("ghost"),
                0,
                BoundaryKind::Dirichlet,
                0.0,
            ))
            .add_dload(DistributedLoad::on_set("void", 1.0));

        let found = issues(&model);
        assert_eq!(
            found,
            vec![
                ValidationIssue::DuplicateNodeSet("all".to_string()),
                ValidationIssue::DuplicateElementSet("e".to_string()),
                ValidationIssue::DuplicateMaterial("m".to_string()),
                ValidationIssue::UndefinedMaterial {
                    block: "b".to_string(),
                    material: "missing".to_string(),
                },
                ValidationIssue::UndefinedElementSet {
                    set: "nowhere".to_string(),
                    required_by: "element block 'c'".to_string(),
                },
                ValidationIssue::UndefinedNodeSet("ghost".to_string()),
                ValidationIssue::UndefinedElementSet {
                    set: "void".to_string(),
                    required_by: "distributed load".to_string(),
                },
                ValidationIssue::UnassignedElements(vec![0, 1]),
            ]
        );
    }

    #[test]
    fn test_out_of_range_references() {
        let mut model = three_node_model();
        model
            .add_node_set(NodeSet::new("far", vec![7]))
            .add_boundary(BoundaryCondition::fixed(9))
            .add_cload(ConcentratedLoad::new(NodeTarget::Node(1), 2, 1.0))
            .add_dload(DistributedLoad::on_element(5, 1.0));
        model.connect.push([2, 3]);
        model.add_block(ElementBlock::new("x", "mat-1", BlockElements::Indices(vec![])));

        let found = issues(&model);
        assert!(found.contains(&ValidationIssue::NodeOutOfRange {
            node: 3,
            num_node: 3,
            context: "connectivity of element 2".to_string(),
        }));
        assert!(found.contains(&ValidationIssue::NodeOutOfRange {
            node: 7,
            num_node: 3,
            context: "node set 'far'".to_string(),
        }));
        assert!(found.contains(&ValidationIssue::NodeOutOfRange {
            node: 9,
            num_node: 3,
            context: "boundary condition or load".to_string(),
        }));
        assert!(found.contains(&ValidationIssue::DofOutOfRange {
            dof: 2,
            dof_per_node: 1,
            context: "concentrated load".to_string(),
        }));
        assert!(found.contains(&ValidationIssue::ElementOutOfRange {
            element: 5,
            num_elem: 3,
            context: "distributed load".to_string(),
        }));
    }

    #[test]
    fn test_repeated_element_in_block_fails() {
        let mut model = BarModel::new(&[0.0, 1.0], vec![[0, 1]]);
        model
            .add_material(Material::elastic("m", 1.0, 0.0).unwrap())
            .add_block(ElementBlock::new("b", "m", BlockElements::Indices(vec![0, 0])));

        assert_eq!(
            issues(&model),
            vec![ValidationIssue::RepeatedElement {
                element: 0,
                block: "b".to_string(),
            }]
        );
    }
}
