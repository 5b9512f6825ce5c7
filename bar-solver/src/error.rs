//! Error types for the bar solver

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Main error type for bar analysis
#[derive(Error, Debug)]
pub enum BarError {
    #[error("{0}")]
    Validation(ValidationReport),

    #[error("Zero-length element {element} between nodes {nodes:?}")]
    DegenerateElement { element: usize, nodes: [usize; 2] },

    #[error("Singular stiffness matrix - model may be unconstrained or disconnected")]
    SingularMatrix,

    #[error("Material '{0}' not found in model")]
    MaterialNotFound(String),

    #[error("Invalid material: {0}")]
    InvalidMaterial(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for bar analysis
pub type BarResult<T> = Result<T, BarError>;

/// A single structural or reference problem found while checking a model
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum ValidationIssue {
    #[error("Duplicate node set '{0}'")]
    DuplicateNodeSet(String),

    #[error("Duplicate element set '{0}'")]
    DuplicateElementSet(String),

    #[error("Duplicate material '{0}'")]
    DuplicateMaterial(String),

    #[error("Duplicate element block '{0}'")]
    DuplicateBlock(String),

    #[error("Material '{material}' required by element block '{block}' not defined")]
    UndefinedMaterial { block: String, material: String },

    #[error("Node set '{0}' not defined")]
    UndefinedNodeSet(String),

    #[error("Element set '{set}' required by {required_by} not defined")]
    UndefinedElementSet { set: String, required_by: String },

    #[error("Node {node} referenced by {context} is out of range (model has {num_node} nodes)")]
    NodeOutOfRange {
        node: usize,
        num_node: usize,
        context: String,
    },

    #[error("Element {element} referenced by {context} is out of range (model has {num_elem} elements)")]
    ElementOutOfRange {
        element: usize,
        num_elem: usize,
        context: String,
    },

    #[error("Dof {dof} referenced by {context} is out of range ({dof_per_node} dof per node)")]
    DofOutOfRange {
        dof: usize,
        dof_per_node: usize,
        context: String,
    },

    #[error("Concentrated load on node {node}, dof {dof} targets a prescribed displacement")]
    LoadOnPrescribedDof { node: usize, dof: usize },

    #[error("Elements {0:?} are not assigned to an element block")]
    UnassignedElements(Vec<usize>),

    #[error("Element {element} is assigned to more than one element block: {blocks:?}")]
    ElementInMultipleBlocks { element: usize, blocks: Vec<String> },

    #[error("Element {element} is listed more than once in element block '{block}'")]
    RepeatedElement { element: usize, block: String },

    #[error("Invalid field '{path}': {reason}")]
    InvalidField { path: String, reason: String },
}

/// Every issue collected while checking a model, reported together
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issue and log it
    pub fn push(&mut self, issue: ValidationIssue) {
        log::error!("{}", issue);
        self.issues.push(issue);
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Fail with the whole report if anything was collected
    pub fn into_result<T>(self, value: T) -> BarResult<T> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(BarError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed with {} error(s)", self.issues.len())?;
        for issue in &self.issues {
            write!(f, "\n  - {}", issue)?;
        }
        Ok(())
    }
}
