//! Model entities: materials, element blocks and named sets

mod block;
mod material;
mod set;

pub use block::{BlockElements, ElementBlock, ElementProperties, ElementType};
pub use material::{ElasticParameters, Material, MaterialModel};
pub use set::{ElementSet, NodeSet};

/// Name of the implicit node/element set holding everything
pub const ALL: &str = "all";

/// Names are compared case-insensitively
pub(crate) fn normalize_name(name: &str) -> String {
    name.to_lowercase()
}
