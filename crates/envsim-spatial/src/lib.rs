//! Bounding-volume hierarchy over axis-aligned boxes: builds an O(log N)
//! point-in-region index and searches it with exact leaf disambiguation.

pub mod builder;
pub mod diagnostics;
pub mod error;
pub mod node;
pub mod search;

pub use builder::{build_bvh, DEFAULT_LEAF_CAPACITY, DEFAULT_MAX_DEPTH};
pub use diagnostics::{analyze_tree, estimate_cost, CostEstimate, TreeShape};
pub use error::SpatialError;
pub use node::BvhNode;
pub use search::{search_point, search_primary, LeafMode, SearchStats};
