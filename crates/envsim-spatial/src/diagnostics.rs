//! Tree-shape diagnostics, supplemental to the core build/search
//! operations (grounded in `fastsearch/analysis.py` and
//! `fastsearch/estimator.py` in the reference implementation).

use crate::node::BvhNode;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeShape {
    pub max_depth: usize,
    pub avg_leaf_size: f64,
}

/// Walk the tree once, recording the maximum depth and the average
/// member count across every leaf.
pub fn analyze_tree(root: &BvhNode) -> TreeShape {
    let mut leaf_sizes = Vec::new();
    let mut max_depth = 0;
    traverse(root, 0, &mut max_depth, &mut leaf_sizes);

    let avg_leaf_size = if leaf_sizes.is_empty() {
        0.0
    } else {
        leaf_sizes.iter().sum::<usize>() as f64 / leaf_sizes.len() as f64
    };

    TreeShape {
        max_depth,
        avg_leaf_size,
    }
}

fn traverse(node: &BvhNode, depth: usize, max_depth: &mut usize, leaf_sizes: &mut Vec<usize>) {
    *max_depth = (*max_depth).max(depth);
    match node {
        BvhNode::Leaf { members, .. } => leaf_sizes.push(members.len()),
        BvhNode::Inner { left, right, .. } => {
            traverse(left, depth + 1, max_depth, leaf_sizes);
            traverse(right, depth + 1, max_depth, leaf_sizes);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostEstimate {
    pub estimated_branch_factor: f64,
    pub estimated_max_search_cost: f64,
}

/// Theoretical branch factor (`N^(1/D)`) and search cost for a balanced
/// tree over `num_areas` areas at `max_depth`. Returns zeros for
/// non-positive inputs rather than dividing by zero.
pub fn estimate_cost(num_areas: usize, max_depth: usize) -> CostEstimate {
    if num_areas == 0 || max_depth == 0 {
        return CostEstimate {
            estimated_branch_factor: 0.0,
            estimated_max_search_cost: 0.0,
        };
    }

    let branch_factor = (num_areas as f64).powf(1.0 / max_depth as f64);
    let estimated_cost = max_depth as f64 * (1.0 + branch_factor.log2() / 4.0);

    CostEstimate {
        estimated_branch_factor: (branch_factor * 1000.0).round() / 1000.0,
        estimated_max_search_cost: (estimated_cost * 1000.0).round() / 1000.0,
    }
}
