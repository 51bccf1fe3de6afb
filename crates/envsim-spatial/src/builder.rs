//! Builds a bounding-volume hierarchy over a set of AABBs.
//!
//! Split rule (spec.md §4.2): pick the axis with the largest spread of
//! member *centers*, sort members by that axis's `min` coordinate (not
//! center — stable for axis-aligned grid cells), split at the median
//! index with a left-heavy tie-break on odd counts, and recurse. A node
//! becomes a leaf when its member count is at or below `leaf_capacity`,
//! the recursion has hit `max_depth`, or every member collapses to the
//! same center on every axis (fully degenerate input).

use envsim_common::Aabb;

use crate::error::SpatialError;
use crate::node::BvhNode;

pub const DEFAULT_LEAF_CAPACITY: usize = 1;
pub const DEFAULT_MAX_DEPTH: usize = 8;

pub fn build_bvh(
    areas: Vec<Aabb>,
    leaf_capacity: usize,
    max_depth: usize,
) -> Result<BvhNode, SpatialError> {
    if areas.is_empty() {
        return Err(SpatialError::EmptyScene);
    }
    let leaf_capacity = leaf_capacity.max(1);
    Ok(build_rec(areas, 0, leaf_capacity, max_depth))
}

fn build_rec(mut areas: Vec<Aabb>, depth: usize, leaf_capacity: usize, max_depth: usize) -> BvhNode {
    let spreads = axis_spreads(&areas);
    let all_zero = spreads.iter().all(|s| *s == 0.0);

    if areas.len() <= leaf_capacity || depth >= max_depth || all_zero {
        let aabb = union_all(&areas);
        return BvhNode::Leaf {
            aabb,
            members: areas,
        };
    }

    let axis = argmax_axis(spreads);
    areas.sort_by(|a, b| min_coord(a, axis).partial_cmp(&min_coord(b, axis)).unwrap());

    // Left-heavy median split: the left half takes the extra element on
    // an odd count.
    let mid = (areas.len() + 1) / 2;
    let right = areas.split_off(mid);
    let left = areas;

    let left_node = build_rec(left, depth + 1, leaf_capacity, max_depth);
    let right_node = build_rec(right, depth + 1, leaf_capacity, max_depth);
    let aabb = left_node.aabb().union(right_node.aabb());

    BvhNode::Inner {
        aabb,
        left: Box::new(left_node),
        right: Box::new(right_node),
    }
}

fn axis_spreads(areas: &[Aabb]) -> [f64; 3] {
    let centers: Vec<_> = areas.iter().map(|a| a.center()).collect();
    let mut min = [f64::INFINITY; 3];
    let mut max = [f64::NEG_INFINITY; 3];
    for c in &centers {
        let v = c.as_array();
        for axis in 0..3 {
            min[axis] = min[axis].min(v[axis]);
            max[axis] = max[axis].max(v[axis]);
        }
    }
    [max[0] - min[0], max[1] - min[1], max[2] - min[2]]
}

fn argmax_axis(spreads: [f64; 3]) -> usize {
    let mut best = 0;
    for axis in 1..3 {
        if spreads[axis] > spreads[best] {
            best = axis;
        }
    }
    best
}

fn min_coord(a: &Aabb, axis: usize) -> f64 {
    a.min.as_array()[axis]
}

fn union_all(areas: &[Aabb]) -> Aabb {
    let mut iter = areas.iter();
    let first = iter.next().expect("union_all called on empty slice");
    let mut acc = first.clone();
    for a in iter {
        acc = acc.union(a);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use envsim_common::{AreaId, Point3};

    fn aabb(id: &str, min: (f64, f64, f64), max: (f64, f64, f64)) -> Aabb {
        Aabb::new(
            Point3::new(min.0, min.1, min.2),
            Point3::new(max.0, max.1, max.2),
            AreaId::new(id),
        )
    }

    #[test]
    fn empty_input_is_an_error() {
        assert_eq!(build_bvh(vec![], 1, 8), Err(SpatialError::EmptyScene));
    }

    #[test]
    fn single_aabb_produces_one_leaf() {
        let a = aabb("a", (0.0, 0.0, 0.0), (1.0, 1.0, 1.0));
        let root = build_bvh(vec![a.clone()], 1, 8).unwrap();
        match root {
            BvhNode::Leaf { members, aabb } => {
                assert_eq!(members, vec![a.clone()]);
                assert_eq!(aabb, a);
            }
            _ => panic!("expected a leaf"),
        }
    }

    #[test]
    fn containment_invariant_holds_for_every_leaf() {
        let areas: Vec<Aabb> = (0..9)
            .map(|i| {
                let ix = (i % 3) as f64;
                let iy = (i / 3) as f64;
                aabb(
                    &format!("area_{i}"),
                    (ix * 5.0, iy * 5.0, 0.0),
                    ((ix + 1.0) * 5.0, (iy + 1.0) * 5.0, 5.0),
                )
            })
            .collect();
        let root = build_bvh(areas.clone(), 1, 8).unwrap();

        fn check(node: &BvhNode) {
            match node {
                BvhNode::Leaf { aabb, members } => {
                    for m in members {
                        assert!(aabb.min.x <= m.min.x && aabb.max.x >= m.max.x);
                        assert!(aabb.min.y <= m.min.y && aabb.max.y >= m.max.y);
                        assert!(aabb.min.z <= m.min.z && aabb.max.z >= m.max.z);
                    }
                }
                BvhNode::Inner { aabb, left, right } => {
                    let u = left.aabb().union(right.aabb());
                    assert_eq!(aabb, &u);
                    check(left);
                    check(right);
                }
            }
        }
        check(&root);
    }

    #[test]
    fn fully_degenerate_input_collapses_to_one_leaf() {
        // All boxes share the same center on every axis (stacked boxes).
        let areas = vec![
            aabb("a", (0.0, 0.0, 0.0), (1.0, 1.0, 1.0)),
            aabb("b", (0.0, 0.0, 0.0), (1.0, 1.0, 1.0)),
            aabb("c", (0.0, 0.0, 0.0), (1.0, 1.0, 1.0)),
        ];
        let root = build_bvh(areas, 1, 8).unwrap();
        assert!(matches!(root, BvhNode::Leaf { .. }));
    }

    #[test]
    fn depth_cap_forces_leaf_above_capacity() {
        let areas: Vec<Aabb> = (0..8)
            .map(|i| aabb(&format!("a{i}"), (i as f64, 0.0, 0.0), (i as f64 + 1.0, 1.0, 1.0)))
            .collect();
        let root = build_bvh(areas, 1, 1).unwrap();
        match root {
            BvhNode::Inner { left, right, .. } => {
                assert!(matches!(*left, BvhNode::Leaf { .. }));
                assert!(matches!(*right, BvhNode::Leaf { .. }));
            }
            BvhNode::Leaf { members, .. } => assert!(members.len() > 1),
        }
    }
}
