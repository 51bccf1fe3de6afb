//! Point-in-AABB descent with precise leaf disambiguation.

use envsim_common::{AreaId, Point3};

use crate::node::BvhNode;

/// How a leaf resolves multiple overlapping members at the same point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafMode {
    /// Return the first member whose own AABB contains the point — the
    /// single-hit optimization for non-overlapping grids.
    Precise,
    /// Return every member id unconditionally.
    Coarse,
}

/// Diagnostic counters for a single query. Reset at the start of every
/// `search_point` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub visited_nodes: usize,
}

/// Descend the tree collecting every area id whose region covers `p`.
///
/// Both children of an inner node are tried whenever the node's own AABB
/// contains the point — necessary to avoid missing hits at grid seams
/// where two sibling boxes touch.
pub fn search_point(root: &BvhNode, p: Point3, mode: LeafMode) -> (Vec<AreaId>, SearchStats) {
    let mut stats = SearchStats::default();
    let hits = descend(root, p, mode, &mut stats);
    (hits, stats)
}

fn descend(node: &BvhNode, p: Point3, mode: LeafMode, stats: &mut SearchStats) -> Vec<AreaId> {
    stats.visited_nodes += 1;
    if !node.aabb().contains(p) {
        return Vec::new();
    }

    match node {
        BvhNode::Leaf { members, .. } => match mode {
            LeafMode::Precise => members
                .iter()
                .find(|m| m.contains(p))
                .map(|m| vec![m.id.clone()])
                .unwrap_or_default(),
            LeafMode::Coarse => members.iter().map(|m| m.id.clone()).collect(),
        },
        BvhNode::Inner { left, right, .. } => {
            let mut hits = descend(left, p, mode, stats);
            hits.extend(descend(right, p, mode, stats));
            hits
        }
    }
}

/// Resolve a point to the single area that should apply (precise mode,
/// first hit). Returns `None` when no area covers the point.
pub fn search_primary(root: &BvhNode, p: Point3) -> (Option<AreaId>, SearchStats) {
    let (mut hits, stats) = search_point(root, p, LeafMode::Precise);
    (hits.pop(), stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_bvh;
    use envsim_common::Aabb;

    fn grid_2x2() -> BvhNode {
        let areas = vec![
            Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(5.0, 5.0, 5.0), AreaId::new("area_0_0")),
            Aabb::new(Point3::new(5.0, 0.0, 0.0), Point3::new(10.0, 5.0, 5.0), AreaId::new("area_0_1")),
            Aabb::new(Point3::new(0.0, 5.0, 0.0), Point3::new(5.0, 10.0, 5.0), AreaId::new("area_1_0")),
            Aabb::new(Point3::new(5.0, 5.0, 0.0), Point3::new(10.0, 10.0, 5.0), AreaId::new("area_1_1")),
        ];
        build_bvh(areas, 1, 8).unwrap()
    }

    #[test]
    fn interior_point_resolves_to_containing_area() {
        let root = grid_2x2();
        let (aid, _) = search_primary(&root, Point3::new(2.5, 2.5, 1.0));
        assert_eq!(aid, Some(AreaId::new("area_0_0")));
    }

    #[test]
    fn grid_seam_has_no_double_hit() {
        let root = grid_2x2();
        // x=5.0 is the shared boundary between area_0_0/area_0_1 columns;
        // half-open inclusion assigns it to the area starting at x=5.
        let (hits, _) = search_point(&root, Point3::new(5.0, 2.5, 1.0), LeafMode::Precise);
        assert_eq!(hits, vec![AreaId::new("area_0_1")]);
    }

    #[test]
    fn miss_outside_every_area_returns_empty() {
        let single = Aabb::new(Point3::ZERO, Point3::new(1.0, 1.0, 1.0), AreaId::new("only"));
        let root = build_bvh(vec![single], 1, 8).unwrap();
        let (aid, _) = search_primary(&root, Point3::new(3.0, 3.0, 3.0));
        assert_eq!(aid, None);
    }

    #[test]
    fn coarse_mode_returns_every_member() {
        let overlapping = vec![
            Aabb::new(Point3::ZERO, Point3::new(2.0, 2.0, 2.0), AreaId::new("a")),
            Aabb::new(Point3::new(1.0, 1.0, 0.0), Point3::new(3.0, 3.0, 2.0), AreaId::new("b")),
        ];
        let root = BvhNode::Leaf {
            aabb: overlapping[0].union(&overlapping[1]),
            members: overlapping,
        };
        let (hits, _) = search_point(&root, Point3::new(1.5, 1.5, 1.0), LeafMode::Coarse);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn visited_nodes_counts_every_descended_node() {
        let root = grid_2x2();
        let (_, stats) = search_point(&root, Point3::new(2.5, 2.5, 1.0), LeafMode::Precise);
        assert!(stats.visited_nodes >= 1);

        let (_, stats_miss) = search_point(&root, Point3::new(-5.0, -5.0, -5.0), LeafMode::Precise);
        assert_eq!(stats_miss.visited_nodes, 1);
    }

    #[test]
    fn completeness_holds_for_every_interior_point() {
        let root = grid_2x2();
        let samples = [
            (Point3::new(0.1, 0.1, 1.0), "area_0_0"),
            (Point3::new(9.9, 0.1, 1.0), "area_0_1"),
            (Point3::new(0.1, 9.9, 1.0), "area_1_0"),
            (Point3::new(9.9, 9.9, 1.0), "area_1_1"),
        ];
        for (p, expected) in samples {
            let (aid, _) = search_primary(&root, p);
            assert_eq!(aid, Some(AreaId::new(expected)));
        }
    }
}
