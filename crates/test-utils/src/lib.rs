//! Shared test fixtures for the envsim workspace.

pub mod scenes;

use envsim_common::{Aabb, AreaId, Point3};

/// A trivial 2x2 grid of 5m cells spanning `[0,10] x [0,10] x [0,5]`,
/// matching spec.md's "trivial grid" end-to-end scenario.
pub fn trivial_grid_areas() -> Vec<Aabb> {
    let mut areas = Vec::new();
    for iy in 0..2 {
        for ix in 0..2 {
            let id = AreaId::new(format!("area_{iy}_{ix}"));
            let min = Point3::new(ix as f64 * 5.0, iy as f64 * 5.0, 0.0);
            let max = Point3::new((ix + 1) as f64 * 5.0, (iy + 1) as f64 * 5.0, 5.0);
            areas.push(Aabb::new(min, max, id));
        }
    }
    areas
}
