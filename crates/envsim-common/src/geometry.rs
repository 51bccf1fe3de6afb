//! 3D point/vector and axis-aligned bounding box primitives.

use serde::{Deserialize, Serialize};

use crate::ids::AreaId;

/// A point (or vector) in 3D space.
///
/// Used both for positions and for wind velocity vectors — the original
/// reference implementation collapses these into the same tuple type, and
/// keeping one type here avoids a parallel `Vec3` with identical fields.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Alias for the vector use of [`Point3`] (e.g. wind velocity, offsets).
pub type Vec3 = Point3;

impl Point3 {
    pub const ZERO: Point3 = Point3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn add(&self, other: &Point3) -> Point3 {
        Point3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn sub(&self, other: &Point3) -> Point3 {
        Point3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn scale(&self, factor: f64) -> Point3 {
        Point3::new(self.x * factor, self.y * factor, self.z * factor)
    }

    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn from_array(a: [f64; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}

/// Axis-aligned bounding box in 3D, carrying the id of the area it bounds.
///
/// Inclusion is half-open on every axis: a point `p` is inside iff
/// `min_k <= p_k < max_k` for k in {x, y, z}. This convention is applied
/// uniformly by both the BVH descent and leaf confirmation (see
/// `envsim-spatial`), resolving the ambiguity the source material left
/// between `<` and `<=` variants of the point-in-box test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Point3,
    pub max: Point3,
    pub id: AreaId,
}

impl Aabb {
    pub fn new(min: Point3, max: Point3, id: AreaId) -> Self {
        Self { min, max, id }
    }

    /// Center of the box (used for axis-spread and nearest-center heuristics).
    pub fn center(&self) -> Point3 {
        Point3::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }

    /// Half-open point containment test: `min <= p < max` on every axis.
    pub fn contains(&self, p: Point3) -> bool {
        p.x >= self.min.x
            && p.x < self.max.x
            && p.y >= self.min.y
            && p.y < self.max.y
            && p.z >= self.min.z
            && p.z < self.max.z
    }

    /// Component-wise union of two boxes. The resulting id is taken from
    /// `self`; callers that build merged/internal boxes should supply a
    /// sentinel id (BVH internal nodes don't carry a meaningful area id).
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: Point3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Point3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
            id: self.id.clone(),
        }
    }

    pub fn to_2d(&self) -> Aabb2D {
        Aabb2D {
            xmin: self.min.x,
            ymin: self.min.y,
            xmax: self.max.x,
            ymax: self.max.y,
        }
    }
}

/// 2D axis-aligned rectangle, used by zone shapes and by the visualizer
/// integration view (`model/models.py::AABB2D` in the reference
/// implementation).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb2D {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Aabb2D {
    pub fn center(&self) -> (f64, f64) {
        ((self.xmin + self.xmax) * 0.5, (self.ymin + self.ymax) * 0.5)
    }
}
