//! Geometry primitives and the area/property/link data model shared
//! across the envsim workspace.
//!
//! This crate has no knowledge of zones, the BVH, or the runtime loop —
//! it only defines the types every other crate builds on, and the wire
//! formats for the three compiler output tables (spec §6).

pub mod geometry;
pub mod ids;
pub mod model;

pub use geometry::{Aabb, Aabb2D, Point3, Vec3};
pub use ids::{AreaId, PropertyId};
pub use model::{AreaProperty, AreaPropertiesFile, Link, LinksFile, SpaceArea, SpaceAreasFile};
