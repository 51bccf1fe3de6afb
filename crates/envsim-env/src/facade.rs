//! The `Environment` facade: loads the compiled tables, builds the BVH
//! once, and answers point-in-region property queries against it.
//!
//! Mirrors `fastsearch/envbuilder.py::Environment`: areas/links/properties
//! kept as lookup maps, built once at `from_files` time and never mutated
//! afterward (see `SPEC_FULL.md` §5 — the runtime shares this immutably).

use std::collections::HashMap;
use std::path::Path;

use envsim_common::{AreaId, AreaProperty, Link, Point3, PropertyId, SpaceArea};
use envsim_spatial::{build_bvh, search_point, BvhNode, LeafMode, SearchStats};

use crate::error::{EnvError, Result};

const AREA_CANDIDATES: &[&str] = &["space_areas.json", "area.json"];
const LINK_CANDIDATES: &[&str] = &["links.json", "link.json", "area_link.json"];
const PROPERTY_CANDIDATES: &[&str] = &["area_properties.json", "property.json", "area_property.json"];

/// A fully loaded, queryable environment.
pub struct Environment {
    areas: HashMap<AreaId, SpaceArea>,
    links: HashMap<AreaId, PropertyId>,
    properties: HashMap<PropertyId, AreaProperty>,
    bvh_root: BvhNode,
}

/// The resolved view of an area used by integration consumers (e.g. a map
/// visualizer), equivalent to the reference implementation's `VisualArea`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedArea {
    pub area_id: AreaId,
    pub bounds_2d: envsim_common::Aabb2D,
    pub property: AreaProperty,
}

/// Output of [`Environment::validate_integrity`]: dangling references the
/// loader tolerates but that indicate a malformed compile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntegrityReport {
    pub areas_without_link: Vec<AreaId>,
    pub links_to_missing_property: Vec<Link>,
    pub links_to_missing_area: Vec<Link>,
    pub properties_unreferenced: Vec<PropertyId>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.areas_without_link.is_empty()
            && self.links_to_missing_property.is_empty()
            && self.links_to_missing_area.is_empty()
            && self.properties_unreferenced.is_empty()
    }
}

impl Environment {
    /// Loads `space_areas`/`links`/`area_properties` (or their reference
    /// alternate filenames) from `dir`, builds the BVH, and returns a
    /// ready-to-query environment.
    pub fn from_files(dir: impl AsRef<Path>, leaf_capacity: usize, max_depth: usize) -> Result<Self> {
        let dir = dir.as_ref();
        let area_path = resolve_file(dir, "space_areas", AREA_CANDIDATES)?;
        let link_path = resolve_file(dir, "links", LINK_CANDIDATES)?;
        let property_path = resolve_file(dir, "area_properties", PROPERTY_CANDIDATES)?;

        let areas_file: envsim_common::SpaceAreasFile = read_json(&area_path)?;
        let links_file: envsim_common::LinksFile = read_json(&link_path)?;
        let properties_file: envsim_common::AreaPropertiesFile = read_json(&property_path)?;

        let areas_list = areas_file.into_areas();
        let aabbs: Vec<_> = areas_list.iter().map(|a| a.bounds.clone()).collect();
        let bvh_root = build_bvh(aabbs, leaf_capacity, max_depth)?;

        let areas: HashMap<AreaId, SpaceArea> = areas_list
            .into_iter()
            .map(|a| (a.area_id.clone(), a))
            .collect();
        let links: HashMap<AreaId, PropertyId> = links_file
            .into_links()
            .into_iter()
            .map(|l| (l.area_id, l.property_id))
            .collect();
        let properties: HashMap<PropertyId, AreaProperty> = properties_file
            .into_properties()
            .into_iter()
            .map(|p| (p.property_id.clone(), p))
            .collect();

        tracing::info!(
            areas = areas.len(),
            links = links.len(),
            properties = properties.len(),
            "environment loaded"
        );

        Ok(Self {
            areas,
            links,
            properties,
            bvh_root,
        })
    }

    /// Every area id whose region covers `p` (usually zero or one, for a
    /// non-overlapping grid).
    pub fn find_area_ids_at(&self, p: Point3) -> (Vec<AreaId>, SearchStats) {
        search_point(&self.bvh_root, p, LeafMode::Precise)
    }

    /// The single area that should apply at `p`, assuming no overlaps.
    pub fn find_primary_area_at(&self, p: Point3) -> Option<AreaId> {
        envsim_spatial::search_primary(&self.bvh_root, p).0
    }

    pub fn get_property_for_area(&self, area_id: &AreaId) -> Option<&AreaProperty> {
        let property_id = self.links.get(area_id)?;
        self.properties.get(property_id)
    }

    /// Coordinate to area to property in one call.
    ///
    /// `(None, None)` means the point is outside every area (spec.md
    /// scenario 5 — the runtime treats this as a steady-state miss, not
    /// an error). `(Some(aid), None)` means the area exists but has no
    /// link, or its link's property is missing — the documented failure
    /// mode for partially-specified scenes, distinct from a plain miss.
    pub fn get_property_at(&self, p: Point3) -> (Option<AreaId>, Option<&AreaProperty>) {
        let area_id = self.find_primary_area_at(p);
        let property = area_id
            .as_ref()
            .and_then(|id| self.get_property_for_area(id));
        (area_id, property)
    }

    /// Alias for [`Environment::get_property_at`] with the name the
    /// scheduler reads most naturally in its tick loop.
    pub fn property_at(&self, p: Point3) -> (Option<AreaId>, Option<&AreaProperty>) {
        self.get_property_at(p)
    }

    pub fn inspect_area(&self, area_id: &AreaId) -> Option<ResolvedArea> {
        let area = self.areas.get(area_id)?;
        let property = self.get_property_for_area(area_id)?.clone();
        Some(ResolvedArea {
            area_id: area_id.clone(),
            bounds_2d: area.bounds.to_2d(),
            property,
        })
    }

    /// A human-readable trace of how a point resolves, for debugging a
    /// scene interactively (`explain_at` in the reference design notes).
    pub fn explain_at(&self, p: Point3) -> String {
        let (hits, stats) = self.find_area_ids_at(p);
        if hits.is_empty() {
            return format!(
                "point ({:.3}, {:.3}, {:.3}) matched no area after visiting {} node(s)",
                p.x, p.y, p.z, stats.visited_nodes
            );
        }
        let area_id = &hits[0];
        match self.get_property_for_area(area_id) {
            Some(property) => format!(
                "point ({:.3}, {:.3}, {:.3}) -> area {area_id} -> property {} \
                 (wind={:?}, temp={}, atm={}, gps={}) after visiting {} node(s)",
                p.x,
                p.y,
                p.z,
                property.property_id,
                property.wind_velocity.as_array(),
                property.temperature,
                property.sea_level_atm,
                property.gps_strength,
                stats.visited_nodes
            ),
            None => format!(
                "point ({:.3}, {:.3}, {:.3}) -> area {area_id} has no linked property",
                p.x, p.y, p.z
            ),
        }
    }

    /// Cross-checks areas/links/properties for dangling or orphaned
    /// references that a malformed compile can leave behind.
    pub fn validate_integrity(&self) -> IntegrityReport {
        let mut report = IntegrityReport::default();

        for area_id in self.areas.keys() {
            if !self.links.contains_key(area_id) {
                report.areas_without_link.push(area_id.clone());
            }
        }

        let mut referenced_properties = std::collections::HashSet::new();
        for (area_id, property_id) in &self.links {
            if !self.areas.contains_key(area_id) {
                report.links_to_missing_area.push(Link {
                    area_id: area_id.clone(),
                    property_id: property_id.clone(),
                });
                continue;
            }
            if self.properties.contains_key(property_id) {
                referenced_properties.insert(property_id.clone());
            } else {
                report.links_to_missing_property.push(Link {
                    area_id: area_id.clone(),
                    property_id: property_id.clone(),
                });
            }
        }

        for property_id in self.properties.keys() {
            if !referenced_properties.contains(property_id) {
                report.properties_unreferenced.push(property_id.clone());
            }
        }

        report.areas_without_link.sort();
        report.properties_unreferenced.sort();
        report
    }
}

fn resolve_file(dir: &Path, kind: &'static str, candidates: &'static [&'static str]) -> Result<std::path::PathBuf> {
    for name in candidates {
        let path = dir.join(name);
        if path.exists() {
            return Ok(path);
        }
    }
    Err(EnvError::MissingFile {
        kind,
        dir: dir.display().to_string(),
        candidates,
    })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path).map_err(|source| EnvError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| EnvError::Parse {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use envsim_compiler::compile_scene;

    fn build_env(scene_json: &str, dir: &std::path::Path) -> Environment {
        let descriptor = serde_json::from_str(scene_json).unwrap();
        let compiled = compile_scene(descriptor).unwrap();
        envsim_compiler::write_tables(dir, &compiled).unwrap();
        Environment::from_files(dir, 1, 8).unwrap()
    }

    #[test]
    fn loads_compiled_tables_and_answers_queries() {
        let dir = tempfile::tempdir().unwrap();
        let env = build_env(test_utils::scenes::trivial_grid_scene(), dir.path());
        let (area_id, property) = env.get_property_at(Point3::new(2.0, 2.0, 1.0));
        assert_eq!(area_id.unwrap().as_str(), "area_0_0");
        assert_eq!(property.unwrap().wind_velocity, Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn miss_outside_grid_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let env = build_env(test_utils::scenes::single_area_scene(), dir.path());
        let (area_id, property) = env.get_property_at(Point3::new(50.0, 50.0, 50.0));
        assert!(area_id.is_none());
        assert!(property.is_none());
    }

    #[test]
    fn validate_integrity_is_clean_for_a_fresh_compile() {
        let dir = tempfile::tempdir().unwrap();
        let env = build_env(test_utils::scenes::trivial_grid_scene(), dir.path());
        assert!(env.validate_integrity().is_clean());
    }

    #[test]
    fn accepts_alternate_property_and_link_filenames() {
        let dir = tempfile::tempdir().unwrap();
        let descriptor = serde_json::from_str(test_utils::scenes::trivial_grid_scene()).unwrap();
        let compiled = compile_scene(descriptor).unwrap();
        std::fs::write(
            dir.path().join("space_areas.json"),
            serde_json::to_string(&envsim_common::SpaceAreasFile::from_areas(&compiled.areas)).unwrap(),
        )
        .unwrap();
        std::fs::write(
            dir.path().join("area_link.json"),
            serde_json::to_string(&envsim_common::LinksFile::from_links(&compiled.links)).unwrap(),
        )
        .unwrap();
        std::fs::write(
            dir.path().join("area_property.json"),
            serde_json::to_string(&envsim_common::AreaPropertiesFile::from_properties(&compiled.properties)).unwrap(),
        )
        .unwrap();

        let env = Environment::from_files(dir.path(), 1, 8).unwrap();
        let (area_id, property) = env.get_property_at(Point3::new(1.0, 1.0, 1.0));
        assert!(area_id.is_some());
        assert!(property.is_some());
    }

    #[test]
    fn explain_at_describes_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let env = build_env(test_utils::scenes::single_area_scene(), dir.path());
        let trace = env.explain_at(Point3::new(50.0, 50.0, 50.0));
        assert!(trace.contains("matched no area"));
    }
}
