//! The three linked tables produced by the environment compiler and
//! consumed by the environment facade: space areas, area properties, and
//! the links between them.

use serde::{Deserialize, Serialize};

use crate::geometry::{Aabb, Vec3};
use crate::ids::{AreaId, PropertyId};

/// One cell of the environment grid — the atomic spatial unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceArea {
    pub area_id: AreaId,
    pub bounds: Aabb,
}

/// Environmental parameters attached to an area via a [`Link`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaProperty {
    pub property_id: PropertyId,
    pub wind_velocity: Vec3,
    pub temperature: f32,
    pub sea_level_atm: f32,
    #[serde(default = "default_gps_strength")]
    pub gps_strength: f32,
}

fn default_gps_strength() -> f32 {
    1.0
}

impl AreaProperty {
    /// Clamp `gps_strength` into `[0, 1]`, the invariant every compiler
    /// output must satisfy.
    pub fn clamp_gps(&mut self) {
        self.gps_strength = self.gps_strength.clamp(0.0, 1.0);
    }
}

/// A many-to-one mapping from an area to the property applied within it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub area_id: AreaId,
    pub property_id: PropertyId,
}

// ---------------------------------------------------------------------
// Wire formats (external interfaces, spec §6)
// ---------------------------------------------------------------------

/// `{min: {x,y,z}, max: {x,y,z}}` as it appears in `space_areas` JSON.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundsJson {
    pub min: PointJson,
    pub max: PointJson,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PointJson {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<PointJson> for crate::geometry::Point3 {
    fn from(p: PointJson) -> Self {
        crate::geometry::Point3::new(p.x, p.y, p.z)
    }
}

impl From<crate::geometry::Point3> for PointJson {
    fn from(p: crate::geometry::Point3) -> Self {
        PointJson {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SpaceAreaJson {
    area_id: String,
    bounds: BoundsJson,
}

/// `space_areas` JSON: `{space_areas: [{area_id, bounds: {min, max}}]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceAreasFile {
    space_areas: Vec<SpaceAreaJson>,
}

impl SpaceAreasFile {
    pub fn from_areas(areas: &[SpaceArea]) -> Self {
        Self {
            space_areas: areas
                .iter()
                .map(|a| SpaceAreaJson {
                    area_id: a.area_id.as_str().to_string(),
                    bounds: BoundsJson {
                        min: a.bounds.min.into(),
                        max: a.bounds.max.into(),
                    },
                })
                .collect(),
        }
    }

    pub fn into_areas(self) -> Vec<SpaceArea> {
        self.space_areas
            .into_iter()
            .map(|a| {
                let area_id = AreaId::new(a.area_id.clone());
                SpaceArea {
                    area_id: area_id.clone(),
                    bounds: Aabb::new(a.bounds.min.into(), a.bounds.max.into(), area_id),
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AreaPropertyEntryJson {
    id: String,
    properties: AreaPropertyValuesJson,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AreaPropertyValuesJson {
    wind_velocity: [f64; 3],
    temperature: f32,
    sea_level_atm: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gps_strength: Option<f32>,
}

/// `area_properties` JSON: `{area_properties: [{id, properties: {...}}]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaPropertiesFile {
    area_properties: Vec<AreaPropertyEntryJson>,
}

impl AreaPropertiesFile {
    pub fn from_properties(props: &[AreaProperty]) -> Self {
        Self {
            area_properties: props
                .iter()
                .map(|p| AreaPropertyEntryJson {
                    id: p.property_id.as_str().to_string(),
                    properties: AreaPropertyValuesJson {
                        wind_velocity: p.wind_velocity.as_array(),
                        temperature: p.temperature,
                        sea_level_atm: p.sea_level_atm,
                        gps_strength: Some(p.gps_strength),
                    },
                })
                .collect(),
        }
    }

    pub fn into_properties(self) -> Vec<AreaProperty> {
        self.area_properties
            .into_iter()
            .map(|p| AreaProperty {
                property_id: PropertyId::new(p.id),
                wind_velocity: Vec3::from_array(p.properties.wind_velocity),
                temperature: p.properties.temperature,
                sea_level_atm: p.properties.sea_level_atm,
                gps_strength: p.properties.gps_strength.unwrap_or(1.0),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LinkJson {
    area_id: String,
    area_property_id: String,
}

/// `links` JSON: `{links: [{area_id, area_property_id}]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksFile {
    links: Vec<LinkJson>,
}

impl LinksFile {
    pub fn from_links(links: &[Link]) -> Self {
        Self {
            links: links
                .iter()
                .map(|l| LinkJson {
                    area_id: l.area_id.as_str().to_string(),
                    area_property_id: l.property_id.as_str().to_string(),
                })
                .collect(),
        }
    }

    pub fn into_links(self) -> Vec<Link> {
        self.links
            .into_iter()
            .map(|l| Link {
                area_id: AreaId::new(l.area_id),
                property_id: PropertyId::new(l.area_property_id),
            })
            .collect()
    }
}
