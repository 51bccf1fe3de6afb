//! Pure builder chain turning a [`SceneDescriptor`] into the three linked
//! tables, mirroring the reference implementation's
//! `CreatorBuilder.build_base().build_grid().build_properties().build_zones().build_links().result()`
//! chain. Each step consumes and returns `self` by value — no shared
//! mutable state, no in-place mutation visible across steps.

use envsim_common::{Aabb, AreaId, AreaProperty, Link, Point3, PropertyId, SpaceArea};
use envsim_zone::engine::{apply_gps_effect, apply_wind_effect, ZoneRng};
use envsim_zone::Zone;

use crate::error::{CompileError, Result};
use crate::scene::SceneDescriptor;

/// The three linked tables produced by compilation.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledScene {
    pub areas: Vec<SpaceArea>,
    pub properties: Vec<AreaProperty>,
    pub links: Vec<Link>,
}

pub struct SceneBuilder {
    descriptor: SceneDescriptor,
    base_wind: Point3,
    base_temperature: f32,
    base_pressure: f32,
    base_gps: f32,
    areas: Vec<SpaceArea>,
    properties: Vec<AreaProperty>,
    links: Vec<Link>,
}

impl SceneBuilder {
    pub fn new(descriptor: SceneDescriptor) -> Self {
        Self {
            descriptor,
            base_wind: Point3::ZERO,
            base_temperature: 20.0,
            base_pressure: 1.0,
            base_gps: 1.0,
            areas: Vec::new(),
            properties: Vec::new(),
            links: Vec::new(),
        }
    }

    pub fn build_base(mut self) -> Result<Self> {
        let base = &self.descriptor.base;
        self.base_wind = Point3::from_array(base.wind.to_vector());
        self.base_temperature = base.temperature_c;
        self.base_pressure = base.pressure_atm;
        self.base_gps = base.gps_strength.unwrap_or(1.0).clamp(0.0, 1.0);
        Ok(self)
    }

    pub fn build_grid(mut self) -> Result<Self> {
        let grid = &self.descriptor.grid;
        let [ex, ey, ez] = grid.extent_m;
        let [dx, dy, _dz] = grid.cell_m;

        if dx <= 0.0 || dy <= 0.0 {
            return Err(CompileError::malformed(
                "grid.cell_m",
                "cell dimensions must be positive",
            ));
        }
        if ex <= 0.0 || ey <= 0.0 || ez <= 0.0 {
            return Err(CompileError::malformed(
                "grid.extent_m",
                "extent dimensions must be positive",
            ));
        }

        let nx = (ex / dx) as usize;
        let ny = (ey / dy) as usize;
        if nx == 0 || ny == 0 {
            return Err(CompileError::malformed(
                "grid",
                "extent too small to contain a single cell",
            ));
        }

        for iy in 0..ny {
            for ix in 0..nx {
                let area_id = AreaId::new(format!("area_{iy}_{ix}"));
                let min = Point3::new(ix as f64 * dx, iy as f64 * dy, 0.0);
                let max = Point3::new((ix + 1) as f64 * dx, (iy + 1) as f64 * dy, ez);
                self.areas.push(SpaceArea {
                    area_id: area_id.clone(),
                    bounds: Aabb::new(min, max, area_id),
                });
            }
        }

        Ok(self)
    }

    pub fn build_properties(mut self) -> Result<Self> {
        for area in &self.areas {
            let property_id = PropertyId::new(format!("prop_{}", area.area_id));
            self.properties.push(AreaProperty {
                property_id,
                wind_velocity: self.base_wind,
                temperature: self.base_temperature,
                sea_level_atm: self.base_pressure,
                gps_strength: self.base_gps,
            });
        }
        Ok(self)
    }

    /// Applies zones highest-priority-first, in a zone-major loop so each
    /// zone's turbulence RNG is sampled once per area it covers, in area
    /// order — this is what "baked at compile time" means in practice.
    pub fn build_zones(mut self) -> Result<Self> {
        let mut zones: Vec<&Zone> = self
            .descriptor
            .zones
            .iter()
            .filter(|z| z.is_active())
            .collect();
        zones.sort_by(|a, b| b.priority.cmp(&a.priority));

        for zone in zones {
            let mut rng = ZoneRng::for_zone(zone);
            for (area, property) in self.areas.iter().zip(self.properties.iter_mut()) {
                let center = area.bounds.to_2d().center();
                if !zone.shape.contains(center) {
                    continue;
                }
                property.wind_velocity =
                    apply_wind_effect(&zone.effect, property.wind_velocity, center, &mut rng);
                if !zone.gps.is_noop() {
                    property.gps_strength = apply_gps_effect(&zone.gps, property.gps_strength);
                }
            }
        }

        for property in &mut self.properties {
            property.clamp_gps();
        }

        Ok(self)
    }

    pub fn build_links(mut self) -> Result<Self> {
        self.links = self
            .areas
            .iter()
            .zip(self.properties.iter())
            .map(|(area, property)| Link {
                area_id: area.area_id.clone(),
                property_id: property.property_id.clone(),
            })
            .collect();
        Ok(self)
    }

    pub fn result(self) -> CompiledScene {
        CompiledScene {
            areas: self.areas,
            properties: self.properties,
            links: self.links,
        }
    }
}

/// Runs the full builder chain over a parsed scene descriptor.
pub fn compile_scene(descriptor: SceneDescriptor) -> Result<CompiledScene> {
    Ok(SceneBuilder::new(descriptor)
        .build_base()?
        .build_grid()?
        .build_properties()?
        .build_zones()?
        .build_links()?
        .result())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> SceneDescriptor {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn trivial_grid_has_four_areas_and_base_wind_everywhere() {
        let scene = parse(test_utils::scenes::trivial_grid_scene());
        let compiled = compile_scene(scene).unwrap();
        assert_eq!(compiled.areas.len(), 4);
        assert_eq!(compiled.properties.len(), 4);
        assert_eq!(compiled.links.len(), 4);
        for property in &compiled.properties {
            assert_eq!(property.wind_velocity, Point3::new(1.0, 0.0, 0.0));
        }
    }

    #[test]
    fn absolute_zone_overrides_only_covered_area() {
        let scene = parse(test_utils::scenes::absolute_zone_scene());
        let compiled = compile_scene(scene).unwrap();
        let area_0_0 = compiled
            .links
            .iter()
            .find(|l| l.area_id.as_str() == "area_0_0")
            .unwrap();
        let prop = compiled
            .properties
            .iter()
            .find(|p| p.property_id == area_0_0.property_id)
            .unwrap();
        assert_eq!(prop.wind_velocity, Point3::new(0.0, 5.0, 0.0));

        let area_0_1 = compiled
            .links
            .iter()
            .find(|l| l.area_id.as_str() == "area_0_1")
            .unwrap();
        let other = compiled
            .properties
            .iter()
            .find(|p| p.property_id == area_0_1.property_id)
            .unwrap();
        assert_eq!(other.wind_velocity, Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn higher_priority_zone_applies_first() {
        // z2 (priority 10, Add) applies before z1 (priority 5, Scale):
        // (1,0,0) + (1,1,0) = (2,1,0), then *2 = (4,2,0).
        let scene = parse(test_utils::scenes::priority_ordering_scene());
        let compiled = compile_scene(scene).unwrap();
        let prop = &compiled.properties[0];
        assert_eq!(prop.wind_velocity, Point3::new(4.0, 2.0, 0.0));
    }

    #[test]
    fn gps_modifiers_compose_and_clamp() {
        let scene = parse(test_utils::scenes::gps_composition_scene());
        let compiled = compile_scene(scene).unwrap();
        let prop = &compiled.properties[0];
        assert!((prop.gps_strength - 0.65).abs() < 1e-6);
    }

    #[test]
    fn polar_wind_resolves_to_a_vector() {
        // dir_deg=90, speed_ms=2.0 -> (2*cos(90), 2*sin(90), 0) = (~0, 2, 0).
        let scene = parse(test_utils::scenes::polar_wind_scene());
        let compiled = compile_scene(scene).unwrap();
        for property in &compiled.properties {
            assert!(property.wind_velocity.x.abs() < 1e-9);
            assert!((property.wind_velocity.y - 2.0).abs() < 1e-9);
            assert_eq!(property.wind_velocity.z, 0.0);
        }
    }

    #[test]
    fn zero_cell_size_is_a_compile_error() {
        let json = r#"{
            "base": {"wind": {"vector_ms": [0,0,0]}, "temperature_C": 20, "pressure_atm": 1},
            "grid": {"extent_m": [10,10,5], "cell_m": [0,5,5]},
            "zones": []
        }"#;
        let scene = parse(json);
        assert!(compile_scene(scene).is_err());
    }
}
