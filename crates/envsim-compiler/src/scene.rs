//! Wire types for the scene descriptor (`environment_model.json` in the
//! reference implementation): the declarative input to compilation.

use envsim_zone::Zone;
use serde::{Deserialize, Serialize};

/// Either form the base wind can be given in: a raw vector, or a
/// direction/speed pair resolved to a vector at build time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WindSpec {
    Vector { vector_ms: [f64; 3] },
    Polar { dir_deg: f64, speed_ms: f64 },
}

impl WindSpec {
    /// Resolves to `(x, y, z)` m/s, converting the polar form with
    /// `(speed*cos(dir), speed*sin(dir), 0)`.
    pub fn to_vector(&self) -> [f64; 3] {
        match self {
            WindSpec::Vector { vector_ms } => *vector_ms,
            WindSpec::Polar { dir_deg, speed_ms } => {
                let rad = dir_deg.to_radians();
                [speed_ms * rad.cos(), speed_ms * rad.sin(), 0.0]
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseSpec {
    pub wind: WindSpec,
    #[serde(rename = "temperature_C", default = "default_temperature")]
    pub temperature_c: f32,
    #[serde(default = "default_pressure")]
    pub pressure_atm: f32,
    #[serde(default)]
    pub gps_strength: Option<f32>,
}

fn default_temperature() -> f32 {
    20.0
}

fn default_pressure() -> f32 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridDescriptor {
    pub extent_m: [f64; 3],
    pub cell_m: [f64; 3],
}

/// The full scene descriptor: base atmosphere, voxel grid, and
/// priority-ordered zones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneDescriptor {
    pub base: BaseSpec,
    pub grid: GridDescriptor,
    #[serde(default)]
    pub zones: Vec<Zone>,
}
