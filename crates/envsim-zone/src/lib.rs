//! Zone effect engine: evaluates wind and GPS modifiers at a point.

pub mod engine;
pub mod model;

pub use engine::{apply_gps_effect, apply_wind_effect, sample_normal, ZoneRng};
pub use model::{Decay, Effect, GpsModifiers, Shape, TurbulenceKind, Zone};
