//! Zone shape and effect model.
//!
//! Modeled as tagged sum types with exhaustive dispatch rather than an
//! open class hierarchy, per the redesign note in the distilled spec:
//! this turns a malformed zone variant into a parse-time error instead of
//! a runtime dispatch failure.

use serde::{Deserialize, Serialize};

/// A 2D footprint a zone effect is active within. Zones are sampled at the
/// cell's XY center with z=0 (current shapes are 2D-only, consistent with
/// that sampling strategy — see the design notes in `SPEC_FULL.md`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Circle { center_xy: [f64; 2], radius: f64 },
    Rect { center_xy: [f64; 2], size_xy: [f64; 2] },
}

impl Shape {
    pub fn contains(&self, p: (f64, f64)) -> bool {
        match self {
            Shape::Circle { center_xy, radius } => {
                let dx = p.0 - center_xy[0];
                let dy = p.1 - center_xy[1];
                dx * dx + dy * dy <= radius * radius
            }
            Shape::Rect { center_xy, size_xy } => {
                (p.0 - center_xy[0]).abs() <= size_xy[0] / 2.0
                    && (p.1 - center_xy[1]).abs() <= size_xy[1] / 2.0
            }
        }
    }
}

/// Decay profile applied to a [`Effect::Vortex`]'s tangential gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decay {
    Gaussian,
}

/// Distribution a [`Effect::Turbulence`] draws its per-axis noise from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurbulenceKind {
    Gauss,
    /// Not true Perlin noise — a scaled Gaussian (std * 0.5). Preserved
    /// verbatim from the reference implementation, which leaves a
    /// real-Perlin upgrade as a TODO. Do not "fix" this without revisiting
    /// every baked scene that depends on the current magnitude.
    Perlin,
    /// Simplified Ornstein-Uhlenbeck process: `theta * (-wind) + N(0, std)`
    /// with `theta = 0.15`.
    Ou,
}

fn default_r_min() -> f64 {
    0.1
}

fn default_clockwise() -> bool {
    true
}

/// A modifier applied to the wind vector at a point inside a zone's shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Replaces the wind vector outright, discarding the incoming value.
    Absolute { wind_ms: [f64; 3] },
    /// Scales the incoming wind vector by a constant factor.
    Scale { factor: f64 },
    /// Adds a constant delta to the incoming wind vector.
    Add { delta_ms: [f64; 3] },
    /// A 2D rotational gust around `center`, strongest near `r_min` and
    /// decaying with distance.
    Vortex {
        center: [f64; 2],
        gain: f64,
        #[serde(default)]
        decay: Option<Decay>,
        #[serde(default)]
        sigma: Option<f64>,
        #[serde(default = "default_r_min")]
        r_min: f64,
        #[serde(default = "default_clockwise")]
        clockwise: bool,
        #[serde(default)]
        max_ms: Option<f64>,
    },
    /// Adds zero-mean noise to the wind vector. Baked in at compile time —
    /// the runtime never re-samples a zone (see `SPEC_FULL.md` §3).
    Turbulence {
        kind: TurbulenceKind,
        std_ms: f64,
        #[serde(default)]
        seed: Option<u64>,
    },
}

/// GPS strength modifiers a zone may carry alongside its wind effect,
/// composed in `abs -> add -> scale` order and clamped to `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GpsModifiers {
    #[serde(default)]
    pub gps_abs: Option<f32>,
    #[serde(default)]
    pub gps_add: Option<f32>,
    #[serde(default)]
    pub gps_scale: Option<f32>,
}

impl GpsModifiers {
    pub fn is_noop(&self) -> bool {
        self.gps_abs.is_none() && self.gps_add.is_none() && self.gps_scale.is_none()
    }
}

/// A shape+effect rule that modifies properties during compilation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    pub shape: Shape,
    pub effect: Effect,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default, flatten)]
    pub gps: GpsModifiers,
}

impl Zone {
    /// Zones with no explicit `active` flag are active by default.
    pub fn is_active(&self) -> bool {
        self.active.unwrap_or(true)
    }
}
