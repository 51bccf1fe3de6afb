//! Pose/disturbance channel contracts (spec.md §6). These mirror the
//! shapes the out-of-scope shared-memory PDU library moves across the
//! wire — `Pose` corresponds to the position fields the reference
//! implementation reads off a `Twist` PDU, `Disturbance` to the
//! `hako_msgs.Disturbance` PDU `drone_io.py::make_disturbance` builds.

use envsim_common::{AreaProperty, Point3};
use serde::{Deserialize, Serialize};

/// A drone's current position, as read from the transport each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Point3,
}

impl Pose {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
        }
    }
}

/// The environmental disturbance written back to a drone each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Disturbance {
    pub wind: Point3,
    pub temperature: f32,
    pub sea_level_atm: f32,
}

impl Disturbance {
    pub const ZERO: Disturbance = Disturbance {
        wind: Point3::ZERO,
        temperature: 0.0,
        sea_level_atm: 0.0,
    };

    /// Builds a disturbance from a resolved area property, or the
    /// zero-initialized disturbance when there is none (a lookup miss —
    /// spec.md §4.6 edge case, never an error).
    pub fn from_property(property: Option<&AreaProperty>) -> Self {
        match property {
            Some(p) => Disturbance {
                wind: p.wind_velocity,
                temperature: p.temperature,
                sea_level_atm: p.sea_level_atm,
            },
            None => Disturbance::ZERO,
        }
    }
}
