//! One drone's worth of I/O, generalized over [`Transport`] — mirrors
//! `asset/drone_io.py::DroneIO`.

use envsim_common::AreaProperty;

use crate::transport::Transport;
use crate::wire::{Disturbance, Pose};

pub const POS_ORG: &str = "pos";
pub const DISTURB_ORG: &str = "disturb";

/// Adapts a named drone's reads/writes to a [`Transport`], independent of
/// which concrete transport backs it.
#[derive(Debug, Clone)]
pub struct DroneIo {
    pub name: String,
}

impl DroneIo {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn read_pose(&self, transport: &dyn Transport) -> Option<Pose> {
        transport.read_pose(&self.name)
    }

    pub fn write_disturbance(&self, transport: &dyn Transport, disturbance: &Disturbance) -> bool {
        transport.write_disturbance(&self.name, disturbance)
    }

    /// Area-property-to-disturbance conversion, zero-initialized when
    /// there is no property (a BVH lookup miss).
    pub fn make_disturbance(property: Option<&AreaProperty>) -> Disturbance {
        Disturbance::from_property(property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::InMemoryTransport;

    #[test]
    fn round_trips_pose_and_disturbance_through_a_transport() {
        let transport = InMemoryTransport::new();
        let drone = DroneIo::new("Drone1");
        assert_eq!(drone.read_pose(&transport), None);

        transport.set_pose("Drone1", Pose::new(1.0, 2.0, 3.0));
        assert_eq!(drone.read_pose(&transport), Some(Pose::new(1.0, 2.0, 3.0)));

        let disturbance = DroneIo::make_disturbance(None);
        assert!(drone.write_disturbance(&transport, &disturbance));
        assert_eq!(transport.last_disturbance("Drone1"), Some(Disturbance::ZERO));
    }
}
