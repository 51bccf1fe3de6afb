//! The fixed-step tick body: pose in, spatial lookup, disturbance out, in
//! roster order. Kept free of tokio so it can be driven directly in
//! tests without a runtime.

use std::sync::Arc;

use envsim_env::Environment;
use envsim_transport::{DroneIo, Disturbance, Transport};

pub struct Scheduler {
    env: Arc<Environment>,
    transport: Arc<dyn Transport>,
    drones: Vec<DroneIo>,
}

impl Scheduler {
    pub fn new(env: Arc<Environment>, transport: Arc<dyn Transport>, drones: Vec<DroneIo>) -> Self {
        Self {
            env,
            transport,
            drones,
        }
    }

    /// Runs one tick: drains inbound traffic, then for each drone in
    /// roster order reads its pose, resolves the disturbance at that
    /// pose (zero disturbance on a lookup miss or absent pose), and
    /// writes it back. Returns the number of drones whose write failed.
    pub fn tick(&self) -> usize {
        self.transport.drain();

        let mut write_failures = 0;
        for drone in &self.drones {
            let Some(pose) = drone.read_pose(self.transport.as_ref()) else {
                tracing::debug!(drone = %drone.name, "no pose yet, skipping tick");
                continue;
            };

            let (area_id, property) = self.env.get_property_at(pose.position);
            match (&area_id, &property) {
                (None, _) => {
                    tracing::debug!(drone = %drone.name, "pose outside every area, writing zero disturbance");
                }
                (Some(area_id), None) => {
                    tracing::debug!(drone = %drone.name, %area_id, "area has no linked property, writing zero disturbance");
                }
                (Some(_), Some(_)) => {}
            }
            let disturbance = Disturbance::from_property(property);

            if !drone.write_disturbance(self.transport.as_ref(), &disturbance) {
                tracing::warn!(drone = %drone.name, "transport write failed");
                write_failures += 1;
            }
        }
        write_failures
    }
}
