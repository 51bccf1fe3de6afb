//! The `Transport` boundary (SPEC_FULL.md §6A): what the runtime needs
//! from the out-of-scope shared-memory PDU library. A real shared-memory
//! implementation lives outside this workspace; [`InMemoryTransport`] is
//! the in-process test double used by the scheduler's own tests and as a
//! default for local/demo runs.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::wire::{Disturbance, Pose};

/// Non-blocking pose/disturbance channel, one instance shared by every
/// drone the scheduler drives.
pub trait Transport: Send + Sync {
    /// Drains any buffered inbound traffic without blocking. A no-op for
    /// transports with no internal queue (like the in-memory test double).
    fn drain(&self);

    /// The most recent pose for `drone`, or `None` if it hasn't published
    /// one yet (steady-state warmup, not an error).
    fn read_pose(&self, drone: &str) -> Option<Pose>;

    /// Writes a disturbance for `drone`. Returns `false` on failure
    /// (`TransportWriteFailed` in spec.md §7's error taxonomy) rather than
    /// an `Err`, since a single failed write must not abort the tick.
    fn write_disturbance(&self, drone: &str, disturbance: &Disturbance) -> bool;
}

#[derive(Debug, Default)]
struct DroneChannel {
    inbound_pose: Option<Pose>,
    last_disturbance: Option<Disturbance>,
}

/// An in-process transport backed by per-drone interior-mutable cells.
/// Tests seed poses with [`InMemoryTransport::set_pose`] and assert on
/// writes with [`InMemoryTransport::last_disturbance`].
#[derive(Debug, Default)]
pub struct InMemoryTransport {
    channels: Mutex<HashMap<String, DroneChannel>>,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_pose(&self, drone: &str, pose: Pose) {
        let mut channels = self.channels.lock().unwrap();
        channels.entry(drone.to_string()).or_default().inbound_pose = Some(pose);
    }

    pub fn last_disturbance(&self, drone: &str) -> Option<Disturbance> {
        let channels = self.channels.lock().unwrap();
        channels.get(drone).and_then(|c| c.last_disturbance)
    }
}

impl Transport for InMemoryTransport {
    fn drain(&self) {}

    fn read_pose(&self, drone: &str) -> Option<Pose> {
        let channels = self.channels.lock().unwrap();
        channels.get(drone).and_then(|c| c.inbound_pose)
    }

    fn write_disturbance(&self, drone: &str, disturbance: &Disturbance) -> bool {
        let mut channels = self.channels.lock().unwrap();
        channels.entry(drone.to_string()).or_default().last_disturbance = Some(*disturbance);
        true
    }
}
