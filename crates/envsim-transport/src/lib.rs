//! Pose/disturbance wire contracts and the `Transport` boundary the
//! runtime drives each tick, plus the in-process test double that stands
//! in for the out-of-scope shared-memory PDU library.

pub mod drone_io;
pub mod error;
pub mod roster;
pub mod transport;
pub mod wire;

pub use drone_io::DroneIo;
pub use error::{Result, RosterError};
pub use roster::DroneManager;
pub use transport::{InMemoryTransport, Transport};
pub use wire::{Disturbance, Pose};
