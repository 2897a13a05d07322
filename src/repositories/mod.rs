pub mod heartbeats;
pub mod sightings;

pub use heartbeats::{HeartbeatPing, HeartbeatRepository};
pub use sightings::{NetworkLocation, NetworkSighting, NewSighting, SightingRepository};
