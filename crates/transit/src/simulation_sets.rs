//! Deterministic simulation ordering via `SystemSet` phases.
//!
//! ```text
//! PreSim  →  Simulation  →  PostSim
//! ```
//!
//! * **PreSim** – Tick counters and the game clock.
//! * **Simulation** – Rider arrivals, then the transit tick (dispatch,
//!   vehicle steps, boarding, retirement). Stop queues and manifests are
//!   only mutated here, one system at a time.
//! * **PostSim** – Notification collection and monthly income rollover.
//!   These only read transit state, so UI and rendering can consume their
//!   output on the next frame.

use bevy::prelude::*;

/// Ordered phases for systems running in the `FixedUpdate` schedule.
///
/// Configured as a chain: `PreSim` → `Simulation` → `PostSim`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    PreSim,
    Simulation,
    PostSim,
}
