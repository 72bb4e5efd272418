#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod error;
pub mod event;
pub mod pfo;
pub mod record;
pub mod shower;
pub mod trajectory;
pub mod types;

// Lower-level geometric building blocks, public for tools and host adapters.
pub mod geometry;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{Error, Result};
pub use crate::event::{Cluster, EventGraph, Hit, Particle, ParticleId};
pub use crate::record::{characterise, characterise_event, ParticleKind, ParticleRecord, RecordParams};
pub use crate::shower::{ShowerParameters, ShowerParams};
pub use crate::trajectory::TrajectoryParams;
pub use crate::types::{TrackState, View};

/// Small prelude for quick experiments.
///
/// ```
/// use pfo_analysis::prelude::*;
/// use nalgebra::Vector3;
///
/// let mut graph = EventGraph::new();
/// let p = graph.add_particle(13, Vector3::new(0.0, 0.0, 1.0));
/// assert!(pfo_analysis::pfo::is_track(graph.particle(p).pdg()));
/// ```
pub mod prelude {
    pub use crate::event::{Cluster, EventGraph, Hit, ParticleId};
    pub use crate::types::{TrackState, View};
    pub use crate::{Error, ParticleKind, ParticleRecord, Result};
}
