//! Particle records in the shape consumed by output assembly.
//!
//! Each particle is characterised once, at construction, as track-like
//! (carrying its fitted trajectory), shower-like (carrying the PCA
//! descriptors) or generic. Downstream persistence pattern-matches on the
//! kind instead of probing capabilities at runtime.

use crate::error::{Error, Result};
use crate::event::{EventGraph, ParticleId};
use crate::pfo::classify::{is_shower, is_track};
use crate::pfo::ordering::sort_particles;
use crate::pfo::traversal::is_final_state;
use crate::shower::{build_shower, ShowerParameters, ShowerParams};
use crate::trajectory::{sliding_fit_trajectory, TrajectoryParams};
use crate::types::TrackState;
use log::debug;
use serde::{Deserialize, Serialize};

/// Capability payload selected from the particle class.
#[derive(Clone, Debug, Serialize)]
pub enum ParticleKind {
    /// No derived geometry (unfittable, or neither track- nor shower-like).
    Generic,
    Track { trajectory: Vec<TrackState> },
    Shower { parameters: ShowerParameters },
}

/// One characterised particle.
#[derive(Clone, Debug, Serialize)]
pub struct ParticleRecord {
    pub id: ParticleId,
    pub pdg: i32,
    pub is_final_state: bool,
    pub kind: ParticleKind,
}

/// Knobs of the per-event characterisation pass.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct RecordParams {
    pub trajectory: TrajectoryParams,
    pub shower: ShowerParams,
}

/// Characterises one particle.
///
/// Recoverable derivation failures downgrade the record to
/// [`ParticleKind::Generic`]; the fatal `Failure` kind propagates.
pub fn characterise(
    graph: &EventGraph,
    id: ParticleId,
    params: &RecordParams,
) -> Result<ParticleRecord> {
    let pdg = graph.particle(id).pdg();

    let kind = if is_track(pdg) {
        match sliding_fit_trajectory(graph, id, params.trajectory) {
            Ok(trajectory) => ParticleKind::Track { trajectory },
            // Malformed input data (multi-vertex cardinality, bad fit knobs)
            // propagates like the fatal kind; only the absent-feature errors
            // downgrade the record.
            Err(e @ (Error::Failure(_) | Error::InvalidParameter(_))) => return Err(e),
            Err(e) => {
                debug!("track characterisation downgraded {id:?}: {e}");
                ParticleKind::Generic
            }
        }
    } else if is_shower(pdg) {
        match build_shower(graph, id, params.shower)? {
            Some(parameters) => ParticleKind::Shower { parameters },
            None => ParticleKind::Generic,
        }
    } else {
        ParticleKind::Generic
    };

    Ok(ParticleRecord {
        id,
        pdg,
        is_final_state: is_final_state(graph, id),
        kind,
    })
}

/// Characterises every particle in the event, largest-first.
pub fn characterise_event(graph: &EventGraph, params: &RecordParams) -> Result<Vec<ParticleRecord>> {
    let mut ids: Vec<ParticleId> = graph.ids().collect();
    sort_particles(graph, &mut ids);

    let mut records = Vec::with_capacity(ids.len());
    for id in ids {
        records.push(characterise(graph, id, params)?);
    }
    Ok(records)
}
