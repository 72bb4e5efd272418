//! Trajectory extraction: ordered track states from a particle's 3D hits.
//!
//! The particle's 3D clusters are passed through the sliding linear fit and
//! every hit contributes one [`TrackState`] at its fitted position. States
//! are keyed by the signed projection of (fit position − vertex) onto the
//! seed axis, with the sign chosen so that the trajectory runs along the
//! reconstructed momentum. Recoverable per-cluster and per-hit fit failures
//! drop the affected points; only the fatal `Failure` kind aborts the whole
//! extraction.

use crate::error::{Error, Result};
use crate::event::{EventGraph, ParticleId};
use crate::geometry::extremal_coordinates;
use crate::geometry::sliding_fit::ThreeDSlidingFit;
use crate::pfo::aggregation::three_d_clusters;
use crate::types::TrackState;
use log::debug;
use nalgebra::Vector3;
use serde::Deserialize;

/// Knobs of the per-cluster sliding fit.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct TrajectoryParams {
    /// Half-window, in layers, of the local linear fit.
    pub half_window: u32,
    /// Longitudinal layer pitch (cm).
    pub pitch: f32,
}

impl Default for TrajectoryParams {
    fn default() -> Self {
        Self {
            half_window: 20,
            pitch: 0.3,
        }
    }
}

/// Fits the particle's 3D clusters and returns its trajectory, ordered by
/// signed longitudinal displacement from the vertex (ascending; points with
/// equal keys keep their insertion order).
///
/// Fails `NotInitialized` when the particle has no reconstructed momentum,
/// and `NotFound` when it has no 3D clusters, a zero-extent 3D span, or no
/// surviving trajectory points.
pub fn sliding_fit_trajectory(
    graph: &EventGraph,
    id: ParticleId,
    params: TrajectoryParams,
) -> Result<Vec<TrackState>> {
    let particle = graph.particle(id);
    if particle.momentum().norm_squared() < f32::EPSILON {
        return Err(Error::NotInitialized("particle momentum is not set"));
    }
    let momentum_dir = particle.momentum().normalize();

    let clusters = three_d_clusters(graph, id);
    if clusters.is_empty() {
        return Err(Error::NotFound("particle has no 3D clusters"));
    }

    // The vertex is optional; its absence anchors the keys at the origin.
    let vertex = graph.vertex_of(id)?.unwrap_or_else(Vector3::zeros);

    let (min_pos, max_pos) = extremal_coordinates(clusters.iter().copied())?;
    let span = max_pos - min_pos;
    if span.norm_squared() < f32::EPSILON {
        return Err(Error::NotFound("3D extent is degenerate"));
    }

    // Orient the seed axis along the reconstructed momentum.
    let seed_dir = span.normalize();
    let scale = if seed_dir.dot(&momentum_dir) < 0.0 {
        -1.0
    } else {
        1.0
    };

    let mut keyed: Vec<(f32, TrackState)> = Vec::new();
    for cluster in &clusters {
        let fit = match ThreeDSlidingFit::new(cluster.hits(), params.half_window, params.pitch) {
            Ok(fit) => fit,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                debug!("sliding fit skipped a 3D cluster: {e}");
                continue;
            }
        };

        for hit in cluster.hits() {
            let rl = fit.longitudinal_displacement(&hit.position);
            let position = match fit.fit_position(rl) {
                Ok(p) => p,
                Err(e) if e.is_fatal() => return Err(e),
                Err(_) => continue,
            };
            let direction = match fit.fit_direction(rl) {
                Ok(d) => d,
                Err(e) if e.is_fatal() => return Err(e),
                Err(_) => continue,
            };

            keyed.push((
                seed_dir.dot(&(position - vertex)) * scale,
                TrackState {
                    position,
                    direction: direction * scale,
                },
            ));
        }
    }

    if keyed.is_empty() {
        return Err(Error::NotFound("no trajectory points survived the fit"));
    }
    keyed.sort_by(|lhs, rhs| lhs.0.total_cmp(&rhs.0));
    Ok(keyed.into_iter().map(|(_, state)| state).collect())
}
