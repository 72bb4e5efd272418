//! Collecting a particle's clusters and hits by detector view.
//!
//! All lookups are read-only filters over the particle's owned cluster set;
//! a view with no matching clusters yields an empty result, never an error.

use crate::event::{Cluster, EventGraph, Hit, ParticleId};
use crate::types::View;

/// The particle's clusters whose view matches `view`.
pub fn clusters_in_view(graph: &EventGraph, id: ParticleId, view: View) -> Vec<&Cluster> {
    graph
        .particle(id)
        .clusters()
        .iter()
        .filter(|c| c.view() == view)
        .collect()
}

/// Matching-view clusters across a list of particles.
pub fn clusters_in_view_for<'a>(
    graph: &'a EventGraph,
    ids: &[ParticleId],
    view: View,
) -> Vec<&'a Cluster> {
    ids.iter()
        .flat_map(|&id| clusters_in_view(graph, id, view))
        .collect()
}

/// The particle's clusters in the merged 3D view.
pub fn three_d_clusters(graph: &EventGraph, id: ParticleId) -> Vec<&Cluster> {
    clusters_in_view(graph, id, View::ThreeD)
}

/// Union of hits across the particle's matching-view clusters, in cluster
/// order then hit order.
pub fn hits_in_view(graph: &EventGraph, id: ParticleId, view: View) -> Vec<&Hit> {
    clusters_in_view(graph, id, view)
        .into_iter()
        .flat_map(|c| c.hits().iter())
        .collect()
}

/// As [`hits_in_view`], restricted to hits flagged as isolated.
pub fn isolated_hits_in_view(graph: &EventGraph, id: ParticleId, view: View) -> Vec<&Hit> {
    clusters_in_view(graph, id, view)
        .into_iter()
        .flat_map(|c| c.isolated_hits())
        .collect()
}
