//! Geometric metrics between particles: lengths, closest approach, and
//! multi-view separations.

use crate::error::{Error, Result};
use crate::event::{Cluster, EventGraph, ParticleId};
use crate::geometry;
use crate::pfo::aggregation::{clusters_in_view, three_d_clusters};
use crate::types::View;

/// Sum of squared cluster spans over the particle's 2D-view clusters.
pub fn two_d_length_squared(graph: &EventGraph, id: ParticleId) -> f32 {
    graph
        .particle(id)
        .clusters()
        .iter()
        .filter(|c| c.view().is_two_d())
        .map(geometry::length_squared)
        .sum()
}

/// Sum of squared cluster spans over the particle's 3D clusters.
pub fn three_d_length_squared(graph: &EventGraph, id: ParticleId) -> f32 {
    graph
        .particle(id)
        .clusters()
        .iter()
        .filter(|c| !c.view().is_two_d())
        .map(geometry::length_squared)
        .sum()
}

/// Minimum closest-distance between a query cluster and the particle's
/// clusters in the query cluster's view.
///
/// Fails `NotFound` when the particle has no cluster in that view.
pub fn closest_distance(graph: &EventGraph, id: ParticleId, cluster: &Cluster) -> Result<f32> {
    let matches = clusters_in_view(graph, id, cluster.view());
    if matches.is_empty() {
        return Err(Error::NotFound("no clusters in the query cluster's view"));
    }

    let mut best: Option<f32> = None;
    for candidate in matches {
        match geometry::closest_distance(cluster, candidate) {
            Ok(d) => best = Some(best.map_or(d, |current| current.min(d))),
            Err(e) if e.is_fatal() => return Err(e),
            Err(_) => {}
        }
    }
    best.ok_or(Error::NotFound("no hits in the query cluster's view"))
}

/// Averaged 2D separation between two particles across the wire views.
///
/// Each view where both particles have clusters contributes its closest
/// cluster-set distance. The per-view terms are plain distances, not squares;
/// the sum is divided by the contributing-view count and square-rooted.
/// Downstream physics quantities assume this historical convention, so it is
/// kept as is. Fails `NotFound` when no view has clusters from both.
pub fn two_d_separation(graph: &EventGraph, lhs: ParticleId, rhs: ParticleId) -> Result<f32> {
    let mut accumulated = 0.0f32;
    let mut n_views = 0u32;

    for view in View::TWO_D {
        let lhs_clusters = clusters_in_view(graph, lhs, view);
        let rhs_clusters = clusters_in_view(graph, rhs, view);
        if lhs_clusters.is_empty() || rhs_clusters.is_empty() {
            continue;
        }
        accumulated += geometry::closest_distance_between_sets(&lhs_clusters, &rhs_clusters)?;
        n_views += 1;
    }

    if n_views == 0 {
        return Err(Error::NotFound("no view with clusters from both particles"));
    }
    Ok((accumulated / n_views as f32).sqrt())
}

/// Closest distance between the two particles' 3D cluster sets.
///
/// Fails `NotFound` when either particle has no 3D clusters.
pub fn three_d_separation(graph: &EventGraph, lhs: ParticleId, rhs: ParticleId) -> Result<f32> {
    let lhs_clusters = three_d_clusters(graph, lhs);
    let rhs_clusters = three_d_clusters(graph, rhs);
    if lhs_clusters.is_empty() || rhs_clusters.is_empty() {
        return Err(Error::NotFound("particle has no 3D clusters"));
    }
    geometry::closest_distance_between_sets(&lhs_clusters, &rhs_clusters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Hit;
    use nalgebra::Vector3;

    fn line_cluster(view: View, z0: f32, z1: f32) -> Cluster {
        Cluster::new(
            view,
            vec![
                Hit::new(Vector3::new(0.0, 0.0, z0)),
                Hit::new(Vector3::new(0.0, 0.0, z1)),
            ],
        )
    }

    #[test]
    fn lengths_split_by_view_class() {
        let mut graph = EventGraph::new();
        let p = graph.add_particle(13, Vector3::zeros());
        graph.add_cluster(p, line_cluster(View::U, 0.0, 3.0));
        graph.add_cluster(p, line_cluster(View::W, 0.0, 4.0));
        graph.add_cluster(p, line_cluster(View::ThreeD, 0.0, 5.0));

        assert!((two_d_length_squared(&graph, p) - 25.0).abs() < 1e-5);
        assert!((three_d_length_squared(&graph, p) - 25.0).abs() < 1e-5);
    }

    #[test]
    fn closest_distance_requires_matching_view() {
        let mut graph = EventGraph::new();
        let p = graph.add_particle(13, Vector3::zeros());
        graph.add_cluster(p, line_cluster(View::U, 0.0, 1.0));

        let query_u = line_cluster(View::U, 4.0, 5.0);
        assert!((closest_distance(&graph, p, &query_u).unwrap() - 3.0).abs() < 1e-5);

        let query_v = line_cluster(View::V, 4.0, 5.0);
        assert!(matches!(
            closest_distance(&graph, p, &query_v),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn closest_distance_skips_hitless_clusters() {
        let mut graph = EventGraph::new();
        let p = graph.add_particle(13, Vector3::zeros());
        graph.add_cluster(p, Cluster::new(View::U, Vec::new()));
        graph.add_cluster(p, line_cluster(View::U, 0.0, 1.0));

        // The empty matching-view cluster is recoverable and ignored.
        let query = line_cluster(View::U, 4.0, 5.0);
        assert!((closest_distance(&graph, p, &query).unwrap() - 3.0).abs() < 1e-5);

        // With only hitless matches the query degrades to NotFound.
        let q = graph.add_particle(13, Vector3::zeros());
        graph.add_cluster(q, Cluster::new(View::U, Vec::new()));
        assert!(matches!(
            closest_distance(&graph, q, &query),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn single_view_separation_degenerates_to_sqrt_of_distance() {
        let mut graph = EventGraph::new();
        let a = graph.add_particle(13, Vector3::zeros());
        let b = graph.add_particle(2212, Vector3::zeros());
        graph.add_cluster(a, line_cluster(View::U, 0.0, 1.0));
        graph.add_cluster(b, line_cluster(View::U, 6.0, 7.0));

        // One contributing view with distance 5: (5 / 1).sqrt().
        let separation = two_d_separation(&graph, a, b).unwrap();
        assert!((separation - 5.0f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn disjoint_views_fail_not_found() {
        let mut graph = EventGraph::new();
        let a = graph.add_particle(13, Vector3::zeros());
        let b = graph.add_particle(2212, Vector3::zeros());
        graph.add_cluster(a, line_cluster(View::U, 0.0, 1.0));
        graph.add_cluster(b, line_cluster(View::V, 0.0, 1.0));
        assert!(matches!(
            two_d_separation(&graph, a, b),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn three_d_separation_is_min_set_distance() {
        let mut graph = EventGraph::new();
        let a = graph.add_particle(13, Vector3::zeros());
        let b = graph.add_particle(2212, Vector3::zeros());
        graph.add_cluster(a, line_cluster(View::ThreeD, 0.0, 1.0));
        assert!(three_d_separation(&graph, a, b).is_err());

        graph.add_cluster(b, line_cluster(View::ThreeD, 3.0, 4.0));
        assert!((three_d_separation(&graph, a, b).unwrap() - 2.0).abs() < 1e-5);
    }
}
