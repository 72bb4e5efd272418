//! Total ordering of particles by reconstructed size.

use crate::event::{EventGraph, ParticleId};
use crate::pfo::aggregation::three_d_clusters;
use crate::pfo::metrics::two_d_length_squared;
use std::cmp::Ordering;

/// Total hit count over the particle's 3D clusters.
pub fn n_three_d_hits(graph: &EventGraph, id: ParticleId) -> usize {
    three_d_clusters(graph, id).iter().map(|c| c.n_hits()).sum()
}

/// Orders particles by 3D hit count descending, breaking ties by 2D
/// length-squared descending. A strict weak ordering, usable by any sort.
pub fn sort_by_n_hits(graph: &EventGraph, lhs: ParticleId, rhs: ParticleId) -> Ordering {
    let n_lhs = n_three_d_hits(graph, lhs);
    let n_rhs = n_three_d_hits(graph, rhs);
    if n_lhs != n_rhs {
        return n_rhs.cmp(&n_lhs);
    }
    two_d_length_squared(graph, rhs).total_cmp(&two_d_length_squared(graph, lhs))
}

/// Sorts a particle list largest-first by [`sort_by_n_hits`].
pub fn sort_particles(graph: &EventGraph, ids: &mut [ParticleId]) {
    ids.sort_by(|&a, &b| sort_by_n_hits(graph, a, b));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Cluster, Hit};
    use crate::types::View;
    use nalgebra::Vector3;

    fn particle(graph: &mut EventGraph, n_three_d: usize, two_d_span: f32) -> ParticleId {
        let id = graph.add_particle(13, Vector3::zeros());
        let hits = (0..n_three_d)
            .map(|i| Hit::new(Vector3::new(0.0, 0.0, i as f32)))
            .collect();
        graph.add_cluster(id, Cluster::new(View::ThreeD, hits));
        graph.add_cluster(
            id,
            Cluster::new(
                View::U,
                vec![
                    Hit::new(Vector3::zeros()),
                    Hit::new(Vector3::new(0.0, 0.0, two_d_span)),
                ],
            ),
        );
        id
    }

    #[test]
    fn hit_count_dominates_then_length_breaks_ties() {
        let mut graph = EventGraph::new();
        let big = particle(&mut graph, 10, 1.0);
        let small = particle(&mut graph, 2, 9.0);
        let long_small = particle(&mut graph, 2, 20.0);

        let mut ids = vec![small, big, long_small];
        sort_particles(&graph, &mut ids);
        assert_eq!(ids, vec![big, long_small, small]);
    }

    #[test]
    fn ordering_is_strict_and_transitive() {
        let mut graph = EventGraph::new();
        let a = particle(&mut graph, 5, 1.0);
        let b = particle(&mut graph, 3, 1.0);
        let c = particle(&mut graph, 1, 1.0);

        assert_eq!(sort_by_n_hits(&graph, a, a), Ordering::Equal);
        assert_eq!(sort_by_n_hits(&graph, a, b), Ordering::Less);
        assert_eq!(sort_by_n_hits(&graph, b, c), Ordering::Less);
        assert_eq!(sort_by_n_hits(&graph, a, c), Ordering::Less);
        assert_eq!(sort_by_n_hits(&graph, c, a), Ordering::Greater);
    }
}
