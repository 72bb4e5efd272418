//! Cluster-level geometric primitives.
//!
//! These operate on single clusters or cluster sets and are consumed by the
//! particle-level metrics and by trajectory extraction. Distances are plain
//! Euclidean distances between hit positions; extremal coordinates use the
//! candidate-pair search over per-axis extremes rather than an exhaustive
//! O(n²) scan.

pub mod sliding_fit;

use crate::error::{Error, Result};
use crate::event::Cluster;
use nalgebra::Vector3;

/// Squared span of a cluster: squared distance between its two most
/// separated hits. Zero for clusters with fewer than two hits.
pub fn length_squared(cluster: &Cluster) -> f32 {
    match extremal_coordinates(std::iter::once(cluster)) {
        Ok((min, max)) => (max - min).norm_squared(),
        Err(_) => 0.0,
    }
}

/// Minimum hit-to-hit distance between two clusters.
///
/// Fails `NotFound` if either cluster is empty.
pub fn closest_distance(lhs: &Cluster, rhs: &Cluster) -> Result<f32> {
    if lhs.hits().is_empty() || rhs.hits().is_empty() {
        return Err(Error::NotFound("closest distance over an empty cluster"));
    }

    let mut best = f32::MAX;
    for a in lhs.hits() {
        for b in rhs.hits() {
            let d = (a.position - b.position).norm();
            if d < best {
                best = d;
            }
        }
    }
    Ok(best)
}

/// Minimum closest-distance over all cluster pairs drawn from two sets.
///
/// Fails `NotFound` if no pair of non-empty clusters exists.
pub fn closest_distance_between_sets(lhs: &[&Cluster], rhs: &[&Cluster]) -> Result<f32> {
    let mut best: Option<f32> = None;
    for a in lhs {
        for b in rhs {
            match closest_distance(a, b) {
                Ok(d) => best = Some(best.map_or(d, |current| current.min(d))),
                Err(e) if e.is_fatal() => return Err(e),
                Err(_) => {}
            }
        }
    }
    best.ok_or(Error::NotFound("closest distance over empty cluster sets"))
}

/// The two most separated hit positions across a set of clusters.
///
/// Candidates are the per-axis minimum and maximum hits; the returned pair is
/// the candidate pair with the largest separation, ordered by (z, x, y)
/// ascending. Fails `NotFound` on an empty hit set.
pub fn extremal_coordinates<'a, I>(clusters: I) -> Result<(Vector3<f32>, Vector3<f32>)>
where
    I: IntoIterator<Item = &'a Cluster>,
{
    extremal_coordinates_of_positions(
        clusters
            .into_iter()
            .flat_map(|c| c.hits().iter().map(|h| h.position)),
    )
}

/// As [`extremal_coordinates`], over raw positions.
pub fn extremal_coordinates_of_positions<I>(positions: I) -> Result<(Vector3<f32>, Vector3<f32>)>
where
    I: IntoIterator<Item = Vector3<f32>>,
{
    let mut candidates: [Option<Vector3<f32>>; 6] = [None; 6];

    for p in positions {
        for axis in 0..3 {
            let lo = &mut candidates[2 * axis];
            if lo.map_or(true, |c| p[axis] < c[axis]) {
                *lo = Some(p);
            }
            let hi = &mut candidates[2 * axis + 1];
            if hi.map_or(true, |c| p[axis] > c[axis]) {
                *hi = Some(p);
            }
        }
    }

    let candidates: Vec<Vector3<f32>> = candidates.iter().flatten().copied().collect();
    if candidates.is_empty() {
        return Err(Error::NotFound("extremal coordinates of an empty hit set"));
    }

    let mut best = (candidates[0], candidates[0]);
    let mut best_d2 = 0.0f32;
    for (i, a) in candidates.iter().enumerate() {
        for b in candidates.iter().skip(i + 1) {
            let d2 = (a - b).norm_squared();
            if d2 > best_d2 {
                best_d2 = d2;
                best = (*a, *b);
            }
        }
    }

    let (a, b) = best;
    if (a.z, a.x, a.y) <= (b.z, b.x, b.y) {
        Ok((a, b))
    } else {
        Ok((b, a))
    }
}
