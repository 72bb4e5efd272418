//! Particle-level helpers over the event graph.
//!
//! Grouped by concern: hit/cluster aggregation across views, hierarchy
//! traversal (connected components, downstream subtrees, final-state and
//! neutrino lookups), PDG-based classification, size ordering, and the
//! geometric metrics built on the cluster primitives.

pub mod aggregation;
pub mod classify;
pub mod metrics;
pub mod ordering;
pub mod traversal;

pub use aggregation::{
    clusters_in_view, clusters_in_view_for, hits_in_view, isolated_hits_in_view, three_d_clusters,
};
pub use classify::{is_neutrino, is_shower, is_track};
pub use metrics::{
    closest_distance, three_d_length_squared, three_d_separation, two_d_length_squared,
    two_d_separation,
};
pub use ordering::{n_three_d_hits, sort_by_n_hits, sort_particles};
pub use traversal::{
    all_connected_pfos, all_downstream_pfos, is_final_state, is_neutrino_final_state,
    parent_neutrino, parent_pfo, primary_neutrino,
};
