//! Hierarchy traversal: connected components, downstream subtrees, and
//! parent/primary-neutrino lookups.
//!
//! All walks are iterative over an explicit stack with a per-graph visited
//! mask, so recursion depth is bounded regardless of hierarchy depth and a
//! malformed cyclic input terminates rather than recursing forever. The
//! parent-chain walk additionally carries an explicit hop guard and rejects
//! cycles with `InvalidParameter` instead of trusting upstream acyclicity.

use crate::error::{Error, Result};
use crate::event::{EventGraph, ParticleId};
use crate::pfo::classify::is_neutrino;

/// Connected closure of the seed set over both parent and daughter links.
///
/// Idempotent: applying it to its own output returns the same component.
/// Output order is deterministic (seed order, then discovery order).
pub fn all_connected_pfos(graph: &EventGraph, seeds: &[ParticleId]) -> Vec<ParticleId> {
    collect(graph, seeds, true)
}

/// Strictly-downstream closure of the seed set (daughter links only).
pub fn all_downstream_pfos(graph: &EventGraph, seeds: &[ParticleId]) -> Vec<ParticleId> {
    collect(graph, seeds, false)
}

fn collect(graph: &EventGraph, seeds: &[ParticleId], follow_parents: bool) -> Vec<ParticleId> {
    let mut visited = vec![false; graph.len()];
    let mut out = Vec::new();
    let mut stack = Vec::new();

    for &seed in seeds {
        stack.push(seed);
        while let Some(id) = stack.pop() {
            if visited[id.0] {
                continue;
            }
            visited[id.0] = true;
            out.push(id);

            let particle = graph.particle(id);
            if follow_parents {
                stack.extend(particle.parents().iter().rev());
            }
            stack.extend(particle.daughters().iter().rev());
        }
    }
    out
}

/// Whether the particle is a final-state candidate: parentless and not
/// itself a neutrino, or the direct daughter of a neutrino. A parentless
/// neutrino is the interaction root, not a final state.
pub fn is_final_state(graph: &EventGraph, id: ParticleId) -> bool {
    let particle = graph.particle(id);
    if particle.parents().is_empty() && !is_neutrino(particle.pdg()) {
        return true;
    }
    is_neutrino_final_state(graph, id)
}

/// Whether the particle's sole parent is a neutrino.
pub fn is_neutrino_final_state(graph: &EventGraph, id: ParticleId) -> bool {
    match graph.particle(id).parents() {
        [parent] => is_neutrino(graph.particle(*parent).pdg()),
        _ => false,
    }
}

/// Walks parent links to the root of the hierarchy.
///
/// Errors `InvalidParameter` if any node on the chain has more than one
/// parent, or if the chain revisits a node (cyclic input).
pub fn parent_pfo(graph: &EventGraph, id: ParticleId) -> Result<ParticleId> {
    let mut current = id;
    let mut hops = 0usize;
    loop {
        match graph.particle(current).parents() {
            [] => return Ok(current),
            [parent] => current = *parent,
            _ => return Err(Error::InvalidParameter("particle has more than one parent")),
        }
        hops += 1;
        if hops > graph.len() {
            return Err(Error::InvalidParameter("cycle in parent links"));
        }
    }
}

/// The root of the hierarchy, which must be a neutrino.
///
/// Errors `NotFound` if the root carries a non-neutrino code.
pub fn parent_neutrino(graph: &EventGraph, id: ParticleId) -> Result<ParticleId> {
    let root = parent_pfo(graph, id)?;
    if !is_neutrino(graph.particle(root).pdg()) {
        return Err(Error::NotFound("hierarchy root is not a neutrino"));
    }
    Ok(root)
}

/// Signed PDG code of the neutrino at the root of the hierarchy, or the
/// sentinel `0` when there is none. Never errors: the absent-neutrino and
/// malformed-chain outcomes are both folded into the sentinel.
pub fn primary_neutrino(graph: &EventGraph, id: ParticleId) -> i32 {
    parent_neutrino(graph, id)
        .map(|root| graph.particle(root).pdg())
        .unwrap_or(0)
}
