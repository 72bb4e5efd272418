//! Synthetic particle graphs shared by the integration tests.

use nalgebra::Vector3;
use pfo_analysis::{Cluster, EventGraph, Hit, ParticleId, View};

/// A straight 3D hit line from `start`, stepping by `step`, `n` hits long.
pub fn line_hits(start: Vector3<f32>, step: Vector3<f32>, n: usize) -> Vec<Hit> {
    (0..n)
        .map(|i| Hit::new(start + step * i as f32))
        .collect()
}

/// Adds a particle with one 3D line cluster, a matching momentum and a
/// vertex at the line start.
pub fn add_line_particle(
    graph: &mut EventGraph,
    pdg: i32,
    start: Vector3<f32>,
    step: Vector3<f32>,
    n: usize,
) -> ParticleId {
    let id = graph.add_particle(pdg, step);
    graph.add_cluster(id, Cluster::new(View::ThreeD, line_hits(start, step, n)));
    graph.add_vertex(id, start);
    id
}

/// Ids of the particles in [`neutrino_event`], in creation order.
pub struct NeutrinoEvent {
    pub graph: EventGraph,
    pub neutrino: ParticleId,
    pub muon: ParticleId,
    pub proton: ParticleId,
    pub electron: ParticleId,
}

/// A charged-current-like hierarchy: a muon neutrino root with a long muon
/// track, a short proton stub off the muon, and an electron shower.
pub fn neutrino_event() -> NeutrinoEvent {
    let mut graph = EventGraph::new();

    let neutrino = graph.add_particle(14, Vector3::new(0.0, 0.0, 1.0));
    let muon = add_line_particle(
        &mut graph,
        13,
        Vector3::zeros(),
        Vector3::new(0.0, 0.0, 1.0),
        30,
    );
    let proton = add_line_particle(
        &mut graph,
        2212,
        Vector3::new(0.0, 0.0, 29.0),
        Vector3::new(0.5, 0.0, 0.5),
        5,
    );
    let electron = add_line_particle(
        &mut graph,
        11,
        Vector3::zeros(),
        Vector3::new(0.0, 1.0, 0.3),
        12,
    );

    // Give the 2D views something to measure.
    for &(id, span) in &[(muon, 30.0f32), (proton, 3.0), (electron, 12.0)] {
        for view in View::TWO_D {
            graph.add_cluster(
                id,
                Cluster::new(
                    view,
                    vec![
                        Hit::new(Vector3::zeros()),
                        Hit::new(Vector3::new(0.0, 0.0, span)),
                    ],
                ),
            );
        }
    }

    graph.link(neutrino, muon);
    graph.link(neutrino, electron);
    graph.link(muon, proton);

    NeutrinoEvent {
        graph,
        neutrino,
        muon,
        proton,
        electron,
    }
}
