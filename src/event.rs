//! Event data model: hits, view-tagged clusters and the particle hierarchy.
//!
//! Particles live in an arena owned by [`EventGraph`] and are addressed by
//! stable [`ParticleId`] indices. Parent/daughter links are kept as separate
//! adjacency lists on each node; [`EventGraph::link`] maintains both sides so
//! that the mutual-consistency invariant (if A lists B as daughter, B lists A
//! as parent) holds by construction. The graph is filled once by the upstream
//! pattern-recognition stage and is read-only to every algorithm in this
//! crate.

use crate::error::{Error, Result};
use crate::types::View;
use nalgebra::Vector3;
use serde::Serialize;

/// Single charge-deposition measurement, 2D (one wire projection) or 3D.
///
/// 2D hits follow the usual wire-plane convention: x is the drift coordinate,
/// z the wire coordinate, y unused.
#[derive(Clone, Debug)]
pub struct Hit {
    pub position: Vector3<f32>,
    /// Index of the originating lower-level hit, if any. Used only for
    /// cross-referencing by the host framework, never interpreted here.
    pub parent_hit: Option<usize>,
    pub is_isolated: bool,
}

impl Hit {
    pub fn new(position: Vector3<f32>) -> Self {
        Self {
            position,
            parent_hit: None,
            is_isolated: false,
        }
    }
}

/// View-homogeneous ordered collection of hits belonging to one particle.
#[derive(Clone, Debug)]
pub struct Cluster {
    view: View,
    hits: Vec<Hit>,
}

impl Cluster {
    pub fn new(view: View, hits: Vec<Hit>) -> Self {
        Self { view, hits }
    }

    #[inline]
    pub fn view(&self) -> View {
        self.view
    }

    #[inline]
    pub fn hits(&self) -> &[Hit] {
        &self.hits
    }

    #[inline]
    pub fn n_hits(&self) -> usize {
        self.hits.len()
    }

    /// Hits flagged as isolated by the upstream clustering stage.
    pub fn isolated_hits(&self) -> impl Iterator<Item = &Hit> {
        self.hits.iter().filter(|h| h.is_isolated)
    }
}

/// Stable arena index of a particle within an [`EventGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ParticleId(pub usize);

/// Reconstructed particle-flow candidate.
#[derive(Clone, Debug)]
pub struct Particle {
    pdg: i32,
    momentum: Vector3<f32>,
    clusters: Vec<Cluster>,
    parents: Vec<ParticleId>,
    daughters: Vec<ParticleId>,
    vertices: Vec<Vector3<f32>>,
}

impl Particle {
    /// Signed PDG-like particle-type code assigned by pattern recognition.
    #[inline]
    pub fn pdg(&self) -> i32 {
        self.pdg
    }

    #[inline]
    pub fn momentum(&self) -> &Vector3<f32> {
        &self.momentum
    }

    #[inline]
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    #[inline]
    pub fn parents(&self) -> &[ParticleId] {
        &self.parents
    }

    #[inline]
    pub fn daughters(&self) -> &[ParticleId] {
        &self.daughters
    }

    #[inline]
    pub fn vertices(&self) -> &[Vector3<f32>] {
        &self.vertices
    }
}

/// Arena of particles with parent/daughter adjacency lists.
#[derive(Clone, Debug, Default)]
pub struct EventGraph {
    particles: Vec<Particle>,
}

impl EventGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a particle with no links, clusters or vertices and returns its id.
    pub fn add_particle(&mut self, pdg: i32, momentum: Vector3<f32>) -> ParticleId {
        self.particles.push(Particle {
            pdg,
            momentum,
            clusters: Vec::new(),
            parents: Vec::new(),
            daughters: Vec::new(),
            vertices: Vec::new(),
        });
        ParticleId(self.particles.len() - 1)
    }

    pub fn add_cluster(&mut self, id: ParticleId, cluster: Cluster) {
        self.particles[id.0].clusters.push(cluster);
    }

    pub fn add_vertex(&mut self, id: ParticleId, position: Vector3<f32>) {
        self.particles[id.0].vertices.push(position);
    }

    /// Records a parent/daughter relationship, updating both adjacency lists.
    pub fn link(&mut self, parent: ParticleId, daughter: ParticleId) {
        self.particles[parent.0].daughters.push(daughter);
        self.particles[daughter.0].parents.push(parent);
    }

    #[inline]
    pub fn particle(&self, id: ParticleId) -> &Particle {
        &self.particles[id.0]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// All particle ids in arena order.
    pub fn ids(&self) -> impl Iterator<Item = ParticleId> {
        (0..self.particles.len()).map(ParticleId)
    }

    /// The particle's interaction vertex, if one was reconstructed.
    ///
    /// More than one vertex on a single particle is an input-data error.
    pub fn vertex_of(&self, id: ParticleId) -> Result<Option<Vector3<f32>>> {
        let vertices = self.particles[id.0].vertices();
        match vertices {
            [] => Ok(None),
            [v] => Ok(Some(*v)),
            _ => Err(Error::InvalidParameter("particle has more than one vertex")),
        }
    }
}
