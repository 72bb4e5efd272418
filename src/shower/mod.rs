//! Shower characterisation: PCA axes, derived length and opening angle, and
//! the assembled shower parameter block handed to output assembly.

pub mod pca;

pub use pca::{run_pca, PrincipalComponents};

use crate::error::{Error, Result};
use crate::event::{EventGraph, ParticleId};
use crate::geometry::sliding_fit::ThreeDSlidingFit;
use crate::pfo::aggregation::three_d_clusters;
use crate::pfo::classify::is_shower;
use crate::pfo::traversal::is_final_state;
use log::debug;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Knobs of the shower builder.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct ShowerParams {
    /// Build showers from all non-final-state particles instead of only
    /// shower-like ones (cosmic-ray processing).
    pub cosmic_mode: bool,
    /// Half-window of the sliding fit used for the layer extent.
    pub half_window: u32,
    /// Longitudinal layer pitch (cm) of that fit.
    pub pitch: f32,
}

impl Default for ShowerParams {
    fn default() -> Self {
        Self {
            cosmic_mode: false,
            half_window: 20,
            pitch: 0.3,
        }
    }
}

/// PCA-derived shower descriptors for one particle.
///
/// `length`, `opening_angle` and the layer extent are populated only when
/// their derivation succeeds; a recoverable failure leaves them unset
/// without discarding the axes.
#[derive(Clone, Debug, Serialize)]
pub struct ShowerParameters {
    pub vertex: Vector3<f32>,
    pub centroid: Vector3<f32>,
    pub direction: Vector3<f32>,
    pub secondary_axis: Vector3<f32>,
    pub tertiary_axis: Vector3<f32>,
    pub eigenvalues: Vector3<f32>,
    pub length: Option<Vector3<f32>>,
    pub opening_angle: Option<f32>,
    pub min_layer_position: Option<Vector3<f32>>,
    pub max_layer_position: Option<Vector3<f32>>,
}

/// Per-axis shower length, `6·sqrt(eigenvalue)`.
///
/// The principal eigenvalue must be strictly positive (`InvalidParameter`
/// otherwise); non-positive secondary/tertiary eigenvalues contribute zero.
pub fn shower_length(eigenvalues: &[f32; 3]) -> Result<Vector3<f32>> {
    if eigenvalues[0] <= 0.0 {
        return Err(Error::InvalidParameter(
            "principal eigenvalue is not positive",
        ));
    }
    let axis_length = |value: f32| if value > 0.0 { 6.0 * value.sqrt() } else { 0.0 };
    Ok(Vector3::new(
        6.0 * eigenvalues[0].sqrt(),
        axis_length(eigenvalues[1]),
        axis_length(eigenvalues[2]),
    ))
}

/// Opening angle between the principal and secondary shower axes, weighted
/// by the eigenvalue ratio: `atan(sqrt(λ₂/λ₁)·sinθ)`.
///
/// Returns zero when the secondary axis or eigenvalue is degenerate; fails
/// `InvalidParameter` when the principal axis or eigenvalue is degenerate,
/// or when the inter-axis cosine exceeds unity.
pub fn opening_angle(
    principal: &Vector3<f32>,
    secondary: &Vector3<f32>,
    eigenvalues: &[f32; 3],
) -> Result<f32> {
    let principal_magnitude = principal.norm();
    let secondary_magnitude = secondary.norm();

    if principal_magnitude < f32::EPSILON {
        return Err(Error::InvalidParameter("principal eigenvector is null"));
    }
    if secondary_magnitude < f32::EPSILON {
        return Ok(0.0);
    }

    let cos_theta = principal.dot(secondary) / (principal_magnitude * secondary_magnitude);
    if cos_theta > 1.0 {
        return Err(Error::InvalidParameter("inter-axis cosine exceeds unity"));
    }
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

    if eigenvalues[0].abs() < f32::EPSILON {
        return Err(Error::InvalidParameter("principal eigenvalue is null"));
    }
    if eigenvalues[1].abs() < f32::EPSILON {
        return Ok(0.0);
    }

    Ok((eigenvalues[1].sqrt() * sin_theta / eigenvalues[0].sqrt()).atan())
}

/// Assembles the shower parameter block for one particle.
///
/// Returns `Ok(None)` when the particle is not selected (no vertex, wrong
/// particle class for the current mode, no 3D hits) or when the PCA itself
/// fails recoverably. Derived quantities that fail recoverably are left
/// unset; the fatal `Failure` kind always propagates.
pub fn build_shower(
    graph: &EventGraph,
    id: ParticleId,
    params: ShowerParams,
) -> Result<Option<ShowerParameters>> {
    // A vertex is required to anchor the shower propagation direction.
    let Some(vertex) = graph.vertex_of(id)? else {
        return Ok(None);
    };

    if params.cosmic_mode {
        if is_final_state(graph, id) {
            return Ok(None);
        }
    } else if !is_shower(graph.particle(id).pdg()) {
        return Ok(None);
    }

    let clusters = three_d_clusters(graph, id);
    let Some(cluster) = clusters.first() else {
        return Ok(None);
    };

    let hit_refs: Vec<_> = cluster.hits().iter().collect();
    let components = match run_pca(&hit_refs) {
        Ok(components) => components,
        Err(e) if e.is_fatal() => return Err(e),
        Err(e) => {
            debug!("shower PCA skipped particle {id:?}: {e}");
            return Ok(None);
        }
    };

    let mut parameters = ShowerParameters {
        vertex,
        centroid: components.centroid,
        direction: components.axes[0],
        secondary_axis: components.axes[1],
        tertiary_axis: components.axes[2],
        eigenvalues: Vector3::new(
            components.eigenvalues[0],
            components.eigenvalues[1],
            components.eigenvalues[2],
        ),
        length: None,
        opening_angle: None,
        min_layer_position: None,
        max_layer_position: None,
    };

    match shower_length(&components.eigenvalues) {
        Ok(length) => {
            parameters.length = Some(length);
            match opening_angle(
                &components.axes[0],
                &components.axes[1],
                &components.eigenvalues,
            ) {
                Ok(angle) => parameters.opening_angle = Some(angle),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => debug!("shower opening angle unset for {id:?}: {e}"),
            }
        }
        Err(e) if e.is_fatal() => return Err(e),
        Err(e) => debug!("shower length unset for {id:?}: {e}"),
    }

    match ThreeDSlidingFit::new(cluster.hits(), params.half_window, params.pitch) {
        Ok(fit) => {
            parameters.min_layer_position = fit.min_layer_position().ok();
            parameters.max_layer_position = fit.max_layer_position().ok();
        }
        Err(e) if e.is_fatal() => return Err(e),
        Err(e) => debug!("shower layer extent unset for {id:?}: {e}"),
    }

    Ok(Some(parameters))
}
