use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Detector readout view: one of the three 2D wire projections, or the
/// merged 3D reconstruction space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum View {
    U,
    V,
    W,
    ThreeD,
}

impl View {
    /// The three 2D wire projections, in canonical order.
    pub const TWO_D: [View; 3] = [View::U, View::V, View::W];

    /// Whether this view is a 2D wire projection.
    #[inline]
    pub fn is_two_d(self) -> bool {
        !matches!(self, View::ThreeD)
    }
}

/// Position/direction sample along a fitted trajectory.
///
/// Produced only by trajectory extraction; samples are ordered by signed
/// longitudinal displacement from the particle vertex along the fitted axis.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct TrackState {
    pub position: Vector3<f32>,
    pub direction: Vector3<f32>,
}
