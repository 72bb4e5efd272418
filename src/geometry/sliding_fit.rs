//! Sliding-window linear trajectory fit over an ordered 3D hit sequence.
//!
//! The fit orders hits by longitudinal displacement along the axis joining
//! the two extremal hits, buckets them into layers of configurable pitch, and
//! answers per-displacement queries (global fit position and direction) from
//! a local least-squares line over a window of neighbouring layers. Queries
//! that land in an empty window fail with the recoverable `NotFound` kind so
//! that callers can skip individual hits without aborting a whole cluster.

use crate::error::{Error, Result};
use crate::event::Hit;
use crate::geometry::extremal_coordinates_of_positions;
use nalgebra::Vector3;

/// Local linear fit over successive windows of an ordered 3D hit sequence.
#[derive(Clone, Debug)]
pub struct ThreeDSlidingFit {
    axis_origin: Vector3<f32>,
    axis: Vector3<f32>,
    pitch: f32,
    half_window: i32,
    /// (layer, longitudinal displacement, position), sorted by displacement.
    samples: Vec<(i32, f32, Vector3<f32>)>,
}

impl ThreeDSlidingFit {
    /// Builds the fit from a hit sequence.
    ///
    /// Fails `InvalidParameter` for a non-positive pitch or zero window, and
    /// `NotFound` for an empty or zero-extent hit set.
    pub fn new(hits: &[Hit], half_window: u32, pitch: f32) -> Result<Self> {
        if pitch <= 0.0 {
            return Err(Error::InvalidParameter("sliding fit pitch must be positive"));
        }
        if half_window == 0 {
            return Err(Error::InvalidParameter("sliding fit window must be non-zero"));
        }

        let (min_pos, max_pos) =
            extremal_coordinates_of_positions(hits.iter().map(|h| h.position))?;
        let span = max_pos - min_pos;
        if span.norm_squared() < f32::EPSILON {
            return Err(Error::NotFound("sliding fit axis is degenerate"));
        }
        let axis = span.normalize();

        let mut samples: Vec<(i32, f32, Vector3<f32>)> = hits
            .iter()
            .map(|hit| {
                let rl = (hit.position - min_pos).dot(&axis);
                ((rl / pitch).floor() as i32, rl, hit.position)
            })
            .collect();
        samples.sort_by(|a, b| a.1.total_cmp(&b.1));

        Ok(Self {
            axis_origin: min_pos,
            axis,
            pitch,
            half_window: half_window as i32,
            samples,
        })
    }

    /// Longitudinal displacement of an arbitrary position along the fit axis.
    #[inline]
    pub fn longitudinal_displacement(&self, position: &Vector3<f32>) -> f32 {
        (position - self.axis_origin).dot(&self.axis)
    }

    /// Global fit position at longitudinal displacement `rl`.
    pub fn fit_position(&self, rl: f32) -> Result<Vector3<f32>> {
        let (centroid, mean_rl, slope) = self.window_fit(rl)?;
        Ok(centroid + slope * (rl - mean_rl))
    }

    /// Global (unit) fit direction at longitudinal displacement `rl`.
    ///
    /// Falls back to the global axis when the window is too short to carry a
    /// slope of its own (single layer or a zero-extent window).
    pub fn fit_direction(&self, rl: f32) -> Result<Vector3<f32>> {
        let (_, _, slope) = self.window_fit(rl)?;
        let norm = slope.norm();
        if norm < f32::EPSILON {
            return Ok(self.axis);
        }
        Ok(slope / norm)
    }

    /// Global fit position at the lowest-displacement end of the hit sequence.
    pub fn min_layer_position(&self) -> Result<Vector3<f32>> {
        self.fit_position(self.samples.first().map(|s| s.1).unwrap_or(0.0))
    }

    /// Global fit position at the highest-displacement end of the hit sequence.
    pub fn max_layer_position(&self) -> Result<Vector3<f32>> {
        self.fit_position(self.samples.last().map(|s| s.1).unwrap_or(0.0))
    }

    /// Least-squares line over the window of layers around `rl`: returns the
    /// window centroid, its mean displacement, and d(position)/d(rl).
    fn window_fit(&self, rl: f32) -> Result<(Vector3<f32>, f32, Vector3<f32>)> {
        let layer = (rl / self.pitch).floor() as i32;
        let lo = layer - self.half_window;
        let hi = layer + self.half_window;

        let mut n = 0usize;
        let mut sum_rl = 0.0f32;
        let mut sum_pos = Vector3::zeros();
        for &(sample_layer, sample_rl, position) in &self.samples {
            if sample_layer < lo || sample_layer > hi {
                continue;
            }
            n += 1;
            sum_rl += sample_rl;
            sum_pos += position;
        }
        if n == 0 {
            return Err(Error::NotFound("no hits in sliding fit window"));
        }

        let mean_rl = sum_rl / n as f32;
        let centroid = sum_pos / n as f32;

        let mut cov = Vector3::zeros();
        let mut var = 0.0f32;
        for &(sample_layer, sample_rl, position) in &self.samples {
            if sample_layer < lo || sample_layer > hi {
                continue;
            }
            let d = sample_rl - mean_rl;
            cov += (position - centroid) * d;
            var += d * d;
        }

        let slope = if var < f32::EPSILON {
            self.axis
        } else {
            cov / var
        };
        Ok((centroid, mean_rl, slope))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_hits(n: usize) -> Vec<Hit> {
        (0..n)
            .map(|i| Hit::new(Vector3::new(0.0, 0.0, i as f32)))
            .collect()
    }

    #[test]
    fn collinear_hits_reproduce_positions_and_axis() {
        let hits = line_hits(3);
        let fit = ThreeDSlidingFit::new(&hits, 1, 1.0).unwrap();

        for hit in &hits {
            let rl = fit.longitudinal_displacement(&hit.position);
            let position = fit.fit_position(rl).unwrap();
            assert!((position - hit.position).norm() < 1e-5);
            let direction = fit.fit_direction(rl).unwrap();
            assert!((direction - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-5);
        }
    }

    #[test]
    fn layer_extent_endpoints() {
        let hits = line_hits(5);
        let fit = ThreeDSlidingFit::new(&hits, 2, 1.0).unwrap();
        assert!((fit.min_layer_position().unwrap().z - 0.0).abs() < 1e-5);
        assert!((fit.max_layer_position().unwrap().z - 4.0).abs() < 1e-5);
    }

    #[test]
    fn degenerate_inputs_are_rejected() {
        let hits = line_hits(3);
        assert!(matches!(
            ThreeDSlidingFit::new(&hits, 1, 0.0),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            ThreeDSlidingFit::new(&hits, 0, 1.0),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            ThreeDSlidingFit::new(&[], 1, 1.0),
            Err(Error::NotFound(_))
        ));

        let stacked = vec![Hit::new(Vector3::zeros()), Hit::new(Vector3::zeros())];
        assert!(matches!(
            ThreeDSlidingFit::new(&stacked, 1, 1.0),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn query_outside_fitted_range_is_recoverable() {
        let hits = line_hits(3);
        let fit = ThreeDSlidingFit::new(&hits, 1, 1.0).unwrap();
        let err = fit.fit_position(100.0).unwrap_err();
        assert!(!err.is_fatal());
    }
}
