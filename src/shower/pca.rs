//! Principal-component analysis of a 3D hit cloud.
//!
//! Accumulation runs in `f64` before the symmetric 3×3 second-moment matrix
//! is normalised by the weight sum and decomposed. All hits currently carry
//! unit weight; the weight sum is kept explicit as the generalisation point
//! for charge-weighted variants.

use crate::error::{Error, Result};
use crate::event::Hit;
use log::debug;
use nalgebra::{Matrix3, SymmetricEigen, Vector3};

const MAX_EIGEN_ITERATIONS: usize = 100;

/// Centroid, orthogonal axes and eigenvalues of a 3D hit cloud, with axes
/// ordered principal-first (eigenvalues descending).
#[derive(Clone, Debug)]
pub struct PrincipalComponents {
    pub centroid: Vector3<f32>,
    pub axes: [Vector3<f32>; 3],
    pub eigenvalues: [f32; 3],
    pub n_hits: usize,
}

/// Runs the PCA over a hit cloud.
///
/// Fails `NotFound` on an empty cloud, `InvalidParameter` when the weight
/// sum is numerically zero or the eigendecomposition does not converge.
pub fn run_pca(hits: &[&Hit]) -> Result<PrincipalComponents> {
    if hits.is_empty() {
        return Err(Error::NotFound("no 3D hits for PCA"));
    }

    let mut mean = [0.0f64; 3];
    for hit in hits {
        mean[0] += f64::from(hit.position.x);
        mean[1] += f64::from(hit.position.y);
        mean[2] += f64::from(hit.position.z);
    }
    let n = hits.len() as f64;
    mean[0] /= n;
    mean[1] /= n;
    mean[2] /= n;
    let centroid = Vector3::new(mean[0] as f32, mean[1] as f32, mean[2] as f32);

    let mut xx = 0.0f64;
    let mut xy = 0.0f64;
    let mut xz = 0.0f64;
    let mut yy = 0.0f64;
    let mut yz = 0.0f64;
    let mut zz = 0.0f64;
    let mut weight_sum = 0.0f64;

    for hit in hits {
        let weight = 1.0f64;
        let x = (f64::from(hit.position.x) - mean[0]) * weight;
        let y = (f64::from(hit.position.y) - mean[1]) * weight;
        let z = (f64::from(hit.position.z) - mean[2]) * weight;
        xx += x * x;
        xy += x * y;
        xz += x * z;
        yy += y * y;
        yz += y * z;
        zz += z * z;
        weight_sum += weight * weight;
    }

    if weight_sum.abs() < f64::EPSILON {
        return Err(Error::InvalidParameter("zero total hit weight in PCA"));
    }

    let second_moment = Matrix3::new(
        (xx / weight_sum) as f32,
        (xy / weight_sum) as f32,
        (xz / weight_sum) as f32,
        (xy / weight_sum) as f32,
        (yy / weight_sum) as f32,
        (yz / weight_sum) as f32,
        (xz / weight_sum) as f32,
        (yz / weight_sum) as f32,
        (zz / weight_sum) as f32,
    );

    let Some(eigen) = SymmetricEigen::try_new(second_moment, f32::EPSILON, MAX_EIGEN_ITERATIONS)
    else {
        debug!("PCA eigendecomposition did not converge over {} hits", hits.len());
        return Err(Error::InvalidParameter("PCA eigendecomposition failed"));
    };

    // Stable descending sort of the eigenpairs by value.
    let mut order = [0usize, 1, 2];
    order.sort_by(|&l, &r| eigen.eigenvalues[r].total_cmp(&eigen.eigenvalues[l]));

    let eigenvalues = [
        eigen.eigenvalues[order[0]],
        eigen.eigenvalues[order[1]],
        eigen.eigenvalues[order[2]],
    ];
    let axes = [
        eigen.eigenvectors.column(order[0]).into_owned(),
        eigen.eigenvectors.column(order[1]).into_owned(),
        eigen.eigenvectors.column(order[2]).into_owned(),
    ];

    Ok(PrincipalComponents {
        centroid,
        axes,
        eigenvalues,
        n_hits: hits.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cloud(positions: &[[f32; 3]]) -> Vec<Hit> {
        positions
            .iter()
            .map(|p| Hit::new(Vector3::new(p[0], p[1], p[2])))
            .collect()
    }

    #[test]
    fn empty_cloud_is_not_found() {
        assert!(matches!(run_pca(&[]), Err(Error::NotFound(_))));
    }

    #[test]
    fn axis_aligned_ellipsoid_recovers_analytic_axes() {
        // ±2 along z, ±1 along x, ±0.5 along y, centred at the origin:
        // covariance is diagonal with eigenvalues (8, 2, 0.5) / 6.
        let hits = cloud(&[
            [0.0, 0.0, 2.0],
            [0.0, 0.0, -2.0],
            [1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, 0.5, 0.0],
            [0.0, -0.5, 0.0],
        ]);
        let refs: Vec<&Hit> = hits.iter().collect();
        let pca = run_pca(&refs).unwrap();

        assert!(pca.centroid.norm() < 1e-5);
        assert!((pca.eigenvalues[0] - 8.0 / 6.0).abs() < 1e-4);
        assert!((pca.eigenvalues[1] - 2.0 / 6.0).abs() < 1e-4);
        assert!((pca.eigenvalues[2] - 0.5 / 6.0).abs() < 1e-4);

        // Principal axis is ±z, secondary ±x, tertiary ±y.
        assert!(pca.axes[0].z.abs() > 0.999);
        assert!(pca.axes[1].x.abs() > 0.999);
        assert!(pca.axes[2].y.abs() > 0.999);
    }

    #[test]
    fn centroid_offset_does_not_change_eigenvalues() {
        let hits = cloud(&[[10.0, 5.0, 2.0], [10.0, 5.0, 4.0], [10.0, 5.0, 6.0]]);
        let refs: Vec<&Hit> = hits.iter().collect();
        let pca = run_pca(&refs).unwrap();
        assert!((pca.centroid - Vector3::new(10.0, 5.0, 4.0)).norm() < 1e-5);
        assert!((pca.eigenvalues[0] - 8.0 / 3.0).abs() < 1e-4);
        assert!(pca.eigenvalues[1].abs() < 1e-4);
    }
}
