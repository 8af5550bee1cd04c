//! Synthetic clustered datasets.

use ndarray::{Array2, ArrayView2, Axis, concatenate};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HamError, HamResult};

/// A labelled cluster of 2-D points, one point per row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Cluster label.
    pub label: String,
    /// Point coordinates, shape `(n_points, 2)`.
    pub points: Array2<f64>,
}

/// Clusters in generation order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClusterData {
    clusters: Vec<Cluster>,
}

impl ClusterData {
    /// Create from a list of clusters.
    pub fn new(clusters: Vec<Cluster>) -> Self {
        Self { clusters }
    }

    /// All clusters.
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Cluster with the given label.
    pub fn get(&self, label: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.label == label)
    }

    /// Number of clusters.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Check if there are no clusters.
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Total number of points across all clusters.
    pub fn total_points(&self) -> usize {
        self.clusters.iter().map(|c| c.points.nrows()).sum()
    }

    /// All points stacked in cluster order.
    pub fn concatenated(&self) -> HamResult<Array2<f64>> {
        if self.clusters.is_empty() {
            return Err(HamError::EmptyDataset);
        }
        let views: Vec<ArrayView2<'_, f64>> = self.clusters.iter().map(|c| c.points.view()).collect();
        Ok(concatenate(Axis(0), &views)?)
    }

    /// Index of the owning cluster for every row of [`Self::concatenated`].
    pub fn point_labels(&self) -> Vec<usize> {
        self.clusters
            .iter()
            .enumerate()
            .flat_map(|(i, c)| std::iter::repeat_n(i, c.points.nrows()))
            .collect()
    }
}

/// Lower-triangular `L` with `L·Lᵀ = cov`, for a positive-semidefinite 2×2 matrix.
fn cholesky_2x2(cov: &[[f64; 2]; 2], cluster: usize) -> HamResult<[[f64; 2]; 2]> {
    const TOL: f64 = 1e-12;
    let invalid = |reason: &str| HamError::InvalidCovariance {
        cluster,
        reason: reason.to_string(),
    };

    let [[a, b], [c, d]] = *cov;
    if !(a.is_finite() && b.is_finite() && c.is_finite() && d.is_finite()) {
        return Err(invalid("entries must be finite"));
    }
    if (b - c).abs() > TOL * (1.0 + b.abs().max(c.abs())) {
        return Err(invalid("matrix is not symmetric"));
    }
    if a < 0.0 || d < 0.0 {
        return Err(invalid("variances must be non-negative"));
    }

    let l11 = a.sqrt();
    let l21 = if l11 > 0.0 {
        b / l11
    } else if b.abs() <= TOL {
        0.0
    } else {
        return Err(invalid("matrix is not positive semidefinite"));
    };
    let rem = d - l21 * l21;
    if rem < -TOL * (1.0 + d.abs()) {
        return Err(invalid("matrix is not positive semidefinite"));
    }
    Ok([[l11, 0.0], [l21, rem.max(0.0).sqrt()]])
}

/// Create clustered data points with a Gaussian distribution within each cluster.
///
/// `n_points`, `means` and `covariances` must all have `n_clusters` entries.
/// Clusters are labelled `"0"`, `"1"`, … in order.
pub fn gaussian_2d_clusters<R: Rng>(
    n_clusters: usize,
    n_points: &[usize],
    means: &[[f64; 2]],
    covariances: &[[[f64; 2]; 2]],
    rng: &mut R,
) -> HamResult<ClusterData> {
    for (what, got) in [
        ("means", means.len()),
        ("covariances", covariances.len()),
        ("n_points", n_points.len()),
    ] {
        if got != n_clusters {
            return Err(HamError::LengthMismatch {
                what,
                expected: n_clusters,
                got,
            });
        }
    }

    let mut clusters = Vec::with_capacity(n_clusters);
    for i in 0..n_clusters {
        let l = cholesky_2x2(&covariances[i], i)?;
        let [mx, my] = means[i];
        let mut points = Array2::zeros((n_points[i], 2));
        for mut row in points.rows_mut() {
            let z0: f64 = StandardNormal.sample(rng);
            let z1: f64 = StandardNormal.sample(rng);
            row[0] = mx + l[0][0] * z0;
            row[1] = my + l[1][0] * z0 + l[1][1] * z1;
        }
        clusters.push(Cluster {
            label: i.to_string(),
            points,
        });
    }

    debug!(n_clusters, total_points = n_points.iter().sum::<usize>(), "sampled Gaussian clusters");
    Ok(ClusterData::new(clusters))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const IDENTITY: [[f64; 2]; 2] = [[1.0, 0.0], [0.0, 1.0]];

    #[test]
    fn test_shapes_and_labels() {
        let mut rng = StdRng::seed_from_u64(1);
        let data = gaussian_2d_clusters(
            2,
            &[3, 5],
            &[[0.0, 0.0], [10.0, 10.0]],
            &[IDENTITY, IDENTITY],
            &mut rng,
        )
        .unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.clusters()[0].label, "0");
        assert_eq!(data.get("1").unwrap().points.dim(), (5, 2));
        assert_eq!(data.total_points(), 8);
        assert_eq!(data.concatenated().unwrap().dim(), (8, 2));
        assert_eq!(data.point_labels(), vec![0, 0, 0, 1, 1, 1, 1, 1]);
    }

    #[test]
    fn test_zero_covariance_gives_mean() {
        let mut rng = StdRng::seed_from_u64(2);
        let data =
            gaussian_2d_clusters(1, &[4], &[[1.5, -2.0]], &[[[0.0, 0.0], [0.0, 0.0]]], &mut rng)
                .unwrap();
        for row in data.clusters()[0].points.rows() {
            assert_eq!(row[0], 1.5);
            assert_eq!(row[1], -2.0);
        }
    }

    #[test]
    fn test_sample_mean_is_close() {
        let mut rng = StdRng::seed_from_u64(3);
        let data = gaussian_2d_clusters(
            1,
            &[4000],
            &[[3.0, -1.0]],
            &[[[0.5, 0.1], [0.1, 0.2]]],
            &mut rng,
        )
        .unwrap();
        let mean = data.clusters()[0].points.mean_axis(Axis(0)).unwrap();
        assert!((mean[0] - 3.0).abs() < 0.1);
        assert!((mean[1] + 1.0).abs() < 0.1);
    }

    #[test]
    fn test_length_mismatch() {
        let mut rng = StdRng::seed_from_u64(4);
        let err = gaussian_2d_clusters(2, &[3, 3], &[[0.0, 0.0]], &[IDENTITY, IDENTITY], &mut rng)
            .unwrap_err();
        assert!(matches!(
            err,
            HamError::LengthMismatch {
                what: "means",
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn test_invalid_covariance() {
        let mut rng = StdRng::seed_from_u64(5);
        let not_psd = [[1.0, 2.0], [2.0, 1.0]];
        let err = gaussian_2d_clusters(1, &[3], &[[0.0, 0.0]], &[not_psd], &mut rng).unwrap_err();
        assert!(matches!(err, HamError::InvalidCovariance { cluster: 0, .. }));

        let asymmetric = [[1.0, 0.5], [0.0, 1.0]];
        let err = gaussian_2d_clusters(1, &[3], &[[0.0, 0.0]], &[asymmetric], &mut rng).unwrap_err();
        assert!(matches!(err, HamError::InvalidCovariance { .. }));
    }

    #[test]
    fn test_empty_concatenation() {
        assert!(matches!(
            ClusterData::default().concatenated(),
            Err(HamError::EmptyDataset)
        ));
    }
}
