//! Experiment configuration.
//!
//! An experiment file lists Gaussian clusters to sample, the metric used for
//! the distance matrix and optional single-qubit biases:
//!
//! ```yaml
//! seed: 7
//! metric: euclidean
//! clusters:
//!   - mean: [0.0, 0.0]
//!     covariance: [[0.1, 0.0], [0.0, 0.1]]
//!     points: 3
//!   - mean: [2.0, 2.0]
//!     points: 3
//! biases: {0: 1.0}
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use qaoakit_ham::{BiasArg, Biases, Metric};

use crate::commands::common::load_document;

/// Complete experiment configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// RNG seed for cluster sampling
    #[serde(default)]
    pub seed: Option<u64>,

    /// Distance metric
    #[serde(default)]
    pub metric: Metric,

    /// Clusters to sample
    pub clusters: Vec<ClusterConfig>,

    /// Single-qubit biases keyed by qubit index
    #[serde(default)]
    pub biases: Option<BiasArg>,
}

/// One Gaussian cluster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Cluster mean
    pub mean: [f64; 2],

    /// Covariance matrix
    #[serde(default = "default_covariance")]
    pub covariance: [[f64; 2]; 2],

    /// Number of points to sample
    #[serde(default = "default_points")]
    pub points: usize,
}

fn default_covariance() -> [[f64; 2]; 2] {
    [[1.0, 0.0], [0.0, 1.0]]
}

fn default_points() -> usize {
    2
}

impl ExperimentConfig {
    /// Load an experiment from a YAML or JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let config: Self = load_document(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the experiment describes at least one point.
    pub fn validate(&self) -> Result<()> {
        if self.clusters.is_empty() {
            anyhow::bail!("Experiment must define at least one cluster");
        }
        if self.clusters.iter().all(|c| c.points == 0) {
            anyhow::bail!("Experiment clusters contain no points");
        }
        Ok(())
    }

    /// Validated biases, if any were given.
    pub fn biases(&self) -> Result<Option<Biases>> {
        self.biases
            .clone()
            .map(Biases::try_from)
            .transpose()
            .context("Invalid biases in experiment file")
    }

    /// Per-cluster point counts.
    pub fn n_points(&self) -> Vec<usize> {
        self.clusters.iter().map(|c| c.points).collect()
    }

    /// Per-cluster means.
    pub fn means(&self) -> Vec<[f64; 2]> {
        self.clusters.iter().map(|c| c.mean).collect()
    }

    /// Per-cluster covariances.
    pub fn covariances(&self) -> Vec<[[f64; 2]; 2]> {
        self.clusters.iter().map(|c| c.covariance).collect()
    }
}
