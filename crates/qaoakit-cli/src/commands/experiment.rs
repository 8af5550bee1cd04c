//! Experiment command implementation.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::info;

use qaoakit_ham::{
    ClusterData, ClusterScatter, DataTable, Dataset, Metric, PauliSum, distances_dataset,
    gaussian_2d_clusters, hamiltonian_from_distance_matrix,
};

use super::common::{OutputFormat, emit};
use crate::config::ExperimentConfig;

const PLOT_WIDTH: usize = 48;
const PLOT_HEIGHT: usize = 16;

/// Everything an experiment produced.
#[derive(Debug, Serialize)]
pub struct ExperimentReport {
    /// Seed used for sampling
    pub seed: u64,
    /// Distance metric
    pub metric: Metric,
    /// Sampled clusters
    pub clusters: ClusterData,
    /// Pairwise distances between all points
    pub distances: DataTable,
    /// Resulting cost Hamiltonian
    pub hamiltonian: PauliSum,
}

impl fmt::Display for ExperimentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Experiment (seed {}, metric {}):", self.seed, self.metric)?;
        for cluster in self.clusters.clusters() {
            writeln!(
                f,
                "  cluster {}: {} points",
                cluster.label,
                cluster.points.nrows()
            )?;
        }
        let (rows, cols) = self.distances.shape();
        writeln!(f, "  distance matrix: {rows}x{cols}")?;
        if let Ok(plot) = ClusterScatter::new(&self.clusters, PLOT_WIDTH, PLOT_HEIGHT) {
            write!(f, "{plot}")?;
        }
        write!(f, "{}", self.hamiltonian)
    }
}

/// Run an experiment described by a configuration.
pub fn run(config: &ExperimentConfig, seed_override: Option<u64>) -> Result<ExperimentReport> {
    let seed = seed_override
        .or(config.seed)
        .unwrap_or_else(rand::random);
    info!(seed, clusters = config.clusters.len(), "running experiment");

    let mut rng = StdRng::seed_from_u64(seed);
    let clusters = gaussian_2d_clusters(
        config.clusters.len(),
        &config.n_points(),
        &config.means(),
        &config.covariances(),
        &mut rng,
    )
    .context("Failed to sample clusters")?;

    let distances = distances_dataset(&Dataset::Clusters(clusters.clone()), config.metric)
        .context("Failed to compute distances")?;
    let biases = config.biases()?;
    let hamiltonian = hamiltonian_from_distance_matrix(&distances, biases.as_ref());

    Ok(ExperimentReport {
        seed,
        metric: config.metric,
        clusters,
        distances,
        hamiltonian,
    })
}

/// Execute the experiment command.
pub fn execute(
    config_path: &Path,
    seed: Option<u64>,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let config = ExperimentConfig::from_file(config_path)?;
    let report = run(&config, seed)?;
    emit(&report, format, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ExperimentConfig {
        serde_yaml_ng::from_str(
            "seed: 5\nclusters:\n  - mean: [0.0, 0.0]\n    points: 2\n  - mean: [4.0, 4.0]\n    points: 3\nbiases: {1: 0.5}\n",
        )
        .unwrap()
    }

    #[test]
    fn test_run_experiment() {
        let report = run(&config(), None).unwrap();
        assert_eq!(report.seed, 5);
        assert_eq!(report.clusters.total_points(), 5);
        assert_eq!(report.distances.shape(), (5, 5));
        assert_eq!(report.hamiltonian.bias_terms().count(), 1);
        assert_eq!(report.hamiltonian.coupling_terms().count(), 10);
    }

    #[test]
    fn test_seed_override_is_reproducible() {
        let a = run(&config(), Some(99)).unwrap();
        let b = run(&config(), Some(99)).unwrap();
        assert_eq!(a.seed, 99);
        assert_eq!(a.hamiltonian, b.hamiltonian);
    }

    #[test]
    fn test_report_display() {
        let text = run(&config(), None).unwrap().to_string();
        assert!(text.starts_with("Experiment (seed 5, metric euclidean):"));
        assert!(text.contains("cluster 1: 3 points"));
        assert!(text.contains("distance matrix: 5x5"));
        assert!(text.contains("0  cluster 0 (2 points)"));
        assert!(text.contains("1  cluster 1 (3 points)"));
        assert!(text.contains(&format!("+{}+", "-".repeat(PLOT_WIDTH))));
    }
}
