//! Distance matrices and the Hamiltonians built from them.
//!
//! Inputs are resolved once into explicit variants: a [`Dataset`] is either a
//! dense point matrix, a labelled table or a set of clusters, and a
//! [`DataTable`] is either dense or labelled.

use ndarray::{Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::clusters::ClusterData;
use crate::error::{HamError, HamResult};
use crate::pauli::{PauliSum, PauliTerm};

/// Pairwise distance metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Euclidean (L2) distance.
    #[default]
    Euclidean,
    /// Squared Euclidean distance.
    SqEuclidean,
    /// Manhattan (L1) distance.
    Cityblock,
    /// Chebyshev (L∞) distance.
    Chebyshev,
    /// Cosine distance, `1 - cos θ`.
    Cosine,
}

impl Metric {
    /// Get the name of this metric.
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Euclidean => "euclidean",
            Metric::SqEuclidean => "sqeuclidean",
            Metric::Cityblock => "cityblock",
            Metric::Chebyshev => "chebyshev",
            Metric::Cosine => "cosine",
        }
    }

    /// Distance between two points.
    ///
    /// Cosine distance involving a zero vector is 0 when both are zero and 1
    /// otherwise.
    pub fn distance(&self, a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
        let diffs = a.iter().zip(b.iter()).map(|(x, y)| x - y);
        match self {
            Metric::Euclidean => diffs.map(|d| d * d).sum::<f64>().sqrt(),
            Metric::SqEuclidean => diffs.map(|d| d * d).sum(),
            Metric::Cityblock => diffs.map(f64::abs).sum(),
            Metric::Chebyshev => diffs.map(f64::abs).fold(0.0, f64::max),
            Metric::Cosine => {
                let na = a.dot(&a).sqrt();
                let nb = b.dot(&b).sqrt();
                match (na == 0.0, nb == 0.0) {
                    (true, true) => 0.0,
                    (true, false) | (false, true) => 1.0,
                    (false, false) => 1.0 - a.dot(&b) / (na * nb),
                }
            }
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Metric {
    type Err = HamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "euclidean" => Ok(Metric::Euclidean),
            "sqeuclidean" => Ok(Metric::SqEuclidean),
            "cityblock" | "manhattan" => Ok(Metric::Cityblock),
            "chebyshev" => Ok(Metric::Chebyshev),
            "cosine" => Ok(Metric::Cosine),
            other => Err(HamError::UnknownMetric(other.to_string())),
        }
    }
}

/// A numeric table whose rows carry labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLabeledTable")]
pub struct LabeledTable {
    labels: Vec<String>,
    values: Array2<f64>,
}

#[derive(Deserialize)]
struct RawLabeledTable {
    labels: Vec<String>,
    values: Array2<f64>,
}

impl TryFrom<RawLabeledTable> for LabeledTable {
    type Error = HamError;

    fn try_from(raw: RawLabeledTable) -> HamResult<Self> {
        LabeledTable::new(raw.labels, raw.values)
    }
}

impl LabeledTable {
    /// Create a table; there must be one label per row.
    pub fn new(labels: Vec<String>, values: Array2<f64>) -> HamResult<Self> {
        if labels.len() != values.nrows() {
            return Err(HamError::LengthMismatch {
                what: "labels",
                expected: values.nrows(),
                got: labels.len(),
            });
        }
        Ok(Self { labels, values })
    }

    /// Row labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Table values.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }
}

/// A set of points to compute distances over, one point per row.
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    /// Plain numeric matrix.
    Dense(Array2<f64>),
    /// Labelled table; distances keep the labels.
    Labeled(LabeledTable),
    /// Clusters, stacked in cluster order.
    Clusters(ClusterData),
}

/// A matrix of pairwise values, dense or labelled on both axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DataTable {
    /// Plain numeric matrix.
    Dense {
        /// Matrix entries.
        values: Array2<f64>,
    },
    /// Matrix whose rows and columns share the same labels.
    Labeled(LabeledTable),
}

impl DataTable {
    /// Wrap a dense matrix.
    pub fn dense(values: Array2<f64>) -> Self {
        DataTable::Dense { values }
    }

    /// Matrix entries.
    pub fn values(&self) -> &Array2<f64> {
        match self {
            DataTable::Dense { values } => values,
            DataTable::Labeled(table) => table.values(),
        }
    }

    /// Row and column labels, if labelled.
    pub fn labels(&self) -> Option<&[String]> {
        match self {
            DataTable::Dense { .. } => None,
            DataTable::Labeled(table) => Some(table.labels()),
        }
    }

    /// Matrix shape `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        self.values().dim()
    }
}

impl From<Array2<f64>> for DataTable {
    fn from(values: Array2<f64>) -> Self {
        DataTable::dense(values)
    }
}

fn pairwise(points: ArrayView2<'_, f64>, metric: Metric) -> Array2<f64> {
    let n = points.nrows();
    let mut out = Array2::zeros((n, n));
    for i in 0..n {
        for j in (i + 1)..n {
            let d = metric.distance(points.row(i), points.row(j));
            out[[i, j]] = d;
            out[[j, i]] = d;
        }
    }
    out
}

/// Compute the distance between every pair of points in a dataset.
///
/// Labelled input gives a labelled matrix; other inputs give a dense one.
pub fn distances_dataset(data: &Dataset, metric: Metric) -> HamResult<DataTable> {
    let table = match data {
        Dataset::Dense(points) => {
            if points.nrows() == 0 {
                return Err(HamError::EmptyDataset);
            }
            DataTable::dense(pairwise(points.view(), metric))
        }
        Dataset::Labeled(table) => {
            if table.values().nrows() == 0 {
                return Err(HamError::EmptyDataset);
            }
            let dist = pairwise(table.values().view(), metric);
            DataTable::Labeled(LabeledTable::new(table.labels().to_vec(), dist)?)
        }
        Dataset::Clusters(clusters) => {
            let points = clusters.concatenated()?;
            if points.nrows() == 0 {
                return Err(HamError::EmptyDataset);
            }
            DataTable::dense(pairwise(points.view(), metric))
        }
    };
    debug!(points = table.shape().0, %metric, "computed distance matrix");
    Ok(table)
}

/// Single-qubit bias coefficients keyed by qubit index.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Biases(BTreeMap<u32, f64>);

impl Biases {
    /// Create an empty set of biases.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bias of a qubit.
    pub fn get(&self, qubit: u32) -> Option<f64> {
        self.0.get(&qubit).copied()
    }

    /// Set the bias of a qubit.
    pub fn insert(&mut self, qubit: u32, bias: f64) -> Option<f64> {
        self.0.insert(qubit, bias)
    }

    /// Biases in ascending qubit order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.0.iter().map(|(&q, &b)| (q, b))
    }

    /// Number of biased qubits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no qubit is biased.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(u32, f64)> for Biases {
    fn from_iter<T: IntoIterator<Item = (u32, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A bias argument as read from a configuration file, before validation.
///
/// Only a mapping of qubit index to bias is accepted; the other shapes exist
/// so that a wrong shape is reported as such rather than as a parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BiasArg {
    /// Mapping with integer keys.
    Mapping(BTreeMap<u32, f64>),
    /// Mapping with string keys, as produced by JSON.
    StringKeyed(BTreeMap<String, f64>),
    /// A list of values.
    List(Vec<f64>),
    /// A single value.
    Scalar(f64),
}

impl TryFrom<BiasArg> for Biases {
    type Error = HamError;

    fn try_from(arg: BiasArg) -> HamResult<Self> {
        const EXPECTED: &str = "a mapping of qubit index to bias";
        match arg {
            BiasArg::Mapping(map) => Ok(Biases(map)),
            BiasArg::StringKeyed(map) => map
                .into_iter()
                .map(|(k, v)| {
                    k.trim()
                        .parse::<u32>()
                        .map(|q| (q, v))
                        .map_err(|_| HamError::InvalidArgumentType {
                            argument: "biases",
                            expected: EXPECTED,
                            found: "a mapping with non-integer keys",
                        })
                })
                .collect(),
            BiasArg::List(_) => Err(HamError::InvalidArgumentType {
                argument: "biases",
                expected: EXPECTED,
                found: "a list",
            }),
            BiasArg::Scalar(_) => Err(HamError::InvalidArgumentType {
                argument: "biases",
                expected: EXPECTED,
                found: "a scalar",
            }),
        }
    }
}

/// Build a Hamiltonian from a distance matrix and optional single-qubit biases.
///
/// Bias terms come first in ascending qubit order, followed by a coupling
/// `dist[i][j]·Z_i Z_j` for every `i < j` of the `m × n` matrix. An empty
/// bias set is the same as none.
pub fn hamiltonian_from_distance_matrix(dist: &DataTable, biases: Option<&Biases>) -> PauliSum {
    let values = dist.values();
    let (m, n) = values.dim();

    let mut hamiltonian = PauliSum::empty();
    if let Some(biases) = biases {
        for (qubit, bias) in biases.iter() {
            hamiltonian.push(PauliTerm::z(qubit, bias));
        }
    }
    for i in 0..m {
        for j in (i + 1)..n {
            hamiltonian.push(PauliTerm::z(i, values[[i, j]]) * PauliTerm::z(j, 1.0));
        }
    }

    debug!(rows = m, cols = n, n_terms = hamiltonian.num_terms(), "built Hamiltonian from distance matrix");
    hamiltonian
}
