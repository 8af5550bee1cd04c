//! Text and Graphviz renderings of graphs and measurement results.

use num_complex::Complex64;
use petgraph::dot::Dot;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::clusters::ClusterData;
use crate::error::{HamError, HamResult};
use crate::graph::WeightedGraph;
use crate::state::basis_bits;

/// Render a graph in Graphviz DOT format.
///
/// Node labels show the name and bias, edge labels the coupling.
pub fn graph_to_dot(graph: &WeightedGraph) -> String {
    format!("{}", Dot::with_config(graph.inner(), &[]))
}

/// One basis state of an [`AmplitudeChart`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmplitudeBar {
    /// Basis state label, e.g. `|01⟩`.
    pub label: String,
    /// Measurement probability `|a|²`.
    pub probability: f64,
    /// Energy scaled by the largest magnitude, then negated.
    pub neg_energy: f64,
}

/// Probabilities and scaled energies of every basis state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmplitudeChart {
    bars: Vec<AmplitudeBar>,
}

const BAR_WIDTH: usize = 40;

impl AmplitudeChart {
    /// Build a chart from state amplitudes and the energy of each basis state.
    pub fn new(amplitudes: &[Complex64], energies: &[f64]) -> HamResult<Self> {
        let len = amplitudes.len();
        if len == 0 || !len.is_power_of_two() {
            return Err(HamError::InvalidProbabilities(format!(
                "amplitude vector length {len} is not a positive power of two"
            )));
        }
        if energies.len() != len {
            return Err(HamError::LengthMismatch {
                what: "energies",
                expected: len,
                got: energies.len(),
            });
        }

        let scale = energies.iter().fold(0.0_f64, |m, e| m.max(e.abs()));
        let width = (len.trailing_zeros() as usize).max(1);
        let bars = amplitudes
            .iter()
            .zip(energies)
            .enumerate()
            .map(|(i, (a, &e))| {
                let bits: String = basis_bits(i, width)
                    .into_iter()
                    .map(|b| char::from(b'0' + b))
                    .collect();
                AmplitudeBar {
                    label: format!("|{bits}⟩"),
                    probability: a.norm_sqr(),
                    neg_energy: if scale > 0.0 { -e / scale } else { 0.0 },
                }
            })
            .collect();
        Ok(Self { bars })
    }

    /// Bars in basis-state order.
    pub fn bars(&self) -> &[AmplitudeBar] {
        &self.bars
    }
}

impl fmt::Display for AmplitudeChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<8} {:>8} {:>8}", "state", "prob", "-E/|E|")?;
        for bar in &self.bars {
            let filled = (bar.probability.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
            writeln!(
                f,
                "{:<8} {:>8.4} {:>8.4} {}",
                bar.label,
                bar.probability,
                bar.neg_energy,
                "#".repeat(filled)
            )?;
        }
        Ok(())
    }
}

const MARKERS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Coarse text scatter plot of clustered 2-D points.
///
/// Each cluster is drawn with its own marker (`0`-`9`, then `a`-`z`, then
/// `*`); cells hit by more than one cluster show `+`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterScatter {
    rows: Vec<Vec<u8>>,
    x_range: (f64, f64),
    y_range: (f64, f64),
    legend: Vec<(char, String, usize)>,
}

impl ClusterScatter {
    /// Plot `data` on a `width × height` character grid.
    pub fn new(data: &ClusterData, width: usize, height: usize) -> HamResult<Self> {
        if data.total_points() == 0 {
            return Err(HamError::EmptyDataset);
        }
        let width = width.max(1);
        let height = height.max(1);

        let points = data.concatenated()?;
        if points.ncols() != 2 {
            return Err(HamError::LengthMismatch {
                what: "point dimensions",
                expected: 2,
                got: points.ncols(),
            });
        }
        let bounds = |col: usize| {
            points
                .column(col)
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                    (lo.min(v), hi.max(v))
                })
        };
        let x_range = bounds(0);
        let y_range = bounds(1);
        let cell = |v: f64, (lo, hi): (f64, f64), n: usize| -> usize {
            if hi > lo {
                (((v - lo) / (hi - lo)) * (n - 1) as f64).round() as usize
            } else {
                n / 2
            }
        };

        let mut rows = vec![vec![b' '; width]; height];
        let mut legend = Vec::with_capacity(data.len());
        for (i, cluster) in data.clusters().iter().enumerate() {
            let marker = MARKERS.get(i).copied().unwrap_or(b'*');
            legend.push((char::from(marker), cluster.label.clone(), cluster.points.nrows()));
            for point in cluster.points.rows() {
                let col = cell(point[0], x_range, width);
                // Row 0 is the top of the plot.
                let row = height - 1 - cell(point[1], y_range, height);
                let slot = &mut rows[row][col];
                *slot = match *slot {
                    b' ' => marker,
                    m if m == marker => marker,
                    _ => b'+',
                };
            }
        }

        Ok(Self {
            rows,
            x_range,
            y_range,
            legend,
        })
    }

    /// Marker drawn at grid cell `(row, col)`, row 0 at the top.
    pub fn cell(&self, row: usize, col: usize) -> Option<char> {
        self.rows.get(row)?.get(col).map(|&b| char::from(b))
    }
}

impl fmt::Display for ClusterScatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.rows.first().map_or(0, Vec::len);
        writeln!(f, "{:>9.3} +{}+", self.y_range.1, "-".repeat(width))?;
        for row in &self.rows {
            writeln!(f, "{:>9} |{}|", "", String::from_utf8_lossy(row))?;
        }
        writeln!(f, "{:>9.3} +{}+", self.y_range.0, "-".repeat(width))?;
        writeln!(
            f,
            "{:>9}  x: {:.3} .. {:.3}",
            "", self.x_range.0, self.x_range.1
        )?;
        for (marker, label, n) in &self.legend {
            writeln!(f, "  {marker}  cluster {label} ({n} points)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clusters::Cluster;
    use ndarray::array;

    #[test]
    fn test_graph_to_dot() {
        let mut g = WeightedGraph::new();
        g.set_bias(0u32, 0.5);
        g.add_coupling(0u32, 1u32, 1.25);
        let dot = graph_to_dot(&g);
        assert!(dot.starts_with("graph {"));
        assert!(dot.contains("0 (0.5000)"));
        assert!(dot.contains("1.2500"));
        assert!(dot.contains("--"));
    }

    #[test]
    fn test_amplitude_chart() {
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let amps = [
            Complex64::new(h, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, h),
            Complex64::new(0.0, 0.0),
        ];
        let chart = AmplitudeChart::new(&amps, &[-2.0, 1.0, 0.5, 0.0]).unwrap();
        let bars = chart.bars();
        assert_eq!(bars.len(), 4);
        assert_eq!(bars[2].label, "|10⟩");
        assert!((bars[0].probability - 0.5).abs() < 1e-12);
        assert!((bars[2].probability - 0.5).abs() < 1e-12);
        assert_eq!(bars[0].neg_energy, 1.0);
        assert_eq!(bars[1].neg_energy, -0.5);

        let text = chart.to_string();
        assert!(text.contains("|00⟩"));
        assert!(text.contains(&"#".repeat(20)));
    }

    #[test]
    fn test_amplitude_chart_zero_energies() {
        let amps = [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)];
        let chart = AmplitudeChart::new(&amps, &[0.0, 0.0]).unwrap();
        assert!(chart.bars().iter().all(|b| b.neg_energy == 0.0));
        assert_eq!(chart.bars()[1].label, "|1⟩");
    }

    #[test]
    fn test_amplitude_chart_rejects_bad_lengths() {
        let amps = [Complex64::new(1.0, 0.0); 3];
        assert!(matches!(
            AmplitudeChart::new(&amps, &[0.0; 3]),
            Err(HamError::InvalidProbabilities(_))
        ));
        let amps = [Complex64::new(1.0, 0.0); 2];
        assert!(matches!(
            AmplitudeChart::new(&amps, &[0.0]),
            Err(HamError::LengthMismatch { .. })
        ));
    }

    fn two_clusters() -> ClusterData {
        ClusterData::new(vec![
            Cluster {
                label: "0".into(),
                points: array![[0.0, 0.0], [0.0, 0.1]],
            },
            Cluster {
                label: "1".into(),
                points: array![[10.0, 10.0]],
            },
        ])
    }

    #[test]
    fn test_cluster_scatter_corners() {
        let plot = ClusterScatter::new(&two_clusters(), 11, 5).unwrap();
        // Lowest point ends up bottom-left, highest top-right.
        assert_eq!(plot.cell(4, 0), Some('0'));
        assert_eq!(plot.cell(0, 10), Some('1'));
        assert_eq!(plot.cell(2, 5), Some(' '));

        let text = plot.to_string();
        assert!(text.contains("cluster 0 (2 points)"));
        assert!(text.contains("cluster 1 (1 points)"));
        assert!(text.contains("x: 0.000 .. 10.000"));
    }

    #[test]
    fn test_cluster_scatter_overlap() {
        let data = ClusterData::new(vec![
            Cluster {
                label: "a".into(),
                points: array![[1.0, 1.0]],
            },
            Cluster {
                label: "b".into(),
                points: array![[1.0, 1.0]],
            },
        ]);
        let plot = ClusterScatter::new(&data, 3, 3).unwrap();
        assert_eq!(plot.cell(1, 1), Some('+'));
    }

    #[test]
    fn test_cluster_scatter_empty() {
        assert!(matches!(
            ClusterScatter::new(&ClusterData::default(), 10, 5),
            Err(HamError::EmptyDataset)
        ));
    }
}
