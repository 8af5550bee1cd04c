//! Classical basis states: preparation, readout and scoring.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

use qaoakit_ir::{Program, QubitRef};

use crate::error::{HamError, HamResult};

/// Build a program that prepares the computational basis state `state` on `reg`.
///
/// An `X` gate is applied to every qubit whose bit is `1`, in register order.
pub fn prepare_classical_state<Q>(reg: &[Q], state: &[u8]) -> HamResult<Program>
where
    Q: Into<QubitRef> + Copy,
{
    if reg.len() != state.len() {
        return Err(HamError::LengthMismatch {
            what: "state",
            expected: reg.len(),
            got: state.len(),
        });
    }

    let mut program = Program::new("prepare_classical_state");
    for (position, (&qubit, &bit)) in reg.iter().zip(state).enumerate() {
        match bit {
            0 => {}
            1 => {
                program.x(qubit)?;
            }
            value => return Err(HamError::InvalidStateBit { position, value }),
        }
    }
    Ok(program)
}

/// Bits of the basis state with the highest probability.
///
/// The first entry is the most significant bit. Ties go to the lowest index.
pub fn return_lowest_state(probabilities: &[f64]) -> HamResult<Vec<u8>> {
    let len = probabilities.len();
    if len == 0 {
        return Err(HamError::InvalidProbabilities("vector is empty".into()));
    }
    if !len.is_power_of_two() {
        return Err(HamError::InvalidProbabilities(format!(
            "length {len} is not a power of two"
        )));
    }
    if probabilities.iter().any(|p| p.is_nan()) {
        return Err(HamError::InvalidProbabilities("vector contains NaN".into()));
    }

    let mut best = 0;
    for (i, &p) in probabilities.iter().enumerate().skip(1) {
        if p > probabilities[best] {
            best = i;
        }
    }

    let width = (len.trailing_zeros() as usize).max(1);
    Ok(basis_bits(best, width))
}

pub(crate) fn basis_bits(index: usize, width: usize) -> Vec<u8> {
    (0..width)
        .rev()
        .map(|shift| ((index >> shift) & 1) as u8)
        .collect()
}

/// How well a measured state matches a known solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    /// Known solution.
    pub truth: Vec<u8>,
    /// Measured lowest-energy state.
    pub lowest: Vec<u8>,
    /// Fraction of bits of `lowest` equal to `truth`.
    pub accuracy: f64,
    /// Fraction of bits of the complement of `lowest` equal to `truth`.
    pub complement_accuracy: f64,
}

impl AccuracyReport {
    /// The better of the two accuracies.
    ///
    /// Cost functions symmetric under a global flip cannot tell a state from
    /// its complement.
    pub fn best(&self) -> f64 {
        self.accuracy.max(self.complement_accuracy)
    }
}

fn bit_string(bits: &[u8]) -> String {
    bits.iter().map(|b| char::from(b'0' + b)).collect()
}

impl fmt::Display for AccuracyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "True solution:        {}", bit_string(&self.truth))?;
        writeln!(f, "Lowest energy state:  {}", bit_string(&self.lowest))?;
        writeln!(f, "Accuracy:             {:.4}", self.accuracy)?;
        write!(f, "Complement accuracy:  {:.4}", self.complement_accuracy)
    }
}

/// Compare a lowest-energy state against the true solution.
pub fn evaluate_lowest_state(lowest: &[u8], truth: &[u8]) -> HamResult<AccuracyReport> {
    if truth.is_empty() {
        return Err(HamError::EmptyDataset);
    }
    if lowest.len() != truth.len() {
        return Err(HamError::LengthMismatch {
            what: "lowest state",
            expected: truth.len(),
            got: lowest.len(),
        });
    }
    for (position, &value) in lowest.iter().chain(truth).enumerate() {
        if value > 1 {
            return Err(HamError::InvalidStateBit {
                position: position % truth.len(),
                value,
            });
        }
    }

    let n = truth.len() as f64;
    let matches = lowest.iter().zip(truth).filter(|(a, b)| a == b).count() as f64;
    let report = AccuracyReport {
        truth: truth.to_vec(),
        lowest: lowest.to_vec(),
        accuracy: matches / n,
        complement_accuracy: (n - matches) / n,
    };
    info!(
        accuracy = report.accuracy,
        complement_accuracy = report.complement_accuracy,
        "evaluated lowest energy state"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qaoakit_ir::{PlaceholderRegistry, QubitId, StandardGate};

    #[test]
    fn test_prepare_flips_set_bits() {
        let program = prepare_classical_state(&[0u32, 1, 2], &[1, 0, 1]).unwrap();
        assert_eq!(program.len(), 2);
        let targets: Vec<QubitRef> = program
            .instructions()
            .iter()
            .map(|inst| {
                assert_eq!(inst.gate, StandardGate::X);
                inst.qubits[0]
            })
            .collect();
        assert_eq!(targets, vec![QubitRef::from(0u32), QubitRef::from(2u32)]);
    }

    #[test]
    fn test_prepare_on_placeholders() {
        let mut reg = PlaceholderRegistry::new();
        let phs = reg.allocate_many(2);
        let program = prepare_classical_state(&phs, &[0, 1]).unwrap();
        assert!(program.has_placeholders());

        reg.assign_sequential();
        let bound = program.address_qubits(&reg).unwrap();
        assert_eq!(bound.qubits(), vec![QubitRef::Fixed(QubitId(1))]);
    }

    #[test]
    fn test_prepare_rejects_bad_input() {
        assert!(matches!(
            prepare_classical_state(&[0u32, 1], &[1]),
            Err(HamError::LengthMismatch { .. })
        ));
        assert!(matches!(
            prepare_classical_state(&[0u32, 1], &[1, 2]),
            Err(HamError::InvalidStateBit {
                position: 1,
                value: 2
            })
        ));
    }

    #[test]
    fn test_return_lowest_state() {
        assert_eq!(
            return_lowest_state(&[0.1, 0.2, 0.6, 0.1]).unwrap(),
            vec![1, 0]
        );
        assert_eq!(
            return_lowest_state(&[0.0, 0.1, 0.0, 0.0, 0.0, 0.0, 0.0, 0.9]).unwrap(),
            vec![1, 1, 1]
        );
        // Ties resolve to the first index.
        assert_eq!(return_lowest_state(&[0.5, 0.5]).unwrap(), vec![0]);
        assert_eq!(return_lowest_state(&[1.0]).unwrap(), vec![0]);
    }

    #[test]
    fn test_return_lowest_state_rejects_bad_lengths() {
        assert!(matches!(
            return_lowest_state(&[]),
            Err(HamError::InvalidProbabilities(_))
        ));
        assert!(matches!(
            return_lowest_state(&[0.2, 0.3, 0.5]),
            Err(HamError::InvalidProbabilities(_))
        ));
        assert!(return_lowest_state(&[f64::NAN, 0.5]).is_err());
    }

    #[test]
    fn test_evaluate_lowest_state() {
        let report = evaluate_lowest_state(&[1, 0, 0, 1], &[1, 0, 1, 1]).unwrap();
        assert_eq!(report.accuracy, 0.75);
        assert_eq!(report.complement_accuracy, 0.25);
        assert_eq!(report.best(), 0.75);

        let flipped = evaluate_lowest_state(&[0, 1], &[1, 0]).unwrap();
        assert_eq!(flipped.accuracy, 0.0);
        assert_eq!(flipped.complement_accuracy, 1.0);

        let text = report.to_string();
        assert!(text.contains("True solution:        1011"));
        assert!(text.contains("Accuracy:             0.7500"));
    }

    #[test]
    fn test_evaluate_rejects_mismatch() {
        assert!(matches!(
            evaluate_lowest_state(&[1], &[1, 0]),
            Err(HamError::LengthMismatch { .. })
        ));
        assert!(matches!(
            evaluate_lowest_state(&[], &[]),
            Err(HamError::EmptyDataset)
        ));
    }
}
