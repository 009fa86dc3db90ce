//! Compute circuit statistics
//!
//! ```
//! # use voxtable::generators::full_adder;
//! use voxtable::stats::stats;
//! let def = full_adder().unwrap();
//! let stats = stats(&def);
//!
//! // The sum of a full adder is true for half of the rows
//! assert_eq!(stats.ones[0], 4);
//!
//! // Show the statistics
//! println!("{}", stats);
//! ```

use std::fmt;

use crate::position::Position;
use crate::table::evaluate_rows;
use crate::CircuitDefinition;

/// Number of pins and rows of a circuit
#[derive(Clone, Debug)]
pub struct CircuitStats {
    /// Input positions
    pub inputs: Vec<Position>,
    /// Output positions
    pub outputs: Vec<Position>,
    /// Number of inputs on state positions
    pub nb_state_inputs: usize,
    /// Number of outputs on state positions
    pub nb_state_outputs: usize,
    /// Number of rows of the truth table
    pub nb_rows: usize,
    /// Number of rows where each output is true
    pub ones: Vec<usize>,
}

impl CircuitStats {
    /// Number of outputs that never change
    pub fn nb_constant_outputs(&self) -> usize {
        self.ones
            .iter()
            .filter(|n| **n == 0 || **n == self.nb_rows)
            .count()
    }
}

impl fmt::Display for CircuitStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stats:")?;
        writeln!(f, "  Inputs: {}", self.inputs.len())?;
        if self.nb_state_inputs != 0 {
            writeln!(f, "      state: {}", self.nb_state_inputs)?;
        }
        writeln!(f, "  Outputs: {}", self.outputs.len())?;
        if self.nb_state_outputs != 0 {
            writeln!(f, "      state: {}", self.nb_state_outputs)?;
        }
        let nb_const = self.nb_constant_outputs();
        if nb_const != 0 {
            writeln!(f, "      constant: {}", nb_const)?;
        }
        writeln!(f, "  Rows: {}", self.nb_rows)?;
        for (p, n) in self.outputs.iter().zip(self.ones.iter()) {
            writeln!(f, "  {:<3}: {}/{}", p, n, self.nb_rows)?;
        }
        fmt::Result::Ok(())
    }
}

/// Compute the statistics of the circuit
pub fn stats(def: &CircuitDefinition) -> CircuitStats {
    let inputs = def.input_positions();
    let outputs = def.output_positions();
    let mut ones = vec![0; outputs.len()];
    for r in evaluate_rows(def) {
        for (n, b) in ones.iter_mut().zip(r.outputs) {
            if b {
                *n += 1;
            }
        }
    }
    CircuitStats {
        nb_state_inputs: inputs.iter().filter(|p| p.is_state()).count(),
        nb_state_outputs: outputs.iter().filter(|p| p.is_state()).count(),
        nb_rows: def.nb_rows(),
        inputs,
        outputs,
        ones,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::read_pins;

    #[test]
    fn test_stats() {
        let def = read_pins(
            "INPUT(L)\nINPUT(S1)\nOUTPUT(T) = AND(L, S1)\nOUTPUT(S2) = vdd\nOUTPUT(D) = gnd\n"
                .as_bytes(),
        )
        .unwrap();
        let s = stats(&def);
        assert_eq!(s.nb_rows, 4);
        assert_eq!(s.nb_state_inputs, 1);
        assert_eq!(s.nb_state_outputs, 1);
        assert_eq!(s.ones, vec![1, 4, 0]);
        assert_eq!(s.nb_constant_outputs(), 2);
        let text = s.to_string();
        assert!(text.starts_with("Stats:\n"));
        assert_eq!(text.matches("Stats").count(), 1);
        assert!(text.contains("  Inputs: 2\n"));
        assert!(text.contains("  T  : 1/4\n"));
    }
}
