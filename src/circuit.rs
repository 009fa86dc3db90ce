//! Circuit definition: the ordered input and output pins of a module
//!
//! Inputs and outputs are checked separately: a position may appear once in each list.
//!
//! ```
//! # use voxtable::{CircuitDefinition, InputPin, InputType, OutputPin, OutputType};
//! let mut def = CircuitDefinition::new();
//! def.with_inputs(vec![
//!     InputPin::parse("L", InputType::Power).unwrap(),
//!     InputPin::parse("R", InputType::Power).unwrap(),
//! ])
//! .unwrap()
//! .with_outputs(vec![OutputPin::parse("L", OutputType::Power, |v: &[bool]| v[0] && v[1]).unwrap()])
//! .unwrap();
//! assert_eq!(def.nb_inputs(), 2);
//! assert_eq!(def.nb_outputs(), 1);
//! ```

use fxhash::FxHashSet;

use crate::error::{Error, Result};
use crate::pin::{InputPin, OutputPin};
use crate::position::Position;

/// Find the first position used twice
fn check_duplicates(positions: impl Iterator<Item = Position>) -> Result<()> {
    let mut seen = FxHashSet::default();
    for (index, position) in positions.enumerate() {
        if !seen.insert(position) {
            return Err(Error::DuplicatePosition { position, index });
        }
    }
    Ok(())
}

/// Inputs and outputs of a module, in bit order
#[derive(Debug, Default)]
pub struct CircuitDefinition {
    inputs: Vec<InputPin>,
    outputs: Vec<OutputPin>,
}

impl CircuitDefinition {
    /// Create a definition without any pin
    pub fn new() -> CircuitDefinition {
        CircuitDefinition::default()
    }

    /// Replace the inputs; on error the previous inputs are kept
    pub fn with_inputs(&mut self, inputs: Vec<InputPin>) -> Result<&mut Self> {
        check_duplicates(inputs.iter().map(InputPin::position))?;
        self.inputs = inputs;
        Ok(self)
    }

    /// Replace the outputs; on error the previous outputs are kept
    pub fn with_outputs(&mut self, outputs: Vec<OutputPin>) -> Result<&mut Self> {
        check_duplicates(outputs.iter().map(OutputPin::position))?;
        self.outputs = outputs;
        Ok(self)
    }

    /// Return the number of inputs
    pub fn nb_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Return the number of outputs
    pub fn nb_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Get the input at index i
    pub fn input(&self, i: usize) -> &InputPin {
        &self.inputs[i]
    }

    /// Get the output at index i
    pub fn output(&self, i: usize) -> &OutputPin {
        &self.outputs[i]
    }

    /// All inputs, in order
    pub fn inputs(&self) -> &[InputPin] {
        &self.inputs
    }

    /// All outputs, in order
    pub fn outputs(&self) -> &[OutputPin] {
        &self.outputs
    }

    /// Positions of the inputs, in order
    pub fn input_positions(&self) -> Vec<Position> {
        self.inputs.iter().map(InputPin::position).collect()
    }

    /// Positions of the outputs, in order
    pub fn output_positions(&self) -> Vec<Position> {
        self.outputs.iter().map(OutputPin::position).collect()
    }

    /// Number of rows of the truth table
    pub fn nb_rows(&self) -> usize {
        1usize << self.nb_inputs()
    }

    /// Check that every output function can be evaluated on the inputs
    ///
    /// Inputs and outputs are replaced independently, so this is only meaningful once both
    /// lists are set.
    pub fn check(&self) -> Result<()> {
        let nb_inputs = self.nb_inputs();
        match self.outputs.iter().find(|o| !o.accepts_inputs(nb_inputs)) {
            Some(o) => Err(Error::InputCountMismatch {
                position: o.position(),
                nb_inputs,
            }),
            None => Ok(()),
        }
    }

    /// Value of every output for an input assignment
    pub fn evaluate(&self, assignment: &[bool]) -> Vec<bool> {
        assert_eq!(assignment.len(), self.nb_inputs());
        self.outputs.iter().map(|o| o.evaluate(assignment)).collect()
    }
}
