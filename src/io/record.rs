//! Module records, as decoded from material containers
//!
//! The container library owns compression and binary layout; this module works on the
//! decoded record, exchanged as JSON:
//! ```text
//!     {
//!       "inputRemap": [0, 0, ..., 1, 0, 2, ...],
//!       "outputRemap": [...],
//!       "input": [0, 0, ...],
//!       "output": [...],
//!       "bdd": [[0, 0, 0, 2]]
//!     }
//! ```
//! Per-position arrays are indexed by catalog index. A remap of 0 marks an unused position.
//! Pins, and the bits of the rows, follow catalog order whatever the non-zero remap values;
//! records written here number the pins 1, 2, ... in that order.

use std::io::{Read, Write};
use std::rc::Rc;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::pin::{Evaluate, InputPin, InputType, OutputPin, OutputType};
use crate::position::{Position, NB_POSITIONS};
use crate::table::{decode_rows, PackedRow, PackedTable};
use crate::{CircuitDefinition, Error, Result};

/// Logic module of a material record
#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRecord {
    /// Order of the input at each position, 0 if unused
    pub input_remap: Vec<u32>,
    /// Order of the output at each position, 0 if unused
    pub output_remap: Vec<u32>,
    /// Input type code at each position
    pub input: Vec<u8>,
    /// Output type code at each position
    pub output: Vec<u8>,
    /// Packed rows, in groups
    pub bdd: Vec<Vec<PackedRow>>,
}

/// Positions in use with their type codes, in catalog order
fn used_positions(remap: &[u32], types: &[u8], what: &str) -> Result<Vec<(Position, u8)>> {
    if remap.len() > NB_POSITIONS {
        return Err(Error::RecordShape(format!(
            "{what} remap has {} entries, the catalog has {NB_POSITIONS}",
            remap.len()
        )));
    }
    let mut used = Vec::new();
    for (i, order) in remap.iter().enumerate() {
        if *order == 0 {
            continue;
        }
        let code = *types.get(i).ok_or_else(|| {
            Error::RecordShape(format!("No {what} type for used position {i}"))
        })?;
        // Remap length is checked against the catalog above
        used.push((Position::ALL[i], code));
    }
    Ok(used)
}

/// Indices of the positions, sorted in catalog order
fn catalog_order(positions: &[Position]) -> Vec<usize> {
    (0..positions.len())
        .sorted_by_key(|k| positions[*k].index())
        .collect()
}

impl ModuleRecord {
    /// Read a record from JSON
    pub fn read_json<R: Read>(r: R) -> Result<ModuleRecord> {
        Ok(serde_json::from_reader(r)?)
    }

    /// Write a record as JSON
    pub fn write_json<W: Write>(&self, w: W) -> Result<()> {
        serde_json::to_writer_pretty(w, self)?;
        Ok(())
    }

    /// Input pins, in catalog order
    pub fn inputs(&self) -> Result<Vec<InputPin>> {
        used_positions(&self.input_remap, &self.input, "input")?
            .into_iter()
            .map(|(p, c)| InputPin::new(p, InputType::from_code(c)))
            .collect()
    }

    /// Output positions and types, in catalog order
    pub fn outputs(&self) -> Result<Vec<(Position, OutputType)>> {
        Ok(used_positions(&self.output_remap, &self.output, "output")?
            .into_iter()
            .map(|(p, c)| (p, OutputType::from_code(c)))
            .collect())
    }

    /// All rows, groups concatenated
    pub fn packed_table(&self) -> PackedTable {
        self.bdd.iter().flatten().copied().collect()
    }

    /// Circuit whose outputs look up the rows of the record
    ///
    /// The table is checked against the pins before the circuit is built. The outputs only
    /// accept as many inputs as the record has: replacing the inputs afterwards makes
    /// [`CircuitDefinition::check`] fail.
    pub fn to_circuit(&self) -> Result<CircuitDefinition> {
        let inputs = self.inputs()?;
        let outputs = self.outputs()?;
        let table = self.packed_table();
        decode_rows(inputs.len(), outputs.len(), &table)?;
        let table: Rc<[PackedRow]> = table.into();
        let mut ret = CircuitDefinition::new();
        ret.with_inputs(inputs)?;
        let outputs = outputs
            .into_iter()
            .enumerate()
            .map(|(k, (p, ty))| {
                OutputPin::new(
                    p,
                    ty,
                    RowLookup {
                        table: table.clone(),
                        output: k,
                    },
                )
            })
            .collect::<Result<Vec<_>>>()?;
        ret.with_outputs(outputs)?;
        tracing::debug!(
            "Module record with {} inputs, {} outputs and {} rows",
            ret.nb_inputs(),
            ret.nb_outputs(),
            table.len()
        );
        Ok(ret)
    }

    /// Record for a compiled circuit, with a single row group
    ///
    /// Records store pins in catalog order, so rows and their bits are permuted when the
    /// circuit lists its pins in another order. Sentinel bits are cleared.
    pub fn from_compiled(def: &CircuitDefinition, table: &[PackedRow]) -> Result<ModuleRecord> {
        let nb_inputs = def.nb_inputs();
        decode_rows(nb_inputs, def.nb_outputs(), table)?;
        let in_order = catalog_order(&def.input_positions());
        let out_order = catalog_order(&def.output_positions());
        let rows = (0..table.len())
            .map(|j| {
                // Bit s of the record row index (MSB first) is input in_order[s]
                let i = in_order.iter().enumerate().fold(0usize, |i, (s, k)| {
                    i | (((j >> (nb_inputs - 1 - s)) & 1) << (nb_inputs - 1 - k))
                });
                out_order
                    .iter()
                    .enumerate()
                    .fold(0, |r, (t, k)| r | (((table[i] >> (k + 1)) & 1) << (t + 1)))
            })
            .collect();
        let mut ret = ModuleRecord {
            input_remap: vec![0; NB_POSITIONS],
            output_remap: vec![0; NB_POSITIONS],
            input: vec![0; NB_POSITIONS],
            output: vec![0; NB_POSITIONS],
            bdd: vec![rows],
        };
        for (s, k) in in_order.iter().enumerate() {
            let p = def.input(*k);
            let i = p.position().index();
            ret.input_remap[i] = s as u32 + 1;
            ret.input[i] = p.ty().code();
        }
        for (t, k) in out_order.iter().enumerate() {
            let p = def.output(*k);
            let i = p.position().index();
            ret.output_remap[i] = t as u32 + 1;
            ret.output[i] = p.ty().code();
        }
        Ok(ret)
    }
}

/// Output function reading one bit of a packed table
///
/// The assignment selects the row, first input as most significant bit.
#[derive(Debug, Clone)]
pub struct RowLookup {
    table: Rc<[PackedRow]>,
    output: usize,
}

impl Evaluate for RowLookup {
    fn evaluate(&self, assignment: &[bool]) -> bool {
        let row = assignment
            .iter()
            .fold(0usize, |i, b| (i << 1) | usize::from(*b));
        (self.table[row] >> (self.output + 1)) & 1 != 0
    }

    fn accepts_inputs(&self, nb_inputs: usize) -> bool {
        u32::try_from(nb_inputs)
            .ok()
            .and_then(|n| 1usize.checked_shl(n))
            == Some(self.table.len())
    }
}
