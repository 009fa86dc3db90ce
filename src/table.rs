//! Compilation of circuits to packed truth tables, and decoding back
//!
//! Row `i` of a table corresponds to the input assignment whose binary expansion is `i`,
//! the first input being the most significant bit.
//! Each row is packed in an integer: bit 0 is a sentinel, always zero in compiled tables,
//! and output `k` is stored at bit `k + 1`.
//!
//! ```
//! # use voxtable::{compile, decode, CircuitDefinition, InputPin, InputType, OutputPin, OutputType};
//! let mut def = CircuitDefinition::new();
//! def.with_inputs(vec![
//!     InputPin::parse("L", InputType::Power).unwrap(),
//!     InputPin::parse("R", InputType::Power).unwrap(),
//! ])
//! .unwrap()
//! .with_outputs(vec![OutputPin::parse("T", OutputType::Power, |v: &[bool]| v[0] && v[1]).unwrap()])
//! .unwrap();
//! let table = compile(&def);
//! assert_eq!(table, vec![0, 0, 0, 2]);
//! let rows = decode(&def, &table).unwrap();
//! assert_eq!(rows[3].outputs, vec![true]);
//! ```

use std::fmt;

use itertools::Itertools;

use crate::circuit::CircuitDefinition;
use crate::error::{Error, Result};
use crate::position::Position;

/// One row of a table, packed in an integer
pub type PackedRow = u64;

/// A full truth table, one packed row per input assignment
pub type PackedTable = Vec<PackedRow>;

/// Unpacked row of a truth table
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct TableRow {
    /// Value of each input
    pub assignment: Vec<bool>,
    /// Value of each output
    pub outputs: Vec<bool>,
}

/// Input assignment of row `index`, most significant bit first
pub fn assignment(index: usize, nb_inputs: usize) -> Vec<bool> {
    (0..nb_inputs)
        .map(|i| (index >> (nb_inputs - 1 - i)) & 1 != 0)
        .collect()
}

/// Pack output values in a row
///
/// Equivalent to writing the bits `[0, out0, out1, ...]`, reversing them and reading the
/// result as a binary number: the sentinel lands at bit 0 and output `k` at bit `k + 1`.
pub fn pack_row(outputs: &[bool]) -> PackedRow {
    assert!(outputs.len() < PackedRow::BITS as usize);
    outputs
        .iter()
        .enumerate()
        .fold(0, |row, (k, b)| row | (PackedRow::from(*b) << (k + 1)))
}

/// Unpack the output values of a row, dropping the sentinel bit
pub fn unpack_row(row: PackedRow, nb_outputs: usize) -> Vec<bool> {
    (0..nb_outputs).map(|k| (row >> (k + 1)) & 1 != 0).collect()
}

/// Number of bits of a row, including the sentinel
pub fn row_width(nb_outputs: usize) -> usize {
    nb_outputs + 1
}

/// Evaluate the circuit on every input assignment
///
/// # Panics
///
/// Output functions may panic when they read inputs the circuit does not have;
/// [`CircuitDefinition::check`] detects it beforehand.
pub fn evaluate_rows(def: &CircuitDefinition) -> Vec<TableRow> {
    (0..def.nb_rows())
        .map(|i| {
            let assignment = assignment(i, def.nb_inputs());
            let outputs = def.evaluate(&assignment);
            TableRow {
                assignment,
                outputs,
            }
        })
        .collect()
}

/// Compile the circuit to a packed truth table
///
/// The table has `2^n` rows for `n` inputs.
///
/// # Panics
///
/// Same as [`evaluate_rows`]: run [`CircuitDefinition::check`] on definitions built
/// from untrusted functions.
pub fn compile(def: &CircuitDefinition) -> PackedTable {
    tracing::debug!(
        "Compiling {} rows for {} inputs and {} outputs",
        def.nb_rows(),
        def.nb_inputs(),
        def.nb_outputs()
    );
    evaluate_rows(def)
        .iter()
        .map(|r| pack_row(&r.outputs))
        .collect()
}

/// Decode a packed truth table for a given number of inputs and outputs
pub fn decode_rows(
    nb_inputs: usize,
    nb_outputs: usize,
    table: &[PackedRow],
) -> Result<Vec<TableRow>> {
    let expected = 1usize << nb_inputs;
    if table.len() != expected {
        return Err(Error::TableSizeMismatch {
            expected,
            actual: table.len(),
        });
    }
    let width = row_width(nb_outputs);
    if let Some((index, row)) = table
        .iter()
        .enumerate()
        .find(|(_, r)| width < PackedRow::BITS as usize && **r >> width != 0)
    {
        return Err(Error::RowWidthOverflow {
            index,
            row: *row,
            width,
        });
    }
    let nb_sentinel = table.iter().filter(|r| **r & 1 != 0).count();
    if nb_sentinel != 0 {
        tracing::warn!("{} rows have their sentinel bit set", nb_sentinel);
    }
    tracing::debug!("Decoding {} rows of {} bits", table.len(), width);
    Ok(table
        .iter()
        .enumerate()
        .map(|(i, r)| TableRow {
            assignment: assignment(i, nb_inputs),
            outputs: unpack_row(*r, nb_outputs),
        })
        .collect())
}

/// Decode a packed truth table using the pins of a circuit
pub fn decode(def: &CircuitDefinition, table: &[PackedRow]) -> Result<Vec<TableRow>> {
    decode_rows(def.nb_inputs(), def.nb_outputs(), table)
}

/// Truth table with named columns, for display
///
/// ```text
/// L   | R   || T
/// ----+-----++----
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TruthTable {
    /// Input columns
    pub inputs: Vec<Position>,
    /// Output columns
    pub outputs: Vec<Position>,
    /// Rows, in assignment order
    pub rows: Vec<TableRow>,
}

impl TruthTable {
    /// Truth table obtained by evaluating the circuit
    pub fn from_circuit(def: &CircuitDefinition) -> TruthTable {
        TruthTable {
            inputs: def.input_positions(),
            outputs: def.output_positions(),
            rows: evaluate_rows(def),
        }
    }

    /// Truth table obtained by decoding a packed table
    pub fn decode(def: &CircuitDefinition, table: &[PackedRow]) -> Result<TruthTable> {
        Ok(TruthTable {
            inputs: def.input_positions(),
            outputs: def.output_positions(),
            rows: decode(def, table)?,
        })
    }
}

fn cells<T: fmt::Display>(v: impl Iterator<Item = T>) -> String {
    v.map(|c| format!("{:<3}", c)).join(" | ")
}

fn bit(b: &bool) -> char {
    if *b {
        '1'
    } else {
        '0'
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} || {}",
            cells(self.inputs.iter()),
            cells(self.outputs.iter())
        )?;
        writeln!(
            f,
            "{}-++-{}",
            self.inputs.iter().map(|_| "---").join("-+-"),
            self.outputs.iter().map(|_| "---").join("-+-")
        )?;
        for r in &self.rows {
            writeln!(
                f,
                "{} || {}",
                cells(r.assignment.iter().map(bit)),
                cells(r.outputs.iter().map(bit))
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Expr;
    use crate::pin::{InputPin, InputType, OutputPin, OutputType};

    fn circuit(inputs: &[&str], outputs: Vec<(&str, Expr)>) -> CircuitDefinition {
        let mut def = CircuitDefinition::new();
        def.with_inputs(
            inputs
                .iter()
                .map(|s| InputPin::parse(s, InputType::Power).unwrap())
                .collect(),
        )
        .unwrap();
        def.with_outputs(
            outputs
                .into_iter()
                .map(|(s, e)| OutputPin::parse(s, OutputType::Power, e).unwrap())
                .collect(),
        )
        .unwrap();
        def
    }

    /// Packing written exactly as the reversed binary string rule
    fn pack_row_by_string(outputs: &[bool]) -> PackedRow {
        let s: String = std::iter::once('0')
            .chain(outputs.iter().map(bit))
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        PackedRow::from_str_radix(&s, 2).unwrap()
    }

    /// Unpacking written exactly as the padded, reversed binary string rule
    fn unpack_row_by_string(row: PackedRow, nb_outputs: usize) -> Vec<bool> {
        let s = format!("{:0width$b}", row, width = nb_outputs + 1);
        s.chars().rev().skip(1).map(|c| c == '1').collect()
    }

    #[test]
    fn test_assignment() {
        assert_eq!(assignment(0, 0), Vec::<bool>::new());
        assert_eq!(assignment(1, 2), vec![false, true]);
        assert_eq!(assignment(2, 2), vec![true, false]);
        assert_eq!(assignment(6, 3), vec![true, true, false]);
    }

    #[test]
    fn test_packing_layout() {
        assert_eq!(pack_row(&[]), 0);
        assert_eq!(pack_row(&[true]), 0b10);
        assert_eq!(pack_row(&[true, false]), 0b010);
        assert_eq!(pack_row(&[false, true]), 0b100);
        for m in 0u32..64 {
            let outputs: Vec<bool> = (0..6).map(|k| (m >> k) & 1 != 0).collect();
            let row = pack_row(&outputs);
            assert_eq!(row, pack_row_by_string(&outputs));
            assert_eq!(row & 1, 0);
            assert_eq!(unpack_row(row, 6), outputs);
            assert_eq!(unpack_row_by_string(row, 6), outputs);
        }
    }

    #[test]
    fn test_and_gate() {
        let def = circuit(
            &["L", "R"],
            vec![("T", Expr::andn(vec![Expr::Input(0), Expr::Input(1)]))],
        );
        let table = compile(&def);
        assert_eq!(table, vec![0, 0, 0, 0b10]);
        let rows = decode(&def, &table).unwrap();
        assert_eq!(rows[0].outputs, vec![false]);
        assert_eq!(rows[1].assignment, vec![false, true]);
        assert_eq!(rows[1].outputs, vec![false]);
        assert_eq!(rows[2].assignment, vec![true, false]);
        assert_eq!(rows[2].outputs, vec![false]);
        assert_eq!(rows[3].assignment, vec![true, true]);
        assert_eq!(rows[3].outputs, vec![true]);
    }

    #[test]
    fn test_xor3() {
        let def = circuit(
            &["T", "D", "L"],
            vec![(
                "F",
                Expr::xorn(vec![Expr::Input(0), Expr::Input(1), Expr::Input(2)]),
            )],
        );
        let table = compile(&def);
        assert_eq!(table.len(), 8);
        let rows = decode(&def, &table).unwrap();
        assert_eq!(rows[7].assignment, vec![true, true, true]);
        assert_eq!(rows[7].outputs, vec![true]);
        assert_eq!(rows[3].outputs, vec![false]);
        assert_eq!(rows[4].outputs, vec![true]);
    }

    #[test]
    fn test_output_order() {
        // First output at the lowest output bit
        let def = circuit(
            &["L"],
            vec![
                ("T", Expr::Input(0)),
                ("D", Expr::Const(false)),
                ("F", Expr::Const(true)),
            ],
        );
        let table = compile(&def);
        assert_eq!(table, vec![0b1000, 0b1010]);
        assert_eq!(
            decode(&def, &table).unwrap(),
            vec![
                TableRow {
                    assignment: vec![false],
                    outputs: vec![false, false, true]
                },
                TableRow {
                    assignment: vec![true],
                    outputs: vec![true, false, true]
                },
            ]
        );
    }

    #[test]
    fn test_degenerate() {
        let def = circuit(&[], vec![("T", Expr::Const(true))]);
        assert_eq!(compile(&def), vec![0b10]);
        let rows = decode(&def, &compile(&def)).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].assignment.is_empty());

        let def = circuit(&["L", "R", "C"], vec![]);
        let table = compile(&def);
        assert_eq!(table, vec![0; 8]);
        assert!(decode(&def, &table).unwrap().iter().all(|r| r.outputs.is_empty()));
    }

    #[test]
    fn test_roundtrip() {
        let def = circuit(
            &["FLD", "C", "S1", "BRT"],
            vec![
                ("S1", Expr::maj(Expr::Input(0), Expr::Input(1), Expr::Input(3))),
                ("C", Expr::mux(Expr::Input(2), Expr::Input(0), Expr::Input(1))),
                ("S2", Expr::not(Expr::Input(3))),
                ("FLD", Expr::orn(vec![Expr::Input(1), Expr::Input(2)])),
            ],
        );
        let table = compile(&def);
        assert_eq!(table.len(), 16);
        assert!(table.iter().all(|r| r & 1 == 0));
        assert_eq!(decode(&def, &table).unwrap(), evaluate_rows(&def));
    }

    #[test]
    fn test_size_mismatch() {
        let def = circuit(&["L", "R"], vec![("T", Expr::Input(0))]);
        assert!(matches!(
            decode(&def, &[0, 0, 0]),
            Err(Error::TableSizeMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_width_overflow() {
        let def = circuit(&["L"], vec![("T", Expr::Input(0))]);
        assert!(decode(&def, &[0b11, 0b10]).is_ok());
        assert!(matches!(
            decode(&def, &[0, 0b100]),
            Err(Error::RowWidthOverflow {
                index: 1,
                row: 0b100,
                width: 2
            })
        ));
    }

    #[test]
    fn test_display() {
        let def = circuit(
            &["L", "R"],
            vec![("T", Expr::andn(vec![Expr::Input(0), Expr::Input(1)]))],
        );
        let expected = [
            "L   | R   || T  ",
            "----+-----++----",
            "0   | 0   || 0  ",
            "0   | 1   || 0  ",
            "1   | 0   || 0  ",
            "1   | 1   || 1  ",
            "",
        ]
        .join("\n");
        assert_eq!(TruthTable::from_circuit(&def).to_string(), expected);
        let decoded = TruthTable::decode(&def, &compile(&def)).unwrap();
        assert_eq!(decoded.to_string(), expected);
    }

    #[test]
    fn test_display_wide() {
        let def = circuit(
            &["FLT"],
            vec![("S1", Expr::Input(0)), ("BRD", Expr::not(Expr::Input(0)))],
        );
        let expected = [
            "FLT || S1  | BRD",
            "----++-----+----",
            "0   || 0   | 1  ",
            "1   || 1   | 0  ",
            "",
        ]
        .join("\n");
        assert_eq!(TruthTable::from_circuit(&def).to_string(), expected);
    }

    #[test]
    #[should_panic]
    fn test_missing_input() {
        let def = circuit(&["L"], vec![("T", Expr::Input(3))]);
        assert!(def.check().is_err());
        compile(&def);
    }
}
