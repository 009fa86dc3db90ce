//! Truth table compiler for voxel logic modules
//!
//! This crate turns the description of a logic module (pins on the faces, edges and corners
//! of a voxel, each output driven by a boolean function of the inputs) into the packed
//! truth table stored in material records, and decodes such tables back into readable form.
//!
//! # Usage
//!
//! ```bash
//! # Compile a circuit and show its truth table
//! voxtable compile and_gate.pins --print
//! # Compile a circuit to a module record
//! voxtable compile and_gate.pins -o and_gate.json
//! # Decode the truth table of a module record
//! voxtable decode and_gate.json
//! ```
//!
//! # Development
//!
//! ## Tables
//!
//! A circuit with `n` inputs has a table of `2^n` rows. Row `i` corresponds to the
//! assignment whose binary expansion is `i`, the first input being the most significant bit.
//! Each row is an integer: bit 0 is a sentinel and stays zero, output `k` is bit `k + 1`.
//! [`compile`] and [`decode`] are inverses of each other for any table [`compile`] produces.
//!
//! ## Pins
//!
//! Positions come from a fixed catalog ([`Position`]): 27 geometric positions and 8 state
//! slots. State slots only carry power. Within the input list or within the output list,
//! a position may only be used once.
//!
//! For example, here is an And gate:
//! ```
//! # use voxtable::{compile, CircuitDefinition, Expr, InputPin, InputType, OutputPin, OutputType};
//! let mut def = CircuitDefinition::new();
//! def.with_inputs(vec![
//!     InputPin::parse("L", InputType::Power).unwrap(),
//!     InputPin::parse("R", InputType::Power).unwrap(),
//! ])
//! .unwrap();
//! def.with_outputs(vec![OutputPin::parse(
//!     "T",
//!     OutputType::Power,
//!     Expr::andn(vec![Expr::Input(0), Expr::Input(1)]),
//! )
//! .unwrap()])
//! .unwrap();
//! assert_eq!(compile(&def), vec![0, 0, 0, 0b10]);
//! ```

#![warn(missing_docs)]

pub mod circuit;
pub mod error;
pub mod expr;
pub mod generators;
pub mod io;
pub mod pin;
pub mod position;
pub mod stats;
pub mod table;

pub use circuit::CircuitDefinition;
pub use error::{Error, Result};
pub use expr::{Expr, NaryType};
pub use pin::{Evaluate, InputPin, InputType, OutputPin, OutputType};
pub use position::Position;
pub use table::{compile, decode, PackedRow, PackedTable, TableRow, TruthTable};
