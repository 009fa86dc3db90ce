//! Command line interface

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::info;

use voxtable::generators::random_circuit;
use voxtable::io::{
    read_circuit_file, read_record_file, write_circuit_file, write_record_file, ModuleRecord,
};
use voxtable::position::NB_GEOMETRIC_POSITIONS;
use voxtable::stats::stats;
use voxtable::{compile, CircuitDefinition, PackedRow, Result, TruthTable};

/// Command line arguments
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Command line arguments
#[derive(Subcommand)]
pub enum Commands {
    /// Show statistics about a circuit
    ///
    /// Will print the number of inputs, outputs and rows, and how often each output is set.
    #[clap()]
    Show(ShowArgs),

    /// Compile a circuit to a packed truth table
    ///
    /// Circuits are read from .pins files, with one line per pin:
    ///    INPUT(L)
    ///    INPUT(R)
    ///    OUTPUT(T) = AND(L, R)
    #[clap()]
    Compile(CompileArgs),

    /// Decode the truth table of a module record
    ///
    /// The record is the JSON dump of the logic module of a material.
    #[clap()]
    Decode(DecodeArgs),

    /// Generate a random circuit
    #[clap()]
    Random(RandomArgs),
}

/// Print the packed rows, one per line
fn print_packed(table: &[PackedRow], nb_outputs: usize) {
    let width = nb_outputs + 1;
    for (i, row) in table.iter().enumerate() {
        println!("{i}: {row:0width$b}");
    }
}

/// Write a compiled circuit: .json writes a module record, .pins writes the circuit
fn write_output(path: &Path, def: &CircuitDefinition, table: &[PackedRow]) -> Result<()> {
    if path.extension().is_some_and(|e| e == "json") {
        write_record_file(path, &ModuleRecord::from_compiled(def, table)?)
    } else {
        write_circuit_file(path, def)
    }
}

/// Command arguments for circuit statistics
#[derive(Args)]
pub struct ShowArgs {
    /// Circuit to show (.pins or .json)
    file: PathBuf,
}

impl ShowArgs {
    pub fn run(&self) -> Result<()> {
        let def = read_circuit_file(&self.file)?;
        def.check()?;
        print!("{}", stats(&def));
        Ok(())
    }
}

/// Command arguments for compilation
#[derive(Args)]
pub struct CompileArgs {
    /// Circuit to compile (.pins or .json)
    file: PathBuf,

    /// Print the truth table
    #[arg(short = 'p', long)]
    print: bool,

    /// Output file for the module record (.json)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

impl CompileArgs {
    pub fn run(&self) -> Result<()> {
        let def = read_circuit_file(&self.file)?;
        info!(
            "Compiling {} with {} inputs and {} outputs",
            self.file.display(),
            def.nb_inputs(),
            def.nb_outputs()
        );
        def.check()?;
        let table = compile(&def);
        if self.print {
            print!("{}", TruthTable::from_circuit(&def));
        } else {
            print_packed(&table, def.nb_outputs());
        }
        if let Some(path) = &self.output {
            write_output(path, &def, &table)?;
        }
        Ok(())
    }
}

/// Command arguments for decoding
#[derive(Args)]
pub struct DecodeArgs {
    /// Module record to decode (.json)
    file: PathBuf,

    /// Output file for the decoded circuit (.pins)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

impl DecodeArgs {
    pub fn run(&self) -> Result<()> {
        let record = read_record_file(&self.file)?;
        let def = record.to_circuit()?;
        info!(
            "Decoding {} with {} inputs and {} outputs",
            self.file.display(),
            def.nb_inputs(),
            def.nb_outputs()
        );
        print!("{}", TruthTable::decode(&def, &record.packed_table())?);
        if let Some(path) = &self.output {
            write_circuit_file(path, &def)?;
        }
        Ok(())
    }
}

/// Pin count for generated circuits, limited to the geometric positions
fn pin_count(s: &str) -> std::result::Result<usize, String> {
    let n: usize = s.parse().map_err(|e| format!("{e}"))?;
    if n > NB_GEOMETRIC_POSITIONS {
        return Err(format!("at most {NB_GEOMETRIC_POSITIONS} pins are available"));
    }
    Ok(n)
}

/// Command arguments for random circuit generation
#[derive(Args)]
pub struct RandomArgs {
    /// Number of inputs
    #[arg(short = 'i', long, default_value_t = 3, value_parser = pin_count)]
    nb_inputs: usize,

    /// Number of outputs
    #[arg(short = 'n', long, default_value_t = 1, value_parser = pin_count)]
    nb_outputs: usize,

    /// Random seed
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Print the truth table
    #[arg(short = 'p', long)]
    print: bool,

    /// Output file for the circuit (.pins) or the module record (.json)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

impl RandomArgs {
    pub fn run(&self) -> Result<()> {
        let def = random_circuit(self.nb_inputs, self.nb_outputs, self.seed)?;
        let table = compile(&def);
        if self.print {
            print!("{}", TruthTable::from_circuit(&def));
        }
        if let Some(path) = &self.output {
            write_output(path, &def, &table)?;
        }
        Ok(())
    }
}
