//! Read and write circuits and module records to files

mod pins;
mod record;

use std::fs::File;
use std::path::Path;

pub use pins::{read_pins, write_pins};
pub use record::{ModuleRecord, RowLookup};

use crate::{CircuitDefinition, Error, Result};

fn extension(path: &Path) -> Result<String> {
    match path.extension() {
        None => Err(Error::UnknownExtension(String::new())),
        Some(s) => Ok(s.to_string_lossy().to_string()),
    }
}

/// Read a circuit from a file
///
/// Following extensions are supported: .pins, .json (module record)
pub fn read_circuit_file(path: &Path) -> Result<CircuitDefinition> {
    let ext = extension(path)?;
    match ext.as_str() {
        "pins" => read_pins(File::open(path)?),
        "json" => read_record_file(path)?.to_circuit(),
        _ => Err(Error::UnknownExtension(ext)),
    }
}

/// Write a circuit to a file
///
/// Following extensions are supported: .pins
pub fn write_circuit_file(path: &Path, def: &CircuitDefinition) -> Result<()> {
    let ext = extension(path)?;
    match ext.as_str() {
        "pins" => write_pins(&mut File::create(path)?, def),
        _ => Err(Error::UnknownExtension(ext)),
    }
}

/// Read a module record from a JSON file
pub fn read_record_file(path: &Path) -> Result<ModuleRecord> {
    ModuleRecord::read_json(File::open(path)?)
}

/// Write a module record to a JSON file
pub fn write_record_file(path: &Path, record: &ModuleRecord) -> Result<()> {
    record.write_json(File::create(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_unknown_extension() {
        assert!(matches!(
            read_circuit_file(&PathBuf::from("circuit.bench")),
            Err(Error::UnknownExtension(e)) if e == "bench"
        ));
        assert!(matches!(
            read_circuit_file(&PathBuf::from("circuit")),
            Err(Error::UnknownExtension(_))
        ));
        assert!(matches!(
            write_circuit_file(&PathBuf::from("out.json"), &CircuitDefinition::new()),
            Err(Error::UnknownExtension(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_circuit_file(&PathBuf::from("/nonexistent/voxtable/circuit.pins")),
            Err(Error::Io(_))
        ));
    }
}
