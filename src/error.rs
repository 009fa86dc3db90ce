//! Error type shared by the whole crate

use crate::position::Position;

/// Errors raised while building circuits or decoding packed tables
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A pin refers to a token that is not in the position catalog
    #[error("Unknown position '{0}'")]
    UnknownPosition(String),

    /// A state position was given a type other than Power
    #[error("State position {position} must have type Power, got {ty}")]
    InvalidStateType {
        /// The offending position
        position: Position,
        /// Name of the rejected type
        ty: String,
    },

    /// Two pins of the same list share a position
    #[error("Position {position} is used twice (second use at pin {index})")]
    DuplicatePosition {
        /// The repeated position
        position: Position,
        /// Index of the second occurrence in the list
        index: usize,
    },

    /// An output function reads inputs that the circuit does not have
    #[error("Output {position} cannot be evaluated with {nb_inputs} inputs")]
    InputCountMismatch {
        /// Position of the output
        position: Position,
        /// Number of inputs of the circuit
        nb_inputs: usize,
    },

    /// The table does not have one row per input assignment
    #[error("Table has {actual} rows, expected {expected}")]
    TableSizeMismatch {
        /// Number of rows required by the inputs
        expected: usize,
        /// Number of rows supplied
        actual: usize,
    },

    /// A row has more significant bits than the outputs allow
    #[error("Row {index} (0b{row:b}) does not fit in {width} bits")]
    RowWidthOverflow {
        /// Index of the row in the table
        index: usize,
        /// The row value
        row: u64,
        /// Number of bits allowed, including the sentinel
        width: usize,
    },

    /// A module record does not have the expected per-position arrays
    #[error("Malformed module record: {0}")]
    RecordShape(String),

    /// Syntax or semantic error in a circuit description file
    #[error("Line {line}: {message}")]
    Parse {
        /// Line number, starting at 1
        line: usize,
        /// Description of the problem
        message: String,
    },

    /// A file extension that no reader or writer handles
    #[error("Unknown extension '{0}'")]
    UnknownExtension(String),

    /// Error during file IO
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Error while reading or writing JSON
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
