use thiserror::Error;

use super::{cursor::OutOfBounds, header::HeaderError};

/// An error decoding a document. Each is fatal to the document in which it
/// occurs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Unexpectedly reached the end of the document.
    #[error("Unexpectedly reached the end of the document: {0}")]
    EndOfInput(#[from] OutOfBounds),
    /// Incorrect file header.
    #[error("Incorrect file header: {0}")]
    Header(#[from] HeaderError),
    /// Calculated and found CRC values do not match.
    #[error("Calculated ({calculated}) and found ({found}) CRC values do not match.")]
    CyclicRedundancyCheck { found: u16, calculated: u16 },
    /// A data record arrived before any definition for its local type.
    #[error("Data record at offset {position} uses local type {local_type}, which is undefined.")]
    UndefinedLocalType { local_type: u8, position: usize },
    /// The last record extended into the trailing check value.
    #[error("Records overran the end of the data section ({position} > {end}).")]
    MessageOverrun { position: usize, end: usize },
    /// A field declared a base type the profile does not know (strict mode).
    #[error("Unknown base type ({0:#04x}).")]
    UnknownBaseType(u8),
    /// A definition declared an architecture other than 0 or 1 (strict mode).
    #[error("Unknown architecture ({0}).")]
    InvalidArchitecture(u8),
    /// A compressed timestamp record arrived before any full timestamp
    /// (strict mode).
    #[error("Compressed timestamp record for local type {local_type} has no reference timestamp.")]
    MissingTimestampReference { local_type: u8 },
}
