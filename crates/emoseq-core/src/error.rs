use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while converting a sequence data file.
///
/// None of them is recovered locally: the conversion stops at the first one.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Destination present and overwriting was not requested.
    #[error("destination already exists: {}", path.display())]
    DestinationExists {
        /// Path of the existing destination.
        path: PathBuf,
    },

    /// A data line does not match the record grammar.
    #[error("cannot parse line {line_number} ({reason}): {content:?}")]
    Parse {
        /// 1-based line number in the source file.
        line_number: usize,
        /// Raw line content.
        content: String,
        /// What the tokenizer tripped on.
        reason: String,
    },

    /// A token expected to be hexadecimal is not.
    #[error("malformed hexadecimal code point {token:?} on line {line_number}")]
    MalformedHex {
        /// 1-based line number in the source file.
        line_number: usize,
        /// Offending token.
        token: String,
    },

    /// A hexadecimal token is not a Unicode scalar value.
    #[error("U+{value:04X} on line {line_number} is not a Unicode scalar value")]
    InvalidCodePoint {
        /// 1-based line number in the source file.
        line_number: usize,
        /// Parsed value.
        value: u32,
    },

    /// No name for a range code point, neither standard nor overridden.
    #[error("no name known for U+{code_point:04X}")]
    UnresolvedName {
        /// The code point without a name.
        code_point: u32,
    },

    /// The source file could not be opened.
    #[error("cannot open source {}: {source}", path.display())]
    OpenSource {
        /// Source path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The destination file could not be created.
    #[error("cannot create destination {}: {source}", path.display())]
    CreateDestination {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Reading a source line failed (I/O or invalid UTF-8).
    #[error("cannot read line {line_number}: {source}")]
    Read {
        /// 1-based number of the line being read.
        line_number: usize,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Writing to the destination failed.
    #[error("cannot write destination: {0}")]
    Write(#[source] std::io::Error),

    /// A produced artifact does not follow the record format.
    #[error("invalid artifact, record {index}: {reason}")]
    InvalidArtifact {
        /// 0-based index of the faulty record.
        index: usize,
        /// Description of the defect.
        reason: &'static str,
    },
}
