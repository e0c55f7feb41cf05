//! Conversion of UTS #51 emoji sequence data into a binary name table.
//!
//! The pipeline is linear: each data line is parsed into a [`record::Record`],
//! ranges are expanded into one [`entries::Entry`] per code point with names
//! from the Unicode name database, and every entry is encoded as
//! `sequence 0x1F name 0x1E` by [`encode::RecordWriter`].

pub mod config;
pub mod convert;
pub mod encode;
pub mod entries;
pub mod error;
pub mod names;
pub mod overrides;
pub mod record;

pub use config::ConvertConfig;
pub use convert::{ConvertOptions, ConvertSummary, convert};
pub use encode::{DecodedRecords, RecordWriter, lookup_by_name};
pub use entries::{Entries, Entry};
pub use error::ConvertError;
pub use names::{NameResolver, NameSource, UnicodeNames};
