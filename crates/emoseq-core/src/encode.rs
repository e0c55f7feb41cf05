use std::io::Write;

use crate::entries::Entry;
use crate::error::ConvertError;

/// U+001F UNIT SEPARATOR, between the sequence and its name.
pub const UNIT_SEPARATOR: u8 = 0x1F;

/// U+001E RECORD SEPARATOR, after each record.
pub const RECORD_SEPARATOR: u8 = 0x1E;

/// Append-only writer of the binary name table.
///
/// Each record is `UTF-8(scalars) 0x1F UTF-8(description) 0x1E`, with no
/// header, length prefix or padding.
///
/// # Example
/// ```
/// use emoseq_core::encode::RecordWriter;
/// use emoseq_core::entries::Entry;
///
/// let mut writer = RecordWriter::new(Vec::new());
/// writer.write_entry(&Entry {
///     scalars: vec!['\u{1F600}'],
///     description: "grinning face".to_owned(),
///     emoji: "😀".to_owned(),
/// }).unwrap();
/// assert_eq!(writer.into_inner(), "😀\u{1F}grinning face\u{1E}".as_bytes());
/// ```
#[derive(Debug)]
pub struct RecordWriter<W: Write> {
    inner: W,
    bytes_written: u64,
    records: usize,
}

impl<W: Write> RecordWriter<W> {
    /// Wrap a byte sink.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            bytes_written: 0,
            records: 0,
        }
    }

    /// Encode and write one entry.
    ///
    /// # Errors
    /// Returns [`ConvertError::Write`] if the sink fails.
    pub fn write_entry(&mut self, entry: &Entry) -> Result<(), ConvertError> {
        let mut record = String::with_capacity(entry.description.len() + 4 * entry.scalars.len() + 2);
        record.extend(entry.scalars.iter());
        record.push(char::from(UNIT_SEPARATOR));
        record.push_str(&entry.description);
        record.push(char::from(RECORD_SEPARATOR));

        self.inner
            .write_all(record.as_bytes())
            .map_err(ConvertError::Write)?;
        self.bytes_written += record.len() as u64;
        self.records += 1;
        Ok(())
    }

    /// Flush the underlying sink.
    ///
    /// # Errors
    /// Returns [`ConvertError::Write`] if the sink fails.
    pub fn flush(&mut self) -> Result<(), ConvertError> {
        self.inner.flush().map_err(ConvertError::Write)
    }

    /// Bytes written so far.
    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Records written so far.
    #[must_use]
    pub fn records(&self) -> usize {
        self.records
    }

    /// Recover the sink.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// One decoded record, borrowing from the artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedRecord<'a> {
    /// The emoji, as concatenated code points.
    pub sequence: &'a str,
    /// Its name.
    pub name: &'a str,
}

/// Iterator over the records of an in-memory artifact.
///
/// # Example
/// ```
/// use emoseq_core::encode::DecodedRecords;
///
/// let data = "😀\u{1F}grinning face\u{1E}".as_bytes();
/// let record = DecodedRecords::new(data).next().unwrap().unwrap();
/// assert_eq!(record.sequence, "😀");
/// assert_eq!(record.name, "grinning face");
/// ```
#[derive(Debug)]
pub struct DecodedRecords<'a> {
    chunks: std::slice::Split<'a, u8, fn(&u8) -> bool>,
    index: usize,
}

impl<'a> DecodedRecords<'a> {
    /// Iterate over `data`.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        let is_record_separator: fn(&u8) -> bool = |byte| *byte == RECORD_SEPARATOR;
        Self {
            chunks: data.split(is_record_separator),
            index: 0,
        }
    }

    fn decode(&self, chunk: &'a [u8]) -> Result<DecodedRecord<'a>, ConvertError> {
        let invalid = |reason| ConvertError::InvalidArtifact {
            index: self.index,
            reason,
        };
        let mut fields = chunk.split(|byte| *byte == UNIT_SEPARATOR);
        let (Some(sequence), Some(name), None) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(invalid("expected exactly one unit separator"));
        };
        let sequence =
            std::str::from_utf8(sequence).map_err(|_| invalid("sequence is not UTF-8"))?;
        let name = std::str::from_utf8(name).map_err(|_| invalid("name is not UTF-8"))?;
        if sequence.is_empty() {
            return Err(invalid("empty sequence"));
        }
        Ok(DecodedRecord { sequence, name })
    }
}

impl<'a> Iterator for DecodedRecords<'a> {
    type Item = Result<DecodedRecord<'a>, ConvertError>;

    fn next(&mut self) -> Option<Self::Item> {
        let chunk = self.chunks.find(|chunk| !chunk.is_empty())?;
        let record = self.decode(chunk);
        self.index += 1;
        Some(record)
    }
}

/// Find the sequence named `name` (ASCII case-insensitive), first match wins.
///
/// # Errors
/// Returns [`ConvertError::InvalidArtifact`] if a record before the match is malformed.
///
/// # Example
/// ```
/// use emoseq_core::encode::lookup_by_name;
///
/// let data = "😇\u{1F}smiling face with halo\u{1E}".as_bytes();
/// assert_eq!(lookup_by_name(data, "Smiling Face With Halo").unwrap(), Some("😇"));
/// assert_eq!(lookup_by_name(data, "halo").unwrap(), None);
/// ```
pub fn lookup_by_name<'a>(data: &'a [u8], name: &str) -> Result<Option<&'a str>, ConvertError> {
    for record in DecodedRecords::new(data) {
        let record = record?;
        if record.name.eq_ignore_ascii_case(name) {
            return Ok(Some(record.sequence));
        }
    }
    Ok(None)
}
