//! Grammar of a UTS #51 sequence data line.
//!
//! ```text
//! 1F600          ; Basic_Emoji ; grinning face  # E1.0 [1] (😀)
//! 231A..231B     ; Basic_Emoji ; watch          # E0.6 [2] (⌚..⌛)
//! 0023 FE0F 20E3 ; Emoji_Keycap_Sequence ; keycap: \x{23} # E0.6 [1] (#️⃣)
//! ```

use thiserror::Error;

/// Why a data line was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Structural mismatch with the record grammar.
    #[error("{0}")]
    Grammar(&'static str),

    /// A code point token is not 4 to 8 hexadecimal digits.
    #[error("malformed hexadecimal token {0:?}")]
    MalformedHex(String),

    /// A code point token is a surrogate or beyond U+10FFFF.
    #[error("U+{0:04X} is not a Unicode scalar value")]
    InvalidCodePoint(u32),
}

/// Parenthesized emoji field, informational only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmojiField {
    /// `(😀)`
    Single(String),
    /// `(⌚..⌛)`
    Range(String, String),
}

/// Fields shared by both record shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFields {
    /// Type field, e.g. `Basic_Emoji`.
    pub type_field: String,
    /// Free-text description, trimmed.
    pub description: String,
    /// Emoji version after the `E` marker, e.g. `0.6`.
    pub version: String,
    /// Bracketed count of listed sequences.
    pub count: u32,
    /// Representative emoji.
    pub emoji: EmojiField,
}

/// `first..last` line: one entry per code point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRecord {
    /// First code point (inclusive).
    pub first: char,
    /// Last code point (inclusive).
    pub last: char,
    /// Remaining fields.
    pub fields: RecordFields,
}

/// Space-separated code point list: one entry for the whole sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    /// Code points in source order.
    pub scalars: Vec<char>,
    /// Remaining fields.
    pub fields: RecordFields,
}

/// A parsed data line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// Scalar range.
    Range(RangeRecord),
    /// Scalar sequence.
    Sequence(SequenceRecord),
}

/// Whether a line carries no record (blank or `#` comment).
///
/// # Example
/// ```
/// use emoseq_core::record::is_ignorable;
/// assert!(is_ignorable("   "));
/// assert!(is_ignorable("# emoji-sequences.txt"));
/// assert!(!is_ignorable("1F600 ; Basic_Emoji ; grinning face # E1.0 [1] (😀)"));
/// ```
#[must_use]
pub fn is_ignorable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Parse one data line.
///
/// # Errors
/// Returns a [`RecordError`] describing the first mismatch with the grammar.
///
/// # Example
/// ```
/// use emoseq_core::record::{parse_record, Record};
/// let record = parse_record("1F600 ; Basic_Emoji ; grinning face # E1.0 [1] (😀)").unwrap();
/// assert!(matches!(record, Record::Sequence(ref s) if s.scalars == ['\u{1F600}']));
/// ```
pub fn parse_record(line: &str) -> Result<Record, RecordError> {
    let line = line.trim();

    let (scalars_field, rest) = line
        .split_once(';')
        .ok_or(RecordError::Grammar("missing ';' after code points"))?;
    let (type_field, rest) = rest
        .split_once(';')
        .ok_or(RecordError::Grammar("missing ';' after type field"))?;

    let type_field = type_field.trim();
    if type_field.is_empty() || type_field.contains(char::is_whitespace) {
        return Err(RecordError::Grammar("type field must be a single token"));
    }

    let marker = find_version_marker(rest).ok_or(RecordError::Grammar("missing '# E' version"))?;
    let description = rest[..marker].trim();
    if description.is_empty() {
        return Err(RecordError::Grammar("empty description"));
    }

    let mut cursor = Cursor::new(&rest[marker + 1..]);
    cursor.skip_whitespace();
    cursor.expect('E', "missing 'E' before version")?;
    let version = cursor.take_while(|c| c.is_ascii_digit() || c == '.');
    if version.is_empty() {
        return Err(RecordError::Grammar("empty version"));
    }
    cursor.require_whitespace("missing whitespace after version")?;
    cursor.expect('[', "missing '[' before count")?;
    let count = cursor
        .take_while(|c| c.is_ascii_digit())
        .parse::<u32>()
        .map_err(|_| RecordError::Grammar("count is not a number"))?;
    cursor.expect(']', "missing ']' after count")?;
    cursor.require_whitespace("missing whitespace after count")?;
    cursor.expect('(', "missing '(' before emoji")?;
    let emoji = cursor.take_while(|c| c != ')');
    cursor.expect(')', "missing ')' after emoji")?;
    if !cursor.rest().trim().is_empty() {
        return Err(RecordError::Grammar("trailing text after emoji"));
    }

    let fields = RecordFields {
        type_field: type_field.to_owned(),
        description: description.to_owned(),
        version: version.to_owned(),
        count,
        emoji: parse_emoji_field(emoji)?,
    };

    let scalars_field = scalars_field.trim();
    if let Some((first, last)) = scalars_field.split_once("..") {
        let first = parse_scalar(first.trim())?;
        let last = parse_scalar(last.trim())?;
        if first > last {
            return Err(RecordError::Grammar("range start exceeds range end"));
        }
        Ok(Record::Range(RangeRecord {
            first,
            last,
            fields,
        }))
    } else {
        let scalars = scalars_field
            .split_whitespace()
            .map(parse_scalar)
            .collect::<Result<Vec<_>, _>>()?;
        if scalars.is_empty() {
            return Err(RecordError::Grammar("no code points"));
        }
        Ok(Record::Sequence(SequenceRecord { scalars, fields }))
    }
}

/// Parse a 4 to 8 digit uppercase hexadecimal code point.
///
/// # Errors
/// [`RecordError::MalformedHex`] for a bad token,
/// [`RecordError::InvalidCodePoint`] for a surrogate or out-of-range value.
pub fn parse_scalar(token: &str) -> Result<char, RecordError> {
    let is_upper_hex = |b: u8| b.is_ascii_digit() || (b'A'..=b'F').contains(&b);
    if !(4..=8).contains(&token.len()) || !token.bytes().all(is_upper_hex) {
        return Err(RecordError::MalformedHex(token.to_owned()));
    }
    let value = u32::from_str_radix(token, 16)
        .map_err(|_| RecordError::MalformedHex(token.to_owned()))?;
    char::from_u32(value).ok_or(RecordError::InvalidCodePoint(value))
}

/// Byte offset of the `#` opening the version comment.
///
/// The first `#` followed by optional whitespace, `E` and a digit; earlier
/// `#` belong to the description.
fn find_version_marker(text: &str) -> Option<usize> {
    text.match_indices('#').map(|(idx, _)| idx).find(|&idx| {
        let mut after = text[idx + 1..].trim_start().chars();
        after.next() == Some('E') && after.next().is_some_and(|c| c.is_ascii_digit())
    })
}

fn parse_emoji_field(text: &str) -> Result<EmojiField, RecordError> {
    if text.is_empty() {
        return Err(RecordError::Grammar("empty emoji field"));
    }
    match text.split_once("..") {
        Some((first, last)) if !first.is_empty() && !last.is_empty() => {
            Ok(EmojiField::Range(first.to_owned(), last.to_owned()))
        }
        Some(_) => Err(RecordError::Grammar("incomplete emoji range")),
        None => Ok(EmojiField::Single(text.to_owned())),
    }
}

/// Curseur minimal sur la partie commentaire d'une ligne.
struct Cursor<'a> {
    text: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { text }
    }

    fn rest(&self) -> &'a str {
        self.text
    }

    fn skip_whitespace(&mut self) -> usize {
        let trimmed = self.text.trim_start();
        let skipped = self.text.len() - trimmed.len();
        self.text = trimmed;
        skipped
    }

    fn require_whitespace(&mut self, reason: &'static str) -> Result<(), RecordError> {
        if self.skip_whitespace() == 0 {
            return Err(RecordError::Grammar(reason));
        }
        Ok(())
    }

    fn expect(&mut self, c: char, reason: &'static str) -> Result<(), RecordError> {
        self.text = self
            .text
            .strip_prefix(c)
            .ok_or(RecordError::Grammar(reason))?;
        Ok(())
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let end = self
            .text
            .char_indices()
            .find(|&(_, c)| !pred(c))
            .map_or(self.text.len(), |(idx, _)| idx);
        let (taken, rest) = self.text.split_at(end);
        self.text = rest;
        taken
    }
}
