use std::io::BufRead;

use crate::error::ConvertError;
use crate::names::{NameResolver, NameSource, UnicodeNames};
use crate::record::{EmojiField, Record, RecordError, is_ignorable, parse_record};

/// One (sequence, name) pair ready to be encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Code points of the emoji, in order.
    pub scalars: Vec<char>,
    /// Name written to the artifact.
    pub description: String,
    /// Display text of the emoji (informational).
    pub emoji: String,
}

/// Counters accumulated while producing entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryStats {
    /// Lines read, data or not.
    pub lines: usize,
    /// Blank and comment lines.
    pub skipped_lines: usize,
    /// `first..last` records.
    pub range_records: usize,
    /// Code point list records.
    pub sequence_records: usize,
    /// Entries yielded.
    pub entries: usize,
}

/// Intervalle en cours d'expansion.
#[derive(Debug, Clone, Copy)]
struct PendingRange {
    next: u32,
    last: u32,
}

/// Lazy producer of [`Entry`] values from a sequence data reader.
///
/// Lines are pulled one at a time; a range record only keeps a cursor, so
/// memory stays bounded whatever the range size. The first error ends the
/// iteration.
///
/// # Example
/// ```
/// use emoseq_core::entries::Entries;
/// use emoseq_core::names::NameResolver;
///
/// let data = "# comment\n231A..231B ; Basic_Emoji ; watch # E0.6 [2] (⌚..⌛)\n";
/// let resolver = NameResolver::new();
/// let names: Vec<String> = Entries::new(data.as_bytes(), &resolver)
///     .map(|entry| entry.unwrap().description)
///     .collect();
/// assert_eq!(names, ["watch", "hourglass"]);
/// ```
#[derive(Debug)]
pub struct Entries<'r, R, S = UnicodeNames> {
    lines: std::io::Lines<R>,
    resolver: &'r NameResolver<S>,
    pending: Option<PendingRange>,
    stats: EntryStats,
    failed: bool,
}

impl<'r, R: BufRead, S: NameSource> Entries<'r, R, S> {
    /// Wrap a reader.
    pub fn new(reader: R, resolver: &'r NameResolver<S>) -> Self {
        Self {
            lines: reader.lines(),
            resolver,
            pending: None,
            stats: EntryStats::default(),
            failed: false,
        }
    }

    /// Counters so far.
    #[must_use]
    pub fn stats(&self) -> EntryStats {
        self.stats
    }

    fn next_from_range(&mut self, range: PendingRange) -> Result<Entry, ConvertError> {
        let code_point = range.next;
        self.pending = (code_point < range.last).then_some(PendingRange {
            next: code_point + 1,
            last: range.last,
        });

        let c = char::from_u32(code_point).ok_or(ConvertError::InvalidCodePoint {
            line_number: self.stats.lines,
            value: code_point,
        })?;
        let description = self.resolver.resolve(code_point)?;
        Ok(Entry {
            scalars: vec![c],
            description,
            emoji: c.to_string(),
        })
    }

    /// Pull lines until a record yields an entry, or the input ends.
    fn next_from_lines(&mut self) -> Option<Result<Entry, ConvertError>> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(source) => {
                    return Some(Err(ConvertError::Read {
                        line_number: self.stats.lines + 1,
                        source,
                    }));
                }
            };
            self.stats.lines += 1;

            if is_ignorable(&line) {
                self.stats.skipped_lines += 1;
                continue;
            }

            let record = match parse_record(&line) {
                Ok(record) => record,
                Err(err) => return Some(Err(self.line_error(line, err))),
            };

            match record {
                Record::Range(range) => {
                    self.stats.range_records += 1;
                    let first = u32::from(range.first);
                    let last = u32::from(range.last);
                    let span = last - first + 1;
                    if span != range.fields.count {
                        log::warn!(
                            "ligne {} : intervalle de {span} code points annoncé [{}]",
                            self.stats.lines,
                            range.fields.count
                        );
                    }
                    log::debug!(
                        "ligne {} : U+{first:04X}..U+{last:04X} ({})",
                        self.stats.lines,
                        range.fields.type_field
                    );
                    return Some(self.next_from_range(PendingRange { next: first, last }));
                }
                Record::Sequence(seq) => {
                    self.stats.sequence_records += 1;
                    log::debug!(
                        "ligne {} : {} code point(s), {:?}",
                        self.stats.lines,
                        seq.scalars.len(),
                        seq.fields.description
                    );
                    let emoji = match seq.fields.emoji {
                        EmojiField::Single(text) => text,
                        EmojiField::Range(first, _) => first,
                    };
                    return Some(Ok(Entry {
                        scalars: seq.scalars,
                        description: seq.fields.description,
                        emoji,
                    }));
                }
            }
        }
    }

    fn line_error(&self, content: String, err: RecordError) -> ConvertError {
        let line_number = self.stats.lines;
        match err {
            RecordError::MalformedHex(token) => ConvertError::MalformedHex { line_number, token },
            RecordError::InvalidCodePoint(value) => {
                ConvertError::InvalidCodePoint { line_number, value }
            }
            RecordError::Grammar(reason) => ConvertError::Parse {
                line_number,
                content,
                reason: reason.to_owned(),
            },
        }
    }
}

impl<R: BufRead, S: NameSource> Iterator for Entries<'_, R, S> {
    type Item = Result<Entry, ConvertError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = match self.pending {
            Some(range) => Some(self.next_from_range(range)),
            None => self.next_from_lines(),
        };
        match &item {
            Some(Ok(_)) => self.stats.entries += 1,
            Some(Err(_)) => self.failed = true,
            None => {}
        }
        item
    }
}
