use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::Path;

use crate::encode::RecordWriter;
use crate::entries::{Entries, EntryStats};
use crate::error::ConvertError;
use crate::names::{NameResolver, NameSource};

/// Options of a conversion run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Replace an existing destination instead of failing.
    pub overwrite: bool,
    /// Names for code points unknown to the standard database.
    pub extra_names: BTreeMap<u32, String>,
}

/// Outcome of a successful run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Counters from the entry producer.
    pub stats: EntryStats,
    /// Records written to the destination.
    pub records: usize,
    /// Size of the destination in bytes.
    pub bytes: u64,
}

/// Convert a UTS #51 sequence data file into the binary name table.
///
/// The source is opened first. Without `overwrite`, the destination is
/// created exclusively, so an existing file is never touched. The output is
/// flushed on every exit path; bytes written before an error stay.
///
/// # Errors
/// Returns the first [`ConvertError`] met: existing destination, unreadable
/// source, malformed line, unresolvable name, or write failure.
///
/// # Example
/// ```no_run
/// use emoseq_core::convert::{convert, ConvertOptions};
/// let summary = convert("emoji-sequences.txt", "emoji-data.bin", &ConvertOptions::default()).unwrap();
/// println!("{} records", summary.records);
/// ```
pub fn convert(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<ConvertSummary, ConvertError> {
    let resolver = NameResolver::new().with_extra_names(options.extra_names.clone());
    convert_with(source, destination, options.overwrite, &resolver)
}

/// [`convert`] with an explicit name resolver.
///
/// # Errors
/// Same as [`convert`].
pub fn convert_with<S: NameSource>(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    overwrite: bool,
    resolver: &NameResolver<S>,
) -> Result<ConvertSummary, ConvertError> {
    let source = source.as_ref();
    let destination = destination.as_ref();

    let input = File::open(source).map_err(|err| ConvertError::OpenSource {
        path: source.to_path_buf(),
        source: err,
    })?;
    let output = open_destination(destination, overwrite)?;
    log::debug!(
        "Conversion {} → {} (overwrite: {overwrite})",
        source.display(),
        destination.display()
    );

    let mut entries = Entries::new(BufReader::new(input), resolver);
    let mut writer = RecordWriter::new(BufWriter::new(output));

    let written = entries
        .by_ref()
        .try_for_each(|entry| writer.write_entry(&entry?));
    // Flush même en cas d'erreur : les octets déjà produits restent sur disque.
    let flushed = writer.flush();
    written?;
    flushed?;

    let summary = ConvertSummary {
        stats: entries.stats(),
        records: writer.records(),
        bytes: writer.bytes_written(),
    };
    log::info!(
        "{} enregistrements écrits ({} octets) depuis {} lignes : {} intervalles, {} séquences",
        summary.records,
        summary.bytes,
        summary.stats.lines,
        summary.stats.range_records,
        summary.stats.sequence_records
    );
    Ok(summary)
}

fn open_destination(path: &Path, overwrite: bool) -> Result<File, ConvertError> {
    let mut options = OpenOptions::new();
    options.write(true);
    if overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    options.open(path).map_err(|err| {
        if err.kind() == ErrorKind::AlreadyExists {
            ConvertError::DestinationExists {
                path: path.to_path_buf(),
            }
        } else {
            ConvertError::CreateDestination {
                path: path.to_path_buf(),
                source: err,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::DecodedRecords;

    const SAMPLE: &str = "\
# emoji-sequences.txt
# Date: 2023-02-01

231A..231B    ; Basic_Emoji                  ; watch                      # E0.6   [2] (⌚..⌛)
1F600         ; Basic_Emoji                  ; grinning face              # E1.0   [1] (😀)
0023 FE0F 20E3 ; Basic_Emoji ; keycap: # # # E0.6 [1] (#️⃣)
1F1EB 1F1F7   ; RGI_Emoji_Flag_Sequence      ; flag: France               # E0.6   [1] (🇫🇷)

# EOF
";

    fn write_source(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("emoji-sequences.txt");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn converts_sample_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(&dir, SAMPLE);
        let destination = dir.path().join("emoji-data.bin");

        let summary = convert(&source, &destination, &ConvertOptions::default()).unwrap();
        assert_eq!(summary.records, 5);
        assert_eq!(summary.stats.range_records, 1);
        assert_eq!(summary.stats.sequence_records, 3);

        let bytes = std::fs::read(&destination).unwrap();
        assert_eq!(summary.bytes, bytes.len() as u64);
        let records: Vec<(String, String)> = DecodedRecords::new(&bytes)
            .map(|r| r.map(|r| (r.sequence.to_owned(), r.name.to_owned())))
            .collect::<Result<_, _>>()
            .unwrap();
        let expected = [
            ("\u{231A}", "watch"),
            ("\u{231B}", "hourglass"),
            ("\u{1F600}", "grinning face"),
            ("\u{23}\u{FE0F}\u{20E3}", "keycap: # #"),
            ("\u{1F1EB}\u{1F1F7}", "flag: France"),
        ];
        assert_eq!(records.len(), expected.len());
        for ((seq, name), (exp_seq, exp_name)) in records.iter().zip(expected) {
            assert_eq!(seq, exp_seq);
            assert_eq!(name, exp_name);
        }
    }

    #[test]
    fn existing_destination_is_left_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(&dir, SAMPLE);
        let destination = dir.path().join("emoji-data.bin");
        std::fs::write(&destination, b"previous").unwrap();

        let err = convert(&source, &destination, &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, ConvertError::DestinationExists { .. }));
        assert_eq!(std::fs::read(&destination).unwrap(), b"previous");
    }

    #[test]
    fn overwrite_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(&dir, SAMPLE);
        let destination = dir.path().join("emoji-data.bin");
        std::fs::write(&destination, vec![0xAA; 4096]).unwrap();
        let options = ConvertOptions {
            overwrite: true,
            ..ConvertOptions::default()
        };

        convert(&source, &destination, &options).unwrap();
        let first = std::fs::read(&destination).unwrap();
        convert(&source, &destination, &options).unwrap();
        let second = std::fs::read(&destination).unwrap();
        assert_eq!(first, second);
        assert!(!first.contains(&0xAA));
    }

    #[test]
    fn missing_source_does_not_create_destination() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("emoji-data.bin");
        let err = convert(
            dir.path().join("absent.txt"),
            &destination,
            &ConvertOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::OpenSource { .. }));
        assert!(!destination.exists());
    }

    #[test]
    fn parse_error_aborts_after_flushing_previous_records() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(
            &dir,
            "1F600 ; Basic_Emoji ; grinning face # E1.0 [1] (😀)\n1F601 ; broken\n",
        );
        let destination = dir.path().join("emoji-data.bin");

        let err = convert(&source, &destination, &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, ConvertError::Parse { line_number: 2, .. }));
        assert_eq!(
            std::fs::read(&destination).unwrap(),
            "😀\u{1F}grinning face\u{1E}".as_bytes()
        );
    }

    #[test]
    fn extra_names_resolve_unknown_code_points() {
        struct Empty;
        impl NameSource for Empty {
            fn name(&self, _c: char) -> Option<String> {
                None
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let source = write_source(
            &dir,
            "1FAE7..1FAE8 ; Basic_Emoji ; bubbles # E14.0 [2] (🫧..🫨)\n",
        );
        let destination = dir.path().join("emoji-data.bin");
        let mut extra = BTreeMap::new();
        extra.insert(0x1FAE8, "Shaking Face".to_owned());
        let resolver = NameResolver::with_source(Empty).with_extra_names(extra);

        let summary = convert_with(&source, &destination, false, &resolver).unwrap();
        assert_eq!(summary.records, 2);
        assert_eq!(
            std::fs::read(&destination).unwrap(),
            "🫧\u{1F}bubbles\u{1E}🫨\u{1F}shaking face\u{1E}".as_bytes()
        );
    }
}
