use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use emoseq_core::config::ConvertConfig;
use emoseq_core::encode::DecodedRecords;

pub mod cli;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    init_logging(&cli);
    log::debug!("start at {} UTC", chrono::Utc::now().to_rfc3339());

    // 3. Charger la config, puis appliquer les overrides CLI
    let config = resolve_config(&cli)?;

    // 4. Conversion
    let summary = emoseq_core::convert(&cli.src, &cli.dst, &config.to_options())
        .with_context(|| format!("Conversion de {} échouée", cli.src.display()))?;

    // 5. Vérification optionnelle
    if config.verify {
        verify_output(&cli.dst, summary.records)?;
        log::info!("Vérification OK : {} enregistrements", summary.records);
    }

    log::debug!("end at {} UTC", chrono::Utc::now().to_rfc3339());
    Ok(())
}

fn init_logging(cli: &cli::Cli) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(cli.level_filter());
    match cli.log_format {
        cli::LogFormat::Default => builder.format(|buf, record| {
            writeln!(
                buf,
                "{},{}: {}",
                buf.timestamp(),
                record.level(),
                record.args()
            )
        }),
        cli::LogFormat::Plain => builder.format(|buf, record| writeln!(buf, "{}", record.args())),
    };
    builder.init();
}

/// Resolve config: file values first, CLI flags on top.
fn resolve_config(cli: &cli::Cli) -> Result<ConvertConfig> {
    let mut config = match cli.config {
        Some(ref path) => emoseq_core::config::load_config(path)?,
        None => ConvertConfig::default(),
    };
    config.overwrite |= cli.overwrite_dst;
    config.verify |= cli.verify;
    if !config.extra_names.is_empty() {
        log::debug!("{} noms supplémentaires chargés", config.extra_names.len());
    }
    Ok(config)
}

/// Read the artifact back and check it decodes into `expected` records.
fn verify_output(path: &Path, expected: usize) -> Result<()> {
    let data =
        std::fs::read(path).with_context(|| format!("Impossible de relire {}", path.display()))?;
    let mut count = 0usize;
    for record in DecodedRecords::new(&data) {
        record.with_context(|| format!("Artefact invalide : {}", path.display()))?;
        count += 1;
    }
    if count != expected {
        anyhow::bail!(
            "Artefact incohérent : {count} enregistrements relus, {expected} écrits ({})",
            path.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli_for(args: &[&str]) -> cli::Cli {
        let mut argv = vec!["emoseq", "in.txt", "out.bin"];
        argv.extend_from_slice(args);
        cli::Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn cli_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("emoseq.toml");
        std::fs::write(&path, "[convert]\nverify = true\n\n[names]\n\"1FAE8\" = \"shaking face\"\n")
            .unwrap();
        let path_str = path.to_str().unwrap();

        let config = resolve_config(&cli_for(&["-c", path_str, "--overwrite-dst"])).unwrap();
        assert!(config.overwrite);
        assert!(config.verify);
        assert_eq!(config.extra_names.len(), 1);
    }

    #[test]
    fn no_config_file_means_defaults() {
        let config = resolve_config(&cli_for(&[])).unwrap();
        assert_eq!(config, ConvertConfig::default());
    }

    #[test]
    fn verify_counts_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("emoji-data.bin");
        std::fs::write(&path, "⌚\u{1F}watch\u{1E}⌛\u{1F}hourglass\u{1E}").unwrap();
        assert!(verify_output(&path, 2).is_ok());
        assert!(verify_output(&path, 3).is_err());
    }

    #[test]
    fn verify_rejects_corrupted_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("emoji-data.bin");
        std::fs::write(&path, b"\xF0\x9F\x1Fname\x1E").unwrap();
        assert!(verify_output(&path, 1).is_err());
    }
}
