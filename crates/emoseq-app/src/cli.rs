use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// emoseq — Convert Emoji Sequence Data (UTS #51) into a binary name table.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Fichier Emoji Sequence Data (emoji-sequences.txt).
    pub src: PathBuf,

    /// Fichier binaire de sortie.
    pub dst: PathBuf,

    /// Écraser le fichier de sortie s'il existe déjà.
    #[arg(long, default_value_t = false)]
    pub overwrite_dst: bool,

    /// Relire le fichier produit et vérifier le nombre d'enregistrements.
    #[arg(long, default_value_t = false)]
    pub verify: bool,

    /// Fichier de configuration TOML (noms supplémentaires, options par défaut).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "debug")]
    pub log_level: String,

    /// Format des messages de log.
    #[arg(long, value_enum, default_value_t = LogFormat::Default)]
    pub log_format: LogFormat,
}

/// Mise en forme des lignes de log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// `timestamp,LEVEL: message`
    Default,
    /// Message seul.
    Plain,
}

impl Cli {
    /// Level filter from `--log-level`, `warn` when unparseable.
    #[must_use]
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Warn)
    }
}
