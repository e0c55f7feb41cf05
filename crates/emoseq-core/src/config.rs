use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::convert::ConvertOptions;

/// Configuration d'une conversion, chargée depuis un fichier TOML.
///
/// Every key is optional; a missing file section keeps the default.
///
/// # Example
/// ```
/// use emoseq_core::config::ConvertConfig;
/// let config = ConvertConfig::default();
/// assert!(!config.overwrite);
/// assert!(config.extra_names.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConvertConfig {
    /// Replace an existing destination.
    pub overwrite: bool,
    /// Read the artifact back after writing it.
    pub verify: bool,
    /// Names for code points the embedded database lacks.
    pub extra_names: BTreeMap<u32, String>,
}

impl ConvertConfig {
    /// Options handed to [`crate::convert::convert`].
    #[must_use]
    pub fn to_options(&self) -> ConvertOptions {
        ConvertOptions {
            overwrite: self.overwrite,
            extra_names: self.extra_names.clone(),
        }
    }
}

/// Structure brute du fichier TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    convert: ConvertSection,
    #[serde(default)]
    names: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConvertSection {
    overwrite: Option<bool>,
    verify: Option<bool>,
}

/// Load a configuration file.
///
/// # Errors
/// Returns an error if the file cannot be read, is not valid TOML, or a
/// `[names]` key is not a hexadecimal code point.
pub fn load_config(path: &Path) -> Result<ConvertConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Configuration invalide : {}", path.display()))
}

/// Parse configuration text.
///
/// # Errors
/// Same as [`load_config`], minus the I/O.
///
/// # Example
/// ```
/// use emoseq_core::config::parse_config;
/// let config = parse_config("[names]\n\"1FAE8\" = \"shaking face\"\n").unwrap();
/// assert_eq!(config.extra_names[&0x1FAE8], "shaking face");
/// ```
pub fn parse_config(content: &str) -> Result<ConvertConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut config = ConvertConfig::default();
    if let Some(v) = file.convert.overwrite {
        config.overwrite = v;
    }
    if let Some(v) = file.convert.verify {
        config.verify = v;
    }
    for (key, name) in file.names {
        let code_point = parse_code_point_key(&key)
            .with_context(|| format!("Clé [names] invalide : {key:?}"))?;
        config.extra_names.insert(code_point, name);
    }
    Ok(config)
}

/// Accepts `1FAE8`, `U+1FAE8` and `0x1FAE8`.
fn parse_code_point_key(key: &str) -> Result<u32> {
    let hex = key
        .strip_prefix("U+")
        .or_else(|| key.strip_prefix("0x"))
        .unwrap_or(key);
    let value = u32::from_str_radix(hex, 16).context("not hexadecimal")?;
    if char::from_u32(value).is_none() {
        anyhow::bail!("U+{value:04X} is not a Unicode scalar value");
    }
    Ok(value)
}
