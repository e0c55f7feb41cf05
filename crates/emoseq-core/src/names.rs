use std::collections::BTreeMap;

use crate::error::ConvertError;
use crate::overrides::override_name;

/// Fournit le nom Unicode standard d'un code point.
///
/// # Example
/// ```
/// use emoseq_core::names::NameSource;
///
/// struct NoNames;
/// impl NameSource for NoNames {
///     fn name(&self, _c: char) -> Option<String> { None }
/// }
/// assert!(NoNames.name('a').is_none());
/// ```
pub trait NameSource {
    /// Standard display name, or `None` when the database has no entry.
    fn name(&self, c: char) -> Option<String>;
}

/// Name database embedded by the `unicode_names2` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnicodeNames;

impl NameSource for UnicodeNames {
    fn name(&self, c: char) -> Option<String> {
        unicode_names2::name(c).map(|name| name.to_string())
    }
}

/// Resolves range code points to lowercase names.
///
/// Lookup order: the [`NameSource`], then the extra names supplied by the
/// configuration, then the built-in override table.
///
/// # Example
/// ```
/// use emoseq_core::names::NameResolver;
/// let resolver = NameResolver::new();
/// assert_eq!(resolver.resolve(0x1F600).unwrap(), "grinning face");
/// ```
#[derive(Debug, Clone)]
pub struct NameResolver<S = UnicodeNames> {
    source: S,
    extra: BTreeMap<u32, String>,
}

impl NameResolver {
    /// Resolver backed by [`UnicodeNames`], without extra names.
    #[must_use]
    pub fn new() -> Self {
        Self::with_source(UnicodeNames)
    }
}

impl Default for NameResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: NameSource> NameResolver<S> {
    /// Build a resolver over an arbitrary name source.
    #[must_use]
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            extra: BTreeMap::new(),
        }
    }

    /// Add names consulted when the source has none.
    #[must_use]
    pub fn with_extra_names(mut self, extra: BTreeMap<u32, String>) -> Self {
        self.extra = extra;
        self
    }

    /// Resolve the lowercase name of `code_point`.
    ///
    /// # Errors
    /// Returns [`ConvertError::UnresolvedName`] if no table knows the code point.
    pub fn resolve(&self, code_point: u32) -> Result<String, ConvertError> {
        let standard = char::from_u32(code_point).and_then(|c| self.source.name(c));
        let name = standard
            .or_else(|| self.extra.get(&code_point).cloned())
            .or_else(|| override_name(code_point).map(str::to_owned))
            .ok_or(ConvertError::UnresolvedName { code_point })?;
        Ok(name.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Simule une base de noms ancienne qui ne connaît qu'un seul code point.
    struct OnlyGrinning;

    impl NameSource for OnlyGrinning {
        fn name(&self, c: char) -> Option<String> {
            (c == '\u{1F600}').then(|| "GRINNING FACE".to_owned())
        }
    }

    #[test]
    fn standard_names_are_lowercased() {
        let resolver = NameResolver::new();
        assert_eq!(resolver.resolve(0x231A).unwrap(), "watch");
        assert_eq!(resolver.resolve(0x1F602).unwrap(), "face with tears of joy");
    }

    #[test]
    fn falls_back_to_override_table() {
        let resolver = NameResolver::with_source(OnlyGrinning);
        assert_eq!(resolver.resolve(0x1F600).unwrap(), "grinning face");
        assert_eq!(resolver.resolve(0x1FAE0).unwrap(), "melting face");
    }

    #[test]
    fn extra_names_take_precedence_over_overrides() {
        let mut extra = BTreeMap::new();
        extra.insert(0x1FAE0, "Melting Face (custom)".to_owned());
        extra.insert(0x1FAE8, "shaking face".to_owned());
        let resolver = NameResolver::with_source(OnlyGrinning).with_extra_names(extra);
        assert_eq!(resolver.resolve(0x1FAE0).unwrap(), "melting face (custom)");
        assert_eq!(resolver.resolve(0x1FAE8).unwrap(), "shaking face");
    }

    #[test]
    fn unknown_code_point_is_an_error() {
        let resolver = NameResolver::with_source(OnlyGrinning);
        let err = resolver.resolve(0x1F601).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::UnresolvedName {
                code_point: 0x1F601
            }
        ));
    }
}
