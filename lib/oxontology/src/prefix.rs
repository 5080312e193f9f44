//! Prefix tables for abbreviated IRIs.

use crate::vocab::owl;
use crate::error::PrefixError;
use oxiri::Iri;
use std::collections::BTreeMap;

/// A bidirectional map between prefix names and namespaces.
///
/// Prefix names are stored without the trailing `:`. The empty name is the default prefix.
///
/// ```
/// use oxontology::PrefixMap;
///
/// let mut prefixes = PrefixMap::with_standard_prefixes();
/// prefixes.add_prefix("ex", "http://example.com/")?;
/// assert_eq!(
///     prefixes.abbreviate("http://example.com/Person").as_deref(),
///     Some("ex:Person")
/// );
/// assert_eq!(prefixes.abbreviate("http://example.com/"), None);
/// assert_eq!(
///     prefixes.expand("ex:Person").as_deref(),
///     Some("http://example.com/Person")
/// );
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixMap {
    prefixes: BTreeMap<String, String>,
}

impl PrefixMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map with the `owl`, `rdf`, `rdfs`, `xml` and `xsd` prefixes.
    pub fn with_standard_prefixes() -> Self {
        let mut prefixes = BTreeMap::new();
        for (name, namespace) in [
            ("owl", owl::NAMESPACE),
            ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
            ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
            ("xml", "http://www.w3.org/XML/1998/namespace"),
            ("xsd", "http://www.w3.org/2001/XMLSchema#"),
        ] {
            prefixes.insert(name.into(), namespace.into());
        }
        Self { prefixes }
    }

    /// Binds `name` to `namespace`, replacing any previous binding of `name`.
    ///
    /// A trailing `:` in `name` is ignored.
    pub fn add_prefix(
        &mut self,
        name: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Result<&mut Self, PrefixError> {
        let mut name = name.into();
        if name.ends_with(':') {
            name.pop();
        }
        if !is_valid_prefix_name(&name) {
            return Err(PrefixError::InvalidName(name));
        }
        let namespace = Iri::parse(namespace.into())?.into_inner();
        self.prefixes.insert(name, namespace);
        Ok(self)
    }

    /// Binds the default (empty) prefix.
    pub fn set_default_prefix(
        &mut self,
        namespace: impl Into<String>,
    ) -> Result<&mut Self, PrefixError> {
        self.add_prefix("", namespace)
    }

    pub fn default_prefix(&self) -> Option<&str> {
        self.namespace("")
    }

    pub fn namespace(&self, name: &str) -> Option<&str> {
        self.prefixes.get(name).map(String::as_str)
    }

    pub fn remove_prefix(&mut self, name: &str) -> Option<String> {
        self.prefixes.remove(name)
    }

    /// Iterates over `(name, namespace)` pairs, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes
            .iter()
            .map(|(name, namespace)| (name.as_str(), namespace.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Returns the `name:local` form of `iri`, if one exists.
    ///
    /// The longest matching namespace wins, then the smallest prefix name. The local part must be
    /// non-empty and usable unescaped in an abbreviated IRI, otherwise `None` is returned.
    pub fn abbreviate(&self, iri: &str) -> Option<String> {
        let mut best: Option<(&str, &str)> = None;
        for (name, namespace) in &self.prefixes {
            let Some(local) = iri.strip_prefix(namespace.as_str()) else {
                continue;
            };
            if !is_valid_local_name(local) {
                continue;
            }
            // Names are iterated in order so only a strictly longer namespace replaces the best one
            if best.is_none_or(|(_, best_local)| local.len() < best_local.len()) {
                best = Some((name, local));
            }
        }
        best.map(|(name, local)| format!("{name}:{local}"))
    }

    /// Expands a `name:local` abbreviated IRI.
    pub fn expand(&self, abbreviated: &str) -> Option<String> {
        let (name, local) = abbreviated.split_once(':')?;
        let namespace = self.prefixes.get(name)?;
        Some(format!("{namespace}{local}"))
    }
}

impl<'a> IntoIterator for &'a PrefixMap {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Checks that `local` matches the PN_LOCAL production without escapes.
fn is_valid_local_name(local: &str) -> bool {
    let mut chars = local.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(is_possible_pn_chars_u(first) || first == ':' || first.is_ascii_digit()) {
        return false;
    }
    if local.ends_with('.') {
        return false;
    }
    chars.all(|c| is_possible_pn_chars(c) || c == ':' || c == '.')
}

pub(crate) fn is_possible_pn_chars_base(c: char) -> bool {
    matches!(c,
        'A'..='Z'
        | 'a'..='z'
        | '\u{00C0}'..='\u{00D6}'
        | '\u{00D8}'..='\u{00F6}'
        | '\u{00F8}'..='\u{02FF}'
        | '\u{0370}'..='\u{037D}'
        | '\u{037F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

pub(crate) fn is_possible_pn_chars_u(c: char) -> bool {
    is_possible_pn_chars_base(c) || c == '_'
}

pub(crate) fn is_possible_pn_chars(c: char) -> bool {
    is_possible_pn_chars_u(c)
        || matches!(c,
        '-' | '0'..='9' | '\u{00B7}' | '\u{0300}'..='\u{036F}' | '\u{203F}'..='\u{2040}')
}

/// Checks that `name` is a valid prefix name (PN_PREFIX), the empty name included.
pub(crate) fn is_valid_prefix_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return true;
    };
    is_possible_pn_chars_base(first)
        && !name.ends_with('.')
        && chars.all(|c| is_possible_pn_chars(c) || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_namespace_wins() {
        let mut prefixes = PrefixMap::new();
        prefixes.add_prefix("a", "http://example.com/").unwrap();
        prefixes.add_prefix("b", "http://example.com/ns/").unwrap();
        assert_eq!(
            prefixes.abbreviate("http://example.com/ns/x").as_deref(),
            Some("b:x")
        );
        assert_eq!(
            prefixes.abbreviate("http://example.com/y").as_deref(),
            Some("a:y")
        );
    }

    #[test]
    fn ties_go_to_the_smallest_name() {
        let mut prefixes = PrefixMap::new();
        prefixes.add_prefix("z", "http://example.com/").unwrap();
        prefixes.add_prefix("m", "http://example.com/").unwrap();
        assert_eq!(
            prefixes.abbreviate("http://example.com/x").as_deref(),
            Some("m:x")
        );
    }

    #[test]
    fn illegal_local_names_are_not_abbreviated() {
        let mut prefixes = PrefixMap::new();
        prefixes.add_prefix("ex", "http://example.com/").unwrap();
        assert_eq!(prefixes.abbreviate("http://example.com/"), None);
        assert_eq!(prefixes.abbreviate("http://example.com/a/b"), None);
        assert_eq!(prefixes.abbreviate("http://example.com/a."), None);
        assert_eq!(prefixes.abbreviate("http://example.com/-a"), None);
        assert_eq!(
            prefixes.abbreviate("http://example.com/1a.b").as_deref(),
            Some("ex:1a.b")
        );
        assert_eq!(prefixes.abbreviate("http://other.com/a"), None);
    }

    #[test]
    fn default_prefix() {
        let mut prefixes = PrefixMap::new();
        prefixes.set_default_prefix("http://example.com/o#").unwrap();
        assert_eq!(prefixes.default_prefix(), Some("http://example.com/o#"));
        assert_eq!(
            prefixes.abbreviate("http://example.com/o#A").as_deref(),
            Some(":A")
        );
        assert_eq!(
            prefixes.expand(":A").as_deref(),
            Some("http://example.com/o#A")
        );
        assert_eq!(prefixes.expand("unknown:A"), None);
    }

    #[test]
    fn invalid_bindings_are_rejected() {
        assert!(matches!(
            PrefixMap::new().add_prefix("ex", "not an iri"),
            Err(PrefixError::InvalidNamespace(_))
        ));
        assert!(matches!(
            PrefixMap::new().add_prefix("1ex", "http://example.com/"),
            Err(PrefixError::InvalidName(_))
        ));
        let mut prefixes = PrefixMap::new();
        prefixes.add_prefix("ex:", "http://example.com/").unwrap();
        assert_eq!(prefixes.namespace("ex"), Some("http://example.com/"));
    }

    #[test]
    fn prefix_names() {
        assert!(is_valid_prefix_name(""));
        assert!(is_valid_prefix_name("owl"));
        assert!(is_valid_prefix_name("a.b"));
        assert!(!is_valid_prefix_name("_a"));
        assert!(!is_valid_prefix_name("a."));
    }
}
