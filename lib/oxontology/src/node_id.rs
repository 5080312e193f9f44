//! Identifiers for anonymous individuals.
//!
//! Generated identifiers live under the reserved `_:` prefix and carry the `genid` marker.
//! They exist in two interchangeable spellings:
//! * the short in-memory form `_:genid<suffix>`,
//! * the shared external form `_:genid-nodeid-<suffix>`, used when an identifier has to survive
//!   a medium that would otherwise mint its own blank node labels.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// The reserved prefix of every anonymous identifier.
pub const PREFIX: &str = "_:";
/// The marker of generated identifiers.
pub const NODE_ID_MARKER: &str = "genid";
/// The marker of the shared external form.
pub const SHARED_NODE_ID_MARKER: &str = "genid-nodeid-";

const PREFIX_NODE: &str = "_:genid";
const PREFIX_SHARED_NODE: &str = "_:genid-nodeid-";

/// Seed of the process-wide counter, above the range of common externally supplied numeric ids.
const COUNTER_SEED: u64 = i32::MAX as u64;

static PROCESS_ID_SOURCE: AtomicIdSource = AtomicIdSource::new(COUNTER_SEED);

/// A source of unique numbers used to mint anonymous identifiers.
///
/// Implementations must never return the same number twice.
pub trait IdSource: Send + Sync {
    fn next_id(&self) -> u64;
}

impl<T: IdSource + ?Sized> IdSource for &T {
    #[inline]
    fn next_id(&self) -> u64 {
        (**self).next_id()
    }
}

/// An [`IdSource`] backed by a single atomic counter.
///
/// ```
/// use oxontology::{AtomicIdSource, IdSource};
///
/// let source = AtomicIdSource::new(10);
/// assert_eq!(source.next_id(), 11);
/// assert_eq!(source.next_id(), 12);
/// ```
#[derive(Debug)]
pub struct AtomicIdSource {
    counter: AtomicU64,
}

impl AtomicIdSource {
    /// Builds a source whose first minted value is `seed + 1`.
    pub const fn new(seed: u64) -> Self {
        Self {
            counter: AtomicU64::new(seed),
        }
    }

    /// The process-wide source used by [`fresh_anonymous_id`].
    pub fn process() -> &'static Self {
        &PROCESS_ID_SOURCE
    }
}

impl Default for AtomicIdSource {
    fn default() -> Self {
        Self::new(COUNTER_SEED)
    }
}

impl IdSource for AtomicIdSource {
    #[inline]
    fn next_id(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// The identifier of an anonymous individual, always starting with `_:`.
///
/// ```
/// use oxontology::NodeId;
///
/// assert_eq!(NodeId::new("b1").as_str(), "_:b1");
/// assert_eq!(NodeId::new("_:b1").as_str(), "_:b1");
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub struct NodeId {
    id: String,
}

impl NodeId {
    /// Wraps `id` with the reserved prefix if it is not already there.
    ///
    /// An empty `id` gets a freshly minted identifier.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        if id.is_empty() {
            return fresh_anonymous_id();
        }
        if id.starts_with(PREFIX) {
            Self { id }
        } else {
            Self {
                id: format!("{PREFIX}{id}"),
            }
        }
    }

    /// Mints a new generated identifier from the given source.
    pub fn fresh_from(source: &dyn IdSource) -> Self {
        Self {
            id: format!("{PREFIX_NODE}{}", source.next_id()),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.id
    }

    /// Returns the identifier without the reserved `_:` prefix.
    #[inline]
    pub fn local_part(&self) -> &str {
        &self.id[PREFIX.len()..]
    }
}

impl fmt::Display for NodeId {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Mints a new identifier from the process-wide counter.
///
/// Never blocks and never returns the same value twice during the process lifetime.
pub fn fresh_anonymous_id() -> NodeId {
    NodeId::fresh_from(AtomicIdSource::process())
}

/// Wraps `raw` with the reserved prefix if it is absent. Idempotent.
pub fn named_id(raw: &str) -> NodeId {
    NodeId::new(raw)
}

/// Checks if `candidate` looks like a generated identifier.
///
/// This is a substring test: a user supplied `_:` label that happens to contain `genid` is also
/// recognized.
pub fn is_anonymous_node_name(candidate: &str) -> bool {
    candidate.starts_with(PREFIX) && candidate.contains(NODE_ID_MARKER)
}

/// Checks if `candidate` contains the shared external marker.
pub fn is_shared_node_name(candidate: &str) -> bool {
    candidate.contains(PREFIX_SHARED_NODE)
}

/// Converts an identifier into the shared external form `_:genid-nodeid-<suffix>`.
///
/// Already shared identifiers are returned unchanged.
///
/// ```
/// use oxontology::{from_external_form, to_external_form};
///
/// assert_eq!(to_external_form("_:genid42"), "_:genid-nodeid-42");
/// assert_eq!(from_external_form("_:genid-nodeid-42"), "_:genid42");
/// ```
pub fn to_external_form(id: &str) -> String {
    if id.starts_with(PREFIX_SHARED_NODE) {
        return id.to_owned();
    }
    let local = id.strip_prefix(PREFIX).unwrap_or(id);
    format!("{PREFIX_SHARED_NODE}{}", local.replace(NODE_ID_MARKER, ""))
}

/// Converts a shared external identifier back to the short in-memory form.
///
/// Identifiers that are not in the shared form are returned unchanged.
pub fn from_external_form(id: &str) -> String {
    match id.strip_prefix(PREFIX_SHARED_NODE) {
        Some(suffix) => format!("{PREFIX_NODE}{suffix}"),
        None => id.to_owned(),
    }
}

/// Turns any string into a legal XML NCName.
///
/// The reserved prefix and the markers are stripped everywhere, characters illegal in a NCName
/// are dropped, and `genid` is prepended when the remainder is empty or does not start with a
/// legal start character.
///
/// ```
/// use oxontology::sanitize_to_ncname;
///
/// assert_eq!(sanitize_to_ncname("_:genid12"), "genid12");
/// assert_eq!(sanitize_to_ncname("a b/c"), "abc");
/// assert_eq!(sanitize_to_ncname(""), "genid");
/// ```
pub fn sanitize_to_ncname(candidate: &str) -> String {
    let mut current = candidate.to_owned();
    loop {
        let stripped: String = strip_markers(&current)
            .chars()
            .filter(|c| is_name_char(*c) && *c != ':')
            .collect();
        if stripped == current {
            break;
        }
        current = stripped;
    }
    if !current.chars().next().is_some_and(is_nc_name_start_char) {
        current.insert_str(0, NODE_ID_MARKER);
    }
    current
}

fn strip_markers(input: &str) -> String {
    let mut output = input.to_owned();
    for marker in [SHARED_NODE_ID_MARKER, NODE_ID_MARKER, PREFIX] {
        while output.contains(marker) {
            output = output.replace(marker, "");
        }
    }
    output
}

/// Checks if `name` is a legal XML NCName.
pub fn is_nc_name(name: &str) -> bool {
    // Name - (Char* ':' Char*)
    let mut c = name.chars();
    if !c.next().is_some_and(is_nc_name_start_char) {
        return false;
    }
    c.all(|c| is_name_char(c) && c != ':')
}

fn is_nc_name_start_char(c: char) -> bool {
    c != ':' && is_name_start_char(c)
}

pub(crate) fn is_name_start_char(c: char) -> bool {
    // ":" | [A-Z] | "_" | [a-z] | [#xC0-#xD6] | [#xD8-#xF6] | [#xF8-#x2FF] | [#x370-#x37D] | [#x37F-#x1FFF] | [#x200C-#x200D] | [#x2070-#x218F] | [#x2C00-#x2FEF] | [#x3001-#xD7FF] | [#xF900-#xFDCF] | [#xFDF0-#xFFFD] | [#x10000-#xEFFFF]
    matches!(c,
        ':'
        | 'A'..='Z'
        | '_'
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

pub(crate) fn is_name_char(c: char) -> bool {
    // NameStartChar | "-" | "." | [0-9] | #xB7 | [#x0300-#x036F] | [#x203F-#x2040]
    is_name_start_char(c)
        || matches!(c, '-' | '.' | '0'..='9' | '\u{B7}' | '\u{0300}'..='\u{036F}' | '\u{203F}'..='\u{2040}')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn fresh_ids_are_prefixed_and_increasing() {
        let source = AtomicIdSource::default();
        let first = NodeId::fresh_from(&source);
        let second = NodeId::fresh_from(&source);
        assert_eq!(first.as_str(), "_:genid2147483648");
        assert_eq!(second.as_str(), "_:genid2147483649");
        assert!(is_anonymous_node_name(first.as_str()));
    }

    #[test]
    fn process_counter_is_unique_across_threads() {
        let handles = (0..4)
            .map(|_| thread::spawn(|| (0..250).map(|_| fresh_anonymous_id()).collect::<Vec<_>>()))
            .collect::<Vec<_>>();
        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicated anonymous identifier");
            }
        }
        assert_eq!(seen.len(), 1000);
    }

    #[test]
    fn named_id_is_idempotent() {
        let once = named_id("x");
        assert_eq!(once.as_str(), "_:x");
        assert_eq!(named_id(once.as_str()), once);
        assert!(is_anonymous_node_name(named_id("").as_str()));
    }

    #[test]
    fn recognition_is_a_substring_test() {
        assert!(is_anonymous_node_name("_:genid1"));
        assert!(is_anonymous_node_name("_:mygenidlabel"));
        assert!(!is_anonymous_node_name("_:b0"));
        assert!(!is_anonymous_node_name("http://example.com/genid"));
        assert!(is_shared_node_name("_:genid-nodeid-7"));
        assert!(!is_shared_node_name("_:genid7"));
    }

    #[test]
    fn external_form_round_trip() {
        let id = NodeId::fresh_from(&AtomicIdSource::new(0));
        let external = to_external_form(id.as_str());
        assert_eq!(external, "_:genid-nodeid-1");
        assert_eq!(to_external_form(&external), external);
        assert_eq!(from_external_form(&external), id.as_str());
        assert_eq!(from_external_form("_:b1"), "_:b1");
    }

    #[test]
    fn sanitize() {
        assert_eq!(sanitize_to_ncname("_:genid-nodeid-abc"), "abc");
        assert_eq!(sanitize_to_ncname("_:genid123"), "genid123");
        assert_eq!(sanitize_to_ncname("1abc"), "genid1abc");
        assert_eq!(sanitize_to_ncname("::"), "genid");
        assert_eq!(sanitize_to_ncname("x:y"), "xy");
        assert_eq!(sanitize_to_ncname("gen id"), "genid");
        assert_eq!(sanitize_to_ncname("xgenigenidd"), "x");
        assert_eq!(sanitize_to_ncname("-.-"), "genid-.-");
    }

    #[test]
    fn sanitize_is_idempotent() {
        for input in [
            "",
            "_:",
            "genid",
            "genidgenid",
            "xgenigenidd",
            "_:genid-nodeid-_:genid",
            "9 lives",
            "\u{e9}-\u{e7}",
            "ge_:nid",
            "a.b-c",
            "\u{B7}start",
        ] {
            let once = sanitize_to_ncname(input);
            assert!(is_nc_name(&once), "{once} is not a NCName");
            assert_eq!(sanitize_to_ncname(&once), once, "for input {input}");
        }
    }
}
