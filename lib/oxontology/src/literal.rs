use crate::entity::Datatype;
use oxilangtag::LanguageTagParseError;
use oxrdf::vocab::{rdf, xsd};
use oxrdf::{Literal, NamedNode, NamedNodeRef};
use std::cmp::Ordering;
use std::fmt;

/// An OWL 2 literal.
///
/// A thin wrapper around [`Literal`] adding the total order needed for canonical rendering:
/// literals compare by lexical form, then language tag, then datatype IRI.
///
/// ```
/// use oxontology::OwlLiteral;
/// use oxrdf::vocab::xsd;
///
/// let literal = OwlLiteral::new_simple_literal("abc");
/// assert_eq!(literal.datatype(), xsd::STRING);
/// assert!(literal < OwlLiteral::new_simple_literal("abd"));
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct OwlLiteral(Literal);

impl OwlLiteral {
    #[inline]
    pub fn new_simple_literal(value: impl Into<String>) -> Self {
        Self(Literal::new_simple_literal(value))
    }

    #[inline]
    pub fn new_typed_literal(value: impl Into<String>, datatype: impl Into<NamedNode>) -> Self {
        Self(Literal::new_typed_literal(value, datatype))
    }

    /// Builds a language-tagged literal. The tag is validated and normalized to lowercase.
    #[inline]
    pub fn new_language_tagged_literal(
        value: impl Into<String>,
        language: impl Into<String>,
    ) -> Result<Self, LanguageTagParseError> {
        Ok(Self(Literal::new_language_tagged_literal(value, language)?))
    }

    #[inline]
    pub fn value(&self) -> &str {
        self.0.value()
    }

    #[inline]
    pub fn language(&self) -> Option<&str> {
        self.0.language()
    }

    #[inline]
    pub fn datatype(&self) -> NamedNodeRef<'_> {
        self.0.datatype()
    }

    /// Returns the datatype as an OWL entity.
    pub fn owl_datatype(&self) -> Datatype {
        self.0.datatype().into()
    }

    /// Checks if the literal is of type `xsd:string`.
    #[inline]
    pub fn is_plain_string(&self) -> bool {
        self.0.datatype() == xsd::STRING
    }

    #[inline]
    pub fn is_language_tagged(&self) -> bool {
        self.0.datatype() == rdf::LANG_STRING
    }

    /// Returns the same literal typed with `datatype`.
    ///
    /// Language-tagged literals are returned unchanged.
    #[must_use]
    pub fn with_datatype(&self, datatype: &Datatype) -> Self {
        if self.is_language_tagged() || self.0.datatype() == datatype.iri().as_ref() {
            return self.clone();
        }
        Self::new_typed_literal(self.value(), datatype.iri().clone())
    }

    #[inline]
    pub fn as_literal(&self) -> &Literal {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> Literal {
        self.0
    }
}

impl PartialOrd for OwlLiteral {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OwlLiteral {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value()
            .cmp(other.value())
            .then_with(|| self.language().cmp(&other.language()))
            .then_with(|| self.datatype().as_str().cmp(other.datatype().as_str()))
    }
}

impl fmt::Display for OwlLiteral {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Literal> for OwlLiteral {
    #[inline]
    fn from(literal: Literal) -> Self {
        Self(literal)
    }
}

impl From<OwlLiteral> for Literal {
    #[inline]
    fn from(literal: OwlLiteral) -> Self {
        literal.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_string_is_simple() {
        assert_eq!(
            OwlLiteral::new_typed_literal("abc", xsd::STRING),
            OwlLiteral::new_simple_literal("abc")
        );
        assert!(OwlLiteral::new_simple_literal("abc").is_plain_string());
    }

    #[test]
    fn order_is_total() {
        let plain = OwlLiteral::new_simple_literal("1");
        let integer = OwlLiteral::new_typed_literal("1", xsd::INTEGER);
        let english = OwlLiteral::new_language_tagged_literal("1", "EN").unwrap();
        assert_eq!(english.language(), Some("en"));
        assert_ne!(plain.cmp(&integer), Ordering::Equal);
        assert!(plain < english);
        assert!(integer < plain);
    }

    #[test]
    fn retyping_keeps_language_tags() {
        let decimal = Datatype::from(xsd::DECIMAL);
        let english = OwlLiteral::new_language_tagged_literal("a", "en").unwrap();
        assert_eq!(english.with_datatype(&decimal), english);
        assert_eq!(
            OwlLiteral::new_typed_literal("1", xsd::INTEGER)
                .with_datatype(&decimal)
                .datatype(),
            xsd::DECIMAL
        );
    }
}
