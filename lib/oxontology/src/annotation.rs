//! Annotations: non-logical statements attached to axioms, ontologies and other annotations.

use crate::entity::{AnnotationProperty, AnonymousIndividual};
use crate::literal::OwlLiteral;
use oxrdf::NamedNode;
use std::collections::BTreeSet;

/// An annotation `Annotation(annotations property value)`.
///
/// Annotations may themselves be annotated.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub struct Annotation {
    property: AnnotationProperty,
    value: AnnotationValue,
    annotations: BTreeSet<Annotation>,
}

impl Annotation {
    pub fn new(property: AnnotationProperty, value: impl Into<AnnotationValue>) -> Self {
        Self {
            property,
            value: value.into(),
            annotations: BTreeSet::new(),
        }
    }

    /// Attaches nested annotations.
    #[must_use]
    pub fn with_annotations(mut self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.annotations.extend(annotations);
        self
    }

    #[inline]
    pub fn property(&self) -> &AnnotationProperty {
        &self.property
    }

    #[inline]
    pub fn value(&self) -> &AnnotationValue {
        &self.value
    }

    #[inline]
    pub fn annotations(&self) -> &BTreeSet<Annotation> {
        &self.annotations
    }
}

/// The subject of an annotation assertion.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub enum AnnotationSubject {
    Iri(NamedNode),
    Anonymous(AnonymousIndividual),
}

impl From<NamedNode> for AnnotationSubject {
    #[inline]
    fn from(iri: NamedNode) -> Self {
        Self::Iri(iri)
    }
}

impl From<AnonymousIndividual> for AnnotationSubject {
    #[inline]
    fn from(individual: AnonymousIndividual) -> Self {
        Self::Anonymous(individual)
    }
}

/// The value of an annotation.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub enum AnnotationValue {
    Iri(NamedNode),
    Anonymous(AnonymousIndividual),
    Literal(OwlLiteral),
}

impl AnnotationValue {
    pub fn as_literal(&self) -> Option<&OwlLiteral> {
        match self {
            Self::Literal(l) => Some(l),
            Self::Iri(_) | Self::Anonymous(_) => None,
        }
    }
}

impl From<NamedNode> for AnnotationValue {
    #[inline]
    fn from(iri: NamedNode) -> Self {
        Self::Iri(iri)
    }
}

impl From<AnonymousIndividual> for AnnotationValue {
    #[inline]
    fn from(individual: AnonymousIndividual) -> Self {
        Self::Anonymous(individual)
    }
}

impl From<OwlLiteral> for AnnotationValue {
    #[inline]
    fn from(literal: OwlLiteral) -> Self {
        Self::Literal(literal)
    }
}
