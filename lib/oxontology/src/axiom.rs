//! OWL 2 axiom types.
//!
//! Axioms are the basic statements in an OWL 2 ontology. An [`Axiom`] pairs the logical content
//! ([`AxiomKind`]) with its set of annotations.

use crate::annotation::{Annotation, AnnotationSubject, AnnotationValue};
use crate::entity::{
    AnnotationProperty, DataProperty, Datatype, Entity, Individual, ObjectProperty, OwlClass,
};
use crate::expression::{ClassExpression, DataRange, ObjectPropertyExpression};
use crate::literal::OwlLiteral;
use crate::rule::Rule;
use oxrdf::NamedNode;
use std::collections::BTreeSet;

/// The logical content of an OWL 2 axiom.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub enum AxiomKind {
    /// Declaration(Entity)
    Declaration(Entity),

    // === Class Axioms ===
    /// SubClassOf(sub, super)
    SubClassOf {
        sub_class: ClassExpression,
        super_class: ClassExpression,
    },

    /// EquivalentClasses(C1, C2, ...)
    EquivalentClasses(BTreeSet<ClassExpression>),

    /// DisjointClasses(C1, C2, ...)
    DisjointClasses(BTreeSet<ClassExpression>),

    /// DisjointUnion(C, C1, ..., Cn)
    DisjointUnion {
        class: OwlClass,
        disjoint_classes: BTreeSet<ClassExpression>,
    },

    // === Object Property Axioms ===
    /// SubObjectPropertyOf(sub, super)
    SubObjectPropertyOf {
        sub_property: ObjectPropertyExpression,
        super_property: ObjectPropertyExpression,
    },

    /// SubObjectPropertyOf(ObjectPropertyChain(P1 ... Pn), P)
    SubPropertyChainOf {
        property_chain: Vec<ObjectPropertyExpression>,
        super_property: ObjectPropertyExpression,
    },

    /// EquivalentObjectProperties(P1, P2, ...)
    EquivalentObjectProperties(BTreeSet<ObjectPropertyExpression>),

    /// DisjointObjectProperties(P1, P2, ...)
    DisjointObjectProperties(BTreeSet<ObjectPropertyExpression>),

    /// InverseObjectProperties(P1, P2)
    InverseObjectProperties(ObjectPropertyExpression, ObjectPropertyExpression),

    /// ObjectPropertyDomain(P, C)
    ObjectPropertyDomain {
        property: ObjectPropertyExpression,
        domain: ClassExpression,
    },

    /// ObjectPropertyRange(P, C)
    ObjectPropertyRange {
        property: ObjectPropertyExpression,
        range: ClassExpression,
    },

    /// FunctionalObjectProperty(P)
    FunctionalObjectProperty(ObjectPropertyExpression),

    /// InverseFunctionalObjectProperty(P)
    InverseFunctionalObjectProperty(ObjectPropertyExpression),

    /// ReflexiveObjectProperty(P)
    ReflexiveObjectProperty(ObjectPropertyExpression),

    /// IrreflexiveObjectProperty(P)
    IrreflexiveObjectProperty(ObjectPropertyExpression),

    /// SymmetricObjectProperty(P)
    SymmetricObjectProperty(ObjectPropertyExpression),

    /// AsymmetricObjectProperty(P)
    AsymmetricObjectProperty(ObjectPropertyExpression),

    /// TransitiveObjectProperty(P)
    TransitiveObjectProperty(ObjectPropertyExpression),

    // === Data Property Axioms ===
    /// SubDataPropertyOf(sub, super)
    SubDataPropertyOf {
        sub_property: DataProperty,
        super_property: DataProperty,
    },

    /// EquivalentDataProperties(P1, P2, ...)
    EquivalentDataProperties(BTreeSet<DataProperty>),

    /// DisjointDataProperties(P1, P2, ...)
    DisjointDataProperties(BTreeSet<DataProperty>),

    /// DataPropertyDomain(P, C)
    DataPropertyDomain {
        property: DataProperty,
        domain: ClassExpression,
    },

    /// DataPropertyRange(P, D)
    DataPropertyRange {
        property: DataProperty,
        range: DataRange,
    },

    /// FunctionalDataProperty(P)
    FunctionalDataProperty(DataProperty),

    /// DatatypeDefinition(DT, D)
    DatatypeDefinition {
        datatype: Datatype,
        data_range: DataRange,
    },

    /// HasKey(C (P1 ... Pm) (D1 ... Dn))
    HasKey {
        class_expression: ClassExpression,
        object_properties: BTreeSet<ObjectPropertyExpression>,
        data_properties: BTreeSet<DataProperty>,
    },

    // === Assertions ===
    /// SameIndividual(a1, a2, ...)
    SameIndividual(BTreeSet<Individual>),

    /// DifferentIndividuals(a1, a2, ...)
    DifferentIndividuals(BTreeSet<Individual>),

    /// ClassAssertion(C, a)
    ClassAssertion {
        class_expression: ClassExpression,
        individual: Individual,
    },

    /// ObjectPropertyAssertion(P, a, b)
    ObjectPropertyAssertion {
        property: ObjectPropertyExpression,
        source: Individual,
        target: Individual,
    },

    /// NegativeObjectPropertyAssertion(P, a, b)
    NegativeObjectPropertyAssertion {
        property: ObjectPropertyExpression,
        source: Individual,
        target: Individual,
    },

    /// DataPropertyAssertion(P, a, v)
    DataPropertyAssertion {
        property: DataProperty,
        source: Individual,
        target: OwlLiteral,
    },

    /// NegativeDataPropertyAssertion(P, a, v)
    NegativeDataPropertyAssertion {
        property: DataProperty,
        source: Individual,
        target: OwlLiteral,
    },

    // === Annotation Axioms ===
    /// AnnotationAssertion(AP, s, v)
    AnnotationAssertion {
        property: AnnotationProperty,
        subject: AnnotationSubject,
        value: AnnotationValue,
    },

    /// SubAnnotationPropertyOf(sub, super)
    SubAnnotationPropertyOf {
        sub_property: AnnotationProperty,
        super_property: AnnotationProperty,
    },

    /// AnnotationPropertyDomain(AP, iri)
    AnnotationPropertyDomain {
        property: AnnotationProperty,
        domain: NamedNode,
    },

    /// AnnotationPropertyRange(AP, iri)
    AnnotationPropertyRange {
        property: AnnotationProperty,
        range: NamedNode,
    },

    /// DLSafeRule(Body(...) Head(...))
    Rule(Rule),
}

impl AxiomKind {
    /// The functional-style syntax keyword of this axiom.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Declaration(_) => "Declaration",
            Self::SubClassOf { .. } => "SubClassOf",
            Self::EquivalentClasses(_) => "EquivalentClasses",
            Self::DisjointClasses(_) => "DisjointClasses",
            Self::DisjointUnion { .. } => "DisjointUnion",
            Self::SubObjectPropertyOf { .. } | Self::SubPropertyChainOf { .. } => {
                "SubObjectPropertyOf"
            }
            Self::EquivalentObjectProperties(_) => "EquivalentObjectProperties",
            Self::DisjointObjectProperties(_) => "DisjointObjectProperties",
            Self::InverseObjectProperties(_, _) => "InverseObjectProperties",
            Self::ObjectPropertyDomain { .. } => "ObjectPropertyDomain",
            Self::ObjectPropertyRange { .. } => "ObjectPropertyRange",
            Self::FunctionalObjectProperty(_) => "FunctionalObjectProperty",
            Self::InverseFunctionalObjectProperty(_) => "InverseFunctionalObjectProperty",
            Self::ReflexiveObjectProperty(_) => "ReflexiveObjectProperty",
            Self::IrreflexiveObjectProperty(_) => "IrreflexiveObjectProperty",
            Self::SymmetricObjectProperty(_) => "SymmetricObjectProperty",
            Self::AsymmetricObjectProperty(_) => "AsymmetricObjectProperty",
            Self::TransitiveObjectProperty(_) => "TransitiveObjectProperty",
            Self::SubDataPropertyOf { .. } => "SubDataPropertyOf",
            Self::EquivalentDataProperties(_) => "EquivalentDataProperties",
            Self::DisjointDataProperties(_) => "DisjointDataProperties",
            Self::DataPropertyDomain { .. } => "DataPropertyDomain",
            Self::DataPropertyRange { .. } => "DataPropertyRange",
            Self::FunctionalDataProperty(_) => "FunctionalDataProperty",
            Self::DatatypeDefinition { .. } => "DatatypeDefinition",
            Self::HasKey { .. } => "HasKey",
            Self::SameIndividual(_) => "SameIndividual",
            Self::DifferentIndividuals(_) => "DifferentIndividuals",
            Self::ClassAssertion { .. } => "ClassAssertion",
            Self::ObjectPropertyAssertion { .. } => "ObjectPropertyAssertion",
            Self::NegativeObjectPropertyAssertion { .. } => "NegativeObjectPropertyAssertion",
            Self::DataPropertyAssertion { .. } => "DataPropertyAssertion",
            Self::NegativeDataPropertyAssertion { .. } => "NegativeDataPropertyAssertion",
            Self::AnnotationAssertion { .. } => "AnnotationAssertion",
            Self::SubAnnotationPropertyOf { .. } => "SubAnnotationPropertyOf",
            Self::AnnotationPropertyDomain { .. } => "AnnotationPropertyDomain",
            Self::AnnotationPropertyRange { .. } => "AnnotationPropertyRange",
            Self::Rule(_) => "DLSafeRule",
        }
    }

    /// Checks if an n-ary axiom has fewer operands than OWL 2 requires.
    pub fn is_below_minimum_arity(&self) -> bool {
        match self {
            Self::EquivalentClasses(operands) | Self::DisjointClasses(operands) => {
                operands.len() < 2
            }
            Self::EquivalentObjectProperties(operands)
            | Self::DisjointObjectProperties(operands) => operands.len() < 2,
            Self::EquivalentDataProperties(operands) | Self::DisjointDataProperties(operands) => {
                operands.len() < 2
            }
            Self::SameIndividual(operands) | Self::DifferentIndividuals(operands) => {
                operands.len() < 2
            }
            Self::DisjointUnion {
                disjoint_classes, ..
            } => disjoint_classes.len() < 2,
            Self::SubPropertyChainOf { property_chain, .. } => property_chain.len() < 2,
            _ => false,
        }
    }
}

/// An OWL 2 axiom: logical content plus annotations.
///
/// Annotations take part in equality. In the ordering they only break ties between axioms with
/// the same content.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub struct Axiom {
    kind: AxiomKind,
    annotations: BTreeSet<Annotation>,
}

impl Axiom {
    #[inline]
    pub fn new(kind: AxiomKind) -> Self {
        Self {
            kind,
            annotations: BTreeSet::new(),
        }
    }

    pub fn new_annotated(
        kind: AxiomKind,
        annotations: impl IntoIterator<Item = Annotation>,
    ) -> Self {
        Self {
            kind,
            annotations: annotations.into_iter().collect(),
        }
    }

    /// Adds annotations to the axiom.
    #[must_use]
    pub fn with_annotations(mut self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.annotations.extend(annotations);
        self
    }

    #[inline]
    pub fn kind(&self) -> &AxiomKind {
        &self.kind
    }

    #[inline]
    pub fn annotations(&self) -> &BTreeSet<Annotation> {
        &self.annotations
    }

    #[inline]
    pub fn is_annotated(&self) -> bool {
        !self.annotations.is_empty()
    }

    /// Returns the same axiom without annotations.
    #[must_use]
    pub fn without_annotations(&self) -> Self {
        Self::new(self.kind.clone())
    }

    pub fn into_parts(self) -> (AxiomKind, BTreeSet<Annotation>) {
        (self.kind, self.annotations)
    }

    /// Declaration(entity)
    pub fn declaration(entity: impl Into<Entity>) -> Self {
        Self::new(AxiomKind::Declaration(entity.into()))
    }

    /// SubClassOf(sub, super)
    pub fn subclass_of(sub_class: ClassExpression, super_class: ClassExpression) -> Self {
        Self::new(AxiomKind::SubClassOf {
            sub_class,
            super_class,
        })
    }

    /// EquivalentClasses(C1, C2, ...)
    pub fn equivalent_classes(classes: impl IntoIterator<Item = ClassExpression>) -> Self {
        Self::new(AxiomKind::EquivalentClasses(classes.into_iter().collect()))
    }

    /// DisjointClasses(C1, C2, ...)
    pub fn disjoint_classes(classes: impl IntoIterator<Item = ClassExpression>) -> Self {
        Self::new(AxiomKind::DisjointClasses(classes.into_iter().collect()))
    }

    /// ClassAssertion(C, a)
    pub fn class_assertion(class_expression: ClassExpression, individual: Individual) -> Self {
        Self::new(AxiomKind::ClassAssertion {
            class_expression,
            individual,
        })
    }

    /// ObjectPropertyAssertion(P, a, b)
    pub fn object_property_assertion(
        property: impl Into<ObjectPropertyExpression>,
        source: Individual,
        target: Individual,
    ) -> Self {
        Self::new(AxiomKind::ObjectPropertyAssertion {
            property: property.into(),
            source,
            target,
        })
    }

    /// DataPropertyAssertion(P, a, v)
    pub fn data_property_assertion(
        property: DataProperty,
        source: Individual,
        target: OwlLiteral,
    ) -> Self {
        Self::new(AxiomKind::DataPropertyAssertion {
            property,
            source,
            target,
        })
    }

    /// AnnotationAssertion(AP, s, v)
    pub fn annotation_assertion(
        property: AnnotationProperty,
        subject: impl Into<AnnotationSubject>,
        value: impl Into<AnnotationValue>,
    ) -> Self {
        Self::new(AxiomKind::AnnotationAssertion {
            property,
            subject: subject.into(),
            value: value.into(),
        })
    }

    /// FunctionalObjectProperty(P)
    pub fn functional_object_property(property: impl Into<ObjectPropertyExpression>) -> Self {
        Self::new(AxiomKind::FunctionalObjectProperty(property.into()))
    }

    /// ObjectPropertyDomain(P, C)
    pub fn object_property_domain(
        property: impl Into<ObjectPropertyExpression>,
        domain: ClassExpression,
    ) -> Self {
        Self::new(AxiomKind::ObjectPropertyDomain {
            property: property.into(),
            domain,
        })
    }

    /// DLSafeRule(...)
    pub fn rule(rule: Rule) -> Self {
        Self::new(AxiomKind::Rule(rule))
    }

    /// Returns the declared entity if this is a declaration axiom.
    pub fn declared_entity(&self) -> Option<&Entity> {
        match &self.kind {
            AxiomKind::Declaration(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the IRI subject if this is an annotation assertion about an IRI.
    pub fn annotation_subject_iri(&self) -> Option<&NamedNode> {
        match &self.kind {
            AxiomKind::AnnotationAssertion {
                subject: AnnotationSubject::Iri(iri),
                ..
            } => Some(iri),
            _ => None,
        }
    }

    /// Checks if this axiom is part of the logical content of an ontology.
    pub fn is_logical(&self) -> bool {
        !matches!(
            self.kind,
            AxiomKind::Declaration(_)
                | AxiomKind::AnnotationAssertion { .. }
                | AxiomKind::SubAnnotationPropertyOf { .. }
                | AxiomKind::AnnotationPropertyDomain { .. }
                | AxiomKind::AnnotationPropertyRange { .. }
        )
    }
}

impl From<AxiomKind> for Axiom {
    #[inline]
    fn from(kind: AxiomKind) -> Self {
        Self::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::vocab::rdfs;

    fn class(name: &str) -> ClassExpression {
        OwlClass::new(NamedNode::new_unchecked(format!("http://example.com/{name}"))).into()
    }

    #[test]
    fn annotations_take_part_in_equality() {
        let plain = Axiom::subclass_of(class("A"), class("B"));
        let annotated = plain.clone().with_annotations([Annotation::new(
            rdfs::COMMENT.into(),
            OwlLiteral::new_simple_literal("note"),
        )]);
        assert_ne!(plain, annotated);
        assert_eq!(annotated.without_annotations(), plain);
        assert!(plain < annotated);
    }

    #[test]
    fn annotations_only_break_ties() {
        let annotated = Axiom::subclass_of(class("A"), class("B")).with_annotations([
            Annotation::new(rdfs::COMMENT.into(), OwlLiteral::new_simple_literal("a")),
        ]);
        let other = Axiom::subclass_of(class("A"), class("C"));
        assert!(annotated < other);
    }

    #[test]
    fn minimum_arity() {
        assert!(Axiom::equivalent_classes([class("A")])
            .kind()
            .is_below_minimum_arity());
        assert!(Axiom::disjoint_classes([class("A"), class("A")])
            .kind()
            .is_below_minimum_arity());
        assert!(!Axiom::disjoint_classes([class("A"), class("B")])
            .kind()
            .is_below_minimum_arity());
        assert!(!Axiom::subclass_of(class("A"), class("A"))
            .kind()
            .is_below_minimum_arity());
    }
}
