//! Read-only traversal of the object model.
//!
//! A [`Visitor`] has one method per node kind. Every method defaults to the matching `walk_*`
//! function, which visits all direct children, so an implementation only overrides the cases it
//! cares about and calls back into `walk_*` to keep descending.

use crate::annotation::{Annotation, AnnotationSubject, AnnotationValue};
use crate::axiom::{Axiom, AxiomKind};
use crate::entity::{
    AnnotationProperty, AnonymousIndividual, DataProperty, Datatype, Entity, Individual,
    NamedIndividual, ObjectProperty, OwlClass,
};
use crate::expression::{ClassExpression, DataRange, FacetRestriction, ObjectPropertyExpression};
use crate::literal::OwlLiteral;
use crate::ontology::Ontology;
use crate::rule::{Atom, DArgument, IArgument, Rule, SwrlVariable};
use oxrdf::NamedNode;

/// An algorithm over the object model, with one case per node kind.
pub trait Visitor {
    type Error;

    fn visit_ontology(&mut self, ontology: &Ontology) -> Result<(), Self::Error> {
        walk_ontology(self, ontology)
    }

    fn visit_axiom(&mut self, axiom: &Axiom) -> Result<(), Self::Error> {
        walk_axiom(self, axiom)
    }

    fn visit_annotation(&mut self, annotation: &Annotation) -> Result<(), Self::Error> {
        walk_annotation(self, annotation)
    }

    fn visit_annotation_subject(
        &mut self,
        subject: &AnnotationSubject,
    ) -> Result<(), Self::Error> {
        match subject {
            AnnotationSubject::Iri(iri) => self.visit_iri(iri),
            AnnotationSubject::Anonymous(i) => self.visit_anonymous_individual(i),
        }
    }

    fn visit_annotation_value(&mut self, value: &AnnotationValue) -> Result<(), Self::Error> {
        match value {
            AnnotationValue::Iri(iri) => self.visit_iri(iri),
            AnnotationValue::Anonymous(i) => self.visit_anonymous_individual(i),
            AnnotationValue::Literal(l) => self.visit_literal(l),
        }
    }

    fn visit_class_expression(&mut self, expression: &ClassExpression) -> Result<(), Self::Error> {
        walk_class_expression(self, expression)
    }

    fn visit_object_property_expression(
        &mut self,
        expression: &ObjectPropertyExpression,
    ) -> Result<(), Self::Error> {
        match expression {
            ObjectPropertyExpression::ObjectProperty(p)
            | ObjectPropertyExpression::ObjectInverseOf(p) => self.visit_object_property(p),
        }
    }

    fn visit_data_range(&mut self, range: &DataRange) -> Result<(), Self::Error> {
        walk_data_range(self, range)
    }

    fn visit_facet_restriction(
        &mut self,
        restriction: &FacetRestriction,
    ) -> Result<(), Self::Error> {
        self.visit_iri(restriction.facet())?;
        self.visit_literal(restriction.value())
    }

    fn visit_individual(&mut self, individual: &Individual) -> Result<(), Self::Error> {
        match individual {
            Individual::Named(i) => self.visit_named_individual(i),
            Individual::Anonymous(i) => self.visit_anonymous_individual(i),
        }
    }

    fn visit_entity(&mut self, entity: &Entity) -> Result<(), Self::Error> {
        match entity {
            Entity::AnnotationProperty(e) => self.visit_annotation_property(e),
            Entity::ObjectProperty(e) => self.visit_object_property(e),
            Entity::DataProperty(e) => self.visit_data_property(e),
            Entity::Datatype(e) => self.visit_datatype(e),
            Entity::Class(e) => self.visit_class(e),
            Entity::NamedIndividual(e) => self.visit_named_individual(e),
        }
    }

    fn visit_class(&mut self, _class: &OwlClass) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_object_property(&mut self, _property: &ObjectProperty) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_data_property(&mut self, _property: &DataProperty) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_annotation_property(
        &mut self,
        _property: &AnnotationProperty,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_datatype(&mut self, _datatype: &Datatype) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_named_individual(
        &mut self,
        _individual: &NamedIndividual,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_anonymous_individual(
        &mut self,
        _individual: &AnonymousIndividual,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// By default visits the datatype of the literal.
    fn visit_literal(&mut self, literal: &OwlLiteral) -> Result<(), Self::Error> {
        self.visit_datatype(&literal.owl_datatype())
    }

    /// Bare IRIs: annotation subjects and values, facets, annotation property domains and ranges.
    fn visit_iri(&mut self, _iri: &NamedNode) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_rule(&mut self, rule: &Rule) -> Result<(), Self::Error> {
        for atom in rule.body() {
            self.visit_atom(atom)?;
        }
        for atom in rule.head() {
            self.visit_atom(atom)?;
        }
        Ok(())
    }

    fn visit_atom(&mut self, atom: &Atom) -> Result<(), Self::Error> {
        walk_atom(self, atom)
    }

    fn visit_i_argument(&mut self, argument: &IArgument) -> Result<(), Self::Error> {
        match argument {
            IArgument::Individual(i) => self.visit_individual(i),
            IArgument::Variable(v) => self.visit_variable(v),
        }
    }

    fn visit_d_argument(&mut self, argument: &DArgument) -> Result<(), Self::Error> {
        match argument {
            DArgument::Literal(l) => self.visit_literal(l),
            DArgument::Variable(v) => self.visit_variable(v),
        }
    }

    /// Variables are leaves and are never expanded.
    fn visit_variable(&mut self, _variable: &SwrlVariable) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Visits the ontology annotations, then every axiom.
pub fn walk_ontology<V: Visitor + ?Sized>(
    visitor: &mut V,
    ontology: &Ontology,
) -> Result<(), V::Error> {
    for annotation in ontology.annotations() {
        visitor.visit_annotation(annotation)?;
    }
    for axiom in ontology.axioms() {
        visitor.visit_axiom(axiom)?;
    }
    Ok(())
}

/// Visits the content of the axiom, then its annotations.
pub fn walk_axiom<V: Visitor + ?Sized>(visitor: &mut V, axiom: &Axiom) -> Result<(), V::Error> {
    walk_axiom_kind(visitor, axiom.kind())?;
    for annotation in axiom.annotations() {
        visitor.visit_annotation(annotation)?;
    }
    Ok(())
}

/// Visits the logical content of an axiom, without its annotations.
pub fn walk_axiom_kind<V: Visitor + ?Sized>(
    visitor: &mut V,
    kind: &AxiomKind,
) -> Result<(), V::Error> {
    match kind {
        AxiomKind::Declaration(entity) => visitor.visit_entity(entity),
        AxiomKind::SubClassOf {
            sub_class,
            super_class,
        } => {
            visitor.visit_class_expression(sub_class)?;
            visitor.visit_class_expression(super_class)
        }
        AxiomKind::EquivalentClasses(operands) | AxiomKind::DisjointClasses(operands) => {
            for operand in operands {
                visitor.visit_class_expression(operand)?;
            }
            Ok(())
        }
        AxiomKind::DisjointUnion {
            class,
            disjoint_classes,
        } => {
            visitor.visit_class(class)?;
            for operand in disjoint_classes {
                visitor.visit_class_expression(operand)?;
            }
            Ok(())
        }
        AxiomKind::SubObjectPropertyOf {
            sub_property,
            super_property,
        } => {
            visitor.visit_object_property_expression(sub_property)?;
            visitor.visit_object_property_expression(super_property)
        }
        AxiomKind::SubPropertyChainOf {
            property_chain,
            super_property,
        } => {
            for property in property_chain {
                visitor.visit_object_property_expression(property)?;
            }
            visitor.visit_object_property_expression(super_property)
        }
        AxiomKind::EquivalentObjectProperties(operands)
        | AxiomKind::DisjointObjectProperties(operands) => {
            for operand in operands {
                visitor.visit_object_property_expression(operand)?;
            }
            Ok(())
        }
        AxiomKind::InverseObjectProperties(first, second) => {
            visitor.visit_object_property_expression(first)?;
            visitor.visit_object_property_expression(second)
        }
        AxiomKind::ObjectPropertyDomain {
            property,
            domain: class_expression,
        }
        | AxiomKind::ObjectPropertyRange {
            property,
            range: class_expression,
        } => {
            visitor.visit_object_property_expression(property)?;
            visitor.visit_class_expression(class_expression)
        }
        AxiomKind::FunctionalObjectProperty(p)
        | AxiomKind::InverseFunctionalObjectProperty(p)
        | AxiomKind::ReflexiveObjectProperty(p)
        | AxiomKind::IrreflexiveObjectProperty(p)
        | AxiomKind::SymmetricObjectProperty(p)
        | AxiomKind::AsymmetricObjectProperty(p)
        | AxiomKind::TransitiveObjectProperty(p) => visitor.visit_object_property_expression(p),
        AxiomKind::SubDataPropertyOf {
            sub_property,
            super_property,
        } => {
            visitor.visit_data_property(sub_property)?;
            visitor.visit_data_property(super_property)
        }
        AxiomKind::EquivalentDataProperties(operands)
        | AxiomKind::DisjointDataProperties(operands) => {
            for operand in operands {
                visitor.visit_data_property(operand)?;
            }
            Ok(())
        }
        AxiomKind::DataPropertyDomain { property, domain } => {
            visitor.visit_data_property(property)?;
            visitor.visit_class_expression(domain)
        }
        AxiomKind::DataPropertyRange { property, range } => {
            visitor.visit_data_property(property)?;
            visitor.visit_data_range(range)
        }
        AxiomKind::FunctionalDataProperty(p) => visitor.visit_data_property(p),
        AxiomKind::DatatypeDefinition {
            datatype,
            data_range,
        } => {
            visitor.visit_datatype(datatype)?;
            visitor.visit_data_range(data_range)
        }
        AxiomKind::HasKey {
            class_expression,
            object_properties,
            data_properties,
        } => {
            visitor.visit_class_expression(class_expression)?;
            for property in object_properties {
                visitor.visit_object_property_expression(property)?;
            }
            for property in data_properties {
                visitor.visit_data_property(property)?;
            }
            Ok(())
        }
        AxiomKind::SameIndividual(individuals) | AxiomKind::DifferentIndividuals(individuals) => {
            for individual in individuals {
                visitor.visit_individual(individual)?;
            }
            Ok(())
        }
        AxiomKind::ClassAssertion {
            class_expression,
            individual,
        } => {
            visitor.visit_class_expression(class_expression)?;
            visitor.visit_individual(individual)
        }
        AxiomKind::ObjectPropertyAssertion {
            property,
            source,
            target,
        }
        | AxiomKind::NegativeObjectPropertyAssertion {
            property,
            source,
            target,
        } => {
            visitor.visit_object_property_expression(property)?;
            visitor.visit_individual(source)?;
            visitor.visit_individual(target)
        }
        AxiomKind::DataPropertyAssertion {
            property,
            source,
            target,
        }
        | AxiomKind::NegativeDataPropertyAssertion {
            property,
            source,
            target,
        } => {
            visitor.visit_data_property(property)?;
            visitor.visit_individual(source)?;
            visitor.visit_literal(target)
        }
        AxiomKind::AnnotationAssertion {
            property,
            subject,
            value,
        } => {
            visitor.visit_annotation_property(property)?;
            visitor.visit_annotation_subject(subject)?;
            visitor.visit_annotation_value(value)
        }
        AxiomKind::SubAnnotationPropertyOf {
            sub_property,
            super_property,
        } => {
            visitor.visit_annotation_property(sub_property)?;
            visitor.visit_annotation_property(super_property)
        }
        AxiomKind::AnnotationPropertyDomain {
            property,
            domain: iri,
        }
        | AxiomKind::AnnotationPropertyRange {
            property,
            range: iri,
        } => {
            visitor.visit_annotation_property(property)?;
            visitor.visit_iri(iri)
        }
        AxiomKind::Rule(rule) => visitor.visit_rule(rule),
    }
}

/// Visits the property, the value and the nested annotations.
pub fn walk_annotation<V: Visitor + ?Sized>(
    visitor: &mut V,
    annotation: &Annotation,
) -> Result<(), V::Error> {
    visitor.visit_annotation_property(annotation.property())?;
    visitor.visit_annotation_value(annotation.value())?;
    for nested in annotation.annotations() {
        visitor.visit_annotation(nested)?;
    }
    Ok(())
}

pub fn walk_class_expression<V: Visitor + ?Sized>(
    visitor: &mut V,
    expression: &ClassExpression,
) -> Result<(), V::Error> {
    match expression {
        ClassExpression::Class(c) => visitor.visit_class(c),
        ClassExpression::ObjectIntersectionOf(operands)
        | ClassExpression::ObjectUnionOf(operands) => {
            for operand in operands {
                visitor.visit_class_expression(operand)?;
            }
            Ok(())
        }
        ClassExpression::ObjectComplementOf(operand) => visitor.visit_class_expression(operand),
        ClassExpression::ObjectOneOf(individuals) => {
            for individual in individuals {
                visitor.visit_individual(individual)?;
            }
            Ok(())
        }
        ClassExpression::ObjectSomeValuesFrom { property, filler }
        | ClassExpression::ObjectAllValuesFrom { property, filler }
        | ClassExpression::ObjectMinCardinality {
            property, filler, ..
        }
        | ClassExpression::ObjectMaxCardinality {
            property, filler, ..
        }
        | ClassExpression::ObjectExactCardinality {
            property, filler, ..
        } => {
            visitor.visit_object_property_expression(property)?;
            visitor.visit_class_expression(filler)
        }
        ClassExpression::ObjectHasValue {
            property,
            individual,
        } => {
            visitor.visit_object_property_expression(property)?;
            visitor.visit_individual(individual)
        }
        ClassExpression::ObjectHasSelf(property) => {
            visitor.visit_object_property_expression(property)
        }
        ClassExpression::DataSomeValuesFrom { property, filler }
        | ClassExpression::DataAllValuesFrom { property, filler }
        | ClassExpression::DataMinCardinality {
            property, filler, ..
        }
        | ClassExpression::DataMaxCardinality {
            property, filler, ..
        }
        | ClassExpression::DataExactCardinality {
            property, filler, ..
        } => {
            visitor.visit_data_property(property)?;
            visitor.visit_data_range(filler)
        }
        ClassExpression::DataHasValue { property, value } => {
            visitor.visit_data_property(property)?;
            visitor.visit_literal(value)
        }
    }
}

pub fn walk_data_range<V: Visitor + ?Sized>(
    visitor: &mut V,
    range: &DataRange,
) -> Result<(), V::Error> {
    match range {
        DataRange::Datatype(d) => visitor.visit_datatype(d),
        DataRange::DataIntersectionOf(operands) | DataRange::DataUnionOf(operands) => {
            for operand in operands {
                visitor.visit_data_range(operand)?;
            }
            Ok(())
        }
        DataRange::DataComplementOf(operand) => visitor.visit_data_range(operand),
        DataRange::DataOneOf(literals) => {
            for literal in literals {
                visitor.visit_literal(literal)?;
            }
            Ok(())
        }
        DataRange::DatatypeRestriction {
            datatype,
            restrictions,
        } => {
            visitor.visit_datatype(datatype)?;
            for restriction in restrictions {
                visitor.visit_facet_restriction(restriction)?;
            }
            Ok(())
        }
    }
}

pub fn walk_atom<V: Visitor + ?Sized>(visitor: &mut V, atom: &Atom) -> Result<(), V::Error> {
    match atom {
        Atom::Class {
            class_expression,
            argument,
        } => {
            visitor.visit_class_expression(class_expression)?;
            visitor.visit_i_argument(argument)
        }
        Atom::DataRange {
            data_range,
            argument,
        } => {
            visitor.visit_data_range(data_range)?;
            visitor.visit_d_argument(argument)
        }
        Atom::ObjectProperty {
            property,
            subject,
            object,
        } => {
            visitor.visit_object_property_expression(property)?;
            visitor.visit_i_argument(subject)?;
            visitor.visit_i_argument(object)
        }
        Atom::DataProperty {
            property,
            subject,
            object,
        } => {
            visitor.visit_data_property(property)?;
            visitor.visit_i_argument(subject)?;
            visitor.visit_d_argument(object)
        }
        Atom::BuiltIn {
            predicate,
            arguments,
        } => {
            visitor.visit_iri(predicate)?;
            for argument in arguments {
                visitor.visit_d_argument(argument)?;
            }
            Ok(())
        }
        Atom::SameIndividual(first, second) | Atom::DifferentIndividuals(first, second) => {
            visitor.visit_i_argument(first)?;
            visitor.visit_i_argument(second)
        }
    }
}
