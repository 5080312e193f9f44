//! Rebuilding traversal of the object model.
//!
//! A [`Folder`] maps every node to a node of the same kind. The default methods rebuild each
//! compound node from its folded children (post-order) and return leaves unchanged, so a folder
//! that overrides nothing returns a structurally equal copy of its input.

use crate::annotation::{Annotation, AnnotationSubject, AnnotationValue};
use crate::axiom::{Axiom, AxiomKind};
use crate::entity::{
    AnnotationProperty, AnonymousIndividual, DataProperty, Datatype, Entity, Individual,
    NamedIndividual, ObjectProperty, OwlClass,
};
use crate::expression::{ClassExpression, DataRange, FacetRestriction, ObjectPropertyExpression};
use crate::literal::OwlLiteral;
use crate::rule::{Atom, DArgument, IArgument, Rule, SwrlVariable};
use oxrdf::NamedNode;

/// A rebuilding algorithm over the object model, with one case per node kind.
pub trait Folder {
    fn fold_axiom(&mut self, axiom: &Axiom) -> Axiom {
        rebuild_axiom(self, axiom)
    }

    fn fold_annotation(&mut self, annotation: &Annotation) -> Annotation {
        rebuild_annotation(self, annotation)
    }

    fn fold_annotation_subject(&mut self, subject: &AnnotationSubject) -> AnnotationSubject {
        match subject {
            AnnotationSubject::Iri(iri) => AnnotationSubject::Iri(self.fold_iri(iri)),
            AnnotationSubject::Anonymous(i) => {
                AnnotationSubject::Anonymous(self.fold_anonymous_individual(i))
            }
        }
    }

    fn fold_annotation_value(&mut self, value: &AnnotationValue) -> AnnotationValue {
        match value {
            AnnotationValue::Iri(iri) => AnnotationValue::Iri(self.fold_iri(iri)),
            AnnotationValue::Anonymous(i) => {
                AnnotationValue::Anonymous(self.fold_anonymous_individual(i))
            }
            AnnotationValue::Literal(l) => AnnotationValue::Literal(self.fold_literal(l)),
        }
    }

    fn fold_class_expression(&mut self, expression: &ClassExpression) -> ClassExpression {
        rebuild_class_expression(self, expression)
    }

    fn fold_object_property_expression(
        &mut self,
        expression: &ObjectPropertyExpression,
    ) -> ObjectPropertyExpression {
        match expression {
            ObjectPropertyExpression::ObjectProperty(p) => {
                ObjectPropertyExpression::ObjectProperty(self.fold_object_property(p))
            }
            ObjectPropertyExpression::ObjectInverseOf(p) => {
                ObjectPropertyExpression::ObjectInverseOf(self.fold_object_property(p))
            }
        }
    }

    fn fold_data_range(&mut self, range: &DataRange) -> DataRange {
        rebuild_data_range(self, range)
    }

    fn fold_facet_restriction(&mut self, restriction: &FacetRestriction) -> FacetRestriction {
        FacetRestriction::new(
            restriction.facet().clone(),
            self.fold_literal(restriction.value()),
        )
    }

    fn fold_individual(&mut self, individual: &Individual) -> Individual {
        match individual {
            Individual::Named(i) => Individual::Named(self.fold_named_individual(i)),
            Individual::Anonymous(i) => Individual::Anonymous(self.fold_anonymous_individual(i)),
        }
    }

    fn fold_entity(&mut self, entity: &Entity) -> Entity {
        match entity {
            Entity::AnnotationProperty(e) => {
                Entity::AnnotationProperty(self.fold_annotation_property(e))
            }
            Entity::ObjectProperty(e) => Entity::ObjectProperty(self.fold_object_property(e)),
            Entity::DataProperty(e) => Entity::DataProperty(self.fold_data_property(e)),
            Entity::Datatype(e) => Entity::Datatype(self.fold_datatype(e)),
            Entity::Class(e) => Entity::Class(self.fold_class(e)),
            Entity::NamedIndividual(e) => Entity::NamedIndividual(self.fold_named_individual(e)),
        }
    }

    fn fold_class(&mut self, class: &OwlClass) -> OwlClass {
        class.clone()
    }

    fn fold_object_property(&mut self, property: &ObjectProperty) -> ObjectProperty {
        property.clone()
    }

    fn fold_data_property(&mut self, property: &DataProperty) -> DataProperty {
        property.clone()
    }

    fn fold_annotation_property(&mut self, property: &AnnotationProperty) -> AnnotationProperty {
        property.clone()
    }

    fn fold_datatype(&mut self, datatype: &Datatype) -> Datatype {
        datatype.clone()
    }

    fn fold_named_individual(&mut self, individual: &NamedIndividual) -> NamedIndividual {
        individual.clone()
    }

    fn fold_anonymous_individual(
        &mut self,
        individual: &AnonymousIndividual,
    ) -> AnonymousIndividual {
        individual.clone()
    }

    /// By default rebuilds the literal with its folded datatype.
    fn fold_literal(&mut self, literal: &OwlLiteral) -> OwlLiteral {
        rebuild_literal(self, literal)
    }

    fn fold_iri(&mut self, iri: &NamedNode) -> NamedNode {
        iri.clone()
    }

    fn fold_rule(&mut self, rule: &Rule) -> Rule {
        Rule::new(
            rule.body().iter().map(|a| self.fold_atom(a)).collect::<Vec<_>>(),
            rule.head().iter().map(|a| self.fold_atom(a)).collect::<Vec<_>>(),
        )
    }

    fn fold_atom(&mut self, atom: &Atom) -> Atom {
        rebuild_atom(self, atom)
    }

    fn fold_i_argument(&mut self, argument: &IArgument) -> IArgument {
        match argument {
            IArgument::Individual(i) => IArgument::Individual(self.fold_individual(i)),
            IArgument::Variable(v) => IArgument::Variable(self.fold_variable(v)),
        }
    }

    fn fold_d_argument(&mut self, argument: &DArgument) -> DArgument {
        match argument {
            DArgument::Literal(l) => DArgument::Literal(self.fold_literal(l)),
            DArgument::Variable(v) => DArgument::Variable(self.fold_variable(v)),
        }
    }

    fn fold_variable(&mut self, variable: &SwrlVariable) -> SwrlVariable {
        variable.clone()
    }
}

/// Rebuilds an axiom from its folded content and folded annotations.
pub fn rebuild_axiom<F: Folder + ?Sized>(folder: &mut F, axiom: &Axiom) -> Axiom {
    let kind = rebuild_axiom_kind(folder, axiom.kind());
    Axiom::new_annotated(
        kind,
        axiom
            .annotations()
            .iter()
            .map(|a| folder.fold_annotation(a))
            .collect::<Vec<_>>(),
    )
}

pub fn rebuild_annotation<F: Folder + ?Sized>(folder: &mut F, annotation: &Annotation) -> Annotation {
    let property = folder.fold_annotation_property(annotation.property());
    let value = folder.fold_annotation_value(annotation.value());
    let rebuilt = Annotation::new(property, value);
    if annotation.annotations().is_empty() {
        return rebuilt;
    }
    let nested = annotation
        .annotations()
        .iter()
        .map(|a| folder.fold_annotation(a))
        .collect::<Vec<_>>();
    rebuilt.with_annotations(nested)
}

/// Rebuilds a literal with its datatype folded. Language-tagged literals are kept as they are.
pub fn rebuild_literal<F: Folder + ?Sized>(folder: &mut F, literal: &OwlLiteral) -> OwlLiteral {
    if literal.is_language_tagged() {
        return literal.clone();
    }
    let datatype = folder.fold_datatype(&literal.owl_datatype());
    literal.with_datatype(&datatype)
}

fn fold_class_expressions<'a, F: Folder + ?Sized>(
    folder: &mut F,
    operands: impl IntoIterator<Item = &'a ClassExpression>,
) -> Vec<ClassExpression> {
    operands
        .into_iter()
        .map(|o| folder.fold_class_expression(o))
        .collect()
}

fn fold_object_property_expressions<'a, F: Folder + ?Sized>(
    folder: &mut F,
    operands: impl IntoIterator<Item = &'a ObjectPropertyExpression>,
) -> Vec<ObjectPropertyExpression> {
    operands
        .into_iter()
        .map(|o| folder.fold_object_property_expression(o))
        .collect()
}

fn fold_individuals<'a, F: Folder + ?Sized>(
    folder: &mut F,
    operands: impl IntoIterator<Item = &'a Individual>,
) -> Vec<Individual> {
    operands
        .into_iter()
        .map(|o| folder.fold_individual(o))
        .collect()
}

pub fn rebuild_axiom_kind<F: Folder + ?Sized>(folder: &mut F, kind: &AxiomKind) -> AxiomKind {
    match kind {
        AxiomKind::Declaration(entity) => AxiomKind::Declaration(folder.fold_entity(entity)),
        AxiomKind::SubClassOf {
            sub_class,
            super_class,
        } => AxiomKind::SubClassOf {
            sub_class: folder.fold_class_expression(sub_class),
            super_class: folder.fold_class_expression(super_class),
        },
        AxiomKind::EquivalentClasses(operands) => AxiomKind::EquivalentClasses(
            fold_class_expressions(folder, operands).into_iter().collect(),
        ),
        AxiomKind::DisjointClasses(operands) => AxiomKind::DisjointClasses(
            fold_class_expressions(folder, operands).into_iter().collect(),
        ),
        AxiomKind::DisjointUnion {
            class,
            disjoint_classes,
        } => AxiomKind::DisjointUnion {
            class: folder.fold_class(class),
            disjoint_classes: fold_class_expressions(folder, disjoint_classes)
                .into_iter()
                .collect(),
        },
        AxiomKind::SubObjectPropertyOf {
            sub_property,
            super_property,
        } => AxiomKind::SubObjectPropertyOf {
            sub_property: folder.fold_object_property_expression(sub_property),
            super_property: folder.fold_object_property_expression(super_property),
        },
        AxiomKind::SubPropertyChainOf {
            property_chain,
            super_property,
        } => AxiomKind::SubPropertyChainOf {
            property_chain: fold_object_property_expressions(folder, property_chain),
            super_property: folder.fold_object_property_expression(super_property),
        },
        AxiomKind::EquivalentObjectProperties(operands) => AxiomKind::EquivalentObjectProperties(
            fold_object_property_expressions(folder, operands)
                .into_iter()
                .collect(),
        ),
        AxiomKind::DisjointObjectProperties(operands) => AxiomKind::DisjointObjectProperties(
            fold_object_property_expressions(folder, operands)
                .into_iter()
                .collect(),
        ),
        AxiomKind::InverseObjectProperties(first, second) => AxiomKind::InverseObjectProperties(
            folder.fold_object_property_expression(first),
            folder.fold_object_property_expression(second),
        ),
        AxiomKind::ObjectPropertyDomain { property, domain } => AxiomKind::ObjectPropertyDomain {
            property: folder.fold_object_property_expression(property),
            domain: folder.fold_class_expression(domain),
        },
        AxiomKind::ObjectPropertyRange { property, range } => AxiomKind::ObjectPropertyRange {
            property: folder.fold_object_property_expression(property),
            range: folder.fold_class_expression(range),
        },
        AxiomKind::FunctionalObjectProperty(p) => {
            AxiomKind::FunctionalObjectProperty(folder.fold_object_property_expression(p))
        }
        AxiomKind::InverseFunctionalObjectProperty(p) => {
            AxiomKind::InverseFunctionalObjectProperty(folder.fold_object_property_expression(p))
        }
        AxiomKind::ReflexiveObjectProperty(p) => {
            AxiomKind::ReflexiveObjectProperty(folder.fold_object_property_expression(p))
        }
        AxiomKind::IrreflexiveObjectProperty(p) => {
            AxiomKind::IrreflexiveObjectProperty(folder.fold_object_property_expression(p))
        }
        AxiomKind::SymmetricObjectProperty(p) => {
            AxiomKind::SymmetricObjectProperty(folder.fold_object_property_expression(p))
        }
        AxiomKind::AsymmetricObjectProperty(p) => {
            AxiomKind::AsymmetricObjectProperty(folder.fold_object_property_expression(p))
        }
        AxiomKind::TransitiveObjectProperty(p) => {
            AxiomKind::TransitiveObjectProperty(folder.fold_object_property_expression(p))
        }
        AxiomKind::SubDataPropertyOf {
            sub_property,
            super_property,
        } => AxiomKind::SubDataPropertyOf {
            sub_property: folder.fold_data_property(sub_property),
            super_property: folder.fold_data_property(super_property),
        },
        AxiomKind::EquivalentDataProperties(operands) => AxiomKind::EquivalentDataProperties(
            operands
                .iter()
                .map(|p| folder.fold_data_property(p))
                .collect(),
        ),
        AxiomKind::DisjointDataProperties(operands) => AxiomKind::DisjointDataProperties(
            operands
                .iter()
                .map(|p| folder.fold_data_property(p))
                .collect(),
        ),
        AxiomKind::DataPropertyDomain { property, domain } => AxiomKind::DataPropertyDomain {
            property: folder.fold_data_property(property),
            domain: folder.fold_class_expression(domain),
        },
        AxiomKind::DataPropertyRange { property, range } => AxiomKind::DataPropertyRange {
            property: folder.fold_data_property(property),
            range: folder.fold_data_range(range),
        },
        AxiomKind::FunctionalDataProperty(p) => {
            AxiomKind::FunctionalDataProperty(folder.fold_data_property(p))
        }
        AxiomKind::DatatypeDefinition {
            datatype,
            data_range,
        } => AxiomKind::DatatypeDefinition {
            datatype: folder.fold_datatype(datatype),
            data_range: folder.fold_data_range(data_range),
        },
        AxiomKind::HasKey {
            class_expression,
            object_properties,
            data_properties,
        } => AxiomKind::HasKey {
            class_expression: folder.fold_class_expression(class_expression),
            object_properties: fold_object_property_expressions(folder, object_properties)
                .into_iter()
                .collect(),
            data_properties: data_properties
                .iter()
                .map(|p| folder.fold_data_property(p))
                .collect(),
        },
        AxiomKind::SameIndividual(individuals) => AxiomKind::SameIndividual(
            fold_individuals(folder, individuals).into_iter().collect(),
        ),
        AxiomKind::DifferentIndividuals(individuals) => AxiomKind::DifferentIndividuals(
            fold_individuals(folder, individuals).into_iter().collect(),
        ),
        AxiomKind::ClassAssertion {
            class_expression,
            individual,
        } => AxiomKind::ClassAssertion {
            class_expression: folder.fold_class_expression(class_expression),
            individual: folder.fold_individual(individual),
        },
        AxiomKind::ObjectPropertyAssertion {
            property,
            source,
            target,
        } => AxiomKind::ObjectPropertyAssertion {
            property: folder.fold_object_property_expression(property),
            source: folder.fold_individual(source),
            target: folder.fold_individual(target),
        },
        AxiomKind::NegativeObjectPropertyAssertion {
            property,
            source,
            target,
        } => AxiomKind::NegativeObjectPropertyAssertion {
            property: folder.fold_object_property_expression(property),
            source: folder.fold_individual(source),
            target: folder.fold_individual(target),
        },
        AxiomKind::DataPropertyAssertion {
            property,
            source,
            target,
        } => AxiomKind::DataPropertyAssertion {
            property: folder.fold_data_property(property),
            source: folder.fold_individual(source),
            target: folder.fold_literal(target),
        },
        AxiomKind::NegativeDataPropertyAssertion {
            property,
            source,
            target,
        } => AxiomKind::NegativeDataPropertyAssertion {
            property: folder.fold_data_property(property),
            source: folder.fold_individual(source),
            target: folder.fold_literal(target),
        },
        AxiomKind::AnnotationAssertion {
            property,
            subject,
            value,
        } => AxiomKind::AnnotationAssertion {
            property: folder.fold_annotation_property(property),
            subject: folder.fold_annotation_subject(subject),
            value: folder.fold_annotation_value(value),
        },
        AxiomKind::SubAnnotationPropertyOf {
            sub_property,
            super_property,
        } => AxiomKind::SubAnnotationPropertyOf {
            sub_property: folder.fold_annotation_property(sub_property),
            super_property: folder.fold_annotation_property(super_property),
        },
        AxiomKind::AnnotationPropertyDomain { property, domain } => {
            AxiomKind::AnnotationPropertyDomain {
                property: folder.fold_annotation_property(property),
                domain: folder.fold_iri(domain),
            }
        }
        AxiomKind::AnnotationPropertyRange { property, range } => {
            AxiomKind::AnnotationPropertyRange {
                property: folder.fold_annotation_property(property),
                range: folder.fold_iri(range),
            }
        }
        AxiomKind::Rule(rule) => AxiomKind::Rule(folder.fold_rule(rule)),
    }
}

pub fn rebuild_class_expression<F: Folder + ?Sized>(
    folder: &mut F,
    expression: &ClassExpression,
) -> ClassExpression {
    match expression {
        ClassExpression::Class(c) => ClassExpression::Class(folder.fold_class(c)),
        ClassExpression::ObjectIntersectionOf(operands) => ClassExpression::ObjectIntersectionOf(
            fold_class_expressions(folder, operands).into_iter().collect(),
        ),
        ClassExpression::ObjectUnionOf(operands) => ClassExpression::ObjectUnionOf(
            fold_class_expressions(folder, operands).into_iter().collect(),
        ),
        ClassExpression::ObjectComplementOf(operand) => {
            ClassExpression::ObjectComplementOf(Box::new(folder.fold_class_expression(operand)))
        }
        ClassExpression::ObjectOneOf(individuals) => ClassExpression::ObjectOneOf(
            fold_individuals(folder, individuals).into_iter().collect(),
        ),
        ClassExpression::ObjectSomeValuesFrom { property, filler } => {
            ClassExpression::ObjectSomeValuesFrom {
                property: folder.fold_object_property_expression(property),
                filler: Box::new(folder.fold_class_expression(filler)),
            }
        }
        ClassExpression::ObjectAllValuesFrom { property, filler } => {
            ClassExpression::ObjectAllValuesFrom {
                property: folder.fold_object_property_expression(property),
                filler: Box::new(folder.fold_class_expression(filler)),
            }
        }
        ClassExpression::ObjectHasValue {
            property,
            individual,
        } => ClassExpression::ObjectHasValue {
            property: folder.fold_object_property_expression(property),
            individual: folder.fold_individual(individual),
        },
        ClassExpression::ObjectHasSelf(property) => {
            ClassExpression::ObjectHasSelf(folder.fold_object_property_expression(property))
        }
        ClassExpression::ObjectMinCardinality {
            cardinality,
            property,
            filler,
        } => ClassExpression::ObjectMinCardinality {
            cardinality: *cardinality,
            property: folder.fold_object_property_expression(property),
            filler: Box::new(folder.fold_class_expression(filler)),
        },
        ClassExpression::ObjectMaxCardinality {
            cardinality,
            property,
            filler,
        } => ClassExpression::ObjectMaxCardinality {
            cardinality: *cardinality,
            property: folder.fold_object_property_expression(property),
            filler: Box::new(folder.fold_class_expression(filler)),
        },
        ClassExpression::ObjectExactCardinality {
            cardinality,
            property,
            filler,
        } => ClassExpression::ObjectExactCardinality {
            cardinality: *cardinality,
            property: folder.fold_object_property_expression(property),
            filler: Box::new(folder.fold_class_expression(filler)),
        },
        ClassExpression::DataSomeValuesFrom { property, filler } => {
            ClassExpression::DataSomeValuesFrom {
                property: folder.fold_data_property(property),
                filler: folder.fold_data_range(filler),
            }
        }
        ClassExpression::DataAllValuesFrom { property, filler } => {
            ClassExpression::DataAllValuesFrom {
                property: folder.fold_data_property(property),
                filler: folder.fold_data_range(filler),
            }
        }
        ClassExpression::DataHasValue { property, value } => ClassExpression::DataHasValue {
            property: folder.fold_data_property(property),
            value: folder.fold_literal(value),
        },
        ClassExpression::DataMinCardinality {
            cardinality,
            property,
            filler,
        } => ClassExpression::DataMinCardinality {
            cardinality: *cardinality,
            property: folder.fold_data_property(property),
            filler: folder.fold_data_range(filler),
        },
        ClassExpression::DataMaxCardinality {
            cardinality,
            property,
            filler,
        } => ClassExpression::DataMaxCardinality {
            cardinality: *cardinality,
            property: folder.fold_data_property(property),
            filler: folder.fold_data_range(filler),
        },
        ClassExpression::DataExactCardinality {
            cardinality,
            property,
            filler,
        } => ClassExpression::DataExactCardinality {
            cardinality: *cardinality,
            property: folder.fold_data_property(property),
            filler: folder.fold_data_range(filler),
        },
    }
}

pub fn rebuild_data_range<F: Folder + ?Sized>(folder: &mut F, range: &DataRange) -> DataRange {
    match range {
        DataRange::Datatype(d) => DataRange::Datatype(folder.fold_datatype(d)),
        DataRange::DataIntersectionOf(operands) => DataRange::DataIntersectionOf(
            operands.iter().map(|o| folder.fold_data_range(o)).collect(),
        ),
        DataRange::DataUnionOf(operands) => {
            DataRange::DataUnionOf(operands.iter().map(|o| folder.fold_data_range(o)).collect())
        }
        DataRange::DataComplementOf(operand) => {
            DataRange::DataComplementOf(Box::new(folder.fold_data_range(operand)))
        }
        DataRange::DataOneOf(literals) => {
            DataRange::DataOneOf(literals.iter().map(|l| folder.fold_literal(l)).collect())
        }
        DataRange::DatatypeRestriction {
            datatype,
            restrictions,
        } => DataRange::DatatypeRestriction {
            datatype: folder.fold_datatype(datatype),
            restrictions: restrictions
                .iter()
                .map(|r| folder.fold_facet_restriction(r))
                .collect(),
        },
    }
}

pub fn rebuild_atom<F: Folder + ?Sized>(folder: &mut F, atom: &Atom) -> Atom {
    match atom {
        Atom::Class {
            class_expression,
            argument,
        } => Atom::Class {
            class_expression: folder.fold_class_expression(class_expression),
            argument: folder.fold_i_argument(argument),
        },
        Atom::DataRange {
            data_range,
            argument,
        } => Atom::DataRange {
            data_range: folder.fold_data_range(data_range),
            argument: folder.fold_d_argument(argument),
        },
        Atom::ObjectProperty {
            property,
            subject,
            object,
        } => Atom::ObjectProperty {
            property: folder.fold_object_property_expression(property),
            subject: folder.fold_i_argument(subject),
            object: folder.fold_i_argument(object),
        },
        Atom::DataProperty {
            property,
            subject,
            object,
        } => Atom::DataProperty {
            property: folder.fold_data_property(property),
            subject: folder.fold_i_argument(subject),
            object: folder.fold_d_argument(object),
        },
        Atom::BuiltIn {
            predicate,
            arguments,
        } => Atom::BuiltIn {
            predicate: folder.fold_iri(predicate),
            arguments: arguments
                .iter()
                .map(|a| folder.fold_d_argument(a))
                .collect(),
        },
        Atom::SameIndividual(first, second) => {
            Atom::SameIndividual(folder.fold_i_argument(first), folder.fold_i_argument(second))
        }
        Atom::DifferentIndividuals(first, second) => Atom::DifferentIndividuals(
            folder.fold_i_argument(first),
            folder.fold_i_argument(second),
        ),
    }
}
