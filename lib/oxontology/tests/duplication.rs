//! Tests of structural duplication and anonymous individual normalization.

use oxontology::{
    Annotation, AnonymousIndividual, AnonymousIndividualsNormalizer, Atom, AtomicIdSource, Axiom,
    AxiomKind, ClassExpression, DataProperty, DataRange, Datatype, Entity, FacetRestriction,
    Individual, NodeId, ObjectDuplicator, ObjectProperty, Ontology, OwlClass, OwlLiteral,
    OwlObject, RemappingIndividualProvider, Rule, SwrlVariable,
};
use oxrdf::NamedNode;
use oxrdf::vocab::{rdfs, xsd};
use std::collections::HashMap;

fn iri(name: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("http://example.com/o#{name}"))
}

fn class(name: &str) -> OwlClass {
    OwlClass::new(iri(name))
}

fn sample_axioms() -> Vec<Axiom> {
    let p = ObjectProperty::new(iri("p"));
    vec![
        Axiom::declaration(class("A")),
        Axiom::subclass_of(
            class("A").into(),
            ClassExpression::intersection_of([
                class("B").into(),
                ClassExpression::some_values_from(p.clone(), class("C").into()),
            ]),
        ),
        Axiom::object_property_domain(p, class("A").into()).with_annotations([Annotation::new(
            rdfs::COMMENT.into(),
            OwlLiteral::new_simple_literal("domain"),
        )]),
        Axiom::data_property_assertion(
            DataProperty::new(iri("d")),
            Individual::named(iri("i")),
            OwlLiteral::new_typed_literal("42", xsd::INTEGER),
        ),
    ]
}

#[test]
fn test_identity_duplication() {
    let mut duplicator = ObjectDuplicator::new();
    for axiom in sample_axioms() {
        assert_eq!(duplicator.duplicate_axiom(&axiom), axiom);
    }
}

#[test]
fn test_ontology_duplication_keeps_identity() {
    let mut ontology = Ontology::with_iri("http://example.com/o").unwrap();
    ontology.add_import(NamedNode::new_unchecked("http://example.com/other"));
    ontology.add_annotation(Annotation::new(
        rdfs::COMMENT.into(),
        OwlLiteral::new_simple_literal("c"),
    ));
    ontology.add_axioms(sample_axioms());
    assert_eq!(ontology.duplicate_with(&mut ObjectDuplicator::new()), ontology);
}

#[test]
fn test_iri_substitution_reaches_nested_nodes() {
    let mut duplicator = ObjectDuplicator::new()
        .with_iri_replacements(HashMap::from([(iri("C"), iri("Z"))]));
    let duplicated = duplicator.duplicate_axiom(&sample_axioms()[1]);
    assert_eq!(
        duplicated,
        Axiom::subclass_of(
            class("A").into(),
            ClassExpression::intersection_of([
                class("B").into(),
                ClassExpression::some_values_from(ObjectProperty::new(iri("p")), class("Z").into()),
            ]),
        )
    );
}

#[test]
fn test_entity_substitution_falls_back_across_kinds() {
    let mut duplicator = ObjectDuplicator::new().with_entity_replacements([(
        Entity::from(DataProperty::new(iri("p"))),
        iri("q"),
    )]);
    let axiom = Axiom::functional_object_property(ObjectProperty::new(iri("p")));
    assert_eq!(
        duplicator.duplicate_axiom(&axiom),
        Axiom::functional_object_property(ObjectProperty::new(iri("q")))
    );
}

#[test]
fn test_literal_substitution() {
    let mut duplicator = ObjectDuplicator::new().with_literal_replacements([(
        OwlLiteral::new_typed_literal("42", xsd::INTEGER),
        OwlLiteral::new_typed_literal("43", xsd::INTEGER),
    )]);
    let duplicated = duplicator.duplicate_axiom(&sample_axioms()[3]);
    let AxiomKind::DataPropertyAssertion { target, .. } = duplicated.kind() else {
        panic!("unexpected axiom {duplicated:?}");
    };
    assert_eq!(target.value(), "43");
}

#[test]
fn test_anonymous_individuals_are_remapped_consistently() {
    let original = AnonymousIndividual::new(NodeId::new("b0"));
    let class_assertion = Axiom::class_assertion(class("A").into(), original.clone().into());
    let data_assertion = Axiom::data_property_assertion(
        DataProperty::new(iri("d")),
        original.clone().into(),
        OwlLiteral::new_simple_literal("v"),
    );

    let mut duplicator = ObjectDuplicator::new()
        .with_individual_provider(RemappingIndividualProvider::new(AtomicIdSource::new(0)));
    let duplicated = duplicator.duplicate_axioms([&class_assertion, &data_assertion]);

    let AxiomKind::ClassAssertion {
        individual: Individual::Anonymous(first),
        ..
    } = duplicated[0].kind()
    else {
        panic!("unexpected axiom {:?}", duplicated[0]);
    };
    let AxiomKind::DataPropertyAssertion {
        source: Individual::Anonymous(second),
        ..
    } = duplicated[1].kind()
    else {
        panic!("unexpected axiom {:?}", duplicated[1]);
    };
    assert_eq!(first, second);
    assert_ne!(first, &original);
    assert_eq!(first.id().as_str(), "_:genid1");
}

#[test]
fn test_duplicate_any_object() {
    let mut duplicator = ObjectDuplicator::new()
        .with_iri_replacements(HashMap::from([(iri("A"), iri("B"))]));
    assert_eq!(
        duplicator.duplicate_object(&OwlObject::from(Entity::from(class("A")))),
        OwlObject::from(Entity::from(class("B")))
    );
}

#[test]
fn test_normalization_ignores_original_names() {
    let build = |name: &str| {
        let individual = AnonymousIndividual::new(NodeId::new(name));
        let mut ontology = Ontology::with_iri("http://example.com/o").unwrap();
        ontology.add_axioms([
            Axiom::class_assertion(class("A").into(), individual.clone().into()),
            Axiom::object_property_assertion(
                ObjectProperty::new(iri("p")),
                Individual::named(iri("i")),
                individual.into(),
            ),
        ]);
        ontology
    };
    let normalizer = AnonymousIndividualsNormalizer::new();
    let first = normalizer.normalize_ontology(&build("x"));
    let second = normalizer.normalize_ontology(&build("y"));
    assert_eq!(first, second);
    assert_eq!(first.anonymous_individuals().len(), 1);
    assert_eq!(
        first
            .anonymous_individuals()
            .into_iter()
            .map(|i| i.id().as_str().to_owned())
            .collect::<Vec<_>>(),
        ["_:genid-anon-ind-1"]
    );
}

#[test]
fn test_rule_variables_are_renamed() {
    let x = SwrlVariable::new(iri("x"));
    let rule = Axiom::rule(Rule::new(
        [Atom::Class {
            class_expression: class("A").into(),
            argument: x.clone().into(),
        }],
        [Atom::Class {
            class_expression: class("B").into(),
            argument: x.into(),
        }],
    ));
    let mut duplicator = ObjectDuplicator::new()
        .with_iri_replacements(HashMap::from([(iri("x"), iri("z"))]));
    let duplicated = duplicator.duplicate_axiom(&rule);
    let AxiomKind::Rule(duplicated) = duplicated.kind() else {
        panic!("unexpected axiom {duplicated:?}");
    };
    assert_eq!(
        duplicated
            .variables()
            .into_iter()
            .map(|v| v.iri().as_str())
            .collect::<Vec<_>>(),
        ["http://example.com/o#z"]
    );
}

#[test]
fn test_facets_are_not_renamed() {
    let min_inclusive = NamedNode::new_unchecked("http://www.w3.org/2001/XMLSchema#minInclusive");
    let axiom = Axiom::new(AxiomKind::DataPropertyRange {
        property: DataProperty::new(iri("d")),
        range: DataRange::DatatypeRestriction {
            datatype: Datatype::new(xsd::INTEGER.into()),
            restrictions: [FacetRestriction::new(
                min_inclusive.clone(),
                OwlLiteral::new_typed_literal("0", xsd::INTEGER),
            )]
            .into(),
        },
    });
    let mut duplicator =
        ObjectDuplicator::new().with_iri_replacements(HashMap::from([(min_inclusive, iri("m"))]));
    assert_eq!(duplicator.duplicate_axiom(&axiom), axiom);
}
