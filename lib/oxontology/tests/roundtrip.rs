//! Round-trip tests: parsing the rendering of an ontology gives back the same ontology.

use oxontology::{
    Annotation, AnonymousIndividual, Atom, Axiom, AxiomKind, ClassExpression, DataProperty,
    DataRange, Datatype, FacetRestriction, FunctionalSyntaxParser, FunctionalSyntaxSerializer,
    Individual, NodeId, ObjectProperty, ObjectPropertyExpression, Ontology, OntologyId, OwlClass,
    OwlLiteral, Rule, SerializerConfig, SwrlVariable,
};
use oxrdf::NamedNode;
use oxrdf::vocab::{rdfs, xsd};

fn iri(name: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("http://example.com/o#{name}"))
}

fn class(name: &str) -> ClassExpression {
    OwlClass::new(iri(name)).into()
}

fn roundtrip(ontology: &Ontology, config: SerializerConfig) -> Ontology {
    let mut writer = FunctionalSyntaxSerializer::new()
        .with_config(config)
        .for_writer(Vec::new());
    writer.serialize_ontology(ontology).unwrap();
    let text = writer.finish().unwrap();
    FunctionalSyntaxParser::new()
        .parse_read(text.as_slice())
        .expect("Failed to parse")
        .ontology
}

fn rich_ontology() -> Ontology {
    let p = ObjectProperty::new(iri("p"));
    let q = ObjectProperty::new(iri("q"));
    let d = DataProperty::new(iri("d"));
    let anonymous = AnonymousIndividual::new(NodeId::new("genid-nodeid-7"));
    let x = SwrlVariable::new(iri("x"));
    let y = SwrlVariable::new(iri("y"));

    let mut ontology = Ontology::default();
    ontology.set_id(OntologyId::new(
        Some(NamedNode::new_unchecked("http://example.com/o")),
        Some(NamedNode::new_unchecked("http://example.com/o/1.0")),
    ));
    ontology.add_import(NamedNode::new_unchecked("http://example.com/other"));
    ontology.add_annotation(
        Annotation::new(rdfs::COMMENT.into(), OwlLiteral::new_simple_literal("an ontology"))
            .with_annotations([Annotation::new(
                rdfs::LABEL.into(),
                OwlLiteral::new_language_tagged_literal("m\u{e9}ta", "fr").unwrap(),
            )]),
    );
    ontology.add_axioms([
        Axiom::subclass_of(
            class("A"),
            ClassExpression::intersection_of([
                class("B"),
                ClassExpression::complement_of(class("C")),
                ClassExpression::some_values_from(
                    ObjectPropertyExpression::ObjectInverseOf(p.clone()),
                    ClassExpression::one_of([
                        Individual::named(iri("i")),
                        anonymous.clone().into(),
                    ]),
                ),
            ]),
        ),
        Axiom::subclass_of(
            class("B"),
            ClassExpression::union_of([
                ClassExpression::min_cardinality(2, p.clone(), None),
                ClassExpression::exact_cardinality(1, q.clone(), Some(class("C"))),
                ClassExpression::ObjectHasSelf(q.clone().into()),
            ]),
        ),
        Axiom::subclass_of(
            class("C"),
            ClassExpression::DataSomeValuesFrom {
                property: d.clone(),
                filler: DataRange::DatatypeRestriction {
                    datatype: Datatype::new(xsd::INTEGER.into()),
                    restrictions: [
                        FacetRestriction::new(
                            NamedNode::new_unchecked("http://www.w3.org/2001/XMLSchema#minInclusive"),
                            OwlLiteral::new_typed_literal("0", xsd::INTEGER),
                        ),
                        FacetRestriction::new(
                            NamedNode::new_unchecked("http://www.w3.org/2001/XMLSchema#maxExclusive"),
                            OwlLiteral::new_typed_literal("10", xsd::INTEGER),
                        ),
                    ]
                    .into(),
                },
            },
        ),
        Axiom::equivalent_classes([class("D"), class("E")]),
        Axiom::disjoint_classes([class("A"), class("D"), class("E")]),
        Axiom::new(AxiomKind::SubPropertyChainOf {
            property_chain: vec![p.clone().into(), q.clone().into()],
            super_property: p.clone().into(),
        }),
        Axiom::new(AxiomKind::HasKey {
            class_expression: class("A"),
            object_properties: [p.clone().into()].into(),
            data_properties: [d.clone()].into(),
        }),
        Axiom::functional_object_property(q.clone()),
        Axiom::new(AxiomKind::TransitiveObjectProperty(p.clone().into())),
        Axiom::class_assertion(class("A"), anonymous.clone().into()),
        Axiom::object_property_assertion(p.clone(), Individual::named(iri("i")), anonymous.into()),
        Axiom::data_property_assertion(
            d.clone(),
            Individual::named(iri("i")),
            OwlLiteral::new_simple_literal("a \"quoted\" \\ value\non two lines"),
        ),
        Axiom::annotation_assertion(
            rdfs::LABEL.into(),
            iri("A"),
            OwlLiteral::new_simple_literal("Alpha"),
        )
        .with_annotations([Annotation::new(
            rdfs::COMMENT.into(),
            OwlLiteral::new_simple_literal("about the label"),
        )]),
        Axiom::rule(Rule::new(
            [
                Atom::Class {
                    class_expression: class("A"),
                    argument: x.clone().into(),
                },
                Atom::ObjectProperty {
                    property: p.into(),
                    subject: x.clone().into(),
                    object: y.clone().into(),
                },
            ],
            [Atom::DataProperty {
                property: d,
                subject: y.into(),
                object: OwlLiteral::new_typed_literal("true", xsd::BOOLEAN).into(),
            }],
        )),
    ]);
    ontology
}

#[test]
fn test_roundtrip_without_synthesized_declarations() {
    let ontology = rich_ontology();
    let config = SerializerConfig::new().add_missing_declarations(false);
    assert_eq!(roundtrip(&ontology, config), ontology);
}

#[test]
fn test_roundtrip_with_synthesized_declarations() {
    let ontology = rich_ontology();
    let parsed = roundtrip(&ontology, SerializerConfig::new());
    for axiom in ontology.axioms() {
        assert!(parsed.contains_axiom(axiom), "{axiom:?} is missing");
    }
    for entity in ontology.signature() {
        assert!(
            entity.is_built_in() || parsed.is_declared(&entity),
            "{entity} is not declared"
        );
    }
}

#[test]
fn test_roundtrip_indented() {
    let ontology = rich_ontology();
    let config = SerializerConfig::new()
        .add_missing_declarations(false)
        .indent(true)
        .explicit_string_typing(true);
    assert_eq!(roundtrip(&ontology, config), ontology);
}

#[test]
fn test_rendering_is_a_fixpoint() {
    let render = |ontology: &Ontology| {
        let mut writer = FunctionalSyntaxSerializer::new().for_writer(Vec::new());
        writer.serialize_ontology(ontology).unwrap();
        String::from_utf8(writer.finish().unwrap()).unwrap()
    };
    let first = render(&rich_ontology());
    let parsed = FunctionalSyntaxParser::new()
        .parse_str(&first)
        .expect("Failed to parse")
        .ontology;
    assert_eq!(render(&parsed), first);
}

#[test]
fn test_anonymous_individuals_with_invalid_names_stay_distinct() {
    let mut ontology = Ontology::with_iri("http://example.com/o").unwrap();
    for id in ["a b", "ab", "genid 1", "genid1"] {
        ontology.add_axiom(Axiom::class_assertion(
            class("A"),
            AnonymousIndividual::new(NodeId::new(id)).into(),
        ));
    }
    let parsed = roundtrip(&ontology, SerializerConfig::new());
    assert_eq!(parsed.anonymous_individuals().len(), 4);
    assert!(parsed.contains_axiom(&Axiom::class_assertion(
        class("A"),
        AnonymousIndividual::new(NodeId::new("ab")).into(),
    )));
}
