#![allow(clippy::ignored_unit_patterns)]
use crate::annotation::{Annotation, AnnotationSubject, AnnotationValue};
use crate::axiom::{Axiom, AxiomKind};
use crate::entity::{
    AnnotationProperty, AnonymousIndividual, DataProperty, Datatype, Entity, EntityType,
    Individual, NamedIndividual, ObjectProperty, OwlClass,
};
use crate::error::{FunctionalSyntaxError, FunctionalSyntaxErrorKind, OwlError, PrefixError};
use crate::expression::{ClassExpression, DataRange, FacetRestriction, ObjectPropertyExpression};
use crate::literal::OwlLiteral;
use crate::node_id::{NodeId, is_name_char};
use crate::ontology::{Ontology, OntologyId};
use crate::prefix::PrefixMap;
use crate::rule::{Atom, DArgument, IArgument, Rule, SwrlVariable};
use oxiri::Iri;
use oxrdf::NamedNode;
use peg::parser;
use std::io::Read;

/// A functional-style syntax parser.
///
/// The `owl`, `rdf`, `rdfs`, `xml` and `xsd` prefixes are predeclared. Comments (`#` up to the end
/// of the line) are ignored.
///
/// ```
/// use oxontology::{Axiom, FunctionalSyntaxParser, OwlClass};
/// use oxrdf::NamedNode;
///
/// let document = FunctionalSyntaxParser::new().parse_str(
///     "Prefix(:=<http://example.com/o#>)
///      Ontology(<http://example.com/o>
///        # Class: :A (A)
///        SubClassOf(:A owl:Thing)
///      )",
/// )?;
/// assert!(document.ontology.contains_axiom(&Axiom::subclass_of(
///     OwlClass::new(NamedNode::new("http://example.com/o#A")?).into(),
///     OwlClass::thing().into(),
/// )));
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[must_use]
#[derive(Clone)]
pub struct FunctionalSyntaxParser {
    prefixes: PrefixMap,
}

impl FunctionalSyntaxParser {
    #[inline]
    pub fn new() -> Self {
        Self {
            prefixes: PrefixMap::with_standard_prefixes(),
        }
    }

    /// Declares a prefix usable even if the document does not declare it.
    ///
    /// ```
    /// use oxontology::FunctionalSyntaxParser;
    ///
    /// let document = FunctionalSyntaxParser::new()
    ///     .with_prefix("ex", "http://example.com/")?
    ///     .parse_str("Ontology(ex:o)")?;
    /// assert_eq!(
    ///     document.ontology.iri().map(|iri| iri.as_str()),
    ///     Some("http://example.com/o")
    /// );
    /// # Result::<_, Box<dyn std::error::Error>>::Ok(())
    /// ```
    #[inline]
    pub fn with_prefix(
        mut self,
        prefix_name: impl Into<String>,
        prefix_iri: impl Into<String>,
    ) -> Result<Self, PrefixError> {
        self.prefixes.add_prefix(prefix_name, prefix_iri)?;
        Ok(self)
    }

    /// Parses a complete document.
    pub fn parse_str(self, input: &str) -> Result<FunctionalSyntaxDocument, FunctionalSyntaxError> {
        let mut state = ParserState {
            prefixes: self.prefixes,
        };
        let document =
            parser::Document(input, &mut state).map_err(FunctionalSyntaxErrorKind::Syntax)?;
        tracing::debug!(
            axioms = document.ontology.axiom_count(),
            "parsed functional-style syntax document"
        );
        Ok(document)
    }

    /// Parses a complete document from a [`Read`] implementation.
    pub fn parse_read(self, mut read: impl Read) -> Result<FunctionalSyntaxDocument, OwlError> {
        let mut input = String::new();
        read.read_to_string(&mut input)?;
        Ok(self.parse_str(&input)?)
    }
}

impl Default for FunctionalSyntaxParser {
    fn default() -> Self {
        Self::new()
    }
}

/// A parsed document: the prefixes in scope at its end and its ontology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionalSyntaxDocument {
    pub prefixes: PrefixMap,
    pub ontology: Ontology,
}

struct ParserState {
    prefixes: PrefixMap,
}

impl ParserState {
    fn expand(&self, prefixed_name: &str) -> Result<NamedNode, &'static str> {
        let iri = self
            .prefixes
            .expand(prefixed_name)
            .ok_or("Prefix not found")?;
        NamedNode::new(iri).map_err(|_| "IRI parsing failed")
    }
}

fn unescape_string(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                output.push(escaped);
            }
        } else {
            output.push(c);
        }
    }
    output
}

type Characteristic = fn(ObjectPropertyExpression) -> AxiomKind;

fn axiom(kind: AxiomKind, annotations: Vec<Annotation>) -> Axiom {
    Axiom::new_annotated(kind, annotations)
}

parser! {
    //See https://www.w3.org/TR/owl2-syntax/#Functional-Style_Syntax
    grammar parser(state: &mut ParserState) for str {
        pub rule Document() -> FunctionalSyntaxDocument = _ (PrefixDeclaration() _)* o:OntologyDocument() _ {
            FunctionalSyntaxDocument { prefixes: state.prefixes.clone(), ontology: o }
        }

        rule PrefixDeclaration() = "Prefix" _ "(" _ name:$(PN_PREFIX()?) ":" _ "=" _ namespace:IRIREF() _ ")" {?
            state.prefixes.add_prefix(name, namespace.into_inner()).map(|_| ()).map_err(|_| "Invalid prefix declaration")
        }

        rule OntologyDocument() -> Ontology = "Ontology" _ "(" _ id:OntologyIri()? imports:(Import() ** _) _ annotations:(Annotation() ** _) _ axioms:(Axiom() ** _) _ ")" {
            let mut ontology = Ontology::default();
            if let Some((iri, version_iri)) = id {
                ontology.set_id(OntologyId::new(Some(iri), version_iri));
            }
            for import in imports {
                ontology.add_import(import);
            }
            for annotation in annotations {
                ontology.add_annotation(annotation);
            }
            ontology.add_axioms(axioms);
            ontology
        }

        rule OntologyIri() -> (NamedNode, Option<NamedNode>) = i:IRI() _ v:(v:IRI() _ { v })? { (i, v) }

        rule Import() -> NamedNode = "Import" _ "(" _ i:IRI() _ ")" { i }

        // Entities and individuals

        rule Class() -> OwlClass = i:IRI() { OwlClass::new(i) }
        rule Datatype() -> Datatype = i:IRI() { Datatype::new(i) }
        rule ObjectProperty() -> ObjectProperty = i:IRI() { ObjectProperty::new(i) }
        rule DataProperty() -> DataProperty = i:IRI() { DataProperty::new(i) }
        rule AnnotationProperty() -> AnnotationProperty = i:IRI() { AnnotationProperty::new(i) }
        rule NamedIndividual() -> NamedIndividual = i:IRI() { NamedIndividual::new(i) }

        rule AnonymousIndividual() -> AnonymousIndividual = id:$("_:" [c if is_name_char(c) && c != ':']+) {
            AnonymousIndividual::new(NodeId::new(id))
        }

        rule Individual() -> Individual =
            a:AnonymousIndividual() { a.into() } /
            i:NamedIndividual() { i.into() }

        rule Entity() -> Entity = t:EntityType() _ "(" _ i:IRI() _ ")" { Entity::new(t, i) }

        rule EntityType() -> EntityType =
            "AnnotationProperty" { EntityType::AnnotationProperty } /
            "ObjectProperty" { EntityType::ObjectProperty } /
            "DataProperty" { EntityType::DataProperty } /
            "Datatype" { EntityType::Datatype } /
            "Class" { EntityType::Class } /
            "NamedIndividual" { EntityType::NamedIndividual }

        // Annotations

        rule Annotation() -> Annotation = "Annotation" _ "(" _ a:AxiomAnnotations() p:AnnotationProperty() _ v:AnnotationValue() _ ")" {
            Annotation::new(p, v).with_annotations(a)
        }

        rule AxiomAnnotations() -> Vec<Annotation> = a:(a:Annotation() _ { a })* { a }

        rule AnnotationSubject() -> AnnotationSubject =
            a:AnonymousIndividual() { a.into() } /
            i:IRI() { i.into() }

        rule AnnotationValue() -> AnnotationValue =
            a:AnonymousIndividual() { a.into() } /
            l:Literal() { l.into() } /
            i:IRI() { i.into() }

        // Expressions

        rule ObjectPropertyExpression() -> ObjectPropertyExpression =
            "ObjectInverseOf" _ "(" _ p:ObjectProperty() _ ")" { ObjectPropertyExpression::ObjectInverseOf(p) } /
            p:ObjectProperty() { p.into() }

        rule DataRange() -> DataRange =
            "DataIntersectionOf" _ "(" _ r:(DataRange() ++ _) _ ")" { DataRange::DataIntersectionOf(r.into_iter().collect()) } /
            "DataUnionOf" _ "(" _ r:(DataRange() ++ _) _ ")" { DataRange::DataUnionOf(r.into_iter().collect()) } /
            "DataComplementOf" _ "(" _ r:DataRange() _ ")" { DataRange::DataComplementOf(Box::new(r)) } /
            "DataOneOf" _ "(" _ l:(Literal() ++ _) _ ")" { DataRange::DataOneOf(l.into_iter().collect()) } /
            "DatatypeRestriction" _ "(" _ d:Datatype() _ r:(FacetRestriction() ++ _) _ ")" {
                DataRange::DatatypeRestriction { datatype: d, restrictions: r.into_iter().collect() }
            } /
            d:Datatype() { d.into() }

        rule FacetRestriction() -> FacetRestriction = f:IRI() _ v:Literal() { FacetRestriction::new(f, v) }

        rule ClassExpression() -> ClassExpression =
            "ObjectIntersectionOf" _ "(" _ c:(ClassExpression() ++ _) _ ")" { ClassExpression::intersection_of(c) } /
            "ObjectUnionOf" _ "(" _ c:(ClassExpression() ++ _) _ ")" { ClassExpression::union_of(c) } /
            "ObjectComplementOf" _ "(" _ c:ClassExpression() _ ")" { ClassExpression::complement_of(c) } /
            "ObjectOneOf" _ "(" _ i:(Individual() ++ _) _ ")" { ClassExpression::one_of(i) } /
            "ObjectSomeValuesFrom" _ "(" _ p:ObjectPropertyExpression() _ c:ClassExpression() _ ")" { ClassExpression::some_values_from(p, c) } /
            "ObjectAllValuesFrom" _ "(" _ p:ObjectPropertyExpression() _ c:ClassExpression() _ ")" { ClassExpression::all_values_from(p, c) } /
            "ObjectHasValue" _ "(" _ p:ObjectPropertyExpression() _ i:Individual() _ ")" {
                ClassExpression::ObjectHasValue { property: p, individual: i }
            } /
            "ObjectHasSelf" _ "(" _ p:ObjectPropertyExpression() _ ")" { ClassExpression::ObjectHasSelf(p) } /
            "ObjectMinCardinality" _ "(" _ n:Cardinality() _ p:ObjectPropertyExpression() _ c:(c:ClassExpression() _ { c })? ")" {
                ClassExpression::min_cardinality(n, p, c)
            } /
            "ObjectMaxCardinality" _ "(" _ n:Cardinality() _ p:ObjectPropertyExpression() _ c:(c:ClassExpression() _ { c })? ")" {
                ClassExpression::max_cardinality(n, p, c)
            } /
            "ObjectExactCardinality" _ "(" _ n:Cardinality() _ p:ObjectPropertyExpression() _ c:(c:ClassExpression() _ { c })? ")" {
                ClassExpression::exact_cardinality(n, p, c)
            } /
            "DataSomeValuesFrom" _ "(" _ p:DataProperty() _ r:DataRange() _ ")" {
                ClassExpression::DataSomeValuesFrom { property: p, filler: r }
            } /
            "DataAllValuesFrom" _ "(" _ p:DataProperty() _ r:DataRange() _ ")" {
                ClassExpression::DataAllValuesFrom { property: p, filler: r }
            } /
            "DataHasValue" _ "(" _ p:DataProperty() _ v:Literal() _ ")" {
                ClassExpression::DataHasValue { property: p, value: v }
            } /
            "DataMinCardinality" _ "(" _ n:Cardinality() _ p:DataProperty() _ r:(r:DataRange() _ { r })? ")" {
                ClassExpression::data_min_cardinality(n, p, r)
            } /
            "DataMaxCardinality" _ "(" _ n:Cardinality() _ p:DataProperty() _ r:(r:DataRange() _ { r })? ")" {
                ClassExpression::data_max_cardinality(n, p, r)
            } /
            "DataExactCardinality" _ "(" _ n:Cardinality() _ p:DataProperty() _ r:(r:DataRange() _ { r })? ")" {
                ClassExpression::data_exact_cardinality(n, p, r)
            } /
            c:Class() { c.into() }

        rule Cardinality() -> u32 = n:$(['0'..='9']+) {?
            n.parse().map_err(|_| "Invalid cardinality")
        }

        // Axioms

        rule Axiom() -> Axiom =
            "Declaration" _ "(" _ a:AxiomAnnotations() e:Entity() _ ")" { axiom(AxiomKind::Declaration(e), a) } /
            ClassAxiom() /
            ObjectPropertyAxiom() /
            DataPropertyAxiom() /
            "DatatypeDefinition" _ "(" _ a:AxiomAnnotations() d:Datatype() _ r:DataRange() _ ")" {
                axiom(AxiomKind::DatatypeDefinition { datatype: d, data_range: r }, a)
            } /
            "HasKey" _ "(" _ a:AxiomAnnotations() c:ClassExpression() _
                "(" _ o:(ObjectPropertyExpression() ** _) _ ")" _
                "(" _ d:(DataProperty() ** _) _ ")" _ ")" {
                axiom(AxiomKind::HasKey {
                    class_expression: c,
                    object_properties: o.into_iter().collect(),
                    data_properties: d.into_iter().collect(),
                }, a)
            } /
            Assertion() /
            AnnotationAxiom() /
            "DLSafeRule" _ "(" _ a:AxiomAnnotations()
                "Body" _ "(" _ b:(Atom() ** _) _ ")" _
                "Head" _ "(" _ h:(Atom() ** _) _ ")" _ ")" {
                axiom(AxiomKind::Rule(Rule::new(b, h)), a)
            }

        rule ClassAxiom() -> Axiom =
            "SubClassOf" _ "(" _ a:AxiomAnnotations() sub:ClassExpression() _ sup:ClassExpression() _ ")" {
                axiom(AxiomKind::SubClassOf { sub_class: sub, super_class: sup }, a)
            } /
            "EquivalentClasses" _ "(" _ a:AxiomAnnotations() c:(ClassExpression() ++ _) _ ")" {
                axiom(AxiomKind::EquivalentClasses(c.into_iter().collect()), a)
            } /
            "DisjointClasses" _ "(" _ a:AxiomAnnotations() c:(ClassExpression() ++ _) _ ")" {
                axiom(AxiomKind::DisjointClasses(c.into_iter().collect()), a)
            } /
            "DisjointUnion" _ "(" _ a:AxiomAnnotations() c:Class() _ d:(ClassExpression() ++ _) _ ")" {
                axiom(AxiomKind::DisjointUnion { class: c, disjoint_classes: d.into_iter().collect() }, a)
            }

        rule ObjectPropertyAxiom() -> Axiom =
            "SubObjectPropertyOf" _ "(" _ a:AxiomAnnotations()
                "ObjectPropertyChain" _ "(" _ c:(ObjectPropertyExpression() ++ _) _ ")" _
                sup:ObjectPropertyExpression() _ ")" {
                axiom(AxiomKind::SubPropertyChainOf { property_chain: c, super_property: sup }, a)
            } /
            "SubObjectPropertyOf" _ "(" _ a:AxiomAnnotations() sub:ObjectPropertyExpression() _ sup:ObjectPropertyExpression() _ ")" {
                axiom(AxiomKind::SubObjectPropertyOf { sub_property: sub, super_property: sup }, a)
            } /
            "EquivalentObjectProperties" _ "(" _ a:AxiomAnnotations() p:(ObjectPropertyExpression() ++ _) _ ")" {
                axiom(AxiomKind::EquivalentObjectProperties(p.into_iter().collect()), a)
            } /
            "DisjointObjectProperties" _ "(" _ a:AxiomAnnotations() p:(ObjectPropertyExpression() ++ _) _ ")" {
                axiom(AxiomKind::DisjointObjectProperties(p.into_iter().collect()), a)
            } /
            "InverseObjectProperties" _ "(" _ a:AxiomAnnotations() p1:ObjectPropertyExpression() _ p2:ObjectPropertyExpression() _ ")" {
                axiom(AxiomKind::InverseObjectProperties(p1, p2), a)
            } /
            "ObjectPropertyDomain" _ "(" _ a:AxiomAnnotations() p:ObjectPropertyExpression() _ c:ClassExpression() _ ")" {
                axiom(AxiomKind::ObjectPropertyDomain { property: p, domain: c }, a)
            } /
            "ObjectPropertyRange" _ "(" _ a:AxiomAnnotations() p:ObjectPropertyExpression() _ c:ClassExpression() _ ")" {
                axiom(AxiomKind::ObjectPropertyRange { property: p, range: c }, a)
            } /
            k:ObjectPropertyCharacteristic() _ "(" _ a:AxiomAnnotations() p:ObjectPropertyExpression() _ ")" {
                axiom(k(p), a)
            }

        rule ObjectPropertyCharacteristic() -> Characteristic =
            "FunctionalObjectProperty" { AxiomKind::FunctionalObjectProperty } /
            "InverseFunctionalObjectProperty" { AxiomKind::InverseFunctionalObjectProperty } /
            "ReflexiveObjectProperty" { AxiomKind::ReflexiveObjectProperty } /
            "IrreflexiveObjectProperty" { AxiomKind::IrreflexiveObjectProperty } /
            "SymmetricObjectProperty" { AxiomKind::SymmetricObjectProperty } /
            "AsymmetricObjectProperty" { AxiomKind::AsymmetricObjectProperty } /
            "TransitiveObjectProperty" { AxiomKind::TransitiveObjectProperty }

        rule DataPropertyAxiom() -> Axiom =
            "SubDataPropertyOf" _ "(" _ a:AxiomAnnotations() sub:DataProperty() _ sup:DataProperty() _ ")" {
                axiom(AxiomKind::SubDataPropertyOf { sub_property: sub, super_property: sup }, a)
            } /
            "EquivalentDataProperties" _ "(" _ a:AxiomAnnotations() p:(DataProperty() ++ _) _ ")" {
                axiom(AxiomKind::EquivalentDataProperties(p.into_iter().collect()), a)
            } /
            "DisjointDataProperties" _ "(" _ a:AxiomAnnotations() p:(DataProperty() ++ _) _ ")" {
                axiom(AxiomKind::DisjointDataProperties(p.into_iter().collect()), a)
            } /
            "DataPropertyDomain" _ "(" _ a:AxiomAnnotations() p:DataProperty() _ c:ClassExpression() _ ")" {
                axiom(AxiomKind::DataPropertyDomain { property: p, domain: c }, a)
            } /
            "DataPropertyRange" _ "(" _ a:AxiomAnnotations() p:DataProperty() _ r:DataRange() _ ")" {
                axiom(AxiomKind::DataPropertyRange { property: p, range: r }, a)
            } /
            "FunctionalDataProperty" _ "(" _ a:AxiomAnnotations() p:DataProperty() _ ")" {
                axiom(AxiomKind::FunctionalDataProperty(p), a)
            }

        rule Assertion() -> Axiom =
            "SameIndividual" _ "(" _ a:AxiomAnnotations() i:(Individual() ++ _) _ ")" {
                axiom(AxiomKind::SameIndividual(i.into_iter().collect()), a)
            } /
            "DifferentIndividuals" _ "(" _ a:AxiomAnnotations() i:(Individual() ++ _) _ ")" {
                axiom(AxiomKind::DifferentIndividuals(i.into_iter().collect()), a)
            } /
            "ClassAssertion" _ "(" _ a:AxiomAnnotations() c:ClassExpression() _ i:Individual() _ ")" {
                axiom(AxiomKind::ClassAssertion { class_expression: c, individual: i }, a)
            } /
            "ObjectPropertyAssertion" _ "(" _ a:AxiomAnnotations() p:ObjectPropertyExpression() _ s:Individual() _ t:Individual() _ ")" {
                axiom(AxiomKind::ObjectPropertyAssertion { property: p, source: s, target: t }, a)
            } /
            "NegativeObjectPropertyAssertion" _ "(" _ a:AxiomAnnotations() p:ObjectPropertyExpression() _ s:Individual() _ t:Individual() _ ")" {
                axiom(AxiomKind::NegativeObjectPropertyAssertion { property: p, source: s, target: t }, a)
            } /
            "DataPropertyAssertion" _ "(" _ a:AxiomAnnotations() p:DataProperty() _ s:Individual() _ t:Literal() _ ")" {
                axiom(AxiomKind::DataPropertyAssertion { property: p, source: s, target: t }, a)
            } /
            "NegativeDataPropertyAssertion" _ "(" _ a:AxiomAnnotations() p:DataProperty() _ s:Individual() _ t:Literal() _ ")" {
                axiom(AxiomKind::NegativeDataPropertyAssertion { property: p, source: s, target: t }, a)
            }

        rule AnnotationAxiom() -> Axiom =
            "AnnotationAssertion" _ "(" _ a:AxiomAnnotations() p:AnnotationProperty() _ s:AnnotationSubject() _ v:AnnotationValue() _ ")" {
                axiom(AxiomKind::AnnotationAssertion { property: p, subject: s, value: v }, a)
            } /
            "SubAnnotationPropertyOf" _ "(" _ a:AxiomAnnotations() sub:AnnotationProperty() _ sup:AnnotationProperty() _ ")" {
                axiom(AxiomKind::SubAnnotationPropertyOf { sub_property: sub, super_property: sup }, a)
            } /
            "AnnotationPropertyDomain" _ "(" _ a:AxiomAnnotations() p:AnnotationProperty() _ i:IRI() _ ")" {
                axiom(AxiomKind::AnnotationPropertyDomain { property: p, domain: i }, a)
            } /
            "AnnotationPropertyRange" _ "(" _ a:AxiomAnnotations() p:AnnotationProperty() _ i:IRI() _ ")" {
                axiom(AxiomKind::AnnotationPropertyRange { property: p, range: i }, a)
            }

        // Rules

        rule Atom() -> Atom =
            "ClassAtom" _ "(" _ c:ClassExpression() _ x:IArgument() _ ")" {
                Atom::Class { class_expression: c, argument: x }
            } /
            "DataRangeAtom" _ "(" _ r:DataRange() _ x:DArgument() _ ")" {
                Atom::DataRange { data_range: r, argument: x }
            } /
            "ObjectPropertyAtom" _ "(" _ p:ObjectPropertyExpression() _ x:IArgument() _ y:IArgument() _ ")" {
                Atom::ObjectProperty { property: p, subject: x, object: y }
            } /
            "DataPropertyAtom" _ "(" _ p:DataProperty() _ x:IArgument() _ y:DArgument() _ ")" {
                Atom::DataProperty { property: p, subject: x, object: y }
            } /
            "BuiltInAtom" _ "(" _ i:IRI() _ args:(DArgument() ** _) _ ")" {
                Atom::BuiltIn { predicate: i, arguments: args }
            } /
            "SameIndividualAtom" _ "(" _ x:IArgument() _ y:IArgument() _ ")" { Atom::SameIndividual(x, y) } /
            "DifferentIndividualsAtom" _ "(" _ x:IArgument() _ y:IArgument() _ ")" { Atom::DifferentIndividuals(x, y) }

        rule Variable() -> SwrlVariable = "Variable" _ "(" _ i:IRI() _ ")" { SwrlVariable::new(i) }

        rule IArgument() -> IArgument =
            v:Variable() { v.into() } /
            i:Individual() { i.into() }

        rule DArgument() -> DArgument =
            v:Variable() { v.into() } /
            l:Literal() { l.into() }

        // Terminals

        rule Literal() -> OwlLiteral =
            v:QuotedString() _ "^^" _ d:IRI() { OwlLiteral::new_typed_literal(v, d) } /
            v:QuotedString() "@" l:$(['a'..='z' | 'A'..='Z']+ ("-" ['a'..='z' | 'A'..='Z' | '0'..='9']+)*) {?
                OwlLiteral::new_language_tagged_literal(v, l).map_err(|_| "language tag parsing failed")
            } /
            v:QuotedString() { OwlLiteral::new_simple_literal(v) }

        rule QuotedString() -> String = "\"" v:$(("\\" [_] / [^ '"' | '\\'])*) "\"" { unescape_string(v) }

        rule IRI() -> NamedNode =
            i:IRIREF() { NamedNode::new_unchecked(i.into_inner()) } /
            PrefixedName()

        rule IRIREF() -> Iri<String> = "<" i:$((!['>'] [_])*) ">" {?
            Iri::parse(i.to_owned()).map_err(|_| "IRI parsing failed")
        }

        rule PrefixedName() -> NamedNode = n:$(PN_PREFIX()? ":" PN_LOCAL()?) {?
            state.expand(n)
        }

        rule PN_CHARS_BASE() = ['A' ..= 'Z' | 'a' ..= 'z' | '\u{00C0}'..='\u{00D6}' | '\u{00D8}'..='\u{00F6}' | '\u{00F8}'..='\u{02FF}' | '\u{0370}'..='\u{037D}' | '\u{037F}'..='\u{1FFF}' | '\u{200C}'..='\u{200D}' | '\u{2070}'..='\u{218F}' | '\u{2C00}'..='\u{2FEF}' | '\u{3001}'..='\u{D7FF}' | '\u{F900}'..='\u{FDCF}' | '\u{FDF0}'..='\u{FFFD}' | '\u{10000}'..='\u{EFFFF}']

        rule PN_CHARS_U() = ['_'] / PN_CHARS_BASE()

        rule PN_CHARS() = ['-' | '0' ..= '9' | '\u{00B7}' | '\u{0300}'..='\u{036F}' | '\u{203F}'..='\u{2040}'] / PN_CHARS_U()

        rule PN_PREFIX() = PN_CHARS_BASE() PN_CHARS()* ("."+ PN_CHARS()+)*

        rule PN_LOCAL() = (PN_CHARS_U() / [':' | '0'..='9']) (PN_CHARS() / [':'])* (['.']+ (PN_CHARS() / [':'])+)*

        rule _() = quiet! { ([' ' | '\t' | '\n' | '\r'] / comment())* }

        rule comment() = quiet! { ['#'] (!['\r' | '\n'] [_])* }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::vocab::{rdfs, xsd};

    fn parse(input: &str) -> Ontology {
        FunctionalSyntaxParser::new()
            .with_prefix("", "http://example.com/o#")
            .unwrap()
            .parse_str(input)
            .unwrap()
            .ontology
    }

    fn iri(name: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.com/o#{name}"))
    }

    #[test]
    fn ontology_header() {
        let document = FunctionalSyntaxParser::new()
            .parse_str(
                "Prefix(ex:=<http://example.com/>)
                Ontology(<http://example.com/o>
                <http://example.com/o/1.0>
                Import(<http://example.com/other>)
                Annotation(rdfs:comment \"c\")
                )",
            )
            .unwrap();
        assert_eq!(document.prefixes.namespace("ex"), Some("http://example.com/"));
        let ontology = document.ontology;
        assert_eq!(
            ontology.iri(),
            Some(&NamedNode::new_unchecked("http://example.com/o"))
        );
        assert_eq!(
            ontology.version_iri(),
            Some(&NamedNode::new_unchecked("http://example.com/o/1.0"))
        );
        assert_eq!(ontology.imports().count(), 1);
        assert_eq!(ontology.annotations().count(), 1);
        assert!(ontology.is_empty());
    }

    #[test]
    fn comments_are_ignored() {
        let ontology = parse(
            "Ontology(
            ############################
            #   Classes
            ############################

            # Class: :A (A)

            Declaration(Class(:A))
            )",
        );
        assert!(ontology.contains_axiom(&Axiom::declaration(OwlClass::new(iri("A")))));
    }

    #[test]
    fn literals() {
        let ontology = parse(
            "Ontology(
            AnnotationAssertion(rdfs:comment :A \"a \\\"b\\\"\nc\")
            AnnotationAssertion(rdfs:label :A \"chat\"@fr)
            DataPropertyAssertion(:p :i \"1\"^^xsd:integer)
            DataPropertyAssertion(:p :i \"s\"^^xsd:string)
            )",
        );
        assert!(ontology.contains_axiom(&Axiom::annotation_assertion(
            rdfs::COMMENT.into(),
            iri("A"),
            OwlLiteral::new_simple_literal("a \"b\"\nc"),
        )));
        assert!(ontology.contains_axiom(&Axiom::annotation_assertion(
            rdfs::LABEL.into(),
            iri("A"),
            OwlLiteral::new_language_tagged_literal("chat", "fr").unwrap(),
        )));
        assert!(ontology.contains_axiom(&Axiom::data_property_assertion(
            DataProperty::new(iri("p")),
            Individual::named(iri("i")),
            OwlLiteral::new_typed_literal("1", xsd::INTEGER),
        )));
        assert!(ontology.contains_axiom(&Axiom::data_property_assertion(
            DataProperty::new(iri("p")),
            Individual::named(iri("i")),
            OwlLiteral::new_simple_literal("s"),
        )));
    }

    #[test]
    fn property_chains_and_keys() {
        let ontology = parse(
            "Ontology(
            SubObjectPropertyOf(ObjectPropertyChain(:p :q) :r)
            HasKey(:A (:p ObjectInverseOf(:q)) ())
            )",
        );
        assert!(ontology.contains_axiom(&Axiom::new(AxiomKind::SubPropertyChainOf {
            property_chain: vec![
                ObjectProperty::new(iri("p")).into(),
                ObjectProperty::new(iri("q")).into(),
            ],
            super_property: ObjectProperty::new(iri("r")).into(),
        })));
        assert!(ontology.contains_axiom(&Axiom::new(AxiomKind::HasKey {
            class_expression: OwlClass::new(iri("A")).into(),
            object_properties: [
                ObjectProperty::new(iri("p")).into(),
                ObjectPropertyExpression::ObjectInverseOf(ObjectProperty::new(iri("q"))),
            ]
            .into(),
            data_properties: [].into(),
        })));
    }

    #[test]
    fn unqualified_cardinality() {
        let ontology = parse("Ontology(SubClassOf(:A ObjectMinCardinality(2 :p)))");
        assert!(ontology.contains_axiom(&Axiom::subclass_of(
            OwlClass::new(iri("A")).into(),
            ClassExpression::min_cardinality(2, ObjectProperty::new(iri("p")), None),
        )));
    }

    #[test]
    fn rules() {
        let ontology = parse(
            "Ontology(DLSafeRule(Body(ClassAtom(:A Variable(:x))) Head(ClassAtom(:B Variable(:x)))))",
        );
        let x = SwrlVariable::new(iri("x"));
        assert!(ontology.contains_axiom(&Axiom::rule(Rule::new(
            [Atom::Class {
                class_expression: OwlClass::new(iri("A")).into(),
                argument: x.clone().into(),
            }],
            [Atom::Class {
                class_expression: OwlClass::new(iri("B")).into(),
                argument: x.into(),
            }],
        ))));
    }

    #[test]
    fn syntax_errors_have_a_location() {
        let error = FunctionalSyntaxParser::new()
            .parse_str("Ontology(\nSubClassOf(:A)\n)")
            .unwrap_err();
        assert_eq!(error.location().map(|l| l.line), Some(2));
    }

    #[test]
    fn unknown_prefixes_are_rejected() {
        FunctionalSyntaxParser::new()
            .parse_str("Ontology(Declaration(Class(ex:A)))")
            .unwrap_err();
    }
}
