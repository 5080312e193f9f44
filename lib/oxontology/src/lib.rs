#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![doc(html_favicon_url = "https://raw.githubusercontent.com/oxigraph/oxigraph/main/logo.svg")]
#![doc(html_logo_url = "https://raw.githubusercontent.com/oxigraph/oxigraph/main/logo.svg")]

mod annotation;
mod axiom;
mod duplicator;
mod entity;
mod error;
mod expression;
mod fold;
mod literal;
mod node_id;
mod object;
mod ontology;
mod ordering;
mod parser;
mod prefix;
mod rule;
mod serializer;
mod signature;
mod visit;
pub mod vocab;

pub use crate::annotation::{Annotation, AnnotationSubject, AnnotationValue};
pub use crate::axiom::{Axiom, AxiomKind};
pub use crate::duplicator::{
    AnonymousIndividualProvider, AnonymousIndividualsNormalizer, CanonicalIndividualProvider,
    ObjectDuplicator, PreservingIndividualProvider, RemappingIndividualProvider,
};
pub use crate::entity::{
    AnnotationProperty, AnonymousIndividual, DataProperty, Datatype, Entity, EntityType,
    Individual, NamedIndividual, ObjectProperty, OwlClass,
};
pub use crate::error::{FunctionalSyntaxError, OwlError, PrefixError};
pub use crate::expression::{
    ClassExpression, DataRange, FacetRestriction, ObjectPropertyExpression,
};
pub use crate::fold::{
    Folder, rebuild_annotation, rebuild_atom, rebuild_axiom, rebuild_axiom_kind,
    rebuild_class_expression, rebuild_data_range, rebuild_literal,
};
pub use crate::literal::OwlLiteral;
pub use crate::node_id::{
    AtomicIdSource, IdSource, NODE_ID_MARKER, NodeId, PREFIX, SHARED_NODE_ID_MARKER,
    fresh_anonymous_id, from_external_form, is_anonymous_node_name, is_nc_name,
    is_shared_node_name, named_id, sanitize_to_ncname, to_external_form,
};
pub use crate::object::OwlObject;
pub use crate::ontology::{Ontology, OntologyId};
pub use crate::ordering::{
    AnnotationValueShortFormProvider, Orderable, OwlObjectComparator, PrefixShortFormProvider,
    ShortFormProvider, SimpleShortFormProvider,
};
pub use crate::parser::{FunctionalSyntaxDocument, FunctionalSyntaxParser};
pub use crate::prefix::PrefixMap;
pub use crate::rule::{Atom, DArgument, IArgument, Rule, SwrlVariable};
pub use crate::serializer::{
    FunctionalSyntaxSerializer, SerializerConfig, WriterFunctionalSyntaxSerializer,
};
pub use crate::visit::{
    Visitor, walk_annotation, walk_atom, walk_axiom, walk_axiom_kind, walk_class_expression,
    walk_data_range, walk_ontology,
};
