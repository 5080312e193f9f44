//! Deterministic ordering of object model nodes, optionally by human readable labels.

use crate::annotation::AnnotationSubject;
use crate::axiom::{Axiom, AxiomKind};
use crate::entity::{
    AnnotationProperty, DataProperty, Datatype, Entity, Individual, NamedIndividual, ObjectProperty,
    OwlClass,
};
use crate::expression::{ClassExpression, DataRange, ObjectPropertyExpression};
use crate::literal::OwlLiteral;
use crate::ontology::Ontology;
use crate::prefix::PrefixMap;
use oxrdf::NamedNode;
use oxrdf::vocab::rdfs;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;

/// Produces a short human readable name for an entity.
pub trait ShortFormProvider {
    fn short_form(&self, entity: &Entity) -> String;
}

impl<T: ShortFormProvider + ?Sized> ShortFormProvider for &T {
    fn short_form(&self, entity: &Entity) -> String {
        (**self).short_form(entity)
    }
}

/// Uses the IRI fragment, or the last path segment if there is no fragment.
///
/// ```
/// use oxontology::{OwlClass, ShortFormProvider, SimpleShortFormProvider};
/// use oxrdf::NamedNode;
///
/// let class = OwlClass::new(NamedNode::new("http://example.com/ns#Person")?);
/// assert_eq!(SimpleShortFormProvider.short_form(&class.into()), "Person");
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleShortFormProvider;

impl ShortFormProvider for SimpleShortFormProvider {
    fn short_form(&self, entity: &Entity) -> String {
        let iri = entity.iri().as_str();
        let trimmed = iri.trim_end_matches(['/', '#']);
        let local = trimmed
            .rfind(['#', '/', ':'])
            .map_or(trimmed, |i| &trimmed[i + 1..]);
        if local.is_empty() {
            iri.to_owned()
        } else {
            local.to_owned()
        }
    }
}

/// Uses the abbreviated `prefix:local` form, or the full IRI when no prefix applies.
#[derive(Debug, Clone, Default)]
pub struct PrefixShortFormProvider {
    prefixes: PrefixMap,
}

impl PrefixShortFormProvider {
    pub fn new(prefixes: PrefixMap) -> Self {
        Self { prefixes }
    }

    pub fn prefixes(&self) -> &PrefixMap {
        &self.prefixes
    }
}

impl ShortFormProvider for PrefixShortFormProvider {
    fn short_form(&self, entity: &Entity) -> String {
        let iri = entity.iri().as_str();
        self.prefixes
            .abbreviate(iri)
            .unwrap_or_else(|| iri.to_owned())
    }
}

/// Uses the value of an annotation assertion on the entity IRI, `rdfs:label` by default.
///
/// When several values exist, the smallest literal in canonical order is used. Entities without
/// any literal value go to the fallback provider.
#[derive(Debug, Clone)]
pub struct AnnotationValueShortFormProvider<F> {
    labels: FxHashMap<NamedNode, String>,
    fallback: F,
}

impl<F: ShortFormProvider> AnnotationValueShortFormProvider<F> {
    /// Reads `rdfs:label` assertions from `ontology`.
    pub fn new(ontology: &Ontology, fallback: F) -> Self {
        Self::with_annotation_property(ontology, rdfs::LABEL.into_owned(), fallback)
    }

    pub fn with_annotation_property(
        ontology: &Ontology,
        property: NamedNode,
        fallback: F,
    ) -> Self {
        let mut best = FxHashMap::<&NamedNode, &OwlLiteral>::default();
        for axiom in ontology.axioms() {
            let AxiomKind::AnnotationAssertion {
                property: p,
                subject: AnnotationSubject::Iri(subject),
                value,
            } = axiom.kind()
            else {
                continue;
            };
            if *p.iri() != property {
                continue;
            }
            let Some(literal) = value.as_literal() else {
                continue;
            };
            best.entry(subject)
                .and_modify(|current| {
                    if literal < *current {
                        *current = literal;
                    }
                })
                .or_insert(literal);
        }
        Self {
            labels: best
                .into_iter()
                .map(|(iri, literal)| (iri.clone(), literal.value().to_owned()))
                .collect(),
            fallback,
        }
    }
}

impl<F: ShortFormProvider> ShortFormProvider for AnnotationValueShortFormProvider<F> {
    fn short_form(&self, entity: &Entity) -> String {
        match self.labels.get(entity.iri()) {
            Some(label) => label.clone(),
            None => self.fallback.short_form(entity),
        }
    }
}

/// A node that may be compared by label.
///
/// For every implementor, the intrinsic order puts named entities before any other node, so
/// ordering labelled entities first stays consistent with the intrinsic order of the rest.
pub trait Orderable: Ord {
    /// The entity this node denotes, if it is a plain named entity.
    fn as_entity(&self) -> Option<Entity>;
}

impl Orderable for Entity {
    fn as_entity(&self) -> Option<Entity> {
        Some(self.clone())
    }
}

macro_rules! orderable_entity {
    ($($name:ident),*) => {
        $(
            impl Orderable for $name {
                fn as_entity(&self) -> Option<Entity> {
                    Some(self.clone().into())
                }
            }
        )*
    };
}

orderable_entity!(
    OwlClass,
    ObjectProperty,
    DataProperty,
    AnnotationProperty,
    Datatype,
    NamedIndividual
);

impl Orderable for ClassExpression {
    fn as_entity(&self) -> Option<Entity> {
        self.as_class().cloned().map(Into::into)
    }
}

impl Orderable for ObjectPropertyExpression {
    fn as_entity(&self) -> Option<Entity> {
        match self {
            Self::ObjectProperty(p) => Some(p.clone().into()),
            Self::ObjectInverseOf(_) => None,
        }
    }
}

impl Orderable for DataRange {
    fn as_entity(&self) -> Option<Entity> {
        self.as_datatype().cloned().map(Into::into)
    }
}

impl Orderable for Individual {
    fn as_entity(&self) -> Option<Entity> {
        match self {
            Self::Named(i) => Some(i.clone().into()),
            Self::Anonymous(_) => None,
        }
    }
}

impl Orderable for Axiom {
    fn as_entity(&self) -> Option<Entity> {
        None
    }
}

/// A total order on nodes.
///
/// Two named entities compare by their short form when a label source is set, with ties broken
/// by the intrinsic order. Everything else compares intrinsically. Structurally distinct nodes
/// never compare equal.
///
/// ```
/// use oxontology::{Entity, OwlClass, OwlObjectComparator, SimpleShortFormProvider};
/// use oxrdf::NamedNode;
///
/// let b = Entity::from(OwlClass::new(NamedNode::new("http://a.example/B")?));
/// let a = Entity::from(OwlClass::new(NamedNode::new("http://b.example/A")?));
/// let mut entities = vec![b.clone(), a.clone()];
/// OwlObjectComparator::new(Some(&SimpleShortFormProvider)).sort(&mut entities);
/// assert_eq!(entities, [a.clone(), b.clone()]);
/// OwlObjectComparator::intrinsic().sort(&mut entities);
/// assert_eq!(entities, [b, a]);
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Clone, Copy, Default)]
pub struct OwlObjectComparator<'a> {
    labels: Option<&'a dyn ShortFormProvider>,
}

impl<'a> OwlObjectComparator<'a> {
    pub fn new(labels: Option<&'a dyn ShortFormProvider>) -> Self {
        Self { labels }
    }

    /// A comparator using only the intrinsic order.
    pub fn intrinsic() -> Self {
        Self { labels: None }
    }

    pub fn compare<T: Orderable + ?Sized>(&self, a: &T, b: &T) -> Ordering {
        if let Some(labels) = self.labels {
            if let (Some(a_entity), Some(b_entity)) = (a.as_entity(), b.as_entity()) {
                return labels
                    .short_form(&a_entity)
                    .cmp(&labels.short_form(&b_entity))
                    .then_with(|| a.cmp(b));
            }
        }
        a.cmp(b)
    }

    pub fn sort<T: Orderable>(&self, items: &mut [T]) {
        if self.labels.is_none() {
            items.sort_unstable();
            return;
        }
        items.sort_by(|a, b| self.compare(a, b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::AnonymousIndividual;
    use crate::node_id::NodeId;

    fn class(iri: &str) -> Entity {
        OwlClass::new(NamedNode::new_unchecked(iri)).into()
    }

    #[test]
    fn simple_short_forms() {
        assert_eq!(
            SimpleShortFormProvider.short_form(&class("http://example.com/a/b")),
            "b"
        );
        assert_eq!(
            SimpleShortFormProvider.short_form(&class("http://example.com/a#b")),
            "b"
        );
        assert_eq!(
            SimpleShortFormProvider.short_form(&class("urn:isbn:123")),
            "123"
        );
    }

    #[test]
    fn label_short_forms() {
        let a = class("http://example.com/A");
        let mut ontology = Ontology::default();
        ontology.add_axioms([
            Axiom::annotation_assertion(
                rdfs::LABEL.into(),
                a.iri().clone(),
                OwlLiteral::new_simple_literal("zebra"),
            ),
            Axiom::annotation_assertion(
                rdfs::LABEL.into(),
                a.iri().clone(),
                OwlLiteral::new_simple_literal("aardvark"),
            ),
        ]);
        let provider = AnnotationValueShortFormProvider::new(&ontology, SimpleShortFormProvider);
        assert_eq!(provider.short_form(&a), "aardvark");
        assert_eq!(provider.short_form(&class("http://example.com/B")), "B");
    }

    #[test]
    fn labels_only_apply_to_named_entities() {
        let comparator = OwlObjectComparator::new(Some(&SimpleShortFormProvider));
        let named = Individual::from(NamedIndividual::new(NamedNode::new_unchecked(
            "http://example.com/z",
        )));
        let anonymous = Individual::from(AnonymousIndividual::new(NodeId::new("a")));
        assert_eq!(comparator.compare(&named, &anonymous), Ordering::Less);
        assert_eq!(comparator.compare(&anonymous, &anonymous), Ordering::Equal);
    }

    #[test]
    fn equal_labels_do_not_collapse() {
        let comparator = OwlObjectComparator::new(Some(&SimpleShortFormProvider));
        let first = class("http://a.example/X");
        let second = class("http://b.example/X");
        assert_eq!(comparator.compare(&first, &second), Ordering::Less);
        assert_eq!(comparator.compare(&second, &first), Ordering::Greater);
    }
}
