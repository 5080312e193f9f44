//! Structural duplication with entity, literal and anonymous individual substitution.

use crate::annotation::Annotation;
use crate::axiom::Axiom;
use crate::entity::{
    AnnotationProperty, AnonymousIndividual, DataProperty, Datatype, Entity, EntityType,
    NamedIndividual, ObjectProperty, OwlClass,
};
use crate::fold::{Folder, rebuild_literal};
use crate::literal::OwlLiteral;
use crate::node_id::{AtomicIdSource, IdSource, NodeId};
use crate::object::OwlObject;
use crate::ontology::Ontology;
use crate::rule::SwrlVariable;
use oxrdf::NamedNode;
use rustc_hash::FxHashMap;

/// Mints the replacement of an anonymous individual.
///
/// [`ObjectDuplicator`] calls the provider once per distinct anonymous individual and reuses the
/// result for every later occurrence.
pub trait AnonymousIndividualProvider {
    fn replacement(&mut self, individual: &AnonymousIndividual) -> AnonymousIndividual;
}

/// Keeps anonymous individuals as they are.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreservingIndividualProvider;

impl AnonymousIndividualProvider for PreservingIndividualProvider {
    fn replacement(&mut self, individual: &AnonymousIndividual) -> AnonymousIndividual {
        individual.clone()
    }
}

/// Replaces every anonymous individual with a freshly minted one.
///
/// ```
/// use oxontology::{
///     AnonymousIndividual, AnonymousIndividualProvider, AtomicIdSource,
///     RemappingIndividualProvider,
/// };
///
/// let mut provider = RemappingIndividualProvider::new(AtomicIdSource::new(0));
/// let original = AnonymousIndividual::fresh();
/// assert_eq!(provider.replacement(&original).id().as_str(), "_:genid1");
/// ```
#[derive(Debug)]
pub struct RemappingIndividualProvider<S: IdSource = &'static AtomicIdSource> {
    source: S,
}

impl<S: IdSource> RemappingIndividualProvider<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl Default for RemappingIndividualProvider {
    fn default() -> Self {
        Self::new(AtomicIdSource::process())
    }
}

impl<S: IdSource> AnonymousIndividualProvider for RemappingIndividualProvider<S> {
    fn replacement(&mut self, _: &AnonymousIndividual) -> AnonymousIndividual {
        AnonymousIndividual::new(NodeId::fresh_from(&self.source))
    }
}

/// Names anonymous individuals `_:genid-anon-ind-1`, `_:genid-anon-ind-2`... in order of first
/// encounter.
#[derive(Debug, Clone, Default)]
pub struct CanonicalIndividualProvider {
    counter: u64,
}

impl CanonicalIndividualProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnonymousIndividualProvider for CanonicalIndividualProvider {
    fn replacement(&mut self, _: &AnonymousIndividual) -> AnonymousIndividual {
        self.counter += 1;
        AnonymousIndividual::new(NodeId::new(format!("genid-anon-ind-{}", self.counter)))
    }
}

/// Rebuilds object model nodes, substituting entities, literals and anonymous individuals.
///
/// With no substitution configured, duplication returns a structurally equal copy.
///
/// ```
/// use oxontology::{Axiom, ClassExpression, ObjectDuplicator, OwlClass};
/// use oxrdf::NamedNode;
/// use std::collections::HashMap;
///
/// let a = OwlClass::new(NamedNode::new("http://example.com/A")?);
/// let b = OwlClass::new(NamedNode::new("http://example.com/B")?);
/// let axiom = Axiom::subclass_of(a.clone().into(), ClassExpression::complement_of(a.into()));
///
/// let mut duplicator = ObjectDuplicator::new().with_iri_replacements(HashMap::from([(
///     NamedNode::new("http://example.com/A")?,
///     NamedNode::new("http://example.com/B")?,
/// )]));
/// assert_eq!(
///     duplicator.duplicate_axiom(&axiom),
///     Axiom::subclass_of(b.clone().into(), ClassExpression::complement_of(b.into()))
/// );
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
pub struct ObjectDuplicator {
    entity_replacements: FxHashMap<Entity, NamedNode>,
    literal_replacements: FxHashMap<OwlLiteral, OwlLiteral>,
    provider: Box<dyn AnonymousIndividualProvider>,
    individuals: FxHashMap<AnonymousIndividual, AnonymousIndividual>,
}

impl ObjectDuplicator {
    /// A duplicator without any substitution that preserves anonymous individuals.
    pub fn new() -> Self {
        Self {
            entity_replacements: FxHashMap::default(),
            literal_replacements: FxHashMap::default(),
            provider: Box::new(PreservingIndividualProvider),
            individuals: FxHashMap::default(),
        }
    }

    /// Renames the given entities.
    #[must_use]
    pub fn with_entity_replacements(
        mut self,
        replacements: impl IntoIterator<Item = (Entity, NamedNode)>,
    ) -> Self {
        self.entity_replacements.extend(replacements);
        self
    }

    /// Renames every entity, whatever its kind, whose IRI is a key of `replacements`.
    #[must_use]
    pub fn with_iri_replacements(
        mut self,
        replacements: impl IntoIterator<Item = (NamedNode, NamedNode)>,
    ) -> Self {
        for (from, to) in replacements {
            for entity_type in EntityType::ALL {
                self.entity_replacements
                    .insert(Entity::new(entity_type, from.clone()), to.clone());
            }
        }
        self
    }

    #[must_use]
    pub fn with_literal_replacements(
        mut self,
        replacements: impl IntoIterator<Item = (OwlLiteral, OwlLiteral)>,
    ) -> Self {
        self.literal_replacements.extend(replacements);
        self
    }

    /// Sets how anonymous individuals are replaced.
    #[must_use]
    pub fn with_individual_provider(
        mut self,
        provider: impl AnonymousIndividualProvider + 'static,
    ) -> Self {
        self.provider = Box::new(provider);
        self.individuals.clear();
        self
    }

    /// Duplicates any node.
    pub fn duplicate_object(&mut self, object: &OwlObject) -> OwlObject {
        object.fold(self)
    }

    pub fn duplicate_axiom(&mut self, axiom: &Axiom) -> Axiom {
        self.fold_axiom(axiom)
    }

    /// Duplicates axioms in the given order.
    ///
    /// Anonymous individual replacements are minted in order of first encounter, so a stable input
    /// order gives a stable naming.
    pub fn duplicate_axioms<'a>(
        &mut self,
        axioms: impl IntoIterator<Item = &'a Axiom>,
    ) -> Vec<Axiom> {
        axioms.into_iter().map(|a| self.fold_axiom(a)).collect()
    }

    pub fn duplicate_annotation(&mut self, annotation: &Annotation) -> Annotation {
        self.fold_annotation(annotation)
    }

    /// The replacement IRI of `entity`.
    ///
    /// Falls back to the replacement registered for another kind of entity with the same IRI.
    fn replacement_iri(&self, entity: &Entity) -> Option<&NamedNode> {
        if let Some(iri) = self.entity_replacements.get(entity) {
            return Some(iri);
        }
        self.iri_replacement(entity.iri())
    }

    fn iri_replacement(&self, iri: &NamedNode) -> Option<&NamedNode> {
        if self.entity_replacements.is_empty() {
            return None;
        }
        EntityType::ALL.into_iter().find_map(|entity_type| {
            self.entity_replacements
                .get(&Entity::new(entity_type, iri.clone()))
        })
    }

    fn renamed(&self, entity: Entity) -> Entity {
        match self.replacement_iri(&entity) {
            Some(iri) => entity.with_iri(iri.clone()),
            None => entity,
        }
    }
}

impl Default for ObjectDuplicator {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! fold_entity_kind {
    ($method:ident, $ty:ident) => {
        fn $method(&mut self, entity: &$ty) -> $ty {
            match self.replacement_iri(&entity.clone().into()) {
                Some(iri) => $ty::new(iri.clone()),
                None => entity.clone(),
            }
        }
    };
}

impl Folder for ObjectDuplicator {
    fold_entity_kind!(fold_class, OwlClass);
    fold_entity_kind!(fold_object_property, ObjectProperty);
    fold_entity_kind!(fold_data_property, DataProperty);
    fold_entity_kind!(fold_annotation_property, AnnotationProperty);
    fold_entity_kind!(fold_datatype, Datatype);
    fold_entity_kind!(fold_named_individual, NamedIndividual);

    fn fold_entity(&mut self, entity: &Entity) -> Entity {
        self.renamed(entity.clone())
    }

    fn fold_anonymous_individual(
        &mut self,
        individual: &AnonymousIndividual,
    ) -> AnonymousIndividual {
        if let Some(replacement) = self.individuals.get(individual) {
            return replacement.clone();
        }
        let replacement = self.provider.replacement(individual);
        self.individuals
            .insert(individual.clone(), replacement.clone());
        replacement
    }

    fn fold_literal(&mut self, literal: &OwlLiteral) -> OwlLiteral {
        if let Some(replacement) = self.literal_replacements.get(literal) {
            return replacement.clone();
        }
        rebuild_literal(self, literal)
    }

    fn fold_iri(&mut self, iri: &NamedNode) -> NamedNode {
        self.iri_replacement(iri).unwrap_or(iri).clone()
    }

    fn fold_variable(&mut self, variable: &SwrlVariable) -> SwrlVariable {
        SwrlVariable::new(self.fold_iri(variable.iri()))
    }
}

/// Renames the anonymous individuals of an ontology to canonical names.
///
/// Axioms are visited in canonical order, so two ontologies differing only in the naming of their
/// anonymous individuals normalize to the same axioms whenever their axioms sort the same way.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnonymousIndividualsNormalizer;

impl AnonymousIndividualsNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize_axioms<'a>(
        &self,
        axioms: impl IntoIterator<Item = &'a Axiom>,
    ) -> Vec<Axiom> {
        let mut sorted = axioms.into_iter().collect::<Vec<_>>();
        sorted.sort_unstable();
        ObjectDuplicator::new()
            .with_individual_provider(CanonicalIndividualProvider::new())
            .duplicate_axioms(sorted)
    }

    pub fn normalize_ontology(&self, ontology: &Ontology) -> Ontology {
        let mut duplicator =
            ObjectDuplicator::new().with_individual_provider(CanonicalIndividualProvider::new());
        let normalized = ontology.duplicate_with(&mut duplicator);
        tracing::debug!(
            axioms = normalized.axiom_count(),
            "anonymous individuals normalized"
        );
        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::AnnotationValue;
    use crate::expression::ClassExpression;
    use oxrdf::vocab::{rdfs, xsd};

    fn iri(name: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.com/{name}"))
    }

    #[test]
    fn entity_kinds_are_renamed_independently() {
        let class = Entity::from(OwlClass::new(iri("x")));
        let datatype = Entity::from(Datatype::new(iri("x")));
        let mut duplicator = ObjectDuplicator::new()
            .with_entity_replacements([(class.clone(), iri("c")), (datatype.clone(), iri("d"))]);
        assert_eq!(duplicator.fold_entity(&class).iri(), &iri("c"));
        assert_eq!(duplicator.fold_entity(&datatype).iri(), &iri("d"));
        assert_eq!(duplicator.fold_entity(&class).entity_type(), EntityType::Class);
    }

    #[test]
    fn entity_lookup_falls_back_to_punned_kinds() {
        let mut duplicator = ObjectDuplicator::new()
            .with_entity_replacements([(Entity::from(OwlClass::new(iri("x"))), iri("y"))]);
        assert_eq!(
            duplicator.fold_object_property(&ObjectProperty::new(iri("x"))),
            ObjectProperty::new(iri("y"))
        );
        assert_eq!(duplicator.fold_iri(&iri("x")), iri("y"));
        assert_eq!(duplicator.fold_iri(&iri("z")), iri("z"));
    }

    #[test]
    fn literals_are_replaced_or_retyped() {
        let mut duplicator = ObjectDuplicator::new()
            .with_literal_replacements([(
                OwlLiteral::new_simple_literal("a"),
                OwlLiteral::new_simple_literal("b"),
            )])
            .with_entity_replacements([(
                Entity::from(Datatype::from(xsd::INTEGER)),
                xsd::INT.into_owned(),
            )]);
        assert_eq!(
            duplicator.fold_literal(&OwlLiteral::new_simple_literal("a")),
            OwlLiteral::new_simple_literal("b")
        );
        assert_eq!(
            duplicator.fold_literal(&OwlLiteral::new_typed_literal("1", xsd::INTEGER)),
            OwlLiteral::new_typed_literal("1", xsd::INT)
        );
        let tagged = OwlLiteral::new_language_tagged_literal("a", "en").unwrap();
        assert_eq!(duplicator.fold_literal(&tagged), tagged);
    }

    #[test]
    fn anonymous_individuals_are_memoized() {
        let mut duplicator = ObjectDuplicator::new()
            .with_individual_provider(RemappingIndividualProvider::new(AtomicIdSource::new(0)));
        let a = AnonymousIndividual::new(NodeId::new("a"));
        let b = AnonymousIndividual::new(NodeId::new("b"));
        let first = duplicator.fold_anonymous_individual(&a);
        assert_eq!(duplicator.fold_anonymous_individual(&a), first);
        let second = duplicator.fold_anonymous_individual(&b);
        assert_ne!(first, second);
        assert_ne!(first, a);
    }

    #[test]
    fn unannotated_annotations_stay_unannotated() {
        let annotation = Annotation::new(
            rdfs::COMMENT.into(),
            AnnotationValue::from(OwlLiteral::new_simple_literal("c")),
        );
        let axiom = Axiom::declaration(OwlClass::new(iri("A")));
        let mut duplicator = ObjectDuplicator::new();
        assert_eq!(duplicator.duplicate_annotation(&annotation), annotation);
        assert!(duplicator.duplicate_axiom(&axiom).annotations().is_empty());
    }

    #[test]
    fn canonical_names_follow_axiom_order() {
        let x = AnonymousIndividual::new(NodeId::new("x"));
        let y = AnonymousIndividual::new(NodeId::new("y"));
        let axioms = [
            Axiom::class_assertion(OwlClass::new(iri("B")).into(), x.into()),
            Axiom::class_assertion(
                ClassExpression::class(OwlClass::new(iri("A"))),
                y.into(),
            ),
        ];
        let normalized = AnonymousIndividualsNormalizer::new().normalize_axioms(&axioms);
        let names = normalized
            .iter()
            .flat_map(|a| a.anonymous_individuals())
            .map(|i| i.id().as_str().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(names, ["_:genid-anon-ind-1", "_:genid-anon-ind-2"]);
    }
}
