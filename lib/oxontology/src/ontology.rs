//! OWL 2 Ontology - container for axioms and declarations.

use crate::annotation::Annotation;
use crate::axiom::Axiom;
use crate::duplicator::ObjectDuplicator;
use crate::entity::{AnonymousIndividual, Entity, EntityType};
use crate::signature::SignatureCollector;
use crate::visit::Visitor;
use oxrdf::NamedNode;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeSet;

/// The identity of an ontology: an optional IRI and an optional version IRI.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash, Default)]
pub struct OntologyId {
    iri: Option<NamedNode>,
    version_iri: Option<NamedNode>,
}

impl OntologyId {
    pub fn new(iri: Option<NamedNode>, version_iri: Option<NamedNode>) -> Self {
        Self { iri, version_iri }
    }

    #[inline]
    pub fn iri(&self) -> Option<&NamedNode> {
        self.iri.as_ref()
    }

    #[inline]
    pub fn version_iri(&self) -> Option<&NamedNode> {
        self.version_iri.as_ref()
    }

    /// An anonymous ontology has no IRI.
    #[inline]
    pub fn is_anonymous(&self) -> bool {
        self.iri.is_none()
    }
}

/// An OWL 2 ontology.
///
/// An ontology is a set of axioms together with its identity, its import declarations and its
/// own annotations. Adding an axiom that is already present is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ontology {
    id: OntologyId,
    imports: BTreeSet<NamedNode>,
    annotations: BTreeSet<Annotation>,
    axioms: FxHashSet<Axiom>,
}

impl Ontology {
    /// Creates a new empty ontology.
    pub fn new(iri: Option<NamedNode>) -> Self {
        Self {
            id: OntologyId::new(iri, None),
            ..Self::default()
        }
    }

    /// Creates a new ontology with the given IRI string.
    pub fn with_iri(iri: impl AsRef<str>) -> Result<Self, oxiri::IriParseError> {
        Ok(Self::new(Some(NamedNode::new(iri.as_ref())?)))
    }

    #[inline]
    pub fn id(&self) -> &OntologyId {
        &self.id
    }

    pub fn set_id(&mut self, id: OntologyId) {
        self.id = id;
    }

    /// Returns the ontology IRI.
    #[inline]
    pub fn iri(&self) -> Option<&NamedNode> {
        self.id.iri()
    }

    /// Sets the ontology IRI.
    pub fn set_iri(&mut self, iri: Option<NamedNode>) {
        self.id.iri = iri;
    }

    /// Returns the version IRI.
    #[inline]
    pub fn version_iri(&self) -> Option<&NamedNode> {
        self.id.version_iri()
    }

    /// Sets the version IRI.
    pub fn set_version_iri(&mut self, iri: Option<NamedNode>) {
        self.id.version_iri = iri;
    }

    /// Returns the imported ontology IRIs, sorted.
    pub fn imports(&self) -> impl Iterator<Item = &NamedNode> {
        self.imports.iter()
    }

    /// Adds an import declaration.
    pub fn add_import(&mut self, iri: NamedNode) -> bool {
        self.imports.insert(iri)
    }

    pub fn remove_import(&mut self, iri: &NamedNode) -> bool {
        self.imports.remove(iri)
    }

    /// Returns the ontology annotations, sorted.
    pub fn annotations(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter()
    }

    pub fn add_annotation(&mut self, annotation: Annotation) -> bool {
        self.annotations.insert(annotation)
    }

    /// Adds an axiom to the ontology. Returns `false` if it was already there.
    pub fn add_axiom(&mut self, axiom: Axiom) -> bool {
        self.axioms.insert(axiom)
    }

    /// Adds multiple axioms to the ontology.
    pub fn add_axioms(&mut self, axioms: impl IntoIterator<Item = Axiom>) {
        self.axioms.extend(axioms);
    }

    pub fn remove_axiom(&mut self, axiom: &Axiom) -> bool {
        self.axioms.remove(axiom)
    }

    pub fn contains_axiom(&self, axiom: &Axiom) -> bool {
        self.axioms.contains(axiom)
    }

    /// Returns all axioms, in no particular order.
    pub fn axioms(&self) -> impl Iterator<Item = &Axiom> {
        self.axioms.iter()
    }

    /// Returns all axioms in canonical order.
    pub fn sorted_axioms(&self) -> Vec<&Axiom> {
        let mut axioms = self.axioms.iter().collect::<Vec<_>>();
        axioms.sort_unstable();
        axioms
    }

    /// Returns the number of axioms.
    pub fn axiom_count(&self) -> usize {
        self.axioms.len()
    }

    /// Checks if the ontology contains no axiom and no ontology annotation.
    pub fn is_empty(&self) -> bool {
        self.axioms.is_empty() && self.annotations.is_empty()
    }

    fn collect_signature(&self) -> SignatureCollector {
        let mut collector = SignatureCollector::default();
        let Ok(()) = collector.visit_ontology(self);
        collector
    }

    /// Returns every entity referenced by the ontology, sorted.
    pub fn signature(&self) -> BTreeSet<Entity> {
        self.collect_signature().entities
    }

    /// Returns the entities of the given kind referenced by the ontology, sorted.
    pub fn entities_of_type(&self, entity_type: EntityType) -> Vec<Entity> {
        self.signature()
            .into_iter()
            .filter(|e| e.entity_type() == entity_type)
            .collect()
    }

    /// Returns every anonymous individual referenced by the ontology.
    pub fn anonymous_individuals(&self) -> BTreeSet<AnonymousIndividual> {
        self.collect_signature().anonymous_individuals
    }

    /// Returns the declaration axioms of `entity`, in canonical order.
    pub fn declaration_axioms(&self, entity: &Entity) -> Vec<&Axiom> {
        let mut axioms = self
            .axioms
            .iter()
            .filter(|a| a.declared_entity() == Some(entity))
            .collect::<Vec<_>>();
        axioms.sort_unstable();
        axioms
    }

    /// Checks if `entity` has a declaration axiom.
    pub fn is_declared(&self, entity: &Entity) -> bool {
        self.axioms
            .iter()
            .any(|a| a.declared_entity() == Some(entity))
    }

    /// Returns the annotation assertions whose subject is `iri`, in canonical order.
    pub fn annotation_assertion_axioms(&self, iri: &NamedNode) -> Vec<&Axiom> {
        let mut axioms = self
            .axioms
            .iter()
            .filter(|a| a.annotation_subject_iri() == Some(iri))
            .collect::<Vec<_>>();
        axioms.sort_unstable();
        axioms
    }

    /// Returns the axioms, other than declarations and annotation assertions, whose logical
    /// content refers to `entity` and nothing else. Sorted in canonical order.
    pub fn axioms_with_exact_signature(&self, entity: &Entity) -> Vec<&Axiom> {
        let mut axioms = self
            .axioms
            .iter()
            .filter(|a| a.declared_entity().is_none() && a.annotation_subject_iri().is_none())
            .filter(|a| {
                let signature = a.content_signature();
                signature.len() == 1 && signature.contains(entity)
            })
            .collect::<Vec<_>>();
        axioms.sort_unstable();
        axioms
    }

    /// Returns the IRIs that are illegally punned.
    ///
    /// An IRI is illegally punned if it is used for more than one kind of property, or both as
    /// a class and as a datatype.
    pub fn illegal_punnings(&self) -> BTreeSet<NamedNode> {
        let mut kinds = FxHashMap::<&NamedNode, FxHashSet<EntityType>>::default();
        let signature = self.signature();
        for entity in &signature {
            kinds
                .entry(entity.iri())
                .or_default()
                .insert(entity.entity_type());
        }
        kinds
            .into_iter()
            .filter(|(_, types)| {
                let properties = [
                    EntityType::ObjectProperty,
                    EntityType::DataProperty,
                    EntityType::AnnotationProperty,
                ]
                .into_iter()
                .filter(|t| types.contains(t))
                .count();
                properties > 1
                    || (types.contains(&EntityType::Class) && types.contains(&EntityType::Datatype))
            })
            .map(|(iri, _)| iri.clone())
            .collect()
    }

    /// Adds the axioms and the ontology annotations of `other` into this ontology.
    ///
    /// Imports of `other` are kept, except the import of this ontology itself.
    pub fn merge(&mut self, other: &Ontology) {
        self.axioms.extend(other.axioms.iter().cloned());
        self.annotations.extend(other.annotations.iter().cloned());
        for import in &other.imports {
            if self.iri() != Some(import) && other.iri() != Some(import) {
                self.imports.insert(import.clone());
            }
        }
        if let Some(iri) = other.iri() {
            self.imports.remove(iri);
        }
    }

    /// Duplicates the axioms and the annotations of this ontology into a new one with the same
    /// identity and imports.
    pub fn duplicate_with(&self, duplicator: &mut ObjectDuplicator) -> Ontology {
        Ontology {
            id: self.id.clone(),
            imports: self.imports.clone(),
            annotations: self
                .annotations
                .iter()
                .map(|a| duplicator.duplicate_annotation(a))
                .collect(),
            axioms: duplicator
                .duplicate_axioms(self.sorted_axioms())
                .into_iter()
                .collect(),
        }
    }
}

impl Extend<Axiom> for Ontology {
    fn extend<T: IntoIterator<Item = Axiom>>(&mut self, iter: T) {
        self.add_axioms(iter);
    }
}

impl FromIterator<Axiom> for Ontology {
    fn from_iter<T: IntoIterator<Item = Axiom>>(iter: T) -> Self {
        let mut ontology = Self::default();
        ontology.add_axioms(iter);
        ontology
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{DataProperty, ObjectProperty, OwlClass};
    use crate::expression::ClassExpression;

    fn iri(name: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.com/{name}"))
    }

    #[test]
    fn duplicate_axioms_are_ignored() {
        let mut ontology = Ontology::new(Some(iri("o")));
        let axiom = Axiom::declaration(OwlClass::new(iri("A")));
        assert!(ontology.add_axiom(axiom.clone()));
        assert!(!ontology.add_axiom(axiom.clone()));
        assert_eq!(ontology.axiom_count(), 1);
        assert!(ontology.is_declared(&OwlClass::new(iri("A")).into()));
        assert!(ontology.remove_axiom(&axiom));
        assert!(ontology.is_empty());
    }

    #[test]
    fn exact_signature_lookup() {
        let a = OwlClass::new(iri("A"));
        let p = ObjectProperty::new(iri("p"));
        let mut ontology = Ontology::default();
        ontology.add_axioms([
            Axiom::declaration(a.clone()),
            Axiom::disjoint_classes([
                a.clone().into(),
                ClassExpression::complement_of(a.clone().into()),
            ]),
            Axiom::object_property_domain(p, a.clone().into()),
        ]);
        let axioms = ontology.axioms_with_exact_signature(&a.into());
        assert_eq!(axioms.len(), 1);
        assert_eq!(axioms[0].kind().name(), "DisjointClasses");
    }

    #[test]
    fn illegal_punnings() {
        let mut ontology = Ontology::default();
        ontology.add_axioms([
            Axiom::declaration(ObjectProperty::new(iri("x"))),
            Axiom::declaration(DataProperty::new(iri("x"))),
            Axiom::declaration(OwlClass::new(iri("y"))),
            Axiom::declaration(ObjectProperty::new(iri("y"))),
        ]);
        assert_eq!(ontology.illegal_punnings(), BTreeSet::from([iri("x")]));
    }

    #[test]
    fn merge_imports() {
        let mut first = Ontology::new(Some(iri("first")));
        first.add_import(iri("second"));
        let mut second = Ontology::new(Some(iri("second")));
        second.add_import(iri("third"));
        second.add_axiom(Axiom::declaration(OwlClass::new(iri("A"))));
        first.merge(&second);
        assert_eq!(first.imports().collect::<Vec<_>>(), [&iri("third")]);
        assert_eq!(first.axiom_count(), 1);
    }
}
