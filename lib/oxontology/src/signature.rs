//! Signature computation: the entities and anonymous individuals a node refers to.

use crate::annotation::Annotation;
use crate::axiom::{Axiom, AxiomKind};
use crate::entity::{
    AnnotationProperty, AnonymousIndividual, DataProperty, Datatype, Entity, NamedIndividual,
    ObjectProperty, OwlClass,
};
use crate::expression::ClassExpression;
use crate::visit::{Visitor, walk_axiom, walk_axiom_kind};
use std::collections::BTreeSet;
use std::convert::Infallible;

/// Collects entities and anonymous individuals.
///
/// Literal datatypes are part of the signature.
#[derive(Default)]
pub(crate) struct SignatureCollector {
    pub entities: BTreeSet<Entity>,
    pub anonymous_individuals: BTreeSet<AnonymousIndividual>,
    skip_axiom_annotations: bool,
}

impl SignatureCollector {
    /// A collector ignoring axiom annotations.
    pub fn logical() -> Self {
        Self {
            skip_axiom_annotations: true,
            ..Self::default()
        }
    }

    pub fn collect_axiom(mut self, axiom: &Axiom) -> Self {
        let Ok(()) = self.visit_axiom(axiom);
        self
    }
}

impl Visitor for SignatureCollector {
    type Error = Infallible;

    fn visit_axiom(&mut self, axiom: &Axiom) -> Result<(), Infallible> {
        if self.skip_axiom_annotations {
            walk_axiom_kind(self, axiom.kind())
        } else {
            walk_axiom(self, axiom)
        }
    }

    fn visit_class(&mut self, class: &OwlClass) -> Result<(), Infallible> {
        self.entities.insert(class.clone().into());
        Ok(())
    }

    fn visit_object_property(&mut self, property: &ObjectProperty) -> Result<(), Infallible> {
        self.entities.insert(property.clone().into());
        Ok(())
    }

    fn visit_data_property(&mut self, property: &DataProperty) -> Result<(), Infallible> {
        self.entities.insert(property.clone().into());
        Ok(())
    }

    fn visit_annotation_property(
        &mut self,
        property: &AnnotationProperty,
    ) -> Result<(), Infallible> {
        self.entities.insert(property.clone().into());
        Ok(())
    }

    fn visit_datatype(&mut self, datatype: &Datatype) -> Result<(), Infallible> {
        self.entities.insert(datatype.clone().into());
        Ok(())
    }

    fn visit_named_individual(&mut self, individual: &NamedIndividual) -> Result<(), Infallible> {
        self.entities.insert(individual.clone().into());
        Ok(())
    }

    fn visit_anonymous_individual(
        &mut self,
        individual: &AnonymousIndividual,
    ) -> Result<(), Infallible> {
        self.anonymous_individuals.insert(individual.clone());
        Ok(())
    }
}

impl Axiom {
    /// Returns every entity referenced by the axiom, annotations included.
    pub fn signature(&self) -> BTreeSet<Entity> {
        SignatureCollector::default().collect_axiom(self).entities
    }

    /// Returns the entities referenced by the logical content of the axiom, ignoring its
    /// annotations.
    pub fn content_signature(&self) -> BTreeSet<Entity> {
        SignatureCollector::logical().collect_axiom(self).entities
    }

    /// Returns every anonymous individual referenced by the axiom, annotations included.
    pub fn anonymous_individuals(&self) -> BTreeSet<AnonymousIndividual> {
        SignatureCollector::default()
            .collect_axiom(self)
            .anonymous_individuals
    }

    /// Checks if the logical content of the axiom mentions `entity`.
    pub fn mentions(&self, entity: &Entity) -> bool {
        self.content_signature().contains(entity)
    }
}

impl AxiomKind {
    pub fn signature(&self) -> BTreeSet<Entity> {
        let mut collector = SignatureCollector::default();
        let Ok(()) = walk_axiom_kind(&mut collector, self);
        collector.entities
    }
}

impl ClassExpression {
    pub fn signature(&self) -> BTreeSet<Entity> {
        let mut collector = SignatureCollector::default();
        let Ok(()) = collector.visit_class_expression(self);
        collector.entities
    }
}

impl Annotation {
    pub fn signature(&self) -> BTreeSet<Entity> {
        let mut collector = SignatureCollector::default();
        let Ok(()) = collector.visit_annotation(self);
        collector.entities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal::OwlLiteral;
    use oxrdf::NamedNode;
    use oxrdf::vocab::{rdfs, xsd};

    fn iri(name: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.com/{name}"))
    }

    #[test]
    fn nested_signature() {
        let p = ObjectProperty::new(iri("p"));
        let expression = ClassExpression::some_values_from(
            p.clone(),
            ClassExpression::complement_of(OwlClass::new(iri("A")).into()),
        );
        let axiom = Axiom::subclass_of(OwlClass::new(iri("B")).into(), expression);
        assert_eq!(
            axiom.signature(),
            BTreeSet::from([
                Entity::from(p),
                OwlClass::new(iri("A")).into(),
                OwlClass::new(iri("B")).into(),
            ])
        );
    }

    #[test]
    fn annotations_and_literals() {
        let axiom = Axiom::data_property_assertion(
            DataProperty::new(iri("age")),
            AnonymousIndividual::new(crate::NodeId::new("x")).into(),
            OwlLiteral::new_typed_literal("3", xsd::INTEGER),
        )
        .with_annotations([Annotation::new(
            rdfs::COMMENT.into(),
            OwlLiteral::new_simple_literal("c"),
        )]);
        let full = axiom.signature();
        assert!(full.contains(&Entity::from(AnnotationProperty::from(rdfs::COMMENT))));
        assert!(full.contains(&Entity::from(Datatype::from(xsd::STRING))));
        let content = axiom.content_signature();
        assert_eq!(
            content,
            BTreeSet::from([
                Entity::from(DataProperty::new(iri("age"))),
                Datatype::from(xsd::INTEGER).into(),
            ])
        );
        assert_eq!(axiom.anonymous_individuals().len(), 1);
        assert!(!axiom.mentions(&NamedIndividual::new(iri("x")).into()));
    }
}
