use crate::annotation::Annotation;
use crate::axiom::Axiom;
use crate::entity::{
    AnnotationProperty, AnonymousIndividual, DataProperty, Datatype, Entity, Individual,
    NamedIndividual, ObjectProperty, OwlClass,
};
use crate::expression::{ClassExpression, DataRange, FacetRestriction, ObjectPropertyExpression};
use crate::fold::Folder;
use crate::literal::OwlLiteral;
use crate::ontology::Ontology;
use crate::rule::{Atom, DArgument, IArgument, Rule, SwrlVariable};
use crate::visit::Visitor;
use oxrdf::NamedNode;
use std::sync::Arc;

/// Any node of the object model.
///
/// The set of node kinds is closed: [`accept`](Self::accept) and [`fold`](Self::fold) dispatch
/// each kind to the matching [`Visitor`] or [`Folder`] method.
///
/// ```
/// use oxontology::{Axiom, ObjectDuplicator, OwlClass, OwlObject};
/// use oxrdf::NamedNode;
///
/// let a = OwlClass::new(NamedNode::new("http://example.com/A")?);
/// let object = OwlObject::from(Axiom::declaration(a));
/// let mut duplicator = ObjectDuplicator::new();
/// assert_eq!(object.fold(&mut duplicator), object);
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwlObject {
    Class(OwlClass),
    ObjectProperty(ObjectProperty),
    DataProperty(DataProperty),
    AnnotationProperty(AnnotationProperty),
    Datatype(Datatype),
    NamedIndividual(NamedIndividual),
    AnonymousIndividual(AnonymousIndividual),
    Literal(OwlLiteral),
    Iri(NamedNode),
    ClassExpression(ClassExpression),
    ObjectPropertyExpression(ObjectPropertyExpression),
    DataRange(DataRange),
    FacetRestriction(FacetRestriction),
    Individual(Individual),
    Annotation(Annotation),
    Axiom(Axiom),
    Rule(Rule),
    Atom(Atom),
    IArgument(IArgument),
    DArgument(DArgument),
    Variable(SwrlVariable),
    /// A reference to an ontology container. Folding returns the same container.
    Ontology(Arc<Ontology>),
}

impl OwlObject {
    /// Applies the matching case of `visitor` to this node.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        match self {
            Self::Class(n) => visitor.visit_class(n),
            Self::ObjectProperty(n) => visitor.visit_object_property(n),
            Self::DataProperty(n) => visitor.visit_data_property(n),
            Self::AnnotationProperty(n) => visitor.visit_annotation_property(n),
            Self::Datatype(n) => visitor.visit_datatype(n),
            Self::NamedIndividual(n) => visitor.visit_named_individual(n),
            Self::AnonymousIndividual(n) => visitor.visit_anonymous_individual(n),
            Self::Literal(n) => visitor.visit_literal(n),
            Self::Iri(n) => visitor.visit_iri(n),
            Self::ClassExpression(n) => visitor.visit_class_expression(n),
            Self::ObjectPropertyExpression(n) => visitor.visit_object_property_expression(n),
            Self::DataRange(n) => visitor.visit_data_range(n),
            Self::FacetRestriction(n) => visitor.visit_facet_restriction(n),
            Self::Individual(n) => visitor.visit_individual(n),
            Self::Annotation(n) => visitor.visit_annotation(n),
            Self::Axiom(n) => visitor.visit_axiom(n),
            Self::Rule(n) => visitor.visit_rule(n),
            Self::Atom(n) => visitor.visit_atom(n),
            Self::IArgument(n) => visitor.visit_i_argument(n),
            Self::DArgument(n) => visitor.visit_d_argument(n),
            Self::Variable(n) => visitor.visit_variable(n),
            Self::Ontology(n) => visitor.visit_ontology(n),
        }
    }

    /// Rebuilds this node through the matching case of `folder`.
    #[must_use]
    pub fn fold<F: Folder + ?Sized>(&self, folder: &mut F) -> Self {
        match self {
            Self::Class(n) => Self::Class(folder.fold_class(n)),
            Self::ObjectProperty(n) => Self::ObjectProperty(folder.fold_object_property(n)),
            Self::DataProperty(n) => Self::DataProperty(folder.fold_data_property(n)),
            Self::AnnotationProperty(n) => {
                Self::AnnotationProperty(folder.fold_annotation_property(n))
            }
            Self::Datatype(n) => Self::Datatype(folder.fold_datatype(n)),
            Self::NamedIndividual(n) => Self::NamedIndividual(folder.fold_named_individual(n)),
            Self::AnonymousIndividual(n) => {
                Self::AnonymousIndividual(folder.fold_anonymous_individual(n))
            }
            Self::Literal(n) => Self::Literal(folder.fold_literal(n)),
            Self::Iri(n) => Self::Iri(folder.fold_iri(n)),
            Self::ClassExpression(n) => Self::ClassExpression(folder.fold_class_expression(n)),
            Self::ObjectPropertyExpression(n) => {
                Self::ObjectPropertyExpression(folder.fold_object_property_expression(n))
            }
            Self::DataRange(n) => Self::DataRange(folder.fold_data_range(n)),
            Self::FacetRestriction(n) => Self::FacetRestriction(folder.fold_facet_restriction(n)),
            Self::Individual(n) => Self::Individual(folder.fold_individual(n)),
            Self::Annotation(n) => Self::Annotation(folder.fold_annotation(n)),
            Self::Axiom(n) => Self::Axiom(folder.fold_axiom(n)),
            Self::Rule(n) => Self::Rule(folder.fold_rule(n)),
            Self::Atom(n) => Self::Atom(folder.fold_atom(n)),
            Self::IArgument(n) => Self::IArgument(folder.fold_i_argument(n)),
            Self::DArgument(n) => Self::DArgument(folder.fold_d_argument(n)),
            Self::Variable(n) => Self::Variable(folder.fold_variable(n)),
            Self::Ontology(n) => Self::Ontology(Arc::clone(n)),
        }
    }

    /// Returns the entity if this node is one.
    pub fn as_entity(&self) -> Option<Entity> {
        Some(match self {
            Self::Class(e) => e.clone().into(),
            Self::ObjectProperty(e) => e.clone().into(),
            Self::DataProperty(e) => e.clone().into(),
            Self::AnnotationProperty(e) => e.clone().into(),
            Self::Datatype(e) => e.clone().into(),
            Self::NamedIndividual(e) => e.clone().into(),
            _ => return None,
        })
    }
}

macro_rules! impl_from_for_object {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for OwlObject {
                #[inline]
                fn from(node: $ty) -> Self {
                    Self::$variant(node)
                }
            }
        )*
    };
}

impl_from_for_object!(
    Class(OwlClass),
    ObjectProperty(ObjectProperty),
    DataProperty(DataProperty),
    AnnotationProperty(AnnotationProperty),
    Datatype(Datatype),
    NamedIndividual(NamedIndividual),
    AnonymousIndividual(AnonymousIndividual),
    Literal(OwlLiteral),
    Iri(NamedNode),
    ClassExpression(ClassExpression),
    ObjectPropertyExpression(ObjectPropertyExpression),
    DataRange(DataRange),
    FacetRestriction(FacetRestriction),
    Individual(Individual),
    Annotation(Annotation),
    Axiom(Axiom),
    Rule(Rule),
    Atom(Atom),
    IArgument(IArgument),
    DArgument(DArgument),
    Variable(SwrlVariable),
    Ontology(Arc<Ontology>),
);

impl From<Entity> for OwlObject {
    fn from(entity: Entity) -> Self {
        match entity {
            Entity::AnnotationProperty(e) => e.into(),
            Entity::ObjectProperty(e) => e.into(),
            Entity::DataProperty(e) => e.into(),
            Entity::Datatype(e) => e.into(),
            Entity::Class(e) => e.into(),
            Entity::NamedIndividual(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct KindCounter {
        classes: usize,
        axioms: usize,
    }

    impl Visitor for KindCounter {
        type Error = ();

        fn visit_class(&mut self, _: &OwlClass) -> Result<(), ()> {
            self.classes += 1;
            Ok(())
        }

        fn visit_axiom(&mut self, axiom: &Axiom) -> Result<(), ()> {
            self.axioms += 1;
            crate::visit::walk_axiom(self, axiom)
        }
    }

    #[test]
    fn accept_dispatches_to_the_matching_case() {
        let a = OwlClass::new(NamedNode::new_unchecked("http://example.com/A"));
        let b = OwlClass::new(NamedNode::new_unchecked("http://example.com/B"));
        let mut counter = KindCounter::default();
        OwlObject::from(a.clone()).accept(&mut counter).unwrap();
        assert_eq!((counter.classes, counter.axioms), (1, 0));
        OwlObject::from(Axiom::subclass_of(a.into(), b.into()))
            .accept(&mut counter)
            .unwrap();
        assert_eq!((counter.classes, counter.axioms), (3, 1));
    }

    #[test]
    fn ontology_references_fold_unchanged() {
        struct Renamer;
        impl Folder for Renamer {
            fn fold_class(&mut self, _: &OwlClass) -> OwlClass {
                OwlClass::thing()
            }
        }
        let mut ontology = Ontology::default();
        ontology.add_axiom(Axiom::declaration(OwlClass::new(NamedNode::new_unchecked(
            "http://example.com/A",
        ))));
        let ontology = Arc::new(ontology);
        let OwlObject::Ontology(folded) = OwlObject::from(Arc::clone(&ontology)).fold(&mut Renamer)
        else {
            panic!("expected an ontology")
        };
        assert!(Arc::ptr_eq(&folded, &ontology));
    }
}
