//! OWL 2 entities and individuals.

use crate::node_id::NodeId;
use crate::vocab::{
    BUILT_IN_ANNOTATION_PROPERTIES, BUILT_IN_DATATYPE_NAMESPACES, BUILT_IN_EXTRA_DATATYPES, owl,
};
use oxrdf::vocab::rdfs;
use oxrdf::{NamedNode, NamedNodeRef};
use std::fmt;

macro_rules! entity_newtype {
    ($(#[$attr:meta])* $name:ident, $entity_type:ident) => {
        $(#[$attr])*
        #[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
        pub struct $name(NamedNode);

        impl $name {
            #[inline]
            pub fn new(iri: NamedNode) -> Self {
                Self(iri)
            }

            /// Builds the entity from an IRI string, validating it.
            #[inline]
            pub fn new_from_iri(iri: impl Into<String>) -> Result<Self, oxiri::IriParseError> {
                Ok(Self(NamedNode::new(iri)?))
            }

            #[inline]
            pub fn iri(&self) -> &NamedNode {
                &self.0
            }

            #[inline]
            pub fn into_inner(self) -> NamedNode {
                self.0
            }

            /// Checks if this entity belongs to the reserved OWL 2 vocabulary.
            #[inline]
            pub fn is_built_in(&self) -> bool {
                EntityType::$entity_type.is_built_in(self.0.as_ref())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<NamedNode> for $name {
            #[inline]
            fn from(iri: NamedNode) -> Self {
                Self(iri)
            }
        }

        impl From<NamedNodeRef<'_>> for $name {
            #[inline]
            fn from(iri: NamedNodeRef<'_>) -> Self {
                Self(iri.into_owned())
            }
        }

        impl From<$name> for NamedNode {
            #[inline]
            fn from(entity: $name) -> Self {
                entity.0
            }
        }

        impl From<$name> for Entity {
            #[inline]
            fn from(entity: $name) -> Self {
                Self::$entity_type(entity)
            }
        }
    };
}

entity_newtype!(
    /// An OWL class (`Class(...)`).
    ///
    /// Every class is a subclass of `owl:Thing` and a superclass of `owl:Nothing`.
    OwlClass,
    Class
);

entity_newtype!(
    /// An OWL object property, relating individuals to individuals.
    ObjectProperty,
    ObjectProperty
);

entity_newtype!(
    /// An OWL data property, relating individuals to literals.
    DataProperty,
    DataProperty
);

entity_newtype!(
    /// An OWL annotation property. Annotations carry no logical meaning.
    AnnotationProperty,
    AnnotationProperty
);

entity_newtype!(
    /// A datatype, e.g. `xsd:integer`.
    Datatype,
    Datatype
);

entity_newtype!(
    /// An individual identified by an IRI.
    NamedIndividual,
    NamedIndividual
);

impl OwlClass {
    /// `owl:Thing`
    pub fn thing() -> Self {
        owl::THING.into()
    }

    /// `owl:Nothing`
    pub fn nothing() -> Self {
        owl::NOTHING.into()
    }

    #[inline]
    pub fn is_thing(&self) -> bool {
        self.0.as_ref() == owl::THING
    }
}

impl Datatype {
    /// `rdfs:Literal`, the universal datatype.
    pub fn rdfs_literal() -> Self {
        rdfs::LITERAL.into()
    }

    #[inline]
    pub fn is_rdfs_literal(&self) -> bool {
        self.0.as_ref() == rdfs::LITERAL
    }
}

/// An individual without IRI, only known inside its ontology document.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub struct AnonymousIndividual(NodeId);

impl AnonymousIndividual {
    #[inline]
    pub fn new(id: NodeId) -> Self {
        Self(id)
    }

    /// Mints an anonymous individual with a fresh process-unique identifier.
    pub fn fresh() -> Self {
        Self(crate::node_id::fresh_anonymous_id())
    }

    #[inline]
    pub fn id(&self) -> &NodeId {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> NodeId {
        self.0
    }
}

impl fmt::Display for AnonymousIndividual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<NodeId> for AnonymousIndividual {
    #[inline]
    fn from(id: NodeId) -> Self {
        Self(id)
    }
}

/// An individual, either named or anonymous.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub enum Individual {
    Named(NamedIndividual),
    Anonymous(AnonymousIndividual),
}

impl Individual {
    #[inline]
    pub fn named(iri: NamedNode) -> Self {
        Self::Named(NamedIndividual::new(iri))
    }

    #[inline]
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous(_))
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(i) => i.fmt(f),
            Self::Anonymous(i) => i.fmt(f),
        }
    }
}

impl From<NamedIndividual> for Individual {
    #[inline]
    fn from(individual: NamedIndividual) -> Self {
        Self::Named(individual)
    }
}

impl From<AnonymousIndividual> for Individual {
    #[inline]
    fn from(individual: AnonymousIndividual) -> Self {
        Self::Anonymous(individual)
    }
}

/// The six kinds of OWL 2 entities.
///
/// The variant order is the order in which entity groups are rendered.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Copy, Hash)]
pub enum EntityType {
    AnnotationProperty,
    ObjectProperty,
    DataProperty,
    Datatype,
    Class,
    NamedIndividual,
}

impl EntityType {
    pub const ALL: [Self; 6] = [
        Self::AnnotationProperty,
        Self::ObjectProperty,
        Self::DataProperty,
        Self::Datatype,
        Self::Class,
        Self::NamedIndividual,
    ];

    /// The functional-style syntax keyword, e.g. `ObjectProperty`.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::AnnotationProperty => "AnnotationProperty",
            Self::ObjectProperty => "ObjectProperty",
            Self::DataProperty => "DataProperty",
            Self::Datatype => "Datatype",
            Self::Class => "Class",
            Self::NamedIndividual => "NamedIndividual",
        }
    }

    /// The human readable name, used in comments.
    pub const fn label(self) -> &'static str {
        match self {
            Self::AnnotationProperty => "Annotation Property",
            Self::ObjectProperty => "Object Property",
            Self::DataProperty => "Data Property",
            Self::Datatype => "Datatype",
            Self::Class => "Class",
            Self::NamedIndividual => "Individual",
        }
    }

    pub const fn plural_label(self) -> &'static str {
        match self {
            Self::AnnotationProperty => "Annotation Properties",
            Self::ObjectProperty => "Object Properties",
            Self::DataProperty => "Data Properties",
            Self::Datatype => "Datatypes",
            Self::Class => "Classes",
            Self::NamedIndividual => "Named Individuals",
        }
    }

    /// Checks if `iri` is part of the reserved vocabulary for this kind of entity.
    pub fn is_built_in(self, iri: NamedNodeRef<'_>) -> bool {
        let iri = iri.as_str();
        match self {
            Self::Class => iri == owl::THING.as_str() || iri == owl::NOTHING.as_str(),
            Self::ObjectProperty => {
                iri == owl::TOP_OBJECT_PROPERTY.as_str()
                    || iri == owl::BOTTOM_OBJECT_PROPERTY.as_str()
            }
            Self::DataProperty => {
                iri == owl::TOP_DATA_PROPERTY.as_str() || iri == owl::BOTTOM_DATA_PROPERTY.as_str()
            }
            Self::AnnotationProperty => BUILT_IN_ANNOTATION_PROPERTIES.contains(&iri),
            Self::Datatype => {
                BUILT_IN_DATATYPE_NAMESPACES
                    .iter()
                    .any(|ns| iri.starts_with(ns))
                    || BUILT_IN_EXTRA_DATATYPES.contains(&iri)
            }
            Self::NamedIndividual => false,
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// An OWL 2 entity: a named element of the vocabulary of an ontology.
///
/// The same IRI may denote entities of different kinds ("punning").
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub enum Entity {
    AnnotationProperty(AnnotationProperty),
    ObjectProperty(ObjectProperty),
    DataProperty(DataProperty),
    Datatype(Datatype),
    Class(OwlClass),
    NamedIndividual(NamedIndividual),
}

impl Entity {
    /// Builds an entity of the given kind.
    pub fn new(entity_type: EntityType, iri: NamedNode) -> Self {
        match entity_type {
            EntityType::AnnotationProperty => Self::AnnotationProperty(iri.into()),
            EntityType::ObjectProperty => Self::ObjectProperty(iri.into()),
            EntityType::DataProperty => Self::DataProperty(iri.into()),
            EntityType::Datatype => Self::Datatype(iri.into()),
            EntityType::Class => Self::Class(iri.into()),
            EntityType::NamedIndividual => Self::NamedIndividual(iri.into()),
        }
    }

    pub fn iri(&self) -> &NamedNode {
        match self {
            Self::AnnotationProperty(e) => e.iri(),
            Self::ObjectProperty(e) => e.iri(),
            Self::DataProperty(e) => e.iri(),
            Self::Datatype(e) => e.iri(),
            Self::Class(e) => e.iri(),
            Self::NamedIndividual(e) => e.iri(),
        }
    }

    pub fn entity_type(&self) -> EntityType {
        match self {
            Self::AnnotationProperty(_) => EntityType::AnnotationProperty,
            Self::ObjectProperty(_) => EntityType::ObjectProperty,
            Self::DataProperty(_) => EntityType::DataProperty,
            Self::Datatype(_) => EntityType::Datatype,
            Self::Class(_) => EntityType::Class,
            Self::NamedIndividual(_) => EntityType::NamedIndividual,
        }
    }

    /// Returns an entity of the same kind with another IRI.
    #[must_use]
    pub fn with_iri(&self, iri: NamedNode) -> Self {
        Self::new(self.entity_type(), iri)
    }

    pub fn is_built_in(&self) -> bool {
        self.entity_type().is_built_in(self.iri().as_ref())
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.entity_type(), self.iri())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::vocab::xsd;

    #[test]
    fn built_in_entities() {
        assert!(OwlClass::thing().is_built_in());
        assert!(!OwlClass::new_from_iri("http://example.com/A").unwrap().is_built_in());
        assert!(Datatype::from(xsd::INTEGER).is_built_in());
        assert!(Datatype::rdfs_literal().is_built_in());
        assert!(AnnotationProperty::from(rdfs::LABEL).is_built_in());
        assert!(!Entity::new(EntityType::Class, rdfs::LABEL.into_owned()).is_built_in());
    }

    #[test]
    fn punned_entities_are_distinct() {
        let iri = NamedNode::new_unchecked("http://example.com/x");
        let class = Entity::new(EntityType::Class, iri.clone());
        let datatype = class.with_iri(iri.clone());
        assert_eq!(class, datatype);
        let datatype = Entity::new(EntityType::Datatype, iri);
        assert_ne!(class, datatype);
        assert_eq!(class.iri(), datatype.iri());
        assert!(datatype < class);
    }

    #[test]
    fn display() {
        let class = Entity::from(OwlClass::new_from_iri("http://example.com/A").unwrap());
        assert_eq!(class.to_string(), "Class(<http://example.com/A>)");
    }
}
