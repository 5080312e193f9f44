//! OWL 2 class expressions, object property expressions, and data ranges.

use crate::entity::{DataProperty, Datatype, Individual, ObjectProperty, OwlClass};
use crate::literal::OwlLiteral;
use oxrdf::NamedNode;
use std::collections::BTreeSet;

/// An OWL 2 object property expression.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub enum ObjectPropertyExpression {
    /// A named object property
    ObjectProperty(ObjectProperty),

    /// ObjectInverseOf(P) - the inverse of a named property
    ObjectInverseOf(ObjectProperty),
}

impl ObjectPropertyExpression {
    /// Returns the named property underlying this expression.
    pub fn named_property(&self) -> &ObjectProperty {
        match self {
            Self::ObjectProperty(p) | Self::ObjectInverseOf(p) => p,
        }
    }

    #[inline]
    pub fn is_inverse(&self) -> bool {
        matches!(self, Self::ObjectInverseOf(_))
    }
}

impl From<ObjectProperty> for ObjectPropertyExpression {
    #[inline]
    fn from(property: ObjectProperty) -> Self {
        Self::ObjectProperty(property)
    }
}

/// An OWL 2 class expression.
///
/// N-ary operands are sets: `ObjectUnionOf(A B)` and `ObjectUnionOf(B A)` are the same expression.
/// Cardinality restrictions always carry a filler; an unqualified restriction has `owl:Thing`
/// (or `rdfs:Literal` for data restrictions) as filler.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub enum ClassExpression {
    /// A named class (atomic class)
    Class(OwlClass),

    /// ObjectIntersectionOf(C1, ..., Cn)
    ObjectIntersectionOf(BTreeSet<ClassExpression>),

    /// ObjectUnionOf(C1, ..., Cn)
    ObjectUnionOf(BTreeSet<ClassExpression>),

    /// ObjectComplementOf(C)
    ObjectComplementOf(Box<ClassExpression>),

    /// ObjectOneOf(a1, ..., an)
    ObjectOneOf(BTreeSet<Individual>),

    /// ObjectSomeValuesFrom(P, C)
    ObjectSomeValuesFrom {
        property: ObjectPropertyExpression,
        filler: Box<ClassExpression>,
    },

    /// ObjectAllValuesFrom(P, C)
    ObjectAllValuesFrom {
        property: ObjectPropertyExpression,
        filler: Box<ClassExpression>,
    },

    /// ObjectHasValue(P, a)
    ObjectHasValue {
        property: ObjectPropertyExpression,
        individual: Individual,
    },

    /// ObjectHasSelf(P)
    ObjectHasSelf(ObjectPropertyExpression),

    /// ObjectMinCardinality(n, P, C)
    ObjectMinCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Box<ClassExpression>,
    },

    /// ObjectMaxCardinality(n, P, C)
    ObjectMaxCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Box<ClassExpression>,
    },

    /// ObjectExactCardinality(n, P, C)
    ObjectExactCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Box<ClassExpression>,
    },

    /// DataSomeValuesFrom(P, D)
    DataSomeValuesFrom {
        property: DataProperty,
        filler: DataRange,
    },

    /// DataAllValuesFrom(P, D)
    DataAllValuesFrom {
        property: DataProperty,
        filler: DataRange,
    },

    /// DataHasValue(P, v)
    DataHasValue {
        property: DataProperty,
        value: OwlLiteral,
    },

    /// DataMinCardinality(n, P, D)
    DataMinCardinality {
        cardinality: u32,
        property: DataProperty,
        filler: DataRange,
    },

    /// DataMaxCardinality(n, P, D)
    DataMaxCardinality {
        cardinality: u32,
        property: DataProperty,
        filler: DataRange,
    },

    /// DataExactCardinality(n, P, D)
    DataExactCardinality {
        cardinality: u32,
        property: DataProperty,
        filler: DataRange,
    },
}

impl ClassExpression {
    #[inline]
    pub fn class(class: OwlClass) -> Self {
        Self::Class(class)
    }

    pub fn thing() -> Self {
        Self::Class(OwlClass::thing())
    }

    pub fn intersection_of(operands: impl IntoIterator<Item = ClassExpression>) -> Self {
        Self::ObjectIntersectionOf(operands.into_iter().collect())
    }

    pub fn union_of(operands: impl IntoIterator<Item = ClassExpression>) -> Self {
        Self::ObjectUnionOf(operands.into_iter().collect())
    }

    pub fn complement_of(operand: ClassExpression) -> Self {
        Self::ObjectComplementOf(Box::new(operand))
    }

    pub fn one_of(individuals: impl IntoIterator<Item = Individual>) -> Self {
        Self::ObjectOneOf(individuals.into_iter().collect())
    }

    pub fn some_values_from(
        property: impl Into<ObjectPropertyExpression>,
        filler: ClassExpression,
    ) -> Self {
        Self::ObjectSomeValuesFrom {
            property: property.into(),
            filler: Box::new(filler),
        }
    }

    pub fn all_values_from(
        property: impl Into<ObjectPropertyExpression>,
        filler: ClassExpression,
    ) -> Self {
        Self::ObjectAllValuesFrom {
            property: property.into(),
            filler: Box::new(filler),
        }
    }

    /// `ObjectMinCardinality`; a missing filler means `owl:Thing`.
    pub fn min_cardinality(
        cardinality: u32,
        property: impl Into<ObjectPropertyExpression>,
        filler: Option<ClassExpression>,
    ) -> Self {
        Self::ObjectMinCardinality {
            cardinality,
            property: property.into(),
            filler: Box::new(filler.unwrap_or_else(Self::thing)),
        }
    }

    /// `ObjectMaxCardinality`; a missing filler means `owl:Thing`.
    pub fn max_cardinality(
        cardinality: u32,
        property: impl Into<ObjectPropertyExpression>,
        filler: Option<ClassExpression>,
    ) -> Self {
        Self::ObjectMaxCardinality {
            cardinality,
            property: property.into(),
            filler: Box::new(filler.unwrap_or_else(Self::thing)),
        }
    }

    /// `ObjectExactCardinality`; a missing filler means `owl:Thing`.
    pub fn exact_cardinality(
        cardinality: u32,
        property: impl Into<ObjectPropertyExpression>,
        filler: Option<ClassExpression>,
    ) -> Self {
        Self::ObjectExactCardinality {
            cardinality,
            property: property.into(),
            filler: Box::new(filler.unwrap_or_else(Self::thing)),
        }
    }

    /// `DataMinCardinality`; a missing filler means `rdfs:Literal`.
    pub fn data_min_cardinality(
        cardinality: u32,
        property: DataProperty,
        filler: Option<DataRange>,
    ) -> Self {
        Self::DataMinCardinality {
            cardinality,
            property,
            filler: filler.unwrap_or_else(DataRange::rdfs_literal),
        }
    }

    /// `DataMaxCardinality`; a missing filler means `rdfs:Literal`.
    pub fn data_max_cardinality(
        cardinality: u32,
        property: DataProperty,
        filler: Option<DataRange>,
    ) -> Self {
        Self::DataMaxCardinality {
            cardinality,
            property,
            filler: filler.unwrap_or_else(DataRange::rdfs_literal),
        }
    }

    /// `DataExactCardinality`; a missing filler means `rdfs:Literal`.
    pub fn data_exact_cardinality(
        cardinality: u32,
        property: DataProperty,
        filler: Option<DataRange>,
    ) -> Self {
        Self::DataExactCardinality {
            cardinality,
            property,
            filler: filler.unwrap_or_else(DataRange::rdfs_literal),
        }
    }

    /// Returns the named class if this expression is atomic.
    pub fn as_class(&self) -> Option<&OwlClass> {
        match self {
            Self::Class(c) => Some(c),
            _ => None,
        }
    }

    /// Checks if a cardinality restriction has a filler other than the universal class or datatype.
    ///
    /// Returns `false` for expressions that are not cardinality restrictions.
    pub fn is_qualified(&self) -> bool {
        match self {
            Self::ObjectMinCardinality { filler, .. }
            | Self::ObjectMaxCardinality { filler, .. }
            | Self::ObjectExactCardinality { filler, .. } => {
                filler.as_class().is_none_or(|c| !c.is_thing())
            }
            Self::DataMinCardinality { filler, .. }
            | Self::DataMaxCardinality { filler, .. }
            | Self::DataExactCardinality { filler, .. } => {
                filler.as_datatype().is_none_or(|d| !d.is_rdfs_literal())
            }
            _ => false,
        }
    }
}

impl From<OwlClass> for ClassExpression {
    #[inline]
    fn from(class: OwlClass) -> Self {
        Self::Class(class)
    }
}

/// A facet restriction inside a `DatatypeRestriction`, e.g. `xsd:minInclusive "1"^^xsd:integer`.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub struct FacetRestriction {
    facet: NamedNode,
    value: OwlLiteral,
}

impl FacetRestriction {
    #[inline]
    pub fn new(facet: NamedNode, value: OwlLiteral) -> Self {
        Self { facet, value }
    }

    #[inline]
    pub fn facet(&self) -> &NamedNode {
        &self.facet
    }

    #[inline]
    pub fn value(&self) -> &OwlLiteral {
        &self.value
    }
}

/// An OWL 2 data range.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub enum DataRange {
    /// A named datatype
    Datatype(Datatype),

    /// DataIntersectionOf(D1, ..., Dn)
    DataIntersectionOf(BTreeSet<DataRange>),

    /// DataUnionOf(D1, ..., Dn)
    DataUnionOf(BTreeSet<DataRange>),

    /// DataComplementOf(D)
    DataComplementOf(Box<DataRange>),

    /// DataOneOf(v1, ..., vn)
    DataOneOf(BTreeSet<OwlLiteral>),

    /// DatatypeRestriction(DT, f1 v1, ..., fn vn)
    DatatypeRestriction {
        datatype: Datatype,
        restrictions: BTreeSet<FacetRestriction>,
    },
}

impl DataRange {
    pub fn rdfs_literal() -> Self {
        Self::Datatype(Datatype::rdfs_literal())
    }

    pub fn as_datatype(&self) -> Option<&Datatype> {
        match self {
            Self::Datatype(d) => Some(d),
            _ => None,
        }
    }
}

impl From<Datatype> for DataRange {
    #[inline]
    fn from(datatype: Datatype) -> Self {
        Self::Datatype(datatype)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::vocab::xsd;

    fn class(name: &str) -> ClassExpression {
        OwlClass::new(NamedNode::new_unchecked(format!("http://example.com/{name}"))).into()
    }

    #[test]
    fn nary_operands_are_sets() {
        assert_eq!(
            ClassExpression::union_of([class("A"), class("B")]),
            ClassExpression::union_of([class("B"), class("A"), class("B")])
        );
    }

    #[test]
    fn unqualified_cardinality_uses_thing() {
        let p = ObjectProperty::new(NamedNode::new_unchecked("http://example.com/p"));
        let unqualified = ClassExpression::min_cardinality(1, p.clone(), None);
        assert!(!unqualified.is_qualified());
        assert_eq!(
            unqualified,
            ClassExpression::min_cardinality(1, p.clone(), Some(ClassExpression::thing()))
        );
        assert!(ClassExpression::min_cardinality(1, p, Some(class("A"))).is_qualified());

        let d = DataProperty::new(NamedNode::new_unchecked("http://example.com/d"));
        assert!(!ClassExpression::data_max_cardinality(2, d.clone(), None).is_qualified());
        assert!(
            ClassExpression::data_max_cardinality(2, d, Some(Datatype::from(xsd::INTEGER).into()))
                .is_qualified()
        );
    }
}
