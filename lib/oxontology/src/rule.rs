//! DL-safe rules (SWRL) as they appear in `DLSafeRule(...)` axioms.

use crate::entity::{DataProperty, Individual};
use crate::expression::{ClassExpression, DataRange, ObjectPropertyExpression};
use crate::literal::OwlLiteral;
use oxrdf::NamedNode;
use std::collections::BTreeSet;
use std::fmt;

/// A rule variable `Variable(iri)`.
///
/// Variables are leaves: the same variable may occur in several atoms of a rule.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub struct SwrlVariable(NamedNode);

impl SwrlVariable {
    #[inline]
    pub fn new(iri: NamedNode) -> Self {
        Self(iri)
    }

    #[inline]
    pub fn iri(&self) -> &NamedNode {
        &self.0
    }
}

impl fmt::Display for SwrlVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Variable({})", self.0)
    }
}

/// An atom argument standing for an individual.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub enum IArgument {
    Individual(Individual),
    Variable(SwrlVariable),
}

impl From<Individual> for IArgument {
    #[inline]
    fn from(individual: Individual) -> Self {
        Self::Individual(individual)
    }
}

impl From<SwrlVariable> for IArgument {
    #[inline]
    fn from(variable: SwrlVariable) -> Self {
        Self::Variable(variable)
    }
}

/// An atom argument standing for a literal.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub enum DArgument {
    Literal(OwlLiteral),
    Variable(SwrlVariable),
}

impl From<OwlLiteral> for DArgument {
    #[inline]
    fn from(literal: OwlLiteral) -> Self {
        Self::Literal(literal)
    }
}

impl From<SwrlVariable> for DArgument {
    #[inline]
    fn from(variable: SwrlVariable) -> Self {
        Self::Variable(variable)
    }
}

/// A rule atom.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub enum Atom {
    /// ClassAtom(C x)
    Class {
        class_expression: ClassExpression,
        argument: IArgument,
    },
    /// DataRangeAtom(D x)
    DataRange {
        data_range: DataRange,
        argument: DArgument,
    },
    /// ObjectPropertyAtom(P x y)
    ObjectProperty {
        property: ObjectPropertyExpression,
        subject: IArgument,
        object: IArgument,
    },
    /// DataPropertyAtom(P x v)
    DataProperty {
        property: DataProperty,
        subject: IArgument,
        object: DArgument,
    },
    /// BuiltInAtom(iri v1 ... vn), arguments are ordered
    BuiltIn {
        predicate: NamedNode,
        arguments: Vec<DArgument>,
    },
    /// SameIndividualAtom(x y)
    SameIndividual(IArgument, IArgument),
    /// DifferentIndividualsAtom(x y)
    DifferentIndividuals(IArgument, IArgument),
}

/// A DL-safe rule `body -> head`.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub struct Rule {
    body: BTreeSet<Atom>,
    head: BTreeSet<Atom>,
}

impl Rule {
    pub fn new(
        body: impl IntoIterator<Item = Atom>,
        head: impl IntoIterator<Item = Atom>,
    ) -> Self {
        Self {
            body: body.into_iter().collect(),
            head: head.into_iter().collect(),
        }
    }

    #[inline]
    pub fn body(&self) -> &BTreeSet<Atom> {
        &self.body
    }

    #[inline]
    pub fn head(&self) -> &BTreeSet<Atom> {
        &self.head
    }

    /// Returns the variables used in the rule, in canonical order.
    pub fn variables(&self) -> BTreeSet<&SwrlVariable> {
        fn i_argument<'a>(arg: &'a IArgument, out: &mut BTreeSet<&'a SwrlVariable>) {
            if let IArgument::Variable(v) = arg {
                out.insert(v);
            }
        }
        fn d_argument<'a>(arg: &'a DArgument, out: &mut BTreeSet<&'a SwrlVariable>) {
            if let DArgument::Variable(v) = arg {
                out.insert(v);
            }
        }
        let mut variables = BTreeSet::new();
        for atom in self.body.iter().chain(&self.head) {
            match atom {
                Atom::Class { argument, .. } => i_argument(argument, &mut variables),
                Atom::DataRange { argument, .. } => d_argument(argument, &mut variables),
                Atom::ObjectProperty {
                    subject, object, ..
                }
                | Atom::SameIndividual(subject, object)
                | Atom::DifferentIndividuals(subject, object) => {
                    i_argument(subject, &mut variables);
                    i_argument(object, &mut variables);
                }
                Atom::DataProperty {
                    subject, object, ..
                } => {
                    i_argument(subject, &mut variables);
                    d_argument(object, &mut variables);
                }
                Atom::BuiltIn { arguments, .. } => {
                    for argument in arguments {
                        d_argument(argument, &mut variables);
                    }
                }
            }
        }
        variables
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{ObjectProperty, OwlClass};

    fn iri(name: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.com/{name}"))
    }

    #[test]
    fn variables_are_shared_leaves() {
        let x = SwrlVariable::new(iri("x"));
        let y = SwrlVariable::new(iri("y"));
        let rule = Rule::new(
            [
                Atom::Class {
                    class_expression: OwlClass::new(iri("Person")).into(),
                    argument: x.clone().into(),
                },
                Atom::ObjectProperty {
                    property: ObjectProperty::new(iri("hasParent")).into(),
                    subject: x.clone().into(),
                    object: y.clone().into(),
                },
            ],
            [Atom::Class {
                class_expression: OwlClass::new(iri("Child")).into(),
                argument: x.clone().into(),
            }],
        );
        assert_eq!(rule.variables().into_iter().collect::<Vec<_>>(), [&x, &y]);
    }
}
