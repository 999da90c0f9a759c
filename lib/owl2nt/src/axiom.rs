//! OWL 2 class axioms.

use crate::expression::ClassExpression;

/// A class axiom relevant to classification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Axiom {
    /// SubClassOf(subclass superclass)
    SubClassOf {
        sub_class: ClassExpression,
        super_class: ClassExpression,
    },
    /// EquivalentClasses(C1 C2 ...)
    EquivalentClasses(Vec<ClassExpression>),
}

impl Axiom {
    /// Creates a SubClassOf axiom.
    pub fn subclass_of(sub_class: ClassExpression, super_class: ClassExpression) -> Self {
        Self::SubClassOf {
            sub_class,
            super_class,
        }
    }

    /// Creates an EquivalentClasses axiom.
    pub fn equivalent_classes(classes: Vec<ClassExpression>) -> Self {
        Self::EquivalentClasses(classes)
    }
}
