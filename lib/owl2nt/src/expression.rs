//! OWL 2 class expressions, as far as told subsumption needs them.

use crate::entity::OwlClass;
use oxrdf::BlankNode;

/// A class expression.
///
/// Only the constructs that contribute named told subsumers are kept
/// structurally. Every other anonymous expression (restrictions, unions,
/// complements...) is kept opaque: it may mention classes but never makes a
/// named class a subclass of another one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassExpression {
    /// A named class.
    Class(OwlClass),
    /// ObjectIntersectionOf(C1 ... Cn).
    ObjectIntersectionOf(Vec<ClassExpression>),
    /// Any other anonymous class expression, identified by its RDF node.
    Anonymous(BlankNode),
}

impl ClassExpression {
    /// Creates a named class expression.
    #[inline]
    pub fn class(c: impl Into<OwlClass>) -> Self {
        Self::Class(c.into())
    }

    /// Creates an intersection of class expressions.
    #[inline]
    pub fn intersection(classes: Vec<ClassExpression>) -> Self {
        Self::ObjectIntersectionOf(classes)
    }

    /// Returns true if this is a named class.
    #[inline]
    pub fn is_named(&self) -> bool {
        matches!(self, Self::Class(_))
    }

    /// Returns the named class if this is one.
    #[inline]
    pub fn as_class(&self) -> Option<&OwlClass> {
        match self {
            Self::Class(c) => Some(c),
            Self::ObjectIntersectionOf(_) | Self::Anonymous(_) => None,
        }
    }

    /// Named classes any instance of this expression is an instance of.
    ///
    /// A named class is its own subsumer, an intersection is subsumed by the
    /// subsumers of each of its operands, opaque expressions have none.
    pub fn named_subsumers(&self) -> Vec<&OwlClass> {
        let mut subsumers = Vec::new();
        self.collect_named_subsumers(&mut subsumers);
        subsumers
    }

    fn collect_named_subsumers<'a>(&'a self, subsumers: &mut Vec<&'a OwlClass>) {
        match self {
            Self::Class(c) => subsumers.push(c),
            Self::ObjectIntersectionOf(operands) => {
                for operand in operands {
                    operand.collect_named_subsumers(subsumers);
                }
            }
            Self::Anonymous(_) => (),
        }
    }
}

impl From<OwlClass> for ClassExpression {
    fn from(c: OwlClass) -> Self {
        Self::Class(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str) -> OwlClass {
        OwlClass::new_from_iri(format!("http://example.com/{name}")).unwrap()
    }

    #[test]
    fn nested_intersections_are_flattened() {
        let expression = ClassExpression::intersection(vec![
            ClassExpression::class(class("A")),
            ClassExpression::Anonymous(BlankNode::default()),
            ClassExpression::intersection(vec![ClassExpression::class(class("B"))]),
        ]);
        assert_eq!(expression.named_subsumers(), [&class("A"), &class("B")]);
        assert!(!expression.is_named());
    }

    #[test]
    fn opaque_expressions_have_no_named_subsumers() {
        assert!(
            ClassExpression::Anonymous(BlankNode::default())
                .named_subsumers()
                .is_empty()
        );
    }
}
