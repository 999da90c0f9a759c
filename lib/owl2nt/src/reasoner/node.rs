use crate::entity::OwlClass;
use std::fmt;

/// A node of a classified hierarchy: a set of classes equivalent to each other.
///
/// The node is never empty. Its classes are kept sorted by IRI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNode {
    classes: Vec<OwlClass>,
}

impl ClassNode {
    /// Creates a node from one class and the classes equivalent to it.
    pub fn new(class: OwlClass, equivalents: impl IntoIterator<Item = OwlClass>) -> Self {
        let mut classes: Vec<_> = equivalents.into_iter().collect();
        classes.push(class);
        classes.sort();
        classes.dedup();
        Self { classes }
    }

    pub fn singleton(class: OwlClass) -> Self {
        Self {
            classes: vec![class],
        }
    }

    /// The class standing for the whole node.
    ///
    /// owl:Nothing for the bottom node, owl:Thing for the top node and the
    /// class with the smallest IRI otherwise.
    pub fn representative(&self) -> &OwlClass {
        self.classes
            .iter()
            .find(|c| c.is_owl_nothing())
            .or_else(|| self.classes.iter().find(|c| c.is_owl_thing()))
            .unwrap_or(&self.classes[0])
    }

    /// All the classes of the node, ordered by IRI.
    pub fn classes(&self) -> &[OwlClass] {
        &self.classes
    }

    pub fn contains(&self, class: &OwlClass) -> bool {
        self.classes.binary_search(class).is_ok()
    }

    /// Is this the node of owl:Nothing, i.e. of the unsatisfiable classes?
    pub fn is_bottom(&self) -> bool {
        self.classes.iter().any(OwlClass::is_owl_nothing)
    }

    /// Is this the node of owl:Thing?
    pub fn is_top(&self) -> bool {
        self.classes.iter().any(OwlClass::is_owl_thing)
    }
}

impl fmt::Display for ClassNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Node(")?;
        for (i, class) in self.classes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{class}")?;
        }
        f.write_str(")")
    }
}
