//! Direct subclasses of a class, as seen by the export.

use crate::entity::OwlClass;
use crate::reasoner::Reasoner;

/// The direct subclasses of `class` in the classified hierarchy.
///
/// Each node of equivalent classes contributes its representative. The bottom
/// node, owl:Nothing and the unsatisfiable classes, is never part of the result.
pub fn direct_subclasses<'a>(class: &OwlClass, reasoner: &'a impl Reasoner) -> Vec<&'a OwlClass> {
    reasoner
        .direct_sub_classes(class)
        .into_iter()
        .filter(|node| !node.is_bottom())
        .map(|node| node.representative())
        .collect()
}
