//! Extraction of the labels of a class.

use crate::entity::{AnnotationProperty, OwlClass};
use crate::ontology::OntologyModule;
use std::collections::BTreeSet;

/// The `rdfs:label` values of `class` asserted in `module`.
///
/// Only literal values are kept, as their trimmed lexical form without
/// language tag or datatype. Annotations in other documents of the import
/// closure are not considered.
pub fn labels_of(class: &OwlClass, module: &OntologyModule) -> BTreeSet<String> {
    let label = AnnotationProperty::rdfs_label();
    module
        .annotations(class, &label)
        .filter_map(|annotation| annotation.value.as_literal())
        .map(|literal| literal.value().trim().to_owned())
        .collect()
}
