//! Export of labeled classes and of their direct subclasses.

use crate::hierarchy::direct_subclasses;
use crate::labels::labels_of;
use crate::ntriples::{TripleSink, normalize};
use crate::ontology::Ontology;
use crate::reasoner::Reasoner;
use std::fmt;
use std::io::{self, Write};
use tracing::debug;

/// Counters of a [`convert`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionReport {
    /// Documents of the import closure visited.
    pub modules: usize,
    /// (document, class) pairs visited.
    pub classes: usize,
    /// (document, class) pairs with at least one label.
    pub labeled_classes: usize,
    pub label_lines: usize,
    pub edge_lines: usize,
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} labeled classes out of {} in {} ontologies, {} labels and {} subclass edges",
            self.labeled_classes, self.classes, self.modules, self.label_lines, self.edge_lines
        )
    }
}

/// Writes the labels and the direct subclasses of every labeled class of `ontology`.
///
/// Each document of the import closure is visited in turn, and each class of
/// its signature in IRI order. A class with at least one `rdfs:label` in the
/// document gets its label lines, then one `rdfs:subClassOf` line per direct
/// subclass. Classes without label in the document are skipped, they may
/// still appear as the subject of a subclass line.
///
/// A class declared in several documents is exported once per document.
/// Only writing to `sink` may fail.
pub fn convert<W: Write>(
    ontology: &Ontology,
    reasoner: &impl Reasoner,
    sink: &mut TripleSink<W>,
) -> io::Result<ConversionReport> {
    let mut report = ConversionReport::default();
    let (labels_before, edges_before) = (sink.label_count(), sink.edge_count());
    for module in ontology.imports_closure() {
        report.modules += 1;
        debug!("Exporting {module}");
        for class in module.classes_in_signature() {
            report.classes += 1;
            let labels = labels_of(class, module);
            if labels.is_empty() {
                continue;
            }
            report.labeled_classes += 1;
            let class_id = normalize(&class.to_string());
            for label in &labels {
                sink.write_label(&class_id, label)?;
            }
            for sub_class in direct_subclasses(class, reasoner) {
                sink.write_sub_class_of(&normalize(&sub_class.to_string()), &class_id)?;
            }
        }
    }
    report.label_lines = sink.label_count() - labels_before;
    report.edge_lines = sink.edge_count() - edges_before;
    Ok(report)
}
