//! Owl2nt exports the labels and the classified class hierarchy of an [OWL 2](https://www.w3.org/TR/owl2-overview/) ontology as [N-Triples](https://www.w3.org/TR/n-triples/).
//!
//! For each class of the import closure with an `rdfs:label`, the export contains the
//! label lines of the class followed by one `rdfs:subClassOf` line per direct subclass
//! computed by a [`Reasoner`].
//!
//! Usage example:
//! ```
//! use owl2nt::{OntologyParser, StructuralReasoner, TripleSink, convert};
//! use oxrdf::vocab::{rdf, rdfs};
//! use oxrdf::{Graph, Literal, NamedNodeRef, TripleRef};
//!
//! let cell = NamedNodeRef::new("http://example.com/Cell")?;
//! let neuron = NamedNodeRef::new("http://example.com/Neuron")?;
//! let mut graph = Graph::new();
//! graph.insert(TripleRef::new(cell, rdf::TYPE, owl2nt::vocab::owl::CLASS));
//! graph.insert(TripleRef::new(neuron, rdfs::SUB_CLASS_OF, cell));
//! graph.insert(TripleRef::new(cell, rdfs::LABEL, &Literal::new_simple_literal("cell")));
//!
//! let ontology = OntologyParser::new(&graph).parse()?.into();
//! let reasoner = StructuralReasoner::classify(&ontology);
//! let mut sink = TripleSink::new(Vec::new());
//! convert(&ontology, &reasoner, &mut sink)?;
//! assert_eq!(
//!     String::from_utf8(sink.finish()?)?,
//!     "<http://example.com/Cell> <http://www.w3.org/2000/01/rdf-schema#label> \"cell\" .\n\
//!      <http://example.com/Neuron> <http://www.w3.org/2000/01/rdf-schema#subClassOf> <http://example.com/Cell> .\n"
//! );
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```
#![doc(test(attr(deny(warnings))))]

mod axiom;
mod converter;
mod entity;
mod error;
mod expression;
mod hierarchy;
mod labels;
mod loader;
mod ntriples;
mod ontology;
mod parser;
pub mod reasoner;
pub mod vocab;

pub use crate::axiom::Axiom;
pub use crate::converter::{ConversionReport, convert};
pub use crate::entity::{Annotation, AnnotationProperty, AnnotationValue, OwlClass};
pub use crate::error::{LoadError, OwlParseError, ParseErrorKind};
pub use crate::expression::ClassExpression;
pub use crate::hierarchy::direct_subclasses;
pub use crate::labels::labels_of;
pub use crate::loader::{OntologyLoader, format_from_path};
pub use crate::ntriples::{ExportTriple, TripleSink, escape, normalize};
pub use crate::ontology::{Ontology, OntologyModule};
pub use crate::parser::{OntologyParser, ParserConfig};
pub use crate::reasoner::{ClassNode, Reasoner, StructuralReasoner};
pub use oxrdfio::RdfFormat;
