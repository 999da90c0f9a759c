//! OWL 2 parser from RDF graphs.
//!
//! Reads the parts of the OWL 2 RDF mapping this crate works with: the
//! ontology header, class declarations, told class axioms and annotation
//! assertions.

use crate::axiom::Axiom;
use crate::entity::{Annotation, AnnotationProperty, AnnotationValue, OwlClass};
use crate::error::OwlParseError;
use crate::expression::ClassExpression;
use crate::ontology::OntologyModule;
use crate::vocab::owl;
use oxrdf::vocab::{rdf, rdfs};
use oxrdf::{BlankNodeRef, Graph, NamedNodeRef, NamedOrBlankNodeRef, TermRef};
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;
use tracing::warn;

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Maximum depth for parsing nested expressions.
    pub max_depth: usize,
    /// Maximum length for RDF lists.
    pub max_list_length: usize,
    /// Skip malformed class axioms instead of failing.
    pub lenient: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: 100,
            max_list_length: 10_000,
            lenient: false,
        }
    }
}

/// Parses an OWL ontology document from an RDF graph.
pub struct OntologyParser<'a> {
    graph: &'a Graph,
    config: ParserConfig,
    /// Blank nodes of the class expression currently being read, to detect cycles.
    in_progress: FxHashSet<BlankNodeRef<'a>>,
    /// Named classes met inside anonymous expressions.
    mentioned: BTreeSet<OwlClass>,
}

impl<'a> OntologyParser<'a> {
    /// Creates a new parser for the given graph.
    pub fn new(graph: &'a Graph) -> Self {
        Self::with_config(graph, ParserConfig::default())
    }

    /// Creates a new parser with custom configuration.
    pub fn with_config(graph: &'a Graph, config: ParserConfig) -> Self {
        Self {
            graph,
            config,
            in_progress: FxHashSet::default(),
            mentioned: BTreeSet::new(),
        }
    }

    /// Parses the ontology document from the graph.
    pub fn parse(mut self) -> Result<OntologyModule, OwlParseError> {
        let mut module = OntologyModule::new(None);
        self.parse_header(&mut module);
        self.parse_declarations(&mut module);
        self.parse_axioms(&mut module)?;
        self.parse_annotations(&mut module);
        for class in std::mem::take(&mut self.mentioned) {
            module.declare_class(class);
        }
        Ok(module)
    }

    /// Reads the ontology IRI, version IRI and imports.
    ///
    /// Documents without an `owl:Ontology` header are anonymous ontologies.
    fn parse_header(&self, module: &mut OntologyModule) {
        let headers = self
            .graph
            .subjects_for_predicate_object(rdf::TYPE, owl::ONTOLOGY)
            .filter_map(|s| match s {
                NamedOrBlankNodeRef::NamedNode(n) => Some(n),
                NamedOrBlankNodeRef::BlankNode(_) => None,
            })
            .collect::<BTreeSet<_>>();
        let Some(header) = headers.first().copied() else {
            return;
        };
        if headers.len() > 1 {
            warn!("Several ontology headers found, using {header}");
        }
        module.set_iri(Some(header.into_owned()));
        if let Some(TermRef::NamedNode(version)) =
            self.graph.object_for_subject_predicate(header, owl::VERSION_IRI)
        {
            module.set_version_iri(Some(version.into_owned()));
        }
        let imports = self
            .graph
            .objects_for_subject_predicate(header, owl::IMPORTS)
            .filter_map(|o| match o {
                TermRef::NamedNode(n) => Some(n),
                _ => None,
            })
            .collect::<BTreeSet<_>>();
        for import in imports {
            module.add_import(import.into_owned());
        }
    }

    /// Reads explicit class declarations.
    fn parse_declarations(&self, module: &mut OntologyModule) {
        for class_type in [owl::CLASS, rdfs::CLASS] {
            for subject in self
                .graph
                .subjects_for_predicate_object(rdf::TYPE, class_type)
            {
                if let NamedOrBlankNodeRef::NamedNode(n) = subject {
                    module.declare_class(n.into());
                }
            }
        }
    }

    /// Reads told class axioms.
    fn parse_axioms(&mut self, module: &mut OntologyModule) -> Result<(), OwlParseError> {
        let graph = self.graph;

        for triple in graph.triples_for_predicate(rdfs::SUB_CLASS_OF) {
            let axiom = self
                .parse_class_expression(triple.subject.into(), 0)
                .and_then(|sub_class| {
                    Ok(Axiom::subclass_of(
                        sub_class,
                        self.parse_class_expression(triple.object, 0)?,
                    ))
                });
            self.add_or_skip(module, axiom, "rdfs:subClassOf")?;
        }

        for triple in graph.triples_for_predicate(owl::EQUIVALENT_CLASS) {
            let axiom = self
                .parse_class_expression(triple.subject.into(), 0)
                .and_then(|first| {
                    Ok(Axiom::equivalent_classes(vec![
                        first,
                        self.parse_class_expression(triple.object, 0)?,
                    ]))
                });
            self.add_or_skip(module, axiom, "owl:equivalentClass")?;
        }

        // A named class carrying owl:intersectionOf is defined by it
        for triple in graph.triples_for_predicate(owl::INTERSECTION_OF) {
            let NamedOrBlankNodeRef::NamedNode(class) = triple.subject else {
                continue;
            };
            let axiom = self.parse_class_list(triple.object, 0).map(|operands| {
                Axiom::equivalent_classes(vec![
                    ClassExpression::class(class),
                    ClassExpression::intersection(operands),
                ])
            });
            self.add_or_skip(module, axiom, "owl:intersectionOf")?;
        }

        // Disjointness does not change the told hierarchy but still puts
        // classes in the signature
        for triple in graph.triples_for_predicate(owl::DISJOINT_WITH) {
            let expressions = self
                .parse_class_expression(triple.subject.into(), 0)
                .and_then(|first| Ok([first, self.parse_class_expression(triple.object, 0)?]));
            match expressions {
                Ok(expressions) => {
                    for expression in expressions {
                        if let ClassExpression::Class(c) = expression {
                            module.declare_class(c);
                        }
                    }
                }
                Err(e) => self.skip_or_fail(e, "owl:disjointWith")?,
            }
        }
        Ok(())
    }

    fn add_or_skip(
        &self,
        module: &mut OntologyModule,
        axiom: Result<Axiom, OwlParseError>,
        construct: &str,
    ) -> Result<(), OwlParseError> {
        match axiom {
            Ok(axiom) => {
                module.add_axiom(axiom);
                Ok(())
            }
            Err(e) => self.skip_or_fail(e, construct),
        }
    }

    fn skip_or_fail(&self, error: OwlParseError, construct: &str) -> Result<(), OwlParseError> {
        if self.config.lenient {
            warn!("Skipping malformed {construct} axiom: {error}");
            Ok(())
        } else {
            Err(error)
        }
    }

    /// Reads annotation assertions on named entities.
    fn parse_annotations(&self, module: &mut OntologyModule) {
        let declared = self
            .graph
            .subjects_for_predicate_object(rdf::TYPE, owl::ANNOTATION_PROPERTY)
            .filter_map(|s| match s {
                NamedOrBlankNodeRef::NamedNode(n) => Some(n),
                NamedOrBlankNodeRef::BlankNode(_) => None,
            })
            .collect::<FxHashSet<_>>();

        for triple in self.graph.iter() {
            if !AnnotationProperty::is_built_in(triple.predicate)
                && !declared.contains(&triple.predicate)
            {
                continue;
            }
            let NamedOrBlankNodeRef::NamedNode(subject) = triple.subject else {
                continue;
            };
            let value = match triple.object {
                TermRef::NamedNode(n) => AnnotationValue::EntityReference(n.into_owned()),
                TermRef::BlankNode(b) => AnnotationValue::AnonymousValue(b.into_owned()),
                TermRef::Literal(l) => AnnotationValue::Literal(l.into_owned()),
                #[cfg(feature = "rdf-12")]
                TermRef::Triple(_) => continue,
            };
            module.add_annotation(
                subject.into(),
                Annotation::new(AnnotationProperty::new(triple.predicate), value),
            );
        }
    }

    /// Parses a class expression from a term.
    fn parse_class_expression(
        &mut self,
        term: TermRef<'a>,
        depth: usize,
    ) -> Result<ClassExpression, OwlParseError> {
        if depth > self.config.max_depth {
            return Err(OwlParseError::limit_exceeded(format!(
                "Class expression nested deeper than {}",
                self.config.max_depth
            )));
        }
        match term {
            TermRef::NamedNode(n) => Ok(ClassExpression::class(n)),
            TermRef::BlankNode(b) => self.parse_anonymous_class(b, depth),
            TermRef::Literal(l) => Err(OwlParseError::invalid_value(format!(
                "Literal {l} cannot be a class expression"
            ))),
            #[cfg(feature = "rdf-12")]
            TermRef::Triple(_) => Err(OwlParseError::invalid_value(
                "Triple term cannot be a class expression",
            )),
        }
    }

    /// Parses an anonymous class expression.
    ///
    /// Intersections are kept, other constructs only contribute the named
    /// classes they mention to the signature.
    fn parse_anonymous_class(
        &mut self,
        bnode: BlankNodeRef<'a>,
        depth: usize,
    ) -> Result<ClassExpression, OwlParseError> {
        if !self.in_progress.insert(bnode) {
            return Err(OwlParseError::circular_reference(format!(
                "Class expression {bnode} contains itself"
            )));
        }
        let result = self.parse_anonymous_class_content(bnode, depth);
        self.in_progress.remove(&bnode);
        result
    }

    fn parse_anonymous_class_content(
        &mut self,
        bnode: BlankNodeRef<'a>,
        depth: usize,
    ) -> Result<ClassExpression, OwlParseError> {
        let graph = self.graph;
        if let Some(list) = graph.object_for_subject_predicate(bnode, owl::INTERSECTION_OF) {
            return Ok(ClassExpression::intersection(
                self.parse_class_list(list, depth + 1)?,
            ));
        }
        if let Some(list) = graph.object_for_subject_predicate(bnode, owl::UNION_OF) {
            let operands = self.parse_class_list(list, depth + 1)?;
            self.mention(&operands);
        }
        for filler_property in [owl::SOME_VALUES_FROM, owl::ALL_VALUES_FROM] {
            if let Some(filler) = graph.object_for_subject_predicate(bnode, filler_property) {
                // Data restrictions have datatypes as fillers
                if matches!(filler, TermRef::NamedNode(n) if is_datatype(n)) {
                    continue;
                }
                let filler = self.parse_class_expression(filler, depth + 1)?;
                self.mention(std::slice::from_ref(&filler));
            }
        }
        Ok(ClassExpression::Anonymous(bnode.into_owned()))
    }

    fn mention(&mut self, expressions: &[ClassExpression]) {
        for expression in expressions {
            for class in expression.named_subsumers() {
                self.mentioned.insert(class.clone());
            }
        }
    }

    /// Parses an RDF list of class expressions.
    fn parse_class_list(
        &mut self,
        list: TermRef<'a>,
        depth: usize,
    ) -> Result<Vec<ClassExpression>, OwlParseError> {
        let mut result = Vec::new();
        for item in self.list_items(list)? {
            result.push(self.parse_class_expression(item, depth)?);
        }
        Ok(result)
    }

    /// Collects the elements of an RDF list.
    fn list_items(&self, list: TermRef<'a>) -> Result<Vec<TermRef<'a>>, OwlParseError> {
        let mut items = Vec::new();
        let mut seen = FxHashSet::default();
        let mut current = list;
        loop {
            let node = match current {
                TermRef::NamedNode(n) if n == rdf::NIL => return Ok(items),
                TermRef::BlankNode(b) => b,
                _ => {
                    return Err(OwlParseError::malformed_list(format!(
                        "{current} is not a list node"
                    )));
                }
            };
            if !seen.insert(node) {
                return Err(OwlParseError::circular_reference(format!(
                    "The list starting at {list} loops at {node}"
                )));
            }
            if items.len() >= self.config.max_list_length {
                return Err(OwlParseError::limit_exceeded(format!(
                    "List longer than {} elements",
                    self.config.max_list_length
                )));
            }
            let first = self
                .graph
                .object_for_subject_predicate(node, rdf::FIRST)
                .ok_or_else(|| {
                    OwlParseError::malformed_list(format!("List node {node} has no rdf:first"))
                })?;
            let rest = self
                .graph
                .object_for_subject_predicate(node, rdf::REST)
                .ok_or_else(|| {
                    OwlParseError::malformed_list(format!("List node {node} has no rdf:rest"))
                })?;
            items.push(first);
            current = rest;
        }
    }
}

fn is_datatype(iri: NamedNodeRef<'_>) -> bool {
    iri.as_str()
        .starts_with("http://www.w3.org/2001/XMLSchema#")
        || iri == rdfs::LITERAL
        || iri == rdf::LANG_STRING
}
