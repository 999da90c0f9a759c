//! OWL 2 ontologies: single documents and their import closure.

use crate::axiom::Axiom;
use crate::entity::{Annotation, AnnotationProperty, OwlClass};
use crate::expression::ClassExpression;
use oxrdf::NamedNode;
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// One ontology document, without the documents it imports.
///
/// The class signature is kept ordered by IRI so that enumerating it is
/// reproducible from one run to the next.
#[derive(Debug, Clone, Default)]
pub struct OntologyModule {
    /// The ontology IRI (optional)
    iri: Option<NamedNode>,

    /// The version IRI (optional)
    version_iri: Option<NamedNode>,

    /// Imported ontology IRIs
    imports: Vec<NamedNode>,

    /// Where the document has been read from
    location: Option<PathBuf>,

    /// Class axioms of this document
    axioms: Vec<Axiom>,

    /// Classes in the signature
    classes: BTreeSet<OwlClass>,

    /// Annotation assertions, by annotated class
    annotations: FxHashMap<OwlClass, Vec<Annotation>>,
}

impl OntologyModule {
    /// Creates a new empty ontology document.
    pub fn new(iri: Option<NamedNode>) -> Self {
        Self {
            iri,
            ..Self::default()
        }
    }

    /// Creates a new ontology document with the given IRI string.
    pub fn with_iri(iri: impl Into<String>) -> Result<Self, oxiri::IriParseError> {
        Ok(Self::new(Some(NamedNode::new(iri)?)))
    }

    /// Returns the ontology IRI.
    pub fn iri(&self) -> Option<&NamedNode> {
        self.iri.as_ref()
    }

    pub fn set_iri(&mut self, iri: Option<NamedNode>) {
        self.iri = iri;
    }

    /// Returns the version IRI.
    pub fn version_iri(&self) -> Option<&NamedNode> {
        self.version_iri.as_ref()
    }

    pub fn set_version_iri(&mut self, iri: Option<NamedNode>) {
        self.version_iri = iri;
    }

    /// Returns the imported ontology IRIs.
    pub fn imports(&self) -> &[NamedNode] {
        &self.imports
    }

    /// Adds an import declaration.
    pub fn add_import(&mut self, iri: NamedNode) {
        if !self.imports.contains(&iri) {
            self.imports.push(iri);
        }
    }

    /// Returns the file the document has been loaded from, if any.
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    pub fn set_location(&mut self, location: impl Into<PathBuf>) {
        self.location = Some(location.into());
    }

    /// Adds a class to the signature.
    pub fn declare_class(&mut self, class: OwlClass) {
        self.classes.insert(class);
    }

    /// Adds an axiom, declaring the named classes it mentions.
    pub fn add_axiom(&mut self, axiom: Axiom) {
        match &axiom {
            Axiom::SubClassOf {
                sub_class,
                super_class,
            } => {
                self.declare_classes_in_expression(sub_class);
                self.declare_classes_in_expression(super_class);
            }
            Axiom::EquivalentClasses(classes) => {
                for c in classes {
                    self.declare_classes_in_expression(c);
                }
            }
        }
        self.axioms.push(axiom);
    }

    fn declare_classes_in_expression(&mut self, expr: &ClassExpression) {
        match expr {
            ClassExpression::Class(c) => {
                self.classes.insert(c.clone());
            }
            ClassExpression::ObjectIntersectionOf(operands) => {
                for operand in operands {
                    self.declare_classes_in_expression(operand);
                }
            }
            ClassExpression::Anonymous(_) => (),
        }
    }

    /// Adds an annotation assertion on a class.
    ///
    /// Annotating a class does not add it to the signature.
    pub fn add_annotation(&mut self, class: OwlClass, annotation: Annotation) {
        let annotations = self.annotations.entry(class).or_default();
        if !annotations.contains(&annotation) {
            annotations.push(annotation);
        }
    }

    /// Returns all axioms of the document.
    pub fn axioms(&self) -> &[Axiom] {
        &self.axioms
    }

    pub fn axiom_count(&self) -> usize {
        self.axioms.len()
    }

    /// Returns the classes in the signature, ordered by IRI.
    pub fn classes_in_signature(&self) -> impl Iterator<Item = &OwlClass> {
        self.classes.iter()
    }

    /// Checks if a class is in the signature of this document.
    pub fn contains_class(&self, class: &OwlClass) -> bool {
        self.classes.contains(class)
    }

    /// Returns the annotations on `class` using `property`, in document order.
    pub fn annotations<'a>(
        &'a self,
        class: &OwlClass,
        property: &'a AnnotationProperty,
    ) -> impl Iterator<Item = &'a Annotation> + 'a {
        self.annotations
            .get(class)
            .into_iter()
            .flatten()
            .filter(move |a| a.property == *property)
    }
}

impl std::fmt::Display for OntologyModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(iri) = &self.iri {
            write!(f, "Ontology({iri})")?;
        } else {
            write!(f, "Ontology(anonymous)")?;
        }
        write!(
            f,
            " [{} classes, {} axioms]",
            self.classes.len(),
            self.axioms.len()
        )
    }
}

/// An ontology together with everything it imports.
///
/// Documents are kept in import-closure pre-order: the root document first,
/// then each import depth-first. Each document is
/// present exactly once.
#[derive(Debug, Clone)]
pub struct Ontology {
    modules: Vec<OntologyModule>,
}

impl Ontology {
    /// Creates an ontology without imports.
    pub fn new(root: OntologyModule) -> Self {
        Self {
            modules: vec![root],
        }
    }

    /// Creates an ontology from its import closure, root document first.
    ///
    /// Returns `None` if `modules` is empty.
    pub fn from_closure(modules: Vec<OntologyModule>) -> Option<Self> {
        (!modules.is_empty()).then_some(Self { modules })
    }

    /// The document the ontology has been loaded from.
    pub fn root(&self) -> &OntologyModule {
        &self.modules[0]
    }

    /// The root document and all its direct and indirect imports.
    pub fn imports_closure(&self) -> impl Iterator<Item = &OntologyModule> {
        self.modules.iter()
    }

    /// All class axioms of the import closure.
    pub fn closure_axioms(&self) -> impl Iterator<Item = &Axiom> {
        self.modules.iter().flat_map(OntologyModule::axioms)
    }

    /// All classes in the signature of the import closure, without duplicates.
    pub fn closure_classes(&self) -> BTreeSet<&OwlClass> {
        self.modules
            .iter()
            .flat_map(OntologyModule::classes_in_signature)
            .collect()
    }
}

impl From<OntologyModule> for Ontology {
    fn from(root: OntologyModule) -> Self {
        Self::new(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::Literal;

    fn class(name: &str) -> OwlClass {
        OwlClass::new_from_iri(format!("http://example.com/{name}")).unwrap()
    }

    #[test]
    fn axioms_declare_their_classes() {
        let mut module = OntologyModule::new(None);
        module.add_axiom(Axiom::subclass_of(
            ClassExpression::class(class("Dog")),
            ClassExpression::intersection(vec![
                ClassExpression::class(class("Animal")),
                ClassExpression::class(class("Pet")),
            ]),
        ));
        let classes: Vec<_> = module.classes_in_signature().collect();
        assert_eq!(classes, [&class("Animal"), &class("Dog"), &class("Pet")]);
    }

    #[test]
    fn annotations_are_filtered_by_property() {
        let mut module = OntologyModule::new(None);
        let label = AnnotationProperty::rdfs_label();
        let comment = AnnotationProperty::new(oxrdf::vocab::rdfs::COMMENT.into_owned());
        module.add_annotation(
            class("Dog"),
            Annotation::new(label.clone(), Literal::new_simple_literal("Dog")),
        );
        module.add_annotation(
            class("Dog"),
            Annotation::new(comment, Literal::new_simple_literal("A dog")),
        );
        assert_eq!(module.annotations(&class("Dog"), &label).count(), 1);
        assert_eq!(module.annotations(&class("Cat"), &label).count(), 0);
        assert!(!module.contains_class(&class("Dog")));
    }

    #[test]
    fn closure_lists_the_root_first() {
        let root = OntologyModule::with_iri("http://example.com/root").unwrap();
        let imported = OntologyModule::with_iri("http://example.com/imported").unwrap();
        let ontology = Ontology::from_closure(vec![root, imported]).unwrap();
        assert_eq!(
            ontology.root().iri().map(NamedNode::as_str),
            Some("http://example.com/root")
        );
        assert_eq!(ontology.imports_closure().count(), 2);
        assert!(Ontology::from_closure(Vec::new()).is_none());
    }
}
