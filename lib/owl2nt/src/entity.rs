//! OWL 2 entities and annotation values.

use crate::vocab::owl;
use oxrdf::vocab::rdfs;
use oxrdf::{BlankNode, Literal, NamedNode, NamedNodeRef};
use std::cmp::Ordering;
use std::fmt;

/// An OWL class (owl:Class).
///
/// Classes are sets of individuals. Every class is a subclass of owl:Thing
/// and a superclass of owl:Nothing.
///
/// The [`Display`](fmt::Display) implementation follows the usual OWL tooling
/// rendering: built-in classes of the OWL namespace are written with the
/// `owl:` shorthand (`owl:Thing`), all other classes as a bracketed IRI.
/// ```
/// use owl2nt::OwlClass;
///
/// assert_eq!(OwlClass::thing().to_string(), "owl:Thing");
/// assert_eq!(
///     OwlClass::new_from_iri("http://example.com/Dog")?.to_string(),
///     "<http://example.com/Dog>"
/// );
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwlClass(NamedNode);

impl OwlClass {
    /// Creates a new OWL class from a named node.
    #[inline]
    pub fn new(iri: impl Into<NamedNode>) -> Self {
        Self(iri.into())
    }

    /// Creates a new OWL class from an IRI string.
    #[inline]
    pub fn new_from_iri(iri: impl Into<String>) -> Result<Self, oxiri::IriParseError> {
        Ok(Self(NamedNode::new(iri)?))
    }

    /// The top class, owl:Thing.
    #[inline]
    pub fn thing() -> Self {
        Self(owl::THING.into_owned())
    }

    /// The bottom class, owl:Nothing.
    #[inline]
    pub fn nothing() -> Self {
        Self(owl::NOTHING.into_owned())
    }

    /// Returns the IRI of this class.
    #[inline]
    pub fn iri(&self) -> &NamedNode {
        &self.0
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[inline]
    pub fn is_owl_thing(&self) -> bool {
        self.0 == owl::THING
    }

    #[inline]
    pub fn is_owl_nothing(&self) -> bool {
        self.0 == owl::NOTHING
    }
}

impl fmt::Display for OwlClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_str().strip_prefix(owl::NAMESPACE) {
            Some(local_name) => write!(f, "{}{local_name}", owl::PREFIX),
            None => write!(f, "{}", self.0),
        }
    }
}

impl Ord for OwlClass {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for OwlClass {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<NamedNode> for OwlClass {
    fn from(node: NamedNode) -> Self {
        Self(node)
    }
}

impl From<NamedNodeRef<'_>> for OwlClass {
    fn from(node: NamedNodeRef<'_>) -> Self {
        Self(node.into_owned())
    }
}

impl From<OwlClass> for NamedNode {
    fn from(class: OwlClass) -> Self {
        class.0
    }
}

impl AsRef<NamedNode> for OwlClass {
    fn as_ref(&self) -> &NamedNode {
        &self.0
    }
}

/// An OWL annotation property (owl:AnnotationProperty).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationProperty(NamedNode);

impl AnnotationProperty {
    /// Creates a new annotation property from a named node.
    #[inline]
    pub fn new(iri: impl Into<NamedNode>) -> Self {
        Self(iri.into())
    }

    /// The standard label property, rdfs:label.
    #[inline]
    pub fn rdfs_label() -> Self {
        Self(rdfs::LABEL.into_owned())
    }

    /// Returns the IRI of this property.
    #[inline]
    pub fn iri(&self) -> &NamedNode {
        &self.0
    }

    /// Returns `true` for the annotation properties every OWL 2 ontology has
    /// without declaring them.
    pub fn is_built_in(iri: NamedNodeRef<'_>) -> bool {
        iri == rdfs::LABEL
            || iri == rdfs::COMMENT
            || iri == rdfs::SEE_ALSO
            || iri == rdfs::IS_DEFINED_BY
            || iri == owl::VERSION_INFO
            || iri == owl::DEPRECATED
    }
}

impl fmt::Display for AnnotationProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NamedNode> for AnnotationProperty {
    fn from(node: NamedNode) -> Self {
        Self(node)
    }
}

/// The value of an annotation.
///
/// Only [`AnnotationValue::Literal`] carries text usable as a label, the other
/// cases point to other resources.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnnotationValue {
    /// A literal value such as `"Dog"@en`.
    Literal(Literal),
    /// A reference to a named entity.
    EntityReference(NamedNode),
    /// A reference to an anonymous resource.
    AnonymousValue(BlankNode),
}

impl AnnotationValue {
    /// Returns the literal if this value is one.
    #[inline]
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(literal) => Some(literal),
            Self::EntityReference(_) | Self::AnonymousValue(_) => None,
        }
    }
}

impl fmt::Display for AnnotationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => write!(f, "{literal}"),
            Self::EntityReference(node) => write!(f, "{node}"),
            Self::AnonymousValue(node) => write!(f, "{node}"),
        }
    }
}

impl From<Literal> for AnnotationValue {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl From<NamedNode> for AnnotationValue {
    fn from(node: NamedNode) -> Self {
        Self::EntityReference(node)
    }
}

impl From<BlankNode> for AnnotationValue {
    fn from(node: BlankNode) -> Self {
        Self::AnonymousValue(node)
    }
}

/// An annotation: a property paired with a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation {
    pub property: AnnotationProperty,
    pub value: AnnotationValue,
}

impl Annotation {
    #[inline]
    pub fn new(property: AnnotationProperty, value: impl Into<AnnotationValue>) -> Self {
        Self {
            property,
            value: value.into(),
        }
    }
}
