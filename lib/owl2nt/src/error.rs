//! Error types for ontology loading.

use oxrdf::NamedNode;
use oxrdfio::RdfParseError;
use std::error::Error;
use std::path::PathBuf;
use std::{fmt, io};

/// Errors that can occur while loading an ontology and its imports.
///
/// Every variant carries the path of the offending document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The document could not be opened or read.
    #[error("could not read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The document is not valid RDF.
    #[error("could not parse '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: RdfParseError,
    },
    /// The document is valid RDF but not a well-formed OWL ontology.
    #[error("invalid ontology in '{}': {source}", .path.display())]
    Owl {
        path: PathBuf,
        #[source]
        source: OwlParseError,
    },
    /// The document syntax could not be guessed from its file name.
    #[error("not able to guess the syntax of '{}' from its file extension", .path.display())]
    UnknownFormat { path: PathBuf },
    /// The base IRI used to parse the document is not valid.
    #[error("invalid base IRI {iri} for '{}': {source}", .path.display())]
    InvalidBaseIri {
        path: PathBuf,
        iri: String,
        #[source]
        source: oxiri::IriParseError,
    },
    /// An `owl:imports` target could not be mapped to a local document.
    #[error("the import {iri} of '{}' could not be resolved to a file", .path.display())]
    UnresolvedImport { path: PathBuf, iri: NamedNode },
}

impl LoadError {
    /// The document the error is about.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Io { path, .. }
            | Self::Parse { path, .. }
            | Self::Owl { path, .. }
            | Self::UnknownFormat { path }
            | Self::InvalidBaseIri { path, .. }
            | Self::UnresolvedImport { path, .. } => path,
        }
    }
}

/// Errors that can occur while reading OWL constructs from an RDF graph.
#[derive(Debug)]
pub struct OwlParseError {
    kind: ParseErrorKind,
    message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Invalid property value type.
    InvalidValue,
    /// Malformed RDF list.
    MalformedList,
    /// Circular reference detected.
    CircularReference,
    /// Nesting or list length limit exceeded.
    LimitExceeded,
}

impl OwlParseError {
    /// Creates a new parse error.
    pub fn new(kind: ParseErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::InvalidValue, message)
    }

    pub fn malformed_list(message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::MalformedList, message)
    }

    pub fn circular_reference(message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::CircularReference, message)
    }

    pub fn limit_exceeded(message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::LimitExceeded, message)
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }
}

impl fmt::Display for OwlParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for OwlParseError {}
