//! Loading of ontology documents and of their imports from the file system.

use crate::error::LoadError;
use crate::ontology::{Ontology, OntologyModule};
use crate::parser::{OntologyParser, ParserConfig};
use oxrdf::{Graph, NamedNode, TripleRef};
use oxrdfio::{RdfFormat, RdfParser};
use rustc_hash::{FxHashMap, FxHashSet};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Loads an ontology document and, transitively, the documents it imports.
///
/// Imports are resolved without network access, in this order:
/// 1. locations registered with [`OntologyLoader::with_import_location`],
/// 2. `file:` IRIs,
/// 3. a file next to the importing document named after the last segment of
///    the imported IRI.
///
/// ```no_run
/// use owl2nt::OntologyLoader;
///
/// let _ontology = OntologyLoader::new()
///     .with_import_location("http://purl.obolibrary.org/obo/bfo.owl", "vendor/bfo.owl")
///     .load("ontology/ricordo.owl")?;
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct OntologyLoader {
    format: Option<RdfFormat>,
    base_iri: Option<String>,
    import_locations: FxHashMap<String, PathBuf>,
    parser_config: ParserConfig,
}

impl OntologyLoader {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the syntax of the root document instead of guessing it from its extension.
    ///
    /// Imported documents with an unknown extension are read with it too.
    #[inline]
    pub fn with_format(mut self, format: RdfFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Sets the base IRI of the root document.
    ///
    /// By default, the `file:` URL of the document is used.
    #[inline]
    pub fn with_base_iri(mut self, base_iri: impl Into<String>) -> Self {
        self.base_iri = Some(base_iri.into());
        self
    }

    /// Maps an imported ontology IRI to a local file.
    #[inline]
    pub fn with_import_location(mut self, iri: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.import_locations.insert(iri.into(), path.into());
        self
    }

    #[inline]
    pub fn with_max_list_length(mut self, max_list_length: usize) -> Self {
        self.parser_config.max_list_length = max_list_length;
        self
    }

    #[inline]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.parser_config.max_depth = max_depth;
        self
    }

    /// Skips malformed class axioms with a warning instead of failing.
    #[inline]
    pub fn lenient(mut self) -> Self {
        self.parser_config.lenient = true;
        self
    }

    /// Loads the ontology stored at `path` with its import closure.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Ontology, LoadError> {
        let mut state = LoadState::default();
        self.load_document(path.as_ref(), None, &mut state)?;
        Ok(Ontology::from_closure(state.modules)
            .unwrap_or_else(|| Ontology::new(OntologyModule::default())))
    }

    fn load_document(
        &self,
        path: &Path,
        root_format: Option<RdfFormat>,
        state: &mut LoadState,
    ) -> Result<(), LoadError> {
        let canonical = fs::canonicalize(path).map_err(|source| LoadError::Io {
            path: path.to_owned(),
            source,
        })?;
        if !state.visited.insert(canonical.clone()) {
            debug!("{} already loaded, skipping", path.display());
            return Ok(());
        }

        let is_root = root_format.is_none();
        let module = self.read_module(path, &canonical, root_format)?;
        let format = root_format.or(self.format).or_else(|| format_from_path(path));
        if let Some(iri) = module.iri() {
            state.loaded_iris.insert(iri.clone());
        }
        let imports = module.imports().to_vec();
        state.modules.push(module);

        for import in imports {
            if state.loaded_iris.contains(&import) {
                continue;
            }
            let target =
                self.resolve_import(&import, &canonical)
                    .ok_or_else(|| LoadError::UnresolvedImport {
                        path: path.to_owned(),
                        iri: import.clone(),
                    })?;
            debug!("Resolved import {import} to {}", target.display());
            // Imports fall back to the root syntax, never to a syntax guessed for another import
            let fallback = if is_root { format } else { root_format };
            self.load_document(&target, fallback.or(Some(RdfFormat::RdfXml)), state)?;
        }
        Ok(())
    }

    fn read_module(
        &self,
        path: &Path,
        canonical: &Path,
        root_format: Option<RdfFormat>,
    ) -> Result<OntologyModule, LoadError> {
        let format = match root_format {
            None => self.format.or_else(|| format_from_path(path)),
            Some(fallback) => format_from_path(path).or(Some(fallback)),
        }
        .ok_or_else(|| LoadError::UnknownFormat {
            path: path.to_owned(),
        })?;

        let mut parser = RdfParser::from_format(format);
        let base_iri = match (&self.base_iri, root_format) {
            (Some(base_iri), None) => Some(base_iri.clone()),
            _ => Url::from_file_path(canonical).ok().map(String::from),
        };
        if let Some(base_iri) = base_iri {
            parser = parser
                .with_base_iri(base_iri.as_str())
                .map_err(|source| LoadError::InvalidBaseIri {
                    path: path.to_owned(),
                    iri: base_iri,
                    source,
                })?;
        }

        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_owned(),
            source,
        })?;
        let mut graph = Graph::new();
        for quad in parser.for_reader(BufReader::new(file)) {
            let quad = quad.map_err(|source| LoadError::Parse {
                path: path.to_owned(),
                source,
            })?;
            graph.insert(TripleRef::new(&quad.subject, &quad.predicate, &quad.object));
        }

        let mut module = OntologyParser::with_config(&graph, self.parser_config.clone())
            .parse()
            .map_err(|source| LoadError::Owl {
                path: path.to_owned(),
                source,
            })?;
        module.set_location(path);
        debug!(
            "Loaded {module} from {} ({} triples)",
            path.display(),
            graph.len()
        );
        Ok(module)
    }

    fn resolve_import(&self, iri: &NamedNode, importing: &Path) -> Option<PathBuf> {
        if let Some(path) = self.import_locations.get(iri.as_str()) {
            return Some(path.clone());
        }
        let url = Url::parse(iri.as_str()).ok()?;
        if url.scheme() == "file" {
            return url.to_file_path().ok();
        }
        let file_name = url.path_segments()?.filter(|s| !s.is_empty()).last()?;
        let candidate = importing.parent()?.join(file_name);
        candidate.is_file().then_some(candidate)
    }
}

#[derive(Default)]
struct LoadState {
    modules: Vec<OntologyModule>,
    visited: FxHashSet<PathBuf>,
    loaded_iris: FxHashSet<NamedNode>,
}

/// Guesses the syntax of a document from its file extension.
///
/// `.owl` and `.xml` files are read as RDF/XML.
pub fn format_from_path(path: &Path) -> Option<RdfFormat> {
    let extension = path.extension().and_then(OsStr::to_str)?;
    if extension.eq_ignore_ascii_case("owl") || extension.eq_ignore_ascii_case("xml") {
        return Some(RdfFormat::RdfXml);
    }
    RdfFormat::from_extension(extension)
}
