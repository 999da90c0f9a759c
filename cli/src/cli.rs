use clap::{Parser, ValueHint};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, version, name = "owl2nt")]
/// Exports the labels and the classified class hierarchy of an OWL ontology as N-Triples
pub struct Args {
    /// Ontology document to read
    ///
    /// Its imports are loaded too.
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,
    /// N-Triples file to write
    #[arg(value_hint = ValueHint::FilePath)]
    pub output: PathBuf,
    /// The format of the input document
    ///
    /// It can be an extension like "ttl" or a MIME type like "text/turtle".
    ///
    /// By default the format is guessed from the input file extension, ".owl" files being read as RDF/XML.
    #[arg(long)]
    pub format: Option<String>,
    /// Base IRI of the input document
    ///
    /// By default the file URL of the document is used.
    #[arg(long, value_hint = ValueHint::Url)]
    pub base: Option<String>,
    /// Local copy of an imported ontology, as IRI=PATH
    ///
    /// Imports without such a mapping are looked up next to the importing document.
    #[arg(long, value_parser = parse_import_location)]
    pub import: Vec<(String, PathBuf)>,
    /// Skips malformed class axioms instead of failing
    #[arg(long)]
    pub lenient: bool,
}

fn parse_import_location(value: &str) -> Result<(String, PathBuf), String> {
    let (iri, path) = value
        .split_once('=')
        .ok_or_else(|| format!("'{value}' is not of the form IRI=PATH"))?;
    if iri.is_empty() || path.is_empty() {
        return Err(format!("'{value}' is not of the form IRI=PATH"));
    }
    Ok((iri.to_owned(), PathBuf::from(path)))
}
