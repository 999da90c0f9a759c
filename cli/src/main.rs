use anyhow::{Context, bail};
use clap::Parser;
use owl2nt::{OntologyLoader, RdfFormat, StructuralReasoner, TripleSink, convert};
use oxiri::Iri;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod cli;

use crate::cli::Args;

pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();
    export(&args)
}

/// Logs go to stderr, filtered by `RUST_LOG` and by default only showing warnings.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn export(args: &Args) -> anyhow::Result<()> {
    let start = Instant::now();
    let loader = loader(args)?;
    let ontology = loader
        .load(&args.input)
        .with_context(|| format!("Could not open '{}' to read", args.input.display()))?;
    let file = File::create(&args.output)
        .with_context(|| format!("Could not open '{}' to write", args.output.display()))?;

    let reasoner = StructuralReasoner::classify(&ontology);
    let unsatisfiable = reasoner.unsatisfiable_classes().count();
    if unsatisfiable > 0 {
        warn!("{unsatisfiable} classes are unsatisfiable and left out of the hierarchy");
    }

    let mut sink = TripleSink::new(BufWriter::new(file));
    let report = convert(&ontology, &reasoner, &mut sink)
        .and_then(|report| {
            close_file_writer(sink.finish()?)?;
            Ok(report)
        })
        .with_context(|| format!("Could not write to '{}'", args.output.display()))?;
    info!(
        "Exported {report} to '{}' in {:.2}s",
        args.output.display(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn loader(args: &Args) -> anyhow::Result<OntologyLoader> {
    let mut loader = OntologyLoader::new();
    if let Some(format) = &args.format {
        loader = loader.with_format(rdf_format_from_name(format)?);
    }
    if let Some(base) = &args.base {
        Iri::parse(base.as_str()).with_context(|| format!("Invalid base IRI {base}"))?;
        loader = loader.with_base_iri(base.as_str());
    }
    for (iri, path) in &args.import {
        Iri::parse(iri.as_str()).with_context(|| format!("Invalid import IRI {iri}"))?;
        loader = loader.with_import_location(iri.as_str(), path);
    }
    if args.lenient {
        loader = loader.lenient();
    }
    Ok(loader)
}

fn rdf_format_from_name(name: &str) -> anyhow::Result<RdfFormat> {
    if name.eq_ignore_ascii_case("owl") {
        return Ok(RdfFormat::RdfXml);
    }
    if let Some(t) = RdfFormat::from_extension(name) {
        return Ok(t);
    }
    if let Some(t) = RdfFormat::from_media_type(name) {
        return Ok(t);
    }
    bail!("The file format '{name}' is unknown")
}

fn close_file_writer(writer: BufWriter<File>) -> io::Result<()> {
    let mut file = writer
        .into_inner()
        .map_err(io::IntoInnerError::into_error)?;
    file.flush()?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn format_names() -> anyhow::Result<()> {
        assert_eq!(rdf_format_from_name("owl")?, RdfFormat::RdfXml);
        assert_eq!(rdf_format_from_name("ttl")?, RdfFormat::Turtle);
        assert_eq!(rdf_format_from_name("application/rdf+xml")?, RdfFormat::RdfXml);
        assert!(rdf_format_from_name("owx").is_err());
        Ok(())
    }

    #[test]
    fn import_locations() {
        let args = Args::try_parse_from([
            "owl2nt",
            "--import",
            "http://example.com/upper.owl=vendor/upper.owl",
            "in.owl",
            "out.nt",
        ])
        .unwrap();
        assert_eq!(args.import.len(), 1);
        assert_eq!(args.import[0].0, "http://example.com/upper.owl");
        assert!(
            Args::try_parse_from(["owl2nt", "--import", "vendor/upper.owl", "in.owl", "out.nt"])
                .is_err()
        );
    }

    #[test]
    fn exactly_two_paths() {
        assert!(Args::try_parse_from(["owl2nt", "in.owl"]).is_err());
        assert!(Args::try_parse_from(["owl2nt", "in.owl", "out.nt", "extra"]).is_err());
    }
}
