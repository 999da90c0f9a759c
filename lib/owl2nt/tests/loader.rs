//! Loading of ontology documents from disk.

use owl2nt::{
    LoadError, OntologyLoader, OwlClass, ParseErrorKind, RdfFormat, StructuralReasoner,
    TripleSink, convert, labels_of,
};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const PREFIXES: &str = "@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix ex: <http://example.com/> .
";

fn write(path: &Path, body: &str) {
    fs::write(path, format!("{PREFIXES}{body}")).unwrap();
}

fn class(name: &str) -> OwlClass {
    OwlClass::new_from_iri(format!("http://example.com/{name}")).unwrap()
}

#[test]
fn test_load_turtle_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cells.ttl");
    write(
        &path,
        "<http://example.com/cells> a owl:Ontology .
ex:Cell a owl:Class ; rdfs:label \"cell\"@en .
ex:Neuron a owl:Class ; rdfs:subClassOf ex:Cell .",
    );

    let ontology = OntologyLoader::new().load(&path).unwrap();
    let root = ontology.root();
    assert_eq!(
        root.iri().map(|iri| iri.as_str()),
        Some("http://example.com/cells")
    );
    assert_eq!(root.location(), Some(path.as_path()));
    assert_eq!(root.classes_in_signature().count(), 2);
    assert_eq!(
        labels_of(&class("Cell"), root).into_iter().collect::<Vec<_>>(),
        ["cell"]
    );
}

#[test]
fn test_load_document_without_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("anonymous.ttl");
    write(&path, "ex:Cell a owl:Class .");

    let ontology = OntologyLoader::new().load(&path).unwrap();
    assert!(ontology.root().iri().is_none());
    assert!(ontology.root().contains_class(&class("Cell")));
}

#[test]
fn test_load_rdf_xml_with_owl_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cells.owl");
    fs::write(
        &path,
        r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
         xmlns:owl="http://www.w3.org/2002/07/owl#">
  <owl:Ontology rdf:about="http://example.com/cells"/>
  <owl:Class rdf:about="http://example.com/Cell">
    <rdfs:label>cell</rdfs:label>
  </owl:Class>
  <owl:Class rdf:about="http://example.com/Neuron">
    <rdfs:subClassOf rdf:resource="http://example.com/Cell"/>
  </owl:Class>
</rdf:RDF>
"#,
    )
    .unwrap();

    let ontology = OntologyLoader::new().load(&path).unwrap();
    let reasoner = StructuralReasoner::classify(&ontology);
    let mut sink = TripleSink::new(Vec::new());
    let report = convert(&ontology, &reasoner, &mut sink).unwrap();
    assert_eq!(report.label_lines, 1);
    assert_eq!(report.edge_lines, 1);
}

#[test]
fn test_format_override() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cells.data");
    write(&path, "ex:Cell a owl:Class .");

    assert!(matches!(
        OntologyLoader::new().load(&path),
        Err(LoadError::UnknownFormat { .. })
    ));
    let ontology = OntologyLoader::new()
        .with_format(RdfFormat::Turtle)
        .load(&path)
        .unwrap();
    assert!(ontology.root().contains_class(&class("Cell")));
}

#[test]
fn test_relative_iris_use_the_base_iri() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("relative.ttl");
    fs::write(
        &path,
        "<#Cell> a <http://www.w3.org/2002/07/owl#Class> .",
    )
    .unwrap();

    let ontology = OntologyLoader::new()
        .with_base_iri("http://example.com/onto")
        .load(&path)
        .unwrap();
    assert!(
        ontology
            .root()
            .contains_class(&OwlClass::new_from_iri("http://example.com/onto#Cell").unwrap())
    );
}

#[test]
fn test_imports_are_loaded_in_pre_order() {
    let dir = tempdir().unwrap();
    write(
        &dir.path().join("root.ttl"),
        "<http://example.com/root> a owl:Ontology ;
    owl:imports <http://example.com/b.ttl>, <http://example.com/a.ttl> .",
    );
    write(
        &dir.path().join("a.ttl"),
        "<http://example.com/a> a owl:Ontology ;
    owl:imports <http://example.com/shared.ttl> .
ex:A a owl:Class .",
    );
    write(
        &dir.path().join("b.ttl"),
        "<http://example.com/b> a owl:Ontology ;
    owl:imports <http://example.com/shared.ttl>, <http://example.com/root> .
ex:B a owl:Class .",
    );
    write(
        &dir.path().join("shared.ttl"),
        "<http://example.com/shared> a owl:Ontology .
ex:Shared a owl:Class .",
    );

    let ontology = OntologyLoader::new()
        .load(dir.path().join("root.ttl"))
        .unwrap();
    let iris: Vec<_> = ontology
        .imports_closure()
        .filter_map(|module| module.iri().map(|iri| iri.as_str().to_owned()))
        .collect();
    assert_eq!(
        iris,
        [
            "http://example.com/root",
            "http://example.com/a",
            "http://example.com/shared",
            "http://example.com/b",
        ]
    );
    assert_eq!(ontology.closure_classes().len(), 3);
}

#[test]
fn test_import_catalog() {
    let dir = tempdir().unwrap();
    let vendor = dir.path().join("vendor");
    fs::create_dir(&vendor).unwrap();
    write(
        &dir.path().join("root.ttl"),
        "<http://example.com/root> a owl:Ontology ;
    owl:imports <http://purl.example.com/upper> .",
    );
    write(
        &vendor.join("upper-ontology.ttl"),
        "ex:Entity a owl:Class ; rdfs:label \"entity\" .",
    );

    let loader = OntologyLoader::new();
    assert!(matches!(
        loader.load(dir.path().join("root.ttl")),
        Err(LoadError::UnresolvedImport { .. })
    ));
    let ontology = loader
        .with_import_location("http://purl.example.com/upper", vendor.join("upper-ontology.ttl"))
        .load(dir.path().join("root.ttl"))
        .unwrap();
    assert_eq!(ontology.imports_closure().count(), 2);
    assert!(ontology.closure_classes().contains(&class("Entity")));
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.owl");
    let error = OntologyLoader::new().load(&path).unwrap_err();
    assert!(matches!(error, LoadError::Io { .. }));
    assert_eq!(error.path(), &path);
    assert!(error.to_string().contains("missing.owl"));
}

#[test]
fn test_syntax_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.ttl");
    write(&path, "ex:Cell a owl:Class");

    let error = OntologyLoader::new().load(&path).unwrap_err();
    assert!(matches!(error, LoadError::Parse { .. }), "{error}");
}

#[test]
fn test_broken_list() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("list.ttl");
    write(
        &path,
        "ex:Puppy owl:equivalentClass [ owl:intersectionOf ex:NotAList ] .
ex:Cell a owl:Class .",
    );

    assert!(matches!(
        OntologyLoader::new().load(&path),
        Err(LoadError::Owl { .. })
    ));
    let ontology = OntologyLoader::new().lenient().load(&path).unwrap();
    assert!(ontology.root().contains_class(&class("Cell")));
}

fn owl_error_kind(loader: &OntologyLoader, path: &Path) -> ParseErrorKind {
    match loader.load(path) {
        Err(LoadError::Owl { source, .. }) => source.kind(),
        Err(error) => panic!("Expected an OWL error, got {error}"),
        Ok(_) => panic!("{} should not load", path.display()),
    }
}

#[test]
fn test_list_length_limit() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("long.ttl");
    write(
        &path,
        "ex:Cell owl:equivalentClass [ owl:intersectionOf ( ex:A ex:B ex:C ) ] .",
    );

    assert_eq!(
        owl_error_kind(&OntologyLoader::new().with_max_list_length(2), &path),
        ParseErrorKind::LimitExceeded
    );
    assert!(
        OntologyLoader::new()
            .with_max_list_length(3)
            .load(&path)
            .is_ok()
    );
}

#[test]
fn test_nesting_depth_limit() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("deep.ttl");
    write(
        &path,
        "ex:Cell owl:equivalentClass [ owl:intersectionOf (
    [ owl:intersectionOf ( [ owl:intersectionOf ( ex:A ) ] ) ]
) ] .",
    );

    assert_eq!(
        owl_error_kind(&OntologyLoader::new().with_max_depth(2), &path),
        ParseErrorKind::LimitExceeded
    );
    assert!(OntologyLoader::new().with_max_depth(3).load(&path).is_ok());
}

#[test]
fn test_circular_list() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("loop.ttl");
    write(
        &path,
        "_:l <http://www.w3.org/1999/02/22-rdf-syntax-ns#first> ex:A ;
    <http://www.w3.org/1999/02/22-rdf-syntax-ns#rest> _:l .
ex:Cell owl:equivalentClass [ owl:intersectionOf _:l ] .",
    );

    assert_eq!(
        owl_error_kind(&OntologyLoader::new(), &path),
        ParseErrorKind::CircularReference
    );
}
