//! Line-oriented N-Triples output of the export.

use crate::vocab::owl;
use oxrdf::vocab::rdfs;
use std::fmt;
use std::io::{self, Write};

/// Rewrites an entity identifier into an N-Triples term.
///
/// The identifier is trimmed. The `owl:` shorthand is expanded to a bracketed
/// IRI in the OWL namespace, any other identifier is returned as is.
///
/// ```
/// use owl2nt::normalize;
///
/// assert_eq!(normalize("owl:Thing"), "<http://www.w3.org/2002/07/owl#Thing>");
/// assert_eq!(normalize(" <http://example.com/Dog> "), "<http://example.com/Dog>");
/// ```
pub fn normalize(id: &str) -> String {
    let id = id.trim();
    match id.strip_prefix(owl::PREFIX) {
        Some(local_name) => format!("<{}{local_name}>", owl::NAMESPACE),
        None => id.to_owned(),
    }
}

/// Escapes a string to be embedded between the quotes of a literal.
///
/// Only `\`, `"`, line feeds, carriage returns and tabulations are escaped.
/// Escaping an already escaped string escapes it again.
///
/// ```
/// use owl2nt::escape;
///
/// assert_eq!(escape("say \"hi\"\n"), "say \\\"hi\\\"\\n");
/// ```
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// One line of the export, without its terminating ` .`.
///
/// Terms are written as given: the subject and classes must already be
/// normalized and the label value escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTriple<'a> {
    /// `subject rdfs:label "value"`
    Label { subject: &'a str, value: &'a str },
    /// `sub_class rdfs:subClassOf super_class`
    SubClassOf {
        sub_class: &'a str,
        super_class: &'a str,
    },
}

impl fmt::Display for ExportTriple<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label { subject, value } => write!(f, "{subject} {} \"{value}\"", rdfs::LABEL),
            Self::SubClassOf {
                sub_class,
                super_class,
            } => write!(f, "{sub_class} {} {super_class}", rdfs::SUB_CLASS_OF),
        }
    }
}

/// Writes the export lines to a [`Write`] implementation.
///
/// ```
/// use owl2nt::TripleSink;
///
/// let mut sink = TripleSink::new(Vec::new());
/// sink.write_label("<http://example.com/Dog>", " a \"dog\"")?;
/// assert_eq!(
///     String::from_utf8(sink.finish()?)?,
///     "<http://example.com/Dog> <http://www.w3.org/2000/01/rdf-schema#label> \" a \\\"dog\\\"\" .\n"
/// );
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[must_use]
pub struct TripleSink<W: Write> {
    writer: W,
    label_count: usize,
    edge_count: usize,
}

impl<W: Write> TripleSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            label_count: 0,
            edge_count: 0,
        }
    }

    /// Writes a label line. `value` is escaped, `subject` is written as is.
    pub fn write_label(&mut self, subject: &str, value: &str) -> io::Result<()> {
        self.write(ExportTriple::Label {
            subject,
            value: &escape(value),
        })
    }

    /// Writes a subclass edge line, both classes being written as is.
    pub fn write_sub_class_of(&mut self, sub_class: &str, super_class: &str) -> io::Result<()> {
        self.write(ExportTriple::SubClassOf {
            sub_class,
            super_class,
        })
    }

    pub fn write(&mut self, triple: ExportTriple<'_>) -> io::Result<()> {
        writeln!(self.writer, "{triple} .")?;
        match triple {
            ExportTriple::Label { .. } => self.label_count += 1,
            ExportTriple::SubClassOf { .. } => self.edge_count += 1,
        }
        Ok(())
    }

    /// Number of label lines written so far.
    pub fn label_count(&self) -> usize {
        self.label_count
    }

    /// Number of subclass edge lines written so far.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Flushes the underlying writer and returns it.
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_expands_the_owl_shorthand() {
        assert_eq!(
            normalize("owl:Thing"),
            "<http://www.w3.org/2002/07/owl#Thing>"
        );
        assert_eq!(
            normalize("  owl:Nothing\t"),
            "<http://www.w3.org/2002/07/owl#Nothing>"
        );
        assert_eq!(
            normalize(&normalize("owl:Thing")),
            "<http://www.w3.org/2002/07/owl#Thing>"
        );
    }

    #[test]
    fn normalize_trims_other_identifiers() {
        assert_eq!(
            normalize("<http://example.org/A> "),
            "<http://example.org/A>"
        );
        assert_eq!(normalize("_:b0"), "_:b0");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("xowl:Thing"), "xowl:Thing");
    }

    #[test]
    fn escape_handles_special_characters() {
        assert_eq!(escape("Hello \"world\"\n"), "Hello \\\"world\\\"\\n");
        assert_eq!(escape("a\\b\tc\rd"), "a\\\\b\\tc\\rd");
        assert_eq!(escape("Gewebe über Zelle"), "Gewebe über Zelle");
        assert_eq!(escape(""), "");
    }

    #[test]
    fn escape_is_not_idempotent() {
        assert_eq!(escape(&escape("\\")), "\\\\\\\\");
    }

    #[test]
    fn escaped_text_has_no_raw_special_characters() {
        let escaped = escape("\\\"\n\r\t\"\\ end");
        let mut chars = escaped.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                assert!(matches!(chars.next(), Some('\\' | '"' | 'n' | 'r' | 't')));
            } else {
                assert!(!matches!(c, '"' | '\n' | '\r' | '\t'));
            }
        }
    }

    #[test]
    fn sink_writes_one_triple_per_line() -> io::Result<()> {
        let mut sink = TripleSink::new(Vec::new());
        sink.write_label("<http://example.org/A>", "Alpha")?;
        sink.write_sub_class_of("<http://example.org/B>", "<http://example.org/A>")?;
        assert_eq!(sink.label_count(), 1);
        assert_eq!(sink.edge_count(), 1);
        assert_eq!(
            String::from_utf8_lossy(&sink.finish()?),
            "<http://example.org/A> <http://www.w3.org/2000/01/rdf-schema#label> \"Alpha\" .\n\
             <http://example.org/B> <http://www.w3.org/2000/01/rdf-schema#subClassOf> <http://example.org/A> .\n"
        );
        Ok(())
    }
}
