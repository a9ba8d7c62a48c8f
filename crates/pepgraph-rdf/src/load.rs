//! Read serialized graphs back into a [`Graph`].
//!
//! Parsing is done by Sophia; each parsed term is converted through its
//! N-Triples display form into the local term model.

use std::io::{BufReader, Cursor};
use std::path::Path;

use sophia::api::prelude::*;

use crate::error::{Error, Result};
use crate::graph::{Graph, RdfLiteral, RdfNode, RdfObject, RdfTriple};
use crate::serialize::RdfFormat;
use crate::vocab::XSD_STRING;

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
struct LoadSinkError {
    message: String,
}

impl From<Error> for LoadSinkError {
    fn from(value: Error) -> Self {
        Self {
            message: value.to_string(),
        }
    }
}

pub fn graph_from_rdf(bytes: &[u8], format: RdfFormat) -> Result<Graph> {
    let reader = BufReader::new(Cursor::new(bytes));
    let mut graph = Graph::new();

    let mut sink = |s: String, p: String, o: String| -> std::result::Result<(), LoadSinkError> {
        let RdfNode::Iri(predicate) = parse_node_term_display(&p)? else {
            return Ok(());
        };
        graph.insert_triple(RdfTriple {
            subject: parse_node_term_display(&s)?,
            predicate,
            object: parse_term_display(&o)?,
        });
        Ok(())
    };

    match format {
        RdfFormat::NTriples => {
            let mut parser = sophia::turtle::parser::nt::parse_bufread(reader);
            parser
                .try_for_each_triple(|t| {
                    sink(t.s().to_string(), t.p().to_string(), t.o().to_string())
                })
                .map_err(|e| Error::Parse(format!("failed to parse N-Triples: {e}")))?;
        }
        RdfFormat::Turtle => {
            let mut parser = sophia::turtle::parser::turtle::parse_bufread(reader);
            parser
                .try_for_each_triple(|t| {
                    sink(t.s().to_string(), t.p().to_string(), t.o().to_string())
                })
                .map_err(|e| Error::Parse(format!("failed to parse Turtle: {e}")))?;
        }
    }

    tracing::debug!(triples = graph.len(), ?format, "loaded RDF graph");
    Ok(graph)
}

/// Load a `.nt` or `.ttl` file, choosing the parser by extension.
pub fn graph_from_file(path: &Path) -> Result<Graph> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");
    let format = RdfFormat::from_extension(ext)
        .ok_or_else(|| Error::Parse(format!("unsupported RDF format: .{ext}")))?;
    let bytes = std::fs::read(path)?;
    graph_from_rdf(&bytes, format)
}

// ============================================================================
// Term display parsing
// ============================================================================

fn unescape_rdf_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('\\') => out.push('\\'),
            Some(u @ ('u' | 'U')) => {
                let width = if u == 'u' { 4 } else { 8 };
                let hex: String = chars.by_ref().take(width).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push('\\');
                        out.push(u);
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn parse_term_display(term: &str) -> Result<RdfObject> {
    let s = term.trim();

    if let Some(rest) = s.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
        return Ok(RdfObject::Node(RdfNode::Iri(rest.to_string())));
    }

    if let Some(rest) = s.strip_prefix("_:") {
        return Ok(RdfObject::Node(RdfNode::BlankNode(rest.to_string())));
    }

    if s.starts_with('"') {
        let mut end_quote = None;
        let mut escaped = false;
        for (i, ch) in s.char_indices().skip(1) {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                end_quote = Some(i);
                break;
            }
        }
        let Some(end) = end_quote else {
            return Err(Error::Parse(format!(
                "invalid literal term (missing closing quote): {s}"
            )));
        };

        let lexical = unescape_rdf_string(&s[1..end]);
        let rest = s[end + 1..].trim();

        let mut literal = RdfLiteral::plain(lexical);
        if let Some(lang) = rest.strip_prefix('@') {
            literal.language = Some(lang.to_string());
        } else if let Some(dt) = rest.strip_prefix("^^") {
            let dt = dt.trim();
            let dt = dt
                .strip_prefix('<')
                .and_then(|t| t.strip_suffix('>'))
                .unwrap_or(dt);
            if !dt.is_empty() && dt != XSD_STRING {
                literal.datatype = Some(dt.to_string());
            }
        }
        return Ok(RdfObject::Literal(literal));
    }

    Err(Error::Parse(format!("unsupported RDF term form: {s}")))
}

fn parse_node_term_display(term: &str) -> Result<RdfNode> {
    match parse_term_display(term)? {
        RdfObject::Node(node) => Ok(node),
        RdfObject::Literal(_) => Err(Error::Parse(format!(
            "expected IRI/blank node, got literal: {term}"
        ))),
    }
}
