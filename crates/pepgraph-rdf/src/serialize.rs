//! N-Triples and Turtle writers.
//!
//! Both walk the graph in its `(subject, predicate, object)` order, so equal
//! graphs always produce byte-identical documents.

use std::fmt::Write as _;

use crate::graph::{Graph, RdfLiteral, RdfNode, RdfObject};
use crate::vocab::{Namespaces, OWL_NS, RDFS_NS, RDF_NS, RDF_TYPE, XSD_NS};

/// Output format for a serialized graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    NTriples,
    Turtle,
}

impl RdfFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::NTriples => "nt",
            Self::Turtle => "ttl",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "nt" | "ntriples" => Some(Self::NTriples),
            "ttl" | "turtle" => Some(Self::Turtle),
            _ => None,
        }
    }
}

/// Serialize in `format`, using the PEP prefixes for Turtle.
pub fn serialize(graph: &Graph, format: RdfFormat, ns: &Namespaces) -> String {
    match format {
        RdfFormat::NTriples => to_ntriples(graph),
        RdfFormat::Turtle => to_turtle(graph, &pep_prefixes(ns)),
    }
}

/// `peps:` for the schema, the empty prefix for instances, plus rdf/rdfs/owl/xsd.
pub fn pep_prefixes(ns: &Namespaces) -> Vec<(String, String)> {
    vec![
        ("peps".to_string(), ns.schema.clone()),
        (String::new(), ns.instance.clone()),
        ("rdf".to_string(), RDF_NS.to_string()),
        ("rdfs".to_string(), RDFS_NS.to_string()),
        ("owl".to_string(), OWL_NS.to_string()),
        ("xsd".to_string(), XSD_NS.to_string()),
    ]
}

// ============================================================================
// N-Triples
// ============================================================================

pub fn to_ntriples(graph: &Graph) -> String {
    let mut out = String::new();
    for t in graph {
        let _ = writeln!(
            out,
            "{} <{}> {} .",
            t.subject,
            t.predicate,
            object_nt(&t.object)
        );
    }
    out
}

fn object_nt(object: &RdfObject) -> String {
    match object {
        RdfObject::Node(node) => node.to_string(),
        RdfObject::Literal(lit) => literal_with(lit, |dt| format!("<{dt}>")),
    }
}

fn literal_with(lit: &RdfLiteral, datatype: impl Fn(&str) -> String) -> String {
    let mut out = format!("\"{}\"", escape_string(&lit.lexical));
    if let Some(lang) = &lit.language {
        out.push('@');
        out.push_str(lang);
    } else if let Some(dt) = &lit.datatype {
        out.push_str("^^");
        out.push_str(&datatype(dt));
    }
    out
}

fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}

// ============================================================================
// Turtle
// ============================================================================

/// Turtle with an `@prefix` header. IRIs under a declared namespace are
/// written as prefixed names when the local part is a plain name; everything
/// else stays in `<...>` form.
pub fn to_turtle(graph: &Graph, prefixes: &[(String, String)]) -> String {
    let mut out = String::new();
    for (prefix, ns) in prefixes {
        let _ = writeln!(out, "@prefix {prefix}: <{ns}> .");
    }

    let mut current_subject: Option<&RdfNode> = None;
    let mut current_predicate: Option<&str> = None;

    for t in graph {
        let object = object_ttl(&t.object, prefixes);
        if current_subject != Some(&t.subject) {
            if current_subject.is_some() {
                out.push_str(" .\n");
            }
            let _ = write!(
                out,
                "\n{}\n    {} {}",
                node_ttl(&t.subject, prefixes),
                predicate_ttl(&t.predicate, prefixes),
                object
            );
            current_subject = Some(&t.subject);
            current_predicate = Some(t.predicate.as_str());
        } else if current_predicate != Some(t.predicate.as_str()) {
            let _ = write!(
                out,
                " ;\n    {} {}",
                predicate_ttl(&t.predicate, prefixes),
                object
            );
            current_predicate = Some(t.predicate.as_str());
        } else {
            let _ = write!(out, ",\n        {object}");
        }
    }
    if current_subject.is_some() {
        out.push_str(" .\n");
    }
    out
}

fn compact(iri: &str, prefixes: &[(String, String)]) -> Option<String> {
    prefixes
        .iter()
        .filter_map(|(prefix, ns)| {
            let local = iri.strip_prefix(ns.as_str())?;
            is_plain_local_name(local).then(|| format!("{prefix}:{local}"))
        })
        // Shortest prefixed name wins when namespaces nest.
        .min_by_key(|name| name.len())
}

fn is_plain_local_name(local: &str) -> bool {
    let mut chars = local.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphanumeric() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn iri_ttl(iri: &str, prefixes: &[(String, String)]) -> String {
    compact(iri, prefixes).unwrap_or_else(|| format!("<{iri}>"))
}

fn node_ttl(node: &RdfNode, prefixes: &[(String, String)]) -> String {
    match node {
        RdfNode::Iri(iri) => iri_ttl(iri, prefixes),
        RdfNode::BlankNode(bn) => format!("_:{bn}"),
    }
}

fn predicate_ttl(predicate: &str, prefixes: &[(String, String)]) -> String {
    if predicate == RDF_TYPE {
        "a".to_string()
    } else {
        iri_ttl(predicate, prefixes)
    }
}

fn object_ttl(object: &RdfObject, prefixes: &[(String, String)]) -> String {
    match object {
        RdfObject::Node(node) => node_ttl(node, prefixes),
        RdfObject::Literal(lit) => literal_with(lit, |dt| iri_ttl(dt, prefixes)),
    }
}
