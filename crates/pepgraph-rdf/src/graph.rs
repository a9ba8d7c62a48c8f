//! In-memory RDF term model and triple set.
//!
//! `Graph` is an owned, append-only container. Inserting a triple that is
//! already present is a no-op, which is what lets author nodes be asserted
//! once per mention without an explicit registry.

use std::collections::BTreeSet;
use std::fmt;

use crate::vocab::XSD_STRING;

// ============================================================================
// Terms
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RdfNode {
    Iri(String),
    BlankNode(String),
}

impl RdfNode {
    pub fn iri(iri: impl Into<String>) -> Self {
        Self::Iri(iri.into())
    }

    pub fn blank(label: impl Into<String>) -> Self {
        Self::BlankNode(label.into())
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Self::Iri(iri) => Some(iri),
            Self::BlankNode(_) => None,
        }
    }
}

impl fmt::Display for RdfNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(iri) => write!(f, "<{iri}>"),
            Self::BlankNode(bn) => write!(f, "_:{bn}"),
        }
    }
}

/// A literal. `xsd:string` literals are stored with `datatype: None` so that
/// simple and explicitly typed strings compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RdfLiteral {
    pub lexical: String,
    pub datatype: Option<String>,
    pub language: Option<String>,
}

impl RdfLiteral {
    pub fn plain(lexical: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: None,
            language: None,
        }
    }

    pub fn typed(lexical: impl Into<String>, datatype: &str) -> Self {
        let datatype = (datatype != XSD_STRING).then(|| datatype.to_string());
        Self {
            lexical: lexical.into(),
            datatype,
            language: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RdfObject {
    Node(RdfNode),
    Literal(RdfLiteral),
}

impl RdfObject {
    pub fn as_node(&self) -> Option<&RdfNode> {
        match self {
            Self::Node(node) => Some(node),
            Self::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&RdfLiteral> {
        match self {
            Self::Node(_) => None,
            Self::Literal(lit) => Some(lit),
        }
    }
}

impl From<RdfNode> for RdfObject {
    fn from(node: RdfNode) -> Self {
        Self::Node(node)
    }
}

impl From<RdfLiteral> for RdfObject {
    fn from(lit: RdfLiteral) -> Self {
        Self::Literal(lit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RdfTriple {
    pub subject: RdfNode,
    pub predicate: String,
    pub object: RdfObject,
}

// ============================================================================
// Graph
// ============================================================================

/// An ordered set of triples.
///
/// Iteration order is `(subject, predicate, object)`, so two graphs holding
/// the same triples serialize identically regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    triples: BTreeSet<RdfTriple>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a triple. Returns `false` when it was already present.
    pub fn insert(
        &mut self,
        subject: RdfNode,
        predicate: impl Into<String>,
        object: impl Into<RdfObject>,
    ) -> bool {
        self.triples.insert(RdfTriple {
            subject,
            predicate: predicate.into(),
            object: object.into(),
        })
    }

    pub fn insert_triple(&mut self, triple: RdfTriple) -> bool {
        self.triples.insert(triple)
    }

    pub fn contains(&self, subject: &RdfNode, predicate: &str, object: &RdfObject) -> bool {
        self.matching(Some(subject), Some(predicate), Some(object))
            .next()
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RdfTriple> {
        self.triples.iter()
    }

    /// Triple-pattern match; `None` positions are wildcards. The pattern only
    /// needs to live as long as the iterator; matches borrow from the graph.
    pub fn matching<'a, 'p>(
        &'a self,
        subject: Option<&'p RdfNode>,
        predicate: Option<&'p str>,
        object: Option<&'p RdfObject>,
    ) -> impl Iterator<Item = &'a RdfTriple> + 'p
    where
        'a: 'p,
    {
        self.triples.iter().filter(move |t| {
            subject.map_or(true, |s| &t.subject == s)
                && predicate.map_or(true, |p| t.predicate == p)
                && object.map_or(true, |o| &t.object == o)
        })
    }

    pub fn objects<'a, 'p>(
        &'a self,
        subject: &'p RdfNode,
        predicate: &'p str,
    ) -> impl Iterator<Item = &'a RdfObject> + 'p
    where
        'a: 'p,
    {
        self.matching(Some(subject), Some(predicate), None)
            .map(|t| &t.object)
    }

    pub fn subjects<'a, 'p>(
        &'a self,
        predicate: &'p str,
        object: &'p RdfObject,
    ) -> impl Iterator<Item = &'a RdfNode> + 'p
    where
        'a: 'p,
    {
        self.matching(None, Some(predicate), Some(object))
            .map(|t| &t.subject)
    }

    /// First literal value of `predicate` on `subject`.
    pub fn literal(&self, subject: &RdfNode, predicate: &str) -> Option<&RdfLiteral> {
        self.objects(subject, predicate)
            .find_map(RdfObject::as_literal)
    }
}

impl Extend<RdfTriple> for Graph {
    fn extend<I: IntoIterator<Item = RdfTriple>>(&mut self, iter: I) {
        self.triples.extend(iter);
    }
}

impl FromIterator<RdfTriple> for Graph {
    fn from_iter<I: IntoIterator<Item = RdfTriple>>(iter: I) -> Self {
        Self {
            triples: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a RdfTriple;
    type IntoIter = std::collections::btree_set::Iter<'a, RdfTriple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}
