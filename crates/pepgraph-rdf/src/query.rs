//! Read-side queries over an instance graph.
//!
//! These are the joins the PEP charts are drawn from (status pie, supersession
//! and dependency networks, an author's timeline), expressed as triple-pattern
//! lookups on [`Graph`].

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::graph::{Graph, RdfNode, RdfObject};
use crate::vocab::{term, Namespaces, RDFS_LABEL, RDF_TYPE};

/// The per-proposal columns the charts display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PepSummary {
    pub number: u32,
    pub title: String,
    pub status: String,
    pub pep_type: String,
    pub python_version: Option<String>,
    pub created: Option<NaiveDate>,
}

impl PepSummary {
    /// Look up a described proposal. Returns `None` for dangling references
    /// (nodes with no `id`/`title`/`status`).
    pub fn lookup(graph: &Graph, ns: &Namespaces, pep: &RdfNode) -> Option<Self> {
        let text = |name: &str| {
            graph
                .literal(pep, &ns.term(name))
                .map(|l| l.lexical.clone())
        };
        Some(Self {
            number: text(term::ID)?.parse().ok()?,
            title: text(term::TITLE)?,
            status: text(term::STATUS)?,
            pep_type: text(term::TYPE).unwrap_or_default(),
            python_version: text(term::PYTHON_VERSION),
            created: text(term::DATE_CREATED)
                .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
        })
    }
}

/// A directed link between two described proposals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PepLink {
    pub from: PepSummary,
    pub to: PepSummary,
}

fn proposals<'a>(graph: &'a Graph, ns: &Namespaces) -> impl Iterator<Item = &'a RdfNode> + 'a {
    let class = RdfObject::Node(ns.term_node(term::PROPOSAL));
    graph
        .matching(None, Some(RDF_TYPE), None)
        .filter(move |t| t.object == class)
        .map(|t| &t.subject)
}

/// Number of proposals per status.
pub fn status_distribution(graph: &Graph, ns: &Namespaces) -> BTreeMap<String, usize> {
    let status = ns.term(term::STATUS);
    let mut counts = BTreeMap::new();
    for pep in proposals(graph, ns) {
        if let Some(lit) = graph.literal(pep, &status) {
            *counts.entry(lit.lexical.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// Links along `predicate` where both ends are described proposals. Dangling
/// targets are skipped, as a join over the graph would skip them.
fn links(graph: &Graph, ns: &Namespaces, predicate: &str) -> Vec<PepLink> {
    let predicate = ns.term(predicate);
    let mut out: Vec<PepLink> = graph
        .matching(None, Some(&predicate), None)
        .filter_map(|t| {
            let target = t.object.as_node()?;
            Some(PepLink {
                from: PepSummary::lookup(graph, ns, &t.subject)?,
                to: PepSummary::lookup(graph, ns, target)?,
            })
        })
        .collect();
    out.sort_by_key(|link| (link.from.number, link.to.number));
    out
}

/// `(pep, superseded by)` pairs.
pub fn supersessions(graph: &Graph, ns: &Namespaces) -> Vec<PepLink> {
    links(graph, ns, term::SUPERSEDED_BY)
}

/// `(pep, requires)` pairs.
pub fn dependencies(graph: &Graph, ns: &Namespaces) -> Vec<PepLink> {
    links(graph, ns, term::REQUIRES)
}

/// Proposals listing `author_name` as an author, oldest first.
pub fn peps_by_author(graph: &Graph, ns: &Namespaces, author_name: &str) -> Vec<PepSummary> {
    let author = RdfObject::Node(ns.author(author_name));
    let has_author = ns.term(term::HAS_AUTHOR);
    let mut out: Vec<PepSummary> = graph
        .subjects(&has_author, &author)
        .filter_map(|pep| PepSummary::lookup(graph, ns, pep))
        .collect();
    out.sort_by_key(|p| (p.created, p.number));
    out
}

/// Author display names of one proposal, sorted.
pub fn authors_of(graph: &Graph, ns: &Namespaces, pep: u32) -> Vec<String> {
    let node = ns.pep(&pep.to_string());
    let has_author = ns.term(term::HAS_AUTHOR);
    let names: BTreeSet<String> = graph
        .objects(&node, &has_author)
        .filter_map(RdfObject::as_node)
        .filter_map(|author| graph.literal(author, RDFS_LABEL))
        .map(|l| l.lexical.clone())
        .collect();
    names.into_iter().collect()
}

/// Every proposal written by any author of `pep`, grouped by author.
pub fn author_contributions(
    graph: &Graph,
    ns: &Namespaces,
    pep: u32,
) -> BTreeMap<String, Vec<PepSummary>> {
    authors_of(graph, ns, pep)
        .into_iter()
        .map(|name| {
            let peps = peps_by_author(graph, ns, &name);
            (name, peps)
        })
        .collect()
}
