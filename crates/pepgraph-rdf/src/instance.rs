//! Instance triples for one PEP record.
//!
//! Every present field becomes one or more triples on the proposal node
//! `{instance}pep-{number}`. Authors are IRIs derived from their names; the
//! resolution and posts are blank nodes owned by the proposal.

use crate::error::{Error, Result};
use crate::graph::{Graph, RdfLiteral, RdfNode};
use crate::record::PepRecord;
use crate::text::{parse_feed_date, parse_post_history, parse_resolution};
use crate::vocab::{term, Namespaces, RDFS_LABEL, RDF_TYPE, XSD_ANY_URI, XSD_DATE, XSD_INT};

/// Writes proposal triples into a graph it borrows for its lifetime.
pub struct InstanceBuilder<'g> {
    graph: &'g mut Graph,
    ns: &'g Namespaces,
}

impl<'g> InstanceBuilder<'g> {
    pub fn new(graph: &'g mut Graph, ns: &'g Namespaces) -> Self {
        Self { graph, ns }
    }

    /// Emit every triple describing `record`, labelling its blank nodes by
    /// its number. Returns how many triples were new to the graph.
    ///
    /// A malformed creation, resolution or post date is an error; the caller
    /// is expected to abandon the whole graph in that case.
    pub fn add_record(&mut self, record: &PepRecord) -> Result<usize> {
        self.add_entry(&record.number.to_string(), record)
    }

    /// As [`add_record`](Self::add_record), with blank nodes labelled by the
    /// feed key. Two entries that share a number still get their own
    /// resolution and post nodes.
    pub fn add_entry(&mut self, key: &str, record: &PepRecord) -> Result<usize> {
        let before = self.graph.len();
        let pep = self.ns.pep(&record.number.to_string());
        let label = blank_label_part(key);

        self.add_identity(&pep, record);
        self.add_authors(&pep, record);
        self.add_topics(&pep, record);
        self.add_created(&pep, record)?;
        self.add_links(&pep, record);
        self.add_resolution(&pep, &label, record)?;
        self.add_posts(&pep, &label, record)?;

        Ok(self.graph.len() - before)
    }

    fn add_identity(&mut self, pep: &RdfNode, record: &PepRecord) {
        self.graph
            .insert(pep.clone(), RDF_TYPE, self.ns.term_node(term::PROPOSAL));
        self.graph
            .insert(pep.clone(), RDFS_LABEL, RdfLiteral::plain(&record.title));
        self.graph.insert(
            pep.clone(),
            self.ns.term(term::TITLE),
            RdfLiteral::plain(&record.title),
        );
        self.graph.insert(
            pep.clone(),
            self.ns.term(term::ID),
            RdfLiteral::typed(record.number.to_string(), XSD_INT),
        );
        self.graph.insert(
            pep.clone(),
            self.ns.term(term::URL),
            RdfLiteral::typed(&record.url, XSD_ANY_URI),
        );
        self.graph.insert(
            pep.clone(),
            self.ns.term(term::STATUS),
            RdfLiteral::plain(&record.status),
        );
        self.graph.insert(
            pep.clone(),
            self.ns.term(term::TYPE),
            RdfLiteral::plain(&record.pep_type),
        );
        if let Some(version) = &record.python_version {
            self.graph.insert(
                pep.clone(),
                self.ns.term(term::PYTHON_VERSION),
                RdfLiteral::plain(version),
            );
        }
        if let Some(discussions_to) = &record.discussions_to {
            self.graph.insert(
                pep.clone(),
                self.ns.term(term::DISCUSSIONS_TO),
                RdfLiteral::plain(discussions_to),
            );
        }
    }

    fn add_authors(&mut self, pep: &RdfNode, record: &PepRecord) {
        let has_author = self.ns.term(term::HAS_AUTHOR);
        let author_class = self.ns.term_node(term::AUTHOR);
        for name in record.author_names() {
            let author = self.ns.author(name);
            self.graph
                .insert(pep.clone(), has_author.clone(), author.clone());
            self.graph
                .insert(author.clone(), RDF_TYPE, author_class.clone());
            self.graph
                .insert(author, RDFS_LABEL, RdfLiteral::plain(name));
        }
    }

    fn add_topics(&mut self, pep: &RdfNode, record: &PepRecord) {
        let topic = self.ns.term(term::TOPIC);
        for piece in record.topics() {
            self.graph
                .insert(pep.clone(), topic.clone(), RdfLiteral::plain(piece));
        }
    }

    fn add_created(&mut self, pep: &RdfNode, record: &PepRecord) -> Result<()> {
        let Some(created) = &record.created else {
            return Ok(());
        };
        let date = date_literal(record.number, "created", created)?;
        self.graph
            .insert(pep.clone(), self.ns.term(term::DATE_CREATED), date);
        Ok(())
    }

    /// `supersededBy`, `replaces` and `requires`. Targets are not checked
    /// against the feed; a dangling id yields an untyped proposal IRI.
    fn add_links(&mut self, pep: &RdfNode, record: &PepRecord) {
        if let Some(id) = &record.superseded_by {
            self.graph
                .insert(pep.clone(), self.ns.term(term::SUPERSEDED_BY), self.ns.pep(id));
        }

        let replaces = self.ns.term(term::REPLACES);
        for id in record.replaced_ids() {
            self.graph
                .insert(pep.clone(), replaces.clone(), self.ns.pep(id));
        }

        let requires = self.ns.term(term::REQUIRES);
        for id in record.required_ids() {
            self.graph
                .insert(pep.clone(), requires.clone(), self.ns.pep(id));
        }
    }

    fn add_resolution(&mut self, pep: &RdfNode, label: &str, record: &PepRecord) -> Result<()> {
        let Some(parsed) = record.resolution.as_deref().and_then(parse_resolution) else {
            return Ok(());
        };

        // Parse first so a bad date leaves no half-built node behind.
        let date = parsed
            .date
            .as_deref()
            .map(|d| date_literal(record.number, "resolution", d))
            .transpose()?;

        let node = RdfNode::blank(format!("pep{label}resolution"));
        self.graph
            .insert(pep.clone(), self.ns.term(term::HAS_RESOLUTION), node.clone());
        self.graph
            .insert(node.clone(), RDF_TYPE, self.ns.term_node(term::RESOLUTION));
        if let Some(url) = parsed.url {
            self.graph.insert(
                node.clone(),
                self.ns.term(term::RESOLUTION_URL),
                RdfLiteral::typed(url, XSD_ANY_URI),
            );
        }
        if let Some(date) = date {
            self.graph
                .insert(node, self.ns.term(term::RESOLUTION_DATE), date);
        }
        Ok(())
    }

    fn add_posts(&mut self, pep: &RdfNode, label: &str, record: &PepRecord) -> Result<()> {
        let Some(post_history) = &record.post_history else {
            return Ok(());
        };

        let has_post = self.ns.term(term::HAS_POST);
        let post_class = self.ns.term_node(term::POST);
        for (index, post) in parse_post_history(post_history).into_iter().enumerate() {
            let date = date_literal(record.number, "post", &post.date)?;
            let node = RdfNode::blank(format!("pep{label}post{index}"));
            self.graph
                .insert(pep.clone(), has_post.clone(), node.clone());
            self.graph
                .insert(node.clone(), RDF_TYPE, post_class.clone());
            self.graph
                .insert(node.clone(), self.ns.term(term::POST_DATE), date);
            if let Some(url) = post.url {
                self.graph.insert(
                    node,
                    self.ns.term(term::POST_URL),
                    RdfLiteral::typed(url, XSD_ANY_URI),
                );
            }
        }
        Ok(())
    }
}

/// Feed key as a blank-node label fragment: ASCII alphanumerics pass
/// through, anything else becomes `_{hex}_`, so distinct keys stay distinct.
fn blank_label_part(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for c in key.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else {
            out.push_str(&format!("_{:x}_", u32::from(c)));
        }
    }
    out
}

/// `DD-Mon-YYYY` → `"YYYY-MM-DD"^^xsd:date`.
fn date_literal(pep: u32, field: &'static str, value: &str) -> Result<RdfLiteral> {
    let date = parse_feed_date(value).map_err(|source| Error::InvalidDate {
        pep,
        field,
        value: value.to_string(),
        source,
    })?;
    Ok(RdfLiteral::typed(date.format("%Y-%m-%d").to_string(), XSD_DATE))
}
