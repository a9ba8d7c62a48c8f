//! Feed → (schema graph, instance graph).

use crate::error::Result;
use crate::graph::Graph;
use crate::instance::InstanceBuilder;
use crate::record::Feed;
use crate::schema::build_schema;
use crate::vocab::Namespaces;

/// The two graphs produced by one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PepGraphs {
    pub schema: Graph,
    pub instances: Graph,
}

impl PepGraphs {
    pub fn into_parts(self) -> (Graph, Graph) {
        (self.schema, self.instances)
    }
}

/// Convert with the default namespaces.
pub fn convert(feed: &Feed) -> Result<PepGraphs> {
    convert_with(feed, &Namespaces::default())
}

/// Build a fresh schema graph and a fresh instance graph from `feed`.
///
/// Any malformed date aborts the run; no partial graphs are returned.
pub fn convert_with(feed: &Feed, ns: &Namespaces) -> Result<PepGraphs> {
    ns.validate()?;

    let schema = build_schema(ns);

    let mut instances = Graph::new();
    let mut builder = InstanceBuilder::new(&mut instances, ns);
    for (key, record) in feed.entries() {
        if key != record.number.to_string() {
            tracing::warn!(key, pep = record.number, "feed key does not match PEP number");
        }
        let added = builder.add_entry(key, record)?;
        tracing::debug!(pep = record.number, added, "converted PEP");
    }

    tracing::info!(
        peps = feed.len(),
        schema_triples = schema.len(),
        instance_triples = instances.len(),
        "converted feed to RDF"
    );

    Ok(PepGraphs { schema, instances })
}
