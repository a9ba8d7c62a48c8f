//! Namespaces, well-known IRIs and the URI scheme for PEP graph nodes.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::error::{Error, Result};
use crate::graph::RdfNode;

pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const OWL_NS: &str = "http://www.w3.org/2002/07/owl#";
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema#";

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
pub const RDFS_COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
pub const RDFS_DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";
pub const RDFS_RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";
pub const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
pub const OWL_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";
pub const OWL_DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";
pub const XSD_INT: &str = "http://www.w3.org/2001/XMLSchema#int";
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
pub const XSD_DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
pub const XSD_ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";

pub const DEFAULT_SCHEMA_NS: &str = "https://noahgorstein.com/peps/schema/";
pub const DEFAULT_INSTANCE_NS: &str = "https://python.org/peps/";

/// Local names of schema terms.
pub mod term {
    pub const PROPOSAL: &str = "PythonEnhancementProposal";
    pub const AUTHOR: &str = "Author";
    pub const RESOLUTION: &str = "Resolution";
    pub const POST: &str = "Post";

    pub const ID: &str = "id";
    pub const URL: &str = "url";
    pub const TITLE: &str = "title";
    pub const HAS_AUTHOR: &str = "hasAuthor";
    pub const DATE_CREATED: &str = "dateCreated";
    pub const STATUS: &str = "status";
    pub const TYPE: &str = "type";
    pub const PYTHON_VERSION: &str = "pythonVersion";
    pub const REQUIRES: &str = "requires";
    pub const REPLACES: &str = "replaces";
    pub const SUPERSEDED_BY: &str = "supersededBy";
    pub const DISCUSSIONS_TO: &str = "discussionsTo";
    pub const TOPIC: &str = "topic";
    pub const HAS_RESOLUTION: &str = "hasResolution";
    pub const HAS_POST: &str = "hasPost";
    pub const RESOLUTION_URL: &str = "resolutionUrl";
    pub const RESOLUTION_DATE: &str = "resolutionDate";
    pub const POST_URL: &str = "postUrl";
    pub const POST_DATE: &str = "postDate";
}

/// Schema and instance namespaces.
///
/// Every node the converter mints is `{namespace}{local}`; downstream queries
/// depend on this scheme being reproduced exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Namespaces {
    pub schema: String,
    pub instance: String,
}

impl Default for Namespaces {
    fn default() -> Self {
        Self {
            schema: DEFAULT_SCHEMA_NS.to_string(),
            instance: DEFAULT_INSTANCE_NS.to_string(),
        }
    }
}

impl Namespaces {
    pub fn new(schema: impl Into<String>, instance: impl Into<String>) -> Result<Self> {
        let ns = Self {
            schema: schema.into(),
            instance: instance.into(),
        };
        ns.validate()?;
        Ok(ns)
    }

    pub fn validate(&self) -> Result<()> {
        for iri in [&self.schema, &self.instance] {
            let absolute = iri.starts_with("http://") || iri.starts_with("https://");
            if !absolute || !(iri.ends_with('/') || iri.ends_with('#')) {
                return Err(Error::InvalidIri(iri.clone()));
            }
        }
        Ok(())
    }

    /// `{schema}{name}` as a string, for use as a predicate.
    pub fn term(&self, name: &str) -> String {
        format!("{}{name}", self.schema)
    }

    /// `{schema}{name}` as a node, for use as a subject or object.
    pub fn term_node(&self, name: &str) -> RdfNode {
        RdfNode::Iri(self.term(name))
    }

    /// `{instance}pep-{id}`. The id is taken verbatim so cross-references can
    /// name proposals that are not in the feed.
    pub fn pep(&self, id: &str) -> RdfNode {
        RdfNode::Iri(format!("{}pep-{id}", self.instance))
    }

    /// `{instance}author/{name}` with the name form-urlencoded (spaces become
    /// `+`), so the same display name always yields the same node.
    pub fn author(&self, name: &str) -> RdfNode {
        let escaped: String = form_urlencoded::byte_serialize(name.as_bytes()).collect();
        RdfNode::Iri(format!("{}author/{escaped}", self.instance))
    }

    /// Inverse of [`Namespaces::pep`] for numeric ids.
    pub fn pep_number(&self, node: &RdfNode) -> Option<u32> {
        node.as_iri()?
            .strip_prefix(self.instance.as_str())?
            .strip_prefix("pep-")?
            .parse()
            .ok()
    }
}
