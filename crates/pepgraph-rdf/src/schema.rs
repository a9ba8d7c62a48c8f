//! The PEP vocabulary: four OWL classes and a fixed table of properties.

use crate::graph::{Graph, RdfLiteral, RdfNode};
use crate::vocab::{
    term, Namespaces, OWL_CLASS, OWL_DATATYPE_PROPERTY, OWL_OBJECT_PROPERTY, RDFS_COMMENT,
    RDFS_DOMAIN, RDFS_LABEL, RDFS_RANGE, RDF_TYPE, XSD_ANY_URI, XSD_DATE, XSD_INT, XSD_STRING,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    ObjectProperty,
    DataProperty,
}

/// Range of a property: a primitive XSD datatype or one of the schema classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Range {
    Datatype(&'static str),
    Class(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct ClassDef {
    pub name: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct PropertyDef {
    pub name: &'static str,
    pub label: &'static str,
    pub comment: &'static str,
    pub domain: &'static str,
    pub range: Range,
}

impl PropertyDef {
    /// Object properties link entities; everything else carries a literal.
    pub fn property_type(&self) -> PropertyType {
        match self.range {
            Range::Class(_) => PropertyType::ObjectProperty,
            Range::Datatype(_) => PropertyType::DataProperty,
        }
    }
}

pub const CLASSES: &[ClassDef] = &[
    ClassDef {
        name: term::PROPOSAL,
        label: "Python Enhancement Proposal",
    },
    ClassDef {
        name: term::AUTHOR,
        label: "PEP Author",
    },
    ClassDef {
        name: term::RESOLUTION,
        label: "PEP Resolution",
    },
    ClassDef {
        name: term::POST,
        label: "PEP Post",
    },
];

const fn prop(
    name: &'static str,
    label: &'static str,
    comment: &'static str,
    domain: &'static str,
    range: Range,
) -> PropertyDef {
    PropertyDef {
        name,
        label,
        comment,
        domain,
        range,
    }
}

use Range::{Class, Datatype};

pub const PROPERTIES: &[PropertyDef] = &[
    prop(
        term::ID,
        "id of the PEP",
        "the identifier of the PEP.",
        term::PROPOSAL,
        Datatype(XSD_INT),
    ),
    prop(term::URL, "URL of the PEP", "the URL of the PEP.", term::PROPOSAL, Datatype(XSD_ANY_URI)),
    prop(
        term::TITLE,
        "title of the PEP",
        "the title of the PEP.",
        term::PROPOSAL,
        Datatype(XSD_STRING),
    ),
    prop(
        term::HAS_AUTHOR,
        "author of the PEP",
        "An author of the PEP.",
        term::PROPOSAL,
        Class(term::AUTHOR),
    ),
    prop(
        term::DATE_CREATED,
        "creation date",
        "The date the PEP was created",
        term::PROPOSAL,
        Datatype(XSD_DATE),
    ),
    prop(
        term::STATUS,
        "PEP status",
        "The current status of the PEP",
        term::PROPOSAL,
        Datatype(XSD_STRING),
    ),
    prop(term::TYPE, "PEP type", "The type of the PEP", term::PROPOSAL, Datatype(XSD_STRING)),
    prop(
        term::PYTHON_VERSION,
        "Python version",
        "The Python version this PEP is targeted for",
        term::PROPOSAL,
        Datatype(XSD_STRING),
    ),
    prop(
        term::REQUIRES,
        "requires PEP",
        "Other PEPs that this PEP depends on",
        term::PROPOSAL,
        Class(term::PROPOSAL),
    ),
    prop(
        term::REPLACES,
        "replaces PEP",
        "The PEP that this PEP replaces",
        term::PROPOSAL,
        Class(term::PROPOSAL),
    ),
    prop(
        term::SUPERSEDED_BY,
        "superseded by PEP",
        "The PEP that supersedes this PEP",
        term::PROPOSAL,
        Class(term::PROPOSAL),
    ),
    prop(
        term::DISCUSSIONS_TO,
        "discussions to",
        "The mailing list or URL where the PEP is being discussed",
        term::PROPOSAL,
        Datatype(XSD_STRING),
    ),
    prop(term::TOPIC, "topic", "The topic area of the PEP", term::PROPOSAL, Datatype(XSD_STRING)),
    prop(
        term::HAS_RESOLUTION,
        "has a resolution",
        "Resolution for this PEP",
        term::PROPOSAL,
        Class(term::RESOLUTION),
    ),
    prop(
        term::HAS_POST,
        "has post associated with PEP",
        "History of significant posts related to the PEP",
        term::PROPOSAL,
        Class(term::POST),
    ),
    prop(
        term::RESOLUTION_URL,
        "resolution URL",
        "The URL of the resolution",
        term::RESOLUTION,
        Datatype(XSD_ANY_URI),
    ),
    prop(
        term::RESOLUTION_DATE,
        "resolution date",
        "The date of the resolution",
        term::RESOLUTION,
        Datatype(XSD_DATE),
    ),
    prop(term::POST_URL, "post URL", "The URL of the post", term::POST, Datatype(XSD_ANY_URI)),
    prop(term::POST_DATE, "post date", "The date of the post", term::POST, Datatype(XSD_DATE)),
];

pub fn define_classes(graph: &mut Graph, ns: &Namespaces) {
    for class in CLASSES {
        let node = ns.term_node(class.name);
        graph.insert(node.clone(), RDF_TYPE, RdfNode::iri(OWL_CLASS));
        graph.insert(node, RDFS_LABEL, RdfLiteral::plain(class.label));
    }
}

pub fn define_properties(graph: &mut Graph, ns: &Namespaces) {
    for def in PROPERTIES {
        let node = ns.term_node(def.name);
        let kind = match def.property_type() {
            PropertyType::ObjectProperty => OWL_OBJECT_PROPERTY,
            PropertyType::DataProperty => OWL_DATATYPE_PROPERTY,
        };
        let range = match def.range {
            Range::Datatype(iri) => RdfNode::iri(iri),
            Range::Class(name) => ns.term_node(name),
        };

        graph.insert(node.clone(), RDF_TYPE, RdfNode::iri(kind));
        graph.insert(node.clone(), RDFS_LABEL, RdfLiteral::plain(def.label));
        graph.insert(node.clone(), RDFS_COMMENT, RdfLiteral::plain(def.comment));
        graph.insert(node.clone(), RDFS_DOMAIN, ns.term_node(def.domain));
        graph.insert(node, RDFS_RANGE, range);
    }
}

/// Build the complete schema graph.
pub fn build_schema(ns: &Namespaces) -> Graph {
    let mut graph = Graph::new();
    define_classes(&mut graph, ns);
    define_properties(&mut graph, ns);
    graph
}
