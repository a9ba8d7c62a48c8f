//! PEP metadata → RDF.
//!
//! This crate turns the Python Enhancement Proposal feed (`peps.json`) into two
//! RDF graphs:
//!
//! - a **schema graph**: the OWL classes and properties of the PEP vocabulary;
//! - an **instance graph**: one `PythonEnhancementProposal` node per record,
//!   with its authors, resolution and discussion posts.
//!
//! The pieces, bottom-up:
//!
//! - [`record`]: typed feed records (`Feed`, `PepRecord`)
//! - [`text`]: regex extraction for the free-text `resolution` / `post_history`
//! - [`schema`] / [`instance`]: graph builders
//! - [`serialize`] / [`load`]: N-Triples and Turtle out, Sophia-parsed in
//! - [`query`]: the joins the summary views are built from

pub mod convert;
pub mod error;
pub mod graph;
pub mod instance;
pub mod load;
pub mod query;
pub mod record;
pub mod schema;
pub mod serialize;
pub mod text;
pub mod vocab;

pub use convert::{convert, convert_with, PepGraphs};
pub use error::{Error, Result};
pub use graph::{Graph, RdfLiteral, RdfNode, RdfObject, RdfTriple};
pub use record::{Feed, PepRecord};
pub use serialize::RdfFormat;
pub use text::{parse_post_history, parse_resolution, DateError, ParsedPost, ParsedResolution};
pub use vocab::Namespaces;
