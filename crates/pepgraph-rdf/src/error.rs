//! Error types for `pepgraph-rdf`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A date field that the feed guarantees to be `DD-Mon-YYYY` was not.
    ///
    /// Fatal for the whole conversion run.
    #[error("PEP {pep}: invalid {field} date {value:?}: {source}")]
    InvalidDate {
        pep: u32,
        field: &'static str,
        value: String,
        #[source]
        source: crate::text::DateError,
    },

    #[error("invalid namespace IRI {0:?} (must be absolute and end in '/' or '#')")]
    InvalidIri(String),

    #[error("feed JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RDF parse error: {0}")]
    Parse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
