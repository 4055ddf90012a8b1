//! Error type shared by every module of the crate.

use crate::model::element::ElementKind;

/// Errors raised while loading, synchronizing, naming or serializing models.
#[derive(Debug, thiserror::Error)]
pub enum SammError {
    #[error("no RDF model is loaded for the current file")]
    EmptyModel,

    #[error("cannot name elements: the current file has no RDF model")]
    NoActiveModel,

    #[error("no file is currently rendered")]
    NoCurrentFile,

    #[error("file '{0}' is not loaded")]
    FileNotLoaded(String),

    #[error("cannot rename '{from}' to '{to}': a file with that name is already loaded")]
    RegistryKeyConflict { from: String, to: String },

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("no visitor registered for {kind:?} element '{urn}'")]
    UnsupportedElement { kind: ElementKind, urn: String },

    #[error("element '{0}' has no aspect model URN")]
    UnnamedElement(String),

    #[error("element {0} does not exist")]
    UnknownElement(usize),

    #[error("invalid aspect model URN '{0}'")]
    InvalidUrn(String),

    #[error("invalid IRI: {0}")]
    Iri(#[from] oxrdf::IriParseError),

    #[error("Turtle parse error: {0}")]
    Turtle(#[from] oxttl::TurtleParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SammError>;
