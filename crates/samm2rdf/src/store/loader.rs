//! Load Turtle documents into [`RdfModel`]s.

use std::collections::BTreeMap;
use std::path::Path;

use oxrdf::{NamedOrBlankNode, Term};
use oxttl::TurtleParser;
use tracing::{debug, info};

use super::{RdfModel, RdfStore};
use crate::error::Result;
use crate::model::ontology::{samm, SammVocabulary, DEFAULT_SAMM_VERSION};

/// Parse Turtle text. `base_iri` resolves relative IRIs, if the document has any.
pub fn load_turtle(content: &str, base_iri: Option<&str>) -> Result<RdfModel> {
    load_turtle_with_version(content, base_iri, DEFAULT_SAMM_VERSION)
}

/// Like [`load_turtle`], but a document that names no meta model version, such
/// as a new empty one, gets `default_version`.
pub fn load_turtle_with_version(
    content: &str,
    base_iri: Option<&str>,
    default_version: &str,
) -> Result<RdfModel> {
    let mut parser = TurtleParser::new();
    if let Some(base) = base_iri {
        parser = parser.with_base_iri(base)?;
    }
    let mut reader = parser.for_reader(content.as_bytes());

    let mut store = RdfStore::new();
    for triple in reader.by_ref() {
        store.insert(triple?);
    }

    let prefixes: BTreeMap<String, String> = reader
        .prefixes()
        .map(|(prefix, iri)| (prefix.to_string(), iri.to_string()))
        .collect();

    let version = detect_samm_version(&prefixes, &store).unwrap_or_else(|| default_version.to_string());
    let vocab = SammVocabulary::new(&version);
    let samm_alias = prefixes
        .iter()
        .find(|(_, iri)| iri.as_str() == vocab.samm_ns())
        .map(|(prefix, _)| prefix.clone())
        .unwrap_or_else(|| samm::PREFIX.to_string());

    debug!(
        "Parsed {} triples, {} prefixes, SAMM {version}",
        store.len(),
        prefixes.len()
    );

    Ok(RdfModel::from_parts(store, prefixes, vocab, samm_alias))
}

/// Read and parse a Turtle file from disk.
pub fn load_file(path: &Path) -> Result<RdfModel> {
    load_file_with_version(path, DEFAULT_SAMM_VERSION)
}

/// Read and parse a Turtle file; see [`load_turtle_with_version`].
pub fn load_file_with_version(path: &Path, default_version: &str) -> Result<RdfModel> {
    info!("Loading aspect model from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    load_turtle_with_version(&content, None, default_version)
}

/// Meta model version declared by the prefixes, else used anywhere in the data.
fn detect_samm_version(prefixes: &BTreeMap<String, String>, store: &RdfStore) -> Option<String> {
    if let Some(version) = prefixes
        .values()
        .find_map(|iri| SammVocabulary::detect_version(iri))
    {
        return Some(version);
    }
    store
        .iter()
        .find_map(|triple| {
            let subject = match &triple.subject {
                NamedOrBlankNode::NamedNode(node) => SammVocabulary::detect_version(node.as_str()),
                NamedOrBlankNode::BlankNode(_) => None,
            };
            subject
                .or_else(|| SammVocabulary::detect_version(triple.predicate.as_str()))
                .or_else(|| match &triple.object {
                    Term::NamedNode(node) => SammVocabulary::detect_version(node.as_str()),
                    _ => None,
                })
        })
}
