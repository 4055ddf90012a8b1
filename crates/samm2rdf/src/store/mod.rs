//! In-memory RDF store of one loaded file.
//!
//! [`RdfStore`] keeps triples in insertion order (which is the order the
//! serializer writes them in) and rejects duplicates. [`RdfModel`] wraps a store
//! with the prefix table and SAMM version of the document it represents.

pub mod loader;

use std::collections::{BTreeMap, HashSet};

use oxrdf::{BlankNode, NamedNode, NamedOrBlankNode, Term, Triple};

use crate::model::ontology::{samm, SammVocabulary};
use crate::model::urn::{namespace_key_of, namespace_urn};

/// Ordered, de-duplicated set of triples.
#[derive(Debug, Clone, Default)]
pub struct RdfStore {
    triples: Vec<Triple>,
    index: HashSet<Triple>,
    next_blank: u64,
}

impl RdfStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a triple; returns false if it was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        if self.index.contains(&triple) {
            return false;
        }
        self.index.insert(triple.clone());
        self.triples.push(triple);
        true
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.index.contains(triple)
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Triples matching a pattern; `None` is a wildcard.
    pub fn triples_matching<'a>(
        &'a self,
        subject: Option<&'a NamedOrBlankNode>,
        predicate: Option<&'a NamedNode>,
        object: Option<&'a Term>,
    ) -> impl Iterator<Item = &'a Triple> + 'a {
        self.triples.iter().filter(move |triple| {
            subject.is_none_or(|s| triple.subject == *s)
                && predicate.is_none_or(|p| triple.predicate == *p)
                && object.is_none_or(|o| triple.object == *o)
        })
    }

    /// Remove every triple matching the pattern and return how many were removed.
    pub fn remove_matching(
        &mut self,
        subject: Option<&NamedOrBlankNode>,
        predicate: Option<&NamedNode>,
        object: Option<&Term>,
    ) -> usize {
        let before = self.triples.len();
        self.triples.retain(|triple| {
            !(subject.is_none_or(|s| triple.subject == *s)
                && predicate.is_none_or(|p| triple.predicate == *p)
                && object.is_none_or(|o| triple.object == *o))
        });
        let removed = before - self.triples.len();
        if removed > 0 {
            self.index = self.triples.iter().cloned().collect();
        }
        if self.triples.is_empty() {
            self.next_blank = 0;
        }
        removed
    }

    /// Drop every triple and restart blank node labelling.
    pub fn clear(&mut self) -> usize {
        let removed = self.triples.len();
        self.triples.clear();
        self.index.clear();
        self.next_blank = 0;
        removed
    }

    /// First object of `subject predicate ?o`.
    pub fn object(&self, subject: &NamedOrBlankNode, predicate: &NamedNode) -> Option<&Term> {
        self.triples
            .iter()
            .find(|t| t.subject == *subject && t.predicate == *predicate)
            .map(|t| &t.object)
    }

    /// All objects of `subject predicate ?o`, in insertion order.
    pub fn objects<'a>(
        &'a self,
        subject: &'a NamedOrBlankNode,
        predicate: &'a NamedNode,
    ) -> impl Iterator<Item = &'a Term> + 'a {
        self.triples_matching(Some(subject), Some(predicate), None)
            .map(|t| &t.object)
    }

    /// Distinct subjects in first-seen order.
    pub fn subjects(&self) -> Vec<&NamedOrBlankNode> {
        let mut seen = HashSet::new();
        self.triples
            .iter()
            .map(|t| &t.subject)
            .filter(|subject| seen.insert(*subject))
            .collect()
    }

    /// A blank node with a label unique within this store.
    pub fn fresh_blank_node(&mut self) -> BlankNode {
        loop {
            let candidate = BlankNode::new_unchecked(format!("b{}", self.next_blank));
            self.next_blank += 1;
            let used = self.triples.iter().any(|t| {
                matches!(&t.subject, NamedOrBlankNode::BlankNode(b) if *b == candidate)
                    || matches!(&t.object, Term::BlankNode(b) if *b == candidate)
            });
            if !used {
                return candidate;
            }
        }
    }

    /// Replace every IRI starting with `old_base` by the same IRI under `new_base`.
    pub fn rewrite_iris(&mut self, old_base: &str, new_base: &str) -> usize {
        let rewrite = |node: &NamedNode| -> Option<NamedNode> {
            node.as_str()
                .strip_prefix(old_base)
                .map(|local| NamedNode::new_unchecked(format!("{new_base}{local}")))
        };
        let mut changed = 0;
        let triples = std::mem::take(&mut self.triples);
        for mut triple in triples {
            let mut touched = false;
            if let NamedOrBlankNode::NamedNode(node) = &triple.subject {
                if let Some(renamed) = rewrite(node) {
                    triple.subject = renamed.into();
                    touched = true;
                }
            }
            if let Some(renamed) = rewrite(&triple.predicate) {
                triple.predicate = renamed;
                touched = true;
            }
            if let Term::NamedNode(node) = &triple.object {
                if let Some(renamed) = rewrite(node) {
                    triple.object = renamed.into();
                    touched = true;
                }
            }
            if touched {
                changed += 1;
            }
            self.triples.push(triple);
        }
        self.index = self.triples.iter().cloned().collect();
        changed
    }
}

/// The RDF side of one loaded Turtle document.
#[derive(Debug, Clone)]
pub struct RdfModel {
    store: RdfStore,
    prefixes: BTreeMap<String, String>,
    vocab: SammVocabulary,
    samm_alias: String,
}

impl RdfModel {
    /// An empty model for `namespace_key` (`<namespace>:<version>`), with the
    /// standard SAMM prefixes and the namespace as default prefix.
    pub fn new(namespace_key: &str, samm_version: &str) -> Self {
        let mut model = Self::without_namespace(samm_version);
        model.set_default_namespace(&namespace_urn(namespace_key));
        model
    }

    /// An empty model with the standard prefixes but no default namespace.
    pub fn without_namespace(samm_version: &str) -> Self {
        let vocab = SammVocabulary::new(samm_version);
        let prefixes = vocab.standard_prefixes(samm::PREFIX).into_iter().collect();
        Self {
            store: RdfStore::new(),
            prefixes,
            vocab,
            samm_alias: samm::PREFIX.to_string(),
        }
    }

    /// A model with exactly the given prefixes, as found in a parsed document.
    pub(crate) fn from_parts(
        store: RdfStore,
        prefixes: BTreeMap<String, String>,
        vocab: SammVocabulary,
        samm_alias: String,
    ) -> Self {
        Self {
            store,
            prefixes,
            vocab,
            samm_alias,
        }
    }

    pub fn store(&self) -> &RdfStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut RdfStore {
        &mut self.store
    }

    pub fn samm(&self) -> &SammVocabulary {
        &self.vocab
    }

    pub fn samm_version(&self) -> &str {
        self.vocab.version()
    }

    pub fn samm_alias(&self) -> &str {
        &self.samm_alias
    }

    pub fn set_samm_alias(&mut self, alias: &str) {
        self.samm_alias = alias.to_string();
    }

    pub fn prefixes(&self) -> &BTreeMap<String, String> {
        &self.prefixes
    }

    pub fn add_prefix(&mut self, prefix: &str, iri: &str) {
        self.prefixes.insert(prefix.to_string(), iri.to_string());
    }

    /// IRI bound to the empty prefix, i.e. the document's own namespace.
    pub fn default_namespace(&self) -> Option<&str> {
        self.prefixes.get("").map(String::as_str)
    }

    /// `<namespace>:<version>` of the default prefix, if it is a SAMM URN namespace.
    pub fn namespace_key(&self) -> Option<String> {
        self.default_namespace().and_then(namespace_key_of)
    }

    pub fn set_default_namespace(&mut self, iri: &str) {
        self.prefixes.insert(String::new(), iri.to_string());
    }

    /// Move every IRI (and prefix binding) under `old_iri` to `new_iri`.
    pub fn rewrite_namespace(&mut self, old_iri: &str, new_iri: &str) -> usize {
        for bound in self.prefixes.values_mut() {
            if bound == old_iri {
                *bound = new_iri.to_string();
            }
        }
        self.store.rewrite_iris(old_iri, new_iri)
    }
}
