//! Blank-node structure of a store: which blank nodes are referenced how often,
//! and which of them head a well-formed RDF collection.

use std::collections::{HashMap, HashSet};

use oxrdf::{BlankNode, NamedOrBlankNode, Term, Triple};

use crate::model::ontology::standard;
use crate::store::RdfStore;

/// A resolved `rdf:first`/`rdf:rest` chain.
#[derive(Debug)]
pub struct ResolvedList<'a> {
    /// The list members in order.
    pub items: Vec<&'a Term>,
    /// Positions of the `rdf:first`/`rdf:rest` triples the chain consists of.
    pub cells: Vec<usize>,
}

/// Positional index over the triples of a store, keyed by blank node label.
pub struct BlankNodeIndex<'a> {
    triples: Vec<&'a Triple>,
    outgoing: HashMap<&'a str, Vec<usize>>,
    references: HashMap<&'a str, usize>,
}

impl<'a> BlankNodeIndex<'a> {
    pub fn new(store: &'a RdfStore) -> Self {
        let triples: Vec<&Triple> = store.iter().collect();
        let mut outgoing: HashMap<&str, Vec<usize>> = HashMap::new();
        let mut references: HashMap<&str, usize> = HashMap::new();
        for (position, triple) in triples.iter().enumerate() {
            if let NamedOrBlankNode::BlankNode(blank) = &triple.subject {
                outgoing.entry(blank.as_str()).or_default().push(position);
            }
            if let Term::BlankNode(blank) = &triple.object {
                *references.entry(blank.as_str()).or_default() += 1;
            }
        }
        Self {
            triples,
            outgoing,
            references,
        }
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn triple(&self, position: usize) -> &'a Triple {
        self.triples[position]
    }

    pub fn triples(&self) -> &[&'a Triple] {
        &self.triples
    }

    /// Positions of the triples whose subject is `blank`.
    pub fn outgoing(&self, blank: &BlankNode) -> &[usize] {
        self.outgoing
            .get(blank.as_str())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// How many triples use `blank` as object.
    pub fn reference_count(&self, blank: &BlankNode) -> usize {
        self.references.get(blank.as_str()).copied().unwrap_or(0)
    }

    /// Resolve the collection starting at `head`.
    ///
    /// Walks the chain iteratively. Returns `None` unless every cell is referenced
    /// exactly once, carries exactly one `rdf:first` and one `rdf:rest`, and the
    /// chain ends in `rdf:nil` without revisiting a cell.
    pub fn resolve_list(&self, head: &BlankNode) -> Option<ResolvedList<'a>> {
        let mut items = Vec::new();
        let mut cells = Vec::new();
        let mut seen = HashSet::new();
        let mut current = head.as_str();

        loop {
            if !seen.insert(current) || self.references.get(current).copied() != Some(1) {
                return None;
            }
            let positions = self.outgoing.get(current)?;
            if positions.len() != 2 {
                return None;
            }
            let mut first = None;
            let mut rest = None;
            for &position in positions {
                let triple = self.triples[position];
                match triple.predicate.as_str() {
                    standard::RDF_FIRST => first = Some((position, &triple.object)),
                    standard::RDF_REST => rest = Some((position, &triple.object)),
                    _ => return None,
                }
            }
            let (first_position, item) = first?;
            let (rest_position, next) = rest?;
            items.push(item);
            cells.push(first_position);
            cells.push(rest_position);

            match next {
                Term::NamedNode(node) if node.as_str() == standard::RDF_NIL => {
                    return Some(ResolvedList { items, cells });
                }
                Term::BlankNode(blank) => current = blank.as_str(),
                _ => return None,
            }
        }
    }
}
