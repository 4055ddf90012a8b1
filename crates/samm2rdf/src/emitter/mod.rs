pub mod lists;
pub mod turtle;

use oxrdf::{BlankNode, Literal, NamedNode, NamedOrBlankNode, Term, Triple};

use crate::model::ontology::standard;
use crate::store::RdfModel;

/// Write side of an RDF store, used by the element visitors.
pub trait TriplesEmitter {
    /// Emit one triple. Returns false if it was already present.
    fn emit_triple(&mut self, triple: Triple) -> bool;
    /// A blank node that is not yet used in the target.
    fn fresh_blank_node(&mut self) -> BlankNode;
    /// Register a namespace prefix.
    fn add_prefix(&mut self, prefix: &str, iri: &str);
    /// Return the number of triples held so far.
    fn triple_count(&self) -> u64;

    /// Emit a triple with an IRI object.
    fn emit_iri(&mut self, subject: &NamedOrBlankNode, predicate: &NamedNode, object: &NamedNode) {
        self.emit_triple(Triple::new(subject.clone(), predicate.clone(), object.clone()));
    }

    /// Emit a triple with a plain string literal object.
    fn emit_literal(&mut self, subject: &NamedOrBlankNode, predicate: &NamedNode, value: &str) {
        self.emit_triple(Triple::new(
            subject.clone(),
            predicate.clone(),
            Literal::new_simple_literal(value),
        ));
    }

    /// Emit a triple with a language-tagged literal object.
    fn emit_lang_literal(
        &mut self,
        subject: &NamedOrBlankNode,
        predicate: &NamedNode,
        value: &str,
        language: &str,
    ) {
        self.emit_triple(Triple::new(
            subject.clone(),
            predicate.clone(),
            Literal::new_language_tagged_literal_unchecked(value, language.to_ascii_lowercase()),
        ));
    }

    /// Emit a triple with a typed literal object.
    fn emit_typed_literal(
        &mut self,
        subject: &NamedOrBlankNode,
        predicate: &NamedNode,
        value: &str,
        datatype: &str,
    ) {
        self.emit_triple(Triple::new(
            subject.clone(),
            predicate.clone(),
            Literal::new_typed_literal(value, NamedNode::new_unchecked(datatype)),
        ));
    }

    /// Emit a triple with a boolean literal object.
    fn emit_bool(&mut self, subject: &NamedOrBlankNode, predicate: &NamedNode, value: bool) {
        let val = if value { "true" } else { "false" };
        self.emit_typed_literal(subject, predicate, val, standard::XSD_BOOLEAN);
    }

    /// Emit a triple with an integer literal object.
    fn emit_int(&mut self, subject: &NamedOrBlankNode, predicate: &NamedNode, value: i64, datatype: &str) {
        self.emit_typed_literal(subject, predicate, &value.to_string(), datatype);
    }

    /// Emit `subject predicate ( items )` as an `rdf:first`/`rdf:rest` chain.
    /// An empty list is `rdf:nil`. Returns the list head.
    fn emit_list(&mut self, subject: &NamedOrBlankNode, predicate: &NamedNode, items: Vec<Term>) -> Term {
        let head = self.build_list(items);
        self.emit_triple(Triple::new(subject.clone(), predicate.clone(), head.clone()));
        head
    }

    /// Emit the cells of a list nothing links to yet and return its head.
    fn build_list(&mut self, items: Vec<Term>) -> Term {
        let first = NamedNode::new_unchecked(standard::RDF_FIRST);
        let rest = NamedNode::new_unchecked(standard::RDF_REST);
        let nil = NamedNode::new_unchecked(standard::RDF_NIL);

        let cells: Vec<BlankNode> = items.iter().map(|_| self.fresh_blank_node()).collect();
        for (index, (cell, item)) in cells.iter().zip(items).enumerate() {
            self.emit_triple(Triple::new(cell.clone(), first.clone(), item));
            let next: Term = match cells.get(index + 1) {
                Some(next) => next.clone().into(),
                None => nil.clone().into(),
            };
            self.emit_triple(Triple::new(cell.clone(), rest.clone(), next));
        }
        match cells.into_iter().next() {
            Some(cell) => cell.into(),
            None => nil.into(),
        }
    }
}

impl TriplesEmitter for RdfModel {
    fn emit_triple(&mut self, triple: Triple) -> bool {
        self.store_mut().insert(triple)
    }

    fn fresh_blank_node(&mut self) -> BlankNode {
        self.store_mut().fresh_blank_node()
    }

    fn add_prefix(&mut self, prefix: &str, iri: &str) {
        RdfModel::add_prefix(self, prefix, iri);
    }

    fn triple_count(&self) -> u64 {
        self.store().len() as u64
    }
}
