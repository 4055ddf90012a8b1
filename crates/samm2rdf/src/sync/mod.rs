//! Domain model to RDF direction.
//!
//! Every [`ElementKind`] has exactly one [`ElementVisitor`], looked up through a
//! [`VisitorTable`]. A visitor writes the triples of one element into the current
//! file's model via a [`VisitContext`]. The traversal itself lives in
//! [`engine`].

pub mod cleanup;
pub mod engine;
pub mod visitors;

use std::collections::HashMap;

use oxrdf::{BlankNode, Literal, NamedNode, NamedOrBlankNode, Term, Triple};

use crate::emitter::TriplesEmitter;
use crate::error::{Result, SammError};
use crate::model::element::{ElementId, ElementKind, InstanceValue, NamedElement, OverwrittenProperty};
use crate::model::graph::ElementGraph;
use crate::model::ontology::{samm, standard, SammVocabulary};
use crate::store::RdfModel;

pub use cleanup::CleanupVisitor;
pub use engine::{ModelSynchronizer, SyncReport, SyncRequest, SyncScheduler};

/// Writes the triples of one kind of element.
pub trait ElementVisitor {
    fn visit(&self, id: ElementId, element: &NamedElement, cx: &mut VisitContext<'_>) -> Result<()>;
}

/// Maps each element kind to its visitor.
pub struct VisitorTable {
    handlers: HashMap<ElementKind, Box<dyn ElementVisitor>>,
}

impl VisitorTable {
    /// A table without any visitor.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Install `visitor` for `kind`, replacing any previous one.
    pub fn register(&mut self, kind: ElementKind, visitor: Box<dyn ElementVisitor>) {
        self.handlers.insert(kind, visitor);
    }

    pub fn handler(&self, kind: ElementKind) -> Option<&dyn ElementVisitor> {
        self.handlers.get(&kind).map(Box::as_ref)
    }

    /// Fails with [`SammError::UnsupportedElement`] if no visitor handles `element`.
    pub fn ensure_supported(&self, element: &NamedElement) -> Result<()> {
        if self.handlers.contains_key(&element.kind()) {
            Ok(())
        } else {
            Err(SammError::UnsupportedElement {
                kind: element.kind(),
                urn: element.urn().unwrap_or(&element.name).to_string(),
            })
        }
    }

    /// Run the visitor registered for the element's kind.
    pub fn dispatch(&self, id: ElementId, element: &NamedElement, cx: &mut VisitContext<'_>) -> Result<()> {
        self.ensure_supported(element)?;
        match self.handler(element.kind()) {
            Some(visitor) => visitor.visit(id, element, cx),
            None => Ok(()),
        }
    }
}

impl Default for VisitorTable {
    fn default() -> Self {
        use visitors::*;

        let mut table = Self::empty();
        table.register(ElementKind::Aspect, Box::new(AspectVisitor));
        table.register(ElementKind::Property, Box::new(PropertyVisitor));
        table.register(ElementKind::Operation, Box::new(OperationVisitor));
        table.register(ElementKind::Event, Box::new(EventVisitor));
        table.register(ElementKind::Characteristic, Box::new(CharacteristicVisitor));
        table.register(ElementKind::Constraint, Box::new(ConstraintVisitor));
        table.register(ElementKind::Entity, Box::new(EntityVisitor));
        table.register(ElementKind::EntityInstance, Box::new(EntityInstanceVisitor));
        table.register(ElementKind::Unit, Box::new(UnitVisitor));
        table
    }
}

/// What a visitor may touch during a pass: the element graph for lookups and the
/// current file's model for writing.
pub struct VisitContext<'a> {
    pub graph: &'a ElementGraph,
    pub model: &'a mut RdfModel,
    pub vocab: SammVocabulary,
    anonymous: HashMap<ElementId, BlankNode>,
}

impl<'a> VisitContext<'a> {
    pub fn new(graph: &'a ElementGraph, model: &'a mut RdfModel) -> Self {
        let vocab = model.samm().clone();
        Self {
            graph,
            model,
            vocab,
            anonymous: HashMap::new(),
        }
    }

    /// The node standing for element `id`: its URN, or a blank node for
    /// elements without one (the same blank node every time).
    pub fn node(&mut self, id: ElementId) -> Result<NamedOrBlankNode> {
        let element = self
            .graph
            .get(id)
            .ok_or(SammError::UnknownElement(id.index()))?;
        if let Some(urn) = element.urn() {
            return Ok(NamedNode::new(urn)?.into());
        }
        if let Some(blank) = self.anonymous.get(&id) {
            return Ok(blank.clone().into());
        }
        let blank = self.model.fresh_blank_node();
        self.anonymous.insert(id, blank.clone());
        Ok(blank.into())
    }

    pub fn term(&mut self, id: ElementId) -> Result<Term> {
        Ok(self.node(id)?.into())
    }

    pub fn samm(&self, local: &str) -> NamedNode {
        self.vocab.samm(local)
    }

    pub fn samm_c(&self, local: &str) -> NamedNode {
        self.vocab.samm_c(local)
    }

    pub fn emit(&mut self, subject: &NamedOrBlankNode, predicate: &NamedNode, object: impl Into<Term>) {
        self.model
            .emit_triple(Triple::new(subject.clone(), predicate.clone(), object.into()));
    }

    /// `subject predicate <element>`
    pub fn emit_ref(&mut self, subject: &NamedOrBlankNode, predicate: &NamedNode, id: ElementId) -> Result<()> {
        let object = self.term(id)?;
        self.emit(subject, predicate, object);
        Ok(())
    }

    pub fn emit_opt_ref(
        &mut self,
        subject: &NamedOrBlankNode,
        predicate: &NamedNode,
        id: Option<ElementId>,
    ) -> Result<()> {
        match id {
            Some(id) => self.emit_ref(subject, predicate, id),
            None => Ok(()),
        }
    }

    /// Type, preferred names, descriptions and `samm:see` links.
    pub fn write_base(&mut self, subject: &NamedOrBlankNode, element: &NamedElement, class: NamedNode) -> Result<()> {
        self.emit(subject, &NamedNode::new_unchecked(standard::RDF_TYPE), class);

        let preferred_name = self.samm(samm::PREFERRED_NAME);
        for (language, text) in &element.preferred_names {
            self.model.emit_lang_literal(subject, &preferred_name, text, language);
        }
        let description = self.samm(samm::DESCRIPTION);
        for (language, text) in &element.descriptions {
            self.model.emit_lang_literal(subject, &description, text, language);
        }
        let see = self.samm(samm::SEE);
        for link in &element.see {
            let link = NamedNode::new(link.as_str())?;
            self.emit(subject, &see, link);
        }
        Ok(())
    }

    /// A property list: plain references as IRIs, overridden ones as
    /// `[ samm:property :p ; samm:optional true ]` records.
    pub fn write_property_list(
        &mut self,
        subject: &NamedOrBlankNode,
        predicate: &NamedNode,
        properties: &[OverwrittenProperty],
    ) -> Result<()> {
        let mut items = Vec::with_capacity(properties.len());
        for property in properties {
            items.push(self.property_reference(property)?);
        }
        self.model.emit_list(subject, predicate, items);
        Ok(())
    }

    /// `:p` for a plain reference, a `samm:property` record when the edge
    /// overrides anything.
    pub fn property_reference(&mut self, property: &OverwrittenProperty) -> Result<Term> {
        let target = self.term(property.property)?;
        let overrides = &property.overrides;
        if overrides.is_default() {
            return Ok(target);
        }
        let record: NamedOrBlankNode = self.model.fresh_blank_node().into();
        let property_pred = self.samm(samm::PROPERTY_PRED);
        self.emit(&record, &property_pred, target);
        if overrides.optional {
            let optional = self.samm(samm::OPTIONAL);
            self.model.emit_bool(&record, &optional, true);
        }
        if overrides.not_in_payload {
            let not_in_payload = self.samm(samm::NOT_IN_PAYLOAD);
            self.model.emit_bool(&record, &not_in_payload, true);
        }
        if let Some(payload_name) = &overrides.payload_name {
            let predicate = self.samm(samm::PAYLOAD_NAME);
            self.model.emit_literal(&record, &predicate, payload_name);
        }
        Ok(record.into())
    }

    /// Term for an enumeration value or assertion; collections become RDF lists.
    pub fn instance_value(&mut self, value: &InstanceValue) -> Result<Term> {
        match value {
            InstanceValue::Literal(literal) => Ok(literal.clone().into()),
            InstanceValue::Instance(id) => self.term(*id),
            InstanceValue::Collection(values) => {
                let mut items = Vec::with_capacity(values.len());
                for value in values {
                    items.push(self.instance_value(value)?);
                }
                Ok(self.model.build_list(items))
            }
        }
    }

    pub fn emit_string(&mut self, subject: &NamedOrBlankNode, predicate: &NamedNode, value: &str) {
        self.emit(subject, predicate, Literal::new_simple_literal(value));
    }
}
