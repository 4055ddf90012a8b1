use oxrdf::NamedNode;

use crate::error::{Result, SammError};
use crate::model::element::{ElementData, ElementId, NamedElement};
use crate::model::ontology::standard;
use crate::sync::{ElementVisitor, VisitContext};

/// `:instance a :Entity ; :property value .`
///
/// The instance is typed with its entity; every assertion is written with the
/// asserted property as predicate.
pub struct EntityInstanceVisitor;

impl ElementVisitor for EntityInstanceVisitor {
    fn visit(&self, id: ElementId, element: &NamedElement, cx: &mut VisitContext<'_>) -> Result<()> {
        let ElementData::EntityInstance(instance) = &element.data else {
            return Ok(());
        };
        let subject = cx.node(id)?;
        if let Some(entity) = instance.entity {
            let rdf_type = NamedNode::new_unchecked(standard::RDF_TYPE);
            cx.emit_ref(&subject, &rdf_type, entity)?;
        }
        for (property, value) in &instance.assertions {
            let predicate = property_iri(cx, *property)?;
            let object = cx.instance_value(value)?;
            cx.emit(&subject, &predicate, object);
        }
        Ok(())
    }
}

fn property_iri(cx: &VisitContext<'_>, id: ElementId) -> Result<NamedNode> {
    let property = cx.graph.get(id).ok_or(SammError::UnknownElement(id.index()))?;
    match property.urn() {
        Some(urn) => Ok(NamedNode::new(urn)?),
        None => Err(SammError::UnnamedElement(property.name.clone())),
    }
}
