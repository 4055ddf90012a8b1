use crate::emitter::TriplesEmitter;
use crate::error::Result;
use crate::model::element::{ElementData, ElementId, NamedElement};
use crate::model::ontology::samm;
use crate::sync::{ElementVisitor, VisitContext};

/// `:A a samm:Aspect ; samm:properties ( ... ) ; samm:operations ( ... ) .`
///
/// `samm:events` is only written when the aspect has events.
pub struct AspectVisitor;

impl ElementVisitor for AspectVisitor {
    fn visit(&self, id: ElementId, element: &NamedElement, cx: &mut VisitContext<'_>) -> Result<()> {
        let ElementData::Aspect(aspect) = &element.data else {
            return Ok(());
        };
        let subject = cx.node(id)?;
        cx.write_base(&subject, element, cx.samm(samm::ASPECT))?;
        cx.write_property_list(&subject, &cx.samm(samm::PROPERTIES), &aspect.properties)?;

        let mut operations = Vec::with_capacity(aspect.operations.len());
        for operation in &aspect.operations {
            operations.push(cx.term(*operation)?);
        }
        let predicate = cx.samm(samm::OPERATIONS);
        cx.model.emit_list(&subject, &predicate, operations);

        if !aspect.events.is_empty() {
            let mut events = Vec::with_capacity(aspect.events.len());
            for event in &aspect.events {
                events.push(cx.term(*event)?);
            }
            let predicate = cx.samm(samm::EVENTS);
            cx.model.emit_list(&subject, &predicate, events);
        }
        Ok(())
    }
}
