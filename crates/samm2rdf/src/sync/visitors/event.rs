use crate::error::Result;
use crate::model::element::{ElementData, ElementId, NamedElement};
use crate::model::ontology::samm;
use crate::sync::{ElementVisitor, VisitContext};

pub struct EventVisitor;

impl ElementVisitor for EventVisitor {
    fn visit(&self, id: ElementId, element: &NamedElement, cx: &mut VisitContext<'_>) -> Result<()> {
        let ElementData::Event(event) = &element.data else {
            return Ok(());
        };
        let subject = cx.node(id)?;
        cx.write_base(&subject, element, cx.samm(samm::EVENT))?;
        cx.write_property_list(&subject, &cx.samm(samm::PARAMETERS), &event.parameters)
    }
}
