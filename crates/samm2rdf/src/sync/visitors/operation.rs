use crate::error::Result;
use crate::model::element::{ElementData, ElementId, NamedElement};
use crate::model::ontology::samm;
use crate::sync::{ElementVisitor, VisitContext};

pub struct OperationVisitor;

impl ElementVisitor for OperationVisitor {
    fn visit(&self, id: ElementId, element: &NamedElement, cx: &mut VisitContext<'_>) -> Result<()> {
        let ElementData::Operation(operation) = &element.data else {
            return Ok(());
        };
        let subject = cx.node(id)?;
        cx.write_base(&subject, element, cx.samm(samm::OPERATION))?;
        cx.write_property_list(&subject, &cx.samm(samm::INPUT), &operation.input)?;
        if let Some(output) = &operation.output {
            let predicate = cx.samm(samm::OUTPUT);
            let object = cx.property_reference(output)?;
            cx.emit(&subject, &predicate, object);
        }
        Ok(())
    }
}
