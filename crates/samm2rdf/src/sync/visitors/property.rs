use crate::error::Result;
use crate::model::element::{ElementData, ElementId, NamedElement};
use crate::model::ontology::samm;
use crate::sync::{ElementVisitor, VisitContext};

/// Properties and abstract properties.
pub struct PropertyVisitor;

impl ElementVisitor for PropertyVisitor {
    fn visit(&self, id: ElementId, element: &NamedElement, cx: &mut VisitContext<'_>) -> Result<()> {
        let ElementData::Property(property) = &element.data else {
            return Ok(());
        };
        let subject = cx.node(id)?;
        let class = if property.is_abstract {
            samm::ABSTRACT_PROPERTY
        } else {
            samm::PROPERTY
        };
        cx.write_base(&subject, element, cx.samm(class))?;

        let predicate = cx.samm(samm::CHARACTERISTIC_PRED);
        cx.emit_opt_ref(&subject, &predicate, property.characteristic)?;
        if let Some(example) = &property.example_value {
            let predicate = cx.samm(samm::EXAMPLE_VALUE);
            cx.emit(&subject, &predicate, example.clone());
        }
        let predicate = cx.samm(samm::EXTENDS);
        cx.emit_opt_ref(&subject, &predicate, property.extends)
    }
}
