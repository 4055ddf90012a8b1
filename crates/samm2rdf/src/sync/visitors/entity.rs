use crate::error::Result;
use crate::model::element::{ElementData, ElementId, NamedElement};
use crate::model::ontology::samm;
use crate::sync::{ElementVisitor, VisitContext};

/// Entities and abstract entities.
pub struct EntityVisitor;

impl ElementVisitor for EntityVisitor {
    fn visit(&self, id: ElementId, element: &NamedElement, cx: &mut VisitContext<'_>) -> Result<()> {
        let ElementData::Entity(entity) = &element.data else {
            return Ok(());
        };
        let subject = cx.node(id)?;
        let class = if entity.is_abstract {
            samm::ABSTRACT_ENTITY
        } else {
            samm::ENTITY
        };
        cx.write_base(&subject, element, cx.samm(class))?;
        cx.write_property_list(&subject, &cx.samm(samm::PROPERTIES), &entity.properties)?;
        let predicate = cx.samm(samm::EXTENDS);
        cx.emit_opt_ref(&subject, &predicate, entity.extends)
    }
}
