use oxrdf::NamedNode;

use crate::error::Result;
use crate::model::element::{ElementData, ElementId, NamedElement};
use crate::model::ontology::samm;
use crate::sync::{ElementVisitor, VisitContext};

/// Units defined in the model itself; units from the SAMM catalogue are predefined
/// and never reach a visitor.
pub struct UnitVisitor;

impl ElementVisitor for UnitVisitor {
    fn visit(&self, id: ElementId, element: &NamedElement, cx: &mut VisitContext<'_>) -> Result<()> {
        let ElementData::Unit(unit) = &element.data else {
            return Ok(());
        };
        let subject = cx.node(id)?;
        cx.write_base(&subject, element, cx.samm(samm::UNIT))?;

        if let Some(symbol) = &unit.symbol {
            let predicate = cx.samm(samm::SYMBOL);
            cx.emit_string(&subject, &predicate, symbol);
        }
        if let Some(code) = &unit.common_code {
            let predicate = cx.samm(samm::COMMON_CODE);
            cx.emit_string(&subject, &predicate, code);
        }
        let predicate = cx.samm(samm::REFERENCE_UNIT);
        cx.emit_opt_ref(&subject, &predicate, unit.reference_unit)?;
        if let Some(factor) = &unit.conversion_factor {
            let predicate = cx.samm(samm::CONVERSION_FACTOR);
            cx.emit_string(&subject, &predicate, factor);
        }
        let predicate = cx.samm(samm::QUANTITY_KIND_PRED);
        for kind in &unit.quantity_kinds {
            let kind = NamedNode::new(kind.as_str())?;
            cx.emit(&subject, &predicate, kind);
        }
        Ok(())
    }
}
