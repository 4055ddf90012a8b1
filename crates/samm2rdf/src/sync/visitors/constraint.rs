use oxrdf::NamedNode;

use crate::emitter::TriplesEmitter;
use crate::error::Result;
use crate::model::element::{BoundDefinition, ConstraintVariant, ElementData, ElementId, NamedElement};
use crate::model::ontology::{samm, samm_c, standard};
use crate::sync::{ElementVisitor, VisitContext};

pub struct ConstraintVisitor;

impl ElementVisitor for ConstraintVisitor {
    fn visit(&self, id: ElementId, element: &NamedElement, cx: &mut VisitContext<'_>) -> Result<()> {
        let ElementData::Constraint(constraint) = &element.data else {
            return Ok(());
        };
        let subject = cx.node(id)?;
        let class = match constraint {
            ConstraintVariant::Plain => cx.samm(samm::CONSTRAINT),
            ConstraintVariant::Range { .. } => cx.samm_c(samm_c::RANGE_CONSTRAINT),
            ConstraintVariant::Length { .. } => cx.samm_c(samm_c::LENGTH_CONSTRAINT),
            ConstraintVariant::RegularExpression { .. } => {
                cx.samm_c(samm_c::REGULAR_EXPRESSION_CONSTRAINT)
            }
            ConstraintVariant::Encoding { .. } => cx.samm_c(samm_c::ENCODING_CONSTRAINT),
            ConstraintVariant::Language { .. } => cx.samm_c(samm_c::LANGUAGE_CONSTRAINT),
            ConstraintVariant::Locale { .. } => cx.samm_c(samm_c::LOCALE_CONSTRAINT),
            ConstraintVariant::FixedPoint { .. } => cx.samm_c(samm_c::FIXED_POINT_CONSTRAINT),
        };
        cx.write_base(&subject, element, class)?;

        match constraint {
            ConstraintVariant::Plain => {}
            ConstraintVariant::Range {
                min_value,
                max_value,
                lower_bound,
                upper_bound,
            } => {
                if let Some(min) = min_value {
                    let predicate = cx.samm_c(samm_c::MIN_VALUE);
                    cx.emit(&subject, &predicate, min.clone());
                }
                if let Some(max) = max_value {
                    let predicate = cx.samm_c(samm_c::MAX_VALUE);
                    cx.emit(&subject, &predicate, max.clone());
                }
                if let Some(bound) = lower_bound {
                    let predicate = cx.samm_c(samm_c::LOWER_BOUND_DEFINITION);
                    let object = cx.samm_c(bound_name(*bound));
                    cx.emit(&subject, &predicate, object);
                }
                if let Some(bound) = upper_bound {
                    let predicate = cx.samm_c(samm_c::UPPER_BOUND_DEFINITION);
                    let object = cx.samm_c(bound_name(*bound));
                    cx.emit(&subject, &predicate, object);
                }
            }
            ConstraintVariant::Length {
                min_value,
                max_value,
            } => {
                if let Some(min) = min_value {
                    let predicate = cx.samm_c(samm_c::MIN_VALUE);
                    cx.model.emit_typed_literal(
                        &subject,
                        &predicate,
                        &min.to_string(),
                        standard::XSD_NON_NEGATIVE_INTEGER,
                    );
                }
                if let Some(max) = max_value {
                    let predicate = cx.samm_c(samm_c::MAX_VALUE);
                    cx.model.emit_typed_literal(
                        &subject,
                        &predicate,
                        &max.to_string(),
                        standard::XSD_NON_NEGATIVE_INTEGER,
                    );
                }
            }
            ConstraintVariant::RegularExpression { pattern } => {
                let predicate = cx.samm(samm::VALUE);
                cx.emit_string(&subject, &predicate, pattern);
            }
            ConstraintVariant::Encoding { encoding } => {
                let predicate = cx.samm(samm::VALUE);
                cx.emit(&subject, &predicate, NamedNode::new(encoding.as_str())?);
            }
            ConstraintVariant::Language { language_code } => {
                let predicate = cx.samm_c(samm_c::LANGUAGE_CODE);
                cx.emit_string(&subject, &predicate, language_code);
            }
            ConstraintVariant::Locale { locale_code } => {
                let predicate = cx.samm_c(samm_c::LOCALE_CODE);
                cx.emit_string(&subject, &predicate, locale_code);
            }
            ConstraintVariant::FixedPoint { integer, scale } => {
                let predicate = cx.samm_c(samm_c::SCALE);
                cx.model
                    .emit_int(&subject, &predicate, i64::from(*scale), standard::XSD_POSITIVE_INTEGER);
                let predicate = cx.samm_c(samm_c::INTEGER);
                cx.model
                    .emit_int(&subject, &predicate, i64::from(*integer), standard::XSD_POSITIVE_INTEGER);
            }
        }
        Ok(())
    }
}

pub(crate) fn bound_name(bound: BoundDefinition) -> &'static str {
    match bound {
        BoundDefinition::AtLeast => samm_c::AT_LEAST,
        BoundDefinition::GreaterThan => samm_c::GREATER_THAN,
        BoundDefinition::AtMost => samm_c::AT_MOST,
        BoundDefinition::LessThan => samm_c::LESS_THAN,
    }
}
