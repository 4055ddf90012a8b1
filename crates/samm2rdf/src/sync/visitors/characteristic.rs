use oxrdf::{Literal, NamedNode, Term};

use crate::emitter::TriplesEmitter;
use crate::error::Result;
use crate::model::element::{
    CharacteristicVariant, DataType, ElementData, ElementId, NamedElement, StructuredElement,
};
use crate::model::ontology::{samm, samm_c};
use crate::sync::{ElementVisitor, VisitContext};

/// Every characteristic class, from `samm:Characteristic` to `samm-c:StructuredValue`.
pub struct CharacteristicVisitor;

impl ElementVisitor for CharacteristicVisitor {
    fn visit(&self, id: ElementId, element: &NamedElement, cx: &mut VisitContext<'_>) -> Result<()> {
        let ElementData::Characteristic(characteristic) = &element.data else {
            return Ok(());
        };
        let subject = cx.node(id)?;
        let class = match &characteristic.variant {
            CharacteristicVariant::Plain => cx.samm(samm::CHARACTERISTIC),
            variant => cx.samm_c(class_name(variant)),
        };
        cx.write_base(&subject, element, class)?;

        match &characteristic.data_type {
            Some(DataType::Xsd(iri)) => {
                let predicate = cx.samm(samm::DATA_TYPE);
                cx.emit(&subject, &predicate, NamedNode::new(iri.as_str())?);
            }
            Some(DataType::Entity(entity)) => {
                let predicate = cx.samm(samm::DATA_TYPE);
                cx.emit_ref(&subject, &predicate, *entity)?;
            }
            None => {}
        }

        match &characteristic.variant {
            CharacteristicVariant::Plain
            | CharacteristicVariant::Code
            | CharacteristicVariant::SingleEntity => {}
            CharacteristicVariant::Trait { base, constraints } => {
                let predicate = cx.samm_c(samm_c::BASE_CHARACTERISTIC);
                cx.emit_opt_ref(&subject, &predicate, *base)?;
                let predicate = cx.samm_c(samm_c::CONSTRAINT);
                for constraint in constraints {
                    cx.emit_ref(&subject, &predicate, *constraint)?;
                }
            }
            CharacteristicVariant::Quantifiable { unit }
            | CharacteristicVariant::Measurement { unit }
            | CharacteristicVariant::Duration { unit } => {
                let predicate = cx.samm_c(samm_c::UNIT);
                cx.emit_opt_ref(&subject, &predicate, *unit)?;
            }
            CharacteristicVariant::Enumeration { values } => {
                let items = values
                    .iter()
                    .map(|value| cx.instance_value(value))
                    .collect::<Result<Vec<_>>>()?;
                let predicate = cx.samm_c(samm_c::VALUES);
                cx.model.emit_list(&subject, &predicate, items);
            }
            CharacteristicVariant::State {
                values,
                default_value,
            } => {
                let items = values
                    .iter()
                    .map(|value| cx.instance_value(value))
                    .collect::<Result<Vec<_>>>()?;
                let predicate = cx.samm_c(samm_c::VALUES);
                cx.model.emit_list(&subject, &predicate, items);
                if let Some(default_value) = default_value {
                    let object = cx.instance_value(default_value)?;
                    let predicate = cx.samm_c(samm_c::DEFAULT_VALUE);
                    cx.emit(&subject, &predicate, object);
                }
            }
            CharacteristicVariant::Collection {
                element_characteristic,
            }
            | CharacteristicVariant::List {
                element_characteristic,
            }
            | CharacteristicVariant::Set {
                element_characteristic,
            }
            | CharacteristicVariant::SortedSet {
                element_characteristic,
            }
            | CharacteristicVariant::TimeSeries {
                element_characteristic,
            } => {
                let predicate = cx.samm_c(samm_c::ELEMENT_CHARACTERISTIC);
                cx.emit_opt_ref(&subject, &predicate, *element_characteristic)?;
            }
            CharacteristicVariant::Either { left, right } => {
                let predicate = cx.samm_c(samm_c::LEFT);
                cx.emit_opt_ref(&subject, &predicate, *left)?;
                let predicate = cx.samm_c(samm_c::RIGHT);
                cx.emit_opt_ref(&subject, &predicate, *right)?;
            }
            CharacteristicVariant::StructuredValue {
                deconstruction_rule,
                elements,
            } => {
                let predicate = cx.samm_c(samm_c::DECONSTRUCTION_RULE);
                cx.emit_string(&subject, &predicate, deconstruction_rule);
                let mut items: Vec<Term> = Vec::with_capacity(elements.len());
                for part in elements {
                    items.push(match part {
                        StructuredElement::Separator(text) => Literal::new_simple_literal(text).into(),
                        StructuredElement::Property(property) => cx.term(*property)?,
                    });
                }
                let predicate = cx.samm_c(samm_c::ELEMENTS);
                cx.model.emit_list(&subject, &predicate, items);
            }
        }
        Ok(())
    }
}

fn class_name(variant: &CharacteristicVariant) -> &'static str {
    match variant {
        CharacteristicVariant::Plain => samm::CHARACTERISTIC,
        CharacteristicVariant::Trait { .. } => samm_c::TRAIT,
        CharacteristicVariant::Quantifiable { .. } => samm_c::QUANTIFIABLE,
        CharacteristicVariant::Measurement { .. } => samm_c::MEASUREMENT,
        CharacteristicVariant::Duration { .. } => samm_c::DURATION,
        CharacteristicVariant::Enumeration { .. } => samm_c::ENUMERATION,
        CharacteristicVariant::State { .. } => samm_c::STATE,
        CharacteristicVariant::Collection { .. } => samm_c::COLLECTION,
        CharacteristicVariant::List { .. } => samm_c::LIST,
        CharacteristicVariant::Set { .. } => samm_c::SET,
        CharacteristicVariant::SortedSet { .. } => samm_c::SORTED_SET,
        CharacteristicVariant::TimeSeries { .. } => samm_c::TIME_SERIES,
        CharacteristicVariant::Code => samm_c::CODE,
        CharacteristicVariant::Either { .. } => samm_c::EITHER,
        CharacteristicVariant::SingleEntity => samm_c::SINGLE_ENTITY,
        CharacteristicVariant::StructuredValue { .. } => samm_c::STRUCTURED_VALUE,
    }
}
