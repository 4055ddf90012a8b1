//! Named elements of an aspect model.
//!
//! Every SAMM construct is a [`NamedElement`]: identity and documentation shared
//! by all kinds, plus an [`ElementData`] record for what is specific to the kind.
//! Elements reference each other by [`ElementId`] into an
//! [`ElementGraph`](super::graph::ElementGraph).

use std::collections::BTreeMap;

use oxrdf::Literal;
use serde::Serialize;

use super::urn::local_name;

/// Index of an element inside its [`ElementGraph`](super::graph::ElementGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ElementId(pub(crate) usize);

impl ElementId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The closed set of element kinds the synchronizer knows how to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ElementKind {
    Aspect,
    Property,
    Operation,
    Event,
    Characteristic,
    Constraint,
    Entity,
    EntityInstance,
    Unit,
}

impl ElementKind {
    pub const ALL: [ElementKind; 9] = [
        ElementKind::Aspect,
        ElementKind::Property,
        ElementKind::Operation,
        ElementKind::Event,
        ElementKind::Characteristic,
        ElementKind::Constraint,
        ElementKind::Entity,
        ElementKind::EntityInstance,
        ElementKind::Unit,
    ];

    /// Base name for freshly created elements of this kind.
    pub fn base_name(self) -> &'static str {
        match self {
            ElementKind::Aspect => "Aspect",
            ElementKind::Property => "property",
            ElementKind::Operation => "Operation",
            ElementKind::Event => "event",
            ElementKind::Characteristic => "Characteristic",
            ElementKind::Constraint => "Constraint",
            ElementKind::Entity => "Entity",
            ElementKind::EntityInstance => "EntityInstance",
            ElementKind::Unit => "Unit",
        }
    }
}

/// Per-edge overrides of a property reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyOverrides {
    pub optional: bool,
    pub not_in_payload: bool,
    pub payload_name: Option<String>,
}

impl PropertyOverrides {
    pub fn is_default(&self) -> bool {
        !self.optional && !self.not_in_payload && self.payload_name.is_none()
    }
}

/// A property referenced from one parent, with overrides local to that edge.
///
/// The same property may be listed by several parents with different overrides;
/// the property element itself never carries them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverwrittenProperty {
    pub property: ElementId,
    pub overrides: PropertyOverrides,
}

impl OverwrittenProperty {
    pub fn plain(property: ElementId) -> Self {
        Self {
            property,
            overrides: PropertyOverrides::default(),
        }
    }

    pub fn optional(property: ElementId) -> Self {
        Self {
            property,
            overrides: PropertyOverrides {
                optional: true,
                ..PropertyOverrides::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AspectData {
    pub properties: Vec<OverwrittenProperty>,
    pub operations: Vec<ElementId>,
    pub events: Vec<ElementId>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyData {
    pub characteristic: Option<ElementId>,
    pub example_value: Option<Literal>,
    pub extends: Option<ElementId>,
    pub is_abstract: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationData {
    pub input: Vec<OverwrittenProperty>,
    pub output: Option<OverwrittenProperty>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventData {
    pub parameters: Vec<OverwrittenProperty>,
}

/// Value of an enumeration entry or an entity instance assertion.
#[derive(Debug, Clone, PartialEq)]
pub enum InstanceValue {
    Literal(Literal),
    Instance(ElementId),
    Collection(Vec<InstanceValue>),
}

impl InstanceValue {
    fn collect_references(&self, out: &mut Vec<ElementId>) {
        match self {
            InstanceValue::Literal(_) => {}
            InstanceValue::Instance(id) => out.push(*id),
            InstanceValue::Collection(values) => {
                for value in values {
                    value.collect_references(out);
                }
            }
        }
    }
}

/// An entry of a structured value's `elements` list.
#[derive(Debug, Clone, PartialEq)]
pub enum StructuredElement {
    Separator(String),
    Property(ElementId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DataType {
    /// An XSD (or RDF) datatype IRI.
    Xsd(String),
    Entity(ElementId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CharacteristicVariant {
    Plain,
    Trait {
        base: Option<ElementId>,
        constraints: Vec<ElementId>,
    },
    Quantifiable {
        unit: Option<ElementId>,
    },
    Measurement {
        unit: Option<ElementId>,
    },
    Duration {
        unit: Option<ElementId>,
    },
    Enumeration {
        values: Vec<InstanceValue>,
    },
    State {
        values: Vec<InstanceValue>,
        default_value: Option<InstanceValue>,
    },
    Collection {
        element_characteristic: Option<ElementId>,
    },
    List {
        element_characteristic: Option<ElementId>,
    },
    Set {
        element_characteristic: Option<ElementId>,
    },
    SortedSet {
        element_characteristic: Option<ElementId>,
    },
    TimeSeries {
        element_characteristic: Option<ElementId>,
    },
    Code,
    Either {
        left: Option<ElementId>,
        right: Option<ElementId>,
    },
    SingleEntity,
    StructuredValue {
        deconstruction_rule: String,
        elements: Vec<StructuredElement>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CharacteristicData {
    pub variant: CharacteristicVariant,
    pub data_type: Option<DataType>,
}

impl Default for CharacteristicData {
    fn default() -> Self {
        Self {
            variant: CharacteristicVariant::Plain,
            data_type: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundDefinition {
    AtLeast,
    GreaterThan,
    AtMost,
    LessThan,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintVariant {
    Plain,
    Range {
        min_value: Option<Literal>,
        max_value: Option<Literal>,
        lower_bound: Option<BoundDefinition>,
        upper_bound: Option<BoundDefinition>,
    },
    Length {
        min_value: Option<u64>,
        max_value: Option<u64>,
    },
    RegularExpression {
        pattern: String,
    },
    /// `encoding` is an IRI such as `samm:UTF-8`.
    Encoding {
        encoding: String,
    },
    Language {
        language_code: String,
    },
    Locale {
        locale_code: String,
    },
    FixedPoint {
        integer: u32,
        scale: u32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityData {
    pub properties: Vec<OverwrittenProperty>,
    pub extends: Option<ElementId>,
    pub is_abstract: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityInstanceData {
    pub entity: Option<ElementId>,
    /// (property, value) pairs in declaration order.
    pub assertions: Vec<(ElementId, InstanceValue)>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitData {
    pub symbol: Option<String>,
    pub common_code: Option<String>,
    pub reference_unit: Option<ElementId>,
    pub conversion_factor: Option<String>,
    /// Quantity kind IRIs.
    pub quantity_kinds: Vec<String>,
}

/// Kind-specific part of a [`NamedElement`].
#[derive(Debug, Clone, PartialEq)]
pub enum ElementData {
    Aspect(AspectData),
    Property(PropertyData),
    Operation(OperationData),
    Event(EventData),
    Characteristic(CharacteristicData),
    Constraint(ConstraintVariant),
    Entity(EntityData),
    EntityInstance(EntityInstanceData),
    Unit(UnitData),
}

impl ElementData {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementData::Aspect(_) => ElementKind::Aspect,
            ElementData::Property(_) => ElementKind::Property,
            ElementData::Operation(_) => ElementKind::Operation,
            ElementData::Event(_) => ElementKind::Event,
            ElementData::Characteristic(_) => ElementKind::Characteristic,
            ElementData::Constraint(_) => ElementKind::Constraint,
            ElementData::Entity(_) => ElementKind::Entity,
            ElementData::EntityInstance(_) => ElementKind::EntityInstance,
            ElementData::Unit(_) => ElementKind::Unit,
        }
    }

    /// Every element referenced by this one, in a stable order.
    pub fn children(&self) -> Vec<ElementId> {
        let mut out = Vec::new();
        match self {
            ElementData::Aspect(aspect) => {
                out.extend(aspect.properties.iter().map(|p| p.property));
                out.extend(aspect.operations.iter().copied());
                out.extend(aspect.events.iter().copied());
            }
            ElementData::Property(property) => {
                out.extend(property.characteristic);
                out.extend(property.extends);
            }
            ElementData::Operation(operation) => {
                out.extend(operation.input.iter().map(|p| p.property));
                out.extend(operation.output.as_ref().map(|p| p.property));
            }
            ElementData::Event(event) => {
                out.extend(event.parameters.iter().map(|p| p.property));
            }
            ElementData::Characteristic(characteristic) => {
                if let Some(DataType::Entity(entity)) = &characteristic.data_type {
                    out.push(*entity);
                }
                characteristic_children(&characteristic.variant, &mut out);
            }
            ElementData::Constraint(_) => {}
            ElementData::Entity(entity) => {
                out.extend(entity.properties.iter().map(|p| p.property));
                out.extend(entity.extends);
            }
            ElementData::EntityInstance(instance) => {
                out.extend(instance.entity);
                for (property, value) in &instance.assertions {
                    out.push(*property);
                    value.collect_references(&mut out);
                }
            }
            ElementData::Unit(unit) => {
                out.extend(unit.reference_unit);
            }
        }
        out
    }
}

fn characteristic_children(variant: &CharacteristicVariant, out: &mut Vec<ElementId>) {
    match variant {
        CharacteristicVariant::Plain
        | CharacteristicVariant::Code
        | CharacteristicVariant::SingleEntity => {}
        CharacteristicVariant::Trait { base, constraints } => {
            out.extend(*base);
            out.extend(constraints.iter().copied());
        }
        CharacteristicVariant::Quantifiable { unit }
        | CharacteristicVariant::Measurement { unit }
        | CharacteristicVariant::Duration { unit } => out.extend(*unit),
        CharacteristicVariant::Enumeration { values } => {
            for value in values {
                value.collect_references(out);
            }
        }
        CharacteristicVariant::State {
            values,
            default_value,
        } => {
            for value in values.iter().chain(default_value) {
                value.collect_references(out);
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
        } => out.extend(*element_characteristic),
        CharacteristicVariant::Either { left, right } => {
            out.extend(*left);
            out.extend(*right);
        }
        CharacteristicVariant::StructuredValue { elements, .. } => {
            out.extend(elements.iter().filter_map(|element| match element {
                StructuredElement::Property(id) => Some(*id),
                StructuredElement::Separator(_) => None,
            }));
        }
    }
}

/// A SAMM model element.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedElement {
    /// `urn:samm:<namespace>:<version>#<name>`; `None` until the element is named.
    pub aspect_model_urn: Option<String>,
    pub name: String,
    pub meta_model_version: String,
    /// Built-in vocabulary term (e.g. `samm-c:Text`); never written to a store.
    pub is_predefined: bool,
    /// Language tag -> text.
    pub preferred_names: BTreeMap<String, String>,
    /// Language tag -> text.
    pub descriptions: BTreeMap<String, String>,
    pub see: Vec<String>,
    pub data: ElementData,
}

impl NamedElement {
    /// A fresh, unnamed element.
    pub fn new(data: ElementData) -> Self {
        Self {
            aspect_model_urn: None,
            name: String::new(),
            meta_model_version: String::new(),
            is_predefined: false,
            preferred_names: BTreeMap::new(),
            descriptions: BTreeMap::new(),
            see: Vec::new(),
            data,
        }
    }

    /// An element that already carries its URN; the name is taken from it.
    pub fn with_urn(urn: &str, data: ElementData) -> Self {
        let mut element = Self::new(data);
        element.set_urn(urn);
        element
    }

    /// A built-in vocabulary element such as `samm-c:Text` or `unit:metre`.
    pub fn predefined(urn: &str, data: ElementData) -> Self {
        let mut element = Self::with_urn(urn, data);
        element.is_predefined = true;
        element
    }

    pub fn kind(&self) -> ElementKind {
        self.data.kind()
    }

    pub fn urn(&self) -> Option<&str> {
        self.aspect_model_urn.as_deref()
    }

    pub fn set_urn(&mut self, urn: &str) {
        if let Some(name) = local_name(urn) {
            self.name = name.to_string();
        }
        self.aspect_model_urn = Some(urn.to_string());
    }

    /// Synthetic nodes the editor creates internally are named `[...]`.
    pub fn is_synthetic(&self) -> bool {
        self.name.starts_with('[') && self.name.ends_with(']')
    }

    pub fn with_preferred_name(mut self, language: &str, text: &str) -> Self {
        self.preferred_names
            .insert(language.to_string(), text.to_string());
        self
    }

    pub fn with_description(mut self, language: &str, text: &str) -> Self {
        self.descriptions
            .insert(language.to_string(), text.to_string());
        self
    }

    pub fn children(&self) -> Vec<ElementId> {
        self.data.children()
    }
}
