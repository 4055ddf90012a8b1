//! RDF to domain model direction.
//!
//! [`instantiate_file`] reads the store of one loaded file and creates an element
//! for every typed SAMM subject in it. Elements are memoised through the file's
//! [`CachedFile`], so shared and cyclic references resolve to one element.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use oxrdf::{BlankNode, Literal, NamedNode, NamedOrBlankNode, Term};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Result, SammError};
use crate::model::element::{
    AspectData, BoundDefinition, CharacteristicData, CharacteristicVariant, ConstraintVariant,
    DataType, ElementData, ElementId, EntityData, EntityInstanceData, EventData, InstanceValue,
    NamedElement, OperationData, OverwrittenProperty, PropertyData, PropertyOverrides,
    StructuredElement, UnitData,
};
use crate::model::graph::ElementGraph;
use crate::model::ontology::{samm, samm_c, standard, SammVocabulary};
use crate::registry::{CachedFile, LoadedFilesService};
use crate::store::RdfModel;

/// Longest `rdf:rest` chain followed before a list is considered malformed.
const MAX_LIST_LENGTH: usize = 100_000;

/// Outcome of instantiating one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstantiationReport {
    /// Elements created for this file, predefined ones included.
    pub elements: usize,
    /// Referenced URNs that no loaded file defines.
    pub dangling: Vec<String>,
}

/// Build the elements of the file registered under `absolute_name`.
///
/// References to elements of other loaded files resolve to the elements those
/// files already hold, so instantiate shared files first.
pub fn instantiate_file(
    graph: &mut ElementGraph,
    registry: &mut LoadedFilesService,
    absolute_name: &str,
) -> Result<InstantiationReport> {
    let file = registry
        .get_file_mut(absolute_name)
        .ok_or_else(|| SammError::FileNotLoaded(absolute_name.to_string()))?;
    let model = file.rdf_model.take().ok_or(SammError::EmptyModel)?;
    let cache = std::mem::take(&mut file.cached_file);

    let mut instantiator = Instantiator::new(graph, registry, &model, cache);
    instantiator.run();
    let (cache, aspect, report) = instantiator.finish();

    if let Some(file) = registry.get_file_mut(absolute_name) {
        file.rdf_model = Some(model);
        file.cached_file = cache;
        if file.aspect.is_none() {
            file.aspect = aspect;
        }
        file.derive_name(graph);
    }
    if !report.dangling.is_empty() {
        warn!(
            "{absolute_name} references {} undefined elements",
            report.dangling.len()
        );
    }
    info!("Instantiated {} elements from {absolute_name}", report.elements);
    Ok(report)
}

struct Instantiator<'a> {
    graph: &'a mut ElementGraph,
    registry: &'a LoadedFilesService,
    model: &'a RdfModel,
    vocab: SammVocabulary,
    rdf_type: NamedNode,
    cache: CachedFile,
    anonymous: HashMap<String, ElementId>,
    predefined: HashMap<String, ElementId>,
    dangling: BTreeSet<String>,
    created: usize,
    aspect: Option<ElementId>,
}

impl<'a> Instantiator<'a> {
    fn new(
        graph: &'a mut ElementGraph,
        registry: &'a LoadedFilesService,
        model: &'a RdfModel,
        cache: CachedFile,
    ) -> Self {
        let predefined = graph
            .iter()
            .filter(|(_, element)| element.is_predefined)
            .filter_map(|(id, element)| element.urn().map(|urn| (urn.to_string(), id)))
            .collect();
        Self {
            graph,
            registry,
            model,
            vocab: model.samm().clone(),
            rdf_type: NamedNode::new_unchecked(standard::RDF_TYPE),
            cache,
            anonymous: HashMap::new(),
            predefined,
            dangling: BTreeSet::new(),
            created: 0,
            aspect: None,
        }
    }

    fn finish(self) -> (CachedFile, Option<ElementId>, InstantiationReport) {
        let report = InstantiationReport {
            elements: self.created,
            dangling: self.dangling.into_iter().collect(),
        };
        (self.cache, self.aspect, report)
    }

    /// Instantiate every typed named subject of the store.
    fn run(&mut self) {
        let model = self.model;
        let subjects: Vec<NamedNode> = model
            .store()
            .subjects()
            .into_iter()
            .filter_map(|subject| match subject {
                NamedOrBlankNode::NamedNode(node) => Some(node.clone()),
                _ => None,
            })
            .collect();
        for subject in subjects {
            let typed = model.store().object(&subject.clone().into(), &self.rdf_type).is_some();
            if typed && !SammVocabulary::is_predefined_iri(subject.as_str()) {
                self.named(&subject);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Reference resolution
    // -----------------------------------------------------------------------

    fn reference(&mut self, term: &Term) -> Option<ElementId> {
        match term {
            Term::NamedNode(node) => self.named(node),
            Term::BlankNode(blank) => {
                if let Some(id) = self.anonymous.get(blank.as_str()) {
                    return Some(*id);
                }
                let subject: NamedOrBlankNode = blank.clone().into();
                let class = self.type_of(&subject)?;
                let id = self.create(&subject, None, &class)?;
                self.anonymous.insert(blank.as_str().to_string(), id);
                self.fill(id, &subject, &class);
                Some(id)
            }
            _ => None,
        }
    }

    fn named(&mut self, node: &NamedNode) -> Option<ElementId> {
        let urn = node.as_str();
        if let Some(id) = self.cache.get_element(urn) {
            return Some(id);
        }
        let subject: NamedOrBlankNode = node.clone().into();
        if let Some(class) = self.type_of(&subject) {
            if let Some(id) = self.create(&subject, Some(urn), &class) {
                self.cache.resolve_cached_element(urn, id);
                self.fill(id, &subject, &class);
                return Some(id);
            }
        }
        if SammVocabulary::is_predefined_iri(urn) {
            return self.predefined_element(urn);
        }
        if let Some(id) = self
            .registry
            .files_as_list()
            .iter()
            .find_map(|file| file.cached_file.get_element(urn))
        {
            return Some(id);
        }
        self.dangling.insert(urn.to_string());
        None
    }

    /// Built-in vocabulary terms are shared by every file.
    fn predefined_element(&mut self, urn: &str) -> Option<ElementId> {
        if let Some(id) = self.predefined.get(urn) {
            return Some(*id);
        }
        let data = if urn.starts_with(self.vocab.samm_c_ns()) {
            ElementData::Characteristic(CharacteristicData::default())
        } else if urn.starts_with(self.vocab.unit_ns()) {
            ElementData::Unit(UnitData::default())
        } else if urn.starts_with(self.vocab.samm_e_ns()) {
            ElementData::Entity(EntityData::default())
        } else {
            return None;
        };
        let mut element = NamedElement::predefined(urn, data);
        element.meta_model_version = self.vocab.version().to_string();
        let id = self.graph.add(element);
        self.predefined.insert(urn.to_string(), id);
        self.created += 1;
        Some(id)
    }

    fn type_of(&self, subject: &NamedOrBlankNode) -> Option<NamedNode> {
        match self.model.store().object(subject, &self.rdf_type)? {
            Term::NamedNode(node) => Some(node.clone()),
            _ => None,
        }
    }

    // -----------------------------------------------------------------------
    // Element construction
    // -----------------------------------------------------------------------

    /// Add a skeleton element for `class`, to be filled by [`Self::fill`] once it
    /// is registered (so references back to it resolve).
    fn create(&mut self, subject: &NamedOrBlankNode, urn: Option<&str>, class: &NamedNode) -> Option<ElementId> {
        let data = match self.skeleton(class) {
            Some(data) => data,
            None => {
                // Not a SAMM class: an instance of an entity.
                if let NamedOrBlankNode::NamedNode(node) = subject {
                    if node == class {
                        return None;
                    }
                }
                let entity = self.named(class)?;
                let is_entity = self
                    .graph
                    .get(entity)
                    .is_some_and(|e| matches!(e.data, ElementData::Entity(_)));
                if !is_entity {
                    return None;
                }
                ElementData::EntityInstance(EntityInstanceData {
                    entity: Some(entity),
                    assertions: Vec::new(),
                })
            }
        };
        let is_aspect = matches!(data, ElementData::Aspect(_));
        let mut element = match urn {
            Some(urn) => NamedElement::with_urn(urn, data),
            None => NamedElement::new(data),
        };
        element.meta_model_version = self.vocab.version().to_string();
        let id = self.graph.add(element);
        self.created += 1;
        if is_aspect && self.aspect.is_none() {
            self.aspect = Some(id);
        }
        debug!("Instantiated {}", urn.unwrap_or("anonymous element"));
        Some(id)
    }

    fn skeleton(&self, class: &NamedNode) -> Option<ElementData> {
        let iri = class.as_str();
        if let Some(local) = iri.strip_prefix(self.vocab.samm_ns()) {
            return Some(match local {
                samm::ASPECT => ElementData::Aspect(AspectData::default()),
                samm::PROPERTY | samm::ABSTRACT_PROPERTY => {
                    ElementData::Property(PropertyData::default())
                }
                samm::OPERATION => ElementData::Operation(OperationData::default()),
                samm::EVENT => ElementData::Event(EventData::default()),
                samm::CHARACTERISTIC => ElementData::Characteristic(CharacteristicData::default()),
                samm::CONSTRAINT => ElementData::Constraint(ConstraintVariant::Plain),
                samm::ENTITY | samm::ABSTRACT_ENTITY => ElementData::Entity(EntityData::default()),
                samm::UNIT => ElementData::Unit(UnitData::default()),
                _ => return None,
            });
        }
        let local = iri.strip_prefix(self.vocab.samm_c_ns())?;
        let characteristic = |variant| {
            ElementData::Characteristic(CharacteristicData {
                variant,
                data_type: None,
            })
        };
        Some(match local {
            samm_c::TRAIT => characteristic(CharacteristicVariant::Trait {
                base: None,
                constraints: Vec::new(),
            }),
            samm_c::QUANTIFIABLE => characteristic(CharacteristicVariant::Quantifiable { unit: None }),
            samm_c::MEASUREMENT => characteristic(CharacteristicVariant::Measurement { unit: None }),
            samm_c::DURATION => characteristic(CharacteristicVariant::Duration { unit: None }),
            samm_c::ENUMERATION => characteristic(CharacteristicVariant::Enumeration { values: Vec::new() }),
            samm_c::STATE => characteristic(CharacteristicVariant::State {
                values: Vec::new(),
                default_value: None,
            }),
            samm_c::COLLECTION => characteristic(CharacteristicVariant::Collection {
                element_characteristic: None,
            }),
            samm_c::LIST => characteristic(CharacteristicVariant::List {
                element_characteristic: None,
            }),
            samm_c::SET => characteristic(CharacteristicVariant::Set {
                element_characteristic: None,
            }),
            samm_c::SORTED_SET => characteristic(CharacteristicVariant::SortedSet {
                element_characteristic: None,
            }),
            samm_c::TIME_SERIES => characteristic(CharacteristicVariant::TimeSeries {
                element_characteristic: None,
            }),
            samm_c::CODE => characteristic(CharacteristicVariant::Code),
            samm_c::EITHER => characteristic(CharacteristicVariant::Either {
                left: None,
                right: None,
            }),
            samm_c::SINGLE_ENTITY => characteristic(CharacteristicVariant::SingleEntity),
            samm_c::STRUCTURED_VALUE => characteristic(CharacteristicVariant::StructuredValue {
                deconstruction_rule: String::new(),
                elements: Vec::new(),
            }),
            samm_c::RANGE_CONSTRAINT => ElementData::Constraint(ConstraintVariant::Range {
                min_value: None,
                max_value: None,
                lower_bound: None,
                upper_bound: None,
            }),
            samm_c::LENGTH_CONSTRAINT => ElementData::Constraint(ConstraintVariant::Length {
                min_value: None,
                max_value: None,
            }),
            samm_c::REGULAR_EXPRESSION_CONSTRAINT => {
                ElementData::Constraint(ConstraintVariant::RegularExpression {
                    pattern: String::new(),
                })
            }
            samm_c::ENCODING_CONSTRAINT => ElementData::Constraint(ConstraintVariant::Encoding {
                encoding: String::new(),
            }),
            samm_c::LANGUAGE_CONSTRAINT => ElementData::Constraint(ConstraintVariant::Language {
                language_code: String::new(),
            }),
            samm_c::LOCALE_CONSTRAINT => ElementData::Constraint(ConstraintVariant::Locale {
                locale_code: String::new(),
            }),
            samm_c::FIXED_POINT_CONSTRAINT => ElementData::Constraint(ConstraintVariant::FixedPoint {
                integer: 0,
                scale: 0,
            }),
            _ => return None,
        })
    }

    /// Read the element's attributes from the store and store them on `id`.
    fn fill(&mut self, id: ElementId, subject: &NamedOrBlankNode, class: &NamedNode) {
        let Some(skeleton) = self.graph.get(id).map(|e| e.data.clone()) else {
            return;
        };
        let data = match skeleton {
            ElementData::Aspect(_) => ElementData::Aspect(AspectData {
                properties: self.property_list(subject, samm::PROPERTIES),
                operations: self.reference_list(subject, samm::OPERATIONS),
                events: self.reference_list(subject, samm::EVENTS),
            }),
            ElementData::Property(_) => ElementData::Property(PropertyData {
                characteristic: self.reference_of(subject, &self.vocab.samm(samm::CHARACTERISTIC_PRED)),
                example_value: self.literal_of(subject, &self.vocab.samm(samm::EXAMPLE_VALUE)),
                extends: self.reference_of(subject, &self.vocab.samm(samm::EXTENDS)),
                is_abstract: class.as_str().ends_with(samm::ABSTRACT_PROPERTY),
            }),
            ElementData::Operation(_) => ElementData::Operation(OperationData {
                input: self.property_list(subject, samm::INPUT),
                output: self
                    .object_of(subject, &self.vocab.samm(samm::OUTPUT))
                    .and_then(|output| self.property_entry(&output)),
            }),
            ElementData::Event(_) => ElementData::Event(EventData {
                parameters: self.property_list(subject, samm::PARAMETERS),
            }),
            ElementData::Characteristic(characteristic) => {
                ElementData::Characteristic(self.characteristic(subject, characteristic.variant))
            }
            ElementData::Constraint(constraint) => {
                ElementData::Constraint(self.constraint(subject, constraint))
            }
            ElementData::Entity(_) => ElementData::Entity(EntityData {
                properties: self.property_list(subject, samm::PROPERTIES),
                extends: self.reference_of(subject, &self.vocab.samm(samm::EXTENDS)),
                is_abstract: class.as_str().ends_with(samm::ABSTRACT_ENTITY),
            }),
            ElementData::EntityInstance(instance) => {
                ElementData::EntityInstance(self.entity_instance(subject, instance))
            }
            ElementData::Unit(_) => ElementData::Unit(self.unit(subject)),
        };

        let preferred_names = self.lang_strings(subject, samm::PREFERRED_NAME);
        let descriptions = self.lang_strings(subject, samm::DESCRIPTION);
        let see_pred = self.vocab.samm(samm::SEE);
        let see: Vec<String> = self
            .model
            .store()
            .objects(subject, &see_pred)
            .filter_map(|term| match term {
                Term::NamedNode(node) => Some(node.as_str().to_string()),
                _ => None,
            })
            .collect();

        if let Some(element) = self.graph.get_mut(id) {
            element.data = data;
            element.preferred_names = preferred_names;
            element.descriptions = descriptions;
            element.see = see;
        }
    }

    fn characteristic(&mut self, subject: &NamedOrBlankNode, variant: CharacteristicVariant) -> CharacteristicData {
        let data_type = self
            .object_of(subject, &self.vocab.samm(samm::DATA_TYPE))
            .and_then(|term| match &term {
                Term::NamedNode(node)
                    if node.as_str().starts_with(standard::XSD)
                        || node.as_str().starts_with(standard::RDF) =>
                {
                    Some(DataType::Xsd(node.as_str().to_string()))
                }
                _ => self.reference(&term).map(DataType::Entity),
            });
        let predicate = |local: &str| self.vocab.samm_c(local);
        let base_pred = predicate(samm_c::BASE_CHARACTERISTIC);
        let constraint_pred = predicate(samm_c::CONSTRAINT);
        let unit_pred = predicate(samm_c::UNIT);
        let values_pred = predicate(samm_c::VALUES);
        let default_pred = predicate(samm_c::DEFAULT_VALUE);
        let element_pred = predicate(samm_c::ELEMENT_CHARACTERISTIC);
        let left_pred = predicate(samm_c::LEFT);
        let right_pred = predicate(samm_c::RIGHT);
        let rule_pred = predicate(samm_c::DECONSTRUCTION_RULE);
        let elements_pred = predicate(samm_c::ELEMENTS);

        let variant = match variant {
            CharacteristicVariant::Trait { .. } => {
                let constraints: Vec<Term> = self
                    .model
                    .store()
                    .objects(subject, &constraint_pred)
                    .cloned()
                    .collect();
                CharacteristicVariant::Trait {
                    base: self.reference_of(subject, &base_pred),
                    constraints: constraints.iter().filter_map(|t| self.reference(t)).collect(),
                }
            }
            CharacteristicVariant::Quantifiable { .. } => CharacteristicVariant::Quantifiable {
                unit: self.reference_of(subject, &unit_pred),
            },
            CharacteristicVariant::Measurement { .. } => CharacteristicVariant::Measurement {
                unit: self.reference_of(subject, &unit_pred),
            },
            CharacteristicVariant::Duration { .. } => CharacteristicVariant::Duration {
                unit: self.reference_of(subject, &unit_pred),
            },
            CharacteristicVariant::Enumeration { .. } => CharacteristicVariant::Enumeration {
                values: self.instance_values(subject, &values_pred),
            },
            CharacteristicVariant::State { .. } => CharacteristicVariant::State {
                values: self.instance_values(subject, &values_pred),
                default_value: self
                    .object_of(subject, &default_pred)
                    .and_then(|term| self.instance_value(&term)),
            },
            CharacteristicVariant::Collection { .. } => CharacteristicVariant::Collection {
                element_characteristic: self.reference_of(subject, &element_pred),
            },
            CharacteristicVariant::List { .. } => CharacteristicVariant::List {
                element_characteristic: self.reference_of(subject, &element_pred),
            },
            CharacteristicVariant::Set { .. } => CharacteristicVariant::Set {
                element_characteristic: self.reference_of(subject, &element_pred),
            },
            CharacteristicVariant::SortedSet { .. } => CharacteristicVariant::SortedSet {
                element_characteristic: self.reference_of(subject, &element_pred),
            },
            CharacteristicVariant::TimeSeries { .. } => CharacteristicVariant::TimeSeries {
                element_characteristic: self.reference_of(subject, &element_pred),
            },
            CharacteristicVariant::Either { .. } => CharacteristicVariant::Either {
                left: self.reference_of(subject, &left_pred),
                right: self.reference_of(subject, &right_pred),
            },
            CharacteristicVariant::StructuredValue { .. } => {
                let items = self
                    .object_of(subject, &elements_pred)
                    .map(|head| self.list(&head))
                    .unwrap_or_default();
                let mut elements = Vec::with_capacity(items.len());
                for item in items {
                    match &item {
                        Term::Literal(literal) => {
                            elements.push(StructuredElement::Separator(literal.value().to_string()))
                        }
                        _ => {
                            if let Some(property) = self.reference(&item) {
                                elements.push(StructuredElement::Property(property));
                            }
                        }
                    }
                }
                CharacteristicVariant::StructuredValue {
                    deconstruction_rule: self
                        .literal_of(subject, &rule_pred)
                        .map(|l| l.value().to_string())
                        .unwrap_or_default(),
                    elements,
                }
            }
            other => other,
        };
        CharacteristicData { variant, data_type }
    }

    fn constraint(&self, subject: &NamedOrBlankNode, skeleton: ConstraintVariant) -> ConstraintVariant {
        let predicate = |local: &str| self.vocab.samm_c(local);
        let min_pred = predicate(samm_c::MIN_VALUE);
        let max_pred = predicate(samm_c::MAX_VALUE);
        let value_pred = self.vocab.samm(samm::VALUE);
        match skeleton {
            ConstraintVariant::Range { .. } => ConstraintVariant::Range {
                min_value: self.literal_of(subject, &min_pred),
                max_value: self.literal_of(subject, &max_pred),
                lower_bound: self.bound_of(subject, samm_c::LOWER_BOUND_DEFINITION),
                upper_bound: self.bound_of(subject, samm_c::UPPER_BOUND_DEFINITION),
            },
            ConstraintVariant::Length { .. } => ConstraintVariant::Length {
                min_value: self.literal_of(subject, &min_pred).and_then(|l| l.value().parse().ok()),
                max_value: self.literal_of(subject, &max_pred).and_then(|l| l.value().parse().ok()),
            },
            ConstraintVariant::RegularExpression { .. } => ConstraintVariant::RegularExpression {
                pattern: self.string_of(subject, &value_pred),
            },
            ConstraintVariant::Encoding { .. } => ConstraintVariant::Encoding {
                encoding: match self.object_of(subject, &value_pred) {
                    Some(Term::NamedNode(node)) => node.as_str().to_string(),
                    _ => String::new(),
                },
            },
            ConstraintVariant::Language { .. } => ConstraintVariant::Language {
                language_code: self.string_of(subject, &predicate(samm_c::LANGUAGE_CODE)),
            },
            ConstraintVariant::Locale { .. } => ConstraintVariant::Locale {
                locale_code: self.string_of(subject, &predicate(samm_c::LOCALE_CODE)),
            },
            ConstraintVariant::FixedPoint { .. } => ConstraintVariant::FixedPoint {
                integer: self
                    .literal_of(subject, &predicate(samm_c::INTEGER))
                    .and_then(|l| l.value().parse().ok())
                    .unwrap_or(0),
                scale: self
                    .literal_of(subject, &predicate(samm_c::SCALE))
                    .and_then(|l| l.value().parse().ok())
                    .unwrap_or(0),
            },
            ConstraintVariant::Plain => ConstraintVariant::Plain,
        }
    }

    fn entity_instance(&mut self, subject: &NamedOrBlankNode, skeleton: EntityInstanceData) -> EntityInstanceData {
        let assertions: Vec<(NamedNode, Term)> = self
            .model
            .store()
            .triples_matching(Some(subject), None, None)
            .filter(|t| t.predicate != self.rdf_type)
            .map(|t| (t.predicate.clone(), t.object.clone()))
            .collect();
        let mut instance = skeleton;
        for (predicate, object) in assertions {
            let Some(property) = self.named(&predicate) else {
                continue;
            };
            if let Some(value) = self.instance_value(&object) {
                instance.assertions.push((property, value));
            }
        }
        instance
    }

    fn unit(&mut self, subject: &NamedOrBlankNode) -> UnitData {
        let string = |this: &Self, local: &str| {
            this.literal_of(subject, &this.vocab.samm(local))
                .map(|l| l.value().to_string())
        };
        let quantity_pred = self.vocab.samm(samm::QUANTITY_KIND_PRED);
        UnitData {
            symbol: string(self, samm::SYMBOL),
            common_code: string(self, samm::COMMON_CODE),
            reference_unit: self.reference_of(subject, &self.vocab.samm(samm::REFERENCE_UNIT)),
            conversion_factor: string(self, samm::CONVERSION_FACTOR),
            quantity_kinds: self
                .model
                .store()
                .objects(subject, &quantity_pred)
                .filter_map(|term| match term {
                    Term::NamedNode(node) => Some(node.as_str().to_string()),
                    _ => None,
                })
                .collect(),
        }
    }

    // -----------------------------------------------------------------------
    // Store access helpers
    // -----------------------------------------------------------------------

    fn object_of(&self, subject: &NamedOrBlankNode, predicate: &NamedNode) -> Option<Term> {
        self.model.store().object(subject, predicate).cloned()
    }

    fn literal_of(&self, subject: &NamedOrBlankNode, predicate: &NamedNode) -> Option<Literal> {
        match self.object_of(subject, predicate)? {
            Term::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    fn string_of(&self, subject: &NamedOrBlankNode, predicate: &NamedNode) -> String {
        self.literal_of(subject, predicate)
            .map(|l| l.value().to_string())
            .unwrap_or_default()
    }

    fn bool_of(&self, subject: &NamedOrBlankNode, local: &str) -> bool {
        self.literal_of(subject, &self.vocab.samm(local))
            .is_some_and(|l| l.value() == "true" || l.value() == "1")
    }

    fn bound_of(&self, subject: &NamedOrBlankNode, local: &str) -> Option<BoundDefinition> {
        let term = self.object_of(subject, &self.vocab.samm_c(local))?;
        let Term::NamedNode(node) = term else {
            return None;
        };
        match node.as_str().strip_prefix(self.vocab.samm_c_ns())? {
            samm_c::AT_LEAST => Some(BoundDefinition::AtLeast),
            samm_c::GREATER_THAN => Some(BoundDefinition::GreaterThan),
            samm_c::AT_MOST => Some(BoundDefinition::AtMost),
            samm_c::LESS_THAN => Some(BoundDefinition::LessThan),
            _ => None,
        }
    }

    fn reference_of(&mut self, subject: &NamedOrBlankNode, predicate: &NamedNode) -> Option<ElementId> {
        let term = self.object_of(subject, predicate)?;
        self.reference(&term)
    }

    fn lang_strings(&self, subject: &NamedOrBlankNode, local: &str) -> BTreeMap<String, String> {
        let predicate = self.vocab.samm(local);
        self.model
            .store()
            .objects(subject, &predicate)
            .filter_map(|term| match term {
                Term::Literal(literal) => Some((
                    literal.language().unwrap_or("en").to_string(),
                    literal.value().to_string(),
                )),
                _ => None,
            })
            .collect()
    }

    /// Members of the collection starting at `head`, walked iteratively.
    fn list(&self, head: &Term) -> Vec<Term> {
        let first = NamedNode::new_unchecked(standard::RDF_FIRST);
        let rest = NamedNode::new_unchecked(standard::RDF_REST);
        let mut items = Vec::new();
        let mut seen = HashSet::new();
        let mut current = head.clone();
        while let Term::BlankNode(cell) = &current {
            if !seen.insert(cell.as_str().to_string()) || items.len() >= MAX_LIST_LENGTH {
                break;
            }
            let node: NamedOrBlankNode = cell.clone().into();
            if let Some(item) = self.object_of(&node, &first) {
                items.push(item);
            }
            match self.object_of(&node, &rest) {
                Some(next) => current = next,
                None => break,
            }
        }
        items
    }

    fn reference_list(&mut self, subject: &NamedOrBlankNode, local: &str) -> Vec<ElementId> {
        let items = self
            .object_of(subject, &self.vocab.samm(local))
            .map(|head| self.list(&head))
            .unwrap_or_default();
        items.iter().filter_map(|item| self.reference(item)).collect()
    }

    /// A property list; blank-node entries carry the edge's overrides.
    fn property_list(&mut self, subject: &NamedOrBlankNode, local: &str) -> Vec<OverwrittenProperty> {
        let items = self
            .object_of(subject, &self.vocab.samm(local))
            .map(|head| self.list(&head))
            .unwrap_or_default();
        items
            .iter()
            .filter_map(|item| self.property_entry(item))
            .collect()
    }

    /// `:p` or `[ samm:property :p ; samm:optional true ]`.
    fn property_entry(&mut self, item: &Term) -> Option<OverwrittenProperty> {
        let Term::BlankNode(blank) = item else {
            return self.reference(item).map(OverwrittenProperty::plain);
        };
        let record: NamedOrBlankNode = blank.clone().into();
        let property = self.reference_of(&record, &self.vocab.samm(samm::PROPERTY_PRED))?;
        Some(OverwrittenProperty {
            property,
            overrides: PropertyOverrides {
                optional: self.bool_of(&record, samm::OPTIONAL),
                not_in_payload: self.bool_of(&record, samm::NOT_IN_PAYLOAD),
                payload_name: self
                    .literal_of(&record, &self.vocab.samm(samm::PAYLOAD_NAME))
                    .map(|l| l.value().to_string()),
            },
        })
    }

    fn instance_values(&mut self, subject: &NamedOrBlankNode, predicate: &NamedNode) -> Vec<InstanceValue> {
        let items = self
            .object_of(subject, predicate)
            .map(|head| self.list(&head))
            .unwrap_or_default();
        items.iter().filter_map(|item| self.instance_value(item)).collect()
    }

    fn instance_value(&mut self, term: &Term) -> Option<InstanceValue> {
        match term {
            Term::Literal(literal) => Some(InstanceValue::Literal(literal.clone())),
            Term::NamedNode(node) if node.as_str() == standard::RDF_NIL => {
                Some(InstanceValue::Collection(Vec::new()))
            }
            Term::BlankNode(blank) if self.is_list_cell(blank.as_str()) => {
                let items = self.list(term);
                Some(InstanceValue::Collection(
                    items.iter().filter_map(|item| self.instance_value(item)).collect(),
                ))
            }
            _ => self.reference(term).map(InstanceValue::Instance),
        }
    }

    fn is_list_cell(&self, label: &str) -> bool {
        let node: NamedOrBlankNode = BlankNode::new_unchecked(label).into();
        self.model
            .store()
            .object(&node, &NamedNode::new_unchecked(standard::RDF_FIRST))
            .is_some()
    }
}
