//! RDF vocabulary constants for SAMM aspect models.
//!
//! - `samm:` prefix (urn:samm:org.eclipse.esmf.samm:meta-model:<version>#) -- meta model classes and predicates
//! - `samm-c:` prefix (urn:samm:org.eclipse.esmf.samm:characteristic:<version>#) -- characteristic and constraint classes
//! - `samm-e:` prefix (urn:samm:org.eclipse.esmf.samm:entity:<version>#) -- shared entities
//! - `unit:` prefix (urn:samm:org.eclipse.esmf.samm:unit:<version>#) -- units and quantity kinds
//!
//! The SAMM namespaces are versioned, so the constants below are local names and
//! [`SammVocabulary`] turns them into full IRIs for one meta model version.

use oxrdf::NamedNode;

/// Meta model version used when a document does not declare one.
pub const DEFAULT_SAMM_VERSION: &str = "2.1.0";

/// Prefix every aspect model URN starts with.
pub const URN_PREFIX: &str = "urn:samm:";

/// Standard RDF/RDFS/XSD namespace URIs
pub mod standard {
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    pub const RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
    pub const RDF_REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
    pub const RDF_NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
    pub const RDF_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
    pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const XSD_POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#positiveInteger";
    pub const XSD_NON_NEGATIVE_INTEGER: &str =
        "http://www.w3.org/2001/XMLSchema#nonNegativeInteger";
}

/// Meta model (`samm:` prefix)
pub mod samm {
    pub const PREFIX: &str = "samm";
    pub const NS_BASE: &str = "urn:samm:org.eclipse.esmf.samm:meta-model:";

    // Classes
    pub const ASPECT: &str = "Aspect";
    pub const PROPERTY: &str = "Property";
    pub const ABSTRACT_PROPERTY: &str = "AbstractProperty";
    pub const OPERATION: &str = "Operation";
    pub const EVENT: &str = "Event";
    pub const CHARACTERISTIC: &str = "Characteristic";
    pub const CONSTRAINT: &str = "Constraint";
    pub const ENTITY: &str = "Entity";
    pub const ABSTRACT_ENTITY: &str = "AbstractEntity";
    pub const UNIT: &str = "Unit";
    pub const QUANTITY_KIND: &str = "QuantityKind";

    // Base attributes
    pub const PREFERRED_NAME: &str = "preferredName";
    pub const DESCRIPTION: &str = "description";
    pub const SEE: &str = "see";

    // Structure
    pub const PROPERTIES: &str = "properties";
    pub const OPERATIONS: &str = "operations";
    pub const EVENTS: &str = "events";
    pub const PARAMETERS: &str = "parameters";
    pub const INPUT: &str = "input";
    pub const OUTPUT: &str = "output";
    pub const CHARACTERISTIC_PRED: &str = "characteristic";
    pub const DATA_TYPE: &str = "dataType";
    pub const EXAMPLE_VALUE: &str = "exampleValue";
    pub const EXTENDS: &str = "extends";
    pub const VALUE: &str = "value";

    // Overwritten property edge
    pub const PROPERTY_PRED: &str = "property";
    pub const OPTIONAL: &str = "optional";
    pub const NOT_IN_PAYLOAD: &str = "notInPayload";
    pub const PAYLOAD_NAME: &str = "payloadName";

    // Units
    pub const SYMBOL: &str = "symbol";
    pub const COMMON_CODE: &str = "commonCode";
    pub const REFERENCE_UNIT: &str = "referenceUnit";
    pub const CONVERSION_FACTOR: &str = "conversionFactor";
    pub const QUANTITY_KIND_PRED: &str = "quantityKind";
}

/// Characteristics and constraints (`samm-c:` prefix)
pub mod samm_c {
    pub const PREFIX: &str = "samm-c";
    pub const NS_BASE: &str = "urn:samm:org.eclipse.esmf.samm:characteristic:";

    // Characteristic classes
    pub const TRAIT: &str = "Trait";
    pub const QUANTIFIABLE: &str = "Quantifiable";
    pub const MEASUREMENT: &str = "Measurement";
    pub const DURATION: &str = "Duration";
    pub const ENUMERATION: &str = "Enumeration";
    pub const STATE: &str = "State";
    pub const COLLECTION: &str = "Collection";
    pub const LIST: &str = "List";
    pub const SET: &str = "Set";
    pub const SORTED_SET: &str = "SortedSet";
    pub const TIME_SERIES: &str = "TimeSeries";
    pub const CODE: &str = "Code";
    pub const EITHER: &str = "Either";
    pub const SINGLE_ENTITY: &str = "SingleEntity";
    pub const STRUCTURED_VALUE: &str = "StructuredValue";

    // Constraint classes
    pub const RANGE_CONSTRAINT: &str = "RangeConstraint";
    pub const LENGTH_CONSTRAINT: &str = "LengthConstraint";
    pub const REGULAR_EXPRESSION_CONSTRAINT: &str = "RegularExpressionConstraint";
    pub const ENCODING_CONSTRAINT: &str = "EncodingConstraint";
    pub const LANGUAGE_CONSTRAINT: &str = "LanguageConstraint";
    pub const LOCALE_CONSTRAINT: &str = "LocaleConstraint";
    pub const FIXED_POINT_CONSTRAINT: &str = "FixedPointConstraint";

    // Predicates
    pub const BASE_CHARACTERISTIC: &str = "baseCharacteristic";
    pub const CONSTRAINT: &str = "constraint";
    pub const UNIT: &str = "unit";
    pub const VALUES: &str = "values";
    pub const DEFAULT_VALUE: &str = "defaultValue";
    pub const ELEMENT_CHARACTERISTIC: &str = "elementCharacteristic";
    pub const LEFT: &str = "left";
    pub const RIGHT: &str = "right";
    pub const DECONSTRUCTION_RULE: &str = "deconstructionRule";
    pub const ELEMENTS: &str = "elements";
    pub const MIN_VALUE: &str = "minValue";
    pub const MAX_VALUE: &str = "maxValue";
    pub const LOWER_BOUND_DEFINITION: &str = "lowerBoundDefinition";
    pub const UPPER_BOUND_DEFINITION: &str = "upperBoundDefinition";
    pub const LANGUAGE_CODE: &str = "languageCode";
    pub const LOCALE_CODE: &str = "localeCode";
    pub const SCALE: &str = "scale";
    pub const INTEGER: &str = "integer";

    // Bound definitions
    pub const AT_LEAST: &str = "AT_LEAST";
    pub const GREATER_THAN: &str = "GREATER_THAN";
    pub const AT_MOST: &str = "AT_MOST";
    pub const LESS_THAN: &str = "LESS_THAN";
}

/// Shared entities (`samm-e:` prefix)
pub mod samm_e {
    pub const PREFIX: &str = "samm-e";
    pub const NS_BASE: &str = "urn:samm:org.eclipse.esmf.samm:entity:";
}

/// Units and quantity kinds (`unit:` prefix)
pub mod unit {
    pub const PREFIX: &str = "unit";
    pub const NS_BASE: &str = "urn:samm:org.eclipse.esmf.samm:unit:";
}

/// The SAMM namespaces of one meta model version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SammVocabulary {
    version: String,
    samm_ns: String,
    samm_c_ns: String,
    samm_e_ns: String,
    unit_ns: String,
}

impl SammVocabulary {
    pub fn new(version: &str) -> Self {
        Self {
            version: version.to_string(),
            samm_ns: format!("{}{version}#", samm::NS_BASE),
            samm_c_ns: format!("{}{version}#", samm_c::NS_BASE),
            samm_e_ns: format!("{}{version}#", samm_e::NS_BASE),
            unit_ns: format!("{}{version}#", unit::NS_BASE),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn samm_ns(&self) -> &str {
        &self.samm_ns
    }

    pub fn samm_c_ns(&self) -> &str {
        &self.samm_c_ns
    }

    pub fn samm_e_ns(&self) -> &str {
        &self.samm_e_ns
    }

    pub fn unit_ns(&self) -> &str {
        &self.unit_ns
    }

    /// `samm:<local>`
    pub fn samm(&self, local: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("{}{local}", self.samm_ns))
    }

    /// `samm-c:<local>`
    pub fn samm_c(&self, local: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("{}{local}", self.samm_c_ns))
    }

    /// `unit:<local>`
    pub fn unit(&self, local: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("{}{local}", self.unit_ns))
    }

    /// Prefixes every SAMM document declares, with `samm_alias` bound to the meta model.
    pub fn standard_prefixes(&self, samm_alias: &str) -> Vec<(String, String)> {
        vec![
            (samm_alias.to_string(), self.samm_ns.clone()),
            (samm_c::PREFIX.to_string(), self.samm_c_ns.clone()),
            (samm_e::PREFIX.to_string(), self.samm_e_ns.clone()),
            (unit::PREFIX.to_string(), self.unit_ns.clone()),
            ("rdf".to_string(), standard::RDF.to_string()),
            ("rdfs".to_string(), standard::RDFS.to_string()),
            ("xsd".to_string(), standard::XSD.to_string()),
        ]
    }

    /// Whether `iri` belongs to one of the built-in SAMM namespaces (any version).
    pub fn is_predefined_iri(iri: &str) -> bool {
        [samm::NS_BASE, samm_c::NS_BASE, samm_e::NS_BASE, unit::NS_BASE]
            .iter()
            .any(|base| iri.starts_with(base))
    }

    /// Whether `predicate` carries example values (rendered in the display language).
    pub fn is_example_value_predicate(&self, predicate: &str) -> bool {
        predicate
            .strip_prefix(self.samm_ns.as_str())
            .is_some_and(|local| local == samm::EXAMPLE_VALUE)
    }

    /// Extract the meta model version from any SAMM namespace IRI.
    pub fn detect_version(iri: &str) -> Option<String> {
        [samm::NS_BASE, samm_c::NS_BASE, samm_e::NS_BASE, unit::NS_BASE]
            .iter()
            .find_map(|base| iri.strip_prefix(base))
            .and_then(|rest| rest.split('#').next())
            .filter(|version| !version.is_empty())
            .map(str::to_string)
    }
}

impl Default for SammVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_SAMM_VERSION)
    }
}
