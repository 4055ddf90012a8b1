use std::collections::HashSet;
use std::path::{Path, PathBuf};

use proptest::prelude::*;

use samm2rdf::model::element::{
    AspectData, CharacteristicData, ConstraintVariant, ElementData, ElementId, ElementKind,
    EntityData, EntityInstanceData, EventData, NamedElement, OperationData, PropertyData, UnitData,
};
use samm2rdf::store::loader::load_file;
use samm2rdf::{
    instantiate_file, resolve_element_naming, resolve_meta_model_element, ElementGraph,
    LoadedFilesService, NamespaceFile, SammError,
};

const NS: &str = "com.example:1.0.0";
const NS_IRI: &str = "urn:samm:com.example:1.0.0#";

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// A registry whose current file is an empty `com.example:1.0.0` document.
fn registry_with_current() -> LoadedFilesService {
    let mut registry = LoadedFilesService::new();
    registry.add_file(NamespaceFile::empty(NS, "New.ttl", "2.1.0").rendered(true), false);
    registry
}

/// Same as [`registry_with_current`], plus `SameNamespace.ttl` as an external file.
fn registry_with_neighbour() -> LoadedFilesService {
    let mut registry = registry_with_current();
    let model = load_file(&fixture("SameNamespace.ttl")).unwrap();
    registry.add_file(NamespaceFile::from_model("SameNamespace.ttl", model), false);
    registry
}

fn unnamed(kind: ElementKind) -> NamedElement {
    let data = match kind {
        ElementKind::Aspect => ElementData::Aspect(AspectData::default()),
        ElementKind::Property => ElementData::Property(PropertyData::default()),
        ElementKind::Operation => ElementData::Operation(OperationData::default()),
        ElementKind::Event => ElementData::Event(EventData::default()),
        ElementKind::Characteristic => ElementData::Characteristic(CharacteristicData::default()),
        ElementKind::Constraint => ElementData::Constraint(ConstraintVariant::Plain),
        ElementKind::Entity => ElementData::Entity(EntityData::default()),
        ElementKind::EntityInstance => ElementData::EntityInstance(EntityInstanceData::default()),
        ElementKind::Unit => ElementData::Unit(UnitData::default()),
    };
    NamedElement::new(data)
}

fn name(
    graph: &mut ElementGraph,
    registry: &mut LoadedFilesService,
    id: ElementId,
    parent: Option<&str>,
) -> String {
    resolve_element_naming(graph, registry, id, parent).unwrap()
}

// ---------------------------------------------------------------------------
// Default names
// ---------------------------------------------------------------------------

#[test]
fn counter_skips_names_of_neighbour_files() {
    let mut graph = ElementGraph::new();
    let mut registry = registry_with_neighbour();
    let id = graph.add(unnamed(ElementKind::Property));

    let urn = name(&mut graph, &mut registry, id, None);
    assert_eq!(urn, format!("{NS_IRI}property3"));

    let element = graph.get(id).unwrap();
    assert_eq!(element.name, "property3");
    assert_eq!(element.meta_model_version, "2.1.0");
    let current = registry.current_loaded_file().unwrap();
    assert_eq!(current.cached_file.get_element(&urn), Some(id));
}

#[test]
fn consecutive_names_are_distinct() {
    let mut graph = ElementGraph::new();
    let mut registry = registry_with_current();
    let first = graph.add(unnamed(ElementKind::Property));
    let second = graph.add(unnamed(ElementKind::Property));
    let aspect = graph.add(unnamed(ElementKind::Aspect));

    assert_eq!(name(&mut graph, &mut registry, first, None), format!("{NS_IRI}property1"));
    assert_eq!(name(&mut graph, &mut registry, second, None), format!("{NS_IRI}property2"));
    assert_eq!(name(&mut graph, &mut registry, aspect, None), format!("{NS_IRI}Aspect1"));
}

#[test]
fn named_element_keeps_urn() {
    let mut graph = ElementGraph::new();
    let mut registry = registry_with_current();
    let urn = "urn:samm:org.other:1.0.0#speed";
    let id = graph.add(NamedElement::with_urn(
        urn,
        ElementData::Property(PropertyData::default()),
    ));

    assert_eq!(name(&mut graph, &mut registry, id, None), urn);
    assert!(registry.current_loaded_file().unwrap().cached_file.is_empty());
}

#[test]
fn chosen_name_is_kept_when_free() {
    let mut graph = ElementGraph::new();
    let mut registry = registry_with_neighbour();
    let mut speed = unnamed(ElementKind::Property);
    speed.name = "speed".to_string();
    let first = graph.add(speed.clone());
    let second = graph.add(speed);
    let mut taken = unnamed(ElementKind::Property);
    taken.name = "property1".to_string();
    let taken = graph.add(taken);

    assert_eq!(name(&mut graph, &mut registry, first, None), format!("{NS_IRI}speed"));
    assert_eq!(name(&mut graph, &mut registry, second, None), format!("{NS_IRI}speed1"));
    assert_eq!(name(&mut graph, &mut registry, taken, None), format!("{NS_IRI}property11"));
}

#[test]
fn synthetic_name_is_replaced() {
    let mut graph = ElementGraph::new();
    let mut registry = registry_with_current();
    let mut element = unnamed(ElementKind::Constraint);
    element.name = "[Constraint]".to_string();
    let id = graph.add(element);

    assert_eq!(name(&mut graph, &mut registry, id, None), format!("{NS_IRI}Constraint1"));
}

// ---------------------------------------------------------------------------
// Parent hints
// ---------------------------------------------------------------------------

#[test]
fn parent_hint_prefixes_the_base_name() {
    let mut graph = ElementGraph::new();
    let mut registry = registry_with_current();
    let first = graph.add(unnamed(ElementKind::Characteristic));
    let second = graph.add(unnamed(ElementKind::Characteristic));
    let event = graph.add(unnamed(ElementKind::Event));

    assert_eq!(
        name(&mut graph, &mut registry, first, Some("Movement")),
        format!("{NS_IRI}MovementCharacteristic")
    );
    assert_eq!(
        name(&mut graph, &mut registry, second, Some("Movement")),
        format!("{NS_IRI}MovementCharacteristic1")
    );
    assert_eq!(
        name(&mut graph, &mut registry, event, Some("speed")),
        format!("{NS_IRI}speedEvent")
    );
}

// ---------------------------------------------------------------------------
// Children
// ---------------------------------------------------------------------------

#[test]
fn unnamed_children_are_named_first() {
    let mut graph = ElementGraph::new();
    let mut registry = registry_with_current();
    let characteristic = graph.add(unnamed(ElementKind::Characteristic));
    let property = graph.add(NamedElement::new(ElementData::Property(PropertyData {
        characteristic: Some(characteristic),
        ..PropertyData::default()
    })));

    let urn = name(&mut graph, &mut registry, property, None);
    assert_eq!(urn, format!("{NS_IRI}property1"));
    assert_eq!(
        graph.get(characteristic).unwrap().urn(),
        Some(format!("{NS_IRI}Characteristic1").as_str())
    );
    assert_eq!(registry.current_loaded_file().unwrap().cached_file.len(), 2);
}

#[test]
fn self_reference_terminates() {
    let mut graph = ElementGraph::new();
    let mut registry = registry_with_current();
    let entity = graph.add(unnamed(ElementKind::Entity));
    graph.get_mut(entity).unwrap().data = ElementData::Entity(EntityData {
        extends: Some(entity),
        ..EntityData::default()
    });

    assert_eq!(name(&mut graph, &mut registry, entity, None), format!("{NS_IRI}Entity1"));
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn naming_requires_current_file() {
    let mut graph = ElementGraph::new();
    let mut registry = LoadedFilesService::new();
    let id = graph.add(unnamed(ElementKind::Property));

    let result = resolve_element_naming(&mut graph, &mut registry, id, None);
    assert!(matches!(result, Err(SammError::NoCurrentFile)));
}

#[test]
fn naming_requires_rdf_model() {
    let mut graph = ElementGraph::new();
    let mut registry = LoadedFilesService::new();
    registry.add_file(NamespaceFile::new(NS, "New.ttl", None).rendered(true), false);
    let id = graph.add(unnamed(ElementKind::Property));

    let result = resolve_element_naming(&mut graph, &mut registry, id, None);
    assert!(matches!(result, Err(SammError::NoActiveModel)));
    assert!(graph.get(id).unwrap().urn().is_none());
}

#[test]
fn invalid_chosen_name_names_nothing() {
    let mut graph = ElementGraph::new();
    let mut registry = registry_with_current();
    let characteristic = graph.add(unnamed(ElementKind::Characteristic));
    let mut property = NamedElement::new(ElementData::Property(PropertyData {
        characteristic: Some(characteristic),
        ..PropertyData::default()
    }));
    property.name = "AAA prop".to_string();
    let property = graph.add(property);

    let result = resolve_element_naming(&mut graph, &mut registry, property, None);
    assert!(matches!(
        result,
        Err(SammError::InvalidUrn(ref urn)) if urn == "urn:samm:com.example:1.0.0#AAA prop"
    ));
    assert!(graph.get(property).unwrap().urn().is_none());
    assert!(graph.get(characteristic).unwrap().urn().is_none());
    assert!(registry.current_loaded_file().unwrap().cached_file.is_empty());
}

#[test]
fn invalid_parent_hint_is_rejected() {
    let mut graph = ElementGraph::new();
    let mut registry = registry_with_current();
    let id = graph.add(unnamed(ElementKind::Characteristic));

    let result = resolve_element_naming(&mut graph, &mut registry, id, Some("Move#ment"));
    assert!(matches!(result, Err(SammError::InvalidUrn(_))));
    assert!(graph.get(id).unwrap().urn().is_none());
}

// ---------------------------------------------------------------------------
// Canonical elements
// ---------------------------------------------------------------------------

#[test]
fn meta_model_element_resolves_to_loaded_element() {
    let mut graph = ElementGraph::new();
    let mut registry = registry_with_neighbour();
    instantiate_file(&mut graph, &mut registry, "com.example:1.0.0:SameNamespace.ttl").unwrap();
    let loaded = graph.find_by_urn(&format!("{NS_IRI}property1")).unwrap();

    let copy = graph.add(NamedElement::with_urn(
        &format!("{NS_IRI}property1"),
        ElementData::Property(PropertyData::default()),
    ));
    assert_eq!(
        resolve_meta_model_element(&mut graph, &mut registry, copy).unwrap(),
        loaded
    );

    let fresh = graph.add(unnamed(ElementKind::Property));
    assert_eq!(
        resolve_meta_model_element(&mut graph, &mut registry, fresh).unwrap(),
        fresh
    );
    assert_eq!(graph.get(fresh).unwrap().name, "property3");
}

proptest! {
    #[test]
    fn generated_names_never_collide(
        requests in prop::collection::vec((0usize..9, prop::option::of("[A-Z][a-z]{0,4}")), 1..24)
    ) {
        let mut graph = ElementGraph::new();
        let mut registry = registry_with_neighbour();
        let mut seen: HashSet<String> = ["property1", "property2"]
            .iter()
            .map(|local| format!("{NS_IRI}{local}"))
            .collect();

        for (kind, parent) in requests {
            let id = graph.add(unnamed(ElementKind::ALL[kind]));
            let urn = resolve_element_naming(&mut graph, &mut registry, id, parent.as_deref()).unwrap();
            prop_assert!(urn.starts_with(NS_IRI));
            prop_assert!(seen.insert(urn.clone()), "{} handed out twice", urn);
        }
    }
}
