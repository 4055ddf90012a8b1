use oxrdf::{NamedNode, NamedOrBlankNode, Triple};
use pretty_assertions::assert_eq;

use samm2rdf::model::element::{ElementData, NamedElement, PropertyData};
use samm2rdf::registry::WORKSPACE_DUPLICATE_SUFFIX;
use samm2rdf::{ElementGraph, LoadedFilesService, NamespaceFile, SammError};

const NS: &str = "com.example:1.0.0";

fn file(name: &str) -> NamespaceFile {
    NamespaceFile::empty(NS, name, "2.1.0")
}

fn property(urn: &str) -> NamedElement {
    NamedElement::with_urn(urn, ElementData::Property(PropertyData::default()))
}

fn keys(registry: &LoadedFilesService) -> Vec<String> {
    registry.keys().map(str::to_string).collect()
}

// ---------------------------------------------------------------------------
// Adding files
// ---------------------------------------------------------------------------

#[test]
fn workspace_file_is_kept_as_duplicate() {
    let mut registry = LoadedFilesService::new();
    registry.add_file(file("Movement.ttl").from_workspace(true), false);

    let added = registry.add_file(NamespaceFile::new(NS, "Movement.ttl", None), false);
    assert!(!added.from_workspace);
    assert!(!added.has_rdf_model());

    let duplicate = format!("{NS}:Movement.ttl{WORKSPACE_DUPLICATE_SUFFIX}");
    assert_eq!(keys(&registry), vec![format!("{NS}:Movement.ttl"), duplicate.clone()]);
    let kept = registry.get_file(&duplicate).unwrap();
    assert!(kept.from_workspace);
    assert!(kept.has_rdf_model());
}

#[test]
fn repeated_workspace_replacement_keeps_every_copy() {
    let mut registry = LoadedFilesService::new();
    registry.add_file(file("Movement.ttl").from_workspace(true), false);
    registry.add_file(file("Movement.ttl").from_workspace(true), false);
    registry.add_file(NamespaceFile::new(NS, "Movement.ttl", None), false);

    let duplicate = format!("{NS}:Movement.ttl{WORKSPACE_DUPLICATE_SUFFIX}");
    let second = format!("{duplicate}2");
    assert_eq!(
        keys(&registry),
        vec![format!("{NS}:Movement.ttl"), duplicate.clone(), second.clone()]
    );
    assert!(registry.get_file(&duplicate).unwrap().from_workspace);
    assert!(registry.get_file(&second).unwrap().from_workspace);
}

#[test]
fn existing_file_wins_without_force() {
    let mut registry = LoadedFilesService::new();
    registry.add_file(file("Movement.ttl"), false);

    let returned = registry.add_file(NamespaceFile::new(NS, "Movement.ttl", None), false);
    assert!(returned.has_rdf_model());
    assert_eq!(registry.len(), 1);
}

#[test]
fn force_replaces_existing_file() {
    let mut registry = LoadedFilesService::new();
    registry.add_file(file("Movement.ttl").from_workspace(true), false);

    let returned = registry.add_file(NamespaceFile::new(NS, "Movement.ttl", None), true);
    assert!(!returned.has_rdf_model());
    assert_eq!(registry.len(), 1);
}

#[test]
fn only_one_file_is_rendered() {
    let mut registry = LoadedFilesService::new();
    registry.add_file(file("A.ttl").rendered(true), false);
    registry.add_file(file("B.ttl").rendered(true), false);
    registry.add_file(file("C.ttl"), false);

    let current = registry.current_loaded_file().unwrap();
    assert_eq!(current.absolute_name(), format!("{NS}:B.ttl"));
    assert_eq!(registry.external_files().count(), 2);

    registry.set_current_file(&format!("{NS}:C.ttl")).unwrap();
    assert_eq!(
        registry.current_loaded_file().unwrap().absolute_name(),
        format!("{NS}:C.ttl")
    );
    assert_eq!(
        registry.files_as_list().iter().filter(|f| f.rendered).count(),
        1
    );
}

#[test]
fn set_current_file_requires_loaded_file() {
    let mut registry = LoadedFilesService::new();
    registry.add_file(file("A.ttl").rendered(true), false);

    let result = registry.set_current_file("com.example:1.0.0:Missing.ttl");
    assert!(matches!(result, Err(SammError::FileNotLoaded(_))));
    assert!(registry.current_loaded_file().is_some());
}

#[test]
fn add_files_returns_keys() {
    let mut registry = LoadedFilesService::new();
    let names = registry.add_files(vec![file("A.ttl"), file("B.ttl")], false);
    assert_eq!(names, vec![format!("{NS}:A.ttl"), format!("{NS}:B.ttl")]);
    assert!(registry.remove_file(&names[0]).is_some());
    assert_eq!(registry.len(), 1);
}

#[test]
fn files_grouped_by_namespace() {
    let mut registry = LoadedFilesService::new();
    registry.add_file(file("A.ttl").rendered(true), false);
    registry.add_file(file("B.ttl"), false);
    registry.add_file(NamespaceFile::empty("org.other:2.0.0", "C.ttl", "2.1.0"), false);

    assert_eq!(registry.files_in_namespace(NS).len(), 2);
    let declaring = registry.external_files_declaring("urn:samm:com.example:1.0.0#");
    assert_eq!(declaring.len(), 1);
    assert_eq!(declaring[0].name, "B.ttl");
}

// ---------------------------------------------------------------------------
// Element lookup
// ---------------------------------------------------------------------------

#[test]
fn element_lookup_prefers_current_file() {
    let mut graph = ElementGraph::new();
    let urn = "urn:samm:com.example:1.0.0#speed";
    let own = graph.add(property(urn));
    let foreign = graph.add(property(urn));

    let mut registry = LoadedFilesService::new();
    let mut current = file("A.ttl").rendered(true);
    current.cached_file.resolve_cached_element(urn, own);
    let mut other = file("B.ttl");
    other.cached_file.resolve_cached_element(urn, foreign);
    registry.add_files(vec![current, other], false);

    assert_eq!(registry.get_element(urn), Some(own));
    assert_eq!(registry.find_element_on_ext_references(urn), Some(foreign));
    assert!(!registry.is_element_extern(graph.get(own).unwrap()));
}

#[test]
fn extern_elements_are_defined_elsewhere() {
    let mut graph = ElementGraph::new();
    let shared_urn = "urn:samm:com.example.shared:1.0.0#Position";
    let shared = graph.add(property(shared_urn));
    let local = graph.add(property("urn:samm:com.example:1.0.0#speed"));
    let mut synthetic = NamedElement::new(ElementData::Property(PropertyData::default()));
    synthetic.name = "[property]".to_string();
    let synthetic = graph.add(synthetic);
    let mut predefined = property("urn:samm:org.eclipse.esmf.samm:characteristic:2.1.0#Text");
    predefined.is_predefined = true;
    let predefined = graph.add(predefined);

    let mut registry = LoadedFilesService::new();
    let mut current = file("A.ttl").rendered(true);
    current
        .cached_file
        .resolve_cached_element("urn:samm:com.example:1.0.0#speed", local);
    let mut other = NamespaceFile::empty("com.example.shared:1.0.0", "Shared.ttl", "2.1.0");
    other.cached_file.resolve_cached_element(shared_urn, shared);
    registry.add_files(vec![current, other], false);

    assert!(registry.is_element_extern(graph.get(shared).unwrap()));
    assert!(!registry.is_element_extern(graph.get(local).unwrap()));
    assert!(!registry.is_element_extern(graph.get(predefined).unwrap()));
    assert!(registry.is_element_in_current_file(graph.get(synthetic).unwrap()));
    assert!(!registry.is_element_extern(graph.get(synthetic).unwrap()));
}

// ---------------------------------------------------------------------------
// Renaming
// ---------------------------------------------------------------------------

#[test]
fn rename_into_taken_key_is_refused() {
    let mut registry = LoadedFilesService::new();
    registry.add_files(vec![file("A.ttl"), file("B.ttl")], false);
    let before = keys(&registry);

    let result = registry.update_absolute_name(&format!("{NS}:A.ttl"), NS, "B.ttl");
    assert!(matches!(
        result,
        Err(SammError::RegistryKeyConflict { ref from, ref to })
            if from == "com.example:1.0.0:A.ttl" && to == "com.example:1.0.0:B.ttl"
    ));
    assert_eq!(keys(&registry), before);
}

#[test]
fn rename_of_unknown_file_is_refused() {
    let mut registry = LoadedFilesService::new();
    let mut graph = ElementGraph::new();
    let result = registry.update_file_naming(&mut graph, "com.example:1.0.0:A.ttl", NS, "B.ttl");
    assert!(matches!(result, Err(SammError::FileNotLoaded(_))));
}

#[test]
fn rename_moves_key() {
    let mut registry = LoadedFilesService::new();
    registry.add_file(file("A.ttl"), false);
    registry
        .update_absolute_name(&format!("{NS}:A.ttl"), NS, "Renamed.ttl")
        .unwrap();

    assert_eq!(keys(&registry), vec![format!("{NS}:Renamed.ttl")]);
    let renamed = registry.get_file(&format!("{NS}:Renamed.ttl")).unwrap();
    assert!(renamed.is_renamed());
    assert_eq!(renamed.original_name, "A.ttl");

    registry.commit_names();
    assert!(!registry.get_file(&format!("{NS}:Renamed.ttl")).unwrap().is_renamed());
}

#[test]
fn namespace_change_rewrites_elements_and_store() {
    let old_urn = "urn:samm:com.example:1.0.0#speed";
    let mut graph = ElementGraph::new();
    let speed = graph.add(property(old_urn));

    let mut registry = LoadedFilesService::new();
    let mut movement = file("Movement.ttl").rendered(true);
    movement.cached_file.resolve_cached_element(old_urn, speed);
    if let Some(model) = movement.rdf_model.as_mut() {
        model.store_mut().insert(Triple::new(
            NamedNode::new_unchecked(old_urn),
            NamedNode::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#type"),
            NamedNode::new_unchecked("urn:samm:org.eclipse.esmf.samm:meta-model:2.1.0#Property"),
        ));
    }
    registry.add_file(movement, false);

    registry
        .update_file_naming(&mut graph, &format!("{NS}:Movement.ttl"), "org.other:2.0.0", "Movement.ttl")
        .unwrap();

    let new_urn = "urn:samm:org.other:2.0.0#speed";
    assert_eq!(graph.get(speed).unwrap().urn(), Some(new_urn));
    let file = registry.get_file("org.other:2.0.0:Movement.ttl").unwrap();
    assert_eq!(file.cached_file.get_element(new_urn), Some(speed));
    assert!(!file.cached_file.contains(old_urn));

    let model = file.rdf_model.as_ref().unwrap();
    assert_eq!(model.default_namespace(), Some("urn:samm:org.other:2.0.0#"));
    let triple = model.store().iter().next().unwrap();
    assert_eq!(
        triple.subject,
        NamedOrBlankNode::from(NamedNode::new_unchecked(new_urn))
    );
}

#[test]
fn namespace_change_onto_cached_urn_is_refused() {
    let old_urn = "urn:samm:com.example:1.0.0#speed";
    let clash_urn = "urn:samm:org.other:2.0.0#speed";
    let mut graph = ElementGraph::new();
    let speed = graph.add(property(old_urn));
    let other = graph.add(property(clash_urn));

    let mut registry = LoadedFilesService::new();
    let mut movement = file("Movement.ttl").rendered(true);
    movement.cached_file.resolve_cached_element(old_urn, speed);
    movement.cached_file.resolve_cached_element(clash_urn, other);
    registry.add_file(movement, false);

    let result = registry.update_file_naming(
        &mut graph,
        &format!("{NS}:Movement.ttl"),
        "org.other:2.0.0",
        "Movement.ttl",
    );
    assert!(matches!(
        result,
        Err(SammError::RegistryKeyConflict { ref from, ref to }) if from == old_urn && to == clash_urn
    ));
    assert_eq!(graph.get(speed).unwrap().urn(), Some(old_urn));
    assert_eq!(keys(&registry), vec![format!("{NS}:Movement.ttl")]);
    let file = registry.get_file(&format!("{NS}:Movement.ttl")).unwrap();
    assert_eq!(file.cached_file.get_element(old_urn), Some(speed));
    assert_eq!(file.cached_file.get_element(clash_urn), Some(other));
}
