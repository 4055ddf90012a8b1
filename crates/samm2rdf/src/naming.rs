//! Default names for newly created elements.
//!
//! A name is free when no element of the current file and no subject of another
//! loaded file declaring the same namespace uses it. Named elements enter the
//! current file's cache right away, so consecutive calls never hand out the same
//! URN.

use std::collections::HashSet;

use oxrdf::{NamedNode, NamedOrBlankNode};
use tracing::debug;

use crate::error::{Result, SammError};
use crate::model::element::{ElementId, NamedElement};
use crate::model::graph::ElementGraph;
use crate::registry::LoadedFilesService;

/// Name `id` (and, first, any unnamed element it references) and return its URN.
///
/// With `parent_name` the name is `<parent><Base>`, e.g. `MovementCharacteristic`;
/// otherwise it is the base name followed by a counter, e.g. `property1`. Elements
/// that already have a URN keep it. A chosen name that cannot form a valid URN
/// fails with [`SammError::InvalidUrn`] before anything is named.
pub fn resolve_element_naming(
    graph: &mut ElementGraph,
    registry: &mut LoadedFilesService,
    id: ElementId,
    parent_name: Option<&str>,
) -> Result<String> {
    let element = graph.get(id).ok_or(SammError::UnknownElement(id.index()))?;
    if element.urn().is_none() {
        let (namespace_iri, _) = active_namespace(registry)?;
        check_candidates(graph, &namespace_iri, id, parent_name)?;
    }
    let mut in_progress = HashSet::new();
    name_element(graph, registry, id, parent_name, &mut in_progress)
}

/// The canonical element for `id`: names it if needed, then returns whichever
/// element the loaded files already hold for its URN, or registers `id` in the
/// current file.
pub fn resolve_meta_model_element(
    graph: &mut ElementGraph,
    registry: &mut LoadedFilesService,
    id: ElementId,
) -> Result<ElementId> {
    let urn = resolve_element_naming(graph, registry, id, None)?;
    if let Some(existing) = registry.get_element(&urn) {
        return Ok(existing);
    }
    let file = registry
        .current_loaded_file_mut()
        .ok_or(SammError::NoCurrentFile)?;
    Ok(file.cached_file.resolve_cached_element(&urn, id))
}

fn name_element(
    graph: &mut ElementGraph,
    registry: &mut LoadedFilesService,
    id: ElementId,
    parent_name: Option<&str>,
    in_progress: &mut HashSet<ElementId>,
) -> Result<String> {
    let element = graph.get(id).ok_or(SammError::UnknownElement(id.index()))?;
    if let Some(urn) = element.urn() {
        return Ok(urn.to_string());
    }
    let (namespace_iri, version) = active_namespace(registry)?;

    let (chosen, base) = base_name(element);
    let hinted = parent_name.map(|parent| format!("{parent}{}", capitalize(&base)));

    in_progress.insert(id);
    for child in graph.children(id) {
        let unnamed = graph
            .get(child)
            .is_some_and(|c| c.urn().is_none() && !c.is_predefined);
        if unnamed && !in_progress.contains(&child) {
            name_element(graph, registry, child, None, in_progress)?;
        }
    }

    let taken = taken_names(registry, &namespace_iri);
    let name = match (hinted, chosen) {
        (Some(candidate), _) => {
            if taken.contains(&candidate) {
                with_counter(&candidate, &taken)
            } else {
                candidate
            }
        }
        (None, Some(chosen)) if !taken.contains(&chosen) => chosen,
        (None, _) => with_counter(&base, &taken),
    };

    let urn = format!("{namespace_iri}{name}");
    if let Some(element) = graph.get_mut(id) {
        element.meta_model_version = version;
        element.set_urn(&urn);
    }
    if let Some(file) = registry.current_loaded_file_mut() {
        file.cached_file.resolve_cached_element(&urn, id);
    }
    debug!("Named new element {urn}");
    Ok(urn)
}

/// The element's own name if it chose one, and the base the counter goes on.
fn base_name(element: &NamedElement) -> (Option<String>, String) {
    let chosen = (!element.name.is_empty() && !element.is_synthetic()).then(|| element.name.clone());
    let base = chosen
        .clone()
        .unwrap_or_else(|| element.kind().base_name().to_string());
    (chosen, base)
}

/// Fails with [`SammError::InvalidUrn`] if any element the call would name
/// cannot get a valid URN, so that nothing is named at all. Counters only append
/// digits, so the bare candidate decides.
fn check_candidates(
    graph: &ElementGraph,
    namespace_iri: &str,
    id: ElementId,
    parent_name: Option<&str>,
) -> Result<()> {
    let mut stack = vec![(id, parent_name)];
    let mut seen = HashSet::new();
    while let Some((id, parent)) = stack.pop() {
        let Some(element) = graph.get(id) else {
            continue;
        };
        if element.urn().is_some() || element.is_predefined || !seen.insert(id) {
            continue;
        }
        let (_, base) = base_name(element);
        let candidate = match parent {
            Some(parent) => format!("{namespace_iri}{parent}{}", capitalize(&base)),
            None => format!("{namespace_iri}{base}"),
        };
        if NamedNode::new(candidate.as_str()).is_err() {
            return Err(SammError::InvalidUrn(candidate));
        }
        stack.extend(graph.children(id).into_iter().map(|child| (child, None)));
    }
    Ok(())
}

/// `urn:samm:<namespace>#` of the current file and its meta model version.
fn active_namespace(registry: &LoadedFilesService) -> Result<(String, String)> {
    let file = registry
        .current_loaded_file()
        .ok_or(SammError::NoCurrentFile)?;
    let model = file.rdf_model.as_ref().ok_or(SammError::NoActiveModel)?;
    Ok((file.namespace_urn(), model.samm_version().to_string()))
}

/// Local names already used under `namespace_iri`.
fn taken_names(registry: &LoadedFilesService, namespace_iri: &str) -> HashSet<String> {
    let mut taken = HashSet::new();
    for file in registry.external_files_declaring(namespace_iri) {
        let Some(model) = &file.rdf_model else {
            continue;
        };
        for subject in model.store().subjects() {
            if let NamedOrBlankNode::NamedNode(node) = subject {
                if let Some(local) = node.as_str().strip_prefix(namespace_iri) {
                    taken.insert(local.to_string());
                }
            }
        }
    }
    if let Some(file) = registry.current_loaded_file() {
        taken.extend(
            file.cached_file
                .urns()
                .filter_map(|urn| urn.strip_prefix(namespace_iri))
                .map(str::to_string),
        );
    }
    taken
}

fn with_counter(base: &str, taken: &HashSet<String>) -> String {
    (1..)
        .map(|counter| format!("{base}{counter}"))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
