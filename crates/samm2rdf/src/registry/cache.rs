//! Per-file cache of instantiated elements.

use std::collections::BTreeMap;

use crate::model::element::ElementId;

/// Maps aspect model URNs to the one canonical element for that URN in a file.
#[derive(Debug, Clone, Default)]
pub struct CachedFile {
    elements: BTreeMap<String, ElementId>,
}

impl CachedFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` under `urn` unless an element is already cached there.
    /// Returns the canonical element for `urn`.
    pub fn resolve_cached_element(&mut self, urn: &str, id: ElementId) -> ElementId {
        *self.elements.entry(urn.to_string()).or_insert(id)
    }

    pub fn get_element(&self, urn: &str) -> Option<ElementId> {
        self.elements.get(urn).copied()
    }

    pub fn contains(&self, urn: &str) -> bool {
        self.elements.contains_key(urn)
    }

    pub fn remove_element(&mut self, urn: &str) -> Option<ElementId> {
        self.elements.remove(urn)
    }

    /// Move the entry for `old_urn` to `new_urn`. Returns false if there was none
    /// or `new_urn` is already taken.
    pub fn rename_element(&mut self, old_urn: &str, new_urn: &str) -> bool {
        if self.elements.contains_key(new_urn) {
            return false;
        }
        match self.elements.remove(old_urn) {
            Some(id) => {
                self.elements.insert(new_urn.to_string(), id);
                true
            }
            None => false,
        }
    }

    /// Every cached element, ordered by URN.
    pub fn get_all_elements(&self) -> Vec<ElementId> {
        self.elements.values().copied().collect()
    }

    /// `(urn, id)` pairs ordered by URN.
    pub fn entries(&self) -> impl Iterator<Item = (&str, ElementId)> {
        self.elements.iter().map(|(urn, id)| (urn.as_str(), *id))
    }

    pub fn urns(&self) -> impl Iterator<Item = &str> {
        self.elements.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }
}
