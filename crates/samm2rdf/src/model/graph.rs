//! Arena of named elements.

use std::collections::{HashMap, HashSet};

use super::element::{ElementId, NamedElement};

/// Owns every [`NamedElement`] loaded in the editor, across all files.
///
/// Edges are stored once, on the referencing element's [`ElementData`]. Children
/// are read from there; parents are derived by scanning.
///
/// [`ElementData`]: super::element::ElementData
#[derive(Debug, Default)]
pub struct ElementGraph {
    elements: Vec<NamedElement>,
}

impl ElementGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, element: NamedElement) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(element);
        id
    }

    pub fn get(&self, id: ElementId) -> Option<&NamedElement> {
        self.elements.get(id.0)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut NamedElement> {
        self.elements.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        (0..self.elements.len()).map(ElementId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &NamedElement)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(index, element)| (ElementId(index), element))
    }

    /// Elements directly referenced by `id`. Dangling ids are dropped.
    pub fn children(&self, id: ElementId) -> Vec<ElementId> {
        self.get(id)
            .map(|element| {
                element
                    .children()
                    .into_iter()
                    .filter(|child| child.0 < self.elements.len())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Elements that reference `id`.
    pub fn parents(&self, id: ElementId) -> Vec<ElementId> {
        self.iter()
            .filter(|(_, element)| element.children().contains(&id))
            .map(|(parent, _)| parent)
            .collect()
    }

    /// Parent lists for every referenced element, computed in one pass.
    pub fn parent_index(&self) -> HashMap<ElementId, Vec<ElementId>> {
        let mut index: HashMap<ElementId, Vec<ElementId>> = HashMap::new();
        for (parent, element) in self.iter() {
            for child in element.children() {
                let parents = index.entry(child).or_default();
                if !parents.contains(&parent) {
                    parents.push(parent);
                }
            }
        }
        index
    }

    /// The members of `candidates` no element references, in input order.
    pub fn roots(&self, candidates: &[ElementId]) -> Vec<ElementId> {
        let index = self.parent_index();
        candidates
            .iter()
            .copied()
            .filter(|id| index.get(id).is_none_or(|parents| parents.is_empty()))
            .collect()
    }

    /// Depth-first walk from `start` guarded by a visited set, so cycles terminate.
    pub fn reachable(&self, start: ElementId) -> Vec<ElementId> {
        let mut visited = HashSet::new();
        let mut order = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            order.push(id);
            for child in self.children(id).into_iter().rev() {
                if !visited.contains(&child) {
                    stack.push(child);
                }
            }
        }
        order
    }

    /// First element with the given URN.
    pub fn find_by_urn(&self, urn: &str) -> Option<ElementId> {
        self.iter()
            .find(|(_, element)| element.urn() == Some(urn))
            .map(|(id, _)| id)
    }
}
