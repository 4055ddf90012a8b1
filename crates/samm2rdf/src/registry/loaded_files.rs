//! Registry of every document held in memory.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::error::{Result, SammError};
use crate::model::element::{ElementId, NamedElement};
use crate::model::graph::ElementGraph;
use crate::model::urn::namespace_urn;

use super::namespace_file::NamespaceFile;

/// Suffix under which a workspace file is kept when another file with its name is added.
pub const WORKSPACE_DUPLICATE_SUFFIX: &str = "_workspace_duplicate";

/// All loaded files, keyed by absolute name (`<namespace>:<file name>`).
///
/// At most one file is `rendered`; it is the current file every synchronization
/// and naming operation works on. All other files are external to it.
#[derive(Debug, Default)]
pub struct LoadedFilesService {
    files: BTreeMap<String, NamespaceFile>,
}

impl LoadedFilesService {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Adding and removing files
    // -----------------------------------------------------------------------

    /// Add `file` and return the entry the caller should work with.
    ///
    /// Without `force` an existing entry wins, unless it came from the workspace:
    /// then it is moved to `<key>_workspace_duplicate` (numbered when that key is
    /// taken too) and `file` takes its place.
    pub fn add_file(&mut self, file: NamespaceFile, force: bool) -> &NamespaceFile {
        let key = file.absolute_name();
        match self.files.get(&key).map(|existing| existing.from_workspace) {
            Some(true) if !force => {
                if let Some(previous) = self.files.remove(&key) {
                    let duplicate = self.free_duplicate_key(&key);
                    warn!("{key} is already loaded from the workspace, keeping it as {duplicate}");
                    self.files.insert(duplicate, previous);
                }
            }
            Some(false) if !force => {
                debug!("{key} is already loaded");
                return self.files.entry(key).or_insert(file);
            }
            _ => {}
        }

        if file.rendered {
            for other in self.files.values_mut() {
                other.rendered = false;
            }
        }
        info!("Registered file {key}");
        match self.files.entry(key) {
            Entry::Vacant(entry) => entry.insert(file),
            Entry::Occupied(mut entry) => {
                entry.insert(file);
                entry.into_mut()
            }
        }
    }

    /// Add several files; returns their absolute names.
    pub fn add_files(&mut self, files: Vec<NamespaceFile>, force: bool) -> Vec<String> {
        files
            .into_iter()
            .map(|file| self.add_file(file, force).absolute_name())
            .collect()
    }

    pub fn remove_file(&mut self, absolute_name: &str) -> Option<NamespaceFile> {
        self.files.remove(absolute_name)
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    pub fn get_file(&self, absolute_name: &str) -> Option<&NamespaceFile> {
        self.files.get(absolute_name)
    }

    pub fn get_file_mut(&mut self, absolute_name: &str) -> Option<&mut NamespaceFile> {
        self.files.get_mut(absolute_name)
    }

    /// Every file, ordered by registry key.
    pub fn files_as_list(&self) -> Vec<&NamespaceFile> {
        self.files.values().collect()
    }

    /// Registry keys in order. May differ from `absolute_name()` for duplicates.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// The rendered file, if any.
    pub fn current_loaded_file(&self) -> Option<&NamespaceFile> {
        self.files.values().find(|file| file.rendered)
    }

    pub fn current_loaded_file_mut(&mut self) -> Option<&mut NamespaceFile> {
        self.files.values_mut().find(|file| file.rendered)
    }

    /// Make the file under `absolute_name` the only rendered one.
    pub fn set_current_file(&mut self, absolute_name: &str) -> Result<()> {
        if !self.files.contains_key(absolute_name) {
            return Err(SammError::FileNotLoaded(absolute_name.to_string()));
        }
        for (key, file) in self.files.iter_mut() {
            file.rendered = key == absolute_name;
        }
        Ok(())
    }

    /// Every file except the current one.
    pub fn external_files(&self) -> impl Iterator<Item = &NamespaceFile> {
        self.files.values().filter(|file| !file.rendered)
    }

    /// Files whose namespace is `namespace` (`<namespace>:<version>`).
    pub fn files_in_namespace(&self, namespace: &str) -> Vec<&NamespaceFile> {
        self.files
            .values()
            .filter(|file| file.namespace == namespace)
            .collect()
    }

    /// External files whose RDF model declares `namespace_iri` as default prefix.
    pub fn external_files_declaring(&self, namespace_iri: &str) -> Vec<&NamespaceFile> {
        self.external_files()
            .filter(|file| {
                file.rdf_model
                    .as_ref()
                    .and_then(|model| model.default_namespace())
                    == Some(namespace_iri)
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Element lookup
    // -----------------------------------------------------------------------

    /// The element for `urn`, looked up in the current file first.
    pub fn get_element(&self, urn: &str) -> Option<ElementId> {
        self.current_loaded_file()
            .and_then(|file| file.cached_file.get_element(urn))
            .or_else(|| self.find_element_on_ext_references(urn))
    }

    /// The element for `urn` as defined by a file other than the current one.
    pub fn find_element_on_ext_references(&self, urn: &str) -> Option<ElementId> {
        self.external_files()
            .find_map(|file| file.cached_file.get_element(urn))
    }

    pub fn is_element_in_current_file(&self, element: &NamedElement) -> bool {
        if element.is_synthetic() {
            return true;
        }
        match (self.current_loaded_file(), element.urn()) {
            (Some(file), Some(urn)) => file.cached_file.contains(urn),
            _ => false,
        }
    }

    /// Defined by another loaded file and not by the current one.
    pub fn is_element_extern(&self, element: &NamedElement) -> bool {
        if element.is_predefined || self.is_element_in_current_file(element) {
            return false;
        }
        element
            .urn()
            .is_some_and(|urn| self.find_element_on_ext_references(urn).is_some())
    }

    // -----------------------------------------------------------------------
    // Renaming
    // -----------------------------------------------------------------------

    /// Re-key a file under `new_namespace:new_name`.
    ///
    /// Refused when the file is not loaded or the new key is taken; the registry
    /// is left unchanged in both cases.
    pub fn update_absolute_name(
        &mut self,
        absolute_name: &str,
        new_namespace: &str,
        new_name: &str,
    ) -> Result<()> {
        let target = format!("{new_namespace}:{new_name}");
        self.check_rename(absolute_name, &target)?;
        if let Some(mut file) = self.files.remove(absolute_name) {
            file.namespace = new_namespace.to_string();
            file.name = new_name.to_string();
            self.files.insert(target, file);
        }
        Ok(())
    }

    /// Rename a file and move its own elements and triples to the new namespace.
    ///
    /// Refused without any change when an element would land on a URN the file
    /// already caches.
    pub fn update_file_naming(
        &mut self,
        graph: &mut ElementGraph,
        absolute_name: &str,
        new_namespace: &str,
        new_name: &str,
    ) -> Result<()> {
        let target = format!("{new_namespace}:{new_name}");
        self.check_rename(absolute_name, &target)?;
        let file = self
            .files
            .get(absolute_name)
            .ok_or_else(|| SammError::FileNotLoaded(absolute_name.to_string()))?;

        let old_iri = file.namespace_urn();
        let new_iri = namespace_urn(new_namespace);
        let mut renames: Vec<(String, String, ElementId)> = Vec::new();
        if old_iri != new_iri {
            for (old_urn, id) in file.cached_file.entries() {
                let Some(local) = old_urn.strip_prefix(old_iri.as_str()) else {
                    continue;
                };
                let new_urn = format!("{new_iri}{local}");
                if file.cached_file.contains(&new_urn) {
                    warn!("Cannot rename {absolute_name}: {new_urn} is already defined");
                    return Err(SammError::RegistryKeyConflict {
                        from: old_urn.to_string(),
                        to: new_urn,
                    });
                }
                renames.push((old_urn.to_string(), new_urn, id));
            }
        }

        let Some(mut file) = self.files.remove(absolute_name) else {
            return Err(SammError::FileNotLoaded(absolute_name.to_string()));
        };
        for (old_urn, new_urn, id) in renames {
            if let Some(element) = graph.get_mut(id) {
                element.set_urn(&new_urn);
            }
            file.cached_file.rename_element(&old_urn, &new_urn);
        }
        if old_iri != new_iri {
            if let Some(model) = file.rdf_model.as_mut() {
                let rewritten = model.rewrite_namespace(&old_iri, &new_iri);
                debug!("Rewrote {rewritten} triples from {old_iri} to {new_iri}");
            }
        }

        file.namespace = new_namespace.to_string();
        file.name = new_name.to_string();
        info!("Renamed {absolute_name} to {target}");
        self.files.insert(target, file);
        Ok(())
    }

    /// Snapshot the current names of every file as their committed names.
    pub fn commit_names(&mut self) {
        for file in self.files.values_mut() {
            file.commit_name();
        }
    }

    fn free_duplicate_key(&self, key: &str) -> String {
        let duplicate = format!("{key}{WORKSPACE_DUPLICATE_SUFFIX}");
        if !self.files.contains_key(&duplicate) {
            return duplicate;
        }
        (2..)
            .map(|counter| format!("{duplicate}{counter}"))
            .find(|candidate| !self.files.contains_key(candidate))
            .unwrap_or(duplicate)
    }

    fn check_rename(&self, absolute_name: &str, target: &str) -> Result<()> {
        if !self.files.contains_key(absolute_name) {
            warn!("Cannot rename {absolute_name}: file is not loaded");
            return Err(SammError::FileNotLoaded(absolute_name.to_string()));
        }
        if target != absolute_name && self.files.contains_key(target) {
            warn!("Cannot rename {absolute_name} to {target}: name already in use");
            return Err(SammError::RegistryKeyConflict {
                from: absolute_name.to_string(),
                to: target.to_string(),
            });
        }
        Ok(())
    }
}
