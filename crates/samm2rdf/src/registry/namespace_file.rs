//! One loaded Turtle document.

use crate::model::element::ElementId;
use crate::model::graph::ElementGraph;
use crate::model::urn::namespace_urn;
use crate::store::RdfModel;

use super::cache::CachedFile;

/// A Turtle document held in memory, addressed by `<namespace>:<file name>`.
#[derive(Debug, Clone)]
pub struct NamespaceFile {
    /// `<namespace>:<version>`, e.g. `com.example:1.0.0`.
    pub namespace: String,
    /// File name, e.g. `Movement.ttl`. Empty until derived from the aspect.
    pub name: String,
    pub rdf_model: Option<RdfModel>,
    pub cached_file: CachedFile,
    /// Files holding only shared elements have no aspect.
    pub aspect: Option<ElementId>,
    /// Whether this is the file shown in the editor.
    pub rendered: bool,
    pub from_workspace: bool,
    pub original_name: String,
    pub original_namespace: String,
}

impl NamespaceFile {
    pub fn new(namespace: &str, name: &str, rdf_model: Option<RdfModel>) -> Self {
        Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
            rdf_model,
            cached_file: CachedFile::new(),
            aspect: None,
            rendered: false,
            from_workspace: false,
            original_name: name.to_string(),
            original_namespace: namespace.to_string(),
        }
    }

    /// A file for a parsed model; the namespace comes from the model's default prefix.
    pub fn from_model(name: &str, rdf_model: RdfModel) -> Self {
        let namespace = rdf_model.namespace_key().unwrap_or_default();
        Self::new(&namespace, name, Some(rdf_model))
    }

    /// A new, empty document in `namespace`.
    pub fn empty(namespace: &str, name: &str, samm_version: &str) -> Self {
        Self::new(namespace, name, Some(RdfModel::new(namespace, samm_version)))
    }

    pub fn rendered(mut self, rendered: bool) -> Self {
        self.rendered = rendered;
        self
    }

    pub fn from_workspace(mut self, from_workspace: bool) -> Self {
        self.from_workspace = from_workspace;
        self
    }

    /// Registry key: `<namespace>:<file name>`.
    pub fn absolute_name(&self) -> String {
        format!("{}:{}", self.namespace, self.name)
    }

    /// `urn:samm:<namespace>#`
    pub fn namespace_urn(&self) -> String {
        namespace_urn(&self.namespace)
    }

    pub fn has_rdf_model(&self) -> bool {
        self.rdf_model.is_some()
    }

    /// Whether namespace or name changed since the last commit.
    pub fn is_renamed(&self) -> bool {
        self.name != self.original_name || self.namespace != self.original_namespace
    }

    /// Fill in an unset file name from the aspect name (`<Aspect>.ttl`).
    pub fn derive_name(&mut self, graph: &ElementGraph) {
        if !self.name.is_empty() {
            return;
        }
        if let Some(aspect) = self.aspect.and_then(|id| graph.get(id)) {
            if !aspect.name.is_empty() {
                self.name = format!("{}.ttl", aspect.name);
                if self.original_name.is_empty() {
                    self.original_name = self.name.clone();
                }
            }
        }
    }

    /// Accept the current name and namespace as the committed ones.
    pub fn commit_name(&mut self) {
        self.original_name = self.name.clone();
        self.original_namespace = self.namespace.clone();
    }
}
