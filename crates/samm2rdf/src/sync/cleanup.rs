use tracing::debug;

use crate::store::RdfModel;

/// Empties the current file's store before a full re-sync.
pub struct CleanupVisitor;

impl CleanupVisitor {
    /// Remove every triple of `model` (the `?s ?p ?o` pattern). Only the given
    /// model is touched; returns the number of removed triples.
    pub fn remove_store_elements(model: &mut RdfModel) -> usize {
        let removed = model.store_mut().remove_matching(None, None, None);
        debug!("Cleanup removed {removed} triples");
        removed
    }
}
