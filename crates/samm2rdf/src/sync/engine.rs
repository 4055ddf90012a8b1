//! The synchronization pass and its single-slot scheduler.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info};

use crate::emitter::TriplesEmitter;
use crate::error::{Result, SammError};
use crate::model::element::ElementId;
use crate::model::graph::ElementGraph;
use crate::model::urn::namespace_urn;
use crate::registry::LoadedFilesService;

use super::cleanup::CleanupVisitor;
use super::{VisitContext, VisitorTable};

/// Outcome of one synchronization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Root elements of the current file.
    pub roots: usize,
    /// Elements written to the store.
    pub visited: usize,
    /// URNs of reachable elements owned by other loaded files.
    pub skipped_external: Vec<String>,
    /// Reachable built-in vocabulary elements.
    pub skipped_predefined: usize,
    /// Triples removed by the cleanup step.
    pub removed: usize,
    /// Triples in the store after the pass.
    pub triples: usize,
}

/// Rebuilds the current file's store from the element graph.
pub struct ModelSynchronizer {
    visitors: VisitorTable,
}

impl ModelSynchronizer {
    pub fn new() -> Self {
        Self::with_visitors(VisitorTable::default())
    }

    pub fn with_visitors(visitors: VisitorTable) -> Self {
        Self { visitors }
    }

    pub fn visitors(&self) -> &VisitorTable {
        &self.visitors
    }

    /// Replace the current file's triples by those of its elements.
    ///
    /// Elements owned by other loaded files and built-in vocabulary elements are
    /// neither written nor descended into. The pass is built on a copy of the
    /// model which replaces the current one only once every element is written,
    /// so a failing pass leaves the store as it was.
    pub fn update_rdf_store(
        &self,
        graph: &ElementGraph,
        registry: &mut LoadedFilesService,
    ) -> Result<SyncReport> {
        let (plan, mut report) = self.plan(graph, registry)?;

        let file = registry
            .current_loaded_file_mut()
            .ok_or(SammError::NoCurrentFile)?;
        let namespace = file.namespace.clone();
        let model = file.rdf_model.as_mut().ok_or(SammError::EmptyModel)?;

        let mut scratch = model.clone();
        report.removed = CleanupVisitor::remove_store_elements(&mut scratch);
        let alias = scratch.samm_alias().to_string();
        for (prefix, iri) in scratch.samm().standard_prefixes(&alias) {
            scratch.add_prefix(&prefix, &iri);
        }
        if scratch.default_namespace().is_none() && !namespace.is_empty() {
            scratch.set_default_namespace(&namespace_urn(&namespace));
        }

        {
            let mut cx = VisitContext::new(graph, &mut scratch);
            for id in &plan {
                let element = graph
                    .get(*id)
                    .ok_or(SammError::UnknownElement(id.index()))?;
                self.visitors.dispatch(*id, element, &mut cx)?;
            }
        }

        report.visited = plan.len();
        report.triples = scratch.triple_count() as usize;
        *model = scratch;
        info!(
            "Synchronized {namespace}: {} roots, {} elements written, {} external skipped, {} triples",
            report.roots,
            report.visited,
            report.skipped_external.len(),
            report.triples
        );
        Ok(report)
    }

    /// Decide which elements the pass writes, in order, without touching the store.
    fn plan(
        &self,
        graph: &ElementGraph,
        registry: &LoadedFilesService,
    ) -> Result<(Vec<ElementId>, SyncReport)> {
        let file = registry
            .current_loaded_file()
            .ok_or(SammError::NoCurrentFile)?;
        if !file.has_rdf_model() {
            return Err(SammError::EmptyModel);
        }

        let cached = file.cached_file.get_all_elements();
        let roots = graph.roots(&cached);
        let mut report = SyncReport {
            roots: roots.len(),
            ..SyncReport::default()
        };

        let mut visited: HashSet<ElementId> = HashSet::new();
        let mut plan = Vec::new();
        // Cached elements only reachable through a cycle have no root; walk them last.
        for start in roots.iter().chain(&cached) {
            let mut stack = vec![*start];
            while let Some(id) = stack.pop() {
                if !visited.insert(id) {
                    continue;
                }
                let element = graph
                    .get(id)
                    .ok_or(SammError::UnknownElement(id.index()))?;
                if element.is_predefined {
                    report.skipped_predefined += 1;
                    continue;
                }
                if registry.is_element_extern(element) {
                    debug!("Skipping external element {}", element.urn().unwrap_or_default());
                    report
                        .skipped_external
                        .push(element.urn().unwrap_or_default().to_string());
                    continue;
                }
                self.visitors.ensure_supported(element)?;
                plan.push(id);
                for child in graph.children(id).into_iter().rev() {
                    if !visited.contains(&child) {
                        stack.push(child);
                    }
                }
            }
        }
        Ok((plan, report))
    }
}

impl Default for ModelSynchronizer {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// SyncScheduler
// ---------------------------------------------------------------------------

/// Completion callback of a synchronization request.
pub type SyncCallback<'cb> = Box<dyn FnOnce(std::result::Result<&SyncReport, &SammError>) + 'cb>;

/// How a request was taken up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncRequest {
    /// A new pass was scheduled.
    Scheduled,
    /// A pass was already pending or running; the caller waits for that one.
    Coalesced,
}

/// Single-slot request queue: at most one pass is pending or running, and every
/// request made before a pass starts is answered by that pass.
///
/// A waiter's result may reflect edits made before its own request; callers must
/// not assume otherwise.
#[derive(Default)]
pub struct SyncScheduler<'cb> {
    pending: bool,
    working: bool,
    waiters: Vec<SyncCallback<'cb>>,
    passes: u64,
}

impl<'cb> SyncScheduler<'cb> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a pass; `callback` runs once the next pass completes.
    pub fn request(
        &mut self,
        callback: impl FnOnce(std::result::Result<&SyncReport, &SammError>) + 'cb,
    ) -> SyncRequest {
        self.waiters.push(Box::new(callback));
        if self.pending || self.working {
            debug!("Synchronization already requested, coalescing");
            return SyncRequest::Coalesced;
        }
        self.pending = true;
        SyncRequest::Scheduled
    }

    /// Run the pending pass, if any, and notify every waiter.
    ///
    /// A pass always runs to completion.
    pub fn run_pending(
        &mut self,
        synchronizer: &ModelSynchronizer,
        graph: &ElementGraph,
        registry: &mut LoadedFilesService,
    ) -> Option<Result<SyncReport>> {
        if !self.pending {
            return None;
        }
        self.pending = false;
        self.working = true;
        let outcome = synchronizer.update_rdf_store(graph, registry);
        self.passes += 1;
        self.working = false;

        for waiter in self.waiters.drain(..) {
            waiter(outcome.as_ref());
        }
        Some(outcome)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn is_working(&self) -> bool {
        self.working
    }

    /// Number of passes run so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }
}
