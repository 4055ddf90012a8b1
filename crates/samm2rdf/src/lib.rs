//! Synchronization between SAMM aspect model element graphs and RDF stores.
//!
//! Elements live in an [`ElementGraph`]; the documents they come from are tracked
//! by a [`LoadedFilesService`]. [`ModelSynchronizer`] writes the current file's
//! elements into its RDF store, [`serialize_model`] renders a store as canonical
//! Turtle, and [`instantiate_file`] goes the other way.

pub mod config;
pub mod emitter;
pub mod error;
pub mod instantiator;
pub mod model;
pub mod naming;
pub mod registry;
pub mod store;
pub mod sync;

pub use emitter::turtle::{serialize_model, SerializerOptions, TurtleSerializer};
pub use error::{Result, SammError};
pub use instantiator::{instantiate_file, InstantiationReport};
pub use model::element::{ElementId, ElementKind, NamedElement};
pub use model::graph::ElementGraph;
pub use naming::{resolve_element_naming, resolve_meta_model_element};
pub use registry::{CachedFile, LoadedFilesService, NamespaceFile};
pub use store::{RdfModel, RdfStore};
pub use sync::{ModelSynchronizer, SyncReport, SyncScheduler};
