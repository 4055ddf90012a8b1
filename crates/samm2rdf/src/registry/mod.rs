//! Loaded documents and their element caches.

pub mod cache;
pub mod loaded_files;
pub mod namespace_file;

pub use cache::CachedFile;
pub use loaded_files::{LoadedFilesService, WORKSPACE_DUPLICATE_SUFFIX};
pub use namespace_file::NamespaceFile;
