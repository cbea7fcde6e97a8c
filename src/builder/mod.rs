//! The two tree producers. Both hand back an unsorted [`Tree`](crate::tree::Tree);
//! ordering is applied afterwards by the ingestion pipeline.

pub mod archive;
pub mod directory;

pub use archive::build_archive_tree;
pub use directory::build_directory_tree;
