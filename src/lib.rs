//! droptree: build one canonical tree from a directory or a ZIP archive and
//! render it as ASCII tree text or as an expandable row list.

pub mod backend;
pub mod backends;
pub mod builder;
pub mod config;
pub mod error;
pub mod expansion;
pub mod ingest;
pub mod logging;
pub mod path;
pub mod render;
pub mod session;
pub mod sort;
pub mod tree;
pub mod types;

// Re-export
pub use backend::*;
pub use builder::archive::{ArchiveSource, DEFAULT_MAX_ARCHIVE_BYTES, FileIndex};
pub use config::ViewerConfig;
pub use error::{TreeError, TreeResult};
pub use expansion::ExpansionState;
pub use ingest::{Source, ingest, source_from_path};
pub use render::{LabelStyle, TreeRow, render_lines, render_text, visible_rows};
pub use session::Session;
pub use tree::Tree;
pub use types::*;
