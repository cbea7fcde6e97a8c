//! In-memory directory backend.

mod fs;
mod node;


pub use fs::{DEFAULT_PAGE_SIZE, ListingFailure, MemDirectory};
pub use node::MemFile;
