pub mod local;
pub mod memory;

pub use local::{LocalDirectory, LocalFile};
pub use memory::{ListingFailure, MemDirectory, MemFile};
