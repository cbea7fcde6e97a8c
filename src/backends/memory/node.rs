//! Internal node representation for the in-memory directory tree.

use std::sync::Arc;

use crate::backend::{DirectoryHandle, FileSource};
use crate::error::TreeResult;

use super::fs::MemDirectory;

/// Child of an in-memory directory - either a file or a nested directory
#[derive(Debug, Clone)]
pub(super) enum MemNode {
    File(MemFile),
    Dir(MemDirectory),
}

impl MemNode {
    pub fn name(&self) -> &str {
        match self {
            MemNode::File(f) => &f.name,
            MemNode::Dir(d) => d.name(),
        }
    }
}

/// Contents of an in-memory file
#[derive(Debug, Clone)]
pub struct MemFile {
    name: String,
    data: Arc<[u8]>,
}

impl MemFile {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: Arc::from(data.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// File size in bytes
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

#[async_trait::async_trait]
impl FileSource for MemFile {
    async fn read_all(&self) -> TreeResult<Vec<u8>> {
        Ok(self.data.to_vec())
    }

    fn describe(&self) -> String {
        format!("mem:{} ({} bytes)", self.name, self.size())
    }
}
