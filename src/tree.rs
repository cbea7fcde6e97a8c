//! The built hierarchy and the data needed to resolve file contents.

use std::sync::Arc;

use crate::builder::archive::{self, FileIndex};
use crate::error::{TreeError, TreeResult};
use crate::path;
use crate::sort;
use crate::types::{DirectoryNode, Node, SourceHandle, TreeStats};

/// Archive bytes kept alive for the lifetime of the tree, plus its index.
#[derive(Debug, Clone)]
struct ArchiveContents {
    bytes: Arc<[u8]>,
    index: FileIndex,
    /// Ceiling on the decompressed size of any one entry
    entry_limit: u64,
}

/// A fully built hierarchy with exactly one root directory.
#[derive(Debug, Clone)]
pub struct Tree {
    root: DirectoryNode,
    archive: Option<ArchiveContents>,
}

impl Tree {
    pub fn from_directory(root: DirectoryNode) -> Self {
        Self {
            root,
            archive: None,
        }
    }

    pub(crate) fn from_archive(
        root: DirectoryNode,
        bytes: Arc<[u8]>,
        index: FileIndex,
        entry_limit: u64,
    ) -> Self {
        Self {
            root,
            archive: Some(ArchiveContents {
                bytes,
                index,
                entry_limit,
            }),
        }
    }

    pub fn root(&self) -> &DirectoryNode {
        &self.root
    }

    pub fn name(&self) -> &str {
        &self.root.name
    }

    /// Present only for trees built from an archive.
    pub fn file_index(&self) -> Option<&FileIndex> {
        self.archive.as_ref().map(|a| &a.index)
    }

    pub fn find(&self, path: &str) -> Option<&Node> {
        self.root.find(path)
    }

    pub fn stats(&self) -> TreeStats {
        self.root.stats()
    }

    /// Every directory path, the root's empty path first.
    pub fn directory_paths(&self) -> Vec<String> {
        self.root.directory_paths()
    }

    /// Apply the canonical ordering at every depth.
    pub fn sort(&mut self) {
        sort::sort_directory(&mut self.root);
    }

    /// Read the contents of the file at `path`.
    ///
    /// Archive-backed files are resolved through the file index and
    /// decompressed off the async runtime.
    pub async fn read_file(&self, path: &str) -> TreeResult<Vec<u8>> {
        let canonical = path::canonical(path);

        if let Some(archive) = &self.archive {
            if let Some(entry) = archive.index.get(&canonical) {
                return archive::read_entry(
                    Arc::clone(&archive.bytes),
                    entry.clone(),
                    archive.entry_limit,
                )
                .await;
            }
        }

        match self.root.find(&canonical) {
            Some(Node::File(file)) => match &file.source {
                SourceHandle::Live(handle) => handle.source().read_all().await,
                SourceHandle::Archive(_) => Err(TreeError::NotFound(canonical)),
            },
            Some(Node::Directory(_)) => Err(TreeError::NotAFile(canonical)),
            None if canonical.is_empty() => Err(TreeError::NotAFile(canonical)),
            None => Err(TreeError::NotFound(canonical)),
        }
    }
}
