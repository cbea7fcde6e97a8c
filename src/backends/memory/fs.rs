//! Core MemDirectory implementation.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::backend::{DirectoryHandle, Entry, EntryReader};
use crate::error::{TreeError, TreeResult};
use crate::types::LiveFileHandle;

use super::node::{MemFile, MemNode};

/// Page size used when none is configured
pub const DEFAULT_PAGE_SIZE: usize = 16;

/// How listing a directory should fail, for exercising degraded reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingFailure {
    /// Opening the listing fails outright
    Unreadable,
    /// The first page is served, the second read fails
    AfterFirstPage,
}

/// In-memory directory, usable anywhere a live directory handle is expected
#[derive(Debug, Clone)]
pub struct MemDirectory {
    name: String,
    children: Vec<MemNode>,
    page_size: usize,
    failure: Option<ListingFailure>,
}

impl MemDirectory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            failure: None,
        }
    }

    /// Add a file. Children keep insertion order when listed.
    pub fn with_file(mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.children.push(MemNode::File(MemFile::new(name, data)));
        self
    }

    pub fn with_dir(mut self, dir: MemDirectory) -> Self {
        self.children.push(MemNode::Dir(dir));
        self
    }

    /// Entries served per page. Zero is treated as one.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_failure(mut self, failure: ListingFailure) -> Self {
        self.failure = Some(failure);
        self
    }

    pub fn child_names(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(MemNode::name)
    }

    pub fn into_handle(self) -> Arc<dyn DirectoryHandle> {
        Arc::new(self)
    }

    fn to_entry(node: &MemNode) -> Entry {
        match node {
            MemNode::Dir(dir) => Entry::Directory(Arc::new(dir.clone())),
            MemNode::File(file) => Entry::File {
                name: file.name().to_string(),
                handle: LiveFileHandle::new(file.clone()),
            },
        }
    }
}

#[async_trait::async_trait]
impl DirectoryHandle for MemDirectory {
    fn name(&self) -> &str {
        &self.name
    }

    async fn open_reader(&self) -> TreeResult<Box<dyn EntryReader>> {
        if self.failure == Some(ListingFailure::Unreadable) {
            return Err(TreeError::Io(format!("permission denied: {}", self.name)));
        }
        Ok(Box::new(MemReader {
            directory: self.name.clone(),
            pending: self.children.iter().map(Self::to_entry).collect(),
            page_size: self.page_size,
            fail_after_first_page: self.failure == Some(ListingFailure::AfterFirstPage),
            pages_served: 0,
        }))
    }
}

struct MemReader {
    directory: String,
    pending: VecDeque<Entry>,
    page_size: usize,
    fail_after_first_page: bool,
    pages_served: usize,
}

#[async_trait::async_trait]
impl EntryReader for MemReader {
    async fn next_batch(&mut self) -> TreeResult<Vec<Entry>> {
        if self.fail_after_first_page && self.pages_served >= 1 {
            return Err(TreeError::Io(format!(
                "listing interrupted: {}",
                self.directory
            )));
        }
        let take = self.page_size.min(self.pending.len());
        let page: Vec<Entry> = self.pending.drain(..take).collect();
        self.pages_served += 1;
        Ok(page)
    }
}
