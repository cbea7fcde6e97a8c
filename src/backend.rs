use std::sync::Arc;

use crate::error::TreeResult;
use crate::types::LiveFileHandle;

/// A live directory that can list its immediate children.
#[async_trait::async_trait]
pub trait DirectoryHandle: Send + Sync + 'static {
    /// Name of this directory (a single path segment).
    fn name(&self) -> &str;

    /// Start listing entries. Listings are paginated; see [`EntryReader`].
    async fn open_reader(&self) -> TreeResult<Box<dyn EntryReader>>;
}

/// Paginated listing of one directory.
#[async_trait::async_trait]
pub trait EntryReader: Send {
    /// Next page of entries. An empty page means the listing is exhausted.
    async fn next_batch(&mut self) -> TreeResult<Vec<Entry>>;
}

/// Readable contents behind a live file leaf.
#[async_trait::async_trait]
pub trait FileSource: Send + Sync + 'static {
    async fn read_all(&self) -> TreeResult<Vec<u8>>;

    /// Short human-readable identity, used in debug output.
    fn describe(&self) -> String;
}

/// One child of a listed directory.
pub enum Entry {
    Directory(Arc<dyn DirectoryHandle>),
    File { name: String, handle: LiveFileHandle },
}

impl Entry {
    pub fn name(&self) -> &str {
        match self {
            Entry::Directory(dir) => dir.name(),
            Entry::File { name, .. } => name,
        }
    }
}

/// Drain a reader until it reports an empty page.
pub async fn read_all_entries(reader: &mut dyn EntryReader) -> TreeResult<Vec<Entry>> {
    let mut entries = Vec::new();
    loop {
        let batch = reader.next_batch().await?;
        if batch.is_empty() {
            return Ok(entries);
        }
        entries.extend(batch);
    }
}
