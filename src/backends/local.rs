//! Directory handles over the local filesystem, backed by `tokio::fs`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;

use crate::backend::{DirectoryHandle, Entry, EntryReader, FileSource};
use crate::error::TreeResult;
use crate::types::LiveFileHandle;

/// A directory on the local filesystem
#[derive(Debug, Clone)]
pub struct LocalDirectory {
    name: String,
    path: PathBuf,
    page_size: usize,
}

impl LocalDirectory {
    /// Open `path` as a directory handle, naming it after its last component.
    pub fn new(path: impl Into<PathBuf>, page_size: usize) -> Self {
        let path = path.into();
        let name = display_name(&path);
        Self {
            name,
            path,
            page_size: page_size.max(1),
        }
    }
}

/// Last path component, falling back to the full path for roots like `/` or `.`.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .or_else(|| {
            std::path::absolute(path)
                .ok()
                .and_then(|abs| abs.file_name().map(|n| n.to_string_lossy().into_owned()))
        })
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[async_trait::async_trait]
impl DirectoryHandle for LocalDirectory {
    fn name(&self) -> &str {
        &self.name
    }

    async fn open_reader(&self) -> TreeResult<Box<dyn EntryReader>> {
        let inner = fs::read_dir(&self.path).await?;
        Ok(Box::new(LocalReader {
            inner,
            page_size: self.page_size,
        }))
    }
}

struct LocalReader {
    inner: fs::ReadDir,
    page_size: usize,
}

#[async_trait::async_trait]
impl EntryReader for LocalReader {
    async fn next_batch(&mut self) -> TreeResult<Vec<Entry>> {
        let mut page = Vec::with_capacity(self.page_size);
        while page.len() < self.page_size {
            let Some(dir_entry) = self.inner.next_entry().await? else {
                break;
            };
            let name = dir_entry.file_name().to_string_lossy().into_owned();
            let path = dir_entry.path();
            // Symlinks are not followed; they show up as plain files.
            let entry = if dir_entry.file_type().await?.is_dir() {
                Entry::Directory(Arc::new(LocalDirectory {
                    name,
                    path,
                    page_size: self.page_size,
                }))
            } else {
                Entry::File {
                    name,
                    handle: LiveFileHandle::new(LocalFile { path }),
                }
            };
            page.push(entry);
        }
        Ok(page)
    }
}

/// A file on the local filesystem
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
}

impl LocalFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl FileSource for LocalFile {
    async fn read_all(&self) -> TreeResult<Vec<u8>> {
        Ok(fs::read(&self.path).await?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
