//! Tree construction from a ZIP archive held in memory.

use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::sync::Arc;

use tracing::{debug, warn};
use zip::ZipArchive;

use crate::error::{TreeError, TreeResult};
use crate::path;
use crate::tree::Tree;
use crate::types::{ArchiveEntryHandle, DirectoryNode, FileNode, Node, SourceHandle};

pub const ARCHIVE_SUFFIX: &str = ".zip";

/// 50 MiB
pub const DEFAULT_MAX_ARCHIVE_BYTES: u64 = 50 * 1024 * 1024;

/// Upper bound on the buffer reserved up front for one entry
const INITIAL_READ_CAPACITY: u64 = 1024 * 1024;

/// Canonical file path -> entry backing it. Directories are never indexed.
pub type FileIndex = HashMap<String, ArchiveEntryHandle>;

/// An archive blob as handed over by whoever received it.
#[derive(Debug, Clone)]
pub struct ArchiveSource {
    pub file_name: String,
    /// Length reported by the provider, checked before any decoding
    pub declared_len: u64,
    pub bytes: Arc<[u8]>,
}

impl ArchiveSource {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let bytes: Arc<[u8]> = Arc::from(bytes.into());
        Self {
            file_name: file_name.into(),
            declared_len: bytes.len() as u64,
            bytes,
        }
    }

    pub fn with_declared_len(mut self, declared_len: u64) -> Self {
        self.declared_len = declared_len;
        self
    }

    /// File name with the archive suffix removed.
    pub fn root_name(&self) -> &str {
        match strip_archive_suffix(&self.file_name) {
            Some(stem) if !stem.is_empty() => stem,
            _ => &self.file_name,
        }
    }
}

/// Whether a file name carries the archive suffix (case-insensitive).
pub fn is_archive_name(file_name: &str) -> bool {
    strip_archive_suffix(file_name).is_some()
}

fn strip_archive_suffix(file_name: &str) -> Option<&str> {
    let split = file_name.len().checked_sub(ARCHIVE_SUFFIX.len())?;
    let suffix = file_name.get(split..)?;
    if suffix.eq_ignore_ascii_case(ARCHIVE_SUFFIX) {
        Some(&file_name[..split])
    } else {
        None
    }
}

/// Outcome of placing one archive entry in the tree
#[derive(Debug, PartialEq, Eq)]
enum Placement {
    File(String),
    Directory,
    /// Same name and kind already present
    Merged,
    Skipped(&'static str),
}

/// Decode the archive and build an unsorted tree plus its file index.
///
/// Fails without decoding anything when the declared length is over
/// `max_bytes`. Any decode error aborts the whole build.
pub fn build_archive_tree(source: &ArchiveSource, max_bytes: u64) -> TreeResult<Tree> {
    if source.declared_len > max_bytes {
        return Err(TreeError::SizeLimitExceeded {
            size: source.declared_len,
            limit: max_bytes,
        });
    }

    let mut archive = ZipArchive::new(Cursor::new(Arc::clone(&source.bytes)))?;
    let mut root = DirectoryNode::new(source.root_name(), "");
    let mut index = FileIndex::new();

    for i in 0..archive.len() {
        let (raw_name, is_dir) = {
            let entry = archive.by_index_raw(i)?;
            (entry.name().to_string(), entry.is_dir())
        };
        let segments = path::segments(&raw_name);
        let handle = ArchiveEntryHandle {
            index: i,
            name: raw_name.clone(),
        };
        match place(&mut root, &segments, is_dir, &handle) {
            Placement::File(file_path) => {
                index.insert(file_path, handle);
            }
            Placement::Directory | Placement::Merged => {}
            Placement::Skipped(reason) => {
                warn!(entry = %raw_name, reason, "skipping archive entry");
            }
        }
    }

    debug!(
        archive = %source.file_name,
        entries = archive.len(),
        files = index.len(),
        "decoded archive"
    );
    Ok(Tree::from_archive(
        root,
        Arc::clone(&source.bytes),
        index,
        max_bytes,
    ))
}

fn place(
    root: &mut DirectoryNode,
    segments: &[&str],
    is_dir: bool,
    handle: &ArchiveEntryHandle,
) -> Placement {
    let Some((last, parents)) = segments.split_last() else {
        return Placement::Skipped("empty path");
    };

    let mut current = root;
    for segment in parents {
        let pos = match current.children.iter().position(|c| c.name() == *segment) {
            Some(pos) => pos,
            None => {
                let dir_path = path::join(&current.path, segment);
                current
                    .children
                    .push(Node::Directory(DirectoryNode::new(*segment, dir_path)));
                current.children.len() - 1
            }
        };
        current = match &mut current.children[pos] {
            Node::Directory(dir) => dir,
            Node::File(_) => return Placement::Skipped("parent is a file"),
        };
    }

    if let Some(existing) = current.child(last) {
        return if existing.is_dir() == is_dir {
            Placement::Merged
        } else {
            Placement::Skipped("conflicts with an entry of the other kind")
        };
    }

    let node_path = path::join(&current.path, last);
    if is_dir {
        current
            .children
            .push(Node::Directory(DirectoryNode::new(*last, node_path)));
        Placement::Directory
    } else {
        current.children.push(Node::File(FileNode {
            name: last.to_string(),
            path: node_path.clone(),
            source: SourceHandle::Archive(handle.clone()),
        }));
        Placement::File(node_path)
    }
}

/// Decompress a single entry on the blocking pool.
///
/// The size recorded in the entry header is untrusted: it only bounds the
/// initial allocation, and decompression stops with `Decode` once more than
/// `max_bytes` come out.
pub async fn read_entry(
    bytes: Arc<[u8]>,
    entry: ArchiveEntryHandle,
    max_bytes: u64,
) -> TreeResult<Vec<u8>> {
    tokio::task::spawn_blocking(move || -> TreeResult<Vec<u8>> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let mut file = archive.by_index(entry.index)?;
        let capacity = file.size().min(max_bytes).min(INITIAL_READ_CAPACITY);
        let mut data = Vec::with_capacity(capacity as usize);
        file.by_ref()
            .take(max_bytes.saturating_add(1))
            .read_to_end(&mut data)?;
        if data.len() as u64 > max_bytes {
            return Err(TreeError::Decode(format!(
                "entry {} expands past {max_bytes} bytes",
                entry.name
            )));
        }
        Ok(data)
    })
    .await?
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    /// Build a ZIP in memory. Names ending in `/` become directory entries.
    pub fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for (name, contents) in entries {
            if name.ends_with('/') {
                writer.add_directory(*name, options).unwrap();
            } else {
                writer.start_file(*name, options).unwrap();
                writer.write_all(contents.as_bytes()).unwrap();
            }
        }
        writer.finish().unwrap().into_inner()
    }
}
