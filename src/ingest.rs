//! Turning a dropped item into a sorted tree.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::backend::DirectoryHandle;
use crate::backends::LocalDirectory;
use crate::builder::archive::{ArchiveSource, build_archive_tree, is_archive_name};
use crate::builder::directory::build_directory_tree;
use crate::config::ViewerConfig;
use crate::error::{TreeError, TreeResult};
use crate::tree::Tree;

/// What the user dropped.
pub enum Source {
    Directory(Arc<dyn DirectoryHandle>),
    Archive(ArchiveSource),
}

impl Source {
    pub fn kind(&self) -> &'static str {
        match self {
            Source::Directory(_) => "directory",
            Source::Archive(_) => "archive",
        }
    }
}

/// Build the tree for `source` and apply the canonical ordering.
pub async fn ingest(source: Source, config: &ViewerConfig) -> TreeResult<Tree> {
    let kind = source.kind();
    let mut tree = match source {
        Source::Directory(handle) => build_directory_tree(handle, config.max_concurrent_listings).await,
        Source::Archive(archive) => {
            let max = config.max_archive_bytes;
            tokio::task::spawn_blocking(move || build_archive_tree(&archive, max)).await??
        }
    };
    tree.sort();

    let stats = tree.stats();
    info!(
        source = kind,
        root = %tree.name(),
        directories = stats.directories,
        files = stats.files,
        "tree built"
    );
    Ok(tree)
}

/// Classify a local path as a directory or an archive.
///
/// Archive size is checked against the on-disk length before the file is read.
pub async fn source_from_path(path: &Path, config: &ViewerConfig) -> TreeResult<Source> {
    let metadata = tokio::fs::metadata(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => TreeError::NotFound(path.display().to_string()),
        _ => TreeError::from(e),
    })?;

    if metadata.is_dir() {
        let dir = LocalDirectory::new(path, config.page_size);
        return Ok(Source::Directory(Arc::new(dir)));
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if !metadata.is_file() || !is_archive_name(&file_name) {
        return Err(TreeError::UnsupportedInput(format!(
            "{} is neither a directory nor a .zip archive",
            path.display()
        )));
    }
    if metadata.len() > config.max_archive_bytes {
        return Err(TreeError::SizeLimitExceeded {
            size: metadata.len(),
            limit: config.max_archive_bytes,
        });
    }

    let bytes = tokio::fs::read(path).await?;
    Ok(Source::Archive(
        ArchiveSource::new(file_name, bytes).with_declared_len(metadata.len()),
    ))
}
