//! Tree construction from a live directory handle.

use std::collections::HashSet;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{self, BoxFuture};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::backend::{DirectoryHandle, Entry, read_all_entries};
use crate::error::{TreeError, TreeResult};
use crate::path;
use crate::tree::Tree;
use crate::types::{DirectoryNode, FileNode, Node, SourceHandle};

/// Directory listings allowed to be open at the same time during one build
pub const DEFAULT_MAX_CONCURRENT_LISTINGS: usize = 16;

/// Walk `root` recursively and build an unsorted tree.
///
/// A directory whose listing cannot be opened or fails part-way gets an
/// empty children list; the rest of the walk carries on. Sibling subtrees
/// are built concurrently and joined before their parent completes, with at
/// most `max_concurrent_listings` listings open across the whole walk.
pub async fn build_directory_tree(
    root: Arc<dyn DirectoryHandle>,
    max_concurrent_listings: usize,
) -> Tree {
    let limiter = Arc::new(Semaphore::new(max_concurrent_listings.max(1)));
    let name = root.name().to_string();
    let root = build_level(root, name, String::new(), limiter).await;
    Tree::from_directory(root)
}

fn build_level(
    handle: Arc<dyn DirectoryHandle>,
    name: String,
    dir_path: String,
    limiter: Arc<Semaphore>,
) -> BoxFuture<'static, DirectoryNode> {
    async move {
        let entries = match list(handle.as_ref(), &limiter).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %dir_path, error = %e, "directory listing failed, treating as empty");
                Vec::new()
            }
        };
        debug!(path = %dir_path, entries = entries.len(), "listed directory");

        let mut seen = HashSet::new();
        let children = future::join_all(
            entries
                .into_iter()
                .filter(|entry| {
                    let fresh = seen.insert(entry.name().to_string());
                    if !fresh {
                        warn!(path = %dir_path, name = entry.name(), "duplicate entry name, keeping the first");
                    }
                    fresh
                })
                .map(|entry| {
                    let child_path = path::join(&dir_path, entry.name());
                    match entry {
                        Entry::Directory(dir) => {
                            let child_name = dir.name().to_string();
                            build_level(dir, child_name, child_path, Arc::clone(&limiter))
                                .map(Node::Directory)
                                .boxed()
                        }
                        Entry::File { name, handle } => future::ready(Node::File(FileNode {
                            name,
                            path: child_path,
                            source: SourceHandle::Live(handle),
                        }))
                        .boxed(),
                    }
                }),
        )
        .await;

        DirectoryNode {
            name,
            path: dir_path,
            children,
        }
    }
    .boxed()
}

/// Open and drain one listing while holding a permit. The permit is released
/// before any child is visited.
async fn list(handle: &dyn DirectoryHandle, limiter: &Semaphore) -> TreeResult<Vec<Entry>> {
    let _permit = limiter
        .acquire()
        .await
        .map_err(|e| TreeError::Task(e.to_string()))?;
    let mut reader = handle.open_reader().await?;
    read_all_entries(reader.as_mut()).await
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::backend::EntryReader;

    /// Open/peak reader counts shared by every directory in a test tree
    #[derive(Default)]
    struct Gauge {
        open: AtomicUsize,
        peak: AtomicUsize,
    }

    /// A directory of `width` empty subdirectories, or a leaf directory with
    /// one file when `width` is zero.
    struct CountingDir {
        name: String,
        width: usize,
        gauge: Arc<Gauge>,
    }

    struct CountingReader {
        pending: Vec<Entry>,
        gauge: Arc<Gauge>,
    }

    impl Drop for CountingReader {
        fn drop(&mut self) {
            self.gauge.open.fetch_sub(1, Ordering::SeqCst);
        }
    }

    #[async_trait::async_trait]
    impl DirectoryHandle for CountingDir {
        fn name(&self) -> &str {
            &self.name
        }

        async fn open_reader(&self) -> TreeResult<Box<dyn EntryReader>> {
            let open = self.gauge.open.fetch_add(1, Ordering::SeqCst) + 1;
            self.gauge.peak.fetch_max(open, Ordering::SeqCst);

            let pending = if self.width == 0 {
                vec![Entry::File {
                    name: "leaf.txt".into(),
                    handle: crate::types::LiveFileHandle::new(crate::backends::MemFile::new(
                        "leaf.txt", "x",
                    )),
                }]
            } else {
                (0..self.width)
                    .map(|i| {
                        Entry::Directory(Arc::new(CountingDir {
                            name: format!("d{i:03}"),
                            width: 0,
                            gauge: Arc::clone(&self.gauge),
                        }))
                    })
                    .collect()
            };
            Ok(Box::new(CountingReader {
                pending,
                gauge: Arc::clone(&self.gauge),
            }))
        }
    }

    #[async_trait::async_trait]
    impl EntryReader for CountingReader {
        async fn next_batch(&mut self) -> TreeResult<Vec<Entry>> {
            // Give sibling listings a chance to run while this one is open.
            tokio::task::yield_now().await;
            let take = self.pending.len().min(4);
            Ok(self.pending.drain(..take).collect())
        }
    }

    #[tokio::test]
    async fn test_open_listings_stay_under_limit() {
        let gauge = Arc::new(Gauge::default());
        let root = Arc::new(CountingDir {
            name: "wide".into(),
            width: 200,
            gauge: Arc::clone(&gauge),
        });

        let tree = build_directory_tree(root, 3).await;

        assert!(gauge.peak.load(Ordering::SeqCst) <= 3);
        assert_eq!(gauge.open.load(Ordering::SeqCst), 0);
        let stats = tree.stats();
        assert_eq!(stats.directories, 200);
        assert_eq!(stats.files, 200);
        assert!(
            tree.root()
                .children
                .iter()
                .filter_map(Node::as_directory)
                .all(|d| d.children.len() == 1)
        );
    }

    #[tokio::test]
    async fn test_zero_limit_still_makes_progress() {
        let gauge = Arc::new(Gauge::default());
        let root = Arc::new(CountingDir {
            name: "wide".into(),
            width: 5,
            gauge: Arc::clone(&gauge),
        });
        let tree = build_directory_tree(root, 0).await;
        assert_eq!(gauge.peak.load(Ordering::SeqCst), 1);
        assert_eq!(tree.stats().files, 5);
    }
}
