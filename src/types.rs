//! Core tree types: nodes, node kinds and the opaque file source handles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::backend::FileSource;
use crate::path;

/// Enum for distinguishing node types at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Directory,
    File,
}

/// Backing handle of a live filesystem file.
#[derive(Clone)]
pub struct LiveFileHandle(Arc<dyn FileSource>);

impl LiveFileHandle {
    pub fn new(source: impl FileSource) -> Self {
        Self(Arc::new(source))
    }

    pub fn source(&self) -> &dyn FileSource {
        self.0.as_ref()
    }
}

impl fmt::Debug for LiveFileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LiveFileHandle").field(&self.0.describe()).finish()
    }
}

/// Position of a file inside the archive it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArchiveEntryHandle {
    pub index: usize,
    /// Raw entry name as stored in the archive
    pub name: String,
}

/// What backs the contents of a file leaf.
#[derive(Debug, Clone)]
pub enum SourceHandle {
    Live(LiveFileHandle),
    Archive(ArchiveEntryHandle),
}

#[derive(Debug, Clone, Serialize)]
pub struct FileNode {
    pub name: String,
    pub path: String,
    #[serde(skip)]
    pub source: SourceHandle,
}

#[derive(Debug, Clone, Serialize)]
pub struct DirectoryNode {
    pub name: String,
    pub path: String,
    pub children: Vec<Node>,
}

/// A single entry of the hierarchy
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Directory(DirectoryNode),
    File(FileNode),
}

/// Counts of the nodes below a directory, the directory itself excluded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    pub directories: usize,
    pub files: usize,
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Directory(d) => &d.name,
            Node::File(f) => &f.name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Node::Directory(d) => &d.path,
            Node::File(f) => &f.path,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Directory(_) => NodeKind::Directory,
            Node::File(_) => NodeKind::File,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Node::Directory(_))
    }

    pub fn as_directory(&self) -> Option<&DirectoryNode> {
        match self {
            Node::Directory(d) => Some(d),
            Node::File(_) => None,
        }
    }
}

impl DirectoryNode {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            children: Vec::new(),
        }
    }

    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name() == name)
    }

    /// Look up a descendant by canonical path, relative to this directory.
    pub fn find(&self, path: &str) -> Option<&Node> {
        let mut segments = path::segments(path).into_iter();
        let mut current = self.child(segments.next()?)?;
        for segment in segments {
            current = current.as_directory()?.child(segment)?;
        }
        Some(current)
    }

    /// Paths of this directory and every directory below it, pre-order.
    pub fn directory_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_directory_paths(self, &mut paths);
        paths
    }

    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        for child in &self.children {
            match child {
                Node::Directory(d) => {
                    let nested = d.stats();
                    stats.directories += 1 + nested.directories;
                    stats.files += nested.files;
                }
                Node::File(_) => stats.files += 1,
            }
        }
        stats
    }
}

fn collect_directory_paths(dir: &DirectoryNode, out: &mut Vec<String>) {
    out.push(dir.path.clone());
    for child in &dir.children {
        if let Node::Directory(d) = child {
            collect_directory_paths(d, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn archive_file(name: &str, path: &str) -> Node {
        Node::File(FileNode {
            name: name.into(),
            path: path.into(),
            source: SourceHandle::Archive(ArchiveEntryHandle {
                index: 0,
                name: path.into(),
            }),
        })
    }

    fn sample() -> DirectoryNode {
        let mut utils = DirectoryNode::new("utils", "src/utils");
        utils.children.push(archive_file("helpers.js", "src/utils/helpers.js"));
        let mut src = DirectoryNode::new("src", "src");
        src.children.push(archive_file("index.js", "src/index.js"));
        src.children.push(Node::Directory(utils));
        let mut root = DirectoryNode::new("proj", "");
        root.children.push(archive_file("README.md", "README.md"));
        root.children.push(Node::Directory(src));
        root
    }

    #[test]
    fn test_find() {
        let root = sample();
        assert_eq!(root.find("README.md").map(Node::kind), Some(NodeKind::File));
        assert_eq!(root.find("src/utils").map(Node::kind), Some(NodeKind::Directory));
        assert_eq!(
            root.find("src/utils/helpers.js").map(Node::path),
            Some("src/utils/helpers.js")
        );
        assert!(root.find("src/missing").is_none());
        assert!(root.find("README.md/nested").is_none());
        assert!(root.find("").is_none());
    }

    #[test]
    fn test_directory_paths() {
        let root = sample();
        assert_eq!(root.directory_paths(), vec!["", "src", "src/utils"]);
    }

    #[test]
    fn test_stats() {
        let root = sample();
        assert_eq!(
            root.stats(),
            TreeStats {
                directories: 2,
                files: 3
            }
        );
        assert_eq!(DirectoryNode::new("empty", "").stats(), TreeStats::default());
    }

    #[test]
    fn test_serialize_skips_source() {
        let root = sample();
        let json = serde_json::to_value(&root).unwrap();
        assert_eq!(json["name"], "proj");
        assert_eq!(json["children"][0]["kind"], "file");
        assert!(json["children"][0].get("source").is_none());
        assert_eq!(json["children"][1]["kind"], "directory");
        assert_eq!(json["children"][1]["children"][1]["path"], "src/utils");
    }
}
