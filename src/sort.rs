//! Canonical ordering of directory children.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::types::{DirectoryNode, Node};

/// Directories first, then files; by name within each group.
pub fn compare_nodes(a: &Node, b: &Node) -> Ordering {
    match (a.is_dir(), b.is_dir()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => compare_names(a.name(), b.name()),
    }
}

/// Collation that ignores accents and case at first, so `éclair` sorts next
/// to `eclair` rather than after `z`.
///
/// Ties fall back to the case-folded name with accents, then to raw byte
/// order, keeping the ordering total (`"Readme"` and `"readme"` can both
/// exist on disk).
pub fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| case_folded(a).cmp(case_folded(b)))
        .then_with(|| a.cmp(b))
}

fn base_letters(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn case_folded(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd().flat_map(char::to_lowercase)
}

/// Sort `dir`'s children and recurse into every subdirectory.
pub fn sort_directory(dir: &mut DirectoryNode) {
    dir.children.sort_by(compare_nodes);
    for child in &mut dir.children {
        if let Node::Directory(sub) = child {
            sort_directory(sub);
        }
    }
}

/// Whether `dir` and all its descendants already satisfy the ordering.
pub fn is_sorted(dir: &DirectoryNode) -> bool {
    dir.children
        .windows(2)
        .all(|pair| compare_nodes(&pair[0], &pair[1]) != Ordering::Greater)
        && dir
            .children
            .iter()
            .filter_map(Node::as_directory)
            .all(is_sorted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ArchiveEntryHandle, FileNode, SourceHandle};

    fn file(name: &str) -> Node {
        Node::File(FileNode {
            name: name.into(),
            path: name.into(),
            source: SourceHandle::Archive(ArchiveEntryHandle {
                index: 0,
                name: name.into(),
            }),
        })
    }

    fn dir(name: &str, children: Vec<Node>) -> Node {
        Node::Directory(DirectoryNode {
            name: name.into(),
            path: name.into(),
            children,
        })
    }

    fn names(dir: &DirectoryNode) -> Vec<&str> {
        dir.children.iter().map(Node::name).collect()
    }

    #[test]
    fn test_directories_before_files() {
        let mut root = DirectoryNode::new("root", "");
        root.children = vec![file("a.txt"), dir("z", vec![]), file("B.txt"), dir("m", vec![])];
        sort_directory(&mut root);
        assert_eq!(names(&root), vec!["m", "z", "a.txt", "B.txt"]);
    }

    #[test]
    fn test_sort_is_recursive() {
        let mut root = DirectoryNode::new("root", "");
        root.children = vec![dir(
            "outer",
            vec![file("y"), dir("inner", vec![file("b"), file("a")]), file("x")],
        )];
        sort_directory(&mut root);

        let outer = root.children[0].as_directory().unwrap();
        assert_eq!(names(outer), vec!["inner", "x", "y"]);
        let inner = outer.children[0].as_directory().unwrap();
        assert_eq!(names(inner), vec!["a", "b"]);
        assert!(is_sorted(&root));
    }

    #[test]
    fn test_compare_names() {
        assert_eq!(compare_names("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_names("Zoo", "apple"), Ordering::Greater);
        assert_eq!(compare_names("Readme", "readme"), Ordering::Less);
        assert_eq!(compare_names("same", "same"), Ordering::Equal);
        assert_eq!(compare_names("file10", "file2"), Ordering::Less);
    }

    #[test]
    fn test_accented_names_sort_with_their_base_letter() {
        let mut names = vec!["zebra", "éclair", "fig", "Émile", "apple"];
        names.sort_by(|a, b| compare_names(a, b));
        assert_eq!(names, vec!["apple", "éclair", "Émile", "fig", "zebra"]);
    }

    #[test]
    fn test_accent_only_differences_stay_ordered() {
        assert_eq!(compare_names("resume", "résumé"), Ordering::Less);
        assert_eq!(compare_names("résumé", "resumes"), Ordering::Less);
        assert_eq!(compare_names("Ärger", "ärger"), Ordering::Less);
        // Precomposed and decomposed spellings differ only in bytes.
        assert_ne!(compare_names("caf\u{e9}", "cafe\u{301}"), Ordering::Equal);
    }

    #[test]
    fn test_is_sorted_detects_disorder() {
        let mut root = DirectoryNode::new("root", "");
        root.children = vec![file("a"), dir("b", vec![])];
        assert!(!is_sorted(&root));
        sort_directory(&mut root);
        assert!(is_sorted(&root));
    }
}
