//! ASCII tree rendering.
//!
//! The root line carries no connector. Every other node gets `├── ` or
//! `└── ` depending on whether it is the last of its siblings, preceded by
//! one four-column unit per ancestor: `│   ` while that ancestor still has
//! siblings below it, blank otherwise. The root counts as a last ancestor,
//! so top-level entries start one unit in.

use serde::{Deserialize, Serialize};

use crate::expansion::ExpansionState;
use crate::types::{DirectoryNode, Node, NodeKind};

pub const BRANCH: &str = "├── ";
pub const LAST_BRANCH: &str = "└── ";
pub const PIPE: &str = "│   ";
pub const BLANK: &str = "    ";

pub const FOLDER_ICON: &str = "📁 ";
pub const FILE_ICON: &str = "📄 ";
pub const OPEN_MARKER: &str = "▾ ";
pub const CLOSED_MARKER: &str = "▸ ";

/// Per-node label text; connectors and prefixes are the same for both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelStyle {
    #[default]
    Plain,
    Icons,
}

fn label(name: &str, kind: NodeKind, style: LabelStyle) -> String {
    let slash = if kind == NodeKind::Directory { "/" } else { "" };
    match (style, kind) {
        (LabelStyle::Plain, _) => format!("{name}{slash}"),
        (LabelStyle::Icons, NodeKind::Directory) => format!("{FOLDER_ICON}{name}{slash}"),
        (LabelStyle::Icons, NodeKind::File) => format!("{FILE_ICON}{name}{slash}"),
    }
}

fn connector(is_last: bool) -> &'static str {
    if is_last { LAST_BRANCH } else { BRANCH }
}

/// Depth-first walk shared by the text and interactive views.
///
/// `visit` gets each child with its line prefix, last-sibling flag and depth.
/// A directory is descended into only when `descend` allows it.
fn walk<'a>(
    dir: &'a DirectoryNode,
    prefix: &str,
    depth: usize,
    descend: &dyn Fn(&DirectoryNode) -> bool,
    visit: &mut dyn FnMut(&'a Node, &str, bool, usize),
) {
    let count = dir.children.len();
    for (i, child) in dir.children.iter().enumerate() {
        let is_last = i + 1 == count;
        visit(child, prefix, is_last, depth);
        if let Node::Directory(sub) = child {
            if !sub.children.is_empty() && descend(sub) {
                let marker = if is_last { BLANK } else { PIPE };
                walk(sub, &format!("{prefix}{marker}"), depth + 1, descend, visit);
            }
        }
    }
}

/// Render the whole subtree, one line per node.
pub fn render_lines(root: &DirectoryNode, style: LabelStyle) -> Vec<String> {
    let mut lines = vec![label(&root.name, NodeKind::Directory, style)];
    walk(root, BLANK, 1, &|_| true, &mut |node, prefix, is_last, _| {
        lines.push(format!(
            "{prefix}{}{}",
            connector(is_last),
            label(node.name(), node.kind(), style)
        ));
    });
    lines
}

/// Render the whole subtree as a newline-joined document.
pub fn render_text(root: &DirectoryNode, style: LabelStyle) -> String {
    render_lines(root, style).join("\n")
}

/// One visible row of the interactive view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeRow {
    pub path: String,
    pub name: String,
    pub kind: NodeKind,
    /// 0 for the root
    pub depth: usize,
    /// Ancestor continuation markers, empty for the root
    pub prefix: String,
    pub is_last: bool,
    /// `None` for files
    pub expanded: Option<bool>,
}

impl TreeRow {
    pub fn connector(&self) -> &'static str {
        if self.depth == 0 {
            ""
        } else {
            connector(self.is_last)
        }
    }

    pub fn to_line(&self) -> String {
        let marker = match self.expanded {
            Some(true) => OPEN_MARKER,
            Some(false) => CLOSED_MARKER,
            None => "",
        };
        format!(
            "{}{}{}{}",
            self.prefix,
            self.connector(),
            marker,
            label(&self.name, self.kind, LabelStyle::Plain)
        )
    }
}

/// Rows currently visible under `state`. Collapsed directories still get a
/// row of their own; their children are skipped.
pub fn visible_rows(root: &DirectoryNode, state: &ExpansionState) -> Vec<TreeRow> {
    let mut rows = vec![TreeRow {
        path: root.path.clone(),
        name: root.name.clone(),
        kind: NodeKind::Directory,
        depth: 0,
        prefix: String::new(),
        is_last: true,
        expanded: Some(state.is_expanded(&root.path)),
    }];
    if !state.is_expanded(&root.path) {
        return rows;
    }

    let descend = |dir: &DirectoryNode| state.is_expanded(&dir.path);
    walk(root, BLANK, 1, &descend, &mut |node, prefix, is_last, depth| {
        rows.push(TreeRow {
            path: node.path().to_string(),
            name: node.name().to_string(),
            kind: node.kind(),
            depth,
            prefix: prefix.to_string(),
            is_last,
            expanded: node.is_dir().then(|| state.is_expanded(node.path())),
        });
    });
    rows
}
