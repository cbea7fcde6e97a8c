//! The currently loaded tree together with its expansion state.

use std::path::Path;

use crate::config::ViewerConfig;
use crate::error::TreeResult;
use crate::expansion::ExpansionState;
use crate::ingest::{Source, ingest, source_from_path};
use crate::render::{self, LabelStyle, TreeRow};
use crate::tree::Tree;

#[derive(Debug)]
struct Loaded {
    tree: Tree,
    expansion: ExpansionState,
}

/// Holds at most one tree. Loading takes `&mut self`, so two ingestions can
/// never race on the same session.
#[derive(Debug, Default)]
pub struct Session {
    config: ViewerConfig,
    current: Option<Loaded>,
}

impl Session {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            current: None,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Replace the current tree with one built from `source`.
    ///
    /// The previous tree is dropped before building starts; on failure the
    /// session is left empty.
    pub async fn load(&mut self, source: Source) -> TreeResult<&Tree> {
        self.current = None;
        let tree = ingest(source, &self.config).await?;
        let expansion = ExpansionState::for_tree(&tree, self.config.collapsed_by_default);
        let loaded = self.current.insert(Loaded { tree, expansion });
        Ok(&loaded.tree)
    }

    pub async fn load_path(&mut self, path: &Path) -> TreeResult<&Tree> {
        self.current = None;
        let source = source_from_path(path, &self.config).await?;
        self.load(source).await
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn tree(&self) -> Option<&Tree> {
        self.current.as_ref().map(|l| &l.tree)
    }

    pub fn expansion(&self) -> Option<&ExpansionState> {
        self.current.as_ref().map(|l| &l.expansion)
    }

    /// Returns the new state of `path`, or `None` with no tree loaded.
    pub fn toggle(&mut self, path: &str) -> Option<bool> {
        self.current.as_mut().map(|l| l.expansion.toggle(path))
    }

    pub fn expand_all(&mut self) {
        if let Some(loaded) = &mut self.current {
            loaded.expansion.expand_all(&loaded.tree);
        }
    }

    pub fn collapse_all(&mut self) {
        if let Some(loaded) = &mut self.current {
            loaded.expansion.collapse_all();
        }
    }

    /// False when no tree is loaded.
    pub fn is_fully_expanded(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|l| l.expansion.is_fully_expanded(&l.tree))
    }

    /// Full text rendering, independent of the expansion state.
    pub fn text(&self, style: LabelStyle) -> Option<String> {
        self.tree().map(|t| render::render_text(t.root(), style))
    }

    pub fn rows(&self) -> Vec<TreeRow> {
        self.current
            .as_ref()
            .map(|l| render::visible_rows(l.tree.root(), &l.expansion))
            .unwrap_or_default()
    }
}
