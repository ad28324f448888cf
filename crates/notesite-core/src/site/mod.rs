use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::cache::SiteSnapshot;
use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::graph::LinkGraph;
use crate::model::{FileName, Note};
use crate::render::{RenderedLink, UnresolvedLink};
use crate::slug_index::SlugIndex;
use crate::tree::{flatten, join_route, TreeNode};
use crate::vfs::FileSystem;

mod assembler;
mod builder;
mod context;

#[cfg(test)]
mod tests;

pub use assembler::assemble_note;
pub use builder::{BuildStats, SiteBuilder};
pub use context::SiteContext;

/// Result of a finished build.
///
/// Everything here is read-only; a changed note collection means a new build.
pub struct Site {
    pub(crate) config: SiteConfig,
    pub(crate) notes: BTreeMap<FileName, Note>,
    pub(crate) index: SlugIndex,
    pub(crate) graph: LinkGraph,
    pub(crate) pages: HashMap<FileName, Vec<RenderedLink>>,
    pub(crate) unresolved: Vec<UnresolvedLink>,
    pub(crate) tree: TreeNode,
    pub(crate) stats: BuildStats,
}

impl Site {
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn note(&self, file_name: &str) -> Option<&Note> {
        self.notes.get(file_name)
    }

    pub fn note_by_slug(&self, slug: &str) -> Option<&Note> {
        let file_name = self.index.file_name_of(slug)?;
        self.notes.get(&file_name)
    }

    /// Notes ordered by file name
    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.notes.values()
    }

    /// Resolved links of a note, in document order
    pub fn links_of(&self, file_name: &str) -> &[RenderedLink] {
        self.pages
            .get(file_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn outgoing(&self, file_name: &str) -> &[FileName] {
        self.graph.outgoing(file_name)
    }

    pub fn backlinks(&self, file_name: &str) -> &[FileName] {
        self.graph.backlinks(file_name)
    }

    pub fn unique_backlinks(&self, file_name: &str) -> Vec<&FileName> {
        self.graph.unique_backlinks(file_name)
    }

    /// Route of an indexed slug, `None` for unknown slugs
    pub fn route_path(&self, slug: &str) -> Option<String> {
        self.index.path_of(slug)?;
        Some(join_route(&self.config.site.route_prefix, slug))
    }

    pub fn tree(&self) -> &TreeNode {
        &self.tree
    }

    pub fn flat_tree(&self) -> Vec<&TreeNode> {
        flatten(&self.tree)
    }

    pub fn unresolved(&self) -> &[UnresolvedLink] {
        &self.unresolved
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    pub fn index(&self) -> &SlugIndex {
        &self.index
    }

    pub fn graph(&self) -> &LinkGraph {
        &self.graph
    }

    pub fn snapshot(&self) -> SiteSnapshot {
        let digests = self
            .notes
            .iter()
            .map(|(name, note)| (name.clone(), note.digest.clone()))
            .collect();
        SiteSnapshot::new(self.index.clone(), self.graph.clone(), digests)
    }

    pub fn save_snapshot(&self, path: &Path, fs: &dyn FileSystem) -> Result<(), SiteError> {
        self.snapshot().save(path, fs)
    }

    /// Notes whose content changed relative to an earlier snapshot
    pub fn changed_since<'a>(&'a self, snapshot: &SiteSnapshot) -> Vec<&'a FileName> {
        snapshot.changed_since(self.notes.iter().map(|(name, note)| (name, &note.digest)))
    }
}
