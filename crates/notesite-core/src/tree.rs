use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::Slug;
use crate::slug_index::SlugIndex;
use crate::utils::normalize_file_name;

/// One entry of a directory listing.
///
/// `children` is `None` for files and `Some` for directories, in listing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    /// Path relative to the listing root
    pub path: PathBuf,
    pub children: Option<Vec<DirectoryEntry>>,
}

impl DirectoryEntry {
    pub fn file(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            children: None,
        }
    }

    pub fn dir(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        children: Vec<DirectoryEntry>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            children: Some(children),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.children.is_some()
    }

    /// Relative paths of every file with the given extension, pre-order
    pub fn files_with_extension(&self, extension: &str) -> Vec<PathBuf> {
        let mut files = Vec::new();
        self.collect_files(extension, &mut files);
        files
    }

    fn collect_files(&self, extension: &str, files: &mut Vec<PathBuf>) {
        match &self.children {
            Some(children) => {
                for child in children {
                    child.collect_files(extension, files);
                }
            }
            None => {
                if self.path.extension().is_some_and(|ext| ext == extension) {
                    files.push(self.path.clone());
                }
            }
        }
    }
}

/// Display node for site navigation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub name: String,
    pub children: Vec<TreeNode>,
    pub id: String,
    /// `None` when the node is not an independently navigable note
    pub route_path: Option<String>,
}

/// Normalized file name -> slug, first slug (in index order) wins
struct RouteTable<'a> {
    by_name: HashMap<String, &'a Slug>,
    prefix: &'a str,
}

impl<'a> RouteTable<'a> {
    fn new(index: &'a SlugIndex, prefix: &'a str) -> Self {
        let mut by_name = HashMap::new();
        for slug in index.slugs() {
            if let Some(file_name) = index.file_name_of(slug) {
                by_name.entry(normalize_file_name(&file_name)).or_insert(slug);
            }
        }
        Self { by_name, prefix }
    }

    fn route_for(&self, entry_name: &str) -> Option<String> {
        if !entry_name.contains('.') {
            return None;
        }
        let slug = self.by_name.get(&normalize_file_name(entry_name))?;
        Some(join_route(self.prefix, slug))
    }
}

/// Mirror a directory listing into navigation nodes.
pub fn build_tree(entry: &DirectoryEntry, index: &SlugIndex, route_prefix: &str) -> TreeNode {
    let table = RouteTable::new(index, route_prefix);
    build_node(entry, &table)
}

fn build_node(entry: &DirectoryEntry, table: &RouteTable<'_>) -> TreeNode {
    let children = entry
        .children
        .iter()
        .flatten()
        .map(|child| build_node(child, table))
        .collect();

    TreeNode {
        name: entry.name.clone(),
        children,
        id: entry.name.clone(),
        route_path: table.route_for(&entry.name),
    }
}

/// Pre-order listing of every node below the root
pub fn flatten(tree: &TreeNode) -> Vec<&TreeNode> {
    let mut nodes = Vec::new();
    for child in &tree.children {
        push_pre_order(child, &mut nodes);
    }
    nodes
}

fn push_pre_order<'a>(node: &'a TreeNode, nodes: &mut Vec<&'a TreeNode>) {
    nodes.push(node);
    for child in &node.children {
        push_pre_order(child, nodes);
    }
}

/// Join a route prefix and a slug with exactly one `/`
pub fn join_route(prefix: &str, slug: &str) -> String {
    format!("{}/{}", prefix.trim_end_matches('/'), slug)
}
