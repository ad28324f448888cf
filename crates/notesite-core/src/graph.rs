use crate::model::FileName;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Link dependencies collected during a render pass.
///
/// `depending` maps a file to the files it links to, `dependents` maps a file
/// to the files linking to it. Both keep discovery order and duplicates.
/// Every edge appended to one side is appended to the other.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    depending: HashMap<FileName, Vec<FileName>>,
    dependents: HashMap<FileName, Vec<FileName>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `source -> target` (and `target <- source`)
    pub(crate) fn record(&mut self, source: &str, target: &str) {
        self.depending
            .entry(source.to_string())
            .or_default()
            .push(target.to_string());
        self.dependents
            .entry(target.to_string())
            .or_default()
            .push(source.to_string());
    }

    pub fn links_from(&self, file: &str) -> &[FileName] {
        self.depending.get(file).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn links_to(&self, file: &str) -> &[FileName] {
        self.dependents.get(file).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn edge_count(&self) -> usize {
        self.depending.values().map(Vec::len).sum()
    }

    /// End the render pass
    pub fn freeze(self) -> LinkGraph {
        LinkGraph {
            depending: self.depending,
            dependents: self.dependents,
        }
    }
}

/// Read-only link graph of a finished build
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkGraph {
    depending: HashMap<FileName, Vec<FileName>>,
    dependents: HashMap<FileName, Vec<FileName>>,
}

impl LinkGraph {
    /// Outgoing edges, one per resolved link occurrence
    pub fn outgoing(&self, file: &str) -> &[FileName] {
        self.depending.get(file).map(Vec::as_slice).unwrap_or_default()
    }

    /// Incoming edges (backlinks), one per resolved link occurrence
    pub fn backlinks(&self, file: &str) -> &[FileName] {
        self.dependents.get(file).map(Vec::as_slice).unwrap_or_default()
    }

    /// Backlinks with repeats removed, first occurrence order
    pub fn unique_backlinks(&self, file: &str) -> Vec<&FileName> {
        let mut seen = Vec::new();
        for source in self.backlinks(file) {
            if !seen.contains(&source) {
                seen.push(source);
            }
        }
        seen
    }

    pub fn edge_count(&self) -> usize {
        self.depending.values().map(Vec::len).sum()
    }
}
