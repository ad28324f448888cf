use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SiteError;
use crate::graph::LinkGraph;
use crate::model::FileName;
use crate::slug_index::SlugIndex;
use crate::vfs::FileSystem;

/// Finished build state persisted between runs
#[derive(Serialize, Deserialize)]
pub struct SiteSnapshot {
    pub version: u32,
    pub index: SlugIndex,
    pub graph: LinkGraph,
    /// Content digest of every note at build time
    pub digests: BTreeMap<FileName, String>,
}

impl SiteSnapshot {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new(index: SlugIndex, graph: LinkGraph, digests: BTreeMap<FileName, String>) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            index,
            graph,
            digests,
        }
    }

    pub fn load(path: &Path, fs: &dyn FileSystem) -> Result<Self, SiteError> {
        let buffer = fs.read_all(path).map_err(|e| SiteError::io(path, e))?;
        let state: SiteSnapshot = bincode::deserialize(&buffer)?;

        if state.version != Self::CURRENT_VERSION {
            return Err(SiteError::SnapshotVersion {
                found: state.version,
                expected: Self::CURRENT_VERSION,
            });
        }

        Ok(state)
    }

    pub fn save(&self, path: &Path, fs: &dyn FileSystem) -> Result<(), SiteError> {
        let buffer = bincode::serialize(self)?;
        fs.write_all(path, &buffer)
            .map_err(|e| SiteError::io(path, e))?;
        Ok(())
    }

    /// Notes whose content digest differs from the snapshot, or that are new
    pub fn changed_since<'a>(
        &self,
        digests: impl IntoIterator<Item = (&'a FileName, &'a String)>,
    ) -> Vec<&'a FileName> {
        digests
            .into_iter()
            .filter(|(name, digest)| self.digests.get(*name) != Some(*digest))
            .map(|(name, _)| name)
            .collect()
    }
}
