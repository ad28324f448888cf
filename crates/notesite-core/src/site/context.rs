use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::graph::{DependencyGraph, LinkGraph};
use crate::link::{LinkOptions, LinkResolver};
use crate::model::Note;
use crate::slug_index::SlugIndex;

/// State of one render pass.
///
/// `init` builds the slug index, resolvers handed out by `resolver` append to
/// the dependency graph, and `finalize` freezes it. A new build starts from a
/// new context.
pub struct SiteContext {
    options: LinkOptions,
    index: SlugIndex,
    graph: DependencyGraph,
}

impl SiteContext {
    /// Index every note of the collection
    pub fn init(config: &SiteConfig, notes: &[Note]) -> Result<Self, SiteError> {
        let options = config.link_options()?;

        let mut index = SlugIndex::new();
        for note in notes {
            index.insert_slug(&note.file_name, &note.slug, &note.path)?;
        }

        Ok(Self::with_index(index, options))
    }

    /// Start a pass over an index computed elsewhere
    pub fn with_index(index: SlugIndex, options: LinkOptions) -> Self {
        Self {
            options,
            index,
            graph: DependencyGraph::new(),
        }
    }

    pub fn index(&self) -> &SlugIndex {
        &self.index
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Resolver for the links found in `current_file`
    pub fn resolver(&mut self, current_file: &str) -> LinkResolver<'_> {
        LinkResolver::new(&self.index, &mut self.graph, &self.options, current_file)
    }

    pub fn finalize(self) -> (SlugIndex, LinkGraph) {
        (self.index, self.graph.freeze())
    }
}
