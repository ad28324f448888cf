use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use log::info;

use super::assembler::assemble_note;
use super::context::SiteContext;
use super::Site;
use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::link::Destination;
use crate::render::render_links;
use crate::tree::build_tree;
use crate::vfs::FileSystem;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildStats {
    pub total_files: usize,
    pub notes: usize,
    pub routed_links: usize,
    pub raw_links: usize,
    pub unresolved_links: usize,
}

impl fmt::Display for BuildStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} notes ({} files listed), {} routed links, {} raw links, {} unresolved",
            self.notes, self.total_files, self.routed_links, self.raw_links, self.unresolved_links
        )
    }
}

/// Runs a full build: scan, index, render every note, freeze, build the tree.
pub struct SiteBuilder {
    config: SiteConfig,
    fs: Arc<dyn FileSystem>,
}

impl SiteBuilder {
    pub fn new(config: SiteConfig, fs: Arc<dyn FileSystem>) -> Self {
        Self { config, fs }
    }

    pub fn build(&self) -> Result<Site, SiteError> {
        let root = &self.config.site.notes_dir;
        let mut stats = BuildStats::default();

        // Step 1: scan
        let listing = self
            .fs
            .read_tree(root, &self.config.site.ignore_dirs)
            .map_err(|e| SiteError::io(root, e))?;
        let files = listing.files_with_extension("md");
        stats.total_files = files.len();

        // Step 2: parse
        let mut notes = Vec::with_capacity(files.len());
        for rel_path in &files {
            let abs_path = root.join(rel_path);
            let content = self
                .fs
                .read_to_string(&abs_path)
                .map_err(|e| SiteError::io(&abs_path, e))?;
            notes.push(assemble_note(rel_path, &content));
        }
        stats.notes = notes.len();

        // Step 3: index, then resolve every link
        let mut context = SiteContext::init(&self.config, &notes)?;
        let mut pages = HashMap::new();
        let mut unresolved = Vec::new();

        for note in &notes {
            let mut resolver = context.resolver(&note.file_name);
            let output = render_links(note, &mut resolver);

            for link in &output.links {
                match link.destination {
                    Destination::Router(_) => stats.routed_links += 1,
                    Destination::RawLink(_) => stats.raw_links += 1,
                }
            }
            stats.unresolved_links += output.unresolved.len();
            unresolved.extend(output.unresolved);
            pages.insert(note.file_name.clone(), output.links);
        }

        // Step 4: freeze
        let (index, graph) = context.finalize();
        let tree = build_tree(&listing, &index, &self.config.site.route_prefix);

        if self.config.logging.show_build_stats {
            info!("{}: {}", self.config.site.name, stats);
        }

        let notes: BTreeMap<_, _> = notes
            .into_iter()
            .map(|note| (note.file_name.clone(), note))
            .collect();

        Ok(Site {
            config: self.config.clone(),
            notes,
            index,
            graph,
            pages,
            unresolved,
            tree,
            stats,
        })
    }
}
