//! Link destination resolution.
//!
//! A raw destination found in a markdown document becomes either a router
//! action (the destination names a known note) or a literal URL. Resolving a
//! note reference records the dependency edge on the way.

use crate::graph::DependencyGraph;
use crate::model::{FileName, Slug};
use crate::slug_index::SlugIndex;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;
use url::Url;

static UNSAFE_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(vbscript|javascript|file|data):").unwrap());
static SAFE_DATA_IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^data:image/(gif|png|jpeg|webp);").unwrap());

/// Where a rendered link points
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Destination {
    /// Client-side navigation to a note
    Router(RouterAction),
    /// Literal URL
    RawLink(String),
}

impl Destination {
    pub fn as_raw_link(&self) -> Option<&str> {
        match self {
            Destination::RawLink(link) => Some(link),
            Destination::Router(_) => None,
        }
    }

    pub fn as_router(&self) -> Option<&RouterAction> {
        match self {
            Destination::Router(action) => Some(action),
            Destination::RawLink(_) => None,
        }
    }
}

/// Navigation callback bound to the matched slug
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouterAction {
    slug: Slug,
}

impl RouterAction {
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Hand the slug to the front end's `push`
    pub fn dispatch<R>(&self, push: impl FnOnce(&str) -> R) -> R {
        push(&self.slug)
    }
}

/// Settings shared by every resolver of a build
#[derive(Debug, Clone, Default)]
pub struct LinkOptions {
    /// Treat `#...` destinations like any other destination
    pub resolve_anchors: bool,
    pub base_uri: Option<Url>,
    /// Neutralize script-capable schemes in literal URLs
    pub sanitize_links: bool,
}

/// Resolves the links of one note against the slug index.
pub struct LinkResolver<'a> {
    index: &'a SlugIndex,
    graph: &'a mut DependencyGraph,
    options: &'a LinkOptions,
    current_file: FileName,
}

impl<'a> LinkResolver<'a> {
    pub fn new(
        index: &'a SlugIndex,
        graph: &'a mut DependencyGraph,
        options: &'a LinkOptions,
        current_file: impl Into<FileName>,
    ) -> Self {
        Self {
            index,
            graph,
            options,
            current_file: current_file.into(),
        }
    }

    pub fn current_file(&self) -> &str {
        &self.current_file
    }

    pub fn resolve(&mut self, destination: &str) -> Destination {
        if self.is_skipped_anchor(destination) {
            return Destination::RawLink(destination.to_string());
        }

        if let Some(slug) = self.index.lookup(destination) {
            let target = self
                .index
                .file_name_of(slug)
                .unwrap_or_else(|| destination.to_string());
            debug!("{} -> {} ({})", self.current_file, target, slug);
            self.graph.record(&self.current_file, &target);
            return Destination::Router(RouterAction { slug: slug.clone() });
        }

        Destination::RawLink(self.sanitize(self.join_base(destination)))
    }

    /// Like `resolve` but never routes and never records an edge
    pub fn make_absolute_url(&self, destination: &str) -> String {
        if self.is_skipped_anchor(destination) {
            return destination.to_string();
        }
        self.sanitize(self.join_base(destination))
    }

    fn is_skipped_anchor(&self, destination: &str) -> bool {
        !self.options.resolve_anchors && destination.starts_with('#')
    }

    fn join_base(&self, destination: &str) -> String {
        let Some(base) = &self.options.base_uri else {
            return destination.to_string();
        };
        match base.join(destination) {
            Ok(url) => url.to_string(),
            Err(e) => {
                warn!(
                    "{}: cannot resolve `{}` against {}: {}",
                    self.current_file, destination, base, e
                );
                destination.to_string()
            }
        }
    }

    fn sanitize(&self, link: String) -> String {
        if !self.options.sanitize_links {
            return link;
        }
        if let Cow::Owned(safe) = make_safe_destination(&link) {
            warn!("{}: blocked unsafe link {:?}", self.current_file, link);
            return safe;
        }
        link
    }
}

/// The destination as a browser reads its scheme: leading and trailing C0
/// controls and spaces stripped, tabs and newlines removed everywhere.
fn scheme_view(destination: &str) -> Cow<'_, str> {
    let trimmed = destination.trim_matches(|c: char| c <= ' ');
    if trimmed.contains(['\t', '\n', '\r']) {
        Cow::Owned(
            trimmed
                .chars()
                .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
                .collect(),
        )
    } else {
        Cow::Borrowed(trimmed)
    }
}

fn is_unsafe_destination(destination: &str) -> bool {
    let view = scheme_view(destination);
    UNSAFE_SCHEME.is_match(&view) && !SAFE_DATA_IMAGE.is_match(&view)
}

/// Replace destinations with script-capable schemes by `#`.
///
/// Inline images (`data:image/png;...` and friends) are allowed through.
pub fn make_safe_destination(destination: &str) -> Cow<'_, str> {
    if is_unsafe_destination(destination) {
        Cow::Owned("#".to_string())
    } else {
        Cow::Borrowed(destination)
    }
}

/// Whether a destination carries its own scheme (`https:`, `mailto:`, ...).
///
/// Single-letter schemes are drive letters (`C:/notes/x.md`), not URLs.
pub fn is_absolute_url(destination: &str) -> bool {
    Url::parse(destination).is_ok_and(|url| url.scheme().len() > 1)
}
