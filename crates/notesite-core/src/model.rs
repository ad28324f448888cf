use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::PathBuf;

/// Normalized, URL-safe identifier used as the routable path segment
pub type Slug = String;

/// Note file name without extension, as links refer to it
pub type FileName = String;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub file_name: FileName,
    pub slug: Slug,
    /// Path relative to the notes root
    pub path: PathBuf,
    pub title: Option<String>,
    pub frontmatter: Option<serde_json::Value>,
    pub links: Vec<DocLink>,
    pub digest: String,
}

/// A link as written in the markdown source, before resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocLink {
    pub destination: String,
    pub title: Option<String>,
    pub label: String,
    pub kind: LinkKind,
    /// Byte offsets into the source text
    pub span: Range<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkKind {
    Inline,    // [label](target)
    Reference, // [label][ref]
    Autolink,  // <https://...>
    Email,     // <me@example.com>
    WikiLink,  // [[target]]
    Image,     // ![alt](src)
}
