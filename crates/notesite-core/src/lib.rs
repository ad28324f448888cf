//! Notesite Core Library
//!
//! Build core of a markdown note site: parses notes, resolves inter-note
//! links into routes, tracks which notes link to which, and mirrors the note
//! directory into a navigation tree. Rendering is left to the front end.
//!

pub mod cache;
pub mod config;
pub mod error;
pub mod graph;
pub mod link;
pub mod model;
mod parser;
pub mod render;
pub mod site;
pub mod slug_index;
pub mod tree;
pub mod utils;
pub mod vfs;

pub use config::SiteConfig;
pub use error::SiteError;
pub use link::{Destination, LinkOptions, LinkResolver, RouterAction};
pub use site::{Site, SiteBuilder, SiteContext};
pub use slug_index::SlugIndex;
pub use tree::{build_tree, flatten, DirectoryEntry, TreeNode};
pub use utils::{normalize_file_name, note_file_name, slugify};
