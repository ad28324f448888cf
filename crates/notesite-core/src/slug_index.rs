use crate::error::SiteError;
use crate::model::{FileName, Slug};
use crate::utils::{note_file_name, slugify};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Note key <=> Slug <=> Path
///
/// Keys are the names links use to reference a note (the file stem). Lookups
/// are exact-match only; keys are expected to be inserted already normalized.
/// Built once per build, read-only while links are resolved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlugIndex {
    key_to_slug: HashMap<String, Slug>,
    slug_to_path: BTreeMap<Slug, PathBuf>,
}

impl SlugIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a note path, deriving its key and slug from the file name.
    pub fn insert(&mut self, path: &Path) -> Result<Slug, SiteError> {
        let key = note_file_name(path);
        let slug = slugify(&key);
        self.insert_slug(&key, &slug, path)?;
        Ok(slug)
    }

    /// Index a precomputed `key -> slug -> path` triple.
    pub fn insert_slug(&mut self, key: &str, slug: &str, path: &Path) -> Result<(), SiteError> {
        if self.key_to_slug.contains_key(key) {
            return Err(SiteError::DuplicateKey(key.to_string()));
        }
        if let Some(first) = self.slug_to_path.get(slug) {
            return Err(SiteError::DuplicateSlug {
                slug: slug.to_string(),
                first: first.clone(),
                second: path.to_path_buf(),
            });
        }

        self.key_to_slug.insert(key.to_string(), slug.to_string());
        self.slug_to_path.insert(slug.to_string(), path.to_path_buf());
        Ok(())
    }

    pub fn lookup(&self, key: &str) -> Option<&Slug> {
        self.key_to_slug.get(key)
    }

    pub fn path_of(&self, slug: &str) -> Option<&Path> {
        self.slug_to_path.get(slug).map(PathBuf::as_path)
    }

    /// File name of the note a slug points at
    pub fn file_name_of(&self, slug: &str) -> Option<FileName> {
        self.path_of(slug).map(note_file_name)
    }

    /// All slugs in ascending order
    pub fn slugs(&self) -> impl Iterator<Item = &Slug> {
        self.slug_to_path.keys()
    }

    pub fn len(&self) -> usize {
        self.slug_to_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slug_to_path.is_empty()
    }
}
