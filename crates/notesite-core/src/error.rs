use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a site build.
///
/// Link resolution never produces one of these: unresolvable destinations
/// degrade to literal text instead.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Invalid base URI `{uri}`: {source}")]
    InvalidBaseUri {
        uri: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Slug `{slug}` is claimed by both {} and {}", .first.display(), .second.display())]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Note name `{0}` is indexed twice")]
    DuplicateKey(String),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error("Incompatible snapshot version {found}, expected {expected}")]
    SnapshotVersion { found: u32, expected: u32 },
}

impl SiteError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SiteError::Io {
            path: path.into(),
            source,
        }
    }
}
