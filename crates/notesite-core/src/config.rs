use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::SiteError;
use crate::link::LinkOptions;
use crate::vfs::FileSystem;

/// Top-level configuration for a notesite build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub site: SiteSettings,
    #[serde(default)]
    pub links: LinkSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Site-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSettings {
    /// Name of the site
    pub name: String,
    /// Directory holding the markdown notes
    pub notes_dir: PathBuf,
    /// Prefix of note routes, e.g. `/note/` gives `/note/<slug>`
    #[serde(default = "default_route_prefix")]
    pub route_prefix: String,
    /// Base that relative, non-note destinations are joined to
    #[serde(default)]
    pub base_uri: Option<String>,
    /// Directory names skipped while scanning
    #[serde(default = "default_ignore_dirs")]
    pub ignore_dirs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkSettings {
    /// Resolve `#anchor` destinations instead of passing them through
    #[serde(default)]
    pub resolve_anchors: bool,
    #[serde(default = "default_true")]
    pub sanitize_links: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether to log build statistics when a build finishes
    #[serde(default = "default_true")]
    pub show_build_stats: bool,
}

fn default_route_prefix() -> String {
    "/note/".to_string()
}

fn default_ignore_dirs() -> Vec<String> {
    vec![".git".to_string(), "node_modules".to_string()]
}

fn default_true() -> bool {
    true
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            resolve_anchors: false,
            sanitize_links: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            show_build_stats: true,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site: SiteSettings {
                name: "Notes".to_string(),
                notes_dir: PathBuf::from("notes"),
                route_prefix: default_route_prefix(),
                base_uri: None,
                ignore_dirs: default_ignore_dirs(),
            },
            links: LinkSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Parse config from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Load config from a specific path
    pub fn load(path: &Path, fs: &dyn FileSystem) -> Result<Self, SiteError> {
        let content = fs
            .read_to_string(path)
            .map_err(|e| SiteError::io(path, e))?;
        Ok(Self::from_yaml(&content)?)
    }

    /// Resolver settings, with the base URI parsed
    pub fn link_options(&self) -> Result<LinkOptions, SiteError> {
        let base_uri = match &self.site.base_uri {
            Some(uri) => Some(Url::parse(uri).map_err(|source| SiteError::InvalidBaseUri {
                uri: uri.clone(),
                source,
            })?),
            None => None,
        };

        Ok(LinkOptions {
            resolve_anchors: self.links.resolve_anchors,
            base_uri,
            sanitize_links: self.links.sanitize_links,
        })
    }
}
