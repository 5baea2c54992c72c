use serde::Deserialize;
use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use crate::error::{Result, SitemapError};

/// Config file picked up from the project root when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "sitemap.config.json";

pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Generate,
    Merge,
}

#[derive(Debug)]
pub struct Args {
    pub root: PathBuf,
    pub config: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub base_url: Option<String>,
    pub mode: Mode,
    pub verbose: bool,
}

/// The two listing trees, each with its own detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListingKind {
    Property,
    Request,
}

impl ListingKind {
    pub fn detail_page(self) -> &'static str {
        match self {
            ListingKind::Property => "details.html",
            ListingKind::Request => "request-details.html",
        }
    }

    pub fn priority(self) -> f32 {
        match self {
            ListingKind::Property => 0.9,
            ListingKind::Request => 0.7,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ListingKind::Property => "property",
            ListingKind::Request => "request",
        }
    }
}

/// One listing file, identified by its stem and parent directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRecord {
    pub kind: ListingKind,
    pub id: String,
    pub category: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Weekly,
    Monthly,
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeFreq::Weekly => f.write_str("weekly"),
            ChangeFreq::Monthly => f.write_str("monthly"),
        }
    }
}

/// A single `<url>` entry. `location` is stored unescaped.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlEntry {
    pub location: String,
    pub change_freq: ChangeFreq,
    pub priority: f32,
}

/// Metadata given to entries appended in merge mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeMetadata {
    /// Every appended entry is `weekly` / `0.7`.
    #[default]
    Fixed,
    /// Appended entries keep the property/request metadata used by generate mode.
    ByKind,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub base_url: String,
    pub output: PathBuf,
    pub properties_dir: PathBuf,
    pub requests_dir: PathBuf,
    pub static_pages: Vec<String>,
    pub merge_metadata: MergeMetadata,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            base_url: "https://aqarnasr.netlify.app".to_string(),
            output: PathBuf::from("_site/sitemap.xml"),
            properties_dir: PathBuf::from("data/properties"),
            requests_dir: PathBuf::from("data/requests"),
            static_pages: [
                "",
                "about-us",
                "contact-us",
                "add-your-property",
                "properties-filtered",
                "requests-filtered",
                "privacy-policy",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            merge_metadata: MergeMetadata::Fixed,
        }
    }
}

impl SiteConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| SitemapError::io(path, e))?;
        serde_json::from_str(&raw).map_err(|source| SitemapError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Builds the effective config: file (explicit, then root default, then
    /// builtin), CLI overrides, paths anchored at the project root.
    pub fn resolve(args: &Args) -> Result<Self> {
        let root_config = args.root.join(DEFAULT_CONFIG_FILE);

        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None if root_config.is_file() => Self::load(&root_config)?,
            None => Self::default(),
        };

        if let Some(base_url) = &args.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(output) = &args.output {
            config.output = output.clone();
        }

        config.anchor_at(&args.root);
        config.validate()?;
        Ok(config)
    }

    /// Joins relative paths onto `root`; absolute paths are left alone.
    pub fn anchor_at(&mut self, root: &Path) {
        self.output = root.join(&self.output);
        self.properties_dir = root.join(&self.properties_dir);
        self.requests_dir = root.join(&self.requests_dir);
    }

    pub fn validate(&mut self) -> Result<()> {
        self.base_url = self.base_url.trim_end_matches('/').to_string();

        if self.base_url.is_empty() {
            return Err(SitemapError::InvalidConfig("base_url must not be empty".into()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(SitemapError::InvalidConfig(format!(
                "base_url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.output.as_os_str().is_empty() {
            return Err(SitemapError::InvalidConfig("output must not be empty".into()));
        }
        Ok(())
    }

    pub fn listing_root(&self, kind: ListingKind) -> &Path {
        match kind {
            ListingKind::Property => &self.properties_dir,
            ListingKind::Request => &self.requests_dir,
        }
    }
}

pub const COLOR_RED: &str = "\x1b[31m";
pub const COLOR_YELLOW: &str = "\x1b[33m";
pub const COLOR_CYAN: &str = "\x1b[36m";
pub const COLOR_RESET: &str = "\x1b[0m";

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args_for(root: &Path) -> Args {
        Args {
            root: root.to_path_buf(),
            config: None,
            output: None,
            base_url: None,
            mode: Mode::Generate,
            verbose: false,
        }
    }

    #[test]
    fn test_defaults_anchor_at_root() {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig::resolve(&args_for(dir.path())).unwrap();

        assert_eq!(config.base_url, "https://aqarnasr.netlify.app");
        assert_eq!(config.output, dir.path().join("_site/sitemap.xml"));
        assert_eq!(config.properties_dir, dir.path().join("data/properties"));
        assert_eq!(config.static_pages.len(), 7);
        assert_eq!(config.merge_metadata, MergeMetadata::Fixed);
    }

    #[test]
    fn test_root_config_file_is_picked_up() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            r#"{ "base_url": "https://example.test/", "static_pages": ["about"], "merge_metadata": "by_kind" }"#,
        )
        .unwrap();

        let config = SiteConfig::resolve(&args_for(dir.path())).unwrap();

        assert_eq!(config.base_url, "https://example.test");
        assert_eq!(config.static_pages, vec!["about".to_string()]);
        assert_eq!(config.merge_metadata, MergeMetadata::ByKind);
        assert_eq!(config.requests_dir, dir.path().join("data/requests"));
    }

    #[test]
    fn test_cli_overrides_win() {
        let dir = TempDir::new().unwrap();
        let mut args = args_for(dir.path());
        args.base_url = Some("http://override.test".to_string());
        args.output = Some(PathBuf::from("sitemap.xml"));

        let config = SiteConfig::resolve(&args).unwrap();

        assert_eq!(config.base_url, "http://override.test");
        assert_eq!(config.output, dir.path().join("sitemap.xml"));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let dir = TempDir::new().unwrap();
        let mut args = args_for(dir.path());
        args.base_url = Some("example.test".to_string());

        let err = SiteConfig::resolve(&args).unwrap_err();
        assert!(matches!(err, SitemapError::InvalidConfig(_)));
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn test_unknown_field_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.json");
        fs::write(&path, r#"{ "base_uri": "https://example.test" }"#).unwrap();

        let mut args = args_for(dir.path());
        args.config = Some(path);

        let err = SiteConfig::resolve(&args).unwrap_err();
        assert!(matches!(err, SitemapError::Config { .. }));
    }

    #[test]
    fn test_missing_explicit_config_is_io_error() {
        let dir = TempDir::new().unwrap();
        let mut args = args_for(dir.path());
        args.config = Some(dir.path().join("nope.json"));

        let err = SiteConfig::resolve(&args).unwrap_err();
        assert!(matches!(err, SitemapError::Io { .. }));
    }
}
