use std::{io, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum SitemapError {
    #[error("Base sitemap not found at {path}; run a full generate first")]
    MissingBaseSitemap { path: PathBuf },

    #[error("Malformed sitemap {path}: {reason}")]
    MalformedSitemap { path: PathBuf, reason: String },

    #[error("Could not parse config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SitemapError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SitemapError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SitemapError>;
