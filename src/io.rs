use crate::config::{COLOR_CYAN, COLOR_RED, COLOR_RESET, COLOR_YELLOW};
use crate::error::{Result, SitemapError};
use std::{fs, io, path::Path};

pub fn print_error(message: &str) {
    eprintln!("{}ERROR{}: {}", COLOR_RED, COLOR_RESET, message);
}

pub fn print_warning(message: &str) {
    eprintln!("{}WARNING{}: {}", COLOR_YELLOW, COLOR_RESET, message);
}

pub fn print_info(message: &str) {
    eprintln!("{}INFO{}: {}", COLOR_CYAN, COLOR_RESET, message);
}

/// Reads the sitemap that merge mode patches. A missing file is its own error.
pub fn read_sitemap(path: &Path, verbose: bool) -> Result<String> {
    if verbose {
        print_info(&format!("Reading existing sitemap from: {}", path.display()));
    }

    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(SitemapError::MissingBaseSitemap {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(SitemapError::io(path, e)),
    }
}

/// Overwrites `path` with `content`, creating missing parent directories.
pub fn write_sitemap(path: &Path, content: &str, verbose: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            if verbose {
                print_info(&format!("Creating output directory: {}", parent.display()));
            }
            fs::create_dir_all(parent).map_err(|e| SitemapError::io(parent, e))?;
        }
    }

    fs::write(path, content).map_err(|e| SitemapError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_sitemap() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sitemap.xml");

        let err = read_sitemap(&path, false).unwrap_err();
        assert!(matches!(err, SitemapError::MissingBaseSitemap { .. }));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("_site/nested/sitemap.xml");

        write_sitemap(&path, "<urlset/>", false).unwrap();
        assert_eq!(read_sitemap(&path, false).unwrap(), "<urlset/>");
    }
}
