//! On-disk cache for service responses.
//!
//! Catalogue downloads for a given field are identical between pipeline
//! runs, so responses are cached keyed on the request URL. Entries live
//! under `~/.skyglue/cache` by default; tests point the cache at a
//! temporary directory instead.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

/// URL-keyed response cache rooted at a directory.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    root: PathBuf,
}

impl ResponseCache {
    /// Cache under the default location, `~/.skyglue/cache`.
    pub fn new() -> io::Result<Self> {
        let home = std::env::var("HOME")
            .map_err(|_| io::Error::new(io::ErrorKind::NotFound, "HOME not set"))?;
        Ok(Self {
            root: PathBuf::from(home).join(".skyglue").join("cache"),
        })
    }

    /// Cache rooted at a custom directory.
    pub fn with_path(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, url: &str) -> PathBuf {
        let digest = md5::compute(url.as_bytes());
        self.root.join(format!("{digest:x}"))
    }

    /// Cached response body for `url`, if present.
    pub fn get(&self, url: &str) -> Option<String> {
        let path = self.entry_path(url);
        match fs::read_to_string(&path) {
            Ok(body) => {
                debug!("Cache hit for {url}");
                Some(body)
            }
            Err(_) => None,
        }
    }

    /// Store a response body for `url`, replacing any previous entry.
    pub fn put(&self, url: &str, body: &str) -> io::Result<()> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.entry_path(url), body)
    }
}
