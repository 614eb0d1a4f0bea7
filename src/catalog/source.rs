//! Content source abstraction for reading data files from a directory or a
//! ZIP asset bundle.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use rayon::prelude::*;
use std::io::Read;

/// Trait for abstracting file I/O (directory vs. ZIP bundle).
pub trait ContentSource {
    /// Read a file at the given logical path and return its content as a string.
    fn read_to_string(&mut self, path: &Utf8Path) -> Result<String>;

    /// Read a batch of files. Results are in the order of `paths`.
    fn read_many(&mut self, paths: &[Utf8PathBuf]) -> Vec<Result<String>> {
        paths.iter().map(|p| self.read_to_string(p)).collect()
    }
}

/// Reads files from a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: Utf8PathBuf,
}

impl FsSource {
    pub fn new(root: impl AsRef<Utf8Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn resolve(&self, path: &Utf8Path) -> Utf8PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path.as_str().trim_start_matches("./"))
        }
    }

    fn read_impl(&self, path: &Utf8Path) -> Result<String> {
        let full = self.resolve(path);
        std::fs::read_to_string(full.as_std_path()).with_context(|| format!("Failed to read {}", full))
    }
}

impl ContentSource for FsSource {
    fn read_to_string(&mut self, path: &Utf8Path) -> Result<String> {
        self.read_impl(path)
    }

    // Files are independent, so the whole batch is fetched in parallel.
    fn read_many(&mut self, paths: &[Utf8PathBuf]) -> Vec<Result<String>> {
        let this = &*self;
        paths.par_iter().map(|p| this.read_impl(p)).collect()
    }
}

/// Reads files from a ZIP asset bundle.
pub struct ZipSource<R: Read + std::io::Seek> {
    zip: zip::ZipArchive<R>,
    root: String,
}

impl<R: Read + std::io::Seek> ZipSource<R> {
    pub fn new(reader: R) -> Result<Self> {
        let zip = zip::ZipArchive::new(reader).context("Failed to open zip archive")?;
        Ok(Self {
            zip,
            root: String::new(),
        })
    }

    /// Resolve logical paths under `root` inside the archive (e.g. `assets`).
    pub fn with_root(mut self, root: &str) -> Self {
        let mut r = root.trim_start_matches("./").trim_start_matches('/').to_string();
        if !r.is_empty() && !r.ends_with('/') {
            r.push('/');
        }
        self.root = r;
        self
    }
}

impl<R: Read + std::io::Seek> ContentSource for ZipSource<R> {
    fn read_to_string(&mut self, path: &Utf8Path) -> Result<String> {
        let p = format!(
            "{}{}",
            self.root,
            path.as_str().trim_start_matches("./").trim_start_matches('/')
        );
        let mut f = self
            .zip
            .by_name(&p)
            .with_context(|| format!("File {} not found in zip", p))?;
        let mut s = String::new();
        f.read_to_string(&mut s)
            .with_context(|| format!("Failed to read {} from zip", p))?;
        Ok(s)
    }
}
