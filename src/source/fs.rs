//! Documents read from a content directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use jwalk::WalkDir;

use super::ContentSource;
use crate::config::Config;
use crate::page::{DocId, Document};

/// Content directory walked on every listing.
///
/// A file `notes/a.md` under the directory becomes the document with id
/// and slug `notes/a`.
#[derive(Debug, Clone)]
pub struct FsSource {
    dir: PathBuf,
    extensions: Arc<[String]>,
}

impl FsSource {
    pub fn new(dir: impl Into<PathBuf>, extensions: impl IntoIterator<Item = String>) -> Self {
        Self {
            dir: dir.into(),
            extensions: extensions.into_iter().collect(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.content_dir(), config.content.extensions.iter().cloned())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    /// Every indexed file under the content directory, sorted by path.
    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            anyhow::bail!("content directory not found: {}", self.dir.display());
        }
        let mut files: Vec<_> = WalkDir::new(&self.dir)
            .skip_hidden(true)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path())
            .filter(|path| self.has_extension(path))
            .collect();
        files.sort();
        Ok(files)
    }

    fn read(&self, path: &Path) -> Result<Document> {
        let id = document_id(&self.dir, path)
            .with_context(|| format!("path outside content directory: {}", path.display()))?;
        let body = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let title = front_matter_title(&body).map(str::to_string);

        let mut document = Document::new(id.clone(), id, body);
        document.title = title;
        Ok(document)
    }

    fn list_blocking(&self) -> Result<Vec<Document>> {
        self.collect_files()?
            .iter()
            .map(|path| self.read(path))
            .collect()
    }

    fn get_blocking(&self, id: &DocId) -> Result<Option<Document>> {
        for ext in self.extensions.iter() {
            let path = self.dir.join(format!("{id}.{ext}"));
            match fs::metadata(&path) {
                Ok(meta) if meta.is_file() => return self.read(&path).map(Some),
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(e).with_context(|| format!("failed to stat {}", path.display()));
                }
            }
        }
        Ok(None)
    }
}

impl ContentSource for FsSource {
    async fn list_documents(&self) -> Result<Vec<Document>> {
        let source = self.clone();
        tokio::task::spawn_blocking(move || source.list_blocking())
            .await
            .context("content scan task failed")?
    }

    async fn get_document(&self, id: &DocId) -> Result<Option<Document>> {
        let source = self.clone();
        let id = id.clone();
        tokio::task::spawn_blocking(move || source.get_blocking(&id))
            .await
            .context("content read task failed")?
    }
}

/// Relative path with `/` separators and the extension removed.
fn document_id(dir: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(dir).ok()?.with_extension("");
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    Some(parts.join("/"))
}

/// `title:` from a leading `---` block.
fn front_matter_title(body: &str) -> Option<&str> {
    let mut lines = body.lines();
    if lines.next()?.trim_end() != "---" {
        return None;
    }
    for line in lines {
        let line = line.trim_end();
        if line == "---" {
            break;
        }
        if let Some(value) = line.strip_prefix("title:") {
            let value = value.trim().trim_matches(['"', '\'']);
            return (!value.is_empty()).then_some(value);
        }
    }
    None
}
