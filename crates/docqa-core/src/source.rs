use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::traits::DocumentSource;
use crate::types::Document;

/// Loads every `.txt` file under a directory as one [`Document`].
///
/// The source id is the file path relative to the root, with `/` separators.
/// Symlinked directories are followed; entries that cannot be read are logged and skipped.
pub struct TextDirectorySource {
    root: PathBuf,
    limit: Option<usize>,
}

impl TextDirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into(), limit: None } }

    /// Only load the first `limit` files in path order.
    pub fn with_limit(mut self, limit: usize) -> Self { self.limit = Some(limit); self }

    pub fn root(&self) -> &Path { &self.root }

    fn list_txt_files(&self) -> Vec<PathBuf> {
        let mut txt_files: Vec<PathBuf> = walkdir::WalkDir::new(&self.root)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!(root = %self.root.display(), error = %err, "skipping unreadable entry");
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("txt"))
            .map(|e| e.path().to_path_buf())
            .collect();
        txt_files.sort();
        if let Some(limit) = self.limit { txt_files.truncate(limit); }
        txt_files
    }

    fn source_id(&self, file_path: &Path) -> String {
        let relative = file_path.strip_prefix(&self.root).unwrap_or(file_path);
        relative.components().map(|c| c.as_os_str().to_string_lossy()).collect::<Vec<_>>().join("/")
    }
}

fn read_file_content(file_path: &Path) -> Result<String> {
    match fs::read_to_string(file_path) {
        Ok(content) => Ok(content),
        Err(_) => Ok(String::from_utf8_lossy(&fs::read(file_path)?).to_string()),
    }
}

impl DocumentSource for TextDirectorySource {
    fn documents(&self) -> Result<Vec<Document>> {
        if !self.root.is_dir() {
            anyhow::bail!("{} is not a directory", self.root.display());
        }
        let files = self.list_txt_files();
        debug!(root = %self.root.display(), files = files.len(), "listing text documents");
        files
            .iter()
            .map(|path| Ok(Document::new(self.source_id(path), read_file_content(path)?)))
            .collect()
    }
}
