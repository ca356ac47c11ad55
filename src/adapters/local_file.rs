//! Local filesystem adapter
//!
//! Walks the tree under a `file://` path and feeds each regular file through
//! the format-sniffing processor. Unreadable directory entries are skipped
//! with a warning; a missing root simply yields zero files.

use super::traits::FileAdapter;
use crate::detector::MatchFinder;
use crate::domain::{ArgusError, Result};
use crate::scanner::files::process_file;
use async_trait::async_trait;
use std::fs::File;
use std::path::PathBuf;
use walkdir::WalkDir;

#[derive(Debug, Default)]
pub struct LocalFileAdapter {
    root: Option<PathBuf>,
}

impl LocalFileAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    fn root(&self) -> Result<&PathBuf> {
        self.root
            .as_ref()
            .ok_or_else(|| ArgusError::Other("adapter not initialized".to_string()))
    }
}

#[async_trait]
impl FileAdapter for LocalFileAdapter {
    fn object_name(&self) -> &'static str {
        "file"
    }

    async fn init(&mut self, url: &str) -> Result<()> {
        let path = url
            .strip_prefix("file://")
            .ok_or_else(|| ArgusError::Usage(format!("Invalid file URI: {url}")))?;
        self.root = Some(PathBuf::from(path));
        Ok(())
    }

    async fn fetch_files(&self) -> Result<Vec<String>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(self.root()?) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable path");
                    continue;
                }
            };
            if entry.file_type().is_file() {
                files.push(entry.path().display().to_string());
            }
        }
        Ok(files)
    }

    async fn find_file_matches(&self, path: &str, finder: &mut MatchFinder) -> Result<()> {
        let file = File::open(path)
            .map_err(|e| ArgusError::Io(format!("Failed to open {path}: {e}")))?;
        process_file(file, finder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_fetch_files_walks_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();
        std::fs::write(nested.join("b.txt"), "b").unwrap();

        let mut adapter = LocalFileAdapter::new();
        adapter
            .init(&format!("file://{}", dir.path().display()))
            .await
            .unwrap();
        let mut files = adapter.fetch_files().await.unwrap();
        files.sort();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.txt"));
        assert!(files[1].ends_with("b.txt"));
    }

    #[tokio::test]
    async fn test_missing_root_yields_no_files() {
        let mut adapter = LocalFileAdapter::new();
        adapter.init("file:///nonexistent/argus-test").await.unwrap();
        let files = adapter.fetch_files().await.unwrap();
        assert!(files.is_empty());
    }

    #[tokio::test]
    async fn test_find_file_matches() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("email.txt");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "test@example.org").unwrap();

        let mut adapter = LocalFileAdapter::new();
        adapter
            .init(&format!("file://{}", dir.path().display()))
            .await
            .unwrap();

        let config = std::sync::Arc::new(crate::detector::MatchConfig::default());
        let mut finder = MatchFinder::new(config);
        adapter
            .find_file_matches(&path.display().to_string(), &mut finder)
            .await
            .unwrap();
        let matches = finder.check_matches(&path.display().to_string(), true);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].rule_name, "email");
    }
}
