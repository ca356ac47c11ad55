//! Object store (S3) adapter
//!
//! A URI ending in `/` lists every object under the prefix; anything else is
//! treated as a single object. Objects are downloaded fully before
//! processing — the archive readers need random access, and plain content is
//! small relative to the transfer anyway.

use super::traits::FileAdapter;
use crate::detector::MatchFinder;
use crate::domain::{ArgusError, Result};
use crate::scanner::files::process_file;
use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use std::io::Cursor;
use url::Url;

#[derive(Debug, Default)]
pub struct S3Adapter {
    url: Option<String>,
    client: Option<aws_sdk_s3::Client>,
}

impl S3Adapter {
    pub fn new() -> Self {
        Self::default()
    }

    fn client(&self) -> Result<&aws_sdk_s3::Client> {
        self.client
            .as_ref()
            .ok_or_else(|| ArgusError::Other("adapter not initialized".to_string()))
    }

    fn url(&self) -> Result<&str> {
        self.url
            .as_deref()
            .ok_or_else(|| ArgusError::Other("adapter not initialized".to_string()))
    }
}

fn parse_object_url(url: &str) -> Result<(String, String)> {
    let parsed = Url::parse(url).map_err(|e| ArgusError::Usage(format!("Invalid URI: {e}")))?;
    let bucket = parsed
        .host_str()
        .ok_or_else(|| ArgusError::Usage(format!("Missing bucket in URI: {url}")))?
        .to_string();
    let key = parsed.path().trim_start_matches('/').to_string();
    Ok((bucket, key))
}

#[async_trait]
impl FileAdapter for S3Adapter {
    fn object_name(&self) -> &'static str {
        "object"
    }

    async fn init(&mut self, url: &str) -> Result<()> {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        self.client = Some(aws_sdk_s3::Client::new(&config));
        self.url = Some(url.to_string());
        Ok(())
    }

    async fn fetch_files(&self) -> Result<Vec<String>> {
        let url = self.url()?;
        if !url.ends_with('/') {
            return Ok(vec![url.to_string()]);
        }

        let (bucket, prefix) = parse_object_url(url)?;
        let client = self.client()?;

        let mut files = Vec::new();
        let mut pages = client
            .list_objects_v2()
            .bucket(&bucket)
            .prefix(&prefix)
            .into_paginator()
            .send();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| {
                ArgusError::Query(format!(
                    "Failed to list objects in {bucket}: {}",
                    DisplayErrorContext(&e)
                ))
            })?;
            for object in page.contents() {
                if let Some(key) = object.key() {
                    files.push(format!("s3://{bucket}/{key}"));
                }
            }
        }
        Ok(files)
    }

    async fn find_file_matches(&self, path: &str, finder: &mut MatchFinder) -> Result<()> {
        let (bucket, key) = parse_object_url(path)?;
        let client = self.client()?;

        let response = client
            .get_object()
            .bucket(&bucket)
            .key(&key)
            .send()
            .await
            .map_err(|e| {
                ArgusError::Query(format!(
                    "Failed to fetch {path}: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| ArgusError::Io(format!("Failed to read {path}: {e}")))?
            .into_bytes();

        process_file(Cursor::new(data.as_ref()), finder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_url() {
        let (bucket, key) = parse_object_url("s3://my-bucket/backups/dump.csv").unwrap();
        assert_eq!(bucket, "my-bucket");
        assert_eq!(key, "backups/dump.csv");
    }

    #[test]
    fn test_parse_prefix_url() {
        let (bucket, key) = parse_object_url("s3://my-bucket/backups/").unwrap();
        assert_eq!(bucket, "my-bucket");
        assert_eq!(key, "backups/");
    }

    #[tokio::test]
    async fn test_single_object_url_is_not_listed() {
        let mut adapter = S3Adapter::new();
        adapter.init("s3://my-bucket/dump.csv").await.unwrap();
        let files = adapter.fetch_files().await.unwrap();
        assert_eq!(files, vec!["s3://my-bucket/dump.csv"]);
    }
}
