//! Document store (MongoDB) adapter
//!
//! The database comes from the URI path. Sampling uses the `$sample`
//! aggregation stage, and each sampled document is flattened into columns:
//! nested documents recurse with a dotted prefix, arrays of strings join
//! into one value to preserve per-document counts, and non-string scalars
//! register the column without contributing a value.

use super::traits::DataStoreAdapter;
use crate::domain::{ArgusError, Result, Table, TableData, TableDataBuilder};
use async_trait::async_trait;
use bson::{doc, Bson, Document};
use futures::stream::TryStreamExt;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const QUERY_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Default)]
pub struct MongodbAdapter {
    db: Option<Database>,
}

impl MongodbAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    fn db(&self) -> Result<&Database> {
        self.db
            .as_ref()
            .ok_or_else(|| ArgusError::Other("adapter not initialized".to_string()))
    }
}

#[async_trait]
impl DataStoreAdapter for MongodbAdapter {
    fn table_name(&self) -> &'static str {
        "collection"
    }

    fn row_name(&self) -> &'static str {
        "document"
    }

    async fn init(&mut self, url: &str) -> Result<()> {
        let mut options = ClientOptions::parse(url)
            .await
            .map_err(|e| ArgusError::Connection(format!("Invalid connection URI: {e}")))?;
        options.connect_timeout = Some(CONNECT_TIMEOUT);
        options.server_selection_timeout = Some(CONNECT_TIMEOUT);

        let database = options
            .default_database
            .clone()
            .ok_or_else(|| ArgusError::Usage("no database specified".to_string()))?;

        let client = Client::with_options(options)
            .map_err(|e| ArgusError::Connection(format!("Failed to connect: {e}")))?;
        self.db = Some(client.database(&database));
        Ok(())
    }

    async fn fetch_tables(&self) -> Result<Vec<Table>> {
        let db = self.db()?;
        let names = tokio::time::timeout(CONNECT_TIMEOUT, db.list_collection_names(None))
            .await
            .map_err(|_| ArgusError::Query("Timed out listing collections".to_string()))?
            .map_err(|e| ArgusError::Query(format!("Failed to list collections: {e}")))?;
        Ok(names.into_iter().map(|name| Table::new("", name)).collect())
    }

    async fn fetch_table_data(&self, table: &Table, limit: usize) -> Result<TableData> {
        let collection = self.db()?.collection::<Document>(&table.name);
        let pipeline = vec![doc! { "$sample": { "size": limit as i64 } }];

        let sample = async {
            let mut cursor = collection
                .aggregate(pipeline, None)
                .await
                .map_err(|e| ArgusError::Query(format!("Failed to sample {}: {e}", table.name)))?;

            let mut builder = TableDataBuilder::new();
            while let Some(document) = cursor
                .try_next()
                .await
                .map_err(|e| ArgusError::Query(format!("Failed to read sample: {e}")))?
            {
                flatten_document(&document, "", &mut builder);
            }
            Ok(builder.finish())
        };

        tokio::time::timeout(QUERY_TIMEOUT, sample)
            .await
            .map_err(|_| ArgusError::Query(format!("Timed out sampling {}", table.name)))?
    }
}

fn flatten_document(document: &Document, prefix: &str, builder: &mut TableDataBuilder) {
    for (key, value) in document {
        let column = format!("{prefix}{key}");
        builder.touch(&column);
        match value {
            Bson::String(s) => builder.push(&column, s.clone()),
            Bson::Document(nested) => {
                flatten_document(nested, &format!("{column}."), builder);
            }
            Bson::Array(items) => {
                let strings: Vec<&str> = items
                    .iter()
                    .filter_map(|item| match item {
                        Bson::String(s) => Some(s.as_str()),
                        _ => None,
                    })
                    .collect();
                // one joined value keeps per-document count semantics
                if !strings.is_empty() {
                    builder.push(&column, strings.join(", "));
                }
                for item in items {
                    if let Bson::Document(nested) = item {
                        flatten_document(nested, &format!("{column}."), builder);
                    }
                }
            }
            // numbers, dates, ObjectIds carry no scannable text
            _ => {}
        }
    }
}
