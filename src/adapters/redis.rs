//! Key-value (Redis) adapter
//!
//! A Redis database has no tables, so one synthetic unit covers the whole
//! keyspace and every sampled key becomes a column named after itself.
//! Sampling draws RANDOMKEY up to the limit, deduplicating as it goes; an
//! empty database returns early. Collection types are read with their
//! cursor-based SCAN variants so large structures don't block the server.

use super::traits::DataStoreAdapter;
use crate::domain::{ArgusError, Result, Table, TableData, TableDataBuilder};
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Default)]
pub struct RedisAdapter {
    conn: Option<MultiplexedConnection>,
}

impl RedisAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    fn conn(&self) -> Result<MultiplexedConnection> {
        // multiplexed connections are cheap to clone and share one socket
        self.conn
            .clone()
            .ok_or_else(|| ArgusError::Other("adapter not initialized".to_string()))
    }
}

async fn run<T>(fut: impl Future<Output = redis::RedisResult<T>>) -> Result<T> {
    match tokio::time::timeout(TIMEOUT, fut).await {
        Ok(result) => result.map_err(|e| ArgusError::Query(format!("Redis command failed: {e}"))),
        Err(_) => Err(ArgusError::Query("Redis command timed out".to_string())),
    }
}

async fn scan_collection(
    conn: &mut MultiplexedConnection,
    command: &str,
    key: &str,
) -> Result<Vec<String>> {
    let mut items = Vec::new();
    let mut cursor: u64 = 0;
    loop {
        let (next, batch): (u64, Vec<String>) =
            run(redis::cmd(command).arg(key).arg(cursor).query_async(conn)).await?;
        items.extend(batch);
        cursor = next;
        if cursor == 0 {
            return Ok(items);
        }
    }
}

#[async_trait]
impl DataStoreAdapter for RedisAdapter {
    fn table_name(&self) -> &'static str {
        "database"
    }

    fn row_name(&self) -> &'static str {
        "key"
    }

    async fn init(&mut self, url: &str) -> Result<()> {
        let client = redis::Client::open(url)
            .map_err(|e| ArgusError::Usage(format!("Invalid connection URI: {e}")))?;

        let mut conn = match tokio::time::timeout(TIMEOUT, client.get_multiplexed_async_connection())
            .await
        {
            Ok(conn) => conn.map_err(|e| ArgusError::Connection(format!("Failed to connect: {e}")))?,
            Err(_) => return Err(ArgusError::Connection("Connection timed out".to_string())),
        };

        let pong = match tokio::time::timeout(
            TIMEOUT,
            redis::cmd("PING").query_async::<_, String>(&mut conn),
        )
        .await
        {
            Ok(result) => {
                result.map_err(|e| ArgusError::Connection(format!("Ping failed: {e}")))?
            }
            Err(_) => return Err(ArgusError::Connection("Ping timed out".to_string())),
        };
        tracing::debug!(response = %pong, "Connected to key-value store");

        self.conn = Some(conn);
        Ok(())
    }

    async fn fetch_tables(&self) -> Result<Vec<Table>> {
        Ok(vec![Table::new("", "")])
    }

    async fn fetch_table_data(&self, _table: &Table, limit: usize) -> Result<TableData> {
        let mut conn = self.conn()?;
        let mut seen = HashSet::new();
        let mut builder = TableDataBuilder::new();

        for _ in 0..limit {
            let key: Option<String> = run(redis::cmd("RANDOMKEY").query_async(&mut conn)).await?;
            let Some(key) = key else {
                // empty database
                break;
            };
            if !seen.insert(key.clone()) {
                continue;
            }
            builder.touch(&key);

            let kind: String = run(redis::cmd("TYPE").arg(&key).query_async(&mut conn)).await?;
            match kind.as_str() {
                "string" => {
                    let value: String = run(redis::cmd("GET").arg(&key).query_async(&mut conn)).await?;
                    builder.push(&key, value);
                }
                "list" => {
                    let values: Vec<String> = run(redis::cmd("LRANGE")
                        .arg(&key)
                        .arg(0)
                        .arg(1000)
                        .query_async(&mut conn))
                    .await?;
                    for value in values {
                        builder.push(&key, value);
                    }
                }
                "set" => {
                    for value in scan_collection(&mut conn, "SSCAN", &key).await? {
                        builder.push(&key, value);
                    }
                }
                "hash" => {
                    // HSCAN yields field, value, field, value, ...
                    let pairs = scan_collection(&mut conn, "HSCAN", &key).await?;
                    for value in pairs.into_iter().skip(1).step_by(2) {
                        builder.push(&key, value);
                    }
                }
                "zset" => {
                    // ZSCAN yields member, score, member, score, ...
                    let pairs = scan_collection(&mut conn, "ZSCAN", &key).await?;
                    for value in pairs.into_iter().step_by(2) {
                        builder.push(&key, value);
                    }
                }
                other => {
                    tracing::debug!(key = %key, kind = %other, "Skipping unsupported key type");
                }
            }
        }

        Ok(builder.finish())
    }
}
