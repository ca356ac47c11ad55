//! Relational SQL adapter
//!
//! One adapter covers every SQL backend; the URL scheme picks the dialect,
//! which drives the catalog query and the sampling strategy. Rows are read
//! with a text-first decode chain so numeric values (card numbers, SSNs
//! stored as integers) still reach the detector as strings.

use super::traits::DataStoreAdapter;
use crate::domain::{ArgusError, Result, Table, TableData};
use async_trait::async_trait;
use sqlx::any::AnyRow;
use sqlx::{AnyPool, Column, Row};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dialect {
    Postgres,
    MySql,
    Sqlite,
    SqlServer,
}

impl Dialect {
    pub(crate) fn from_scheme(scheme: &str) -> Self {
        match scheme {
            "sqlite" | "sqlite3" => Dialect::Sqlite,
            "mysql" | "mariadb" => Dialect::MySql,
            "mssql" | "sqlserver" => Dialect::SqlServer,
            _ => Dialect::Postgres,
        }
    }
}

#[derive(Debug, Default)]
pub struct SqlAdapter {
    pool: Option<AnyPool>,
    dialect: Option<Dialect>,
}

impl SqlAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    fn pool(&self) -> Result<&AnyPool> {
        self.pool
            .as_ref()
            .ok_or_else(|| ArgusError::Other("adapter not initialized".to_string()))
    }

    fn dialect(&self) -> Dialect {
        self.dialect.unwrap_or(Dialect::Postgres)
    }

    async fn tsm_system_rows_supported(&self, pool: &AnyPool) -> bool {
        let count: std::result::Result<i64, sqlx::Error> =
            sqlx::query_scalar("SELECT COUNT(*) FROM pg_extension WHERE extname = 'tsm_system_rows'")
                .fetch_one(pool)
                .await;
        // redshift and friends don't have pg_extension
        count.map(|c| c > 0).unwrap_or(false)
    }

    async fn sample_sql(&self, pool: &AnyPool, table: &Table, limit: usize) -> String {
        match self.dialect() {
            Dialect::Postgres => {
                let quoted = format!("{}.{}", quote_ident(&table.schema), quote_ident(&table.name));
                if self.tsm_system_rows_supported(pool).await {
                    format!("SELECT * FROM {quoted} TABLESAMPLE SYSTEM_ROWS({limit})")
                } else {
                    format!("SELECT * FROM {quoted} LIMIT {limit}")
                }
            }
            Dialect::Sqlite => format!(
                "SELECT * FROM {} ORDER BY RANDOM() LIMIT {limit}",
                quote_ident(&table.name)
            ),
            Dialect::SqlServer => {
                format!("SELECT * FROM {} TABLESAMPLE ({limit} ROWS)", table.name)
            }
            Dialect::MySql => {
                format!("SELECT * FROM {}.{} LIMIT {limit}", table.schema, table.name)
            }
        }
    }
}

#[async_trait]
impl DataStoreAdapter for SqlAdapter {
    fn table_name(&self) -> &'static str {
        "table"
    }

    fn row_name(&self) -> &'static str {
        "row"
    }

    async fn init(&mut self, url: &str) -> Result<()> {
        let parsed = Url::parse(url).map_err(|e| ArgusError::Usage(format!("Invalid URI: {e}")))?;
        self.dialect = Some(Dialect::from_scheme(parsed.scheme()));

        sqlx::any::install_default_drivers();
        let pool = AnyPool::connect(url)
            .await
            .map_err(|e| ArgusError::Connection(format!("Failed to connect: {e}")))?;
        self.pool = Some(pool);

        tracing::debug!(dialect = ?self.dialect(), "Connected to database");
        Ok(())
    }

    async fn fetch_tables(&self) -> Result<Vec<Table>> {
        let pool = self.pool()?;

        let query = match self.dialect() {
            Dialect::Sqlite => {
                "SELECT '' AS table_schema, name AS table_name FROM sqlite_master \
                 WHERE type = 'table' AND name != 'sqlite_sequence' ORDER BY name"
            }
            Dialect::MySql => {
                "SELECT table_schema AS table_schema, table_name AS table_name \
                 FROM information_schema.tables \
                 WHERE table_schema = DATABASE() \
                 OR (DATABASE() IS NULL AND table_schema NOT IN \
                 ('information_schema', 'mysql', 'performance_schema', 'sys')) \
                 ORDER BY table_schema, table_name"
            }
            Dialect::SqlServer => {
                "SELECT table_schema, table_name FROM information_schema.tables \
                 WHERE table_type = 'BASE TABLE' ORDER BY table_schema, table_name"
            }
            Dialect::Postgres => {
                "SELECT table_schema, table_name FROM information_schema.tables \
                 WHERE table_schema NOT IN ('information_schema', 'pg_catalog') \
                 ORDER BY table_schema, table_name"
            }
        };

        let rows = sqlx::query(query)
            .fetch_all(pool)
            .await
            .map_err(|e| ArgusError::Query(format!("Failed to list tables: {e}")))?;

        let mut tables = Vec::with_capacity(rows.len());
        for row in rows {
            let schema: String = row
                .try_get("table_schema")
                .map_err(|e| ArgusError::Query(format!("Failed to read table list: {e}")))?;
            let name: String = row
                .try_get("table_name")
                .map_err(|e| ArgusError::Query(format!("Failed to read table list: {e}")))?;
            tables.push(Table::new(schema, name));
        }
        Ok(tables)
    }

    async fn fetch_table_data(&self, table: &Table, limit: usize) -> Result<TableData> {
        let pool = self.pool()?;
        let sql = self.sample_sql(pool, table, limit).await;

        let rows = sqlx::query(&sql).fetch_all(pool).await.map_err(|e| {
            ArgusError::Query(format!("Failed to sample {}: {e}", table.display_name()))
        })?;

        let Some(first) = rows.first() else {
            return Ok(TableData::default());
        };

        let column_names: Vec<String> =
            first.columns().iter().map(|c| c.name().to_string()).collect();
        let mut column_values: Vec<Vec<String>> = vec![Vec::new(); column_names.len()];

        for row in &rows {
            for (i, values) in column_values.iter_mut().enumerate() {
                if let Some(value) = decode_value(row, i) {
                    if !value.is_empty() {
                        values.push(value);
                    }
                }
            }
        }

        Ok(TableData {
            column_names,
            column_values,
        })
    }
}

/// Read one cell as a string, trying textual then numeric decodings
///
/// Nulls and cells no decoding claims (exotic driver types) come back as
/// `None` and are skipped.
fn decode_value(row: &AnyRow, index: usize) -> Option<String> {
    if let Ok(value) = row.try_get::<Option<String>, _>(index) {
        return value;
    }
    if let Ok(value) = row.try_get::<Option<i64>, _>(index) {
        return value.map(|v| v.to_string());
    }
    if let Ok(value) = row.try_get::<Option<f64>, _>(index) {
        return value.map(|v| v.to_string());
    }
    if let Ok(value) = row.try_get::<Option<bool>, _>(index) {
        return value.map(|v| v.to_string());
    }
    if let Ok(value) = row.try_get::<Option<Vec<u8>>, _>(index) {
        return value.map(|v| String::from_utf8_lossy(&v).into_owned());
    }
    None
}

/// Double-quote an identifier, escaping embedded quotes
fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_from_scheme() {
        assert_eq!(Dialect::from_scheme("sqlite"), Dialect::Sqlite);
        assert_eq!(Dialect::from_scheme("sqlite3"), Dialect::Sqlite);
        assert_eq!(Dialect::from_scheme("mysql"), Dialect::MySql);
        assert_eq!(Dialect::from_scheme("mariadb"), Dialect::MySql);
        assert_eq!(Dialect::from_scheme("mssql"), Dialect::SqlServer);
        assert_eq!(Dialect::from_scheme("sqlserver"), Dialect::SqlServer);
        assert_eq!(Dialect::from_scheme("postgres"), Dialect::Postgres);
        assert_eq!(Dialect::from_scheme("postgresql"), Dialect::Postgres);
        assert_eq!(Dialect::from_scheme("anything"), Dialect::Postgres);
    }

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("users"), "\"users\"");
        assert_eq!(quote_ident("user\"s"), "\"user\"\"s\"");
    }
}
