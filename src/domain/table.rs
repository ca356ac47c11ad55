//! Tables and sampled table data
//!
//! A [`Table`] is any table-like unit an adapter can enumerate: a SQL table,
//! a document collection, a search index, or the single synthetic table a
//! key-value store exposes. [`TableData`] is one sample of it, normalized to
//! named columns of string values.

use std::collections::HashMap;

/// A table-like unit to sample
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Schema the table lives in; empty for backends without schemas
    pub schema: String,

    /// Table name; empty only for the key-value synthetic table
    pub name: String,
}

impl Table {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
        }
    }

    /// Human-readable name: `schema.name`, or `name` when there is no schema
    pub fn display_name(&self) -> String {
        if self.schema.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.schema, self.name)
        }
    }
}

/// Sampled data for one table: ordered column names with parallel value lists
///
/// Invariant: `column_names.len() == column_values.len()`. A column may have
/// an empty value list (e.g. every sampled row was null); it still counts for
/// name-rule matching.
#[derive(Debug, Clone, Default)]
pub struct TableData {
    pub column_names: Vec<String>,
    pub column_values: Vec<Vec<String>>,
}

/// Insertion-ordered collector for column data
///
/// Document-shaped adapters discover columns as they walk sampled documents;
/// this keeps first-seen order and registers a column even when no string
/// value is ever appended to it.
#[derive(Debug, Default)]
pub struct TableDataBuilder {
    index: HashMap<String, usize>,
    names: Vec<String>,
    values: Vec<Vec<String>>,
}

impl TableDataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a column, returning its index
    pub fn touch(&mut self, column: &str) -> usize {
        if let Some(&i) = self.index.get(column) {
            return i;
        }
        let i = self.names.len();
        self.index.insert(column.to_string(), i);
        self.names.push(column.to_string());
        self.values.push(Vec::new());
        i
    }

    /// Append a value to a column, registering the column if needed
    pub fn push(&mut self, column: &str, value: String) {
        let i = self.touch(column);
        self.values[i].push(value);
    }

    pub fn finish(self) -> TableData {
        TableData {
            column_names: self.names,
            column_values: self.values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_with_schema() {
        let table = Table::new("public", "users");
        assert_eq!(table.display_name(), "public.users");
    }

    #[test]
    fn test_display_name_without_schema() {
        let table = Table::new("", "users");
        assert_eq!(table.display_name(), "users");
    }

    #[test]
    fn test_builder_preserves_insertion_order() {
        let mut builder = TableDataBuilder::new();
        builder.push("b", "1".to_string());
        builder.push("a", "2".to_string());
        builder.push("b", "3".to_string());
        let data = builder.finish();
        assert_eq!(data.column_names, vec!["b", "a"]);
        assert_eq!(data.column_values, vec![vec!["1", "3"], vec!["2"]]);
    }

    #[test]
    fn test_builder_touch_registers_empty_column() {
        let mut builder = TableDataBuilder::new();
        builder.touch("latitude");
        builder.push("email", "test@example.org".to_string());
        let data = builder.finish();
        assert_eq!(data.column_names, vec!["latitude", "email"]);
        assert!(data.column_values[0].is_empty());
        assert_eq!(data.column_names.len(), data.column_values.len());
    }
}
