//! Column mapping for partner sheet headers
//!
//! This module analyzes a sheet's header row into a name-to-index mapping
//! and reports which of a template's required columns are absent.

use std::collections::HashMap;

/// Column name to index mapping for one tabular input
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    /// Column name to index mapping, names trimmed
    pub name_to_index: HashMap<String, usize>,
}

impl ColumnMapping {
    /// Analyze column headers into a lookup mapping
    ///
    /// Header names are trimmed; on duplicate headers the first occurrence
    /// wins, matching how spreadsheet consumers resolve them.
    pub fn analyze(headers: &[String]) -> Self {
        let mut name_to_index = HashMap::new();

        for (index, header) in headers.iter().enumerate() {
            let column_name = header.trim().to_string();
            name_to_index.entry(column_name).or_insert(index);
        }

        ColumnMapping { name_to_index }
    }

    /// Get the index for a given column name
    pub fn get_index(&self, column_name: &str) -> Option<usize> {
        self.name_to_index.get(column_name).copied()
    }

    /// Check if a column exists in the mapping
    pub fn has_column(&self, column_name: &str) -> bool {
        self.name_to_index.contains_key(column_name)
    }

    /// List every required column absent from the mapping, in signature order
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|column| !self.has_column(column))
            .map(|column| column.to_string())
            .collect()
    }

    /// Number of distinct columns in the mapping
    pub fn len(&self) -> usize {
        self.name_to_index.len()
    }

    /// Check whether the mapping has no columns
    pub fn is_empty(&self) -> bool {
        self.name_to_index.is_empty()
    }
}
