//! Append-only log buffer

use super::Row;

/// Ordered rows of one session
///
/// Rows are only ever appended; the buffer never shrinks.
#[derive(Debug, Clone, Default)]
pub struct LogBuffer {
    rows: Vec<Row>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last(&self) -> Option<&Row> {
        self.rows.last()
    }

    pub(crate) fn push(&mut self, row: Row) -> &Row {
        self.rows.push(row);
        &self.rows[self.rows.len() - 1]
    }
}
