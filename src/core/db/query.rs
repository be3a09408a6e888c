//! Query Execution Module
//!
//! The execution gateway: the only place statements reach the engine.
//! Mutations report what they changed, queries stream their rows into a
//! `RowSink` straight from the engine cursor.

use crate::core::{HotelError, Result};
use crate::statements::{Statement, StatementKind};
use rusqlite::{params_from_iter, types::ValueRef, Connection};
use tracing::{debug, error};

/// Receives query rows one at a time, in engine order.
pub trait RowSink {
    /// Called once per row; `columns` is the same slice for every row of one query.
    fn accept(&mut self, columns: &[String], row: Vec<String>) -> Result<()>;
}

/// What a successful mutation changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationOutcome {
    /// Number of rows the statement inserted
    pub rows_affected: usize,
    /// Identifier the engine generated for the new row
    pub last_insert_id: i64,
}

/// Represents the result of a SQL query execution, collected in memory
#[derive(Debug, Default)]
pub struct QueryResult {
    /// Column names from the query result
    pub columns: Vec<String>,
    /// Rows of data as string values
    pub rows: Vec<Vec<String>>,
    /// Number of rows returned
    pub row_count: usize,
}

impl QueryResult {
    /// Creates a new QueryResult from column names and row data
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let row_count = rows.len();
        QueryResult {
            columns,
            rows,
            row_count,
        }
    }

    /// Values of one column, by name.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| row[index].as_str()).collect())
    }
}

impl RowSink for QueryResult {
    fn accept(&mut self, columns: &[String], row: Vec<String>) -> Result<()> {
        if self.columns.is_empty() {
            self.columns = columns.to_vec();
        }
        self.rows.push(row);
        self.row_count += 1;
        Ok(())
    }
}

/// Statement execution service bound to one engine connection
pub struct ExecutionGateway<'a> {
    connection: &'a Connection,
}

impl<'a> ExecutionGateway<'a> {
    /// Creates a new gateway for the given connection
    pub fn new(connection: &'a Connection) -> Self {
        ExecutionGateway { connection }
    }

    /// Executes an insert statement.
    ///
    /// # Errors
    ///
    /// Returns `HotelError::Query` if the statement is not a mutation, and
    /// `HotelError::Database` for constraint violations or engine failures.
    pub fn execute_mutation(&self, statement: &Statement) -> Result<MutationOutcome> {
        expect_kind(statement, StatementKind::Mutation)?;
        debug!(template = statement.template().name(), "executing mutation");

        let rows_affected = self
            .connection
            .execute(statement.sql(), params_from_iter(statement.params()))
            .map_err(|e| {
                error!(template = statement.template().name(), "mutation failed: {}", e);
                HotelError::Database(e)
            })?;

        Ok(MutationOutcome {
            rows_affected,
            last_insert_id: self.connection.last_insert_rowid(),
        })
    }

    /// Executes a report and pushes every row into `sink`.
    ///
    /// The engine cursor is walked exactly once. Returns the number of rows delivered.
    pub fn execute_query(&self, statement: &Statement, sink: &mut dyn RowSink) -> Result<usize> {
        expect_kind(statement, StatementKind::Report)?;
        debug!(template = statement.template().name(), "executing query");
        self.stream(statement, sink).map_err(|e| {
            error!(template = statement.template().name(), "query failed: {}", e);
            e
        })
    }

    /// Executes a report and collects its rows in memory.
    pub fn collect(&self, statement: &Statement) -> Result<QueryResult> {
        let mut result = QueryResult::default();
        self.execute_query(statement, &mut result)?;
        Ok(result)
    }

    /// Runs an existence lookup.
    pub fn exists(&self, statement: &Statement) -> Result<bool> {
        expect_kind(statement, StatementKind::Lookup)?;
        let mut found = QueryResult::default();
        self.stream(statement, &mut found)?;
        Ok(found.row_count > 0)
    }

    fn stream(&self, statement: &Statement, sink: &mut dyn RowSink) -> Result<usize> {
        let mut prepared = self.connection.prepare(statement.sql())?;

        let columns: Vec<String> = prepared.column_names().into_iter().map(String::from).collect();
        let column_count = columns.len();

        let mut rows = prepared.query(params_from_iter(statement.params()))?;
        let mut row_count = 0;
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(column_count);
            for i in 0..column_count {
                values.push(format_value(row.get_ref(i)?));
            }
            sink.accept(&columns, values)?;
            row_count += 1;
        }

        debug!(template = statement.template().name(), row_count, "query finished");
        Ok(row_count)
    }
}

fn expect_kind(statement: &Statement, kind: StatementKind) -> Result<()> {
    if statement.kind() == kind {
        Ok(())
    } else {
        Err(HotelError::Query(format!(
            "{} is a {:?} statement, not a {:?}",
            statement.template().name(),
            statement.kind(),
            kind
        )))
    }
}

/// Formats a SQLite value for display
fn format_value(value: ValueRef) -> String {
    match value {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).to_string(),
        ValueRef::Blob(b) => format!("<BLOB: {} bytes>", b.len()),
    }
}
