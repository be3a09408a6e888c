//! Session
//!
//! Owns the one engine connection and the console for the lifetime of an
//! interactive run. Workflows receive `&mut Session` instead of reaching for
//! global state. The connection is released exactly once: by `close` on the
//! normal exit path, or when the session is dropped on any other path.

use crate::core::db::{self, ExecutionGateway, MutationOutcome};
use crate::core::{HotelError, Result};
use crate::prompt::{Console, Field};
use crate::results_grid::TabularRenderer;
use crate::statements::Statement;
use rusqlite::Connection;
use std::io::{BufRead, Write};
use tracing::info;

pub struct Session<R, W> {
    connection: Connection,
    console: Console<R, W>,
    show_row_count: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(connection: Connection, console: Console<R, W>) -> Self {
        Session {
            connection,
            console,
            show_row_count: true,
        }
    }

    /// Whether reports end with a `(N rows)` line.
    pub fn with_row_count(mut self, show: bool) -> Self {
        self.show_row_count = show;
        self
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub fn console(&mut self) -> &mut Console<R, W> {
        &mut self.console
    }

    /// Prompts until `field` accepts the input.
    pub fn prompt<F: Field>(&mut self, label: &str, field: &F) -> Result<F::Value> {
        self.console.prompt(label, field)
    }

    /// Writes one line to the console.
    pub fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.console.output(), "{}", message)?;
        Ok(())
    }

    pub fn mutate(&mut self, statement: &Statement) -> Result<MutationOutcome> {
        ExecutionGateway::new(&self.connection).execute_mutation(statement)
    }

    /// Runs a report, rendering rows to the console, and returns the row count.
    pub fn report(&mut self, statement: &Statement) -> Result<usize> {
        let gateway = ExecutionGateway::new(&self.connection);
        let mut renderer = TabularRenderer::new(self.console.output());
        let row_count = gateway.execute_query(statement, &mut renderer)?;

        if self.show_row_count {
            let noun = if row_count == 1 { "row" } else { "rows" };
            writeln!(self.console.output(), "({} {})", row_count, noun)?;
        }
        Ok(row_count)
    }

    /// Fails with `MissingReference` unless the lookup finds a row.
    pub fn require(&mut self, lookup: &Statement, relation: &'static str, key: String) -> Result<()> {
        if ExecutionGateway::new(&self.connection).exists(lookup)? {
            Ok(())
        } else {
            Err(HotelError::MissingReference { relation, key })
        }
    }

    /// Releases the connection and hands the console back.
    pub fn close(self) -> Result<Console<R, W>> {
        let Session {
            connection,
            mut console,
            ..
        } = self;

        write!(console.output(), "Disconnecting from database...")?;
        console.output().flush()?;
        db::close(connection)?;
        writeln!(console.output(), "Done\n\nBye !")?;
        info!("session closed");
        Ok(console)
    }
}
