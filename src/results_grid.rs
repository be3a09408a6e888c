//! Result Renderer
//!
//! Prints query rows as they stream out of the gateway: the column names once,
//! on the first row, then each row's values, all tab-separated. A query that
//! returns no rows prints nothing at all; callers that want an explicit
//! "(0 rows)" line add it themselves from the returned count.

use crate::core::db::RowSink;
use crate::core::Result;
use std::io::Write;

/// Column separator for both the header and the rows.
pub const SEPARATOR: &str = "\t";

pub struct TabularRenderer<W: Write> {
    out: W,
    header_written: bool,
    row_count: usize,
}

impl<W: Write> TabularRenderer<W> {
    pub fn new(out: W) -> Self {
        TabularRenderer {
            out,
            header_written: false,
            row_count: 0,
        }
    }

    /// Rows rendered so far.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RowSink for TabularRenderer<W> {
    fn accept(&mut self, columns: &[String], row: Vec<String>) -> Result<()> {
        if !self.header_written {
            writeln!(self.out, "{}", columns.join(SEPARATOR))?;
            self.header_written = true;
        }
        writeln!(self.out, "{}", row.join(SEPARATOR))?;
        self.row_count += 1;
        Ok(())
    }
}
