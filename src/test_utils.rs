//! # Test Utilities Module
//!
//! Fixtures shared by the unit tests and the integration tests under `tests/`:
//! - in-memory databases loaded with the hotel schema
//! - a small, hand-checked sample data set
//! - sessions driven by a scripted input string

use crate::core::Result;
use crate::prompt::Console;
use crate::session::Session;
use rusqlite::Connection;
use std::io::Cursor;

/// The schema the console expects, as shipped in `schema/hotel.sql`.
pub const HOTEL_SCHEMA: &str = include_str!("../schema/hotel.sql");

/// Sample rows. Bookings, repairs and their ids are referred to by number in tests:
///
/// | bID | customer | room    | date       | price  |
/// |-----|----------|---------|------------|--------|
/// | 1   | Ada      | (1,101) | 2020-01-05 | 250.00 |
/// | 2   | Alan     | (1,102) | 2020-01-20 | 120.50 |
/// | 3   | Ada      | (2,201) | 2020-01-10 | 300.00 |
/// | 4   | Grace    | (2,202) | 2020-02-15 | 90.00  |
/// | 5   | Ada      | (2,202) | 2020-01-25 | 300.00 |
///
/// Repairs: Fixers Inc did 1, 2 (room 1/101) and 4 (room 2/201); Acme Repairs did 3
/// (room 1/101). Idle Co has no repairs. Room 1/103 is never booked.
pub const SAMPLE_DATA: &str = "
INSERT INTO Customer (fName, lName, Address, phNo, DOB, gender) VALUES
    ('Ada', 'Lovelace', '12 St James Square', 2075550101, '1985-12-10', 'Female'),
    ('Alan', 'Turing', '2 Hollymeade', NULL, '1972-06-23', 'Male'),
    ('Grace', 'Hopper', '1 Navy Yard', 2025550199, '1976-12-09', 'Female');

INSERT INTO Room (hotelID, roomNo, roomType) VALUES
    (1, 101, 'Suite'),
    (1, 102, 'Double'),
    (1, 103, 'Single'),
    (2, 201, 'Suite'),
    (2, 202, 'Single');

INSERT INTO Booking (customer, hotelID, roomNo, bookingDate, noOfPeople, price) VALUES
    (1, 1, 101, '2020-01-05', 2, 250.00),
    (2, 1, 102, '2020-01-20', 1, 120.50),
    (1, 2, 201, '2020-01-10', 2, 300.00),
    (3, 2, 202, '2020-02-15', 1, 90.00),
    (1, 2, 202, '2020-01-25', 3, 300.00);

INSERT INTO MaintenanceCompany (name, address, isCertified) VALUES
    ('Fixers Inc', '5 Workshop Rd', 1),
    ('Acme Repairs', '9 Factory Ln', 0),
    ('Idle Co', '0 Nowhere St', 1);

INSERT INTO Repair (hotelID, roomNo, mCompany, repairDate, description, repairType) VALUES
    (1, 101, 1, '2019-03-01', 'Broken window', 'Glass'),
    (1, 101, 1, '2020-07-15', 'Leaky tap', 'Plumbing'),
    (1, 101, 2, '2020-11-02', 'Flickering light', 'Electric'),
    (2, 201, 1, '2021-01-10', 'Door lock', 'Hardware');
";

/// Isolated in-memory database loaded with the hotel schema
pub struct DatabaseFixture {
    pub connection: Connection,
}

impl DatabaseFixture {
    /// Empty hotel database.
    pub fn new() -> Result<Self> {
        let connection = Connection::open_in_memory()?;
        connection.execute_batch(HOTEL_SCHEMA)?;
        Ok(DatabaseFixture { connection })
    }

    /// Hotel database with `SAMPLE_DATA` loaded.
    pub fn with_sample_data() -> Result<Self> {
        let fixture = Self::new()?;
        fixture.connection.execute_batch(SAMPLE_DATA)?;
        Ok(fixture)
    }

    /// Number of rows in `table`.
    pub fn count(&self, table: &str) -> Result<i64> {
        let count = self
            .connection
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?;
        Ok(count)
    }
}

pub type ScriptedSession = Session<Cursor<Vec<u8>>, Vec<u8>>;

/// A session whose console reads `input` and writes into a buffer.
pub fn scripted_session(connection: Connection, input: &str) -> ScriptedSession {
    let console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
    Session::new(connection, console)
}

/// Closes the session and returns everything it printed.
pub fn session_output(session: ScriptedSession) -> String {
    let console = session.close().expect("session should close cleanly");
    String::from_utf8(console.into_parts().1).expect("console output is UTF-8")
}
