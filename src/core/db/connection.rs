//! Connection Management Module
//!
//! Turns the console's positional arguments into a connection target,
//! opens the engine connection and releases it.

use crate::config::ConnectionConfig;
use crate::core::{HotelError, Result};
use rusqlite::{Connection, OpenFlags};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Database name that selects a transient in-memory engine.
pub const MEMORY_DATABASE: &str = ":memory:";

/// Protocols the console knows how to open.
const SUPPORTED_PROTOCOLS: &[&str] = &["sqlite"];

/// Everything needed to reach one database: `<protocol>://<host>:<port>/<database>` plus the login.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionTarget {
    pub protocol: String,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
}

impl ConnectionTarget {
    /// Builds a target from the three command-line arguments and the configured protocol and host.
    pub fn from_args(dbname: &str, port: &str, user: &str, config: &ConnectionConfig) -> Result<Self> {
        let port = parse_port(port)?;
        let target = ConnectionTarget {
            protocol: config.protocol.clone(),
            host: config.host.clone(),
            port,
            database: dbname.to_string(),
            user: user.to_string(),
        };
        target.validate()?;
        Ok(target)
    }

    /// Parses a `<protocol>://<host>:<port>/<database>` locator.
    pub fn parse(url: &str, user: &str) -> Result<Self> {
        let (protocol, rest) = url
            .split_once("://")
            .ok_or_else(|| HotelError::Target(format!("'{}' has no protocol", url)))?;
        let (authority, database) = rest
            .split_once('/')
            .ok_or_else(|| HotelError::Target(format!("'{}' has no database", url)))?;
        let (host, port) = authority
            .rsplit_once(':')
            .ok_or_else(|| HotelError::Target(format!("'{}' has no port", url)))?;

        let target = ConnectionTarget {
            protocol: protocol.to_string(),
            host: host.to_string(),
            port: parse_port(port)?,
            database: database.to_string(),
            user: user.to_string(),
        };
        target.validate()?;
        Ok(target)
    }

    fn validate(&self) -> Result<()> {
        if !SUPPORTED_PROTOCOLS.contains(&self.protocol.as_str()) {
            return Err(HotelError::Target(format!(
                "unsupported protocol '{}'",
                self.protocol
            )));
        }
        if self.host.is_empty() {
            return Err(HotelError::Target("host can't be empty".to_string()));
        }
        if self.database.is_empty() {
            return Err(HotelError::Target("database name can't be empty".to_string()));
        }
        if self.database.contains(['/', '\\']) {
            return Err(HotelError::Target(format!(
                "database name '{}' must not contain path separators",
                self.database
            )));
        }
        if self.user.is_empty() {
            return Err(HotelError::Target("user can't be empty".to_string()));
        }
        Ok(())
    }

    /// The locator without credentials, as shown in the connection banner.
    pub fn url(&self) -> String {
        format!("{}://{}:{}/{}", self.protocol, self.host, self.port, self.database)
    }

    pub fn is_memory(&self) -> bool {
        self.database == MEMORY_DATABASE
    }

    /// The database file for this target inside `data_dir`, or `None` for the in-memory engine.
    pub fn database_path(&self, data_dir: &Path) -> Option<PathBuf> {
        if self.is_memory() {
            None
        } else {
            Some(data_dir.join(format!("{}.db", self.database)))
        }
    }
}

impl fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} as {}", self.url(), self.user)
    }
}

fn parse_port(port: &str) -> Result<u16> {
    match port.trim().parse::<u16>() {
        Ok(0) | Err(_) => Err(HotelError::Target(format!("'{}' is not a valid port", port))),
        Ok(p) => Ok(p),
    }
}

/// Opens the engine connection for `target`.
///
/// Database files are never created here: a missing file is reported the
/// same way an unreachable server would be.
pub fn open(target: &ConnectionTarget, data_dir: &Path) -> Result<Connection> {
    info!(url = %target.url(), user = %target.user, "opening connection");

    let conn = match target.database_path(data_dir) {
        None => Connection::open_in_memory()?,
        Some(path) => {
            debug!("database file {}", path.display());
            Connection::open_with_flags(
                &path,
                OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?
        }
    };

    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    Ok(conn)
}

/// Releases the connection, reporting any error the engine raises while closing.
pub fn close(conn: Connection) -> Result<()> {
    match conn.close() {
        Ok(()) => {
            info!("connection closed");
            Ok(())
        }
        Err((_conn, e)) => {
            warn!("failed to close connection cleanly: {}", e);
            Err(HotelError::Database(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sqlite_config() -> ConnectionConfig {
        ConnectionConfig::default()
    }

    #[test]
    fn test_target_from_args() {
        let target = ConnectionTarget::from_args("hotel", "5432", "alice", &sqlite_config()).unwrap();
        assert_eq!(target.url(), "sqlite://localhost:5432/hotel");
        assert_eq!(target.to_string(), "sqlite://localhost:5432/hotel as alice");
        assert_eq!(
            target.database_path(Path::new("/data")),
            Some(PathBuf::from("/data/hotel.db"))
        );
    }

    #[test]
    fn test_target_rejects_bad_port() {
        for port in ["", "abc", "0", "70000", "-1"] {
            let result = ConnectionTarget::from_args("hotel", port, "alice", &sqlite_config());
            assert!(matches!(result, Err(HotelError::Target(_))), "port {:?}", port);
        }
    }

    #[test]
    fn test_target_rejects_unsupported_protocol() {
        let config = ConnectionConfig {
            protocol: "postgresql".to_string(),
            ..ConnectionConfig::default()
        };
        let result = ConnectionTarget::from_args("hotel", "5432", "alice", &config);
        match result {
            Err(HotelError::Target(msg)) => assert!(msg.contains("postgresql")),
            other => panic!("Expected Target error, got {:?}", other),
        }
    }

    #[test]
    fn test_target_rejects_path_in_database_name() {
        let result = ConnectionTarget::from_args("../etc/passwd", "5432", "alice", &sqlite_config());
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_locator() {
        let target = ConnectionTarget::parse("sqlite://db.internal:6000/bookings", "bob").unwrap();
        assert_eq!(target.host, "db.internal");
        assert_eq!(target.port, 6000);
        assert_eq!(target.database, "bookings");
        assert_eq!(target.url(), "sqlite://db.internal:6000/bookings");

        assert!(ConnectionTarget::parse("db.internal:6000/bookings", "bob").is_err());
        assert!(ConnectionTarget::parse("sqlite://db.internal/bookings", "bob").is_err());
        assert!(ConnectionTarget::parse("sqlite://db.internal:6000", "bob").is_err());
    }

    #[test]
    fn test_open_memory_database() {
        let target = ConnectionTarget::from_args(MEMORY_DATABASE, "5432", "alice", &sqlite_config()).unwrap();
        assert!(target.is_memory());
        let conn = open(&target, Path::new(".")).unwrap();
        let fk: i64 = conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0)).unwrap();
        assert_eq!(fk, 1);
        close(conn).unwrap();
    }

    #[test]
    fn test_open_missing_database_fails() {
        let dir = tempfile::tempdir().unwrap();
        let target = ConnectionTarget::from_args("nope", "5432", "alice", &sqlite_config()).unwrap();
        match open(&target, dir.path()) {
            Err(HotelError::Database(_)) => {}
            other => panic!("Expected Database error, got {:?}", other.map(|_| ())),
        }
        assert!(!dir.path().join("nope.db").exists());
    }

    #[test]
    fn test_open_existing_database_file() {
        let dir = tempfile::tempdir().unwrap();
        Connection::open(dir.path().join("hotel.db")).unwrap();
        let target = ConnectionTarget::from_args("hotel", "5432", "alice", &sqlite_config()).unwrap();
        let conn = open(&target, dir.path()).unwrap();
        close(conn).unwrap();
    }
}
