//! Existence checks for rows a new record is about to reference.

use super::{Statement, Template};
use rusqlite::types::Value;

pub(crate) const CUSTOMER_EXISTS: &str = "SELECT 1 FROM Customer WHERE customerID = ?1";

pub(crate) const ROOM_EXISTS: &str = "SELECT 1 FROM Room WHERE hotelID = ?1 AND roomNo = ?2";

pub(crate) const COMPANY_EXISTS: &str = "SELECT 1 FROM MaintenanceCompany WHERE cmpID = ?1";

pub(crate) const REPAIR_EXISTS: &str = "SELECT 1 FROM Repair WHERE rID = ?1";

pub fn customer_exists(customer_id: i64) -> Statement {
    Statement::new(Template::CustomerExists, vec![Value::Integer(customer_id)])
}

pub fn room_exists(hotel_id: i64, room_no: i64) -> Statement {
    Statement::new(
        Template::RoomExists,
        vec![Value::Integer(hotel_id), Value::Integer(room_no)],
    )
}

pub fn company_exists(company_id: i64) -> Statement {
    Statement::new(Template::CompanyExists, vec![Value::Integer(company_id)])
}

pub fn repair_exists(repair_id: i64) -> Statement {
    Statement::new(Template::RepairExists, vec![Value::Integer(repair_id)])
}
