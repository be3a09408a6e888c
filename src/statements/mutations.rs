//! Insert templates. Identifier columns are omitted so the engine assigns them.

use super::{date_value, text_value, Statement, Template};
use crate::prompt::Price;
use chrono::NaiveDate;
use rusqlite::types::Value;

pub(crate) const INSERT_CUSTOMER: &str = "INSERT INTO Customer (fName, lName, Address, phNo, DOB, gender) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

pub(crate) const INSERT_ROOM: &str =
    "INSERT INTO Room (hotelID, roomNo, roomType) VALUES (?1, ?2, ?3)";

pub(crate) const INSERT_MAINTENANCE_COMPANY: &str =
    "INSERT INTO MaintenanceCompany (name, address, isCertified) VALUES (?1, ?2, ?3)";

pub(crate) const INSERT_REPAIR: &str = "INSERT INTO Repair (hotelID, roomNo, mCompany, repairDate, description, repairType) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

pub(crate) const INSERT_BOOKING: &str = "INSERT INTO Booking (customer, hotelID, roomNo, bookingDate, noOfPeople, price) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

pub(crate) const ASSIGN_STAFF: &str =
    "INSERT INTO Assigned (staffID, hotelID, roomNo) VALUES (?1, ?2, ?3)";

pub(crate) const REQUEST_REPAIR: &str = "INSERT INTO Request (managerID, repairID, requestDate, description) \
     VALUES (?1, ?2, ?3, ?4)";

#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone: Option<i64>,
    pub date_of_birth: NaiveDate,
    pub gender: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRoom {
    pub hotel_id: i64,
    pub room_no: i64,
    pub room_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMaintenanceCompany {
    pub name: String,
    pub address: String,
    pub certified: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRepair {
    pub hotel_id: i64,
    pub room_no: i64,
    pub company_id: i64,
    pub repair_date: NaiveDate,
    pub description: String,
    pub repair_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub customer_id: i64,
    pub hotel_id: i64,
    pub room_no: i64,
    pub booking_date: NaiveDate,
    pub occupants: i64,
    pub price: Price,
}

/// A house-cleaning staff member assigned to a room.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAssignment {
    pub staff_id: i64,
    pub hotel_id: i64,
    pub room_no: i64,
}

/// A manager's request for an existing repair.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRepairRequest {
    pub manager_id: i64,
    pub repair_id: i64,
    pub request_date: NaiveDate,
    pub description: String,
}

pub fn insert_customer(customer: &NewCustomer) -> Statement {
    Statement::new(
        Template::InsertCustomer,
        vec![
            text_value(&customer.first_name),
            text_value(&customer.last_name),
            text_value(&customer.address),
            customer.phone.map(Value::Integer).unwrap_or(Value::Null),
            date_value(customer.date_of_birth),
            text_value(&customer.gender),
        ],
    )
}

pub fn insert_room(room: &NewRoom) -> Statement {
    Statement::new(
        Template::InsertRoom,
        vec![
            Value::Integer(room.hotel_id),
            Value::Integer(room.room_no),
            text_value(&room.room_type),
        ],
    )
}

pub fn insert_maintenance_company(company: &NewMaintenanceCompany) -> Statement {
    Statement::new(
        Template::InsertMaintenanceCompany,
        vec![
            text_value(&company.name),
            text_value(&company.address),
            Value::Integer(company.certified as i64),
        ],
    )
}

pub fn insert_repair(repair: &NewRepair) -> Statement {
    Statement::new(
        Template::InsertRepair,
        vec![
            Value::Integer(repair.hotel_id),
            Value::Integer(repair.room_no),
            Value::Integer(repair.company_id),
            date_value(repair.repair_date),
            text_value(&repair.description),
            text_value(&repair.repair_type),
        ],
    )
}

pub fn insert_booking(booking: &NewBooking) -> Statement {
    Statement::new(
        Template::InsertBooking,
        vec![
            Value::Integer(booking.customer_id),
            Value::Integer(booking.hotel_id),
            Value::Integer(booking.room_no),
            date_value(booking.booking_date),
            Value::Integer(booking.occupants),
            Value::Real(booking.price.as_f64()),
        ],
    )
}

pub fn insert_assignment(assignment: &NewAssignment) -> Statement {
    Statement::new(
        Template::AssignStaff,
        vec![
            Value::Integer(assignment.staff_id),
            Value::Integer(assignment.hotel_id),
            Value::Integer(assignment.room_no),
        ],
    )
}

pub fn insert_repair_request(request: &NewRepairRequest) -> Statement {
    Statement::new(
        Template::RequestRepair,
        vec![
            Value::Integer(request.manager_id),
            Value::Integer(request.repair_id),
            date_value(request.request_date),
            text_value(&request.description),
        ],
    )
}
