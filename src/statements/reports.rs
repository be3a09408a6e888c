//! Read-only report templates.
//!
//! Ranked reports order by the ranking column descending and break ties by
//! identifier ascending, so equal prices or counts always come out in the same order.

use super::{date_value, text_value, Statement, Template};
use chrono::{Days, NaiveDate};
use rusqlite::types::Value;

/// Length of the window checked by the week-availability report, including its first day.
pub const WEEK_DAYS: u64 = 7;

pub(crate) const AVAILABLE_ROOMS: &str = "\
SELECT roomNo FROM Room WHERE hotelID = ?1
EXCEPT
SELECT roomNo FROM Booking WHERE hotelID = ?1
ORDER BY roomNo";

pub(crate) const BOOKED_ROOMS: &str = "\
SELECT COUNT(*) AS bookedRooms FROM Booking WHERE hotelID = ?1";

pub(crate) const WEEK_AVAILABILITY: &str = "\
SELECT R.roomNo, R.roomType
FROM Room R
WHERE R.hotelID = ?1
  AND NOT EXISTS (
    SELECT 1 FROM Booking B
    WHERE B.hotelID = R.hotelID
      AND B.roomNo = R.roomNo
      AND B.bookingDate BETWEEN ?2 AND ?3
  )
ORDER BY R.roomNo";

pub(crate) const TOP_K_PRICE_BY_DATE_RANGE: &str = "\
SELECT B.bID, B.hotelID, B.roomNo, B.bookingDate, printf('%.2f', B.price) AS price
FROM Booking B
WHERE B.bookingDate BETWEEN ?1 AND ?2
ORDER BY B.price DESC, B.bID ASC
LIMIT ?3";

pub(crate) const TOP_K_PRICE_FOR_CUSTOMER: &str = "\
SELECT B.bID, B.hotelID, B.roomNo, B.bookingDate, printf('%.2f', B.price) AS price
FROM Booking B
JOIN Customer C ON C.customerID = B.customer
WHERE C.fName = ?1 AND C.lName = ?2
ORDER BY B.price DESC, B.bID ASC
LIMIT ?3";

pub(crate) const TOTAL_COST_FOR_CUSTOMER: &str = "\
SELECT printf('%.2f', COALESCE(SUM(CAST(round(B.price * 100) AS INTEGER)), 0) / 100.0) AS totalCost
FROM Booking B
JOIN Customer C ON C.customerID = B.customer
WHERE B.hotelID = ?1
  AND C.fName = ?2 AND C.lName = ?3
  AND B.bookingDate BETWEEN ?4 AND ?5";

pub(crate) const REPAIRS_BY_COMPANY: &str = "\
SELECT R.rID, R.repairType, R.hotelID, R.roomNo, R.repairDate
FROM Repair R
JOIN MaintenanceCompany M ON M.cmpID = R.mCompany
WHERE M.name = ?1
ORDER BY R.rID";

pub(crate) const TOP_K_COMPANIES_BY_REPAIR_COUNT: &str = "\
SELECT M.cmpID, M.name, COUNT(R.rID) AS repairCount
FROM MaintenanceCompany M
JOIN Repair R ON R.mCompany = M.cmpID
GROUP BY M.cmpID, M.name
ORDER BY repairCount DESC, M.cmpID ASC
LIMIT ?1";

pub(crate) const REPAIRS_PER_YEAR: &str = "\
SELECT strftime('%Y', R.repairDate) AS repairYear, COUNT(*) AS repairCount
FROM Repair R
WHERE R.hotelID = ?1 AND R.roomNo = ?2
GROUP BY repairYear
ORDER BY repairYear";

/// An inclusive date range whose start never lies after its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(DateRange { start, end })
    }

    /// The week-availability window starting at `start`.
    pub fn week_from(start: NaiveDate) -> Self {
        let end = start
            .checked_add_days(Days::new(WEEK_DAYS - 1))
            .unwrap_or(NaiveDate::MAX);
        DateRange { start, end }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

/// A customer identified by name, as the reports look them up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerName {
    pub first: String,
    pub last: String,
}

pub fn available_rooms(hotel_id: i64) -> Statement {
    Statement::new(Template::AvailableRooms, vec![Value::Integer(hotel_id)])
}

pub fn booked_rooms(hotel_id: i64) -> Statement {
    Statement::new(Template::BookedRooms, vec![Value::Integer(hotel_id)])
}

pub fn week_availability(hotel_id: i64, start: NaiveDate) -> Statement {
    let week = DateRange::week_from(start);
    Statement::new(
        Template::WeekAvailability,
        vec![
            Value::Integer(hotel_id),
            date_value(week.start()),
            date_value(week.end()),
        ],
    )
}

pub fn top_k_price_by_date_range(range: DateRange, k: i64) -> Statement {
    Statement::new(
        Template::TopKPriceByDateRange,
        vec![date_value(range.start()), date_value(range.end()), Value::Integer(k)],
    )
}

pub fn top_k_price_for_customer(customer: &CustomerName, k: i64) -> Statement {
    Statement::new(
        Template::TopKPriceForCustomer,
        vec![
            text_value(&customer.first),
            text_value(&customer.last),
            Value::Integer(k),
        ],
    )
}

pub fn total_cost_for_customer(hotel_id: i64, customer: &CustomerName, range: DateRange) -> Statement {
    Statement::new(
        Template::TotalCostForCustomer,
        vec![
            Value::Integer(hotel_id),
            text_value(&customer.first),
            text_value(&customer.last),
            date_value(range.start()),
            date_value(range.end()),
        ],
    )
}

pub fn repairs_by_company(company_name: &str) -> Statement {
    Statement::new(Template::RepairsByCompany, vec![text_value(company_name)])
}

pub fn top_k_companies_by_repair_count(k: i64) -> Statement {
    Statement::new(Template::TopKCompaniesByRepairCount, vec![Value::Integer(k)])
}

pub fn repairs_per_year(hotel_id: i64, room_no: i64) -> Statement {
    Statement::new(
        Template::RepairsPerYear,
        vec![Value::Integer(hotel_id), Value::Integer(room_no)],
    )
}
