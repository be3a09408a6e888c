//! Statement Builder
//!
//! Every operation the console can perform is one fixed SQL template with
//! positional `?N` placeholders. Builders pair a template with the bound values
//! collected from the prompts; values never become part of the SQL text.
//!
//! - `mutations`: inserts for the seven add/assign/request workflows
//! - `reports`: the nine read-only reports
//! - `lookups`: existence checks run before inserts that carry references

pub mod lookups;
pub mod mutations;
pub mod reports;

use chrono::NaiveDate;
use rusqlite::types::Value;

/// Which gateway verb a statement belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Mutation,
    Report,
    Lookup,
}

/// The fixed operation templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    InsertCustomer,
    InsertRoom,
    InsertMaintenanceCompany,
    InsertRepair,
    InsertBooking,
    AssignStaff,
    RequestRepair,
    AvailableRooms,
    BookedRooms,
    WeekAvailability,
    TopKPriceByDateRange,
    TopKPriceForCustomer,
    TotalCostForCustomer,
    RepairsByCompany,
    TopKCompaniesByRepairCount,
    RepairsPerYear,
    CustomerExists,
    RoomExists,
    CompanyExists,
    RepairExists,
}

impl Template {
    pub const ALL: [Template; 20] = [
        Template::InsertCustomer,
        Template::InsertRoom,
        Template::InsertMaintenanceCompany,
        Template::InsertRepair,
        Template::InsertBooking,
        Template::AssignStaff,
        Template::RequestRepair,
        Template::AvailableRooms,
        Template::BookedRooms,
        Template::WeekAvailability,
        Template::TopKPriceByDateRange,
        Template::TopKPriceForCustomer,
        Template::TotalCostForCustomer,
        Template::RepairsByCompany,
        Template::TopKCompaniesByRepairCount,
        Template::RepairsPerYear,
        Template::CustomerExists,
        Template::RoomExists,
        Template::CompanyExists,
        Template::RepairExists,
    ];

    /// Stable name used in logs and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Template::InsertCustomer => "insert-customer",
            Template::InsertRoom => "insert-room",
            Template::InsertMaintenanceCompany => "insert-maintenance-company",
            Template::InsertRepair => "insert-repair",
            Template::InsertBooking => "insert-booking",
            Template::AssignStaff => "assign-staff",
            Template::RequestRepair => "request-repair",
            Template::AvailableRooms => "available-rooms",
            Template::BookedRooms => "booked-rooms",
            Template::WeekAvailability => "week-availability",
            Template::TopKPriceByDateRange => "top-k-price-by-date-range",
            Template::TopKPriceForCustomer => "top-k-price-for-customer",
            Template::TotalCostForCustomer => "total-cost-for-customer",
            Template::RepairsByCompany => "repairs-by-company",
            Template::TopKCompaniesByRepairCount => "top-k-companies-by-repair-count",
            Template::RepairsPerYear => "repairs-per-year",
            Template::CustomerExists => "customer-exists",
            Template::RoomExists => "room-exists",
            Template::CompanyExists => "company-exists",
            Template::RepairExists => "repair-exists",
        }
    }

    pub fn kind(&self) -> StatementKind {
        match self {
            Template::InsertCustomer
            | Template::InsertRoom
            | Template::InsertMaintenanceCompany
            | Template::InsertRepair
            | Template::InsertBooking
            | Template::AssignStaff
            | Template::RequestRepair => StatementKind::Mutation,
            Template::CustomerExists
            | Template::RoomExists
            | Template::CompanyExists
            | Template::RepairExists => StatementKind::Lookup,
            _ => StatementKind::Report,
        }
    }

    pub fn sql(&self) -> &'static str {
        match self {
            Template::InsertCustomer => mutations::INSERT_CUSTOMER,
            Template::InsertRoom => mutations::INSERT_ROOM,
            Template::InsertMaintenanceCompany => mutations::INSERT_MAINTENANCE_COMPANY,
            Template::InsertRepair => mutations::INSERT_REPAIR,
            Template::InsertBooking => mutations::INSERT_BOOKING,
            Template::AssignStaff => mutations::ASSIGN_STAFF,
            Template::RequestRepair => mutations::REQUEST_REPAIR,
            Template::AvailableRooms => reports::AVAILABLE_ROOMS,
            Template::BookedRooms => reports::BOOKED_ROOMS,
            Template::WeekAvailability => reports::WEEK_AVAILABILITY,
            Template::TopKPriceByDateRange => reports::TOP_K_PRICE_BY_DATE_RANGE,
            Template::TopKPriceForCustomer => reports::TOP_K_PRICE_FOR_CUSTOMER,
            Template::TotalCostForCustomer => reports::TOTAL_COST_FOR_CUSTOMER,
            Template::RepairsByCompany => reports::REPAIRS_BY_COMPANY,
            Template::TopKCompaniesByRepairCount => reports::TOP_K_COMPANIES_BY_REPAIR_COUNT,
            Template::RepairsPerYear => reports::REPAIRS_PER_YEAR,
            Template::CustomerExists => lookups::CUSTOMER_EXISTS,
            Template::RoomExists => lookups::ROOM_EXISTS,
            Template::CompanyExists => lookups::COMPANY_EXISTS,
            Template::RepairExists => lookups::REPAIR_EXISTS,
        }
    }
}

/// A template together with its bound values, ready for the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    template: Template,
    params: Vec<Value>,
}

impl Statement {
    pub(crate) fn new(template: Template, params: Vec<Value>) -> Self {
        Statement { template, params }
    }

    pub fn template(&self) -> Template {
        self.template
    }

    pub fn kind(&self) -> StatementKind {
        self.template.kind()
    }

    pub fn sql(&self) -> &'static str {
        self.template.sql()
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

/// Dates are stored as ISO text so they sort and compare correctly in the engine.
pub(crate) fn date_value(date: NaiveDate) -> Value {
    Value::Text(date.format("%Y-%m-%d").to_string())
}

pub(crate) fn text_value(text: &str) -> Value {
    Value::Text(text.to_string())
}

/// Highest `?N` placeholder index in a template.
#[cfg(test)]
pub(crate) fn placeholder_count(sql: &str) -> usize {
    let bytes = sql.as_bytes();
    let mut highest = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'?' {
            let digits: String = sql[i + 1..].chars().take_while(|c| c.is_ascii_digit()).collect();
            if let Ok(n) = digits.parse::<usize>() {
                highest = highest.max(n);
            }
            i += digits.len();
        }
        i += 1;
    }
    highest
}
