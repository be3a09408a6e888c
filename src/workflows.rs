//! One workflow per menu entry: collect the fields, check references, build
//! the statement, run it and show the outcome.

use crate::core::{HotelError, Result};
use crate::prompt::{Boolean, Choice, Date, Integer, Phone, PriceField, Text};
use crate::session::Session;
use crate::statements::mutations::{
    NewAssignment, NewBooking, NewCustomer, NewMaintenanceCompany, NewRepair, NewRepairRequest,
    NewRoom,
};
use crate::statements::reports::{CustomerName, DateRange};
use crate::statements::{lookups, mutations, reports};
use chrono::Local;
use std::io::{BufRead, Write};

const NAME_MAX: usize = 30;
const TYPE_MAX: usize = 10;
const GENDERS: &[&str] = &["Male", "Female", "Other"];

fn prompt_hotel<R: BufRead, W: Write>(session: &mut Session<R, W>) -> Result<i64> {
    session.prompt("Input the hotel ID:", &Integer::positive())
}

fn prompt_room<R: BufRead, W: Write>(session: &mut Session<R, W>) -> Result<(i64, i64)> {
    let hotel_id = prompt_hotel(session)?;
    let room_no = session.prompt("Input the room number:", &Integer::positive())?;
    Ok((hotel_id, room_no))
}

/// Prompts for a room and fails unless it exists.
fn prompt_existing_room<R: BufRead, W: Write>(session: &mut Session<R, W>) -> Result<(i64, i64)> {
    let (hotel_id, room_no) = prompt_room(session)?;
    session.require(
        &lookups::room_exists(hotel_id, room_no),
        "Room",
        format!("hotelID {}, roomNo {}", hotel_id, room_no),
    )?;
    Ok((hotel_id, room_no))
}

fn prompt_date_range<R: BufRead, W: Write>(session: &mut Session<R, W>) -> Result<DateRange> {
    let start = session.prompt("Input the start date (MM/DD/YY):", &Date::any())?;
    let end = session.prompt("Input the end date (MM/DD/YY):", &Date::not_before(start))?;
    DateRange::new(start, end)
        .ok_or_else(|| HotelError::Query("end date precedes start date".to_string()))
}

fn prompt_customer_name<R: BufRead, W: Write>(session: &mut Session<R, W>) -> Result<CustomerName> {
    Ok(CustomerName {
        first: session.prompt("Input the customer's first name:", &Text::required(NAME_MAX))?,
        last: session.prompt("Input the customer's last name:", &Text::required(NAME_MAX))?,
    })
}

fn prompt_k<R: BufRead, W: Write>(session: &mut Session<R, W>) -> Result<i64> {
    session.prompt("Input the value of K:", &Integer::positive())
}

pub fn add_customer<R: BufRead, W: Write>(session: &mut Session<R, W>) -> Result<()> {
    let customer = NewCustomer {
        first_name: session.prompt("Input the customer's first name:", &Text::required(NAME_MAX))?,
        last_name: session.prompt("Input the customer's last name:", &Text::required(NAME_MAX))?,
        address: session.prompt("Input the customer's address:", &Text::unbounded())?,
        phone: session.prompt(
            "Input the customer's phone number (digits only, blank to skip):",
            &Phone,
        )?,
        date_of_birth: session.prompt(
            "Input the customer's date of birth (MM/DD/YY):",
            &Date::not_after(Local::now().date_naive()),
        )?,
        gender: session.prompt(
            "Input the customer's gender (Male, Female, Other):",
            &Choice::of(GENDERS),
        )?,
    };

    let outcome = session.mutate(&mutations::insert_customer(&customer))?;
    session.say(&format!("Customer added with ID {}.", outcome.last_insert_id))
}

pub fn add_room<R: BufRead, W: Write>(session: &mut Session<R, W>) -> Result<()> {
    let (hotel_id, room_no) = prompt_room(session)?;
    let room = NewRoom {
        hotel_id,
        room_no,
        room_type: session.prompt("Input the room type:", &Text::required(TYPE_MAX))?,
    };

    session.mutate(&mutations::insert_room(&room))?;
    session.say(&format!("Room {} added to hotel {}.", room.room_no, room.hotel_id))
}

pub fn add_maintenance_company<R: BufRead, W: Write>(session: &mut Session<R, W>) -> Result<()> {
    let company = NewMaintenanceCompany {
        name: session.prompt("Input the company name:", &Text::required(NAME_MAX))?,
        address: session.prompt("Input the company address:", &Text::unbounded())?,
        certified: session.prompt("Is the company certified? (yes/no):", &Boolean)?,
    };

    let outcome = session.mutate(&mutations::insert_maintenance_company(&company))?;
    session.say(&format!(
        "Maintenance company added with ID {}.",
        outcome.last_insert_id
    ))
}

pub fn add_repair<R: BufRead, W: Write>(session: &mut Session<R, W>) -> Result<()> {
    let (hotel_id, room_no) = prompt_existing_room(session)?;
    let company_id = session.prompt("Input the maintenance company ID:", &Integer::positive())?;
    session.require(
        &lookups::company_exists(company_id),
        "MaintenanceCompany",
        format!("cmpID {}", company_id),
    )?;

    let repair = NewRepair {
        hotel_id,
        room_no,
        company_id,
        repair_date: session.prompt("Input the repair date (MM/DD/YY):", &Date::any())?,
        description: session.prompt("Input the repair description:", &Text::unbounded())?,
        repair_type: session.prompt("Input the repair type:", &Text::required(TYPE_MAX))?,
    };

    let outcome = session.mutate(&mutations::insert_repair(&repair))?;
    session.say(&format!("Repair added with ID {}.", outcome.last_insert_id))
}

pub fn book_room<R: BufRead, W: Write>(session: &mut Session<R, W>) -> Result<()> {
    let customer_id = session.prompt("Input the customer ID:", &Integer::positive())?;
    session.require(
        &lookups::customer_exists(customer_id),
        "Customer",
        format!("customerID {}", customer_id),
    )?;
    let (hotel_id, room_no) = prompt_existing_room(session)?;

    let booking = NewBooking {
        customer_id,
        hotel_id,
        room_no,
        booking_date: session.prompt("Input the booking date (MM/DD/YY):", &Date::any())?,
        occupants: session.prompt("Input the number of people:", &Integer::positive())?,
        price: session.prompt("Input the price: $", &PriceField)?,
    };

    let outcome = session.mutate(&mutations::insert_booking(&booking))?;
    session.say(&format!(
        "Booking {} created at ${}.",
        outcome.last_insert_id, booking.price
    ))
}

pub fn assign_staff<R: BufRead, W: Write>(session: &mut Session<R, W>) -> Result<()> {
    let staff_id = session.prompt("Input the staff ID:", &Integer::positive())?;
    let (hotel_id, room_no) = prompt_existing_room(session)?;
    let assignment = NewAssignment {
        staff_id,
        hotel_id,
        room_no,
    };

    let outcome = session.mutate(&mutations::insert_assignment(&assignment))?;
    session.say(&format!(
        "Staff {} assigned to room {} (assignment ID {}).",
        staff_id, room_no, outcome.last_insert_id
    ))
}

pub fn request_repair<R: BufRead, W: Write>(session: &mut Session<R, W>) -> Result<()> {
    let manager_id = session.prompt("Input the manager ID:", &Integer::positive())?;
    let repair_id = session.prompt("Input the repair ID:", &Integer::positive())?;
    session.require(
        &lookups::repair_exists(repair_id),
        "Repair",
        format!("rID {}", repair_id),
    )?;

    let request = NewRepairRequest {
        manager_id,
        repair_id,
        request_date: session.prompt("Input the request date (MM/DD/YY):", &Date::any())?,
        description: session.prompt("Input the request description:", &Text::unbounded())?,
    };

    let outcome = session.mutate(&mutations::insert_repair_request(&request))?;
    session.say(&format!("Repair request added with ID {}.", outcome.last_insert_id))
}

pub fn available_rooms<R: BufRead, W: Write>(session: &mut Session<R, W>) -> Result<()> {
    let hotel_id = prompt_hotel(session)?;
    session.report(&reports::available_rooms(hotel_id))?;
    Ok(())
}

pub fn booked_rooms<R: BufRead, W: Write>(session: &mut Session<R, W>) -> Result<()> {
    let hotel_id = prompt_hotel(session)?;
    session.report(&reports::booked_rooms(hotel_id))?;
    Ok(())
}

pub fn week_availability<R: BufRead, W: Write>(session: &mut Session<R, W>) -> Result<()> {
    let hotel_id = prompt_hotel(session)?;
    let start = session.prompt("Input the first day of the week (MM/DD/YY):", &Date::any())?;
    session.report(&reports::week_availability(hotel_id, start))?;
    Ok(())
}

pub fn top_k_price_by_date_range<R: BufRead, W: Write>(session: &mut Session<R, W>) -> Result<()> {
    let range = prompt_date_range(session)?;
    let k = prompt_k(session)?;
    session.report(&reports::top_k_price_by_date_range(range, k))?;
    Ok(())
}

pub fn top_k_price_for_customer<R: BufRead, W: Write>(session: &mut Session<R, W>) -> Result<()> {
    let customer = prompt_customer_name(session)?;
    let k = prompt_k(session)?;
    session.report(&reports::top_k_price_for_customer(&customer, k))?;
    Ok(())
}

pub fn total_cost_for_customer<R: BufRead, W: Write>(session: &mut Session<R, W>) -> Result<()> {
    let hotel_id = prompt_hotel(session)?;
    let customer = prompt_customer_name(session)?;
    let range = prompt_date_range(session)?;
    session.report(&reports::total_cost_for_customer(hotel_id, &customer, range))?;
    Ok(())
}

pub fn repairs_by_company<R: BufRead, W: Write>(session: &mut Session<R, W>) -> Result<()> {
    let name = session.prompt("Input the maintenance company name:", &Text::required(NAME_MAX))?;
    session.report(&reports::repairs_by_company(&name))?;
    Ok(())
}

pub fn top_k_companies_by_repair_count<R: BufRead, W: Write>(session: &mut Session<R, W>) -> Result<()> {
    let k = prompt_k(session)?;
    session.report(&reports::top_k_companies_by_repair_count(k))?;
    Ok(())
}

pub fn repairs_per_year<R: BufRead, W: Write>(session: &mut Session<R, W>) -> Result<()> {
    let (hotel_id, room_no) = prompt_room(session)?;
    session.report(&reports::repairs_per_year(hotel_id, room_no))?;
    Ok(())
}
