//! Command Dispatcher
//!
//! The main menu: a numbered list read as one integer per prompt. Each
//! recognized number runs exactly one workflow, after which the menu is shown
//! again. Choosing `17` (or closing the input stream) ends the loop.

use crate::core::{HotelError, Result};
use crate::prompt::Selection;
use crate::session::Session;
use crate::workflows;
use std::io::{BufRead, Write};
use tracing::{info, warn};

/// Represents one entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddCustomer,
    AddRoom,
    AddMaintenanceCompany,
    AddRepair,
    BookRoom,
    AssignStaff,
    RequestRepair,
    AvailableRooms,
    BookedRooms,
    WeekAvailability,
    TopKPriceByDateRange,
    TopKPriceForCustomer,
    TotalCostForCustomer,
    RepairsByCompany,
    TopKCompanies,
    RepairsPerYear,
    Exit,
}

impl MenuChoice {
    /// Menu order; an entry's number is its position plus one.
    pub const ALL: [MenuChoice; 17] = [
        MenuChoice::AddCustomer,
        MenuChoice::AddRoom,
        MenuChoice::AddMaintenanceCompany,
        MenuChoice::AddRepair,
        MenuChoice::BookRoom,
        MenuChoice::AssignStaff,
        MenuChoice::RequestRepair,
        MenuChoice::AvailableRooms,
        MenuChoice::BookedRooms,
        MenuChoice::WeekAvailability,
        MenuChoice::TopKPriceByDateRange,
        MenuChoice::TopKPriceForCustomer,
        MenuChoice::TotalCostForCustomer,
        MenuChoice::RepairsByCompany,
        MenuChoice::TopKCompanies,
        MenuChoice::RepairsPerYear,
        MenuChoice::Exit,
    ];

    pub fn from_number(number: i64) -> Option<Self> {
        usize::try_from(number)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| Self::ALL.get(index).copied())
    }

    pub fn number(self) -> usize {
        Self::ALL
            .iter()
            .position(|choice| *choice == self)
            .map(|index| index + 1)
            .unwrap_or(0)
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::AddCustomer => "Add new customer",
            MenuChoice::AddRoom => "Add new room",
            MenuChoice::AddMaintenanceCompany => "Add new maintenance company",
            MenuChoice::AddRepair => "Add new repair",
            MenuChoice::BookRoom => "Add new Booking",
            MenuChoice::AssignStaff => "Assign house cleaning staff to a room",
            MenuChoice::RequestRepair => "Raise a repair request",
            MenuChoice::AvailableRooms => "Get number of available rooms",
            MenuChoice::BookedRooms => "Get number of booked rooms",
            MenuChoice::WeekAvailability => "Get hotel bookings for a week",
            MenuChoice::TopKPriceByDateRange => "Get top k rooms with highest price for a date range",
            MenuChoice::TopKPriceForCustomer => "Get top k highest booking price for a customer",
            MenuChoice::TotalCostForCustomer => "Get customer total cost occurred for a give date range",
            MenuChoice::RepairsByCompany => "List the repairs made by maintenance company",
            MenuChoice::TopKCompanies => "Get top k maintenance companies based on repair count",
            MenuChoice::RepairsPerYear => "Get number of repairs occurred per year for a given hotel room",
            MenuChoice::Exit => "< EXIT",
        }
    }
}

/// The menu exactly as printed before every choice.
pub fn render_menu() -> String {
    let mut menu = String::from("MAIN MENU\n---------\n");
    for choice in MenuChoice::ALL {
        menu.push_str(&format!("{}. {}\n", choice.number(), choice.label()));
    }
    menu
}

/// Runs the workflow behind `choice`. `Exit` is a no-op.
pub fn dispatch<R: BufRead, W: Write>(session: &mut Session<R, W>, choice: MenuChoice) -> Result<()> {
    match choice {
        MenuChoice::AddCustomer => workflows::add_customer(session),
        MenuChoice::AddRoom => workflows::add_room(session),
        MenuChoice::AddMaintenanceCompany => workflows::add_maintenance_company(session),
        MenuChoice::AddRepair => workflows::add_repair(session),
        MenuChoice::BookRoom => workflows::book_room(session),
        MenuChoice::AssignStaff => workflows::assign_staff(session),
        MenuChoice::RequestRepair => workflows::request_repair(session),
        MenuChoice::AvailableRooms => workflows::available_rooms(session),
        MenuChoice::BookedRooms => workflows::booked_rooms(session),
        MenuChoice::WeekAvailability => workflows::week_availability(session),
        MenuChoice::TopKPriceByDateRange => workflows::top_k_price_by_date_range(session),
        MenuChoice::TopKPriceForCustomer => workflows::top_k_price_for_customer(session),
        MenuChoice::TotalCostForCustomer => workflows::total_cost_for_customer(session),
        MenuChoice::RepairsByCompany => workflows::repairs_by_company(session),
        MenuChoice::TopKCompanies => workflows::top_k_companies_by_repair_count(session),
        MenuChoice::RepairsPerYear => workflows::repairs_per_year(session),
        MenuChoice::Exit => Ok(()),
    }
}

/// Shows the menu and dispatches choices until the user exits or the input ends.
///
/// Statement failures abandon the current workflow and are reported on the
/// console; any other error ends the loop and is returned.
pub fn run<R: BufRead, W: Write>(session: &mut Session<R, W>) -> Result<()> {
    let menu = render_menu();
    loop {
        write!(session.console().output(), "{}", menu)?;

        let number = match session.prompt("Please make your choice:", &Selection) {
            Ok(number) => number,
            Err(HotelError::InputClosed) => break,
            Err(e) => return Err(e),
        };

        let choice = match MenuChoice::from_number(number) {
            Some(MenuChoice::Exit) => {
                info!("exit chosen");
                return Ok(());
            }
            Some(choice) => choice,
            None => {
                session.say("Unrecognized choice!")?;
                continue;
            }
        };

        info!(choice = choice.number(), label = choice.label(), "dispatching");
        match dispatch(session, choice) {
            Ok(()) => {}
            Err(e) if e.is_recoverable() => {
                warn!(choice = choice.number(), "workflow abandoned: {}", e);
                session.say(&format!("Error: {}", e))?;
            }
            Err(HotelError::InputClosed) => break,
            Err(e) => return Err(e),
        }
    }

    info!("input closed, leaving menu");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{scripted_session, session_output, DatabaseFixture};
    use insta::assert_snapshot;

    #[test]
    fn test_choice_numbers() {
        assert_eq!(MenuChoice::from_number(1), Some(MenuChoice::AddCustomer));
        assert_eq!(MenuChoice::from_number(17), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::from_number(0), None);
        assert_eq!(MenuChoice::from_number(18), None);
        assert_eq!(MenuChoice::from_number(-3), None);
        for (index, choice) in MenuChoice::ALL.iter().enumerate() {
            assert_eq!(choice.number(), index + 1);
        }
    }

    #[test]
    fn test_menu_lists_every_choice() {
        let menu = render_menu();
        assert_eq!(menu.lines().count(), 19);
        assert_snapshot!(menu, @r###"
MAIN MENU
---------
1. Add new customer
2. Add new room
3. Add new maintenance company
4. Add new repair
5. Add new Booking
6. Assign house cleaning staff to a room
7. Raise a repair request
8. Get number of available rooms
9. Get number of booked rooms
10. Get hotel bookings for a week
11. Get top k rooms with highest price for a date range
12. Get top k highest booking price for a customer
13. Get customer total cost occurred for a give date range
14. List the repairs made by maintenance company
15. Get top k maintenance companies based on repair count
16. Get number of repairs occurred per year for a given hotel room
17. < EXIT
"###);
    }

    #[test]
    fn test_exit_choice_ends_loop() {
        let fixture = DatabaseFixture::new().unwrap();
        let mut session = scripted_session(fixture.connection, "17\nthis line is never read\n");
        run(&mut session).unwrap();
        let output = session_output(session);
        assert_eq!(output.matches("MAIN MENU").count(), 1);
    }

    #[test]
    fn test_unrecognized_and_invalid_choices_redisplay_menu() {
        let fixture = DatabaseFixture::new().unwrap();
        let mut session = scripted_session(fixture.connection, "42\nabc\n17\n");
        run(&mut session).unwrap();

        let output = session_output(session);
        assert!(output.contains("Unrecognized choice!"));
        assert!(output.contains("Your input is invalid!"));
        assert_eq!(output.matches("MAIN MENU").count(), 2);
    }

    #[test]
    fn test_failed_workflow_returns_to_menu() {
        let fixture = DatabaseFixture::with_sample_data().unwrap();
        // duplicate room, then a report, then exit
        let mut session = scripted_session(fixture.connection, "2\n1\n101\nSuite\n9\n1\n17\n");
        run(&mut session).unwrap();

        let output = session_output(session);
        assert!(output.contains("Error: Database error: UNIQUE constraint failed"));
        assert!(output.contains("bookedRooms\n2\n(1 row)\n"));
        assert_eq!(output.matches("MAIN MENU").count(), 3);
    }

    #[test]
    fn test_closed_input_mid_workflow_ends_loop() {
        let fixture = DatabaseFixture::with_sample_data().unwrap();
        let mut session = scripted_session(fixture.connection, "1\nAda\n");
        run(&mut session).unwrap();
        assert!(session_output(session).contains("Input the customer's last name:"));
    }

    #[test]
    fn test_available_rooms_round_trip() {
        let fixture = DatabaseFixture::new().unwrap();
        let input = "\
2\n1\n101\nSuite\n\
8\n1\n\
1\nAda\nLovelace\n1 Main St\n\n12/10/85\nFemale\n\
5\n1\n1\n101\n01/05/20\n2\n250\n\
8\n1\n\
17\n";
        let mut session = scripted_session(fixture.connection, input);
        run(&mut session).unwrap();

        let output = session_output(session);
        let reports: Vec<&str> = output.match_indices("roomNo\n").map(|(i, _)| &output[i..]).collect();
        assert_eq!(reports.len(), 1, "room 101 is listed only before the booking");
        assert!(reports[0].starts_with("roomNo\n101\n(1 row)\n"));
        assert!(output.contains("(0 rows)"));
    }
}
