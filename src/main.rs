use hotelql::config::{self, Config};
use hotelql::core::db::{self, ConnectionTarget};
use hotelql::core::Result;
use hotelql::menu;
use hotelql::prompt::Console;
use hotelql::session::Session;
use std::io;
use std::process::ExitCode;
use tracing::{error, info};

const USAGE: &str = "Usage: hotelql <dbname> <port> <user>";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    }

    let config = match config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let level = match config.logging.level() {
        Ok(level) => level,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    // Console output owns stdout; logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .init();

    info!("Starting hotelql...");

    println!("\n\n*******************************************************");
    println!("              User Interface                         ");
    println!("*******************************************************\n");

    match run(&config, &args[1], &args[2], &args[3]) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, dbname: &str, port: &str, user: &str) -> Result<()> {
    let target = ConnectionTarget::from_args(dbname, port, user, &config.connection)?;

    println!("Connecting to database...");
    println!("Connection URL: {}\n", target.url());
    let connection = db::open(&target, &config.connection.data_dir)?;
    println!("Done");

    let stdin = io::stdin();
    let console = Console::new(stdin.lock(), io::stdout());
    let mut session = Session::new(connection, console).with_row_count(config.display.show_row_count);

    menu::run(&mut session)?;
    session.close()?;
    Ok(())
}
