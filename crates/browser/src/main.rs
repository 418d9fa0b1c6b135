use std::process::ExitCode;

use micro_browser::app;
use micro_browser::args::{Command, HELP, USAGE, parse_args};

fn main() -> ExitCode {
    match parse_args(std::env::args().skip(1)) {
        Ok(Command::Usage) => {
            println!("{HELP}");
            ExitCode::SUCCESS
        }
        Ok(Command::Fetch(fetch_args)) => match app::run(&fetch_args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("{USAGE}");
            ExitCode::from(2)
        }
    }
}
