mod db;
mod error;
mod models;
mod operations;

use clap::Parser;
use db::store::Store;
use operations::import::import_csv;
use operations::report::MonthlyReport;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "fintrack",
    about = "Personal finance tracker: import CSV transactions and report by month"
)]
struct Args {
    /// Path to the SQLite database file
    #[arg(long, default_value = "finance_tracker.db")]
    db: PathBuf,
}

pub enum UserCommands {
    Import,
    Report,
    Exit,
}

fn main() {
    let args = Args::parse();
    println!("--- Personal Finance Tracker ---");

    let store = Store::new(args.db);
    if let Err(e) = store.initialize() {
        eprintln!("Failed to initialize database: {}", e);
        std::process::exit(1);
    }

    loop {
        println!("\nPlease enter a command (import, report, exit):");

        let input = match read_user_input() {
            Ok(cmd) => cmd,
            Err(e) => {
                println!("Error reading input: {}", e);
                continue;
            }
        };
        let Some(command) = check_for_command(&input) else {
            println!("Invalid choice.");
            continue;
        };

        match command {
            UserCommands::Import => {
                println!("Enter CSV file path (like transactions.csv):");
                let path = match read_user_input() {
                    Ok(path) => path,
                    Err(e) => {
                        println!("Error reading input: {}", e);
                        continue;
                    }
                };
                match import_csv(&store, &path) {
                    Ok(summary) => {
                        println!("Imported {} transactions.", summary.imported);
                        for row_error in &summary.row_errors {
                            println!("Skipped line {}: {}", row_error.line, row_error.message);
                        }
                    }
                    Err(e) => println!("Error importing CSV: {}", e),
                }
            }
            UserCommands::Report => {
                let month = match prompt_number::<u32>("Enter month (e.g. 05):") {
                    Ok(month) => month,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                let year = match prompt_number::<i32>("Enter year (e.g. 2024):") {
                    Ok(year) => year,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                match MonthlyReport::generate(&store, month, year) {
                    Ok(Some(report)) => println!("\n{}", report.format_terminal()),
                    Ok(None) => println!("No transactions found."),
                    Err(e) => println!("Error generating report: {}", e),
                }
            }
            UserCommands::Exit => {
                println!("Exiting...");
                break;
            }
        }
    }
}

fn read_user_input() -> Result<String, String> {
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|_| "Failed to read line".to_string())?;
    Ok(input.trim().to_string())
}

fn prompt_number<T: std::str::FromStr>(prompt: &str) -> Result<T, String> {
    println!("{}", prompt);
    let input = read_user_input()?;
    input
        .parse::<T>()
        .map_err(|_| format!("Invalid number: '{}'", input))
}

fn check_for_command(input: &str) -> Option<UserCommands> {
    match input {
        "import" => Some(UserCommands::Import),
        "report" => Some(UserCommands::Report),
        "exit" => Some(UserCommands::Exit),
        _ => None,
    }
}
