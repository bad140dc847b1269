mod db;
mod display;
mod error;
mod ledger;
mod models;
mod operations;

use clap::Parser;
use std::io;
use std::path::PathBuf;

use crate::ledger::Ledger;
use crate::operations::view::{self, TypeFilter};

#[derive(Parser)]
#[command(name = "extrack", about = "Personal income and expense ledger")]
struct Cli {
    /// Database file holding the ledger
    #[arg(long, default_value = "expense_tracker.db")]
    db: PathBuf,
}

pub enum UserCommands {
    Add,
    Remove,
    Clear,
    List,
    Search,
    Stats,
    Browse,
    Export,
    Import,
    Help,
    Exit,
}

fn main() {
    let cli = Cli::parse();
    let conn = db::connection::establish_connection(&cli.db)
        .expect("Failed to open the ledger database");

    let mut ledger = match db::repository::load(&conn) {
        Ok(transactions) => Ledger::from_transactions(transactions),
        Err(e) => {
            println!("Error loading stored ledger: {}", e);
            Ledger::new()
        }
    };

    println!("Welcome to the expense tracker!");
    loop {
        println!(
            "Please enter a command (add, remove, clear, list, search, stats, browse, export, import, help, exit):"
        );

        let input = match read_user_input() {
            Ok(cmd) => cmd,
            Err(e) => {
                println!("Error reading input: {}", e);
                continue;
            }
        };
        let parts: Vec<&str> = input.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        let command = match check_for_command(parts[0]) {
            Some(command) => command,
            None => {
                println!("Unknown command '{}'. Type 'help' for the list.", parts[0]);
                continue;
            }
        };
        match command {
            UserCommands::Add => {
                println!("Enter the entry as: description, amount, type(income/expense), category");
                let line = match read_user_input() {
                    Ok(details) => details,
                    Err(e) => {
                        println!("Error reading input: {}", e);
                        continue;
                    }
                };
                match operations::add::add_entry(&mut ledger, &conn, &line) {
                    Ok(added) => {
                        println!(
                            "Added {} entry {}: {} ({})",
                            added.kind,
                            added.id,
                            added.description,
                            display::signed_currency(&added)
                        );
                    }
                    Err(e) => {
                        println!("Error adding entry: {}", e);
                        println!("Please try again.");
                    }
                }
            }
            UserCommands::Remove => {
                println!("Provide the entry id to remove:");
                let line = match read_user_input() {
                    Ok(details) => details,
                    Err(e) => {
                        println!("Error reading input: {}", e);
                        continue;
                    }
                };
                let id: u64 = match line.parse() {
                    Ok(id) => id,
                    Err(_) => {
                        println!("Invalid id '{}': expected a number.", line);
                        continue;
                    }
                };
                if !confirm("Are you sure you want to delete this entry?") {
                    println!("Nothing removed.");
                    continue;
                }
                match operations::remove::remove_entry(&mut ledger, &conn, id) {
                    Ok(true) => println!("Entry removed."),
                    Ok(false) => println!("No entry with id {} (nothing removed).", id),
                    Err(e) => println!("Error: {}", e),
                }
            }
            UserCommands::Clear => {
                if !confirm("Delete all entries? This cannot be undone!") {
                    println!("Nothing removed.");
                    continue;
                }
                match operations::remove::clear_entries(&mut ledger, &conn) {
                    Ok(dropped) => println!("Removed {} entries.", dropped),
                    Err(e) => println!("{}", e),
                }
            }
            UserCommands::List => {
                let type_filter = match parts.get(1) {
                    Some(arg) => match TypeFilter::parse(arg) {
                        Some(type_filter) => type_filter,
                        None => {
                            println!("Unknown filter '{}': use all, income or expense.", arg);
                            continue;
                        }
                    },
                    None => TypeFilter::All,
                };
                let visible = view::filter(ledger.transactions(), type_filter, "");
                display::print_table(&visible);
                println!();
                display::print_statistics(&operations::summary::summarize(ledger.transactions()));
            }
            UserCommands::Search => {
                println!("Provide the text to search for:");
                let term = match read_user_input() {
                    Ok(term) => term,
                    Err(e) => {
                        println!("Error reading input: {}", e);
                        continue;
                    }
                };
                let visible = view::filter(ledger.transactions(), TypeFilter::All, &term);
                display::print_table(&visible);
            }
            UserCommands::Stats => {
                display::print_statistics(&operations::summary::summarize(ledger.transactions()));
            }
            UserCommands::Browse => {
                if let Err(e) = operations::browse::run_browse(&mut ledger, &conn) {
                    println!("Error in browse view: {}", e);
                }
            }
            UserCommands::Export => {
                println!("Provide the file path to export to (csv):");
                let path = match read_user_input() {
                    Ok(path) => path,
                    Err(e) => {
                        println!("Error reading input: {}", e);
                        continue;
                    }
                };
                match operations::export::export_csv(ledger.transactions(), &path) {
                    Ok(count) => println!("Exported {} entries to {}.", count, path),
                    Err(e) => println!("Error exporting entries: {}", e),
                }
            }
            UserCommands::Import => {
                println!("Provide the file path to import from (csv):");
                let path = match read_user_input() {
                    Ok(path) => path,
                    Err(e) => {
                        println!("Error reading input: {}", e);
                        continue;
                    }
                };
                match operations::import::import_csv(&mut ledger, &conn, &path) {
                    Ok(count) => println!("Successfully imported {} entries.", count),
                    Err(e) => println!("Error importing entries: {}", e),
                }
            }
            UserCommands::Help => {
                println!("add     - record a new income or expense entry");
                println!("remove  - delete one entry by id");
                println!("clear   - delete all entries");
                println!("list    - print entries (optional: list income / list expense)");
                println!("search  - print entries whose description matches a term");
                println!("stats   - print balance, totals and counts");
                println!("browse  - interactive view with filter and search");
                println!("export  - write the ledger to a csv file");
                println!("import  - read entries from a csv file");
                println!("exit    - quit");
            }
            UserCommands::Exit => {
                println!("Exiting the application.");
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

fn confirm(question: &str) -> bool {
    println!("{} (y/n)", question);
    matches!(read_user_input().as_deref(), Ok("y") | Ok("Y") | Ok("yes"))
}

fn check_for_command(input: &str) -> Option<UserCommands> {
    match input {
        "add" => Some(UserCommands::Add),
        "remove" => Some(UserCommands::Remove),
        "clear" => Some(UserCommands::Clear),
        "list" => Some(UserCommands::List),
        "search" => Some(UserCommands::Search),
        "stats" => Some(UserCommands::Stats),
        "browse" => Some(UserCommands::Browse),
        "export" => Some(UserCommands::Export),
        "import" => Some(UserCommands::Import),
        "help" => Some(UserCommands::Help),
        "exit" => Some(UserCommands::Exit),
        _ => None,
    }
}
