use clap::Subcommand;
use inkstreak_core::streak::parse_date_key;
use inkstreak_core::{Config, StatusUpdate};

use super::{open_book, print_json};

#[derive(Subcommand)]
pub enum DayAction {
    /// Update one or both flags for a day
    Set {
        /// Date (YYYY-MM-DD)
        date: String,
        #[arg(long)]
        written: Option<bool>,
        #[arg(long)]
        published: Option<bool>,
    },
    /// Record a day, replacing any existing status
    Create {
        /// Date (YYYY-MM-DD)
        date: String,
        #[arg(long)]
        written: bool,
        #[arg(long)]
        published: bool,
    },
    /// Show a day's status
    Show {
        /// Date (YYYY-MM-DD)
        date: String,
    },
    /// Delete a day's status
    Delete {
        /// Date (YYYY-MM-DD)
        date: String,
    },
    /// List all recorded days
    List,
    /// Delete every recorded day
    Clear,
}

pub fn run(action: DayAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut book = open_book(config)?;

    match action {
        DayAction::Set {
            date,
            written,
            published,
        } => {
            if written.is_none() && published.is_none() {
                return Err("nothing to update: pass --written and/or --published".into());
            }
            let date = parse_date_key(&date, "date")?;
            let status = book.set_status(date, StatusUpdate { written, published })?;
            print_json(&status, config)?;
        }
        DayAction::Create {
            date,
            written,
            published,
        } => {
            let date = parse_date_key(&date, "date")?;
            let status = book.create_status(date, written, published)?;
            print_json(&status, config)?;
        }
        DayAction::Show { date } => {
            let key = parse_date_key(&date, "date")?;
            match book.status(key) {
                Some(status) => print_json(status, config)?,
                None => return Err(format!("no status recorded for {}", date.trim()).into()),
            }
        }
        DayAction::Delete { date } => {
            let key = parse_date_key(&date, "date")?;
            match book.delete_status(key)? {
                Some(_) => println!("deleted {}", date.trim()),
                None => println!("no status recorded for {}", date.trim()),
            }
        }
        DayAction::List => {
            let statuses: Vec<_> = book.statuses().values().collect();
            print_json(&statuses, config)?;
        }
        DayAction::Clear => {
            book.clear_all()?;
            println!("all day statuses cleared");
        }
    }
    Ok(())
}
