use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use appointment_cell::TimeSlot;

#[derive(Parser, Debug)]
#[command(name = "clinic-booking", about = "Book clinic appointments from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and remember the account email for bookings
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create a new account
    Register(RegisterArgs),
    /// Submit an appointment request
    Book(BookArgs),
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub full_name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub confirm_password: String,
}

#[derive(Args, Debug)]
pub struct BookArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub contact: String,
    /// Appointment date, e.g. 6/1/2025 or 2025-06-01
    #[arg(long, value_parser = parse_date)]
    pub date: NaiveDate,
    /// One of the hourly slots, e.g. "10:00 AM"
    #[arg(long, value_parser = parse_slot)]
    pub slot: TimeSlot,
    #[arg(long)]
    pub reason: String,
    /// Satisfaction rating from 1 to 5
    #[arg(long)]
    pub rating: f64,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%m/%d/%Y")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .map_err(|_| format!("Invalid date '{}'. Use M/D/YYYY or YYYY-MM-DD", raw))
}

fn parse_slot(raw: &str) -> Result<TimeSlot, String> {
    raw.parse::<TimeSlot>().map_err(|_| {
        let labels: Vec<&str> = TimeSlot::ALL.iter().map(|s| s.label()).collect();
        format!("Invalid time slot '{}'. Supported values: {}", raw, labels.join(", "))
    })
}
