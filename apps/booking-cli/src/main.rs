use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

use appointment_cell::{BookingField, BookingState, BookingFormController, SubmissionOutcome};
use auth_cell::{AuthClient, SessionStore};
use shared_config::AppConfig;
use shared_models::auth::RegisterRequest;

use cli::{BookArgs, Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Arc::new(AppConfig::from_env());
    if !config.is_configured() {
        bail!("BOOKING_API_BASE_URL must be set");
    }

    let session = SessionStore::from_config(&config);

    match cli.command {
        Command::Login { email, password } => {
            let auth = AuthClient::new(config.clone(), session)?;
            let route = auth.login(&email, &password).await?;
            println!("Login successful!");
            info!("Navigating to {}", route);
        }
        Command::Register(args) => {
            let auth = AuthClient::new(config.clone(), session)?;
            let form = RegisterRequest {
                full_name: args.full_name,
                email: args.email,
                password: args.password,
                confirm_password: args.confirm_password,
            };
            let route = auth.register(&form).await?;
            println!("User registered successfully!");
            info!("Navigating to {}", route);
        }
        Command::Book(args) => book(&config, session, args).await?,
    }

    Ok(())
}

async fn book(config: &AppConfig, session: SessionStore, args: BookArgs) -> Result<()> {
    let controller = BookingFormController::from_config(config, session)
        .context("Failed to create booking client")?;

    controller.update_field(BookingField::PatientName, args.name);
    controller.update_field(BookingField::ContactNumber, args.contact);
    controller.update_field(BookingField::ReasonForBooking, args.reason);
    controller.open_date_picker();
    controller.confirm_date(Some(args.date))?;
    controller.select_time_slot(Some(args.slot));
    controller.set_rating_fractional(args.rating)?;

    match controller.submit().await? {
        SubmissionOutcome::Success => {
            if let BookingState::Success { feedback_rating } = controller.state() {
                println!("Appointment booked! Thanks for rating us {}/5.", feedback_rating);
            }
        }
        SubmissionOutcome::SlotConflict(message) | SubmissionOutcome::TransientFailure(message) => {
            bail!(message);
        }
    }

    Ok(())
}
