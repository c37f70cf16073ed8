use crate::check::{run_check, CheckArgs};
use crate::commands::{run_address, run_convert, run_price, AddressArgs, ConvertArgs, PriceArgs};
use clap::{Parser, Subcommand};
use estate_inputs::config::AppConfig;
use estate_inputs::error::AppError;
use estate_inputs::telemetry;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "estate-forms",
    about = "Parse, format and validate property listing form values from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse free-typed price text and show its canonical and display forms
    Price(PriceArgs),
    /// Convert an area between units
    Convert(ConvertArgs),
    /// Split a one-line address into components, optionally autofilling city and state
    Address(AddressArgs),
    /// Validate every row of a listings CSV through the listing form
    Check(CheckArgs),
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(environment = ?config.environment, locale = config.inputs.locale.tag(), "configuration loaded");

    let defaults = config.inputs;
    match cli.command {
        Command::Price(args) => run_price(args, &defaults),
        Command::Convert(args) => run_convert(args, &defaults),
        Command::Address(args) => run_address(args, &defaults).await,
        Command::Check(args) => run_check(args, &defaults),
    }
}
