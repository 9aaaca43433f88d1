//! Command dispatch: bridges CLI args -> repository actions -> output formatting.

pub mod activities;
pub mod blog;
pub mod bookings;
pub mod config_cmd;
pub mod crud;
pub mod destinations;
pub mod info;
pub mod itineraries;
pub mod payments;
pub mod services;
pub mod tours;
pub mod util;

use tripkit_core::Controller;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    controller: &Controller,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Bookings(args) => bookings::handle(controller, args, global).await,
        Command::Destinations(args) => destinations::handle(controller, args, global).await,
        Command::Payments(args) => payments::handle(controller, args, global).await,
        Command::Services(args) => services::handle(controller, args, global).await,
        Command::Tours(args) => tours::handle(controller, args, global).await,
        Command::Activities(args) => activities::handle(controller, args, global).await,
        Command::Itineraries(args) => itineraries::handle(controller, args, global).await,
        Command::Info(args) => info::handle(controller, args, global).await,
        Command::Blog(args) => blog::handle(controller, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
