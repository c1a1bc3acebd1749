use clap::{Args, Subcommand};

mod list;

#[derive(Debug, Args)]
pub(crate) struct BookingsCommand {
    #[command(subcommand)]
    command: BookingsSubcommand,
}

#[derive(Debug, Subcommand)]
enum BookingsSubcommand {
    List(list::ListBookingsArgs),
}

pub(crate) async fn run(command: BookingsCommand) -> Result<(), String> {
    match command.command {
        BookingsSubcommand::List(args) => list::run(args).await,
    }
}
