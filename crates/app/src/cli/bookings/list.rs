use clap::Args;
use harvest_app::domain::bookings::{BookingsService, PgBookingsService};

#[derive(Debug, Args)]
pub(crate) struct ListBookingsArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: ListBookingsArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;

    let bookings = PgBookingsService::new(db)
        .list_all_bookings()
        .await
        .map_err(|error| format!("failed to list bookings: {error}"))?;

    if bookings.is_empty() {
        println!("no bookings found");
        return Ok(());
    }

    for entry in bookings {
        let booking = entry.booking;

        println!("booking_uuid: {}", booking.uuid);
        println!("user: {} <{}>", entry.user_name, entry.user_email);
        println!("item: {} ({})", booking.item, booking.item_kind);
        println!("status: {}", booking.status);
        println!("created_at: {}", booking.created_at);
        println!();
    }

    Ok(())
}
