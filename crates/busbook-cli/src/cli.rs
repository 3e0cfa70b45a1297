use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "busbook",
    about = "Bus seat reservations",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Booking data file (overrides the configuration)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Require non-empty credentials and one seat per passenger id per bus
    #[arg(long, global = true)]
    pub strict: bool,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List routes
    Routes,
    /// List day-groups
    Days,
    /// List departure times
    Times,
    /// Show the seat map of one departure
    Seats(TripArgs),
    /// Show one seat
    Show(SeatArgs),
    /// Book a seat
    Book(BookArgs),
    /// Cancel a booking
    Cancel(CancelArgs),
    /// List every booked seat
    Bookings,
    /// Write the data file now
    Flush,
}

/// One departure. Each value is a 0-based index or a label (`ST`, `08:00`).
#[derive(Args, Debug)]
pub struct TripArgs {
    #[arg(short, long, allow_negative_numbers = true)]
    pub route: String,
    #[arg(short, long, allow_negative_numbers = true)]
    pub day: String,
    #[arg(short, long, allow_negative_numbers = true)]
    pub time: String,
}

#[derive(Args, Debug)]
pub struct SeatArgs {
    #[command(flatten)]
    pub trip: TripArgs,
    /// Seat number, 1-40
    #[arg(short, long, allow_negative_numbers = true)]
    pub seat: i64,
}

#[derive(Args, Debug)]
pub struct BookArgs {
    #[command(flatten)]
    pub seat: SeatArgs,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub phone: String,
}

#[derive(Args, Debug)]
pub struct CancelArgs {
    #[command(flatten)]
    pub seat: SeatArgs,
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub phone: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_routes() {
        let cli = Cli::try_parse_from(["busbook", "routes"]).unwrap();
        assert!(matches!(cli.command, Command::Routes));
    }

    #[test]
    fn parse_seats_by_label() {
        let cli =
            Cli::try_parse_from(["busbook", "seats", "-r", "0", "-d", "MW", "-t", "08:00"]).unwrap();
        if let Command::Seats(args) = cli.command {
            assert_eq!(args.route, "0");
            assert_eq!(args.day, "MW");
            assert_eq!(args.time, "08:00");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_book() {
        let cli = Cli::try_parse_from([
            "busbook", "book", "-r", "1", "-d", "0", "-t", "2", "-s", "14",
            "--name", "Anna, B.", "--id", "ID1", "--phone", "555-0100",
        ])
        .unwrap();
        if let Command::Book(args) = cli.command {
            assert_eq!(args.seat.seat, 14);
            assert_eq!(args.name, "Anna, B.");
            assert_eq!(args.phone, "555-0100");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_cancel() {
        let cli = Cli::try_parse_from([
            "busbook", "cancel", "-r", "1", "-d", "0", "-t", "2", "-s", "14",
            "--id", "ID1", "--phone", "555",
        ])
        .unwrap();
        if let Command::Cancel(args) = cli.command {
            assert_eq!(args.id, "ID1");
            assert_eq!(args.seat.trip.route, "1");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_negative_seat() {
        let cli = Cli::try_parse_from([
            "busbook", "show", "-r", "0", "-d", "0", "-t", "0", "-s", "-1",
        ])
        .unwrap();
        if let Command::Show(args) = cli.command {
            assert_eq!(args.seat, -1);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn book_requires_credentials() {
        assert!(Cli::try_parse_from([
            "busbook", "book", "-r", "0", "-d", "0", "-t", "0", "-s", "1", "--name", "A",
        ])
        .is_err());
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::try_parse_from([
            "busbook", "--format", "json", "--data", "/tmp/b.txt", "--strict", "-v", "bookings",
        ])
        .unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
        assert_eq!(cli.data, Some(PathBuf::from("/tmp/b.txt")));
        assert!(cli.strict);
        assert!(cli.verbose);
    }
}
