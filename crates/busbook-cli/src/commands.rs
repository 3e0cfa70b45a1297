use std::process::ExitCode;

use anyhow::bail;
use busbook_ledger::{BookingLedger, Durability, LedgerError, LoadStatus, SeatLedger};
use busbook_types::{Axis, Coordinate, SeatIndex, SeatRecord, MAX_SEATS};
use colored::Colorize;
use serde::Serialize;

use crate::cli::*;
use crate::config;

/// Seats per row on the printed seat map (two either side of the aisle).
const ROW_WIDTH: usize = 4;

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = config::resolve(&cli)?;
    let ledger = BookingLedger::from_config(&config);
    if let LoadStatus::Failed { reason } = ledger.load_status() {
        eprintln!("{} could not read booking data, starting empty: {}", "!".yellow().bold(), reason);
    }

    let out = Output { format: cli.format };
    let result = match cli.command {
        Command::Routes => cmd_labels(&out, ledger.route_names()),
        Command::Days => cmd_labels(&out, ledger.day_names()),
        Command::Times => cmd_labels(&out, ledger.time_slots()),
        Command::Seats(args) => cmd_seats(&out, &ledger, args),
        Command::Show(args) => cmd_show(&out, &ledger, args),
        Command::Book(args) => cmd_book(&out, &ledger, args),
        Command::Cancel(args) => cmd_cancel(&out, &ledger, args),
        Command::Bookings => cmd_bookings(&out, &ledger),
        Command::Flush => cmd_flush(&out, &ledger),
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => match e.downcast_ref::<LedgerError>() {
            Some(ledger_error) => {
                eprintln!("{} {}", "✗".red().bold(), user_message(ledger_error));
                Ok(ExitCode::FAILURE)
            }
            None => Err(e),
        },
    }
}

/// The message shown for a rejected operation.
pub fn user_message(error: &LedgerError) -> String {
    match error {
        LedgerError::InvalidSelection(e) => format!("Invalid selection: {e}"),
        LedgerError::SeatAlreadyBooked(_) => "Seat already booked".into(),
        LedgerError::InvalidCredentials => "Invalid credentials".into(),
        LedgerError::MissingCredentials { field } => format!("Missing credentials: {field} is required"),
        LedgerError::DuplicateCredentials { id } => {
            format!("Passenger {id} already has a seat on this bus")
        }
        LedgerError::Poisoned => "Booking data is unavailable".into(),
    }
}

struct Output {
    format: OutputFormat,
}

impl Output {
    /// Print `value` as JSON, or run `text` to print it for humans.
    fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce()) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
            OutputFormat::Text => text(),
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct LabelRow<'a> {
    index: usize,
    label: &'a str,
}

#[derive(Serialize)]
struct SeatRow<'a> {
    seat: usize,
    #[serde(flatten)]
    record: &'a SeatRecord,
}

#[derive(Serialize)]
struct BookingRow<'a> {
    route: &'a str,
    day: &'a str,
    time: &'a str,
    seat: usize,
    #[serde(flatten)]
    record: &'a SeatRecord,
}

#[derive(Serialize)]
struct MutationReport {
    action: &'static str,
    coordinate: Coordinate,
    durability: Durability,
}

/// Map a 0-based index or a label onto its index. Numbers pass through
/// unchecked; the ledger rejects out-of-range ones.
fn resolve_axis(axis: Axis, raw: &str, labels: &[&str]) -> anyhow::Result<i64> {
    if let Ok(index) = raw.trim().parse::<i64>() {
        return Ok(index);
    }
    match labels.iter().position(|label| label.eq_ignore_ascii_case(raw.trim())) {
        Some(index) => Ok(index as i64),
        None => bail!("unknown {axis} {raw:?}; expected an index or one of: {}", labels.join(", ")),
    }
}

fn resolve_trip(ledger: &BookingLedger, args: &TripArgs) -> anyhow::Result<(i64, i64, i64)> {
    Ok((
        resolve_axis(Axis::Route, &args.route, ledger.route_names())?,
        resolve_axis(Axis::Day, &args.day, ledger.day_names())?,
        resolve_axis(Axis::Time, &args.time, ledger.time_slots())?,
    ))
}

/// Seat numbers are 1-based at the prompt and 0-based in the ledger.
fn resolve_seat(ledger: &BookingLedger, args: &SeatArgs) -> anyhow::Result<Coordinate> {
    let (route, day, time) = resolve_trip(ledger, &args.trip)?;
    Ok(Coordinate::new(route, day, time, args.seat.saturating_sub(1)))
}

fn trip_title(ledger: &BookingLedger, route: i64, day: i64, time: i64) -> String {
    let label = |labels: &[&str], i: i64| {
        usize::try_from(i)
            .ok()
            .and_then(|i| labels.get(i).copied())
            .unwrap_or("?")
            .to_string()
    };
    format!(
        "{} · {} · {}",
        label(ledger.route_names(), route),
        label(ledger.day_names(), day),
        label(ledger.time_slots(), time),
    )
}

fn print_durability(durability: &Durability) {
    match durability {
        Durability::Persisted { .. } => {}
        Durability::Failed { reason } => {
            eprintln!("{} saved in memory only, data file not updated: {}", "!".yellow().bold(), reason)
        }
        Durability::Volatile => println!("  {}", "(no data file configured)".dimmed()),
    }
}

fn cmd_labels(out: &Output, labels: &[&str]) -> anyhow::Result<()> {
    let rows: Vec<_> = labels
        .iter()
        .enumerate()
        .map(|(index, label)| LabelRow { index, label })
        .collect();
    out.emit(&rows, || {
        for row in &rows {
            println!("{:>3}  {}", row.index.to_string().dimmed(), row.label);
        }
    })
}

fn cmd_seats(out: &Output, ledger: &BookingLedger, args: TripArgs) -> anyhow::Result<()> {
    let (route, day, time) = resolve_trip(ledger, &args)?;
    let seats = ledger.trip_seats(route, day, time)?;
    let rows: Vec<_> = seats
        .iter()
        .enumerate()
        .map(|(n, record)| SeatRow { seat: n + 1, record })
        .collect();

    out.emit(&rows, || {
        let free = seats.iter().filter(|s| !s.booked).count();
        println!("{}", trip_title(ledger, route, day, time).bold());
        println!("{} of {} seats free\n", free.to_string().green(), MAX_SEATS);
        for row in rows.chunks(ROW_WIDTH) {
            let cells: Vec<String> = row
                .iter()
                .map(|s| {
                    let cell = format!("[{:>2}]", s.seat);
                    if s.record.booked { cell.red().to_string() } else { cell.green().to_string() }
                })
                .collect();
            let (left, right) = cells.split_at(cells.len().min(ROW_WIDTH / 2));
            println!("  {}    {}", left.join(" "), right.join(" "));
        }
    })
}

fn cmd_show(out: &Output, ledger: &BookingLedger, args: SeatArgs) -> anyhow::Result<()> {
    let coordinate = resolve_seat(ledger, &args)?;
    let record = ledger.seat(coordinate)?;
    let row = SeatRow { seat: args.seat as usize, record: &record };

    out.emit(&row, || {
        let title = trip_title(ledger, coordinate.route, coordinate.day, coordinate.time);
        println!("{} seat {}", title.bold(), args.seat);
        if record.booked {
            println!("  Status: {}", "booked".red());
            println!("  Name:   {}", record.passenger_name);
        } else {
            println!("  Status: {}", "free".green());
        }
    })
}

fn cmd_book(out: &Output, ledger: &BookingLedger, args: BookArgs) -> anyhow::Result<()> {
    let coordinate = resolve_seat(ledger, &args.seat)?;
    let durability = ledger.book_seat(coordinate, &args.name, &args.id, &args.phone)?;
    let report = MutationReport { action: "book", coordinate, durability };

    out.emit(&report, || {
        println!("{} Seat booked successfully", "✓".green().bold());
        print_durability(&report.durability);
    })
}

fn cmd_cancel(out: &Output, ledger: &BookingLedger, args: CancelArgs) -> anyhow::Result<()> {
    let coordinate = resolve_seat(ledger, &args.seat)?;
    let durability = ledger.cancel_seat(coordinate, &args.id, &args.phone)?;
    let report = MutationReport { action: "cancel", coordinate, durability };

    out.emit(&report, || {
        println!("{} Booking cancelled", "✓".green().bold());
        print_durability(&report.durability);
    })
}

fn cmd_bookings(out: &Output, ledger: &BookingLedger) -> anyhow::Result<()> {
    let bookings = ledger.bookings()?;
    let rows: Vec<_> = bookings.iter().map(|(index, record)| booking_row(ledger, *index, record)).collect();

    out.emit(&rows, || {
        if rows.is_empty() {
            println!("No bookings.");
        }
        for row in &rows {
            println!(
                "{} {} {} seat {:>2}  {} ({}, {})",
                row.route.bold(),
                row.day,
                row.time.cyan(),
                row.seat,
                row.record.passenger_name,
                row.record.passenger_id,
                row.record.passenger_phone,
            );
        }
    })
}

fn booking_row<'a>(ledger: &'a BookingLedger, index: SeatIndex, record: &'a SeatRecord) -> BookingRow<'a> {
    let trip = index.trip();
    BookingRow {
        route: ledger.route_names()[trip.route()],
        day: ledger.day_names()[trip.day()],
        time: ledger.time_slots()[trip.time()],
        seat: index.seat() + 1,
        record,
    }
}

fn cmd_flush(out: &Output, ledger: &BookingLedger) -> anyhow::Result<()> {
    let durability = ledger.persist()?;
    out.emit(&durability, || match &durability {
        Durability::Persisted { records } => {
            println!("{} Wrote {} booking(s)", "✓".green().bold(), records)
        }
        other => print_durability(other),
    })
}
