//! Line codec for ledger snapshots.
//!
//! One line per booked seat, seven positional fields:
//!
//! ```text
//! route,day,time,seat,escapedName,escapedId,escapedPhone
//! ```
//!
//! Escapes: `\` becomes `\\`, `,` becomes `\,`, newline becomes `\n`. On
//! decode a backslash introduces an escape; `\n` yields a newline and any
//! other escaped character yields itself.

use busbook_types::Coordinate;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::snapshot::{Snapshot, SnapshotEntry};

/// Positional fields per snapshot line.
pub const FIELD_COUNT: usize = 7;

/// Escape a passenger field for embedding in a snapshot line.
pub fn escape(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    for ch in field.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}

/// Reverse [`escape`]. A dangling backslash at the end is dropped.
pub fn unescape(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut chars = field.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some(escaped) => out.push(escaped),
            None => {}
        }
    }
    out
}

/// Split a line on unescaped commas. Fields are returned still escaped.
pub fn split_fields(line: &str) -> Vec<&str> {
    let mut fields = Vec::with_capacity(FIELD_COUNT);
    let mut start = 0;
    let mut escaped = false;
    for (pos, ch) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            ',' => {
                fields.push(&line[start..pos]);
                start = pos + 1;
            }
            _ => {}
        }
    }
    fields.push(&line[start..]);
    fields
}

/// Encode one booked seat as a snapshot line, without the line terminator.
pub fn encode_line(entry: &SnapshotEntry) -> String {
    let coordinate = entry.seat.coordinate();
    format!(
        "{},{},{},{},{},{},{}",
        coordinate.route,
        coordinate.day,
        coordinate.time,
        coordinate.seat,
        escape(&entry.name),
        escape(&entry.id),
        escape(&entry.phone),
    )
}

/// Decode one snapshot line. `line` is the 1-based line number, used in errors.
///
/// Returns `Ok(None)` for a line with fewer than seven fields. Fields past
/// the seventh are ignored.
pub fn decode_line(line: usize, text: &str) -> StoreResult<Option<SnapshotEntry>> {
    let fields = split_fields(text);
    if fields.len() < FIELD_COUNT {
        return Ok(None);
    }

    let coordinate = Coordinate::new(
        parse_index(line, "route", fields[0])?,
        parse_index(line, "day", fields[1])?,
        parse_index(line, "time", fields[2])?,
        parse_index(line, "seat", fields[3])?,
    );
    let seat = coordinate
        .index()
        .map_err(|source| StoreError::CoordinateOutOfRange { line, source })?;

    Ok(Some(SnapshotEntry {
        seat,
        name: unescape(fields[4]),
        id: unescape(fields[5]),
        phone: unescape(fields[6]),
    }))
}

fn parse_index(line: usize, axis: &str, field: &str) -> StoreResult<i64> {
    unescape(field)
        .parse::<i64>()
        .map_err(|e| StoreError::Malformed {
            line,
            reason: format!("{axis} field {field:?}: {e}"),
        })
}

/// Encode a whole snapshot, one newline-terminated line per entry.
pub fn encode_snapshot(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    for entry in &snapshot.entries {
        out.push_str(&encode_line(entry));
        out.push('\n');
    }
    out
}

/// Decode a whole snapshot.
///
/// All-or-nothing: the first line with an unparsable or out-of-range
/// coordinate fails the entire decode. Short lines are counted in
/// [`Snapshot::skipped`] and otherwise ignored.
pub fn decode_snapshot(text: &str) -> StoreResult<Snapshot> {
    let mut snapshot = Snapshot::default();
    for (n, line) in text.lines().enumerate() {
        match decode_line(n + 1, line)? {
            Some(entry) => snapshot.entries.push(entry),
            None => {
                debug!(line = n + 1, "skipping short snapshot line");
                snapshot.skipped += 1;
            }
        }
    }
    Ok(snapshot)
}
