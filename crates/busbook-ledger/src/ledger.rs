use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use busbook_store::{FileSnapshotStore, Snapshot, SnapshotStore};
use busbook_types::{Coordinate, SeatIndex, SeatRecord, TripIndex, SEAT_COUNT};
use tracing::{debug, info, warn};

use crate::config::{CredentialPolicy, LedgerConfig};
use crate::error::{LedgerError, LedgerResult};
use crate::outcome::{Durability, LoadStatus};
use crate::traits::SeatLedger;

/// The 9600-seat booking ledger.
///
/// All seat state sits behind one `RwLock`. Mutations and explicit flushes
/// take the write lock and write the snapshot before releasing it, so a
/// reader never sees a mutation whose durability has not been settled.
pub struct BookingLedger {
    store: Option<Box<dyn SnapshotStore>>,
    policy: CredentialPolicy,
    state: RwLock<LedgerState>,
    load_status: LoadStatus,
}

struct LedgerState {
    seats: Vec<SeatRecord>,
}

impl LedgerState {
    fn empty() -> Self {
        Self {
            seats: vec![SeatRecord::empty(); SEAT_COUNT],
        }
    }

    fn get(&self, index: SeatIndex) -> &SeatRecord {
        &self.seats[index.offset()]
    }

    fn get_mut(&mut self, index: SeatIndex) -> &mut SeatRecord {
        &mut self.seats[index.offset()]
    }

    fn apply(&mut self, snapshot: &Snapshot) {
        for entry in &snapshot.entries {
            *self.get_mut(entry.seat) = entry.to_record();
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::from_records(SeatIndex::all().zip(self.seats.iter()))
    }

    fn booked_count(&self) -> usize {
        self.seats.iter().filter(|seat| seat.booked).count()
    }
}

impl BookingLedger {
    /// Open a ledger over `store`, loading whatever it holds.
    ///
    /// A load failure is not fatal: the ledger starts with every seat free
    /// and [`load_status`](Self::load_status) records why.
    pub fn open<S>(store: S, policy: CredentialPolicy) -> Self
    where
        S: SnapshotStore + 'static,
    {
        let mut state = LedgerState::empty();
        let load_status = load_into(&store, &mut state);
        Self {
            store: Some(Box::new(store)),
            policy,
            state: RwLock::new(state),
            load_status,
        }
    }

    /// A ledger with no snapshot store. Nothing survives the process.
    pub fn volatile(policy: CredentialPolicy) -> Self {
        Self {
            store: None,
            policy,
            state: RwLock::new(LedgerState::empty()),
            load_status: LoadStatus::Volatile,
        }
    }

    /// Build a ledger from configuration, file-backed when a path is set.
    pub fn from_config(config: &LedgerConfig) -> Self {
        match &config.snapshot_path {
            Some(path) => Self::open(
                FileSnapshotStore::with_sync_mode(path.clone(), config.sync),
                config.credentials,
            ),
            None => Self::volatile(config.credentials),
        }
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    pub fn policy(&self) -> CredentialPolicy {
        self.policy
    }

    fn read_state(&self) -> LedgerResult<RwLockReadGuard<'_, LedgerState>> {
        self.state.read().map_err(|_| LedgerError::Poisoned)
    }

    fn write_state(&self) -> LedgerResult<RwLockWriteGuard<'_, LedgerState>> {
        self.state.write().map_err(|_| LedgerError::Poisoned)
    }

    /// Write the full snapshot. Callers hold the write lock.
    fn persist_locked(&self, state: &LedgerState) -> Durability {
        let Some(store) = &self.store else {
            return Durability::Volatile;
        };

        let snapshot = state.snapshot();
        match store.save(&snapshot) {
            Ok(()) => Durability::Persisted {
                records: snapshot.len(),
            },
            Err(e) => {
                warn!(error = %e, "snapshot write failed; in-memory state kept");
                Durability::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

fn load_into(store: &dyn SnapshotStore, state: &mut LedgerState) -> LoadStatus {
    match store.load() {
        Ok(Some(snapshot)) => {
            state.apply(&snapshot);
            let records = state.booked_count();
            info!(records, skipped = snapshot.skipped, "ledger restored from snapshot");
            LoadStatus::Loaded {
                records,
                skipped: snapshot.skipped,
            }
        }
        Ok(None) => LoadStatus::NoSnapshot,
        Err(e) => {
            warn!(error = %e, "snapshot load failed; starting with an empty ledger");
            LoadStatus::Failed {
                reason: e.to_string(),
            }
        }
    }
}

impl SeatLedger for BookingLedger {
    fn is_booked(&self, coordinate: Coordinate) -> LedgerResult<bool> {
        let index = coordinate.index()?;
        Ok(self.read_state()?.get(index).booked)
    }

    fn seat(&self, coordinate: Coordinate) -> LedgerResult<SeatRecord> {
        let index = coordinate.index()?;
        Ok(self.read_state()?.get(index).clone())
    }

    fn book_seat(
        &self,
        coordinate: Coordinate,
        name: &str,
        id: &str,
        phone: &str,
    ) -> LedgerResult<Durability> {
        let index = coordinate.index()?;
        self.policy.check_present(name, id, phone)?;

        let mut state = self.write_state()?;
        if state.get(index).booked {
            return Err(LedgerError::SeatAlreadyBooked(coordinate));
        }
        if self.policy.reject_duplicate_ids {
            let taken = index.trip().seats().any(|seat| {
                let record = state.get(seat);
                record.booked && record.passenger_id == id
            });
            if taken {
                return Err(LedgerError::DuplicateCredentials { id: id.to_string() });
            }
        }

        *state.get_mut(index) = SeatRecord::booked(name, id, phone);
        debug!(
            route = coordinate.route,
            day = coordinate.day,
            time = coordinate.time,
            seat = coordinate.seat,
            "seat booked"
        );
        Ok(self.persist_locked(&state))
    }

    fn cancel_seat(
        &self,
        coordinate: Coordinate,
        id: &str,
        phone: &str,
    ) -> LedgerResult<Durability> {
        let index = coordinate.index()?;

        let mut state = self.write_state()?;
        let seat = state.get_mut(index);
        if seat.booked && !seat.credentials_match(id, phone) {
            return Err(LedgerError::InvalidCredentials);
        }
        let was_booked = seat.booked;
        seat.clear();

        debug!(
            route = coordinate.route,
            day = coordinate.day,
            time = coordinate.time,
            seat = coordinate.seat,
            was_booked,
            "seat cancelled"
        );
        Ok(self.persist_locked(&state))
    }

    fn persist(&self) -> LedgerResult<Durability> {
        let state = self.write_state()?;
        Ok(self.persist_locked(&state))
    }

    fn trip_seats(&self, route: i64, day: i64, time: i64) -> LedgerResult<Vec<SeatRecord>> {
        let trip = TripIndex::new(route, day, time)?;
        let state = self.read_state()?;
        Ok(trip.seats().map(|seat| state.get(seat).clone()).collect())
    }

    fn bookings(&self) -> LedgerResult<Vec<(SeatIndex, SeatRecord)>> {
        let state = self.read_state()?;
        Ok(SeatIndex::all()
            .zip(state.seats.iter())
            .filter(|(_, record)| record.booked)
            .map(|(index, record)| (index, record.clone()))
            .collect())
    }
}
