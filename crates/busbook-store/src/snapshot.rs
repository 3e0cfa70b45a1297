use busbook_types::{SeatIndex, SeatRecord};

/// One booked seat as it appears in the persisted snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotEntry {
    pub seat: SeatIndex,
    pub name: String,
    pub id: String,
    pub phone: String,
}

impl SnapshotEntry {
    /// The seat record this entry restores.
    pub fn to_record(&self) -> SeatRecord {
        SeatRecord::booked(self.name.clone(), self.id.clone(), self.phone.clone())
    }
}

/// Sparse projection of the ledger: booked seats only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Booked seats in file order.
    pub entries: Vec<SnapshotEntry>,
    /// Lines dropped on decode for having too few fields. Always zero for
    /// a snapshot built from records.
    pub skipped: usize,
}

impl Snapshot {
    /// Project `(index, record)` pairs down to their booked entries.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = (SeatIndex, &'a SeatRecord)>,
    {
        let entries = records
            .into_iter()
            .filter(|(_, record)| record.booked)
            .map(|(seat, record)| SnapshotEntry {
                seat,
                name: record.passenger_name.clone(),
                id: record.passenger_id.clone(),
                phone: record.passenger_phone.clone(),
            })
            .collect();
        Self {
            entries,
            skipped: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use busbook_types::Coordinate;

    #[test]
    fn from_records_drops_unbooked() {
        let a = Coordinate::new(0, 0, 0, 0).index().unwrap();
        let b = Coordinate::new(0, 0, 0, 1).index().unwrap();
        let booked = SeatRecord::booked("Anna", "ID1", "555");
        let free = SeatRecord::empty();

        let snapshot = Snapshot::from_records([(a, &booked), (b, &free)]);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.entries[0].seat, a);
        assert_eq!(snapshot.entries[0].to_record(), booked);
    }
}
