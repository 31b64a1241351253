use std::collections::BTreeMap;

use crate::{
    foundation::core::Timestamp,
    timeline::record::{Record, RecordSet},
};

/// Chronological records per entity, keyed and iterated in ascending entity id order.
///
/// Records sharing a timestamp keep their input order. Point lookups treat the last of a tied
/// group as the "latest at or before" record, and never pair tied records with each other.
#[derive(Clone, Debug, Default)]
pub struct EntityTimelineStore {
    timelines: BTreeMap<String, Vec<Record>>,
}

impl EntityTimelineStore {
    #[tracing::instrument(skip(set), fields(records = set.records.len()))]
    pub fn build(set: RecordSet) -> Self {
        let mut timelines: BTreeMap<String, Vec<Record>> = set
            .entities
            .into_iter()
            .map(|id| (id, Vec::new()))
            .collect();
        for record in set.records {
            timelines
                .entry(record.entity.clone())
                .or_default()
                .push(record);
        }
        for records in timelines.values_mut() {
            records.sort_by(|a, b| a.time.total_cmp(&b.time));
        }
        tracing::debug!(entities = timelines.len(), "built entity timelines");
        Self { timelines }
    }

    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut set = RecordSet::default();
        for r in records {
            set.push(r);
        }
        Self::build(set)
    }

    pub fn len(&self) -> usize {
        self.timelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timelines.is_empty()
    }

    pub fn entity_ids(&self) -> impl Iterator<Item = &str> {
        self.timelines.keys().map(String::as_str)
    }

    pub fn timeline(&self, entity: &str) -> Option<&[Record]> {
        self.timelines.get(entity).map(Vec::as_slice)
    }

    /// `(entity, records)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Record])> {
        self.timelines
            .iter()
            .map(|(id, recs)| (id.as_str(), recs.as_slice()))
    }

    pub fn record_count(&self) -> usize {
        self.timelines.values().map(Vec::len).sum()
    }

    /// Earliest record time across all entities.
    pub fn first_time(&self) -> Option<Timestamp> {
        self.timelines
            .values()
            .filter_map(|r| r.first())
            .map(|r| r.time)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Latest record time across all entities.
    pub fn last_time(&self) -> Option<Timestamp> {
        self.timelines
            .values()
            .filter_map(|r| r.last())
            .map(|r| r.time)
            .max_by(|a, b| a.total_cmp(b))
    }
}

/// Index of the latest record with `time <= t`.
pub(crate) fn latest_at_or_before(records: &[Record], t: Timestamp) -> Option<usize> {
    let idx = records.partition_point(|r| r.time.0 <= t.0);
    idx.checked_sub(1)
}

/// Index of the earliest record with `time > t`.
pub(crate) fn earliest_after(records: &[Record], t: Timestamp) -> Option<usize> {
    let idx = records.partition_point(|r| r.time.0 <= t.0);
    (idx < records.len()).then_some(idx)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/store.rs"]
mod tests;
