use crate::{
    era::table::{Era, EraTable},
    foundation::core::{TimeWindow, Timestamp},
    foundation::math::lerp,
    timeline::record::Record,
    timeline::store::{EntityTimelineStore, earliest_after, latest_at_or_before},
};

/// How a snapshot was reconstructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum SnapshotMode {
    /// Linear interpolation between samples inside one era.
    Interpolated,
    /// Raw latest sample inside an explicit era window.
    Exact,
}

/// Every entity's score at one instant, in canonical (ascending id) order.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot<'a> {
    pub at: Timestamp,
    pub mode: SnapshotMode,
    pub entries: Vec<(&'a str, Option<f64>)>,
}

impl<'a> Snapshot<'a> {
    pub fn is_exact(&self) -> bool {
        self.mode == SnapshotMode::Exact
    }

    pub fn score(&self, entity: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(id, _)| *id == entity)
            .and_then(|(_, s)| *s)
    }

    pub fn present_count(&self) -> usize {
        self.entries.iter().filter(|(_, s)| s.is_some()).count()
    }

    fn all_absent(store: &'a EntityTimelineStore, at: Timestamp, mode: SnapshotMode) -> Self {
        Self {
            at,
            mode,
            entries: store.entity_ids().map(|id| (id, None)).collect(),
        }
    }
}

/// Stateless point-in-time reconstruction over a timeline store and an era table.
pub struct SnapshotEngine;

impl SnapshotEngine {
    /// Interpolated snapshot at `t`. Each era is reconstructed on its own: values are never
    /// interpolated or held across an era boundary.
    pub fn snapshot_at<'a>(
        store: &'a EntityTimelineStore,
        eras: &EraTable,
        t: Timestamp,
    ) -> Snapshot<'a> {
        let Some(era) = eras.lookup(t) else {
            return Snapshot::all_absent(store, t, SnapshotMode::Interpolated);
        };
        let entries = store
            .iter()
            .map(|(id, records)| (id, interpolated_score(records, era, t)))
            .collect();
        Snapshot {
            at: t,
            mode: SnapshotMode::Interpolated,
            entries,
        }
    }

    /// Exact snapshot: the latest record at or before `as_of`, reported raw when it lies inside
    /// `window`.
    pub fn snapshot_final<'a>(
        store: &'a EntityTimelineStore,
        window: TimeWindow,
        as_of: Timestamp,
    ) -> Snapshot<'a> {
        let entries = store
            .iter()
            .map(|(id, records)| {
                let score = latest_at_or_before(records, as_of)
                    .map(|i| &records[i])
                    .filter(|r| window.contains(r.time))
                    .and_then(|r| r.score);
                (id, score)
            })
            .collect();
        Snapshot {
            at: as_of,
            mode: SnapshotMode::Exact,
            entries,
        }
    }

    /// Exact snapshot of whichever era contains `as_of`; all absent outside every era.
    pub fn snapshot_final_in_era<'a>(
        store: &'a EntityTimelineStore,
        eras: &EraTable,
        as_of: Timestamp,
    ) -> Snapshot<'a> {
        match eras.lookup(as_of) {
            Some(era) => Self::snapshot_final(store, era.window(), as_of),
            None => Snapshot::all_absent(store, as_of, SnapshotMode::Exact),
        }
    }
}

fn interpolated_score(records: &[Record], era: &Era, t: Timestamp) -> Option<f64> {
    let prev = &records[latest_at_or_before(records, t)?];
    if prev.time.0 < era.start.0 {
        // Not yet seen this era.
        return None;
    }

    let next = match earliest_after(records, t) {
        Some(i) if records[i].time.0 < era.end.0 => &records[i],
        _ => return prev.score,
    };

    if prev.time.0 == next.time.0 {
        return next.score;
    }
    let (a, b) = (prev.score?, next.score?);
    let frac = (t.0 - prev.time.0) / (next.time.0 - prev.time.0);
    Some(lerp(a, b, frac.clamp(0.0, 1.0)))
}

#[cfg(test)]
#[path = "../../tests/unit/snapshot/engine.rs"]
mod tests;
