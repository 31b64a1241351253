use chrono::NaiveDate;

use crate::{
    era::table::EraTable,
    foundation::core::{TimeWindow, Timestamp},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PauseKind {
    Snap,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PauseReason {
    /// Last day of an era, just before the next one starts.
    SeasonEnd,
    /// A configured pinned date.
    Extra,
}

/// An instant at which playback hard-stops on an exact snapshot of `window`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PausePoint {
    pub time: Timestamp,
    pub kind: PauseKind,
    pub window: TimeWindow,
    pub era_index: usize,
    pub label: String,
    pub reason: PauseReason,
}

/// Ascending, de-duplicated pause instants, built once.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PauseSchedule {
    points: Vec<PausePoint>,
}

impl PauseSchedule {
    /// Build the schedule for the playable range `[playable_start, playable_end]` (inclusive).
    ///
    /// Era-end points come first, so when an extra date lands on the same instant the
    /// season-end point is the one kept. Extra dates outside every era are skipped.
    #[tracing::instrument(skip(eras, extra_dates))]
    pub fn build(
        eras: &EraTable,
        extra_dates: &[NaiveDate],
        playable_start: Timestamp,
        playable_end: Timestamp,
    ) -> Self {
        let in_range = |t: Timestamp| playable_start.0 <= t.0 && t.0 <= playable_end.0;
        let mut points = Vec::new();

        for pair in eras.eras().windows(2) {
            let (era, next) = (&pair[0], &pair[1]);
            // End of the day before `next` starts.
            let time = next.start.add_millis(-1.0).end_of_containing_day();
            if !in_range(time) {
                continue;
            }
            points.push(PausePoint {
                time,
                kind: PauseKind::Snap,
                window: era.window(),
                era_index: era.index,
                label: era.label.clone(),
                reason: PauseReason::SeasonEnd,
            });
        }

        for &date in extra_dates {
            let time = Timestamp::end_of_day(date);
            if !in_range(time) {
                continue;
            }
            let Some(era) = eras.lookup(time) else {
                tracing::debug!(%date, "extra pause date outside every era, skipped");
                continue;
            };
            points.push(PausePoint {
                time,
                kind: PauseKind::Snap,
                window: era.window(),
                era_index: era.index,
                label: era.label.clone(),
                reason: PauseReason::Extra,
            });
        }

        points.sort_by(|a, b| a.time.total_cmp(&b.time));
        points.dedup_by(|later, earlier| later.time.0 == earlier.time.0);
        tracing::debug!(count = points.len(), "built pause schedule");
        Self { points }
    }

    pub fn points(&self) -> &[PausePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PausePoint> {
        self.points.get(index)
    }

    /// Number of points at or before `t`; the consumption pointer after seeking to `t`.
    pub fn consumed_by(&self, t: Timestamp) -> usize {
        self.points.partition_point(|p| p.time.0 <= t.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/pauses.rs"]
mod tests;
