use chrono::NaiveDate;

use crate::{
    foundation::core::{TimeWindow, Timestamp},
    foundation::error::{RaceError, RaceResult},
};

/// Authoring form of an era: a start day and a display label.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EraDef {
    pub start: NaiveDate,
    pub label: String,
}

impl EraDef {
    pub fn new(start: NaiveDate, label: impl Into<String>) -> Self {
        Self {
            start,
            label: label.into(),
        }
    }
}

/// A contiguous season segment `[start, end)`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Era {
    pub index: usize,
    pub label: String,
    pub start: Timestamp,
    pub end: Timestamp, // start of the next era, or +inf
}

impl Era {
    pub fn window(&self) -> TimeWindow {
        TimeWindow {
            start: self.start,
            end: self.end,
        }
    }

    pub fn contains(&self, t: Timestamp) -> bool {
        self.window().contains(t)
    }
}

/// Ordered, gapless, non-overlapping eras with `O(log E)` lookup.
#[derive(Clone, Debug, Default)]
pub struct EraTable {
    eras: Vec<Era>,
}

impl EraTable {
    pub fn new(defs: impl IntoIterator<Item = EraDef>) -> RaceResult<Self> {
        let mut defs: Vec<EraDef> = defs.into_iter().collect();
        defs.sort_by_key(|d| d.start);

        for w in defs.windows(2) {
            if w[0].start == w[1].start {
                return Err(RaceError::validation(format!(
                    "eras '{}' and '{}' share start date {}",
                    w[0].label, w[1].label, w[0].start
                )));
            }
        }
        if let Some(d) = defs.iter().find(|d| d.label.trim().is_empty()) {
            return Err(RaceError::validation(format!(
                "era starting {} must have a non-empty label",
                d.start
            )));
        }

        let starts: Vec<Timestamp> = defs.iter().map(|d| Timestamp::from_date(d.start)).collect();
        let eras = defs
            .into_iter()
            .enumerate()
            .map(|(index, def)| Era {
                index,
                label: def.label,
                start: starts[index],
                end: starts.get(index + 1).copied().unwrap_or(Timestamp::INFINITY),
            })
            .collect();
        Ok(Self { eras })
    }

    pub fn len(&self) -> usize {
        self.eras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eras.is_empty()
    }

    pub fn eras(&self) -> &[Era] {
        &self.eras
    }

    pub fn get(&self, index: usize) -> Option<&Era> {
        self.eras.get(index)
    }

    /// Era whose `[start, end)` contains `t`; `None` before the first era.
    pub fn lookup(&self, t: Timestamp) -> Option<&Era> {
        let idx = self.eras.partition_point(|e| e.start.0 <= t.0);
        let era = self.eras.get(idx.checked_sub(1)?)?;
        era.contains(t).then_some(era)
    }

    pub fn index_at(&self, t: Timestamp) -> Option<usize> {
        self.lookup(t).map(|e| e.index)
    }
}

/// Ranked split table starting with the 2023 season.
pub fn default_era_defs() -> Vec<EraDef> {
    [
        ((2023, 1, 11), "S13-1"),
        ((2023, 7, 19), "S13-2"),
        ((2024, 1, 10), "S14-1"),
        ((2024, 5, 15), "S14-2"),
        ((2024, 9, 25), "S14-3"),
        ((2025, 1, 9), "S15-1"),
        ((2025, 4, 30), "S15-2"),
        ((2025, 8, 27), "S15-3"),
    ]
    .into_iter()
    .filter_map(|((y, m, d), label)| NaiveDate::from_ymd_opt(y, m, d).map(|s| EraDef::new(s, label)))
    .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/era/table.rs"]
mod tests;
