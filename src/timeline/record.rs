use chrono::NaiveDate;

use crate::{foundation::core::Timestamp, foundation::math::finite_or_zero, score::codec::encode};

/// One observation of an entity's rank on a calendar day.
///
/// `score` is derived once, at construction, with the tier schema valid at `time`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Record {
    pub entity: String,
    pub date: NaiveDate,
    pub time: Timestamp, // start of `date`
    pub rank_label: String,
    pub sub_score: f64,
    pub score: Option<f64>,
}

impl Record {
    pub fn new(
        entity: impl Into<String>,
        date: NaiveDate,
        rank_label: impl Into<String>,
        sub_score: f64,
    ) -> Self {
        let time = Timestamp::from_date(date);
        let rank_label = rank_label.into();
        let sub_score = finite_or_zero(sub_score);
        let score = encode(&rank_label, sub_score, time);
        Self {
            entity: entity.into(),
            date,
            time,
            rank_label,
            sub_score,
            score,
        }
    }

    /// `(label, sub-score)` pair used to spot repeated states.
    pub fn state(&self) -> (&str, f64) {
        (self.rank_label.trim(), self.sub_score)
    }
}

/// The validated input to [`crate::EntityTimelineStore::build`].
///
/// `entities` also lists names whose rows were all discarded, so those entities survive with
/// an empty timeline.
#[derive(Clone, Debug, Default)]
pub struct RecordSet {
    pub entities: std::collections::BTreeSet<String>,
    pub records: Vec<Record>,
    /// Rows dropped for a missing or malformed date.
    pub discarded: usize,
}

impl RecordSet {
    pub fn push(&mut self, record: Record) {
        self.entities.insert(record.entity.clone());
        self.records.push(record);
    }

    pub fn extend(&mut self, other: RecordSet) {
        self.entities.extend(other.entities);
        self.records.extend(other.records);
        self.discarded += other.discarded;
    }
}
