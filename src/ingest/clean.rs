use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;

use crate::timeline::record::{Record, RecordSet};

/// State the scraper emits when a lookup fails mid-day.
const PLACEHOLDER: (&str, f64) = ("Iron IV", 0.0);

fn is_placeholder(r: &Record) -> bool {
    r.state() == PLACEHOLDER
}

/// Run the per-entity cleaning passes over a merged record set.
///
/// Records are grouped by entity and stably sorted by date first, so within one day the
/// input order is kept. Entities whose records are all removed stay registered.
#[tracing::instrument(skip(set), fields(records = set.records.len()))]
pub fn clean_record_set(set: RecordSet) -> RecordSet {
    let RecordSet {
        entities,
        records,
        discarded,
    } = set;
    let before = records.len();

    let mut groups: BTreeMap<String, Vec<Record>> = BTreeMap::new();
    for r in records {
        groups.entry(r.entity.clone()).or_default().push(r);
    }

    let mut out = Vec::with_capacity(before);
    for (_, mut recs) in groups {
        recs.sort_by_key(|r| r.date);
        out.extend(clean_timeline(recs));
    }

    tracing::debug!(removed = before - out.len(), "cleaned records");
    RecordSet {
        entities,
        records: out,
        discarded,
    }
}

/// Clean one entity's date-ordered records.
pub fn clean_timeline(recs: Vec<Record>) -> Vec<Record> {
    let recs = drop_same_day_placeholders(recs);
    let recs = drop_consecutive_duplicates(recs);
    let recs = drop_placeholder_sandwiches(recs);
    keep_last_per_day(recs)
}

/// On a day that has any real state, every placeholder of that day is a glitch.
fn drop_same_day_placeholders(recs: Vec<Record>) -> Vec<Record> {
    let real_days: HashSet<NaiveDate> = recs
        .iter()
        .filter(|r| !is_placeholder(r))
        .map(|r| r.date)
        .collect();
    recs.into_iter()
        .filter(|r| !(is_placeholder(r) && real_days.contains(&r.date)))
        .collect()
}

fn drop_consecutive_duplicates(recs: Vec<Record>) -> Vec<Record> {
    let mut out: Vec<Record> = Vec::with_capacity(recs.len());
    for r in recs {
        if out.last().is_some_and(|p| p.state() == r.state()) {
            continue;
        }
        out.push(r);
    }
    out
}

/// `A -> placeholder -> A` collapses to `A -> A`. Neighbours are taken from the input, so a
/// run of sandwiches is judged against the original sequence.
fn drop_placeholder_sandwiches(recs: Vec<Record>) -> Vec<Record> {
    if recs.len() < 3 {
        return recs;
    }
    let drop: Vec<bool> = (0..recs.len())
        .map(|i| {
            i > 0
                && i + 1 < recs.len()
                && is_placeholder(&recs[i])
                && recs[i - 1].state() == recs[i + 1].state()
        })
        .collect();
    recs.into_iter()
        .zip(drop)
        .filter_map(|(r, d)| (!d).then_some(r))
        .collect()
}

fn keep_last_per_day(recs: Vec<Record>) -> Vec<Record> {
    let mut out: Vec<Record> = Vec::with_capacity(recs.len());
    for r in recs {
        match out.last_mut() {
            Some(prev) if prev.date == r.date => *prev = r,
            _ => out.push(r),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/ingest/clean.rs"]
mod tests;
