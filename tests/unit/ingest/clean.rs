use super::*;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 3, d).unwrap()
}

fn rec(d: u32, label: &str, lp: f64) -> Record {
    Record::new("a", day(d), label, lp)
}

fn states(recs: &[Record]) -> Vec<(NaiveDate, &str, f64)> {
    recs.iter()
        .map(|r| (r.date, r.rank_label.as_str(), r.sub_score))
        .collect()
}

#[test]
fn placeholder_dropped_only_on_days_with_real_state() {
    let out = clean_timeline(vec![
        rec(1, "Gold I", 10.0),
        rec(1, "Iron IV", 0.0),
        rec(2, "Iron IV", 0.0),
    ]);
    assert_eq!(
        states(&out),
        vec![(day(1), "Gold I", 10.0), (day(2), "Iron IV", 0.0)]
    );
}

#[test]
fn consecutive_duplicates_collapse() {
    let out = clean_timeline(vec![
        rec(1, "Gold I", 10.0),
        rec(2, "Gold I", 10.0),
        rec(3, "Gold I", 12.0),
        rec(4, "Gold I", 10.0),
    ]);
    assert_eq!(
        states(&out),
        vec![
            (day(1), "Gold I", 10.0),
            (day(3), "Gold I", 12.0),
            (day(4), "Gold I", 10.0),
        ]
    );
}

#[test]
fn placeholder_sandwich_is_removed() {
    let out = clean_timeline(vec![
        rec(1, "Gold I", 10.0),
        rec(2, "Iron IV", 0.0),
        rec(3, "Gold I", 10.0),
    ]);
    // Duplicate removal already ran, so both neighbours survive.
    assert_eq!(
        states(&out),
        vec![(day(1), "Gold I", 10.0), (day(3), "Gold I", 10.0)]
    );
}

#[test]
fn placeholder_between_different_states_is_kept() {
    let out = clean_timeline(vec![
        rec(1, "Gold I", 10.0),
        rec(2, "Iron IV", 0.0),
        rec(3, "Gold I", 20.0),
    ]);
    assert_eq!(out.len(), 3);
}

#[test]
fn last_record_of_each_day_wins() {
    let out = clean_timeline(vec![
        rec(1, "Gold I", 10.0),
        rec(1, "Gold I", 30.0),
        rec(2, "Gold II", 5.0),
    ]);
    assert_eq!(
        states(&out),
        vec![(day(1), "Gold I", 30.0), (day(2), "Gold II", 5.0)]
    );
}

#[test]
fn record_set_cleaning_keeps_entities_and_counts() {
    let mut set = RecordSet::default();
    set.entities.insert("ghost".to_string());
    set.discarded = 2;
    set.push(Record::new("b", day(2), "Silver I", 1.0));
    set.push(Record::new("a", day(5), "Gold I", 10.0));
    set.push(Record::new("b", day(1), "Silver I", 1.0));
    set.push(Record::new("a", day(5), "Iron IV", 0.0));

    let out = clean_record_set(set);
    assert_eq!(out.discarded, 2);
    assert!(out.entities.contains("ghost"));
    let got: Vec<(&str, NaiveDate)> = out
        .records
        .iter()
        .map(|r| (r.entity.as_str(), r.date))
        .collect();
    assert_eq!(got, vec![("a", day(5)), ("b", day(1))]);
}
