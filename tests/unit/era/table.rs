use super::*;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn two_eras() -> EraTable {
    EraTable::new(vec![
        EraDef::new(day(2023, 7, 19), "S13-2"),
        EraDef::new(day(2023, 1, 11), "S13-1"),
    ])
    .unwrap()
}

#[test]
fn eras_are_sorted_and_contiguous() {
    let table = two_eras();
    let eras = table.eras();
    assert_eq!(eras[0].label, "S13-1");
    assert_eq!(eras[0].index, 0);
    assert_eq!(eras[1].index, 1);
    assert_eq!(eras[0].end, eras[1].start);
    assert_eq!(eras[1].end, Timestamp::INFINITY);
}

#[test]
fn lookup_boundaries() {
    let table = two_eras();
    let s1 = Timestamp::from_date(day(2023, 1, 11));
    let s2 = Timestamp::from_date(day(2023, 7, 19));

    assert!(table.lookup(s1.add_millis(-1.0)).is_none());
    assert_eq!(table.index_at(s1), Some(0));
    assert_eq!(table.index_at(s2.add_millis(-1.0)), Some(0));
    assert_eq!(table.index_at(s2), Some(1));
    assert_eq!(table.index_at(s2.add_days(5000)), Some(1));
    assert!(table.lookup(Timestamp(f64::NAN)).is_none());
}

#[test]
fn rejects_duplicate_starts_and_blank_labels() {
    assert!(
        EraTable::new(vec![
            EraDef::new(day(2023, 1, 11), "a"),
            EraDef::new(day(2023, 1, 11), "b"),
        ])
        .is_err()
    );
    assert!(EraTable::new(vec![EraDef::new(day(2023, 1, 11), " ")]).is_err());
}

#[test]
fn empty_table_has_no_eras() {
    let table = EraTable::new(Vec::new()).unwrap();
    assert!(table.is_empty());
    assert!(table.lookup(Timestamp(0.0)).is_none());
}

#[test]
fn default_table_is_valid() {
    let table = EraTable::new(default_era_defs()).unwrap();
    assert!(table.len() >= 2);
    assert_eq!(table.eras()[0].label, "S13-1");
}
