use super::*;
use chrono::NaiveDate;

#[test]
fn csv_rows_become_records() {
    let data = "date,name,tier,lp,score\n\
                2023-01-12,alpha,Gold II,40,1240\n\
                2023-01-13,beta,Challenger,812,3612\n";
    let set = read_csv(data.as_bytes()).unwrap();
    assert_eq!(set.records.len(), 2);
    assert_eq!(set.discarded, 0);
    let a = &set.records[0];
    assert_eq!(a.entity, "alpha");
    assert_eq!(a.date, NaiveDate::from_ymd_opt(2023, 1, 12).unwrap());
    assert_eq!(a.score, Some(1440.0));
    assert_eq!(set.records[1].score, Some(8.0 * 400.0 + 812.0));
}

#[test]
fn bad_dates_discard_row_but_keep_entity() {
    let data = "date,name,tier,lp\n\
                not-a-date,ghost,Gold I,10\n\
                ,ghost,Gold I,10\n\
                2023-02-30,ghost,Gold I,10\n";
    let set = read_csv(data.as_bytes()).unwrap();
    assert!(set.records.is_empty());
    assert_eq!(set.discarded, 3);
    assert!(set.entities.contains("ghost"));
}

#[test]
fn non_numeric_lp_and_blank_tier_are_tolerated() {
    let data = "date,name,tier,lp\n\
                2023-03-01,alpha,Gold I,abc\n\
                2023-03-02,alpha,,12\n\
                2023-03-03,alpha,Silver II,\n";
    let set = read_csv(data.as_bytes()).unwrap();
    assert_eq!(set.records.len(), 3);
    assert_eq!(set.records[0].sub_score, 0.0);
    assert_eq!(set.records[0].score, Some(3.0 * 400.0 + 300.0));
    assert_eq!(set.records[1].score, None);
    assert_eq!(set.records[2].sub_score, 0.0);
}

#[test]
fn json_rows_accept_numbers_strings_and_nulls() {
    let data = r#"[
        {"date": "2023-03-01", "name": "alpha", "tier": "Gold I", "lp": 10, "score": 1510},
        {"date": "2023-03-02", "name": "alpha", "tier": "Gold I", "lp": "22"},
        {"date": null, "name": "beta", "tier": "Gold I", "lp": 3},
        {"date": "2023-03-02", "name": "  ", "tier": "Gold I", "lp": 3},
        {"date": "2023-03-03", "name": "gamma", "tier": null, "lp": null}
    ]"#;
    let set = read_json(data.as_bytes()).unwrap();
    assert_eq!(set.records.len(), 3);
    assert_eq!(set.records[1].sub_score, 22.0);
    assert_eq!(set.records[2].score, None);
    assert_eq!(set.discarded, 2);
    assert!(set.entities.contains("beta"));
}

#[test]
fn json_row_with_numeric_date_is_discarded_alone() {
    let data = r#"[
        {"date": "2023-02-01", "name": "A", "tier": "Gold I", "lp": 10},
        {"date": 20230202, "name": "B", "tier": "Gold I", "lp": 10},
        {"date": "2023-02-03", "name": 7, "tier": ["Gold I"], "lp": 10},
        {"date": "2023-02-04", "name": "C", "tier": {"t": 1}, "lp": 10}
    ]"#;
    let set = read_json(data.as_bytes()).unwrap();
    assert_eq!(set.records.len(), 2);
    assert_eq!(set.records[0].entity, "A");
    assert_eq!(set.records[1].entity, "C");
    assert_eq!(set.records[1].score, None);
    assert_eq!(set.discarded, 2);
    assert!(set.entities.contains("B"));
}

#[test]
fn csv_row_with_invalid_utf8_date_is_discarded_alone() {
    let mut data = b"date,name,tier,lp\n2023-02-01,A,Gold I,10\n".to_vec();
    data.extend_from_slice(b"2023-02-\xff,B,Gold I,10\n");
    data.extend_from_slice(b"2023-02-03,A,Gold I,20\n");
    let set = read_csv(data.as_slice()).unwrap();
    assert_eq!(set.records.len(), 2);
    assert_eq!(set.discarded, 1);
    assert!(set.entities.contains("B"));
    assert_eq!(set.records[1].sub_score, 20.0);
}

#[test]
fn csv_row_with_invalid_utf8_name_keeps_a_lossy_name() {
    let mut data = b"date,name,tier,lp\n".to_vec();
    data.extend_from_slice(b"2023-02-01,b\xffd,Gold I,10\n");
    data.extend_from_slice(b"2023-02-01,A,Gold I,10\n");
    let set = read_csv(data.as_slice()).unwrap();
    assert_eq!(set.records.len(), 2);
    assert_eq!(set.discarded, 0);
    assert_eq!(set.records[0].entity, "b\u{FFFD}d");
}

#[test]
fn csv_header_is_matched_by_name_and_case() {
    let data = "LP,Tier,Name,Date\n\
                12,Gold I,alpha,2023-03-01\n\
                5,Silver II,beta\n";
    let set = read_csv(data.as_bytes()).unwrap();
    assert_eq!(set.records.len(), 1);
    assert_eq!(set.records[0].entity, "alpha");
    assert_eq!(set.records[0].sub_score, 12.0);
    // Short row: no date field.
    assert_eq!(set.discarded, 1);
    assert!(set.entities.contains("beta"));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = read_json("{".as_bytes()).unwrap_err();
    assert!(matches!(err, RaceError::Serde(_)));
}

#[test]
fn missing_file_is_an_ingest_error() {
    let err = read_path(Path::new("definitely/not/here.csv")).unwrap_err();
    assert!(matches!(err, RaceError::Ingest(_)));
}

#[test]
fn read_paths_merges_and_cleans() {
    let dir = std::env::temp_dir().join(format!("rankrace-ingest-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let csv_path = dir.join("a.csv");
    let json_path = dir.join("b.json");
    std::fs::write(
        &csv_path,
        "date,name,tier,lp\n2023-03-01,alpha,Gold I,10\n2023-03-01,alpha,Iron IV,0\n",
    )
    .unwrap();
    std::fs::write(
        &json_path,
        r#"[{"date": "2023-03-02", "name": "beta", "tier": "Silver I", "lp": 5}]"#,
    )
    .unwrap();

    let raw = read_paths(&[&csv_path, &json_path], false).unwrap();
    assert_eq!(raw.records.len(), 3);
    let cleaned = read_paths(&[&csv_path, &json_path], true).unwrap();
    assert_eq!(cleaned.records.len(), 2);
    assert_eq!(cleaned.entities.len(), 2);

    let _ = std::fs::remove_dir_all(&dir);
}
