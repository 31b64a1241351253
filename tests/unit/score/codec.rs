use super::*;
use crate::score::schema::SCHEMA_CUTOFF;

fn before_cutoff() -> Timestamp {
    SCHEMA_CUTOFF.add_days(-30)
}

fn after_cutoff() -> Timestamp {
    SCHEMA_CUTOFF.add_days(30)
}

#[test]
fn divisible_tier_layout() {
    let t = before_cutoff();
    // Gold = 3, II = 2.
    assert_eq!(encode("Gold II", 40.0, t), Some(3.0 * 400.0 + 200.0 + 40.0));
    assert_eq!(encode("Iron IV", 0.0, t), Some(0.0));
    assert_eq!(encode("iron iv", 0.0, t), Some(0.0));
}

#[test]
fn apex_tiers_ignore_division_and_allow_large_sub_scores() {
    let t = before_cutoff();
    // Master = 6 in the legacy list.
    assert_eq!(encode("Master", 250.0, t), Some(6.0 * 400.0 + 250.0));
    assert_eq!(encode("Master I", 250.0, t), Some(6.0 * 400.0 + 250.0));
    assert_eq!(encode("Challenger", 5000.0, t), Some(8.0 * 400.0 + 999.0));
}

#[test]
fn sub_score_is_clamped_and_non_finite_is_zero() {
    let t = before_cutoff();
    assert_eq!(encode("Gold I", 150.0, t), Some(1200.0 + 300.0 + 99.0));
    assert_eq!(encode("Gold I", -5.0, t), Some(1200.0 + 300.0));
    assert_eq!(encode("Gold I", f64::NAN, t), Some(1500.0));
    assert_eq!(encode("Gold I", f64::INFINITY, t), Some(1500.0));
}

#[test]
fn missing_or_unknown_division_defaults_to_lowest() {
    let t = before_cutoff();
    assert_eq!(encode("Silver", 10.0, t), encode("Silver IV", 10.0, t));
    assert_eq!(encode("Silver V", 10.0, t), encode("Silver IV", 10.0, t));
}

#[test]
fn unknown_or_blank_labels_are_absent() {
    let t = before_cutoff();
    assert_eq!(encode("", 10.0, t), None);
    assert_eq!(encode("   ", 10.0, t), None);
    assert_eq!(encode("Wood III", 10.0, t), None);
    assert_eq!(encode("Unranked", 0.0, t), None);
}

#[test]
fn emerald_only_exists_after_cutoff() {
    assert_eq!(encode("Emerald II", 10.0, before_cutoff()), None);
    assert_eq!(
        encode("Emerald II", 10.0, after_cutoff()),
        Some(5.0 * 400.0 + 200.0 + 10.0)
    );
    // Diamond moves up one band in the current schema.
    assert_eq!(
        encode("Diamond IV", 0.0, after_cutoff()).unwrap()
            - encode("Diamond IV", 0.0, before_cutoff()).unwrap(),
        400.0
    );
}

#[test]
fn decode_inverts_encode_under_same_schema() {
    for t in [before_cutoff(), after_cutoff()] {
        let schema = TierSchema::at(t);
        for &tier in schema.tiers() {
            for div in DIVISIONS {
                for sub in [0.0, 37.0, 99.0] {
                    let label = format!("{tier} {div}");
                    let score = encode(&label, sub, t).unwrap();
                    let back = decode(score, t);
                    assert_eq!(back.tier, tier);
                    if back.division.is_some() {
                        assert_eq!(back.division, Some(div));
                    }
                    assert_eq!(back.sub_score, sub);
                }
            }
        }
    }
}

#[test]
fn encode_is_strictly_monotonic_in_rank_order() {
    let t = after_cutoff();
    let schema = TierSchema::at(t);
    let mut prev = f64::NEG_INFINITY;
    for &tier in schema.tiers() {
        let divs: &[&str] = if schema.has_divisions(schema.tier_index(tier).unwrap()) {
            &DIVISIONS
        } else {
            &[""]
        };
        for div in divs {
            for sub in [0.0, 1.0, 50.0, 99.0] {
                let score = encode(&format!("{tier} {div}"), sub, t).unwrap();
                assert!(score > prev, "{tier} {div} {sub}: {score} <= {prev}");
                prev = score;
            }
        }
    }
}

#[test]
fn decode_clamps_out_of_range_scores() {
    let t = before_cutoff();
    let low = decode(-50.0, t);
    assert_eq!((low.tier, low.division, low.sub_score), ("Iron", Some("IV"), 0.0));
    let high = decode(1.0e9, t);
    assert_eq!(high.tier, "Challenger");
    assert_eq!(high.division, None);
    assert_eq!(high.sub_score, 999.0);
}

#[test]
fn decode_uses_display_time_schema() {
    // Encoded as legacy Diamond, shown after the cutoff as Emerald.
    let score = encode("Diamond II", 20.0, before_cutoff()).unwrap();
    assert_eq!(decode(score, before_cutoff()).tier, "Diamond");
    assert_eq!(decode(score, after_cutoff()).tier, "Emerald");
}

#[test]
fn display_formats_label() {
    let t = before_cutoff();
    assert_eq!(decode(1440.0, t).to_string(), "Gold II 40LP");
    assert_eq!(decode(6.0 * 400.0 + 12.5, t).to_string(), "Master 12LP");
}
