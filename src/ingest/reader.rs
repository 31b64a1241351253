use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use serde::{Deserialize, Deserializer, de};

use crate::{
    foundation::core::parse_day,
    foundation::error::{RaceError, RaceResult},
    foundation::math::finite_or_zero,
    ingest::clean::clean_record_set,
    timeline::record::{Record, RecordSet},
};

/// One input row as exported by the scraper: `date,name,tier,lp,score`.
///
/// `score` is a legacy precomputed value; it is accepted and ignored because the engine
/// derives its own score from `tier` and `lp`.
///
/// Every field is lenient: a value of the wrong type reads as missing, so one odd row is
/// discarded on its own instead of failing the file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawRow {
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_name")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub tier: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lp: f64,
}

/// Accepts numbers, numeric strings, blanks and nulls; everything unparseable becomes 0.
fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    struct Lenient;

    impl de::Visitor<'_> for Lenient {
        type Value = f64;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a number or numeric string")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(finite_or_zero(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_bool<E: de::Error>(self, _: bool) -> Result<f64, E> {
            Ok(0.0)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            Ok(parse_lp(v))
        }

        fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
            Ok(0.0)
        }

        fn visit_none<E: de::Error>(self) -> Result<f64, E> {
            Ok(0.0)
        }
    }

    d.deserialize_any(Lenient)
}

fn parse_lp(s: &str) -> f64 {
    s.trim().parse::<f64>().map(finite_or_zero).unwrap_or(0.0)
}

/// Accepts strings (and raw bytes, decoded lossily); any other value becomes `None`.
fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    struct Lenient;

    impl<'de> de::Visitor<'de> for Lenient {
        type Value = Option<String>;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a string")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_owned()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
            Ok(Some(String::from_utf8_lossy(v).into_owned()))
        }

        fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            while seq.next_element::<de::IgnoredAny>()?.is_some() {}
            Ok(None)
        }

        fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            while map
                .next_entry::<de::IgnoredAny, de::IgnoredAny>()?
                .is_some()
            {}
            Ok(None)
        }
    }

    d.deserialize_any(Lenient)
}

fn lenient_name<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    lenient_text(d).map(Option::unwrap_or_default)
}

/// Column positions of the row fields in a CSV header, matched case-insensitively.
///
/// A missing column reads as an empty field in every row.
#[derive(Debug, Default)]
struct CsvColumns {
    date: Option<usize>,
    name: Option<usize>,
    tier: Option<usize>,
    lp: Option<usize>,
}

impl CsvColumns {
    fn from_header(header: &csv::ByteRecord) -> Self {
        let mut cols = Self::default();
        for (i, field) in header.iter().enumerate() {
            let slot = match String::from_utf8_lossy(field).trim().to_ascii_lowercase().as_str() {
                "date" => &mut cols.date,
                "name" => &mut cols.name,
                "tier" => &mut cols.tier,
                "lp" => &mut cols.lp,
                _ => continue,
            };
            slot.get_or_insert(i);
        }
        cols
    }

    fn row(&self, record: &csv::ByteRecord) -> RawRow {
        // Bytes are decoded lossily so a garbled field only spoils its own row.
        let text = |col: Option<usize>| {
            col.and_then(|i| record.get(i))
                .map(|b| String::from_utf8_lossy(b).trim().to_owned())
                .filter(|s| !s.is_empty())
        };
        RawRow {
            date: text(self.date),
            name: text(self.name).unwrap_or_default(),
            tier: text(self.tier),
            lp: text(self.lp).map_or(0.0, |s| parse_lp(&s)),
        }
    }
}

/// Turn raw rows into a [`RecordSet`].
///
/// Rows with a missing or malformed date are dropped (and counted), but their entity name is
/// still registered so the entity survives with an empty timeline. Rows without a name are
/// dropped outright.
pub fn rows_to_record_set(rows: impl IntoIterator<Item = RawRow>) -> RecordSet {
    let mut set = RecordSet::default();
    for row in rows {
        let name = row.name.trim();
        if name.is_empty() {
            set.discarded += 1;
            continue;
        }
        let Some(date) = row.date.as_deref().and_then(parse_day) else {
            tracing::debug!(entity = name, date = ?row.date, "discarding row with bad date");
            set.entities.insert(name.to_owned());
            set.discarded += 1;
            continue;
        };
        let label = row.tier.as_deref().unwrap_or("").trim();
        set.push(Record::new(name, date, label, row.lp));
    }
    set
}

/// Read a headed CSV stream.
pub fn read_csv<R: Read>(r: R) -> RaceResult<RecordSet> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(r);
    let header = reader
        .byte_headers()
        .map_err(|e| RaceError::ingest(format!("csv header: {e}")))?;
    let cols = CsvColumns::from_header(header);
    let mut rows = Vec::new();
    for (i, record) in reader.byte_records().enumerate() {
        // Header is line 1.
        let record = record.map_err(|e| RaceError::ingest(format!("csv row {}: {e}", i + 2)))?;
        rows.push(cols.row(&record));
    }
    Ok(rows_to_record_set(rows))
}

/// Read a JSON array of row objects.
pub fn read_json<R: Read>(r: R) -> RaceResult<RecordSet> {
    let rows: Vec<RawRow> = serde_json::from_reader(r)
        .map_err(|e| RaceError::serde(format!("parse records JSON: {e}")))?;
    Ok(rows_to_record_set(rows))
}

/// Read one file, choosing the format by extension (`.json` or CSV otherwise).
#[tracing::instrument(skip(path), fields(path = %path.display()))]
pub fn read_path(path: &Path) -> RaceResult<RecordSet> {
    let f = File::open(path)
        .map_err(|e| RaceError::ingest(format!("open records '{}': {e}", path.display())))?;
    let r = BufReader::new(f);
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let set = if is_json { read_json(r)? } else { read_csv(r)? };
    tracing::debug!(
        records = set.records.len(),
        discarded = set.discarded,
        "read record file"
    );
    Ok(set)
}

/// Read and merge several files, then run the cleaning pipeline when `clean` is set.
pub fn read_paths<P: AsRef<Path>>(paths: &[P], clean: bool) -> RaceResult<RecordSet> {
    let mut merged = RecordSet::default();
    for p in paths {
        merged.extend(read_path(p.as_ref())?);
    }
    let merged = if clean {
        clean_record_set(merged)
    } else {
        merged
    };
    tracing::info!(
        files = paths.len(),
        entities = merged.entities.len(),
        records = merged.records.len(),
        discarded = merged.discarded,
        "records loaded"
    );
    Ok(merged)
}

#[cfg(test)]
#[path = "../../tests/unit/ingest/reader.rs"]
mod tests;
