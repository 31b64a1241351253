use std::{fs::File, io::BufReader, path::Path};

use chrono::NaiveDate;

use crate::{
    era::table::{EraDef, default_era_defs},
    foundation::error::{RaceError, RaceResult},
};

/// Playback configuration. Every field has a default, so `{}` is a valid config file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    /// Rows kept after ranking.
    pub top_n: usize,
    /// Wall-clock length of the non-paused part of playback.
    pub playback_duration_ms: f64,
    /// Simulated days shown before the first record.
    pub lead_in_days: u32,
    /// Real duration of every snap pause.
    pub pause_duration_ms: f64,
    /// Fraction of the remaining row-position distance covered per reference frame.
    pub position_smoothing: f64,
    /// Fraction of the remaining axis distance covered per reference frame.
    pub axis_smoothing: f64,
    pub reference_frame_ms: f64,
    /// Pinned dates that pause playback in addition to season ends.
    pub extra_pause_dates: Vec<NaiveDate>,
    /// Lifetime of an era-entry notification.
    pub notify_duration_ms: f64,
    /// Trailing window over which the notification fades out.
    pub notify_fade_ms: f64,
    pub eras: Vec<EraDef>,
    /// Run the record cleaning pipeline at ingestion.
    pub clean_records: bool,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            playback_duration_ms: 60_000.0,
            lead_in_days: 7,
            pause_duration_ms: 2_500.0,
            position_smoothing: 0.18,
            axis_smoothing: 0.10,
            reference_frame_ms: 1000.0 / 60.0,
            extra_pause_dates: Vec::new(),
            notify_duration_ms: 2_200.0,
            notify_fade_ms: 500.0,
            eras: default_era_defs(),
            clean_records: true,
        }
    }
}

impl RaceConfig {
    pub fn from_reader<R: std::io::Read>(r: R) -> RaceResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| RaceError::serde(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> RaceResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            RaceError::config(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> RaceResult<()> {
        if self.top_n == 0 {
            return Err(RaceError::config("top_n must be > 0"));
        }
        for (name, value) in [
            ("playback_duration_ms", self.playback_duration_ms),
            ("reference_frame_ms", self.reference_frame_ms),
            ("notify_duration_ms", self.notify_duration_ms),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(RaceError::config(format!("{name} must be finite and > 0")));
            }
        }
        for (name, value) in [
            ("pause_duration_ms", self.pause_duration_ms),
            ("notify_fade_ms", self.notify_fade_ms),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RaceError::config(format!("{name} must be finite and >= 0")));
            }
        }
        if self.notify_fade_ms > self.notify_duration_ms {
            return Err(RaceError::config(
                "notify_fade_ms must be <= notify_duration_ms",
            ));
        }
        for (name, value) in [
            ("position_smoothing", self.position_smoothing),
            ("axis_smoothing", self.axis_smoothing),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(RaceError::config(format!("{name} must be in (0, 1]")));
            }
        }
        Ok(())
    }
}
