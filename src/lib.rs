//! Rankrace is a temporal ranking and playback engine for animated ranked-ladder races.
//!
//! Records of `(entity, day, rank label, sub-score)` are encoded into one ordered score,
//! grouped into per-entity timelines and replayed over a season (era) table:
//!
//! - Load records with [`read_paths`] and build an [`EntityTimelineStore`]
//! - Create a [`PlayheadController`] from the store and a [`RaceConfig`]
//! - Call [`PlayheadController::tick`] once per frame and draw the returned [`RenderFrame`]
//!
//! Scores never interpolate across era boundaries, and playback snaps to exact standings at
//! every season end and pinned date.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod era;
pub(crate) mod ingest;
pub(crate) mod playhead;
pub(crate) mod present;
pub(crate) mod ranking;
pub(crate) mod schedule;
pub(crate) mod score;
pub(crate) mod snapshot;
pub(crate) mod timeline;

/// Playback configuration.
pub mod config;

pub use crate::foundation::core::{DAY_MS, TimeWindow, Timestamp, parse_day};
pub use crate::foundation::error::{RaceError, RaceResult};
pub use crate::foundation::math::smoothing_factor;

pub use crate::config::RaceConfig;
pub use crate::era::table::{Era, EraDef, EraTable, default_era_defs};
pub use crate::ingest::clean::{clean_record_set, clean_timeline};
pub use crate::ingest::reader::{
    RawRow, read_csv, read_json, read_path, read_paths, rows_to_record_set,
};
pub use crate::playhead::controller::PlayheadController;
pub use crate::playhead::frame::{FrameRow, Overlay, PlayStatus, RenderFrame};
pub use crate::playhead::notify::{Notification, NotificationTimer};
pub use crate::present::smoothing::{
    AxisSmoother, Channel, SmoothedFrame, SmoothedRow, SmoothingStore, smooth_frame,
};
pub use crate::ranking::rank::{RankedRow, rank};
pub use crate::schedule::pauses::{PauseKind, PausePoint, PauseReason, PauseSchedule};
pub use crate::score::codec::{DecodedRank, decode, decode_with, encode, encode_with};
pub use crate::score::schema::{DIVISIONS, SCHEMA_CUTOFF, TierSchema};
pub use crate::snapshot::engine::{Snapshot, SnapshotEngine, SnapshotMode};
pub use crate::timeline::record::{Record, RecordSet};
pub use crate::timeline::store::EntityTimelineStore;
