use chrono::NaiveDate;

use crate::{
    foundation::core::{TimeWindow, Timestamp},
    playhead::notify::Notification,
    ranking::rank::RankedRow,
    schedule::pauses::PauseReason,
    score::codec::DecodedRank,
};

/// Externally visible playback state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PlayStatus {
    Idle,
    Running,
    PausedSnap,
    Ended,
}

/// A ranked row plus its decoded rank label.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameRow {
    #[serde(flatten)]
    pub row: RankedRow,
    pub decoded: DecodedRank,
}

/// What to draw on top of the standings.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", content = "payload", rename_all = "camelCase")]
pub enum Overlay {
    None,
    PauseCaption {
        label: String,
        reason: PauseReason,
        time: Timestamp,
        window: TimeWindow,
    },
    EntryNotification(Notification),
}

/// Per-tick payload handed to the presentation layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFrame {
    pub simulated_time: Timestamp,
    pub date: Option<NaiveDate>,
    /// Normalized position in the playable span, `[0, 1]`.
    pub progress: f64,
    pub status: PlayStatus,
    pub era: Option<String>,
    pub ranked: Vec<FrameRow>,
    /// Largest score on screen; the axis converges toward it.
    pub axis_target: f64,
    /// Whether `ranked` comes from an exact (non-interpolated) snapshot.
    pub is_exact_frame: bool,
    pub overlay: Overlay,
}
