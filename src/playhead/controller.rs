use crate::{
    config::RaceConfig,
    era::table::EraTable,
    foundation::core::{TimeWindow, Timestamp},
    foundation::error::{RaceError, RaceResult},
    foundation::math::finite_or_zero,
    playhead::frame::{FrameRow, Overlay, PlayStatus, RenderFrame},
    playhead::notify::NotificationTimer,
    ranking::rank::rank,
    schedule::pauses::{PausePoint, PauseSchedule},
    score::codec::decode,
    snapshot::engine::{Snapshot, SnapshotEngine},
    timeline::store::EntityTimelineStore,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Running,
    PausedSnap,
    Ended,
}

/// Mutable playback state. Simulated time and the two real-time countdowns (pause and
/// notification) are separate counters fed by the same tick delta.
///
/// Internal to the controller; callers observe playback only through [`RenderFrame`]s and
/// the read-only accessors on [`PlayheadController`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PlayheadState {
    pub(crate) time: Timestamp,
    pub(crate) playing: bool,
    phase: Phase,
    pub(crate) pause_remaining_ms: f64,
    /// Index of the next unconsumed pause point.
    pub(crate) next_pause: usize,
    /// Index of the pause point currently being shown.
    pub(crate) active_pause: Option<usize>,
    /// Era last announced (or started in), used for era-entry detection.
    pub(crate) era_index: Option<usize>,
    pub(crate) notification: NotificationTimer,
}

/// Drives simulated time over the timeline and emits one [`RenderFrame`] per tick.
///
/// Owns all data it reads; nothing is shared and nothing runs concurrently.
pub struct PlayheadController {
    store: EntityTimelineStore,
    eras: EraTable,
    schedule: PauseSchedule,
    config: RaceConfig,
    window: TimeWindow, // [lead-in, last record]
    speed: f64,         // simulated ms per real ms
    state: PlayheadState,
}

impl PlayheadController {
    #[tracing::instrument(skip(store, config), fields(entities = store.len()))]
    pub fn new(store: EntityTimelineStore, config: RaceConfig) -> RaceResult<Self> {
        config.validate()?;
        let eras = EraTable::new(config.eras.iter().cloned())?;
        let (Some(first), Some(last)) = (store.first_time(), store.last_time()) else {
            return Err(RaceError::validation(
                "record set must contain at least one dated record",
            ));
        };
        let start = first.add_days(-i64::from(config.lead_in_days));
        let window = TimeWindow::new(start, last)?;
        let schedule = PauseSchedule::build(&eras, &config.extra_pause_dates, start, last);
        let speed = window.span_ms() / config.playback_duration_ms;

        tracing::info!(
            start = %window.start,
            end = %window.end,
            pauses = schedule.len(),
            speed,
            "playhead ready"
        );

        let state = PlayheadState {
            time: start,
            playing: false,
            phase: Phase::Running,
            pause_remaining_ms: 0.0,
            next_pause: 0,
            active_pause: None,
            era_index: eras.index_at(start),
            notification: NotificationTimer::new(
                config.notify_duration_ms,
                config.notify_fade_ms,
            ),
        };

        Ok(Self {
            store,
            eras,
            schedule,
            config,
            window,
            speed,
            state,
        })
    }

    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    pub fn store(&self) -> &EntityTimelineStore {
        &self.store
    }

    pub fn eras(&self) -> &EraTable {
        &self.eras
    }

    pub fn schedule(&self) -> &PauseSchedule {
        &self.schedule
    }

    pub(crate) fn state(&self) -> &PlayheadState {
        &self.state
    }

    /// Playable span: lead-in instant through the last record.
    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn time(&self) -> Timestamp {
        self.state.time
    }

    pub fn status(&self) -> PlayStatus {
        match (self.state.phase, self.state.playing) {
            (Phase::Ended, _) => PlayStatus::Ended,
            (_, false) => PlayStatus::Idle,
            (Phase::Running, true) => PlayStatus::Running,
            (Phase::PausedSnap, true) => PlayStatus::PausedSnap,
        }
    }

    pub fn progress(&self) -> f64 {
        let span = self.window.span_ms();
        if span <= 0.0 {
            return 1.0;
        }
        ((self.state.time.0 - self.window.start.0) / span).clamp(0.0, 1.0)
    }

    /// Resume playback from the current instant. An ended playhead rewinds to the lead-in.
    pub fn start(&mut self) {
        if self.state.phase == Phase::Ended {
            self.reset_to(self.window.start);
            self.state.phase = Phase::Running;
        }
        self.state.playing = true;
        tracing::debug!(time = %self.state.time, "playhead started");
    }

    /// Freeze playback; a pending pause keeps its remaining time for the next `start`.
    pub fn stop(&mut self) {
        self.state.playing = false;
        tracing::debug!(time = %self.state.time, "playhead stopped");
    }

    /// Advance by `delta_ms` of real time. Returns `None` when not playing.
    pub fn tick(&mut self, delta_ms: f64) -> Option<RenderFrame> {
        if !self.state.playing {
            return None;
        }
        let delta = finite_or_zero(delta_ms).max(0.0);
        match self.state.phase {
            Phase::Ended => None,
            Phase::PausedSnap => {
                self.state.pause_remaining_ms -= delta;
                if self.state.pause_remaining_ms <= 0.0 {
                    self.state.pause_remaining_ms = 0.0;
                    self.state.active_pause = None;
                    self.state.phase = Phase::Running;
                    tracing::debug!(time = %self.state.time, "snap pause finished");
                }
                Some(self.current_frame())
            }
            Phase::Running => {
                self.step_running(delta);
                Some(self.current_frame())
            }
        }
    }

    /// Precedence: end check, era entry, pause entry, plain advance.
    fn step_running(&mut self, delta: f64) {
        self.state.notification.tick(delta);
        let advanced = self.state.time.add_millis(delta * self.speed);

        if advanced.0 >= self.window.end.0 {
            self.state.time = self.window.end;
            self.state.phase = Phase::Ended;
            self.state.playing = false;
            self.state.active_pause = None;
            tracing::debug!(time = %self.state.time, "end of data");
            return;
        }

        let era = self.eras.index_at(advanced);
        if era != self.state.era_index {
            self.state.era_index = era;
            if let Some(e) = era.and_then(|i| self.eras.get(i)) {
                self.state.notification.start(e.label.clone());
                tracing::debug!(era = %e.label, "entered era");
            }
        }

        if let Some(p) = self.schedule.get(self.state.next_pause)
            && p.time.0 <= advanced.0
        {
            self.state.time = p.time;
            self.state.phase = Phase::PausedSnap;
            self.state.pause_remaining_ms = self.config.pause_duration_ms;
            self.state.active_pause = Some(self.state.next_pause);
            self.state.next_pause += 1;
            tracing::debug!(time = %p.time, label = %p.label, reason = ?p.reason, "snap pause");
            return;
        }

        self.state.time = advanced;
    }

    /// Jump to `fraction` of the playable span and render an exact frame there.
    ///
    /// Out-of-range (or NaN) fractions are clamped. Pending pause and notification state is
    /// cleared and the pause pointer is recomputed, so seeking twice to the same place is a no-op.
    #[tracing::instrument(skip(self))]
    pub fn seek(&mut self, fraction: f64) -> RenderFrame {
        let f = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let target = self
            .window
            .start
            .add_millis(f * self.window.span_ms());
        self.reset_to(target);

        if target.0 >= self.window.end.0 {
            self.state.time = self.window.end;
            self.state.phase = Phase::Ended;
            self.state.playing = false;
            return self.current_frame();
        }

        self.state.phase = Phase::Running;
        let snapshot = SnapshotEngine::snapshot_final_in_era(&self.store, &self.eras, target);
        self.build_frame(snapshot, Overlay::None)
    }

    fn reset_to(&mut self, t: Timestamp) {
        self.state.time = t;
        self.state.next_pause = self.schedule.consumed_by(t);
        self.state.active_pause = None;
        self.state.pause_remaining_ms = 0.0;
        self.state.era_index = self.eras.index_at(t);
        self.state.notification.clear();
    }

    /// Render the current state without advancing it.
    pub fn current_frame(&self) -> RenderFrame {
        match self.state.phase {
            Phase::Ended => {
                let snapshot = self.final_snapshot();
                self.build_frame(snapshot, Overlay::None)
            }
            Phase::PausedSnap => {
                let Some(p) = self.state.active_pause.and_then(|i| self.schedule.get(i)) else {
                    return self.interpolated_frame();
                };
                let snapshot = SnapshotEngine::snapshot_final(&self.store, p.window, p.time);
                self.build_frame(snapshot, pause_caption(p))
            }
            Phase::Running => self.interpolated_frame(),
        }
    }

    fn interpolated_frame(&self) -> RenderFrame {
        let snapshot = SnapshotEngine::snapshot_at(&self.store, &self.eras, self.state.time);
        let overlay = match self.state.notification.current() {
            Some(n) => Overlay::EntryNotification(n),
            None => Overlay::None,
        };
        self.build_frame(snapshot, overlay)
    }

    /// Exact state of the era containing the last record, as of the end of that day.
    fn final_snapshot(&self) -> Snapshot<'_> {
        let end = self.window.end;
        let as_of = end.end_of_containing_day();
        match self.eras.lookup(end) {
            Some(era) => SnapshotEngine::snapshot_final(&self.store, era.window(), as_of),
            None => SnapshotEngine::snapshot_final_in_era(&self.store, &self.eras, end),
        }
    }

    fn build_frame(&self, snapshot: Snapshot<'_>, overlay: Overlay) -> RenderFrame {
        let time = self.state.time;
        let ranked: Vec<FrameRow> = rank(&snapshot, self.config.top_n)
            .into_iter()
            .map(|row| FrameRow {
                decoded: decode(row.score, time),
                row,
            })
            .collect();
        let axis_target = ranked.first().map_or(0.0, |r| r.row.score);
        RenderFrame {
            simulated_time: time,
            date: time.date(),
            progress: self.progress(),
            status: self.status(),
            era: self.eras.lookup(time).map(|e| e.label.clone()),
            ranked,
            axis_target,
            is_exact_frame: snapshot.is_exact(),
            overlay,
        }
    }
}

fn pause_caption(p: &PausePoint) -> Overlay {
    Overlay::PauseCaption {
        label: p.label.clone(),
        reason: p.reason,
        time: p.time,
        window: p.window,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playhead/controller.rs"]
mod tests;
