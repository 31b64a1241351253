use std::collections::{BTreeMap, BTreeSet};

use crate::{config::RaceConfig, foundation::math::smoothing_factor, playhead::frame::RenderFrame};

/// Independently smoothed quantity drawn for one entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Channel {
    /// Vertical slot of the bar.
    Bar,
    /// Vertical slot of the name label.
    Name,
    /// Displayed score.
    Value,
}

/// Per-entity display state that has to survive between frames.
///
/// Owned by the caller and passed into each render step. Keys are `(entity, channel)`; an
/// entity that leaves the visible set keeps its values until [`Self::retain_present`] drops
/// them.
#[derive(Clone, Debug, Default)]
pub struct SmoothingStore {
    values: BTreeMap<(String, Channel), f64>,
    present: BTreeSet<String>,
}

impl SmoothingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, entity: &str, channel: Channel) -> Option<f64> {
        self.values.get(&(entity.to_owned(), channel)).copied()
    }

    pub fn set(&mut self, entity: &str, channel: Channel, value: f64) {
        self.values.insert((entity.to_owned(), channel), value);
    }

    /// Move the stored value toward `target` and return it.
    ///
    /// A key seen for the first time snaps straight to `target`.
    pub fn approach(
        &mut self,
        entity: &str,
        channel: Channel,
        target: f64,
        k: f64,
        delta_ms: f64,
        reference_frame_ms: f64,
    ) -> f64 {
        let f = smoothing_factor(k, delta_ms, reference_frame_ms);
        let v = self
            .values
            .entry((entity.to_owned(), channel))
            .and_modify(|v| *v += (target - *v) * f)
            .or_insert(target);
        *v
    }

    /// Record the ids visible this frame and return those that were not visible last frame,
    /// in ascending order.
    pub fn begin_frame<'a>(&mut self, present: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let now: BTreeSet<String> = present.into_iter().map(str::to_owned).collect();
        let entered = now.difference(&self.present).cloned().collect();
        self.present = now;
        entered
    }

    pub fn is_present(&self, entity: &str) -> bool {
        self.present.contains(entity)
    }

    /// Forget every key whose entity is not in the current present set.
    pub fn retain_present(&mut self) {
        let present = &self.present;
        self.values.retain(|(entity, _), _| present.contains(entity));
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Smoothed axis maximum, converging on each frame's `axis_target`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisSmoother {
    value: Option<f64>,
}

impl AxisSmoother {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn approach(&mut self, target: f64, k: f64, delta_ms: f64, reference_frame_ms: f64) -> f64 {
        let next = match self.value {
            Some(v) => v + (target - v) * smoothing_factor(k, delta_ms, reference_frame_ms),
            None => target,
        };
        self.value = Some(next);
        next
    }

    pub fn reset(&mut self) {
        self.value = None;
    }
}

/// Display values for one ranked row after smoothing.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmoothedRow {
    pub entity: String,
    pub bar_slot: f64,
    pub name_slot: f64,
    pub value: f64,
    /// Entered the visible set on this frame.
    pub entered: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmoothedFrame {
    pub rows: Vec<SmoothedRow>,
    pub axis_max: f64,
}

/// Advance the smoothing state by one frame.
///
/// Exact frames (pauses, seeks, the end) snap every channel so the viewer sees the true
/// final state rather than a value still converging.
pub fn smooth_frame(
    store: &mut SmoothingStore,
    axis: &mut AxisSmoother,
    frame: &RenderFrame,
    config: &RaceConfig,
    delta_ms: f64,
) -> SmoothedFrame {
    let entered = store.begin_frame(frame.ranked.iter().map(|r| r.row.entity.as_str()));
    store.retain_present();

    let (pos_k, axis_k) = if frame.is_exact_frame {
        (1.0, 1.0)
    } else {
        (config.position_smoothing, config.axis_smoothing)
    };
    let reference = config.reference_frame_ms;

    let rows = frame
        .ranked
        .iter()
        .map(|r| {
            let id = r.row.entity.as_str();
            let slot = r.row.rank as f64;
            SmoothedRow {
                entity: id.to_owned(),
                bar_slot: store.approach(id, Channel::Bar, slot, pos_k, delta_ms, reference),
                name_slot: store.approach(id, Channel::Name, slot, pos_k, delta_ms, reference),
                value: store.approach(id, Channel::Value, r.row.score, pos_k, delta_ms, reference),
                entered: entered.binary_search_by(|e| e.as_str().cmp(id)).is_ok(),
            }
        })
        .collect();

    SmoothedFrame {
        rows,
        axis_max: axis.approach(frame.axis_target, axis_k, delta_ms, reference),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/present/smoothing.rs"]
mod tests;
