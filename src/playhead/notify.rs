/// Real-time countdown for the era-entry notification.
///
/// Runs on wall-clock deltas only. The controller stops feeding it while a snap pause is
/// active, so a notification cannot expire behind the pause caption.
#[derive(Clone, Debug, PartialEq)]
pub struct NotificationTimer {
    duration_ms: f64,
    fade_ms: f64,
    remaining_ms: f64,
    message: Option<String>,
}

/// A visible notification and its current opacity.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Notification {
    pub message: String,
    /// 1 until the trailing fade window, then ramps linearly to 0.
    pub opacity: f64,
}

impl NotificationTimer {
    pub fn new(duration_ms: f64, fade_ms: f64) -> Self {
        Self {
            duration_ms,
            fade_ms: fade_ms.min(duration_ms),
            remaining_ms: 0.0,
            message: None,
        }
    }

    /// (Re)start the countdown with a new message.
    pub fn start(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.remaining_ms = self.duration_ms;
    }

    pub fn tick(&mut self, delta_ms: f64) {
        if self.message.is_none() {
            return;
        }
        self.remaining_ms -= delta_ms;
        if self.remaining_ms <= 0.0 {
            self.clear();
        }
    }

    pub fn clear(&mut self) {
        self.message = None;
        self.remaining_ms = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.message.is_some()
    }

    pub fn remaining_ms(&self) -> f64 {
        self.remaining_ms
    }

    pub fn current(&self) -> Option<Notification> {
        let message = self.message.clone()?;
        let opacity = if self.fade_ms <= 0.0 {
            1.0
        } else {
            (self.remaining_ms / self.fade_ms).clamp(0.0, 1.0)
        };
        Some(Notification { message, opacity })
    }
}
