use std::time::{Duration, Instant};

pub const ERROR_TOAST_LIFETIME: Duration = Duration::from_secs(3);

/// A transient, auto-dismissing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub lifetime: Duration,
}

impl Toast {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            lifetime: ERROR_TOAST_LIFETIME,
        }
    }
}

/// Toasts currently on screen, each dropped once its lifetime elapses.
#[derive(Debug, Default)]
pub struct ToastBoard {
    shown: Vec<(Instant, Toast)>,
}

impl ToastBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, toast: Toast, now: Instant) {
        self.shown.push((now, toast));
    }

    /// Removes expired toasts and returns them, oldest first.
    pub fn prune(&mut self, now: Instant) -> Vec<Toast> {
        let (expired, kept): (Vec<_>, Vec<_>) = self
            .shown
            .drain(..)
            .partition(|(shown_at, toast)| now.saturating_duration_since(*shown_at) >= toast.lifetime);
        self.shown = kept;
        expired.into_iter().map(|(_, toast)| toast).collect()
    }

    pub fn visible(&self, now: Instant) -> impl Iterator<Item = &Toast> {
        self.shown
            .iter()
            .filter(move |(shown_at, toast)| now.saturating_duration_since(*shown_at) < toast.lifetime)
            .map(|(_, toast)| toast)
    }

    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }
}
