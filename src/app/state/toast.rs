use std::time::{Duration, Instant};

pub const TOAST_TTL: Duration = Duration::from_millis(2200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created_at: Instant,
}

impl Toast {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Info,
            created_at: Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            ..Self::info(message)
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= TOAST_TTL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry() {
        let toast = Toast::info("Saved.");
        assert!(!toast.is_expired(toast.created_at));
        assert!(!toast.is_expired(toast.created_at + Duration::from_millis(2199)));
        assert!(toast.is_expired(toast.created_at + TOAST_TTL));
        assert_eq!(Toast::error("x").kind, ToastKind::Error);
    }
}
