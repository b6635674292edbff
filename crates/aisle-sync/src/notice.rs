//! Transient user notices.

use std::time::{Duration, Instant};

/// How long a notice stays visible.
pub const NOTICE_TTL: Duration = Duration::from_secs(2);

/// A short-lived confirmation message ("Changes saved!"). Expiry is
/// checked on read, so no timer task is needed.
#[derive(Debug, Clone)]
pub struct Notice {
    message: String,
    posted: Instant,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            posted: Instant::now(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_expired(&self) -> bool {
        self.posted.elapsed() >= NOTICE_TTL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_notice_is_visible() {
        let notice = Notice::new("Changes saved!");
        assert!(!notice.is_expired());
        assert_eq!(notice.message(), "Changes saved!");
    }

    #[test]
    fn notice_expires_after_its_ttl() {
        let posted = Instant::now().checked_sub(NOTICE_TTL).unwrap();
        let notice = Notice {
            message: "Changes saved!".to_string(),
            posted,
        };
        assert!(notice.is_expired());
    }

    #[test]
    fn notice_stays_visible_just_under_the_ttl() {
        let posted = Instant::now()
            .checked_sub(NOTICE_TTL - Duration::from_millis(500))
            .unwrap();
        let notice = Notice {
            message: "Changes saved!".to_string(),
            posted,
        };
        assert!(!notice.is_expired());
    }
}
