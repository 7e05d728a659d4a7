//! Chat moderation seam.
//!
//! Messages exchanged between a parker and a host pass through a
//! [`ChatModerator`] before they are stored. The only shipped implementation
//! is [`DisabledModerator`], which approves everything; a live classifier can
//! be plugged in without touching the store.

use serde::{Deserialize, Serialize};

/// Result of screening one chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationVerdict {
    pub is_flagged: bool,
    pub reason: String,
    pub censored_text: String,
}

impl ModerationVerdict {
    pub fn safe(text: &str) -> Self {
        Self {
            is_flagged: false,
            reason: "SAFE".to_string(),
            censored_text: text.to_string(),
        }
    }

    pub fn flagged(reason: impl Into<String>, censored_text: impl Into<String>) -> Self {
        Self {
            is_flagged: true,
            reason: reason.into(),
            censored_text: censored_text.into(),
        }
    }
}

pub trait ChatModerator {
    fn moderate(&self, text: &str) -> ModerationVerdict;
}

/// Moderation switched off: every message is safe and passed through.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledModerator;

impl ChatModerator for DisabledModerator {
    fn moderate(&self, text: &str) -> ModerationVerdict {
        ModerationVerdict::safe(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_moderator_passes_through() {
        let v = DisabledModerator.moderate("call me on 07700 900000");
        assert!(!v.is_flagged);
        assert_eq!(v.reason, "SAFE");
        assert_eq!(v.censored_text, "call me on 07700 900000");
    }
}
