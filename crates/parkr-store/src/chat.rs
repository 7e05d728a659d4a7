//! Booking-scoped chat and moderation.
//!
//! Chat is polled: views call [`Store::get_messages`] on an interval rather
//! than receiving pushes.

use chrono::Utc;

use parkr_shared::codes::new_record_id;
use parkr_shared::constants::{
    ACTION_SECURITY_VIOLATION, CHAT_KEY, FLAGGED_KEY, HOST_RECIPIENT, REDACTED_CHAT_TEXT,
    SYSTEM_ACTOR,
};
use parkr_shared::moderation::ChatModerator;

use crate::error::Result;
use crate::models::{AuditLog, Booking, FlaggedMessage, Message, User};
use crate::store::Store;

impl Store {
    /// Messages for one booking, oldest first.
    pub fn get_messages(&self, booking_id: &str) -> Vec<Message> {
        self.collection::<Message>(CHAT_KEY)
            .into_iter()
            .filter(|m| m.booking_id == booking_id)
            .collect()
    }

    pub fn save_message(&self, message: Message) -> Result<()> {
        let mut all: Vec<Message> = self.collection(CHAT_KEY);
        all.push(message);
        self.set(CHAT_KEY, &all)
    }

    pub fn save_flagged_message(&self, message: FlaggedMessage) -> Result<()> {
        let mut all: Vec<FlaggedMessage> = self.collection(FLAGGED_KEY);
        all.push(message);
        self.set(FLAGGED_KEY, &all)
    }

    /// Everything moderation has held back, for admin review.
    pub fn get_flagged_messages(&self) -> Vec<FlaggedMessage> {
        self.collection(FLAGGED_KEY)
    }

    /// Screen and store a chat line from `sender` on `booking`.
    ///
    /// Suspended senders and blank text are refused with `None`. A flagged
    /// message is kept in full for review, audited, costs the sender a
    /// strike, and reaches the chat only as a redaction placeholder.
    pub fn send_chat_message(
        &self,
        booking: &Booking,
        sender: &User,
        text: &str,
        moderator: &dyn ChatModerator,
    ) -> Result<Option<Message>> {
        if text.trim().is_empty() || sender.is_suspended {
            return Ok(None);
        }

        let verdict = moderator.moderate(text);
        let now = Utc::now();

        if verdict.is_flagged {
            let recipient_id = if sender.id == booking.parker_id {
                HOST_RECIPIENT.to_string()
            } else {
                booking.parker_id.clone()
            };

            self.save_flagged_message(FlaggedMessage {
                message: Message {
                    id: new_record_id(),
                    booking_id: booking.id.clone(),
                    sender_id: sender.id.clone(),
                    text: text.to_string(),
                    timestamp: now,
                    is_flagged: true,
                },
                reason: verdict.reason.clone(),
                censored_text: verdict.censored_text.clone(),
                recipient_id,
            })?;

            self.add_log(
                AuditLog::new(
                    ACTION_SECURITY_VIOLATION,
                    format!("Moderation flagged message from {}: {}", sender.id, verdict.reason),
                    SYSTEM_ACTOR,
                )
                .with_target(sender.id.clone()),
            )?;

            tracing::warn!(sender = %sender.id, booking = %booking.id, reason = %verdict.reason, "chat message flagged");
            self.record_violation(&sender.id)?;
        }

        let message = Message {
            id: new_record_id(),
            booking_id: booking.id.clone(),
            sender_id: sender.id.clone(),
            text: if verdict.is_flagged {
                REDACTED_CHAT_TEXT.to_string()
            } else {
                text.to_string()
            },
            timestamp: now,
            is_flagged: verdict.is_flagged,
        };

        self.save_message(message.clone())?;
        Ok(Some(message))
    }
}
