//! Domain records persisted in the key/value store.
//!
//! Every struct serializes with camelCase field names; that JSON is the
//! persisted layout of each collection. Optional and flag fields default when
//! absent so older records still load.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use parkr_shared::codes::new_record_id;
use parkr_shared::types::{BookingStatus, Language, PropertyCategory, UserRole};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// Email equality ignoring case, including non-ASCII letters.
pub(crate) fn same_email(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// A marketplace account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    /// Natural dedup key, compared case-insensitively.
    pub email: String,
    /// bcrypt hash; never the plaintext password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(rename = "type")]
    pub role: UserRole,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub strikes: u32,
    #[serde(default)]
    pub is_suspended: bool,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub language: Language,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub mfa_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active: Option<DateTime<Utc>>,

    // Corporate accounts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_corporate: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_role: Option<String>,
}

impl User {
    /// A fresh, unverified account with no strikes.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            password_hash: None,
            role,
            verified: false,
            strikes: 0,
            is_suspended: false,
            is_deleted: false,
            avatar: None,
            language: Language::default(),
            created_at: Utc::now(),
            mfa_enabled: false,
            last_active: None,
            is_corporate: None,
            company_name: None,
            company_id: None,
            company_role: None,
        }
    }

    /// Whether `other` is the same account: same id, or same non-empty email
    /// ignoring case.
    pub fn matches(&self, other: &User) -> bool {
        self.id == other.id
            || (!self.email.is_empty()
                && !other.email.is_empty()
                && same_email(&self.email, &other.email))
    }

    /// Overlay `incoming` onto this record. Present values win; optional
    /// fields the caller left empty keep their stored value.
    pub fn merge_from(&mut self, incoming: User) {
        self.id = incoming.id;
        self.name = incoming.name;
        self.email = incoming.email;
        self.role = incoming.role;
        self.verified = incoming.verified;
        self.strikes = incoming.strikes;
        self.is_suspended = incoming.is_suspended;
        self.is_deleted = incoming.is_deleted;
        self.language = incoming.language;
        self.created_at = incoming.created_at;
        self.mfa_enabled = incoming.mfa_enabled;

        overlay(&mut self.password_hash, incoming.password_hash);
        overlay(&mut self.avatar, incoming.avatar);
        overlay(&mut self.last_active, incoming.last_active);
        overlay(&mut self.is_corporate, incoming.is_corporate);
        overlay(&mut self.company_name, incoming.company_name);
        overlay(&mut self.company_id, incoming.company_id);
        overlay(&mut self.company_role, incoming.company_role);
    }
}

fn overlay<T>(slot: &mut Option<T>, incoming: Option<T>) {
    if incoming.is_some() {
        *slot = incoming;
    }
}

// ---------------------------------------------------------------------------
// Pending account
// ---------------------------------------------------------------------------

/// An account pre-provisioned by an operator, redeemable once by code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PendingAccount {
    pub code: String,
    pub email: String,
    pub name: String,
    #[serde(rename = "type")]
    pub role: UserRole,
    pub created_by: String,
}

// ---------------------------------------------------------------------------
// Parking space
// ---------------------------------------------------------------------------

/// A listed space owned by a host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSpace {
    pub id: String,
    pub owner_id: String,
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub category: PropertyCategory,
    pub hourly_rate: f64,
    #[serde(default = "default_capacity")]
    pub capacity: u32,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lng: f64,
    #[serde(default)]
    pub features: Vec<String>,
    /// References to uploaded media (URLs or data URIs).
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_live: bool,
    #[serde(default)]
    pub access_instructions: String,
    #[serde(default)]
    pub instant_book: bool,
}

fn default_capacity() -> u32 {
    1
}

// ---------------------------------------------------------------------------
// Booking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub space_id: String,
    pub parker_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub total_cost: f64,
    pub platform_fee: f64,
    pub host_earnings: f64,
    pub status: BookingStatus,
    /// Simulated payment hold reference.
    #[serde(
        default,
        rename = "stripePaymentIntentId",
        alias = "paymentIntentId",
        skip_serializing_if = "Option::is_none"
    )]
    pub payment_intent_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub access_code: String,
    /// Address snapshot taken when the booking was made.
    pub full_address: String,
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

/// A chat line scoped to one booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub booking_id: String,
    pub sender_id: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_flagged: bool,
}

/// A chat line held back by moderation, kept for admin review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FlaggedMessage {
    #[serde(flatten)]
    pub message: Message,
    pub reason: String,
    pub censored_text: String,
    pub recipient_id: String,
}

// ---------------------------------------------------------------------------
// Inbox
// ---------------------------------------------------------------------------

/// Simulated e-mail delivered to the in-app inbox.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SystemMessage {
    pub id: String,
    pub to: String,
    pub subject: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

// ---------------------------------------------------------------------------
// Audit log
// ---------------------------------------------------------------------------

/// Immutable record of an administrative or security-relevant action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub action: String,
    pub details: String,
    /// Who performed the action.
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl AuditLog {
    /// New entry stamped with a fresh id and the current time.
    pub fn new(action: &str, details: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            id: new_record_id(),
            timestamp: Utc::now(),
            action: action.to_string(),
            details: details.into(),
            user_id: user_id.into(),
            target_id: None,
            reason: None,
        }
    }

    pub fn with_target(mut self, target_id: impl Into<String>) -> Self {
        self.target_id = Some(target_id.into());
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}
