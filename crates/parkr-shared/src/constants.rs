/// Application name
pub const APP_NAME: &str = "Parkr";

/// Storage keys, one JSON array per collection
pub const USERS_KEY: &str = "parkr_v1_users";
pub const SPACES_KEY: &str = "parkr_v1_spaces";
pub const BOOKINGS_KEY: &str = "parkr_v1_bookings";
pub const LOGS_KEY: &str = "parkr_v1_logs";
pub const SYSTEM_MESSAGES_KEY: &str = "parkr_v1_messages";
pub const CHAT_KEY: &str = "parkr_v1_chat";
pub const FLAGGED_KEY: &str = "parkr_v1_flagged";
pub const PENDING_KEY: &str = "parkr_v1_pending";

/// Every key the store may write, in a stable order.
pub const ALL_KEYS: [&str; 8] = [
    USERS_KEY,
    SPACES_KEY,
    BOOKINGS_KEY,
    LOGS_KEY,
    SYSTEM_MESSAGES_KEY,
    CHAT_KEY,
    FLAGGED_KEY,
    PENDING_KEY,
];

/// Number of audit entries retained (newest first)
pub const LOG_RETENTION: usize = 10_000;

/// Share of every booking kept by the platform
pub const PLATFORM_FEE_RATE: f64 = 0.20;

/// Strikes after which an account is suspended
pub const MAX_STRIKES: u32 = 3;

/// Length of a booking created from the marketplace, in seconds
pub const BOOKING_WINDOW_SECS: i64 = 3600;

/// Access codes are four digits, never starting with zero
pub const ACCESS_CODE_MIN: u32 = 1000;
pub const ACCESS_CODE_MAX: u32 = 9999;

/// Invite code length and alphabet (no 0/O/1/I)
pub const INVITE_CODE_LEN: usize = 8;
pub const INVITE_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Redaction placeholders
pub const REDACTED_NAME: &str = "[REDACTED - RIGHT TO BE FORGOTTEN]";
pub const REDACTED_EMAIL_DOMAIN: &str = "parkr.internal";
pub const REDACTED_CHAT_TEXT: &str = "[REDACTED - VIOLATION]";

/// Recipient id used when a flagged message was sent by the booking's parker
pub const HOST_RECIPIENT: &str = "host";

/// Actor id for entries written by the platform itself
pub const SYSTEM_ACTOR: &str = "system";

/// Audit actions
pub const ACTION_USER_REGISTERED: &str = "USER_REGISTERED";
pub const ACTION_GDPR_FORGET_ME: &str = "GDPR_FORGET_ME";
pub const ACTION_SECURITY_VIOLATION: &str = "SECURITY_VIOLATION";
pub const ACTION_DATA_PORTABILITY_EXPORT: &str = "DATA_PORTABILITY_EXPORT";
pub const ACTION_ACCOUNT_INVITED: &str = "ACCOUNT_INVITED";
