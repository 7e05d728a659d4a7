//! Identifier and code generators.

use rand::Rng;
use uuid::Uuid;

use crate::constants::{ACCESS_CODE_MAX, ACCESS_CODE_MIN, INVITE_CODE_ALPHABET, INVITE_CODE_LEN};

/// Fresh identifier for any stored record.
pub fn new_record_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Four-digit gate code handed to the parker when a booking is authorised.
pub fn access_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.gen_range(ACCESS_CODE_MIN..=ACCESS_CODE_MAX).to_string()
}

/// Uppercase invite code for pre-provisioned accounts.
pub fn invite_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..INVITE_CODE_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..INVITE_CODE_ALPHABET.len());
            INVITE_CODE_ALPHABET[idx] as char
        })
        .collect()
}
