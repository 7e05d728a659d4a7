pub mod codes;
pub mod constants;
pub mod error;
pub mod fees;
pub mod moderation;
pub mod types;
