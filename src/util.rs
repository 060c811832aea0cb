use rand::RngCore;
use time::{macros::format_description, OffsetDateTime};

/// Generates a fresh user identifier: 16 random bytes, hex-encoded to 32
/// lowercase characters. Assigned once at registration, never changed.
pub fn generate_uid() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Formats the `updated_at` column value as `YYYY-MM-DD HH:MM:SS:mmm`.
/// The colon before the milliseconds is part of the stored format.
pub fn format_updated_at(now: OffsetDateTime) -> String {
    let fmt = format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second]:[subsecond digits:3]"
    );
    // The description is static and infallible for OffsetDateTime.
    now.format(&fmt).unwrap_or_default()
}

pub fn updated_at_now() -> String {
    format_updated_at(OffsetDateTime::now_utc())
}
