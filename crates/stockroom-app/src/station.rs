//! Rotating station PIN
//!
//! Kiosk stations unlock with a short-lived numeric PIN. The PIN is a
//! pure function of the configured secret and the current rotation
//! window, so every API instance hands out the same digits without
//! coordination.

use chrono::{DateTime, Duration, TimeZone, Utc};
use sha2::{Digest, Sha256};

/// PIN for the window containing `now`, plus when it expires.
pub fn station_pin(
    secret: &str,
    rotate_minutes: i64,
    now: DateTime<Utc>,
) -> (String, DateTime<Utc>) {
    let rotate_minutes = rotate_minutes.max(1);
    let window = now.timestamp().div_euclid(rotate_minutes * 60);

    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(window.to_be_bytes());
    let digest = hasher.finalize();
    let value = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    let pin = format!("{:04}", value % 10_000);

    let expires_at = Utc
        .timestamp_opt((window + 1) * rotate_minutes * 60, 0)
        .single()
        .unwrap_or(now + Duration::minutes(rotate_minutes));
    (pin, expires_at)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_within_a_window_and_rotates_across() {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let (pin_a, expires) = station_pin("secret", 60, start);
        let (pin_b, _) = station_pin("secret", 60, start + Duration::minutes(30));
        assert_eq!(pin_a, pin_b);
        assert_eq!(pin_a.len(), 4);
        assert!(pin_a.chars().all(|c| c.is_ascii_digit()));
        assert!(expires > start);

        let (pin_next, _) = station_pin("secret", 60, expires + Duration::seconds(1));
        assert_ne!(pin_a, pin_next);
    }

    #[test]
    fn different_secrets_give_different_pins() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let (a, _) = station_pin("secret-a", 60, now);
        let (b, _) = station_pin("secret-b", 60, now);
        assert_ne!(a, b);
    }
}
