// src/utils/app_time.rs
//
// Every timer in the dashboard is a deadline compared against an `AppInstant`
// handed in by the frame loop, so native and browser builds share one clock type.

use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
pub type AppInstant = std::time::Instant;

#[cfg(target_arch = "wasm32")]
pub type AppInstant = web_time::Instant;

#[cfg(not(target_arch = "wasm32"))]
pub fn now() -> AppInstant {
    std::time::Instant::now()
}

#[cfg(target_arch = "wasm32")]
pub fn now() -> AppInstant {
    web_time::Instant::now()
}

/// Shorthand used by the config tables, which are all expressed in milliseconds.
pub const fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Wall-clock label shown next to chat messages, e.g. "10:29 AM".
pub fn clock_label() -> String {
    chrono::Local::now().format("%I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_label_has_meridiem() {
        let label = clock_label();
        assert!(label.ends_with("AM") || label.ends_with("PM"), "{label}");
        assert_eq!(label.len(), 8);
    }

    #[test]
    fn ms_matches_duration() {
        assert_eq!(ms(3_000), Duration::from_secs(3));
    }
}
