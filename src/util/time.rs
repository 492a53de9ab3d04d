use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Time since the UNIX epoch, zero if the clock is before it
pub fn since_epoch() -> Duration {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
}

/// Milliseconds since the UNIX epoch, used to name exported files
pub fn timestamp_millis() -> u128 {
    since_epoch().as_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_is_monotonic_enough() {
        let a = timestamp_millis();
        let b = timestamp_millis();
        assert!(a > 0);
        assert!(b >= a);
    }
}
