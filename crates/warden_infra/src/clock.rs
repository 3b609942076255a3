//! Wall clock. The core takes `now_ms` as a parameter; this is the one place
//! that reads real time.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current time as epoch milliseconds. Clamps to 0 on a pre-epoch clock.
pub fn epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
