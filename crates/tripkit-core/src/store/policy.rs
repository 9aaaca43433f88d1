// ── Cache-validity policy ──
//
// A category's cache is trusted for `max_age` after its last successful
// fetch. Everything here is pure so the freshness rule is testable
// without a clock.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Five minutes, the default trust window.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(300);

/// Tuning for when a cached list may be served without a network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub max_age: Duration,
    /// Treat a freshly fetched empty list as a valid hit. When `false` an
    /// empty list always triggers a refetch.
    pub cache_empty_results: bool,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            max_age: DEFAULT_MAX_AGE,
            cache_empty_results: true,
        }
    }
}

impl CachePolicy {
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Whether a timestamp taken at `stamped` is still inside the window.
    pub fn is_fresh(&self, stamped: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        is_fresh(stamped, now, self.max_age)
    }
}

/// `now - stamped < max_age`. Timestamps in the future count as fresh.
pub fn is_fresh(stamped: DateTime<Utc>, now: DateTime<Utc>, max_age: Duration) -> bool {
    let Ok(max_age) = chrono::Duration::from_std(max_age) else {
        return true;
    };
    now.signed_duration_since(stamped) < max_age
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn fresh_inside_window() {
        assert!(is_fresh(at(0), at(299), DEFAULT_MAX_AGE));
    }

    #[test]
    fn stale_at_exact_boundary() {
        assert!(!is_fresh(at(0), at(300), DEFAULT_MAX_AGE));
        assert!(!is_fresh(at(0), at(301), DEFAULT_MAX_AGE));
    }

    #[test]
    fn zero_max_age_is_never_fresh() {
        assert!(!is_fresh(at(0), at(0), Duration::ZERO));
    }

    #[test]
    fn default_policy_caches_empty_results() {
        let policy = CachePolicy::default();
        assert_eq!(policy.max_age, Duration::from_secs(300));
        assert!(policy.cache_empty_results);
    }
}
