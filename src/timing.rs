use std::time::Instant;

// Monotonic wall clock. Only differences between two `now()` calls are
// meaningful, matching the `clock_gettime(CLOCK_REALTIME, ...)` contract of
// the original driver (but immune to wall-clock adjustments, since
// `Instant` is backed by a monotonic clock source).
pub fn now() -> f64 {
    EPOCH.with(|epoch| epoch.elapsed().as_secs_f64())
}

thread_local! {
    static EPOCH: Instant = Instant::now();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_non_decreasing() {
        let a = now();
        let b = now();
        assert!(b >= a);
    }
}
