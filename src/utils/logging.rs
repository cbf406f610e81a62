use log::{log_enabled, trace, warn, Level};
use std::time::{Duration, Instant};

/// Logs how long a tick phase ran, at trace level, when dropped.
///
/// The clock is only read when trace logging is on.
#[must_use = "the phase is timed until the timer is dropped"]
pub struct ScopedTimer {
    phase: &'static str,
    started: Option<Instant>,
}

impl ScopedTimer {
    pub fn new(phase: &'static str) -> Self {
        let started = log_enabled!(Level::Trace).then(Instant::now);
        Self { phase, started }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        if let Some(started) = self.started {
            trace!("{}: {} µs", self.phase, started.elapsed().as_micros());
        }
    }
}

/// Warns when a tick took longer than the frame it has to fit in.
///
/// Returns whether the budget was exceeded so callers can skip or coalesce.
pub fn warn_if_tick_budget_exceeded(duration: Duration, budget_ms: f32) -> bool {
    let elapsed_ms = duration.as_secs_f32() * 1000.0;
    if elapsed_ms > budget_ms {
        warn!("tick exceeded frame budget: {elapsed_ms:.2} ms > {budget_ms:.2} ms");
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_skips_the_clock_without_a_trace_logger() {
        let timer = ScopedTimer::new("idle");
        assert!(timer.started.is_none());
    }

    #[test]
    fn budget_check_reports_overrun() {
        assert!(warn_if_tick_budget_exceeded(Duration::from_millis(12), 10.0));
        assert!(!warn_if_tick_budget_exceeded(Duration::from_millis(3), 10.0));
    }
}
