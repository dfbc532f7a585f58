use std::time::Instant;

use tracing::{info, warn};

/// Runs slower than this are logged as a warning.
pub const SLOW_RUN_MS: u64 = 1000;

/// Runs `f` and logs how long it took.
pub fn run_timed<F, T>(name: &str, f: F) -> T
where
    F: FnOnce() -> T,
{
    info!(task = name, "running");

    let start = Instant::now();
    let value = f();
    let elapsed_ms = start.elapsed().as_millis() as u64;

    if elapsed_ms > SLOW_RUN_MS {
        warn!(task = name, elapsed_ms, "finished slowly");
    } else {
        info!(task = name, elapsed_ms, "finished");
    }

    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_the_closure_value() {
        assert_eq!(run_timed("answer", || 6 * 7), 42);
    }

    #[test]
    fn propagates_errors_unchanged() {
        let result: Result<(), String> = run_timed("failing", || Err("boom".to_string()));
        assert_eq!(result, Err("boom".to_string()));
    }
}
