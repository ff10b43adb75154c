//! Lightweight execution timing, reported through `tracing`.

use std::time::{Duration, Instant};

/// RAII scope timer. Logs the elapsed time at debug level when dropped.
///
/// ```
/// use pipekit::timing::Stopwatch;
///
/// {
///     let _timer = Stopwatch::start("bake caches");
///     // work...
/// } // elapsed time logged here
/// ```
#[derive(Debug)]
pub struct Stopwatch {
    label: String,
    started: Instant,
}

impl Stopwatch {
    pub fn start(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Drop for Stopwatch {
    fn drop(&mut self) {
        tracing::debug!(
            label = %self.label,
            elapsed_secs = self.started.elapsed().as_secs_f64(),
            "stopwatch finished"
        );
    }
}

/// Run a closure, log how long it took, and return its result.
pub fn timed<T>(label: &str, f: impl FnOnce() -> T) -> T {
    let started = Instant::now();
    let result = f();
    tracing::debug!(
        label,
        elapsed_secs = started.elapsed().as_secs_f64(),
        "timed call finished"
    );
    result
}
