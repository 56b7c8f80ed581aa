//! Progress output for long running tests

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering::Relaxed;

/// Percentage output on stderr, shareable between worker threads
///
/// Only enabled if the environment variable `SEGTREE2D_TESTING_PROGRESS` is
/// set to a non-empty value other than `0`.
pub struct Progress {
    label: &'static str,
    enabled: bool,
    current: AtomicU64,
    total: u64,
}

impl Progress {
    /// Start reporting progress for `total` steps
    pub fn new(label: &'static str, total: u64) -> Self {
        assert_ne!(total, 0);
        let enabled = std::env::var("SEGTREE2D_TESTING_PROGRESS")
            .is_ok_and(|v| !v.is_empty() && v != "0");
        if enabled {
            eprint!("\r{label}: 0 %");
        }
        Self {
            label,
            enabled,
            current: AtomicU64::new(0),
            total,
        }
    }

    /// Advance by one step
    pub fn step(&self) {
        let current = self.current.fetch_add(1, Relaxed) + 1;
        if !self.enabled {
            return;
        }
        // print whenever a new percentage is reached
        let percent = current * 100 / self.total;
        if percent != (current - 1) * 100 / self.total {
            eprint!("\r{}: {percent} %", self.label);
            std::io::Write::flush(&mut std::io::stderr()).unwrap();
        }
    }

    /// Finish progress reporting
    ///
    /// Panics if the number of steps does not match the announced total.
    pub fn done(self) {
        if self.enabled {
            eprintln!();
        }
        let current = self.current.into_inner();
        assert_eq!(
            current, self.total,
            "{}: expected {} steps, got {current}",
            self.label, self.total
        );
    }
}
