//! Performance reporting for the CLI front-end (§4.11).
//!
//! Not part of the library's `solve()` contract: [`Problem::solve`] returns a
//! [`crate::solution::Solution`] and nothing else. `SolveStats` is assembled
//! by the binary around a solve call and printed separately, the same way the
//! reference crate keeps `LpStats` as a caller-side bookkeeping struct rather
//! than threading it through the solver itself.

use std::fmt;
use std::time::Duration;

/// Wall-clock elapsed time and peak resident set size for one top-level solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveStats {
    elapsed: Duration,
    peak_rss_kb: Option<u64>,
}

impl SolveStats {
    /// Record `elapsed`, sampling peak RSS from `/proc/self/status` on Linux.
    #[must_use]
    pub fn capture(elapsed: Duration) -> Self {
        Self { elapsed, peak_rss_kb: read_peak_rss_kb() }
    }

    /// Elapsed wall-clock time of the solve.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Peak resident set size in kilobytes, if the platform exposes one.
    #[must_use]
    pub fn peak_rss_kb(&self) -> Option<u64> {
        self.peak_rss_kb
    }
}

impl fmt::Display for SolveStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "elapsed: {:.6}s", self.elapsed.as_secs_f64())?;
        match self.peak_rss_kb {
            Some(kb) => write!(f, "peak RSS: {:.2} MB", kb as f64 / 1024.0),
            None => write!(f, "peak RSS: unavailable"),
        }
    }
}

#[cfg(target_os = "linux")]
fn read_peak_rss_kb() -> Option<u64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    for line in status.lines() {
        if let Some(rest) = line.strip_prefix("VmHWM:") {
            return rest.split_whitespace().next()?.parse::<u64>().ok();
        }
    }
    None
}

#[cfg(not(target_os = "linux"))]
fn read_peak_rss_kb() -> Option<u64> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_without_rss_says_unavailable() {
        let stats = SolveStats { elapsed: Duration::from_millis(5), peak_rss_kb: None };
        assert!(stats.to_string().contains("peak RSS: unavailable"));
    }

    #[test]
    fn display_with_rss_reports_megabytes() {
        let stats = SolveStats { elapsed: Duration::from_millis(5), peak_rss_kb: Some(2048) };
        assert!(stats.to_string().contains("peak RSS: 2.00 MB"));
    }
}
