//! Statistical randomness tests for binary and decimal sequences.
//!
//! Provides the five basic tests of Menezes et al. (Handbook of Applied
//! Cryptography, §5.4.4) for bits, their decimal-digit analogues, and the
//! FIPS 140-1 fixed-threshold profile. Each test is a pure function from a
//! [`Sequence`] (plus parameters) to a [`TestResult`] carrying the statistic
//! and a [`Status`].
//!
//! ```
//! use rngtest_core::{Domain, parse_sequence};
//! use rngtest_tests::{Status, binary};
//!
//! let seq = parse_sequence(Domain::Binary, &"1110001100010001010011101111001001001001".repeat(4)).unwrap();
//! let result = binary::frequency(&seq, 0.05);
//! assert!((result.statistic - 0.4).abs() < 1e-12);
//! assert_eq!(result.status, Status::Pass);
//! ```

pub mod binary;
pub mod decimal;
pub mod distribution;
pub mod fips;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use distribution::{
    chi_square_critical, chi_square_tail, normal_critical, normal_tail_probability,
};
pub use rngtest_core::{Domain, FIPS_LENGTH, Sequence};

// ═══════════════════════════════════════════════════════════════════════════════
// Core types
// ═══════════════════════════════════════════════════════════════════════════════

/// Outcome of a single test invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Pass,
    Fail,
    /// The block length leaves too few blocks (or run-length classes) for
    /// the chi-square approximation to hold.
    ErrorBlockSizeTooLarge,
    /// The autocorrelation lag exceeds half the sequence length.
    ErrorLagTooLarge,
}

/// Display labels, indexed by `Status as usize`.
pub const STATUS_LABELS: [&str; 4] = [
    "Passed",
    "Failed",
    "Error: block size too large",
    "Error: lag too large",
];

impl Status {
    pub fn label(self) -> &'static str {
        STATUS_LABELS[self as usize]
    }

    pub fn is_error(self) -> bool {
        matches!(self, Self::ErrorBlockSizeTooLarge | Self::ErrorLagTooLarge)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of a single randomness test.
///
/// `statistic` is chi-square distributed, normally distributed, or a literal
/// count depending on the test. Error results carry `+∞`; results that could
/// not be evaluated (zero variance, short FIPS sample) carry NaN and fail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TestResult {
    pub name: &'static str,
    pub statistic: f64,
    pub status: Status,
}

impl TestResult {
    pub fn new(name: &'static str, statistic: f64, status: Status) -> Self {
        Self {
            name,
            statistic,
            status,
        }
    }

    /// Short-circuit result for a failed precondition.
    pub fn error(name: &'static str, status: Status) -> Self {
        Self::new(name, f64::INFINITY, status)
    }

    pub fn passed(&self) -> bool {
        self.status == Status::Pass
    }
}

/// Caller-selected parameters for the basic and decimal batteries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestParams {
    /// Significance level, in (0, 1).
    pub alpha: f64,
    /// Poker test block length `m`.
    pub block_size: usize,
    /// Autocorrelation lag `d`.
    pub lag: usize,
}

impl Default for TestParams {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            block_size: 3,
            lag: 8,
        }
    }
}

impl TestParams {
    /// Load parameters from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str::<Self>(&raw).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("failed to parse test parameters: {e}"),
            )
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════════════

/// Pass when `statistic` lies strictly below `critical`. A missing critical
/// value or a NaN statistic fails.
fn below(statistic: f64, critical: Option<f64>) -> Status {
    match critical {
        Some(c) if statistic < c => Status::Pass,
        _ => Status::Fail,
    }
}

/// Two-sided normal decision: pass when `|z| < z_{1-alpha/2}`.
fn within_normal(z: f64, alpha: f64) -> Status {
    if z.abs() < normal_critical(1.0 - alpha / 2.0) {
        Status::Pass
    } else {
        Status::Fail
    }
}

fn sum_of_squares(counts: &[u64]) -> f64 {
    counts.iter().map(|&c| (c as f64) * (c as f64)).sum()
}

/// Shared poker statistic for any alphabet: split into `k = N / m`
/// non-overlapping blocks, read each as an `m`-digit base-`radix` number, and
/// return `radix^m / k * Σ n_i² - k` with `radix^m - 1` degrees of freedom.
///
/// `None` when `k < 5 * radix^m` (including `m == 0` and overflowing sizes).
fn poker_statistic(symbols: &[u8], radix: usize, m: usize) -> Option<(f64, usize)> {
    if m == 0 {
        return None;
    }
    let categories = u32::try_from(m)
        .ok()
        .and_then(|exp| radix.checked_pow(exp))?;
    let k = symbols.len() / m;
    if k < categories.checked_mul(5)? {
        return None;
    }

    let mut counts = vec![0u64; categories];
    for block in symbols.chunks_exact(m) {
        let value = block
            .iter()
            .fold(0usize, |acc, &s| acc * radix + s as usize);
        counts[value] += 1;
    }

    let x = categories as f64 / k as f64 * sum_of_squares(&counts) - k as f64;
    Some((x, categories - 1))
}

/// Length of every maximal run, paired with its symbol, in order. The final
/// run of the sequence is included.
fn runs(symbols: &[u8]) -> impl Iterator<Item = (u8, usize)> + '_ {
    symbols
        .chunk_by(|a, b| a == b)
        .map(|run| (run[0], run.len()))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Test batteries
// ═══════════════════════════════════════════════════════════════════════════════

/// Run the five basic binary tests in order: frequency, serial, poker, runs,
/// autocorrelation.
pub fn run_binary_tests(seq: &Sequence, params: &TestParams) -> Vec<TestResult> {
    vec![
        binary::frequency(seq, params.alpha),
        binary::serial(seq, params.alpha),
        binary::poker(seq, params.block_size, params.alpha),
        binary::runs(seq, params.alpha),
        binary::autocorrelation(seq, params.lag, params.alpha),
    ]
}

/// Run the five decimal tests in the same order as the binary battery.
pub fn run_decimal_tests(seq: &Sequence, params: &TestParams) -> Vec<TestResult> {
    vec![
        decimal::frequency(seq, params.alpha),
        decimal::serial(seq, params.alpha),
        decimal::poker(seq, params.block_size, params.alpha),
        decimal::runs(seq, params.alpha),
        decimal::autocorrelation(seq, params.lag, params.alpha),
    ]
}

/// Run the FIPS 140-1 profile: monobit, poker, runs, long run.
pub fn run_fips_tests(seq: &Sequence) -> Vec<TestResult> {
    vec![
        fips::monobit(seq),
        fips::poker(seq),
        fips::runs(seq),
        fips::long_run(seq),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels() {
        assert_eq!(Status::Pass.to_string(), "Passed");
        assert_eq!(Status::Fail.to_string(), "Failed");
        assert_eq!(
            Status::ErrorBlockSizeTooLarge.label(),
            "Error: block size too large"
        );
        assert_eq!(Status::ErrorLagTooLarge.label(), "Error: lag too large");
        assert!(Status::ErrorLagTooLarge.is_error());
        assert!(!Status::Fail.is_error());
    }

    #[test]
    fn test_error_result_is_infinite() {
        let r = TestResult::error("Poker", Status::ErrorBlockSizeTooLarge);
        assert_eq!(r.statistic, f64::INFINITY);
        assert!(!r.passed());
    }

    #[test]
    fn test_default_params() {
        let p = TestParams::default();
        assert_eq!(p.alpha, 0.05);
        assert_eq!(p.block_size, 3);
        assert_eq!(p.lag, 8);
    }

    #[test]
    fn test_params_partial_json() {
        let p: TestParams = serde_json::from_str(r#"{"alpha": 0.01}"#).unwrap();
        assert_eq!(p.alpha, 0.01);
        assert_eq!(p.block_size, 3);
        assert_eq!(p.lag, 8);
    }

    #[test]
    fn test_below() {
        assert_eq!(below(1.0, Some(3.84)), Status::Pass);
        assert_eq!(below(3.84, Some(3.84)), Status::Fail);
        assert_eq!(below(f64::NAN, Some(3.84)), Status::Fail);
        assert_eq!(below(0.0, None), Status::Fail);
    }

    #[test]
    fn test_within_normal_is_two_sided() {
        assert_eq!(within_normal(1.5, 0.05), Status::Pass);
        assert_eq!(within_normal(-1.5, 0.05), Status::Pass);
        assert_eq!(within_normal(2.5, 0.05), Status::Fail);
        assert_eq!(within_normal(-2.5, 0.05), Status::Fail);
        assert_eq!(within_normal(f64::NAN, 0.05), Status::Fail);
    }

    #[test]
    fn test_runs_includes_final_run() {
        let collected: Vec<_> = runs(&[1, 1, 0, 1, 1, 1]).collect();
        assert_eq!(collected, vec![(1, 2), (0, 1), (1, 3)]);
        assert_eq!(runs(&[]).count(), 0);
    }

    #[test]
    fn test_poker_statistic_guards() {
        assert!(poker_statistic(&[0; 100], 2, 0).is_none());
        // k = 13 blocks of 3 < 5 * 8
        assert!(poker_statistic(&[0; 40], 2, 3).is_none());
        assert!(poker_statistic(&[0; 100], 10, 64).is_none());
        let (x, df) = poker_statistic(&[0, 1].repeat(60), 2, 3).unwrap();
        assert_eq!(df, 7);
        assert!(x > 0.0);
    }
}
