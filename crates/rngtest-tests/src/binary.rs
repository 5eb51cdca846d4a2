//! Five basic tests for binary sequences (Menezes et al. 1996, pp. 181-183).
//!
//! Each function expects a [`Domain::Binary`](rngtest_core::Domain) sequence.
//! Symbols outside {0, 1} are the caller's responsibility; `Sequence`
//! construction already rejects them.

use rngtest_core::{Domain, Sequence};

use crate::{
    Status, TestResult, below, chi_square_critical, poker_statistic, runs as symbol_runs,
    within_normal,
};

/// Frequency (monobit) test: `X = (n0 - n1)² / N`, one degree of freedom.
pub fn frequency(seq: &Sequence, alpha: f64) -> TestResult {
    let name = "Frequency";
    debug_assert_eq!(seq.domain(), Domain::Binary, "{name} needs a binary sequence");
    let n = seq.len();
    let n1 = seq.count_of(1) as i64;
    let n0 = n as i64 - n1;

    let diff = (n0 - n1) as f64;
    let x = diff * diff / n as f64;
    TestResult::new(name, x, below(x, chi_square_critical(alpha, 1)))
}

/// Serial (two-bit) test over the N-1 overlapping pairs, two degrees of
/// freedom.
pub fn serial(seq: &Sequence, alpha: f64) -> TestResult {
    let name = "Serial";
    debug_assert_eq!(seq.domain(), Domain::Binary, "{name} needs a binary sequence");
    let s = seq.symbols();
    let n = s.len() as f64;

    let mut singles = [0u64; 2];
    for &bit in s {
        singles[bit as usize] += 1;
    }
    let mut pairs = [0u64; 4];
    for w in s.windows(2) {
        pairs[((w[0] as usize) << 1) | w[1] as usize] += 1;
    }

    let x = 4.0 / (n - 1.0) * crate::sum_of_squares(&pairs)
        - 2.0 / n * crate::sum_of_squares(&singles)
        + 1.0;
    TestResult::new(name, x, below(x, chi_square_critical(alpha, 2)))
}

/// Poker test on non-overlapping `m`-bit blocks, `2^m - 1` degrees of
/// freedom.
///
/// Requires `N / m >= 5 * 2^m`; otherwise [`Status::ErrorBlockSizeTooLarge`].
pub fn poker(seq: &Sequence, m: usize, alpha: f64) -> TestResult {
    let name = "Poker";
    debug_assert_eq!(seq.domain(), Domain::Binary, "{name} needs a binary sequence");
    match poker_statistic(seq.symbols(), 2, m) {
        Some((x, df)) => TestResult::new(name, x, below(x, chi_square_critical(alpha, df))),
        None => TestResult::error(name, Status::ErrorBlockSizeTooLarge),
    }
}

/// Longest run length considered by [`runs`]: `floor(log2(N / 20))`, or 0
/// for sequences shorter than 40.
pub fn max_run_length(n: usize) -> usize {
    let k = (n as f64 / 20.0).log2().floor();
    if k.is_finite() && k > 0.0 { k as usize } else { 0 }
}

/// Runs test: compares the number of blocks (runs of 1s) and gaps (runs of
/// 0s) of each length `1..=k` with their expectation, `2k - 2` degrees of
/// freedom.
///
/// Runs longer than `k` are not tallied. With `k < 2` (N < 80) there are no
/// degrees of freedom left and the result is
/// [`Status::ErrorBlockSizeTooLarge`].
pub fn runs(seq: &Sequence, alpha: f64) -> TestResult {
    let name = "Runs";
    debug_assert_eq!(seq.domain(), Domain::Binary, "{name} needs a binary sequence");
    let n = seq.len();
    let k = max_run_length(n);
    if k < 2 {
        return TestResult::error(name, Status::ErrorBlockSizeTooLarge);
    }

    let mut blocks = vec![0u64; k];
    let mut gaps = vec![0u64; k];
    for (bit, len) in symbol_runs(seq.symbols()) {
        if len <= k {
            if bit == 1 {
                blocks[len - 1] += 1;
            } else {
                gaps[len - 1] += 1;
            }
        }
    }
    log::debug!("runs: k={k}, blocks={blocks:?}, gaps={gaps:?}");

    let mut x = 0.0;
    for i in 1..=k {
        let expected = expected_runs(n, i);
        let b = blocks[i - 1] as f64 - expected;
        let g = gaps[i - 1] as f64 - expected;
        x += (b * b + g * g) / expected;
    }
    TestResult::new(name, x, below(x, chi_square_critical(alpha, 2 * k - 2)))
}

/// Expected number of blocks (or gaps) of exactly length `i` in a random
/// sequence of length `n`: `(n - i + 3) / 2^(i+2)`.
fn expected_runs(n: usize, i: usize) -> f64 {
    (n as f64 - i as f64 + 3.0) / 2f64.powi(i as i32 + 2)
}

/// Autocorrelation test at lag `d`: counts positions where `s[i] != s[i+d]`
/// and normalises to `Z = 2(A - (N-d)/2) / sqrt(N-d)`. Two-sided normal
/// decision.
///
/// Requires `d <= N / 2`; otherwise [`Status::ErrorLagTooLarge`].
pub fn autocorrelation(seq: &Sequence, d: usize, alpha: f64) -> TestResult {
    let name = "Autocorrelation";
    debug_assert_eq!(seq.domain(), Domain::Binary, "{name} needs a binary sequence");
    let s = seq.symbols();
    let n = s.len();
    if d > n / 2 {
        return TestResult::error(name, Status::ErrorLagTooLarge);
    }

    let a = s.iter().zip(&s[d..]).filter(|(x, y)| x != y).count();
    let span = (n - d) as f64;
    let z = 2.0 * (a as f64 - span / 2.0) / span.sqrt();
    TestResult::new(name, z, within_normal(z, alpha))
}
