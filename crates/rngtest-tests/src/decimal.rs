//! Decimal-digit analogues of the five basic tests.
//!
//! Sequences are expected to come from [`Domain::Decimal`](rngtest_core::Domain).
//! Frequency, serial, poker and autocorrelation are chi-square
//! goodness-of-fit tests over 10, 100, `10^m` and 10 categories. The runs
//! test instead counts all maximal runs and compares the total with its
//! distribution under randomness (Wald–Wolfowitz, generalised to ten
//! categories), using a two-sided normal decision.

use rngtest_core::{Domain, Sequence};

use crate::{
    Status, TestResult, below, chi_square_critical, normal_tail_probability, poker_statistic,
    runs as symbol_runs, sum_of_squares, within_normal,
};

const RADIX: usize = 10;

fn digit_counts(symbols: &[u8]) -> [u64; RADIX] {
    let mut counts = [0u64; RADIX];
    for &d in symbols {
        counts[d as usize] += 1;
    }
    counts
}

/// Frequency test: `X = 10/N · Σ n_i² - N`, nine degrees of freedom.
pub fn frequency(seq: &Sequence, alpha: f64) -> TestResult {
    let name = "Frequency (decimal)";
    debug_assert_eq!(seq.domain(), Domain::Decimal, "{name} needs a decimal sequence");
    let n = seq.len() as f64;
    let counts = digit_counts(seq.symbols());

    let x = RADIX as f64 / n * sum_of_squares(&counts) - n;
    TestResult::new(name, x, below(x, chi_square_critical(alpha, RADIX - 1)))
}

/// Serial test over the 100 ordered digit pairs, 90 degrees of freedom.
pub fn serial(seq: &Sequence, alpha: f64) -> TestResult {
    let name = "Serial (decimal)";
    debug_assert_eq!(seq.domain(), Domain::Decimal, "{name} needs a decimal sequence");
    let s = seq.symbols();
    let n = s.len() as f64;

    let singles = digit_counts(s);
    let mut pairs = [0u64; RADIX * RADIX];
    for w in s.windows(2) {
        pairs[w[0] as usize * RADIX + w[1] as usize] += 1;
    }

    let r = RADIX as f64;
    let x = r * r / (n - 1.0) * sum_of_squares(&pairs) - r / n * sum_of_squares(&singles) + 1.0;
    let df = RADIX * RADIX - RADIX;
    TestResult::new(name, x, below(x, chi_square_critical(alpha, df)))
}

/// Poker test on non-overlapping `m`-digit blocks, `10^m - 1` degrees of
/// freedom.
///
/// Requires `N / m >= 5 * 10^m`; otherwise [`Status::ErrorBlockSizeTooLarge`].
pub fn poker(seq: &Sequence, m: usize, alpha: f64) -> TestResult {
    let name = "Poker (decimal)";
    debug_assert_eq!(seq.domain(), Domain::Decimal, "{name} needs a decimal sequence");
    match poker_statistic(seq.symbols(), RADIX, m) {
        Some((x, df)) => TestResult::new(name, x, below(x, chi_square_critical(alpha, df))),
        None => TestResult::error(name, Status::ErrorBlockSizeTooLarge),
    }
}

/// Mean and variance of the total number of runs in a random arrangement of
/// a multiset with the given category counts.
fn runs_moments(counts: &[u64]) -> (f64, f64) {
    let n: f64 = counts.iter().map(|&c| c as f64).sum();
    let s2 = sum_of_squares(counts);
    let s3: f64 = counts.iter().map(|&c| (c as f64).powi(3)).sum();

    let mean = n + 1.0 - s2 / n;
    let var = (s2 * (s2 + n * (n + 1.0)) - 2.0 * n * s3 - n.powi(3)) / (n * n * (n - 1.0));
    (mean, var)
}

/// Runs test: total number of maximal runs of equal digits, standardised
/// against its mean and variance given the observed digit frequencies.
///
/// A sequence with zero run-count variance (a single repeated digit, or a
/// single symbol) cannot be evaluated and fails with a NaN statistic.
pub fn runs(seq: &Sequence, alpha: f64) -> TestResult {
    let name = "Runs (decimal)";
    debug_assert_eq!(seq.domain(), Domain::Decimal, "{name} needs a decimal sequence");
    let s = seq.symbols();
    let counts = digit_counts(s);
    let total = symbol_runs(s).count();

    let (mean, var) = runs_moments(&counts);
    if !(var > 0.0) {
        return TestResult::new(name, f64::NAN, Status::Fail);
    }

    let z = (total as f64 - mean) / var.sqrt();
    log::debug!(
        "decimal runs: runs={total}, mean={mean:.6}, stdev={:.6}, z={z:.6}, p={:.6}",
        var.sqrt(),
        normal_tail_probability(z)
    );
    TestResult::new(name, z, within_normal(z, alpha))
}

/// Autocorrelation test at lag `d`: tallies `(s[i] - s[i+d]) mod 10` and
/// compares the ten buckets with a uniform expectation of `(N-d)/10`, nine
/// degrees of freedom.
///
/// Requires `d <= N / 2`; otherwise [`Status::ErrorLagTooLarge`].
pub fn autocorrelation(seq: &Sequence, d: usize, alpha: f64) -> TestResult {
    let name = "Autocorrelation (decimal)";
    debug_assert_eq!(seq.domain(), Domain::Decimal, "{name} needs a decimal sequence");
    let s = seq.symbols();
    let n = s.len();
    if d > n / 2 {
        return TestResult::error(name, Status::ErrorLagTooLarge);
    }

    let mut buckets = [0u64; RADIX];
    for (&a, &b) in s.iter().zip(&s[d..]) {
        buckets[(a as usize + RADIX - b as usize) % RADIX] += 1;
    }

    let expected = (n - d) as f64 / RADIX as f64;
    let x: f64 = buckets
        .iter()
        .map(|&c| {
            let diff = c as f64 - expected;
            diff * diff / expected
        })
        .sum();
    TestResult::new(name, x, below(x, chi_square_critical(alpha, RADIX - 1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rngtest_core::Domain;

    fn digits(v: Vec<u8>) -> Sequence {
        Sequence::new(Domain::Decimal, v).unwrap()
    }

    /// 0123456789 repeated: perfectly balanced but completely predictable.
    fn counting(reps: usize) -> Sequence {
        digits((0..10).cycle().take(10 * reps).collect())
    }

    #[test]
    fn test_frequency_balanced() {
        let r = frequency(&counting(100), 0.05);
        assert_eq!(r.statistic, 0.0);
        assert_eq!(r.status, Status::Pass);
    }

    #[test]
    fn test_frequency_constant_fails() {
        let r = frequency(&digits(vec![7; 500]), 0.05);
        // 10/500 * 500² - 500
        assert!((r.statistic - 4500.0).abs() < 1e-9);
        assert_eq!(r.status, Status::Fail);
    }

    #[test]
    fn test_serial_counting_fails() {
        let r = serial(&counting(100), 0.05);
        assert!((r.statistic - 8991.09009).abs() < 1e-4, "X={}", r.statistic);
        assert_eq!(r.status, Status::Fail);
    }

    #[test]
    fn test_poker_counting_fails() {
        // 500 two-digit blocks, five distinct values 100 times each.
        let r = poker(&counting(100), 2, 0.05);
        assert!((r.statistic - 9500.0).abs() < 1e-6);
        assert_eq!(r.status, Status::Fail);
    }

    #[test]
    fn test_poker_block_too_large() {
        // k = 10000 / 3 = 3333 < 5 * 1000
        let r = poker(&counting(1000), 3, 0.05);
        assert_eq!(r.status, Status::ErrorBlockSizeTooLarge);
        assert_eq!(r.statistic, f64::INFINITY);
        assert_eq!(
            poker(&counting(100), 0, 0.05).status,
            Status::ErrorBlockSizeTooLarge
        );
    }

    #[test]
    fn test_runs_moments_match_two_category_formula() {
        let (n1, n2) = (37.0, 63.0);
        let n = n1 + n2;
        let (mean, var) = runs_moments(&[37, 63]);
        let classic_mean = 2.0 * n1 * n2 / n + 1.0;
        let classic_var = 2.0 * n1 * n2 * (2.0 * n1 * n2 - n) / (n * n * (n - 1.0));
        assert!((mean - classic_mean).abs() < 1e-9);
        assert!((var - classic_var).abs() < 1e-9);
    }

    #[test]
    fn test_runs_too_many_runs_fails() {
        let r = runs(&counting(100), 0.05);
        assert!((r.statistic - 10.482843).abs() < 1e-5, "Z={}", r.statistic);
        assert_eq!(r.status, Status::Fail);
    }

    #[test]
    fn test_runs_too_few_runs_fails() {
        let sorted: Vec<u8> = (0..10).flat_map(|d| std::iter::repeat_n(d, 100)).collect();
        let r = runs(&digits(sorted), 0.05);
        assert!(r.statistic < -20.0, "Z={}", r.statistic);
        assert_eq!(r.status, Status::Fail);
    }

    #[test]
    fn test_runs_constant_is_unevaluable() {
        let r = runs(&digits(vec![3; 50]), 0.05);
        assert!(r.statistic.is_nan());
        assert_eq!(r.status, Status::Fail);
        let r = runs(&digits(vec![3]), 0.05);
        assert!(r.statistic.is_nan());
    }

    #[test]
    fn test_autocorrelation_counting_fails() {
        // (s[i] - s[i+8]) mod 10 is always 2.
        let r = autocorrelation(&counting(100), 8, 0.05);
        assert!((r.statistic - 8928.0).abs() < 1e-6);
        assert_eq!(r.status, Status::Fail);
    }

    #[test]
    fn test_autocorrelation_lag_too_large() {
        let seq = counting(2);
        assert_ne!(autocorrelation(&seq, 10, 0.05).status, Status::ErrorLagTooLarge);
        let r = autocorrelation(&seq, 11, 0.05);
        assert_eq!(r.status, Status::ErrorLagTooLarge);
        assert_eq!(r.statistic, f64::INFINITY);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "needs a decimal sequence")]
    fn test_rejects_binary_sequence() {
        let bits = Sequence::new(Domain::Binary, [0, 1].repeat(100)).unwrap();
        frequency(&bits, 0.05);
    }
}
