//! FIPS 140-1 statistical tests on a 20 000-bit sample.
//!
//! No significance level is involved: each test accepts or rejects by a
//! literal interval from the standard. Sequences longer than
//! [`FIPS_LENGTH`] are judged on their first 20 000 bits; shorter ones fail
//! every test with a NaN statistic.

use rngtest_core::{Domain, FIPS_LENGTH, Sequence};

use crate::{Status, TestResult, poker_statistic, runs as symbol_runs};

/// Exclusive bounds on the number of ones.
pub const MONOBIT_BOUNDS: (usize, usize) = (9_654, 10_346);

/// Poker block length.
pub const POKER_BLOCK_SIZE: usize = 4;

/// Exclusive bounds on the poker statistic.
pub const POKER_BOUNDS: (f64, f64) = (1.03, 57.4);

/// Inclusive bounds on the count of blocks (and, separately, gaps) of length
/// 1, 2, 3, 4, 5 and 6-or-more.
pub const RUNS_INTERVALS: [(u64, u64); 6] = [
    (2_267, 2_733),
    (1_079, 1_421),
    (502, 748),
    (223, 402),
    (90, 223),
    (90, 223),
];

/// A run of this length or longer fails the long-run test.
pub const LONG_RUN_LIMIT: usize = 34;

fn sample(seq: &Sequence) -> Option<&[u8]> {
    seq.symbols().get(..FIPS_LENGTH)
}

fn unevaluable(name: &'static str) -> TestResult {
    TestResult::new(name, f64::NAN, Status::Fail)
}

fn status(ok: bool) -> Status {
    if ok { Status::Pass } else { Status::Fail }
}

/// Monobit test: the number of ones must lie strictly inside
/// [`MONOBIT_BOUNDS`]. The statistic is that count.
pub fn monobit(seq: &Sequence) -> TestResult {
    let name = "FIPS Monobit";
    debug_assert_eq!(seq.domain(), Domain::Binary, "{name} needs a binary sequence");
    let Some(s) = sample(seq) else {
        return unevaluable(name);
    };
    let ones = s.iter().filter(|&&b| b == 1).count();
    let (lo, hi) = MONOBIT_BOUNDS;
    TestResult::new(name, ones as f64, status(lo < ones && ones < hi))
}

/// Poker test with 4-bit blocks: the statistic must lie strictly inside
/// [`POKER_BOUNDS`].
pub fn poker(seq: &Sequence) -> TestResult {
    let name = "FIPS Poker";
    debug_assert_eq!(seq.domain(), Domain::Binary, "{name} needs a binary sequence");
    let Some(s) = sample(seq) else {
        return unevaluable(name);
    };
    match poker_statistic(s, 2, POKER_BLOCK_SIZE) {
        Some((x, _)) => {
            let (lo, hi) = POKER_BOUNDS;
            TestResult::new(name, x, status(lo < x && x < hi))
        }
        None => TestResult::error(name, Status::ErrorBlockSizeTooLarge),
    }
}

/// Block and gap counts by run length, runs of 6 or more merged into the
/// last bucket.
fn run_length_counts(s: &[u8]) -> ([u64; 6], [u64; 6]) {
    let mut blocks = [0u64; 6];
    let mut gaps = [0u64; 6];
    for (bit, len) in symbol_runs(s) {
        let i = len.min(6) - 1;
        if bit == 1 {
            blocks[i] += 1;
        } else {
            gaps[i] += 1;
        }
    }
    (blocks, gaps)
}

/// Runs test: each of the twelve block/gap counts must lie inside its
/// [`RUNS_INTERVALS`] entry. The statistic is how many of the twelve do.
pub fn runs(seq: &Sequence) -> TestResult {
    let name = "FIPS Runs";
    debug_assert_eq!(seq.domain(), Domain::Binary, "{name} needs a binary sequence");
    let Some(s) = sample(seq) else {
        return unevaluable(name);
    };
    let (blocks, gaps) = run_length_counts(s);

    let within = RUNS_INTERVALS
        .iter()
        .zip(blocks.iter().zip(&gaps))
        .map(|(&(lo, hi), (&b, &g))| {
            usize::from((lo..=hi).contains(&b)) + usize::from((lo..=hi).contains(&g))
        })
        .sum::<usize>();
    log::debug!("FIPS runs: blocks={blocks:?}, gaps={gaps:?}");
    TestResult::new(name, within as f64, status(within == 2 * RUNS_INTERVALS.len()))
}

/// Long-run test: no run may reach [`LONG_RUN_LIMIT`]. The statistic is the
/// longest run.
pub fn long_run(seq: &Sequence) -> TestResult {
    let name = "FIPS Long Run";
    debug_assert_eq!(seq.domain(), Domain::Binary, "{name} needs a binary sequence");
    let Some(s) = sample(seq) else {
        return unevaluable(name);
    };
    let longest = symbol_runs(s).map(|(_, len)| len).max().unwrap_or(0);
    TestResult::new(name, longest as f64, status(longest < LONG_RUN_LIMIT))
}
