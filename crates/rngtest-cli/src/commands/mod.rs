pub mod binary;
pub mod decimal;
pub mod fips;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use rngtest_core::{Domain, Sequence, SequenceError, read_sequence_from};
use rngtest_tests::{TestParams, TestResult};

/// How the input stream encodes symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// One ASCII digit per symbol.
    Digits,
    /// Raw bytes, eight bits each, MSB first. Binary only.
    Bytes,
}

/// Accepted `--format` values, aliases included.
pub const FORMAT_NAMES: [&str; 4] = ["digits", "text", "bytes", "raw"];

/// Parse an input format string into the enum. Values are restricted to
/// [`FORMAT_NAMES`] by clap, so anything other than a bytes alias is digits.
pub fn parse_format(s: &str) -> InputFormat {
    match s {
        "bytes" | "raw" => InputFormat::Bytes,
        _ => InputFormat::Digits,
    }
}

/// Open `input` (a path, or `-`/absent for stdin).
fn open_input(input: Option<&str>) -> std::io::Result<Box<dyn Read>> {
    match input {
        None | Some("-") => Ok(Box::new(std::io::stdin().lock())),
        Some(path) => Ok(Box::new(File::open(path)?)),
    }
}

/// Read a sequence from `input`, keeping at most `length` symbols.
pub fn load_sequence(
    input: Option<&str>,
    domain: Domain,
    length: Option<usize>,
    format: InputFormat,
) -> Result<Sequence, SequenceError> {
    let mut reader = open_input(input)?;
    let seq = match format {
        InputFormat::Digits => read_sequence_from(reader, domain, length)?,
        InputFormat::Bytes => {
            let mut raw = Vec::new();
            match length {
                Some(bits) => {
                    reader.take(bits.div_ceil(8) as u64).read_to_end(&mut raw)?;
                }
                None => {
                    reader.read_to_end(&mut raw)?;
                }
            }
            let seq = Sequence::from_packed_bytes(&raw)?;
            match length {
                Some(bits) if bits < seq.len() => {
                    Sequence::new(Domain::Binary, seq.symbols()[..bits].to_vec())?
                }
                Some(bits) if bits > seq.len() => {
                    return Err(SequenceError::TooShort {
                        needed: bits,
                        got: seq.len(),
                    });
                }
                _ => seq,
            }
        }
    };
    log::info!(
        "loaded {} {} symbols from {}",
        seq.len(),
        seq.domain(),
        input.unwrap_or("stdin")
    );
    Ok(seq)
}

/// Load a sequence or exit with a message.
pub fn load_or_exit(
    input: Option<&str>,
    domain: Domain,
    length: Option<usize>,
    format: InputFormat,
) -> Sequence {
    match load_sequence(input, domain, length, format) {
        Ok(seq) => seq,
        Err(e) => {
            eprintln!("Failed to load sequence: {e}");
            std::process::exit(1);
        }
    }
}

/// Command-line overrides applied on top of defaults or a parameter file.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParamOverrides {
    pub alpha: Option<f64>,
    pub block_size: Option<usize>,
    pub lag: Option<usize>,
}

/// Merge a parameter file (if any) with command-line overrides.
pub fn resolve_params(
    params_path: Option<&str>,
    overrides: ParamOverrides,
) -> std::io::Result<TestParams> {
    let mut params = match params_path {
        Some(path) => TestParams::load(Path::new(path))?,
        None => TestParams::default(),
    };
    if let Some(alpha) = overrides.alpha {
        params.alpha = alpha;
    }
    if let Some(m) = overrides.block_size {
        params.block_size = m;
    }
    if let Some(d) = overrides.lag {
        params.lag = d;
    }
    if !(params.alpha > 0.0 && params.alpha < 1.0) {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("significance level must be in (0, 1), got {}", params.alpha),
        ));
    }
    Ok(params)
}

pub fn resolve_params_or_exit(params_path: Option<&str>, overrides: ParamOverrides) -> TestParams {
    match resolve_params(params_path, overrides) {
        Ok(params) => params,
        Err(e) => {
            eprintln!("Invalid test parameters: {e}");
            std::process::exit(1);
        }
    }
}

/// Render results as an aligned table.
pub fn format_results(results: &[TestResult]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "  {:<28} {:>14}   {}\n",
        "Test", "Statistic", "Result"
    ));
    out.push_str(&format!("  {}\n", "-".repeat(62)));
    for r in results {
        let ok = if r.passed() { "✓" } else { "✗" };
        out.push_str(&format!(
            "{ok} {:<28} {:>14.4}   {}\n",
            r.name, r.statistic, r.status
        ));
    }
    let passed = results.iter().filter(|r| r.passed()).count();
    out.push_str(&format!("\n  {passed}/{} passed\n", results.len()));
    out
}

/// Print results and optionally save them as JSON.
pub fn report(title: &str, seq: &Sequence, results: &[TestResult], output_path: Option<&str>) {
    println!("{title}: {} {} symbols\n", seq.len(), seq.domain());
    print!("{}", format_results(results));

    if let Some(path) = output_path {
        let json = serde_json::json!({
            "domain": seq.domain().to_string(),
            "length": seq.len(),
            "results": results,
        });
        match serde_json::to_string_pretty(&json) {
            Ok(text) => {
                if let Err(e) = std::fs::write(path, text) {
                    eprintln!("Failed to write results to {path}: {e}");
                } else {
                    println!("\nResults saved to: {path}");
                }
            }
            Err(e) => eprintln!("Failed to serialize results: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rngtest_tests::Status;
    use std::io::Write;

    fn temp_with(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    // -----------------------------------------------------------------------
    // parse_format tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format("digits"), InputFormat::Digits);
        assert_eq!(parse_format("text"), InputFormat::Digits);
        assert_eq!(parse_format("bytes"), InputFormat::Bytes);
        assert_eq!(parse_format("raw"), InputFormat::Bytes);
    }

    #[test]
    fn test_every_format_name_parses() {
        let parsed: Vec<_> = FORMAT_NAMES.iter().map(|s| parse_format(s)).collect();
        assert_eq!(
            parsed,
            vec![
                InputFormat::Digits,
                InputFormat::Digits,
                InputFormat::Bytes,
                InputFormat::Bytes
            ]
        );
    }

    // -----------------------------------------------------------------------
    // load_sequence tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_load_digits_with_length() {
        let file = temp_with(b"1 0 1 1 0 0 1 0 1 1");
        let path = file.path().to_str().unwrap();
        let seq = load_sequence(Some(path), Domain::Binary, Some(4), InputFormat::Digits).unwrap();
        assert_eq!(seq.symbols(), &[1, 0, 1, 1]);
    }

    #[test]
    fn test_load_bytes_truncates_to_length() {
        let file = temp_with(&[0b1010_0000, 0xFF]);
        let path = file.path().to_str().unwrap();
        let seq = load_sequence(Some(path), Domain::Binary, Some(12), InputFormat::Bytes).unwrap();
        assert_eq!(seq.len(), 12);
        assert_eq!(&seq.symbols()[..4], &[1, 0, 1, 0]);
        assert_eq!(seq.count_of(1), 6);
    }

    #[test]
    fn test_load_bytes_too_short() {
        let file = temp_with(&[0xAA]);
        let path = file.path().to_str().unwrap();
        let err = load_sequence(Some(path), Domain::Binary, Some(16), InputFormat::Bytes);
        assert!(matches!(
            err,
            Err(SequenceError::TooShort { needed: 16, got: 8 })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_sequence(
            Some("/nonexistent/rngtest.txt"),
            Domain::Decimal,
            None,
            InputFormat::Digits,
        );
        assert!(matches!(err, Err(SequenceError::Io(_))));
    }

    // -----------------------------------------------------------------------
    // resolve_params tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_resolve_defaults() {
        let p = resolve_params(None, ParamOverrides::default()).unwrap();
        assert_eq!(p, TestParams::default());
    }

    #[test]
    fn test_resolve_flags_override_file() {
        let file = temp_with(br#"{"alpha": 0.01, "block_size": 4, "lag": 2}"#);
        let path = file.path().to_str().unwrap();
        let p = resolve_params(
            Some(path),
            ParamOverrides {
                lag: Some(16),
                ..ParamOverrides::default()
            },
        )
        .unwrap();
        assert_eq!(p.alpha, 0.01);
        assert_eq!(p.block_size, 4);
        assert_eq!(p.lag, 16);
    }

    #[test]
    fn test_resolve_rejects_bad_alpha() {
        for alpha in [0.0, 1.0, -0.5, f64::NAN] {
            let overrides = ParamOverrides {
                alpha: Some(alpha),
                ..ParamOverrides::default()
            };
            assert!(resolve_params(None, overrides).is_err(), "alpha={alpha}");
        }
    }

    // -----------------------------------------------------------------------
    // format_results tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_format_results_labels_and_summary() {
        let results = vec![
            TestResult::new("Frequency", 0.4, Status::Pass),
            TestResult::new("Runs", 31.7913, Status::Fail),
            TestResult::error("Poker", Status::ErrorBlockSizeTooLarge),
        ];
        let text = format_results(&results);
        assert!(text.contains("Passed"));
        assert!(text.contains("Failed"));
        assert!(text.contains("Error: block size too large"));
        assert!(text.contains("inf"));
        assert!(text.contains("1/3 passed"));
    }
}
