use rngtest_core::{Domain, FIPS_LENGTH};

use super::InputFormat;

pub fn run(input: Option<&str>, format: InputFormat, output_path: Option<&str>) {
    let seq = super::load_or_exit(input, Domain::Binary, Some(FIPS_LENGTH), format);
    let results = rngtest_tests::run_fips_tests(&seq);
    super::report("FIPS 140-1 tests", &seq, &results, output_path);

    if results.iter().any(|r| !r.passed()) {
        log::warn!("sample failed at least one FIPS 140-1 test");
    }
}
