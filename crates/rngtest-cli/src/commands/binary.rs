use rngtest_core::Domain;

use super::{InputFormat, ParamOverrides};

pub struct BinaryCommandConfig<'a> {
    pub input: Option<&'a str>,
    pub length: Option<usize>,
    pub format: InputFormat,
    pub params_path: Option<&'a str>,
    pub overrides: ParamOverrides,
    pub output_path: Option<&'a str>,
}

pub fn run(cfg: BinaryCommandConfig<'_>) {
    let params = super::resolve_params_or_exit(cfg.params_path, cfg.overrides);
    let seq = super::load_or_exit(cfg.input, Domain::Binary, cfg.length, cfg.format);
    log::debug!("binary battery parameters: {params:?}");

    let results = rngtest_tests::run_binary_tests(&seq, &params);
    super::report(
        &format!(
            "Basic tests (alpha={}, m={}, d={})",
            params.alpha, params.block_size, params.lag
        ),
        &seq,
        &results,
        cfg.output_path,
    );
}
