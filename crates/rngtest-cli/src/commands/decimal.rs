use rngtest_core::Domain;

use super::{InputFormat, ParamOverrides};

pub struct DecimalCommandConfig<'a> {
    pub input: Option<&'a str>,
    pub length: Option<usize>,
    pub params_path: Option<&'a str>,
    pub overrides: ParamOverrides,
    pub output_path: Option<&'a str>,
}

pub fn run(cfg: DecimalCommandConfig<'_>) {
    let params = super::resolve_params_or_exit(cfg.params_path, cfg.overrides);
    let seq = super::load_or_exit(cfg.input, Domain::Decimal, cfg.length, InputFormat::Digits);
    log::debug!("decimal battery parameters: {params:?}");

    let results = rngtest_tests::run_decimal_tests(&seq, &params);
    super::report(
        &format!(
            "Decimal tests (alpha={}, m={}, d={})",
            params.alpha, params.block_size, params.lag
        ),
        &seq,
        &results,
        cfg.output_path,
    );
}
