//! CLI for rngtest: statistical randomness tests for bit and digit sequences.

mod commands;

use clap::{Parser, Subcommand};

use commands::ParamOverrides;

#[derive(Parser)]
#[command(name = "rngtest")]
#[command(about = "rngtest: statistical randomness tests for bit and digit sequences")]
#[command(version = rngtest_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Five basic tests on a bit sequence: frequency, serial, poker, runs,
    /// autocorrelation (Menezes et al., HAC §5.4.4)
    Binary {
        /// Input file, or "-" for stdin (default)
        input: Option<String>,

        /// Significance level (default 0.05)
        #[arg(long)]
        alpha: Option<f64>,

        /// Poker test block length m (default 3)
        #[arg(long)]
        block_size: Option<usize>,

        /// Autocorrelation lag d (default 8)
        #[arg(long)]
        lag: Option<usize>,

        /// Read exactly this many bits instead of the whole input
        #[arg(long)]
        length: Option<usize>,

        /// Input encoding: digits/text (one ASCII 0/1 per bit) or bytes/raw (MSB first)
        #[arg(long, default_value = "digits", value_parser = commands::FORMAT_NAMES)]
        format: String,

        /// JSON file with alpha/block_size/lag; flags override it
        #[arg(long)]
        params: Option<String>,

        /// Write results as JSON
        #[arg(long)]
        output: Option<String>,
    },

    /// Decimal-digit analogues of the five basic tests
    Decimal {
        /// Input file, or "-" for stdin (default)
        input: Option<String>,

        /// Significance level (default 0.05)
        #[arg(long)]
        alpha: Option<f64>,

        /// Poker test block length m in digits (default 3)
        #[arg(long)]
        block_size: Option<usize>,

        /// Autocorrelation lag d (default 8)
        #[arg(long)]
        lag: Option<usize>,

        /// Read exactly this many digits instead of the whole input
        #[arg(long)]
        length: Option<usize>,

        /// JSON file with alpha/block_size/lag; flags override it
        #[arg(long)]
        params: Option<String>,

        /// Write results as JSON
        #[arg(long)]
        output: Option<String>,
    },

    /// FIPS 140-1 monobit, poker, runs and long-run tests on a 20000-bit sample
    Fips {
        /// Input file, or "-" for stdin (default)
        input: Option<String>,

        /// Input encoding: digits/text (one ASCII 0/1 per bit) or bytes/raw (MSB first)
        #[arg(long, default_value = "digits", value_parser = commands::FORMAT_NAMES)]
        format: String,

        /// Write results as JSON
        #[arg(long)]
        output: Option<String>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Binary {
            input,
            alpha,
            block_size,
            lag,
            length,
            format,
            params,
            output,
        } => commands::binary::run(commands::binary::BinaryCommandConfig {
            input: input.as_deref(),
            length,
            format: commands::parse_format(&format),
            params_path: params.as_deref(),
            overrides: ParamOverrides {
                alpha,
                block_size,
                lag,
            },
            output_path: output.as_deref(),
        }),
        Commands::Decimal {
            input,
            alpha,
            block_size,
            lag,
            length,
            params,
            output,
        } => commands::decimal::run(commands::decimal::DecimalCommandConfig {
            input: input.as_deref(),
            length,
            params_path: params.as_deref(),
            overrides: ParamOverrides {
                alpha,
                block_size,
                lag,
            },
            output_path: output.as_deref(),
        }),
        Commands::Fips {
            input,
            format,
            output,
        } => commands::fips::run(
            input.as_deref(),
            commands::parse_format(&format),
            output.as_deref(),
        ),
    }
}
