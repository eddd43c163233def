//! Runner configuration

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use volume_discount::functions::DiscountVariant;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogFormat {
    /// Human-readable single-line output.
    #[default]
    Compact,

    /// Structured JSON output.
    Json,
}

/// Volume discount function runner configuration
#[derive(Debug, Parser)]
#[command(
    name = "volume-discount",
    about = "Evaluate a discount function against a checkout input document",
    long_about = None
)]
pub(crate) struct FunctionConfig {
    /// Discount function to evaluate
    #[arg(short, long, env = "DISCOUNT_VARIANT", value_enum, default_value = "vendor-volume")]
    pub(crate) variant: DiscountVariant,

    /// Read the input document from this file instead of stdin
    #[arg(short, long, conflicts_with = "fixture")]
    pub(crate) input: Option<PathBuf>,

    /// Evaluate a named scenario fixture instead of an input document
    #[arg(short, long)]
    pub(crate) fixture: Option<String>,

    /// Directory holding scenario fixtures
    #[arg(long, env = "DISCOUNT_FIXTURES_DIR", default_value = "./fixtures")]
    pub(crate) fixtures_dir: PathBuf,

    /// Pretty-print the result document
    #[arg(long)]
    pub(crate) pretty: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub(crate) log_level: String,

    /// Log format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value = "compact")]
    pub(crate) log_format: LogFormat,
}

impl FunctionConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_evaluate_vendor_volume_from_stdin() -> TestResult {
        let config = FunctionConfig::try_parse_from(["volume-discount"])?;

        assert_eq!(config.variant, DiscountVariant::VendorVolume);
        assert_eq!(config.input, None);
        assert_eq!(config.fixture, None);
        assert!(!config.pretty);

        Ok(())
    }

    #[test]
    fn parses_variant_and_log_format() -> TestResult {
        let config = FunctionConfig::try_parse_from([
            "volume-discount",
            "--variant",
            "tiered-subtotal",
            "--log-format",
            "json",
            "--pretty",
        ])?;

        assert_eq!(config.variant, DiscountVariant::TieredSubtotal);
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.pretty);

        Ok(())
    }

    #[test]
    fn input_conflicts_with_fixture() {
        let result = FunctionConfig::try_parse_from([
            "volume-discount",
            "--input",
            "input.json",
            "--fixture",
            "acme",
        ]);

        assert!(result.is_err());
    }
}
