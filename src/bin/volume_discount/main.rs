//! Volume Discount function runner
//!
//! Reads a function input document, evaluates a discount function and writes the result
//! document to stdout.

use std::{
    fs,
    io::{self, Read, Write},
    process,
};

use tracing::{error, info, warn};

use volume_discount::{
    discounts::DiscountResult,
    fixtures::{Fixture, FixtureError},
};

use crate::config::FunctionConfig;

mod config;
mod observability;

/// Volume discount runner entry point
pub fn main() {
    let config = FunctionConfig::load().unwrap_or_else(|error| error.exit());

    if let Err(error) = observability::init(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for logging errors"
        )]
        {
            eprintln!("Logging error: {error}");
        }

        process::exit(1);
    }

    let result = match config.fixture.as_deref() {
        Some(name) => match evaluate_fixture(&config, name) {
            Ok(result) => result,
            Err(error) => {
                error!(%error, fixture = name, "failed to load scenario fixture");

                process::exit(1);
            }
        },
        None => evaluate_input(&config),
    };

    if let Err(error) = write_result(&result, config.pretty) {
        error!(%error, "failed to write result document");

        process::exit(1);
    }
}

fn evaluate_fixture(config: &FunctionConfig, name: &str) -> Result<DiscountResult, FixtureError> {
    let scenario = Fixture::with_base_path(&config.fixtures_dir).scenario(name)?;

    info!(
        scenario = scenario.name(),
        variant = %scenario.variant(),
        "evaluating scenario fixture"
    );

    let result = scenario.evaluate();

    if scenario.expected().is_some_and(|expected| expected != &result) {
        warn!(scenario = scenario.name(), "result differs from expected result");
    }

    Ok(result)
}

fn evaluate_input(config: &FunctionConfig) -> DiscountResult {
    match read_input(config) {
        Ok(raw) => config.variant.run_json(&raw),
        Err(error) => {
            error!(%error, "failed to read input document; no discount applied");

            DiscountResult::empty()
        }
    }
}

fn read_input(config: &FunctionConfig) -> io::Result<String> {
    if let Some(path) = &config.input {
        return fs::read_to_string(path);
    }

    let mut raw = String::new();
    io::stdin().read_to_string(&mut raw)?;

    Ok(raw)
}

fn write_result(result: &DiscountResult, pretty: bool) -> Result<(), serde_json::Error> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if pretty {
        serde_json::to_writer_pretty(&mut handle, result)?;
    } else {
        serde_json::to_writer(&mut handle, result)?;
    }

    writeln!(handle).map_err(serde_json::Error::io)?;
    handle.flush().map_err(serde_json::Error::io)
}
