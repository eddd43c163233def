//! Fixtures
//!
//! YAML scenarios pairing a discount variant, a configuration document and a cart with the
//! result the evaluation is expected to produce.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::{discounts::DiscountResult, functions::DiscountVariant, input::FunctionInput};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// The scenario does not form a valid function input
    #[error("Invalid scenario input: {0}")]
    Json(#[from] serde_json::Error),
}

/// Scenario file as written in YAML.
#[derive(Debug, Deserialize)]
struct ScenarioFixture {
    #[serde(default)]
    description: Option<String>,

    variant: DiscountVariant,

    /// A mapping is encoded to JSON; a string is used as the raw metafield value.
    #[serde(default)]
    configuration: Option<serde_json::Value>,

    cart: serde_json::Value,

    #[serde(default)]
    expected: Option<DiscountResult>,
}

/// A loaded scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    name: String,
    description: Option<String>,
    variant: DiscountVariant,
    input: FunctionInput,
    expected: Option<DiscountResult>,
}

impl Scenario {
    fn from_fixture(name: &str, fixture: ScenarioFixture) -> Result<Self, FixtureError> {
        let metafield = match fixture.configuration {
            None => serde_json::Value::Null,
            Some(serde_json::Value::String(raw)) => json!({ "value": raw }),
            Some(document) => json!({ "value": serde_json::to_string(&document)? }),
        };

        let input = serde_json::from_value(json!({
            "discountNode": { "metafield": metafield },
            "cart": fixture.cart,
        }))?;

        Ok(Self {
            name: name.to_string(),
            description: fixture.description,
            variant: fixture.variant,
            input,
            expected: fixture.expected,
        })
    }

    /// Return the scenario name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the scenario description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Return the discount variant under test.
    pub fn variant(&self) -> DiscountVariant {
        self.variant
    }

    /// Return the function input.
    pub fn input(&self) -> &FunctionInput {
        &self.input
    }

    /// Return the expected result, if the scenario declares one.
    pub fn expected(&self) -> Option<&DiscountResult> {
        self.expected.as_ref()
    }

    /// Evaluate the scenario.
    pub fn evaluate(&self) -> DiscountResult {
        self.variant.run(&self.input)
    }
}

/// Fixture
#[derive(Debug, Clone)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,
}

impl Fixture {
    /// Create a fixture loader with the default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a fixture loader with a custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Return the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Load a scenario from `scenarios/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it does not describe a
    /// valid function input.
    pub fn scenario(&self, name: &str) -> Result<Scenario, FixtureError> {
        let file_path = self.scenarios_dir().join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ScenarioFixture = serde_norway::from_str(&contents)?;

        Scenario::from_fixture(name, fixture)
    }

    /// List the available scenario names, sorted
    ///
    /// # Errors
    ///
    /// Returns an error if the scenarios directory cannot be read.
    pub fn scenario_names(&self) -> Result<Vec<String>, FixtureError> {
        let mut names = Vec::new();

        for entry in fs::read_dir(self.scenarios_dir())? {
            let path = entry?.path();

            if !path.extension().is_some_and(|extension| extension == "yml") {
                continue;
            }

            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }

        names.sort();

        Ok(names)
    }

    /// Load every scenario
    ///
    /// # Errors
    ///
    /// Returns an error if any scenario cannot be loaded.
    pub fn scenarios(&self) -> Result<Vec<Scenario>, FixtureError> {
        self.scenario_names()?
            .iter()
            .map(|name| self.scenario(name))
            .collect()
    }

    fn scenarios_dir(&self) -> PathBuf {
        self.base_path.join("scenarios")
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
