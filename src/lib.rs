//! GPS three-leg true airspeed calculator.
//!
//! The solver, configuration, and export crates are re-exported here so
//! front-ends (CLI, notebooks, tests) depend on one library.

use std::path::Path;

use thiserror::Error;

pub use tas_config as config;
pub use tas_core as primitives;
pub use tas_export as export;
pub use tas_solver as solver;

use tas_config::{ConfigError, FlightTestConfig};
use tas_solver::{SolutionResult, SolverError};

/// Errors from loading and solving a manifest in one step.
#[derive(Debug, Error)]
pub enum CalculatorError {
    #[error("configuration failed: {0}")]
    Config(#[from] ConfigError),
    #[error("flight test '{name}' could not be solved: {source}")]
    Solve {
        name: String,
        #[source]
        source: SolverError,
    },
}

/// Solve one flight test from a manifest.
pub fn solve_flight_test(test: &FlightTestConfig) -> Result<SolutionResult, CalculatorError> {
    tas_solver::solve(&test.observations()).map_err(|source| CalculatorError::Solve {
        name: test.name.clone(),
        source,
    })
}

/// Load a manifest and solve the named (or first) flight test.
pub fn solve_manifest<P: AsRef<Path>>(
    path: P,
    name: Option<&str>,
) -> Result<(FlightTestConfig, SolutionResult), CalculatorError> {
    let tests = tas_config::load_flight_tests(path)?;
    let test = tas_config::find_flight_test(&tests, name)?.clone();
    let result = solve_flight_test(&test)?;
    Ok((test, result))
}
