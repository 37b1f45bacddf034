//! Golden-file fixtures.
//!
//! A fixture is three files sharing a base name in one directory:
//! `<name>.expected.json`, `<name>.actual.json` and `<name>.result`, the last
//! holding the exact trace the comparison must produce.

mod error;

use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

pub use error::FixtureError;
use serde_json::Value;

use crate::{compare, report::ReportError};

const RESULT_SUFFIX: &str = ".result";
const EXPECTED_SUFFIX: &str = ".expected.json";
const ACTUAL_SUFFIX: &str = ".actual.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Fixture {
    pub name: String,
    pub expected: Value,
    pub actual: Value,
    pub result: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixtureOutcome {
    Passed,
    Failed {
        expected_output: String,
        actual_output: String,
    },
}

impl FixtureOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, FixtureOutcome::Passed)
    }
}

/// Loads every fixture in `dir`, ordered by name.
pub fn load_fixtures(dir: &Path) -> Result<Vec<Fixture>, FixtureError> {
    let mut result_files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| FixtureError::io(dir, e))? {
        let path = entry.map_err(|e| FixtureError::io(dir, e))?.path();
        let is_result = path
            .file_name()
            .and_then(OsStr::to_str)
            .is_some_and(|name| name.ends_with(RESULT_SUFFIX));
        if is_result {
            result_files.push(path);
        }
    }
    result_files.sort();

    tracing::debug!(dir = %dir.display(), count = result_files.len(), "found fixtures");

    result_files.iter().map(|path| Fixture::load(path)).collect()
}

impl Fixture {
    /// Loads the fixture whose `.result` file is at `result_path`.
    pub fn load(result_path: &Path) -> Result<Self, FixtureError> {
        let file_name = result_path
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or_default();
        let name = file_name
            .strip_suffix(RESULT_SUFFIX)
            .unwrap_or(file_name)
            .to_string();

        let result =
            fs::read_to_string(result_path).map_err(|e| FixtureError::io(result_path, e))?;
        let expected = read_json(&name, &sibling(result_path, &name, EXPECTED_SUFFIX))?;
        let actual = read_json(&name, &sibling(result_path, &name, ACTUAL_SUFFIX))?;

        Ok(Fixture {
            name,
            expected,
            actual,
            result,
        })
    }

    /// Compares the two documents and checks the trace against the result
    /// text, ignoring surrounding whitespace.
    pub fn run(&self) -> Result<FixtureOutcome, ReportError> {
        let output = compare::trace(&self.expected, &self.actual)?.unwrap_or_default();

        let expected_output = self.result.trim();
        let actual_output = output.trim();
        if expected_output == actual_output {
            return Ok(FixtureOutcome::Passed);
        }

        tracing::debug!(fixture = %self.name, "output differs from result file");
        Ok(FixtureOutcome::Failed {
            expected_output: expected_output.to_string(),
            actual_output: actual_output.to_string(),
        })
    }
}

fn sibling(result_path: &Path, name: &str, suffix: &str) -> PathBuf {
    result_path.with_file_name(format!("{}{}", name, suffix))
}

fn read_json(name: &str, path: &Path) -> Result<Value, FixtureError> {
    if !path.is_file() {
        return Err(FixtureError::missing_file(name, path));
    }
    let data = fs::read_to_string(path).map_err(|e| FixtureError::io(path, e))?;
    serde_json::from_str(&data).map_err(|e| FixtureError::parse(path, e))
}
