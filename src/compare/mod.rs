mod engine;

use std::{fmt, io::Write};

use serde_json::Value;

use crate::{
    path::PathContext,
    report::{ReportError, Reporter},
};

/// The three kinds of node a comparison tells apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Strings, numbers, booleans and null.
    Primitive,
    Array,
    Object,
}

impl Kind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Kind::Primitive,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Kind::Primitive => "JsonPrimitive",
            Kind::Array => "JsonArray",
            Kind::Object => "JsonObject",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compares `actual` against `expected`, writing one diagnostic block per
/// mismatch to `out`.
///
/// Comparison is positional: array elements are paired by index and object
/// values by key. Returns `true` when a difference was found. A differing key
/// set on two objects of equal size is written to `out` but does not flip the
/// result, so check the output when any mismatch matters (see [`trace`]).
pub fn compare<W: Write>(out: W, expected: &Value, actual: &Value) -> Result<bool, ReportError> {
    let mut reporter = Reporter::new(out);
    engine::compare_recursive(expected, actual, &PathContext::root(), &mut reporter)
}

/// [`compare`] writing to the process's standard output.
pub fn compare_to_stdout(expected: &Value, actual: &Value) -> Result<bool, ReportError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let has_diff = compare(&mut out, expected, actual)?;
    out.flush()?;
    Ok(has_diff)
}

/// Runs a comparison into memory. Returns `None` when nothing was reported.
pub fn trace(expected: &Value, actual: &Value) -> Result<Option<String>, ReportError> {
    let mut buf = Vec::new();
    compare(&mut buf, expected, actual)?;
    if buf.is_empty() {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Panics with the full mismatch trace when two JSON values differ.
///
/// ```
/// use serde_json::json;
///
/// jsontrail::assert_json_eq!(json!({"a": [1, 2]}), json!({"a": [1, 2]}));
/// ```
#[macro_export]
macro_rules! assert_json_eq {
    ($expected:expr, $actual:expr $(,)?) => {
        match $crate::compare::trace(&$expected, &$actual) {
            ::std::result::Result::Ok(::std::option::Option::None) => {}
            ::std::result::Result::Ok(::std::option::Option::Some(trace)) => {
                panic!("JSON values differ:\n{}", trace)
            }
            ::std::result::Result::Err(err) => panic!("{}", err),
        }
    };
}
