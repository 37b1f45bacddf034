//! Positional comparison of JSON values for test assertions.
//!
//! [`compare`] walks an expected and an actual [`serde_json::Value`] side by
//! side and writes one diagnostic block per mismatch: a summary line followed
//! by the trail of `Stack[<depth>]: <segment>` lines leading to it.
//!
//! ```
//! use serde_json::json;
//!
//! let mut out = Vec::new();
//! let has_diff = jsontrail::compare(
//!     &mut out,
//!     &json!({"a": 1, "b": [true, false]}),
//!     &json!({"a": 1, "b": [true, true]}),
//! )
//! .unwrap();
//!
//! assert!(has_diff);
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "JsonPrimitive diff, expected: false but was true\nStack[1]: Array[1]\nStack[0]: Object[\"b\"]\n"
//! );
//! ```

pub mod compare;
pub mod fixture;
pub mod path;
pub mod report;

pub use compare::{Kind, compare, compare_to_stdout, trace};
pub use path::{PathContext, Segment};
pub use report::{ReportError, Reporter};
