mod error;

use std::{collections::BTreeSet, fmt, io::Write};

pub use error::ReportError;

use crate::path::PathContext;

/// Category of a single-value mismatch line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchKind {
    /// The two nodes are of different kinds (primitive, array, object).
    Elements,
    /// Two primitives hold different values.
    Primitive,
    /// Two arrays have different lengths.
    ArraySize,
    /// Two objects have a different number of keys.
    KeysSize,
}

impl MismatchKind {
    pub fn label(&self) -> &'static str {
        match self {
            MismatchKind::Elements => "JsonElements",
            MismatchKind::Primitive => "JsonPrimitive",
            MismatchKind::ArraySize => "JsonArrays of different size",
            MismatchKind::KeysSize => "JsonObject keys size",
        }
    }
}

impl fmt::Display for MismatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Renders a set of object keys as `[a, b]`, in sorted order.
pub struct KeySet<'a>(pub &'a BTreeSet<&'a str>);

impl fmt::Display for KeySet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, key) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(key)?;
        }
        f.write_str("]")
    }
}

/// Writes mismatch lines, each followed by the path trail that leads to it.
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Reporter { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn report_value_mismatch(
        &mut self,
        context: &PathContext<'_>,
        kind: MismatchKind,
        expected: impl fmt::Display,
        actual: impl fmt::Display,
    ) -> Result<(), ReportError> {
        tracing::debug!(path = %context, %kind, "mismatch");
        self.line(format_args!(
            "{} diff, expected: {} but was {}",
            kind, expected, actual
        ))?;
        self.write_trail(context)
    }

    pub fn report_keys_mismatch(
        &mut self,
        context: &PathContext<'_>,
        expected: &BTreeSet<&str>,
        actual: &BTreeSet<&str>,
        extra: &BTreeSet<&str>,
        missing: &BTreeSet<&str>,
    ) -> Result<(), ReportError> {
        tracing::debug!(path = %context, extra = extra.len(), missing = missing.len(), "properties mismatch");
        let mut msg = format!(
            "Properties diff, expected: {} but was {}.",
            KeySet(expected),
            KeySet(actual)
        );
        if !extra.is_empty() {
            msg.push_str(&format!(" Extra: {}", KeySet(extra)));
        }
        if !missing.is_empty() {
            msg.push_str(&format!(" Missing: {}", KeySet(missing)));
        }
        self.line(format_args!("{}", msg))?;
        self.write_trail(context)
    }

    /// One `Stack[<depth>]` line per ancestor, deepest first. The root prints nothing.
    fn write_trail(&mut self, context: &PathContext<'_>) -> Result<(), ReportError> {
        let mut depth = context.depth();
        for node in context.ancestors() {
            if let Some(segment) = node.segment() {
                self.line(format_args!("Stack[{}]: {}", depth, segment))?;
            }
            depth -= 1;
        }
        Ok(())
    }

    fn line(&mut self, msg: fmt::Arguments<'_>) -> Result<(), ReportError> {
        self.out.write_fmt(msg)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}
