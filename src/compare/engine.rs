use std::{collections::BTreeSet, io::Write};

use serde_json::{Map, Number, Value};

use crate::{
    path::{PathContext, Segment},
    report::{KeySet, MismatchKind, ReportError, Reporter},
};

use super::Kind;

/// Compares one pair of nodes and everything below them.
///
/// Returns `true` when a difference was reported at or below this pair. Every
/// child of a matching composite is visited, even after an earlier child differed.
pub(super) fn compare_recursive<W: Write>(
    expected: &Value,
    actual: &Value,
    context: &PathContext<'_>,
    reporter: &mut Reporter<W>,
) -> Result<bool, ReportError> {
    match (expected, actual) {
        (Value::Array(expected_items), Value::Array(actual_items)) => {
            if expected_items.len() != actual_items.len() {
                // Actual goes in the "expected" slot; existing result files depend on it.
                reporter.report_value_mismatch(context, MismatchKind::ArraySize, actual, expected)?;
                return Ok(true);
            }
            compare_array(expected_items, actual_items, context, reporter)
        }
        (Value::Object(expected_map), Value::Object(actual_map)) => {
            compare_object(expected_map, actual_map, context, reporter)
        }
        (expected, actual) => {
            let expected_kind = Kind::of(expected);
            let actual_kind = Kind::of(actual);
            if expected_kind != actual_kind {
                reporter.report_value_mismatch(
                    context,
                    MismatchKind::Elements,
                    expected_kind,
                    actual_kind,
                )?;
                return Ok(true);
            }
            if primitives_equal(expected, actual) {
                return Ok(false);
            }
            reporter.report_value_mismatch(context, MismatchKind::Primitive, expected, actual)?;
            Ok(true)
        }
    }
}

fn compare_array<W: Write>(
    expected: &[Value],
    actual: &[Value],
    context: &PathContext<'_>,
    reporter: &mut Reporter<W>,
) -> Result<bool, ReportError> {
    let mut has_diff = false;
    for (index, (expected_item, actual_item)) in expected.iter().zip(actual).enumerate() {
        let segment = Segment::Index(index);
        let child = context.push(&segment);
        tracing::trace!(path = %child, "descending");
        has_diff |= compare_recursive(expected_item, actual_item, &child, reporter)?;
    }
    Ok(has_diff)
}

fn compare_object<W: Write>(
    expected: &Map<String, Value>,
    actual: &Map<String, Value>,
    context: &PathContext<'_>,
    reporter: &mut Reporter<W>,
) -> Result<bool, ReportError> {
    let expected_keys: BTreeSet<&str> = expected.keys().map(String::as_str).collect();
    let actual_keys: BTreeSet<&str> = actual.keys().map(String::as_str).collect();

    if expected_keys.len() != actual_keys.len() {
        reporter.report_value_mismatch(
            context,
            MismatchKind::KeysSize,
            KeySet(&actual_keys),
            KeySet(&expected_keys),
        )?;
        return Ok(true);
    }

    let extra: BTreeSet<&str> = actual_keys.difference(&expected_keys).copied().collect();
    let missing: BTreeSet<&str> = expected_keys.difference(&actual_keys).copied().collect();
    if !extra.is_empty() || !missing.is_empty() {
        reporter.report_keys_mismatch(context, &expected_keys, &actual_keys, &extra, &missing)?;
        // Reported, yet signalled as "no difference"; values under shared keys are skipped.
        return Ok(false);
    }

    let mut has_diff = false;
    for (key, expected_value) in expected {
        let Some(actual_value) = actual.get(key) else {
            continue;
        };
        let segment = Segment::Field(key.clone());
        let child = context.push(&segment);
        tracing::trace!(path = %child, "descending");
        has_diff |= compare_recursive(expected_value, actual_value, &child, reporter)?;
    }
    Ok(has_diff)
}

fn primitives_equal(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Number(expected), Value::Number(actual)) => numbers_equal(expected, actual),
        (expected, actual) => expected == actual,
    }
}

/// Integers compare exactly; anything else compares as `f64`, so `1` equals `1.0`.
fn numbers_equal(expected: &Number, actual: &Number) -> bool {
    match (as_integer(expected), as_integer(actual)) {
        (Some(expected), Some(actual)) => expected == actual,
        _ => expected.as_f64() == actual.as_f64(),
    }
}

fn as_integer(number: &Number) -> Option<i128> {
    number
        .as_i64()
        .map(i128::from)
        .or_else(|| number.as_u64().map(i128::from))
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use serde_json::json;

    use super::*;

    fn run(expected: &Value, actual: &Value) -> (bool, String) {
        let mut reporter = Reporter::new(Vec::new());
        let has_diff =
            compare_recursive(expected, actual, &PathContext::root(), &mut reporter).unwrap();
        (has_diff, String::from_utf8(reporter.into_inner()).unwrap())
    }

    #[test]
    fn test_equal_values_report_nothing() {
        let docs = [
            json!(null),
            json!("foo"),
            json!(42),
            json!([1, "two", [3.5], {"four": false}]),
            json!({"a": {"b": [null, true]}, "c": "d"}),
        ];

        for doc in &docs {
            let (has_diff, output) = run(doc, doc);
            check!(!has_diff);
            check!(output == "");
        }
    }

    #[test]
    fn test_primitive_values_differ() {
        let (has_diff, output) = run(&json!("foo"), &json!("bar"));

        check!(has_diff);
        check!(output == "JsonPrimitive diff, expected: \"foo\" but was \"bar\"\n");
    }

    #[test]
    fn test_number_never_equals_string_with_same_text() {
        let (has_diff, output) = run(&json!(1), &json!("1"));

        check!(has_diff);
        check!(output == "JsonPrimitive diff, expected: 1 but was \"1\"\n");
    }

    #[test]
    fn test_numbers_compare_numerically() {
        check!(run(&json!(1), &json!(1.0)) == (false, String::new()));
        check!(run(&json!(-7), &json!(-7)) == (false, String::new()));
        check!(run(&json!(u64::MAX), &json!(u64::MAX)) == (false, String::new()));

        let (has_diff, output) = run(&json!(1.5), &json!(1.25));
        check!(has_diff);
        check!(output == "JsonPrimitive diff, expected: 1.5 but was 1.25\n");
    }

    #[test]
    fn test_numbers_print_as_written() {
        let expected: Value = serde_json::from_str("[1.50, 1e2]").unwrap();
        let actual: Value = serde_json::from_str("[2, 3]").unwrap();

        let (has_diff, output) = run(&expected, &actual);

        check!(has_diff);
        check!(
            output
                == "JsonPrimitive diff, expected: 1.50 but was 2\n\
                    Stack[0]: Array[0]\n\
                    JsonPrimitive diff, expected: 1e2 but was 3\n\
                    Stack[0]: Array[1]\n"
        );
    }

    #[test]
    fn test_exponent_literal_equals_integer() {
        let expected: Value = serde_json::from_str("1e2").unwrap();

        check!(run(&expected, &json!(100)) == (false, String::new()));
    }

    #[test]
    fn test_null_is_a_primitive() {
        let (has_diff, output) = run(&json!(null), &json!(false));

        check!(has_diff);
        check!(output == "JsonPrimitive diff, expected: null but was false\n");
    }

    #[test]
    fn test_kind_mismatch() {
        let (has_diff, output) = run(&json!([1]), &json!({"a": 1}));

        check!(has_diff);
        check!(output == "JsonElements diff, expected: JsonArray but was JsonObject\n");
    }

    #[test]
    fn test_kind_mismatch_primitive_against_array() {
        let (has_diff, output) = run(&json!("foo"), &json!(["foo"]));

        check!(has_diff);
        check!(output == "JsonElements diff, expected: JsonPrimitive but was JsonArray\n");
    }

    #[test]
    fn test_arrays_of_different_size_swap_arguments() {
        let (has_diff, output) = run(&json!([1, 2]), &json!([9, 9, 9]));

        check!(has_diff);
        check!(output == "JsonArrays of different size diff, expected: [9,9,9] but was [1,2]\n");
    }

    #[test]
    fn test_every_differing_index_is_reported() {
        let (has_diff, output) = run(&json!([1, 2, 3]), &json!([9, 2, 8]));

        check!(has_diff);
        check!(
            output
                == "JsonPrimitive diff, expected: 1 but was 9\n\
                    Stack[0]: Array[0]\n\
                    JsonPrimitive diff, expected: 3 but was 8\n\
                    Stack[0]: Array[2]\n"
        );
    }

    #[test]
    fn test_no_short_circuit_across_mixed_children() {
        let expected = json!([1, [2, 3], {"k": "v"}]);
        let actual = json!([0, [2, 4], {"k": "w"}]);

        let (has_diff, output) = run(&expected, &actual);

        check!(has_diff);
        check!(
            output
                == "JsonPrimitive diff, expected: 1 but was 0\n\
                    Stack[0]: Array[0]\n\
                    JsonPrimitive diff, expected: 3 but was 4\n\
                    Stack[1]: Array[1]\n\
                    Stack[0]: Array[1]\n\
                    JsonPrimitive diff, expected: \"v\" but was \"w\"\n\
                    Stack[1]: Object[\"k\"]\n\
                    Stack[0]: Array[2]\n"
        );
    }

    #[test]
    fn test_object_keys_size_swap_arguments() {
        let (has_diff, output) = run(&json!({"a": 1}), &json!({"a": 1, "b": 2}));

        check!(has_diff);
        check!(output == "JsonObject keys size diff, expected: [a, b] but was [a]\n");
    }

    #[test]
    fn test_object_properties_differ_with_equal_size() {
        let (_, output) = run(&json!({"a": 1, "b": 2}), &json!({"a": 1, "c": 2}));

        check!(output == "Properties diff, expected: [a, b] but was [a, c]. Extra: [c] Missing: [b]\n");
    }

    #[test]
    fn test_object_properties_mismatch_signals_no_difference() {
        // The properties branch reports the mismatch but returns `false`, unlike
        // every other mismatch branch. Callers must look at the output.
        let (has_diff, output) = run(&json!({"a": 1, "b": 2}), &json!({"a": 1, "c": 2}));

        check!(!has_diff);
        check!(output != "");
    }

    #[test]
    fn test_object_properties_mismatch_skips_shared_values() {
        let (_, output) = run(&json!({"a": 1, "b": 2}), &json!({"a": 5, "c": 2}));

        check!(output.lines().count() == 1);
        check!(output.starts_with("Properties diff"));
    }

    #[test]
    fn test_object_values_follow_expected_key_order() {
        let (has_diff, output) = run(&json!({"b": 1, "a": 2}), &json!({"a": 0, "b": 0}));

        check!(has_diff);
        check!(
            output
                == "JsonPrimitive diff, expected: 1 but was 0\n\
                    Stack[0]: Object[\"b\"]\n\
                    JsonPrimitive diff, expected: 2 but was 0\n\
                    Stack[0]: Object[\"a\"]\n"
        );
    }

    #[test]
    fn test_nested_trail_is_printed_deepest_first() {
        let (has_diff, output) = run(&json!({"x": [1, 2]}), &json!({"x": [1, 3]}));

        check!(has_diff);
        check!(
            output
                == "JsonPrimitive diff, expected: 2 but was 3\n\
                    Stack[1]: Array[1]\n\
                    Stack[0]: Object[\"x\"]\n"
        );
    }

    #[test]
    fn test_nested_properties_mismatch_carries_trail() {
        let (_, output) = run(&json!({"list": [{"a": 1}]}), &json!({"list": [{"b": 1}]}));

        check!(
            output
                == "Properties diff, expected: [a] but was [b]. Extra: [b] Missing: [a]\n\
                    Stack[1]: Array[0]\n\
                    Stack[0]: Object[\"list\"]\n"
        );
    }

    #[test]
    fn test_properties_mismatch_in_child_does_not_mark_parent() {
        let (has_diff, output) = run(&json!({"o": {"a": 1}}), &json!({"o": {"b": 1}}));

        check!(!has_diff);
        check!(output.starts_with("Properties diff"));
    }

    #[test]
    fn test_end_to_end_single_mismatch() {
        let expected = json!({"a": 1, "b": [true, false]});
        let actual = json!({"a": 1, "b": [true, true]});

        let (has_diff, output) = run(&expected, &actual);

        check!(has_diff);
        check!(
            output
                == "JsonPrimitive diff, expected: false but was true\n\
                    Stack[1]: Array[1]\n\
                    Stack[0]: Object[\"b\"]\n"
        );
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let expected = json!({"k": [1, {"z": 1, "y": 2}], "m": {"p": 1, "q": 2}});
        let actual = json!({"k": [2, {"z": 1, "x": 2}], "m": {"p": 1}});

        check!(run(&expected, &actual) == run(&expected, &actual));
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("sink closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_aborts_comparison() {
        let mut reporter = Reporter::new(FailingWriter);

        let result = compare_recursive(
            &json!({"a": [1, 2]}),
            &json!({"a": [1, 3]}),
            &PathContext::root(),
            &mut reporter,
        );

        let_assert!(Err(ReportError::Write(_)) = result);
    }
}
