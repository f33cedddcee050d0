//! Serializer tests

use exposed::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn ser(value: impl Into<Value>) -> String {
    serialize(&value.into(), SerializeOptions::default()).unwrap()
}

fn re(source: &str, flags: &str) -> Value {
    Value::pattern(PatternValue::new(source, flags).unwrap())
}

// ═══════════════════════════════════════════════════════════════════════
// Primitives
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_undefined_serializes_to_undefined() {
    assert_eq!(ser(Value::Undefined), "undefined");
    assert_eq!(ser(()), "undefined");
}

#[test]
fn test_null_serializes_to_null() {
    assert_eq!(ser(Value::Null), "null");
    assert_eq!(ser(None::<i32>), "null");
}

#[test]
fn test_primitives() {
    assert_eq!(ser(true), "true");
    assert_eq!(ser(0), "0");
    assert_eq!(ser(-12.5), "-12.5");
    assert_eq!(ser("string"), "\"string\"");
}

#[test]
fn test_non_finite_numbers_become_null() {
    assert_eq!(ser(f64::NAN), "null");
    assert_eq!(ser(vec![f64::INFINITY]), "[null]");
}

// ═══════════════════════════════════════════════════════════════════════
// JSON Data
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_json_data_matches_json_encoding() {
    let data = json!({
        "str": "string",
        "num": 0,
        "obj": {"foo": "foo"},
        "arr": [1, 2, 3],
        "bool": true,
        "nil": null
    });
    assert_eq!(ser(data.clone()), serde_json::to_string(&data).unwrap());
}

#[test]
fn test_json_data_round_trips() {
    let data = json!({
        "nested": {"list": [1.5, "two", false, null, {"deep": []}]},
        "unicode": "héllo ✓"
    });
    let parsed: serde_json::Value = serde_json::from_str(&ser(data.clone())).unwrap();
    assert_eq!(parsed, data);
}

#[test]
fn test_undefined_members_follow_json_rules() {
    let value = Value::empty_object()
        .with_field("a", Value::Undefined)
        .with_field("b", Value::from(vec![Value::Undefined, Value::from(1)]));
    assert_eq!(ser(value), "{\"b\":[null,1]}");
}

#[test]
fn test_object_key_order_is_preserved() {
    let value = Value::empty_object()
        .with_field("z", 1)
        .with_field("a", 2)
        .with_field("m", 3);
    assert_eq!(ser(value), "{\"z\":1,\"a\":2,\"m\":3}");
}

// ═══════════════════════════════════════════════════════════════════════
// Functions
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_anonymous_function() {
    let f = FunctionValue::new("", Vec::<String>::new(), "");
    assert_eq!(ser(f), "function () {}");
}

#[test]
fn test_named_function() {
    let f = FunctionValue::new("fn", Vec::<String>::new(), "");
    assert_eq!(ser(f), "function fn() {}");
}

#[test]
fn test_function_with_arguments() {
    let f = FunctionValue::new("fn", ["arg1", "arg2"], "");
    assert_eq!(ser(f), "function fn(arg1, arg2) {}");
}

#[test]
fn test_function_with_body() {
    let f = FunctionValue::new("fn", Vec::<String>::new(), "return true;");
    assert_eq!(ser(f), "function fn() { return true; }");
}

#[test]
fn test_function_source_is_not_escaped() {
    let f = FunctionValue::from_source(
        "tag",
        Vec::<String>::new(),
        "function tag() { return a < b && c > d ? 1 / 2 : 0; }",
    );
    assert_eq!(
        ser(f),
        "function tag() { return a < b && c > d ? 1 / 2 : 0; }"
    );
}

#[test]
fn test_native_function_is_an_error() {
    let err = serialize(
        &Value::function(FunctionValue::native("Number")),
        SerializeOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ExposeError::NativeFunction { ref name } if name == "Number"));
}

#[test]
fn test_nested_native_function_is_an_error() {
    let value = Value::empty_object().with_field(
        "helpers",
        Value::from(vec![Value::function(FunctionValue::from_source(
            "parseInt",
            ["s"],
            "function parseInt() { [native code] }",
        ))]),
    );
    assert!(serialize(&value, SerializeOptions::default()).is_err());
}

// ═══════════════════════════════════════════════════════════════════════
// Patterns
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_pattern() {
    assert_eq!(ser(re("asdf", "")), "/asdf/");
}

#[test]
fn test_pattern_with_flags() {
    assert_eq!(ser(re("^asdf$", "gi")), "/^asdf$/gi");
}

#[test]
fn test_pattern_with_escaped_chars() {
    assert_eq!(ser(re("\\..*", "")), "/\\..*/");
}

// ═══════════════════════════════════════════════════════════════════════
// Mixed Aggregates
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_mixed_object() {
    let value = Value::empty_object()
        .with_field("name", "widget")
        .with_field("check", FunctionValue::new("", ["x"], "return x > 0;"))
        .with_field("match", re("^w", "i"));
    assert_eq!(
        ser(value),
        "{\"name\":\"widget\",\"check\":function (x) { return x > 0; },\"match\":/^w/i}"
    );
}

#[test]
fn test_mixed_array_keeps_positions() {
    let value = Value::from(vec![
        Value::from(1),
        Value::function(FunctionValue::new("a", Vec::<String>::new(), "")),
        re("b", "g"),
        Value::function(FunctionValue::new("c", Vec::<String>::new(), "")),
    ]);
    assert_eq!(ser(value), "[1,function a() {},/b/g,function c() {}]");
}

#[test]
fn test_placeholder_lookalike_strings_survive() {
    let value = Value::from(vec![
        Value::from("@__LITERAL_0_0__@"),
        Value::from("@__FUNCTION_0__@"),
        Value::function(FunctionValue::new("f", Vec::<String>::new(), "")),
    ]);
    assert_eq!(
        ser(value),
        "[\"@__LITERAL_0_0__@\",\"@__FUNCTION_0__@\",function f() {}]"
    );
}

#[test]
fn test_serialize_is_deterministic() {
    let value = Value::empty_object()
        .with_field("f", FunctionValue::new("f", Vec::<String>::new(), ""))
        .with_field("r", re("x", ""));
    assert_eq!(ser(value.clone()), ser(value));
}

#[test]
fn test_is_json_skips_literal_pass() {
    let data = json!({"a": [1, 2], "b": "</b>"});
    let fast = serialize(&Value::from(data.clone()), SerializeOptions::json()).unwrap();
    assert_eq!(fast, ser(data));
}

// ═══════════════════════════════════════════════════════════════════════
// Script Embedding
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_script_close_tag_is_escaped() {
    let text = ser("</script>");
    assert_eq!(text, "\"\\u003C\\u002Fscript\\u003E\"");
    assert!(!text.contains('<'));
    assert!(!text.contains('>'));
    assert!(!text.contains('/'));

    let decoded: String = serde_json::from_str(&text).unwrap();
    assert_eq!(decoded, "</script>");
}

#[test]
fn test_escaping_applies_inside_aggregates() {
    let value = Value::empty_object().with_field("html", "<b>a/b</b>");
    let text = ser(value);
    assert!(!text.contains('<') && !text.contains('>') && !text.contains('/'));

    let decoded: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(decoded, json!({"html": "<b>a/b</b>"}));
}

#[test]
fn test_line_separators_are_escaped() {
    let text = ser("a\u{2028}b\u{2029}c");
    assert!(!text.contains('\u{2028}'));
    assert!(!text.contains('\u{2029}'));
    let decoded: String = serde_json::from_str(&text).unwrap();
    assert_eq!(decoded, "a\u{2028}b\u{2029}c");
}
