//! Integration tests for the strict evaluator.

use logic_expression::{evaluate, Env, EvalError, EvalOptions, Evaluator};
use serde_json::{json, Value};

fn check(expression: Value, expected: Value, vars: Value) {
    let env = Env::from_map(vars.as_object().expect("vars must be an object"));
    let result = evaluate(&expression, &env)
        .unwrap_or_else(|e| panic!("evaluate({}) failed: {}", expression, e));
    assert_eq!(result, expected, "expression: {}", expression);
}

fn check_err(expression: Value, vars: Value) -> EvalError {
    let env = Env::from_map(vars.as_object().expect("vars must be an object"));
    evaluate(&expression, &env)
        .err()
        .unwrap_or_else(|| panic!("expected error for {}", expression))
}

// ----------------------------------------------------------------- Variables

#[test]
fn test_variable_reference() {
    check(json!("$x"), json!(42), json!({"x": 42}));
    check(json!("$x"), json!({"a": [1]}), json!({"x": {"a": [1]}}));
    check(json!("x"), json!("x"), json!({"x": 42}));
}

#[test]
fn test_undefined_variable() {
    assert_eq!(
        check_err(json!("$missing"), json!({})),
        EvalError::UndefinedVariable("missing".into())
    );
}

#[test]
fn test_legacy_get() {
    check(json!({"get": "x"}), json!(1), json!({"x": 1}));
    check(json!({"get": {"name": "x"}}), json!(1), json!({"x": 1}));
    assert_eq!(
        check_err(json!({"get": "nope"}), json!({})),
        EvalError::UndefinedVariable("nope".into())
    );
}

// ----------------------------------------------------------------- let

#[test]
fn test_let_sequential_bindings() {
    check(json!({"let": {"a": 1, "b": "$a", "in": "$b"}}), json!(1), json!({}));
}

#[test]
fn test_let_later_binding_not_visible_to_earlier() {
    assert_eq!(
        check_err(json!({"let": {"a": "$b", "b": 1, "in": "$a"}}), json!({})),
        EvalError::UndefinedVariable("b".into())
    );
}

#[test]
fn test_let_shadowing() {
    check(
        json!({"let": {"a": 1, "in": {"let": {"a": 2, "in": "$a"}}}}),
        json!(2),
        json!({}),
    );
    // The outer binding is intact after the inner let completes.
    check(
        json!({"let": {"a": 1, "in": [{"let": {"a": 2, "in": "$a"}}, "$a"]}}),
        json!([2, 1]),
        json!({}),
    );
}

#[test]
fn test_let_sees_outer_scope() {
    check(
        json!({"let": {"b": {"concat": ["$a", "!"]}, "in": "$b"}}),
        json!("hi!"),
        json!({"a": "hi"}),
    );
}

#[test]
fn test_let_bindings_do_not_leak() {
    assert_eq!(
        check_err(json!([{"let": {"t": 1, "in": "$t"}}, "$t"]), json!({})),
        EvalError::UndefinedVariable("t".into())
    );
}

#[test]
fn test_let_leaves_environment_unchanged() {
    let env = Env::new().with("a", json!("outer"));
    let before = env.clone();
    let ok = json!({"let": {"a": "inner", "b": 2, "in": "$a"}});
    assert_eq!(evaluate(&ok, &env).unwrap(), json!("inner"));
    assert_eq!(env, before);

    let failing = json!({"let": {"a": "inner", "in": "$nope"}});
    assert!(evaluate(&failing, &env).is_err());
    assert_eq!(env, before);
    assert_eq!(env.get("a"), Some(&json!("outer")));
}

#[test]
fn test_let_missing_in() {
    let err = check_err(json!({"let": {"a": 1}}), json!({}));
    assert!(
        matches!(err, EvalError::MalformedOperationArgs { operation: "let", .. }),
        "got: {err}"
    );
    assert!(err.to_string().contains("`in`"), "got: {err}");
}

#[test]
fn test_let_empty_bindings() {
    check(json!({"let": {"in": "body"}}), json!("body"), json!({}));
}

// ----------------------------------------------------------------- Strings

#[test]
fn test_concat() {
    check(json!({"concat": ["a", "b", "c"]}), json!("abc"), json!({}));
    check(json!({"concat": {"values": ["a", "$x"]}}), json!("a1"), json!({"x": 1}));
    check(json!({"concat": [1, true, null, 2.5]}), json!("1truenull2.5"), json!({}));
    check(json!({"concat": []}), json!(""), json!({}));
}

#[test]
fn test_concat_malformed() {
    for expr in [json!({"concat": "a"}), json!({"concat": {"value": ["a"]}}), json!({"concat": {"values": "a"}})] {
        let err = check_err(expr.clone(), json!({}));
        assert!(
            matches!(err, EvalError::MalformedOperationArgs { operation: "concat", .. }),
            "{expr}: {err}"
        );
    }
}

#[test]
fn test_case() {
    check(json!({"uppercase": "abc"}), json!("ABC"), json!({}));
    check(json!({"uppercase": {"value": "$s"}}), json!("ÉTÉ"), json!({"s": "été"}));
    check(json!({"lowercase": "ABC"}), json!("abc"), json!({}));
    check(json!({"lowercase": {"value": true}}), json!("true"), json!({}));
}

#[test]
fn test_length() {
    check(json!({"length": "hello"}), json!(5), json!({}));
    check(json!({"length": {"value": "héllo"}}), json!(5), json!({}));
    check(json!({"length": 12345}), json!(5), json!({}));
    check(json!({"length": ""}), json!(0), json!({}));
}

#[test]
fn test_substring() {
    check(json!({"substring": {"value": "hello", "start": 1, "end": 3}}), json!("el"), json!({}));
    check(json!({"substring": {"value": "hello", "start": 2}}), json!("llo"), json!({}));
    check(json!({"substring": {"value": "hello", "start": 3, "end": 1}}), json!("el"), json!({}));
    check(json!({"substring": {"value": "hello", "start": -2, "end": 100}}), json!("hello"), json!({}));
    check(
        json!({"substring": {"value": "$s", "start": {"length": "ab"}}}),
        json!("llo"),
        json!({"s": "hello"}),
    );
}

#[test]
fn test_substring_malformed() {
    for expr in [
        json!({"substring": "hello"}),
        json!({"substring": {"value": "hello"}}),
        json!({"substring": {"start": 1}}),
    ] {
        let err = check_err(expr.clone(), json!({}));
        assert!(
            matches!(err, EvalError::MalformedOperationArgs { operation: "substring", .. }),
            "{expr}: {err}"
        );
    }
}

// ----------------------------------------------------------------- Logic

#[test]
fn test_and_or() {
    check(json!({"and": [true, 1, "x"]}), json!(true), json!({}));
    check(json!({"and": [true, 0]}), json!(false), json!({}));
    check(json!({"and": {"values": [true, ""]}}), json!(false), json!({}));
    check(json!({"or": [false, null, 0, ""]}), json!(false), json!({}));
    check(json!({"or": {"values": [false, "$x"]}}), json!(true), json!({"x": [1]}));
    check(json!({"and": []}), json!(true), json!({}));
    check(json!({"or": []}), json!(false), json!({}));
}

#[test]
fn test_and_evaluates_every_operand() {
    assert_eq!(
        check_err(json!({"and": [false, "$missing"]}), json!({})),
        EvalError::UndefinedVariable("missing".into())
    );
}

#[test]
fn test_and_or_malformed() {
    let err = check_err(json!({"or": true}), json!({}));
    assert!(matches!(err, EvalError::MalformedOperationArgs { operation: "or", .. }));
}

#[test]
fn test_not() {
    check(json!({"not": true}), json!(false), json!({}));
    check(json!({"not": {"value": 0}}), json!(true), json!({}));
    check(json!({"not": {"value": "0"}}), json!(false), json!({}));
    check(json!({"not": null}), json!(true), json!({}));
}

#[test]
fn test_equals() {
    check(json!({"equals": {"left": "A", "right": "a"}}), json!(false), json!({}));
    check(json!({"equals": {"left": 5, "right": 5}}), json!(true), json!({}));
    check(json!({"equals": {"left": 5, "right": "5"}}), json!(false), json!({}));
    check(json!({"equals": {"left": 5, "right": 5.0}}), json!(true), json!({}));
    check(json!({"equals": {"left": null, "right": false}}), json!(false), json!({}));
    check(
        json!({"equals": {"left": "$a", "right": [1, {"b": 2}]}}),
        json!(true),
        json!({"a": [1, {"b": 2}]}),
    );
}

#[test]
fn test_equals_malformed() {
    let err = check_err(json!({"equals": {"left": 1}}), json!({}));
    assert!(matches!(err, EvalError::MalformedOperationArgs { operation: "equals", .. }));
    let err = check_err(json!({"equals": [1, 1]}), json!({}));
    assert!(matches!(err, EvalError::MalformedOperationArgs { operation: "equals", .. }));
}

// ----------------------------------------------------------------- if

#[test]
fn test_if() {
    check(json!({"if": {"condition": true, "then": "A", "else": "B"}}), json!("A"), json!({}));
    check(json!({"if": {"condition": "", "then": "A", "else": "B"}}), json!("B"), json!({}));
    check(json!({"if": {"condition": true}}), json!(null), json!({}));
    check(json!({"if": {"condition": false, "then": "A"}}), json!(null), json!({}));
}

#[test]
fn test_if_is_lazy() {
    check(
        json!({"if": {"condition": false, "then": {"let": {"x": 1}}, "else": "ok"}}),
        json!("ok"),
        json!({}),
    );
    check(
        json!({"if": {"condition": true, "then": "ok", "else": "$undefined"}}),
        json!("ok"),
        json!({}),
    );
    check(
        json!({"if": {"condition": false, "then": {"frobnicate": 1}, "else": "ok"}}),
        json!("ok"),
        json!({}),
    );
}

#[test]
fn test_if_missing_condition() {
    let err = check_err(json!({"if": {"then": "A"}}), json!({}));
    assert!(matches!(err, EvalError::MalformedOperationArgs { operation: "if", .. }));
}

#[test]
fn test_legacy_flat_if() {
    check(json!({"if": "$c", "then": "A", "else": "B"}), json!("B"), json!({"c": false}));
    check(json!({"if": true, "then": "A"}), json!("A"), json!({}));
}

// ----------------------------------------------------------------- Dispatch

#[test]
fn test_unknown_operation() {
    assert_eq!(
        check_err(json!({"frobnicate": [1, 2]}), json!({})),
        EvalError::UnknownOperation("frobnicate".into())
    );
}

#[test]
fn test_empty_mapping() {
    check(json!({}), json!({}), json!({}));
    check(json!([{}, 1]), json!([{}, 1]), json!({}));
}

#[test]
fn test_nested_program() {
    let expr = json!({
        "let": {
            "first": "$user",
            "greeting": {"concat": ["Hello, ", {"uppercase": "$first"}]},
            "short": {"substring": {"value": "$greeting", "start": 0, "end": 5}},
            "in": {
                "if": {
                    "condition": {"and": [
                        {"equals": {"left": {"length": "$first"}, "right": 3}},
                        {"not": {"equals": {"left": "$short", "right": "Howdy"}}}
                    ]},
                    "then": "$greeting",
                    "else": "$short"
                }
            }
        }
    });
    check(expr, json!("Hello, BOB"), json!({"user": "bob"}));
}

// ----------------------------------------------------------------- Depth

#[test]
fn test_depth_limit() {
    let mut expr = json!(true);
    for _ in 0..20 {
        expr = json!({"not": expr});
    }
    let shallow = Evaluator::with_options(EvalOptions::default().max_depth(10));
    assert_eq!(
        shallow.evaluate(&expr, &Env::new()),
        Err(EvalError::EvaluationDepthExceeded { limit: 10 })
    );
    let deep = Evaluator::with_options(EvalOptions::default().max_depth(64));
    assert_eq!(deep.evaluate(&expr, &Env::new()), Ok(json!(true)));
}

#[test]
fn test_depth_limit_guards_untrusted_nesting() {
    let mut expr = json!("leaf");
    for _ in 0..10_000 {
        expr = json!([expr]);
    }
    assert_eq!(
        evaluate(&expr, &Env::new()),
        Err(EvalError::EvaluationDepthExceeded {
            limit: logic_expression::DEFAULT_MAX_DEPTH
        })
    );
    // Dropping a deeply nested serde_json::Value recurses; unwind it iteratively.
    let mut current = expr;
    while let Value::Array(mut items) = current {
        current = items.pop().unwrap_or(Value::Null);
    }
}
