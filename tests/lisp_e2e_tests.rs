/// End-to-end integration tests
/// Demonstrates: Scanner → Parser → Evaluator working together
use arplang::lexer::SExprScanner;
use arplang::parser::{Form, SExprParser};
use arplang::runtime::{FormEvaluator, Value};
use arplang::{Error, ErrorCategory};

fn execute(source: &str) -> arplang::Result<Value> {
    let mut scanner = SExprScanner::new(source);
    let tokens = scanner.scan_tokens()?;
    let mut parser = SExprParser::new(tokens);
    let program = parser.parse()?;
    let mut evaluator = FormEvaluator::new();
    evaluator.execute(&program)
}

fn category(source: &str) -> ErrorCategory {
    execute(source)
        .expect_err("program should fail")
        .category()
}

#[test]
fn test_e2e_simple_arithmetic() {
    let source = "(+ 1 2)";

    // Lex
    let mut scanner = SExprScanner::new(source);
    let tokens = scanner.scan_tokens().unwrap();
    assert_eq!(tokens.len(), 5);

    // Parse
    let mut parser = SExprParser::new(tokens);
    let program = parser.parse().unwrap();

    // Evaluate
    let mut evaluator = FormEvaluator::new();
    let result = evaluator.execute(&program).unwrap();

    assert_eq!(result, Value::Number(3.0));
}

#[test]
fn test_e2e_addition() {
    assert_eq!(execute(r#"(+ "a" "b")"#).unwrap(), Value::String("ab".to_string()));
    assert_eq!(category(r#"(+ 1 "a")"#), ErrorCategory::Type);
}

#[test]
fn test_e2e_left_folds() {
    assert_eq!(execute("(- 10 3 2)").unwrap(), Value::Number(5.0));
    assert_eq!(execute("(/ 20 2 5)").unwrap(), Value::Number(2.0));
    assert_eq!(category("(/ 4 0)"), ErrorCategory::ArithmeticDomain);
}

#[test]
fn test_e2e_remainder() {
    assert_eq!(execute("(re 10 3)").unwrap(), Value::Number(1.0));
    assert_eq!(category("(re 10 3 1)"), ErrorCategory::Arity);
    assert_eq!(category("(re 10 0)"), ErrorCategory::ArithmeticDomain);
}

#[test]
fn test_e2e_conditional() {
    assert_eq!(
        execute(r#"(if 1 "yes" "no")"#).unwrap(),
        Value::String("yes".to_string())
    );
    assert_eq!(
        execute(r#"(if 0 "yes" "no")"#).unwrap(),
        Value::String("no".to_string())
    );
    assert_eq!(execute(r#"(if 0 "yes")"#).unwrap(), Value::Null);
    assert_eq!(category(r#"(if 1 2 3 4)"#), ErrorCategory::Arity);
}

#[test]
fn test_e2e_function_definition_and_call() {
    let source = r#"
        (defunc add (a b) (+ a b))
        (add 2 3)
    "#;
    assert_eq!(execute(source).unwrap(), Value::Number(5.0));
}

#[test]
fn test_e2e_unbound_parameter_fails_on_reference() {
    let source = "(defunc add (a b) (+ a b)) (add 2)";
    assert_eq!(
        execute(source).unwrap_err(),
        Error::UndefinedVariable {
            name: "b".to_string()
        }
    );

    // an unbound parameter that is never referenced is fine
    let source = "(defunc first (a b) a) (first 7)";
    assert_eq!(execute(source).unwrap(), Value::Number(7.0));
}

#[test]
fn test_e2e_function_used_before_definition() {
    let source = "(twice 2) (defunc twice (x) (* x 2))";
    assert_eq!(category(source), ErrorCategory::UnresolvedIdentifier);
}

#[test]
fn test_e2e_redefinition_does_not_change_parsed_calls() {
    let source = r#"
        (defunc version () "one")
        (defunc report () (version))
        (defunc version () "two")
        (report)
        (version)
    "#;
    assert_eq!(
        execute(source).unwrap(),
        Value::String("one\ntwo".to_string())
    );
}

#[test]
fn test_e2e_parse_twice_is_identical() {
    let source = r#"
        (defunc scale (x k) (* x k))
        (defunc shift (x) (+ (scale x 10) 1))
        (shift 4)
        (if (re 9 2) "odd" "even")
    "#;
    let parse = || {
        let tokens = SExprScanner::new(source).scan_tokens().unwrap();
        SExprParser::new(tokens).parse().unwrap()
    };

    let first = parse();
    let second = parse();
    assert_eq!(first.root, second.root);
    assert_eq!(first.functions, second.functions);
    assert_eq!(first.functions.len(), 2);
}

#[test]
fn test_e2e_multiple_top_level_forms_join_with_newlines() {
    let source = r#"
        (defunc square (x) (* x x))
        (square 4)
        (+ "sq" "uare")
        (if 0 1)
    "#;
    assert_eq!(
        execute(source).unwrap(),
        Value::String("16\nsquare\nnull".to_string())
    );
}

#[test]
fn test_e2e_single_top_level_form_keeps_type() {
    let tokens = SExprScanner::new("(defunc id (x) x) (id 1)")
        .scan_tokens()
        .unwrap();
    let program = SExprParser::new(tokens).parse().unwrap();
    assert!(matches!(program.root, Form::Call { .. }));
    assert_eq!(
        FormEvaluator::new().execute(&program).unwrap(),
        Value::Number(1.0)
    );
}

#[test]
fn test_e2e_nested_calls() {
    let source = r#"
        (defunc square (x) (* x x))
        (defunc sum_sq (a b) (+ (square a) (square b)))
        (defunc parity (n) (if (re n 2) "odd" "even"))
        (parity (sum_sq 3 4))
    "#;
    assert_eq!(execute(source).unwrap(), Value::String("odd".to_string()));
}

#[test]
fn test_e2e_malformed_source() {
    assert_eq!(category(r#"(+ "abc 1)"#), ErrorCategory::MalformedSource);
    assert_eq!(category("(+ 1 2"), ErrorCategory::MalformedSource);
    assert_eq!(category("(+ 1 2))"), ErrorCategory::MalformedSource);
    assert_eq!(category("(defunc f (a))"), ErrorCategory::MalformedSource);
    assert_eq!(category("(+ 1 $)"), ErrorCategory::MalformedSource);
}

#[test]
fn test_e2e_multiline_program_with_strings() {
    let source = "(+ \"line one\n\" \"line two\")";
    assert_eq!(
        execute(source).unwrap(),
        Value::String("line one\nline two".to_string())
    );
}

#[test]
fn test_e2e_sample_program() {
    let source = include_str!("../sample.arp");
    assert_eq!(
        execute(source).unwrap(),
        Value::String("25\nodd\n85".to_string())
    );
}

#[test]
fn test_e2e_run_helper_matches_stages() {
    let source = "(* (- 9 4) (/ 9 3))";
    let tokens = arplang::tokenize(source).unwrap();
    let program = arplang::parse(tokens).unwrap();
    assert_eq!(arplang::evaluate(&program).unwrap(), Value::Number(15.0));
    assert_eq!(arplang::run(source).unwrap(), Value::Number(15.0));
}
