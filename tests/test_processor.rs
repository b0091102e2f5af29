extern crate mirage;

use std::sync::Arc;

use num_bigint::BigInt;

use mirage::parser::ast::{Expression, Statement};
use mirage::runner::bytecode::{Instruction, Program};
use mirage::runner::ds::error::RuntimeError;
use mirage::runner::ds::method::Method;
use mirage::runner::ds::object::ObjectRef;
use mirage::runner::ds::realm::Realm;
use mirage::runner::host::registry::HostRegistry;
use mirage::runner::host::types::{HostType, HostValue};
use mirage::runner::{compile, process, run, EngineError};

fn int_variable(object: &ObjectRef, name: &str) -> BigInt {
    object
        .variable(name)
        .unwrap_or_else(|| panic!("variable '{}' unbound", name))
        .as_int()
        .unwrap_or_else(|| panic!("variable '{}' is not an integer", name))
        .clone()
}

fn string_variable(object: &ObjectRef, name: &str) -> String {
    object
        .variable(name)
        .unwrap_or_else(|| panic!("variable '{}' unbound", name))
        .as_str()
        .unwrap_or_else(|| panic!("variable '{}' is not a string", name))
        .to_string()
}

#[test]
fn test_assign_and_read_back() {
    let realm = Realm::empty();
    let target = realm.create_object();
    run(&realm, &target, "x = 1").unwrap();
    assert_eq!(int_variable(&target, "x"), BigInt::from(1));
}

#[test]
fn test_reassignment_overwrites() {
    let realm = Realm::empty();
    let target = realm.create_object();
    run(&realm, &target, "x = 1\nx = 2").unwrap();
    assert_eq!(int_variable(&target, "x"), BigInt::from(2));
}

#[test]
fn test_decimal_assignment() {
    let realm = Realm::empty();
    let target = realm.create_object();
    run(&realm, &target, "pi = 3.14").unwrap();
    assert_eq!(target.variable("pi").unwrap().as_decimal(), Some(3.14));
}

#[test]
fn test_quote_string_keeps_escapes_verbatim() {
    let realm = Realm::empty();
    let target = realm.create_object();
    run(&realm, &target, "x = 'a\\nb'").unwrap();
    assert_eq!(string_variable(&target, "x"), "a\\nb");
}

#[test]
fn test_speech_string_processes_escapes() {
    let realm = Realm::empty();
    let target = realm.create_object();
    run(&realm, &target, "x = \"a\\nb\"").unwrap();
    assert_eq!(string_variable(&target, "x"), "a\nb");
}

#[test]
fn test_unknown_escape_is_kept_verbatim() {
    let realm = Realm::empty();
    let target = realm.create_object();
    run(&realm, &target, "x = \"a\\qb\"").unwrap();
    assert_eq!(string_variable(&target, "x"), "a\\qb");
}

#[test]
fn test_method_not_found_names_method_and_target() {
    let realm = Realm::empty();
    let target = realm.create_object();
    let error = run(&realm, &target, "frobnicate").unwrap_err();
    match error {
        EngineError::Runtime(RuntimeError::MethodNotFound { method, target }) => {
            assert_eq!(method, "frobnicate");
            assert!(target.starts_with("object#"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_partial_state_is_retained_after_failure() {
    let realm = Realm::empty();
    let target = realm.create_object();
    let error = run(&realm, &target, "x = 1\nboom").unwrap_err();
    assert!(matches!(
        error,
        EngineError::Runtime(RuntimeError::MethodNotFound { .. })
    ));
    assert_eq!(int_variable(&target, "x"), BigInt::from(1));
}

fn record(
    realm: &Realm,
    target: &ObjectRef,
    arguments: &[ObjectRef],
) -> Result<HostValue, RuntimeError> {
    let joined = arguments
        .iter()
        .map(|argument| argument.as_str().unwrap_or("?").to_string())
        .collect::<Vec<_>>()
        .join(",");
    target.set_variable("seen", realm.import(HostValue::Str(joined)));
    Ok(HostValue::Null)
}

fn string_literal(text: &str) -> Expression {
    Expression::StringLiteral {
        text: text.to_string(),
        process_escapes: false,
    }
}

#[test]
fn test_arguments_arrive_in_left_to_right_order() {
    let mut registry = HostRegistry::new();
    registry.register_type(HostType::new("recorder").add_method("record", 3, record));
    let realm = Realm::new(registry).unwrap();
    let target = realm.instantiate("recorder").unwrap();

    // The grammar caps calls at one argument, so drive the compiler with a
    // hand-built statement.
    let statements = vec![Statement::Call {
        context: Expression::SelfRef,
        method: "record".to_string(),
        arguments: vec![string_literal("a"), string_literal("b"), string_literal("c")],
    }];
    let program = compile(&statements).unwrap();
    process(&realm, &target, &program).unwrap();

    assert_eq!(string_variable(&target, "seen"), "a,b,c");
}

#[test]
fn test_scripted_method_value_is_returned_by_bare_reference() {
    let realm = Realm::empty();
    let target = realm.create_object();
    let answer = realm.import(HostValue::Int(BigInt::from(7)));
    target.set_method("answer", Arc::new(Method::Value(answer)));

    run(&realm, &target, "x = answer").unwrap();
    assert_eq!(int_variable(&target, "x"), BigInt::from(7));
}

#[test]
fn test_stack_underflow_is_an_error() {
    let realm = Realm::empty();
    let target = realm.create_object();
    let mut program = Program::new();
    program.emit(Instruction::Discard);
    let error = process(&realm, &target, &program).unwrap_err();
    assert!(matches!(error, RuntimeError::StackUnderflow { .. }));
}

#[test]
fn test_program_can_be_re_executed() {
    let realm = Realm::empty();
    let program = compile(&mirage::parser::parse("x = 9").unwrap()).unwrap();
    let first = realm.create_object();
    let second = realm.create_object();
    process(&realm, &first, &program).unwrap();
    process(&realm, &second, &program).unwrap();
    assert_eq!(int_variable(&first, "x"), BigInt::from(9));
    assert_eq!(int_variable(&second, "x"), BigInt::from(9));
}
