extern crate mirage;

use num_bigint::BigInt;

use mirage::parser::ast::{Expression, Statement};
use mirage::parser::parse;
use mirage::runner::bytecode::Instruction;
use mirage::runner::compile;
use mirage::runner::compiler::CompileError;

fn compile_source(source: &str) -> Vec<Instruction> {
    compile(&parse(source).unwrap()).unwrap().code
}

fn string_literal(text: &str) -> Expression {
    Expression::StringLiteral {
        text: text.to_string(),
        process_escapes: false,
    }
}

#[test]
fn test_assignment_lowering() {
    assert_eq!(
        compile_source("x = 1"),
        vec![
            Instruction::PushSelf,
            Instruction::PushInteger(BigInt::from(1)),
            Instruction::Assign {
                variable: "x".to_string(),
            },
        ]
    );
}

#[test]
fn test_statement_call_lowering_appends_discard() {
    assert_eq!(
        compile_source("log 'Hi!'"),
        vec![
            Instruction::PushSelf,
            Instruction::PushString {
                text: "Hi!".to_string(),
                process_escapes: false,
            },
            Instruction::Call {
                method: "log".to_string(),
                argument_count: 1,
            },
            Instruction::Discard,
        ]
    );
}

#[test]
fn test_no_argument_call_lowering() {
    assert_eq!(
        compile_source("tick"),
        vec![
            Instruction::PushSelf,
            Instruction::Call {
                method: "tick".to_string(),
                argument_count: 0,
            },
            Instruction::Discard,
        ]
    );
}

#[test]
fn test_integer_literal_is_arbitrary_precision() {
    let digits = "123456789012345678901234567890123456789";
    let code = compile_source(&format!("x = {}", digits));
    assert_eq!(
        code[1],
        Instruction::PushInteger(digits.parse::<BigInt>().unwrap())
    );
}

#[test]
fn test_underscores_are_stripped_at_compile_time() {
    let code = compile_source("x = 1_000");
    assert_eq!(code[1], Instruction::PushInteger(BigInt::from(1000)));
}

#[test]
fn test_decimal_lowering() {
    let code = compile_source("x = 2.5");
    assert_eq!(code[1], Instruction::PushDecimal(2.5));
}

#[test]
fn test_trailing_dot_decimal_lowering() {
    let code = compile_source("x = 5.");
    assert_eq!(code[1], Instruction::PushDecimal(5.0));
}

#[test]
fn test_decimal_with_underscores() {
    let code = compile_source("x = 1_0.2_5");
    assert_eq!(code[1], Instruction::PushDecimal(10.25));
}

#[test]
fn test_method_ref_lowers_to_zero_argument_call() {
    assert_eq!(
        compile_source("x = answer"),
        vec![
            Instruction::PushSelf,
            Instruction::PushSelf,
            Instruction::Call {
                method: "answer".to_string(),
                argument_count: 0,
            },
            Instruction::Assign {
                variable: "x".to_string(),
            },
        ]
    );
}

#[test]
fn test_variable_expression_is_rejected() {
    let statements = vec![Statement::Assign {
        context: Expression::SelfRef,
        variable: "x".to_string(),
        value: Expression::Variable("y".to_string()),
    }];
    assert_eq!(
        compile(&statements).unwrap_err(),
        CompileError::UnsupportedExpression("variable")
    );
}

#[test]
fn test_multi_argument_call_lowering() {
    // The grammar only produces single-argument calls; the compiler is
    // general over the AST.
    let statements = vec![Statement::Call {
        context: Expression::SelfRef,
        method: "record".to_string(),
        arguments: vec![string_literal("a"), string_literal("b")],
    }];
    let code = compile(&statements).unwrap().code;
    assert_eq!(
        code[3],
        Instruction::Call {
            method: "record".to_string(),
            argument_count: 2,
        }
    );
    assert_eq!(code[4], Instruction::Discard);
}

#[test]
fn test_expression_call_keeps_result_on_stack() {
    let statements = vec![Statement::Assign {
        context: Expression::SelfRef,
        variable: "x".to_string(),
        value: Expression::Call {
            context: Box::new(Expression::SelfRef),
            method: "answer".to_string(),
            arguments: vec![],
        },
    }];
    let code = compile(&statements).unwrap().code;
    // No Discard between the call and the assignment.
    assert_eq!(
        code,
        vec![
            Instruction::PushSelf,
            Instruction::PushSelf,
            Instruction::Call {
                method: "answer".to_string(),
                argument_count: 0,
            },
            Instruction::Assign {
                variable: "x".to_string(),
            },
        ]
    );
}

#[test]
fn test_disassembly_names_calls() {
    let program = compile(&parse("log 'Hi!'").unwrap()).unwrap();
    let listing = program.disassemble("test");
    assert!(listing.contains("call log/1"));
    assert!(listing.contains("discard"));
}
