// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

mod common;

use common::{handle, Call, Handle, IntegerBackend, RecordingBackend};
use formula_smt::{
    BackendVariable, ComparisonKind, Expression, FunctionKind, SmtLibBackend, Sort, Term,
    TranslationError, Translator, TranslatorOptions, ValueType, Variable,
};
use num::{BigInt, BigRational};
use quickcheck_macros::quickcheck;

fn lit(name: &str) -> Expression {
    Expression::literal(Variable::boolean(name), true)
}

fn int_var(name: &str) -> Term {
    Term::var(Variable::integer(name))
}

#[test_log::test]
fn test_end_to_end_integer_backend() {
    let mut translator = Translator::new(RecordingBackend::integer_only());
    let formula = Expression::and([
        lit("x"),
        Expression::greater_than(int_var("x"), Term::integer(0)),
    ]);

    let result = translator.translate(&formula).unwrap();

    assert_eq!(result, Handle(4));
    assert_eq!(
        translator.backend().calls,
        vec![
            Call::BoolVar("x".to_string()),
            Call::IntVar("x".to_string()),
            Call::IntConstant(0),
            Call::IntCompare(ComparisonKind::GreaterThan, Handle(1), Handle(2)),
            Call::And(vec![Handle(0), Handle(3)]),
        ]
    );
    assert_eq!(
        translator.variables(),
        vec![Variable::boolean("x"), Variable::integer("x")]
    );
    let sorts: Vec<Sort> = translator
        .variable_objects()
        .iter()
        .map(BackendVariable::sort)
        .collect();
    assert_eq!(sorts, vec![Sort::Bool, Sort::Integer]);
}

#[test]
fn test_variable_identity_is_stable() {
    let mut translator = Translator::new(RecordingBackend::new());
    let formula = Expression::and([
        lit("a"),
        Expression::or([
            lit("b"),
            Expression::not(lit("c")),
            Expression::implies(lit("b"), lit("d")),
        ]),
        Expression::literal(Variable::boolean("a"), false),
    ]);
    translator.translate(&formula).unwrap();

    let calls = &translator.backend().calls;
    let a_declarations = calls
        .iter()
        .filter(|c| **c == Call::BoolVar("a".to_string()))
        .count();
    assert_eq!(a_declarations, 1);
    // The negated literal wraps the object created for the first reference
    assert_eq!(calls.iter().rev().nth(1), Some(&Call::Not(Handle(0))));
    assert_eq!(translator.variables().len(), 4);
}

#[test]
fn test_numeral_variable_identity_is_stable() {
    let mut translator = Translator::new(RecordingBackend::new());
    let n = int_var("n");
    let lhs = translator.translate_term(&n).unwrap();
    translator
        .translate(&Expression::less_than(Term::integer(1), Term::integer(2)))
        .unwrap();
    let rhs = translator.translate_term(&n).unwrap();
    assert_eq!(handle(&lhs), handle(&rhs));

    let d = Term::var(Variable::double("d"));
    let first = translator.translate_term(&d).unwrap();
    let second = translator.translate_term(&d).unwrap();
    assert!(first.is_rational());
    assert_eq!(handle(&first), handle(&second));
}

#[test]
fn test_empty_connectives_are_delegated() {
    let mut translator = Translator::new(RecordingBackend::new());
    translator.translate(&Expression::and([])).unwrap();
    translator.translate(&Expression::or([])).unwrap();
    assert_eq!(
        translator.backend().calls,
        vec![Call::And(vec![]), Call::Or(vec![])]
    );
}

#[test]
fn test_mixed_comparison_routes_through_rationals() {
    let mut translator = Translator::new(RecordingBackend::new());
    translator
        .translate(&Expression::less_equal(Term::integer(1), Term::double(2.5)))
        .unwrap();
    assert_eq!(
        translator.backend().calls,
        vec![
            Call::IntConstant(1),
            Call::RationalConstant(BigRational::new(BigInt::from(5), BigInt::from(2))),
            Call::RationalCompare(ComparisonKind::LessEqual, Handle(0), Handle(1)),
        ]
    );
}

#[test]
fn test_integer_comparison_stays_integer() {
    let mut translator = Translator::new(RecordingBackend::new());
    translator
        .translate(&Expression::equals(int_var("n"), Term::integer(7)))
        .unwrap();
    assert_eq!(
        translator.backend().calls.last(),
        Some(&Call::IntCompare(ComparisonKind::Equals, Handle(0), Handle(1)))
    );
}

#[test]
fn test_mixed_comparison_rejected_without_backend_calls() {
    let mut translator = Translator::new(RecordingBackend::integer_only());
    let err = translator
        .translate(&Expression::less_than(Term::integer(1), Term::double(2.5)))
        .unwrap_err();
    assert_eq!(err, TranslationError::BackendUnsupportedType(ValueType::Double));
    assert!(translator.backend().calls.is_empty());
}

#[test]
fn test_default_rational_operations_are_never_reached() {
    let mut translator = Translator::new(IntegerBackend::default());
    let term = Term::add(
        vec![int_var("n"), Term::var(Variable::double("d"))],
        ValueType::Double,
    );
    assert_eq!(
        translator.translate_term(&term).unwrap_err(),
        TranslationError::BackendUnsupportedType(ValueType::Double)
    );
    // `n` was reduced before the rational operand was rejected
    assert_eq!(translator.backend().calls, 1);
    assert_eq!(
        translator
            .translate(&Expression::equals(Term::double(0.5), Term::integer(0)))
            .unwrap_err(),
        TranslationError::BackendUnsupportedType(ValueType::Double)
    );
    assert_eq!(translator.backend().calls, 1);
}

#[test]
fn test_implication_order_is_preserved() {
    let mut translator = Translator::new(RecordingBackend::new());
    translator
        .translate(&Expression::implies(lit("a"), lit("b")))
        .unwrap();
    translator
        .translate(&Expression::implies(lit("b"), lit("a")))
        .unwrap();
    translator
        .translate(&Expression::bi_implies(lit("b"), lit("a")))
        .unwrap();
    assert_eq!(
        translator.backend().calls,
        vec![
            Call::BoolVar("a".to_string()),
            Call::BoolVar("b".to_string()),
            Call::Implies(Handle(0), Handle(1)),
            Call::Implies(Handle(1), Handle(0)),
            Call::Equivalence(Handle(1), Handle(0)),
        ]
    );
}

#[test]
fn test_strict_mode_rejects_unseen_variables() {
    let mut translator =
        Translator::with_options(RecordingBackend::new(), TranslatorOptions::strict());
    let err = translator.translate(&lit("x")).unwrap_err();
    assert_eq!(err, TranslationError::VariableNotPreregistered("x".to_string()));
    assert!(translator.backend().calls.is_empty());
    assert!(translator.variables().is_empty());

    translator.declare(&Variable::boolean("x")).unwrap();
    translator
        .translate(&Expression::literal(Variable::boolean("x"), false))
        .unwrap();
    assert_eq!(
        translator.backend().calls,
        vec![Call::BoolVar("x".to_string()), Call::Not(Handle(0))]
    );
}

#[test]
fn test_function_children_reduced_in_preorder() {
    let mut translator = Translator::new(RecordingBackend::new());
    let term = Term::add(
        vec![
            int_var("a"),
            Term::multiply(vec![int_var("b"), Term::integer(2)], ValueType::Integer),
            int_var("a"),
        ],
        ValueType::Integer,
    );
    let result = translator.translate_term(&term).unwrap();
    assert_eq!(handle(&result), Handle(4));
    assert_eq!(
        translator.backend().calls,
        vec![
            Call::IntVar("a".to_string()),
            Call::IntVar("b".to_string()),
            Call::IntConstant(2),
            Call::IntMultiply(vec![Handle(1), Handle(2)]),
            Call::IntAdd(vec![Handle(0), Handle(3), Handle(0)]),
        ]
    );
}

#[test]
fn test_rational_function() {
    let mut translator = Translator::new(RecordingBackend::new());
    let term = Term::multiply(
        vec![Term::var(Variable::double("price")), int_var("count")],
        ValueType::Double,
    );
    let result = translator.translate_term(&term).unwrap();
    assert!(result.is_rational());
    assert_eq!(
        translator.backend().calls,
        vec![
            Call::RationalVar("price".to_string()),
            Call::IntVar("count".to_string()),
            Call::RationalMultiply(vec![Handle(0), Handle(1)]),
        ]
    );
}

#[test]
fn test_unsupported_function_for_both_sorts() {
    let mut translator = Translator::new(RecordingBackend::new());
    for result_type in [ValueType::Integer, ValueType::Double] {
        let term = Term::function(
            FunctionKind::Divide,
            vec![Term::integer(6), Term::integer(3)],
            result_type,
        );
        assert_eq!(
            translator.translate_term(&term).unwrap_err(),
            TranslationError::UnsupportedFunction {
                kind: FunctionKind::Divide,
                result_type,
            }
        );
    }
}

#[test]
fn test_unsupported_nodes_abort_translation() {
    let mut translator = Translator::new(RecordingBackend::new());
    let quantified = Expression::implies(
        lit("a"),
        Expression::Exists {
            variable: Variable::integer("i"),
            body: Box::new(Expression::greater_than(int_var("i"), Term::integer(0))),
        },
    );
    assert_eq!(
        translator.translate(&quantified).unwrap_err(),
        TranslationError::UnsupportedNode("Exists")
    );
    let cardinality = Expression::Between {
        min: 1,
        max: 2,
        children: vec![lit("a"), lit("b"), lit("c")],
    };
    assert_eq!(
        translator.translate(&cardinality).unwrap_err(),
        TranslationError::UnsupportedNode("Between")
    );
}

#[test]
fn test_same_name_under_two_sorts_in_smtlib() {
    let mut translator = Translator::new(SmtLibBackend::integer_only());
    let formula = Expression::and([
        lit("x"),
        Expression::greater_than(int_var("x"), Term::integer(0)),
    ]);
    let result = translator.translate(&formula).unwrap();
    insta::assert_snapshot!(translator.backend().script([&result]), @r###"
    (declare-const x Bool)
    (declare-const x@Int Int)
    (assert (and x (> x@Int 0)))
    (check-sat)
    "###);
}

#[test]
fn test_registry_objects_match_translation() {
    let mut translator = Translator::new(SmtLibBackend::new());
    let formula = Expression::or([lit("feature"), Expression::not(lit("feature"))]);
    let result = translator.translate(&formula).unwrap();
    let objects = translator.variable_objects();
    assert_eq!(objects.len(), 1);
    let feature = objects[0].as_bool().unwrap();
    assert_eq!(result.to_string(), "(or feature (not feature))");
    assert_eq!(feature.to_string(), "feature");
}

#[quickcheck]
fn prop_repeated_literals_share_one_object(names: Vec<String>) -> bool {
    let mut translator = Translator::new(RecordingBackend::new());
    let literals: Vec<Expression> = names.iter().map(|n| lit(n)).collect();
    let first: Vec<Handle> = literals
        .iter()
        .map(|l| translator.translate(l).unwrap())
        .collect();
    let second: Vec<Handle> = literals
        .iter()
        .map(|l| translator.translate(l).unwrap())
        .collect();
    let mut distinct = names.clone();
    distinct.sort();
    distinct.dedup();
    first == second && translator.variables().len() == distinct.len()
}
