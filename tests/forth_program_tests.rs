use forth::evaluate;
use forth::runtime::built_ins::register_built_in_words;
use forth::runtime::config::InterpreterConfig;
use forth::runtime::error::ErrorKind;
use forth::runtime::interpreter::forth_interpreter::ForthInterpreter;
use forth::runtime::interpreter::{CodeManagement, Interpreter, InterpreterStack, WordManagement};

fn new_interpreter() -> ForthInterpreter {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let mut interp = ForthInterpreter::new();
    register_built_in_words(&mut interp);
    interp
}

#[test]
fn empty_program() {
    let empty: [&str; 0] = [];

    assert_eq!(evaluate(&empty).unwrap(), Vec::<i64>::new());
    assert_eq!(evaluate(&[""]).unwrap(), Vec::<i64>::new());
}

#[test]
fn lines_run_in_order() {
    let result = evaluate(&["1 2", "+", "dup", "*"]).unwrap();
    assert_eq!(result, vec![9]);
}

#[test]
fn definition_spans_lines() {
    let result = evaluate(&[": square", "dup *", ";", "3 square"]).unwrap();
    assert_eq!(result, vec![9]);
}

#[test]
fn owned_lines_are_accepted() {
    let lines = vec!["5 6".to_string(), "swap".to_string()];
    assert_eq!(evaluate(lines.as_slice()).unwrap(), vec![6, 5]);
}

#[test]
fn same_program_same_result() {
    let program = [": foo 2 ;", "foo foo *"];

    let first = evaluate(&program).unwrap();
    let second = evaluate(&program).unwrap();

    assert_eq!(first, vec![4]);
    assert_eq!(first, second);
}

#[test]
fn definitions_do_not_leak_between_runs() {
    assert_eq!(evaluate(&[": foo 1 ;", "foo"]).unwrap(), vec![1]);

    let error = evaluate(&["foo"]).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::UnknownWord);
}

#[test]
fn later_definitions_are_seen_at_expansion_time() {
    // The body of bar refers to foo before foo exists, it only needs to exist when bar runs.
    let result = evaluate(&[": bar foo 1 + ;", ": foo 1 ;", "bar"]).unwrap();
    assert_eq!(result, vec![2]);

    let error = evaluate(&[": bar foo ;", "bar"]).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::UnknownWord);
}

#[test]
fn definition_bodies_end_at_the_first_semicolon() {
    // The outer definition takes the first ;, so the captured : inner 7 is left unterminated.
    let error = evaluate(&[": make : inner 7 ;", "make"]).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::MalformedDefinition);
    assert!(error.error().contains("inner"));
}

#[test]
fn failing_words_leave_the_stack_alone() {
    let mut interp = new_interpreter();

    let error = interp.process_source("<test>", "1 2 3 +").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InsufficientOperands);
    assert_eq!(interp.stack(), &vec![1, 2, 3]);

    let mut interp = new_interpreter();

    let error = interp.process_source("<test>", "1 swap").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InsufficientOperands);
    assert_eq!(interp.stack(), &vec![1]);
}

#[test]
fn lone_operator_pushes_nothing() {
    let mut interp = new_interpreter();

    assert!(interp.process_source("<test>", "+").is_err());
    assert!(interp.stack().is_empty());
    assert_eq!(interp.stack_max_depth(), 0);
}

#[test]
fn evaluation_stops_at_first_error() {
    let mut interp = new_interpreter();

    let error = interp.process_source("<test>", "1 0 / 5").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::DivisionByZero);
    assert_eq!(interp.stack(), &vec![1, 0]);
}

#[test]
fn error_names_the_offending_token() {
    let error = evaluate(&["1 2", "3 frobnicate"]).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::UnknownWord);
    assert!(error.error().contains("frobnicate"));

    let location = error.location().clone().unwrap();
    assert_eq!(location.path(), "<input>");
    assert_eq!(location.line(), 2);
    assert_eq!(location.column(), 3);
}

#[test]
fn operator_messages_are_distinct() {
    let add = evaluate(&["+"]).unwrap_err();
    let sub = evaluate(&["-"]).unwrap_err();

    assert!(add.error().contains("'+'"));
    assert!(sub.error().contains("'-'"));
    assert_ne!(add.error(), sub.error());
}

#[test]
fn numeric_names_are_rejected_before_the_body() {
    let error = evaluate(&[": 3 foo ;"]).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::InvalidRedefinition);
    assert!(error.error().contains('3'));
}

#[test]
fn errors_inside_words_report_the_call_stack() {
    let error = evaluate(&[": inner 0 / ;", ": outer 1 inner ;", "outer"]).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::DivisionByZero);

    let call_stack = error.call_stack().clone().unwrap();
    let words: Vec<&String> = call_stack.iter().map(|item| item.word()).collect();
    assert_eq!(words, vec!["outer", "inner"]);

    // Each item points at the token that invoked the word.
    assert_eq!(call_stack[0].location().line(), 3);
    assert_eq!(call_stack[1].location().line(), 2);
    assert_eq!(call_stack[1].location().column(), 11);

    let report = error.to_string();
    assert!(report.contains("Call stack"));
    assert!(report.contains("outer"));
}

#[test]
fn call_stack_is_empty_after_success() {
    let mut interp = new_interpreter();

    interp.process_source("<test>", ": foo 1 ; foo").unwrap();

    assert!(interp.call_stack().is_empty());
    assert_eq!(interp.stack(), &vec![1]);
}

#[test]
fn expansion_depth_follows_the_config() {
    let mut interp = ForthInterpreter::with_config(InterpreterConfig::new(3));
    register_built_in_words(&mut interp);

    assert_eq!(interp.config().max_expansion_depth, 3);

    interp
        .process_source("<test>", ": a 1 ; : b a ; : c b ; c")
        .unwrap();
    assert_eq!(interp.stack(), &vec![1]);

    let error = interp.process_source("<test>", ": d c ; d").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::ExpansionDepthExceeded);
}

#[test]
fn deep_expansion_limits_fail_cleanly() {
    let mut interp = ForthInterpreter::with_config(InterpreterConfig::new(100_000));
    register_built_in_words(&mut interp);

    let error = interp
        .process_source("<test>", ": foo foo ; foo")
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::ExpansionDepthExceeded);
    assert_eq!(error.call_stack().as_ref().map(|stack| stack.len()), Some(100_000));

    // The abandoned expansions are unwound, the interpreter is usable afterwards.
    assert!(interp.call_stack().is_empty());
    interp.process_source("<test>", "1 2 +").unwrap();
    assert_eq!(interp.stack(), &vec![3]);
}

#[test]
fn deep_non_recursive_chains_complete() {
    let mut source = String::from(": w0 1 ;");

    for index in 1..5_000 {
        source.push_str(&format!("\n: w{} w{} ;", index, index - 1));
    }

    source.push_str("\nw4999");

    let mut interp = ForthInterpreter::with_config(InterpreterConfig::new(5_000));
    register_built_in_words(&mut interp);

    interp.process_source("<test>", &source).unwrap();
    assert_eq!(interp.stack(), &vec![1]);
}

#[test]
fn listing_shows_built_in_and_user_words() {
    let mut interp = new_interpreter();

    interp.process_source("<test>", ": Square dup * ;").unwrap();

    let listing = interp.to_string();

    assert!(listing.starts_with("10 built-in words."));
    assert!(listing.contains("( value -- value value )  --  Duplicate the top value"));
    assert!(listing.contains("1 words defined."));
    assert!(listing.contains("square  --  dup *"));
}

#[test]
fn dictionary_keeps_user_words() {
    let mut interp = new_interpreter();

    interp
        .process_lines("<test>", &[": Double 2 * ;", ": double dup + ;"])
        .unwrap();

    assert_eq!(interp.dictionary().len(), 1);

    let word = interp.find_word("double").unwrap();
    assert_eq!(word.body.len(), 2);
    assert_eq!(word.location.line(), 2);
}

#[test]
fn interpreter_keeps_state_between_sources() {
    let mut interp = new_interpreter();

    interp.process_source("<first>", ": sq dup * ; 4").unwrap();
    interp.process_source("<second>", "sq").unwrap();

    assert_eq!(interp.into_stack(), vec![16]);
}

#[test]
fn max_depth_is_tracked() {
    let mut interp = new_interpreter();

    interp.process_source("<test>", "1 2 3 drop drop").unwrap();

    assert_eq!(interp.stack(), &vec![1]);
    assert_eq!(interp.stack_max_depth(), 3);
}
