use shapeguard_core::{curry, func, Function, Value};
use std::cell::RefCell;
use std::rc::Rc;

fn sum3() -> Function {
    Function::new("sum3", 3, |args| {
        Value::from(args.iter().filter_map(Value::as_f64).sum::<f64>())
    })
}

#[test]
fn stepwise_application_equals_single_call() {
    let curried = curry(&sum3());

    let one_shot = curried
        .call(&[Value::from(1), Value::from(2), Value::from(3)])
        .complete()
        .expect("saturated");

    let step = curried
        .call(&[Value::from(1)])
        .partial()
        .expect("needs two more")
        .call(&[Value::from(2)])
        .partial()
        .expect("needs one more")
        .call(&[Value::from(3)])
        .complete()
        .expect("saturated");

    assert_eq!(one_shot, Value::Number(6.0));
    assert_eq!(step, one_shot);
}

#[test]
fn extra_arguments_are_dropped() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let recorder = Rc::clone(&seen);
    let record3 = Function::new("record3", 3, move |args| {
        recorder.borrow_mut().push(args.len());
        Value::from(args.iter().filter_map(Value::as_f64).sum::<f64>())
    });

    let result = func(&record3)
        .call(&[Value::from(1), Value::from(2), Value::from(3), Value::from(4)])
        .complete()
        .expect("saturated");

    assert_eq!(result, Value::Number(6.0));
    assert_eq!(*seen.borrow(), vec![3]);
}

#[test]
fn overshooting_a_partial_also_truncates() {
    let partial = curry(&sum3())
        .call(&[Value::from(10)])
        .partial()
        .expect("partial");

    let result = partial
        .call(&[Value::from(1), Value::from(2), Value::from(100)])
        .complete()
        .expect("saturated");
    assert_eq!(result, Value::Number(13.0));
}

#[test]
fn wrapped_function_runs_only_at_saturation() {
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    let pair = Function::new("pair", 2, move |_| {
        *counter.borrow_mut() += 1;
        Value::Undefined
    });

    let partial = curry(&pair).call(&[Value::from(1)]);
    assert!(!partial.is_complete());
    assert_eq!(*calls.borrow(), 0);

    partial
        .partial()
        .expect("partial")
        .call(&[Value::from(2)]);
    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn curried_function_value_chains_through_host_calls() {
    let entry = curry(&sum3()).into_function();
    assert_eq!(entry.arity(), 3);

    let step = entry.call(&[Value::from(1), Value::from(2)]);
    let last = step.as_function().expect("partial becomes a function");
    assert_eq!(last.call(&[Value::from(3)]), Value::Number(6.0));
}
