use std::convert::Infallible;

use fanout_components::Indexer;
use fanout_core::{
    CallArgs, Callable, Closure, ExpandError, Kind, KindSet, Returns, Value, Vectorize,
};
use integration_tests::{Constant, Recorder, Spread};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn as_list(value: &Value) -> &[Value] {
    match value {
        Value::List(items) => items,
        other => panic!("expected a list, got {other:?}"),
    }
}

fn as_tuple(value: &Value) -> &[Value] {
    match value {
        Value::Tuple(items) => items,
        other => panic!("expected a tuple, got {other:?}"),
    }
}

fn long_list() -> Value {
    Value::list(0..10_i64)
}

#[test]
fn forced_list_return_over_a_long_vector() {
    init_logging();
    let wrapped = Vectorize::new()
        .keys(["a"])
        .types(KindSet::of(&[Kind::List, Kind::Tuple]))
        .returns(Returns::Container(Kind::List))
        .wrap(Spread::signature(), Spread);

    let args = CallArgs::new()
        .arg(long_list())
        .arg(Value::list([2, 9]))
        .kwarg("c", Value::list([3, 4]))
        .kwarg("d", Value::list([6, 7]));
    let result = wrapped.call(args).unwrap();

    // Only `a` is keyed, so the other vectors arrive untouched.
    let items = as_list(&result);
    assert_eq!(items.len(), 10);
    assert_eq!(
        items[0],
        Value::Tuple(vec![
            Value::Int(0),
            Value::list([2, 9]),
            Value::list([3, 4]),
            Value::Tuple(vec![]),
            Value::Map(vec![(Value::from("d"), Value::list([6, 7]))]),
        ])
    );
}

#[test]
fn scalar_arguments_pass_through() {
    let wrapped = Vectorize::new()
        .keys(["a"])
        .types(KindSet::of(&[Kind::List, Kind::Tuple]))
        .returns(Returns::Container(Kind::List))
        .wrap(Spread::signature(), Spread);

    // A set is not an eligible type here, so nothing expands.
    let args = CallArgs::new()
        .arg(Value::set(0..10_i64).unwrap())
        .arg(Value::list([2, 9]));
    let direct = Spread.call(
        CallArgs::new()
            .arg(Value::set(0..10_i64).unwrap())
            .arg(Value::list([2, 9])),
    );

    assert_eq!(wrapped.call(args).ok(), direct.ok());
}

#[test]
fn zipped_iterates_all_vectors_in_parallel() {
    init_logging();
    let wrapped = Vectorize::new()
        .keys(["a", "b", "c", "d"])
        .returns(Returns::Container(Kind::List))
        .zipped(true)
        .wrap(Spread::signature(), Spread);

    let args = CallArgs::new()
        .arg(long_list())
        .arg(Value::list([2, 3, 4, 0]))
        .kwarg("c", Value::list([3, 4, 6, 7]))
        .kwarg("d", Value::list(["a", "b", "c"]));
    let result = wrapped.call(args).unwrap();

    // Truncated to `d`, the shortest vector.
    let items = as_list(&result);
    assert_eq!(items.len(), 3);
    assert_eq!(
        items[0],
        Value::Tuple(vec![
            Value::Int(0),
            Value::Int(2),
            Value::Int(3),
            Value::Tuple(vec![]),
            Value::Map(vec![(Value::from("d"), Value::from("a"))]),
        ])
    );
}

#[test]
fn tensor_nests_one_vector_per_level() {
    let wrapped = Vectorize::new()
        .keys(["b", "c", "d"])
        .wrap(Spread::signature(), Spread);

    let args = CallArgs::new()
        .arg(long_list())
        .arg(Value::list([2, 3, 4]))
        .kwarg("c", Value::list([3, 4, 6, 7]))
        .kwarg("d", Value::list(["a", "b", "c"]));
    let result = wrapped.call(args).unwrap();

    // b drives the outer level, then c, then d.
    let outer = as_list(&result);
    assert_eq!(outer.len(), 3);
    let middle = as_list(&outer[0]);
    assert_eq!(middle.len(), 4);
    let inner = as_list(&middle[0]);
    assert_eq!(inner.len(), 3);

    // The innermost results are the probe's tuples, with `a` untouched.
    let leaf = as_tuple(&inner[0]);
    assert_eq!(leaf[0], long_list());
    assert_eq!(leaf[1], Value::Int(2));
    assert_eq!(leaf[2], Value::Int(3));
}

#[test]
fn variadic_vectors_expand_before_keywords() {
    let wrapped = Vectorize::new()
        .keys(["b", "c", "d"])
        .wrap(Spread::signature(), Spread);

    // b and c are scalars; the variadic tuple outranks the keyword.
    let args = CallArgs::new()
        .arg(long_list())
        .arg("x")
        .arg("y")
        .arg(Value::tuple([123, 321]))
        .kwarg("d", Value::list(["a", "b", "c"]));
    let result = wrapped.call(args).unwrap();

    let outer = as_tuple(&result);
    assert_eq!(outer.len(), 2);
    let inner = as_list(&outer[0]);
    assert_eq!(inner.len(), 3);
}

#[test]
fn tuple_vectors_infer_tuple_results() {
    let wrapped = Vectorize::new()
        .keys(["b", "c", "d"])
        .wrap(Spread::signature(), Spread);

    let args = CallArgs::new()
        .arg(long_list())
        .arg(Value::tuple([123, 321]))
        .kwarg("d", Value::list(["a", "b", "c"]));
    let result = wrapped.call(args).unwrap();

    let outer = as_tuple(&result);
    assert_eq!(outer.len(), 2);
    assert_eq!(as_list(&outer[0]).len(), 3);
}

#[test]
fn constant_results_collapse_into_a_set() {
    let wrapped = Vectorize::new()
        .keys(["b"])
        .wrap(Spread::signature(), Constant(Value::from("same")));

    let args = CallArgs::new()
        .arg(1)
        .arg(Value::set([123, 321]).unwrap());
    assert_eq!(
        wrapped.call(args).unwrap(),
        Value::Set(vec![Value::from("same")])
    );
}

#[test]
fn suppressed_expansion_runs_every_invocation() {
    let (recorder, log) = Recorder::new();
    let wrapped = Vectorize::new()
        .keys(["a"])
        .types(KindSet::of(&[Kind::List, Kind::Tuple]))
        .returns(Returns::Suppress)
        .wrap(Spread::signature(), recorder);

    let args = CallArgs::new()
        .arg(Value::list([2, 9]))
        .kwarg("c", Value::list([3, 4]));
    assert_eq!(wrapped.call(args).unwrap(), Value::None);
    assert_eq!(
        *log.lock().unwrap(),
        vec![Value::Int(2), Value::Int(9)]
    );

    // Without a vector the real result comes back.
    let args = CallArgs::new().arg(7).kwarg("c", 5);
    assert_eq!(wrapped.call(args).unwrap(), Value::Int(7));
}

#[test]
fn varargs_false_leaves_the_variadic_tail_alone() {
    let config = Vectorize::new()
        .keys(["a", "b", "c"])
        .types(KindSet::of(&[Kind::List, Kind::Tuple]));

    let restricted = config
        .clone()
        .varargs(false)
        .wrap(Spread::signature(), Spread);
    let args = CallArgs::new()
        .arg("A")
        .arg("B")
        .arg(Value::list([2]))
        .arg(Value::list([6, 7, 5]));
    let result = restricted.call(args.clone()).unwrap();

    // Only c expands; the variadic list rides along untouched.
    let outer = as_list(&result);
    assert_eq!(outer.len(), 1);
    let leaf = as_tuple(&outer[0]);
    assert_eq!(leaf[3], Value::Tuple(vec![Value::list([6, 7, 5])]));

    // By default the variadic list expands at the next level.
    let unrestricted = config.wrap(Spread::signature(), Spread);
    let result = unrestricted.call(args).unwrap();
    let outer = as_list(&result);
    assert_eq!(outer.len(), 1);
    assert_eq!(as_list(&outer[0]).len(), 3);
}

#[test]
fn varkw_false_restricts_keywords_to_declared_parameters() {
    let wrapped = Vectorize::new()
        .keys(["c", "d"])
        .types(KindSet::of(&[Kind::List, Kind::Tuple]))
        .varkw(false)
        .wrap(Spread::signature(), Spread);

    let args = CallArgs::new()
        .arg("A")
        .arg("B")
        .kwarg("c", Value::list([2]))
        .kwarg("d", Value::list([6, 7, 5]));
    let result = wrapped.call(args).unwrap();

    // Only the declared c expands; d stays a keyword vector.
    let outer = as_list(&result);
    assert_eq!(outer.len(), 1);
    let leaf = as_tuple(&outer[0]);
    assert_eq!(
        leaf[4],
        Value::Map(vec![(Value::from("d"), Value::list([6, 7, 5]))])
    );
}

#[test]
fn empty_keys_round_trip() {
    let wrapped = Vectorize::new().wrap(Spread::signature(), Spread);

    let args = CallArgs::new()
        .arg(Value::list([1, 2]))
        .arg(Value::tuple([3, 4]))
        .kwarg("c", Value::set([5]).unwrap());
    let direct = Spread.call(args.clone());

    assert_eq!(wrapped.call(args).ok(), direct.ok());
}

fn adder() -> Closure<impl Fn(CallArgs) -> Result<Value, Infallible>, Infallible> {
    Closure::new(|args: CallArgs| -> Result<Value, Infallible> {
        let total = args
            .positional()
            .iter()
            .chain(args.keywords().iter().map(|(_, value)| value))
            .map(|value| match value {
                Value::Int(n) => *n,
                _ => 0,
            })
            .sum();
        Ok(Value::Int(total))
    })
}

#[test]
fn three_parameter_tensor_scenario() {
    let wrapped = Vectorize::new()
        .keys(["b"])
        .wrap(fanout_core::Signature::new("f", ["a", "b", "c"]), adder());

    // f(1, [10, 20], c = 5) -> [f(1, 10, 5), f(1, 20, 5)]
    let args = CallArgs::new()
        .arg(1)
        .arg(Value::list([10, 20]))
        .kwarg("c", 5);
    assert_eq!(wrapped.call(args).unwrap(), Value::list([16, 26]));
}

#[test]
fn three_parameter_zipped_scenario() {
    let wrapped = Vectorize::new()
        .keys(["b", "c"])
        .zipped(true)
        .wrap(fanout_core::Signature::new("f", ["a", "b", "c"]), adder());

    // f(1, [10, 20], c = [5, 6, 7]) -> [f(1, 10, 5), f(1, 20, 6)]
    let args = CallArgs::new()
        .arg(1)
        .arg(Value::list([10, 20]))
        .kwarg("c", Value::list([5, 6, 7]));
    assert_eq!(wrapped.call(args).unwrap(), Value::list([16, 27]));
}

#[test]
fn target_errors_abort_the_expansion() {
    let wrapped = Vectorize::new()
        .keys(["item"])
        .wrap(Indexer::signature(), Indexer::new([10, 20, 30]));

    let args = CallArgs::new().arg(Value::tuple([0, 99]));
    assert!(matches!(
        wrapped.call(args),
        Err(ExpandError::Target(_))
    ));
}
