use rpcbridge::{rpc_fn_named, DispatchError, Dispatcher, Signature, Type, Value};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

#[tokio::test]
async fn unknown_function_invokes_nothing() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let mut dispatcher = Dispatcher::new();
    dispatcher.add(rpc_fn_named("bump", move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    assert_eq!(
        dispatcher.call("bmup", vec![]).await,
        Err(DispatchError::NoSuchFunction("bmup".to_owned()))
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    assert_eq!(dispatcher.call("bump", vec![]).await, Ok(None));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn count_mismatch_invokes_nothing() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let mut dispatcher = Dispatcher::new();
    dispatcher.add(rpc_fn_named("inc", move |n: i64| {
        counter.fetch_add(1, Ordering::SeqCst);
        n + 1
    }));

    for found in [0, 2, 3] {
        let err = dispatcher
            .call("inc", vec![Value::Int(0); found])
            .await
            .unwrap_err();
        assert_eq!(err, DispatchError::ArgumentCountMismatch { expected: 1, found });
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn later_add_replaces_earlier() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.add(rpc_fn_named("answer", || 41_i64));
    dispatcher.add(rpc_fn_named("answer", || String::from("forty-two")));

    assert!(dispatcher.contains("answer"));
    assert_eq!(
        dispatcher.call("answer", vec![]).await,
        Ok(Some(Value::from("forty-two")))
    );

    let listed = dispatcher.rpc_functions();
    assert_eq!(listed.len(), 1);
    assert_eq!(
        listed[0].signature,
        Signature {
            domain: vec![],
            range: Type::String
        }
    );
}

#[tokio::test]
async fn lists_signatures_by_name() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.add(rpc_fn_named("scale", |x: f64, by: i32| x * f64::from(by)));
    dispatcher.add(rpc_fn_named("join", |parts: Vec<String>| parts.join(" ")));

    let listed = dispatcher.rpc_functions();
    let names: Vec<_> = listed.iter().map(|info| info.name.as_str()).collect();
    assert_eq!(names, ["join", "scale"]);
    assert_eq!(
        listed[0].signature.domain,
        [Type::List(Box::new(Type::String))]
    );
    assert_eq!(listed[1].signature.domain, [Type::Float, Type::Int]);

    assert_eq!(
        dispatcher
            .call("scale", vec![Value::Float(1.5), Value::Int(4)])
            .await,
        Ok(Some(Value::Float(6.0)))
    );
    let parts = Value::List(vec![Value::from("a"), Value::from("b")]);
    assert_eq!(
        dispatcher.call("join", vec![parts]).await,
        Ok(Some(Value::from("a b")))
    );
}

#[tokio::test]
async fn out_of_range_int_is_a_type_error() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.add(rpc_fn_named("narrow", |n: i32| n));

    let err = dispatcher
        .call("narrow", vec![Value::Int(i64::MAX)])
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::ArgumentType { index: 0, .. }));
}

#[tokio::test]
async fn out_of_range_float_is_a_type_error() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.add(rpc_fn_named("half", |x: f32| x / 2.0));

    let err = dispatcher
        .call("half", vec![Value::Float(1e300)])
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::ArgumentType { index: 0, .. }));

    assert_eq!(
        dispatcher.call("half", vec![Value::Float(3.0)]).await,
        Ok(Some(Value::Float(1.5)))
    );
    let inf = dispatcher
        .call("half", vec![Value::Float(f64::INFINITY)])
        .await;
    assert_eq!(inf, Ok(Some(Value::Float(f64::INFINITY))));
}

#[test]
fn errors_survive_serialization() {
    let err = DispatchError::ArgumentCountMismatch {
        expected: 2,
        found: 0,
    };
    let json = serde_json::to_string(&err).unwrap();
    assert_eq!(serde_json::from_str::<DispatchError>(&json).unwrap(), err);
    assert_eq!(err.to_string(), "argument count mismatch: expected 2, got 0");
}
