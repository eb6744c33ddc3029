//! Shared probe callables for the behavioral tests.

use std::convert::Infallible;
use std::sync::{Arc, Mutex};

use fanout_core::{CallArgs, Callable, Signature, Value};

/// Mirrors the classic probe `f(a, b, c=None, *args, **kwargs)`: it
/// returns the full argument picture as a tuple
/// `(a, b, c, (varargs...), {kwargs})`, so tests can assert exactly what
/// each substituted invocation received.
pub struct Spread;

impl Spread {
    /// The probe's declared signature.
    pub fn signature() -> Signature {
        Signature::new("spread", ["a", "b", "c"])
    }
}

impl Callable for Spread {
    type Error = Infallible;

    fn call(&self, args: CallArgs) -> Result<Value, Infallible> {
        let a = args.get(0).cloned().unwrap_or(Value::None);
        let b = args.get(1).cloned().unwrap_or(Value::None);
        let c = args
            .get(2)
            .or_else(|| args.keyword("c"))
            .cloned()
            .unwrap_or(Value::None);
        let varargs = args.positional().get(3..).unwrap_or(&[]).to_vec();
        let kwargs = args
            .keywords()
            .iter()
            .filter(|(name, _)| name != "c")
            .map(|(name, value)| (Value::from(name.as_str()), value.clone()))
            .collect();

        Ok(Value::Tuple(vec![
            a,
            b,
            c,
            Value::Tuple(varargs),
            Value::Map(kwargs),
        ]))
    }
}

/// Returns the same value for every invocation, so set-shaped results
/// collapse to a single element.
pub struct Constant(pub Value);

impl Callable for Constant {
    type Error = Infallible;

    fn call(&self, _args: CallArgs) -> Result<Value, Infallible> {
        Ok(self.0.clone())
    }
}

/// Records the first argument of every invocation, for checking that
/// suppressed expansions still run.
pub struct Recorder {
    log: Arc<Mutex<Vec<Value>>>,
}

impl Recorder {
    /// Creates a recorder and a handle to its invocation log.
    pub fn new() -> (Self, Arc<Mutex<Vec<Value>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let recorder = Self {
            log: Arc::clone(&log),
        };
        (recorder, log)
    }
}

impl Callable for Recorder {
    type Error = Infallible;

    fn call(&self, args: CallArgs) -> Result<Value, Infallible> {
        let first = args.get(0).cloned().unwrap_or(Value::None);
        self.log.lock().unwrap().push(first.clone());
        Ok(first)
    }
}
