use std::marker::PhantomData;

use crate::{args::CallArgs, value::Value};

/// A function-like target that can be called with dynamic arguments.
///
/// `Callable` is the seam the vectorizing wrapper works against: anything
/// that takes [`CallArgs`] and produces a [`Value`] can be wrapped, and
/// the wrapper itself is a `Callable` again, so wrapped callables compose.
///
/// Each callable defines its own `Error` type, allowing it to determine
/// what constitutes a failure within its domain.
///
/// # Example
///
/// ```rust
/// use std::convert::Infallible;
///
/// use fanout_core::{CallArgs, Callable, Value};
///
/// struct Sum;
///
/// impl Callable for Sum {
///     type Error = Infallible;
///
///     fn call(&self, args: CallArgs) -> Result<Value, Infallible> {
///         let total = args
///             .positional()
///             .iter()
///             .map(|value| match value {
///                 Value::Int(n) => *n,
///                 _ => 0,
///             })
///             .sum();
///         Ok(Value::Int(total))
///     }
/// }
///
/// let args = CallArgs::new().arg(1).arg(2).arg(3);
/// assert_eq!(Sum.call(args), Ok(Value::Int(6)));
/// ```
pub trait Callable {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Calls the target with the given arguments.
    ///
    /// # Errors
    ///
    /// Each callable defines its own `Error` type; failures propagate to
    /// the caller unmodified.
    fn call(&self, args: CallArgs) -> Result<Value, Self::Error>;
}

/// A wrapper that allows using plain functions as callables.
pub struct Closure<F, E> {
    function: F,
    _marker: PhantomData<E>,
}

impl<F, E> Closure<F, E> {
    /// Creates a new closure-based callable.
    pub const fn new(function: F) -> Self {
        Self {
            function,
            _marker: PhantomData,
        }
    }
}

impl<F, E> Callable for Closure<F, E>
where
    F: Fn(CallArgs) -> Result<Value, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    fn call(&self, args: CallArgs) -> Result<Value, Self::Error> {
        (self.function)(args)
    }
}

impl<F, E> From<F> for Closure<F, E>
where
    F: Fn(CallArgs) -> Result<Value, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    /// Converts a function into a `Closure` callable.
    fn from(func: F) -> Self {
        Closure::new(func)
    }
}
