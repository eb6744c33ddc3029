mod wrapper;

pub use wrapper::Vectorized;

use crate::{
    callable::Callable,
    signature::Signature,
    value::{Kind, KindSet},
};

/// How a vectorized call assembles its per-element results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Returns {
    /// Use the runtime kind of the driving vector (tensor mode), or the
    /// sequence kind when vectors are consumed in parallel (zipped mode).
    #[default]
    Infer,
    /// Always assemble into the given container kind.
    Container(Kind),
    /// Discard the results and yield no value. Every underlying
    /// invocation still runs, in both tensor and zipped mode.
    Suppress,
}

/// Configuration for vectorizing a callable, fixed at wrap time.
///
/// A wrapped callable re-invokes its target once per element of any
/// vector-like argument, instead of requiring the caller to write the
/// loop. Which arguments count as vectors is controlled here:
///
/// - [`keys`](Self::keys) names the parameters eligible for expansion.
///   An empty list (the default) leaves declared and keyword arguments
///   untouched. A key naming no declared parameter is silently ignored
///   for positional matching; it may still match a keyword argument.
/// - [`types`](Self::types) restricts which container kinds qualify.
/// - [`returns`](Self::returns) governs result assembly.
/// - [`zipped`](Self::zipped) selects parallel instead of nested
///   expansion when several arguments are vectors at once.
/// - [`varargs`](Self::varargs) and [`varkw`](Self::varkw) gate the
///   variadic positional tail and undeclared keyword arguments.
///
/// # Example
///
/// ```rust
/// use std::convert::Infallible;
///
/// use fanout_core::{CallArgs, Callable, Closure, Signature, Value, Vectorize};
///
/// // f(a, b, c) = a + b + c
/// let f = Closure::new(|args: CallArgs| -> Result<Value, Infallible> {
///     let total = args
///         .positional()
///         .iter()
///         .chain(args.keywords().iter().map(|(_, value)| value))
///         .map(|value| match value {
///             Value::Int(n) => *n,
///             _ => 0,
///         })
///         .sum();
///     Ok(Value::Int(total))
/// });
///
/// let wrapped = Vectorize::new()
///     .keys(["b"])
///     .wrap(Signature::new("f", ["a", "b", "c"]), f);
///
/// // f(1, [10, 20], c = 5) expands over `b`.
/// let args = CallArgs::new().arg(1).arg(Value::list([10, 20])).kwarg("c", 5);
/// assert_eq!(wrapped.call(args).unwrap(), Value::list([16, 26]));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vectorize {
    pub(crate) keys: Vec<String>,
    pub(crate) types: KindSet,
    pub(crate) returns: Returns,
    pub(crate) zipped: bool,
    pub(crate) varargs: bool,
    pub(crate) varkw: bool,
}

impl Default for Vectorize {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            types: KindSet::ALL,
            returns: Returns::Infer,
            zipped: false,
            varargs: true,
            varkw: true,
        }
    }
}

impl Vectorize {
    /// Creates the default configuration: no keys, all container kinds
    /// eligible, inferred returns, tensor expansion, variadic positional
    /// and undeclared keyword arguments allowed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Names the parameters to consider for expansion, in order.
    #[must_use]
    pub fn keys<I>(mut self, keys: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Restricts which container kinds qualify as vectors.
    #[must_use]
    pub fn types(mut self, types: KindSet) -> Self {
        self.types = types;
        self
    }

    /// Sets how results are assembled.
    #[must_use]
    pub fn returns(mut self, returns: Returns) -> Self {
        self.returns = returns;
        self
    }

    /// Selects zipped (parallel, truncating) expansion instead of the
    /// default tensor (nested) expansion.
    #[must_use]
    pub fn zipped(mut self, zipped: bool) -> Self {
        self.zipped = zipped;
        self
    }

    /// Whether variadic positional arguments may vectorize. They are not
    /// gated by [`keys`](Self::keys), since they have no name to match.
    #[must_use]
    pub fn varargs(mut self, varargs: bool) -> Self {
        self.varargs = varargs;
        self
    }

    /// When false, keyword arguments vectorize only if their name is
    /// also a declared parameter.
    #[must_use]
    pub fn varkw(mut self, varkw: bool) -> Self {
        self.varkw = varkw;
        self
    }

    /// Wraps a callable, fixing this configuration and the callable's
    /// declared signature.
    pub fn wrap<C: Callable>(self, signature: Signature, target: C) -> Vectorized<C> {
        Vectorized::new(self, signature, target)
    }
}
