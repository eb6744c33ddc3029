use fanout_core::{CallArgs, Callable, Signature, Value};
use thiserror::Error;

/// Errors from evaluating a [`Line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LineError {
    /// The `x` argument was not numeric.
    #[error("`x` must be numeric, found {found}")]
    NotNumeric { found: &'static str },
}

/// A straight line `y = a + b * x` as a callable.
///
/// `x` may be passed positionally or by keyword and defaults to 1 when
/// omitted. Wrapped with a vectorizing configuration over `x`, a single
/// line evaluates a whole grid of points at once.
///
/// # Example
///
/// ```rust
/// use fanout_core::{CallArgs, Callable, Value, Vectorize};
/// use fanout_components::Line;
///
/// let line = Line::new(1.0, 2.0);
/// let wrapped = Vectorize::new().keys(["x"]).wrap(Line::signature(), line);
///
/// let args = CallArgs::new().arg(Value::list([0.0, 1.0, 3.0]));
/// assert_eq!(
///     wrapped.call(args).unwrap(),
///     Value::list([1.0, 3.0, 7.0]),
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    a: f64,
    b: f64,
}

impl Line {
    /// Creates a line with intercept `a` and slope `b`.
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// The declared signature of the line's call: `y(x)`.
    pub fn signature() -> Signature {
        Signature::new("y", ["x"]).with_doc("Evaluates y = a + b * x.")
    }

    /// The intercept.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// The slope.
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Evaluates the line at `x`.
    pub fn y(&self, x: f64) -> f64 {
        self.a + self.b * x
    }
}

impl Default for Line {
    fn default() -> Self {
        Self { a: 0.0, b: 1.0 }
    }
}

impl Callable for Line {
    type Error = LineError;

    fn call(&self, args: CallArgs) -> Result<Value, Self::Error> {
        let x = match args.get(0).or_else(|| args.keyword("x")) {
            None => 1.0,
            Some(Value::Float(x)) => *x,
            #[allow(clippy::cast_precision_loss)]
            Some(Value::Int(n)) => *n as f64,
            Some(other) => {
                return Err(LineError::NotNumeric {
                    found: other.type_name(),
                });
            }
        };
        Ok(Value::Float(self.y(x)))
    }
}
