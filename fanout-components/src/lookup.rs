use fanout_core::{CallArgs, Callable, Signature, Value};
use thiserror::Error;

/// Errors from looking up an [`Indexer`] item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// No `item` argument was supplied.
    #[error("missing `item` argument")]
    Missing,

    /// The `item` argument was not an integer.
    #[error("`item` must be an integer index, found {found}")]
    NotAnIndex { found: &'static str },

    /// The index does not address a stored item.
    #[error("index {index} is out of bounds for {len} items")]
    OutOfBounds { index: i64, len: usize },
}

/// Looks up items of a stored sequence by index.
///
/// A negative index counts from the end. Wrapped with a vectorizing
/// configuration over `item`, a tuple of indices selects a tuple of
/// items in one call.
///
/// # Example
///
/// ```rust
/// use fanout_core::{CallArgs, Callable, Value, Vectorize};
/// use fanout_components::Indexer;
///
/// let items = Indexer::new((-9..=10).rev());
/// let wrapped = Vectorize::new()
///     .keys(["item"])
///     .wrap(Indexer::signature(), items);
///
/// let args = CallArgs::new().arg(Value::tuple([1, 3, 5]));
/// assert_eq!(wrapped.call(args).unwrap(), Value::tuple([9, 7, 5]));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Indexer {
    items: Vec<Value>,
}

impl Indexer {
    /// Creates an indexer over the given items.
    pub fn new<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// The declared signature of the lookup call: `get(item)`.
    pub fn signature() -> Signature {
        Signature::new("get", ["item"])
    }

    fn lookup(&self, index: i64) -> Result<&Value, IndexError> {
        let len = self.items.len();
        let resolved = if index < 0 {
            index + len as i64
        } else {
            index
        };
        usize::try_from(resolved)
            .ok()
            .and_then(|at| self.items.get(at))
            .ok_or(IndexError::OutOfBounds { index, len })
    }
}

impl Callable for Indexer {
    type Error = IndexError;

    fn call(&self, args: CallArgs) -> Result<Value, Self::Error> {
        let item = args
            .get(0)
            .or_else(|| args.keyword("item"))
            .ok_or(IndexError::Missing)?;
        match item {
            Value::Int(index) => self.lookup(*index).cloned(),
            other => Err(IndexError::NotAnIndex {
                found: other.type_name(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_by_index() {
        let items = Indexer::new([10, 20, 30]);

        assert_eq!(items.call(CallArgs::new().arg(1)), Ok(Value::Int(20)));
        assert_eq!(
            items.call(CallArgs::new().kwarg("item", 0)),
            Ok(Value::Int(10))
        );
        assert_eq!(items.call(CallArgs::new().arg(-1)), Ok(Value::Int(30)));
    }

    #[test]
    fn reports_bad_indices() {
        let items = Indexer::new([10, 20, 30]);

        assert_eq!(
            items.call(CallArgs::new().arg(3)),
            Err(IndexError::OutOfBounds { index: 3, len: 3 })
        );
        assert_eq!(
            items.call(CallArgs::new().arg("first")),
            Err(IndexError::NotAnIndex { found: "str" })
        );
        assert_eq!(items.call(CallArgs::new()), Err(IndexError::Missing));
    }
}
