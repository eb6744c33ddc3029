use std::error::Error as StdError;

use thiserror::Error;

use crate::value::Kind;

/// Errors raised while assembling per-element results into a container.
///
/// These are construction errors in the strict sense: the expansion itself
/// succeeded, but the chosen result kind cannot hold what it produced.
/// They propagate unmodified; the caller must choose compatible types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AssembleError {
    /// A set element or map key was not hashable.
    #[error("cannot build a {container} from an unhashable {element} element")]
    Unhashable { container: Kind, element: Kind },

    /// A map was assembled from something other than a two-item tuple.
    #[error("map entries must be two-item tuples, found {found}")]
    NotAPair { found: &'static str },
}

/// Errors raised by a vectorized call.
///
/// Generic over the wrapped callable's error type so a target failure
/// reaches the caller unmodified as the [`source`](StdError::source),
/// aborting the remaining expansion with no partial results.
#[derive(Debug, PartialEq, Error)]
pub enum ExpandError<E>
where
    E: StdError + Send + Sync + 'static,
{
    /// The result container rejected the produced elements.
    #[error(transparent)]
    Assemble(#[from] AssembleError),

    /// The wrapped callable failed during a substituted invocation.
    #[error("wrapped callable failed")]
    Target(#[source] E),
}
