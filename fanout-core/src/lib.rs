//! Vectorize callables by iteration: wrap a callable once, and every
//! vector-like argument fans the call out over its elements.

mod args;
mod callable;
mod error;
mod signature;
mod value;
mod vectorize;

pub use args::CallArgs;
pub use callable::{Callable, Closure};
pub use error::{AssembleError, ExpandError};
pub use signature::Signature;
pub use value::{Kind, KindSet, Value};
pub use vectorize::{Returns, Vectorize, Vectorized};
