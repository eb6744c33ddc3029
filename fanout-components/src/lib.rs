//! Demonstration callables for fanout, a vectorizing call wrapper.

mod line;
mod lookup;

pub use line::{Line, LineError};
pub use lookup::{IndexError, Indexer};
