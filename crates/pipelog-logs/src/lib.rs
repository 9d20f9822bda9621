//! Pipelog Logs - the retained generation chain and the active log writer

mod chain;
mod writer;

pub use chain::{over_limit, RotationChain};
pub use writer::ActiveLog;
