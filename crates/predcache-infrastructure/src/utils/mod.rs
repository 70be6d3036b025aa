//! Infrastructure utilities

pub mod timing;

pub use timing::TimedOperation;
