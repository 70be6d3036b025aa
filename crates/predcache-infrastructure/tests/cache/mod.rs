//! Cache Tests
//!
//! Manager, invalidation, warming and memoization over in-memory and
//! fault-injecting remote stores.

mod health_test;
mod manager_test;
