//! Crate-internal test suites.
//!
//! - `common`: shared fixtures
//! - `property`: proptest invariants
//! - `unit`: mock-backed and HTTP-mocked unit tests

mod property;
mod unit;
