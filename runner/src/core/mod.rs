//! Deterministic, pure logic shared by the runner.
//!
//! Core modules must be free of I/O side effects. They operate on plain values
//! and return deterministic outputs suitable for tests.

pub mod outcome;
pub mod status;
