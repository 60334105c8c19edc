//! Logging initialization shared between the binaries.

pub mod tracing;
