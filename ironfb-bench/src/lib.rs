//! # IronFB Bench
//!
//! Benchmarking utilities for IronFB generation throughput.

pub mod schema;
