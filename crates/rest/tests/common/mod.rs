//! Common test utilities for gateway testing.
//!
//! - [`harness`] - Test server over a temporary output directory
//! - [`assertions`] - HTTP response assertions

#![allow(dead_code)]

pub mod assertions;
pub mod harness;
