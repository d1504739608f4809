//! # Veridex Configuration Module
//!
//! This module centralizes the tuning constants for the index core. The tree
//! constants are interdependent (node fanout is derived from the minimum
//! degree, and the hint array must fit inside a full node), so they live in
//! one place with their relationships documented and enforced through
//! compile-time assertions.
//!
//! ## Module Organization
//!
//! - [`constants`]: All numeric configuration values with dependency
//!   documentation

pub mod constants;
pub use constants::*;
