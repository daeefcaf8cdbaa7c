//! End-to-end scenario tests for the Nimbus importance engine.
//!
//! This crate exercises the full recalculation pipeline over small
//! hand-built economies and verifies the consensus-critical properties:
//! determinism, all-or-nothing state updates, reciprocal-flow netting,
//! and dangling-mass redistribution.

pub mod helpers;
