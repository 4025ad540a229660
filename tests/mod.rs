//! Test module organization.
//!
//! This module organizes all integration tests for the simulation harness.





/// Simulation loop state machine and termination tests.
mod harness_tests;
