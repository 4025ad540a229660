//! Cycle-Driven RTL Simulation Harness.
//!
//! This crate drives a clocked device model through simulated time. It owns
//! the time counter and the clock, evaluates the model once per clock edge,
//! stops when the model raises its finished indicator, and then finalizes
//! the model and persists coverage.
//!
//! # Architecture
//!
//! * **Context**: run configuration, simulated time and the latched stop flag.
//! * **Clock**: one edge per tick, so a full period spans two ticks.
//! * **Loop**: check-before-execute state machine (`Running` → `Stopped`).
//! * **Device models**: anything implementing [`dut::DeviceModel`].
//!
//! # Modules
//!
//! * `common`: Shared types and error handling.
//! * `config`: Configuration loading and parsing.
//! * `dut`: Device model interface and built-in models.
//! * `sim`: Context, clock, coverage and the simulation loop.
//! * `stats`: Run statistics collection.

/// Shared types and error handling.
///
/// Provides the clock level, time unit and [`common::SimError`] types used
/// throughout the harness.
pub mod common;

/// Configuration system for verbosity, randomization, coverage and paths.
///
/// Loads and parses TOML configuration files; every field has a default.
pub mod config;

/// Device model interface and the models bundled with the harness.
pub mod dut;

/// Simulation core: context, clock driver, coverage database and loop.
pub mod sim;

/// Run statistics collection and reporting.
pub mod stats;
