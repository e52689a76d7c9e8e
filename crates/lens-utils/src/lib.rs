//! Shared utilities for marketlens
//!
//! This crate provides common functionality used across the marketlens
//! workspace, currently logging/tracing setup.

pub mod logging;

pub use logging::init_tracing;
