//! Integration tests for the lutfit-rs library
//!
//! These tests run the whole pipeline, from LUT generation through the
//! reported minimum.

// Full runs with pseudo-measurements
pub mod pipeline;

// Run configuration files
pub mod config_files;
