//! Property tests for the RMSE surface and its building blocks.

pub mod alignment;
pub mod surface;
