//! # lutfit-rs
//!
//! `lutfit-rs` estimates the two parameters of a model by brute force: it
//! evaluates a weighted root-mean-square error over every cell of a regular
//! parameter grid (a look-up table, LUT) and picks the cell with the smallest
//! error.
//!
//! The library provides:
//! - LUT generation from explicit bounds and steps ([`grid`])
//! - Two-parameter models evaluated under array broadcasting ([`model`])
//! - Alignment of irregular measurement times onto a dense driver timeline ([`align`])
//! - Weighted RMSE surfaces and their minimum ([`surface`])
//! - Pseudo-measurement generation and an end-to-end runner ([`measurement`], [`runner`])
//!
//! ## Basic Usage
//!
//! ```
//! use lutfit_rs::grid::ParameterGrid;
//! use lutfit_rs::measurement::MeasurementSet;
//! use lutfit_rs::surface::{find_minimum, lut_rmse};
//! use ndarray::{array, Array1};
//!
//! let p0_axis = array![0.0, 5.0, 10.0];
//! let p1_axis = array![0.0, 0.0005, 0.001];
//! let grid = ParameterGrid::from_axes(p0_axis, p1_axis).unwrap();
//! let timeline = Array1::range(0.0, 10.0, 1.0);
//!
//! let t = array![0.0, 4.0, 8.0];
//! let y = t.mapv(|t| 5.0 + 0.0005 * t * t);
//! let meas = MeasurementSet::unweighted(t, y).unwrap();
//!
//! let rmse = lut_rmse(&grid, timeline.view(), &meas).unwrap();
//! let best = find_minimum(&rmse, &grid).unwrap();
//! assert_eq!(best.cell, (1, 1));
//! ```

// Public modules
pub mod error;

pub mod align;
pub mod grid;
pub mod measurement;
pub mod model;
pub mod runner;
pub mod surface;

// Re-exports for convenience
pub use error::{LutError, Result};

pub use align::{align, locate, UnmatchedPolicy};
pub use grid::{gen_lut, gen_lut_default, GridConfig, ParameterGrid};
pub use measurement::{gen_meas, MeasurementConfig, MeasurementSet};
pub use model::{model, GridModel, QuadraticModel};
pub use runner::{run, RunConfig, RunReport};
pub use surface::{find_minimum, lut_rmse, EvalStrategy, GridMinimum, RmseSurface};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
