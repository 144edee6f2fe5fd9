//! # Parameter Grid (LUT)
//!
//! This module builds the look-up table of parameter pairs that the RMSE
//! surface is evaluated over. The grid is a regular rectangular lattice in
//! `(p0, p1)` space, stored as two `(Np0, Np1)` arrays in `ij` order so that
//! `p0_grid[[i, j]] == p0_axis[i]` and `p1_grid[[i, j]] == p1_axis[j]`.
//!
//! ## Example Usage
//!
//! ```rust
//! use lutfit_rs::grid::{gen_lut, GridConfig};
//!
//! let config = GridConfig {
//!     p0_min: 0.0,
//!     p0_max: 1.0,
//!     p0_step: 0.5,
//!     p1_min: 0.0,
//!     p1_max: 2.0,
//!     p1_step: 1.0,
//! };
//!
//! let grid = gen_lut(&config).unwrap();
//! assert_eq!(grid.shape(), (3, 3));
//! assert_eq!(grid.p0()[[2, 0]], 1.0);
//! assert_eq!(grid.p1()[[0, 2]], 2.0);
//! ```

pub mod config;
pub mod lut;

pub use config::GridConfig;
pub use lut::{
    arange, gen_lut, gen_lut_default, ParameterGrid, MAX_AXIS_SAMPLES, MAX_GRID_CELLS,
};
