//! Sigma-coordinate layer distributions.
//!
//! Used to build terrain-following grids whose cell thickness is a fixed
//! fraction of the local water-column depth:
//!
//! ```text
//! h[k] = (eta + H) * (sigma_w[k + 1] - sigma_w[k])
//! ```
//!
//! Columns with zero depth produce zero-thickness cells, which the tendency
//! pipeline masks before dividing.
//!
//! # Example
//!
//! ```
//! use wmt_rs::vertical::{SongHaidvogelStretching, Stretching};
//!
//! let stretching = SongHaidvogelStretching::new(7.0, 0.5, 250.0);
//! let fractions = stretching.layer_fractions(40);
//! assert_eq!(fractions.len(), 40);
//! assert!((fractions.iter().sum::<f64>() - 1.0).abs() < 1e-10);
//! ```

mod stretching;

pub use stretching::{SongHaidvogelStretching, Stretching, UniformStretching};
