//! Vertical stretching functions for terrain-following layer thicknesses.
//!
//! A stretching function places N + 1 interfaces between sigma = -1 (bottom)
//! and sigma = 0 (surface). Multiplying the resulting layer fractions by
//! the water-column depth gives the cell thicknesses of a sigma grid (see
//! [`ZGrid::sigma`](crate::grid::ZGrid::sigma)).
//!
//! # Available Stretching Functions
//!
//! - [`UniformStretching`]: equal layers
//! - [`SongHaidvogelStretching`]: ROMS-style surface/bottom clustering

use serde::{Deserialize, Serialize};

/// Distribution of sigma levels over the water column.
///
/// Conventions:
/// - `sigma_w[0] = -1` (bottom), `sigma_w[n] = 0` (surface)
/// - `sigma_w` strictly increasing
/// - `sigma_rho[k]` lies between `sigma_w[k]` and `sigma_w[k + 1]`
pub trait Stretching: Send + Sync {
    /// Returns `(sigma_rho, sigma_w)` with lengths `n_levels` and
    /// `n_levels + 1`.
    fn compute_sigma(&self, n_levels: usize) -> (Vec<f64>, Vec<f64>);

    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Description including parameters.
    fn description(&self) -> String {
        self.name().to_string()
    }

    /// Fraction of the column occupied by each layer, length `n_levels`.
    fn layer_fractions(&self, n_levels: usize) -> Vec<f64> {
        let (_, sigma_w) = self.compute_sigma(n_levels);
        sigma_w.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Fraction of the column associated with each interface, length
    /// `n_levels + 1`: the distance between adjacent layer centers, with
    /// half layers at the bottom and surface.
    fn interface_fractions(&self, n_levels: usize) -> Vec<f64> {
        let (sigma_rho, sigma_w) = self.compute_sigma(n_levels);

        let mut nodes = Vec::with_capacity(n_levels + 2);
        nodes.push(sigma_w[0]);
        nodes.extend_from_slice(&sigma_rho);
        nodes.push(sigma_w[n_levels]);

        nodes.windows(2).map(|w| w[1] - w[0]).collect()
    }
}

fn midpoints(sigma_w: &[f64]) -> Vec<f64> {
    sigma_w.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
}

// =============================================================================
// Uniform
// =============================================================================

/// Equal layers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UniformStretching;

impl Stretching for UniformStretching {
    fn compute_sigma(&self, n_levels: usize) -> (Vec<f64>, Vec<f64>) {
        let n = n_levels as f64;
        let sigma_w: Vec<f64> = (0..=n_levels).map(|k| -1.0 + k as f64 / n).collect();
        (midpoints(&sigma_w), sigma_w)
    }

    fn name(&self) -> &'static str {
        "uniform"
    }
}

// =============================================================================
// Song-Haidvogel
// =============================================================================

/// Song-Haidvogel stretching (Song and Haidvogel, 1994).
///
/// - `theta_s`: surface refinement, 0 (none) to ~10
/// - `theta_b`: bottom refinement, 0 (none) to ~4
/// - `hc`: critical depth in meters, reported in the description
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SongHaidvogelStretching {
    pub theta_s: f64,
    pub theta_b: f64,
    pub hc: f64,
}

impl Default for SongHaidvogelStretching {
    fn default() -> Self {
        Self {
            theta_s: 5.0,
            theta_b: 0.4,
            hc: 200.0,
        }
    }
}

impl SongHaidvogelStretching {
    pub fn new(theta_s: f64, theta_b: f64, hc: f64) -> Self {
        Self { theta_s, theta_b, hc }
    }

    /// Stretched coordinate C(s), with C(-1) = -1 and C(0) = 0.
    fn stretch(&self, s: f64) -> f64 {
        let surface = if self.theta_s > 0.0 {
            (1.0 - (self.theta_s * s).cosh()) / (self.theta_s.cosh() - 1.0)
        } else {
            s
        };
        let bottom = if self.theta_b > 0.0 {
            (self.theta_b * (s + 1.0)).tanh() / self.theta_b.tanh() - 1.0
        } else {
            s
        };

        match (self.theta_s > 0.0, self.theta_b > 0.0) {
            (true, true) => {
                let total = self.theta_s + self.theta_b;
                (self.theta_s * surface + self.theta_b * bottom) / total
            }
            (true, false) => surface,
            (false, true) => bottom,
            (false, false) => s,
        }
    }
}

impl Stretching for SongHaidvogelStretching {
    fn compute_sigma(&self, n_levels: usize) -> (Vec<f64>, Vec<f64>) {
        let n = n_levels as f64;
        let sigma_w: Vec<f64> = (0..=n_levels)
            .map(|k| self.stretch(-1.0 + k as f64 / n))
            .collect();
        (midpoints(&sigma_w), sigma_w)
    }

    fn name(&self) -> &'static str {
        "song_haidvogel"
    }

    fn description(&self) -> String {
        format!(
            "Song-Haidvogel (theta_s={:.1}, theta_b={:.1}, hc={:.0}m)",
            self.theta_s, self.theta_b, self.hc
        )
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    #[test]
    fn test_uniform_fractions() {
        let fractions = UniformStretching.layer_fractions(4);
        assert_eq!(fractions.len(), 4);
        for f in fractions {
            assert!((f - 0.25).abs() < TOL);
        }
    }

    #[test]
    fn test_interface_fractions_uniform() {
        let fractions = UniformStretching.interface_fractions(4);
        let expected = [0.125, 0.25, 0.25, 0.25, 0.125];
        assert_eq!(fractions.len(), expected.len());
        for (f, e) in fractions.iter().zip(expected) {
            assert!((f - e).abs() < TOL, "{f} != {e}");
        }
    }

    #[test]
    fn test_song_haidvogel_bounds_and_monotonicity() {
        let stretching = SongHaidvogelStretching::new(7.0, 0.1, 250.0);
        let (sigma_rho, sigma_w) = stretching.compute_sigma(35);

        assert_eq!(sigma_rho.len(), 35);
        assert!((sigma_w[0] + 1.0).abs() < TOL);
        assert!(sigma_w[35].abs() < TOL);
        assert!(sigma_w.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_song_haidvogel_surface_refinement() {
        let fractions = SongHaidvogelStretching::new(7.0, 0.0, 250.0).layer_fractions(35);
        assert!(fractions[34] < fractions[0]);
    }

    #[test]
    fn test_no_stretching_matches_uniform() {
        let sh = SongHaidvogelStretching::new(0.0, 0.0, 250.0).layer_fractions(10);
        let uniform = UniformStretching.layer_fractions(10);
        for (a, b) in sh.iter().zip(&uniform) {
            assert!((a - b).abs() < TOL);
        }
    }

    #[test]
    fn test_fractions_sum_to_one() {
        let stretching = SongHaidvogelStretching::default();
        let layers: f64 = stretching.layer_fractions(20).iter().sum();
        let faces: f64 = stretching.interface_fractions(20).iter().sum();
        assert!((layers - 1.0).abs() < TOL);
        assert!((faces - 1.0).abs() < TOL);
    }

    #[test]
    fn test_config_roundtrip_json() {
        let json = r#"{"theta_s": 7.0, "theta_b": 0.5, "hc": 250.0}"#;
        let stretching: SongHaidvogelStretching = serde_json::from_str(json).unwrap();
        assert_eq!(stretching, SongHaidvogelStretching::new(7.0, 0.5, 250.0));
        assert!(stretching.description().contains("theta_s=7.0"));
    }
}
