// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Per-visibility statistical weights.

A weight is `1/σ²`, with σ the thermal noise of a single real (or imaginary)
part of a visibility. Either σ is worked out per baseline from the antenna
SEFDs, or a single simulated σ is used for everything. Flagged visibilities
always get a weight of zero.
 */

mod error;

pub use error::NoiseError;

use log::debug;
use ndarray::prelude::*;

use crate::{math::BaselineIndex, Observation};

/// How visibility noise is determined.
#[derive(Debug, Clone, PartialEq)]
pub enum NoiseModel {
    /// σ per baseline from the radiometer equation, using each antenna's
    /// system-equivalent flux density \[Jy\]. The SEFDs are indexed by antenna
    /// number.
    PerBaseline { sefds: Vec<f64> },

    /// The same σ for every visibility, e.g. the noise injected into simulated
    /// data \[Jy\].
    Uniform { sigma: f64 },
}

/// Weights for every visibility of an observation.
#[derive(Debug, Clone)]
pub struct Weights {
    /// `[row][channel][correlation]`, matching the visibilities.
    pub weights: Array3<f64>,

    /// The number of visibilities with a non-zero weight.
    pub num_unflagged: usize,
}

impl NoiseModel {
    /// Determine the weight of every visibility in `obs`. `baseline_index`
    /// must have been built from the same observation.
    ///
    /// # Errors
    ///
    /// If any quantity going into σ (SEFDs, channel width, integration
    /// times, simulated σ) isn't strictly positive and finite, or if an
    /// antenna has no SEFD.
    pub fn compute_weights(
        &self,
        obs: &Observation,
        baseline_index: &BaselineIndex,
    ) -> Result<Weights, NoiseError> {
        let mut weights = Array3::zeros((obs.num_rows(), obs.num_chans(), obs.num_corrs()));

        match self {
            NoiseModel::PerBaseline { sefds } => {
                if let Some(antenna) = (0..obs.num_ants()).find(|&a| a >= sefds.len()) {
                    return Err(NoiseError::MissingSefd {
                        antenna,
                        num_sefds: sefds.len(),
                        num_ants: obs.num_ants(),
                    });
                }

                let int_times = obs.integration_times();
                for ((a1, a2), rows) in baseline_index.iter() {
                    for &row in rows {
                        let sigma =
                            baseline_sigma(sefds[a1], sefds[a2], obs.chan_width(), int_times[row])?;
                        weights
                            .index_axis_mut(Axis(0), row)
                            .fill(1.0 / (sigma * sigma));
                    }
                }
            }

            NoiseModel::Uniform { sigma } => {
                check_positive("simulated sigma", *sigma)?;
                weights.fill(1.0 / (sigma * sigma));
            }
        }

        // Flagged visibilities carry no weight.
        let mut num_unflagged = 0;
        for ((row, chan, corr), w) in weights.indexed_iter_mut() {
            if obs.is_flagged(row, chan, corr) {
                *w = 0.0;
            } else {
                num_unflagged += 1;
            }
        }
        debug!(
            "Computed {} weights ({num_unflagged} unflagged)",
            weights.len()
        );

        Ok(Weights {
            weights,
            num_unflagged,
        })
    }
}

/// The thermal noise σ of one real part of a visibility on a baseline, given
/// the SEFDs of its two antennas \[Jy\], the channel width \[Hz\] and the
/// integration time \[seconds\]:
///
/// σ = sqrt(SEFD1 SEFD2 / (2 Δν τ))
///
/// # Errors
///
/// Every argument must be strictly positive and finite.
pub fn baseline_sigma(
    sefd1: f64,
    sefd2: f64,
    chan_width: f64,
    int_time: f64,
) -> Result<f64, NoiseError> {
    check_positive("SEFD", sefd1)?;
    check_positive("SEFD", sefd2)?;
    check_positive("channel width", chan_width)?;
    check_positive("integration time", int_time)?;
    Ok(((sefd1 * sefd2) / (2.0 * chan_width * int_time)).sqrt())
}

fn check_positive(quantity: &'static str, value: f64) -> Result<(), NoiseError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(NoiseError::NonPositive { quantity, value })
    }
}
